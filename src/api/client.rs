use serde_json::Value;
use yansi::Paint;
use std::sync::atomic::{AtomicBool, Ordering};

use super::error::ApiError;
use crate::utils::build_query_string;

static SILENT: AtomicBool = AtomicBool::new(false);

pub fn set_silent(silent: bool) {
    SILENT.store(silent, Ordering::Relaxed);
}

fn log_output(msg: String) {
    if !SILENT.load(Ordering::Relaxed) {
        println!("{}", msg);
    }
}

/// Query pairs for a command: the command first, then its parameters,
/// then the response format and the session key when one is configured.
pub fn command_pairs(command: &str, params: &[(&str, String)], session_key: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(params.len() + 3);
    pairs.push(("command".to_string(), command.to_string()));
    for (k, v) in params {
        pairs.push((k.to_string(), v.clone()));
    }
    pairs.push(("response".to_string(), "json".to_string()));
    if !session_key.is_empty() {
        pairs.push(("sessionkey".to_string(), session_key.to_string()));
    }
    pairs
}

/// Returns the error carried by a `{"<x>response": {"errorcode": .., "errortext": ..}}` envelope.
pub fn remote_error(payload: &Value) -> Option<ApiError> {
    let obj = payload.as_object()?;
    obj.values().find_map(|inner| {
        let code = inner.get("errorcode")?;
        let code = code
            .as_i64()
            .or_else(|| code.as_str().and_then(|s| s.parse().ok()))
            .unwrap_or_default();
        let text = inner
            .get("errortext")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown error")
            .to_string();
        Some(ApiError::Remote { code, text })
    })
}

/// Core HTTP client function for management server commands.
/// Handles the session key, request building, and error envelopes.
pub async fn api_call(
    client: &reqwest::Client,
    api_base_url: &str,
    session_key: &str,
    command: &str,
    params: &[(&str, String)],
) -> Result<Value, ApiError> {
    let pairs = command_pairs(command, params, session_key);
    let url = format!("{}?{}", api_base_url, build_query_string(&pairs));

    // --- Curl Logging ---
    let masked: Vec<(String, String)> = pairs
        .iter()
        .map(|(k, v)| {
            if k == "sessionkey" {
                (k.clone(), "***".to_string())
            } else {
                (k.clone(), v.clone())
            }
        })
        .collect();
    let url_for_log = format!("{}?{}", api_base_url, build_query_string(&masked));
    let parts = [
        Paint::new("curl").fg(yansi::Color::Green).bold().to_string(),
        format!("-X {}", Paint::new("GET").fg(yansi::Color::Yellow).bold()),
        format!("'{}'", Paint::new(&url_for_log).fg(yansi::Color::Cyan)),
    ];
    log_output(format!("Request:\n{}", parts.join(" ")));
    tracing::info!(command, ?params, "API Request");
    // --------------------

    let resp = client.get(&url).send().await?;
    let status = resp.status();
    let body = resp.text().await?;
    let payload: Value = serde_json::from_str(&body)
        .map_err(|e| ApiError::Decode(format!("{} (HTTP {})", e, status)))?;

    // Grayed out so the request line stands out
    let response_str = Paint::new(payload.to_string()).rgb(100, 100, 100).to_string();
    log_output(format!("Response:\n{}", response_str));
    tracing::debug!(command, %status, response = ?payload, "API Response");

    if let Some(err) = remote_error(&payload) {
        tracing::warn!(command, %err, "API returned an error");
        return Err(err);
    }
    Ok(payload)
}
