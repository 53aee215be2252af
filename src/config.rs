use std::env;
use std::path::Path;
use std::time::Duration;

// Default configuration constants
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_API_BASE_URL: &str = "";
pub const DEFAULT_SESSION_KEY: &str = "";
pub const DEFAULT_CONSOLE_BASE_URL: &str = "";
pub const DEFAULT_JOB_POLL_INTERVAL_MS: u64 = 3000;
pub const DEFAULT_JOB_MAX_POLLS: u32 = 200;

const FALLBACK_API_BASE_URL: &str = "http://localhost:8080/client/api";

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

pub fn get_api_base_url() -> String {
    sanitize_base_url(&env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()))
}

pub fn get_session_key() -> String {
    env::var("API_SESSION_KEY")
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|_| DEFAULT_SESSION_KEY.to_string())
}

/// Console proxy entry point; an empty value disables console links.
pub fn get_console_base_url() -> Option<String> {
    let raw = env::var("CONSOLE_BASE_URL").unwrap_or_else(|_| DEFAULT_CONSOLE_BASE_URL.to_string());
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn get_job_poll_interval() -> Duration {
    let ms = parse_positive(env::var("JOB_POLL_INTERVAL_MS").ok().as_deref())
        .unwrap_or(DEFAULT_JOB_POLL_INTERVAL_MS);
    Duration::from_millis(ms)
}

pub fn get_job_max_polls() -> u32 {
    parse_positive(env::var("JOB_MAX_POLLS").ok().as_deref())
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(DEFAULT_JOB_MAX_POLLS)
}

fn parse_positive(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|s| s.trim().parse::<u64>().ok()).filter(|n| *n > 0)
}

pub fn sanitize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        FALLBACK_API_BASE_URL.to_string()
    } else {
        trimmed.to_string()
    }
}
