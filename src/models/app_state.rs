use std::time::Duration;

use crate::api::ApiError;

/// How the async job poller paces itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobPollSettings {
    pub interval: Duration,
    pub max_polls: u32,
}

impl Default for JobPollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(crate::config::DEFAULT_JOB_POLL_INTERVAL_MS),
            max_polls: crate::config::DEFAULT_JOB_MAX_POLLS,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub api_base_url: String,
    pub session_key: String,
    pub console_base_url: Option<String>,
    pub client: reqwest::Client,
    pub job_poll: JobPollSettings,
    pub custom_css: Option<String>,
}

impl AppState {
    pub fn new(
        api_base_url: String,
        session_key: String,
        console_base_url: Option<String>,
        job_poll: JobPollSettings,
    ) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(format!("sysvm/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            api_base_url,
            session_key,
            console_base_url,
            client,
            job_poll,
            custom_css: None,
        })
    }

    /// Build state from the process environment (after `.env` has been loaded).
    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(
            crate::config::get_api_base_url(),
            crate::config::get_session_key(),
            crate::config::get_console_base_url(),
            JobPollSettings {
                interval: crate::config::get_job_poll_interval(),
                max_polls: crate::config::get_job_max_polls(),
            },
        )
    }
}
