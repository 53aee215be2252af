/// Error types for management API calls
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure talking to the management server
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Body was not the JSON we expected
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// The management server answered with an error envelope
    #[error("API error {code}: {text}")]
    Remote { code: i64, text: String },

    /// A required key was missing from an otherwise valid response
    #[error("Response is missing `{0}`")]
    MissingField(String),

    #[error("System VM {0} not found")]
    NotFound(String),

    #[error("Async job {job_id} failed ({code}): {text}")]
    JobFailed { job_id: String, code: i64, text: String },

    #[error("Async job {job_id} still pending after {polls} polls")]
    JobTimedOut { job_id: String, polls: u32 },
}
