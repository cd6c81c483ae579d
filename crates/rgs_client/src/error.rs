/// Request-layer failures.
///
/// Configuration problems (missing params, bad amounts) fail fast before any
/// network traffic; transport and decode failures wrap the underlying error.
#[derive(Debug, thiserror::Error)]
pub enum RgsError {
    #[error("missing required query param \"{0}\"")]
    MissingParam(&'static str),

    #[error("bet amount must be a non-negative integer")]
    InvalidAmount,

    #[error("eventIndex must be a non-negative integer")]
    InvalidEventIndex,

    #[error("request to {url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}
