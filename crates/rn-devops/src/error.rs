//! Tracker client error types.

use thiserror::Error;

/// Errors that can occur when talking to the work-item tracker.
#[derive(Debug, Error)]
pub enum DevOpsError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The tracker returned a non-success status code.
    #[error("tracker API error ({status}) for {endpoint}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Which request failed (`wiql`, `workitems`, ...).
        endpoint: &'static str,
        /// Response body.
        message: String,
    },

    /// The tracker returned a 429 Too Many Requests response.
    #[error("rate limited by tracker, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// A response did not have the expected shape.
    #[error("unexpected tracker response: {0}")]
    Parse(String),
}
