//! Generative provider errors

use thiserror::Error;

/// Errors from the external generative model boundary
#[derive(Error, Debug)]
pub enum GenerativeError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limited by provider: {message}")]
    RateLimited {
        /// Seconds to wait before retrying, if the provider said
        retry_after: Option<u64>,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Provider unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Upstream contract violation: {0}")]
    ContractViolation(String),

    #[error("Provider configuration error: {0}")]
    Configuration(String),
}

impl GenerativeError {
    /// Whether retrying the same request could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GenerativeError::RateLimited { .. }
                | GenerativeError::Network(_)
                | GenerativeError::Timeout { .. }
                | GenerativeError::ServiceUnavailable(_)
        )
    }
}

impl From<reqwest::Error> for GenerativeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GenerativeError::Timeout { seconds: 0 }
        } else if err.is_connect() {
            GenerativeError::Network(format!("Connection failed: {}", err))
        } else {
            GenerativeError::Network(err.to_string())
        }
    }
}
