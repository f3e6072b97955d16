//! Quota domain errors

use thiserror::Error;

/// Quota-specific domain errors
///
/// A store failure must propagate to the caller: treating it as "no records
/// found" would admit requests the guard exists to reject.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuotaError {
    #[error("Quota store error: {message}")]
    Store { message: String },
}

impl QuotaError {
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }
}
