//! Configuration validation module

use crate::config::{Config, DatabaseConfig, GenerativeConfig, QuotaConfig, ServerConfig};

/// Trait for validating configuration sections
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Server configuration error: {message}")]
    Server { message: String },

    #[error("Database configuration error: {message}")]
    Database { message: String },

    #[error("Quota configuration error: {message}")]
    Quota { message: String },

    #[error("Generative configuration error: {message}")]
    Generative { message: String },
}

impl ValidationError {
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server {
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    pub fn quota(message: impl Into<String>) -> Self {
        Self::Quota {
            message: message.into(),
        }
    }

    pub fn generative(message: impl Into<String>) -> Self {
        Self::Generative {
            message: message.into(),
        }
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::server("Port must be in range 1-65535"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(ValidationError::server(
                "request_timeout_seconds must be > 0",
            ));
        }
        if self.generation_timeout_seconds < self.request_timeout_seconds {
            return Err(ValidationError::server(
                "generation_timeout_seconds must be >= request_timeout_seconds",
            ));
        }
        if self.allowed_origins.is_empty() {
            return Err(ValidationError::server(
                "allowed_origins must not be empty; use [\"*\"] for development",
            ));
        }
        Ok(())
    }
}

impl Validate for DatabaseConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::database("Database URL must not be empty"));
        }
        if self.max_connections == 0 {
            return Err(ValidationError::database("max_connections must be > 0"));
        }
        Ok(())
    }
}

impl Validate for QuotaConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.monthly_cap <= 0 {
            return Err(ValidationError::quota("monthly_cap must be > 0"));
        }
        if self.low_quota_threshold < 0 || self.low_quota_threshold > self.monthly_cap {
            return Err(ValidationError::quota(
                "low_quota_threshold must be in range 0..=monthly_cap",
            ));
        }
        if self.max_logo_bytes == 0 {
            return Err(ValidationError::quota("max_logo_bytes must be > 0"));
        }
        Ok(())
    }
}

impl Validate for GenerativeConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.api_url.is_empty() {
            return Err(ValidationError::generative("api_url must not be empty"));
        }
        if self.model.is_empty() {
            return Err(ValidationError::generative("model must not be empty"));
        }
        if self.timeout_seconds == 0 {
            return Err(ValidationError::generative("timeout_seconds must be > 0"));
        }
        Ok(())
    }
}

impl Validate for Config {
    fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.quota.validate()?;
        self.generative.validate()?;
        Ok(())
    }
}
