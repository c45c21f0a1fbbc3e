//! Error types for the dbtjob client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while resolving a job
#[derive(Debug, Error)]
pub enum ClientError {
    /// Missing or invalid configuration value or credential
    #[error("Configuration error: {0}")]
    Config(String),

    /// Secret, taxonomy tag, job config or shared config not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// A remote service answered with a non-success status
    #[error("{service} error (status {status}): {message}")]
    Upstream {
        /// Which collaborator failed (e.g. "taxonomy")
        service: &'static str,
        /// HTTP status code
        status: u16,
        /// Response body, if any
        message: String,
    },

    /// The resolved config is missing a required field
    #[error("Validation failed: {0}")]
    Validation(String),

    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl ClientError {
    /// Create an upstream error from service, status code and message
    pub fn upstream(service: &'static str, status: u16, message: impl Into<String>) -> Self {
        Self::Upstream {
            service,
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this error is a configuration error
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this error came from a non-success upstream response
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream { .. })
    }

    /// Check if this error is a config validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
