//! Error types for the harness.
//!
//! This module defines custom error types using `thiserror`. Domain parse
//! errors live next to their value objects in [`crate::domain::errors`].

use thiserror::Error;

/// Errors that can occur when talking to a service endpoint.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Endpoint returned an error status code
    #[error("Service error (status {status}): {message}")]
    Status { status: u16, message: String },

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Route not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The service refused the request outright
    #[error("Authentication failed")]
    Unauthorized,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing or empty
    #[error("env.{var} is required, but got {got}")]
    MissingVar { var: String, got: String },

    /// Environment variable has invalid value
    #[error("unable to parse env.{var} as {expected}: {value}")]
    InvalidValue {
        var: String,
        expected: &'static str,
        value: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl ConfigError {
    /// The name of the variable at fault.
    pub fn var(&self) -> &str {
        match self {
            Self::MissingVar { var, .. } | Self::InvalidValue { var, .. } => var,
        }
    }
}

/// A receipt did not look the way a check expected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssertionError {
    /// A failure receipt had no string `name`
    #[error("error result is not named")]
    UnnamedError,

    /// A failure receipt used the generic name "Error"
    #[error("error name is not more specific than \"Error\"")]
    GenericErrorName,

    /// A failure receipt had a different name than required
    #[error("expected error named {expected}, got {actual}")]
    UnexpectedErrorName { expected: String, actual: String },

    /// A failure where success was required
    #[error("expected success, got error {name}: {message}")]
    UnexpectedFailure { name: String, message: String },

    /// A success receipt had the wrong shape or value
    #[error("unexpected success value: {0}")]
    UnexpectedValue(String),
}

/// Convenience type alias for Results with ServiceError
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with AssertionError
pub type AssertionResult<T> = Result<T, AssertionError>;
