//! Error types for the record-set resources
//!
//! This module defines all error types used throughout the workspace.

use thiserror::Error;

/// Result type alias for record-set operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the record-set resources
#[derive(Error, Debug)]
pub enum Error {
    /// Declared input rejected before any API call
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Remote content could not be decoded (e.g. a non-numeric SOA field)
    #[error("Parse error: {0}")]
    Parse(String),

    /// A `RecordApi` call failed; `context` names the attempted operation
    #[error("{context}: {source}")]
    Api {
        /// What the reconciler was trying to do
        context: String,
        /// The failure reported by the API client
        source: Box<Error>,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(String),

    /// Authentication errors
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limiting errors
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Zone, record set or record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Provider-specific error
    #[error("Provider error ({provider}): {message}")]
    Provider {
        /// Provider name
        provider: String,
        /// Error message
        message: String,
    },
}

impl Error {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Wrap an API client failure with the operation that was attempted
    pub fn api(context: impl Into<String>, source: Error) -> Self {
        Self::Api {
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an HTTP error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a rate limit error
    pub fn rate_limited(msg: impl Into<String>) -> Self {
        Self::RateLimited(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a provider-specific error
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Whether this error (or the API failure it wraps) is a "not found"
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::Api { source, .. } => source.is_not_found(),
            _ => false,
        }
    }
}
