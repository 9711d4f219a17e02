//! Error types for the Algolia transport.
//!
//! This module contains the errors raised while building a
//! [`SearchConfig`](crate::SearchConfig). Errors raised while executing calls
//! live in [`transport`](crate::transport).
//!
//! # Example
//!
//! ```rust
//! use algolia_transport::{ApiKey, ConfigError};
//!
//! let result = ApiKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring the transport.
///
/// Every constructor and builder in [`config`](crate::config) returns
/// `Result<T, ConfigError>` so that invalid settings are rejected before
/// any host is contacted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Application ID cannot be empty.
    #[error("Application ID cannot be empty. Please provide a valid Algolia application ID.")]
    EmptyApplicationId,

    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a valid Algolia API key.")]
    EmptyApiKey,

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A timeout was configured as zero.
    #[error("Invalid timeout for '{field}'. Timeouts must be greater than zero.")]
    InvalidTimeout {
        /// The name of the offending setting.
        field: &'static str,
    },

    /// An explicit host list was configured without any host.
    #[error("Host list cannot be empty. Configure at least one host or use the default hosts.")]
    EmptyHostList,
}
