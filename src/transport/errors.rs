//! Error types surfaced by the transport.
//!
//! Transient conditions (5xx responses, timeouts, network failures) are
//! absorbed by the retry loop and only show up as
//! [`UnreachableHostsError`] once every host has been tried.
//!
//! - [`AlgoliaHttpError`]: a 4xx response; the request itself is invalid
//! - [`UnreachableHostsError`]: every tryable host failed transiently
//! - [`InvalidRequestError`]: the request was rejected before any attempt
//! - [`TransportError`]: unified error returned by `read`/`write`
//!
//! # Example
//!
//! ```rust,ignore
//! use algolia_transport::transport::TransportError;
//!
//! match transport.read(HttpMethod::Get, "/1/indexes", None, &options).await {
//!     Ok(body) => println!("{body}"),
//!     Err(TransportError::Http(e)) => println!("API error {}: {}", e.code, e.message),
//!     Err(TransportError::Unreachable(e)) => println!("{e}"),
//!     Err(e) => println!("{e}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when a host answers with a client error (4xx).
///
/// ```rust
/// use algolia_transport::transport::AlgoliaHttpError;
///
/// let error = AlgoliaHttpError {
///     code: 404,
///     message: "Index does not exist".to_string(),
/// };
/// assert_eq!(error.to_string(), "Index does not exist (404)");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message} ({code})")]
pub struct AlgoliaHttpError {
    /// Status code reported by the API.
    pub code: u16,
    /// Error message reported by the API.
    pub message: String,
}

/// Error returned when no host produced a terminal outcome.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unreachable hosts: {tried} host(s) tried without success")]
pub struct UnreachableHostsError {
    /// Number of attempts made before giving up.
    pub tried: usize,
}

/// Error returned when a request cannot be built.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidRequestError {
    /// Extra body data was given for a body that is not a JSON object.
    #[error("Cannot merge request data into a body that is not a JSON object.")]
    BodyNotAnObject,

    /// A timeout override of zero was given.
    #[error("Request option `{field}` must be greater than zero.")]
    ZeroTimeout {
        /// Name of the rejected option.
        field: &'static str,
    },
}

/// Unified error type of [`Transport`](crate::transport::Transport) calls.
#[derive(Debug, Error)]
pub enum TransportError {
    /// A client error response (4xx).
    #[error(transparent)]
    Http(#[from] AlgoliaHttpError),

    /// Every tryable host failed transiently.
    #[error(transparent)]
    Unreachable(#[from] UnreachableHostsError),

    /// The request was rejected before any attempt.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidRequestError),

    /// A success response body was not valid JSON.
    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The caller's deadline passed before a terminal outcome.
    #[error("Request deadline exceeded before any host answered")]
    DeadlineExceeded,
}

impl TransportError {
    /// Returns the API status code for [`TransportError::Http`] errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http(error) => Some(error.code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_includes_code_and_message() {
        let error = AlgoliaHttpError {
            code: 403,
            message: "Invalid Application-ID or API key".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("403"));
        assert!(message.contains("Invalid Application-ID"));
    }

    #[test]
    fn test_unreachable_error_is_distinct_from_http_error() {
        let error: TransportError = UnreachableHostsError { tried: 3 }.into();
        assert!(matches!(error, TransportError::Unreachable(_)));
        assert_eq!(error.status(), None);
        assert!(error.to_string().contains("Unreachable hosts"));
    }

    #[test]
    fn test_status_of_http_error() {
        let error: TransportError = AlgoliaHttpError {
            code: 404,
            message: "Not found".to_string(),
        }
        .into();
        assert_eq!(error.status(), Some(404));
    }

    #[test]
    fn test_decode_error_wraps_serde_error() {
        let serde_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = TransportError::from(serde_error);
        assert!(error.to_string().starts_with("Failed to decode response body"));
    }
}
