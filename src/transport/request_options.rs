//! Per-call options merged into the outgoing request.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use serde_json::{Map, Value};
use tokio::time::Instant;

use crate::transport::errors::InvalidRequestError;

/// Response compression the caller accepts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CompressionType {
    /// No `Accept-Encoding` header is added to the call.
    #[default]
    None,
    /// Responses may be gzip-encoded; they are decoded before parsing.
    Gzip,
}

impl CompressionType {
    /// Returns the `Accept-Encoding` value to send, if any.
    #[must_use]
    pub const fn accept_encoding(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Gzip => Some("gzip"),
        }
    }
}

/// Options for a single `read`/`write` call.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use algolia_transport::transport::RequestOptions;
///
/// let options = RequestOptions::new()
///     .header("X-Forwarded-For", "10.0.0.1")
///     .query_param("getRankingInfo", "true")
///     .timeout(Duration::from_secs(5));
/// ```
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
    /// Headers added on top of the configured defaults.
    pub headers: HashMap<String, String>,
    /// Query parameters appended to the path.
    pub query_params: BTreeMap<String, String>,
    /// Top-level fields merged into the JSON body.
    pub data: Map<String, Value>,
    /// Overrides the base read/write timeout of the call type.
    pub timeout: Option<Duration>,
    /// Overrides the base connect timeout.
    pub connect_timeout: Option<Duration>,
    /// Time after which the call is abandoned.
    pub deadline: Option<Instant>,
    /// Response compression to request.
    pub compression: CompressionType,
}

impl RequestOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.insert(key.into(), value.into());
        self
    }

    /// Adds a top-level body field.
    #[must_use]
    pub fn data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Sets the base timeout for this call.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the base connect timeout for this call.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Abandons the call once `deadline` passes.
    #[must_use]
    pub const fn deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Abandons the call once `budget` has elapsed from now.
    ///
    /// A budget too large to represent as an instant sets no deadline.
    #[must_use]
    pub fn deadline_in(mut self, budget: Duration) -> Self {
        self.deadline = Instant::now().checked_add(budget);
        self
    }

    /// Requests compressed responses.
    #[must_use]
    pub const fn compression(mut self, compression: CompressionType) -> Self {
        self.compression = compression;
        self
    }

    /// Rejects timeout overrides that would make every attempt time out.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRequestError::ZeroTimeout`] naming the offending
    /// override.
    pub fn validate(&self) -> Result<(), InvalidRequestError> {
        if self.timeout == Some(Duration::ZERO) {
            return Err(InvalidRequestError::ZeroTimeout { field: "timeout" });
        }
        if self.connect_timeout == Some(Duration::ZERO) {
            return Err(InvalidRequestError::ZeroTimeout {
                field: "connect_timeout",
            });
        }
        Ok(())
    }

    /// Appends the query parameters to `path`.
    ///
    /// Keys and values are percent-encoded; keys are emitted in sorted order.
    #[must_use]
    pub fn build_path(&self, path: &str) -> String {
        if self.query_params.is_empty() {
            return path.to_string();
        }
        let query = self
            .query_params
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&");
        let separator = if path.contains('?') { '&' } else { '?' };
        format!("{path}{separator}{query}")
    }

    /// Merges `data` into `body`.
    ///
    /// A missing body becomes an object holding only `data`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRequestError::BodyNotAnObject`] if `data` is not
    /// empty and `body` is not a JSON object.
    pub fn merge_body(&self, body: Option<Value>) -> Result<Option<Value>, InvalidRequestError> {
        if self.data.is_empty() {
            return Ok(body);
        }
        match body {
            None | Some(Value::Null) => Ok(Some(Value::Object(self.data.clone()))),
            Some(Value::Object(mut object)) => {
                for (key, value) in &self.data {
                    object.insert(key.clone(), value.clone());
                }
                Ok(Some(Value::Object(object)))
            }
            Some(_) => Err(InvalidRequestError::BodyNotAnObject),
        }
    }
}
