//! Raw result of a single attempt.

/// What came back from one host, before classification.
///
/// Transport problems are not errors at this level: a timed out or
/// unreachable host is reported through the flags so the retry strategy
/// can classify it like any other attempt.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status, absent when no response was received.
    pub status: Option<u16>,
    /// Response body, or a description of the transport error.
    pub body: String,
    /// The attempt exceeded its timeout.
    pub timed_out: bool,
    /// The attempt failed before any status was received.
    pub network_failure: bool,
}

impl HttpResponse {
    /// A response with a status and body.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            body: body.into(),
            ..Self::default()
        }
    }

    /// An attempt that timed out.
    #[must_use]
    pub fn timed_out() -> Self {
        Self {
            timed_out: true,
            ..Self::default()
        }
    }

    /// An attempt that failed at the network level.
    #[must_use]
    pub fn network_failure(message: impl Into<String>) -> Self {
        Self {
            body: message.into(),
            network_failure: true,
            ..Self::default()
        }
    }

    /// Returns `true` for 2xx statuses.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status.is_some_and(|status| (200..=299).contains(&status))
    }
}
