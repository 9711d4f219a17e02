//! Host identity plus mutable health state.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::transport::call_type::Accept;

/// A host together with its health state.
///
/// `url` and `accept` never change. `up`, `last_use` and `retry_count` are
/// updated by [`RetryStrategy`](crate::transport::RetryStrategy) as attempts
/// complete.
///
/// # Example
///
/// ```rust
/// use algolia_transport::transport::{Accept, StatefulHost};
///
/// let host = StatefulHost::new("my-app-dsn.algolia.net").with_accept(Accept::Read);
/// assert!(host.up);
/// assert_eq!(host.retry_count, 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatefulHost {
    /// Host to contact, optionally with a scheme (`https://` is assumed otherwise).
    pub url: String,
    /// Call types this host accepts.
    pub accept: Accept,
    /// `false` while the host is quarantined.
    pub up: bool,
    /// Time of the last state change.
    pub last_use: DateTime<Utc>,
    /// Consecutive failed attempts since the last success or reset.
    pub retry_count: u32,
}

impl StatefulHost {
    /// Creates an up host accepting both reads and writes.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            accept: Accept::ReadWrite,
            up: true,
            last_use: Utc::now(),
            retry_count: 0,
        }
    }

    /// Sets the accepted call types.
    #[must_use]
    pub const fn with_accept(mut self, accept: Accept) -> Self {
        self.accept = accept;
        self
    }

    /// Sets the initial up/down state.
    #[must_use]
    pub const fn with_up(mut self, up: bool) -> Self {
        self.up = up;
        self
    }

    /// Sets the time of the last state change.
    #[must_use]
    pub const fn with_last_use(mut self, last_use: DateTime<Utc>) -> Self {
        self.last_use = last_use;
        self
    }

    /// Marks the host up and clears its failure count.
    pub fn reset(&mut self) {
        self.up = true;
        self.retry_count = 0;
    }

    /// Returns `true` if the host is down and has been for longer than `ttl`.
    ///
    /// This does not change the host; callers reset it explicitly.
    #[must_use]
    pub fn has_expired(&self, ttl: Duration) -> bool {
        if self.up {
            return false;
        }
        Utc::now()
            .signed_duration_since(self.last_use)
            .to_std()
            .is_ok_and(|elapsed| elapsed > ttl)
    }
}
