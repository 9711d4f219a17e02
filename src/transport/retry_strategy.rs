//! Host selection and per-attempt outcome classification.
//!
//! [`RetryStrategy`] owns the host list of one transport. It answers two
//! questions for the request loop:
//!
//! - which hosts may be tried for a call type, in priority order
//!   ([`RetryStrategy::get_tryable_hosts`])
//! - what an attempt's response means for the call and for the host
//!   ([`RetryStrategy::decide`])
//!
//! # Classification
//!
//! | Attempt result                     | Outcome   |
//! |------------------------------------|-----------|
//! | timed out                          | `Retry`   |
//! | 2xx                                | `Success` |
//! | 4xx                                | `Failure` |
//! | anything else, or no status at all | `Retry`   |
//!
//! Every `Retry` counts as a consecutive failure of the host. Once the count
//! exceeds the configured `max_host_failures` the host is quarantined until
//! `host_down_ttl` has passed.

use std::sync::Mutex;
use std::time::Duration;

use chrono::Utc;

use crate::config::SearchConfig;
use crate::transport::call_type::CallType;
use crate::transport::lock_unpoisoned;
use crate::transport::stateful_host::StatefulHost;

/// Classification of a single attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RetryOutcome {
    /// The call succeeded; stop and return the body.
    Success,
    /// Transient problem; move on to the next host.
    Retry,
    /// The request itself is invalid; stop and surface the error.
    Failure,
}

impl RetryOutcome {
    /// Classifies an attempt from its status code and timeout flag.
    ///
    /// This is a pure function; host effects are applied by
    /// [`RetryStrategy::decide`].
    #[must_use]
    pub const fn classify(status: Option<u16>, timed_out: bool) -> Self {
        if timed_out {
            return Self::Retry;
        }
        match status {
            Some(200..=299) => Self::Success,
            Some(400..=499) => Self::Failure,
            _ => Self::Retry,
        }
    }
}

/// Ordered hosts with shared health state.
///
/// State lives behind a mutex, so one strategy can be used by many
/// concurrent calls; what one call learns about a host is seen by the next.
#[derive(Debug)]
pub struct RetryStrategy {
    hosts: Mutex<Vec<StatefulHost>>,
    host_down_ttl: Duration,
    max_host_failures: u32,
}

impl RetryStrategy {
    /// Creates a strategy over the hosts and thresholds of `config`.
    #[must_use]
    pub fn new(config: &SearchConfig) -> Self {
        Self::with_hosts(
            config.hosts().to_vec(),
            config.host_down_ttl(),
            config.max_host_failures(),
        )
    }

    /// Creates a strategy over an explicit host list.
    #[must_use]
    pub const fn with_hosts(
        hosts: Vec<StatefulHost>,
        host_down_ttl: Duration,
        max_host_failures: u32,
    ) -> Self {
        Self {
            hosts: Mutex::new(hosts),
            host_down_ttl,
            max_host_failures,
        }
    }

    /// Returns the hosts that may be tried for `call_type`, in priority order.
    ///
    /// Down hosts whose recovery window has passed are reset first. If every
    /// host accepting `call_type` is still down, all of them are reset and
    /// returned: a call always gets at least one candidate when any host
    /// accepts its type.
    ///
    /// The returned hosts are snapshots; pass them back to
    /// [`decide`](Self::decide) to update the shared state.
    pub fn get_tryable_hosts(&self, call_type: CallType) -> Vec<StatefulHost> {
        let mut hosts = lock_unpoisoned(&self.hosts);

        for host in hosts
            .iter_mut()
            .filter(|host| host.accept.accepts(call_type))
        {
            if host.has_expired(self.host_down_ttl) {
                tracing::info!(host = %host.url, "Host recovery window elapsed, marking it up");
                host.reset();
            }
        }

        let tryable: Vec<StatefulHost> = hosts
            .iter()
            .filter(|host| host.accept.accepts(call_type) && host.up)
            .cloned()
            .collect();
        if !tryable.is_empty() {
            return tryable;
        }

        let mut fallback = Vec::new();
        for host in hosts
            .iter_mut()
            .filter(|host| host.accept.accepts(call_type))
        {
            host.reset();
            fallback.push(host.clone());
        }
        if !fallback.is_empty() {
            tracing::warn!(
                %call_type,
                hosts = fallback.len(),
                "All hosts are down, trying all of them anyway"
            );
        }
        fallback
    }

    /// Classifies an attempt against `host` and records it in the host's state.
    ///
    /// - `Success` marks the host up and clears its failure count.
    /// - `Retry` increments the failure count and quarantines the host once
    ///   the count exceeds `max_host_failures`.
    /// - `Failure` leaves the host untouched.
    ///
    /// A host this strategy does not own is classified without side effects.
    pub fn decide(&self, host: &StatefulHost, status: Option<u16>, timed_out: bool) -> RetryOutcome {
        let outcome = RetryOutcome::classify(status, timed_out);
        let mut hosts = lock_unpoisoned(&self.hosts);
        let Some(state) = hosts.iter_mut().find(|candidate| candidate.url == host.url) else {
            return outcome;
        };

        match outcome {
            RetryOutcome::Success => {
                state.up = true;
                state.retry_count = 0;
                state.last_use = Utc::now();
            }
            RetryOutcome::Retry => {
                state.retry_count = state.retry_count.saturating_add(1);
                state.last_use = Utc::now();
                if state.up && state.retry_count > self.max_host_failures {
                    state.up = false;
                    tracing::warn!(
                        host = %state.url,
                        retry_count = state.retry_count,
                        "Host quarantined after consecutive failures"
                    );
                }
            }
            RetryOutcome::Failure => {}
        }
        outcome
    }

    /// Returns a snapshot of every host and its current state.
    pub fn hosts(&self) -> Vec<StatefulHost> {
        lock_unpoisoned(&self.hosts).clone()
    }

    /// Returns the recovery window of quarantined hosts.
    #[must_use]
    pub const fn host_down_ttl(&self) -> Duration {
        self.host_down_ttl
    }

    /// Returns the number of consecutive failures a host may have before
    /// it is quarantined.
    #[must_use]
    pub const fn max_host_failures(&self) -> u32 {
        self.max_host_failures
    }
}

// Verify RetryStrategy is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RetryStrategy>();
};
