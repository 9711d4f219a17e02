//! Multi-host transport with failover.
//!
//! This module turns one logical call into one or more network attempts.
//!
//! # Overview
//!
//! - [`StatefulHost`]: a host and its health state
//! - [`RetryStrategy`]: selects tryable hosts and classifies attempts
//! - [`Transport`]: the request loop exposing `read` and `write`
//! - [`Requester`]: the network seam, with [`HttpRequester`] as default
//! - [`RequestOptions`]: per-call headers, query parameters and deadlines
//!
//! # Retry Behavior
//!
//! - **2xx**: the decoded body is returned
//! - **4xx**: returned immediately as [`TransportError::Http`], no other
//!   host is tried
//! - **Anything else** (timeouts, 5xx, redirects, network failures): the
//!   next tryable host is tried at once, without sleeping
//!
//! Retries move across hosts rather than waiting on one. A host that keeps
//! failing is quarantined for a while, and later calls skip it.

mod call_type;
mod client;
mod errors;
mod http_request;
mod http_response;
mod request_options;
mod requester;
mod retry_strategy;
mod stateful_host;

use std::sync::{Mutex, MutexGuard, PoisonError};

pub use call_type::{Accept, CallType};
pub use client::{Transport, SDK_VERSION};
pub use errors::{AlgoliaHttpError, InvalidRequestError, TransportError, UnreachableHostsError};
pub use http_request::{HttpMethod, HttpRequest};
pub use http_response::HttpResponse;
pub use request_options::{CompressionType, RequestOptions};
pub use requester::{HttpRequester, Requester, MAX_CACHED_CLIENTS};
pub use retry_strategy::{RetryOutcome, RetryStrategy};
pub use stateful_host::StatefulHost;

/// Takes the guard even if a previous holder panicked.
pub(crate) fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
