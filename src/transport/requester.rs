//! The network seam of the transport.
//!
//! [`Transport`](crate::transport::Transport) never talks to the network
//! directly; it hands every attempt to a [`Requester`]. [`HttpRequester`] is
//! the default, `reqwest`-backed implementation. Tests and alternative
//! runtimes can plug in their own.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::transport::http_request::HttpRequest;
use crate::transport::http_response::HttpResponse;
use crate::transport::lock_unpoisoned;
use crate::transport::stateful_host::StatefulHost;

/// Sends one attempt to one host.
///
/// Implementations never fail: timeouts and connection problems are
/// reported through [`HttpResponse::timed_out`] and
/// [`HttpResponse::network_failure`] so they can be classified and retried.
#[async_trait]
pub trait Requester: Send + Sync {
    /// Sends `request` to `host` and reports what happened.
    async fn send_request(&self, host: &StatefulHost, request: &HttpRequest) -> HttpResponse;
}

/// `reqwest`-backed [`Requester`].
///
/// `reqwest` only configures connect timeouts per client, so one client is
/// kept per distinct connect timeout. Escalated attempts therefore reuse
/// pooled connections of earlier attempts with the same scaling.
///
/// At most [`MAX_CACHED_CLIENTS`] clients are kept; the least recently used
/// one is dropped, along with its connection pool, to make room.
#[derive(Debug, Default)]
pub struct HttpRequester {
    /// Most recently used last.
    clients: Mutex<VecDeque<(Duration, reqwest::Client)>>,
}

/// Upper bound on the clients an [`HttpRequester`] keeps alive.
pub const MAX_CACHED_CLIENTS: usize = 8;

impl HttpRequester {
    /// Creates a requester with no clients built yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the absolute URL of `path` on `host`.
    ///
    /// Hosts without a scheme are contacted over HTTPS.
    #[must_use]
    pub fn url_for(host: &StatefulHost, path: &str) -> String {
        let base = host.url.trim_end_matches('/');
        let separator = if path.starts_with('/') { "" } else { "/" };
        if base.contains("://") {
            format!("{base}{separator}{path}")
        } else {
            format!("https://{base}{separator}{path}")
        }
    }

    fn client_for(&self, connect_timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
        let mut clients = lock_unpoisoned(&self.clients);
        if let Some(position) = clients.iter().position(|(key, _)| *key == connect_timeout) {
            if let Some(entry) = clients.remove(position) {
                let client = entry.1.clone();
                clients.push_back(entry);
                return Ok(client);
            }
        }

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .gzip(true)
            .connect_timeout(connect_timeout)
            .build()?;
        if clients.len() >= MAX_CACHED_CLIENTS {
            if let Some((evicted, _)) = clients.pop_front() {
                tracing::debug!(connect_timeout = ?evicted, "Dropping least recently used client");
            }
        }
        clients.push_back((connect_timeout, client.clone()));
        Ok(client)
    }

    fn from_error(error: &reqwest::Error) -> HttpResponse {
        if error.is_timeout() {
            HttpResponse::timed_out()
        } else {
            HttpResponse::network_failure(error.to_string())
        }
    }
}

#[async_trait]
impl Requester for HttpRequester {
    async fn send_request(&self, host: &StatefulHost, request: &HttpRequest) -> HttpResponse {
        let client = match self.client_for(request.connect_timeout) {
            Ok(client) => client,
            Err(error) => return HttpResponse::network_failure(error.to_string()),
        };

        let url = Self::url_for(host, &request.path);
        let mut builder = client
            .request(request.method.as_reqwest(), &url)
            .timeout(request.timeout);
        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(error) => return Self::from_error(&error),
        };
        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => HttpResponse::new(status, body),
            Err(error) => Self::from_error(&error),
        }
    }
}
