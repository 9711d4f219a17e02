//! The request loop tying hosts, retry decisions and the network together.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use tokio::time::Instant;

use crate::config::SearchConfig;
use crate::transport::call_type::CallType;
use crate::transport::errors::{AlgoliaHttpError, TransportError, UnreachableHostsError};
use crate::transport::http_request::{HttpMethod, HttpRequest};
use crate::transport::http_response::HttpResponse;
use crate::transport::request_options::RequestOptions;
use crate::transport::requester::{HttpRequester, Requester};
use crate::transport::retry_strategy::{RetryOutcome, RetryStrategy};

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Executes calls against the configured hosts with failover.
///
/// One logical call becomes a sequence of attempts, one per tryable host,
/// until an attempt succeeds, fails with a client error, or the hosts run
/// out. Host health learned along the way is kept for later calls.
///
/// # Thread Safety
///
/// `Transport` is `Send + Sync`; share one instance behind an `Arc` so all
/// tasks benefit from the same host health state.
///
/// # Example
///
/// ```rust,ignore
/// use algolia_transport::{ApiKey, ApplicationId, SearchConfig};
/// use algolia_transport::transport::{HttpMethod, RequestOptions, Transport};
///
/// let config = SearchConfig::builder()
///     .application_id(ApplicationId::new("MY_APP")?)
///     .api_key(ApiKey::new("my-key")?)
///     .build()?;
/// let transport = Transport::new(config);
///
/// let indexes = transport
///     .read(HttpMethod::Get, "/1/indexes", None, &RequestOptions::new())
///     .await?;
/// ```
pub struct Transport {
    config: SearchConfig,
    retry_strategy: RetryStrategy,
    requester: Box<dyn Requester>,
    default_headers: HashMap<String, String>,
}

// Verify Transport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Transport>();
};

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("config", &self.config)
            .field("retry_strategy", &self.retry_strategy)
            .finish_non_exhaustive()
    }
}

impl Transport {
    /// Creates a transport sending attempts through [`HttpRequester`].
    #[must_use]
    pub fn new(config: SearchConfig) -> Self {
        Self::with_requester(config, HttpRequester::new())
    }

    /// Creates a transport sending attempts through `requester`.
    #[must_use]
    pub fn with_requester(config: SearchConfig, requester: impl Requester + 'static) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));

        let mut default_headers = HashMap::new();
        default_headers.insert(
            "X-Algolia-Application-Id".to_string(),
            config.application_id().as_ref().to_string(),
        );
        default_headers.insert(
            "X-Algolia-API-Key".to_string(),
            config.api_key().as_ref().to_string(),
        );
        default_headers.insert(
            "Content-Type".to_string(),
            "application/json; charset=utf-8".to_string(),
        );
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert(
            "User-Agent".to_string(),
            format!("{user_agent_prefix}Algolia for Rust ({SDK_VERSION})"),
        );
        for (key, value) in config.default_headers() {
            insert_header(&mut default_headers, key, value);
        }

        Self {
            retry_strategy: RetryStrategy::new(&config),
            config,
            requester: Box::new(requester),
            default_headers,
        }
    }

    /// Returns the configuration of this transport.
    #[must_use]
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Returns the retry strategy holding the host health state.
    #[must_use]
    pub const fn retry_strategy(&self) -> &RetryStrategy {
        &self.retry_strategy
    }

    /// Returns the headers sent with every call.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends a read call.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn read(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
        options: &RequestOptions,
    ) -> Result<Value, TransportError> {
        self.request(CallType::Read, method, path, body, options)
            .await
    }

    /// Sends a write call.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn write(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
        options: &RequestOptions,
    ) -> Result<Value, TransportError> {
        self.request(CallType::Write, method, path, body, options)
            .await
    }

    /// Executes one logical call and returns the decoded response body.
    ///
    /// Hosts are tried in priority order with no delay in between. Each
    /// attempt's timeouts are the base timeouts multiplied by
    /// `retry_count + 1` of the host it targets.
    ///
    /// # Errors
    ///
    /// - [`TransportError::InvalidRequest`] if `options` carries a zero
    ///   timeout or cannot be merged into `body`
    /// - [`TransportError::Http`] on a 4xx response
    /// - [`TransportError::Decode`] if a success body is not valid JSON
    /// - [`TransportError::DeadlineExceeded`] if the options' deadline passes
    /// - [`TransportError::Unreachable`] if every host failed transiently
    pub async fn request(
        &self,
        call_type: CallType,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
        options: &RequestOptions,
    ) -> Result<Value, TransportError> {
        options.validate()?;
        let body = options.merge_body(body)?.map(|body| body.to_string());
        let path = options.build_path(path);
        let headers = self.headers_for(options);

        let hosts = self.retry_strategy.get_tryable_hosts(call_type);
        let mut tried = 0;

        for host in &hosts {
            if options.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                return Err(TransportError::DeadlineExceeded);
            }

            let scale = host.retry_count.saturating_add(1);
            let request = HttpRequest {
                method,
                path: path.clone(),
                body: body.clone(),
                headers: headers.clone(),
                timeout: self.base_timeout(call_type, options).saturating_mul(scale),
                connect_timeout: options
                    .connect_timeout
                    .unwrap_or_else(|| self.config.connect_timeout())
                    .saturating_mul(scale),
            };

            tracing::debug!(
                host = %host.url,
                %method,
                path = %request.path,
                timeout = ?request.timeout,
                "Sending request"
            );
            tried += 1;

            let send = self.requester.send_request(host, &request);
            let response = match options.deadline {
                Some(deadline) => {
                    if let Ok(response) = tokio::time::timeout_at(deadline, send).await {
                        response
                    } else {
                        tracing::warn!(host = %host.url, path = %request.path, "Request deadline exceeded");
                        return Err(TransportError::DeadlineExceeded);
                    }
                }
                None => send.await,
            };

            let outcome = self
                .retry_strategy
                .decide(host, response.status, response.timed_out);
            tracing::debug!(
                host = %host.url,
                status = ?response.status,
                timed_out = response.timed_out,
                ?outcome,
                "Attempt finished"
            );

            match outcome {
                RetryOutcome::Success => return Self::decode_body(&response.body),
                RetryOutcome::Failure => return Err(Self::http_error(&response).into()),
                RetryOutcome::Retry => {}
            }
        }

        tracing::warn!(%call_type, tried, path = %path, "All hosts failed");
        Err(UnreachableHostsError { tried }.into())
    }

    fn base_timeout(&self, call_type: CallType, options: &RequestOptions) -> Duration {
        options.timeout.unwrap_or_else(|| match call_type {
            CallType::Read => self.config.read_timeout(),
            CallType::Write => self.config.write_timeout(),
        })
    }

    fn headers_for(&self, options: &RequestOptions) -> HashMap<String, String> {
        let mut headers = self.default_headers.clone();
        for (key, value) in &options.headers {
            insert_header(&mut headers, key, value);
        }
        if let Some(encoding) = options.compression.accept_encoding() {
            insert_header(&mut headers, "Accept-Encoding", encoding);
        }
        headers
    }

    fn decode_body(body: &str) -> Result<Value, TransportError> {
        if body.trim().is_empty() {
            return Ok(serde_json::json!({}));
        }
        Ok(serde_json::from_str(body)?)
    }

    /// Builds the error of a 4xx response, tolerating non-JSON bodies.
    fn http_error(response: &HttpResponse) -> AlgoliaHttpError {
        let decoded: ErrorBody = serde_json::from_str(&response.body).unwrap_or_default();

        let message = decoded.message.unwrap_or_else(|| response.body.clone());
        let code = decoded.status.or(response.status).unwrap_or_default();

        AlgoliaHttpError { code, message }
    }
}

/// Inserts a header, replacing any existing one whose name differs only in case.
fn insert_header(headers: &mut HashMap<String, String>, key: &str, value: &str) {
    headers.retain(|existing, _| !existing.eq_ignore_ascii_case(key));
    headers.insert(key.to_string(), value.to_string());
}

/// Error payload returned by the API alongside 4xx statuses.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<u16>,
}
