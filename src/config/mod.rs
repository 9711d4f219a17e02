//! Configuration types for the Algolia transport.
//!
//! # Overview
//!
//! - [`SearchConfig`]: credentials, hosts, timeouts and host health thresholds
//! - [`SearchConfigBuilder`]: a builder for [`SearchConfig`]
//! - [`ApplicationId`] and [`ApiKey`]: validated credential newtypes
//! - [`default_hosts`]: the host list used when none is configured
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use algolia_transport::{ApiKey, ApplicationId, SearchConfig};
//!
//! let config = SearchConfig::builder()
//!     .application_id(ApplicationId::new("MY_APP").unwrap())
//!     .api_key(ApiKey::new("my-api-key").unwrap())
//!     .read_timeout(Duration::from_secs(5))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.hosts().len(), 5);
//! ```

mod hosts;
mod newtypes;

pub use hosts::default_hosts;
pub use newtypes::{ApiKey, ApplicationId};

use std::collections::HashMap;
use std::time::Duration;

use crate::error::ConfigError;
use crate::transport::StatefulHost;

/// Default base timeout of read calls.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(30);

/// Default base timeout of write calls.
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(30);

/// Default base connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Default recovery window of a quarantined host.
pub const DEFAULT_HOST_DOWN_TTL: Duration = Duration::from_secs(300);

/// Default number of consecutive failures a host may have before quarantine.
pub const DEFAULT_MAX_HOST_FAILURES: u32 = 1;

/// Configuration of a [`Transport`](crate::transport::Transport).
///
/// # Thread Safety
///
/// `SearchConfig` is `Clone`, `Send`, and `Sync`. Each transport built from
/// it owns its own copy of the host list and its health state.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    application_id: ApplicationId,
    api_key: ApiKey,
    hosts: Vec<StatefulHost>,
    read_timeout: Duration,
    write_timeout: Duration,
    connect_timeout: Duration,
    host_down_ttl: Duration,
    max_host_failures: u32,
    default_headers: HashMap<String, String>,
    user_agent_prefix: Option<String>,
}

impl SearchConfig {
    /// Creates a new builder for constructing a `SearchConfig`.
    #[must_use]
    pub fn builder() -> SearchConfigBuilder {
        SearchConfigBuilder::new()
    }

    /// Returns the application ID.
    #[must_use]
    pub const fn application_id(&self) -> &ApplicationId {
        &self.application_id
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the initial host list, in priority order.
    #[must_use]
    pub fn hosts(&self) -> &[StatefulHost] {
        &self.hosts
    }

    /// Returns the base timeout of read calls.
    #[must_use]
    pub const fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    /// Returns the base timeout of write calls.
    #[must_use]
    pub const fn write_timeout(&self) -> Duration {
        self.write_timeout
    }

    /// Returns the base connect timeout.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Returns how long a quarantined host stays excluded.
    #[must_use]
    pub const fn host_down_ttl(&self) -> Duration {
        self.host_down_ttl
    }

    /// Returns how many consecutive failures a host may have before it is
    /// quarantined.
    #[must_use]
    pub const fn max_host_failures(&self) -> u32 {
        self.max_host_failures
    }

    /// Returns the extra headers sent with every call.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify SearchConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SearchConfig>();
};

/// Builder for constructing [`SearchConfig`] instances.
///
/// `application_id` and `api_key` are required.
///
/// # Defaults
///
/// - `hosts`: [`default_hosts`] of the application ID
/// - `read_timeout` / `write_timeout`: 30 seconds
/// - `connect_timeout`: 2 seconds
/// - `host_down_ttl`: 5 minutes
/// - `max_host_failures`: 1 (quarantine on the second consecutive failure)
#[derive(Debug, Default)]
pub struct SearchConfigBuilder {
    application_id: Option<ApplicationId>,
    api_key: Option<ApiKey>,
    hosts: Option<Vec<StatefulHost>>,
    read_timeout: Option<Duration>,
    write_timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    host_down_ttl: Option<Duration>,
    max_host_failures: Option<u32>,
    default_headers: HashMap<String, String>,
    user_agent_prefix: Option<String>,
}

impl SearchConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the application ID (required).
    #[must_use]
    pub fn application_id(mut self, application_id: ApplicationId) -> Self {
        self.application_id = Some(application_id);
        self
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, api_key: ApiKey) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Replaces the default hosts, in priority order.
    #[must_use]
    pub fn hosts(mut self, hosts: Vec<StatefulHost>) -> Self {
        self.hosts = Some(hosts);
        self
    }

    /// Sets the base timeout of read calls.
    #[must_use]
    pub const fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Sets the base timeout of write calls.
    #[must_use]
    pub const fn write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = Some(timeout);
        self
    }

    /// Sets the base connect timeout.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets how long a quarantined host stays excluded.
    #[must_use]
    pub const fn host_down_ttl(mut self, ttl: Duration) -> Self {
        self.host_down_ttl = Some(ttl);
        self
    }

    /// Sets how many consecutive failures a host may have before quarantine.
    #[must_use]
    pub const fn max_host_failures(mut self, failures: u32) -> Self {
        self.max_host_failures = Some(failures);
        self
    }

    /// Adds a header sent with every call.
    #[must_use]
    pub fn default_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`SearchConfig`].
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingRequiredField`] if `application_id` or
    ///   `api_key` is not set
    /// - [`ConfigError::EmptyHostList`] if an empty host list was configured
    /// - [`ConfigError::InvalidTimeout`] if any timeout or the TTL is zero
    pub fn build(self) -> Result<SearchConfig, ConfigError> {
        let application_id = self.application_id.ok_or(ConfigError::MissingRequiredField {
            field: "application_id",
        })?;
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;

        let hosts = match self.hosts {
            Some(hosts) if hosts.is_empty() => return Err(ConfigError::EmptyHostList),
            Some(hosts) => hosts,
            None => default_hosts(&application_id),
        };

        let read_timeout = non_zero("read_timeout", self.read_timeout, DEFAULT_READ_TIMEOUT)?;
        let write_timeout = non_zero("write_timeout", self.write_timeout, DEFAULT_WRITE_TIMEOUT)?;
        let connect_timeout = non_zero(
            "connect_timeout",
            self.connect_timeout,
            DEFAULT_CONNECT_TIMEOUT,
        )?;
        let host_down_ttl = non_zero("host_down_ttl", self.host_down_ttl, DEFAULT_HOST_DOWN_TTL)?;

        Ok(SearchConfig {
            application_id,
            api_key,
            hosts,
            read_timeout,
            write_timeout,
            connect_timeout,
            host_down_ttl,
            max_host_failures: self.max_host_failures.unwrap_or(DEFAULT_MAX_HOST_FAILURES),
            default_headers: self.default_headers,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

fn non_zero(
    field: &'static str,
    value: Option<Duration>,
    default: Duration,
) -> Result<Duration, ConfigError> {
    match value {
        Some(duration) if duration.is_zero() => Err(ConfigError::InvalidTimeout { field }),
        Some(duration) => Ok(duration),
        None => Ok(default),
    }
}
