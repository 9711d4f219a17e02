//! # Algolia Transport
//!
//! The transport layer of an Algolia API client: it sends read and write
//! calls to a multi-region HTTP API and survives individual host failures
//! through failover, host health tracking and escalating timeouts.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`SearchConfig`] and [`SearchConfigBuilder`]
//! - Validated credential newtypes ([`ApplicationId`], [`ApiKey`])
//! - Host health state shared across calls ([`transport::StatefulHost`],
//!   [`transport::RetryStrategy`])
//! - An async request loop with failover ([`transport::Transport`])
//! - A pluggable network layer ([`transport::Requester`])
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use algolia_transport::{ApiKey, ApplicationId, SearchConfig};
//! use algolia_transport::transport::{HttpMethod, RequestOptions, Transport};
//! use serde_json::json;
//!
//! let config = SearchConfig::builder()
//!     .application_id(ApplicationId::new("MY_APP")?)
//!     .api_key(ApiKey::new("my-api-key")?)
//!     .build()?;
//! let transport = Transport::new(config);
//!
//! let results = transport
//!     .read(
//!         HttpMethod::Post,
//!         "/1/indexes/products/query",
//!         Some(json!({"query": "red shoes"})),
//!         &RequestOptions::new(),
//!     )
//!     .await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: every transport owns its hosts and their health
//! - **Fail-fast validation**: configuration is validated on construction
//! - **Thread-safe**: all public types are `Send + Sync`
//! - **Async-first**: designed for use with the Tokio runtime

pub mod config;
pub mod error;
pub mod transport;

// Re-export public types at crate root for convenience
pub use config::{default_hosts, ApiKey, ApplicationId, SearchConfig, SearchConfigBuilder};
pub use error::ConfigError;

pub use transport::{
    AlgoliaHttpError, CallType, CompressionType, HttpMethod, RequestOptions, Transport,
    TransportError, UnreachableHostsError,
};
