//! # sfbridge-client
//!
//! HTTP transport for the sfbridge Salesforce gateway.
//!
//! This crate provides the plumbing the higher layers build on:
//! - [`HttpClient`] - a thin, timeout-aware wrapper around `reqwest`
//! - [`RequestBuilder`] - the three verbs and two body kinds the gateway issues
//! - [`RawResponse`] - status + body text, with non-2xx returned as data
//!
//! Non-success responses are NOT errors at this layer: the caller
//! classifies them from the body shape. Only failures to complete a round
//! trip at all (connection refused, timeout) surface as [`Error`].
//!
//! There is no retry, rate-limit, or pooling configuration here; resilience
//! policy stays with the callers of this low-volume integration client.

mod config;
mod error;
mod http;
mod request;
mod response;

pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{Error, ErrorKind, Result};
pub use http::HttpClient;
pub use request::{ApiMethod, RequestBody, RequestBuilder};
pub use response::RawResponse;

/// Default Salesforce REST API version, rendered as `v50.0` in endpoints.
pub const DEFAULT_API_VERSION: u32 = 50;

/// User-Agent string for the client.
pub const USER_AGENT: &str = concat!("sfbridge/", env!("CARGO_PKG_VERSION"));
