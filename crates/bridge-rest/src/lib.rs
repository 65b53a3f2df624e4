//! # sfbridge-rest
//!
//! Salesforce sObject REST gateway: SOQL queries with automatic cursor
//! pagination, single-record creates and updates, and composite-tree batch
//! writes, each call authenticated with a fresh JWT-bearer token exchange.
//!
//! One request flows through one pipeline: describe the call as an
//! [`ApiRequest`], let the [`Gateway`] exchange an assertion for a grant,
//! issue the call against the granted instance, and get back a classified
//! [`Outcome`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use sfbridge_auth::JwtAuth;
//! use sfbridge_rest::{Gateway, QueryClauses};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sfbridge_rest::Error> {
//!     let auth = JwtAuth::from_key_file(
//!         "3MVG9...consumer-key",
//!         "integration@example.com",
//!         "/etc/sfbridge/server.key",
//!     );
//!     let gateway = Gateway::new(auth, sfbridge_auth::PRODUCTION_LOGIN_URL)?;
//!
//!     // Query, all pages aggregated
//!     let accounts = gateway
//!         .query(QueryClauses::new().select("Id, Name").from("Account"))
//!         .await?;
//!
//!     // Create
//!     let outcome = gateway
//!         .create("Contact", serde_json::json!({"LastName": "Doe"}))
//!         .await?;
//!     if outcome.is_backend_error() {
//!         eprintln!("rejected: {:?}", outcome.into_payload());
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod outcome;
mod request;
mod soql;

pub use client::Gateway;
pub use error::{Error, ErrorKind, Result};
pub use outcome::{Outcome, QueryPage};
pub use request::{ApiRequest, Method};
pub use soql::QueryClauses;

// Re-export transport configuration that embedders commonly need.
pub use sfbridge_client::{ClientConfig, ClientConfigBuilder};
