//! # sfbridge
//!
//! A Salesforce REST gateway for unattended server-to-server integrations.
//!
//! Each operation runs one pipeline: sign a short-lived JWT assertion,
//! exchange it for a bearer token, build the endpoint from a declarative
//! request description, execute (following pagination cursors on queries),
//! and classify the response. Grants are ephemeral: every top-level call
//! authenticates from scratch and nothing is cached between calls.
//!
//! ## Security
//!
//! - Access tokens and key material are redacted in Debug output
//! - Error messages sanitize any credential data
//!
//! ## Crates
//!
//! - **sfbridge-client** - HTTP transport: timeouts, request building, raw responses
//! - **sfbridge-auth** - JWT-bearer OAuth flow and key retrieval
//! - **sfbridge-rest** - SOQL rendering, endpoint construction, the gateway
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sfbridge::{Gateway, JwtAuth, QueryClauses};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let auth = JwtAuth::from_key_file(
//!         "3MVG9...consumer-key",
//!         "integration@example.com",
//!         "/etc/sfbridge/server.key",
//!     );
//!     let gateway = Gateway::new(auth, sfbridge::auth::PRODUCTION_LOGIN_URL)?;
//!
//!     let accounts = gateway
//!         .query(QueryClauses::new().select("Id, Name").from("Account").limit("10"))
//!         .await?;
//!
//!     for account in accounts {
//!         println!("{}", account["Name"]);
//!     }
//!
//!     Ok(())
//! }
//! ```

// Re-export all crates for convenient access
pub use sfbridge_auth as auth;
pub use sfbridge_client as client;
pub use sfbridge_rest as rest;

// Re-export commonly used types at the top level
pub use sfbridge_auth::{FileKeySource, JwtAuth, KeySource, StaticKeySource, TokenGrant};
pub use sfbridge_client::{ClientConfig, ClientConfigBuilder};
pub use sfbridge_rest::{ApiRequest, Gateway, Method, Outcome, QueryClauses, QueryPage};
