//! # sfbridge-auth
//!
//! JWT-bearer authentication for server-to-server Salesforce integration.
//!
//! Every top-level gateway operation performs a fresh exchange: the private
//! key is fetched from its [`KeySource`], a two-minute assertion is signed,
//! and the token endpoint trades it for a [`TokenGrant`]. Grants are
//! ephemeral: used for one logical call and dropped, never stored.
//!
//! ## Security
//!
//! - Access tokens and key material are redacted in Debug output
//! - Error messages sanitize any credential data
//!
//! ## Example
//!
//! ```rust,ignore
//! use sfbridge_auth::JwtAuth;
//!
//! let auth = JwtAuth::from_key_file(
//!     "3MVG9...consumer-key",
//!     "integration@example.com",
//!     "/etc/sfbridge/server.key",
//! );
//! let grant = auth.authenticate_production().await?;
//! println!("org at {}", grant.instance_url);
//! ```

mod error;
mod jwt;
mod keys;

pub use error::{Error, ErrorKind, Result};
pub use jwt::{JwtAuth, TokenGrant};
pub use keys::{FileKeySource, KeySource, StaticKeySource};

/// Default Salesforce login URL for production.
pub const PRODUCTION_LOGIN_URL: &str = "https://login.salesforce.com";

/// Default Salesforce login URL for sandbox.
pub const SANDBOX_LOGIN_URL: &str = "https://test.salesforce.com";
