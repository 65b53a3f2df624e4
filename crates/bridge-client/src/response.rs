//! HTTP response handling.

use serde::de::DeserializeOwned;

use crate::error::Result;

/// A completed HTTP exchange: status code plus body text.
///
/// Carries non-2xx responses as plain data. The Salesforce REST API signals
/// application errors through body shape as much as through status codes, so
/// the classification step upstream needs both, unthrown.
#[derive(Debug, Clone)]
pub struct RawResponse {
    status: u16,
    body: String,
}

impl RawResponse {
    /// Create a response from a status code and body text.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// The HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// The body text.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns true if the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns true if the body is empty or whitespace only.
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }

    /// Deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(Into::into)
    }
}
