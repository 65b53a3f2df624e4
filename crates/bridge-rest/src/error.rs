//! Error types for sfbridge-rest.
//!
//! The gateway's contract is that failures never unwind past [`execute`]:
//! everything a call can do wrong comes back as an `Err` of this type, with
//! the kind distinguishing authentication, transport, and decoding
//! failures. Backend-reported write errors are not here at all; they are a
//! successful call outcome (see [`Outcome::BackendError`]).
//!
//! [`execute`]: crate::Gateway::execute
//! [`Outcome::BackendError`]: crate::Outcome

/// Result type alias for sfbridge-rest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for sfbridge-rest operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Returns true if this is an authentication failure.
    pub fn is_auth(&self) -> bool {
        matches!(self.kind, ErrorKind::Auth(_))
    }

    /// Returns true if this is a transport-level failure.
    pub fn is_transport(&self) -> bool {
        matches!(self.kind, ErrorKind::Transport(_))
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Token exchange failed (key retrieval, signing, or the exchange itself).
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The transport could not complete a round trip.
    #[error("transport failure: {0}")]
    Transport(String),

    /// A read returned a non-success status.
    #[error("HTTP error: {status} {message}")]
    Http { status: u16, message: String },

    /// Response body could not be decoded.
    #[error("JSON error: {0}")]
    Json(String),

    /// The request descriptor is missing a required field.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The pagination loop hit its configured bound.
    #[error("pagination exceeded {limit} pages")]
    PageLimit { limit: u32 },

    /// Environment variable not set.
    #[error("environment variable not set: {0}")]
    EnvVar(String),
}

impl From<sfbridge_auth::Error> for Error {
    fn from(err: sfbridge_auth::Error) -> Self {
        Error::with_source(ErrorKind::Auth(err.to_string()), err)
    }
}

impl From<sfbridge_client::Error> for Error {
    fn from(err: sfbridge_client::Error) -> Self {
        let kind = match &err.kind {
            sfbridge_client::ErrorKind::Json(msg) => ErrorKind::Json(msg.clone()),
            _ => ErrorKind::Transport(err.to_string()),
        };
        Error::with_source(kind, err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_display() {
        let err = Error::new(ErrorKind::Http {
            status: 404,
            message: "NOT_FOUND: no row".to_string(),
        });
        assert_eq!(err.to_string(), "HTTP error: 404 NOT_FOUND: no row");

        let err = Error::new(ErrorKind::PageLimit { limit: 1000 });
        assert_eq!(err.to_string(), "pagination exceeded 1000 pages");
    }

    #[test]
    fn test_auth_error_conversion() {
        let auth_err = sfbridge_auth::Error::new(sfbridge_auth::ErrorKind::Jwt(
            "signing failed".to_string(),
        ));
        let err: Error = auth_err.into();
        assert!(err.is_auth());
        assert!(err.source.is_some());
        assert!(err.to_string().contains("signing failed"));
    }

    #[test]
    fn test_transport_error_conversion() {
        let client_err =
            sfbridge_client::Error::new(sfbridge_client::ErrorKind::Connection("refused".into()));
        let err: Error = client_err.into();
        assert!(err.is_transport());

        let client_err =
            sfbridge_client::Error::new(sfbridge_client::ErrorKind::Json("bad token".into()));
        let err: Error = client_err.into();
        assert!(matches!(err.kind, ErrorKind::Json(_)));
    }
}
