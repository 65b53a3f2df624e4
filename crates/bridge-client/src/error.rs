//! Error types for sfbridge-client.

/// Result type alias for sfbridge-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for sfbridge-client operations.
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

    /// Returns true if the request timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self.kind, ErrorKind::Timeout)
    }

    /// Returns true if the connection could not be established.
    pub fn is_connection(&self) -> bool {
        matches!(self.kind, ErrorKind::Connection(_))
    }
}

/// The kind of error that occurred.
///
/// Note that a non-2xx response is not an error at this layer: the caller
/// receives it as a [`crate::RawResponse`] and classifies it. These kinds
/// cover failures to complete a round trip or to decode its body.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Connection error.
    #[error("connection error: {0}")]
    Connection(String),

    /// HTTP protocol failure (the request never produced a response).
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else if err.is_connect() {
            ErrorKind::Connection(err.to_string())
        } else {
            ErrorKind::Http(err.to_string())
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
        let err = Error::new(ErrorKind::Timeout);
        assert_eq!(err.to_string(), "request timeout");
        assert!(err.is_timeout());
        assert!(!err.is_connection());

        let err = Error::new(ErrorKind::Connection("refused".to_string()));
        assert_eq!(err.to_string(), "connection error: refused");
        assert!(err.is_connection());
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<String>("not valid json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err.kind, ErrorKind::Json(_)));
        assert!(err.source.is_some());
    }

    #[test]
    fn test_error_with_source() {
        let source_err = std::io::Error::other("boom");
        let err = Error::with_source(ErrorKind::Other("send failed".into()), source_err);
        assert!(err.source.is_some());
        assert_eq!(err.to_string(), "send failed");
    }
}
