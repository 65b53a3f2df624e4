//! Call outcomes and write-response classification.

use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;

/// One page of query results as the backend returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryPage {
    /// Total number of records matching the query.
    #[serde(rename = "totalSize")]
    pub total_size: u64,

    /// Whether all records are returned (no more pages).
    pub done: bool,

    /// Continuation URL for the next page; absent on the final page.
    #[serde(rename = "nextRecordsUrl")]
    pub next_records_url: Option<String>,

    /// The records.
    pub records: Vec<Value>,
}

/// The classified result of one executed call.
///
/// Backend-reported write errors are an [`Outcome`], not an `Err`: the call
/// completed and the payload carries per-record detail the caller will want
/// to inspect. `Err` is reserved for calls that did not complete (auth,
/// transport, or decoding failures).
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Aggregated query records, concatenated in backend page order.
    Records(Vec<Value>),
    /// Write accepted with an empty response body.
    NoContent,
    /// Write response payload with no error markers.
    Payload(Value),
    /// Write response payload signalling `hasErrors` or a record-level
    /// `errorCode`, returned unchanged for inspection.
    BackendError(Value),
}

impl Outcome {
    /// Returns true if the backend reported a write error.
    pub fn is_backend_error(&self) -> bool {
        matches!(self, Outcome::BackendError(_))
    }

    /// Borrow the query records, if this outcome carries any.
    pub fn records(&self) -> Option<&[Value]> {
        match self {
            Outcome::Records(records) => Some(records),
            _ => None,
        }
    }

    /// Consume the outcome into its query records; empty for write outcomes.
    pub fn into_records(self) -> Vec<Value> {
        match self {
            Outcome::Records(records) => records,
            _ => Vec::new(),
        }
    }

    /// Consume the outcome into its response payload, error or not.
    pub fn into_payload(self) -> Option<Value> {
        match self {
            Outcome::Payload(payload) | Outcome::BackendError(payload) => Some(payload),
            Outcome::Records(_) | Outcome::NoContent => None,
        }
    }
}

/// Classify a write response body.
///
/// Shape checks mirror the backend's conventions: an empty body is an
/// unconditional success; an array body (error lists, collection results)
/// is inspected at element 0 for `errorCode`; any body is inspected for a
/// top-level `hasErrors` (composite-tree responses). A non-array body
/// without `hasErrors` is returned as-is with no further inspection.
pub(crate) fn classify_write(body: &str) -> Result<Outcome> {
    if body.trim().is_empty() {
        return Ok(Outcome::NoContent);
    }

    let payload: Value = serde_json::from_str(body)?;
    if write_failed(&payload) {
        Ok(Outcome::BackendError(payload))
    } else {
        Ok(Outcome::Payload(payload))
    }
}

fn write_failed(payload: &Value) -> bool {
    let record_error = payload
        .as_array()
        .and_then(|entries| entries.first())
        .and_then(|first| first.get("errorCode"))
        .is_some_and(is_truthy);
    let has_errors = payload.get("hasErrors").is_some_and(is_truthy);

    record_error || has_errors
}

/// Truthiness as the backend's payloads mean it: null, false, zero and the
/// empty string are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
