//! Request descriptors and endpoint construction.

use serde_json::Value;

use crate::error::{Error, ErrorKind, Result};
use crate::soql::QueryClauses;

/// The operation a request performs.
///
/// Maps onto HTTP as GET (Query), POST (Create), PATCH (Update).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Query,
    Create,
    Update,
}

/// An immutable description of one API call.
///
/// Built through the per-operation constructors, which validate the
/// required fields up front: a query needs a FROM clause, a create needs a
/// target sObject, an update needs both the sObject and a record id.
/// Constructed fresh per call; nothing here is shared or mutated after
/// construction.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    sobject: Option<String>,
    record_id: Option<String>,
    api_version: Option<u32>,
    clauses: QueryClauses,
    payload: Option<Value>,
    batch: bool,
}

impl ApiRequest {
    /// Describe a SOQL query.
    pub fn query(clauses: QueryClauses) -> Result<Self> {
        if !clauses.has_from() {
            return Err(Error::new(ErrorKind::InvalidRequest(
                "a query needs a FROM clause".to_string(),
            )));
        }
        Ok(Self {
            method: Method::Query,
            sobject: None,
            record_id: None,
            api_version: None,
            clauses,
            payload: None,
            batch: false,
        })
    }

    /// Describe a record creation.
    pub fn create(sobject: impl Into<String>, payload: Value) -> Result<Self> {
        let sobject = sobject.into();
        if sobject.is_empty() {
            return Err(Error::new(ErrorKind::InvalidRequest(
                "create needs a target sObject".to_string(),
            )));
        }
        Ok(Self {
            method: Method::Create,
            sobject: Some(sobject),
            record_id: None,
            api_version: None,
            clauses: QueryClauses::default(),
            payload: Some(payload),
            batch: false,
        })
    }

    /// Describe a record update.
    pub fn update(
        sobject: impl Into<String>,
        record_id: impl Into<String>,
        payload: Value,
    ) -> Result<Self> {
        let sobject = sobject.into();
        let record_id = record_id.into();
        if sobject.is_empty() || record_id.is_empty() {
            return Err(Error::new(ErrorKind::InvalidRequest(
                "update needs a target sObject and a record id".to_string(),
            )));
        }
        Ok(Self {
            method: Method::Update,
            sobject: Some(sobject),
            record_id: Some(record_id),
            api_version: None,
            clauses: QueryClauses::default(),
            payload: Some(payload),
            batch: false,
        })
    }

    /// Pin the API version for this request, overriding the gateway default.
    pub fn with_api_version(mut self, version: u32) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Route a write through the composite-tree endpoint, which accepts a
    /// nested tree of records in one call.
    pub fn with_batch(mut self, batch: bool) -> Self {
        self.batch = batch;
        self
    }

    /// The operation this request performs.
    pub fn method(&self) -> Method {
        self.method
    }

    pub(crate) fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    /// The endpoint path for this request, relative to the instance URL.
    ///
    /// `default_version` applies when the request did not pin one.
    pub fn endpoint(&self, default_version: u32) -> String {
        let version = self.api_version.unwrap_or(default_version);
        let sobject = self.sobject.as_deref().unwrap_or_default();
        let prefix = if self.batch {
            "composite/tree/"
        } else {
            "sobjects/"
        };

        match self.method {
            Method::Query => format!(
                "/services/data/v{}.0/query?q={}",
                version,
                urlencoding::encode(&self.clauses.render())
            ),
            Method::Create => format!("/services/data/v{}.0/{}{}/", version, prefix, sobject),
            Method::Update => format!(
                "/services/data/v{}.0/{}{}/{}.json",
                version,
                prefix,
                sobject,
                self.record_id.as_deref().unwrap_or_default()
            ),
        }
    }
}
