//! HTTP request building.

/// HTTP request method.
///
/// Only the verbs the gateway issues: GET for queries, POST for creates and
/// the token exchange, PATCH for updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiMethod {
    Get,
    Post,
    Patch,
}

impl ApiMethod {
    /// Convert to reqwest::Method.
    pub(crate) fn to_reqwest(self) -> reqwest::Method {
        match self {
            ApiMethod::Get => reqwest::Method::GET,
            ApiMethod::Post => reqwest::Method::POST,
            ApiMethod::Patch => reqwest::Method::PATCH,
        }
    }
}

/// Request body content.
#[derive(Debug)]
pub enum RequestBody {
    /// JSON body (`Content-Type: application/json`).
    Json(serde_json::Value),
    /// Form body (`Content-Type: application/x-www-form-urlencoded`).
    Form(Vec<(String, String)>),
}

/// Builder for HTTP requests.
#[derive(Debug)]
pub struct RequestBuilder {
    pub(crate) method: ApiMethod,
    pub(crate) url: String,
    pub(crate) bearer_token: Option<String>,
    pub(crate) body: Option<RequestBody>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: ApiMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            bearer_token: None,
            body: None,
        }
    }

    /// Set the bearer token for the Authorization header.
    pub fn bearer_auth(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Set a JSON body.
    pub fn json_value(mut self, body: serde_json::Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    /// Set a form-urlencoded body.
    pub fn form(mut self, fields: Vec<(String, String)>) -> Self {
        self.body = Some(RequestBody::Form(fields));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let req = RequestBuilder::new(ApiMethod::Get, "https://example.com/api")
            .bearer_auth("token123");

        assert_eq!(req.method, ApiMethod::Get);
        assert_eq!(req.url, "https://example.com/api");
        assert_eq!(req.bearer_token, Some("token123".to_string()));
        assert!(req.body.is_none());
    }

    #[test]
    fn test_json_body() {
        let req = RequestBuilder::new(ApiMethod::Post, "https://example.com")
            .json_value(serde_json::json!({"Name": "Test Account"}));

        assert!(matches!(req.body, Some(RequestBody::Json(_))));
    }

    #[test]
    fn test_form_body() {
        let req = RequestBuilder::new(ApiMethod::Post, "https://example.com").form(vec![
            ("grant_type".to_string(), "password".to_string()),
            ("assertion".to_string(), "abc".to_string()),
        ]);

        match req.body {
            Some(RequestBody::Form(fields)) => assert_eq!(fields.len(), 2),
            other => panic!("expected form body, got {other:?}"),
        }
    }

    #[test]
    fn test_method_conversion() {
        assert_eq!(ApiMethod::Get.to_reqwest(), reqwest::Method::GET);
        assert_eq!(ApiMethod::Post.to_reqwest(), reqwest::Method::POST);
        assert_eq!(ApiMethod::Patch.to_reqwest(), reqwest::Method::PATCH);
    }
}
