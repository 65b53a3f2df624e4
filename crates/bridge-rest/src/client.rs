//! The gateway: authenticate, dispatch, paginate, classify.

use serde_json::Value;
use tracing::{debug, instrument, warn};

use sfbridge_auth::{JwtAuth, TokenGrant};
use sfbridge_client::{ClientConfig, HttpClient, RequestBuilder, DEFAULT_API_VERSION};

use crate::error::{Error, ErrorKind, Result};
use crate::outcome::{classify_write, Outcome, QueryPage};
use crate::request::{ApiRequest, Method};
use crate::soql::QueryClauses;

/// Upper bound on pagination follow-ups per query. The cursor chain is
/// backend-controlled; without a bound a misbehaving org could keep the
/// loop alive indefinitely.
const DEFAULT_PAGE_LIMIT: u32 = 1000;

/// Salesforce REST gateway.
///
/// The single entry point of the crate: [`Gateway::execute`] takes an
/// [`ApiRequest`], performs a fresh JWT-bearer token exchange, issues the
/// call against the granted instance URL, follows pagination cursors on
/// queries, and classifies write responses into an [`Outcome`].
///
/// Every call authenticates from scratch: a grant lives for exactly one
/// logical call, including its pagination follow-ups. Concurrent calls on
/// clones of a gateway share nothing mutable.
///
/// # Example
///
/// ```rust,ignore
/// use sfbridge_rest::{Gateway, QueryClauses};
/// use sfbridge_auth::JwtAuth;
///
/// let auth = JwtAuth::from_key_file("consumer-key", "user@example.com", "server.key");
/// let gateway = Gateway::new(auth, sfbridge_auth::PRODUCTION_LOGIN_URL)?;
///
/// let accounts = gateway
///     .query(QueryClauses::new().select("Id, Name").from("Account").limit("10"))
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct Gateway {
    auth: JwtAuth,
    login_url: String,
    http: HttpClient,
    api_version: u32,
    page_limit: u32,
}

impl Gateway {
    /// Create a gateway with default transport configuration.
    pub fn new(auth: JwtAuth, login_url: impl Into<String>) -> Result<Self> {
        Self::with_config(auth, login_url, ClientConfig::default())
    }

    /// Create a gateway with custom transport configuration.
    pub fn with_config(
        auth: JwtAuth,
        login_url: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        let http = HttpClient::new(config)?;
        Ok(Self {
            auth,
            login_url: login_url.into().trim_end_matches('/').to_string(),
            http,
            api_version: DEFAULT_API_VERSION,
            page_limit: DEFAULT_PAGE_LIMIT,
        })
    }

    /// Build a gateway from environment variables.
    ///
    /// Required: `SFBRIDGE_CONSUMER_KEY`, `SFBRIDGE_USERNAME`,
    /// `SFBRIDGE_KEY_FILE`. Optional: `SFBRIDGE_LOGIN_URL` (production login
    /// by default) and `SFBRIDGE_API_VERSION`.
    pub fn from_env() -> Result<Self> {
        let consumer_key = required_env("SFBRIDGE_CONSUMER_KEY")?;
        let username = required_env("SFBRIDGE_USERNAME")?;
        let key_file = required_env("SFBRIDGE_KEY_FILE")?;
        let login_url = std::env::var("SFBRIDGE_LOGIN_URL")
            .unwrap_or_else(|_| sfbridge_auth::PRODUCTION_LOGIN_URL.to_string());

        let auth = JwtAuth::from_key_file(consumer_key, username, key_file);
        let mut gateway = Self::new(auth, login_url)?;

        if let Ok(version) = std::env::var("SFBRIDGE_API_VERSION") {
            let version = version.parse().map_err(|_| {
                Error::new(ErrorKind::InvalidRequest(format!(
                    "SFBRIDGE_API_VERSION must be a positive integer, got {version:?}"
                )))
            })?;
            gateway = gateway.with_api_version(version);
        }

        Ok(gateway)
    }

    /// Set the default API version for requests that do not pin one.
    pub fn with_api_version(mut self, version: u32) -> Self {
        self.api_version = version;
        self
    }

    /// Set the pagination bound (pages per query).
    pub fn with_page_limit(mut self, limit: u32) -> Self {
        self.page_limit = limit;
        self
    }

    /// The login URL this gateway authenticates against.
    pub fn login_url(&self) -> &str {
        &self.login_url
    }

    /// The default API version.
    pub fn api_version(&self) -> u32 {
        self.api_version
    }

    /// Execute one request.
    ///
    /// Authenticates, issues the call (and, for queries, its pagination
    /// follow-ups under the same grant), and classifies the result. Every
    /// failure comes back as an `Err`, logged, never as a panic. On a
    /// mid-pagination failure the records accumulated so far are discarded
    /// with the call.
    #[instrument(skip(self, request), fields(method = ?request.method()))]
    pub async fn execute(&self, request: &ApiRequest) -> Result<Outcome> {
        match self.dispatch(request).await {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                warn!(error = %err, "call failed");
                Err(err)
            }
        }
    }

    async fn dispatch(&self, request: &ApiRequest) -> Result<Outcome> {
        let endpoint = request.endpoint(self.api_version);
        let grant = self.auth.authenticate(&self.login_url).await?;
        let url = format!("{}{}", grant.instance_url, endpoint);

        match request.method() {
            Method::Query => self.run_query(&grant, url).await,
            Method::Create | Method::Update => self.run_write(request, &grant, &url).await,
        }
    }

    /// Fetch a query result page by page, strictly serially: each cursor
    /// comes from the previous response.
    async fn run_query(&self, grant: &TokenGrant, first_url: String) -> Result<Outcome> {
        let mut records = Vec::new();
        let mut url = first_url;
        let mut pages: u32 = 0;

        loop {
            let response = self
                .http
                .send(self.http.get(&url).bearer_auth(&grant.access_token))
                .await?;

            if !response.is_success() {
                return Err(Error::new(ErrorKind::Http {
                    status: response.status(),
                    message: api_error_message(response.body()),
                }));
            }

            let page: QueryPage = response.json()?;
            records.extend(page.records);
            pages += 1;

            match page.next_records_url {
                Some(cursor) => {
                    if pages >= self.page_limit {
                        return Err(Error::new(ErrorKind::PageLimit {
                            limit: self.page_limit,
                        }));
                    }
                    url = format!("{}{}", grant.instance_url, cursor);
                }
                None => break,
            }
        }

        debug!(total = records.len(), pages, "query complete");
        Ok(Outcome::Records(records))
    }

    async fn run_write(
        &self,
        request: &ApiRequest,
        grant: &TokenGrant,
        url: &str,
    ) -> Result<Outcome> {
        let builder = if request.method() == Method::Create {
            self.http.post(url)
        } else {
            self.http.patch(url)
        };
        let mut builder: RequestBuilder = builder.bearer_auth(&grant.access_token);
        if let Some(payload) = request.payload() {
            builder = builder.json_value(payload.clone());
        }

        let response = self.http.send(builder).await?;
        let outcome = classify_write(response.body())?;

        if outcome.is_backend_error() {
            warn!(status = response.status(), "backend reported record errors");
        }
        Ok(outcome)
    }

    /// Run a SOQL query and return all records across every page.
    pub async fn query(&self, clauses: QueryClauses) -> Result<Vec<Value>> {
        let request = ApiRequest::query(clauses)?;
        Ok(self.execute(&request).await?.into_records())
    }

    /// Create a single record.
    pub async fn create(&self, sobject: impl Into<String>, payload: Value) -> Result<Outcome> {
        self.execute(&ApiRequest::create(sobject, payload)?).await
    }

    /// Update a single record.
    pub async fn update(
        &self,
        sobject: impl Into<String>,
        record_id: impl Into<String>,
        payload: Value,
    ) -> Result<Outcome> {
        self.execute(&ApiRequest::update(sobject, record_id, payload)?)
            .await
    }

    /// Create a nested tree of records through the composite-tree endpoint.
    pub async fn create_tree(&self, sobject: impl Into<String>, payload: Value) -> Result<Outcome> {
        self.execute(&ApiRequest::create(sobject, payload)?.with_batch(true))
            .await
    }
}

fn required_env(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| Error::new(ErrorKind::EnvVar(name.to_string())))
}

/// Extract a readable message from a non-success read response body.
fn api_error_message(body: &str) -> String {
    if let Ok(Value::Array(entries)) = serde_json::from_str::<Value>(body) {
        if let Some(first) = entries.first() {
            let code = first
                .get("errorCode")
                .and_then(Value::as_str)
                .unwrap_or("UNKNOWN");
            let message = first.get("message").and_then(Value::as_str).unwrap_or("");
            return format!("{code}: {message}");
        }
    }
    body.trim().chars().take(200).collect()
}
