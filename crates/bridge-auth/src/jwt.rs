//! JWT Bearer authentication flow.

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, ErrorKind, Result};
use crate::keys::{FileKeySource, KeySource};

/// Assertion lifetime in seconds. The authorization server rejects
/// assertions issued more than three minutes before the exchange, so this
/// stays fixed at two and is not a tunable.
const ASSERTION_LIFETIME_SECS: i64 = 120;

const GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// JWT Bearer authentication for server-to-server integration.
///
/// Requires a connected app with a certificate configured. The private key
/// is fetched from the [`KeySource`] at each exchange, and the resulting
/// [`TokenGrant`] is meant for a single logical call; nothing is cached
/// here.
#[derive(Clone)]
pub struct JwtAuth {
    /// Consumer key (client_id) from the connected app.
    consumer_key: String,
    /// Username of the Salesforce user to authenticate as.
    username: String,
    /// Where the PEM signing key comes from.
    key_source: Arc<dyn KeySource>,
}

impl std::fmt::Debug for JwtAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtAuth")
            .field("consumer_key", &self.consumer_key)
            .field("username", &self.username)
            .field("key_source", &"[REDACTED]")
            .finish()
    }
}

impl JwtAuth {
    /// Create a new JWT authenticator.
    ///
    /// # Arguments
    ///
    /// * `consumer_key` - The consumer key from the connected app
    /// * `username` - The Salesforce username to authenticate as
    /// * `key_source` - Source of the private key in PEM format (RSA)
    pub fn new(
        consumer_key: impl Into<String>,
        username: impl Into<String>,
        key_source: impl KeySource + 'static,
    ) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            username: username.into(),
            key_source: Arc::new(key_source),
        }
    }

    /// Convenience constructor for a key stored in a file.
    pub fn from_key_file(
        consumer_key: impl Into<String>,
        username: impl Into<String>,
        key_path: impl Into<std::path::PathBuf>,
    ) -> Self {
        Self::new(consumer_key, username, FileKeySource::new(key_path))
    }

    /// Build the claim set for an assertion addressed to `audience`.
    fn claims(&self, audience: &str) -> JwtClaims {
        let now = Utc::now();
        let exp = now + Duration::seconds(ASSERTION_LIFETIME_SECS);

        JwtClaims {
            iss: self.consumer_key.clone(),
            sub: self.username.clone(),
            aud: audience.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        }
    }

    /// Generate a signed JWT assertion.
    fn signed_assertion(&self, audience: &str) -> Result<String> {
        let pem = self.key_source.fetch()?;
        let key = EncodingKey::from_rsa_pem(&pem)?;
        let header = Header::new(Algorithm::RS256);

        let token = encode(&header, &self.claims(audience), &key)?;
        Ok(token)
    }

    /// Authenticate using the JWT Bearer flow.
    ///
    /// # Arguments
    ///
    /// * `login_url` - The Salesforce login URL (e.g., "<https://login.salesforce.com>")
    ///
    /// # Returns
    ///
    /// A [`TokenGrant`] carrying the access token and instance URL.
    pub async fn authenticate(&self, login_url: &str) -> Result<TokenGrant> {
        let login_url = login_url.trim_end_matches('/');
        let assertion = self.signed_assertion(login_url)?;

        debug!(login_url, "exchanging JWT assertion for an access token");

        let client = reqwest::Client::new();
        let response = client
            .post(format!("{}/services/oauth2/token", login_url))
            .form(&[("grant_type", GRANT_TYPE), ("assertion", assertion.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await?;
            let kind = match serde_json::from_str::<OAuthErrorResponse>(&body) {
                Ok(oauth) => ErrorKind::OAuth {
                    error: oauth.error,
                    description: oauth.error_description,
                },
                Err(_) => ErrorKind::Http(format!("token endpoint returned {}", status)),
            };
            return Err(Error::new(kind));
        }

        let token: TokenResponse = response.json().await?;

        Ok(TokenGrant {
            access_token: token.access_token,
            instance_url: token.instance_url,
        })
    }

    /// Authenticate using the JWT Bearer flow for production.
    pub async fn authenticate_production(&self) -> Result<TokenGrant> {
        self.authenticate(crate::PRODUCTION_LOGIN_URL).await
    }

    /// Authenticate using the JWT Bearer flow for sandbox.
    pub async fn authenticate_sandbox(&self) -> Result<TokenGrant> {
        self.authenticate(crate::SANDBOX_LOGIN_URL).await
    }
}

/// The result of one token exchange.
///
/// Ephemeral by contract: a grant covers one logical call and its pagination
/// follow-ups, then gets dropped. It is never persisted.
#[derive(Clone)]
pub struct TokenGrant {
    /// Bearer token for the Authorization header.
    pub access_token: String,
    /// Base URL of the org instance the token is valid against.
    pub instance_url: String,
}

impl std::fmt::Debug for TokenGrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenGrant")
            .field("access_token", &"[REDACTED]")
            .field("instance_url", &self.instance_url)
            .finish()
    }
}

/// JWT claims for the Salesforce OAuth assertion.
#[derive(Debug, Serialize)]
struct JwtClaims {
    /// Issuer (consumer key).
    iss: String,
    /// Subject (username).
    sub: String,
    /// Audience (login URL).
    aud: String,
    /// Expiration time (Unix timestamp).
    exp: i64,
    /// Issued at time (Unix timestamp).
    iat: i64,
}

/// Token response from JWT authentication.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    instance_url: String,
}

/// OAuth error response.
#[derive(Debug, Deserialize)]
struct OAuthErrorResponse {
    error: String,
    error_description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::StaticKeySource;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TEST_KEY: &str = include_str!("../testdata/rsa2048.pem");

    fn test_auth() -> JwtAuth {
        JwtAuth::new(
            "3MVG9test-consumer-key",
            "integration@example.com",
            StaticKeySource::new(TEST_KEY.as_bytes().to_vec()),
        )
    }

    #[test]
    fn test_claims_identity_fields() {
        let claims = test_auth().claims("https://login.salesforce.com");

        assert_eq!(claims.iss, "3MVG9test-consumer-key");
        assert_eq!(claims.sub, "integration@example.com");
        assert_eq!(claims.aud, "https://login.salesforce.com");
    }

    #[test]
    fn test_claims_expire_in_two_minutes() {
        let claims = test_auth().claims("https://login.salesforce.com");
        assert_eq!(claims.exp - claims.iat, 120);
    }

    #[test]
    fn test_signed_assertion_structure() {
        let assertion = test_auth()
            .signed_assertion("https://login.salesforce.com")
            .unwrap();

        let segments: Vec<&str> = assertion.split('.').collect();
        assert_eq!(segments.len(), 3);

        let header: serde_json::Value =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(segments[0]).unwrap()).unwrap();
        assert_eq!(header["alg"], "RS256");

        let claims: serde_json::Value =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(segments[1]).unwrap()).unwrap();
        assert_eq!(claims["iss"], "3MVG9test-consumer-key");
        assert_eq!(
            claims["exp"].as_i64().unwrap() - claims["iat"].as_i64().unwrap(),
            120
        );
    }

    #[test]
    fn test_malformed_key_is_jwt_error() {
        let auth = JwtAuth::new(
            "key",
            "user",
            StaticKeySource::new(b"not a pem".to_vec()),
        );
        let err = auth
            .signed_assertion("https://login.salesforce.com")
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Jwt(_)));
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/services/oauth2/token"))
            .and(header("Content-Type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("jwt-bearer"))
            .and(body_string_contains("assertion="))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "00Dxx0000001gPL!token",
                "instance_url": "https://na1.salesforce.com",
                "token_type": "Bearer"
            })))
            .mount(&mock_server)
            .await;

        let grant = test_auth().authenticate(&mock_server.uri()).await.unwrap();
        assert_eq!(grant.access_token, "00Dxx0000001gPL!token");
        assert_eq!(grant.instance_url, "https://na1.salesforce.com");
    }

    #[tokio::test]
    async fn test_authenticate_oauth_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/services/oauth2/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "invalid_grant",
                "error_description": "user hasn't approved this consumer"
            })))
            .mount(&mock_server)
            .await;

        let err = test_auth()
            .authenticate(&mock_server.uri())
            .await
            .unwrap_err();
        match err.kind {
            ErrorKind::OAuth { error, .. } => assert_eq!(error, "invalid_grant"),
            other => panic!("expected OAuth error, got {other:?}"),
        }
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let grant = TokenGrant {
            access_token: "00Dsecret".to_string(),
            instance_url: "https://na1.salesforce.com".to_string(),
        };
        let rendered = format!("{grant:?}");
        assert!(!rendered.contains("00Dsecret"));
        assert!(rendered.contains("na1.salesforce.com"));

        let rendered = format!("{:?}", test_auth());
        assert!(!rendered.contains("BEGIN"));
    }
}
