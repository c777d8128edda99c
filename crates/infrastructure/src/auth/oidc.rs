//! OpenID Connect bearer tokens with refresh.
//!
//! Tokens are obtained outside this crate and handed over in an
//! [`OidcConfig`]. They are refreshed with the refresh token grant shortly
//! before they expire.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::debug;
use url::Url;

use recordlists_application::TransportError;

/// Content-Type for form-urlencoded data.
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Seconds before expiry at which the access token is refreshed.
const REFRESH_BUFFER_SECONDS: i64 = 60;

/// Token endpoint response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    refresh_token: Option<String>,
}

/// Token endpoint error response.
#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Tokens and the identity provider settings needed to refresh them.
#[derive(Clone)]
pub struct OidcConfig {
    token_url: Url,
    client_id: String,
    client_secret: Option<String>,
    access_token: String,
    refresh_token: Option<String>,
    expires_at: Option<DateTime<Utc>>,
}

impl OidcConfig {
    /// Uses `access_token`, issued by the identity provider whose token
    /// endpoint is `token_url` to the client `client_id`.
    #[must_use]
    pub fn new(
        token_url: Url,
        client_id: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            token_url,
            client_id: client_id.into(),
            client_secret: None,
            access_token: access_token.into(),
            refresh_token: None,
            expires_at: None,
        }
    }

    /// Sets the client secret for confidential clients.
    #[must_use]
    pub fn with_client_secret(mut self, secret: impl Into<String>) -> Self {
        self.client_secret = Some(secret.into());
        self
    }

    /// Sets the refresh token.
    #[must_use]
    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    /// Sets when the access token expires.
    #[must_use]
    pub const fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }
}

impl fmt::Debug for OidcConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OidcConfig")
            .field("token_url", &self.token_url.as_str())
            .field("client_id", &self.client_id)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
struct Tokens {
    access_token: String,
    refresh_token: Option<String>,
    expires_at: Option<DateTime<Utc>>,
}

impl Tokens {
    fn is_expiring(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| {
            expires_at
                .checked_sub_signed(Duration::seconds(REFRESH_BUFFER_SECONDS))
                .is_none_or(|refresh_at| refresh_at <= now)
        })
    }
}

/// When a token issued at `now` with a lifetime of `seconds` expires.
fn expiry_after(now: DateTime<Utc>, seconds: i64) -> Result<DateTime<Utc>, TransportError> {
    Duration::try_seconds(seconds)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or_else(|| {
            TransportError::Authentication(format!("Token lifetime out of range: {seconds}s"))
        })
}

/// A live OIDC session shared by every request of a client.
#[derive(Clone)]
pub struct OidcSession {
    token_url: Url,
    client_id: String,
    client_secret: Option<String>,
    tokens: Arc<RwLock<Tokens>>,
}

impl OidcSession {
    /// Starts a session from `config`.
    #[must_use]
    pub fn new(config: OidcConfig) -> Self {
        Self {
            token_url: config.token_url,
            client_id: config.client_id,
            client_secret: config.client_secret,
            tokens: Arc::new(RwLock::new(Tokens {
                access_token: config.access_token,
                refresh_token: config.refresh_token,
                expires_at: config.expires_at,
            })),
        }
    }

    /// A usable access token, refreshed first if it is about to expire.
    ///
    /// Without a refresh token the current access token is returned as is
    /// and the server decides whether it is still valid.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Authentication`] if the refresh fails.
    pub async fn access_token(&self, http: &reqwest::Client) -> Result<String, TransportError> {
        {
            let tokens = self.tokens.read().await;
            if !tokens.is_expiring(Utc::now()) || tokens.refresh_token.is_none() {
                return Ok(tokens.access_token.clone());
            }
        }

        let mut tokens = self.tokens.write().await;
        // Another request may have refreshed while we waited for the lock.
        if !tokens.is_expiring(Utc::now()) {
            return Ok(tokens.access_token.clone());
        }
        let Some(refresh_token) = tokens.refresh_token.clone() else {
            return Ok(tokens.access_token.clone());
        };

        debug!(token_url = %self.token_url, "Refreshing OIDC access token");
        let response = self.refresh(http, &refresh_token).await?;
        let expires_at = response
            .expires_in
            .map(|seconds| expiry_after(Utc::now(), seconds))
            .transpose()?;
        tokens.access_token = response.access_token;
        tokens.expires_at = expires_at;
        if let Some(rotated) = response.refresh_token {
            tokens.refresh_token = Some(rotated);
        }
        Ok(tokens.access_token.clone())
    }

    async fn refresh(
        &self,
        http: &reqwest::Client,
        refresh_token: &str,
    ) -> Result<TokenResponse, TransportError> {
        let mut params = vec![
            ("grant_type", "refresh_token"),
            ("client_id", self.client_id.as_str()),
            ("refresh_token", refresh_token),
        ];
        if let Some(secret) = &self.client_secret {
            params.push(("client_secret", secret.as_str()));
        }

        let body = serde_urlencoded::to_string(&params)
            .map_err(|e| TransportError::Authentication(format!("Failed to encode form: {e}")))?;

        let response = http
            .post(self.token_url.clone())
            .header("Content-Type", FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| TransportError::Authentication(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = match response.text().await {
                Ok(text) => text,
                Err(e) => {
                    debug!(error = %e, "Failed to read token error response");
                    return Err(TransportError::Authentication(format!(
                        "Token refresh failed with {status}: {e}"
                    )));
                }
            };
            let message = serde_json::from_str::<TokenErrorResponse>(&error_text).map_or_else(
                |_| format!("Token refresh failed: {error_text}"),
                |error| error.error_description.unwrap_or(error.error),
            );
            return Err(TransportError::Authentication(message));
        }

        response.json().await.map_err(|e: reqwest::Error| {
            TransportError::Authentication(format!("Failed to parse token response: {e}"))
        })
    }
}

impl fmt::Debug for OidcSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OidcSession")
            .field("token_url", &self.token_url.as_str())
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}
