//! Authentication modes for the Server API.

mod oidc;

use std::fmt;

use reqwest::RequestBuilder;

use recordlists_application::{ConnectionError, TransportError};

pub use oidc::{OidcConfig, OidcSession};

/// How requests identify the caller.
#[derive(Clone)]
pub enum Authentication {
    /// HTTP basic authentication.
    Basic {
        /// User name, optionally `DOMAIN\user`.
        username: String,
        /// Password.
        password: String,
    },

    /// Integrated Windows authentication.
    ///
    /// The HTTP client has no Negotiate (Kerberos or NTLM) support, so
    /// opening a connection with this mode fails with
    /// [`ConnectionError::UnsupportedAuthentication`].
    Autologon,

    /// OpenID Connect bearer tokens.
    Oidc(OidcConfig),

    /// No authentication.
    Anonymous,
}

impl fmt::Debug for Authentication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"[REDACTED]")
                .finish(),
            Self::Autologon => f.write_str("Autologon"),
            Self::Oidc(config) => f.debug_tuple("Oidc").field(config).finish(),
            Self::Anonymous => f.write_str("Anonymous"),
        }
    }
}

impl Authentication {
    /// Short name of the mode, for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Basic { .. } => "basic",
            Self::Autologon => "autologon",
            Self::Oidc(_) => "oidc",
            Self::Anonymous => "anonymous",
        }
    }
}

/// Per-client authentication state.
#[derive(Clone)]
pub(crate) enum AuthSession {
    Basic { username: String, password: String },
    Oidc(OidcSession),
    None,
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .finish_non_exhaustive(),
            Self::Oidc(session) => f.debug_tuple("Oidc").field(session).finish(),
            Self::None => f.write_str("None"),
        }
    }
}

impl TryFrom<Authentication> for AuthSession {
    type Error = ConnectionError;

    fn try_from(auth: Authentication) -> Result<Self, Self::Error> {
        match auth {
            Authentication::Basic { username, password } => Ok(Self::Basic { username, password }),
            Authentication::Oidc(config) => Ok(Self::Oidc(OidcSession::new(config))),
            Authentication::Anonymous => Ok(Self::None),
            Authentication::Autologon => Err(ConnectionError::UnsupportedAuthentication {
                mode: "autologon".to_string(),
                reason: "Negotiate (Kerberos/NTLM) is not available; \
                         use credentials or OIDC instead"
                    .to_string(),
            }),
        }
    }
}

impl AuthSession {
    /// Attaches credentials to `builder`.
    pub(crate) async fn apply(
        &self,
        builder: RequestBuilder,
        http: &reqwest::Client,
    ) -> Result<RequestBuilder, TransportError> {
        match self {
            Self::Basic { username, password } => Ok(builder.basic_auth(username, Some(password))),
            Self::Oidc(session) => {
                let token = session.access_token(http).await?;
                Ok(builder.bearer_auth(token))
            }
            Self::None => Ok(builder),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use reqwest::header::AUTHORIZATION;
    use url::Url;

    fn builder(http: &reqwest::Client) -> RequestBuilder {
        http.get("https://mi.example.com/mi_servicelayer")
    }

    #[test]
    fn test_debug_redacts_password() {
        let auth = Authentication::Basic {
            username: "DOMAIN\\mi_user".to_string(),
            password: "hunter2".to_string(),
        };
        let rendered = format!("{auth:?}");
        assert!(rendered.contains("mi_user"));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[tokio::test]
    async fn test_basic_sets_authorization_header() {
        let http = reqwest::Client::new();
        let session = AuthSession::try_from(Authentication::Basic {
            username: "user".to_string(),
            password: "pass".to_string(),
        })
        .unwrap();

        let request = session.apply(builder(&http), &http).await.unwrap().build().unwrap();
        assert_eq!(
            request.headers().get(AUTHORIZATION).unwrap(),
            "Basic dXNlcjpwYXNz"
        );
    }

    #[tokio::test]
    async fn test_oidc_sets_bearer_token() {
        let http = reqwest::Client::new();
        let config = OidcConfig::new(
            Url::parse("https://idp.example.com/token").unwrap(),
            "client",
            "token-123",
        );
        let session = AuthSession::try_from(Authentication::Oidc(config)).unwrap();

        let request = session.apply(builder(&http), &http).await.unwrap().build().unwrap();
        assert_eq!(
            request.headers().get(AUTHORIZATION).unwrap(),
            "Bearer token-123"
        );
    }

    #[tokio::test]
    async fn test_anonymous_attaches_nothing() {
        let http = reqwest::Client::new();
        let session = AuthSession::try_from(Authentication::Anonymous).unwrap();
        let request = session.apply(builder(&http), &http).await.unwrap().build().unwrap();
        assert!(request.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_autologon_is_rejected() {
        let error = AuthSession::try_from(Authentication::Autologon).unwrap_err();
        assert!(matches!(
            &error,
            ConnectionError::UnsupportedAuthentication { mode, .. } if mode == "autologon"
        ));
        assert!(error.to_string().starts_with("autologon authentication is not supported"));
    }
}
