//! Connection builder for a Granta MI server.
//!
//! ```no_run
//! # async fn demo() -> recordlists_application::ApplicationResult<()> {
//! use recordlists_infrastructure::Connection;
//!
//! let client = Connection::new("https://my.server.name/mi_servicelayer")
//!     .with_credentials("DOMAIN\\user", "password")
//!     .connect()
//!     .await?;
//! let lists = client.get_all_lists().await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use tracing::info;

use recordlists_application::{ApplicationResult, RecordListsClient, ServerVersion};

use crate::adapters::ReqwestListsApi;
use crate::auth::{Authentication, OidcConfig};
use crate::config::SessionConfiguration;

/// No authentication mode chosen yet.
#[derive(Debug, Clone, Copy)]
pub struct Unauthenticated;

/// Authentication mode chosen; the connection can be opened.
#[derive(Debug, Clone)]
pub struct Authenticated(Authentication);

/// Builds a [`RecordListsClient`] for a Granta MI service layer.
///
/// An authentication mode must be chosen before [`Connection::connect`]
/// becomes available.
#[derive(Debug, Clone)]
pub struct Connection<S> {
    service_layer_url: String,
    config: SessionConfiguration,
    state: S,
}

impl Connection<Unauthenticated> {
    /// Starts a connection to the service layer at `service_layer_url`.
    ///
    /// The URL is validated by [`Connection::connect`].
    #[must_use]
    pub fn new(service_layer_url: impl Into<String>) -> Self {
        Self {
            service_layer_url: service_layer_url.into(),
            config: SessionConfiguration::default(),
            state: Unauthenticated,
        }
    }

    fn authenticate(self, auth: Authentication) -> Connection<Authenticated> {
        Connection {
            service_layer_url: self.service_layer_url,
            config: self.config,
            state: Authenticated(auth),
        }
    }

    /// Authenticates with a user name and password.
    #[must_use]
    pub fn with_credentials(
        self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Connection<Authenticated> {
        self.authenticate(Authentication::Basic {
            username: username.into(),
            password: password.into(),
        })
    }

    /// Authenticates as the current Windows user.
    ///
    /// Not available in this client, so [`Connection::connect`] fails. See
    /// [`Authentication::Autologon`].
    #[must_use]
    pub fn with_autologon(self) -> Connection<Authenticated> {
        self.authenticate(Authentication::Autologon)
    }

    /// Authenticates with OpenID Connect tokens.
    #[must_use]
    pub fn with_oidc(self, config: OidcConfig) -> Connection<Authenticated> {
        self.authenticate(Authentication::Oidc(config))
    }

    /// Connects without authentication.
    #[must_use]
    pub fn with_anonymous(self) -> Connection<Authenticated> {
        self.authenticate(Authentication::Anonymous)
    }
}

impl<S> Connection<S> {
    /// Replaces the HTTP session settings.
    #[must_use]
    pub fn with_session_configuration(mut self, config: SessionConfiguration) -> Self {
        self.config = config;
        self
    }

    /// The service layer URL.
    #[must_use]
    pub fn service_layer_url(&self) -> &str {
        &self.service_layer_url
    }

    /// The HTTP session settings.
    #[must_use]
    pub const fn session_configuration(&self) -> &SessionConfiguration {
        &self.config
    }
}

impl Connection<Authenticated> {
    /// The chosen authentication mode.
    #[must_use]
    pub const fn authentication(&self) -> &Authentication {
        &self.state.0
    }

    /// Opens the connection and checks that the server can be used.
    ///
    /// # Errors
    ///
    /// Returns a connection error if the URL is invalid, the authentication
    /// mode is unsupported, the Server API cannot be reached, or the server
    /// is older than the oldest supported release.
    pub async fn connect(self) -> ApplicationResult<RecordListsClient<ReqwestListsApi>> {
        self.connect_with_version().await.map(|(client, _)| client)
    }

    /// Like [`Connection::connect`], also returning the server version.
    ///
    /// # Errors
    ///
    /// Same as [`Connection::connect`].
    pub async fn connect_with_version(
        self,
    ) -> ApplicationResult<(RecordListsClient<ReqwestListsApi>, ServerVersion)> {
        let api = ReqwestListsApi::new(&self.service_layer_url, self.state.0, &self.config)?;
        let (client, version) = RecordListsClient::connect(Arc::new(api)).await?;
        info!(
            service_layer = %self.service_layer_url,
            server_version = %version,
            "Connected to Granta MI"
        );
        Ok((client, version))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use recordlists_application::{ApplicationError, ConnectionError};

    use crate::test_server::serve;

    const API_DEFINITION: &str = r#"{"openapi":"3.0.1"}"#;

    fn version(raw: &str) -> String {
        format!(r#"{{"version":"{raw}","majorMinorVersion":"{raw}"}}"#)
    }

    #[test]
    fn test_builder_keeps_settings() {
        let connection = Connection::new("https://mi.example.com/mi_servicelayer")
            .with_session_configuration(SessionConfiguration::default().with_max_redirects(3))
            .with_credentials("user", "secret");

        assert_eq!(
            connection.service_layer_url(),
            "https://mi.example.com/mi_servicelayer"
        );
        assert_eq!(connection.session_configuration().max_redirects, 3);
        assert_eq!(connection.authentication().kind(), "basic");
        assert!(!format!("{connection:?}").contains("secret"));
    }

    #[tokio::test]
    async fn test_invalid_url_fails_before_any_request() {
        let error = Connection::new("not a url")
            .with_anonymous()
            .connect()
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            ApplicationError::Connection(ConnectionError::InvalidUrl { .. })
        ));
    }

    #[tokio::test]
    async fn test_connect_checks_api_definition_then_version() {
        let (url, server) = serve(vec![
            ("200 OK", API_DEFINITION.to_string()),
            ("200 OK", version("25.2.820.0")),
        ])
        .await;

        let (_, server_version) = Connection::new(url)
            .with_anonymous()
            .connect_with_version()
            .await
            .unwrap();
        let requests = server.await.unwrap();

        assert_eq!(server_version.major_minor(), (25, 2));
        assert!(requests[0].contains("/proxy/v1.svc/mi/swagger/v1/swagger.json"));
        assert!(requests[1].contains("/proxy/v1.svc/mi/api/v1alpha/schema/mi-version"));
    }

    #[tokio::test]
    async fn test_autologon_fails_before_any_request() {
        let error = Connection::new("https://mi.example.com/mi_servicelayer")
            .with_autologon()
            .connect()
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            ApplicationError::Connection(ConnectionError::UnsupportedAuthentication { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_api_definition() {
        let (url, server) = serve(vec![("404 Not Found", String::new())]).await;

        let error = Connection::new(url)
            .with_anonymous()
            .connect()
            .await
            .unwrap_err();
        server.await.unwrap();

        assert!(matches!(
            error,
            ApplicationError::Connection(ConnectionError::ApiDefinitionNotFound)
        ));
    }

    #[tokio::test]
    async fn test_old_server_is_rejected() {
        let (url, server) = serve(vec![
            ("200 OK", API_DEFINITION.to_string()),
            ("200 OK", version("24.1.100.0")),
        ])
        .await;

        let error = Connection::new(url)
            .with_anonymous()
            .connect()
            .await
            .unwrap_err();
        server.await.unwrap();

        assert!(matches!(
            error,
            ApplicationError::Connection(ConnectionError::UnsupportedServerVersion { .. })
        ));
    }
}
