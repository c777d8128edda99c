//! HTTP session configuration.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Name sent in the `X-Granta-ApplicationName` header by default.
pub const DEFAULT_APPLICATION_NAME: &str = "Granta RecordLists";

/// Settings for the HTTP session used to reach the Server API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfiguration {
    /// Timeout for a whole request, in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Timeout for establishing a connection, in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    /// Maximum number of redirects to follow.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// `User-Agent` header value.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// `X-Granta-ApplicationName` header value.
    #[serde(default = "default_application_name")]
    pub application_name: String,

    /// Additional headers sent with every request.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

fn default_connect_timeout_ms() -> u64 {
    10_000
}

fn default_max_redirects() -> usize {
    10
}

fn default_user_agent() -> String {
    format!("granta-recordlists/{}", env!("CARGO_PKG_VERSION"))
}

fn default_application_name() -> String {
    DEFAULT_APPLICATION_NAME.to_string()
}

impl Default for SessionConfiguration {
    fn default() -> Self {
        Self {
            request_timeout_ms: default_request_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            max_redirects: default_max_redirects(),
            user_agent: default_user_agent(),
            application_name: default_application_name(),
            headers: BTreeMap::new(),
        }
    }
}

impl SessionConfiguration {
    /// Sets the request timeout.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Sets the connect timeout.
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Sets the maximum number of redirects.
    #[must_use]
    pub const fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// Sets the application name header.
    #[must_use]
    pub fn with_application_name(mut self, name: impl Into<String>) -> Self {
        self.application_name = name.into();
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Adds a header sent with every request.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Request timeout as a [`Duration`].
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Connect timeout as a [`Duration`].
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = SessionConfiguration::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.max_redirects, 10);
        assert!(config.user_agent.starts_with("granta-recordlists/"));
        assert_eq!(config.application_name, DEFAULT_APPLICATION_NAME);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: SessionConfiguration =
            serde_json::from_str(r#"{"request_timeout_ms": 5000}"#).unwrap();
        assert_eq!(config.request_timeout_ms, 5000);
        assert_eq!(config.connect_timeout_ms, 10_000);
        assert!(config.headers.is_empty());
    }

    #[test]
    fn test_builder_methods() {
        let config = SessionConfiguration::default()
            .with_request_timeout(Duration::from_secs(5))
            .with_max_redirects(0)
            .with_header("X-Trace", "1");
        assert_eq!(config.request_timeout_ms, 5000);
        assert_eq!(config.max_redirects, 0);
        assert_eq!(config.headers.get("X-Trace").map(String::as_str), Some("1"));
    }
}
