//! Checks that a server can be used before handing out a client.

use std::fmt;

use tracing::{debug, info};

use crate::error::ConnectionError;
use crate::ports::ListsApi;

/// Oldest supported Granta MI release, as `(major, minor)`.
pub const MINIMUM_SERVER_VERSION: (u32, u32) = (24, 2);

/// Version reported by a Granta MI server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerVersion {
    raw: String,
    major: u32,
    minor: u32,
}

impl ServerVersion {
    /// Parses a dotted version such as `25.2.820.0`.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::VersionUnavailable`] if the major and minor
    /// components are not numbers.
    pub fn parse(raw: &str) -> Result<Self, ConnectionError> {
        let mut parts = raw.trim().split('.').map(str::parse::<u32>);
        match (parts.next(), parts.next()) {
            (Some(Ok(major)), Some(Ok(minor))) => Ok(Self {
                raw: raw.trim().to_string(),
                major,
                minor,
            }),
            _ => Err(ConnectionError::VersionUnavailable(format!(
                "unrecognized version string '{raw}'"
            ))),
        }
    }

    /// Full version string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// `(major, minor)` components.
    #[must_use]
    pub const fn major_minor(&self) -> (u32, u32) {
        (self.major, self.minor)
    }

    /// Whether this release is supported.
    #[must_use]
    pub fn is_supported(&self) -> bool {
        self.major_minor() >= MINIMUM_SERVER_VERSION
    }
}

impl fmt::Display for ServerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Probes the API definition, then checks the server version.
///
/// # Errors
///
/// Returns a [`ConnectionError`] naming the first check that failed.
pub async fn validate_session<A: ListsApi>(api: &A) -> Result<ServerVersion, ConnectionError> {
    debug!("Probing Server API definition");
    api.get_api_definition().await.map_err(|error| {
        if error.is_not_found() {
            ConnectionError::ApiDefinitionNotFound
        } else {
            ConnectionError::UnexpectedFailure(error)
        }
    })?;

    let reported = api
        .get_mi_version()
        .await
        .map_err(|error| ConnectionError::VersionUnavailable(error.to_string()))?;
    let version = ServerVersion::parse(&reported.version)?;

    if !version.is_supported() {
        let (major, minor) = MINIMUM_SERVER_VERSION;
        return Err(ConnectionError::UnsupportedServerVersion {
            found: version.to_string(),
            required: format!("{major}.{minor}"),
        });
    }

    info!(server_version = %version, "Server API session validated");
    Ok(version)
}
