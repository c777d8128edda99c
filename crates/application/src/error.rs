//! Application error types

use recordlists_domain::DomainError;
use thiserror::Error;

use crate::ports::TransportError;

/// Errors raised while establishing a session with the server.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConnectionError {
    /// The service layer URL could not be parsed.
    #[error("invalid service layer URL '{url}': {message}")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        message: String,
    },

    /// The Server API definition is missing from the service layer.
    #[error(
        "cannot find the Server API definition in Granta MI Service Layer; \
         ensure a compatible version of Granta MI is available and try again"
    )]
    ApiDefinitionNotFound,

    /// The API definition request failed for another reason.
    #[error(
        "an unexpected error occurred when trying to connect to the Server API \
         in Granta MI Service Layer: {0}"
    )]
    UnexpectedFailure(TransportError),

    /// The server version could not be read.
    #[error("cannot determine the Granta MI server version: {0}")]
    VersionUnavailable(String),

    /// The chosen authentication mode cannot be used by this client.
    #[error("{mode} authentication is not supported: {reason}")]
    UnsupportedAuthentication {
        /// Short name of the mode.
        mode: String,
        /// Why it cannot be used.
        reason: String,
    },

    /// The server is older than the oldest supported release.
    #[error(
        "this package requires Granta MI {required} or later; the server reports version {found}"
    )]
    UnsupportedServerVersion {
        /// Version reported by the server.
        found: String,
        /// Oldest supported `MAJOR.MINOR`.
        required: String,
    },
}

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A value was rejected before any request was sent.
    #[error("validation error: {0}")]
    Domain(#[from] DomainError),

    /// The server or the network failed.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The session could not be established.
    #[error("connection error: {0}")]
    Connection(#[from] ConnectionError),
}

impl ApplicationError {
    /// The transport error, if this is one.
    #[must_use]
    pub const fn as_transport(&self) -> Option<&TransportError> {
        match self {
            Self::Transport(error) => Some(error),
            _ => None,
        }
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
