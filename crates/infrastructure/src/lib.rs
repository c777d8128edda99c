//! Record Lists Infrastructure - HTTP adapter and connection setup
//!
//! This crate provides the reqwest implementation of the
//! [`ListsApi`](recordlists_application::ListsApi) port, authentication
//! modes, HTTP session settings and the [`Connection`] builder.

pub mod adapters;
pub mod auth;
pub mod config;
pub mod connection;
#[cfg(test)]
mod test_server;

pub use adapters::{APPLICATION_NAME_HEADER, ReqwestListsApi};
pub use auth::{Authentication, OidcConfig};
pub use config::{DEFAULT_APPLICATION_NAME, SessionConfiguration};
pub use connection::{Authenticated, Connection, Unauthenticated};
