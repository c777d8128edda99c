//! Record Lists Application - Operations and ports
//!
//! This crate defines the application layer with:
//! - The Server API port ([`ListsApi`])
//! - Record list operations ([`RecordListsClient`])
//! - Item resolution, paged audit log results and session validation
//! - Application-level error handling

pub mod client;
pub mod error;
pub mod paging;
pub mod ports;
pub mod resolver;
pub mod session;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use client::{AuditLogEntries, RecordListsClient};
pub use error::{ApplicationError, ApplicationResult, ConnectionError};
pub use paging::{AuditLogPageSource, PageSource, PagedResult};
pub use ports::{ListTransition, ListsApi, RecordVersionRequest, TransportError, TransportResult};
pub use resolver::ItemResolver;
pub use session::{MINIMUM_SERVER_VERSION, ServerVersion, validate_session};
