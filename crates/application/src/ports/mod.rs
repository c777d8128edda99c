//! Port definitions (interfaces for external dependencies)
//!
//! Ports define the contracts that infrastructure adapters must implement.

mod lists_api;

pub use lists_api::{
    ListTransition, ListsApi, RecordVersionRequest, TransportError, TransportResult,
};
