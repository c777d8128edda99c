//! Record Lists Domain - Core business types
//!
//! This crate defines the record list model of the Granta MI client and the
//! wire bodies exchanged with the Server API.
//! All types here are pure Rust with no I/O dependencies.

pub mod audit;
pub mod criteria;
pub mod dto;
pub mod error;
pub mod guid;
pub mod item;
pub mod record_list;
pub mod resolution;
pub mod search_result;
pub mod user;

pub use audit::{AuditLogAction, AuditLogItem, AuditLogSearchCriterion};
pub use criteria::{BooleanCriterion, BooleanOperator, Criterion, SearchCriterion, UserRole};
pub use error::{DomainError, DomainResult};
pub use item::RecordListItem;
pub use record_list::{ListUpdate, NewRecordList, RecordList};
pub use resolution::{ItemResolution, UnresolvableItem, UnresolvableReason};
pub use search_result::SearchResult;
pub use user::UserOrGroup;
