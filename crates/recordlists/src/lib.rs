//! Granta MI Record Lists - Client SDK
//!
//! Create, search, curate and publish record lists on a Granta MI server.
//!
//! ```no_run
//! # async fn demo() -> granta_recordlists::ApplicationResult<()> {
//! use granta_recordlists::{Connection, Criterion, NewRecordList};
//!
//! let client = Connection::new("https://my.server.name/mi_servicelayer")
//!     .with_credentials("DOMAIN\\user", "password")
//!     .connect()
//!     .await?;
//!
//! let list = client
//!     .create_list(NewRecordList::new("Materials for review").with_description("Q3 batch"))
//!     .await?;
//! let hits = client
//!     .search_for_lists(&Criterion::name_contains("review"), false)
//!     .await?;
//! assert!(hits.iter().any(|hit| hit.list_details().identifier() == list.identifier()));
//! # Ok(())
//! # }
//! ```

pub use recordlists_application as application;
pub use recordlists_domain as domain;
pub use recordlists_infrastructure as infrastructure;

pub use recordlists_application::{
    ApplicationError, ApplicationResult, AuditLogEntries, ConnectionError, ItemResolver,
    ListsApi, MINIMUM_SERVER_VERSION, PagedResult, RecordListsClient, ServerVersion,
    TransportError,
};
pub use recordlists_domain::{
    AuditLogAction, AuditLogItem, AuditLogSearchCriterion, BooleanCriterion, BooleanOperator,
    Criterion, DomainError, ItemResolution, ListUpdate, NewRecordList, RecordList,
    RecordListItem, SearchCriterion, SearchResult, UnresolvableItem, UnresolvableReason,
    UserOrGroup, UserRole,
};
pub use recordlists_infrastructure::{
    Authentication, Connection, OidcConfig, ReqwestListsApi, SessionConfiguration,
};
