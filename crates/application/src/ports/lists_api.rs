//! Server API port.

use std::future::Future;

use recordlists_domain::dto::{
    AuditLogItemDto, AuditLogSearchRequestDto, CreateRecordListDto, CreateRecordListItemsInfoDto,
    DatabasesInfoDto, DeleteRecordListItemsDto, MiVersionDto, RecordHistoryDto,
    RecordListHeaderDto, RecordListHeadersInfoDto, RecordListItemsInfoDto,
    RecordListSearchRequestDto, RecordListSearchResultsInfoDto, RecordVersionDto, SearchInfoDto,
    UpdateRecordListPropertiesDto,
};
use thiserror::Error;

/// Error type for Server API calls.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The server answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// Request timed out.
    #[error("Request timed out after {timeout_ms}ms")]
    Timeout {
        /// Timeout duration in milliseconds.
        timeout_ms: u64,
    },

    /// The server could not be reached.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Credentials were rejected or could not be obtained.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The response body did not have the expected shape.
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Creates a status error.
    #[must_use]
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// HTTP status code, for status errors.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the server answered 404.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.status_code(), Some(404))
    }

    /// Whether the server answered 403.
    #[must_use]
    pub const fn is_forbidden(&self) -> bool {
        matches!(self.status_code(), Some(403))
    }
}

/// Result type for Server API calls.
pub type TransportResult<T> = Result<T, TransportError>;

/// Workflow transitions that return the updated (or newly created) list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListTransition {
    /// Copy the list.
    Copy,
    /// Create a revision of a published list.
    Revise,
    /// Ask for the list to be published or withdrawn.
    RequestApproval,
    /// Publish a list awaiting approval.
    Publish,
    /// Withdraw a published list awaiting approval.
    Withdraw,
    /// Cancel a pending approval request.
    ResetAwaitingApproval,
}

impl ListTransition {
    /// Path segment of the endpoint, relative to the list resource.
    #[must_use]
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::Copy => "copy",
            Self::Revise => "revision",
            Self::RequestApproval => "request-approval",
            Self::Publish => "publish",
            Self::Withdraw => "withdraw",
            Self::ResetAwaitingApproval => "reset-awaiting-approval",
        }
    }
}

/// Port for the Granta MI Server API.
///
/// Each method maps to one HTTP request. Implementations never retry and
/// never reinterpret server errors.
pub trait ListsApi: Send + Sync {
    /// Fetches the API definition, only to check that it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn get_api_definition(&self) -> impl Future<Output = TransportResult<()>> + Send;

    /// Reads the server version.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn get_mi_version(&self) -> impl Future<Output = TransportResult<MiVersionDto>> + Send;

    /// Lists every record list visible to the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn get_all_lists(
        &self,
    ) -> impl Future<Output = TransportResult<RecordListHeadersInfoDto>> + Send;

    /// Fetches one record list.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn get_list(
        &self,
        identifier: &str,
    ) -> impl Future<Output = TransportResult<RecordListHeaderDto>> + Send;

    /// Creates a record list.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn create_list(
        &self,
        body: &CreateRecordListDto,
    ) -> impl Future<Output = TransportResult<RecordListHeaderDto>> + Send;

    /// Updates a record list's properties.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn update_list(
        &self,
        identifier: &str,
        body: &UpdateRecordListPropertiesDto,
    ) -> impl Future<Output = TransportResult<RecordListHeaderDto>> + Send;

    /// Deletes a record list.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn delete_list(&self, identifier: &str) -> impl Future<Output = TransportResult<()>> + Send;

    /// Applies a workflow transition.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn transition_list(
        &self,
        identifier: &str,
        transition: ListTransition,
    ) -> impl Future<Output = TransportResult<RecordListHeaderDto>> + Send;

    /// Reads a list's items.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn get_list_items(
        &self,
        identifier: &str,
    ) -> impl Future<Output = TransportResult<RecordListItemsInfoDto>> + Send;

    /// Adds items; returns the list's items afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn add_items(
        &self,
        identifier: &str,
        body: &CreateRecordListItemsInfoDto,
    ) -> impl Future<Output = TransportResult<RecordListItemsInfoDto>> + Send;

    /// Removes items; returns the list's items afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn remove_items(
        &self,
        identifier: &str,
        body: &DeleteRecordListItemsDto,
    ) -> impl Future<Output = TransportResult<RecordListItemsInfoDto>> + Send;

    /// Subscribes the caller to a list.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn subscribe(&self, identifier: &str) -> impl Future<Output = TransportResult<()>> + Send;

    /// Unsubscribes the caller from a list.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn unsubscribe(&self, identifier: &str) -> impl Future<Output = TransportResult<()>> + Send;

    /// Runs a record list search and stores its results on the server.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn run_search(
        &self,
        body: &RecordListSearchRequestDto,
    ) -> impl Future<Output = TransportResult<SearchInfoDto>> + Send;

    /// Fetches the stored results of a record list search.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn get_search_results(
        &self,
        result_identifier: &str,
    ) -> impl Future<Output = TransportResult<RecordListSearchResultsInfoDto>> + Send;

    /// Runs an audit log search and stores its results on the server.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn run_audit_search(
        &self,
        body: &AuditLogSearchRequestDto,
    ) -> impl Future<Output = TransportResult<SearchInfoDto>> + Send;

    /// Fetches the stored results of an audit log search.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn get_audit_search_results(
        &self,
        result_identifier: &str,
    ) -> impl Future<Output = TransportResult<Vec<AuditLogItemDto>>> + Send;

    /// Lists the databases visible to the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn get_databases(&self) -> impl Future<Output = TransportResult<DatabasesInfoDto>> + Send;

    /// Fetches a record history from a database.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn get_record_history(
        &self,
        database_key: &str,
        record_history_guid: &str,
        read_mode: bool,
    ) -> impl Future<Output = TransportResult<RecordHistoryDto>> + Send;

    /// Fetches a specific record version from a database table.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn get_record_version(
        &self,
        request: RecordVersionRequest<'_>,
    ) -> impl Future<Output = TransportResult<RecordVersionDto>> + Send;
}

/// Coordinates of a record version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordVersionRequest<'a> {
    /// Key of the database to look in.
    pub database_key: &'a str,
    /// Table GUID.
    pub table_guid: &'a str,
    /// Record history GUID.
    pub record_history_guid: &'a str,
    /// Record version GUID.
    pub record_version_guid: &'a str,
    /// Whether to resolve the record as a read-mode user.
    pub read_mode: bool,
}
