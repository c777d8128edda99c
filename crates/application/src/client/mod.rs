//! Record list operations.
//!
//! [`RecordListsClient`] is the entry point of the SDK. Each operation
//! validates its inputs, performs its Server API calls one after the other
//! and returns freshly fetched values. Nothing is cached.

mod items;
mod lifecycle;
mod lists;
mod search;

pub use search::AuditLogEntries;

use std::fmt;
use std::sync::Arc;

use recordlists_domain::{DomainError, RecordList};

use crate::error::ApplicationResult;
use crate::ports::ListsApi;
use crate::session::{ServerVersion, validate_session};

/// Client for the record lists of one Granta MI server.
pub struct RecordListsClient<A: ListsApi> {
    api: Arc<A>,
}

impl<A: ListsApi> RecordListsClient<A> {
    /// Wraps a Server API without checking it.
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Wraps a Server API after checking that it exists and that the server
    /// release is supported.
    ///
    /// # Errors
    ///
    /// Returns a connection error if either check fails.
    pub async fn connect(api: Arc<A>) -> ApplicationResult<(Self, ServerVersion)> {
        let version = validate_session(api.as_ref()).await?;
        Ok((Self::new(api), version))
    }

    /// The underlying Server API.
    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }
}

impl<A: ListsApi> Clone for RecordListsClient<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
        }
    }
}

impl<A: ListsApi + fmt::Debug> fmt::Debug for RecordListsClient<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordListsClient")
            .field("api", &self.api)
            .finish()
    }
}

/// Identifier of a list that must already exist on the server.
fn existing(list: &RecordList) -> ApplicationResult<&str> {
    Ok(list.require_identifier()?)
}

/// Rejects blank identifiers.
fn non_blank(identifier: &str) -> ApplicationResult<&str> {
    if identifier.trim().is_empty() {
        return Err(DomainError::EmptyIdentifier.into());
    }
    Ok(identifier)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{ApplicationError, ConnectionError};
    use crate::ports::TransportError;
    use crate::testing::{Endpoint, InMemoryListsApi};
    use pretty_assertions::assert_eq;
    use recordlists_domain::{
        AuditLogAction, AuditLogSearchCriterion, Criterion, ListUpdate, NewRecordList,
        RecordListItem,
    };

    const DB: &str = "b0de1566-c2c5-49ac-a8d1-e6183b1a3b77";
    const TABLE: &str = "81dff531-0254-4fbe-9621-174b10aaee3d";
    const RHG1: &str = "855360aa-d77b-4d66-bd39-536744677299";
    const RHG2: &str = "3bc2b82f-0199-4f3b-a7af-8d520250b180";

    fn client() -> (RecordListsClient<InMemoryListsApi>, Arc<InMemoryListsApi>) {
        let api = Arc::new(InMemoryListsApi::new());
        (RecordListsClient::new(Arc::clone(&api)), api)
    }

    fn item(history: &str) -> RecordListItem {
        RecordListItem::new(DB, Some(TABLE), history).unwrap()
    }

    #[tokio::test]
    async fn test_connect_validates_session() {
        let api = Arc::new(InMemoryListsApi::new());
        let (_, version) = RecordListsClient::connect(Arc::clone(&api)).await.unwrap();
        assert_eq!(version.major_minor(), (25, 2));
        assert_eq!(api.calls_to(Endpoint::ApiDefinition), 1);
        assert_eq!(api.calls_to(Endpoint::MiVersion), 1);
    }

    #[tokio::test]
    async fn test_connect_rejects_old_server() {
        let api = Arc::new(InMemoryListsApi::new());
        api.set_mi_version("24.1.0.0");
        let error = RecordListsClient::connect(api).await.unwrap_err();
        assert!(matches!(
            error,
            ApplicationError::Connection(ConnectionError::UnsupportedServerVersion { .. })
        ));
    }

    #[tokio::test]
    async fn test_connect_reports_missing_api_definition() {
        let api = Arc::new(InMemoryListsApi::new());
        api.remove_api_definition();
        let error = RecordListsClient::connect(Arc::clone(&api)).await.unwrap_err();
        assert!(matches!(
            error,
            ApplicationError::Connection(ConnectionError::ApiDefinitionNotFound)
        ));
        assert_eq!(api.calls_to(Endpoint::MiVersion), 0);
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let (client, _) = client();
        let created = client
            .create_list(NewRecordList::new("Test List A"))
            .await
            .unwrap();
        let fetched = client
            .get_list(created.identifier().unwrap())
            .await
            .unwrap();
        assert_eq!(fetched.name(), "Test List A");
        assert_eq!(fetched.description(), None);
        assert!(!fetched.published());
    }

    #[tokio::test]
    async fn test_get_list_rejects_blank_identifier() {
        let (client, api) = client();
        let error = client.get_list("  ").await.unwrap_err();
        assert!(matches!(
            error,
            ApplicationError::Domain(DomainError::EmptyIdentifier)
        ));
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unsaved_list_is_rejected_without_requests() {
        let (client, api) = client();
        let draft = RecordList::unsaved("Draft");

        let error = client
            .update_list(&draft, ListUpdate::new().name("New"))
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            ApplicationError::Domain(DomainError::MissingIdentifier(_))
        ));
        assert!(client.publish_list(&draft).await.is_err());
        assert!(client.get_list_items(&draft).await.is_err());
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn test_update_clears_description() {
        let (client, _) = client();
        let list = client
            .create_list(NewRecordList::new("A").with_description("old"))
            .await
            .unwrap();
        let updated = client
            .update_list(&list, ListUpdate::new().clear_description().notes("n"))
            .await
            .unwrap();
        assert_eq!(updated.description(), None);
        assert_eq!(updated.notes(), Some("n"));
        assert_eq!(updated.name(), "A");
    }

    #[tokio::test]
    async fn test_add_and_remove_items() {
        let (client, _) = client();
        let list = client.create_list(NewRecordList::new("A")).await.unwrap();

        let after_add = client
            .add_items_to_list(&list, &[item(RHG1), item(RHG2)])
            .await
            .unwrap();
        assert_eq!(after_add.len(), 2);

        let after_remove = client
            .remove_items_from_list(&list, &[item(RHG1), item(RHG1).with_version(4)])
            .await
            .unwrap();
        assert_eq!(after_remove, vec![item(RHG2)]);
        assert_eq!(client.get_list_items(&list).await.unwrap(), vec![item(RHG2)]);
    }

    #[tokio::test]
    async fn test_add_items_requires_table_guid() {
        let (client, api) = client();
        let list = client.create_list(NewRecordList::new("A")).await.unwrap();
        api.reset_calls();

        let without_table = RecordListItem::new(DB, None, RHG1).unwrap();
        let error = client
            .add_items_to_list(&list, &[without_table])
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            ApplicationError::Domain(DomainError::MissingTableGuid(_))
        ));
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn test_publication_workflow() {
        let (client, _) = client();
        let list = client.create_list(NewRecordList::new("A")).await.unwrap();

        let awaiting = client.request_list_approval(&list).await.unwrap();
        assert!(awaiting.awaiting_approval());
        let cancelled = client.cancel_list_approval_request(&list).await.unwrap();
        assert!(!cancelled.awaiting_approval());

        client.request_list_approval(&list).await.unwrap();
        let published = client.publish_list(&list).await.unwrap();
        assert!(published.published());
        assert!(!published.awaiting_approval());

        let revision = client.revise_list(&published).await.unwrap();
        assert!(revision.is_revision());
        assert_eq!(
            revision.parent_record_list_identifier(),
            published.identifier()
        );

        client.request_list_approval(&published).await.unwrap();
        let withdrawn = client.unpublish_list(&published).await.unwrap();
        assert!(!withdrawn.published());
    }

    #[tokio::test]
    async fn test_server_errors_are_not_reinterpreted() {
        let (client, _) = client();
        let list = client.create_list(NewRecordList::new("A")).await.unwrap();
        let error = client.publish_list(&list).await.unwrap_err();
        assert_eq!(
            error.as_transport().and_then(TransportError::status_code),
            Some(400)
        );
    }

    #[tokio::test]
    async fn test_copy_and_delete() {
        let (client, _) = client();
        let list = client.create_list(NewRecordList::new("A")).await.unwrap();
        let copy = client.copy_list(&list).await.unwrap();
        assert!(copy.name().starts_with("A"));
        assert_ne!(copy.identifier(), list.identifier());

        client.delete_list(&list).await.unwrap();
        let remaining = client.get_all_lists().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].identifier(), copy.identifier());
    }

    #[tokio::test]
    async fn test_search_uses_two_requests() {
        let (client, api) = client();
        client.create_list(NewRecordList::new("Alpha")).await.unwrap();
        client.create_list(NewRecordList::new("Gamma")).await.unwrap();
        api.reset_calls();

        let criterion = Criterion::name_contains("Alpha").or(Criterion::name_contains("Beta"));
        let results = client.search_for_lists(&criterion, false).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].list_details().name(), "Alpha");
        assert_eq!(results[0].items(), None);
        assert_eq!(api.call_count(), 2);
    }

    #[tokio::test]
    async fn test_search_includes_items_when_requested() {
        let (client, _) = client();
        let list = client.create_list(NewRecordList::new("Alpha")).await.unwrap();
        client.add_items_to_list(&list, &[item(RHG1)]).await.unwrap();

        let results = client
            .search_for_lists(&Criterion::contains_item(item(RHG1)), true)
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].items(), Some(&[item(RHG1)][..]));
    }

    #[tokio::test]
    async fn test_audit_log_filters_and_pages() {
        let (client, api) = client();
        let list = client.create_list(NewRecordList::new("A")).await.unwrap();
        client
            .add_items_to_list(&list, &[item(RHG1), item(RHG2)])
            .await
            .unwrap();
        api.reset_calls();

        let criterion = AuditLogSearchCriterion::new()
            .with_record_lists([list.identifier().unwrap()])
            .unwrap()
            .with_actions([AuditLogAction::ItemAdded]);
        let entries = client
            .search_audit_log(criterion, Some(1))
            .unwrap()
            .collect_all()
            .await
            .unwrap();

        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.action() == AuditLogAction::ItemAdded));
        // Two full pages and one empty page, two requests each.
        assert_eq!(api.calls_to(Endpoint::RunAuditSearch), 3);
        assert_eq!(api.calls_to(Endpoint::AuditSearchResults), 3);
    }

    #[tokio::test]
    async fn test_audit_log_rejects_zero_page_size() {
        let (client, _) = client();
        assert!(matches!(
            client.get_all_audit_log_entries(Some(0)),
            Err(ApplicationError::Domain(DomainError::InvalidPageSize))
        ));
    }

    #[tokio::test]
    async fn test_subscription_requires_published_list() {
        let (client, _) = client();
        let list = client.create_list(NewRecordList::new("A")).await.unwrap();
        assert!(client.subscribe_to_list(&list).await.is_err());

        client.request_list_approval(&list).await.unwrap();
        client.publish_list(&list).await.unwrap();
        client.subscribe_to_list(&list).await.unwrap();
        client.unsubscribe_from_list(&list).await.unwrap();
    }
}
