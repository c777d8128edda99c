//! Searching lists and the audit log.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use granta_recordlists::{
    AuditLogAction, AuditLogSearchCriterion, Criterion, NewRecordList, RecordListItem,
    RecordListsClient, SearchCriterion, UserRole,
};
use pretty_assertions::assert_eq;
use recordlists_application::testing::InMemoryListsApi;

fn client() -> RecordListsClient<InMemoryListsApi> {
    RecordListsClient::new(Arc::new(InMemoryListsApi::new()))
}

#[tokio::test]
async fn either_name_matches_the_only_list() {
    let client = client();
    let alpha = client
        .create_list(NewRecordList::new("Alpha"))
        .await
        .unwrap();

    let criterion = Criterion::name_contains("Alpha").or(Criterion::name_contains("Beta"));
    let results = client.search_for_lists(&criterion, false).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].list_details().identifier(), alpha.identifier());
    assert_eq!(results[0].items(), None);
}

#[test]
fn criteria_survive_the_wire_format() {
    let item = RecordListItem::new(
        "b0de1566-c2c5-49ac-a8d1-e6183b1a3b77",
        Some("81dff531-0254-4fbe-9621-174b10aaee3d"),
        "855360aa-d77b-4d66-bd39-536744677299",
    )
    .unwrap()
    .with_version(2);
    let leaf = Criterion::from(
        SearchCriterion::new()
            .with_name_contains("steel")
            .with_user_role(UserRole::Owner)
            .with_published(true),
    );
    let tree = Criterion::match_any([
        leaf.clone(),
        Criterion::match_none([Criterion::name_contains("draft")]).unwrap(),
    ])
    .unwrap()
    .and(!Criterion::user_role(UserRole::Subscriber));

    for criterion in [leaf, tree, Criterion::contains_item(item)] {
        let decoded = wire_roundtrip(&criterion);
        assert_eq!(decoded, criterion);
    }
}

fn wire_roundtrip(criterion: &Criterion) -> Criterion {
    Criterion::from_dto(criterion.to_dto()).unwrap()
}

#[tokio::test]
async fn audit_log_pages_newest_first() {
    let client = client();
    let list = client
        .create_list(NewRecordList::new("Audited"))
        .await
        .unwrap();
    client
        .update_list(&list, granta_recordlists::ListUpdate::new().description("changed"))
        .await
        .unwrap();
    client.delete_list(&list).await.unwrap();

    let criterion = AuditLogSearchCriterion::new()
        .with_record_lists([list.identifier().unwrap()])
        .unwrap();
    let entries = client
        .search_audit_log(criterion, Some(2))
        .unwrap()
        .collect_all()
        .await
        .unwrap();

    let actions: Vec<_> = entries.iter().map(|entry| entry.action()).collect();
    assert_eq!(
        actions,
        vec![
            AuditLogAction::ListDeleted,
            AuditLogAction::ListDescriptionChanged,
            AuditLogAction::ListCreated,
        ]
    );
}

#[tokio::test]
async fn audit_log_action_filter() {
    let client = client();
    for name in ["One", "Two"] {
        client.create_list(NewRecordList::new(name)).await.unwrap();
    }
    let criterion = AuditLogSearchCriterion::new().with_actions([AuditLogAction::ListDeleted]);

    let entries = client
        .search_audit_log(criterion, None)
        .unwrap()
        .collect_all()
        .await
        .unwrap();
    assert!(entries.is_empty());

    let all = client
        .get_all_audit_log_entries(None)
        .unwrap()
        .collect_all()
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
}
