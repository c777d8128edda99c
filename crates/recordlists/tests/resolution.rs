//! Checking whether list items reference readable records.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use granta_recordlists::{
    NewRecordList, RecordListItem, RecordListsClient, UnresolvableItem, UnresolvableReason,
};
use pretty_assertions::assert_eq;
use recordlists_application::testing::InMemoryListsApi;

const DB: &str = "b0de1566-c2c5-49ac-a8d1-e6183b1a3b77";
const TABLE: &str = "81dff531-0254-4fbe-9621-174b10aaee3d";
const EXISTING: &str = "855360aa-d77b-4d66-bd39-536744677299";
const DELETED: &str = "3bc2b82f-0199-4f3b-a7af-8d520250b180";
const FORBIDDEN: &str = "9f6182ee-1f49-4ba9-9bd7-d4c0a392e94e";

fn item(history: &str) -> RecordListItem {
    RecordListItem::new(DB, Some(TABLE), history).unwrap()
}

fn server() -> Arc<InMemoryListsApi> {
    let api = Arc::new(InMemoryListsApi::new());
    api.add_database(DB, "MI_Training");
    api.add_record(
        "MI_Training",
        EXISTING,
        &[("5ca1d3f6-9afd-427c-ad09-03e2b71bfd75", 1)],
    );
    api.deny_record("MI_Training", FORBIDDEN, 403);
    api
}

#[tokio::test]
async fn list_items_are_partitioned_by_resolvability() {
    let client = RecordListsClient::new(server());
    let list = client
        .create_list(
            NewRecordList::new("Mixed").with_items([
                item(EXISTING),
                item(DELETED),
                item(FORBIDDEN),
            ]),
        )
        .await
        .unwrap();

    let resolution = client.get_resolvable_list_items(&list, false).await.unwrap();

    assert_eq!(resolution.resolvable, vec![item(EXISTING)]);
    assert_eq!(
        resolution.unresolvable,
        vec![
            UnresolvableItem {
                item: item(DELETED),
                reason: UnresolvableReason::RecordNotFound,
            },
            UnresolvableItem {
                item: item(FORBIDDEN),
                reason: UnresolvableReason::AccessDenied,
            },
        ]
    );
}

#[tokio::test]
async fn arbitrary_items_can_be_checked_in_read_mode() {
    let client = RecordListsClient::new(server());

    let resolution = client
        .resolve_items(vec![item(EXISTING).with_version(1)], true)
        .await
        .unwrap();

    assert!(resolution.is_fully_resolvable());
}
