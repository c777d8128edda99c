//! Checks whether items reference records the caller can read.

use std::collections::HashMap;

use recordlists_domain::guid::normalize_guid;
use recordlists_domain::{ItemResolution, RecordListItem, UnresolvableItem, UnresolvableReason};
use tracing::{debug, warn};

use crate::error::ApplicationResult;
use crate::ports::{ListsApi, RecordVersionRequest, TransportError};

/// Database GUID to every database key carrying it.
type DatabaseMap = HashMap<String, Vec<String>>;

/// Resolves items against the records visible to the caller.
///
/// Items are checked one after the other, in input order. Per-item failures
/// are recorded in the outcome and never abort the batch.
pub struct ItemResolver<'a, A: ListsApi> {
    api: &'a A,
    read_mode: bool,
}

impl<'a, A: ListsApi> ItemResolver<'a, A> {
    /// Creates a resolver. With `read_mode`, records are resolved as a
    /// read-mode user would see them.
    #[must_use]
    pub const fn new(api: &'a A, read_mode: bool) -> Self {
        Self { api, read_mode }
    }

    /// Partitions `items` into resolvable and unresolvable ones.
    ///
    /// # Errors
    ///
    /// Returns an error only if the database list cannot be read.
    pub async fn resolve(
        &self,
        items: impl IntoIterator<Item = RecordListItem>,
    ) -> ApplicationResult<ItemResolution> {
        let databases = self.database_map().await?;
        let mut resolution = ItemResolution::default();

        for item in items {
            match self.resolve_item(&item, &databases).await {
                Ok(()) => resolution.resolvable.push(item),
                Err(reason) => {
                    warn!(%item, %reason, "Item is not resolvable");
                    resolution.unresolvable.push(UnresolvableItem { item, reason });
                }
            }
        }
        Ok(resolution)
    }

    async fn database_map(&self) -> ApplicationResult<DatabaseMap> {
        let info = self.api.get_databases().await?;
        let mut databases = DatabaseMap::new();
        for database in info.databases {
            databases
                .entry(normalize_guid(&database.guid))
                .or_default()
                .push(database.key);
        }
        Ok(databases)
    }

    /// Tries each database with the item's GUID, stopping at the first hit.
    async fn resolve_item(
        &self,
        item: &RecordListItem,
        databases: &DatabaseMap,
    ) -> Result<(), UnresolvableReason> {
        let keys = databases
            .get(item.database_guid())
            .ok_or(UnresolvableReason::DatabaseNotFound)?;

        let mut strongest: Option<UnresolvableReason> = None;
        for key in keys {
            match self.resolve_in_database(item, key).await {
                Ok(()) => return Ok(()),
                Err(reason) => {
                    debug!(database_key = %key, %reason, "Item not resolved in database");
                    strongest = Some(match strongest {
                        Some(current) => current.strongest(reason),
                        None => reason,
                    });
                }
            }
        }
        Err(strongest.unwrap_or(UnresolvableReason::DatabaseNotFound))
    }

    async fn resolve_in_database(
        &self,
        item: &RecordListItem,
        database_key: &str,
    ) -> Result<(), UnresolvableReason> {
        if let (Some(_), Some(record_guid), Some(table_guid)) =
            (item.record_version(), item.record_guid(), item.table_guid())
        {
            let request = RecordVersionRequest {
                database_key,
                table_guid,
                record_history_guid: item.record_history_guid(),
                record_version_guid: record_guid,
                read_mode: self.read_mode,
            };
            return self
                .api
                .get_record_version(request)
                .await
                .map(drop)
                .map_err(unresolvable_reason);
        }

        let history = self
            .api
            .get_record_history(database_key, item.record_history_guid(), self.read_mode)
            .await
            .map_err(unresolvable_reason)?;

        match item.record_version() {
            Some(version)
                if !history
                    .record_versions
                    .iter()
                    .any(|candidate| candidate.version_number == version) =>
            {
                Err(UnresolvableReason::VersionNotFound)
            }
            _ => Ok(()),
        }
    }
}

fn unresolvable_reason(error: TransportError) -> UnresolvableReason {
    if error.is_not_found() {
        UnresolvableReason::RecordNotFound
    } else if error.is_forbidden() {
        UnresolvableReason::AccessDenied
    } else {
        UnresolvableReason::Failed {
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing::{Endpoint, InMemoryListsApi};
    use pretty_assertions::assert_eq;
    use recordlists_domain::dto::ListItemDto;

    const DB: &str = "b0de1566-c2c5-49ac-a8d1-e6183b1a3b77";
    const OTHER_DB: &str = "e595fe23-b450-4d18-8c08-4a0f378ef095";
    const TABLE: &str = "81dff531-0254-4fbe-9621-174b10aaee3d";
    const RHG_A: &str = "855360aa-d77b-4d66-bd39-536744677299";
    const RHG_B: &str = "3bc2b82f-0199-4f3b-a7af-8d520250b180";
    const RHG_C: &str = "9f6182ee-1f49-4ba9-9bd7-d4c0a392e94e";
    const VERSION_GUID: &str = "5ca1d3f6-9afd-427c-ad09-03e2b71bfd75";

    fn item(history: &str) -> RecordListItem {
        RecordListItem::new(DB, Some(TABLE), history).unwrap()
    }

    fn pinned(history: &str, version: u32, record_guid: &str) -> RecordListItem {
        RecordListItem::from_dto(ListItemDto {
            database_guid: DB.to_string(),
            table_guid: Some(TABLE.to_string()),
            record_history_guid: history.to_string(),
            record_version: Some(version),
            record_guid: Some(record_guid.to_string()),
        })
    }

    #[tokio::test]
    async fn test_partitions_items_in_input_order() {
        let api = InMemoryListsApi::new();
        api.add_database(DB, "MI_Training");
        api.add_record("MI_Training", RHG_A, &[(VERSION_GUID, 1)]);
        api.deny_record("MI_Training", RHG_C, 403);

        let resolution = ItemResolver::new(&api, false)
            .resolve([item(RHG_A), item(RHG_B), item(RHG_C)])
            .await
            .unwrap();

        assert_eq!(resolution.resolvable, vec![item(RHG_A)]);
        assert_eq!(
            resolution.unresolvable,
            vec![
                UnresolvableItem {
                    item: item(RHG_B),
                    reason: UnresolvableReason::RecordNotFound,
                },
                UnresolvableItem {
                    item: item(RHG_C),
                    reason: UnresolvableReason::AccessDenied,
                },
            ]
        );
        assert_eq!(api.calls_to(Endpoint::Databases), 1);
    }

    #[tokio::test]
    async fn test_unknown_database() {
        let api = InMemoryListsApi::new();
        api.add_database(OTHER_DB, "Other");

        let resolution = ItemResolver::new(&api, false)
            .resolve([item(RHG_A)])
            .await
            .unwrap();

        assert_eq!(
            resolution.unresolvable[0].reason,
            UnresolvableReason::DatabaseNotFound
        );
        assert_eq!(api.calls_to(Endpoint::RecordHistory), 0);
    }

    #[tokio::test]
    async fn test_version_number_must_be_visible() {
        let api = InMemoryListsApi::new();
        api.add_database(DB, "MI_Training");
        api.add_record("MI_Training", RHG_A, &[(VERSION_GUID, 1)]);

        let resolution = ItemResolver::new(&api, false)
            .resolve([item(RHG_A).with_version(1), item(RHG_A).with_version(2)])
            .await
            .unwrap();

        assert_eq!(resolution.resolvable, vec![item(RHG_A).with_version(1)]);
        assert_eq!(
            resolution.unresolvable[0].reason,
            UnresolvableReason::VersionNotFound
        );
    }

    #[tokio::test]
    async fn test_pinned_item_fetches_record_version() {
        let api = InMemoryListsApi::new();
        api.add_database(DB, "MI_Training");
        api.add_record("MI_Training", RHG_A, &[(VERSION_GUID, 3)]);

        let resolution = ItemResolver::new(&api, true)
            .resolve([pinned(RHG_A, 3, VERSION_GUID)])
            .await
            .unwrap();

        assert!(resolution.is_fully_resolvable());
        assert_eq!(api.calls_to(Endpoint::RecordVersion), 1);
        assert_eq!(api.calls_to(Endpoint::RecordHistory), 0);
    }

    #[tokio::test]
    async fn test_shared_guid_stops_at_first_resolving_key() {
        let api = InMemoryListsApi::new();
        api.add_database(DB, "First");
        api.add_database(DB, "Second");
        api.add_database(DB, "Third");
        api.add_record("Second", RHG_A, &[]);

        let resolution = ItemResolver::new(&api, false)
            .resolve([item(RHG_A)])
            .await
            .unwrap();

        assert!(resolution.is_fully_resolvable());
        assert_eq!(api.calls_to(Endpoint::RecordHistory), 2);
    }

    #[tokio::test]
    async fn test_strongest_reason_across_keys() {
        let api = InMemoryListsApi::new();
        api.add_database(DB, "First");
        api.add_database(DB, "Second");
        api.deny_record("Second", RHG_A, 403);

        let resolution = ItemResolver::new(&api, false)
            .resolve([item(RHG_A)])
            .await
            .unwrap();

        assert_eq!(
            resolution.unresolvable[0].reason,
            UnresolvableReason::AccessDenied
        );
    }

    #[tokio::test]
    async fn test_database_list_failure_aborts() {
        let api = InMemoryListsApi::new();
        api.fail(Endpoint::Databases, TransportError::status(500, "down"));

        let error = ItemResolver::new(&api, false)
            .resolve([item(RHG_A)])
            .await
            .unwrap_err();
        assert!(error.as_transport().is_some());
    }

    #[tokio::test]
    async fn test_other_failures_are_recorded_per_item() {
        let api = InMemoryListsApi::new();
        api.add_database(DB, "MI_Training");
        api.fail(Endpoint::RecordHistory, TransportError::status(500, "boom"));

        let resolution = ItemResolver::new(&api, false)
            .resolve([item(RHG_A), item(RHG_B)])
            .await
            .unwrap();

        assert_eq!(resolution.unresolvable.len(), 2);
        assert!(matches!(
            resolution.unresolvable[0].reason,
            UnresolvableReason::Failed { .. }
        ));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            unresolvable_reason(TransportError::status(404, "missing")),
            UnresolvableReason::RecordNotFound
        );
        assert_eq!(
            unresolvable_reason(TransportError::status(403, "forbidden")),
            UnresolvableReason::AccessDenied
        );
        assert_eq!(
            unresolvable_reason(TransportError::Timeout { timeout_ms: 10 }),
            UnresolvableReason::Failed {
                message: "Request timed out after 10ms".to_string()
            }
        );
    }
}
