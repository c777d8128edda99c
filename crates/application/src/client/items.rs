//! List items, their resolvability, and subscriptions.

use recordlists_domain::dto::{CreateRecordListItemsInfoDto, DeleteRecordListItemsDto};
use recordlists_domain::{DomainResult, ItemResolution, RecordList, RecordListItem};
use tracing::info;

use super::{RecordListsClient, existing};
use crate::error::ApplicationResult;
use crate::ports::ListsApi;
use crate::resolver::ItemResolver;

impl<A: ListsApi> RecordListsClient<A> {
    /// Items of the list, in server order.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the list was never created, or a
    /// transport error if the request fails.
    pub async fn get_list_items(
        &self,
        list: &RecordList,
    ) -> ApplicationResult<Vec<RecordListItem>> {
        let identifier = existing(list)?;
        info!(list = identifier, "Fetching list items");
        let info = self.api.get_list_items(identifier).await?;
        Ok(info.items.into_iter().map(RecordListItem::from_dto).collect())
    }

    /// Items of the list, partitioned by whether the caller can read the
    /// records they reference.
    ///
    /// Different users may get different answers for the same list.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the list was never created, or a
    /// transport error if the items or the databases cannot be read.
    pub async fn get_resolvable_list_items(
        &self,
        list: &RecordList,
        read_mode: bool,
    ) -> ApplicationResult<ItemResolution> {
        let items = self.get_list_items(list).await?;
        self.resolve_items(items, read_mode).await
    }

    /// Partitions arbitrary items by whether the caller can read the
    /// records they reference.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the databases cannot be read.
    pub async fn resolve_items(
        &self,
        items: impl IntoIterator<Item = RecordListItem>,
        read_mode: bool,
    ) -> ApplicationResult<ItemResolution> {
        ItemResolver::new(self.api.as_ref(), read_mode)
            .resolve(items)
            .await
    }

    /// Adds items to the list and returns its items afterwards.
    ///
    /// Items are not checked against existing records or existing items.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the list was never created or an item
    /// has no table GUID, or a transport error if the request fails.
    pub async fn add_items_to_list(
        &self,
        list: &RecordList,
        items: &[RecordListItem],
    ) -> ApplicationResult<Vec<RecordListItem>> {
        let identifier = existing(list)?;
        let body = CreateRecordListItemsInfoDto {
            items: items
                .iter()
                .map(RecordListItem::to_create_dto)
                .collect::<DomainResult<_>>()?,
        };
        info!(list = identifier, count = items.len(), "Adding items to list");
        let info = self.api.add_items(identifier, &body).await?;
        Ok(info.items.into_iter().map(RecordListItem::from_dto).collect())
    }

    /// Removes items from the list and returns its remaining items.
    ///
    /// Removing items that are not in the list is not an error.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the list was never created, or a
    /// transport error if the request fails.
    pub async fn remove_items_from_list(
        &self,
        list: &RecordList,
        items: &[RecordListItem],
    ) -> ApplicationResult<Vec<RecordListItem>> {
        let identifier = existing(list)?;
        let body = DeleteRecordListItemsDto {
            items: items.iter().map(RecordListItem::to_delete_dto).collect(),
        };
        info!(list = identifier, count = items.len(), "Removing items from list");
        let info = self.api.remove_items(identifier, &body).await?;
        Ok(info.items.into_iter().map(RecordListItem::from_dto).collect())
    }

    /// Subscribes the caller to a published list.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the list was never created, or a
    /// transport error if the request fails.
    pub async fn subscribe_to_list(&self, list: &RecordList) -> ApplicationResult<()> {
        let identifier = existing(list)?;
        info!(list = identifier, "Subscribing to list");
        self.api.subscribe(identifier).await?;
        Ok(())
    }

    /// Unsubscribes the caller from a list.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the list was never created, or a
    /// transport error if the request fails.
    pub async fn unsubscribe_from_list(&self, list: &RecordList) -> ApplicationResult<()> {
        let identifier = existing(list)?;
        info!(list = identifier, "Unsubscribing from list");
        self.api.unsubscribe(identifier).await?;
        Ok(())
    }
}
