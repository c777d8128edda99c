//! Reading, creating, updating and deleting lists.

use recordlists_domain::{ListUpdate, NewRecordList, RecordList};
use tracing::info;

use super::{RecordListsClient, existing, non_blank};
use crate::error::ApplicationResult;
use crate::ports::ListsApi;

impl<A: ListsApi> RecordListsClient<A> {
    /// Every record list visible to the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_all_lists(&self) -> ApplicationResult<Vec<RecordList>> {
        info!("Fetching all lists");
        let info = self.api.get_all_lists().await?;
        Ok(info.lists.into_iter().map(RecordList::from_dto).collect())
    }

    /// The list with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank identifier, or a transport
    /// error if the request fails.
    pub async fn get_list(&self, identifier: &str) -> ApplicationResult<RecordList> {
        let identifier = non_blank(identifier)?;
        info!(list = identifier, "Fetching list");
        let header = self.api.get_list(identifier).await?;
        Ok(RecordList::from_dto(header))
    }

    /// Creates a list and returns it as stored by the server.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank name or an item without a
    /// table GUID, or a transport error if the request fails.
    pub async fn create_list(&self, new_list: NewRecordList) -> ApplicationResult<RecordList> {
        let body = new_list.to_dto()?;
        info!(
            name = new_list.name(),
            items = new_list.items().len(),
            "Creating list"
        );
        let header = self.api.create_list(&body).await?;
        Ok(RecordList::from_dto(header))
    }

    /// Applies `update` to the list's properties.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the list was never created, the update
    /// is empty or the new name is blank; otherwise a transport error if the
    /// request fails.
    pub async fn update_list(
        &self,
        list: &RecordList,
        update: ListUpdate,
    ) -> ApplicationResult<RecordList> {
        let identifier = existing(list)?;
        let body = update.to_dto()?;
        info!(list = identifier, "Updating list");
        let header = self.api.update_list(identifier, &body).await?;
        Ok(RecordList::from_dto(header))
    }

    /// Deletes the list.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the list was never created, or a
    /// transport error if the request fails.
    pub async fn delete_list(&self, list: &RecordList) -> ApplicationResult<()> {
        let identifier = existing(list)?;
        info!(list = identifier, "Deleting list");
        self.api.delete_list(identifier).await?;
        Ok(())
    }
}
