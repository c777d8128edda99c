//! Copy, revision and publication workflow.

use recordlists_domain::RecordList;
use tracing::info;

use super::{RecordListsClient, existing};
use crate::error::ApplicationResult;
use crate::ports::{ListTransition, ListsApi};

impl<A: ListsApi> RecordListsClient<A> {
    /// Copies the list. The copy's name is prefixed with the original's.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the list was never created, or a
    /// transport error if the request fails.
    pub async fn copy_list(&self, list: &RecordList) -> ApplicationResult<RecordList> {
        self.transition(list, ListTransition::Copy).await
    }

    /// Creates a revision of a published list.
    ///
    /// Publishing the revision later replaces the original list.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the list was never created, or a
    /// transport error if the request fails.
    pub async fn revise_list(&self, list: &RecordList) -> ApplicationResult<RecordList> {
        self.transition(list, ListTransition::Revise).await
    }

    /// Marks the list as awaiting approval.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the list was never created, or a
    /// transport error if the request fails.
    pub async fn request_list_approval(&self, list: &RecordList) -> ApplicationResult<RecordList> {
        self.transition(list, ListTransition::RequestApproval).await
    }

    /// Publishes a list awaiting approval.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the list was never created, or a
    /// transport error if the request fails.
    pub async fn publish_list(&self, list: &RecordList) -> ApplicationResult<RecordList> {
        self.transition(list, ListTransition::Publish).await
    }

    /// Withdraws a published list awaiting approval. Subscriptions are lost.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the list was never created, or a
    /// transport error if the request fails.
    pub async fn unpublish_list(&self, list: &RecordList) -> ApplicationResult<RecordList> {
        self.transition(list, ListTransition::Withdraw).await
    }

    /// Cancels a pending approval request.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the list was never created, or a
    /// transport error if the request fails.
    pub async fn cancel_list_approval_request(
        &self,
        list: &RecordList,
    ) -> ApplicationResult<RecordList> {
        self.transition(list, ListTransition::ResetAwaitingApproval)
            .await
    }

    async fn transition(
        &self,
        list: &RecordList,
        transition: ListTransition,
    ) -> ApplicationResult<RecordList> {
        let identifier = existing(list)?;
        info!(list = identifier, ?transition, "Applying list transition");
        let header = self.api.transition_list(identifier, transition).await?;
        Ok(RecordList::from_dto(header))
    }
}
