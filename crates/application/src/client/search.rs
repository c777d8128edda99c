//! Record list searches and the audit log.

use std::sync::Arc;

use recordlists_domain::dto::{RecordListSearchRequestDto, ResponseOptionsDto};
use recordlists_domain::{AuditLogSearchCriterion, Criterion, DomainError, SearchResult};
use tracing::{debug, info};

use super::RecordListsClient;
use crate::error::ApplicationResult;
use crate::paging::{AuditLogPageSource, PagedResult};
use crate::ports::ListsApi;

/// Lazily fetched audit log entries.
pub type AuditLogEntries<A> = PagedResult<AuditLogPageSource<A>>;

impl<A: ListsApi> RecordListsClient<A> {
    /// Lists matching `criterion`, in server order.
    ///
    /// With `include_items`, each result carries the list's items; without
    /// it, results carry `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if either request fails.
    pub async fn search_for_lists(
        &self,
        criterion: &Criterion,
        include_items: bool,
    ) -> ApplicationResult<Vec<SearchResult>> {
        info!(include_items, "Searching for lists");
        let body = RecordListSearchRequestDto {
            search_criterion: criterion.to_dto(),
            response_options: ResponseOptionsDto {
                include_record_list_items: include_items,
            },
        };
        let info = self.api.run_search(&body).await?;
        debug!(result = %info.search_result_identifier, "Fetching search results");
        let results = self
            .api
            .get_search_results(&info.search_result_identifier)
            .await?;

        Ok(results
            .search_results
            .into_iter()
            .map(|result| SearchResult::from_dto(result, include_items))
            .collect())
    }

    /// Audit log entries matching `criterion`, fetched as they are consumed.
    ///
    /// With `page_size`, entries are requested that many at a time; with
    /// `None`, one request returns every entry.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a page size of zero. Request failures
    /// surface from the returned entries.
    pub fn search_audit_log(
        &self,
        criterion: AuditLogSearchCriterion,
        page_size: Option<u32>,
    ) -> ApplicationResult<AuditLogEntries<A>> {
        if page_size == Some(0) {
            return Err(DomainError::InvalidPageSize.into());
        }
        info!(?page_size, "Searching audit log");
        let source = AuditLogPageSource::new(Arc::clone(&self.api), criterion);
        Ok(PagedResult::new(source, page_size))
    }

    /// Every audit log entry visible to the caller.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a page size of zero.
    pub fn get_all_audit_log_entries(
        &self,
        page_size: Option<u32>,
    ) -> ApplicationResult<AuditLogEntries<A>> {
        self.search_audit_log(AuditLogSearchCriterion::new(), page_size)
    }
}
