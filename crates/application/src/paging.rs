//! Lazily paged search results.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;

use recordlists_domain::dto::PagingOptionsDto;
use recordlists_domain::{AuditLogItem, AuditLogSearchCriterion};
use tracing::debug;

use crate::error::ApplicationResult;
use crate::ports::ListsApi;

/// Something that can be read one page at a time.
pub trait PageSource: Send {
    /// Entry type.
    type Item: Send;

    /// Fetches one page; `None` asks for everything at once.
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be fetched.
    fn fetch_page(
        &mut self,
        paging: Option<PagingOptionsDto>,
    ) -> impl Future<Output = ApplicationResult<Vec<Self::Item>>> + Send;
}

/// Entries of a search, fetched page by page as they are consumed.
///
/// Paging ends at the first empty page. Without a page size a single
/// request returns every entry.
pub struct PagedResult<S: PageSource> {
    source: S,
    page_size: Option<u32>,
    next_index: u32,
    buffer: VecDeque<S::Item>,
    exhausted: bool,
}

impl<S: PageSource> PagedResult<S> {
    /// Wraps `source`. Nothing is fetched until the first entry is requested.
    #[must_use]
    pub const fn new(source: S, page_size: Option<u32>) -> Self {
        Self {
            source,
            page_size,
            next_index: 0,
            buffer: VecDeque::new(),
            exhausted: false,
        }
    }

    /// Page size, or `None` for a single unpaged request.
    #[must_use]
    pub const fn page_size(&self) -> Option<u32> {
        self.page_size
    }

    /// Returns the next entry, fetching a page if needed.
    ///
    /// An error leaves the cursor where it was, so calling again retries
    /// the same page.
    pub async fn next(&mut self) -> Option<ApplicationResult<S::Item>> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Some(Ok(item));
            }
            if self.exhausted {
                return None;
            }

            let paging = self.page_size.map(|page_size| PagingOptionsDto {
                page_size,
                start_index: self.next_index,
            });
            debug!(?paging, "Fetching page");

            let items = match self.source.fetch_page(paging).await {
                Ok(items) => items,
                Err(error) => return Some(Err(error)),
            };
            if self.page_size.is_none() || items.is_empty() {
                self.exhausted = true;
            }
            let received = u32::try_from(items.len()).unwrap_or(u32::MAX);
            self.next_index = self.next_index.saturating_add(received);
            self.buffer.extend(items);
        }
    }

    /// Consumes every remaining entry.
    ///
    /// # Errors
    ///
    /// Returns the first error met; entries read before it are dropped.
    pub async fn collect_all(mut self) -> ApplicationResult<Vec<S::Item>> {
        let mut all = Vec::new();
        while let Some(item) = self.next().await {
            all.push(item?);
        }
        Ok(all)
    }
}

/// Pages of an audit log search.
#[derive(Debug)]
pub struct AuditLogPageSource<A: ListsApi> {
    api: Arc<A>,
    criterion: AuditLogSearchCriterion,
}

impl<A: ListsApi> AuditLogPageSource<A> {
    /// Searches the audit log through `api` with `criterion`.
    #[must_use]
    pub const fn new(api: Arc<A>, criterion: AuditLogSearchCriterion) -> Self {
        Self { api, criterion }
    }
}

impl<A: ListsApi> PageSource for AuditLogPageSource<A> {
    type Item = AuditLogItem;

    async fn fetch_page(
        &mut self,
        paging: Option<PagingOptionsDto>,
    ) -> ApplicationResult<Vec<AuditLogItem>> {
        let body = self.criterion.to_dto(paging);
        let info = self.api.run_audit_search(&body).await?;
        let entries = self
            .api
            .get_audit_search_results(&info.search_result_identifier)
            .await?;
        Ok(entries.into_iter().map(AuditLogItem::from_dto).collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ApplicationError;
    use crate::ports::TransportError;
    use pretty_assertions::assert_eq;

    /// Serves fixed pages and records the paging of each request.
    struct FixedPages {
        pages: VecDeque<ApplicationResult<Vec<u32>>>,
        requests: Vec<Option<PagingOptionsDto>>,
    }

    impl FixedPages {
        fn new(pages: Vec<ApplicationResult<Vec<u32>>>) -> Self {
            Self {
                pages: pages.into(),
                requests: Vec::new(),
            }
        }
    }

    impl PageSource for FixedPages {
        type Item = u32;

        async fn fetch_page(
            &mut self,
            paging: Option<PagingOptionsDto>,
        ) -> ApplicationResult<Vec<u32>> {
            self.requests.push(paging);
            self.pages.pop_front().unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    fn paging(start_index: u32) -> Option<PagingOptionsDto> {
        Some(PagingOptionsDto {
            page_size: 3,
            start_index,
        })
    }

    #[tokio::test]
    async fn test_stops_at_first_empty_page() {
        let source = FixedPages::new(vec![Ok(vec![1, 2, 3]), Ok(vec![4, 5]), Ok(vec![])]);
        let mut result = PagedResult::new(source, Some(3));

        let mut seen = Vec::new();
        while let Some(item) = result.next().await {
            seen.push(item.unwrap());
        }

        assert_eq!(seen, vec![1, 2, 3, 4, 5]);
        assert_eq!(
            result.source.requests,
            vec![paging(0), paging(3), paging(5)]
        );
    }

    #[tokio::test]
    async fn test_unpaged_fetches_once() {
        let source = FixedPages::new(vec![Ok(vec![1, 2]), Ok(vec![3])]);
        let mut result = PagedResult::new(source, None);

        assert_eq!(result.next().await.unwrap().unwrap(), 1);
        assert_eq!(result.next().await.unwrap().unwrap(), 2);
        assert!(result.next().await.is_none());
        assert_eq!(result.source.requests, vec![None]);
    }

    #[tokio::test]
    async fn test_error_does_not_advance_cursor() {
        let source = FixedPages::new(vec![
            Ok(vec![1, 2, 3]),
            Err(ApplicationError::Transport(TransportError::status(500, "boom"))),
            Ok(vec![4]),
        ]);
        let mut result = PagedResult::new(source, Some(3));

        for _ in 0..3 {
            result.next().await.unwrap().unwrap();
        }
        assert!(result.next().await.unwrap().is_err());
        assert_eq!(result.next().await.unwrap().unwrap(), 4);
        assert_eq!(
            result.source.requests,
            vec![paging(0), paging(3), paging(3)]
        );
    }

    #[tokio::test]
    async fn test_collect_all() {
        let source = FixedPages::new(vec![Ok(vec![1, 2, 3]), Ok(vec![4])]);
        let all = PagedResult::new(source, Some(3)).collect_all().await.unwrap();
        assert_eq!(all, vec![1, 2, 3, 4]);
    }
}
