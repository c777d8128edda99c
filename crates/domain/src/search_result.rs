//! Record list search results.

use crate::dto::RecordListSearchResultDto;
use crate::item::RecordListItem;
use crate::record_list::RecordList;

/// A list matching a search, optionally with its items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    list_details: RecordList,
    items: Option<Vec<RecordListItem>>,
}

impl SearchResult {
    /// Builds a result from its server representation.
    ///
    /// `includes_items` tells whether the search asked for items; without it
    /// the result carries `None` rather than an empty list.
    #[must_use]
    pub fn from_dto(dto: RecordListSearchResultDto, includes_items: bool) -> Self {
        let items = includes_items
            .then(|| dto.items.into_iter().map(RecordListItem::from_dto).collect());
        Self {
            list_details: RecordList::from_dto(dto.header),
            items,
        }
    }

    /// The matching list.
    #[must_use]
    pub const fn list_details(&self) -> &RecordList {
        &self.list_details
    }

    /// Items of the list, if they were requested.
    #[must_use]
    pub fn items(&self) -> Option<&[RecordListItem]> {
        self.items.as_deref()
    }

    /// Splits the result into the list and its items.
    #[must_use]
    pub fn into_parts(self) -> (RecordList, Option<Vec<RecordListItem>>) {
        (self.list_details, self.items)
    }
}
