//! Wire models of the Granta MI Server API.
//!
//! These types mirror the JSON bodies exchanged with the Lists, Audit and
//! Schema endpoints. They carry no behavior beyond (de)serialization; the
//! domain types convert to and from them.

mod audit;
mod criteria;
mod items;
mod lists;
mod schema;

pub use audit::{AuditLogItemDto, AuditLogSearchRequestDto, PagingOptionsDto};
pub use criteria::{
    BooleanCriterionDto, CriterionDto, RecordListSearchCriterionDto, RecordListSearchRequestDto,
    RecordListSearchResultDto, RecordListSearchResultsInfoDto, ResponseOptionsDto, SearchInfoDto,
};
pub use items::{
    CreateListItemDto, CreateRecordListItemsInfoDto, DeleteRecordListItemDto,
    DeleteRecordListItemsDto, ListItemDto, ListItemRecordReferenceDto, RecordListItemsInfoDto,
};
pub use lists::{
    CreateRecordListDto, RecordListHeaderDto, RecordListHeadersInfoDto,
    UpdateRecordListPropertiesDto, UserOrGroupDto,
};
pub use schema::{
    DatabasesInfoDto, MiVersionDto, RecordHistoryDto, RecordVersionDto, SlimDatabaseDto,
    SlimRecordVersionDto,
};
