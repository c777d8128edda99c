//! Record list item bodies.

use serde::{Deserialize, Serialize};

/// An item as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItemDto {
    /// Database GUID.
    pub database_guid: String,
    /// Table GUID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_guid: Option<String>,
    /// Record history GUID.
    pub record_history_guid: String,
    /// Record version number, for version-specific items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_version: Option<u32>,
    /// Record version GUID, populated for version-specific items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_guid: Option<String>,
}

/// Response body listing the items of a list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordListItemsInfoDto {
    /// Items in server order.
    #[serde(default)]
    pub items: Vec<ListItemDto>,
}

/// An item to add to a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateListItemDto {
    /// Database GUID.
    pub database_guid: String,
    /// Table GUID; mandatory when adding.
    pub table_guid: String,
    /// Record history GUID.
    pub record_history_guid: String,
    /// Record version number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_version: Option<u32>,
}

/// Request body for adding items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecordListItemsInfoDto {
    /// Items to add.
    pub items: Vec<CreateListItemDto>,
}

/// An item to remove from a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRecordListItemDto {
    /// Database GUID.
    pub database_guid: String,
    /// Record history GUID.
    pub record_history_guid: String,
    /// Record version number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_version: Option<u32>,
}

/// Request body for removing items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRecordListItemsDto {
    /// Items to remove.
    pub items: Vec<DeleteRecordListItemDto>,
}

/// Reference to a record, used by the "contains records" search criterion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItemRecordReferenceDto {
    /// Database GUID.
    pub database_guid: String,
    /// Record history GUID.
    pub record_history_guid: String,
    /// Record version number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_version: Option<u32>,
}
