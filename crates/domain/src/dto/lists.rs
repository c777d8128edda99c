//! Record list header bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::items::CreateRecordListItemsInfoDto;

/// A user or group as reported by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOrGroupDto {
    /// Identifier of the user or group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Account name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Header of a record list: its properties without its items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordListHeaderDto {
    /// Server-assigned identifier.
    pub identifier: String,
    /// Name of the list.
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Creation time.
    pub created_timestamp: DateTime<Utc>,
    /// Creator.
    pub created_user: UserOrGroupDto,
    /// Last modification time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_timestamp: Option<DateTime<Utc>>,
    /// Last modifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_user: Option<UserOrGroupDto>,
    /// Time of the last publication or withdrawal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_timestamp: Option<DateTime<Utc>>,
    /// User who last published or withdrew the list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_user: Option<UserOrGroupDto>,
    /// Whether the list is a revision of another list.
    pub is_revision: bool,
    /// Whether the list is published.
    pub published: bool,
    /// Whether the list awaits approval.
    pub awaiting_approval: bool,
    /// Whether the list is for internal use only.
    pub internal_use: bool,
    /// Identifier of the list this one revises.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_record_list_identifier: Option<String>,
}

/// Response body of the "all lists" endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordListHeadersInfoDto {
    /// Every list visible to the caller.
    #[serde(default)]
    pub lists: Vec<RecordListHeaderDto>,
}

/// Request body for creating a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecordListDto {
    /// Name of the new list.
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Initial items; omitted when there are none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<CreateRecordListItemsInfoDto>,
}

/// Request body for updating list properties.
///
/// Each field has three states: absent (leave unchanged), `null` (clear the
/// value) and a value. `Option<Option<_>>` maps them onto `None`,
/// `Some(None)` and `Some(Some(_))`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecordListPropertiesDto {
    /// New name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description, or `Some(None)` to clear it.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_present"
    )]
    pub description: Option<Option<String>>,
    /// New notes, or `Some(None)` to clear them.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_present"
    )]
    pub notes: Option<Option<String>>,
}

/// Deserializes a field that is present in the body, including an explicit `null`.
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}
