//! Record list search bodies.

use serde::{Deserialize, Deserializer, Serialize};

use super::items::{ListItemDto, ListItemRecordReferenceDto};
use super::lists::RecordListHeaderDto;
use crate::criteria::UserRole;

/// Leaf criterion: the conjunction of every field that is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordListSearchCriterionDto {
    /// Substring the list name must contain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_contains: Option<String>,
    /// Role the caller must hold on the list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_role: Option<UserRole>,
    /// Publication status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
    /// Approval status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_awaiting_approval: Option<bool>,
    /// Internal-use status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_internal_use: Option<bool>,
    /// Revision status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_revision: Option<bool>,
    /// Database GUIDs any item must belong to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains_records_in_databases: Option<Vec<String>>,
    /// Integration schema GUIDs any item must belong to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains_records_in_integration_schemas: Option<Vec<String>>,
    /// Table GUIDs any item must belong to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains_records_in_tables: Option<Vec<String>>,
    /// Records the list must contain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains_records: Option<Vec<ListItemRecordReferenceDto>>,
    /// Whether the caller can add or remove items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_can_add_or_remove_items: Option<bool>,
}

/// Combinator criterion. Each operator key holds its children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BooleanCriterionDto {
    /// Children of which at least one must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_any: Option<Vec<CriterionDto>>,
    /// Children which must all match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_all: Option<Vec<CriterionDto>>,
    /// Children of which none may match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_none: Option<Vec<CriterionDto>>,
}

impl BooleanCriterionDto {
    const OPERATOR_KEYS: [&'static str; 3] = ["matchAny", "matchAll", "matchNone"];
}

/// Either kind of criterion, serialized without a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CriterionDto {
    /// A combinator.
    Boolean(BooleanCriterionDto),
    /// A leaf.
    Search(RecordListSearchCriterionDto),
}

impl<'de> Deserialize<'de> for CriterionDto {
    /// Every field of both shapes is optional, so an untagged derive cannot
    /// tell them apart. An object holding any operator key is a combinator.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let object = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;
        let is_boolean = BooleanCriterionDto::OPERATOR_KEYS
            .iter()
            .any(|key| object.contains_key(*key));
        let value = serde_json::Value::Object(object);

        if is_boolean {
            serde_json::from_value(value)
                .map(Self::Boolean)
                .map_err(serde::de::Error::custom)
        } else {
            serde_json::from_value(value)
                .map(Self::Search)
                .map_err(serde::de::Error::custom)
        }
    }
}

/// Options controlling what a search response contains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseOptionsDto {
    /// Whether each result carries the list's items.
    pub include_record_list_items: bool,
}

/// Request body starting a record list search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordListSearchRequestDto {
    /// Criterion tree.
    pub search_criterion: CriterionDto,
    /// Response options.
    pub response_options: ResponseOptionsDto,
}

/// Response to starting a search: where to fetch its results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchInfoDto {
    /// Identifier of the stored result set.
    pub search_result_identifier: String,
}

/// A single search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordListSearchResultDto {
    /// Matching list.
    pub header: RecordListHeaderDto,
    /// Items of the list; empty unless requested.
    #[serde(default)]
    pub items: Vec<ListItemDto>,
}

/// Stored result set of a search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordListSearchResultsInfoDto {
    /// Hits in server order.
    #[serde(default)]
    pub search_results: Vec<RecordListSearchResultDto>,
}
