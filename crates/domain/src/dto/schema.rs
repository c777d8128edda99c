//! Schema and record bodies used by session checks and item resolution.

use serde::{Deserialize, Serialize};

/// Server version information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MiVersionDto {
    /// Full version, e.g. `25.2.820.0`.
    pub version: String,
    /// `MAJOR.MINOR` version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_minor_version: Option<String>,
    /// Binary compatibility version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary_compatibility_version: Option<String>,
}

/// Summary of a database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlimDatabaseDto {
    /// Database GUID; several databases may share one.
    pub guid: String,
    /// Database key, unique on the server.
    pub key: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Response body listing databases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabasesInfoDto {
    /// Databases visible to the caller.
    #[serde(default)]
    pub databases: Vec<SlimDatabaseDto>,
}

/// Summary of a record version inside a record history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlimRecordVersionDto {
    /// Record version GUID.
    pub guid: String,
    /// Version number.
    pub version_number: u32,
}

/// A record history and the versions visible to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordHistoryDto {
    /// Record history GUID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    /// Visible versions.
    #[serde(default)]
    pub record_versions: Vec<SlimRecordVersionDto>,
}

/// A single record version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordVersionDto {
    /// Record version GUID.
    pub guid: String,
    /// Version number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_number: Option<u32>,
}
