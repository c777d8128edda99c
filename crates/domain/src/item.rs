//! Record list items.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::dto::{
    CreateListItemDto, DeleteRecordListItemDto, ListItemDto, ListItemRecordReferenceDto,
};
use crate::error::{DomainError, DomainResult};
use crate::guid::{normalize_guid, sanitize_guid};

/// A reference to a record in a Granta MI database.
///
/// An item does not necessarily reference a record that exists on the server;
/// use the resolvability check for that.
///
/// Equality and hashing consider the database, table and record history GUIDs
/// and the record version. The record version GUID is informational only.
#[derive(Debug, Clone, Eq)]
pub struct RecordListItem {
    database_guid: String,
    table_guid: Option<String>,
    record_history_guid: String,
    record_version: Option<u32>,
    record_guid: Option<String>,
}

impl RecordListItem {
    /// Creates an item tracking the latest available version of a record.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidGuid`] if any GUID is malformed.
    pub fn new(
        database_guid: &str,
        table_guid: Option<&str>,
        record_history_guid: &str,
    ) -> DomainResult<Self> {
        Ok(Self {
            database_guid: sanitize_guid("'database_guid'", database_guid)?,
            table_guid: table_guid
                .map(|guid| sanitize_guid("'table_guid'", guid))
                .transpose()?,
            record_history_guid: sanitize_guid("'record_history_guid'", record_history_guid)?,
            record_version: None,
            record_guid: None,
        })
    }

    /// Pins the item to a specific record version (version-controlled tables only).
    #[must_use]
    pub const fn with_version(mut self, record_version: u32) -> Self {
        self.record_version = Some(record_version);
        self
    }

    /// Builds an item from its server representation.
    #[must_use]
    pub fn from_dto(dto: ListItemDto) -> Self {
        Self {
            database_guid: normalize_guid(&dto.database_guid),
            table_guid: dto.table_guid.as_deref().map(normalize_guid),
            record_history_guid: normalize_guid(&dto.record_history_guid),
            record_version: dto.record_version,
            record_guid: dto.record_guid.as_deref().map(normalize_guid),
        }
    }

    /// Body used to add this item to a list.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MissingTableGuid`] if the item has no table GUID.
    pub fn to_create_dto(&self) -> DomainResult<CreateListItemDto> {
        let table_guid = self
            .table_guid
            .clone()
            .ok_or_else(|| DomainError::MissingTableGuid(self.to_string()))?;
        Ok(CreateListItemDto {
            database_guid: self.database_guid.clone(),
            table_guid,
            record_history_guid: self.record_history_guid.clone(),
            record_version: self.record_version,
        })
    }

    /// Body used to remove this item from a list.
    #[must_use]
    pub fn to_delete_dto(&self) -> DeleteRecordListItemDto {
        DeleteRecordListItemDto {
            database_guid: self.database_guid.clone(),
            record_history_guid: self.record_history_guid.clone(),
            record_version: self.record_version,
        }
    }

    /// Reference used by the "contains records" search criterion.
    #[must_use]
    pub fn to_reference_dto(&self) -> ListItemRecordReferenceDto {
        ListItemRecordReferenceDto {
            database_guid: self.database_guid.clone(),
            record_history_guid: self.record_history_guid.clone(),
            record_version: self.record_version,
        }
    }

    /// The record this item points at, without the table and record version
    /// GUIDs. Search criteria carry only this part.
    #[must_use]
    pub fn record_reference(&self) -> Self {
        Self {
            table_guid: None,
            record_guid: None,
            ..self.clone()
        }
    }

    /// Builds an item from a search reference. The table is unknown.
    #[must_use]
    pub fn from_reference_dto(dto: ListItemRecordReferenceDto) -> Self {
        Self {
            database_guid: normalize_guid(&dto.database_guid),
            table_guid: None,
            record_history_guid: normalize_guid(&dto.record_history_guid),
            record_version: dto.record_version,
            record_guid: None,
        }
    }

    /// GUID of the database.
    #[must_use]
    pub fn database_guid(&self) -> &str {
        &self.database_guid
    }

    /// GUID of the table, if known.
    #[must_use]
    pub fn table_guid(&self) -> Option<&str> {
        self.table_guid.as_deref()
    }

    /// Record history GUID.
    #[must_use]
    pub fn record_history_guid(&self) -> &str {
        &self.record_history_guid
    }

    /// Record version number, if the item is pinned to a version.
    #[must_use]
    pub const fn record_version(&self) -> Option<u32> {
        self.record_version
    }

    /// Record version GUID.
    ///
    /// Only populated on items obtained from the server that reference a
    /// specific version.
    #[must_use]
    pub fn record_guid(&self) -> Option<&str> {
        self.record_guid.as_deref()
    }
}

impl PartialEq for RecordListItem {
    fn eq(&self, other: &Self) -> bool {
        self.database_guid == other.database_guid
            && self.table_guid == other.table_guid
            && self.record_history_guid == other.record_history_guid
            && self.record_version == other.record_version
    }
}

impl Hash for RecordListItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.database_guid.hash(state);
        self.table_guid.hash(state);
        self.record_history_guid.hash(state);
        self.record_version.hash(state);
    }
}

impl fmt::Display for RecordListItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RecordListItem(database_guid='{}', record_history_guid='{}'",
            self.database_guid, self.record_history_guid
        )?;
        match self.record_version {
            Some(version) => write!(f, ", record_version={version})"),
            None => f.write_str(")"),
        }
    }
}
