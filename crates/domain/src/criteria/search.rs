//! Leaf search criteria.

use serde::{Deserialize, Serialize};

use crate::dto::RecordListSearchCriterionDto;
use crate::error::DomainResult;
use crate::guid::{normalize_guid, sanitize_guids};
use crate::item::RecordListItem;

/// Role a user can hold on a record list.
///
/// Roles are only used in searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    /// No role. Matches lists the caller has no role on.
    None,
    /// Owner of the list.
    Owner,
    /// Subscribed to the list.
    Subscriber,
    /// Curates the list.
    Curator,
    /// Administers record lists.
    Administrator,
    /// May publish lists.
    Publisher,
}

/// Leaf criterion: a list matches when every property that is set matches.
///
/// A criterion with nothing set matches every list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriterion {
    name_contains: Option<String>,
    user_role: Option<UserRole>,
    is_published: Option<bool>,
    is_awaiting_approval: Option<bool>,
    is_internal_use: Option<bool>,
    is_revision: Option<bool>,
    contains_records_in_databases: Option<Vec<String>>,
    contains_records_in_integration_schemas: Option<Vec<String>>,
    contains_records_in_tables: Option<Vec<String>>,
    contains_records: Option<Vec<RecordListItem>>,
    user_can_add_or_remove_items: Option<bool>,
}

impl SearchCriterion {
    /// A criterion that matches every list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits to lists whose name contains `value`.
    #[must_use]
    pub fn with_name_contains(mut self, value: impl Into<String>) -> Self {
        self.name_contains = Some(value.into());
        self
    }

    /// Limits to lists on which the caller holds `role`.
    #[must_use]
    pub const fn with_user_role(mut self, role: UserRole) -> Self {
        self.user_role = Some(role);
        self
    }

    /// Limits by publication status.
    #[must_use]
    pub const fn with_published(mut self, value: bool) -> Self {
        self.is_published = Some(value);
        self
    }

    /// Limits by approval status.
    #[must_use]
    pub const fn with_awaiting_approval(mut self, value: bool) -> Self {
        self.is_awaiting_approval = Some(value);
        self
    }

    /// Limits by internal-use status.
    #[must_use]
    pub const fn with_internal_use(mut self, value: bool) -> Self {
        self.is_internal_use = Some(value);
        self
    }

    /// Limits by revision status.
    #[must_use]
    pub const fn with_revision(mut self, value: bool) -> Self {
        self.is_revision = Some(value);
        self
    }

    /// Limits by whether the caller can add or remove items.
    #[must_use]
    pub const fn with_user_can_add_or_remove_items(mut self, value: bool) -> Self {
        self.user_can_add_or_remove_items = Some(value);
        self
    }

    /// Limits to lists holding at least one record from any of these databases.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::InvalidGuid`] if a GUID is malformed.
    pub fn with_records_in_databases<I, S>(mut self, guids: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.contains_records_in_databases = Some(sanitize_guids(
            "GUID in 'contains_records_in_databases'",
            guids,
        )?);
        Ok(self)
    }

    /// Limits to lists holding at least one record from any of these integration schemas.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::InvalidGuid`] if a GUID is malformed.
    pub fn with_records_in_integration_schemas<I, S>(mut self, guids: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.contains_records_in_integration_schemas = Some(sanitize_guids(
            "GUID in 'contains_records_in_integration_schemas'",
            guids,
        )?);
        Ok(self)
    }

    /// Limits to lists holding at least one record from any of these tables.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::InvalidGuid`] if a GUID is malformed.
    pub fn with_records_in_tables<I, S>(mut self, guids: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.contains_records_in_tables = Some(sanitize_guids(
            "GUID in 'contains_records_in_tables'",
            guids,
        )?);
        Ok(self)
    }

    /// Limits to lists holding every one of these records.
    ///
    /// Records are matched on database, record history and version only, so
    /// each item is kept as its [`RecordListItem::record_reference`].
    #[must_use]
    pub fn with_records(mut self, items: impl IntoIterator<Item = RecordListItem>) -> Self {
        self.contains_records = Some(
            items
                .into_iter()
                .map(|item| item.record_reference())
                .collect(),
        );
        self
    }

    /// Substring the list name must contain.
    #[must_use]
    pub fn name_contains(&self) -> Option<&str> {
        self.name_contains.as_deref()
    }

    /// Role the caller must hold.
    #[must_use]
    pub const fn user_role(&self) -> Option<UserRole> {
        self.user_role
    }

    /// Required publication status.
    #[must_use]
    pub const fn is_published(&self) -> Option<bool> {
        self.is_published
    }

    /// Required approval status.
    #[must_use]
    pub const fn is_awaiting_approval(&self) -> Option<bool> {
        self.is_awaiting_approval
    }

    /// Required internal-use status.
    #[must_use]
    pub const fn is_internal_use(&self) -> Option<bool> {
        self.is_internal_use
    }

    /// Required revision status.
    #[must_use]
    pub const fn is_revision(&self) -> Option<bool> {
        self.is_revision
    }

    /// Database GUIDs, any of which must appear among the list's items.
    #[must_use]
    pub fn contains_records_in_databases(&self) -> Option<&[String]> {
        self.contains_records_in_databases.as_deref()
    }

    /// Integration schema GUIDs, any of which must appear among the list's items.
    #[must_use]
    pub fn contains_records_in_integration_schemas(&self) -> Option<&[String]> {
        self.contains_records_in_integration_schemas.as_deref()
    }

    /// Table GUIDs, any of which must appear among the list's items.
    #[must_use]
    pub fn contains_records_in_tables(&self) -> Option<&[String]> {
        self.contains_records_in_tables.as_deref()
    }

    /// Records the list must contain.
    #[must_use]
    pub fn contains_records(&self) -> Option<&[RecordListItem]> {
        self.contains_records.as_deref()
    }

    /// Required ability to add or remove items.
    #[must_use]
    pub const fn user_can_add_or_remove_items(&self) -> Option<bool> {
        self.user_can_add_or_remove_items
    }

    pub(crate) fn to_dto(&self) -> RecordListSearchCriterionDto {
        RecordListSearchCriterionDto {
            name_contains: self.name_contains.clone(),
            user_role: self.user_role,
            is_published: self.is_published,
            is_awaiting_approval: self.is_awaiting_approval,
            is_internal_use: self.is_internal_use,
            is_revision: self.is_revision,
            contains_records_in_databases: self.contains_records_in_databases.clone(),
            contains_records_in_integration_schemas: self
                .contains_records_in_integration_schemas
                .clone(),
            contains_records_in_tables: self.contains_records_in_tables.clone(),
            contains_records: self
                .contains_records
                .as_ref()
                .map(|items| items.iter().map(RecordListItem::to_reference_dto).collect()),
            user_can_add_or_remove_items: self.user_can_add_or_remove_items,
        }
    }

    pub(crate) fn from_dto(dto: RecordListSearchCriterionDto) -> Self {
        let normalize = |guids: Vec<String>| guids.iter().map(|g| normalize_guid(g)).collect();
        Self {
            name_contains: dto.name_contains,
            user_role: dto.user_role,
            is_published: dto.is_published,
            is_awaiting_approval: dto.is_awaiting_approval,
            is_internal_use: dto.is_internal_use,
            is_revision: dto.is_revision,
            contains_records_in_databases: dto.contains_records_in_databases.map(normalize),
            contains_records_in_integration_schemas: dto
                .contains_records_in_integration_schemas
                .map(normalize),
            contains_records_in_tables: dto.contains_records_in_tables.map(normalize),
            contains_records: dto.contains_records.map(|references| {
                references
                    .into_iter()
                    .map(RecordListItem::from_reference_dto)
                    .collect()
            }),
            user_can_add_or_remove_items: dto.user_can_add_or_remove_items,
        }
    }
}
