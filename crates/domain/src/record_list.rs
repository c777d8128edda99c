//! Record lists and the inputs that create or modify them.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::dto::{
    CreateRecordListDto, CreateRecordListItemsInfoDto, RecordListHeaderDto,
    UpdateRecordListPropertiesDto,
};
use crate::error::{DomainError, DomainResult};
use crate::item::RecordListItem;
use crate::user::UserOrGroup;

/// A record list as reported by the server.
///
/// Values are snapshots: the client never tracks state transitions locally,
/// and every operation returns a freshly fetched copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordList {
    identifier: Option<String>,
    name: String,
    description: Option<String>,
    notes: Option<String>,
    created_timestamp: Option<DateTime<Utc>>,
    created_user: Option<UserOrGroup>,
    last_modified_timestamp: Option<DateTime<Utc>>,
    last_modified_user: Option<UserOrGroup>,
    published_timestamp: Option<DateTime<Utc>>,
    published_user: Option<UserOrGroup>,
    published: bool,
    is_revision: bool,
    awaiting_approval: bool,
    internal_use: bool,
    parent_record_list_identifier: Option<String>,
}

impl RecordList {
    /// Describes a list that does not exist on the server.
    ///
    /// Such a value has no identifier; operations that target an existing
    /// list reject it before sending anything.
    #[must_use]
    pub fn unsaved(name: impl Into<String>) -> Self {
        Self {
            identifier: None,
            name: name.into(),
            description: None,
            notes: None,
            created_timestamp: None,
            created_user: None,
            last_modified_timestamp: None,
            last_modified_user: None,
            published_timestamp: None,
            published_user: None,
            published: false,
            is_revision: false,
            awaiting_approval: false,
            internal_use: false,
            parent_record_list_identifier: None,
        }
    }

    /// Builds a list from its server representation.
    #[must_use]
    pub fn from_dto(dto: RecordListHeaderDto) -> Self {
        Self {
            identifier: Some(dto.identifier),
            name: dto.name,
            description: dto.description,
            notes: dto.notes,
            created_timestamp: Some(dto.created_timestamp),
            created_user: Some(UserOrGroup::from_dto(dto.created_user)),
            last_modified_timestamp: dto.last_modified_timestamp,
            last_modified_user: dto.last_modified_user.map(UserOrGroup::from_dto),
            published_timestamp: dto.published_timestamp,
            published_user: dto.published_user.map(UserOrGroup::from_dto),
            published: dto.published,
            is_revision: dto.is_revision,
            awaiting_approval: dto.awaiting_approval,
            internal_use: dto.internal_use,
            parent_record_list_identifier: dto.parent_record_list_identifier,
        }
    }

    /// Returns the server-assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MissingIdentifier`] for a list that was never created.
    pub fn require_identifier(&self) -> DomainResult<&str> {
        self.identifier
            .as_deref()
            .filter(|identifier| !identifier.trim().is_empty())
            .ok_or_else(|| DomainError::MissingIdentifier(self.name.clone()))
    }

    /// Identifier of the list; `None` until the list exists on the server.
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// Name of the list.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Description of the list.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Notes about the list.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// When the list was created.
    #[must_use]
    pub const fn created_timestamp(&self) -> Option<DateTime<Utc>> {
        self.created_timestamp
    }

    /// Who created the list.
    #[must_use]
    pub const fn created_user(&self) -> Option<&UserOrGroup> {
        self.created_user.as_ref()
    }

    /// When the list was last modified.
    #[must_use]
    pub const fn last_modified_timestamp(&self) -> Option<DateTime<Utc>> {
        self.last_modified_timestamp
    }

    /// Who last modified the list.
    #[must_use]
    pub const fn last_modified_user(&self) -> Option<&UserOrGroup> {
        self.last_modified_user.as_ref()
    }

    /// When the list was last published or withdrawn.
    #[must_use]
    pub const fn published_timestamp(&self) -> Option<DateTime<Utc>> {
        self.published_timestamp
    }

    /// Who last published or withdrew the list.
    #[must_use]
    pub const fn published_user(&self) -> Option<&UserOrGroup> {
        self.published_user.as_ref()
    }

    /// Whether the list is published.
    #[must_use]
    pub const fn published(&self) -> bool {
        self.published
    }

    /// Whether the list is a revision of another list.
    #[must_use]
    pub const fn is_revision(&self) -> bool {
        self.is_revision
    }

    /// Whether the list awaits approval to be published or withdrawn.
    #[must_use]
    pub const fn awaiting_approval(&self) -> bool {
        self.awaiting_approval
    }

    /// Whether the list is for internal use only.
    ///
    /// Internal lists are periodically deleted by the server.
    #[must_use]
    pub const fn internal_use(&self) -> bool {
        self.internal_use
    }

    /// Identifier of the list this one revises.
    #[must_use]
    pub fn parent_record_list_identifier(&self) -> Option<&str> {
        self.parent_record_list_identifier.as_deref()
    }
}

impl fmt::Display for RecordList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.identifier {
            Some(identifier) => write!(f, "'{}' ({identifier})", self.name),
            None => write!(f, "'{}' (unsaved)", self.name),
        }
    }
}

/// Input for creating a record list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecordList {
    name: String,
    description: Option<String>,
    notes: Option<String>,
    items: Vec<RecordListItem>,
}

impl NewRecordList {
    /// Starts describing a list with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            notes: None,
            items: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Sets the initial items.
    #[must_use]
    pub fn with_items(mut self, items: impl IntoIterator<Item = RecordListItem>) -> Self {
        self.items = items.into_iter().collect();
        self
    }

    /// Name of the list to create.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Initial items.
    #[must_use]
    pub fn items(&self) -> &[RecordListItem] {
        &self.items
    }

    /// Request body for the create endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyName`] for a blank name, or
    /// [`DomainError::MissingTableGuid`] for an item without a table GUID.
    pub fn to_dto(&self) -> DomainResult<CreateRecordListDto> {
        if self.name.trim().is_empty() {
            return Err(DomainError::EmptyName);
        }
        let items = if self.items.is_empty() {
            None
        } else {
            Some(CreateRecordListItemsInfoDto {
                items: self
                    .items
                    .iter()
                    .map(RecordListItem::to_create_dto)
                    .collect::<DomainResult<_>>()?,
            })
        };
        Ok(CreateRecordListDto {
            name: self.name.clone(),
            description: self.description.clone(),
            notes: self.notes.clone(),
            items,
        })
    }
}

/// Changes to apply to a record list's properties.
///
/// Properties that are not mentioned are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListUpdate {
    name: Option<String>,
    description: Option<Option<String>>,
    notes: Option<Option<String>>,
}

impl ListUpdate {
    /// An update that changes nothing yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renames the list.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    /// Removes the description.
    #[must_use]
    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    /// Replaces the notes.
    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(Some(notes.into()));
        self
    }

    /// Removes the notes.
    #[must_use]
    pub fn clear_notes(mut self) -> Self {
        self.notes = Some(None);
        self
    }

    /// Whether the update mentions no property.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.notes.is_none()
    }

    /// Request body for the update endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyUpdate`] if nothing would change, or
    /// [`DomainError::EmptyName`] if the new name is blank.
    pub fn to_dto(&self) -> DomainResult<UpdateRecordListPropertiesDto> {
        if self.is_empty() {
            return Err(DomainError::EmptyUpdate);
        }
        if self.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(DomainError::EmptyName);
        }
        Ok(UpdateRecordListPropertiesDto {
            name: self.name.clone(),
            description: self.description.clone(),
            notes: self.notes.clone(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::dto::UserOrGroupDto;
    use pretty_assertions::assert_eq;

    fn header() -> RecordListHeaderDto {
        RecordListHeaderDto {
            identifier: "889dcaef-1ef4-4b92-8ff9-46f08d936f39".to_string(),
            name: "UnitTestList".to_string(),
            description: Some("TestDescription".to_string()),
            notes: None,
            created_timestamp: Utc::now(),
            created_user: UserOrGroupDto {
                identifier: Some("7134b26c".to_string()),
                display_name: None,
                name: None,
            },
            last_modified_timestamp: None,
            last_modified_user: None,
            published_timestamp: None,
            published_user: None,
            is_revision: true,
            published: false,
            awaiting_approval: true,
            internal_use: false,
            parent_record_list_identifier: Some("5ca1d3f6-9afd-427c-ad09-03e2b71bfd75".to_string()),
        }
    }

    #[test]
    fn test_from_dto_maps_fields() {
        let list = RecordList::from_dto(header());

        assert_eq!(list.identifier(), Some("889dcaef-1ef4-4b92-8ff9-46f08d936f39"));
        assert_eq!(list.name(), "UnitTestList");
        assert_eq!(list.description(), Some("TestDescription"));
        assert_eq!(list.notes(), None);
        assert!(list.is_revision());
        assert!(list.awaiting_approval());
        assert!(!list.published());
        assert_eq!(list.published_user(), None);
        assert_eq!(
            list.parent_record_list_identifier(),
            Some("5ca1d3f6-9afd-427c-ad09-03e2b71bfd75")
        );
        assert_eq!(list.created_user().and_then(UserOrGroup::identifier), Some("7134b26c"));
    }

    #[test]
    fn test_unsaved_list_has_no_identifier() {
        let list = RecordList::unsaved("Draft");
        assert_eq!(
            list.require_identifier(),
            Err(DomainError::MissingIdentifier("Draft".to_string()))
        );
        assert_eq!(list.to_string(), "'Draft' (unsaved)");
    }

    #[test]
    fn test_new_list_rejects_blank_name() {
        assert_eq!(NewRecordList::new("  ").to_dto(), Err(DomainError::EmptyName));
    }

    #[test]
    fn test_new_list_without_items_omits_items() {
        let dto = NewRecordList::new("Test List A")
            .with_notes("notes")
            .to_dto()
            .unwrap();
        assert_eq!(dto.items, None);
        assert_eq!(dto.notes.as_deref(), Some("notes"));
        assert_eq!(dto.description, None);
    }

    #[test]
    fn test_update_requires_a_property() {
        assert_eq!(ListUpdate::new().to_dto(), Err(DomainError::EmptyUpdate));
        assert_eq!(ListUpdate::new().name("").to_dto(), Err(DomainError::EmptyName));
    }

    #[test]
    fn test_update_clears_nullable_properties() {
        let dto = ListUpdate::new().clear_description().notes("n").to_dto().unwrap();
        assert_eq!(dto.name, None);
        assert_eq!(dto.description, Some(None));
        assert_eq!(dto.notes, Some(Some("n".to_string())));
    }
}
