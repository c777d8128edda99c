//! Audit log entries and the criterion used to search them.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dto::{AuditLogItemDto, AuditLogSearchRequestDto, PagingOptionsDto};
use crate::error::DomainResult;
use crate::guid::sanitize_guids;
use crate::user::UserOrGroup;

/// An action recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AuditLogAction {
    /// The list was created.
    ListCreated,
    /// The list was deleted.
    ListDeleted,
    /// The list was renamed.
    ListNameChanged,
    /// The description changed.
    ListDescriptionChanged,
    /// The notes changed.
    ListNotesChanged,
    /// The list was made internal.
    ListMadeInternal,
    /// The list was made non-internal.
    ListMadeNonInternal,
    /// An item was added.
    ItemAdded,
    /// An item was removed.
    ItemRemoved,
    /// The list was copied.
    ListCopied,
    /// A revision of the list was created.
    ListRevised,
    /// Approval for publication was requested.
    ListSetToAwaitingApprovalForPublishing,
    /// Approval for withdrawal was requested.
    ListSetToAwaitingApprovalForWithdrawal,
    /// An approval request was cancelled.
    ListApprovalRequestCancelled,
    /// The list was published.
    ListPublished,
    /// The list was withdrawn.
    ListUnpublished,
    /// A user subscribed.
    UserSubscribed,
    /// A user unsubscribed.
    UserUnsubscribed,
    /// An action this client does not know about.
    #[serde(other)]
    Unknown,
}

impl fmt::Display for AuditLogAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A single audit log entry. Read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditLogItem {
    list_identifier: String,
    initiating_user: UserOrGroup,
    action: AuditLogAction,
    timestamp: DateTime<Utc>,
}

impl AuditLogItem {
    /// Builds an entry from its server representation.
    #[must_use]
    pub fn from_dto(dto: AuditLogItemDto) -> Self {
        Self {
            list_identifier: dto.list_identifier,
            initiating_user: UserOrGroup::from_dto(dto.initiating_user),
            action: dto.action,
            timestamp: dto.timestamp,
        }
    }

    /// List the action applied to.
    #[must_use]
    pub fn list_identifier(&self) -> &str {
        &self.list_identifier
    }

    /// User who performed the action.
    #[must_use]
    pub const fn initiating_user(&self) -> &UserOrGroup {
        &self.initiating_user
    }

    /// What happened.
    #[must_use]
    pub const fn action(&self) -> AuditLogAction {
        self.action
    }

    /// When it happened.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Filters for an audit log search. With nothing set, every entry matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditLogSearchCriterion {
    filter_record_lists: Option<Vec<String>>,
    filter_actions: Option<BTreeSet<AuditLogAction>>,
}

impl AuditLogSearchCriterion {
    /// A criterion that matches every entry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits to entries for these lists.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::InvalidGuid`] if an identifier is malformed.
    pub fn with_record_lists<I, S>(mut self, identifiers: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.filter_record_lists = Some(sanitize_guids(
            "list identifier in 'filter_record_lists'",
            identifiers,
        )?);
        Ok(self)
    }

    /// Limits to entries with these actions.
    #[must_use]
    pub fn with_actions(mut self, actions: impl IntoIterator<Item = AuditLogAction>) -> Self {
        self.filter_actions = Some(actions.into_iter().collect());
        self
    }

    /// List identifiers to include.
    #[must_use]
    pub fn filter_record_lists(&self) -> Option<&[String]> {
        self.filter_record_lists.as_deref()
    }

    /// Actions to include.
    #[must_use]
    pub const fn filter_actions(&self) -> Option<&BTreeSet<AuditLogAction>> {
        self.filter_actions.as_ref()
    }

    /// Request body for the audit search endpoint; `paging` is `None` for an unpaged search.
    #[must_use]
    pub fn to_dto(&self, paging: Option<PagingOptionsDto>) -> AuditLogSearchRequestDto {
        AuditLogSearchRequestDto {
            list_identifiers: self.filter_record_lists.clone(),
            list_actions_to_include: self
                .filter_actions
                .as_ref()
                .map(|actions| actions.iter().copied().collect()),
            paging_options: paging,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::DomainError;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const LIST: &str = "f235a25c-4deb-45cf-b6fd-c4fbaca3cbd0";

    #[test]
    fn test_unknown_action_falls_back() {
        let action: AuditLogAction = serde_json::from_value(json!("ListTeleported")).unwrap();
        assert_eq!(action, AuditLogAction::Unknown);
    }

    #[test]
    fn test_request_body() {
        let criterion = AuditLogSearchCriterion::new()
            .with_record_lists([LIST])
            .unwrap()
            .with_actions([AuditLogAction::ItemRemoved, AuditLogAction::ItemAdded]);
        let body = criterion.to_dto(Some(PagingOptionsDto {
            page_size: 10,
            start_index: 20,
        }));

        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({
                "listIdentifiers": [LIST],
                "listActionsToInclude": ["ItemAdded", "ItemRemoved"],
                "pagingOptions": {"pageSize": 10, "startIndex": 20}
            })
        );
    }

    #[test]
    fn test_list_identifiers_are_validated() {
        assert_eq!(
            AuditLogSearchCriterion::new().with_record_lists(["nope"]),
            Err(DomainError::invalid_guid(
                "list identifier in 'filter_record_lists'",
                "nope"
            ))
        );
    }
}
