//! Audit log bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lists::UserOrGroupDto;
use crate::audit::AuditLogAction;

/// Paging window of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagingOptionsDto {
    /// Maximum number of entries in the page.
    pub page_size: u32,
    /// Zero-based index of the first entry.
    pub start_index: u32,
}

/// Request body starting an audit log search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogSearchRequestDto {
    /// Only entries for these lists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_identifiers: Option<Vec<String>>,
    /// Only entries with these actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_actions_to_include: Option<Vec<AuditLogAction>>,
    /// Page to return; absent for an unpaged search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging_options: Option<PagingOptionsDto>,
}

/// A single audit log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogItemDto {
    /// List the action applied to.
    pub list_identifier: String,
    /// User who performed the action.
    pub initiating_user: UserOrGroupDto,
    /// What happened.
    pub action: AuditLogAction,
    /// When it happened.
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_from_server_json() {
        let body = r#"[{"listIdentifier":"f235a25c-4deb-45cf-b6fd-c4fbaca3cbd0","initiatingUser":{"identifier":"7134b26c-42df-4e86-b801-317f05b8c399","displayName":"DOMAIN\\mi_user","name":"DOMAIN\\mi_user"},"action":"ListSetToAwaitingApprovalForWithdrawal","timestamp":"2025-01-08T11:15:18.1168375+00:00"},{"listIdentifier":"f235a25c-4deb-45cf-b6fd-c4fbaca3cbd0","initiatingUser":{"identifier":"7134b26c-42df-4e86-b801-317f05b8c399","displayName":"DOMAIN\\mi_user","name":"DOMAIN\\mi_user"},"action":"ListCreated","timestamp":"2025-01-08T11:15:17.8512115+00:00"}]"#;

        let entries: Vec<AuditLogItemDto> = serde_json::from_str(body).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[0].action,
            AuditLogAction::ListSetToAwaitingApprovalForWithdrawal
        );
        assert_eq!(entries[1].action, AuditLogAction::ListCreated);
    }

    #[test]
    fn test_unpaged_request_omits_paging_options() {
        let body = AuditLogSearchRequestDto::default();
        assert_eq!(serde_json::to_string(&body).unwrap(), "{}");
    }
}
