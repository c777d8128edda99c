//! Outcome of checking whether items reference accessible records.

use std::fmt;

use crate::item::RecordListItem;

/// Why an item could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnresolvableReason {
    /// No database on the server has the item's database GUID.
    DatabaseNotFound,
    /// The record history does not exist in any matching database.
    RecordNotFound,
    /// The record exists but the requested version is not visible.
    VersionNotFound,
    /// The caller may not read the record.
    AccessDenied,
    /// The server failed in some other way.
    Failed {
        /// Error reported by the transport.
        message: String,
    },
}

impl UnresolvableReason {
    /// Rank used when several databases share a GUID: the highest rank wins.
    pub(crate) const fn precedence(&self) -> u8 {
        match self {
            Self::DatabaseNotFound => 0,
            Self::RecordNotFound => 1,
            Self::VersionNotFound => 2,
            Self::AccessDenied => 3,
            Self::Failed { .. } => 4,
        }
    }

    /// Keeps whichever of `self` and `other` takes precedence.
    #[must_use]
    pub fn strongest(self, other: Self) -> Self {
        if other.precedence() > self.precedence() {
            other
        } else {
            self
        }
    }
}

impl fmt::Display for UnresolvableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DatabaseNotFound => f.write_str("database not found"),
            Self::RecordNotFound => f.write_str("record not found"),
            Self::VersionNotFound => f.write_str("record version not found"),
            Self::AccessDenied => f.write_str("access denied"),
            Self::Failed { message } => write!(f, "request failed: {message}"),
        }
    }
}

/// An item that could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvableItem {
    /// The item.
    pub item: RecordListItem,
    /// Why it could not be resolved.
    pub reason: UnresolvableReason,
}

/// Items partitioned by resolvability, each side in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemResolution {
    /// Items referencing accessible records.
    pub resolvable: Vec<RecordListItem>,
    /// Items that could not be resolved, with the reason.
    pub unresolvable: Vec<UnresolvableItem>,
}

impl ItemResolution {
    /// Whether every item resolved.
    #[must_use]
    pub fn is_fully_resolvable(&self) -> bool {
        self.unresolvable.is_empty()
    }
}
