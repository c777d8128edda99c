//! Users and groups.

use std::fmt;

use crate::dto::UserOrGroupDto;

/// A Granta MI user or group. Read-only.
///
/// Two values are equal when their identifiers are equal; names are for display only.
#[derive(Debug, Clone, Default, Eq)]
pub struct UserOrGroup {
    identifier: Option<String>,
    display_name: Option<String>,
    name: Option<String>,
}

impl UserOrGroup {
    /// Builds a user from its server representation.
    #[must_use]
    pub fn from_dto(dto: UserOrGroupDto) -> Self {
        Self {
            identifier: dto.identifier,
            display_name: dto.display_name,
            name: dto.name,
        }
    }

    /// Identifier of the user or group.
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// Display name of the user or group.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Account name of the user or group.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl PartialEq for UserOrGroup {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
    }
}

impl fmt::Display for UserOrGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = self
            .display_name
            .as_deref()
            .or(self.name.as_deref())
            .or(self.identifier.as_deref())
            .unwrap_or("<unknown>");
        f.write_str(label)
    }
}
