//! Domain error types

use thiserror::Error;

use crate::criteria::BooleanOperator;

/// Validation errors raised before any request reaches the server.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A GUID field does not hold a valid UUID string.
    #[error("Invalid {field}. Value '{value}' is not a valid UUID string.")]
    InvalidGuid {
        /// Name of the offending field.
        field: String,
        /// The rejected value.
        value: String,
    },

    /// The record list has no server-assigned identifier.
    #[error("record list '{0}' has no identifier; it must be created on the server first")]
    MissingIdentifier(String),

    /// An identifier argument was empty.
    #[error("identifier must not be empty")]
    EmptyIdentifier,

    /// A record list name was empty or blank.
    #[error("record list name must not be empty")]
    EmptyName,

    /// An update did not name any property to change.
    #[error(
        "update must include at least one property to update; \
         supported properties are 'name', 'description', and 'notes'"
    )]
    EmptyUpdate,

    /// An item is missing the table GUID required to add it to a list.
    #[error("table_guid must be provided to add item {0} to a list")]
    MissingTableGuid(String),

    /// A boolean combinator was given no children.
    #[error("{0} criterion requires at least one child criterion")]
    EmptyCombinator(BooleanOperator),

    /// A page size of zero was requested.
    #[error("page size must be greater than zero")]
    InvalidPageSize,
}

impl DomainError {
    /// Creates an [`DomainError::InvalidGuid`] for the given field and value.
    #[must_use]
    pub fn invalid_guid(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidGuid {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_guid_message() {
        let error = DomainError::invalid_guid("'database_guid'", "invalid-uuid");
        assert_eq!(
            error.to_string(),
            "Invalid 'database_guid'. Value 'invalid-uuid' is not a valid UUID string."
        );
    }

    #[test]
    fn test_empty_combinator_names_operator() {
        let error = DomainError::EmptyCombinator(BooleanOperator::MatchAny);
        assert!(error.to_string().starts_with("match-any"));
    }
}
