//! GUID validation utilities.

use uuid::Uuid;

use crate::error::{DomainError, DomainResult};

/// Validates a GUID and returns it in canonical form.
///
/// The canonical form is the lowercase hyphenated representation, so two
/// spellings of the same GUID compare equal after sanitizing.
///
/// # Errors
///
/// Returns [`DomainError::InvalidGuid`] naming `field` if `value` is not a UUID.
pub fn sanitize_guid(field: &str, value: &str) -> DomainResult<String> {
    Uuid::parse_str(value.trim())
        .map(|guid| guid.hyphenated().to_string())
        .map_err(|_| DomainError::invalid_guid(field, value))
}

/// Validates every GUID in `values`, preserving order.
///
/// # Errors
///
/// Returns the error for the first invalid value.
pub fn sanitize_guids<I, S>(field: &str, values: I) -> DomainResult<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|value| sanitize_guid(field, value.as_ref()))
        .collect()
}

/// Canonical form of a GUID received from the server.
///
/// Server data is trusted: values that fail to parse are kept verbatim
/// rather than rejected.
#[must_use]
pub fn normalize_guid(value: &str) -> String {
    Uuid::parse_str(value).map_or_else(|_| value.to_string(), |guid| guid.hyphenated().to_string())
}
