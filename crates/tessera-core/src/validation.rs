//! Argument validation helpers
//!
//! Services call these before touching the authorizer or the store so that a
//! malformed request never has side effects. Argument names are dotted paths
//! (`creator.access_info_id`) so the caller can tell which field was rejected.

use crate::{Identifier, Result, TesseraError};

/// Require an optional value to be present
pub fn not_null<'a, T>(value: &'a Option<T>, argument: &str) -> Result<&'a T> {
    value
        .as_ref()
        .ok_or_else(|| TesseraError::null_argument(argument))
}

/// Require an identifier to be non-nil
pub fn not_nil<I: Identifier>(id: I, argument: &str) -> Result<I> {
    if id.is_nil() {
        return Err(TesseraError::null_argument(argument));
    }
    Ok(id)
}

/// Require an optional identifier to be present and non-nil
pub fn required_id<I: Identifier>(id: &Option<I>, argument: &str) -> Result<I> {
    not_nil(*not_null(id, argument)?, argument)
}

/// Require a string to contain something other than whitespace
pub fn not_empty<'a>(value: &'a str, argument: &str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(TesseraError::illegal_argument(argument, "<empty>"));
    }
    Ok(value)
}
