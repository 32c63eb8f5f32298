//! Argument checks shared by every store.

use crate::error::{ServiceError, ServiceResult};

/// Reject ids that cannot name a row.
///
/// # Errors
///
/// Returns `ServiceError::InvalidArgument` if `id` is zero or negative.
pub fn id<I>(what: &str, id: I) -> ServiceResult<()>
where
    I: Into<i32>,
{
    let raw = id.into();
    if raw <= 0 {
        return Err(ServiceError::InvalidArgument(format!(
            "{what} must be greater than zero (got {raw})"
        )));
    }
    Ok(())
}

/// Reject blank required text.
///
/// # Errors
///
/// Returns `ServiceError::InvalidArgument` if `value` is empty or whitespace.
pub fn required(what: &str, value: &str) -> ServiceResult<()> {
    if value.trim().is_empty() {
        return Err(ServiceError::InvalidArgument(format!("{what} is required")));
    }
    Ok(())
}

/// Reject text longer than `max` characters.
///
/// # Errors
///
/// Returns `ServiceError::InvalidArgument` if `value` is too long.
pub fn max_chars(what: &str, value: &str, max: usize) -> ServiceResult<()> {
    let len = value.chars().count();
    if len > max {
        return Err(ServiceError::InvalidArgument(format!(
            "{what} must be at most {max} characters (got {len})"
        )));
    }
    Ok(())
}
