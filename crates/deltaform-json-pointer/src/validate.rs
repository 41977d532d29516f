//! Validation for JSON Pointer strings and parsed paths.

use thiserror::Error;

/// Maximum allowed pointer string length.
const MAX_POINTER_LENGTH: usize = 1024;

/// Maximum allowed path depth.
const MAX_PATH_LENGTH: usize = 256;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("POINTER_INVALID")]
    PointerInvalid,
    #[error("POINTER_TOO_LONG")]
    PointerTooLong,
    #[error("PATH_TOO_LONG")]
    PathTooLong,
}

/// Validate a JSON Pointer string.
///
/// # Errors
///
/// Returns an error if the pointer is non-empty but does not start with `/`,
/// or exceeds the maximum length (1024 characters).
///
/// # Example
///
/// ```
/// use deltaform_json_pointer::validate_json_pointer;
///
/// validate_json_pointer("").unwrap();          // root is valid
/// validate_json_pointer("/foo/bar").unwrap();  // valid absolute pointer
/// validate_json_pointer("foo").unwrap_err();   // missing leading /
/// ```
pub fn validate_json_pointer(pointer: &str) -> Result<(), ValidationError> {
    if pointer.is_empty() {
        return Ok(());
    }
    if !pointer.starts_with('/') {
        return Err(ValidationError::PointerInvalid);
    }
    if pointer.len() > MAX_POINTER_LENGTH {
        return Err(ValidationError::PointerTooLong);
    }
    Ok(())
}

/// Validate a parsed path.
///
/// # Errors
///
/// Returns an error if the path exceeds the maximum depth (256 steps).
pub fn validate_path(path: &[String]) -> Result<(), ValidationError> {
    if path.len() > MAX_PATH_LENGTH {
        return Err(ValidationError::PathTooLong);
    }
    Ok(())
}
