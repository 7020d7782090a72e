//! Entry name validation.

use crate::error::PathError;
use crate::types::SafePath;

/// Validates that an entry name is a safe relative path on this host.
///
/// This function delegates to `SafePath::validate()`, which rejects:
/// - Empty names
/// - Absolute paths
/// - Parent directory traversal that escapes the root
/// - Volume-relative paths (Windows drive letters, UNC shares, leading
///   backslash)
///
/// No filesystem access is performed.
///
/// # Errors
///
/// Returns the [`PathError`] describing the rejection.
///
/// # Examples
///
/// ```
/// use untar_core::security::validate_path;
///
/// assert!(validate_path("foo/bar.txt").is_ok());
/// assert!(validate_path("../etc/passwd").is_err());
/// assert!(validate_path("/etc/passwd").is_err());
/// ```
pub fn validate_path(name: &str) -> Result<SafePath, PathError> {
    SafePath::validate(name)
}
