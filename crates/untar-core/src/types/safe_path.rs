//! Validated relative path type for archive entries.

use std::path::Path;

use crate::error::PathError;
use crate::security::PathSyntax;

/// An archive entry name that has been validated as a safe relative path.
///
/// `SafePath` holds a path that:
/// - is not empty
/// - is not absolute
/// - does not climb above its root once `..` components are resolved
/// - carries no volume qualifier (drive letter, UNC share, leading separator
///   on Windows)
///
/// The stored text keeps the original structure of the entry name with only
/// its separators converted to the native one. Lexical cleaning is used to
/// detect traversal, never to rewrite what gets reported.
///
/// # Security Properties
///
/// - Can ONLY be constructed through validation
/// - NO `From<String>` implementation
///
/// # Examples
///
/// ```
/// use untar_core::PathError;
/// use untar_core::types::SafePath;
///
/// let safe = SafePath::validate("foo/bar.txt").unwrap();
/// assert!(safe.as_path().ends_with("bar.txt"));
///
/// assert_eq!(
///     SafePath::validate("../etc/passwd"),
///     Err(PathError::ParentTraversal)
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SafePath(String);

impl SafePath {
    /// Validates an entry name against the host path syntax.
    ///
    /// # Errors
    ///
    /// Returns the [`PathError`] describing why the name is unsafe.
    pub fn validate(name: &str) -> Result<Self, PathError> {
        Self::validate_with(name, PathSyntax::HOST)
    }

    /// Validates an entry name against the given path syntax.
    ///
    /// Archives conventionally use `/` regardless of the platform that
    /// produced them. When the native separator differs from `/` and appears
    /// in the name, the name is checked as a native path and returned as is.
    /// Otherwise it is checked with slash rules and converted to native
    /// separators, after which it must not start with a volume name (which
    /// catches `C:foo`).
    ///
    /// # Errors
    ///
    /// - [`PathError::EmptyPath`] for an empty name
    /// - [`PathError::AbsolutePath`] for absolute names
    /// - [`PathError::ParentTraversal`] for names resolving above the root
    /// - [`PathError::VolumeRelativePath`] for names relative to a volume
    pub fn validate_with(name: &str, syntax: PathSyntax) -> Result<Self, PathError> {
        if name.is_empty() {
            return Err(PathError::EmptyPath);
        }

        let sep = syntax.separator();
        if sep != '/' && name.contains(sep) {
            let cleaned = syntax.clean(name);
            if syntax.is_absolute(&cleaned) {
                return Err(PathError::AbsolutePath);
            }
            if syntax.is_parent_ref(&cleaned) {
                return Err(PathError::ParentTraversal);
            }
            // "\windows" is relative to the current drive and "C:" to the
            // current directory of drive C.
            if name.starts_with(sep) || syntax.volume_name_len(&cleaned) != 0 {
                return Err(PathError::VolumeRelativePath);
            }
            return Ok(Self(name.to_owned()));
        }

        let cleaned = PathSyntax::UNIX.clean(name);
        if PathSyntax::UNIX.is_absolute(&cleaned) {
            return Err(PathError::AbsolutePath);
        }
        if PathSyntax::UNIX.is_parent_ref(&cleaned) {
            return Err(PathError::ParentTraversal);
        }
        let native = syntax.from_slash(name);
        if syntax.volume_name_len(&native) != 0 {
            return Err(PathError::VolumeRelativePath);
        }
        Ok(Self(native))
    }

    /// Validates a raw entry name given as bytes.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InvalidEncoding`] if the bytes are not UTF-8,
    /// otherwise whatever [`SafePath::validate_with`] returns.
    pub fn validate_bytes(name: &[u8], syntax: PathSyntax) -> Result<Self, PathError> {
        let name = std::str::from_utf8(name).map_err(|_| PathError::InvalidEncoding)?;
        Self::validate_with(name, syntax)
    }

    /// Returns the path as a string with native separators.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the path as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }

    /// Converts into the inner `String`.
    #[inline]
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<Path> for SafePath {
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}
