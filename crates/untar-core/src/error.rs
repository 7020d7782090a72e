//! Error types for archive extraction operations.

use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

use crate::types::EntryKind;

/// Result type alias using `ExtractionError`.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Reasons an archive entry name is rejected by path validation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathError {
    /// The entry has no name.
    #[error("path not provided")]
    EmptyPath,

    /// The name resolves to an absolute path.
    #[error("path is not relative")]
    AbsolutePath,

    /// The name climbs above the extraction root.
    #[error("path refers to a parent directory")]
    ParentTraversal,

    /// The name is relative to a volume (drive letter, UNC share or the
    /// root of the current drive) rather than to the extraction root.
    #[error("path is relative to a volume")]
    VolumeRelativePath,

    /// The name is not valid UTF-8.
    #[error("path is not valid UTF-8")]
    InvalidEncoding,
}

/// Errors that can occur during archive extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The input is not a gzip stream.
    #[error("invalid gzip stream: {0}")]
    InvalidCompression(#[source] std::io::Error),

    /// The tar container is corrupt or truncated.
    #[error("tar error: {0}")]
    ArchiveRead(#[source] std::io::Error),

    /// An entry name failed path validation.
    #[error("tar file contained invalid name {name:?}: {source}")]
    InvalidEntryName {
        /// The raw entry name as stored in the archive.
        name: String,
        /// Why the name was rejected.
        #[source]
        source: PathError,
    },

    /// A regular file received a different number of bytes than its header
    /// declared.
    #[error("only wrote {written} bytes to {}; expected {expected}", path.display())]
    SizeMismatch {
        /// The file that was written.
        path: PathBuf,
        /// Bytes actually written.
        written: u64,
        /// Size declared by the entry header.
        expected: u64,
    },

    /// Writing a file (or replacing, or updating its permissions) failed.
    #[error("error writing to {}: {source}", path.display())]
    Write {
        /// The file being written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Creating a file or directory failed.
    #[error("error creating {}: {source}", path.display())]
    Create {
        /// The path being created.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The entry is neither a regular file, a directory nor a symlink.
    #[error("tar file entry {name} contained unsupported file type {kind} (mode {mode:#o})")]
    UnsupportedEntryType {
        /// The raw entry name.
        name: String,
        /// The entry kind reported by the header.
        kind: EntryKind,
        /// The mode bits reported by the header.
        mode: u32,
    },

    /// The archive file could not be opened.
    #[error("failed to open archive {}: {source}", path.display())]
    Open {
        /// The archive path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ExtractionError {
    /// Returns `true` if this error represents a rejected, potentially
    /// malicious entry name.
    ///
    /// # Examples
    ///
    /// ```
    /// use untar_core::ExtractionError;
    /// use untar_core::PathError;
    ///
    /// let err = ExtractionError::InvalidEntryName {
    ///     name: "../etc/passwd".into(),
    ///     source: PathError::ParentTraversal,
    /// };
    /// assert!(err.is_security_violation());
    /// ```
    #[must_use]
    pub const fn is_security_violation(&self) -> bool {
        matches!(self, Self::InvalidEntryName { .. })
    }

    /// Returns the path validation failure, if this is a rejected name.
    #[must_use]
    pub const fn path_error(&self) -> Option<PathError> {
        match self {
            Self::InvalidEntryName { source, .. } => Some(*source),
            _ => None,
        }
    }

    /// Returns the filesystem path the error refers to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::SizeMismatch { path, .. }
            | Self::Write { path, .. }
            | Self::Create { path, .. }
            | Self::Open { path, .. } => Some(path),
            _ => None,
        }
    }
}
