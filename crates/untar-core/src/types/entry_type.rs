//! Archive entry kind classification.

use std::fmt;

/// Kind of entry in a tar archive, as far as extraction is concerned.
///
/// Only regular files and directories are materialized. Symlinks and global
/// extended headers are recognized so they can be skipped; everything else
/// is carried as [`EntryKind::Other`] with the raw type flag.
///
/// # Examples
///
/// ```
/// use untar_core::types::EntryKind;
///
/// assert_eq!(EntryKind::classify(b'0', "file.txt"), EntryKind::File);
/// assert_eq!(EntryKind::classify(b'5', "dir/"), EntryKind::Directory);
/// assert_eq!(EntryKind::classify(b'6', "fifo"), EntryKind::Other(b'6'));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Regular file entry.
    File,

    /// Directory entry.
    Directory,

    /// Symbolic link entry. Never extracted.
    Symlink,

    /// PAX global extended header (`g`). Never extracted.
    GlobalHeader,

    /// Any other type flag: hard links, devices, fifos, sparse files and
    /// vendor extensions.
    Other(u8),
}

impl EntryKind {
    /// Classifies an entry from its raw type flag and name.
    ///
    /// Pre-POSIX archives mark directories with a NUL type flag and a
    /// trailing slash on the name; those are reported as directories.
    #[must_use]
    pub fn classify(type_flag: u8, name: &str) -> Self {
        match type_flag {
            b'\0' if name.ends_with('/') => Self::Directory,
            b'0' | b'\0' | b'7' => Self::File,
            b'5' => Self::Directory,
            b'2' => Self::Symlink,
            b'g' => Self::GlobalHeader,
            other => Self::Other(other),
        }
    }

    /// Returns `true` if this is a regular file.
    #[must_use]
    pub const fn is_file(&self) -> bool {
        matches!(self, Self::File)
    }

    /// Returns `true` if this is a directory.
    #[must_use]
    pub const fn is_directory(&self) -> bool {
        matches!(self, Self::Directory)
    }
}

impl From<tar::EntryType> for EntryKind {
    fn from(entry_type: tar::EntryType) -> Self {
        Self::classify(entry_type.as_byte(), "")
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => f.write_str("regular file"),
            Self::Directory => f.write_str("directory"),
            Self::Symlink => f.write_str("symlink"),
            Self::GlobalHeader => f.write_str("global extended header"),
            Self::Other(flag) => {
                let name = match flag {
                    b'1' => "hard link",
                    b'3' => "character device",
                    b'4' => "block device",
                    b'6' => "fifo",
                    b'S' => "sparse file",
                    _ => "unknown",
                };
                write!(f, "{name} ({:?})", char::from(*flag))
            }
        }
    }
}
