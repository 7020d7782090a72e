//! Directory creation memoized for one extraction run.

use std::collections::HashSet;
use std::fs::DirBuilder;
use std::path::Path;
use std::path::PathBuf;

use crate::ExtractionError;
use crate::Result;

/// Set of directories already created during the current run.
///
/// Creating a directory that exists is harmless, so the cache only saves
/// repeated `mkdir` calls when many files share a parent.
#[derive(Debug, Default)]
pub struct DirCache {
    created: HashSet<PathBuf>,
}

impl DirCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `path` was created or recorded during this run.
    #[inline]
    pub fn contains(&self, path: &Path) -> bool {
        self.created.contains(path)
    }

    /// Returns the number of recorded directories.
    #[inline]
    pub fn len(&self) -> usize {
        self.created.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.created.is_empty()
    }

    /// Creates `path` and its missing ancestors unless it was already
    /// recorded, then records it.
    pub fn ensure_dir(&mut self, path: &Path, mode: u32) -> Result<()> {
        if self.contains(path) {
            return Ok(());
        }
        self.create(path, mode)
    }

    /// Creates `path` and its missing ancestors, then records it.
    ///
    /// Existing directories are left untouched, including their permissions.
    pub fn create(&mut self, path: &Path, mode: u32) -> Result<()> {
        create_dir_all(path, mode).map_err(|source| ExtractionError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        self.created.insert(path.to_path_buf());
        Ok(())
    }
}

/// Recursive `mkdir` applying `mode` (before umask) to every directory it
/// creates. `mode` is ignored on non-Unix platforms.
fn create_dir_all(path: &Path, mode: u32) -> std::io::Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    builder.create(path)
}
