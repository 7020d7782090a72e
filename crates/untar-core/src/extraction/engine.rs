//! Core extraction engine.

use std::fs::OpenOptions;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use filetime::FileTime;
use log::debug;
use log::trace;

use crate::ExtractOptions;
use crate::ExtractionError;
use crate::Result;
use crate::copy::CopyError;
use crate::copy::copy_with_buffer;
use crate::error::PathError;
use crate::extraction::context::RunContext;
use crate::formats::EntryMeta;
use crate::formats::TarGzArchive;
use crate::security::implied_dir_permissions;
use crate::security::is_executable;
use crate::security::sanitize_permissions;
use crate::types::EntryKind;
use crate::types::SafePath;

/// Extracts gzip-compressed tar streams into a directory.
///
/// Entries are processed strictly in stream order. The first error aborts
/// the run; anything written before it stays on disk.
///
/// # Examples
///
/// ```no_run
/// use untar_core::ExtractOptions;
/// use untar_core::Extractor;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let archive = std::fs::File::open("go1.22.src.tar.gz")?;
/// let extractor = Extractor::new(ExtractOptions::new().with_archive_root("go"));
/// extractor.run(archive, "/opt/go")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    options: ExtractOptions,
}

impl Extractor {
    /// Creates an extractor with the given options.
    #[must_use]
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Returns the options of this extractor.
    #[must_use]
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extracts every entry of `reader` into `dest`.
    ///
    /// `dest` is created as needed. The stream is read to the end of the tar
    /// archive.
    ///
    /// # Errors
    ///
    /// - [`ExtractionError::InvalidCompression`] if `reader` is not gzip
    /// - [`ExtractionError::ArchiveRead`] if the tar stream is corrupt
    /// - [`ExtractionError::InvalidEntryName`] for unsafe entry names
    /// - [`ExtractionError::SizeMismatch`] for short payloads
    /// - [`ExtractionError::Create`] / [`ExtractionError::Write`] for
    ///   filesystem failures
    /// - [`ExtractionError::UnsupportedEntryType`] for hard links, devices
    ///   and other special entries
    pub fn run<R: Read>(&self, reader: R, dest: impl AsRef<Path>) -> Result<()> {
        let dest = dest.as_ref();
        let mut ctx = RunContext::start();
        let mut archive = TarGzArchive::open(reader)?;

        for entry in archive.entries()? {
            let mut entry = entry.map_err(ExtractionError::ArchiveRead)?;
            self.extract_entry(&mut entry, dest, &mut ctx)?;
        }

        debug!(
            "extracted {} files into {} in {:?}",
            ctx.files_written(),
            dest.display(),
            ctx.elapsed()
        );
        Ok(())
    }

    fn extract_entry<R: Read>(
        &self,
        entry: &mut tar::Entry<'_, R>,
        dest: &Path,
        ctx: &mut RunContext,
    ) -> Result<()> {
        let meta = EntryMeta::read(entry)?;

        // git archive emits a global header that may carry an empty name.
        if meta.kind == EntryKind::GlobalHeader {
            trace!("skipping global extended header");
            return Ok(());
        }

        let invalid_name = |source| ExtractionError::InvalidEntryName {
            name: meta.display_name(),
            source,
        };
        let rel = SafePath::validate_bytes(&meta.name, self.options.path_syntax)
            .map_err(invalid_name)?;
        let Some(target) = self.target_path(&rel, dest).map_err(invalid_name)? else {
            trace!("skipping archive root {}", rel.as_str());
            return Ok(());
        };

        match meta.kind {
            EntryKind::File => self.write_file(entry, &meta, &target, ctx),
            EntryKind::Directory => {
                trace!("creating directory {}", target.display());
                ctx.dirs.create(&target, sanitize_permissions(meta.mode))
            }
            EntryKind::Symlink => {
                debug!("skipping symlink {}", rel.as_str());
                Ok(())
            }
            EntryKind::GlobalHeader => Ok(()),
            EntryKind::Other(_) => Err(ExtractionError::UnsupportedEntryType {
                name: meta.display_name(),
                kind: meta.kind,
                mode: meta.mode,
            }),
        }
    }

    /// Maps a validated entry path to its location under `dest`.
    ///
    /// Returns `None` for the archive root itself.
    fn target_path(
        &self,
        rel: &SafePath,
        dest: &Path,
    ) -> std::result::Result<Option<PathBuf>, PathError> {
        let syntax = self.options.path_syntax;
        let root = self.options.archive_root.as_str();

        if syntax.clean(rel.as_str()) == syntax.clean(root) {
            return Ok(None);
        }

        let stripped = rel.as_str().strip_prefix(root).unwrap_or(rel.as_str());
        let cleaned = syntax.clean(stripped.trim_start_matches(|c| syntax.is_separator(c)));

        // Stripping a prefix that ends mid-component ("x" from "x../y") can
        // expose a traversal the full name did not have.
        if syntax.is_parent_ref(&cleaned) {
            return Err(PathError::ParentTraversal);
        }
        if syntax.volume_name_len(&cleaned) != 0 {
            return Err(PathError::VolumeRelativePath);
        }

        if cleaned == "." {
            Ok(Some(dest.to_path_buf()))
        } else {
            Ok(Some(dest.join(cleaned)))
        }
    }

    fn write_file<R: Read>(
        &self,
        entry: &mut R,
        meta: &EntryMeta,
        target: &Path,
        ctx: &mut RunContext,
    ) -> Result<()> {
        trace!("writing {} ({} bytes)", target.display(), meta.size);
        let write_err = |source| ExtractionError::Write {
            path: target.to_path_buf(),
            source,
        };

        if let Some(parent) = target.parent() {
            ctx.dirs
                .ensure_dir(parent, implied_dir_permissions(meta.mode))?;
        }

        // Overwriting in place would keep a stale code signature cached
        // for the inode.
        if self.options.replace_executables && is_executable(meta.mode) {
            match std::fs::remove_file(target) {
                Err(e) if e.kind() != std::io::ErrorKind::NotFound => return Err(write_err(e)),
                _ => {}
            }
        }

        let perm = sanitize_permissions(meta.mode);
        let mut options = OpenOptions::new();
        options.read(true).write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(perm);
        }

        let mut file = options
            .open(target)
            .map_err(|source| ExtractionError::Create {
                path: target.to_path_buf(),
                source,
            })?;

        let written = copy_with_buffer(entry, &mut file, &mut ctx.buffer).map_err(|e| match e {
            CopyError::Read(e) => ExtractionError::ArchiveRead(e),
            CopyError::Write(e) => write_err(e),
        })?;
        if written != meta.size {
            return Err(ExtractionError::SizeMismatch {
                path: target.to_path_buf(),
                written,
                expected: meta.size,
            });
        }

        // An existing file keeps its old mode through `open`.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(perm))
                .map_err(write_err)?;
        }
        #[cfg(not(unix))]
        let _ = perm;
        drop(file);

        if let Some(secs) = meta.mtime {
            let mtime = FileTime::from_system_time(ctx.clamp_mtime(secs));
            if let Err(err) = filetime::set_file_times(target, mtime, mtime) {
                ctx.mtime_failed(target, &err);
            }
        }

        ctx.file_written();
        Ok(())
    }
}
