//! High-level public API for archive extraction.

use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;

use crate::ExtractOptions;
use crate::ExtractionError;
use crate::Extractor;
use crate::Result;

/// Extracts a gzip-compressed tar stream into `dest`.
///
/// Entries under `archive_root` are written relative to `dest` with the
/// prefix removed, and the `archive_root` entry itself is skipped. Pass an
/// empty string to keep every path as it is. All other options use host
/// defaults.
///
/// # Errors
///
/// Returns the first error encountered; see [`Extractor::run`].
///
/// # Examples
///
/// ```no_run
/// use untar_core::untar;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let stream = std::io::stdin().lock();
/// untar(stream, "/tmp/output", "release-1.0/")?;
/// # Ok(())
/// # }
/// ```
pub fn untar<R: Read>(reader: R, dest: impl AsRef<Path>, archive_root: &str) -> Result<()> {
    Extractor::new(ExtractOptions::new().with_archive_root(archive_root)).run(reader, dest)
}

/// Extracts a `.tar.gz` file into `dest`.
///
/// # Errors
///
/// Returns [`ExtractionError::Open`] if the archive cannot be opened,
/// otherwise the first error of the run; see [`Extractor::run`].
///
/// # Examples
///
/// ```no_run
/// use untar_core::ExtractOptions;
/// use untar_core::extract_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// extract_archive("archive.tar.gz", "/tmp/output", &ExtractOptions::default())?;
/// # Ok(())
/// # }
/// ```
pub fn extract_archive<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    dest: Q,
    options: &ExtractOptions,
) -> Result<()> {
    let archive_path = archive_path.as_ref();
    let file = File::open(archive_path).map_err(|source| ExtractionError::Open {
        path: archive_path.to_path_buf(),
        source,
    })?;

    Extractor::new(options.clone()).run(BufReader::new(file), dest)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::test_utils::TarTestBuilder;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_untar_strips_root() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let data = TarTestBuilder::new()
            .add_directory("pkg/")
            .add_file("pkg/lib/mod.txt", b"module")
            .build_gz();

        untar(data.as_slice(), temp.path(), "pkg").unwrap();

        assert_eq!(
            fs::read(temp.path().join("lib").join("mod.txt")).unwrap(),
            b"module"
        );
        assert!(!temp.path().join("pkg").exists());
    }

    #[test]
    fn test_extract_archive_from_file() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let archive = temp.path().join("bundle.tar.gz");
        fs::write(
            &archive,
            TarTestBuilder::new().add_file("hello.txt", b"hi").build_gz(),
        )
        .unwrap();
        let out = temp.path().join("out");

        extract_archive(&archive, &out, &ExtractOptions::default()).unwrap();
        assert_eq!(fs::read(out.join("hello.txt")).unwrap(), b"hi");
    }

    #[test]
    fn test_extract_archive_missing_file() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let missing = temp.path().join("missing.tar.gz");

        let err = extract_archive(&missing, temp.path(), &ExtractOptions::default()).unwrap_err();
        assert!(matches!(err, ExtractionError::Open { ref path, .. } if path == &missing));
    }
}
