//! Error conversion utilities for CLI.
//!
//! Converts untar-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use std::path::Path;
use untar_core::ExtractionError;

/// Converts `ExtractionError` to user-friendly anyhow error with context
pub fn convert_extraction_error(err: ExtractionError, archive: &Path) -> anyhow::Error {
    match err {
        ExtractionError::InvalidEntryName { name, source } => {
            anyhow!(
                "Security violation: Archive '{}' contains unsafe entry name {:?} ({})\n\
                 HINT: This archive may be malicious. Do not extract from untrusted sources.",
                archive.display(),
                name,
                source
            )
        }
        ExtractionError::InvalidCompression(io_err) => {
            anyhow!(
                "Archive '{}' is not gzip-compressed: {}\n\
                 HINT: Only .tar.gz archives are supported.",
                archive.display(),
                io_err
            )
        }
        ExtractionError::UnsupportedEntryType { name, kind, .. } => {
            anyhow!(
                "Archive '{}' contains unsupported entry '{}' ({})\n\
                 HINT: Only regular files and directories are extracted.",
                archive.display(),
                name,
                kind
            )
        }
        ExtractionError::ArchiveRead(io_err) => {
            anyhow!(
                "Invalid archive '{}': {}\n\
                 HINT: The archive may be corrupted or truncated.",
                archive.display(),
                io_err
            )
        }
        ExtractionError::SizeMismatch { .. } => anyhow::Error::from(err)
            .context(format!(
                "Archive '{}' ended before an entry was complete",
                archive.display()
            )),
        _ => anyhow::Error::from(err)
            .context(format!("Error processing archive '{}'", archive.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;
    use untar_core::EntryKind;
    use untar_core::PathError;

    #[test]
    fn test_convert_invalid_name_error() {
        let err = ExtractionError::InvalidEntryName {
            name: "../../../etc/passwd".into(),
            source: PathError::ParentTraversal,
        };
        let converted = convert_extraction_error(err, Path::new("malicious.tar.gz"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("Security violation"));
        assert!(msg.contains("malicious.tar.gz"));
        assert!(msg.contains("parent directory"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_compression_error() {
        let err = ExtractionError::InvalidCompression(io::Error::new(
            io::ErrorKind::InvalidData,
            "missing gzip magic bytes",
        ));
        let converted = convert_extraction_error(err, Path::new("plain.tar"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("not gzip-compressed"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_unsupported_entry() {
        let err = ExtractionError::UnsupportedEntryType {
            name: "dev/null".into(),
            kind: EntryKind::Other(b'3'),
            mode: 0o666,
        };
        let converted = convert_extraction_error(err, Path::new("rootfs.tar.gz"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("dev/null"));
        assert!(msg.contains("character device"));
    }

    #[test]
    fn test_convert_other_error_keeps_source() {
        let err = ExtractionError::Create {
            path: PathBuf::from("/readonly/out"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let converted = convert_extraction_error(err, Path::new("a.tar.gz"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("Error processing archive 'a.tar.gz'"));
        assert!(msg.contains("denied"));
    }
}
