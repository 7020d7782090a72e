//! Tar container decoding over a gzip stream.

use std::io::Read;

use crate::ExtractionError;
use crate::Result;
use crate::formats::compression::GzipStream;
use crate::formats::compression::open_gzip;
use crate::types::EntryKind;

/// Offset of the type flag byte within a tar header block.
const TYPE_FLAG_OFFSET: usize = 156;

/// A gzip-compressed tar archive read sequentially from a stream.
pub struct TarGzArchive<R: Read> {
    archive: tar::Archive<GzipStream<R>>,
}

impl<R: Read> TarGzArchive<R> {
    /// Opens the decompression layer over `reader`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::InvalidCompression`] if `reader` does not
    /// start with a gzip header.
    pub fn open(reader: R) -> Result<Self> {
        let decoder = open_gzip(reader)?;
        Ok(Self {
            archive: tar::Archive::new(decoder),
        })
    }

    /// Returns the entry iterator. Can only be consumed once.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::ArchiveRead`] if iteration cannot start.
    pub fn entries(&mut self) -> Result<tar::Entries<'_, GzipStream<R>>> {
        self.archive.entries().map_err(ExtractionError::ArchiveRead)
    }
}

/// Header fields of one entry, read before its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryMeta {
    /// Raw name bytes, including PAX and GNU long-name extensions.
    pub name: Vec<u8>,
    /// Entry classification.
    pub kind: EntryKind,
    /// Mode field of the header.
    pub mode: u32,
    /// Declared payload size.
    pub size: u64,
    /// Modification time in seconds since the Unix epoch. `None` when the
    /// field is zero or unreadable.
    pub mtime: Option<u64>,
}

impl EntryMeta {
    /// Reads the header fields of `entry`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::ArchiveRead`] if the mode field cannot be
    /// parsed.
    pub fn read<R: Read>(entry: &tar::Entry<'_, R>) -> Result<Self> {
        let header = entry.header();
        let name = entry.path_bytes().into_owned();
        // `tar::EntryType` folds the legacy NUL flag into `Regular`, which
        // loses the directory marking of pre-POSIX archives.
        let type_flag = header.as_bytes()[TYPE_FLAG_OFFSET];
        let kind = EntryKind::classify(type_flag, &String::from_utf8_lossy(&name));
        let mode = header.mode().map_err(ExtractionError::ArchiveRead)?;
        let mtime = header.mtime().ok().filter(|&secs| secs != 0);

        Ok(Self {
            name,
            kind,
            mode,
            size: entry.size(),
            mtime,
        })
    }

    /// Returns the name for messages, with invalid UTF-8 replaced.
    #[must_use]
    pub fn display_name(&self) -> String {
        String::from_utf8_lossy(&self.name).into_owned()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::TarTestBuilder;

    #[test]
    fn test_entries_metadata() {
        let data = TarTestBuilder::new()
            .add_directory("dir/")
            .add_file_with_mode("dir/run.sh", b"#!/bin/sh\n", 0o755)
            .add_file_with_mtime("dir/old.txt", b"old", 1_000_000)
            .build_gz();

        let mut archive = TarGzArchive::open(data.as_slice()).unwrap();
        let metas: Vec<EntryMeta> = archive
            .entries()
            .unwrap()
            .map(|entry| EntryMeta::read(&entry.unwrap()).unwrap())
            .collect();

        assert_eq!(metas.len(), 3);
        assert_eq!(metas[0].kind, EntryKind::Directory);
        assert_eq!(metas[0].display_name().trim_end_matches('/'), "dir");
        assert_eq!(metas[1].kind, EntryKind::File);
        assert_eq!(metas[1].mode, 0o755);
        assert_eq!(metas[1].size, 10);
        assert_eq!(metas[1].mtime, None);
        assert_eq!(metas[2].mtime, Some(1_000_000));
    }

    #[test]
    fn test_long_names_preserved() {
        let long_name = format!("{}/file.txt", "d".repeat(150));
        let data = TarTestBuilder::new()
            .add_file(&long_name, b"x")
            .build_gz();

        let mut archive = TarGzArchive::open(data.as_slice()).unwrap();
        let entry = archive.entries().unwrap().next().unwrap().unwrap();
        let meta = EntryMeta::read(&entry).unwrap();
        assert_eq!(meta.display_name(), long_name);
    }

    #[test]
    fn test_legacy_nul_flag_classification() {
        let data = TarTestBuilder::new()
            .add_raw_with_mode(b"legacy/", b'\0', b"", 0o755)
            .add_raw(b"legacy/file", b'\0', b"old")
            .build_gz();

        let mut archive = TarGzArchive::open(data.as_slice()).unwrap();
        let kinds: Vec<EntryKind> = archive
            .entries()
            .unwrap()
            .map(|entry| EntryMeta::read(&entry.unwrap()).unwrap().kind)
            .collect();

        assert_eq!(kinds, vec![EntryKind::Directory, EntryKind::File]);
    }

    #[test]
    fn test_open_rejects_plain_tar() {
        let plain = TarTestBuilder::new().add_file("a", b"a").build();
        let result = TarGzArchive::open(plain.as_slice());
        assert!(matches!(result, Err(ExtractionError::InvalidCompression(_))));
    }
}
