//! Test utilities for building in-memory archives.
//!
//! Available to unit tests and, through the `test-utils` feature, to
//! integration tests and benchmarks.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;

/// Compresses `data` as a single gzip member.
///
/// # Examples
///
/// ```
/// use untar_core::test_utils::gzip;
///
/// let compressed = gzip(b"hello");
/// assert_eq!(&compressed[..2], &[0x1f, 0x8b]);
/// ```
#[must_use]
pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Builder for creating TAR test archives with various entry types.
///
/// Entries added with `add_raw` bypass the path checks of [`tar::Builder`],
/// which makes it possible to produce hostile names such as
/// `../../etc/passwd`.
///
/// # Examples
///
/// ```
/// use untar_core::test_utils::TarTestBuilder;
///
/// let tar_gz = TarTestBuilder::new()
///     .add_directory("dir/")
///     .add_file("dir/file.txt", b"content")
///     .add_raw(b"../escape.txt", b'0', b"evil")
///     .build_gz();
/// ```
pub struct TarTestBuilder {
    builder: tar::Builder<Vec<u8>>,
}

impl TarTestBuilder {
    /// Creates a new TAR test builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: tar::Builder::new(Vec::new()),
        }
    }

    /// Adds a regular file with mode 0o644 and no modification time.
    #[must_use]
    pub fn add_file(self, path: &str, data: &[u8]) -> Self {
        self.add_file_with_mode(path, data, 0o644)
    }

    /// Adds a regular file with custom mode.
    #[must_use]
    pub fn add_file_with_mode(mut self, path: &str, data: &[u8], mode: u32) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(mode);
        header.set_cksum();
        self.builder.append_data(&mut header, path, data).unwrap();
        self
    }

    /// Adds a regular file with a modification time in Unix seconds.
    #[must_use]
    pub fn add_file_with_mtime(mut self, path: &str, data: &[u8], mtime: u64) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_mtime(mtime);
        header.set_cksum();
        self.builder.append_data(&mut header, path, data).unwrap();
        self
    }

    /// Adds a directory to the archive.
    #[must_use]
    pub fn add_directory(self, path: &str) -> Self {
        self.add_directory_with_mode(path, 0o755)
    }

    /// Adds a directory with custom mode.
    #[must_use]
    pub fn add_directory_with_mode(mut self, path: &str, mode: u32) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_size(0);
        header.set_mode(mode);
        header.set_entry_type(tar::EntryType::Directory);
        header.set_cksum();
        self.builder
            .append_data(&mut header, path, std::io::empty())
            .unwrap();
        self
    }

    /// Adds a symlink to the archive.
    #[must_use]
    pub fn add_symlink(mut self, path: &str, target: &str) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_size(0);
        header.set_mode(0o777);
        header.set_entry_type(tar::EntryType::Symlink);
        header.set_link_name(target).unwrap();
        header.set_cksum();
        self.builder
            .append_data(&mut header, path, std::io::empty())
            .unwrap();
        self
    }

    /// Adds a hardlink to the archive.
    #[must_use]
    pub fn add_hardlink(mut self, path: &str, target: &str) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_size(0);
        header.set_mode(0o644);
        header.set_entry_type(tar::EntryType::Link);
        header.set_link_name(target).unwrap();
        header.set_cksum();
        self.builder
            .append_data(&mut header, path, std::io::empty())
            .unwrap();
        self
    }

    /// Adds a named pipe.
    #[must_use]
    pub fn add_fifo(self, path: &str) -> Self {
        self.add_raw(path.as_bytes(), b'6', &[])
    }

    /// Adds a PAX global extended header with an empty name.
    #[must_use]
    pub fn add_global_header(self, comment: &str) -> Self {
        let record = pax_record("comment", comment);
        self.add_raw(b"", b'g', record.as_bytes())
    }

    /// Adds an entry whose name and type flag are written to the header as-is.
    ///
    /// `name` must fit in the 100-byte name field. The mode is 0o644.
    #[must_use]
    pub fn add_raw(self, name: &[u8], type_flag: u8, data: &[u8]) -> Self {
        self.add_raw_with_mode(name, type_flag, data, 0o644)
    }

    /// Like [`TarTestBuilder::add_raw`] with a custom mode.
    #[must_use]
    pub fn add_raw_with_mode(mut self, name: &[u8], type_flag: u8, data: &[u8], mode: u32) -> Self {
        let mut header = tar::Header::new_old();
        header.as_old_mut().name[..name.len()].copy_from_slice(name);
        header.set_size(data.len() as u64);
        header.set_mode(mode);
        header.as_mut_bytes()[156] = type_flag;
        header.set_cksum();
        self.builder.append(&header, data).unwrap();
        self
    }

    /// Builds and returns the uncompressed TAR archive data.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.builder.into_inner().unwrap()
    }

    /// Builds the archive and compresses it with gzip.
    #[must_use]
    pub fn build_gz(self) -> Vec<u8> {
        gzip(&self.build())
    }
}

impl Default for TarTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats one `length key=value\n` PAX record. The length prefix counts
/// itself.
fn pax_record(key: &str, value: &str) -> String {
    let body = format!(" {key}={value}\n");
    let mut len = body.len() + 1;
    while len.to_string().len() + body.len() != len {
        len += 1;
    }
    format!("{len}{body}")
}
