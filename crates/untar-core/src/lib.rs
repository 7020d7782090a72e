//! Hardened extraction of gzip-compressed tar archives.
//!
//! `untar-core` unpacks a `.tar.gz` stream into a directory while refusing
//! entry names that would land outside it (parent traversal, absolute paths,
//! drive letters and other volume-relative names). Permissions and
//! modification times are carried over, with timestamps from the future
//! clamped to the time the extraction started.
//!
//! Regular files and directories are extracted. Symbolic links are skipped;
//! hard links, devices and other special entries abort the run.
//!
//! # Examples
//!
//! ```no_run
//! use untar_core::ExtractOptions;
//! use untar_core::extract_archive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = ExtractOptions::new().with_archive_root("project-1.0/");
//! extract_archive("project-1.0.tar.gz", "/srv/project", &options)?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod copy;
pub mod error;
pub mod extraction;
pub mod formats;
pub mod security;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub mod types;

// Re-export main API types
pub use api::extract_archive;
pub use api::untar;
pub use config::ExtractOptions;
pub use config::HostCapabilities;
pub use error::ExtractionError;
pub use error::PathError;
pub use error::Result;
pub use extraction::Extractor;

// Re-export types module for easier access
pub use types::EntryKind;
pub use types::SafePath;
