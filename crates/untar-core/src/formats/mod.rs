//! Archive format layers: gzip decompression and tar decoding.

pub mod compression;
pub mod tar;

// Re-export main types for convenience
pub use compression::open_gzip;
pub use self::tar::EntryMeta;
pub use self::tar::TarGzArchive;
