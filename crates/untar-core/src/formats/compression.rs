//! Gzip decompression layer.
//!
//! The decoder itself only reports a bad header on the first read, which
//! would make a non-gzip input indistinguishable from a corrupt tar stream.
//! [`open_gzip`] therefore checks the fixed header bytes up front and
//! replays them into the decoder.

use std::io::Chain;
use std::io::Cursor;
use std::io::Read;

use flate2::read::MultiGzDecoder;

use crate::ExtractionError;
use crate::Result;

/// Gzip member magic bytes.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Compression method byte for deflate, the only method gzip defines.
const GZIP_METHOD_DEFLATE: u8 = 8;

/// Decoder returned by [`open_gzip`].
pub type GzipStream<R> = MultiGzDecoder<Chain<Cursor<[u8; 3]>, R>>;

/// Opens a gzip decompression layer over `reader`.
///
/// Concatenated gzip members are decoded as one continuous stream.
///
/// # Errors
///
/// Returns [`ExtractionError::InvalidCompression`] if the stream is empty,
/// shorter than a gzip header prefix, does not start with the gzip magic
/// bytes, or names a compression method other than deflate.
///
/// # Examples
///
/// ```
/// use untar_core::ExtractionError;
/// use untar_core::formats::compression::open_gzip;
///
/// let result = open_gzip(&b"plain text"[..]);
/// assert!(matches!(result, Err(ExtractionError::InvalidCompression(_))));
/// ```
pub fn open_gzip<R: Read>(mut reader: R) -> Result<GzipStream<R>> {
    let mut prefix = [0u8; 3];
    reader
        .read_exact(&mut prefix)
        .map_err(ExtractionError::InvalidCompression)?;

    if prefix[..2] != GZIP_MAGIC {
        return Err(ExtractionError::InvalidCompression(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "missing gzip magic bytes",
        )));
    }
    if prefix[2] != GZIP_METHOD_DEFLATE {
        return Err(ExtractionError::InvalidCompression(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("unknown gzip compression method {}", prefix[2]),
        )));
    }

    Ok(MultiGzDecoder::new(Cursor::new(prefix).chain(reader)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_open_gzip_roundtrip() {
        let compressed = gzip(b"hello gzip");
        let mut decoder = open_gzip(compressed.as_slice()).unwrap();
        let mut out = String::new();
        decoder.read_to_string(&mut out).unwrap();
        assert_eq!(out, "hello gzip");
    }

    #[test]
    fn test_open_gzip_multiple_members() {
        let mut compressed = gzip(b"first ");
        compressed.extend(gzip(b"second"));
        let mut decoder = open_gzip(compressed.as_slice()).unwrap();
        let mut out = String::new();
        decoder.read_to_string(&mut out).unwrap();
        assert_eq!(out, "first second");
    }

    #[test]
    fn test_open_gzip_empty_stream() {
        let result = open_gzip(std::io::empty());
        assert!(matches!(
            result,
            Err(ExtractionError::InvalidCompression(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof
        ));
    }

    #[test]
    fn test_open_gzip_wrong_magic() {
        let result = open_gzip(&b"ustar data"[..]);
        assert!(matches!(result, Err(ExtractionError::InvalidCompression(_))));
    }

    #[test]
    fn test_open_gzip_wrong_method() {
        let result = open_gzip(&[0x1f, 0x8b, 0x07, 0, 0][..]);
        let err = result.err().unwrap();
        assert!(err.to_string().contains("compression method 7"));
    }
}
