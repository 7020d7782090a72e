//! File copy with a buffer reused across all entries of a run.
//!
//! Payload bytes go straight from the tar entry reader into the output file
//! through one heap buffer allocated per extraction run. Read and write
//! failures are reported separately so a corrupt archive is not mistaken for
//! a full disk.

use std::io;
use std::io::Read;
use std::io::Write;

/// Buffer size for payload copies (64KB).
const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Reusable buffer for payload copies.
///
/// # Examples
///
/// ```
/// use untar_core::copy::CopyBuffer;
/// use untar_core::copy::copy_with_buffer;
///
/// let mut buffer = CopyBuffer::new();
/// let mut output = Vec::new();
/// let copied = copy_with_buffer(&mut &b"payload"[..], &mut output, &mut buffer).unwrap();
/// assert_eq!(copied, 7);
/// ```
#[derive(Debug)]
pub struct CopyBuffer {
    buf: Box<[u8]>,
}

impl CopyBuffer {
    /// Creates a new zeroed copy buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: vec![0u8; COPY_BUFFER_SIZE].into_boxed_slice(),
        }
    }

    /// Returns the buffer size in bytes.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.buf.len()
    }
}

impl Default for CopyBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Which side of a copy failed.
#[derive(Debug)]
pub enum CopyError {
    /// Reading from the source failed.
    Read(io::Error),
    /// Writing to the destination failed.
    Write(io::Error),
}

/// Copies everything from `reader` to `writer` through `buffer`.
///
/// Interrupted reads are retried. Returns the number of bytes copied.
///
/// # Errors
///
/// Returns [`CopyError::Read`] or [`CopyError::Write`] with the underlying
/// I/O error.
#[inline]
pub fn copy_with_buffer<R: Read + ?Sized, W: Write + ?Sized>(
    reader: &mut R,
    writer: &mut W,
    buffer: &mut CopyBuffer,
) -> Result<u64, CopyError> {
    let mut total: u64 = 0;

    loop {
        let bytes_read = match reader.read(&mut buffer.buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(CopyError::Read(e)),
        };

        writer
            .write_all(&buffer.buf[..bytes_read])
            .map_err(CopyError::Write)?;

        total += bytes_read as u64;
    }

    Ok(total)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_copy_buffer_new() {
        let buffer = CopyBuffer::new();
        assert_eq!(buffer.size(), 64 * 1024);
        assert_eq!(CopyBuffer::default().size(), 64 * 1024);
    }

    #[test]
    fn test_copy_empty_source() {
        let mut buffer = CopyBuffer::new();
        let mut input = Cursor::new(Vec::<u8>::new());
        let mut output = Vec::new();

        let copied = copy_with_buffer(&mut input, &mut output, &mut buffer).unwrap();
        assert_eq!(copied, 0);
        assert!(output.is_empty());
    }

    #[test]
    fn test_copy_multiple_chunks() {
        let mut buffer = CopyBuffer::new();
        let input_data = vec![0x55u8; COPY_BUFFER_SIZE * 3 + 1000];
        let mut input = Cursor::new(&input_data);
        let mut output = Vec::new();

        let copied = copy_with_buffer(&mut input, &mut output, &mut buffer).unwrap();
        assert_eq!(copied, input_data.len() as u64);
        assert_eq!(output, input_data);
    }

    #[test]
    fn test_copy_reusable_buffer() {
        let mut buffer = CopyBuffer::new();

        let mut output1 = Vec::new();
        copy_with_buffer(&mut &b"first copy"[..], &mut output1, &mut buffer).unwrap();
        assert_eq!(output1, b"first copy");

        let mut output2 = Vec::new();
        copy_with_buffer(&mut &b"second"[..], &mut output2, &mut buffer).unwrap();
        assert_eq!(output2, b"second");
    }

    #[test]
    fn test_copy_with_interrupted_reads() {
        struct InterruptedReader {
            data: Vec<u8>,
            position: usize,
            calls: usize,
        }

        impl Read for InterruptedReader {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                self.calls += 1;
                if self.calls % 2 == 1 && self.position < self.data.len() {
                    return Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted"));
                }
                let remaining = &self.data[self.position..];
                let n = remaining.len().min(buf.len()).min(100);
                buf[..n].copy_from_slice(&remaining[..n]);
                self.position += n;
                Ok(n)
            }
        }

        let data = vec![0x42u8; 1000];
        let mut reader = InterruptedReader {
            data: data.clone(),
            position: 0,
            calls: 0,
        };
        let mut buffer = CopyBuffer::new();
        let mut output = Vec::new();

        let copied = copy_with_buffer(&mut reader, &mut output, &mut buffer).unwrap();
        assert_eq!(copied, 1000);
        assert_eq!(output, data);
    }

    #[test]
    fn test_copy_read_failure() {
        struct BrokenReader;

        impl Read for BrokenReader {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::UnexpectedEof, "truncated"))
            }
        }

        let mut buffer = CopyBuffer::new();
        let mut output = Vec::new();
        let result = copy_with_buffer(&mut BrokenReader, &mut output, &mut buffer);
        assert!(matches!(result, Err(CopyError::Read(e)) if e.kind() == io::ErrorKind::UnexpectedEof));
    }

    #[test]
    fn test_copy_write_failure() {
        struct FullWriter;

        impl Write for FullWriter {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::StorageFull, "disk full"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut buffer = CopyBuffer::new();
        let result = copy_with_buffer(&mut &b"data"[..], &mut FullWriter, &mut buffer);
        assert!(matches!(result, Err(CopyError::Write(e)) if e.kind() == io::ErrorKind::StorageFull));
    }
}
