use std::io::{self, ErrorKind, Read};

use super::ChunkSource;

/// Chunk source over any sequential decompressor.
///
/// `Read` has no end-of-stream query, so the end is recorded the first time
/// the inner reader returns 0 bytes. A chunk read keeps pulling until the
/// buffer is full or that happens, since decoders commonly return short
/// reads at block boundaries.
pub struct StreamSource<R: Read> {
    inner: Option<R>,
    eof: bool,
    bytes_read: u64,
}

impl<R: Read> StreamSource<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner: Some(inner),
            eof: false,
            bytes_read: 0,
        }
    }

    /// Total decompressed bytes produced so far
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }
}

impl<R: Read> ChunkSource for StreamSource<R> {
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let Some(inner) = self.inner.as_mut() else {
            return Ok(0);
        };

        let mut filled = 0;
        while filled < buf.len() {
            match inner.read(&mut buf[filled..]) {
                Ok(0) => {
                    self.eof = true;
                    break;
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }

        self.bytes_read += filled as u64;
        Ok(filled)
    }

    fn is_eof(&self) -> bool {
        self.eof || self.inner.is_none()
    }

    fn close(&mut self) {
        if self.inner.take().is_some() {
            log::debug!("closed source after {} bytes", self.bytes_read);
        }
    }
}
