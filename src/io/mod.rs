mod local;
mod stream;

pub use local::open_path;
pub use stream::StreamSource;

use std::io;
use std::path::Path;

/// Upper bound on bytes pulled from the decompressor per chunk read.
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Trait for sequential, block-oriented reading from a decompressing source
pub trait ChunkSource {
    /// Read up to `buf.len()` bytes. Returns fewer only when the stream ends.
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// True once a read has observed the end of the stream
    fn is_eof(&self) -> bool;

    /// Release the underlying stream. Further reads return 0 bytes.
    fn close(&mut self);
}

/// Compression format of a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    Bzip2,
    Gzip,
    None,
}

impl Compression {
    /// Guess the format from the file extension.
    ///
    /// `.bz2` and `.bz` map to [`Compression::Bzip2`], `.gz` and `.gzip` to
    /// [`Compression::Gzip`]; anything else is read as plain bytes.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "bz2" | "bz" => Compression::Bzip2,
            "gz" | "gzip" => Compression::Gzip,
            _ => Compression::None,
        }
    }
}
