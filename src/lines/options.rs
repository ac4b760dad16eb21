use crate::error::{Error, Result};
use crate::io::{Compression, DEFAULT_CHUNK_SIZE};

use super::LineEndings;

/// Settings fixed for the lifetime of a [`RowReader`](super::RowReader)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderOptions {
    pub line_endings: LineEndings,
    /// 1-based first row to return; 0 is read as 1
    pub start_row: u64,
    /// Bytes requested from the decompressor per read
    pub chunk_size: usize,
    /// Decoder to use, or `None` to pick one from the file extension
    pub compression: Option<Compression>,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            line_endings: LineEndings::default(),
            start_row: 1,
            chunk_size: DEFAULT_CHUNK_SIZE,
            compression: None,
        }
    }
}

impl ReaderOptions {
    pub fn line_endings(mut self, line_endings: LineEndings) -> Self {
        self.line_endings = line_endings;
        self
    }

    pub fn start_row(mut self, start_row: u64) -> Self {
        self.start_row = start_row;
        self
    }

    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn compression(mut self, compression: Compression) -> Self {
        self.compression = Some(compression);
        self
    }

    /// Start row after coercing 0 to 1 (there is no row 0)
    pub fn effective_start_row(&self) -> u64 {
        self.start_row.max(1)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(Error::InvalidOptions("chunk size must be at least 1 byte".to_string()));
        }
        Ok(())
    }
}
