use std::io::Read;
use std::path::Path;

use crate::error::Result;
use crate::io::{ChunkSource, Compression, StreamSource, open_path};

use super::decoder::ChunkDecoder;
use super::{LineEndings, ReaderOptions};

/// Whether rows before the start row are still being discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Skipping,
    Passthrough,
}

/// Streaming row reader over a decompressing source.
///
/// Each call to [`next_rows`](RowReader::next_rows) returns the lines completed
/// by one chunk read. Rows before the configured start row are dropped; the
/// first batch returned begins exactly at the start row.
///
/// ## Example
///
/// ```no_run
/// use bzrows::{ReaderOptions, RowReader};
///
/// fn main() -> bzrows::Result<()> {
///     let mut reader = RowReader::open("export.csv.bz2", ReaderOptions::default().start_row(2))?;
///     while let Some(rows) = reader.next_rows()? {
///         for row in rows {
///             println!("{}", row);
///         }
///     }
///     Ok(())
/// }
/// ```
pub struct RowReader<S: ChunkSource> {
    decoder: ChunkDecoder<S>,
    start_row: u64,
    /// Lines produced by the decoder so far, skipped ones included
    lines_read: u64,
    state: State,
}

impl RowReader<StreamSource<Box<dyn Read>>> {
    /// Open a compressed file.
    ///
    /// The decoder comes from `options.compression`, or from the file
    /// extension when that is unset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Open`](crate::Error::Open) if the file cannot be
    /// opened, and [`Error::InvalidOptions`](crate::Error::InvalidOptions)
    /// for a zero chunk size.
    pub fn open<P: AsRef<Path>>(path: P, options: ReaderOptions) -> Result<Self> {
        let path = path.as_ref();
        options.validate()?;

        let compression = options
            .compression
            .unwrap_or_else(|| Compression::from_path(path));
        let source = open_path(path, compression)?;

        Self::from_source(source, options)
    }
}

impl<S: ChunkSource> RowReader<S> {
    /// Wrap an already opened chunk source
    pub fn from_source(source: S, options: ReaderOptions) -> Result<Self> {
        options.validate()?;

        let start_row = options.effective_start_row();
        let state = if start_row <= 1 {
            State::Passthrough
        } else {
            State::Skipping
        };

        Ok(Self {
            decoder: ChunkDecoder::new(source, options.line_endings, options.chunk_size),
            start_row,
            lines_read: 0,
            state,
        })
    }

    /// Return the next batch of rows, or `None` when no more data is available.
    ///
    /// A start row past the end of the source gives `None` on the first call.
    pub fn next_rows(&mut self) -> Result<Option<Vec<String>>> {
        match self.state {
            State::Passthrough => self.read_batch(),
            State::Skipping => self.skip_to_start_row(),
        }
    }

    /// Iterate over single rows instead of batches
    pub fn rows(&mut self) -> Rows<'_, S> {
        Rows {
            reader: self,
            batch: Vec::new().into_iter(),
        }
    }

    fn read_batch(&mut self) -> Result<Option<Vec<String>>> {
        let batch = self.decoder.read_lines()?;
        if let Some(rows) = &batch {
            self.lines_read += rows.len() as u64;
        }
        Ok(batch)
    }

    fn skip_to_start_row(&mut self) -> Result<Option<Vec<String>>> {
        while let Some(mut batch) = self.read_batch()? {
            if self.lines_read < self.start_row {
                continue;
            }

            // Lines of this batch that come before the start row. Clamped at
            // zero should the batch be shorter than the overshoot.
            let overshoot = self.lines_read - self.start_row;
            let excess = (batch.len() as u64).saturating_sub(overshoot + 1) as usize;
            batch.drain(..excess);

            self.state = State::Passthrough;
            log::debug!(
                "reached start row {} after {} lines, dropped {} from crossing batch",
                self.start_row,
                self.lines_read,
                excess
            );
            return Ok(Some(batch));
        }

        log::debug!(
            "source ended after {} lines, before start row {}",
            self.lines_read,
            self.start_row
        );
        Ok(None)
    }

    /// Number of lines decoded so far, including skipped ones
    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }

    pub fn start_row(&self) -> u64 {
        self.start_row
    }

    /// True until the end of the source has been reached or the reader closed
    pub fn is_open(&self) -> bool {
        self.decoder.is_open()
    }

    pub fn line_endings(&self) -> &LineEndings {
        self.decoder.endings()
    }

    /// Release the source early. Later calls return `None`.
    pub fn close(&mut self) {
        self.decoder.close();
    }
}

/// Row-by-row iterator returned by [`RowReader::rows`]
pub struct Rows<'a, S: ChunkSource> {
    reader: &'a mut RowReader<S>,
    batch: std::vec::IntoIter<String>,
}

impl<S: ChunkSource> Iterator for Rows<'_, S> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(row) = self.batch.next() {
                return Some(Ok(row));
            }
            match self.reader.next_rows() {
                Ok(Some(batch)) => self.batch = batch.into_iter(),
                Ok(None) => return None,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
