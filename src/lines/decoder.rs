//! Chunk-by-chunk line decoding.
//!
//! Each read pulls one fixed-size chunk from the source and emits every line
//! completed by it. Bytes after the last confirmed terminator stay in a
//! pending buffer and become the head of the next line.

use crate::error::{Error, Result};
use crate::io::ChunkSource;

use super::terminators::{Ending, LineEndings};

pub struct ChunkDecoder<S: ChunkSource> {
    source: S,
    endings: LineEndings,
    /// Scratch buffer for one chunk
    chunk: Vec<u8>,
    /// Raw bytes of the unfinished line
    pending: Vec<u8>,
    /// Prefix of `pending` already known to hold no terminator
    scanned: usize,
    open: bool,
}

impl<S: ChunkSource> ChunkDecoder<S> {
    pub fn new(source: S, endings: LineEndings, chunk_size: usize) -> Self {
        Self {
            source,
            endings,
            chunk: vec![0u8; chunk_size],
            pending: Vec::new(),
            scanned: 0,
            open: true,
        }
    }

    pub fn endings(&self) -> &LineEndings {
        &self.endings
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Read the next batch of complete lines.
    ///
    /// Returns `Ok(None)` once the source has been fully consumed. While the
    /// source is open a batch is never empty: chunks are read until at least
    /// one line completes. At end of stream the remaining fragment is
    /// emitted as the last line, even when it is empty.
    pub fn read_lines(&mut self) -> Result<Option<Vec<String>>> {
        if !self.open {
            return Ok(None);
        }

        let mut lines = Vec::new();
        loop {
            let n = match self.source.read_chunk(&mut self.chunk) {
                Ok(n) => n,
                Err(e) => {
                    self.close();
                    return Err(Error::Read(e));
                }
            };
            self.pending.extend_from_slice(&self.chunk[..n]);

            let at_eof = self.source.is_eof();
            self.split_pending(at_eof, &mut lines);

            if at_eof {
                lines.push(String::from_utf8_lossy(&self.pending).into_owned());
                log::debug!("end of stream, final batch of {} lines", lines.len());
                self.close();
                return Ok(Some(lines));
            }

            if !lines.is_empty() {
                log::trace!("chunk of {} bytes gave {} lines", n, lines.len());
                return Ok(Some(lines));
            }

            log::trace!("no line end in {} pending bytes, reading on", self.pending.len());
        }
    }

    /// Move every terminated line out of `pending` into `lines`
    fn split_pending(&mut self, at_eof: bool, lines: &mut Vec<String>) {
        let mut line_start = 0;
        let mut i = self.scanned;

        while i < self.pending.len() {
            if !self.endings.may_start(self.pending[i]) {
                i += 1;
                continue;
            }
            match self.endings.ending_at(&self.pending[i..], at_eof) {
                Ending::Found(len) => {
                    lines.push(String::from_utf8_lossy(&self.pending[line_start..i]).into_owned());
                    i += len;
                    line_start = i;
                }
                Ending::Undecided => break,
                Ending::NotFound => i += 1,
            }
        }

        self.pending.drain(..line_start);
        self.scanned = i - line_start;
    }

    /// Release the source and drop any unfinished fragment
    pub fn close(&mut self) {
        if self.open {
            self.source.close();
            self.open = false;
            self.pending.clear();
            self.scanned = 0;
        }
    }
}
