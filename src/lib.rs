//! # bzrows
//!
//! Streaming line reader for compressed text files.
//!
//! This library reads bzip2, gzip or plain files in fixed-size chunks and
//! hands back complete lines batch by batch, without decompressing the whole
//! file up front. Mixed line endings are normalized to one delimiter, and a
//! start row can be given to skip a header or resume a partial import.
//!
//! ## Features
//!
//! - Bzip2 and gzip decompression, picked from the file extension or set explicitly
//! - Lines reassembled across chunk boundaries
//! - CRLF, CR and LF (or any other byte sequences) normalized to a single delimiter
//! - Skipping of leading rows via a 1-based start row
//!
//! ## Example
//!
//! ```no_run
//! use bzrows::{ReaderOptions, RowReader};
//!
//! fn main() -> anyhow::Result<()> {
//!     // Skip the header row of a compressed CSV export
//!     let mut reader = RowReader::open("export.csv.bz2", ReaderOptions::default().start_row(2))?;
//!
//!     let mut count = 0;
//!     while let Some(rows) = reader.next_rows()? {
//!         count += rows.len();
//!     }
//!     println!("{} data rows", count);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod error;
pub mod io;
pub mod lines;

pub use cli::Cli;
pub use error::{Error, Result};
pub use io::{ChunkSource, Compression, StreamSource};
pub use lines::{LineEndings, ReaderOptions, RowReader};
