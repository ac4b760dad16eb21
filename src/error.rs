//! Error type for the bzrows library.
//!
//! Opening a source is the only step that fails by design. Everything a
//! well-formed stream can produce (empty input, start row past the end)
//! is reported through the normal return values of [`RowReader`](crate::RowReader).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The source file could not be opened. Raised once, from the constructor.
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Line endings or chunk size were configured with unusable values.
    #[error("invalid reader options: {0}")]
    InvalidOptions(String),

    /// The decompressor failed while producing a chunk (corrupt input, truncated stream).
    #[error("failed to read chunk: {0}")]
    Read(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
