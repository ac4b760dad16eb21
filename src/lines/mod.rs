//! Line reconstruction over a decompressing chunk source.
//!
//! ## Architecture
//!
//! - [`terminators`]: line-ending configuration and terminator matching
//! - [`decoder`]: turns fixed-size chunks into complete lines, carrying the
//!   unfinished tail of each chunk into the next read
//! - [`reader`]: the public [`RowReader`], which discards rows before the
//!   start row and then passes decoder batches straight through
//!
//! ## Line Endings
//!
//! Every configured terminator variant (for example CRLF, CR and LF) is
//! treated as the same delimiter. Longer variants are matched first, and a
//! variant that might still be the start of a longer one at the end of a
//! chunk waits for the next chunk, so output does not depend on where
//! chunk boundaries fall.
//!
//! ## Limitations
//!
//! - Sequential only, no seeking
//! - Only the first stream of a concatenated bzip2 file (as written by
//!   pbzip2 or `cat a.bz2 b.bz2`) is read; gzip members are all read
//! - Lines are decoded as UTF-8; invalid sequences become U+FFFD

mod decoder;
mod options;
mod reader;
mod terminators;

pub use decoder::ChunkDecoder;
pub use options::ReaderOptions;
pub use reader::{RowReader, Rows};
pub use terminators::LineEndings;
