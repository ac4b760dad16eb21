use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use bzip2_rs::DecoderReader;
use flate2::read::MultiGzDecoder;

use super::{Compression, StreamSource};
use crate::error::{Error, Result};

/// Open a local file and wrap it in the decoder for `compression`.
///
/// Only the file open can fail here. Decoders validate their headers lazily,
/// so a corrupt archive surfaces on the first chunk read.
///
/// The bzip2 decoder stops at the end of the first stream. Data after it
/// in a multi-stream file is not read.
pub fn open_path(path: &Path, compression: Compression) -> Result<StreamSource<Box<dyn Read>>> {
    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!("opened {} as {:?}", path.display(), compression);

    let reader: Box<dyn Read> = match compression {
        Compression::Bzip2 => Box::new(DecoderReader::new(BufReader::new(file))),
        Compression::Gzip => Box::new(MultiGzDecoder::new(BufReader::new(file))),
        Compression::None => Box::new(file),
    };

    Ok(StreamSource::new(reader))
}
