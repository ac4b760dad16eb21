use clap::{Parser, ValueEnum};

use crate::error::Result;
use crate::io::{Compression, DEFAULT_CHUNK_SIZE};
use crate::lines::{LineEndings, ReaderOptions};

#[derive(Parser, Debug)]
#[command(name = "bzrows")]
#[command(version)]
#[command(about = "Print the lines of a compressed text file, starting at a given row")]
#[command(long_about = None)]
#[command(after_help = "Examples:\n  \
  bzrows export.csv.bz2 -s 2          print all rows but the header\n  \
  bzrows -c access.log.gz             count lines\n  \
  bzrows dump.txt -t crlf --delimiter lf   convert CRLF line endings to LF")]
pub struct Cli {
    /// Compressed file path
    #[arg(value_name = "FILE")]
    pub file: String,

    /// First row to print (1-based; 0 is treated as 1)
    #[arg(short = 's', long, value_name = "ROW", default_value_t = 1)]
    pub start_row: u64,

    /// Only print the number of rows
    #[arg(short = 'c', long)]
    pub count: bool,

    /// Decompression to use
    #[arg(long, value_enum, default_value_t = CompressionArg::Auto)]
    pub compression: CompressionArg,

    /// Bytes decompressed per read
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Line terminators to recognize (default: crlf cr lf)
    #[arg(short = 't', long = "terminator", value_enum, num_args = 1..)]
    pub terminators: Vec<LineEnding>,

    /// Delimiter written between output rows
    #[arg(long, value_enum, default_value_t = LineEnding::Lf)]
    pub delimiter: LineEnding,

    /// Verbose logging (-vv => trace)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionArg {
    /// Detect from the file extension
    Auto,
    Bzip2,
    Gzip,
    None,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Crlf,
    Cr,
    Lf,
}

impl LineEnding {
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            LineEnding::Crlf => b"\r\n",
            LineEnding::Cr => b"\r",
            LineEnding::Lf => b"\n",
        }
    }
}

impl Cli {
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }

    /// Build reader options from the parsed arguments
    pub fn reader_options(&self) -> Result<ReaderOptions> {
        let line_endings = if self.terminators.is_empty() {
            LineEndings::new(
                [LineEnding::Crlf, LineEnding::Cr, LineEnding::Lf].map(|e| e.as_bytes()),
                self.delimiter.as_bytes(),
            )?
        } else {
            LineEndings::new(
                self.terminators.iter().map(LineEnding::as_bytes),
                self.delimiter.as_bytes(),
            )?
        };

        let mut options = ReaderOptions::default()
            .line_endings(line_endings)
            .start_row(self.start_row)
            .chunk_size(self.chunk_size);

        options.compression = match self.compression {
            CompressionArg::Auto => None,
            CompressionArg::Bzip2 => Some(Compression::Bzip2),
            CompressionArg::Gzip => Some(Compression::Gzip),
            CompressionArg::None => Some(Compression::None),
        };

        Ok(options)
    }
}
