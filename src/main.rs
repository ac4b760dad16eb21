//! Main entry point for the bzrows CLI application.
//!
//! Streams the rows of a compressed text file to stdout, starting at the
//! requested row and joined by the chosen delimiter.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufWriter, Write};

use bzrows::{Cli, RowReader};

/// Application entry point.
///
/// Parses command-line arguments, sets up logging and dispatches to
/// either counting or printing mode.
fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG overrides the level chosen with -v
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    let options = cli.reader_options()?;
    let mut reader = RowReader::open(&cli.file, options)
        .with_context(|| format!("cannot read {}", cli.file))?;

    if cli.count {
        let total = count_rows(&mut reader)?;
        println!("{}", total);
        return Ok(());
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    print_rows(&mut reader, &mut out)?;
    out.flush()?;

    log::info!(
        "{} lines decoded, output started at row {}",
        reader.lines_read(),
        reader.start_row()
    );

    Ok(())
}

/// Count the rows from the start row to the end of the file.
fn count_rows<S: bzrows::ChunkSource>(reader: &mut RowReader<S>) -> Result<u64> {
    let mut total = 0u64;
    while let Some(rows) = reader.next_rows()? {
        total += rows.len() as u64;
    }
    Ok(total)
}

/// Write every row to `out`, separated by the configured delimiter.
///
/// Batches are joined with the same delimiter, so the output reproduces
/// the source with its line endings normalized.
fn print_rows<S: bzrows::ChunkSource, W: Write>(
    reader: &mut RowReader<S>,
    out: &mut W,
) -> Result<()> {
    let delimiter = reader.line_endings().delimiter().to_vec();
    let mut first = true;

    while let Some(rows) = reader.next_rows()? {
        if rows.is_empty() {
            continue;
        }
        if !first {
            out.write_all(&delimiter)?;
        }
        out.write_all(&reader.line_endings().join(&rows))?;
        first = false;
    }

    Ok(())
}
