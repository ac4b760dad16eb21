use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use bzrows::{Compression, Error, LineEndings, ReaderOptions, RowReader};
use flate2::Compression as GzLevel;
use flate2::write::GzEncoder;
use tempfile::TempDir;
use test_case::test_case;

/// A complete bzip2 stream with no data: header, end-of-stream magic, zero CRC
const BZ2_EMPTY: &[u8] = b"BZh9\x17\x72\x45\x38\x50\x90\x00\x00\x00\x00";

/// Lines "1".."count" joined by `terminator`, without a trailing terminator
fn numbered(count: usize, terminator: &str) -> String {
    (1..=count)
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(terminator)
}

/// Pre-built bzip2 file under `tests/data`
fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

fn write_gz(dir: &TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut enc = GzEncoder::new(File::create(&path).unwrap(), GzLevel::default());
    enc.write_all(text.as_bytes()).unwrap();
    enc.finish().unwrap();
    path
}

fn write_raw(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    File::create(&path).unwrap().write_all(bytes).unwrap();
    path
}

/// Read every batch until no more data
fn read_batches(path: &Path, options: ReaderOptions) -> Vec<Vec<String>> {
    let mut reader = RowReader::open(path, options).unwrap();
    let mut batches = Vec::new();
    while let Some(batch) = reader.next_rows().unwrap() {
        batches.push(batch);
    }
    batches
}

#[test]
fn test_start_row_62_of_300() {
    let dir = TempDir::new().unwrap();
    let path = write_gz(&dir, "rows.txt.gz", &numbered(300, "\n"));

    let rows = read_batches(&path, ReaderOptions::default().start_row(62)).concat();

    assert_eq!(rows.first().map(String::as_str), Some("62"));
    assert_eq!(rows.last().map(String::as_str), Some("300"));
    assert_eq!(rows.len(), 239);
}

#[test]
fn test_empty_gzip_yields_one_empty_row() {
    let dir = TempDir::new().unwrap();
    let path = write_gz(&dir, "empty.gz", "");

    let batches = read_batches(&path, ReaderOptions::default());
    assert_eq!(batches, vec![vec![String::new()]]);
}

#[test]
fn test_empty_bzip2_yields_one_empty_row() {
    let dir = TempDir::new().unwrap();
    let path = write_raw(&dir, "empty.bz2", BZ2_EMPTY);

    let batches = read_batches(&path, ReaderOptions::default());
    assert_eq!(batches, vec![vec![String::new()]]);
}

#[test]
fn test_small_file_is_one_batch() {
    let dir = TempDir::new().unwrap();
    let path = write_gz(&dir, "small.gz", "alpha\nbeta\ngamma");

    let mut reader = RowReader::open(&path, ReaderOptions::default()).unwrap();
    assert_eq!(
        reader.next_rows().unwrap(),
        Some(vec!["alpha".to_string(), "beta".to_string(), "gamma".to_string()])
    );
    assert_eq!(reader.next_rows().unwrap(), None);
    assert!(!reader.is_open());
}

#[test_case(1; "single byte chunks")]
#[test_case(2; "crlf straddles chunks")]
#[test_case(3; "three byte chunks")]
#[test_case(64; "several lines per chunk")]
#[test_case(8192; "default chunk")]
fn test_chunk_size_does_not_change_lines(chunk_size: usize) {
    let dir = TempDir::new().unwrap();
    let text = numbered(500, "\r\n");
    let path = write_gz(&dir, "crlf.gz", &text);

    let rows = read_batches(&path, ReaderOptions::default().chunk_size(chunk_size)).concat();
    let expected: Vec<String> = (1..=500).map(|i| i.to_string()).collect();
    assert_eq!(rows, expected);
}

#[test]
fn test_mixed_terminators_match_canonical() {
    let dir = TempDir::new().unwrap();
    let mixed = write_gz(&dir, "mixed.gz", "a\r\nb\rc\nd\r\ne");
    let canonical = write_gz(&dir, "canonical.gz", "a\nb\nc\nd\ne");

    for chunk_size in [1, 2, 5, 8192] {
        let options = ReaderOptions::default().chunk_size(chunk_size);
        assert_eq!(
            read_batches(&mixed, options.clone()).concat(),
            read_batches(&canonical, options).concat()
        );
    }
}

#[test_case(0, 20; "zero is first row")]
#[test_case(1, 20; "first row")]
#[test_case(2, 19; "skip header")]
#[test_case(19, 2; "second to last")]
#[test_case(20, 1; "last row")]
#[test_case(21, 0; "one past end")]
#[test_case(1000, 0; "far past end")]
fn test_start_row_counts(start_row: u64, expected: usize) {
    let dir = TempDir::new().unwrap();
    let path = write_gz(&dir, "twenty.gz", &numbered(20, "\n"));

    // 3-byte chunks cross the threshold exactly, by one and by several lines
    for chunk_size in [3, 7, 8192] {
        let options = ReaderOptions::default()
            .start_row(start_row)
            .chunk_size(chunk_size);
        let rows = read_batches(&path, options).concat();

        assert_eq!(rows.len(), expected, "chunk size {}", chunk_size);
        if expected > 0 {
            assert_eq!(rows[0], (21 - expected).to_string());
            assert_eq!(rows[expected - 1], "20");
        }
    }
}

#[test]
fn test_start_row_past_end_returns_none_from_first_call() {
    let dir = TempDir::new().unwrap();
    let path = write_gz(&dir, "three.gz", "1\n2\n3");

    let mut reader = RowReader::open(&path, ReaderOptions::default().start_row(4)).unwrap();
    assert_eq!(reader.next_rows().unwrap(), None);
    assert_eq!(reader.lines_read(), 3);
    assert_eq!(reader.next_rows().unwrap(), None);
}

#[test]
fn test_custom_terminator_and_delimiter() {
    let dir = TempDir::new().unwrap();
    let path = write_gz(&dir, "pipes.gz", "a;b|c;d");
    let endings = LineEndings::new([";"], "|").unwrap();

    let options = ReaderOptions::default().line_endings(endings);
    let mut reader = RowReader::open(&path, options).unwrap();
    let rows = reader.next_rows().unwrap().unwrap();

    assert_eq!(rows, vec!["a", "b", "c", "d"]);
    assert_eq!(reader.line_endings().join(&rows), b"a|b|c|d".to_vec());
}

#[test]
fn test_plain_file_detected_by_extension() {
    let dir = TempDir::new().unwrap();
    let path = write_raw(&dir, "plain.txt", b"x\ny\n");

    let rows = read_batches(&path, ReaderOptions::default()).concat();
    assert_eq!(rows, vec!["x", "y", ""]);
}

#[test]
fn test_explicit_compression_overrides_extension() {
    let dir = TempDir::new().unwrap();
    let path = write_gz(&dir, "no_extension", "one\ntwo");

    let options = ReaderOptions::default().compression(Compression::Gzip);
    let rows = read_batches(&path, options).concat();
    assert_eq!(rows, vec!["one", "two"]);
}

#[test]
fn test_missing_file_fails_at_open() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.bz2");

    match RowReader::open(&missing, ReaderOptions::default()) {
        Err(Error::Open { path, .. }) => assert_eq!(path, missing),
        Err(e) => panic!("unexpected error: {}", e),
        Ok(_) => panic!("opening a missing file succeeded"),
    }
}

#[test]
fn test_corrupt_gzip_is_read_error() {
    let dir = TempDir::new().unwrap();
    let path = write_raw(&dir, "corrupt.gz", b"this is not gzip data");

    let mut reader = RowReader::open(&path, ReaderOptions::default()).unwrap();
    assert!(matches!(reader.next_rows(), Err(Error::Read(_))));
    assert!(!reader.is_open());
    assert_eq!(reader.next_rows().unwrap(), None);
}

#[test]
fn test_rows_iterator_from_start_row() {
    let dir = TempDir::new().unwrap();
    let path = write_gz(&dir, "iter.gz", &numbered(100, "\n"));

    let options = ReaderOptions::default().start_row(91).chunk_size(16);
    let mut reader = RowReader::open(&path, options).unwrap();
    let rows: Vec<String> = reader.rows().map(|r| r.unwrap()).collect();

    let expected: Vec<String> = (91..=100).map(|i| i.to_string()).collect();
    assert_eq!(rows, expected);
}

// bzip2 fixtures

/// "only row", no terminator
const BZ2_ONE_ROW: &str = "one_row.txt.bz2";
/// "1".."5000" separated by CR, LF and CRLF in turn; 25558 bytes decompressed
const BZ2_5000_MIXED: &str = "rows_5000_mixed.txt.bz2";
/// "first\r\n\r\nsecond\r\rthird\n\nfourth\r\n\n\rfifth"
const BZ2_EMPTY_ROWS: &str = "empty_rows.txt.bz2";
/// Two bzip2 streams back to back: "1".."300", then "\n301".."600"
const BZ2_TWO_STREAMS: &str = "two_streams.txt.bz2";

#[test]
fn test_bzip2_one_row() {
    let batches = read_batches(&fixture(BZ2_ONE_ROW), ReaderOptions::default());
    assert_eq!(batches, vec![vec!["only row"]]);
}

#[test]
fn test_bzip2_needs_several_batches_at_default_chunk() {
    let batches = read_batches(&fixture(BZ2_5000_MIXED), ReaderOptions::default());
    assert!(batches.len() >= 2, "{} batches", batches.len());

    let expected: Vec<String> = (1..=5000).map(|i| i.to_string()).collect();
    assert_eq!(batches.concat(), expected);
}

#[test_case(1, 1; "first row")]
#[test_case(2000, 8192; "crossing inside a later batch")]
#[test_case(4321, 100; "small chunks")]
#[test_case(5000, 8192; "last row")]
fn test_bzip2_start_row(start_row: u64, chunk_size: usize) {
    let options = ReaderOptions::default()
        .start_row(start_row)
        .chunk_size(chunk_size);
    let rows = read_batches(&fixture(BZ2_5000_MIXED), options).concat();

    let expected: Vec<String> = (start_row..=5000).map(|i| i.to_string()).collect();
    assert_eq!(rows, expected);
}

#[test_case(1; "single byte chunks")]
#[test_case(2; "two byte chunks")]
#[test_case(3; "three byte chunks")]
#[test_case(8192; "default chunk")]
fn test_bzip2_interior_empty_rows(chunk_size: usize) {
    let options = ReaderOptions::default().chunk_size(chunk_size);
    let rows = read_batches(&fixture(BZ2_EMPTY_ROWS), options).concat();

    assert_eq!(
        rows,
        vec!["first", "", "second", "", "third", "", "fourth", "", "", "fifth"]
    );
}

#[test]
fn test_bzip2_start_row_on_empty_row() {
    let options = ReaderOptions::default().start_row(8);
    let rows = read_batches(&fixture(BZ2_EMPTY_ROWS), options).concat();

    assert_eq!(rows, vec!["", "", "fifth"]);
}

#[test]
fn test_concatenated_bzip2_reads_first_stream_only() {
    let mut reader = RowReader::open(fixture(BZ2_TWO_STREAMS), ReaderOptions::default()).unwrap();
    let rows: Vec<String> = reader.rows().map(|r| r.unwrap()).collect();

    let expected: Vec<String> = (1..=300).map(|i| i.to_string()).collect();
    assert_eq!(rows, expected);
    assert!(!reader.is_open());
}
