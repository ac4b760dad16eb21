use crate::error::{Error, Result};

/// Line terminator configuration.
///
/// Holds the raw terminator variants to recognize and the single delimiter
/// they are all normalized to. The delimiter always splits lines too, even
/// when it is not listed among the terminators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEndings {
    /// Terminators as configured
    terminators: Vec<Vec<u8>>,
    /// Canonical delimiter used for re-emitting rows
    delimiter: Vec<u8>,
    /// Terminators plus delimiter, longest first
    split_set: Vec<Vec<u8>>,
    /// Bytes that can open a terminator
    first_bytes: [bool; 256],
}

/// Outcome of testing a position for a line terminator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Ending {
    /// A terminator of this many bytes starts here
    Found(usize),
    /// The remaining bytes are a proper prefix of a longer terminator;
    /// more input is needed to decide
    Undecided,
    NotFound,
}

impl LineEndings {
    /// Create a configuration from terminator variants and a delimiter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOptions`] if the delimiter or any terminator is empty.
    pub fn new<I, T, D>(terminators: I, delimiter: D) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
        D: AsRef<[u8]>,
    {
        let delimiter = delimiter.as_ref().to_vec();
        if delimiter.is_empty() {
            return Err(Error::InvalidOptions("delimiter must not be empty".to_string()));
        }

        let terminators: Vec<Vec<u8>> = terminators
            .into_iter()
            .map(|t| t.as_ref().to_vec())
            .collect();
        if terminators.iter().any(|t| t.is_empty()) {
            return Err(Error::InvalidOptions("terminators must not be empty".to_string()));
        }

        Ok(Self::from_parts(terminators, delimiter))
    }

    /// CRLF, CR and LF, normalized to LF
    pub fn crlf_cr_lf() -> Self {
        Self::from_parts(
            vec![b"\r\n".to_vec(), b"\r".to_vec(), b"\n".to_vec()],
            b"\n".to_vec(),
        )
    }

    fn from_parts(terminators: Vec<Vec<u8>>, delimiter: Vec<u8>) -> Self {
        let mut split_set = terminators.clone();
        split_set.push(delimiter.clone());
        // Two-byte CRLF must be tried before its one-byte prefix CR.
        split_set.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        split_set.dedup();

        let mut first_bytes = [false; 256];
        for t in &split_set {
            first_bytes[t[0] as usize] = true;
        }

        Self {
            terminators,
            delimiter,
            split_set,
            first_bytes,
        }
    }

    pub fn terminators(&self) -> &[Vec<u8>] {
        &self.terminators
    }

    pub fn delimiter(&self) -> &[u8] {
        &self.delimiter
    }

    /// Join rows back into a byte stream separated by the delimiter
    pub fn join<S: AsRef<str>>(&self, rows: &[S]) -> Vec<u8> {
        let mut out = Vec::new();
        for (i, row) in rows.iter().enumerate() {
            if i > 0 {
                out.extend_from_slice(&self.delimiter);
            }
            out.extend_from_slice(row.as_ref().as_bytes());
        }
        out
    }

    /// Cheap pre-check before [`LineEndings::ending_at`]
    #[inline]
    pub(crate) fn may_start(&self, byte: u8) -> bool {
        self.first_bytes[byte as usize]
    }

    /// Test whether a terminator begins at the start of `rest`.
    ///
    /// `rest` runs to the end of the buffered input. Unless `at_eof`, a tail
    /// that could still grow into a longer terminator is reported as
    /// [`Ending::Undecided`] rather than matched as a shorter one.
    pub(crate) fn ending_at(&self, rest: &[u8], at_eof: bool) -> Ending {
        for t in &self.split_set {
            if rest.starts_with(t) {
                return Ending::Found(t.len());
            }
            if !at_eof && rest.len() < t.len() && t.starts_with(rest) {
                return Ending::Undecided;
            }
        }
        Ending::NotFound
    }
}

impl Default for LineEndings {
    fn default() -> Self {
        Self::crlf_cr_lf()
    }
}
