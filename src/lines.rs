/*============================================================
  Synavera Project: Brightstar
  Module: brightstar_core::lines
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Open the package database files and stream them line by
    line without rejecting stray non-UTF-8 bytes.

  Security / Safety Notes:
    Read-only access; handles are dropped on every exit path.

  Dependencies:
    None beyond std.

  Operational Scope:
    Shared by every describer, the enricher, and name search.

  Revision History:
    2026-10-17 COD  Introduced lossy line reader.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Required files fail loudly with their path
    - Best-effort decoding of loosely structured text
============================================================*/

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::{BrightError, Result};

/// Open a file a query cannot proceed without.
pub fn open_required(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|err| BrightError::unavailable(path, err))
}

/// Iterator over lines with line endings stripped and invalid UTF-8 replaced.
pub struct LossyLines<R> {
    reader: R,
    buffer: Vec<u8>,
}

impl<R: BufRead> LossyLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
        }
    }
}

impl<R: BufRead> Iterator for LossyLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.clear();
        match self.reader.read_until(b'\n', &mut self.buffer) {
            Ok(0) => None,
            Ok(_) => {
                while matches!(self.buffer.last(), Some(b'\n' | b'\r')) {
                    self.buffer.pop();
                }
                Some(Ok(String::from_utf8_lossy(&self.buffer).into_owned()))
            }
            Err(err) => Some(Err(err)),
        }
    }
}
