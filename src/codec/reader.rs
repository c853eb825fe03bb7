//! Record Reader
//!
//! Streams records out of buffered text, joining quoted fields that
//! span several physical lines.

use std::io::BufRead;

use crate::error::{FlatError, Result};

use super::line::{scan_record, Scan};
use super::Record;

/// Iterator over the records in a flat file
///
/// Yields `(line, record)` where `line` is the 1-based line the record
/// starts on. Stops after the first error.
pub struct RecordReader<R> {
    inner: R,
    /// Physical lines consumed so far
    line: usize,
    done: bool,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            line: 0,
            done: false,
        }
    }

    fn read_next(&mut self) -> Result<Option<(usize, Record)>> {
        let mut raw = String::new();
        let mut start_line = 0;

        loop {
            let mut buf = String::new();
            if self.inner.read_line(&mut buf)? == 0 {
                if raw.is_empty() {
                    return Ok(None);
                }
                return Err(FlatError::format(start_line, "unterminated quoted field"));
            }
            self.line += 1;

            if raw.is_empty() {
                if is_blank(&buf) {
                    continue;
                }
                start_line = self.line;
            }
            raw.push_str(&buf);

            match scan_record(&raw, start_line)? {
                Scan::Complete(fields) => return Ok(Some((start_line, Record::new(fields)))),
                Scan::OpenQuote => continue,
            }
        }
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<(usize, Record)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.read_next() {
            Ok(Some(item)) => Some(Ok(item)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

fn is_blank(line: &str) -> bool {
    line.trim_end_matches(['\r', '\n']).is_empty()
}
