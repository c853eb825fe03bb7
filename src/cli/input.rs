//! Parsing of interactive entries
//!
//! Turns raw lines typed at the menu prompts into keys, pairs and
//! selections.

use crate::error::{FlatError, Result};

/// Word that ends a batch of entries
pub const DONE: &str = "done";

/// One line of a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry<T> {
    /// The batch is finished
    Done,
    /// A parsed entry
    Item(T),
}

/// Parse `row, value`
///
/// Exactly one comma is required; both parts are trimmed. `done`, on its
/// own or as the row, finishes the batch.
pub fn parse_pair(line: &str) -> Result<Entry<(String, String)>> {
    if line.trim() == DONE {
        return Ok(Entry::Done);
    }

    let mut parts = line.split(',');
    let (Some(row), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(FlatError::Input(format!(
            "expected 'row, value' with exactly one comma, got '{line}'"
        )));
    };

    let row = row.trim();
    if row == DONE {
        return Ok(Entry::Done);
    }
    Ok(Entry::Item((row.to_string(), value.trim().to_string())))
}

/// Parse a single key, trimmed
pub fn parse_key(line: &str) -> Entry<String> {
    match line.trim() {
        DONE => Entry::Done,
        key => Entry::Item(key.to_string()),
    }
}

/// Parse a 1-based menu index into a 0-based position below `count`
pub fn parse_selection(line: &str, count: usize) -> Result<usize> {
    let index: usize = line
        .trim()
        .parse()
        .map_err(|_| FlatError::Input(format!("'{}' is not a number", line.trim())))?;

    if index == 0 || index > count {
        return Err(FlatError::Input(format!(
            "{index} is out of range (1-{count})"
        )));
    }
    Ok(index - 1)
}
