//! Record line codec
//!
//! Encoding and decoding of a single record to and from its text form.

use std::io::Write;

use crate::error::{FlatError, Result};

use super::Record;

/// Field separator
pub const DELIMITER: char = ',';

/// Quote character for fields that need escaping
pub const QUOTE: char = '"';

// =============================================================================
// Encoding
// =============================================================================

/// Encode a record to its text form (without the line terminator)
pub fn encode_record(record: &Record) -> String {
    let fields = record.fields();

    // A lone empty field would otherwise read back as a blank line
    if fields.len() == 1 && fields[0].is_empty() {
        return format!("{QUOTE}{QUOTE}");
    }

    let mut line = String::with_capacity(fields.iter().map(|f| f.len() + 1).sum());
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            line.push(DELIMITER);
        }
        encode_field(field, &mut line);
    }
    line
}

/// Write a record followed by `\n`
pub fn write_record<W: Write>(writer: &mut W, record: &Record) -> Result<()> {
    writer.write_all(encode_record(record).as_bytes())?;
    writer.write_all(b"\n")?;
    Ok(())
}

fn needs_quoting(field: &str) -> bool {
    field
        .chars()
        .any(|c| c == DELIMITER || c == QUOTE || c == '\r' || c == '\n')
}

fn encode_field(field: &str, out: &mut String) {
    if !needs_quoting(field) {
        out.push_str(field);
        return;
    }

    out.push(QUOTE);
    for c in field.chars() {
        if c == QUOTE {
            out.push(QUOTE);
        }
        out.push(c);
    }
    out.push(QUOTE);
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode one record and check it has exactly `arity` fields
///
/// `text` may end with a line terminator. Quoted fields may contain
/// newlines, but the text must hold exactly one complete record.
pub fn decode_record(text: &str, arity: usize) -> Result<Record> {
    match scan_record(text, 1)? {
        Scan::Complete(fields) => {
            let record = Record::new(fields);
            record.check_arity(arity, 1)?;
            Ok(record)
        }
        Scan::OpenQuote => Err(FlatError::format(1, "unterminated quoted field")),
    }
}

/// Outcome of scanning buffered text for one record
#[derive(Debug, PartialEq)]
pub(crate) enum Scan {
    /// A full record was parsed
    Complete(Vec<String>),

    /// Input ended inside a quoted field; more lines are needed
    OpenQuote,
}

#[derive(Clone, Copy, PartialEq)]
enum State {
    FieldStart,
    Unquoted,
    Quoted,
    AfterQuote,
}

/// Scan `raw` for a single record
///
/// `line` is the 1-based line the record starts on, used in errors.
pub(crate) fn scan_record(raw: &str, line: usize) -> Result<Scan> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut state = State::FieldStart;
    let mut chars = raw.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match state {
            State::FieldStart | State::Unquoted | State::AfterQuote
                if c == '\r' || c == '\n' =>
            {
                let rest = &raw[pos..];
                if rest != "\n" && rest != "\r\n" {
                    return Err(FlatError::format(line, "unexpected data after end of record"));
                }
                break;
            }
            State::FieldStart => match c {
                QUOTE => state = State::Quoted,
                DELIMITER => fields.push(std::mem::take(&mut field)),
                _ => {
                    field.push(c);
                    state = State::Unquoted;
                }
            },
            State::Unquoted => {
                if c == DELIMITER {
                    fields.push(std::mem::take(&mut field));
                    state = State::FieldStart;
                } else {
                    field.push(c);
                }
            }
            State::Quoted => {
                if c == QUOTE {
                    if matches!(chars.peek(), Some((_, QUOTE))) {
                        chars.next();
                        field.push(QUOTE);
                    } else {
                        state = State::AfterQuote;
                    }
                } else {
                    field.push(c);
                }
            }
            State::AfterQuote => {
                if c == DELIMITER {
                    fields.push(std::mem::take(&mut field));
                    state = State::FieldStart;
                } else {
                    return Err(FlatError::format(
                        line,
                        format!("unexpected '{c}' after closing quote"),
                    ));
                }
            }
        }
    }

    if state == State::Quoted {
        return Ok(Scan::OpenQuote);
    }

    fields.push(field);
    Ok(Scan::Complete(fields))
}
