//! Codec Module
//!
//! Encodes records to, and decodes records from, the flat file format.
//!
//! ## File Format
//!
//! One record per line, fields separated by commas, no header row:
//!
//! ```text
//! ┌───────────┬───┬───────────┬───┬───────────┬────┐
//! │ Field 1   │ , │ Field 2   │ , │ Field N   │ \n │
//! └───────────┴───┴───────────┴───┴───────────┴────┘
//! ```
//!
//! ### Quoting
//! - A field containing `,`, `"`, `\r` or `\n` is wrapped in double quotes
//! - A `"` inside a quoted field is doubled (`""`)
//! - A quoted field may span physical lines
//! - A record made of one empty field is written as `""`
//!
//! ### Reading
//! - `\r\n` and `\n` both terminate a record
//! - Blank lines are skipped
//! - Field count is not checked here; stores check it against their arity

mod line;
mod reader;
mod record;

pub use line::{decode_record, encode_record, write_record, DELIMITER, QUOTE};
pub use reader::RecordReader;
pub use record::Record;
