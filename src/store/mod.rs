//! Store Module
//!
//! Persistence layer: one table per flat file.
//!
//! ## Responsibilities
//! - Load every record of a file, in file order
//! - Replace the whole file from an in-memory sequence
//! - Append records at the end of a file
//!
//! ## Lifecycle of a mutation
//! ```text
//! ┌──────────────┐    ┌──────────────────┐    ┌──────────────────┐
//! │ load (whole) │ ─▶ │ mutate in memory │ ─▶ │ rewrite (whole)  │
//! └──────────────┘    └──────────────────┘    └──────────────────┘
//! ```
//!
//! Every call opens and closes the file; nothing is cached between calls.
//! There is no locking, so two writers on the same file race and the last
//! rewrite wins.

mod file;

use std::path::Path;

use crate::codec::Record;
use crate::error::Result;

pub use file::FileStore;

/// Whole-file record persistence
///
/// Tables only talk to this trait, so the flat file can be swapped for
/// another backing format without touching table logic.
pub trait RecordStore {
    /// Location of the backing file
    fn path(&self) -> &Path;

    /// Number of fields every record in this store has
    fn arity(&self) -> usize;

    /// Create the backing file empty if it does not exist
    fn ensure_exists(&self) -> Result<()>;

    /// Load all records; any malformed record aborts the load
    fn load(&self) -> Result<Vec<Record>>;

    /// Load all records, skipping ones with the wrong field count
    fn load_lenient(&self) -> Result<Vec<Record>>;

    /// Replace the file contents with `records`, in order
    fn rewrite(&self, records: &[Record]) -> Result<()>;

    /// Add `records` at the end of the file
    fn append(&self, records: &[Record]) -> Result<()>;
}
