//! CLI Module
//!
//! Interactive front ends for the two tables.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────┐   ┌───────────────────────────┐
//! │      bin/minidb.rs        │   │      bin/contacts.rs      │
//! ├───────────────────────────┤   ├───────────────────────────┤
//! │  resolve_file + session   │   │        session            │
//! ├───────────────────────────┴───┴───────────────────────────┤
//! │   Prompter (rustyline / piped stdin, in-memory in tests)   │
//! ├────────────────────────────────────────────────────────────┤
//! │              RowTable        │        ContactBook          │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! User-facing messages go to stdout through the `Prompter`; diagnostics
//! go to stderr through `tracing`.

mod contacts;
mod discover;
mod input;
mod minidb;
mod prompt;

pub use contacts::ContactsSession;
pub use discover::{available_files, display_name};
pub use input::{parse_key, parse_pair, parse_selection, Entry, DONE};
pub use minidb::{resolve_file, MiniDbSession};
pub use prompt::{LineSource, Prompter, Terminal};

use clap::ValueEnum;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::RewriteStrategy;

/// `--rewrite` values accepted by both binaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RewriteArg {
    /// Write a temp file and rename it over the table
    Atomic,
    /// Truncate the table file and write in place
    Truncate,
}

impl From<RewriteArg> for RewriteStrategy {
    fn from(arg: RewriteArg) -> Self {
        match arg {
            RewriteArg::Atomic => RewriteStrategy::AtomicRename,
            RewriteArg::Truncate => RewriteStrategy::Truncate,
        }
    }
}

/// Initialize tracing to stderr, filtered by `RUST_LOG` (default `warn`)
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
