//! # flatdb
//!
//! Simple persistent record storage on flat CSV files:
//! - Row/value table with duplicate-tolerant keys (`minidb`)
//! - Unique-keyed contact book with field validation (`contacts`)
//! - Whole-file rewrites, optionally via temp file + rename
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Interactive CLI                           │
//! │             (minidb menu / contacts menu)                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  RowTable   │          │ ContactBook │
//!   │ (per call)  │          │ (in memory) │
//!   └──────┬──────┘          └──────┬──────┘
//!          └────────────┬───────────┘
//!                       ▼
//!               ┌──────────────┐
//!               │  FileStore   │
//!               │ (RecordStore)│
//!               └──────┬───────┘
//!                      ▼
//!               ┌──────────────┐
//!               │    Codec     │
//!               │  (CSV line)  │
//!               └──────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod codec;
pub mod store;
pub mod table;
pub mod cli;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{FlatError, Result};
pub use config::{Config, RewriteStrategy};
pub use codec::Record;
pub use store::{FileStore, RecordStore};
pub use table::{Contact, ContactBook, RowTable};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of flatdb
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
