//! Configuration for flatdb
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{FlatError, Result};

/// Default backing file for the contact book
pub const DEFAULT_CONTACTS_FILE: &str = "contacts.csv";

/// Main configuration for a flatdb table
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Flat file backing the table (one table per file)
    pub data_file: PathBuf,

    // -------------------------------------------------------------------------
    // Rewrite Configuration
    // -------------------------------------------------------------------------
    /// How full-table rewrites replace the file on disk
    pub rewrite_strategy: RewriteStrategy,
}

/// Full-file rewrite strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RewriteStrategy {
    /// Write a sibling temp file, then rename it over the original.
    /// A failed rewrite leaves the previous contents intact.
    #[default]
    AtomicRename,

    /// Truncate the file in place and write every record.
    /// A failed rewrite can leave a partial or empty file.
    Truncate,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_CONTACTS_FILE),
            rewrite_strategy: RewriteStrategy::default(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.data_file.as_os_str().is_empty() {
            return Err(FlatError::Config("data file path is empty".to_string()));
        }
        if self.data_file.is_dir() {
            return Err(FlatError::Config(format!(
                "data file {} is a directory",
                self.data_file.display()
            )));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the backing data file
    pub fn data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_file = path.into();
        self
    }

    /// Set the rewrite strategy
    pub fn rewrite_strategy(mut self, strategy: RewriteStrategy) -> Self {
        self.config.rewrite_strategy = strategy;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
