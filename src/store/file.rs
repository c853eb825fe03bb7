//! File Store
//!
//! `RecordStore` backed by a single flat CSV file.

use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::codec::{write_record, Record, RecordReader};
use crate::config::{Config, RewriteStrategy};
use crate::error::{FlatError, Result};

use super::RecordStore;

/// Flat file holding one table
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Backing file
    path: PathBuf,

    /// Expected fields per record
    arity: usize,

    /// How `rewrite` replaces the file
    strategy: RewriteStrategy,
}

impl FileStore {
    /// Create a store for `path` whose records have `arity` fields
    pub fn new(path: impl Into<PathBuf>, arity: usize) -> Self {
        Self {
            path: path.into(),
            arity,
            strategy: RewriteStrategy::default(),
        }
    }

    /// Create a store from a config
    pub fn from_config(config: &Config, arity: usize) -> Result<Self> {
        config.validate()?;
        if arity == 0 {
            return Err(FlatError::Config("record arity must be at least 1".to_string()));
        }
        Ok(Self::new(&config.data_file, arity).with_strategy(config.rewrite_strategy))
    }

    /// Use a different rewrite strategy
    pub fn with_strategy(mut self, strategy: RewriteStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn strategy(&self) -> RewriteStrategy {
        self.strategy
    }

    /// Read every record, handing arity mismatches to `on_mismatch`
    ///
    /// `on_mismatch` returns `Err` to abort or `Ok(())` to drop the record.
    fn read_all<F>(&self, mut on_mismatch: F) -> Result<Vec<Record>>
    where
        F: FnMut(usize, &Record, FlatError) -> Result<()>,
    {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let mut records = Vec::new();

        for item in RecordReader::new(BufReader::new(file)) {
            let (line, record) = item?;
            match record.check_arity(self.arity, line) {
                Ok(()) => records.push(record),
                Err(e) => on_mismatch(line, &record, e)?,
            }
        }

        tracing::debug!("Loaded {} records from {}", records.len(), self.path.display());
        Ok(records)
    }

    fn rewrite_truncate(&self, records: &[Record]) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)?;

        let mut writer = BufWriter::new(file);
        for record in records {
            write_record(&mut writer, record)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// File the rename lands on: a symlinked table is replaced at its target
    fn rename_target(&self) -> Result<PathBuf> {
        match fs::symlink_metadata(&self.path) {
            Ok(meta) if meta.file_type().is_symlink() => Ok(fs::canonicalize(&self.path)?),
            _ => Ok(self.path.clone()),
        }
    }

    fn rewrite_atomic(&self, records: &[Record]) -> Result<()> {
        let target = self.rename_target()?;

        // Temp file must live on the same filesystem for the rename
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir)?;
        if let Ok(meta) = fs::metadata(&target) {
            temp.as_file().set_permissions(meta.permissions())?;
        }
        {
            let mut writer = BufWriter::new(temp.as_file_mut());
            for record in records {
                write_record(&mut writer, record)?;
            }
            writer.flush()?;
        }
        temp.as_file().sync_all()?;
        temp.persist(&target).map_err(|e| e.error)?;
        Ok(())
    }
}

/// Whether a non-empty file lacks a final line terminator
fn missing_final_newline(file: &mut File) -> Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }

    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

impl RecordStore for FileStore {
    fn path(&self) -> &Path {
        &self.path
    }

    fn arity(&self) -> usize {
        self.arity
    }

    fn ensure_exists(&self) -> Result<()> {
        if !self.path.exists() {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)?;
            tracing::info!("Created empty table file {}", self.path.display());
        }
        Ok(())
    }

    fn load(&self) -> Result<Vec<Record>> {
        self.read_all(|_, _, err| Err(err))
    }

    fn load_lenient(&self) -> Result<Vec<Record>> {
        let path = &self.path;
        self.read_all(|line, record, err| {
            tracing::warn!("Skipping {}:{} ({}): {}", path.display(), line, err, record);
            Ok(())
        })
    }

    fn rewrite(&self, records: &[Record]) -> Result<()> {
        match self.strategy {
            RewriteStrategy::AtomicRename => self.rewrite_atomic(records)?,
            RewriteStrategy::Truncate => self.rewrite_truncate(records)?,
        }

        tracing::debug!(
            "Rewrote {} with {} records ({:?})",
            self.path.display(),
            records.len(),
            self.strategy
        );
        Ok(())
    }

    fn append(&self, records: &[Record]) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)?;

        // Appends always land at the end; the seek only reads the last byte
        let terminate = missing_final_newline(&mut file)?;

        let mut writer = BufWriter::new(file);
        if terminate {
            tracing::debug!("Terminating last line of {} before append", self.path.display());
            writer.write_all(b"\n")?;
        }
        for record in records {
            write_record(&mut writer, record)?;
        }
        writer.flush()?;

        tracing::debug!("Appended {} records to {}", records.len(), self.path.display());
        Ok(())
    }
}
