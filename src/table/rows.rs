//! Row Table
//!
//! Generic two-column row/value table. Duplicate keys are allowed;
//! lookups by key resolve to the first match in file order.

use std::collections::HashSet;

use crate::codec::Record;
use crate::error::{FlatError, Result};
use crate::store::{FileStore, RecordStore};

/// Fields per row record: key, value
pub const ROW_ARITY: usize = 2;

/// Row/value table over a record store
///
/// Holds no records between calls; every operation reloads from disk.
pub struct RowTable<S = FileStore> {
    store: S,
}

impl RowTable<FileStore> {
    /// Open a table on a flat file, creating it if absent
    pub fn open_path(path: impl Into<std::path::PathBuf>) -> Result<Self> {
        Self::open(FileStore::new(path, ROW_ARITY))
    }
}

impl<S: RecordStore> RowTable<S> {
    /// Open a table on `store`, creating the backing file if absent
    pub fn open(store: S) -> Result<Self> {
        if store.arity() != ROW_ARITY {
            return Err(FlatError::Config(format!(
                "row table needs {} fields per record, store has {}",
                ROW_ARITY,
                store.arity()
            )));
        }
        store.ensure_exists()?;
        Ok(Self { store })
    }

    /// Append each `(key, value)` pair; duplicate keys accumulate
    pub fn create<I, K, V>(&self, rows: I) -> Result<usize>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let records: Vec<Record> = rows
            .into_iter()
            .map(|(k, v)| Record::new(vec![k.into(), v.into()]))
            .collect();

        if records.is_empty() {
            return Ok(0);
        }

        self.store.append(&records)?;
        Ok(records.len())
    }

    /// Load the table and iterate its rows in file order
    ///
    /// A malformed line fails the whole call; no rows are produced.
    pub fn show(&self) -> Result<Rows> {
        let records = self.store.load()?;
        Ok(Rows {
            inner: records.into_iter(),
        })
    }

    /// Set the value of the first row matching each key
    ///
    /// Unknown keys are ignored. Returns how many pairs matched a row.
    pub fn update<I, K, V>(&self, pairs: I) -> Result<usize>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut records = self.store.load()?;
        let mut matched = 0;

        for (key, value) in pairs {
            let key = key.into();
            match records.iter_mut().find(|r| r.key() == Some(key.as_str())) {
                Some(record) => {
                    record.set_field(1, value);
                    matched += 1;
                }
                None => tracing::debug!("Update skipped, no row with key '{}'", key),
            }
        }

        self.store.rewrite(&records)?;
        Ok(matched)
    }

    /// Remove every row whose key is in `keys`
    ///
    /// Returns how many rows were removed.
    pub fn delete<I, K>(&self, keys: I) -> Result<usize>
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let keys: HashSet<String> = keys.into_iter().map(Into::into).collect();
        let mut records = self.store.load()?;

        let before = records.len();
        records.retain(|r| !r.key().is_some_and(|k| keys.contains(k)));
        let removed = before - records.len();

        self.store.rewrite(&records)?;
        Ok(removed)
    }

    /// Number of rows currently on disk
    pub fn len(&self) -> Result<usize> {
        Ok(self.store.load()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

/// Rows of one `show` call, as `(key, value)` pairs
pub struct Rows {
    inner: std::vec::IntoIter<Record>,
}

impl Iterator for Rows {
    type Item = (String, String);

    fn next(&mut self) -> Option<Self::Item> {
        let mut fields = self.inner.next()?.into_fields().into_iter();
        let key = fields.next().unwrap_or_default();
        let value = fields.next().unwrap_or_default();
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Rows {}
