//! Record definition
//!
//! An ordered tuple of string fields; the first field is the key.

use std::fmt;

use crate::error::{FlatError, Result};

/// One line's worth of structured data
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    fields: Vec<String>,
}

impl Record {
    /// Create a record from owned fields
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// Create a record from anything string-like
    pub fn from_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// The key field (first field), if any
    pub fn key(&self) -> Option<&str> {
        self.fields.first().map(String::as_str)
    }

    /// Field at `index`
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// Replace the field at `index`, returning the old value
    pub fn set_field(&mut self, index: usize, value: impl Into<String>) -> Option<String> {
        let slot = self.fields.get_mut(index)?;
        Some(std::mem::replace(slot, value.into()))
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<String> {
        self.fields
    }

    /// Number of fields
    pub fn arity(&self) -> usize {
        self.fields.len()
    }

    /// Fail with a format error unless the record has exactly `arity` fields
    pub fn check_arity(&self, arity: usize, line: usize) -> Result<()> {
        if self.fields.len() != arity {
            return Err(FlatError::format(
                line,
                format!("expected {} fields, found {}", arity, self.fields.len()),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&super::encode_record(self))
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for Record {
    fn from(fields: [S; N]) -> Self {
        Self::from_fields(fields)
    }
}
