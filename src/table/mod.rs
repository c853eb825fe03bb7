//! Table Module
//!
//! Key-addressed views over a record store.
//!
//! ## Policies
//! | Table         | Key   | Duplicates        | In memory       |
//! |---------------|-------|-------------------|-----------------|
//! | `RowTable`    | row   | allowed           | per operation   |
//! | `ContactBook` | name  | rejected on add   | whole session   |
//!
//! Every mutation loads the whole file, changes it in memory and
//! rewrites the whole file.

mod contacts;
mod rows;
mod validate;

pub use contacts::{Contact, ContactBook, CONTACT_ARITY};
pub use rows::{RowTable, Rows, ROW_ARITY};
pub use validate::{ContactRules, FieldValidator, Validator, EMAIL_DOMAIN, PHONE_DIGITS};
