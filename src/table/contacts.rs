//! Contact Book
//!
//! Unique-keyed name → {phone, email} table. The whole book is held in
//! memory for a session and written through to disk after every change.

use crate::codec::Record;
use crate::config::Config;
use crate::error::{FlatError, Result};
use crate::store::{FileStore, RecordStore};

use super::validate::ContactRules;

/// Fields per contact record: name, phone, email
pub const CONTACT_ARITY: usize = 3;

/// A single contact entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl Contact {
    pub fn new(name: impl Into<String>, phone: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }

    fn to_record(&self) -> Record {
        Record::new(vec![
            self.name.clone(),
            self.phone.clone(),
            self.email.clone(),
        ])
    }

    fn from_record(record: Record) -> Self {
        let mut fields = record.into_fields().into_iter();
        Self {
            name: fields.next().unwrap_or_default(),
            phone: fields.next().unwrap_or_default(),
            email: fields.next().unwrap_or_default(),
        }
    }
}

/// In-memory contact book backed by a record store
///
/// Entries keep insertion (load) order. Names are unique.
pub struct ContactBook<S = FileStore> {
    store: S,
    contacts: Vec<Contact>,
    rules: ContactRules,
}

impl ContactBook<FileStore> {
    /// Open the book described by `config`
    pub fn open_config(config: &Config) -> Result<Self> {
        Self::open(FileStore::from_config(config, CONTACT_ARITY)?)
    }
}

impl<S: RecordStore> ContactBook<S> {
    /// Load the book from `store`, creating the file if absent
    ///
    /// Records without exactly three fields are skipped. If a name
    /// appears twice, the later entry wins but keeps the earlier position.
    pub fn open(store: S) -> Result<Self> {
        if store.arity() != CONTACT_ARITY {
            return Err(FlatError::Config(format!(
                "contact book needs {} fields per record, store has {}",
                CONTACT_ARITY,
                store.arity()
            )));
        }
        store.ensure_exists()?;

        let mut contacts: Vec<Contact> = Vec::new();
        for record in store.load_lenient()? {
            let contact = Contact::from_record(record);
            match contacts.iter_mut().find(|c| c.name == contact.name) {
                Some(existing) => *existing = contact,
                None => contacts.push(contact),
            }
        }

        tracing::info!(
            "Loaded {} contacts from {}",
            contacts.len(),
            store.path().display()
        );

        Ok(Self {
            store,
            contacts,
            rules: ContactRules::default(),
        })
    }

    /// Replace the field validators
    pub fn with_rules(mut self, rules: ContactRules) -> Self {
        self.rules = rules;
        self
    }

    /// Add a new contact
    ///
    /// Fails if the name is taken or a field is invalid; the book and the
    /// file are unchanged on failure.
    pub fn add(&mut self, name: &str, phone: &str, email: &str) -> Result<()> {
        if self.position(name).is_some() {
            return Err(FlatError::AlreadyExists(name.to_string()));
        }
        self.rules.check(phone, email)?;

        self.contacts.push(Contact::new(name, phone, email));
        if let Err(e) = self.save() {
            self.contacts.pop();
            return Err(e);
        }

        tracing::debug!("Added contact '{}'", name);
        Ok(())
    }

    /// Replace phone and email of an existing contact
    pub fn edit(&mut self, name: &str, phone: &str, email: &str) -> Result<()> {
        let index = self
            .position(name)
            .ok_or_else(|| FlatError::NotFound(name.to_string()))?;
        self.rules.check(phone, email)?;

        let previous = std::mem::replace(&mut self.contacts[index], Contact::new(name, phone, email));
        if let Err(e) = self.save() {
            self.contacts[index] = previous;
            return Err(e);
        }

        tracing::debug!("Edited contact '{}'", name);
        Ok(())
    }

    /// Remove a contact
    pub fn delete(&mut self, name: &str) -> Result<Contact> {
        let index = self
            .position(name)
            .ok_or_else(|| FlatError::NotFound(name.to_string()))?;

        let removed = self.contacts.remove(index);
        if let Err(e) = self.save() {
            self.contacts.insert(index, removed);
            return Err(e);
        }

        tracing::debug!("Deleted contact '{}'", name);
        Ok(removed)
    }

    /// Look up a contact by name
    pub fn search(&self, name: &str) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.name == name)
    }

    /// All contacts in insertion order
    pub fn list(&self) -> impl Iterator<Item = &Contact> + '_ {
        self.contacts.iter()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Validators applied on add and edit
    pub fn rules(&self) -> &ContactRules {
        &self.rules
    }

    /// Rewrite the backing file from the whole book
    pub fn save(&self) -> Result<()> {
        let records: Vec<Record> = self.contacts.iter().map(Contact::to_record).collect();
        self.store.rewrite(&records)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.contacts.iter().position(|c| c.name == name)
    }
}
