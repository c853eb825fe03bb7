//! Contact manager session
//!
//! Numbered menu over a `ContactBook`: add, edit, delete, search, list,
//! exit. Every successful change is already on disk when its message is
//! printed.

use std::io::Write;

use crate::error::{FlatError, Result};
use crate::store::RecordStore;
use crate::table::{ContactBook, Validator};

use super::prompt::{LineSource, Prompter};

/// Menu choices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Add,
    Edit,
    Delete,
    Search,
    List,
    Exit,
}

impl Choice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Choice::Add),
            "2" => Some(Choice::Edit),
            "3" => Some(Choice::Delete),
            "4" => Some(Choice::Search),
            "5" => Some(Choice::List),
            "6" => Some(Choice::Exit),
            _ => None,
        }
    }
}

/// Interactive session over one contact book
pub struct ContactsSession<S> {
    book: ContactBook<S>,
}

impl<S: RecordStore> ContactsSession<S> {
    pub fn new(book: ContactBook<S>) -> Self {
        Self { book }
    }

    /// Run the menu loop until exit or end of input
    pub fn run<L: LineSource, W: Write>(&mut self, io: &mut Prompter<L, W>) -> Result<()> {
        loop {
            io.say("\nContact Management System")?;
            io.say("1. Add Contact")?;
            io.say("2. Edit Contact")?;
            io.say("3. Delete Contact")?;
            io.say("4. Search Contact")?;
            io.say("5. List Contacts")?;
            io.say("6. Exit")?;

            let Some(line) = io.ask("Enter your choice (1-6): ")? else {
                return Ok(());
            };

            match Choice::parse(&line) {
                Some(Choice::Add) => self.add(io)?,
                Some(Choice::Edit) => self.edit(io)?,
                Some(Choice::Delete) => self.delete(io)?,
                Some(Choice::Search) => self.search(io)?,
                Some(Choice::List) => self.list(io)?,
                Some(Choice::Exit) => {
                    io.say("Exiting the system.")?;
                    return Ok(());
                }
                None => io.say("Invalid choice. Please enter a number between 1 and 6.")?,
            }
        }
    }

    fn add<L: LineSource, W: Write>(&mut self, io: &mut Prompter<L, W>) -> Result<()> {
        let Some(name) = io.ask("Enter contact name: ")? else {
            return Ok(());
        };
        if self.book.search(&name).is_some() {
            return report(io, &FlatError::AlreadyExists(name));
        }
        let Some(phone) = self.ask_phone(io, "Enter phone number (11 digits): ")? else {
            return Ok(());
        };
        let Some(email) = self.ask_email(io, "Enter email address (must be @gmail.com): ")? else {
            return Ok(());
        };

        match self.book.add(&name, &phone, &email) {
            Ok(()) => io.say(format!("Contact '{name}' added.")),
            Err(e) => report(io, &e),
        }
    }

    fn edit<L: LineSource, W: Write>(&mut self, io: &mut Prompter<L, W>) -> Result<()> {
        let Some(name) = io.ask("Enter the name of the contact to edit: ")? else {
            return Ok(());
        };
        if self.book.search(&name).is_none() {
            return report(io, &FlatError::NotFound(name));
        }
        let Some(phone) = self.ask_phone(io, "Enter new phone number (11 digits): ")? else {
            return Ok(());
        };
        let Some(email) = self.ask_email(io, "Enter new email address (must be @gmail.com): ")? else {
            return Ok(());
        };

        match self.book.edit(&name, &phone, &email) {
            Ok(()) => io.say(format!("Contact '{name}' updated.")),
            Err(e) => report(io, &e),
        }
    }

    fn delete<L: LineSource, W: Write>(&mut self, io: &mut Prompter<L, W>) -> Result<()> {
        let Some(name) = io.ask("Enter the name of the contact to delete: ")? else {
            return Ok(());
        };

        match self.book.delete(&name) {
            Ok(_) => io.say(format!("Contact '{name}' deleted.")),
            Err(e) => report(io, &e),
        }
    }

    fn search<L: LineSource, W: Write>(&self, io: &mut Prompter<L, W>) -> Result<()> {
        let Some(name) = io.ask("Enter the name of the contact to search for: ")? else {
            return Ok(());
        };

        match self.book.search(&name) {
            Some(contact) => {
                io.say(format!("Name: {}", contact.name))?;
                io.say(format!("Phone: {}", contact.phone))?;
                io.say(format!("Email: {}", contact.email))
            }
            None => report(io, &FlatError::NotFound(name)),
        }
    }

    fn list<L: LineSource, W: Write>(&self, io: &mut Prompter<L, W>) -> Result<()> {
        if self.book.is_empty() {
            return io.say("No contacts to display.");
        }

        io.say("\nContacts List:")?;
        for contact in self.book.list() {
            io.say(format!(
                "Name: {}, Phone: {}, Email: {}",
                contact.name, contact.phone, contact.email
            ))?;
        }
        Ok(())
    }

    /// Ask for a phone number and check it before moving on
    fn ask_phone<L: LineSource, W: Write>(
        &self,
        io: &mut Prompter<L, W>,
        prompt: &str,
    ) -> Result<Option<String>> {
        let Some(phone) = io.ask(prompt)? else {
            return Ok(None);
        };
        if let Err(e) = self.book.rules().phone.validate("phone", &phone) {
            report(io, &e)?;
            return Ok(None);
        }
        Ok(Some(phone))
    }

    /// Ask for an email address and check it before moving on
    fn ask_email<L: LineSource, W: Write>(
        &self,
        io: &mut Prompter<L, W>,
        prompt: &str,
    ) -> Result<Option<String>> {
        let Some(email) = io.ask(prompt)? else {
            return Ok(None);
        };
        if let Err(e) = self.book.rules().email.validate("email", &email) {
            report(io, &e)?;
            return Ok(None);
        }
        Ok(Some(email))
    }
}

/// Print the user-facing message for a failed contact operation
fn report<L: LineSource, W: Write>(io: &mut Prompter<L, W>, error: &FlatError) -> Result<()> {
    tracing::debug!("Contact operation rejected: {}", error);
    match error {
        FlatError::AlreadyExists(name) => io.say(format!("Contact '{name}' already exists.")),
        FlatError::NotFound(_) => io.say("Contact not found."),
        FlatError::Validation { field: "phone", .. } => {
            io.say("Error: Phone number must be 11 digits.")
        }
        FlatError::Validation { field: "email", .. } => {
            io.say("Error: Email must be a valid Gmail address.")
        }
        other => io.say(format!("Error: {other}")),
    }
}
