//! Row/value mini database session
//!
//! Numbered menu over a `RowTable`: create, show, update, delete, exit.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::store::RecordStore;
use crate::table::RowTable;

use super::discover::{available_files, display_name};
use super::input::{parse_key, parse_pair, parse_selection, Entry};
use super::prompt::{LineSource, Prompter};

const PAIR_PROMPT: &str = "Enter row and value (comma separated) or 'done' to finish: ";
const KEY_PROMPT: &str = "Enter row or 'done' to finish: ";

/// Menu choices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Create,
    Show,
    Update,
    Delete,
    Exit,
}

impl Choice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Choice::Create),
            "2" => Some(Choice::Show),
            "3" => Some(Choice::Update),
            "4" => Some(Choice::Delete),
            "5" => Some(Choice::Exit),
            _ => None,
        }
    }
}

/// Interactive session over one row table
pub struct MiniDbSession<S> {
    table: RowTable<S>,
}

impl<S: RecordStore> MiniDbSession<S> {
    pub fn new(table: RowTable<S>) -> Self {
        Self { table }
    }

    /// Run the menu loop until exit or end of input
    ///
    /// Table errors are printed and the loop continues; only terminal
    /// I/O errors are returned.
    pub fn run<L: LineSource, W: Write>(&self, io: &mut Prompter<L, W>) -> Result<()> {
        loop {
            io.say("\n1. Create data")?;
            io.say("2. Show data")?;
            io.say("3. Update data")?;
            io.say("4. Delete data")?;
            io.say("5. Close database and exit")?;

            let Some(line) = io.ask("Enter your choice: ")? else {
                return Ok(());
            };

            match Choice::parse(&line) {
                Some(Choice::Create) => self.create(io)?,
                Some(Choice::Show) => self.show(io)?,
                Some(Choice::Update) => self.update(io)?,
                Some(Choice::Delete) => self.delete(io)?,
                Some(Choice::Exit) => {
                    io.say("Database closed. Goodbye!")?;
                    return Ok(());
                }
                None => io.say("Invalid choice. Please enter a number between 1 and 5.")?,
            }
        }
    }

    fn create<L: LineSource, W: Write>(&self, io: &mut Prompter<L, W>) -> Result<()> {
        let rows = read_pairs(io)?;
        match self.table.create(rows) {
            Ok(count) => io.say(format!("Created {count} row(s)."))?,
            Err(e) => io.say(format!("Error: Could not write to file. {e}"))?,
        }
        Ok(())
    }

    fn show<L: LineSource, W: Write>(&self, io: &mut Prompter<L, W>) -> Result<()> {
        match self.table.show() {
            Ok(rows) if rows.len() == 0 => io.say("No records.")?,
            Ok(rows) => {
                for (row, value) in rows {
                    io.say(format!("Row: {row}, Value: {value}"))?;
                }
            }
            Err(e) => io.say(format!("Error: Could not read from file. {e}"))?,
        }
        Ok(())
    }

    fn update<L: LineSource, W: Write>(&self, io: &mut Prompter<L, W>) -> Result<()> {
        let pairs = read_pairs(io)?;
        match self.table.update(pairs) {
            Ok(count) => io.say(format!("Updated {count} row(s)."))?,
            Err(e) => io.say(format!("Error: Could not write to file. {e}"))?,
        }
        Ok(())
    }

    fn delete<L: LineSource, W: Write>(&self, io: &mut Prompter<L, W>) -> Result<()> {
        let keys = read_keys(io)?;
        match self.table.delete(keys) {
            Ok(count) => io.say(format!("Deleted {count} row(s)."))?,
            Err(e) => io.say(format!("Error: Could not write to file. {e}"))?,
        }
        Ok(())
    }
}

/// Read `row, value` lines until `done` or end of input
///
/// A malformed line is reported and skipped; the batch so far is kept.
fn read_pairs<L: LineSource, W: Write>(io: &mut Prompter<L, W>) -> Result<Vec<(String, String)>> {
    let mut pairs = Vec::new();
    while let Some(line) = io.ask(PAIR_PROMPT)? {
        match parse_pair(&line) {
            Ok(Entry::Done) => break,
            Ok(Entry::Item(pair)) => pairs.push(pair),
            Err(e) => {
                tracing::debug!("Rejected entry: {}", e);
                io.say("Error: Invalid input. Please enter a comma-separated value.")?;
            }
        }
    }
    Ok(pairs)
}

/// Read keys until `done` or end of input
fn read_keys<L: LineSource, W: Write>(io: &mut Prompter<L, W>) -> Result<Vec<String>> {
    let mut keys = Vec::new();
    while let Some(line) = io.ask(KEY_PROMPT)? {
        match parse_key(&line) {
            Entry::Done => break,
            Entry::Item(key) => keys.push(key),
        }
    }
    Ok(keys)
}

/// Work out which table file to open
///
/// Uses `given` if present, otherwise asks for a name; a blank answer
/// lists the files in `search_dir` (minus `exclude`) and asks for an
/// index. Returns `None` when the selection is invalid or input ends.
pub fn resolve_file<L: LineSource, W: Write>(
    io: &mut Prompter<L, W>,
    given: Option<PathBuf>,
    search_dir: &Path,
    exclude: Option<&Path>,
) -> Result<Option<PathBuf>> {
    if let Some(path) = given {
        return Ok(Some(path));
    }

    let Some(name) = io.ask("Enter filename or leave blank to list available files: ")? else {
        return Ok(None);
    };
    let name = name.trim();
    if !name.is_empty() {
        return Ok(Some(PathBuf::from(name)));
    }

    let files = available_files(search_dir, exclude)?;
    io.say("\nAvailable files:")?;
    for (i, file) in files.iter().enumerate() {
        io.say(format!("{}. {}", i + 1, display_name(file)))?;
    }

    let Some(answer) = io.ask("Enter the number of the file you want to open: ")? else {
        return Ok(None);
    };
    match parse_selection(&answer, files.len()) {
        Ok(index) => Ok(Some(files[index].clone())),
        Err(e) => {
            tracing::debug!("File selection rejected: {}", e);
            io.say("Error: Invalid input. Please try again.")?;
            Ok(None)
        }
    }
}
