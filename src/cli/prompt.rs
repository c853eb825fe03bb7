//! Line-oriented terminal I/O
//!
//! Sessions talk to the user only through a `Prompter`, so tests can
//! drive them with in-memory input and capture the output. Where the
//! lines come from is a `LineSource`: any `BufRead` (pipes, tests) or a
//! rustyline editor when a person is at the terminal.

use std::fmt::Display;
use std::io::{BufRead, Write};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::error::Result;

/// Where prompted lines are read from
pub trait LineSource {
    /// Show `prompt` and read one line without its terminator
    ///
    /// Returns `None` at end of input.
    fn read_line(&mut self, prompt: &str, output: &mut dyn Write) -> Result<Option<String>>;
}

impl<R: BufRead> LineSource for R {
    fn read_line(&mut self, prompt: &str, output: &mut dyn Write) -> Result<Option<String>> {
        write!(output, "{prompt}")?;
        output.flush()?;

        let mut line = String::new();
        if BufRead::read_line(self, &mut line)? == 0 {
            return Ok(None);
        }

        let len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(len);
        Ok(Some(line))
    }
}

/// Interactive line editor with in-session history
pub struct Terminal {
    editor: DefaultEditor,
}

impl Terminal {
    pub fn new() -> Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineSource for Terminal {
    fn read_line(&mut self, prompt: &str, output: &mut dyn Write) -> Result<Option<String>> {
        output.flush()?;

        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.as_str()).ok();
                }
                Ok(Some(line))
            }
            // Ctrl+C and Ctrl+D both end the session
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Prompt/answer pair over a line source and a writer
pub struct Prompter<L, W> {
    input: L,
    output: W,
}

impl<L: LineSource, W: Write> Prompter<L, W> {
    pub fn new(input: L, output: W) -> Self {
        Self { input, output }
    }

    /// Print `prompt` and read one line
    ///
    /// Returns `None` at end of input. The line terminator is stripped,
    /// other whitespace is kept.
    pub fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        let line = self.input.read_line(prompt, &mut self.output)?;
        if line.is_none() {
            writeln!(self.output)?;
        }
        Ok(line)
    }

    /// Print one line
    pub fn say(&mut self, message: impl Display) -> Result<()> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }
}
