use std::path::PathBuf;

use anyhow::Result;

use crate::app::{DEFAULT_ESCAPE, DEFAULT_PROMPT, Mode};
use crate::editor::LineBuffer;
use crate::store;

/// File name used until the user picks one.
pub const UNTITLED: &str = "untitled.txt";

/// One record of user-visible output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Informational status message
    Status(String),
    /// A recoverable problem
    Error(String),
    /// A document line
    Line(String),
    /// A document line with its 1-based number
    NumberedLine(usize, String),
}

/// The complete editor state.
///
/// All state lives here - no global or scattered state.
#[derive(Debug, Clone)]
pub struct Model {
    /// The document and its cursor
    pub buffer: LineBuffer,
    /// How the next input line is interpreted
    pub mode: Mode,
    /// Text shown before each command line
    pub prompt: String,
    /// File that `w` and `r` operate on
    pub file_path: PathBuf,
    /// Escape character, shown in help
    pub escape: char,
    /// Cleared by the quit command; ends the read loop
    pub active: bool,
    /// Set when something on the current input line failed
    pub last_failed: bool,
    output: Vec<Output>,
}

impl Model {
    /// Create a model editing `buffer` under `file_path`.
    pub fn new(file_path: PathBuf, buffer: LineBuffer) -> Self {
        Self {
            buffer,
            mode: Mode::Prompt,
            prompt: DEFAULT_PROMPT.to_string(),
            file_path,
            escape: DEFAULT_ESCAPE,
            active: true,
            last_failed: false,
            output: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    #[must_use]
    pub const fn with_escape(mut self, escape: char) -> Self {
        self.escape = escape;
        self
    }

    pub(super) fn status(&mut self, message: impl Into<String>) {
        self.output.push(Output::Status(message.into()));
    }

    pub(super) fn error(&mut self, message: impl Into<String>) {
        self.last_failed = true;
        self.output.push(Output::Error(message.into()));
    }

    pub(super) fn emit(&mut self, output: Output) {
        self.output.push(output);
    }

    /// Output queued since the last call, oldest first.
    pub fn take_output(&mut self) -> Vec<Output> {
        std::mem::take(&mut self.output)
    }

    /// Reset per-line failure state before handling a new input line.
    pub(super) const fn begin_line(&mut self) {
        self.last_failed = false;
    }

    /// Replace the document with the contents of `file_path`.
    ///
    /// Returns the number of lines read. On failure the document is left
    /// unchanged.
    pub(super) fn reload_from_disk(&mut self) -> Result<usize> {
        let lines = store::load_lines(&self.file_path)?;
        let count = lines.len();
        self.buffer.replace_lines(lines)?;
        Ok(count)
    }

    /// Write the document to `file_path`, returning the bytes written.
    pub(super) fn save_to_disk(&mut self) -> Result<usize> {
        let bytes = store::save_lines(&self.file_path, self.buffer.lines())?;
        self.buffer.mark_clean();
        Ok(bytes)
    }
}
