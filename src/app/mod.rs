//! Command interpreter and main read loop.
//!
//! This module follows The Elm Architecture (TEA):
//! - [`Model`]: The complete editor state
//! - [`Message`]: Every command or content line the user can send
//! - [`update`]: State transitions for a single message
//! - [`App::run`]: Read loop that turns input lines into messages

mod effects;
mod event_loop;
mod input;
mod mode;
mod model;
mod update;

pub use input::{Commands, is_command_char};
pub use mode::{Mode, Trigger};
pub use model::{Model, Output, UNTITLED};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::config::ColorMode;
use crate::editor::DEFAULT_LIMIT;

/// Character that, alone on a line, leaves insert or append mode.
pub const DEFAULT_ESCAPE: char = '.';

/// Prompt shown before each command line.
pub const DEFAULT_PROMPT: &str = ">";

/// Main application struct holding startup settings for a session.
#[derive(Debug, Clone)]
pub struct App {
    file_path: Option<PathBuf>,
    prompt: String,
    escape: char,
    limit: usize,
    color: ColorMode,
}

impl App {
    /// Create an editor session, optionally opening `file_path`.
    pub fn new(file_path: Option<PathBuf>) -> Self {
        Self {
            file_path,
            prompt: DEFAULT_PROMPT.to_string(),
            escape: DEFAULT_ESCAPE,
            limit: DEFAULT_LIMIT,
            color: ColorMode::Auto,
        }
    }

    /// Set the initial prompt string.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Set the escape character used to return to prompt mode.
    pub const fn with_escape(mut self, escape: char) -> Self {
        self.escape = escape;
        self
    }

    /// Set the maximum number of addressable lines.
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Choose when output is coloured.
    pub const fn with_color(mut self, color: ColorMode) -> Self {
        self.color = color;
        self
    }
}
