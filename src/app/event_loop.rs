use std::borrow::Cow;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::app::{App, Message, Model, UNTITLED, effects, update};
use crate::editor::LineBuffer;
use crate::ui;

impl App {
    /// Run the editor on the process's stdin and stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if reading stdin or writing stdout fails.
    pub fn run(&self) -> Result<()> {
        let stdout = io::stdout();
        let color = self.color.enabled(stdout.is_terminal());
        self.run_with(io::stdin().lock(), stdout.lock(), color)
    }

    /// Run the editor reading lines from `input` and writing to `output`.
    ///
    /// The session ends on the quit command or at end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if `input` cannot be read or `output` cannot be
    /// written. Editing and file errors are reported to the user instead.
    pub fn run_with<R: BufRead, W: Write>(&self, mut input: R, mut output: W, color: bool) -> Result<()> {
        let mut model = self.initial_model();
        let mut raw = Vec::new();

        while model.active {
            ui::render_outputs(&mut output, &model.take_output(), color)?;
            if model.mode.is_prompt() {
                ui::render_prompt(&mut output, &model.prompt, model.last_failed, color)?;
            }
            output.flush().context("Failed to write output")?;

            raw.clear();
            let read = input
                .read_until(b'\n', &mut raw)
                .context("Failed to read input")?;
            if read == 0 {
                info!("end of input");
                model = update(model, Message::Quit);
                break;
            }
            let line = decode_line(&raw);
            model = self.process_line(model, strip_line_ending(&line));
        }

        ui::render_outputs(&mut output, &model.take_output(), color)?;
        ui::render_farewell(&mut output, color)?;
        output.flush().context("Failed to write output")?;
        Ok(())
    }

    /// Build the starting model, loading the file given at startup.
    pub(super) fn initial_model(&self) -> Model {
        let path = self
            .file_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(UNTITLED));
        let mut model = Model::new(path, LineBuffer::with_limit(self.limit))
            .with_prompt(self.prompt.clone())
            .with_escape(self.escape);

        model.status("Welcome to ded!");
        model.status("Type 'h' for a list of commands.");
        if self.file_path.is_some() {
            effects::load_document(&mut model);
        } else {
            model.error(format!("No file specified. Editing {UNTITLED}"));
            model.error("Use 'f' to set filename.");
            model.last_failed = false;
        }
        model
    }

    /// Classify and dispatch one input line.
    pub(super) fn process_line(&self, mut model: Model, line: &str) -> Model {
        model.begin_line();
        for msg in self.handle_line(line, model.mode) {
            debug!(?msg, "dispatch");
            model = update(model, msg.clone());
            effects::handle_message_side_effects(&mut model, &msg);
            if !model.active {
                break;
            }
        }
        model
    }
}

/// Decode one raw input line; invalid UTF-8 becomes U+FFFD.
fn decode_line(raw: &[u8]) -> Cow<'_, str> {
    let line = String::from_utf8_lossy(raw);
    if matches!(line, Cow::Owned(_)) {
        warn!(bytes = raw.len(), "input line is not valid UTF-8");
    }
    line
}

fn strip_line_ending(raw: &str) -> &str {
    let line = raw.strip_suffix('\n').unwrap_or(raw);
    line.strip_suffix('\r').unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_line_ending() {
        assert_eq!(strip_line_ending("abc\n"), "abc");
        assert_eq!(strip_line_ending("abc\r\n"), "abc");
        assert_eq!(strip_line_ending("abc"), "abc");
        assert_eq!(strip_line_ending("\n"), "");
        assert_eq!(strip_line_ending("a\rb\n"), "a\rb");
    }

    #[test]
    fn test_decode_line_replaces_invalid_bytes() {
        assert_eq!(decode_line(b"caf\xe9\n"), "caf\u{fffd}\n");
        assert!(matches!(decode_line(b"ok\n"), Cow::Borrowed("ok\n")));
    }
}
