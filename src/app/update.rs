use tracing::{debug, warn};

use crate::app::{Mode, Model, Output, Trigger};
use crate::editor::{BufferError, DeleteOutcome};

/// All possible commands and content lines.
///
/// Prompt-mode lines are tokenized into these by [`crate::app::Commands`];
/// insert- and append-mode lines become [`Message::StoreLine`] or
/// [`Message::EnterPrompt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Modes
    /// Start overwriting at the current line (`i`)
    EnterInsert,
    /// Open a line after the current one and start writing there (`a`)
    EnterAppend,
    /// Escape character alone on a line
    EnterPrompt,
    /// A content line typed in insert or append mode
    StoreLine(String),

    // Editing
    /// Delete the current line (`d`)
    DeleteLine,
    /// Go to a specific line (`g<N>`)
    GoToLine(usize),

    // Display
    /// Print the document (`p`)
    Print,
    /// Print the document with line numbers (`n`)
    PrintNumbered,
    /// Show the current line and its length (`c`)
    CharCount,
    /// Show the number of lines (`l`)
    LineCount,
    /// Show command help (`h`)
    Help,

    // Settings
    /// Replace the prompt string (`>text`)
    SetPrompt(String),
    /// Change the active file name (`f name`); empty when no name was given
    SetPath(String),

    // Files
    /// Save the document (`w`)
    Save,
    /// Reload the document (`r`)
    Reload,

    // Feedback
    /// Empty command line
    BlankCommand,
    /// A character with no command bound to it
    Unrecognized(char),

    // Application
    /// Quit the editor (`q`)
    Quit,
}

impl Message {
    /// Whether the rest of the command line is ignored after this message.
    pub const fn stops_parsing(&self) -> bool {
        matches!(
            self,
            Self::EnterInsert | Self::EnterAppend | Self::SetPrompt(_) | Self::SetPath(_) | Self::Quit
        )
    }
}

/// Apply one message to the model.
///
/// All in-memory state transitions happen here. File I/O for [`Message::Save`]
/// and [`Message::Reload`] runs afterwards as a side effect.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        // Modes
        Message::EnterInsert => {
            model.mode = model.mode.transition(Trigger::InsertCommand);
            let line = model.buffer.cursor();
            model.status(format!("Entering insert mode on line {line}..."));
        }
        Message::EnterAppend => match model.buffer.open_after_cursor() {
            Ok(line) => {
                model.mode = model.mode.transition(Trigger::AppendCommand);
                model.status(format!("Entering append mode on new line {line}..."));
            }
            Err(err) => report_buffer_error(&mut model, &err),
        },
        Message::EnterPrompt => {
            model.mode = model.mode.transition(Trigger::Escape);
            model.status("Entering prompt mode...");
        }
        Message::StoreLine(text) => store_line(&mut model, text),

        // Editing
        Message::DeleteLine => match model.buffer.delete_current() {
            DeleteOutcome::Deleted(line) => {
                model.status(format!("Current line ({line}) deleted."));
            }
            DeleteOutcome::Empty(line) => {
                model.status(format!("Current line ({line}) is empty."));
            }
        },
        Message::GoToLine(target) => {
            let line = model.buffer.goto(target);
            model.status(format!("Sitting on line {line}..."));
        }

        // Display
        Message::Print => {
            for line in model.buffer.lines().to_vec() {
                model.emit(Output::Line(line));
            }
        }
        Message::PrintNumbered => {
            for (idx, line) in model.buffer.lines().to_vec().into_iter().enumerate() {
                model.emit(Output::NumberedLine(idx + 1, line));
            }
        }
        Message::CharCount => {
            let line = model.buffer.cursor();
            let count = model.buffer.char_count(line);
            let plural = if count == 1 { "" } else { "s" };
            model.status(format!(
                "{count} character{plural} on current line ({line})."
            ));
            let content = model.buffer.line(line).unwrap_or_default().to_string();
            model.emit(Output::Line(content));
        }
        Message::LineCount => {
            let total = model.buffer.total();
            model.status(format!("{total} total lines in document."));
        }
        Message::Help => show_help(&mut model),

        // Settings
        Message::SetPrompt(prompt) => model.prompt = prompt,
        Message::SetPath(name) => {
            if name.is_empty() {
                model.error("No filename entered!");
                let current = model.file_path.display().to_string();
                model.error(format!("Editing {current}"));
            } else {
                model.status(format!("Changed filename to {name}"));
                model.file_path = name.into();
            }
        }

        // Handled in effects
        Message::Save | Message::Reload => {}

        // Feedback
        Message::BlankCommand => model.error("? Blank command."),
        Message::Unrecognized(ch) => model.error(format!("? Command '{ch}' not recognized.")),

        // Application
        Message::Quit => {
            if model.buffer.is_dirty() {
                let path = model.file_path.display().to_string();
                model.error(format!("Unsaved changes to {path} discarded."));
            }
            model.active = false;
        }
    }

    model
}

fn store_line(model: &mut Model, text: String) {
    let cursor = model.buffer.cursor();
    let stored = match model.mode {
        Mode::Prompt => {
            debug!("content line outside insert/append mode ignored");
            return;
        }
        Mode::Insert => model.buffer.insert_at(cursor, text),
        Mode::Append => model
            .buffer
            .append_shift(cursor)
            .and_then(|()| model.buffer.insert_at(cursor, text)),
    };

    match stored {
        Ok(()) => {
            model.buffer.advance();
            model.mode = model.mode.transition(Trigger::ContentStored);
        }
        Err(err) => report_buffer_error(model, &err),
    }
}

fn report_buffer_error(model: &mut Model, err: &BufferError) {
    warn!(error = %err, "edit rejected");
    model.error(err.to_string());
}

const HELP: &[&str] = &[
    "Commands:",
    "  i        insert on the current line",
    "  a        append after the current line",
    "  d        delete the current line",
    "  g<N>     go to line N",
    "  c        show the current line and its length",
    "  l        show the number of lines",
    "  p        print the document",
    "  n        print the document with line numbers",
    "  w        save to the current file",
    "  r        reload the current file",
    "  f <name> change the file name",
    "  ><text>  change the prompt",
    "  q        quit",
    "  h        show this help",
];

fn show_help(model: &mut Model) {
    for line in HELP {
        model.status(*line);
    }
    let escape = model.escape;
    model.status(format!(
        "Type '{escape}' alone on a line to return to the prompt."
    ));
}
