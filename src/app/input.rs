use std::iter::Peekable;
use std::str::CharIndices;

use crate::app::{App, Message, Mode};

impl App {
    /// Turn one raw input line into the messages it stands for.
    pub(super) fn handle_line(&self, line: &str, mode: Mode) -> Vec<Message> {
        if !mode.is_prompt() {
            return if is_escape_line(line, self.escape) {
                vec![Message::EnterPrompt]
            } else {
                vec![Message::StoreLine(line.to_string())]
            };
        }

        if line.is_empty() {
            return vec![Message::BlankCommand];
        }
        // The escape character only means something outside prompt mode.
        if line.starts_with(self.escape) {
            return Vec::new();
        }
        Commands::new(line).collect()
    }
}

/// Characters the prompt-mode tokenizer gives a meaning to.
const COMMAND_CHARS: &str = "iadqwrpnclh>fg";

/// Whether `ch` is a command or a digit at the prompt.
///
/// Such a character cannot be the escape character: prompt lines starting
/// with the escape are ignored, so the command would become unreachable.
pub fn is_command_char(ch: char) -> bool {
    COMMAND_CHARS.contains(ch) || ch.is_ascii_digit()
}

fn is_escape_line(line: &str, escape: char) -> bool {
    let mut chars = line.chars();
    chars.next() == Some(escape) && chars.next().is_none()
}

/// Tokenizer over a prompt-mode command line.
///
/// Yields one [`Message`] per command, left to right. Digits outside a `g`
/// argument are skipped. The iterator ends after a command that stops
/// parsing (`i`, `a`, `q`, `>`, `f`).
#[derive(Debug, Clone)]
pub struct Commands<'a> {
    src: &'a str,
    chars: Peekable<CharIndices<'a>>,
    done: bool,
}

impl<'a> Commands<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            chars: src.char_indices().peekable(),
            done: false,
        }
    }

    /// Consume a run of decimal digits; an empty run is 0.
    fn number(&mut self) -> usize {
        let mut value: usize = 0;
        while let Some(&(_, ch)) = self.chars.peek() {
            let Some(digit) = ch.to_digit(10) else {
                break;
            };
            self.chars.next();
            // Saturate so an absurd target still lands out of range.
            value = value
                .saturating_mul(10)
                .saturating_add(digit as usize);
        }
        value
    }

    fn rest_after(&self, idx: usize, ch: char) -> &'a str {
        &self.src[idx + ch.len_utf8()..]
    }
}

/// First whitespace-delimited word of `arg`, skipping leading blanks.
fn filename_arg(arg: &str) -> &str {
    arg.split_whitespace().next().unwrap_or_default()
}

impl Iterator for Commands<'_> {
    type Item = Message;

    fn next(&mut self) -> Option<Message> {
        if self.done {
            return None;
        }
        loop {
            let (idx, ch) = self.chars.next()?;
            let msg = match ch {
                'i' => Message::EnterInsert,
                'a' => Message::EnterAppend,
                'd' => Message::DeleteLine,
                'q' => Message::Quit,
                'w' => Message::Save,
                'r' => Message::Reload,
                'p' => Message::Print,
                'n' => Message::PrintNumbered,
                'c' => Message::CharCount,
                'l' => Message::LineCount,
                'h' => Message::Help,
                '>' => Message::SetPrompt(self.rest_after(idx, ch).to_string()),
                'f' => Message::SetPath(filename_arg(self.rest_after(idx, ch)).to_string()),
                'g' => Message::GoToLine(self.number()),
                c if c.is_ascii_digit() => continue,
                c => Message::Unrecognized(c),
            };
            if msg.stops_parsing() {
                self.done = true;
            }
            return Some(msg);
        }
    }
}
