//! Colour definitions.
//!
//! Uses the basic ANSI palette so output follows the terminal's theme.

use crossterm::style::Color;

use crate::app::Output;

/// Colour for status messages and the banner.
pub const STATUS: Color = Color::Yellow;
/// Colour for errors and line numbers.
pub const ERROR: Color = Color::Red;
/// Colour for document text.
pub const TEXT: Color = Color::Green;
/// Colour for the prompt after a successful line.
pub const PROMPT: Color = Color::Magenta;

/// Colour of the body text of an output record.
pub const fn color_for_output(output: &Output) -> Color {
    match output {
        Output::Status(_) => STATUS,
        Output::Error(_) => ERROR,
        Output::Line(_) | Output::NumberedLine(..) => TEXT,
    }
}

/// Colour of the prompt, red when the previous line failed.
pub const fn prompt_color(last_failed: bool) -> Color {
    if last_failed { ERROR } else { PROMPT }
}
