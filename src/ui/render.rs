use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

use crate::app::Output;
use crate::ui::style;

/// Write `text` in `color`, or plain when colour is off.
fn paint<W: Write>(out: &mut W, text: &str, color: Option<Color>) -> io::Result<()> {
    match color {
        Some(color) => queue!(out, SetForegroundColor(color), Print(text), ResetColor),
        None => out.write_all(text.as_bytes()),
    }
}

/// Write one output record followed by a newline.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn render_output<W: Write>(out: &mut W, output: &Output, color: bool) -> io::Result<()> {
    let body_color = color.then(|| style::color_for_output(output));
    match output {
        Output::Status(text) | Output::Error(text) | Output::Line(text) => {
            paint(out, text, body_color)?;
        }
        Output::NumberedLine(number, text) => {
            paint(out, &format!("{number:>5}"), color.then_some(style::ERROR))?;
            out.write_all(b" ")?;
            paint(out, text, body_color)?;
        }
    }
    out.write_all(b"\n")
}

/// Write every record in order.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn render_outputs<W: Write>(out: &mut W, outputs: &[Output], color: bool) -> io::Result<()> {
    outputs
        .iter()
        .try_for_each(|output| render_output(out, output, color))
}

/// Write the command prompt without a trailing newline.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn render_prompt<W: Write>(
    out: &mut W,
    prompt: &str,
    last_failed: bool,
    color: bool,
) -> io::Result<()> {
    paint(out, prompt, color.then(|| style::prompt_color(last_failed)))
}

/// Write the closing message shown when the session ends.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn render_farewell<W: Write>(out: &mut W, color: bool) -> io::Result<()> {
    out.write_all(b"\n")?;
    paint(out, "Goodbye!", color.then_some(style::STATUS))?;
    out.write_all(b"\n\n")
}
