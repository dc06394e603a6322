//! Terminal output.
//!
//! - [`style`]: Colours for each kind of output
//! - [`render`]: Writers for output records, the prompt, and the farewell

pub mod style;

mod render;

pub use render::{render_farewell, render_output, render_outputs, render_prompt};
