// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. editor::LineBuffer)
    clippy::module_name_repetitions
)]

//! # ded
//!
//! A tiny modal line editor for the terminal.
//!
//! ded keeps a document as an ordered list of lines and is driven by
//! single-character commands typed at a prompt:
//! - `i` / `a` to insert or append lines
//! - `d` to delete, `g<N>` to move between lines
//! - `p` / `n` to print, `w` / `r` to save and reload
//!
//! ## Architecture
//!
//! ded uses The Elm Architecture (TEA) pattern:
//! - **Model**: Editor state (document, cursor, mode, prompt, file)
//! - **Message**: One command or content line
//! - **Update**: State transitions
//! - **View**: Output records rendered to the terminal
//!
//! ## Modules
//!
//! - [`app`]: Command interpreter and read loop
//! - [`editor`]: Line buffer and cursor
//! - [`store`]: Loading and saving documents
//! - [`config`]: Saved defaults
//! - [`ui`]: Terminal output

pub mod app;
pub mod config;
pub mod editor;
pub mod store;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Mode, Model, Output};
    pub use crate::editor::LineBuffer;
}
