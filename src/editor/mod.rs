//! Line-oriented document storage.
//!
//! Provides the ordered line buffer and current-line cursor the command
//! interpreter edits through.

mod buffer;

pub use buffer::{BufferError, DEFAULT_LIMIT, DeleteOutcome, LineBuffer};
