use thiserror::Error;
use tracing::debug;

/// Default upper bound on addressable lines.
pub const DEFAULT_LIMIT: usize = 25_000;

/// Slot 0 plus at least one document line.
const MIN_LIMIT: usize = 2;

/// Errors raised by buffer mutations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("line {line} is beyond the {limit}-line limit")]
    LineOutOfRange { line: usize, limit: usize },

    #[error("document is full ({limit}-line limit)")]
    Full { limit: usize },
}

/// Result of [`LineBuffer::delete_current`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The line was removed and later lines moved down.
    Deleted(usize),
    /// The cursor was not on a live line; nothing was removed.
    Empty(usize),
}

/// An ordered sequence of text lines with a current-line cursor.
///
/// Lines are addressed from 1. Slot 0 is a scratch line reachable with
/// `goto(0)`: it can be written and read but is never part of the
/// document, so it is never printed or saved.
#[derive(Clone)]
pub struct LineBuffer {
    /// `slots[0]` is scratch, `slots[1..]` are the live lines.
    slots: Vec<String>,
    cursor: usize,
    limit: usize,
    dirty: bool,
}

impl LineBuffer {
    /// Create an empty buffer with the default line limit.
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_LIMIT)
    }

    /// Create an empty buffer addressing lines `0..limit`.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            slots: vec![String::new()],
            cursor: 1,
            limit: limit.max(MIN_LIMIT),
            dirty: false,
        }
    }

    /// Create a buffer holding `lines` as lines `1..=lines.len()`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Full`] if `lines` does not fit under the limit.
    pub fn from_lines(lines: Vec<String>, limit: usize) -> Result<Self, BufferError> {
        let mut buffer = Self::with_limit(limit);
        buffer.replace_lines(lines)?;
        Ok(buffer)
    }

    /// The current line.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of live lines.
    pub fn total(&self) -> usize {
        self.slots.len() - 1
    }

    /// Exclusive upper bound on line indices.
    pub const fn limit(&self) -> usize {
        self.limit
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Whether the document changed since creation, load, or save.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the document as saved.
    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Content of slot `idx`, or `None` past the last live line.
    pub fn line(&self, idx: usize) -> Option<&str> {
        self.slots.get(idx).map(String::as_str)
    }

    /// The live lines, first to last.
    pub fn lines(&self) -> &[String] {
        &self.slots[1..]
    }

    /// Number of characters on line `idx`; slots past the end count as empty.
    pub fn char_count(&self, idx: usize) -> usize {
        self.line(idx).map_or(0, |line| line.chars().count())
    }

    /// Move the cursor to `target`, or to 0 when `target` is past the limit.
    pub fn goto(&mut self, target: usize) -> usize {
        self.cursor = if target < self.limit { target } else { 0 };
        debug!(target, cursor = self.cursor, "goto");
        self.cursor
    }

    /// Advance the cursor one line, stopping at the last addressable slot.
    pub const fn advance(&mut self) {
        if self.cursor + 1 < self.limit {
            self.cursor += 1;
        }
    }

    /// Overwrite line `idx` with `content`.
    ///
    /// Writing past the last line extends the document to `idx`; any lines
    /// skipped over become empty. Neighbouring lines never move.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::LineOutOfRange`] if `idx` is not below the limit.
    pub fn insert_at(&mut self, idx: usize, content: impl Into<String>) -> Result<(), BufferError> {
        if idx >= self.limit {
            return Err(BufferError::LineOutOfRange {
                line: idx,
                limit: self.limit,
            });
        }
        if idx > self.total() {
            self.slots.resize_with(idx + 1, String::new);
        }
        self.slots[idx] = content.into();
        if idx > 0 {
            self.dirty = true;
        }
        debug!(line = idx, total = self.total(), "line written");
        Ok(())
    }

    /// Open an empty line at `from`, moving lines `from..=total` up one slot.
    ///
    /// The top line moves first so no line is overwritten before it has
    /// been copied. When `from` lies past the end, the document is first
    /// padded with empty lines up to it.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Full`] if the new line would reach the limit.
    pub fn append_shift(&mut self, from: usize) -> Result<(), BufferError> {
        let from = from.max(1);
        let new_total = self.total().max(from - 1) + 1;
        if new_total >= self.limit {
            return Err(BufferError::Full { limit: self.limit });
        }
        if from > self.total() + 1 {
            self.slots.resize_with(from, String::new);
        }
        self.slots.insert(from, String::new());
        self.dirty = true;
        debug!(from, total = self.total(), "lines shifted up");
        Ok(())
    }

    /// Open an empty line after the cursor and move onto it.
    ///
    /// The gap never opens past the end of the document, so appending from
    /// beyond the last line (or on an empty document) lands on
    /// `total + 1`. Returns the new cursor.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Full`] if the document is full.
    pub fn open_after_cursor(&mut self) -> Result<usize, BufferError> {
        let at = (self.cursor + 1).min(self.total() + 1);
        self.append_shift(at)?;
        self.cursor = at;
        Ok(at)
    }

    /// Delete the line under the cursor.
    ///
    /// Lines after it move down one slot, lowest first. A cursor outside
    /// `1..=total` deletes nothing.
    pub fn delete_current(&mut self) -> DeleteOutcome {
        let line = self.cursor;
        if (1..=self.total()).contains(&line) {
            self.slots.remove(line);
            self.dirty = true;
            self.cursor = self.cursor.min(self.total() + 1);
            debug!(line, total = self.total(), "line deleted");
            DeleteOutcome::Deleted(line)
        } else {
            if line == 0 {
                self.slots[0].clear();
            }
            DeleteOutcome::Empty(line)
        }
    }

    /// Replace the whole document, leaving the cursor after the last line.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Full`] if `lines` does not fit under the limit;
    /// the buffer is left untouched in that case.
    pub fn replace_lines(&mut self, lines: Vec<String>) -> Result<(), BufferError> {
        if lines.len() >= self.limit {
            return Err(BufferError::Full { limit: self.limit });
        }
        self.slots.truncate(1);
        self.slots[0].clear();
        self.slots.extend(lines);
        self.cursor = (self.total() + 1).min(self.limit - 1);
        self.dirty = false;
        debug!(total = self.total(), "document replaced");
        Ok(())
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LineBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineBuffer")
            .field("total", &self.total())
            .field("cursor", &self.cursor)
            .field("limit", &self.limit)
            .field("dirty", &self.dirty)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(lines: &[&str]) -> LineBuffer {
        LineBuffer::from_lines(lines.iter().map(ToString::to_string).collect(), DEFAULT_LIMIT)
            .unwrap()
    }

    // --- Construction ---

    #[test]
    fn test_new_buffer_is_empty_on_line_one() {
        let buf = LineBuffer::new();
        assert_eq!(buf.total(), 0);
        assert_eq!(buf.cursor(), 1);
        assert!(buf.is_empty());
        assert!(buf.lines().is_empty());
    }

    #[test]
    fn test_from_lines_places_cursor_after_last_line() {
        let buf = buffer(&["one", "two", "three"]);
        assert_eq!(buf.total(), 3);
        assert_eq!(buf.cursor(), 4);
        assert_eq!(buf.line(1), Some("one"));
        assert_eq!(buf.line(3), Some("three"));
        assert_eq!(buf.line(4), None);
    }

    #[test]
    fn test_limit_has_a_floor() {
        let buf = LineBuffer::with_limit(0);
        assert_eq!(buf.limit(), MIN_LIMIT);
    }

    // --- insert_at ---

    #[test]
    fn test_insert_at_overwrites_without_shifting() {
        let mut buf = buffer(&["a", "b", "c"]);
        buf.insert_at(2, "B").unwrap();
        assert_eq!(buf.lines(), ["a", "B", "c"]);
        assert_eq!(buf.total(), 3);
    }

    #[test]
    fn test_insert_at_past_end_extends_with_blank_lines() {
        let mut buf = buffer(&["a"]);
        buf.insert_at(4, "d").unwrap();
        assert_eq!(buf.total(), 4);
        assert_eq!(buf.lines(), ["a", "", "", "d"]);
    }

    #[test]
    fn test_insert_at_slot_zero_is_not_part_of_document() {
        let mut buf = LineBuffer::new();
        buf.insert_at(0, "scratch").unwrap();
        assert_eq!(buf.total(), 0);
        assert_eq!(buf.line(0), Some("scratch"));
        assert!(!buf.is_dirty());
    }

    #[test]
    fn test_insert_at_limit_is_rejected() {
        let mut buf = LineBuffer::with_limit(3);
        assert_eq!(
            buf.insert_at(3, "x"),
            Err(BufferError::LineOutOfRange { line: 3, limit: 3 })
        );
        assert_eq!(buf.total(), 0);
    }

    // --- append_shift ---

    #[test]
    fn test_append_shift_moves_tail_up() {
        let mut buf = buffer(&["a", "b", "c"]);
        buf.append_shift(2).unwrap();
        assert_eq!(buf.lines(), ["a", "", "b", "c"]);
        assert_eq!(buf.total(), 4);
    }

    #[test]
    fn test_append_shift_at_end_adds_blank_line() {
        let mut buf = buffer(&["a"]);
        buf.append_shift(2).unwrap();
        assert_eq!(buf.lines(), ["a", ""]);
    }

    #[test]
    fn test_append_shift_past_end_pads() {
        let mut buf = buffer(&["a"]);
        buf.append_shift(4).unwrap();
        assert_eq!(buf.lines(), ["a", "", "", ""]);
    }

    #[test]
    fn test_append_shift_never_moves_scratch_slot() {
        let mut buf = buffer(&["a"]);
        buf.insert_at(0, "scratch").unwrap();
        buf.append_shift(0).unwrap();
        assert_eq!(buf.line(0), Some("scratch"));
        assert_eq!(buf.lines(), ["", "a"]);
    }

    #[test]
    fn test_append_shift_when_full() {
        let mut buf = LineBuffer::from_lines(vec!["a".into(), "b".into()], 3).unwrap();
        assert_eq!(buf.append_shift(1), Err(BufferError::Full { limit: 3 }));
        assert_eq!(buf.lines(), ["a", "b"]);
    }

    // --- open_after_cursor ---

    #[test]
    fn test_open_after_cursor_on_empty_document() {
        let mut buf = LineBuffer::new();
        assert_eq!(buf.open_after_cursor(), Ok(1));
        assert_eq!(buf.total(), 1);
        assert_eq!(buf.cursor(), 1);
    }

    #[test]
    fn test_open_after_cursor_mid_document() {
        let mut buf = buffer(&["a", "b", "c"]);
        buf.goto(1);
        assert_eq!(buf.open_after_cursor(), Ok(2));
        assert_eq!(buf.lines(), ["a", "", "b", "c"]);
    }

    #[test]
    fn test_open_after_cursor_beyond_end_lands_on_next_line() {
        let mut buf = buffer(&["a"]);
        buf.goto(9);
        assert_eq!(buf.open_after_cursor(), Ok(2));
        assert_eq!(buf.lines(), ["a", ""]);
    }

    // --- delete_current ---

    #[test]
    fn test_delete_current_removes_line() {
        let mut buf = buffer(&["a", "b", "c"]);
        buf.goto(2);
        assert_eq!(buf.delete_current(), DeleteOutcome::Deleted(2));
        assert_eq!(buf.lines(), ["a", "c"]);
        assert_eq!(buf.cursor(), 2);
    }

    #[test]
    fn test_delete_last_line_keeps_cursor_in_range() {
        let mut buf = buffer(&["a", "b"]);
        buf.goto(2);
        buf.delete_current();
        assert_eq!(buf.total(), 1);
        assert_eq!(buf.cursor(), 2);
    }

    #[test]
    fn test_delete_past_end_is_noop() {
        let mut buf = buffer(&["a", "b"]);
        assert_eq!(buf.delete_current(), DeleteOutcome::Empty(3));
        assert_eq!(buf.total(), 2);
        assert!(!buf.is_dirty());
    }

    #[test]
    fn test_delete_on_scratch_slot_clears_it() {
        let mut buf = buffer(&["a"]);
        buf.goto(0);
        buf.insert_at(0, "scratch").unwrap();
        assert_eq!(buf.delete_current(), DeleteOutcome::Empty(0));
        assert_eq!(buf.line(0), Some(""));
        assert_eq!(buf.lines(), ["a"]);
    }

    // --- goto / char_count ---

    #[test]
    fn test_goto_within_limit() {
        let mut buf = LineBuffer::with_limit(10);
        assert_eq!(buf.goto(9), 9);
    }

    #[test]
    fn test_goto_out_of_range_resets_to_zero() {
        let mut buf = LineBuffer::with_limit(10);
        buf.goto(5);
        assert_eq!(buf.goto(10), 0);
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn test_char_count_counts_characters() {
        let buf = buffer(&["café", ""]);
        assert_eq!(buf.char_count(1), 4);
        assert_eq!(buf.char_count(2), 0);
        assert_eq!(buf.char_count(99), 0);
    }

    #[test]
    fn test_advance_stops_at_last_slot() {
        let mut buf = LineBuffer::with_limit(3);
        buf.goto(2);
        buf.advance();
        assert_eq!(buf.cursor(), 2);
    }

    // --- Dirty tracking ---

    #[test]
    fn test_mutation_marks_dirty_and_replace_cleans() {
        let mut buf = LineBuffer::new();
        buf.insert_at(1, "x").unwrap();
        assert!(buf.is_dirty());
        buf.mark_clean();
        assert!(!buf.is_dirty());
        buf.append_shift(1).unwrap();
        assert!(buf.is_dirty());
        buf.replace_lines(vec!["y".into()]).unwrap();
        assert!(!buf.is_dirty());
    }

    #[test]
    fn test_replace_lines_too_long_leaves_buffer_untouched() {
        let mut buf = LineBuffer::from_lines(vec!["keep".into()], 3).unwrap();
        let err = buf.replace_lines(vec!["a".into(), "b".into(), "c".into()]);
        assert_eq!(err, Err(BufferError::Full { limit: 3 }));
        assert_eq!(buf.lines(), ["keep"]);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn lines_strategy() -> impl Strategy<Value = Vec<String>> {
            prop::collection::vec("[a-z ]{0,8}", 0..40)
        }

        proptest! {
            #[test]
            fn append_shift_preserves_tail(lines in lines_strategy(), at in 1..45usize) {
                let mut buf = LineBuffer::from_lines(lines.clone(), DEFAULT_LIMIT).unwrap();
                let total = buf.total();
                prop_assume!(at <= total + 1);

                buf.append_shift(at).unwrap();
                buf.insert_at(at, "new").unwrap();

                prop_assert_eq!(buf.total(), total + 1);
                prop_assert_eq!(buf.line(at), Some("new"));
                for idx in 1..at {
                    prop_assert_eq!(buf.line(idx), Some(lines[idx - 1].as_str()));
                }
                for idx in at..=total {
                    prop_assert_eq!(buf.line(idx + 1), Some(lines[idx - 1].as_str()));
                }
            }

            #[test]
            fn delete_removes_exactly_one_line(lines in lines_strategy(), at in 0..45usize) {
                let mut buf = LineBuffer::from_lines(lines.clone(), DEFAULT_LIMIT).unwrap();
                let total = buf.total();
                buf.goto(at);

                let outcome = buf.delete_current();

                if (1..=total).contains(&at) {
                    prop_assert_eq!(outcome, DeleteOutcome::Deleted(at));
                    prop_assert_eq!(buf.total(), total - 1);
                    let mut expected = lines.clone();
                    expected.remove(at - 1);
                    prop_assert_eq!(buf.lines(), expected.as_slice());
                    prop_assert!(buf.cursor() <= buf.total() + 1);
                } else {
                    prop_assert_eq!(outcome, DeleteOutcome::Empty(at));
                    prop_assert_eq!(buf.lines(), lines.as_slice());
                    prop_assert_eq!(buf.cursor(), at);
                }
            }
        }
    }
}
