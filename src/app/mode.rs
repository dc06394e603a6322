/// How the next input line is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Lines are command sequences.
    #[default]
    Prompt,
    /// The next line overwrites the current line.
    Insert,
    /// Each line is stored after opening a gap at the cursor.
    Append,
}

/// Events that can move the editor between modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The `i` command.
    InsertCommand,
    /// The `a` command.
    AppendCommand,
    /// A content line was stored.
    ContentStored,
    /// The escape character alone on a line.
    Escape,
}

impl Mode {
    /// The mode after `trigger` fires in `self`.
    ///
    /// Pairs not listed leave the mode unchanged.
    pub const fn transition(self, trigger: Trigger) -> Self {
        match (self, trigger) {
            (Self::Prompt, Trigger::InsertCommand | Trigger::AppendCommand) => Self::Insert,
            (Self::Insert | Self::Append, Trigger::ContentStored) => Self::Append,
            (Self::Insert | Self::Append, Trigger::Escape) => Self::Prompt,
            (mode, _) => mode,
        }
    }

    pub const fn is_prompt(self) -> bool {
        matches!(self, Self::Prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_enter_insert_from_prompt() {
        assert_eq!(Mode::Prompt.transition(Trigger::InsertCommand), Mode::Insert);
        assert_eq!(Mode::Prompt.transition(Trigger::AppendCommand), Mode::Insert);
    }

    #[test]
    fn test_stored_content_switches_to_append() {
        assert_eq!(Mode::Insert.transition(Trigger::ContentStored), Mode::Append);
        assert_eq!(Mode::Append.transition(Trigger::ContentStored), Mode::Append);
    }

    #[test]
    fn test_escape_returns_to_prompt() {
        assert_eq!(Mode::Insert.transition(Trigger::Escape), Mode::Prompt);
        assert_eq!(Mode::Append.transition(Trigger::Escape), Mode::Prompt);
    }

    #[test]
    fn test_unlisted_pairs_keep_mode() {
        assert_eq!(Mode::Prompt.transition(Trigger::Escape), Mode::Prompt);
        assert_eq!(Mode::Prompt.transition(Trigger::ContentStored), Mode::Prompt);
        assert_eq!(Mode::Append.transition(Trigger::InsertCommand), Mode::Append);
    }
}
