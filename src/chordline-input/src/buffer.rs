//! InputBuffer - Numeric prefix and buffered-command accumulator.

use tracing::trace;

use crate::keysyms;

/// What a fed key did to the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferEvent {
    /// The key was a digit and went to the numeric prefix (or was dropped
    /// because the prefix would overflow).
    Digit,
    /// The key was appended to the pending command.
    CommandChar,
    /// The key is outside the printable range; nothing changed.
    NonBufferable,
}

impl BufferEvent {
    /// Returns true if the buffer may have changed.
    pub fn is_buffered(self) -> bool {
        !matches!(self, BufferEvent::NonBufferable)
    }
}

/// Per-session key accumulator.
///
/// Holds the repeat count typed before a binding (`32` in `32j`) and the
/// characters of an unfinished buffered command (`g` before `gt`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBufferState {
    /// Accumulated repeat count; 0 when none was typed.
    pub numeric_prefix: u32,
    /// Characters of a buffered command in progress.
    pub pending_command: Option<String>,
    /// Every printable key since the last reset, for on-screen feedback only.
    pub display_buffer: Option<String>,
}

impl InputBufferState {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a normalized keyval.
    pub fn feed(&mut self, keyval: u32) -> BufferEvent {
        let Some(c) = keysyms::is_printable(keyval)
            .then(|| keysyms::to_char(keyval))
            .flatten()
        else {
            return BufferEvent::NonBufferable;
        };

        self.display_buffer.get_or_insert_with(String::new).push(c);

        let event = if self.pending_command.is_none()
            && let Some(digit) = keysyms::digit_value(keyval)
        {
            match self
                .numeric_prefix
                .checked_mul(10)
                .and_then(|n| n.checked_add(digit))
            {
                Some(prefix) => self.numeric_prefix = prefix,
                None => trace!(
                    digit,
                    prefix = self.numeric_prefix,
                    "numeric prefix overflow, digit dropped"
                ),
            }
            BufferEvent::Digit
        } else {
            self.pending_command
                .get_or_insert_with(String::new)
                .push(c);
            BufferEvent::CommandChar
        };

        trace!(
            prefix = self.numeric_prefix,
            pending = self.pending_command.as_deref().unwrap_or(""),
            "input buffer fed"
        );
        event
    }

    /// Clears the prefix, the pending command and the display buffer.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns true if nothing has been accumulated.
    pub fn is_empty(&self) -> bool {
        self.numeric_prefix == 0 && self.pending_command.is_none() && self.display_buffer.is_none()
    }

    /// The pending buffered command, if any.
    pub fn pending(&self) -> Option<&str> {
        self.pending_command.as_deref()
    }

    /// The text to show the user.
    pub fn display(&self) -> &str {
        self.display_buffer.as_deref().unwrap_or("")
    }

    /// Number of times a dispatched binding runs: the prefix, at least once.
    pub fn repeat_count(&self) -> u32 {
        self.numeric_prefix.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_str(buf: &mut InputBufferState, s: &str) -> Vec<BufferEvent> {
        s.chars().map(|c| buf.feed(keysyms::from_char(c))).collect()
    }

    #[test]
    fn test_digits_accumulate_prefix() {
        let mut buf = InputBufferState::new();
        assert_eq!(
            feed_str(&mut buf, "32"),
            vec![BufferEvent::Digit, BufferEvent::Digit]
        );
        assert_eq!(buf.numeric_prefix, 32);
        assert_eq!(buf.pending(), None);
        assert_eq!(buf.display(), "32");
        assert_eq!(buf.repeat_count(), 32);
    }

    #[test]
    fn test_leading_zero_does_not_start_count() {
        let mut buf = InputBufferState::new();
        feed_str(&mut buf, "0");
        assert_eq!(buf.numeric_prefix, 0);
        assert_eq!(buf.repeat_count(), 1);
        feed_str(&mut buf, "5");
        assert_eq!(buf.numeric_prefix, 5);
    }

    #[test]
    fn test_digits_after_command_char_are_command_chars() {
        let mut buf = InputBufferState::new();
        assert_eq!(
            feed_str(&mut buf, "2g3"),
            vec![
                BufferEvent::Digit,
                BufferEvent::CommandChar,
                BufferEvent::CommandChar
            ]
        );
        assert_eq!(buf.numeric_prefix, 2);
        assert_eq!(buf.pending(), Some("g3"));
        assert_eq!(buf.display(), "2g3");
    }

    #[test]
    fn test_overflow_drops_digit() {
        let mut buf = InputBufferState::new();
        feed_str(&mut buf, "4294967295");
        assert_eq!(buf.numeric_prefix, u32::MAX);
        assert_eq!(feed_str(&mut buf, "1"), vec![BufferEvent::Digit]);
        assert_eq!(buf.numeric_prefix, u32::MAX);
    }

    #[test]
    fn test_non_printable_is_ignored() {
        let mut buf = InputBufferState::new();
        assert_eq!(buf.feed(keysyms::SPACE), BufferEvent::NonBufferable);
        assert_eq!(buf.feed(keysyms::ESCAPE), BufferEvent::NonBufferable);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_reset() {
        let mut buf = InputBufferState::new();
        feed_str(&mut buf, "3gt");
        assert!(!buf.is_empty());
        buf.reset();
        assert!(buf.is_empty());
        assert_eq!(buf, InputBufferState::default());
    }
}
