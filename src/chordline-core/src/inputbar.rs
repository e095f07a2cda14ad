//! Inputbar line editing and its built-in actions.
//!
//! The inputbar text normally starts with a one-character prompt such as `:`
//! or `/`. Edits that move towards the start of the line stop after that
//! character, and deleting the last character closes the inputbar.

use chordline_input::{KeyChord, ModifierMask, keysyms};
use tracing::{debug, trace};

use crate::action::ActionRef;
use crate::bindings::InputbarShortcut;
use crate::completion::Direction;
use crate::session::Session;
use crate::settings::word_separators;

// ============================================================
// LINE EDIT
// ============================================================

/// An editing operation on the inputbar line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditOp {
    DeleteLastChar,
    DeleteCurrentChar,
    DeleteLastWord,
    DeleteToLineStart,
    DeleteToLineEnd,
    NextChar,
    PreviousChar,
    GotoStart,
    GotoEnd,
}

/// What applying an [`EditOp`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditResult {
    /// The text changed.
    Changed,
    /// Only the cursor moved, or nothing happened.
    Unchanged,
    /// The line is empty apart from the prompt; the inputbar should close.
    Abort,
}

/// History navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryDirection {
    Next,
    Previous,
}

/// Text and cursor of the inputbar. The cursor counts characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineEdit {
    pub text: String,
    pub cursor: usize,
}

impl LineEdit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the text and put the cursor at its end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Lowest cursor position an edit may leave: just after the prompt.
    fn floor(&self) -> usize {
        usize::from(!self.text.is_empty())
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map_or(self.text.len(), |(byte, _)| byte)
    }

    fn remove_range(&mut self, start: usize, end: usize) {
        let (start_byte, end_byte) = (self.byte_offset(start), self.byte_offset(end));
        self.text.replace_range(start_byte..end_byte, "");
        self.cursor = start;
    }

    /// Apply `op`. `separators` are the characters that end a word.
    pub fn apply(&mut self, op: EditOp, separators: &str) -> EditResult {
        let len = self.len();
        self.cursor = self.cursor.min(len);

        match op {
            EditOp::DeleteLastChar => {
                if len <= 1 {
                    return EditResult::Abort;
                }
                if self.cursor <= self.floor() {
                    return EditResult::Unchanged;
                }
                self.remove_range(self.cursor - 1, self.cursor);
                EditResult::Changed
            }
            EditOp::DeleteCurrentChar => {
                if self.cursor >= len {
                    return EditResult::Unchanged;
                }
                let cursor = self.cursor;
                self.remove_range(cursor, cursor + 1);
                EditResult::Changed
            }
            EditOp::DeleteLastWord => {
                let floor = self.floor();
                if self.cursor <= floor {
                    return EditResult::Unchanged;
                }
                let chars: Vec<char> = self.text.chars().collect();
                let is_separator = |c: char| separators.contains(c);

                let mut start = self.cursor;
                while start > floor && is_separator(chars[start - 1]) {
                    start -= 1;
                }
                while start > floor && !is_separator(chars[start - 1]) {
                    start -= 1;
                }
                let end = self.cursor;
                self.remove_range(start, end);
                EditResult::Changed
            }
            EditOp::DeleteToLineStart => {
                let floor = self.floor();
                if self.cursor <= floor {
                    return EditResult::Unchanged;
                }
                let end = self.cursor;
                self.remove_range(floor, end);
                EditResult::Changed
            }
            EditOp::DeleteToLineEnd => {
                if self.cursor >= len {
                    return EditResult::Unchanged;
                }
                let byte = self.byte_offset(self.cursor);
                self.text.truncate(byte);
                EditResult::Changed
            }
            EditOp::NextChar => {
                self.cursor = (self.cursor + 1).min(len);
                EditResult::Unchanged
            }
            EditOp::PreviousChar => {
                self.cursor = self.cursor.saturating_sub(1).max(self.floor());
                EditResult::Unchanged
            }
            EditOp::GotoStart => {
                self.cursor = self.floor();
                EditResult::Unchanged
            }
            EditOp::GotoEnd => {
                self.cursor = len;
                EditResult::Unchanged
            }
        }
    }
}

// ============================================================
// ACTIONS
// ============================================================

/// Built-in inputbar actions, ready to bind.
pub mod actions {
    use super::{EditOp, HistoryDirection};
    use crate::action::{ActionRef, action};
    use crate::completion::Direction;

    /// Reset the buffer, hide completion and clear the line.
    pub fn abort() -> ActionRef {
        action(|session, _| {
            session.abort();
            true
        })
    }

    /// Step the completion cursor.
    pub fn completion(direction: Direction) -> ActionRef {
        action(move |session, _| session.on_tab_key(direction))
    }

    /// Replace the line with the next or previous history entry.
    pub fn history(direction: HistoryDirection) -> ActionRef {
        action(move |session, _| session.navigate_history(direction))
    }

    /// Apply a line edit.
    pub fn edit(op: EditOp) -> ActionRef {
        action(move |session, _| session.edit_line(op))
    }
}

impl Session {
    /// Apply `op` to the line edit.
    ///
    /// Returns false when the edit closed the inputbar.
    pub fn edit_line(&mut self, op: EditOp) -> bool {
        let separators = word_separators(self.settings());
        match self.line_edit.apply(op, &separators) {
            EditResult::Abort => {
                debug!(?op, "line emptied, aborting");
                self.abort();
                false
            }
            EditResult::Changed => {
                trace!(?op, text = %self.line_edit.text, "line edited");
                let text = self.line_edit.text.clone();
                self.fire_live_special(&text);
                true
            }
            EditResult::Unchanged => true,
        }
    }

    /// Replace the line with a history entry. Returns false when the history
    /// has nothing in that direction.
    pub fn navigate_history(&mut self, direction: HistoryDirection) -> bool {
        let current = self.line_edit.text.clone();
        let line = match direction {
            HistoryDirection::Next => self.history.next(&current),
            HistoryDirection::Previous => self.history.previous(&current),
        };
        match line {
            Some(line) => {
                self.completion.hide();
                self.line_edit.set_text(line);
                true
            }
            None => false,
        }
    }

    /// Bind the standard inputbar keys.
    pub fn register_default_inputbar_shortcuts(&mut self) {
        let none = ModifierMask::empty();
        let ctrl = ModifierMask::CONTROL;
        let key = |keyval: u32, mods: ModifierMask| KeyChord::new(keyval, mods);
        let ctrl_char = |c: char| KeyChord::with_char(c, ModifierMask::CONTROL);

        let defaults: Vec<(KeyChord, ActionRef)> = vec![
            (key(keysyms::ESCAPE, none), actions::abort()),
            (ctrl_char('['), actions::abort()),
            (ctrl_char('c'), actions::abort()),
            (key(keysyms::TAB, none), actions::completion(Direction::Next)),
            (
                key(keysyms::ISO_LEFT_TAB, ModifierMask::SHIFT),
                actions::completion(Direction::Previous),
            ),
            (key(keysyms::TAB, ctrl), actions::completion(Direction::NextGroup)),
            (
                key(keysyms::ISO_LEFT_TAB, ctrl | ModifierMask::SHIFT),
                actions::completion(Direction::PreviousGroup),
            ),
            (key(keysyms::BACKSPACE, none), actions::edit(EditOp::DeleteLastChar)),
            (ctrl_char('h'), actions::edit(EditOp::DeleteLastChar)),
            (key(keysyms::DELETE, none), actions::edit(EditOp::DeleteCurrentChar)),
            (ctrl_char('w'), actions::edit(EditOp::DeleteLastWord)),
            (ctrl_char('u'), actions::edit(EditOp::DeleteToLineStart)),
            (ctrl_char('k'), actions::edit(EditOp::DeleteToLineEnd)),
            (ctrl_char('f'), actions::edit(EditOp::NextChar)),
            (ctrl_char('b'), actions::edit(EditOp::PreviousChar)),
            (ctrl_char('a'), actions::edit(EditOp::GotoStart)),
            (ctrl_char('e'), actions::edit(EditOp::GotoEnd)),
            (key(keysyms::UP, none), actions::history(HistoryDirection::Previous)),
            (key(keysyms::DOWN, none), actions::history(HistoryDirection::Next)),
            (ctrl_char('p'), actions::history(HistoryDirection::Previous)),
            (ctrl_char('n'), actions::history(HistoryDirection::Next)),
        ];

        for (chord, action) in defaults {
            self.add_inputbar_shortcut(InputbarShortcut::new(chord, action));
        }
    }
}
