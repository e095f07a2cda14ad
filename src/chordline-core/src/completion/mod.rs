//! Command line completion.
//!
//! Completion works on lines that start with `:`. With fewer than two words
//! the candidates are command names; once a command is fixed its completer
//! supplies parameter candidates, optionally in labelled groups. The cursor
//! wraps at both ends and can jump between groups; the line is rewritten to
//! show the selected candidate.

mod engine;
mod escape;
mod window;

pub use escape::{escape, unescape};
pub use window::{is_visible, visible_indices};

/// Default number of entries shown around the cursor.
pub const DEFAULT_WINDOW: usize = 15;

// ============================================================
// COMPLETER OUTPUT
// ============================================================

/// One candidate produced by a completer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionElement {
    pub value: String,
    pub description: Option<String>,
}

/// A cluster of candidates, optionally with a header label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionGroup {
    pub label: Option<String>,
    pub elements: Vec<CompletionElement>,
}

impl CompletionGroup {
    pub fn new(label: Option<&str>) -> Self {
        Self {
            label: label.map(str::to_string),
            elements: Vec::new(),
        }
    }

    pub fn add(&mut self, value: impl Into<String>, description: Option<&str>) {
        self.elements.push(CompletionElement {
            value: value.into(),
            description: description.map(str::to_string),
        });
    }

    pub fn with(mut self, value: impl Into<String>, description: Option<&str>) -> Self {
        self.add(value, description);
        self
    }
}

/// What a completer returns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    pub groups: Vec<CompletionGroup>,
}

impl Completion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group(mut self, group: CompletionGroup) -> Self {
        self.groups.push(group);
        self
    }
}

// ============================================================
// ENTRIES AND STATE
// ============================================================

/// A row of the completion list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionEntry {
    pub is_group_header: bool,
    pub label: String,
    pub description: Option<String>,
}

impl CompletionEntry {
    pub fn header(label: impl Into<String>) -> Self {
        Self {
            is_group_header: true,
            label: label.into(),
            description: None,
        }
    }

    pub fn item(label: impl Into<String>, description: Option<String>) -> Self {
        Self {
            is_group_header: false,
            label: label.into(),
            description,
        }
    }
}

/// Cursor movement requested by a Tab-like key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Next,
    Previous,
    NextGroup,
    PreviousGroup,
}

impl Direction {
    pub fn is_forward(self) -> bool {
        matches!(self, Direction::Next | Direction::NextGroup)
    }

    pub fn is_group(self) -> bool {
        matches!(self, Direction::NextGroup | Direction::PreviousGroup)
    }
}

/// The new line text after a completion step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub text: String,
    /// Cursor position in characters; always the end of `text`.
    pub cursor: usize,
}

/// Completion list and cursor of one session.
#[derive(Debug, Clone, Default)]
pub struct CompletionState {
    entries: Vec<CompletionEntry>,
    cursor: usize,
    command_mode: bool,
    previous_command: Option<String>,
    previous_parameter: Option<String>,
    previous_length: usize,
    window: usize,
}

impl CompletionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the list and forgets what it was built from.
    pub fn hide(&mut self) {
        self.entries.clear();
        self.cursor = 0;
        self.command_mode = true;
        self.previous_command = None;
        self.previous_parameter = None;
        self.previous_length = 0;
    }

    pub fn entries(&self) -> &[CompletionEntry] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The entry under the cursor.
    pub fn selected(&self) -> Option<&CompletionEntry> {
        self.entries.get(self.cursor)
    }

    pub fn is_command_mode(&self) -> bool {
        self.command_mode
    }

    /// The list is shown only with more than one entry.
    pub fn is_shown(&self) -> bool {
        self.entries.len() > 1
    }

    /// Entries inside the display window, with their indices.
    pub fn visible(&self) -> Vec<(usize, &CompletionEntry)> {
        if !self.is_shown() {
            return Vec::new();
        }
        let window = if self.window == 0 {
            DEFAULT_WINDOW
        } else {
            self.window
        };
        visible_indices(self.cursor, self.entries.len(), window)
            .into_iter()
            .map(|i| (i, &self.entries[i]))
            .collect()
    }
}
