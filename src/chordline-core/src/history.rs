//! Line history for the inputbar.

use tracing::trace;

/// Default number of lines kept by [`InputHistory`].
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// A store of submitted lines, navigated from the inputbar.
///
/// `next` and `previous` receive the current inputbar text; a store may use
/// it to filter entries.
pub trait History {
    fn append(&mut self, line: &str);
    fn next(&mut self, current: &str) -> Option<String>;
    fn previous(&mut self, current: &str) -> Option<String>;
    /// Forget the navigation position.
    fn reset(&mut self);
}

#[derive(Debug, Clone)]
struct Navigation {
    /// Index into `lines`; `lines.len()` means past the newest entry.
    index: usize,
    /// Text present when navigation started, used as a prefix filter.
    saved: String,
}

/// In-memory bounded history.
///
/// Empty lines are not stored and a repeated line moves to the newest slot.
/// Navigation only visits lines starting with the text that was present when
/// navigation began; stepping forward past the newest match restores that
/// text.
#[derive(Debug, Clone)]
pub struct InputHistory {
    lines: Vec<String>,
    limit: usize,
    navigation: Option<Navigation>,
}

impl Default for InputHistory {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl InputHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            lines: Vec::new(),
            limit: limit.max(1),
            navigation: None,
        }
    }

    /// Stored lines, oldest first.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl History for InputHistory {
    fn append(&mut self, line: &str) {
        self.navigation = None;
        if line.trim().is_empty() {
            return;
        }
        self.lines.retain(|l| l != line);
        self.lines.push(line.to_string());
        if self.lines.len() > self.limit {
            let excess = self.lines.len() - self.limit;
            self.lines.drain(..excess);
        }
        trace!(entries = self.lines.len(), "history appended");
    }

    fn previous(&mut self, current: &str) -> Option<String> {
        let len = self.lines.len();
        let nav = self.navigation.get_or_insert_with(|| Navigation {
            index: len,
            saved: current.to_string(),
        });

        let found = self.lines[..nav.index.min(len)]
            .iter()
            .rposition(|l| l.starts_with(&nav.saved))?;
        nav.index = found;
        Some(self.lines[found].clone())
    }

    fn next(&mut self, _current: &str) -> Option<String> {
        let nav = self.navigation.as_mut()?;
        let start = nav.index + 1;
        if let Some(offset) = self
            .lines
            .iter()
            .skip(start)
            .position(|l| l.starts_with(&nav.saved))
        {
            nav.index = start + offset;
            return Some(self.lines[nav.index].clone());
        }

        let saved = std::mem::take(&mut nav.saved);
        self.navigation = None;
        Some(saved)
    }

    fn reset(&mut self) {
        self.navigation = None;
    }
}
