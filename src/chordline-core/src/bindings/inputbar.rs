//! Inputbar (line edit) shortcuts. These have no mode filter.

use std::fmt;

use chordline_input::KeyChord;
use tracing::info;

use super::Registration;
use crate::action::{ActionRef, Argument};

#[derive(Clone)]
pub struct InputbarShortcut {
    pub chord: KeyChord,
    pub argument: Argument,
    pub action: ActionRef,
}

impl fmt::Debug for InputbarShortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputbarShortcut")
            .field("chord", &self.chord)
            .field("argument", &self.argument)
            .finish_non_exhaustive()
    }
}

impl InputbarShortcut {
    pub fn new(chord: KeyChord, action: ActionRef) -> Self {
        Self {
            chord,
            argument: Argument::NONE,
            action,
        }
    }

    pub fn with_argument(mut self, argument: Argument) -> Self {
        self.argument = argument;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct InputbarTable {
    shortcuts: Vec<InputbarShortcut>,
}

impl InputbarTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a shortcut; an existing one for the same chord is updated.
    pub fn add(&mut self, shortcut: InputbarShortcut) -> Registration {
        if let Some(existing) = self.shortcuts.iter_mut().find(|s| s.chord == shortcut.chord) {
            existing.action = shortcut.action;
            existing.argument = shortcut.argument;
            info!(key = %existing.chord, "replaced inputbar shortcut");
            return Registration::Replaced(1);
        }
        self.shortcuts.push(shortcut);
        Registration::Added
    }

    pub fn remove(&mut self, chord: KeyChord) -> bool {
        match self.shortcuts.iter().position(|s| s.chord == chord) {
            Some(index) => {
                self.shortcuts.remove(index);
                true
            }
            None => false,
        }
    }

    /// Exact chord lookup.
    pub fn resolve(&self, chord: KeyChord) -> Option<&InputbarShortcut> {
        self.shortcuts.iter().find(|s| s.chord == chord)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputbarShortcut> {
        self.shortcuts.iter()
    }

    pub fn len(&self) -> usize {
        self.shortcuts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shortcuts.is_empty()
    }
}
