//! KeyNormalizer - Raw key events to canonical chords.

use std::fmt;

use tracing::trace;

use crate::keyboard::{KeyChord, ModifierMask};
use crate::keymap::Keymap;

/// Which widget owns keyboard focus when an event arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Focus {
    /// The main view (shortcut bindings).
    View,
    /// The line-edit input bar (inputbar bindings).
    Inputbar,
}

impl fmt::Display for Focus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Focus::View => write!(f, "view"),
            Focus::Inputbar => write!(f, "inputbar"),
        }
    }
}

/// A key press as delivered by the windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawKeyEvent {
    /// Hardware keycode.
    pub keycode: u16,
    /// Raw modifier and button state.
    pub state: ModifierMask,
    /// Active keyboard group (layout index).
    pub group: u8,
}

impl RawKeyEvent {
    /// Creates a raw key event.
    pub fn new(keycode: u16, state: ModifierMask, group: u8) -> Self {
        Self {
            keycode,
            state,
            group,
        }
    }

    /// Creates a raw key event from an unmasked state word.
    pub fn from_raw_state(keycode: u16, state: u32, group: u8) -> Self {
        Self::new(keycode, ModifierMask::from_bits_truncate(state), group)
    }
}

/// Maps raw key events to `(keyval, clean modifier mask)` chords.
///
/// The same normalization runs for the main view and the input bar; the
/// focus only shows up in logs.
pub struct KeyNormalizer {
    keymap: Box<dyn Keymap>,
}

impl fmt::Debug for KeyNormalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyNormalizer").finish_non_exhaustive()
    }
}

impl KeyNormalizer {
    /// Create a normalizer over a keymap.
    pub fn new(keymap: impl Keymap + 'static) -> Self {
        Self {
            keymap: Box::new(keymap),
        }
    }

    /// Replace the keymap, e.g. after a layout change.
    pub fn set_keymap(&mut self, keymap: impl Keymap + 'static) {
        self.keymap = Box::new(keymap);
    }

    /// Normalize a raw event.
    ///
    /// Returns `None` if the keymap cannot resolve the keycode in the event's
    /// group; callers treat that as "event not handled".
    pub fn normalize(&self, event: &RawKeyEvent, focus: Focus) -> Option<KeyChord> {
        let Some(translation) = self.keymap.translate(event.keycode, event.state, event.group)
        else {
            trace!(
                keycode = event.keycode,
                group = event.group,
                %focus,
                "keycode not translatable"
            );
            return None;
        };

        let clean = event.state & !translation.consumed & ModifierMask::ACCEL_MASK;
        let chord = KeyChord::new(translation.keyval, clean);
        trace!(
            keycode = event.keycode,
            keyval = chord.keyval,
            modifiers = %chord.modifiers,
            %focus,
            "normalized key"
        );
        Some(chord)
    }
}
