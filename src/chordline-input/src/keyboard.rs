//! Keyboard chord types.
//!
//! This module provides the modifier mask and the normalized key chord that
//! every binding lookup matches against.

use bitflags::bitflags;
use std::fmt;

use crate::keysyms;

bitflags! {
    /// Modifier and pointer-button state bits.
    ///
    /// The layout mirrors the X11 core protocol state field so that raw state
    /// words from a windowing system can be taken with
    /// [`ModifierMask::from_bits_truncate`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModifierMask: u32 {
        /// Shift modifier.
        const SHIFT = 1 << 0;
        /// Caps Lock.
        const LOCK = 1 << 1;
        /// Control modifier.
        const CONTROL = 1 << 2;
        /// Alt (Mod1).
        const ALT = 1 << 3;
        /// Num Lock (Mod2).
        const NUM_LOCK = 1 << 4;
        /// Mod3.
        const MOD3 = 1 << 5;
        /// Super/Windows/Command (Mod4).
        const SUPER = 1 << 6;
        /// Mod5.
        const MOD5 = 1 << 7;
        /// Primary pointer button held.
        const BUTTON1 = 1 << 8;
        /// Middle pointer button held.
        const BUTTON2 = 1 << 9;
        /// Secondary pointer button held.
        const BUTTON3 = 1 << 10;
        /// Button 4 held.
        const BUTTON4 = 1 << 11;
        /// Button 5 held.
        const BUTTON5 = 1 << 12;

        /// Modifiers that participate in key matching.
        const ACCEL_MASK = Self::SHIFT.bits() | Self::CONTROL.bits() | Self::ALT.bits();
        /// Pointer button bits.
        const BUTTON_MASK = Self::BUTTON1.bits()
            | Self::BUTTON2.bits()
            | Self::BUTTON3.bits()
            | Self::BUTTON4.bits()
            | Self::BUTTON5.bits();
        /// Modifiers that participate in mouse matching.
        const MOUSE_MASK = Self::ACCEL_MASK.bits() | Self::BUTTON_MASK.bits();
    }
}

impl ModifierMask {
    /// Keeps only the bits relevant to keyboard bindings.
    #[must_use]
    pub fn accel(self) -> Self {
        self & Self::ACCEL_MASK
    }

    /// Keeps only the bits relevant to mouse bindings.
    #[must_use]
    pub fn mouse(self) -> Self {
        self & Self::MOUSE_MASK
    }
}

impl fmt::Display for ModifierMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.contains(ModifierMask::CONTROL) {
            parts.push("Ctrl");
        }
        if self.contains(ModifierMask::ALT) {
            parts.push("Alt");
        }
        if self.contains(ModifierMask::SHIFT) {
            parts.push("Shift");
        }
        if self.contains(ModifierMask::SUPER) {
            parts.push("Super");
        }
        if parts.is_empty() {
            write!(f, "None")
        } else {
            write!(f, "{}", parts.join("+"))
        }
    }
}

/// A normalized key press: a key symbol plus the cleaned modifier mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyChord {
    /// The key symbol, with keypad digits already folded onto the digit row.
    pub keyval: u32,
    /// Control/Shift/Alt bits that were held and not consumed by the keymap.
    pub modifiers: ModifierMask,
}

impl KeyChord {
    /// Creates a chord, masking the modifiers down to [`ModifierMask::ACCEL_MASK`].
    #[must_use]
    pub fn new(keyval: u32, modifiers: ModifierMask) -> Self {
        Self {
            keyval: keysyms::canonicalize_keypad(keyval),
            modifiers: modifiers.accel(),
        }
    }

    /// Creates a chord for a character with no modifiers.
    #[must_use]
    pub fn char(c: char) -> Self {
        Self::new(keysyms::from_char(c), ModifierMask::empty())
    }

    /// Creates a chord for a character with the given modifiers.
    #[must_use]
    pub fn with_char(c: char, modifiers: ModifierMask) -> Self {
        Self::new(keysyms::from_char(c), modifiers)
    }

    /// Returns true if the key feeds the input buffer.
    #[must_use]
    pub fn is_printable(&self) -> bool {
        keysyms::is_printable(self.keyval)
    }

    /// Returns the character this chord produces, if any.
    #[must_use]
    pub fn as_char(&self) -> Option<char> {
        keysyms::to_char(self.keyval)
    }

    /// Returns true if the Control modifier is held.
    #[must_use]
    pub fn ctrl(&self) -> bool {
        self.modifiers.contains(ModifierMask::CONTROL)
    }

    /// Returns true if the Shift modifier is held.
    #[must_use]
    pub fn shift(&self) -> bool {
        self.modifiers.contains(ModifierMask::SHIFT)
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::key_spec::format_chord(self))
    }
}
