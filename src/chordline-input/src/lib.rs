//! # Chordline Input
//!
//! Keyboard and mouse intake for the chordline command layer.
//!
//! This crate turns raw key and pointer events into the canonical values the
//! resolution engine matches against, and owns the per-session accumulator
//! that collects numeric repeat counts and multi-key buffered commands.
//!
//! ## Features
//!
//! - **Key chords**: [`KeyChord`] pairs a key symbol with a cleaned
//!   [`ModifierMask`] (Control/Shift/Alt only).
//!
//! - **Normalization**: [`KeyNormalizer`] resolves hardware keycodes through a
//!   [`Keymap`], strips consumed modifiers and folds keypad digits onto the
//!   digit row.
//!
//! - **Input buffer**: [`InputBufferState`] accumulates `32` in `32j` and the
//!   `g` in `gt`, the way modal viewers expect.
//!
//! - **Key specs**: [`parse_key_spec`] reads `<C-a>`, `<S-Tab>`, `j` and `gt`
//!   style descriptions used by configuration and the `map` command.
//!
//! - **Terminal intake**: [`chord_from_crossterm`] applies the same
//!   canonicalization to crossterm events.
//!
//! ## Quick Start
//!
//! ```
//! use chordline_input::{Focus, KeyNormalizer, ModifierMask, RawKeyEvent, StaticKeymap, keysyms};
//!
//! let normalizer = KeyNormalizer::new(StaticKeymap::us());
//!
//! // X11 keycode 44 is `j` on a US layout.
//! let raw = RawKeyEvent::new(44, ModifierMask::NUM_LOCK, 0);
//! let chord = normalizer.normalize(&raw, Focus::View).unwrap();
//! assert_eq!(chord.keyval, keysyms::from_char('j'));
//! assert!(chord.modifiers.is_empty());
//! ```

pub mod buffer;
pub mod key_spec;
pub mod keyboard;
pub mod keymap;
pub mod keysyms;
pub mod mouse;
pub mod normalizer;
pub mod terminal;

pub use buffer::{BufferEvent, InputBufferState};
pub use key_spec::{KeySpec, KeySpecError, format_chord, parse_key_spec};
pub use keyboard::{KeyChord, ModifierMask};
pub use keymap::{KeyEntry, Keymap, StaticKeymap, Translation};
pub use mouse::{MouseButton, MouseEventType, PointerEvent};
pub use normalizer::{Focus, KeyNormalizer, RawKeyEvent};
pub use terminal::{chord_from_crossterm, pointer_from_crossterm};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::buffer::{BufferEvent, InputBufferState};
    pub use crate::keyboard::{KeyChord, ModifierMask};
    pub use crate::keymap::{Keymap, StaticKeymap};
    pub use crate::mouse::{MouseButton, MouseEventType, PointerEvent};
    pub use crate::normalizer::{Focus, KeyNormalizer, RawKeyEvent};
}
