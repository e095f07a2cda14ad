//! Key spec parsing and formatting.
//!
//! A key spec is the textual form of a binding trigger used by configuration
//! files and the `map` command:
//!
//! - Single character: `j`, `G`, `?`
//! - Bracketed chord: `<C-a>`, `<A-x>`, `<S-Tab>`, `<C-S-Tab>`
//! - Named keys: `<Esc>`, `<Return>`, `<Up>`, `<F5>`, `<Space>`
//! - Buffered sequence: `gt`, `gg`, `zI`

use thiserror::Error;

use crate::keyboard::{KeyChord, ModifierMask};
use crate::keysyms;

/// Errors produced while parsing a key spec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeySpecError {
    #[error("empty key specification")]
    Empty,

    #[error("unknown key name: {0}")]
    UnknownKey(String),

    #[error("unknown modifier '{0}' (expected C, A, M or S)")]
    UnknownModifier(String),

    #[error("buffered key sequence contains non-printable characters: {0:?}")]
    NotPrintable(String),
}

/// A parsed binding trigger.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeySpec {
    /// A single chord.
    Chord(KeyChord),
    /// A multi-key sequence matched through the input buffer.
    Buffered(String),
}

impl KeySpec {
    /// Returns the chord, if this spec is a single chord.
    pub fn chord(&self) -> Option<KeyChord> {
        match self {
            KeySpec::Chord(chord) => Some(*chord),
            KeySpec::Buffered(_) => None,
        }
    }
}

impl std::str::FromStr for KeySpec {
    type Err = KeySpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_key_spec(s)
    }
}

/// Parse a key spec.
pub fn parse_key_spec(spec: &str) -> Result<KeySpec, KeySpecError> {
    if spec.is_empty() {
        return Err(KeySpecError::Empty);
    }

    if let Some(inner) = spec.strip_prefix('<').and_then(|s| s.strip_suffix('>'))
        && !inner.is_empty()
    {
        return parse_bracketed(inner).map(KeySpec::Chord);
    }

    let mut chars = spec.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeySpec::Chord(KeyChord::char(c)));
    }

    if spec.chars().all(|c| keysyms::is_printable(c as u32)) {
        Ok(KeySpec::Buffered(spec.to_string()))
    } else {
        Err(KeySpecError::NotPrintable(spec.to_string()))
    }
}

fn parse_bracketed(inner: &str) -> Result<KeyChord, KeySpecError> {
    let mut modifiers = ModifierMask::empty();
    let mut rest = inner;

    // `X-` prefixes are modifiers as long as something follows the dash, so
    // `<C-->` is Control+minus and `<->` is the minus key itself.
    while let Some((prefix, tail)) = rest.split_once('-')
        && !tail.is_empty()
        && prefix.chars().count() == 1
    {
        modifiers |= match prefix {
            "C" | "c" => ModifierMask::CONTROL,
            "A" | "a" | "M" | "m" => ModifierMask::ALT,
            "S" | "s" => ModifierMask::SHIFT,
            other => return Err(KeySpecError::UnknownModifier(other.to_string())),
        };
        rest = tail;
    }

    let mut chars = rest.chars();
    let keyval = match (chars.next(), chars.next()) {
        (Some(c), None) => keysyms::from_char(c),
        _ => keysyms::from_name(rest).ok_or_else(|| KeySpecError::UnknownKey(rest.to_string()))?,
    };

    Ok(apply_shift(keyval, modifiers))
}

/// Folds Shift into the key symbol the way a keymap would consume it.
fn apply_shift(keyval: u32, modifiers: ModifierMask) -> KeyChord {
    if !modifiers.contains(ModifierMask::SHIFT) {
        return KeyChord::new(keyval, modifiers);
    }

    if keyval == keysyms::TAB {
        return KeyChord::new(keysyms::ISO_LEFT_TAB, modifiers);
    }

    match keysyms::to_char(keyval) {
        Some(c) if c.is_ascii_lowercase() => KeyChord::new(
            keysyms::from_char(c.to_ascii_uppercase()),
            modifiers - ModifierMask::SHIFT,
        ),
        Some(c) if keysyms::is_printable(c as u32) => {
            KeyChord::new(keyval, modifiers - ModifierMask::SHIFT)
        }
        _ => KeyChord::new(keyval, modifiers),
    }
}

/// Format a chord as a key spec.
///
/// Unmodified printable characters are written bare, everything else in
/// angle brackets: `j`, `<C-a>`, `<S-ISO_Left_Tab>`, `<Return>`.
pub fn format_chord(chord: &KeyChord) -> String {
    let key = match keysyms::name(chord.keyval) {
        Some(name) => name.to_string(),
        None => match keysyms::to_char(chord.keyval) {
            Some(c) => c.to_string(),
            None => format!("0x{:x}", chord.keyval),
        },
    };

    let mods = chord.modifiers;
    if mods.is_empty() && keysyms::is_printable(chord.keyval) {
        return key;
    }

    let mut out = String::from("<");
    if mods.contains(ModifierMask::CONTROL) {
        out.push_str("C-");
    }
    if mods.contains(ModifierMask::ALT) {
        out.push_str("A-");
    }
    if mods.contains(ModifierMask::SHIFT) {
        out.push_str("S-");
    }
    out.push_str(&key);
    out.push('>');
    out
}
