//! Key symbol values.
//!
//! Key symbols follow the X11 keysym numbering: printable Latin-1 characters
//! map to their code point, function and navigation keys live in the `0xff00`
//! page, and any other Unicode scalar is encoded as `0x0100_0000 | codepoint`.

pub const SPACE: u32 = 0x0020;
pub const DIGIT_0: u32 = 0x0030;
pub const DIGIT_9: u32 = 0x0039;

pub const BACKSPACE: u32 = 0xff08;
pub const TAB: u32 = 0xff09;
pub const RETURN: u32 = 0xff0d;
pub const ESCAPE: u32 = 0xff1b;
pub const DELETE: u32 = 0xffff;
pub const ISO_LEFT_TAB: u32 = 0xfe20;

pub const HOME: u32 = 0xff50;
pub const LEFT: u32 = 0xff51;
pub const UP: u32 = 0xff52;
pub const RIGHT: u32 = 0xff53;
pub const DOWN: u32 = 0xff54;
pub const PAGE_UP: u32 = 0xff55;
pub const PAGE_DOWN: u32 = 0xff56;
pub const END: u32 = 0xff57;
pub const INSERT: u32 = 0xff63;

pub const KP_HOME: u32 = 0xff95;
pub const KP_LEFT: u32 = 0xff96;
pub const KP_UP: u32 = 0xff97;
pub const KP_RIGHT: u32 = 0xff98;
pub const KP_DOWN: u32 = 0xff99;
pub const KP_PAGE_UP: u32 = 0xff9a;
pub const KP_PAGE_DOWN: u32 = 0xff9b;
pub const KP_END: u32 = 0xff9c;
pub const KP_BEGIN: u32 = 0xff9d;
pub const KP_INSERT: u32 = 0xff9e;

pub const KP_0: u32 = 0xffb0;
pub const KP_9: u32 = 0xffb9;

pub const F1: u32 = 0xffbe;
pub const F35: u32 = 0xffe0;

const UNICODE_OFFSET: u32 = 0x0100_0000;

/// Returns true for the printable ASCII range that feeds the input buffer.
pub fn is_printable(keyval: u32) -> bool {
    (0x21..=0x7e).contains(&keyval)
}

/// Returns true if the keyval is a digit-row digit.
pub fn is_digit(keyval: u32) -> bool {
    (DIGIT_0..=DIGIT_9).contains(&keyval)
}

/// Returns the numeric value of a digit-row keyval.
pub fn digit_value(keyval: u32) -> Option<u32> {
    is_digit(keyval).then(|| keyval - DIGIT_0)
}

/// Rewrites `KP_0`..`KP_9` to the digit row; everything else passes through.
pub fn canonicalize_keypad(keyval: u32) -> u32 {
    if (KP_0..=KP_9).contains(&keyval) {
        keyval - KP_0 + DIGIT_0
    } else {
        keyval
    }
}

/// Returns the keyval for a function key, `F1` through `F35`.
pub fn function_key(n: u8) -> Option<u32> {
    if (1..=35).contains(&n) {
        Some(F1 + u32::from(n) - 1)
    } else {
        None
    }
}

/// Returns the keyval a character produces.
pub fn from_char(c: char) -> u32 {
    let cp = c as u32;
    if (0x20..=0x7e).contains(&cp) || (0xa0..=0xff).contains(&cp) {
        cp
    } else {
        UNICODE_OFFSET | cp
    }
}

/// Returns the character a keyval produces, if it is a character key.
pub fn to_char(keyval: u32) -> Option<char> {
    if (0x20..=0x7e).contains(&keyval) || (0xa0..=0xff).contains(&keyval) {
        char::from_u32(keyval)
    } else if keyval & 0xff00_0000 == UNICODE_OFFSET {
        char::from_u32(keyval & 0x00ff_ffff)
    } else {
        None
    }
}

const NAMES: &[(&str, u32)] = &[
    ("Space", SPACE),
    ("BackSpace", BACKSPACE),
    ("Tab", TAB),
    ("Return", RETURN),
    ("Escape", ESCAPE),
    ("Delete", DELETE),
    ("ISO_Left_Tab", ISO_LEFT_TAB),
    ("Home", HOME),
    ("Left", LEFT),
    ("Up", UP),
    ("Right", RIGHT),
    ("Down", DOWN),
    ("PageUp", PAGE_UP),
    ("PageDown", PAGE_DOWN),
    ("End", END),
    ("Insert", INSERT),
    ("KP_Home", KP_HOME),
    ("KP_Left", KP_LEFT),
    ("KP_Up", KP_UP),
    ("KP_Right", KP_RIGHT),
    ("KP_Down", KP_DOWN),
    ("KP_PageUp", KP_PAGE_UP),
    ("KP_PageDown", KP_PAGE_DOWN),
    ("KP_End", KP_END),
    ("KP_Begin", KP_BEGIN),
    ("KP_Insert", KP_INSERT),
];

const ALIASES: &[(&str, u32)] = &[
    ("esc", ESCAPE),
    ("cr", RETURN),
    ("enter", RETURN),
    ("bs", BACKSPACE),
    ("del", DELETE),
    ("ins", INSERT),
    ("pgup", PAGE_UP),
    ("pgdn", PAGE_DOWN),
    ("lt", '<' as u32),
    ("gt", '>' as u32),
    ("minus", '-' as u32),
];

/// Returns the canonical name of a non-character keyval.
pub fn name(keyval: u32) -> Option<&'static str> {
    NAMES
        .iter()
        .find(|(_, value)| *value == keyval)
        .map(|(name, _)| *name)
}

/// Looks a key up by name, case-insensitively. Accepts `F1`..`F35` and the
/// usual short aliases (`Esc`, `CR`, `BS`, ...).
pub fn from_name(name: &str) -> Option<u32> {
    if let Some(num) = name.strip_prefix('F').or_else(|| name.strip_prefix('f'))
        && let Ok(n) = num.parse::<u8>()
    {
        return function_key(n);
    }

    NAMES
        .iter()
        .chain(ALIASES.iter())
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
        .map(|(_, value)| *value)
}
