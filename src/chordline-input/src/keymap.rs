//! Keymaps: hardware keycode to key symbol translation.

use std::collections::HashMap;
use std::fmt;

use crate::keyboard::ModifierMask;
use crate::keysyms;

/// Result of translating a hardware keycode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translation {
    /// The resolved key symbol.
    pub keyval: u32,
    /// Modifiers that were used up by the translation (e.g. Shift for `!`).
    pub consumed: ModifierMask,
}

/// Resolves hardware keycodes in a keyboard group.
pub trait Keymap {
    /// Translates `keycode` under `state` in `group`.
    ///
    /// Returns `None` when the keymap has no mapping for the keycode in that
    /// group.
    fn translate(&self, keycode: u16, state: ModifierMask, group: u8) -> Option<Translation>;
}

impl<K: Keymap + ?Sized> Keymap for Box<K> {
    fn translate(&self, keycode: u16, state: ModifierMask, group: u8) -> Option<Translation> {
        (**self).translate(keycode, state, group)
    }
}

/// How a single key translates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEntry {
    /// Always the same symbol.
    Plain(u32),
    /// A two-level key: `shifted` when Shift is held.
    Level {
        /// Symbol without Shift.
        base: u32,
        /// Symbol with Shift.
        shifted: u32,
    },
    /// A letter (lowercase symbol given); Shift and Caps Lock select uppercase.
    Letter(u32),
    /// A keypad key: `digit` with Num Lock, `nav` without.
    Keypad {
        /// The `KP_n` symbol.
        digit: u32,
        /// The keypad navigation symbol.
        nav: u32,
    },
    /// Tab; Shift yields `ISO_Left_Tab` and Shift stays unconsumed.
    Tab,
}

impl KeyEntry {
    fn translate(self, state: ModifierMask) -> Translation {
        let shift = state.contains(ModifierMask::SHIFT);
        match self {
            KeyEntry::Plain(keyval) => Translation {
                keyval,
                consumed: ModifierMask::empty(),
            },
            KeyEntry::Level { base, shifted } => Translation {
                keyval: if shift { shifted } else { base },
                consumed: state & ModifierMask::SHIFT,
            },
            KeyEntry::Letter(lower) => {
                let upper = shift ^ state.contains(ModifierMask::LOCK);
                Translation {
                    keyval: if upper { lower - 0x20 } else { lower },
                    consumed: state & (ModifierMask::SHIFT | ModifierMask::LOCK),
                }
            }
            KeyEntry::Keypad { digit, nav } => {
                let num_lock = state.contains(ModifierMask::NUM_LOCK);
                if num_lock && !shift {
                    Translation {
                        keyval: digit,
                        consumed: ModifierMask::NUM_LOCK,
                    }
                } else {
                    Translation {
                        keyval: nav,
                        consumed: state & (ModifierMask::NUM_LOCK | ModifierMask::SHIFT),
                    }
                }
            }
            KeyEntry::Tab => Translation {
                keyval: if shift {
                    keysyms::ISO_LEFT_TAB
                } else {
                    keysyms::TAB
                },
                consumed: ModifierMask::empty(),
            },
        }
    }
}

/// A table-driven keymap.
#[derive(Clone, Default)]
pub struct StaticKeymap {
    groups: Vec<HashMap<u16, KeyEntry>>,
}

impl fmt::Debug for StaticKeymap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticKeymap")
            .field("groups", &self.groups.len())
            .field("keys", &self.groups.iter().map(HashMap::len).sum::<usize>())
            .finish()
    }
}

impl StaticKeymap {
    /// Creates an empty keymap with one group.
    pub fn new() -> Self {
        Self {
            groups: vec![HashMap::new()],
        }
    }

    /// Adds or replaces a key in `group`, growing the group list as needed.
    pub fn with_key(mut self, group: u8, keycode: u16, entry: KeyEntry) -> Self {
        self.insert(group, keycode, entry);
        self
    }

    /// Adds or replaces a key in `group`.
    pub fn insert(&mut self, group: u8, keycode: u16, entry: KeyEntry) {
        let index = usize::from(group);
        if self.groups.len() <= index {
            self.groups.resize_with(index + 1, HashMap::new);
        }
        self.groups[index].insert(keycode, entry);
    }

    /// Number of keyboard groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// A US QWERTY layout keyed by X11 (evdev + 8) keycodes, single group.
    pub fn us() -> Self {
        let mut map = Self::new();

        const DIGITS: [(u16, char, char); 10] = [
            (10, '1', '!'),
            (11, '2', '@'),
            (12, '3', '#'),
            (13, '4', '$'),
            (14, '5', '%'),
            (15, '6', '^'),
            (16, '7', '&'),
            (17, '8', '*'),
            (18, '9', '('),
            (19, '0', ')'),
        ];
        const PUNCT: [(u16, char, char); 11] = [
            (20, '-', '_'),
            (21, '=', '+'),
            (34, '[', '{'),
            (35, ']', '}'),
            (47, ';', ':'),
            (48, '\'', '"'),
            (49, '`', '~'),
            (51, '\\', '|'),
            (59, ',', '<'),
            (60, '.', '>'),
            (61, '/', '?'),
        ];
        for (keycode, base, shifted) in DIGITS.iter().chain(PUNCT.iter()) {
            map.insert(
                0,
                *keycode,
                KeyEntry::Level {
                    base: keysyms::from_char(*base),
                    shifted: keysyms::from_char(*shifted),
                },
            );
        }

        const LETTER_ROWS: [(u16, &str); 3] = [(24, "qwertyuiop"), (38, "asdfghjkl"), (52, "zxcvbnm")];
        for (start, letters) in LETTER_ROWS {
            for (offset, letter) in (0u16..).zip(letters.chars()) {
                map.insert(0, start + offset, KeyEntry::Letter(keysyms::from_char(letter)));
            }
        }

        const KEYPAD: [(u16, u32, u32); 10] = [
            (79, 7, keysyms::KP_HOME),
            (80, 8, keysyms::KP_UP),
            (81, 9, keysyms::KP_PAGE_UP),
            (83, 4, keysyms::KP_LEFT),
            (84, 5, keysyms::KP_BEGIN),
            (85, 6, keysyms::KP_RIGHT),
            (87, 1, keysyms::KP_END),
            (88, 2, keysyms::KP_DOWN),
            (89, 3, keysyms::KP_PAGE_DOWN),
            (90, 0, keysyms::KP_INSERT),
        ];
        for (keycode, digit, nav) in KEYPAD {
            map.insert(
                0,
                keycode,
                KeyEntry::Keypad {
                    digit: keysyms::KP_0 + digit,
                    nav,
                },
            );
        }

        const PLAIN: [(u16, u32); 15] = [
            (9, keysyms::ESCAPE),
            (22, keysyms::BACKSPACE),
            (36, keysyms::RETURN),
            (65, keysyms::SPACE),
            (110, keysyms::HOME),
            (111, keysyms::UP),
            (112, keysyms::PAGE_UP),
            (113, keysyms::LEFT),
            (114, keysyms::RIGHT),
            (115, keysyms::END),
            (116, keysyms::DOWN),
            (117, keysyms::PAGE_DOWN),
            (118, keysyms::INSERT),
            (119, keysyms::DELETE),
            (104, keysyms::RETURN),
        ];
        for (keycode, keyval) in PLAIN {
            map.insert(0, keycode, KeyEntry::Plain(keyval));
        }
        map.insert(0, 23, KeyEntry::Tab);

        // F1-F10 are contiguous, F11/F12 are not.
        for n in 0u16..10 {
            map.insert(0, 67 + n, KeyEntry::Plain(keysyms::F1 + u32::from(n)));
        }
        map.insert(0, 95, KeyEntry::Plain(keysyms::F1 + 10));
        map.insert(0, 96, KeyEntry::Plain(keysyms::F1 + 11));

        map
    }
}

impl Keymap for StaticKeymap {
    fn translate(&self, keycode: u16, state: ModifierMask, group: u8) -> Option<Translation> {
        let entry = self.groups.get(usize::from(group))?.get(&keycode)?;
        Some(entry.translate(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_us_letters_and_shift() {
        let map = StaticKeymap::us();
        let lower = map.translate(44, ModifierMask::empty(), 0).unwrap();
        assert_eq!(lower.keyval, 'j' as u32);
        assert!(lower.consumed.is_empty());

        let upper = map.translate(44, ModifierMask::SHIFT, 0).unwrap();
        assert_eq!(upper.keyval, 'J' as u32);
        assert_eq!(upper.consumed, ModifierMask::SHIFT);

        let caps = map.translate(44, ModifierMask::LOCK, 0).unwrap();
        assert_eq!(caps.keyval, 'J' as u32);
    }

    #[test]
    fn test_us_shifted_digit_row() {
        let map = StaticKeymap::us();
        let bang = map.translate(10, ModifierMask::SHIFT, 0).unwrap();
        assert_eq!(bang.keyval, '!' as u32);
        assert_eq!(bang.consumed, ModifierMask::SHIFT);
    }

    #[test]
    fn test_keypad_depends_on_num_lock() {
        let map = StaticKeymap::us();
        let digit = map.translate(90, ModifierMask::NUM_LOCK, 0).unwrap();
        assert_eq!(digit.keyval, keysyms::KP_0);

        let nav = map.translate(90, ModifierMask::empty(), 0).unwrap();
        assert_eq!(nav.keyval, keysyms::KP_INSERT);
    }

    #[test]
    fn test_shift_tab_keeps_shift() {
        let map = StaticKeymap::us();
        let back = map.translate(23, ModifierMask::SHIFT, 0).unwrap();
        assert_eq!(back.keyval, keysyms::ISO_LEFT_TAB);
        assert!(back.consumed.is_empty());
    }

    #[test]
    fn test_unknown_keycode_or_group() {
        let map = StaticKeymap::us();
        assert!(map.translate(250, ModifierMask::empty(), 0).is_none());
        assert!(map.translate(44, ModifierMask::empty(), 1).is_none());
    }

    #[test]
    fn test_with_key_grows_groups() {
        let map = StaticKeymap::new().with_key(1, 44, KeyEntry::Plain('x' as u32));
        assert_eq!(map.group_count(), 2);
        assert_eq!(
            map.translate(44, ModifierMask::empty(), 1).map(|t| t.keyval),
            Some('x' as u32)
        );
    }
}
