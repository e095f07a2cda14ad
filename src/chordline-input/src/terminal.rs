//! Terminal intake: crossterm events to chords and pointer events.
//!
//! Terminals deliver already-translated keys, so there is no keymap step.
//! The output goes through the same canonicalization as
//! [`KeyNormalizer`](crate::KeyNormalizer): keypad digits fold onto the digit
//! row, Shift is treated as consumed for character keys, and only
//! Control/Shift/Alt survive.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, MouseButton as CtMouseButton,
    MouseEvent, MouseEventKind,
};

use crate::keyboard::{KeyChord, ModifierMask};
use crate::keysyms;
use crate::mouse::{MouseButton, MouseEventType, PointerEvent};

fn modifiers_from_crossterm(mods: KeyModifiers) -> ModifierMask {
    let mut mask = ModifierMask::empty();
    if mods.contains(KeyModifiers::SHIFT) {
        mask |= ModifierMask::SHIFT;
    }
    if mods.contains(KeyModifiers::CONTROL) {
        mask |= ModifierMask::CONTROL;
    }
    if mods.contains(KeyModifiers::ALT) || mods.contains(KeyModifiers::META) {
        mask |= ModifierMask::ALT;
    }
    if mods.contains(KeyModifiers::SUPER) {
        mask |= ModifierMask::SUPER;
    }
    mask
}

fn keypad_keyval(code: KeyCode) -> Option<u32> {
    let keyval = match code {
        KeyCode::Char(c @ '0'..='9') => keysyms::KP_0 + (c as u32 - '0' as u32),
        KeyCode::Home => keysyms::KP_HOME,
        KeyCode::Left => keysyms::KP_LEFT,
        KeyCode::Up => keysyms::KP_UP,
        KeyCode::Right => keysyms::KP_RIGHT,
        KeyCode::Down => keysyms::KP_DOWN,
        KeyCode::PageUp => keysyms::KP_PAGE_UP,
        KeyCode::PageDown => keysyms::KP_PAGE_DOWN,
        KeyCode::End => keysyms::KP_END,
        KeyCode::Insert => keysyms::KP_INSERT,
        KeyCode::KeypadBegin => keysyms::KP_BEGIN,
        _ => return None,
    };
    Some(keyval)
}

/// Convert a crossterm key event.
///
/// Returns `None` for key releases and for keys with no key symbol
/// (media keys, bare modifier presses, ...).
pub fn chord_from_crossterm(event: &KeyEvent) -> Option<KeyChord> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    let mut mods = modifiers_from_crossterm(event.modifiers);

    if event.state.contains(KeyEventState::KEYPAD)
        && let Some(keyval) = keypad_keyval(event.code)
    {
        return Some(KeyChord::new(keyval, mods));
    }

    let keyval = match event.code {
        KeyCode::Char(c) => {
            if c != ' ' {
                mods.remove(ModifierMask::SHIFT);
            }
            keysyms::from_char(c)
        }
        KeyCode::Backspace => keysyms::BACKSPACE,
        KeyCode::Enter => keysyms::RETURN,
        KeyCode::Left => keysyms::LEFT,
        KeyCode::Right => keysyms::RIGHT,
        KeyCode::Up => keysyms::UP,
        KeyCode::Down => keysyms::DOWN,
        KeyCode::Home => keysyms::HOME,
        KeyCode::End => keysyms::END,
        KeyCode::PageUp => keysyms::PAGE_UP,
        KeyCode::PageDown => keysyms::PAGE_DOWN,
        KeyCode::Tab if mods.contains(ModifierMask::SHIFT) => keysyms::ISO_LEFT_TAB,
        KeyCode::Tab => keysyms::TAB,
        KeyCode::BackTab => {
            mods |= ModifierMask::SHIFT;
            keysyms::ISO_LEFT_TAB
        }
        KeyCode::Delete => keysyms::DELETE,
        KeyCode::Insert => keysyms::INSERT,
        KeyCode::Esc => keysyms::ESCAPE,
        KeyCode::F(n) => keysyms::function_key(n)?,
        _ => return None,
    };

    Some(KeyChord::new(keyval, mods))
}

fn button_from_crossterm(button: CtMouseButton) -> MouseButton {
    match button {
        CtMouseButton::Left => MouseButton::Left,
        CtMouseButton::Middle => MouseButton::Middle,
        CtMouseButton::Right => MouseButton::Right,
    }
}

/// Convert a crossterm mouse event.
///
/// Drags become [`MouseEventType::Motion`] with the dragged button's held bit
/// set in the modifiers.
pub fn pointer_from_crossterm(event: &MouseEvent) -> PointerEvent {
    let mut modifiers = modifiers_from_crossterm(event.modifiers);
    let (event_type, button) = match event.kind {
        MouseEventKind::Down(b) => (MouseEventType::ButtonPress, button_from_crossterm(b)),
        MouseEventKind::Up(b) => (MouseEventType::ButtonRelease, button_from_crossterm(b)),
        MouseEventKind::Drag(b) => {
            let button = button_from_crossterm(b);
            modifiers |= button.held_mask();
            (MouseEventType::Motion, MouseButton::None)
        }
        MouseEventKind::Moved => (MouseEventType::Motion, MouseButton::None),
        MouseEventKind::ScrollUp => (MouseEventType::ScrollUp, MouseButton::None),
        MouseEventKind::ScrollDown => (MouseEventType::ScrollDown, MouseButton::None),
        MouseEventKind::ScrollLeft => (MouseEventType::ScrollLeft, MouseButton::None),
        MouseEventKind::ScrollRight => (MouseEventType::ScrollRight, MouseButton::None),
    };

    PointerEvent::new(event_type, button, modifiers)
        .at(f64::from(event.column), f64::from(event.row))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_char_keys_consume_shift() {
        let chord = chord_from_crossterm(&key(KeyCode::Char('A'), KeyModifiers::SHIFT)).unwrap();
        assert_eq!(chord, KeyChord::char('A'));

        let chord = chord_from_crossterm(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)).unwrap();
        assert_eq!(chord, KeyChord::with_char('c', ModifierMask::CONTROL));
    }

    #[test]
    fn test_backtab_is_shift_iso_left_tab() {
        let chord = chord_from_crossterm(&key(KeyCode::BackTab, KeyModifiers::NONE)).unwrap();
        assert_eq!(chord.keyval, keysyms::ISO_LEFT_TAB);
        assert_eq!(chord.modifiers, ModifierMask::SHIFT);
    }

    #[test]
    fn test_keypad_digits_fold() {
        let event = KeyEvent::new_with_kind_and_state(
            KeyCode::Char('4'),
            KeyModifiers::NONE,
            KeyEventKind::Press,
            KeyEventState::KEYPAD,
        );
        assert_eq!(chord_from_crossterm(&event), Some(KeyChord::char('4')));

        let nav = KeyEvent::new_with_kind_and_state(
            KeyCode::Home,
            KeyModifiers::NONE,
            KeyEventKind::Press,
            KeyEventState::KEYPAD,
        );
        assert_eq!(chord_from_crossterm(&nav).map(|c| c.keyval), Some(keysyms::KP_HOME));
    }

    #[test]
    fn test_release_is_ignored() {
        let event = KeyEvent::new_with_kind(KeyCode::Char('j'), KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(chord_from_crossterm(&event), None);
        assert_eq!(chord_from_crossterm(&key(KeyCode::Null, KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_pointer_drag_sets_button_bit() {
        let event = MouseEvent {
            kind: MouseEventKind::Drag(CtMouseButton::Left),
            column: 4,
            row: 7,
            modifiers: KeyModifiers::CONTROL,
        };
        let pointer = pointer_from_crossterm(&event);
        assert_eq!(pointer.event_type, MouseEventType::Motion);
        assert_eq!(pointer.modifiers, ModifierMask::CONTROL | ModifierMask::BUTTON1);
        assert_eq!((pointer.x, pointer.y), (4.0, 7.0));
    }
}
