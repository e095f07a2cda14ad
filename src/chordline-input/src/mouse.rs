//! Pointer event types.

use std::fmt;

use crate::keyboard::ModifierMask;

/// A pointer button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseButton {
    /// No button (motion and scroll events).
    #[default]
    None,
    /// Button 1.
    Left,
    /// Button 2.
    Middle,
    /// Button 3.
    Right,
    /// Any higher-numbered button.
    Other(u32),
}

impl MouseButton {
    /// Maps a windowing-system button number (1 = left).
    pub fn from_number(n: u32) -> Self {
        match n {
            0 => MouseButton::None,
            1 => MouseButton::Left,
            2 => MouseButton::Middle,
            3 => MouseButton::Right,
            n => MouseButton::Other(n),
        }
    }

    /// The windowing-system button number.
    pub fn number(self) -> u32 {
        match self {
            MouseButton::None => 0,
            MouseButton::Left => 1,
            MouseButton::Middle => 2,
            MouseButton::Right => 3,
            MouseButton::Other(n) => n,
        }
    }

    /// The modifier bit set while this button is held, if it has one.
    pub fn held_mask(self) -> ModifierMask {
        match self.number() {
            1 => ModifierMask::BUTTON1,
            2 => ModifierMask::BUTTON2,
            3 => ModifierMask::BUTTON3,
            4 => ModifierMask::BUTTON4,
            5 => ModifierMask::BUTTON5,
            _ => ModifierMask::empty(),
        }
    }
}

/// Kind of pointer event a mouse binding reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventType {
    ButtonPress,
    DoubleClick,
    TripleClick,
    ButtonRelease,
    Motion,
    ScrollUp,
    ScrollDown,
    ScrollLeft,
    ScrollRight,
    ScrollBidirectional,
    Other,
}

impl MouseEventType {
    /// All event types, in declaration order.
    pub const ALL: [MouseEventType; 11] = [
        MouseEventType::ButtonPress,
        MouseEventType::DoubleClick,
        MouseEventType::TripleClick,
        MouseEventType::ButtonRelease,
        MouseEventType::Motion,
        MouseEventType::ScrollUp,
        MouseEventType::ScrollDown,
        MouseEventType::ScrollLeft,
        MouseEventType::ScrollRight,
        MouseEventType::ScrollBidirectional,
        MouseEventType::Other,
    ];

    /// Short lowercase name, as used in configuration.
    pub fn name(self) -> &'static str {
        match self {
            MouseEventType::ButtonPress => "press",
            MouseEventType::DoubleClick => "double-click",
            MouseEventType::TripleClick => "triple-click",
            MouseEventType::ButtonRelease => "release",
            MouseEventType::Motion => "motion",
            MouseEventType::ScrollUp => "scroll-up",
            MouseEventType::ScrollDown => "scroll-down",
            MouseEventType::ScrollLeft => "scroll-left",
            MouseEventType::ScrollRight => "scroll-right",
            MouseEventType::ScrollBidirectional => "scroll",
            MouseEventType::Other => "other",
        }
    }

    /// Looks a type up by [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Returns true for the scroll family.
    pub fn is_scroll(self) -> bool {
        matches!(
            self,
            MouseEventType::ScrollUp
                | MouseEventType::ScrollDown
                | MouseEventType::ScrollLeft
                | MouseEventType::ScrollRight
                | MouseEventType::ScrollBidirectional
        )
    }
}

impl fmt::Display for MouseEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A pointer event delivered to mouse bindings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub event_type: MouseEventType,
    pub button: MouseButton,
    /// Raw modifier and button state; matching uses
    /// [`ModifierMask::MOUSE_MASK`] bits only.
    pub modifiers: ModifierMask,
    pub x: f64,
    pub y: f64,
}

impl PointerEvent {
    /// Creates an event at the origin.
    pub fn new(event_type: MouseEventType, button: MouseButton, modifiers: ModifierMask) -> Self {
        Self {
            event_type,
            button,
            modifiers,
            x: 0.0,
            y: 0.0,
        }
    }

    /// Sets the pointer position.
    #[must_use]
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }
}
