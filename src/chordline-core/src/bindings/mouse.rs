//! Mouse bindings.

use std::fmt;

use chordline_input::{ModifierMask, MouseButton, MouseEventType, PointerEvent};
use tracing::{debug, info};

use super::Registration;
use crate::action::{ActionRef, Argument};
use crate::mode::ModeId;

/// A pointer binding.
#[derive(Clone)]
pub struct MouseBinding {
    /// Modifier and held-button bits, compared after masking with
    /// [`ModifierMask::MOUSE_MASK`].
    pub modifiers: ModifierMask,
    pub button: MouseButton,
    pub event_type: MouseEventType,
    pub mode: ModeId,
    pub argument: Argument,
    pub action: ActionRef,
}

impl fmt::Debug for MouseBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MouseBinding")
            .field("modifiers", &self.modifiers)
            .field("button", &self.button)
            .field("event_type", &self.event_type)
            .field("mode", &self.mode)
            .field("argument", &self.argument)
            .finish_non_exhaustive()
    }
}

impl MouseBinding {
    pub fn new(
        modifiers: ModifierMask,
        button: MouseButton,
        event_type: MouseEventType,
        mode: ModeId,
        action: ActionRef,
    ) -> Self {
        Self {
            modifiers: modifiers.mouse(),
            button,
            event_type,
            mode,
            argument: Argument::NONE,
            action,
        }
    }

    pub fn with_argument(mut self, argument: Argument) -> Self {
        self.argument = argument;
        self
    }

    fn same_key(&self, other: &MouseBinding) -> bool {
        self.modifiers == other.modifiers
            && self.button == other.button
            && self.event_type == other.event_type
            && self.mode == other.mode
    }
}

/// Ordered mouse bindings.
#[derive(Debug, Clone, Default)]
pub struct MouseTable {
    bindings: Vec<MouseBinding>,
}

impl MouseTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a binding, updating one with the same
    /// `(modifiers, button, event type, mode)` in place.
    pub fn add(&mut self, binding: MouseBinding) -> Registration {
        if let Some(existing) = self.bindings.iter_mut().find(|b| b.same_key(&binding)) {
            existing.action = binding.action;
            existing.argument = binding.argument;
            info!(button = ?existing.button, event = %existing.event_type, "replaced mouse binding");
            return Registration::Replaced(1);
        }
        self.bindings.push(binding);
        Registration::Added
    }

    /// Remove the binding with this key, if present.
    pub fn remove(
        &mut self,
        modifiers: ModifierMask,
        button: MouseButton,
        event_type: MouseEventType,
        mode: ModeId,
    ) -> bool {
        let modifiers = modifiers.mouse();
        match self.bindings.iter().position(|b| {
            b.modifiers == modifiers
                && b.button == button
                && b.event_type == event_type
                && b.mode == mode
        }) {
            Some(index) => {
                self.bindings.remove(index);
                true
            }
            None => false,
        }
    }

    /// First binding matching the event exactly in a compatible mode.
    pub fn resolve(&self, event: &PointerEvent, mode: ModeId) -> Option<&MouseBinding> {
        let modifiers = event.modifiers.mouse();
        let found = self.bindings.iter().find(|b| {
            b.button == event.button
                && b.modifiers == modifiers
                && b.event_type == event.event_type
                && b.mode.applies_in(mode)
        });
        debug!(
            event = %event.event_type,
            button = event.button.number(),
            matched = found.is_some(),
            "mouse event resolved"
        );
        found
    }

    pub fn iter(&self) -> impl Iterator<Item = &MouseBinding> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
