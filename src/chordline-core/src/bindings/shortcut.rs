//! Shortcut bindings and key resolution.

use std::fmt;

use chordline_input::{InputBufferState, KeyChord, KeySpec, ModifierMask, keysyms};
use tracing::{debug, info, trace};

use super::Registration;
use crate::action::{ActionRef, Argument};
use crate::error::{Error, Result};
use crate::mode::ModeId;

/// A key binding in the main view.
#[derive(Clone)]
pub struct ShortcutBinding {
    /// A single chord, or a buffered command such as `gt`.
    pub trigger: KeySpec,
    pub mode: ModeId,
    pub argument: Argument,
    pub action: ActionRef,
    /// Whether a numeric prefix repeats the action.
    pub repeatable: bool,
    /// Name of the action, when bound through the named-action registry.
    pub action_name: Option<String>,
}

impl fmt::Debug for ShortcutBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortcutBinding")
            .field("trigger", &self.trigger)
            .field("mode", &self.mode)
            .field("argument", &self.argument)
            .field("repeatable", &self.repeatable)
            .field("action_name", &self.action_name)
            .finish_non_exhaustive()
    }
}

impl ShortcutBinding {
    /// Create a repeatable binding with no argument.
    pub fn new(trigger: KeySpec, mode: ModeId, action: ActionRef) -> Self {
        Self {
            trigger,
            mode,
            argument: Argument::NONE,
            action,
            repeatable: true,
            action_name: None,
        }
    }

    /// Create a binding for a single chord.
    pub fn chord(chord: KeyChord, mode: ModeId, action: ActionRef) -> Self {
        Self::new(KeySpec::Chord(chord), mode, action)
    }

    /// Create a binding for a buffered command.
    pub fn buffered(command: impl Into<String>, mode: ModeId, action: ActionRef) -> Self {
        Self::new(KeySpec::Buffered(command.into()), mode, action)
    }

    pub fn with_argument(mut self, argument: Argument) -> Self {
        self.argument = argument;
        self
    }

    /// Disable repetition by numeric prefix.
    pub fn once(mut self) -> Self {
        self.repeatable = false;
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.action_name = Some(name.into());
        self
    }

    fn is_empty_trigger(&self) -> bool {
        match &self.trigger {
            KeySpec::Chord(chord) => chord.keyval == 0 && chord.modifiers.is_empty(),
            KeySpec::Buffered(command) => command.is_empty(),
        }
    }

    /// Direct chord match.
    ///
    /// A printable key bound without modifiers also matches when only Shift
    /// was held, so a binding for `A` fires on Shift+A regardless of whether
    /// the keymap reported Shift as consumed.
    fn matches_chord(&self, chord: KeyChord, mode: ModeId) -> bool {
        let KeySpec::Chord(bound) = &self.trigger else {
            return false;
        };
        bound.keyval == chord.keyval
            && (bound.modifiers == chord.modifiers
                || (keysyms::is_printable(bound.keyval) && chord.modifiers == ModifierMask::SHIFT))
            && self.mode.applies_in(mode)
    }
}

/// A resolved shortcut, ready to be invoked.
#[derive(Clone)]
pub struct ShortcutDispatch {
    pub action: ActionRef,
    pub argument: Argument,
    /// The numeric prefix as typed (0 when none).
    pub count: u32,
    /// How many times to run the action.
    pub repeat: u32,
}

impl fmt::Debug for ShortcutDispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortcutDispatch")
            .field("argument", &self.argument)
            .field("count", &self.count)
            .field("repeat", &self.repeat)
            .finish_non_exhaustive()
    }
}

impl ShortcutDispatch {
    /// Captures the repeat count and resets the buffer.
    fn take(binding: &ShortcutBinding, buffer: &mut InputBufferState) -> Self {
        let count = buffer.numeric_prefix;
        let repeat = if binding.repeatable {
            buffer.repeat_count()
        } else {
            1
        };
        buffer.reset();
        Self {
            action: binding.action.clone(),
            argument: binding.argument.clone(),
            count,
            repeat,
        }
    }
}

/// Outcome of [`ShortcutTable::resolve`].
#[derive(Debug, Clone)]
pub enum Resolution {
    /// A binding matched; the buffer has been reset.
    Matched(ShortcutDispatch),
    /// The key extended the buffer and more input is awaited.
    Pending,
    /// Nothing matched.
    NoMatch,
}

/// Ordered shortcut bindings.
#[derive(Debug, Clone, Default)]
pub struct ShortcutTable {
    bindings: Vec<ShortcutBinding>,
}

impl ShortcutTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a binding.
    ///
    /// A binding with the same trigger in the same mode is updated in place.
    /// Registering with [`ModeId::ALL`] updates every binding with that
    /// trigger, whatever its mode.
    pub fn add(&mut self, binding: ShortcutBinding) -> Result<Registration> {
        if binding.is_empty_trigger() {
            return Err(Error::EmptyTrigger);
        }

        let mut replaced = 0;
        for existing in &mut self.bindings {
            if existing.trigger != binding.trigger
                || !(existing.mode == binding.mode || binding.mode == ModeId::ALL)
            {
                continue;
            }
            existing.action = binding.action.clone();
            existing.argument = binding.argument.clone();
            existing.repeatable = binding.repeatable;
            existing.action_name = binding.action_name.clone();
            replaced += 1;
            if binding.mode != ModeId::ALL {
                break;
            }
        }

        if replaced > 0 {
            info!(trigger = ?binding.trigger, mode = %binding.mode, replaced, "replaced shortcut");
            return Ok(Registration::Replaced(replaced));
        }

        debug!(trigger = ?binding.trigger, mode = %binding.mode, "added shortcut");
        self.bindings.push(binding);
        Ok(Registration::Added)
    }

    /// Remove the first binding with this trigger in exactly this mode.
    pub fn remove(&mut self, trigger: &KeySpec, mode: ModeId) -> bool {
        match self
            .bindings
            .iter()
            .position(|b| &b.trigger == trigger && b.mode == mode)
        {
            Some(index) => {
                self.bindings.remove(index);
                true
            }
            None => false,
        }
    }

    /// First binding that matches a chord directly.
    pub fn find_chord(&self, chord: KeyChord, mode: ModeId) -> Option<&ShortcutBinding> {
        self.bindings.iter().find(|b| b.matches_chord(chord, mode))
    }

    /// Resolve a normalized key against the table, feeding `buffer`.
    ///
    /// While a buffered command is pending, direct chord bindings are not
    /// consulted. Printable keys that do not match directly go to the buffer;
    /// a buffered binding equal to the pending command dispatches, one that
    /// merely starts with it keeps the buffer, and if none is left the buffer
    /// is reset. A non-printable key leaves the buffer untouched and resolves
    /// to [`Resolution::NoMatch`].
    pub fn resolve(
        &self,
        chord: KeyChord,
        mode: ModeId,
        buffer: &mut InputBufferState,
    ) -> Resolution {
        if buffer.pending_command.is_none()
            && let Some(binding) = self.find_chord(chord, mode)
        {
            let dispatch = ShortcutDispatch::take(binding, buffer);
            debug!(key = %chord, repeat = dispatch.repeat, "shortcut matched");
            return Resolution::Matched(dispatch);
        }

        let fed = buffer.feed(chord.keyval);
        if !fed.is_buffered() {
            trace!(key = %chord, "key not bufferable, passing through");
            return Resolution::NoMatch;
        }

        let Some(pending) = buffer.pending().map(str::to_string) else {
            return Resolution::Pending;
        };

        let mut partial = false;
        for binding in &self.bindings {
            let KeySpec::Buffered(command) = &binding.trigger else {
                continue;
            };
            if *command == pending && binding.mode.applies_in(mode) {
                let dispatch = ShortcutDispatch::take(binding, buffer);
                debug!(command = %pending, repeat = dispatch.repeat, "buffered command matched");
                return Resolution::Matched(dispatch);
            }
            if command.starts_with(&pending) {
                partial = true;
            }
        }

        if partial {
            debug!(pending = %pending, "awaiting more input");
            Resolution::Pending
        } else {
            debug!(pending = %pending, "no buffered command matches, resetting");
            buffer.reset();
            Resolution::NoMatch
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShortcutBinding> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::action;
    use chordline_input::parse_key_spec;

    const NORMAL: ModeId = ModeId(1);
    const VISUAL: ModeId = ModeId(2);

    fn noop() -> ActionRef {
        action(|_, _| true)
    }

    fn tagged(n: i32) -> ShortcutBinding {
        ShortcutBinding::chord(KeyChord::char('j'), NORMAL, noop()).with_argument(Argument::new(n))
    }

    fn feed(table: &ShortcutTable, buffer: &mut InputBufferState, keys: &str) -> Vec<Resolution> {
        keys.chars()
            .map(|c| table.resolve(KeyChord::char(c), NORMAL, buffer))
            .collect()
    }

    #[test]
    fn test_add_replaces_same_trigger_and_mode() {
        let mut table = ShortcutTable::new();
        assert_eq!(table.add(tagged(1)).unwrap(), Registration::Added);
        assert_eq!(table.add(tagged(2)).unwrap(), Registration::Replaced(1));
        assert_eq!(table.len(), 1);
        assert_eq!(table.iter().next().unwrap().argument, Argument::new(2));
    }

    #[test]
    fn test_add_in_wildcard_mode_updates_all_modes() {
        let mut table = ShortcutTable::new();
        table.add(tagged(1)).unwrap();
        table
            .add(ShortcutBinding::chord(KeyChord::char('j'), VISUAL, noop()))
            .unwrap();
        let outcome = table
            .add(
                ShortcutBinding::chord(KeyChord::char('j'), ModeId::ALL, noop())
                    .with_argument(Argument::new(7)),
            )
            .unwrap();
        assert_eq!(outcome, Registration::Replaced(2));
        assert!(table.iter().all(|b| b.argument == Argument::new(7)));
    }

    #[test]
    fn test_add_rejects_empty_trigger() {
        let mut table = ShortcutTable::new();
        let empty = ShortcutBinding::chord(KeyChord::default(), NORMAL, noop());
        assert!(matches!(table.add(empty), Err(Error::EmptyTrigger)));
        let empty = ShortcutBinding::buffered("", NORMAL, noop());
        assert!(matches!(table.add(empty), Err(Error::EmptyTrigger)));
    }

    #[test]
    fn test_remove_needs_exact_mode() {
        let mut table = ShortcutTable::new();
        table.add(tagged(1)).unwrap();
        let trigger = KeySpec::Chord(KeyChord::char('j'));
        assert!(!table.remove(&trigger, VISUAL));
        assert!(table.remove(&trigger, NORMAL));
        assert!(table.is_empty());
        assert!(!table.remove(&trigger, NORMAL));
    }

    #[test]
    fn test_shift_tolerance_only_for_printable() {
        let mut table = ShortcutTable::new();
        table
            .add(ShortcutBinding::chord(KeyChord::char('A'), NORMAL, noop()))
            .unwrap();
        table
            .add(ShortcutBinding::chord(
                KeyChord::new(keysyms::RETURN, ModifierMask::empty()),
                NORMAL,
                noop(),
            ))
            .unwrap();

        let shifted_a = KeyChord::with_char('A', ModifierMask::SHIFT);
        assert!(table.find_chord(shifted_a, NORMAL).is_some());

        let shifted_return = KeyChord::new(keysyms::RETURN, ModifierMask::SHIFT);
        assert!(table.find_chord(shifted_return, NORMAL).is_none());

        let ctrl_a = KeyChord::with_char('A', ModifierMask::CONTROL);
        assert!(table.find_chord(ctrl_a, NORMAL).is_none());
    }

    #[test]
    fn test_buffered_exact_partial_and_reset() {
        let mut table = ShortcutTable::new();
        table
            .add(ShortcutBinding::buffered("gt", NORMAL, noop()).with_argument(Argument::new(1)))
            .unwrap();
        table
            .add(ShortcutBinding::buffered("gT", NORMAL, noop()).with_argument(Argument::new(2)))
            .unwrap();

        let mut buffer = InputBufferState::new();
        let results = feed(&table, &mut buffer, "gt");
        assert!(matches!(results[0], Resolution::Pending));
        match &results[1] {
            Resolution::Matched(dispatch) => assert_eq!(dispatch.argument, Argument::new(1)),
            other => panic!("expected a match, got {other:?}"),
        }
        assert!(buffer.is_empty());

        let results = feed(&table, &mut buffer, "gx");
        assert!(matches!(results[0], Resolution::Pending));
        assert!(matches!(results[1], Resolution::NoMatch));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_numeric_prefix_sets_repeat() {
        let mut table = ShortcutTable::new();
        table.add(tagged(0)).unwrap();

        let mut buffer = InputBufferState::new();
        let results = feed(&table, &mut buffer, "32j");
        assert!(matches!(results[0], Resolution::Pending));
        assert!(matches!(results[1], Resolution::Pending));
        match &results[2] {
            Resolution::Matched(dispatch) => {
                assert_eq!(dispatch.count, 32);
                assert_eq!(dispatch.repeat, 32);
            }
            other => panic!("expected a match, got {other:?}"),
        }
        assert_eq!(buffer.numeric_prefix, 0);
    }

    #[test]
    fn test_once_ignores_prefix() {
        let mut table = ShortcutTable::new();
        table.add(tagged(0).once()).unwrap();
        let mut buffer = InputBufferState::new();
        let results = feed(&table, &mut buffer, "5j");
        match &results[1] {
            Resolution::Matched(dispatch) => {
                assert_eq!(dispatch.count, 5);
                assert_eq!(dispatch.repeat, 1);
            }
            other => panic!("expected a match, got {other:?}"),
        }
    }

    #[test]
    fn test_pending_command_skips_direct_match() {
        let mut table = ShortcutTable::new();
        table.add(tagged(0)).unwrap();
        table
            .add(ShortcutBinding::new(parse_key_spec("gj").unwrap(), NORMAL, noop()).with_argument(Argument::new(9)))
            .unwrap();

        let mut buffer = InputBufferState::new();
        let results = feed(&table, &mut buffer, "gj");
        match &results[1] {
            Resolution::Matched(dispatch) => assert_eq!(dispatch.argument, Argument::new(9)),
            other => panic!("expected the buffered binding, got {other:?}"),
        }
    }

    #[test]
    fn test_non_printable_key_keeps_pending_command() {
        let mut table = ShortcutTable::new();
        table
            .add(ShortcutBinding::buffered("gt", NORMAL, noop()))
            .unwrap();
        table
            .add(ShortcutBinding::chord(
                KeyChord::new(keysyms::ESCAPE, ModifierMask::empty()),
                NORMAL,
                noop(),
            ))
            .unwrap();

        let mut buffer = InputBufferState::new();
        assert!(matches!(
            table.resolve(KeyChord::char('g'), NORMAL, &mut buffer),
            Resolution::Pending
        ));
        let escape = KeyChord::new(keysyms::ESCAPE, ModifierMask::empty());
        assert!(matches!(
            table.resolve(escape, NORMAL, &mut buffer),
            Resolution::NoMatch
        ));
        assert_eq!(buffer.pending(), Some("g"));
        assert!(matches!(
            table.resolve(KeyChord::char('t'), NORMAL, &mut buffer),
            Resolution::Matched(_)
        ));
    }

    #[test]
    fn test_wrong_mode_exact_still_counts_as_partial() {
        let mut table = ShortcutTable::new();
        table
            .add(ShortcutBinding::buffered("gg", VISUAL, noop()))
            .unwrap();
        let mut buffer = InputBufferState::new();
        let results = feed(&table, &mut buffer, "gg");
        assert!(matches!(results[1], Resolution::Pending));
        assert_eq!(buffer.pending(), Some("gg"));
    }
}
