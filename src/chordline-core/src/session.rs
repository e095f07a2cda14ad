//! Session - Owner of all per-session input state.
//!
//! A [`Session`] holds the binding tables, command registry, input buffer,
//! completion state, modes, settings and line edit of one window. Every
//! event entry point takes `&mut self`; bound actions receive the session
//! mutably and may call back into any of these entry points.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use chordline_input::{
    Focus, InputBufferState, KeyChord, KeyNormalizer, KeySpec, Keymap, ModifierMask, MouseButton,
    MouseEventType, PointerEvent, RawKeyEvent, StaticKeymap, keysyms, parse_key_spec,
};
use tracing::{debug, trace, warn};

use crate::action::{ActionRef, Argument, Invocation, run_repeated};
use crate::bindings::{
    BindingTable, InputbarShortcut, MouseBinding, Registration, Resolution, ShortcutBinding,
};
use crate::commands::{
    CommandRegistry, DispatchOutcome, NamedCommand, SpecialCommand, UnknownCommandFn,
};
use crate::completion::{CompletionState, Direction};
use crate::error::{Error, Result};
use crate::history::{History, InputHistory};
use crate::inputbar::LineEdit;
use crate::mode::{ModeId, ModeRegistry};
use crate::notify::{Notifier, NotifyLevel, TracingNotifier};
use crate::replay::ReplayQueue;
use crate::settings::{Settings, completion_window};

/// Name of the mode every session starts in.
pub const NORMAL_MODE: &str = "normal";

/// Called after the input buffer changed.
pub type BufferChangedFn = Rc<dyn Fn(&InputBufferState)>;

/// Outcome of a key event in the main view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDispatch {
    /// A binding fired. `invoked` can be lower than `repeat` when the action
    /// stopped the loop.
    Dispatched { repeat: u32, invoked: u32 },
    /// The key went into the buffer and more input is awaited. No binding
    /// fired, so this counts as unhandled.
    Buffered,
    /// Nothing is bound; the host may handle the key itself.
    Unbound,
}

impl KeyDispatch {
    /// Returns true if a binding fired for the key.
    pub fn is_handled(&self) -> bool {
        matches!(self, KeyDispatch::Dispatched { .. })
    }
}

pub struct Session {
    pub(crate) bindings: BindingTable,
    pub(crate) commands: CommandRegistry,
    pub(crate) completion: CompletionState,
    pub(crate) buffer: InputBufferState,
    pub(crate) modes: ModeRegistry,
    pub(crate) normal_mode: ModeId,
    pub(crate) settings: Settings,
    pub(crate) history: Box<dyn History>,
    pub(crate) notifier: Box<dyn Notifier>,
    pub(crate) normalizer: KeyNormalizer,
    pub(crate) line_edit: LineEdit,
    pub(crate) named_actions: BTreeMap<String, ActionRef>,
    pub(crate) named_arguments: BTreeMap<String, Argument>,
    pub(crate) unknown_command: Option<UnknownCommandFn>,
    pub(crate) buffer_changed: Option<BufferChangedFn>,
    pub(crate) replay: ReplayQueue,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("bindings", &self.bindings)
            .field("commands", &self.commands)
            .field("buffer", &self.buffer)
            .field("modes", &self.modes)
            .field("line_edit", &self.line_edit)
            .field("named_actions", &self.named_actions.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates a session with a US keymap, the default settings, an
    /// in-memory history and the `normal` mode active.
    pub fn new() -> Self {
        let mut modes = ModeRegistry::new();
        let normal_mode = modes.add(NORMAL_MODE);
        if let Err(err) = modes.set_current(normal_mode) {
            warn!(%err, "could not activate the normal mode");
        }

        Self {
            bindings: BindingTable::new(),
            commands: CommandRegistry::new(),
            completion: CompletionState::new(),
            buffer: InputBufferState::new(),
            modes,
            normal_mode,
            settings: Settings::with_defaults(),
            history: Box::new(InputHistory::new()),
            notifier: Box::new(TracingNotifier),
            normalizer: KeyNormalizer::new(StaticKeymap::us()),
            line_edit: LineEdit::new(),
            named_actions: BTreeMap::new(),
            named_arguments: BTreeMap::new(),
            unknown_command: None,
            buffer_changed: None,
            replay: ReplayQueue::default(),
        }
    }

    pub fn with_keymap(mut self, keymap: impl Keymap + 'static) -> Self {
        self.normalizer.set_keymap(keymap);
        self
    }

    pub fn with_history(mut self, history: impl History + 'static) -> Self {
        self.history = Box::new(history);
        self
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    // ============================================================
    // ACCESSORS
    // ============================================================

    pub fn bindings(&self) -> &BindingTable {
        &self.bindings
    }

    pub fn commands(&self) -> &CommandRegistry {
        &self.commands
    }

    pub fn buffer(&self) -> &InputBufferState {
        &self.buffer
    }

    pub fn completion(&self) -> &CompletionState {
        &self.completion
    }

    pub fn line_edit(&self) -> &LineEdit {
        &self.line_edit
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn modes(&self) -> &ModeRegistry {
        &self.modes
    }

    /// Report a message through the session's notifier.
    pub fn notify(&self, level: NotifyLevel, message: &str) {
        self.notifier.notify(level, message);
    }

    pub fn set_keymap(&mut self, keymap: impl Keymap + 'static) {
        self.normalizer.set_keymap(keymap);
    }

    // ============================================================
    // MODES
    // ============================================================

    pub fn add_mode(&mut self, name: &str) -> ModeId {
        self.modes.add(name)
    }

    /// Switches mode. A pending buffered command is dropped.
    pub fn set_mode(&mut self, id: ModeId) -> Result<()> {
        self.modes.set_current(id)?;
        self.reset_buffer();
        Ok(())
    }

    pub fn mode_by_name(&self, name: &str) -> Option<ModeId> {
        self.modes.id(name)
    }

    pub fn current_mode(&self) -> ModeId {
        self.modes.current()
    }

    /// The mode created with the session.
    pub fn normal_mode(&self) -> ModeId {
        self.normal_mode
    }

    // ============================================================
    // REGISTRATION
    // ============================================================

    pub fn add_shortcut(&mut self, binding: ShortcutBinding) -> Result<Registration> {
        self.bindings.shortcuts.add(binding).inspect_err(|err| {
            warn!(%err, "rejected shortcut");
        })
    }

    /// Parse `spec` (`j`, `gt`, `<C-d>`) and bind it to `action` in `mode`.
    pub fn bind(&mut self, spec: &str, mode: ModeId, action: ActionRef) -> Result<Registration> {
        let trigger = parse_key_spec(spec)?;
        self.add_shortcut(ShortcutBinding::new(trigger, mode, action))
    }

    pub fn remove_shortcut(&mut self, trigger: &KeySpec, mode: ModeId) -> bool {
        self.bindings.shortcuts.remove(trigger, mode)
    }

    pub fn add_mouse_binding(&mut self, binding: MouseBinding) -> Registration {
        self.bindings.mouse.add(binding)
    }

    pub fn remove_mouse_binding(
        &mut self,
        modifiers: ModifierMask,
        button: MouseButton,
        event_type: MouseEventType,
        mode: ModeId,
    ) -> bool {
        self.bindings
            .mouse
            .remove(modifiers, button, event_type, mode)
    }

    pub fn add_inputbar_shortcut(&mut self, shortcut: InputbarShortcut) -> Registration {
        self.bindings.inputbar.add(shortcut)
    }

    pub fn remove_inputbar_shortcut(&mut self, chord: KeyChord) -> bool {
        self.bindings.inputbar.remove(chord)
    }

    pub fn add_command(&mut self, command: NamedCommand) -> Result<()> {
        self.commands.add(command).inspect_err(|err| {
            warn!(%err, "rejected command");
        })
    }

    pub fn add_special_command(&mut self, special: SpecialCommand) {
        self.commands.add_special(special);
    }

    /// Install the fallback offered lines no command matched.
    pub fn set_unknown_command_handler<F>(&mut self, handler: F)
    where
        F: Fn(&mut Session, &str) -> bool + 'static,
    {
        self.unknown_command = Some(Rc::new(handler));
    }

    /// Install the callback fired whenever the input buffer changes.
    pub fn set_buffer_changed_handler<F>(&mut self, handler: F)
    where
        F: Fn(&InputBufferState) + 'static,
    {
        self.buffer_changed = Some(Rc::new(handler));
    }

    // ============================================================
    // EVENT INTAKE
    // ============================================================

    /// Handle a hardware key event in the main view.
    pub fn on_key_event(&mut self, event: &RawKeyEvent) -> Result<KeyDispatch> {
        let chord = self
            .normalizer
            .normalize(event, Focus::View)
            .ok_or_else(|| {
                debug!(keycode = event.keycode, group = event.group, "untranslatable key event");
                Error::EventNotTranslatable {
                    keycode: event.keycode,
                    group: event.group,
                }
            })?;
        Ok(self.on_chord(chord))
    }

    /// Handle a normalized key in the main view.
    pub fn on_chord(&mut self, chord: KeyChord) -> KeyDispatch {
        let before = self.buffer.clone();
        let mode = self.modes.current();
        let resolution = self
            .bindings
            .shortcuts
            .resolve(chord, mode, &mut self.buffer);
        if self.buffer != before {
            self.fire_buffer_changed();
        }

        match resolution {
            Resolution::Matched(dispatch) => {
                let invocation = Invocation {
                    argument: &dispatch.argument,
                    count: dispatch.count,
                    event: None,
                };
                let invoked = run_repeated(self, &dispatch.action, &invocation, dispatch.repeat);
                trace!(key = %chord, repeat = dispatch.repeat, invoked, "shortcut dispatched");
                KeyDispatch::Dispatched {
                    repeat: dispatch.repeat,
                    invoked,
                }
            }
            Resolution::Pending => KeyDispatch::Buffered,
            Resolution::NoMatch => KeyDispatch::Unbound,
        }
    }

    /// Handle a pointer event. Returns true if a binding fired.
    ///
    /// The action sees the current numeric prefix as its count; the buffer is
    /// left as it is.
    pub fn on_mouse_event(&mut self, event: &PointerEvent) -> bool {
        let mode = self.modes.current();
        let Some(binding) = self.bindings.mouse.resolve(event, mode) else {
            return false;
        };
        let action = binding.action.clone();
        let argument = binding.argument.clone();
        debug!(event = %event.event_type, button = ?event.button, "mouse binding matched");

        let invocation = Invocation {
            argument: &argument,
            count: self.buffer.numeric_prefix,
            event: Some(event),
        };
        action(self, &invocation);
        true
    }

    /// Handle a hardware key event while the inputbar has focus.
    pub fn on_inputbar_key_event(&mut self, event: &RawKeyEvent) -> Result<bool> {
        let chord = self
            .normalizer
            .normalize(event, Focus::Inputbar)
            .ok_or_else(|| {
                debug!(keycode = event.keycode, group = event.group, "untranslatable inputbar key event");
                Error::EventNotTranslatable {
                    keycode: event.keycode,
                    group: event.group,
                }
            })?;
        Ok(self.on_inputbar_chord(chord))
    }

    /// Handle a normalized key on the inputbar. Returns true if a binding
    /// fired; otherwise the host inserts the key into the line.
    ///
    /// Any key other than Tab or Shift-Tab closes an open completion first.
    pub fn on_inputbar_chord(&mut self, chord: KeyChord) -> bool {
        if chord.keyval != keysyms::TAB && chord.keyval != keysyms::ISO_LEFT_TAB {
            self.completion.hide();
        }

        let Some(shortcut) = self.bindings.inputbar.resolve(chord) else {
            return false;
        };
        let action = shortcut.action.clone();
        let argument = shortcut.argument.clone();
        debug!(key = %chord, "inputbar shortcut matched");
        action(self, &Invocation::plain(&argument));
        true
    }

    /// Handle a line submitted from the inputbar.
    ///
    /// The line is added to history and dispatched; the line edit and
    /// completion are cleared afterwards.
    pub fn on_line_submit(&mut self, line: &str) -> DispatchOutcome {
        self.history.append(line);
        let outcome = self.submit(line);
        match outcome {
            DispatchOutcome::ParseError => self.abort(),
            DispatchOutcome::Handled | DispatchOutcome::UnknownCommand(_) => {
                self.completion.hide();
                self.history.reset();
                self.line_edit.clear();
            }
        }
        outcome
    }

    /// Handle a change of the inputbar text.
    ///
    /// A different text closes an open completion.
    pub fn on_line_changed(&mut self, text: &str) {
        if text != self.line_edit.text {
            self.completion.hide();
        }
        self.line_edit.set_text(text);
        self.fire_live_special(text);
    }

    /// Run one completion step on the current line and rewrite it.
    ///
    /// Returns false if there was nothing to complete.
    pub fn on_tab_key(&mut self, direction: Direction) -> bool {
        let window = completion_window(&self.settings);
        let text = self.line_edit.text.clone();

        let mut state = std::mem::take(&mut self.completion);
        let rewrite = state.complete(self, &text, direction, window);
        self.completion = state;

        match rewrite {
            Some(rewrite) => {
                self.line_edit.text = rewrite.text;
                self.line_edit.cursor = rewrite.cursor;
                true
            }
            None => false,
        }
    }

    /// Reset the buffer, hide completion, forget the history position and
    /// clear the line edit.
    pub fn abort(&mut self) {
        self.reset_buffer();
        self.completion.hide();
        self.history.reset();
        self.line_edit.clear();
    }

    fn reset_buffer(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        self.buffer.reset();
        self.fire_buffer_changed();
    }

    fn fire_buffer_changed(&self) {
        trace!(display = self.buffer.display(), "buffer changed");
        if let Some(handler) = &self.buffer_changed {
            handler(&self.buffer);
        }
    }
}
