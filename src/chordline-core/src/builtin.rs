//! Built-in commands: `set`, `map` and `unmap`.

use chordline_input::parse_key_spec;
use tracing::{debug, warn};

use crate::action::{ActionRef, Argument};
use crate::bindings::{Registration, ShortcutBinding};
use crate::commands::NamedCommand;
use crate::completion::{Completion, CompletionGroup};
use crate::error::{Error, Result};
use crate::mode::ModeId;
use crate::notify::NotifyLevel;
use crate::session::Session;
use crate::settings::SettingValue;

/// Strips `[name]` to `name`.
fn mode_token(token: &str) -> Option<&str> {
    token.strip_prefix('[')?.strip_suffix(']')
}

/// Splits an optional leading `[mode]` token off the arguments.
fn split_mode(args: &[String]) -> (Option<&str>, &[String]) {
    match args.split_first() {
        Some((first, rest)) => match mode_token(first) {
            Some(mode) => (Some(mode), rest),
            None => (None, args),
        },
        None => (None, args),
    }
}

impl Session {
    /// Make `action` available to `map` under `name`.
    pub fn register_named_action(&mut self, name: &str, action: ActionRef) {
        if self
            .named_actions
            .insert(name.to_string(), action)
            .is_some()
        {
            debug!(action = name, "replaced named action");
        }
    }

    /// Make `argument` available to `map` under `name`.
    pub fn register_named_argument(&mut self, name: &str, argument: Argument) {
        self.named_arguments.insert(name.to_string(), argument);
    }

    pub fn named_action(&self, name: &str) -> Option<ActionRef> {
        self.named_actions.get(name).cloned()
    }

    /// Names of the registered actions, sorted.
    pub fn named_actions(&self) -> impl Iterator<Item = &str> {
        self.named_actions.keys().map(String::as_str)
    }

    fn resolve_mode(&self, mode: Option<&str>) -> Result<ModeId> {
        match mode {
            None => Ok(self.normal_mode),
            Some(name) => self
                .mode_by_name(name)
                .ok_or_else(|| Error::UnknownMode(name.to_string())),
        }
    }

    /// Bind `keys` to a named action.
    ///
    /// `mode` defaults to the normal mode. `argument` is looked up among the
    /// named arguments; anything else is stored as the argument's data.
    pub fn map_binding(
        &mut self,
        mode: Option<&str>,
        keys: &str,
        action_name: &str,
        argument: Option<&str>,
    ) -> Result<Registration> {
        let mode = self.resolve_mode(mode)?;
        let trigger = parse_key_spec(keys)?;
        let action = self
            .named_action(action_name)
            .ok_or_else(|| Error::UnknownAction(action_name.to_string()))?;
        let argument = match argument {
            None => Argument::NONE,
            Some(text) => self
                .named_arguments
                .get(text)
                .cloned()
                .unwrap_or_else(|| Argument::with_data(0, text)),
        };

        self.add_shortcut(
            ShortcutBinding::new(trigger, mode, action)
                .with_argument(argument)
                .named(action_name),
        )
    }

    /// Remove the binding of `keys` in `mode` (default: normal).
    pub fn unmap_binding(&mut self, mode: Option<&str>, keys: &str) -> Result<bool> {
        let mode = self.resolve_mode(mode)?;
        let trigger = parse_key_spec(keys)?;
        Ok(self.remove_shortcut(&trigger, mode))
    }

    /// Register `set`, `map` and `unmap`.
    pub fn register_default_commands(&mut self) -> Result<()> {
        self.add_command(
            NamedCommand::new("set", cmd_set)
                .description("Set an option")
                .completer(complete_settings),
        )?;
        self.add_command(
            NamedCommand::new("map", cmd_map).description("Map a key sequence"),
        )?;
        self.add_command(
            NamedCommand::new("unmap", cmd_unmap).description("Unmap a key sequence"),
        )?;
        Ok(())
    }
}

fn cmd_set(session: &mut Session, args: &[String]) -> bool {
    let Some((name, value)) = args.split_first() else {
        session.notify(NotifyLevel::Error, "Not enough arguments.");
        return false;
    };

    if value.is_empty() {
        return match session.settings().value(name).cloned() {
            Some(SettingValue::Bool(_)) => match session.settings_mut().toggle(name) {
                Ok(_) => true,
                Err(err) => {
                    session.notify(NotifyLevel::Error, &err.to_string());
                    false
                }
            },
            Some(value) => {
                session.notify(NotifyLevel::Info, &format!("{name} = {value}"));
                true
            }
            None => {
                session.notify(NotifyLevel::Error, &format!("Unknown option: {name}"));
                false
            }
        };
    }

    let text = value.join(" ");
    match session.settings_mut().set_from_str(name, &text) {
        Ok(()) => true,
        Err(err) => {
            warn!(setting = %name, %err, "set failed");
            session.notify(NotifyLevel::Error, &err.to_string());
            false
        }
    }
}

fn complete_settings(session: &Session, parameter: &str) -> Completion {
    let mut group = CompletionGroup::new(Some("Settings"));
    for setting in session.settings().iter() {
        if setting.name.starts_with(parameter) {
            group.add(setting.name.clone(), setting.description.as_deref());
        }
    }
    Completion::new().with_group(group)
}

fn cmd_map(session: &mut Session, args: &[String]) -> bool {
    let (mode, rest) = split_mode(args);
    let [keys, action_name, argument @ ..] = rest else {
        session.notify(NotifyLevel::Error, "Usage: map [mode] <keys> <action> [argument]");
        return false;
    };
    let argument = (!argument.is_empty()).then(|| argument.join(" "));

    match session.map_binding(mode, keys, action_name, argument.as_deref()) {
        Ok(_) => true,
        Err(err) => {
            session.notify(NotifyLevel::Error, &err.to_string());
            false
        }
    }
}

fn cmd_unmap(session: &mut Session, args: &[String]) -> bool {
    let (mode, rest) = split_mode(args);
    let [keys] = rest else {
        session.notify(NotifyLevel::Error, "Usage: unmap [mode] <keys>");
        return false;
    };

    match session.unmap_binding(mode, keys) {
        Ok(true) => true,
        Ok(false) => {
            session.notify(NotifyLevel::Warning, &format!("No mapping for {keys}"));
            false
        }
        Err(err) => {
            session.notify(NotifyLevel::Error, &err.to_string());
            false
        }
    }
}
