//! Command registry.
//!
//! Named commands are looked up by exact name or abbreviation in
//! registration order. Special commands are keyed by their identifier
//! character.

use std::fmt;
use std::rc::Rc;

use tracing::{debug, info};

use crate::action::Argument;
use crate::completion::Completion;
use crate::error::{Error, Result};
use crate::session::Session;

/// Action of a named command; receives the arguments after the name.
pub type CommandFn = Rc<dyn Fn(&mut Session, &[String]) -> bool>;

/// Action of a special command; receives the line after the identifier.
pub type SpecialFn = Rc<dyn Fn(&mut Session, &str, &Argument) -> bool>;

/// Parameter completer of a named command.
pub type CompleterFn = Rc<dyn Fn(&Session, &str) -> Completion>;

// ============================================================
// NAMED COMMAND
// ============================================================

#[derive(Clone)]
pub struct NamedCommand {
    pub name: String,
    pub abbreviation: Option<String>,
    pub action: CommandFn,
    pub completer: Option<CompleterFn>,
    pub description: Option<String>,
}

impl fmt::Debug for NamedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedCommand")
            .field("name", &self.name)
            .field("abbreviation", &self.abbreviation)
            .field("completer", &self.completer.is_some())
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl NamedCommand {
    /// Creates a command.
    ///
    /// ```
    /// use chordline_core::NamedCommand;
    ///
    /// let cmd = NamedCommand::new("open", |_, args| !args.is_empty())
    ///     .abbreviation("o")
    ///     .description("Open a document");
    /// assert!(cmd.matches("o"));
    /// ```
    pub fn new<F>(name: impl Into<String>, action: F) -> Self
    where
        F: Fn(&mut Session, &[String]) -> bool + 'static,
    {
        Self {
            name: name.into(),
            abbreviation: None,
            action: Rc::new(action),
            completer: None,
            description: None,
        }
    }

    pub fn abbreviation(mut self, abbreviation: impl Into<String>) -> Self {
        self.abbreviation = Some(abbreviation.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the parameter completer.
    pub fn completer<F>(mut self, completer: F) -> Self
    where
        F: Fn(&Session, &str) -> Completion + 'static,
    {
        self.completer = Some(Rc::new(completer));
        self
    }

    /// Returns true if `token` is the name or the abbreviation.
    pub fn matches(&self, token: &str) -> bool {
        self.name == token || self.abbreviation.as_deref() == Some(token)
    }

    /// Returns true if the name or the abbreviation starts with `prefix`.
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        self.name.starts_with(prefix)
            || self
                .abbreviation
                .as_deref()
                .is_some_and(|abbr| abbr.starts_with(prefix))
    }
}

// ============================================================
// SPECIAL COMMAND
// ============================================================

/// A command selected by the first character of the line (`/pattern`).
#[derive(Clone)]
pub struct SpecialCommand {
    pub identifier: char,
    pub action: SpecialFn,
    /// Fire on every line change instead of on submit.
    pub fire_on_every_change: bool,
    pub argument: Argument,
}

impl fmt::Debug for SpecialCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpecialCommand")
            .field("identifier", &self.identifier)
            .field("fire_on_every_change", &self.fire_on_every_change)
            .field("argument", &self.argument)
            .finish_non_exhaustive()
    }
}

impl SpecialCommand {
    pub fn new<F>(identifier: char, action: F) -> Self
    where
        F: Fn(&mut Session, &str, &Argument) -> bool + 'static,
    {
        Self {
            identifier,
            action: Rc::new(action),
            fire_on_every_change: false,
            argument: Argument::NONE,
        }
    }

    pub fn fire_on_every_change(mut self, always: bool) -> Self {
        self.fire_on_every_change = always;
        self
    }

    pub fn with_argument(mut self, argument: Argument) -> Self {
        self.argument = argument;
        self
    }
}

// ============================================================
// REGISTRY
// ============================================================

#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: Vec<NamedCommand>,
    specials: Vec<SpecialCommand>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a named command, overwriting abbreviation, action,
    /// completer and description of an existing command with the same name.
    pub fn add(&mut self, command: NamedCommand) -> Result<()> {
        if command.name.is_empty() {
            return Err(Error::EmptyCommandName);
        }

        if let Some(existing) = self.commands.iter_mut().find(|c| c.name == command.name) {
            info!(command = %command.name, "replaced command");
            *existing = command;
            return Ok(());
        }

        debug!(command = %command.name, abbreviation = ?command.abbreviation, "registered command");
        self.commands.push(command);
        Ok(())
    }

    /// Registers a special command, replacing one with the same identifier.
    pub fn add_special(&mut self, special: SpecialCommand) {
        if let Some(existing) = self
            .specials
            .iter_mut()
            .find(|s| s.identifier == special.identifier)
        {
            info!(identifier = %special.identifier, "replaced special command");
            *existing = special;
            return;
        }
        self.specials.push(special);
    }

    /// First command whose name or abbreviation equals `token`.
    pub fn find(&self, token: &str) -> Option<&NamedCommand> {
        self.commands.iter().find(|c| c.matches(token))
    }

    pub fn special(&self, identifier: char) -> Option<&SpecialCommand> {
        self.specials.iter().find(|s| s.identifier == identifier)
    }

    /// Commands in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &NamedCommand> {
        self.commands.iter()
    }

    pub fn specials(&self) -> impl Iterator<Item = &SpecialCommand> {
        self.specials.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(_: &mut Session, _: &[String]) -> bool {
        true
    }

    #[test]
    fn test_find_by_name_or_abbreviation() {
        let mut registry = CommandRegistry::new();
        registry
            .add(NamedCommand::new("set", ok).abbreviation("s"))
            .unwrap();
        registry.add(NamedCommand::new("search", ok)).unwrap();

        assert_eq!(registry.find("set").unwrap().name, "set");
        assert_eq!(registry.find("s").unwrap().name, "set");
        assert_eq!(registry.find("search").unwrap().name, "search");
        assert!(registry.find("se").is_none());
    }

    #[test]
    fn test_readd_overwrites_in_place() {
        let mut registry = CommandRegistry::new();
        registry.add(NamedCommand::new("open", ok)).unwrap();
        registry.add(NamedCommand::new("quit", ok)).unwrap();
        registry
            .add(NamedCommand::new("open", ok).abbreviation("o").description("Open a file"))
            .unwrap();

        assert_eq!(registry.len(), 2);
        let first = registry.iter().next().unwrap();
        assert_eq!(first.name, "open");
        assert_eq!(first.abbreviation.as_deref(), Some("o"));
        assert_eq!(first.description.as_deref(), Some("Open a file"));
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut registry = CommandRegistry::new();
        assert!(matches!(
            registry.add(NamedCommand::new("", ok)),
            Err(Error::EmptyCommandName)
        ));
    }

    #[test]
    fn test_special_keyed_by_identifier() {
        let mut registry = CommandRegistry::new();
        registry.add_special(SpecialCommand::new('/', |_, _, _| true));
        registry.add_special(SpecialCommand::new('/', |_, _, _| true).fire_on_every_change(true));
        assert_eq!(registry.specials().count(), 1);
        assert!(registry.special('/').unwrap().fire_on_every_change);
        assert!(registry.special('?').is_none());
    }

    #[test]
    fn test_prefix_matching() {
        let cmd = NamedCommand::new("bmark", ok).abbreviation("bm");
        assert!(cmd.matches_prefix("bm"));
        assert!(cmd.matches_prefix("b"));
        assert!(!cmd.matches_prefix("x"));
    }
}
