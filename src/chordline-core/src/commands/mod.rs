//! Line commands.
//!
//! A submitted line is either a special command, chosen by its first
//! character (`/needle`), or a named command looked up by its first shell
//! word (`:set font mono`).

mod dispatch;
pub mod parser;
mod registry;

use std::rc::Rc;

pub use registry::{
    CommandFn, CommandRegistry, CompleterFn, NamedCommand, SpecialCommand, SpecialFn,
};

use crate::session::Session;

/// Offered lines no command claimed; returns true if it handled the line.
pub type UnknownCommandFn = Rc<dyn Fn(&mut Session, &str) -> bool>;

/// Result of submitting a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A command took the line.
    Handled,
    /// No command matched; carries the submitted line.
    UnknownCommand(String),
    /// Empty input or malformed quoting.
    ParseError,
}

impl DispatchOutcome {
    pub fn is_handled(&self) -> bool {
        matches!(self, DispatchOutcome::Handled)
    }
}
