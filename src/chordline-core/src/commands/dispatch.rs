//! Line submission and live special commands.

use tracing::{debug, warn};

use super::DispatchOutcome;
use super::parser::{split_identifier, strip_prompt, tokenize};
use crate::notify::NotifyLevel;
use crate::session::Session;

impl Session {
    /// Dispatch a submitted line.
    ///
    /// A registered special command whose identifier is the first character
    /// takes the line. Otherwise the line (minus one leading `:`) is
    /// tokenized and the first word looked up by name or abbreviation; the
    /// unknown-command handler gets a chance before the line is reported as
    /// unknown.
    pub fn submit(&mut self, line: &str) -> DispatchOutcome {
        if line.trim().is_empty() {
            return DispatchOutcome::ParseError;
        }

        if let Some((identifier, rest)) = split_identifier(line)
            && let Some(special) = self.commands.special(identifier)
        {
            if !special.fire_on_every_change {
                let action = special.action.clone();
                let argument = special.argument.clone();
                debug!(%identifier, "dispatching special command");
                action(self, rest, &argument);
            }
            return DispatchOutcome::Handled;
        }

        let Some(tokens) = tokenize(strip_prompt(line)) else {
            warn!(line, "failed to tokenize command line");
            self.notify(NotifyLevel::Error, "Could not parse command line");
            return DispatchOutcome::ParseError;
        };
        let Some((name, args)) = tokens.split_first() else {
            return DispatchOutcome::ParseError;
        };

        if let Some(command) = self.commands.find(name) {
            let action = command.action.clone();
            debug!(command = %command.name, args = args.len(), "dispatching command");
            if !action(self, args) {
                debug!(command = %name, "command reported failure");
            }
            return DispatchOutcome::Handled;
        }

        if let Some(handler) = self.unknown_command.clone()
            && handler(self, line)
        {
            debug!(line, "unknown command handled by fallback");
            return DispatchOutcome::Handled;
        }

        self.notify(
            NotifyLevel::Error,
            &format!("Not a valid command: {name}"),
        );
        DispatchOutcome::UnknownCommand(line.to_string())
    }

    /// Fire special commands flagged to run on every change.
    pub(crate) fn fire_live_special(&mut self, text: &str) {
        let Some((identifier, rest)) = split_identifier(text) else {
            return;
        };
        let Some(special) = self
            .commands
            .special(identifier)
            .filter(|s| s.fire_on_every_change)
        else {
            return;
        };
        let action = special.action.clone();
        let argument = special.argument.clone();
        action(self, rest, &argument);
    }
}
