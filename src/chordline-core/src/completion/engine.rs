//! Completion list building, cursor movement and line rewriting.

use tracing::{debug, trace};

use super::{CompletionEntry, CompletionState, Direction, Rewrite, escape};
use crate::commands::parser::{COMMAND_PROMPT, tokenize};
use crate::session::Session;

impl CompletionState {
    /// Run one completion step on `input`.
    ///
    /// Rebuilds the list when the command or parameter word changed since the
    /// last rewrite, when the line length changed, or when the list holds a
    /// single entry (which is how a lone command candidate pivots into its
    /// parameter completer). Returns the rewritten line, or `None` if there
    /// is nothing to complete.
    pub fn complete(
        &mut self,
        session: &Session,
        input: &str,
        direction: Direction,
        window: usize,
    ) -> Option<Rewrite> {
        let body = input.strip_prefix(COMMAND_PROMPT)?;
        let Some(mut tokens) = tokenize(body) else {
            trace!(input, "completion skipped, line does not tokenize");
            return None;
        };
        if tokens.is_empty() {
            tokens.push(String::new());
        }

        let mut n_params = tokens.len();
        if n_params == 1 && body.ends_with(' ') {
            n_params = 2;
        }

        let current_command = tokens.first().filter(|t| !t.is_empty()).cloned();
        let current_parameter = tokens.get(1).cloned();
        let length = input.chars().count();

        let rebuild = self.entries.len() <= 1
            || current_command != self.previous_command
            || current_parameter != self.previous_parameter
            || length != self.previous_length;

        self.window = window.max(1);

        if rebuild {
            self.build(
                session,
                n_params,
                current_command.as_deref(),
                current_parameter.as_deref(),
            )?;
            self.cursor = if direction.is_forward() {
                self.entries.len() - 1
            } else {
                0
            };
        }

        if self.entries.len() > 1 {
            self.step(direction);
        }

        let entry = self.entries.get(self.cursor)?;
        if entry.is_group_header {
            return None;
        }
        let value = entry.label.clone();

        let text = if self.command_mode {
            let suffix = if self.entries.len() == 1 { " " } else { "" };
            format!("{COMMAND_PROMPT}{}{suffix}", escape(&value))
        } else {
            format!(
                "{COMMAND_PROMPT}{} {}",
                self.previous_command.as_deref().unwrap_or_default(),
                escape(&value)
            )
        };

        if self.command_mode {
            self.previous_command = Some(value);
            self.previous_parameter = current_parameter;
        } else {
            self.previous_parameter = Some(value);
        }
        self.previous_length = text.chars().count();

        trace!(text, cursor = self.cursor, "completion rewrite");
        Some(Rewrite {
            cursor: self.previous_length,
            text,
        })
    }

    fn build(
        &mut self,
        session: &Session,
        n_params: usize,
        command: Option<&str>,
        parameter: Option<&str>,
    ) -> Option<()> {
        self.entries.clear();
        self.cursor = 0;
        self.command_mode = true;

        if n_params > 1 {
            let Some(cmd) = session.commands().find(command.unwrap_or_default()) else {
                self.hide();
                return None;
            };
            self.previous_command = Some(cmd.name.clone());

            match &cmd.completer {
                None => self
                    .entries
                    .push(CompletionEntry::item(cmd.name.clone(), cmd.description.clone())),
                Some(completer) => {
                    let result = completer(session, parameter.unwrap_or_default());
                    for group in result.groups {
                        if group.elements.is_empty() {
                            continue;
                        }
                        if let Some(label) = group.label {
                            self.entries.push(CompletionEntry::header(label));
                        }
                        self.entries.extend(
                            group
                                .elements
                                .into_iter()
                                .map(|e| CompletionEntry::item(e.value, e.description)),
                        );
                    }
                    self.command_mode = false;
                }
            }
        } else {
            self.entries.extend(
                session
                    .commands()
                    .iter()
                    .filter(|cmd| command.is_none_or(|prefix| cmd.matches_prefix(prefix)))
                    .map(|cmd| CompletionEntry::item(cmd.name.clone(), cmd.description.clone())),
            );
        }

        if self.entries.is_empty() {
            self.hide();
            return None;
        }

        debug!(
            entries = self.entries.len(),
            command_mode = self.command_mode,
            "completion list built"
        );
        Some(())
    }

    /// Move the cursor circularly, never resting on a header.
    ///
    /// Group directions only apply to parameter lists; in command mode they
    /// move like `Next`/`Previous`.
    fn step(&mut self, direction: Direction) {
        let len = self.entries.len();
        let by_group = direction.is_group() && !self.command_mode;

        if by_group && direction == Direction::PreviousGroup {
            if let Some(target) = self.previous_group_start() {
                self.cursor = target;
            }
            return;
        }

        let start = self.cursor;
        let mut crossed_header = false;
        for _ in 0..len {
            self.cursor = if direction.is_forward() {
                (self.cursor + 1) % len
            } else {
                (self.cursor + len - 1) % len
            };
            if self.entries[self.cursor].is_group_header {
                crossed_header = true;
                continue;
            }
            if by_group && !crossed_header {
                continue;
            }
            return;
        }
        self.cursor = start;
    }

    /// First entry of the group before the cursor's group.
    fn previous_group_start(&self) -> Option<usize> {
        let len = self.entries.len();
        let mut index = self.cursor;
        let mut headers_seen = 0;
        let mut header = None;
        for _ in 0..len {
            index = (index + len - 1) % len;
            if self.entries[index].is_group_header {
                headers_seen += 1;
                header = Some(index);
                if headers_seen == 2 {
                    break;
                }
            }
        }
        let target = (header? + 1) % len;
        (!self.entries[target].is_group_header).then_some(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grouped() -> CompletionState {
        CompletionState {
            entries: vec![
                CompletionEntry::header("H1"),
                CompletionEntry::item("a", None),
                CompletionEntry::item("b", None),
                CompletionEntry::header("H2"),
                CompletionEntry::item("c", None),
                CompletionEntry::item("d", None),
            ],
            cursor: 1,
            command_mode: false,
            ..CompletionState::default()
        }
    }

    fn label(state: &CompletionState) -> &str {
        &state.entries[state.cursor].label
    }

    #[test]
    fn test_group_navigation() {
        let mut state = grouped();
        state.step(Direction::NextGroup);
        assert_eq!(label(&state), "c");
        state.step(Direction::PreviousGroup);
        assert_eq!(label(&state), "a");
    }

    #[test]
    fn test_group_navigation_wraps() {
        let mut state = grouped();
        state.cursor = 4;
        state.step(Direction::NextGroup);
        assert_eq!(label(&state), "a");
        state.step(Direction::PreviousGroup);
        assert_eq!(label(&state), "c");
    }

    #[test]
    fn test_next_and_previous_skip_headers() {
        let mut state = grouped();
        state.cursor = 2;
        state.step(Direction::Next);
        assert_eq!(label(&state), "c");
        state.step(Direction::Previous);
        assert_eq!(label(&state), "b");
        state.cursor = 1;
        state.step(Direction::Previous);
        assert_eq!(label(&state), "d");
    }

    #[test]
    fn test_group_directions_act_flat_in_command_mode() {
        let mut state = CompletionState {
            entries: vec![
                CompletionEntry::item("open", None),
                CompletionEntry::item("quit", None),
            ],
            command_mode: true,
            ..CompletionState::default()
        };
        state.step(Direction::NextGroup);
        assert_eq!(label(&state), "quit");
        state.step(Direction::PreviousGroup);
        assert_eq!(label(&state), "open");
    }

    #[test]
    fn test_group_step_without_headers_stays_put() {
        let mut state = CompletionState {
            entries: vec![
                CompletionEntry::item("x", None),
                CompletionEntry::item("y", None),
            ],
            command_mode: false,
            ..CompletionState::default()
        };
        state.step(Direction::NextGroup);
        assert_eq!(label(&state), "x");
        state.step(Direction::PreviousGroup);
        assert_eq!(label(&state), "x");
    }
}
