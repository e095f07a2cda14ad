//! Script parsing and replay.
//!
//! One event per line; blank lines and lines starting with `#` are skipped.
//!
//! ```text
//! key 32j          # keys for the main view, as a key spec
//! key <C-d>
//! mode visual      # switch mode by name
//! type :op         # set the inputbar text
//! tab next         # next | prev | next-group | prev-group
//! inputbar <C-w>   # a key on the inputbar
//! submit :open manual.pdf
//! ```

use anyhow::{Context, Result, anyhow, bail};
use chordline_core::{Direction, KeyDispatch, Session};
use chordline_input::{KeyChord, KeySpec, format_chord, parse_key_spec};

use crate::demo::Transcript;

/// A script event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Key(KeySpec),
    Inputbar(KeyChord),
    Mode(String),
    Type(String),
    Tab(Direction),
    Submit(String),
}

fn parse_direction(word: &str) -> Result<Direction> {
    match word {
        "next" => Ok(Direction::Next),
        "prev" | "previous" => Ok(Direction::Previous),
        "next-group" => Ok(Direction::NextGroup),
        "prev-group" | "previous-group" => Ok(Direction::PreviousGroup),
        other => bail!("unknown tab direction '{other}'"),
    }
}

/// Parse one script line. Returns `None` for blank lines and comments.
pub fn parse_line(line: &str) -> Result<Option<Step>> {
    let line = line.trim_end();
    if line.trim_start().is_empty() || line.trim_start().starts_with('#') {
        return Ok(None);
    }

    let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
    let step = match verb {
        "key" => Step::Key(parse_key_spec(rest.trim())?),
        "inputbar" => {
            let spec = parse_key_spec(rest.trim())?;
            let chord = spec
                .chord()
                .ok_or_else(|| anyhow!("inputbar takes a single key, got '{}'", rest.trim()))?;
            Step::Inputbar(chord)
        }
        "mode" => Step::Mode(rest.trim().to_string()),
        "type" => Step::Type(rest.to_string()),
        "tab" => Step::Tab(parse_direction(rest.trim())?),
        "submit" => Step::Submit(rest.to_string()),
        other => bail!("unknown verb '{other}'"),
    };
    Ok(Some(step))
}

fn describe_dispatch(outcome: KeyDispatch, session: &Session) -> String {
    match outcome {
        KeyDispatch::Dispatched { repeat, invoked } if repeat > 1 => {
            format!("dispatched {invoked}/{repeat}")
        }
        KeyDispatch::Dispatched { .. } => "dispatched".to_string(),
        KeyDispatch::Buffered => format!("buffered [{}]", session.buffer().display()),
        KeyDispatch::Unbound => "unbound".to_string(),
    }
}

fn describe_completion(session: &Session) -> Option<String> {
    let completion = session.completion();
    if !completion.is_shown() {
        return None;
    }
    let items: Vec<String> = completion
        .visible()
        .into_iter()
        .map(|(index, entry)| match entry {
            e if e.is_group_header => format!("<{}>", e.label),
            e if index == completion.cursor() => format!("[{}]", e.label),
            e => e.label.clone(),
        })
        .collect();
    Some(format!("completion: {}", items.join(" ")))
}

/// Feed one step to the session and describe what happened.
pub fn run_step(session: &mut Session, step: &Step, transcript: &Transcript) -> Result<Vec<String>> {
    let mut out = Vec::new();
    match step {
        Step::Key(KeySpec::Chord(chord)) => {
            let outcome = session.on_chord(*chord);
            out.push(format!("key {} -> {}", format_chord(chord), describe_dispatch(outcome, session)));
        }
        Step::Key(KeySpec::Buffered(keys)) => {
            for c in keys.chars() {
                let outcome = session.on_chord(KeyChord::char(c));
                out.push(format!("key {c} -> {}", describe_dispatch(outcome, session)));
                out.extend(transcript.borrow_mut().drain(..).map(|l| format!("  > {l}")));
            }
        }
        Step::Inputbar(chord) => {
            let handled = session.on_inputbar_chord(*chord);
            out.push(format!(
                "inputbar {} -> {} | {}",
                format_chord(chord),
                if handled { "handled" } else { "unbound" },
                session.line_edit().text
            ));
        }
        Step::Mode(name) => {
            let mode = session
                .mode_by_name(name)
                .with_context(|| format!("unknown mode '{name}'"))?;
            session.set_mode(mode)?;
            out.push(format!("mode {name}"));
        }
        Step::Type(text) => {
            session.on_line_changed(text);
            out.push(format!("line {text}"));
        }
        Step::Tab(direction) => {
            session.on_tab_key(*direction);
            out.push(format!("tab -> {}", session.line_edit().text));
            out.extend(describe_completion(session));
        }
        Step::Submit(line) => {
            let outcome = session.on_line_submit(line);
            out.push(format!("submit {line} -> {outcome:?}"));
        }
    }
    out.extend(transcript.borrow_mut().drain(..).map(|l| format!("  > {l}")));
    Ok(out)
}

/// Run a whole script, stopping at the first malformed line.
pub fn run_script(
    session: &mut Session,
    script: &str,
    transcript: &Transcript,
    show_buffer: bool,
) -> Result<Vec<String>> {
    let mut out = Vec::new();
    for (number, line) in script.lines().enumerate() {
        let Some(step) = parse_line(line).with_context(|| format!("line {}", number + 1))? else {
            continue;
        };
        tracing::debug!(line = number + 1, ?step, "script step");
        out.extend(run_step(session, &step, transcript)?);
        if show_buffer && !session.buffer().is_empty() {
            out.push(format!("  buffer [{}]", session.buffer().display()));
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use chordline_input::ModifierMask;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::demo::build_session;

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("  # note").unwrap(), None);
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(
            parse_line("key <C-d>").unwrap(),
            Some(Step::Key(KeySpec::Chord(KeyChord::with_char(
                'd',
                ModifierMask::CONTROL
            ))))
        );
        assert_eq!(
            parse_line("tab prev-group").unwrap(),
            Some(Step::Tab(Direction::PreviousGroup))
        );
        assert_eq!(
            parse_line("submit :open a b").unwrap(),
            Some(Step::Submit(":open a b".to_string()))
        );
        assert!(parse_line("tab sideways").is_err());
        assert!(parse_line("inputbar gt").is_err());
        assert!(parse_line("dance").is_err());
    }

    #[test]
    fn test_run_script_against_demo_session() {
        let transcript = Transcript::default();
        let mut session = build_session(&transcript).unwrap();
        let script = "\
key 2j
type :o
tab next
submit :open manual.pdf
";
        let out = run_script(&mut session, script, &transcript, false).unwrap();
        assert_eq!(
            out,
            vec![
                "key 2 -> buffered [2]",
                "key j -> dispatched 2/2",
                "  > scroll down (count 2)",
                "  > scroll down (count 2)",
                "line :o",
                "tab -> :open ",
                "submit :open manual.pdf -> Handled",
                "  > open manual.pdf",
            ]
        );
    }

    #[test]
    fn test_run_script_reports_line_number() {
        let transcript = Transcript::default();
        let mut session = build_session(&transcript).unwrap();
        let err = run_script(&mut session, "key j\nbogus", &transcript, false).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
