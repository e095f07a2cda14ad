//! Demo session used by `chordline run`.
//!
//! Actions do not touch any real document; they record what they would do in
//! a shared transcript that the runner prints.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use chordline_core::{
    Argument, Completion, CompletionGroup, NamedCommand, Session, SpecialCommand, action,
};

/// Lines recorded by demo actions.
pub type Transcript = Rc<RefCell<Vec<String>>>;

const DOCUMENTS: [&str; 4] = ["manual.pdf", "release notes.pdf", "slides.pdf", "thesis.pdf"];
const BOOKMARKS: [&str; 3] = ["introduction", "results", "appendix"];

fn record(transcript: &Transcript, line: String) {
    transcript.borrow_mut().push(line);
}

/// Build a session with named actions, default bindings and a few commands.
pub fn build_session(transcript: &Transcript) -> Result<Session> {
    let mut session = Session::new();
    session.add_mode("visual");
    session.register_default_commands()?;
    session.register_default_inputbar_shortcuts();

    let out = transcript.clone();
    session.register_named_action(
        "scroll",
        action(move |_, inv| {
            let direction = inv.argument.data().unwrap_or("down");
            record(&out, format!("scroll {direction} (count {})", inv.count));
            true
        }),
    );
    let out = transcript.clone();
    session.register_named_action(
        "tab",
        action(move |_, inv| {
            record(&out, format!("switch tab {:+}", inv.argument.n));
            true
        }),
    );
    let out = transcript.clone();
    session.register_named_action(
        "mode",
        action(move |session, inv| {
            let name = inv.argument.data().unwrap_or("normal");
            match session.mode_by_name(name) {
                Some(mode) => {
                    record(&out, format!("mode {name}"));
                    session.set_mode(mode).is_ok()
                }
                None => false,
            }
        }),
    );
    session.register_named_argument("next", Argument::new(1));
    session.register_named_argument("previous", Argument::new(-1));

    for (keys, action, argument) in [
        ("j", "scroll", None),
        ("k", "scroll", Some("up")),
        ("<C-d>", "scroll", Some("half-down")),
        ("gt", "tab", Some("next")),
        ("gT", "tab", Some("previous")),
        ("v", "mode", Some("visual")),
    ] {
        session.map_binding(None, keys, action, argument)?;
    }
    session.map_binding(Some("visual"), "<Esc>", "mode", Some("normal"))?;

    let out = transcript.clone();
    session.add_command(
        NamedCommand::new("open", move |_, args| {
            record(&out, format!("open {}", args.join(" ")));
            !args.is_empty()
        })
        .abbreviation("o")
        .description("Open a document")
        .completer(complete_documents),
    )?;

    let out = transcript.clone();
    session.add_command(
        NamedCommand::new("quit", move |_, _| {
            record(&out, "quit".to_string());
            true
        })
        .abbreviation("q")
        .description("Quit"),
    )?;

    let out = transcript.clone();
    session.add_special_command(
        SpecialCommand::new('/', move |_, needle, _| {
            record(&out, format!("search {needle}"));
            true
        })
        .fire_on_every_change(true),
    );

    Ok(session)
}

fn complete_documents(_: &Session, parameter: &str) -> Completion {
    let group = |label: &str, items: &[&str]| {
        items
            .iter()
            .filter(|item| item.starts_with(parameter))
            .fold(CompletionGroup::new(Some(label)), |g, item| g.with(*item, None))
    };
    Completion::new()
        .with_group(group("Documents", &DOCUMENTS))
        .with_group(group("Bookmarks", &BOOKMARKS))
}

#[cfg(test)]
mod tests {
    use chordline_core::KeyDispatch;
    use chordline_input::KeyChord;

    use super::*;

    #[test]
    fn test_demo_bindings_fire() {
        let transcript = Transcript::default();
        let mut session = build_session(&transcript).unwrap();

        session.on_chord(KeyChord::char('3'));
        session.on_chord(KeyChord::char('j'));
        session.on_chord(KeyChord::char('g'));
        assert!(matches!(
            session.on_chord(KeyChord::char('T')),
            KeyDispatch::Dispatched { .. }
        ));
        assert_eq!(
            *transcript.borrow(),
            vec![
                "scroll down (count 3)",
                "scroll down (count 3)",
                "scroll down (count 3)",
                "switch tab -1",
            ]
        );
    }

    #[test]
    fn test_visual_mode_round_trip() {
        let transcript = Transcript::default();
        let mut session = build_session(&transcript).unwrap();
        let visual = session.mode_by_name("visual").unwrap();

        session.on_chord(KeyChord::char('v'));
        assert_eq!(session.current_mode(), visual);
        session.on_chord(KeyChord::new(
            chordline_input::keysyms::ESCAPE,
            chordline_input::ModifierMask::empty(),
        ));
        assert_eq!(session.current_mode(), session.normal_mode());
    }
}
