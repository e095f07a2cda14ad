//! Line submission, inputbar keys and completion through a session.

use std::cell::RefCell;
use std::rc::Rc;

use chordline_core::completion::{escape, unescape};
use chordline_core::{
    Completion, CompletionGroup, Direction, DispatchOutcome, NamedCommand, NotifyLevel,
    RecordingNotifier, Session, SettingValue, SpecialCommand,
};
use chordline_input::{KeyChord, ModifierMask, keysyms};
use pretty_assertions::assert_eq;

type Log = Rc<RefCell<Vec<String>>>;

fn session_with_commands() -> (Session, Log) {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let mut session = Session::new();
    session.register_default_commands().unwrap();
    session.register_default_inputbar_shortcuts();

    let sink = log.clone();
    session
        .add_command(
            NamedCommand::new("open", move |_, args| {
                sink.borrow_mut().push(format!("open {}", args.join("|")));
                true
            })
            .abbreviation("o")
            .description("Open a document")
            .completer(|_, parameter| {
                let recent = ["report.pdf", "my notes.pdf"]
                    .into_iter()
                    .filter(|f| f.starts_with(parameter))
                    .fold(CompletionGroup::new(Some("Recent")), |g, f| g.with(f, None));
                let bookmarks = ["chapter-1", "chapter-2"]
                    .into_iter()
                    .filter(|f| f.starts_with(parameter))
                    .fold(CompletionGroup::new(Some("Bookmarks")), |g, f| {
                        g.with(f, None)
                    });
                Completion::new().with_group(recent).with_group(bookmarks)
            }),
        )
        .unwrap();

    let sink = log.clone();
    session
        .add_command(NamedCommand::new("quit", move |_, _| {
            sink.borrow_mut().push("quit".to_string());
            true
        }))
        .unwrap();

    (session, log)
}

fn tab(session: &mut Session, direction: Direction) -> String {
    session.on_tab_key(direction);
    session.line_edit().text.clone()
}

#[test]
fn test_abbreviation_dispatches_with_arguments() {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let mut session = Session::new();
    let sink = log.clone();
    session
        .add_command(
            NamedCommand::new("set", move |_, args| {
                sink.borrow_mut().push(args.join(","));
                true
            })
            .abbreviation("s"),
        )
        .unwrap();

    assert_eq!(session.submit("s font mono"), DispatchOutcome::Handled);
    assert_eq!(*log.borrow(), vec!["font,mono"]);
}

#[test]
fn test_quoted_arguments_and_parse_errors() {
    let (mut session, log) = session_with_commands();
    assert!(session.on_line_submit(r#":open "my notes.pdf" 'x y'"#).is_handled());
    assert_eq!(*log.borrow(), vec!["open my notes.pdf|x y"]);

    session.on_line_changed(":open \"unterminated");
    assert_eq!(
        session.on_line_submit(":open \"unterminated"),
        DispatchOutcome::ParseError
    );
    assert!(session.line_edit().is_empty());
}

#[test]
fn test_live_special_command_fires_on_every_change() {
    let (mut session, _) = session_with_commands();
    let searches: Log = Rc::new(RefCell::new(Vec::new()));
    let sink = searches.clone();
    session.add_special_command(
        SpecialCommand::new('/', move |_, needle, _| {
            sink.borrow_mut().push(needle.to_string());
            true
        })
        .fire_on_every_change(true),
    );

    session.on_line_changed("/a");
    session.on_line_changed("/ab");
    assert_eq!(session.on_line_submit("/ab"), DispatchOutcome::Handled);
    assert_eq!(*searches.borrow(), vec!["a", "ab"]);
}

#[test]
fn test_command_completion_cycles_through_all_commands() {
    let (mut session, _) = session_with_commands();
    session.on_line_changed(":");

    let names: Vec<String> = (0..6).map(|_| tab(&mut session, Direction::Next)).collect();
    assert_eq!(
        names,
        vec![":set", ":map", ":unmap", ":open", ":quit", ":set"]
    );
    assert!(session.completion().is_shown());

    assert_eq!(tab(&mut session, Direction::Previous), ":quit");
}

#[test]
fn test_previous_on_fresh_list_starts_at_last_entry() {
    let (mut session, _) = session_with_commands();
    session.on_line_changed(":");

    assert_eq!(tab(&mut session, Direction::Previous), ":quit");
    assert_eq!(tab(&mut session, Direction::Previous), ":open");
    assert_eq!(tab(&mut session, Direction::Next), ":quit");
}

#[test]
fn test_values_with_newlines_keep_cycling() {
    let mut session = Session::new();
    session
        .add_command(NamedCommand::new("open", |_, _| true).completer(|_, _| {
            let values = ["a\nb", "c\rd", "e"]
                .into_iter()
                .fold(CompletionGroup::new(None), |g, v| g.with(v, None));
            Completion::new().with_group(values)
        }))
        .unwrap();
    session.on_line_changed(":open ");

    let lines: Vec<String> = (0..4).map(|_| tab(&mut session, Direction::Next)).collect();
    assert_eq!(
        lines,
        vec![":open a'\n'b", ":open c\\\rd", ":open e", ":open a'\n'b"]
    );
    assert!(session.on_line_submit(&lines[0]).is_handled());
}

#[test]
fn test_single_candidate_is_not_shown_and_pivots() {
    let (mut session, _) = session_with_commands();
    session.on_line_changed(":q");

    assert_eq!(tab(&mut session, Direction::Next), ":quit ");
    assert!(!session.completion().is_shown());

    session.on_line_changed(":se");
    assert_eq!(tab(&mut session, Direction::Next), ":set ");
    assert!(!session.completion().is_shown());

    assert_eq!(
        tab(&mut session, Direction::Next),
        ":set n-completion-items"
    );
    assert!(session.completion().is_shown());
    assert!(!session.completion().is_command_mode());
    assert_eq!(tab(&mut session, Direction::Next), ":set word-separator");
    assert_eq!(
        tab(&mut session, Direction::Next),
        ":set n-completion-items"
    );
}

#[test]
fn test_parameter_completion_escapes_and_navigates_groups() {
    let (mut session, _) = session_with_commands();
    session.on_line_changed(":open ");

    assert_eq!(tab(&mut session, Direction::Next), ":open report.pdf");
    assert_eq!(tab(&mut session, Direction::Next), r":open my\ notes.pdf");
    assert_eq!(tab(&mut session, Direction::NextGroup), ":open chapter-1");
    assert_eq!(tab(&mut session, Direction::Next), ":open chapter-2");
    assert_eq!(tab(&mut session, Direction::PreviousGroup), ":open report.pdf");
    assert_eq!(tab(&mut session, Direction::Previous), ":open chapter-2");

    let labels: Vec<(bool, String)> = session
        .completion()
        .entries()
        .iter()
        .map(|e| (e.is_group_header, e.label.clone()))
        .collect();
    assert_eq!(
        labels,
        vec![
            (true, "Recent".to_string()),
            (false, "report.pdf".to_string()),
            (false, "my notes.pdf".to_string()),
            (true, "Bookmarks".to_string()),
            (false, "chapter-1".to_string()),
            (false, "chapter-2".to_string()),
        ]
    );
}

#[test]
fn test_completion_through_inputbar_keys() {
    let (mut session, _) = session_with_commands();
    session.on_line_changed(":open ch");

    let tab_key = KeyChord::new(keysyms::TAB, ModifierMask::empty());
    let shift_tab = KeyChord::new(keysyms::ISO_LEFT_TAB, ModifierMask::SHIFT);
    assert!(session.on_inputbar_chord(tab_key));
    assert_eq!(session.line_edit().text, ":open chapter-1");
    assert!(session.on_inputbar_chord(shift_tab));
    assert_eq!(session.line_edit().text, ":open chapter-2");
    assert!(session.completion().is_shown());

    let ctrl_a = KeyChord::with_char('a', ModifierMask::CONTROL);
    assert!(session.on_inputbar_chord(ctrl_a));
    assert!(!session.completion().is_shown());
    assert_eq!(session.line_edit().cursor, 1);
}

#[test]
fn test_completion_window_follows_setting() {
    let mut session = Session::new();
    session
        .add_command(NamedCommand::new("goto", |_, _| true).completer(|_, _| {
            let pages = (0..10).fold(CompletionGroup::new(None), |g, i| {
                g.with(format!("p{i}"), None)
            });
            Completion::new().with_group(pages)
        }))
        .unwrap();
    session
        .settings_mut()
        .set("n-completion-items", SettingValue::Int(4))
        .unwrap();

    session.on_line_changed(":goto ");
    for _ in 0..6 {
        session.on_tab_key(Direction::Next);
    }
    assert_eq!(session.line_edit().text, ":goto p5");

    let visible: Vec<usize> = session
        .completion()
        .visible()
        .into_iter()
        .map(|(i, _)| i)
        .collect();
    assert_eq!(visible, vec![3, 4, 5, 6, 7]);
}

#[test]
fn test_inputbar_editing_and_history() {
    let (mut session, _) = session_with_commands();
    session.on_line_submit(":open a.pdf");
    session.on_line_submit(":quit");

    let up = KeyChord::new(keysyms::UP, ModifierMask::empty());
    let down = KeyChord::new(keysyms::DOWN, ModifierMask::empty());
    session.on_line_changed(":");
    session.on_inputbar_chord(up);
    assert_eq!(session.line_edit().text, ":quit");
    session.on_inputbar_chord(up);
    assert_eq!(session.line_edit().text, ":open a.pdf");
    session.on_inputbar_chord(down);
    session.on_inputbar_chord(down);
    assert_eq!(session.line_edit().text, ":");

    session.on_line_changed(":open some/dir/file");
    session.on_inputbar_chord(KeyChord::with_char('w', ModifierMask::CONTROL));
    assert_eq!(session.line_edit().text, ":open some/dir/");

    session.on_line_changed(":");
    let backspace = KeyChord::new(keysyms::BACKSPACE, ModifierMask::empty());
    session.on_inputbar_chord(backspace);
    assert!(session.line_edit().is_empty());
}

#[test]
fn test_unknown_command_is_reported() {
    let notifier = RecordingNotifier::new();
    let log = notifier.log();
    let mut session = Session::new().with_notifier(notifier);

    assert_eq!(
        session.on_line_submit(":nope 1"),
        DispatchOutcome::UnknownCommand(":nope 1".to_string())
    );
    assert_eq!(
        *log.borrow(),
        vec![(NotifyLevel::Error, "Not a valid command: nope".to_string())]
    );
}

#[test]
fn test_escape_round_trip_on_special_characters() {
    for s in [" ", "\t\t", "\"'", "##", "\\", " \\\"#'\t"] {
        let escaped = escape(s);
        assert_eq!(unescape(&escaped), s);
        assert_eq!(escape(&unescape(&escaped)), escaped);
    }
}
