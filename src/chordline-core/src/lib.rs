//! # Chordline Core
//!
//! Input resolution and completion engine for modal, key-driven
//! applications.
//!
//! A host registers shortcuts, mouse bindings and line commands on a
//! [`Session`] and feeds it key, pointer and inputbar events. The session
//! resolves them into actions:
//!
//! - **Shortcuts**: single chords (`j`, `<C-d>`) or buffered commands (`gt`),
//!   filtered by mode, repeated by a numeric prefix (`32j`).
//! - **Mouse bindings**: modifier, button and event type.
//! - **Line commands**: special commands chosen by their first character
//!   (`/needle`) and named commands with abbreviations (`:s font mono`).
//! - **Completion**: Tab-driven command and parameter completion with
//!   grouped candidates and a bounded display window.
//!
//! ## Quick Start
//!
//! ```
//! use chordline_core::{KeyDispatch, ModeId, Session, action};
//! use chordline_input::KeyChord;
//!
//! let mut session = Session::new();
//! session
//!     .bind("j", ModeId::ALL, action(|_, _| true))
//!     .unwrap();
//!
//! session.on_chord(KeyChord::char('3'));
//! let outcome = session.on_chord(KeyChord::char('j'));
//! assert_eq!(outcome, KeyDispatch::Dispatched { repeat: 3, invoked: 3 });
//! ```

pub mod action;
pub mod bindings;
mod builtin;
pub mod commands;
pub mod completion;
pub mod config;
pub mod error;
pub mod history;
pub mod inputbar;
pub mod mode;
pub mod notify;
pub mod replay;
pub mod session;
pub mod settings;

pub use action::{ActionRef, Argument, Invocation, action};
pub use bindings::{
    BindingTable, InputbarShortcut, MouseBinding, Registration, Resolution, ShortcutBinding,
};
pub use commands::{DispatchOutcome, NamedCommand, SpecialCommand};
pub use completion::{Completion, CompletionGroup, Direction, Rewrite};
pub use config::{ConfigFile, MapEntry};
pub use error::{ConfigError, Error, Result};
pub use history::{History, InputHistory};
pub use inputbar::{EditOp, HistoryDirection, LineEdit};
pub use mode::{ModeId, ModeRegistry};
pub use notify::{Notifier, NotifyLevel, RecordingNotifier, TracingNotifier};
pub use replay::ReplayEvent;
pub use session::{KeyDispatch, NORMAL_MODE, Session};
pub use settings::{SettingValue, Settings, SettingsProvider};
