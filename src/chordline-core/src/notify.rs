//! User-visible notifications.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::{error, info, warn};

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NotifyLevel {
    Info,
    Warning,
    Error,
}

impl fmt::Display for NotifyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NotifyLevel::Info => "info",
            NotifyLevel::Warning => "warning",
            NotifyLevel::Error => "error",
        };
        f.write_str(s)
    }
}

/// Where notifications go. The host usually shows them in a status bar.
pub trait Notifier {
    fn notify(&self, level: NotifyLevel, message: &str);
}

/// Forwards notifications to `tracing` at the matching level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, level: NotifyLevel, message: &str) {
        match level {
            NotifyLevel::Info => info!(target: "chordline::notify", "{message}"),
            NotifyLevel::Warning => warn!(target: "chordline::notify", "{message}"),
            NotifyLevel::Error => error!(target: "chordline::notify", "{message}"),
        }
    }
}

/// Shared log of recorded notifications.
pub type NotificationLog = Rc<RefCell<Vec<(NotifyLevel, String)>>>;

/// Keeps every notification in memory.
///
/// Hand the session one of these and keep [`RecordingNotifier::log`] to read
/// back what was reported.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    log: NotificationLog,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle onto the recorded notifications.
    pub fn log(&self) -> NotificationLog {
        self.log.clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: NotifyLevel, message: &str) {
        self.log.borrow_mut().push((level, message.to_string()));
    }
}
