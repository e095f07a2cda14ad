//! Error types for chordline-core.

use std::path::PathBuf;

use chordline_input::KeySpecError;
use thiserror::Error;

/// Errors returned by session and registration calls.
///
/// None of these are fatal: every failure leaves the session usable.
#[derive(Debug, Error)]
pub enum Error {
    /// The keymap could not resolve a hardware keycode.
    #[error("key event not translatable: keycode {keycode} in group {group}")]
    EventNotTranslatable { keycode: u16, group: u8 },

    /// A shortcut with no key, no modifier and no buffered command.
    #[error("shortcut needs a key, a modifier or a buffered command")]
    EmptyTrigger,

    /// A named command with an empty name.
    #[error("command name must not be empty")]
    EmptyCommandName,

    /// Mode name or id not registered.
    #[error("unknown mode: {0}")]
    UnknownMode(String),

    /// Setting name not registered.
    #[error("unknown setting: {0}")]
    UnknownSetting(String),

    /// Value of the wrong type for a setting.
    #[error("setting '{name}' expects {expected}, got {found}")]
    SettingType {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    /// No named action registered under this name.
    #[error("unknown action: {0}")]
    UnknownAction(String),

    /// Replay requested while a replay is being drained.
    #[error("a replay is already in progress")]
    ReplayInProgress,

    /// Invalid key spec.
    #[error(transparent)]
    KeySpec(#[from] KeySpecError),

    /// Configuration file problem.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or does not have the expected shape.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A single entry was rejected.
    #[error("invalid value for '{key}': {message}")]
    Value { key: String, message: String },
}

/// Result type for chordline-core operations.
pub type Result<T> = std::result::Result<T, Error>;
