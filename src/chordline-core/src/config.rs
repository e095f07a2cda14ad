//! TOML configuration for a session.
//!
//! ```toml
//! [settings]
//! n-completion-items = 10
//! word-separator = " /"
//!
//! [[map]]
//! keys = "gt"
//! action = "next_tab"
//!
//! [[map]]
//! mode = "visual"
//! keys = "<C-d>"
//! action = "scroll"
//! argument = "half-down"
//! ```
//!
//! Entries are applied one by one; a bad entry is reported and skipped.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ConfigError, Result};
use crate::session::Session;
use crate::settings::SettingValue;

/// A parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// Setting name to value.
    pub settings: toml::Table,

    /// Key mappings, applied like `:map`.
    pub map: Vec<MapEntry>,
}

/// One `[[map]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapEntry {
    /// Mode name; the normal mode when absent.
    #[serde(default)]
    pub mode: Option<String>,

    /// Key spec such as `j`, `gt` or `<C-d>`.
    pub keys: String,

    /// Named action to bind.
    pub action: String,

    /// Named argument, or free text stored as the argument's data.
    #[serde(default)]
    pub argument: Option<String>,
}

impl ConfigFile {
    /// Read and parse a file.
    pub fn load(path: &Path) -> std::result::Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// Parse configuration text. `path` is only used in errors.
    pub fn parse(text: &str, path: &Path) -> std::result::Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: PathBuf::from(path),
            source,
        })
    }
}

/// Convert a TOML scalar to a setting value. Tables, arrays and dates have no
/// setting equivalent.
pub fn value_from_toml(value: &toml::Value) -> Option<SettingValue> {
    match value {
        toml::Value::Boolean(b) => Some(SettingValue::Bool(*b)),
        toml::Value::Integer(i) => Some(SettingValue::Int(*i)),
        toml::Value::Float(f) => Some(SettingValue::Float(*f)),
        toml::Value::String(s) => Some(SettingValue::String(s.clone())),
        toml::Value::Datetime(_) | toml::Value::Array(_) | toml::Value::Table(_) => None,
    }
}

impl Session {
    /// Apply settings and mappings, returning one error per rejected entry.
    pub fn apply_config(&mut self, config: &ConfigFile) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        for (key, value) in &config.settings {
            let Some(value) = value_from_toml(value) else {
                errors.push(ConfigError::Value {
                    key: key.clone(),
                    message: format!("unsupported value type {}", value.type_str()),
                });
                continue;
            };
            if let Err(err) = self.settings.set(key, value) {
                errors.push(ConfigError::Value {
                    key: key.clone(),
                    message: err.to_string(),
                });
            }
        }

        for entry in &config.map {
            if let Err(err) = self.map_binding(
                entry.mode.as_deref(),
                &entry.keys,
                &entry.action,
                entry.argument.as_deref(),
            ) {
                errors.push(ConfigError::Value {
                    key: format!("map {}", entry.keys),
                    message: err.to_string(),
                });
            }
        }

        for err in &errors {
            warn!(%err, "config entry rejected");
        }
        debug!(
            settings = config.settings.len(),
            mappings = config.map.len(),
            rejected = errors.len(),
            "config applied"
        );
        errors
    }

    /// Load a file and apply it. Fails only if the file cannot be read or
    /// parsed; rejected entries are returned.
    pub fn load_config(&mut self, path: &Path) -> Result<Vec<ConfigError>> {
        let config = ConfigFile::load(path)?;
        Ok(self.apply_config(&config))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use chordline_input::KeyChord;

    use super::*;
    use crate::action::action;
    use crate::error::Error;
    use crate::session::KeyDispatch;
    use crate::settings::{N_COMPLETION_ITEMS, WORD_SEPARATOR};

    const SAMPLE: &str = r#"
[settings]
n-completion-items = 10
word-separator = " /"

[[map]]
keys = "gt"
action = "next_tab"
"#;

    #[test]
    fn test_parse_sample() {
        let config = ConfigFile::parse(SAMPLE, Path::new("inline")).unwrap();
        assert_eq!(config.settings.len(), 2);
        assert_eq!(
            config.map,
            vec![MapEntry {
                mode: None,
                keys: "gt".into(),
                action: "next_tab".into(),
                argument: None,
            }]
        );
    }

    #[test]
    fn test_parse_error_names_path() {
        let err = ConfigFile::parse("[settings", Path::new("broken.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_load_and_apply_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let mut session = Session::new();
        session.register_named_action("next_tab", action(|_, _| true));
        let errors = session.load_config(file.path()).unwrap();
        assert!(errors.is_empty(), "{errors:?}");

        assert_eq!(session.settings().get_int(N_COMPLETION_ITEMS), Some(10));
        assert_eq!(session.settings().get_string(WORD_SEPARATOR), Some(" /"));
        session.on_chord(KeyChord::char('g'));
        assert!(matches!(
            session.on_chord(KeyChord::char('t')),
            KeyDispatch::Dispatched { .. }
        ));
    }

    #[test]
    fn test_bad_entries_do_not_stop_the_rest() {
        let text = r#"
[settings]
n-completion-items = "lots"
no-such-setting = true
word-separator = "-"
nested = { a = 1 }

[[map]]
keys = "q"
action = "missing"
"#;
        let config = ConfigFile::parse(text, Path::new("inline")).unwrap();
        let mut session = Session::new();
        let errors = session.apply_config(&config);

        assert_eq!(errors.len(), 4);
        assert_eq!(session.settings().get_string(WORD_SEPARATOR), Some("-"));
        assert_eq!(session.settings().get_int(N_COMPLETION_ITEMS), Some(15));
        assert!(
            errors
                .iter()
                .all(|e| matches!(e, ConfigError::Value { .. }))
        );
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new();
        let err = session
            .load_config(&dir.path().join("absent.toml"))
            .unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Read { .. })));
    }
}
