//! Typed session settings.

use std::fmt;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Setting that bounds how many completion entries are shown.
pub const N_COMPLETION_ITEMS: &str = "n-completion-items";
/// Setting that lists the characters ending a word for word deletion.
pub const WORD_SEPARATOR: &str = "word-separator";

const DEFAULT_N_COMPLETION_ITEMS: i64 = 15;
const DEFAULT_WORD_SEPARATOR: &str = " /.-=&#?";

/// A setting value.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl SettingValue {
    /// Name of the value's type, for messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            SettingValue::Bool(_) => "bool",
            SettingValue::Int(_) => "int",
            SettingValue::Float(_) => "float",
            SettingValue::String(_) => "string",
        }
    }

    /// Parse `text` as a value of the same type as `self`.
    pub fn parse_like(&self, text: &str) -> Option<SettingValue> {
        match self {
            SettingValue::Bool(_) => match text {
                "true" | "on" | "yes" | "1" => Some(SettingValue::Bool(true)),
                "false" | "off" | "no" | "0" => Some(SettingValue::Bool(false)),
                _ => None,
            },
            SettingValue::Int(_) => text.parse().ok().map(SettingValue::Int),
            SettingValue::Float(_) => text.parse().ok().map(SettingValue::Float),
            SettingValue::String(_) => Some(SettingValue::String(text.to_string())),
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Bool(v) => write!(f, "{v}"),
            SettingValue::Int(v) => write!(f, "{v}"),
            SettingValue::Float(v) => write!(f, "{v}"),
            SettingValue::String(v) => write!(f, "{v}"),
        }
    }
}

/// Called with the setting name and its new value after a change.
pub type SettingCallback = Rc<dyn Fn(&str, &SettingValue)>;

#[derive(Clone)]
pub struct Setting {
    pub name: String,
    pub value: SettingValue,
    pub description: Option<String>,
    callback: Option<SettingCallback>,
}

impl fmt::Debug for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Setting")
            .field("name", &self.name)
            .field("value", &self.value)
            .field("description", &self.description)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

/// Read access to settings, as the resolution engine needs it.
pub trait SettingsProvider {
    fn get(&self, name: &str) -> Option<SettingValue>;
}

/// Ordered, typed settings.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    entries: Vec<Setting>,
}

impl Settings {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set holding the engine's own settings.
    pub fn with_defaults() -> Self {
        let mut settings = Self::new();
        settings.add(
            N_COMPLETION_ITEMS,
            SettingValue::Int(DEFAULT_N_COMPLETION_ITEMS),
            Some("Number of completion items shown around the cursor"),
            None,
        );
        settings.add(
            WORD_SEPARATOR,
            SettingValue::String(DEFAULT_WORD_SEPARATOR.to_string()),
            Some("Characters that end a word when deleting words"),
            None,
        );
        settings
    }

    /// Declare a setting. Re-declaring replaces value, description and
    /// callback.
    pub fn add(
        &mut self,
        name: &str,
        value: SettingValue,
        description: Option<&str>,
        callback: Option<SettingCallback>,
    ) {
        let setting = Setting {
            name: name.to_string(),
            value,
            description: description.map(str::to_string),
            callback,
        };
        match self.entries.iter_mut().find(|s| s.name == name) {
            Some(existing) => *existing = setting,
            None => self.entries.push(setting),
        }
    }

    /// Assign a value. The type must match the declared type, except that an
    /// int is accepted for a float setting.
    pub fn set(&mut self, name: &str, value: SettingValue) -> Result<()> {
        let setting = self
            .entries
            .iter_mut()
            .find(|s| s.name == name)
            .ok_or_else(|| Error::UnknownSetting(name.to_string()))?;

        let value = match (&setting.value, value) {
            (SettingValue::Float(_), SettingValue::Int(i)) => SettingValue::Float(i as f64),
            (current, value) if current.type_name() == value.type_name() => value,
            (current, value) => {
                warn!(setting = name, expected = current.type_name(), found = value.type_name(), "rejected setting value");
                return Err(Error::SettingType {
                    name: name.to_string(),
                    expected: current.type_name(),
                    found: value.type_name(),
                });
            }
        };

        debug!(setting = name, %value, "setting changed");
        setting.value = value;
        if let Some(callback) = setting.callback.clone() {
            callback(name, &setting.value);
        }
        Ok(())
    }

    /// Parse `text` according to the setting's type and assign it.
    pub fn set_from_str(&mut self, name: &str, text: &str) -> Result<()> {
        let current = self
            .value(name)
            .ok_or_else(|| Error::UnknownSetting(name.to_string()))?;
        let value = current.parse_like(text).ok_or_else(|| Error::SettingType {
            name: name.to_string(),
            expected: current.type_name(),
            found: "string",
        })?;
        self.set(name, value)
    }

    /// Flip a bool setting and return the new value.
    pub fn toggle(&mut self, name: &str) -> Result<bool> {
        match self.value(name) {
            Some(SettingValue::Bool(v)) => {
                let flipped = !*v;
                self.set(name, SettingValue::Bool(flipped))?;
                Ok(flipped)
            }
            Some(other) => Err(Error::SettingType {
                name: name.to_string(),
                expected: "bool",
                found: other.type_name(),
            }),
            None => Err(Error::UnknownSetting(name.to_string())),
        }
    }

    pub fn value(&self, name: &str) -> Option<&SettingValue> {
        self.setting(name).map(|s| &s.value)
    }

    pub fn setting(&self, name: &str) -> Option<&Setting> {
        self.entries.iter().find(|s| s.name == name)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.value(name)? {
            SettingValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn get_int(&self, name: &str) -> Option<i64> {
        match self.value(name)? {
            SettingValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn get_float(&self, name: &str) -> Option<f64> {
        match self.value(name)? {
            SettingValue::Float(v) => Some(*v),
            SettingValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn get_string(&self, name: &str) -> Option<&str> {
        match self.value(name)? {
            SettingValue::String(v) => Some(v),
            _ => None,
        }
    }

    /// Settings in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Setting> {
        self.entries.iter()
    }
}

impl SettingsProvider for Settings {
    fn get(&self, name: &str) -> Option<SettingValue> {
        self.value(name).cloned()
    }
}

/// Completion window size from a provider, defaulting to 15.
pub fn completion_window(provider: &dyn SettingsProvider) -> usize {
    match provider.get(N_COMPLETION_ITEMS) {
        Some(SettingValue::Int(n)) if n > 0 => usize::try_from(n).unwrap_or(usize::MAX),
        _ => DEFAULT_N_COMPLETION_ITEMS as usize,
    }
}

/// Word separators from a provider, defaulting to `" /.-=&#?"`.
pub fn word_separators(provider: &dyn SettingsProvider) -> String {
    match provider.get(WORD_SEPARATOR) {
        Some(SettingValue::String(s)) => s,
        _ => DEFAULT_WORD_SEPARATOR.to_string(),
    }
}
