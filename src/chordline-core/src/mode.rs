//! ModeRegistry - Named modes for binding filters.

use std::fmt;

use tracing::debug;

use crate::error::{Error, Result};

/// Opaque mode identifier. [`ModeId::ALL`] marks bindings active in every mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ModeId(pub u32);

impl ModeId {
    /// Wildcard: applies in every mode.
    pub const ALL: ModeId = ModeId(0);

    /// Returns true if a binding registered in `self` applies while `current`
    /// is active.
    pub fn applies_in(self, current: ModeId) -> bool {
        self == ModeId::ALL || self == current
    }
}

impl fmt::Display for ModeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Assigns identifiers to mode names and tracks the current mode.
#[derive(Debug, Clone, Default)]
pub struct ModeRegistry {
    /// Mode names; the id of `names[i]` is `i + 1`.
    names: Vec<String>,
    current: ModeId,
}

impl ModeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a mode and returns its id.
    ///
    /// Names are case-sensitive; registering a known name returns the id it
    /// already has.
    pub fn add(&mut self, name: &str) -> ModeId {
        if let Some(id) = self.id(name) {
            return id;
        }
        self.names.push(name.to_string());
        let id = ModeId(self.names.len() as u32);
        debug!(mode = name, id = id.0, "registered mode");
        id
    }

    /// Looks a mode up by name.
    pub fn id(&self, name: &str) -> Option<ModeId> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| ModeId(i as u32 + 1))
    }

    /// Returns the name of a mode.
    pub fn name(&self, id: ModeId) -> Option<&str> {
        let index = (id.0 as usize).checked_sub(1)?;
        self.names.get(index).map(String::as_str)
    }

    /// The active mode.
    pub fn current(&self) -> ModeId {
        self.current
    }

    /// Switches the active mode.
    pub fn set_current(&mut self, id: ModeId) -> Result<()> {
        if self.name(id).is_none() {
            return Err(Error::UnknownMode(id.to_string()));
        }
        if self.current != id {
            debug!(from = self.current.0, to = id.0, "mode changed");
        }
        self.current = id;
        Ok(())
    }

    /// Iterates `(id, name)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (ModeId, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| (ModeId(i as u32 + 1), name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential_and_stable() {
        let mut modes = ModeRegistry::new();
        let normal = modes.add("normal");
        let insert = modes.add("insert");
        assert_eq!(normal, ModeId(1));
        assert_eq!(insert, ModeId(2));
        assert_eq!(modes.add("normal"), normal);
        assert_eq!(modes.add("Normal"), ModeId(3));
        assert_eq!(modes.len(), 3);
    }

    #[test]
    fn test_lookup() {
        let mut modes = ModeRegistry::new();
        let normal = modes.add("normal");
        assert_eq!(modes.id("normal"), Some(normal));
        assert_eq!(modes.name(normal), Some("normal"));
        assert_eq!(modes.name(ModeId::ALL), None);
        assert_eq!(modes.id("visual"), None);
    }

    #[test]
    fn test_set_current() {
        let mut modes = ModeRegistry::new();
        let normal = modes.add("normal");
        modes.set_current(normal).unwrap();
        assert_eq!(modes.current(), normal);
        assert!(matches!(
            modes.set_current(ModeId(9)),
            Err(Error::UnknownMode(_))
        ));
        assert_eq!(modes.current(), normal);
    }

    #[test]
    fn test_wildcard_applies_everywhere() {
        assert!(ModeId::ALL.applies_in(ModeId(4)));
        assert!(ModeId(4).applies_in(ModeId(4)));
        assert!(!ModeId(3).applies_in(ModeId(4)));
    }
}
