//! Binding tables.
//!
//! Three ordered collections: shortcuts for the main view (mode filtered,
//! chord or buffered trigger), mouse bindings, and inputbar shortcuts for the
//! line edit. Registration is idempotent by key: adding an existing key
//! updates the entry in place.

mod inputbar;
mod mouse;
mod shortcut;

pub use inputbar::{InputbarShortcut, InputbarTable};
pub use mouse::{MouseBinding, MouseTable};
pub use shortcut::{Resolution, ShortcutBinding, ShortcutDispatch, ShortcutTable};

/// What a registration call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// A new entry was appended.
    Added,
    /// This many existing entries were updated in place.
    Replaced(usize),
}

/// All bindings of a session.
#[derive(Debug, Clone, Default)]
pub struct BindingTable {
    pub shortcuts: ShortcutTable,
    pub mouse: MouseTable,
    pub inputbar: InputbarTable,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }
}
