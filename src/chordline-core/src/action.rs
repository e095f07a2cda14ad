//! Actions and their arguments.

use std::fmt;
use std::rc::Rc;

use chordline_input::PointerEvent;

use crate::session::Session;

/// Argument stored with a binding and handed to its action.
///
/// `n` is a numeric tag (a direction, a named constant); `data` carries an
/// optional string payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Argument {
    pub n: i32,
    pub data: Option<String>,
}

impl Argument {
    /// No tag, no payload.
    pub const NONE: Argument = Argument { n: 0, data: None };

    /// Creates an argument with a numeric tag.
    pub fn new(n: i32) -> Self {
        Self { n, data: None }
    }

    /// Creates an argument with a tag and a string payload.
    pub fn with_data(n: i32, data: impl Into<String>) -> Self {
        Self {
            n,
            data: Some(data.into()),
        }
    }

    /// The string payload, if any.
    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.data {
            Some(data) => write!(f, "{}:{data}", self.n),
            None => write!(f, "{}", self.n),
        }
    }
}

/// What an action is invoked with.
#[derive(Debug, Clone, Copy)]
pub struct Invocation<'a> {
    /// The binding's argument.
    pub argument: &'a Argument,
    /// The numeric prefix typed before the key; 0 when none was typed.
    pub count: u32,
    /// The pointer event, for mouse bindings.
    pub event: Option<&'a PointerEvent>,
}

impl<'a> Invocation<'a> {
    /// An invocation with no count and no pointer event.
    pub fn plain(argument: &'a Argument) -> Self {
        Self {
            argument,
            count: 0,
            event: None,
        }
    }
}

/// A bound action.
///
/// Returns `false` to stop a repeat loop early.
pub type ActionRef = Rc<dyn Fn(&mut Session, &Invocation<'_>) -> bool>;

/// Wraps a closure as an [`ActionRef`].
pub fn action<F>(f: F) -> ActionRef
where
    F: Fn(&mut Session, &Invocation<'_>) -> bool + 'static,
{
    Rc::new(f)
}

/// Invokes `action` up to `repeat` times, stopping at the first `false`.
///
/// Returns how many times it ran.
pub(crate) fn run_repeated(
    session: &mut Session,
    action: &ActionRef,
    invocation: &Invocation<'_>,
    repeat: u32,
) -> u32 {
    let mut invoked = 0;
    for _ in 0..repeat {
        invoked += 1;
        if !action(session, invocation) {
            break;
        }
    }
    invoked
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_argument_display() {
        assert_eq!(Argument::new(3).to_string(), "3");
        assert_eq!(Argument::with_data(1, "mono").to_string(), "1:mono");
        assert_eq!(Argument::NONE, Argument::default());
    }

    #[test]
    fn test_run_repeated_stops_on_false() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let act = action(move |_, _| {
            counter.set(counter.get() + 1);
            counter.get() < 3
        });

        let mut session = Session::new();
        let invoked = run_repeated(&mut session, &act, &Invocation::plain(&Argument::NONE), 10);
        assert_eq!(invoked, 3);
        assert_eq!(calls.get(), 3);
    }
}
