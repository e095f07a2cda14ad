//! Replay of recorded input through the normal pipeline.
//!
//! Replayed events are queued and drained by the host loop instead of being
//! dispatched recursively. Queuing while a drain is running is rejected, so a
//! replayed action cannot start another replay.

use std::collections::VecDeque;

use chordline_input::KeyChord;
use tracing::debug;

use crate::error::{Error, Result};
use crate::session::Session;

/// A recorded input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayEvent {
    /// A normalized key for the main view.
    Key(KeyChord),
    /// A line submitted from the inputbar.
    Line(String),
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ReplayQueue {
    events: VecDeque<ReplayEvent>,
    draining: bool,
}

impl Session {
    /// Queue events for [`Session::drain_replay`].
    pub fn queue_replay(&mut self, events: impl IntoIterator<Item = ReplayEvent>) -> Result<()> {
        if self.replay.draining {
            debug!("replay rejected, one is already running");
            return Err(Error::ReplayInProgress);
        }
        self.replay.events.extend(events);
        Ok(())
    }

    /// Whether a drain is running.
    pub fn is_replaying(&self) -> bool {
        self.replay.draining
    }

    /// Feed every queued event through the session and return how many were
    /// consumed. Does nothing when called from inside a drain.
    pub fn drain_replay(&mut self) -> usize {
        if self.replay.draining {
            return 0;
        }
        self.replay.draining = true;

        let mut consumed = 0;
        while let Some(event) = self.replay.events.pop_front() {
            match event {
                ReplayEvent::Key(chord) => {
                    self.on_chord(chord);
                }
                ReplayEvent::Line(line) => {
                    self.on_line_submit(&line);
                }
            }
            consumed += 1;
        }

        self.replay.draining = false;
        debug!(consumed, "replay drained");
        consumed
    }
}
