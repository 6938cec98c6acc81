//! Host interface: room messaging and cancelable timers.
//!
//! The chat host owns the room, the message transport, and the clock. A game
//! asks it to announce text and to call back after a delay; when a timer
//! fires, the host passes its id to [`ChainGame::on_timer`]. Timers the game
//! has since cancelled or replaced are ignored there, so a host that cannot
//! cancel reliably still never advances a round twice.
//!
//! [`ChainGame::on_timer`]: crate::rounds::ChainGame::on_timer

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Handle for a scheduled callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerId(pub u64);

/// What a game needs from its room.
pub trait Host {
    /// Announce text to the room.
    fn say(&mut self, text: &str);

    /// Schedule a callback after `delay`.
    fn schedule(&mut self, delay: Duration) -> TimerId;

    /// Cancel a scheduled callback. Unknown ids are ignored.
    fn cancel(&mut self, timer: TimerId);
}

/// A host that records everything and fires timers on demand.
///
/// Used by tests and by hosts that drive games from their own event loop.
///
/// ## Example
///
/// ```
/// use std::time::Duration;
/// use chain_links::rounds::{Host, RecordingHost};
///
/// let mut host = RecordingHost::new();
/// host.say("hello");
/// let timer = host.schedule(Duration::from_secs(5));
///
/// assert_eq!(host.messages(), ["hello"]);
/// assert_eq!(host.next_timer(), Some((timer, Duration::from_secs(5))));
/// ```
#[derive(Clone, Debug, Default)]
pub struct RecordingHost {
    messages: Vec<String>,
    pending: Vec<(TimerId, Duration)>,
    next_id: u64,
}

impl RecordingHost {
    /// Create an empty host.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every message said so far.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// The most recent message.
    #[must_use]
    pub fn last_message(&self) -> Option<&str> {
        self.messages.last().map(String::as_str)
    }

    /// Drain the recorded messages.
    pub fn take_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }

    /// Timers scheduled and not yet cancelled or fired, oldest first.
    #[must_use]
    pub fn pending(&self) -> &[(TimerId, Duration)] {
        &self.pending
    }

    /// The most recently scheduled live timer.
    #[must_use]
    pub fn next_timer(&self) -> Option<(TimerId, Duration)> {
        self.pending.last().copied()
    }

    /// Remove a timer as if it fired. Returns false if it was not pending.
    pub fn fire(&mut self, timer: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(id, _)| *id != timer);
        self.pending.len() != before
    }
}

impl Host for RecordingHost {
    fn say(&mut self, text: &str) {
        self.messages.push(text.to_string());
    }

    fn schedule(&mut self, delay: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.pending.push((id, delay));
        id
    }

    fn cancel(&mut self, timer: TimerId) {
        self.pending.retain(|(id, _)| *id != timer);
    }
}
