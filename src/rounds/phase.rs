//! Scheduler phases.
//!
//! Free-join: `Idle → Signups → AwaitingGuess → Scoring → AwaitingGuess → … → Ended`.
//!
//! Elimination: `Idle → Signups → SweepIntro → AwaitingTurnGuess → … → Ended`.
//! Turn start and sweep completion are instantaneous transitions between
//! `AwaitingTurnGuess` and `SweepIntro` and have no phase of their own.
//!
//! Every waiting phase has exactly one pending timer, tagged with the
//! [`Wakeup`] that says what happens when it fires.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Where a game is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Created, pool not built yet.
    #[default]
    Idle,
    /// Pool built, waiting for the game to start.
    Signups,
    /// Free-join: a link is out and anyone may answer.
    AwaitingGuess,
    /// Free-join: a point was just scored; the next round is scheduled.
    Scoring,
    /// Elimination: a sweep was announced; its first turn is scheduled.
    SweepIntro {
        /// Sweep number, from 1.
        sweep: u32,
    },
    /// Elimination: waiting for one player's answer.
    AwaitingTurnGuess {
        /// The player whose turn it is.
        player: PlayerId,
    },
    /// Finished. No more timers or guesses are accepted.
    Ended,
}

impl Phase {
    /// Whether the game has finished.
    #[must_use]
    pub fn is_ended(self) -> bool {
        self == Phase::Ended
    }

    /// Player whose turn it is, in elimination mode.
    #[must_use]
    pub fn turn_player(self) -> Option<PlayerId> {
        match self {
            Phase::AwaitingTurnGuess { player } => Some(player),
            _ => None,
        }
    }
}

/// What the pending timer does when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Wakeup {
    /// Free-join auto start after signups.
    Start,
    /// Advance: next free-join round, or next elimination turn.
    NextRound,
    /// Free-join round ran out without a correct answer.
    RoundExpired,
    /// Elimination turn ran out; the player is eliminated.
    TurnExpired,
}
