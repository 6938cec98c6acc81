//! Elimination turn order.
//!
//! A sweep is one pass over the surviving players in a freshly shuffled
//! order. Players eliminated mid-sweep are skipped when their slot comes up.

use std::collections::VecDeque;
use std::time::Duration;

use crate::core::{GameRng, PlayerId, Roster};

/// Queue of the current sweep plus the sweep counter and turn budget.
#[derive(Clone, Debug)]
pub struct TurnOrder {
    queue: VecDeque<PlayerId>,
    sweep: u32,
    round_time: Duration,
}

impl TurnOrder {
    /// Create an empty order with the starting turn budget.
    #[must_use]
    pub fn new(round_time: Duration) -> Self {
        Self {
            queue: VecDeque::new(),
            sweep: 0,
            round_time,
        }
    }

    /// Shuffle `players` into a new sweep and return its number.
    pub fn begin_sweep(&mut self, mut players: Vec<PlayerId>, rng: &mut GameRng) -> u32 {
        rng.shuffle(&mut players);
        self.queue = players.into();
        self.sweep += 1;
        self.sweep
    }

    /// Pop the next player who is still in the game.
    pub fn next_player(&mut self, roster: &Roster) -> Option<PlayerId> {
        while let Some(player) = self.queue.pop_front() {
            if !roster.is_eliminated(player) {
                return Some(player);
            }
        }
        None
    }

    /// Shorten the turn budget by `step`, never below `floor`.
    pub fn decay(&mut self, step: Duration, floor: Duration) {
        if self.round_time > floor {
            self.round_time = self.round_time.saturating_sub(step).max(floor);
        }
    }

    /// Sweeps begun so far.
    #[must_use]
    pub fn sweep(&self) -> u32 {
        self.sweep
    }

    /// Current turn budget.
    #[must_use]
    pub fn round_time(&self) -> Duration {
        self.round_time
    }

    /// Players still queued in this sweep, including any since eliminated.
    #[must_use]
    pub fn queued(&self) -> usize {
        self.queue.len()
    }
}
