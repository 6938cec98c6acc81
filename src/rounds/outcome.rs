//! Result of a finished game.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Who won.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Several survivors share the win.
    Winners(Vec<PlayerId>),
    /// Nobody won (ended early, or everyone was eliminated).
    NoWinner,
}

impl GameResult {
    /// Build from a winner list.
    #[must_use]
    pub fn from_winners(mut winners: Vec<PlayerId>) -> Self {
        match winners.len() {
            0 => GameResult::NoWinner,
            1 => GameResult::Winner(winners.remove(0)),
            _ => GameResult::Winners(winners),
        }
    }

    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Winners(ps) => ps.contains(&player),
            GameResult::NoWinner => false,
        }
    }

    /// All winners.
    #[must_use]
    pub fn winners(&self) -> Vec<PlayerId> {
        match self {
            GameResult::Winner(p) => vec![*p],
            GameResult::Winners(ps) => ps.clone(),
            GameResult::NoWinner => Vec::new(),
        }
    }
}

/// Reward owed to a player by the host's currency system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    /// Recipient.
    pub player: PlayerId,
    /// Amount.
    pub amount: u32,
}

/// Winners and rewards of a finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    /// Who won.
    pub result: GameResult,
    /// Rewards, in roster order.
    pub payouts: Vec<Payout>,
}
