//! Game configuration.
//!
//! Hosts build a `ChainConfig` from the game's option wiring:
//! - `PlayMode`: free-join scoring or turn-based elimination
//! - `ContentVariant`: which named candidates form the pool
//! - Link shape: key length, reverse linking, letter-based filtering
//! - Timing: per-turn budget, its decay toward a floor, intermissions
//!
//! `validate()` is called before a game is created; an invalid config
//! never reaches play.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{ChainError, ChainResult};
use crate::links::ContentVariant;

/// How rounds progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayMode {
    /// Anyone may guess each round; first to `target_points` wins.
    FreeJoin {
        /// Points needed to win.
        target_points: u32,
    },
    /// Players answer in turn; a missed turn eliminates.
    Elimination {
        /// Sweeps played before the survivors win.
        max_sweeps: u32,
    },
}

impl PlayMode {
    /// Whether this is free-join mode.
    #[must_use]
    pub fn is_free_join(self) -> bool {
        matches!(self, PlayMode::FreeJoin { .. })
    }
}

/// Configuration for one chain game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Round progression mode.
    pub mode: PlayMode,

    /// Content variant supplying the candidates.
    pub variant: ContentVariant,

    /// Length of start and end keys, in characters of the normalized id.
    pub link_length: usize,

    /// A guess may also continue the chain by matching the current link's start
    /// with its own end.
    pub reverse_links: bool,

    /// Require both a start and an end key for every candidate.
    pub letter_based: bool,

    /// Admit alternate formes (Pokémon variant only).
    pub accepts_formes: bool,

    /// Time budget for a round (free-join) or a turn (elimination).
    pub round_time: Duration,

    /// Amount removed from `round_time` at the start of every sweep after the first.
    pub round_time_step: Duration,

    /// `round_time` never decays below this.
    pub round_time_floor: Duration,

    /// Pause before the first free-join round, between rounds after a point,
    /// and between a sweep announcement and its first turn.
    pub intermission: Duration,

    /// Roster capacity.
    pub max_players: usize,

    /// Name used in announcements ("The <mascot> spelled out ...").
    pub mascot: String,

    /// RNG seed for link selection and turn order.
    pub seed: u64,

    /// Reward per surviving player in elimination mode.
    pub winner_reward: u32,

    /// Reward per point scored in free-join mode.
    pub points_reward: u32,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            mode: PlayMode::Elimination { max_sweeps: 20 },
            variant: ContentVariant::Pokemon,
            link_length: 1,
            reverse_links: false,
            letter_based: true,
            accepts_formes: false,
            round_time: Duration::from_secs(7),
            round_time_step: Duration::from_millis(500),
            round_time_floor: Duration::from_secs(3),
            intermission: Duration::from_secs(5),
            max_players: 20,
            mascot: "Smeargle".to_string(),
            seed: 42,
            winner_reward: 500,
            points_reward: 50,
        }
    }
}

impl ChainConfig {
    /// Free-join game to `target_points`.
    #[must_use]
    pub fn free_join(target_points: u32) -> Self {
        Self {
            mode: PlayMode::FreeJoin { target_points },
            ..Self::default()
        }
    }

    /// Elimination game capped at `max_sweeps`.
    #[must_use]
    pub fn elimination(max_sweeps: u32) -> Self {
        Self {
            mode: PlayMode::Elimination { max_sweeps },
            ..Self::default()
        }
    }

    /// Set the content variant.
    #[must_use]
    pub fn with_variant(mut self, variant: ContentVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the key length.
    #[must_use]
    pub fn with_link_length(mut self, length: usize) -> Self {
        self.link_length = length;
        self
    }

    /// Enable or disable reverse linking.
    #[must_use]
    pub fn with_reverse_links(mut self, enabled: bool) -> Self {
        self.reverse_links = enabled;
        self
    }

    /// Enable or disable letter-based filtering.
    #[must_use]
    pub fn with_letter_based(mut self, enabled: bool) -> Self {
        self.letter_based = enabled;
        self
    }

    /// Admit alternate formes.
    #[must_use]
    pub fn with_formes(mut self, enabled: bool) -> Self {
        self.accepts_formes = enabled;
        self
    }

    /// Set the round time and its decay floor.
    #[must_use]
    pub fn with_round_time(mut self, round_time: Duration, floor: Duration) -> Self {
        self.round_time = round_time;
        self.round_time_floor = floor;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the mascot name.
    #[must_use]
    pub fn with_mascot(mut self, mascot: impl Into<String>) -> Self {
        self.mascot = mascot.into();
        self
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> ChainResult<()> {
        if self.link_length == 0 {
            return Err(ChainError::InvalidConfig("link_length must be at least 1".into()));
        }
        match self.mode {
            PlayMode::FreeJoin { target_points: 0 } => {
                return Err(ChainError::InvalidConfig("target_points must be at least 1".into()));
            }
            PlayMode::Elimination { max_sweeps: 0 } => {
                return Err(ChainError::InvalidConfig("max_sweeps must be at least 1".into()));
            }
            _ => {}
        }
        if self.round_time_floor > self.round_time {
            return Err(ChainError::InvalidConfig(format!(
                "round_time_floor ({:?}) exceeds round_time ({:?})",
                self.round_time_floor, self.round_time
            )));
        }
        if self.max_players == 0 {
            return Err(ChainError::InvalidConfig("max_players must be at least 1".into()));
        }
        if self.max_players > usize::from(u16::MAX) {
            return Err(ChainError::InvalidConfig(format!(
                "max_players ({}) exceeds {}",
                self.max_players,
                u16::MAX
            )));
        }
        Ok(())
    }
}
