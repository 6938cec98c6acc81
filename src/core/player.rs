//! Player identification and the per-game roster.
//!
//! ## PlayerId
//!
//! Index into the roster, assigned in enrolment order.
//!
//! ## Roster
//!
//! Players of one game: enrolment (explicit during signups, lazy on a
//! first correct guess in free-join mode), elimination, and points.
//! Chat users are matched by their normalized user id, so "Ash K" and
//! "ashk" are the same player.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::error::{ChainError, ChainResult};
use crate::links::to_id;

/// Player identifier, 0-based in enrolment order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u16);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw player index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// One enrolled player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Roster index.
    pub id: PlayerId,
    /// Display name as the host supplied it.
    pub name: String,
    /// Eliminated players take no more turns and cannot score.
    pub eliminated: bool,
    /// Points scored (free-join mode).
    pub points: u32,
}

/// Players of a single game.
#[derive(Clone, Debug)]
pub struct Roster {
    players: Vec<Player>,
    by_user: FxHashMap<String, PlayerId>,
    capacity: usize,
}

impl Roster {
    /// Create an empty roster holding at most `capacity` players.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            players: Vec::new(),
            by_user: FxHashMap::default(),
            capacity,
        }
    }

    /// Enroll a user, or return their existing id.
    pub fn enroll(&mut self, name: &str) -> ChainResult<PlayerId> {
        let user = to_id(name);
        if let Some(&id) = self.by_user.get(&user) {
            return Ok(id);
        }
        if self.players.len() >= self.capacity {
            return Err(ChainError::RosterFull(self.capacity));
        }

        let id = u16::try_from(self.players.len())
            .map(PlayerId)
            .map_err(|_| ChainError::RosterFull(self.players.len()))?;
        self.players.push(Player {
            id,
            name: name.to_string(),
            eliminated: false,
            points: 0,
        });
        self.by_user.insert(user, id);
        Ok(id)
    }

    /// Look up an enrolled user.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<PlayerId> {
        self.by_user.get(&to_id(name)).copied()
    }

    /// Get a player by id.
    #[must_use]
    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    /// Display name of a player, empty if unknown.
    #[must_use]
    pub fn name(&self, id: PlayerId) -> &str {
        self.get(id).map_or("", |p| p.name.as_str())
    }

    /// Whether the player is eliminated. Unknown ids count as eliminated.
    #[must_use]
    pub fn is_eliminated(&self, id: PlayerId) -> bool {
        self.get(id).map_or(true, |p| p.eliminated)
    }

    /// Mark a player eliminated.
    pub fn eliminate(&mut self, id: PlayerId) {
        if let Some(player) = self.players.get_mut(id.index()) {
            player.eliminated = true;
        }
    }

    /// Add points to a player and return their new total.
    pub fn add_points(&mut self, id: PlayerId, points: u32) -> u32 {
        match self.players.get_mut(id.index()) {
            Some(player) => {
                player.points += points;
                player.points
            }
            None => 0,
        }
    }

    /// Players that have not been eliminated, in enrolment order.
    pub fn remaining(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| !p.eliminated)
    }

    /// Number of players that have not been eliminated.
    #[must_use]
    pub fn remaining_count(&self) -> usize {
        self.remaining().count()
    }

    /// Iterate over every enrolled player.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Number of enrolled players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Whether nobody has enrolled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
