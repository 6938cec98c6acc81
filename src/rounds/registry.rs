//! Games by room.
//!
//! The host keeps one `GameRegistry` and passes it around by reference.
//! Each game in it is an independent value with its own pool, index,
//! tracker, RNG, and scheduler state.

use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;

use super::game::ChainGame;
use super::host::{Host, TimerId};
use crate::core::{ChainConfig, ChainError, ChainResult};
use crate::links::to_id;

/// Active chain games keyed by normalized room id.
#[derive(Debug, Default)]
pub struct GameRegistry {
    games: FxHashMap<String, ChainGame>,
}

impl GameRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a game in `room`. A room holds one unfinished game at a time;
    /// a finished one is replaced.
    pub fn create(&mut self, room: &str, config: ChainConfig) -> ChainResult<&mut ChainGame> {
        let game = ChainGame::new(config)?;
        match self.games.entry(to_id(room)) {
            Entry::Occupied(entry) if !entry.get().phase().is_ended() => {
                Err(ChainError::AlreadyStarted)
            }
            Entry::Occupied(mut entry) => {
                entry.insert(game);
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => Ok(entry.insert(game)),
        }
    }

    /// The game in `room`.
    #[must_use]
    pub fn get(&self, room: &str) -> Option<&ChainGame> {
        self.games.get(&to_id(room))
    }

    /// The game in `room`, mutably.
    pub fn get_mut(&mut self, room: &str) -> Option<&mut ChainGame> {
        self.games.get_mut(&to_id(room))
    }

    /// Route a guess to the room's game.
    pub fn guess<H: Host + ?Sized>(
        &mut self,
        room: &str,
        host: &mut H,
        user: &str,
        text: &str,
    ) -> bool {
        self.get_mut(room)
            .is_some_and(|game| game.guess(host, user, text))
    }

    /// Route a fired timer to the room's game.
    pub fn on_timer<H: Host + ?Sized>(&mut self, room: &str, host: &mut H, timer: TimerId) -> bool {
        self.get_mut(room)
            .is_some_and(|game| game.on_timer(host, timer))
    }

    /// Remove the room's game, ending it first if it is still running.
    pub fn remove<H: Host + ?Sized>(&mut self, room: &str, host: &mut H) -> Option<ChainGame> {
        let mut game = self.games.remove(&to_id(room))?;
        game.on_end(host);
        Some(game)
    }

    /// Drop every finished game.
    pub fn prune_ended(&mut self) {
        self.games.retain(|_, game| !game.phase().is_ended());
    }

    /// Number of games held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// Whether no games are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::{Catalog, ContentVariant};
    use crate::rounds::RecordingHost;

    #[test]
    fn test_one_running_game_per_room() {
        let mut registry = GameRegistry::new();
        let mut host = RecordingHost::new();
        let catalog = Catalog::new().with_names(ContentVariant::Pokemon, ["cat", "top", "pot"]);

        let game = registry.create("Lobby", ChainConfig::free_join(2)).unwrap();
        game.on_signups(&mut host, &catalog).unwrap();

        assert!(matches!(
            registry.create("lobby", ChainConfig::free_join(2)),
            Err(ChainError::AlreadyStarted)
        ));
        assert!(registry.create("other", ChainConfig::free_join(2)).is_ok());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_remove_ends_game() {
        let mut registry = GameRegistry::new();
        let mut host = RecordingHost::new();
        let catalog = Catalog::new().with_names(ContentVariant::Pokemon, ["cat", "top", "pot"]);

        let game = registry.create("lobby", ChainConfig::free_join(2)).unwrap();
        game.on_signups(&mut host, &catalog).unwrap();
        assert_eq!(host.pending().len(), 1);

        let removed = registry.remove("lobby", &mut host).unwrap();
        assert!(removed.phase().is_ended());
        assert!(host.pending().is_empty());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_prune_and_replace_finished() {
        let mut registry = GameRegistry::new();
        let mut host = RecordingHost::new();

        registry.create("lobby", ChainConfig::free_join(2)).unwrap().on_end(&mut host);
        assert!(registry.create("lobby", ChainConfig::free_join(2)).is_ok());

        registry.get_mut("lobby").unwrap().on_end(&mut host);
        registry.prune_ended();
        assert!(registry.get("lobby").is_none());
        assert!(!registry.guess("lobby", &mut host, "ash", "cat"));
    }
}
