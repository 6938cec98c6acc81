//! Core engine types: players, RNG, configuration, errors.
//!
//! Nothing in here knows about links or rounds; the `links` and `rounds`
//! modules build on these.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;

pub use config::{ChainConfig, PlayMode};
pub use error::{ChainError, ChainResult};
pub use player::{Player, PlayerId, Roster};
pub use rng::{GameRng, GameRngState};
