//! # chain-links
//!
//! Round engine for "chain" minigames in a chat room: players answer with a
//! name whose first letters continue the last letters of the current link.
//!
//! ## Design Principles
//!
//! 1. **Host-Agnostic**: Messaging, timers, and data tables belong to the
//!    host. The engine sees them through [`rounds::Host`] and
//!    [`links::CandidateSource`].
//!
//! 2. **Isolated Games**: Every [`rounds::ChainGame`] owns its pool, index,
//!    usage tracker, RNG, and scheduler. Nothing is process-global.
//!
//! 3. **Deterministic**: Given a seed and the same sequence of guesses and
//!    timer fires, a game plays out identically.
//!
//! ## Modules
//!
//! - `core`: Players, RNG, configuration, errors
//! - `links`: Candidate pool, key index, usage tracking, link selection
//! - `rounds`: Free-join and elimination scheduling, host interface, registry
//! - `text`: Announcement formatting

pub mod core;
pub mod links;
pub mod rounds;
pub mod text;

// Re-export commonly used types
pub use crate::core::{ChainConfig, ChainError, ChainResult, GameRng, PlayMode, PlayerId, Roster};

pub use crate::links::{
    Candidate, CandidatePool, CandidateSource, Catalog, ContentVariant, KeyIndex, KeySide, Link,
    LinkId, LinkSelector, Selection, Substitution, UsageTracker,
};

pub use crate::rounds::{
    ChainGame, GameOutcome, GameRegistry, GameResult, Host, Payout, Phase, RecordingHost, TimerId,
};
