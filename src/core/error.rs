//! Error types for game setup.
//!
//! Only setup can fail. Once a game is running, bad input is rejected
//! by returning `false` from the guess entry point and never surfaces here.

use thiserror::Error;

use crate::links::ContentVariant;

/// Result type for chain game setup operations.
pub type ChainResult<T> = Result<T, ChainError>;

/// Errors that prevent a chain game from starting.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChainError {
    /// The host asked for a content variant this crate does not know.
    #[error("game variation '{0}' has no pool")]
    UnknownVariant(String),

    /// Filtering left no candidates for the variant.
    #[error("no {variant} candidates survived filtering")]
    EmptyPool {
        /// Variant that was filtered.
        variant: ContentVariant,
    },

    /// Fewer than three candidates can ever be continued, so a substitution
    /// could land back on the current or the rejected link.
    #[error("only {viable} candidate(s) have a continuation; at least 3 are required")]
    DeadEndPool {
        /// Number of candidates that have a usable continuation after a cycle reset.
        viable: usize,
    },

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Signups or start were requested on a game that is already running.
    #[error("game already started")]
    AlreadyStarted,

    /// Start was requested before signups built the pool.
    #[error("signups have not been opened")]
    NotSignedUp,

    /// The roster already holds the configured maximum number of players.
    #[error("roster is full ({0} players)")]
    RosterFull(usize),
}
