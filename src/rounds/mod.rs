//! Round scheduling: the two play modes and their host interface.
//!
//! - **Free-join**: every round is an independent draw; anyone may answer and
//!   the first match scores. First to the target points wins.
//! - **Elimination**: sweeps of shuffled turns over the survivors. An answer
//!   continues the chain for the next player; a missed turn eliminates.
//!   Survivors win when fewer than two remain or the sweep cap is reached.
//!
//! Both are driven entirely by [`ChainGame::guess`] and
//! [`ChainGame::on_timer`] callbacks from the [`Host`].

mod elimination;
mod free_join;
mod game;
mod host;
mod outcome;
mod phase;
mod registry;
mod turns;

pub use game::ChainGame;
pub use host::{Host, RecordingHost, TimerId};
pub use outcome::{GameOutcome, GameResult, Payout};
pub use phase::Phase;
pub use registry::GameRegistry;
pub use turns::TurnOrder;
