//! The link graph: candidates, keys, and next-link selection.
//!
//! Data flows leaf first:
//! - [`CandidatePool`] is built once from a [`CandidateSource`] when signups open
//! - [`KeyIndex`] counts the pool's distinct links per key, also once
//! - [`UsageTracker`] counts key consumption within the current cycle
//! - [`LinkSelector`] owns all three and picks each next link
//!
//! ## Example
//!
//! ```
//! use chain_links::core::{ChainConfig, GameRng};
//! use chain_links::links::{CandidatePool, LinkSelector};
//!
//! let config = ChainConfig::default();
//! let pool = CandidatePool::from_names(["cat", "top", "pen", "tap"], &config).unwrap();
//! let mut selector = LinkSelector::new(pool, config.reverse_links).unwrap();
//!
//! let mut rng = GameRng::new(42);
//! selector.select_next(&mut rng, Some("cat"));
//! assert_eq!(selector.target_starts(), ["t"]);
//! ```

mod index;
mod link;
mod pool;
mod selector;
mod source;
mod usage;

pub use index::{KeyIndex, KeySide};
pub use link::{end_keys, start_keys, to_id, Keys, Link, LinkId};
pub use pool::CandidatePool;
pub use selector::{LinkSelector, Selection, Substitution, MIN_VIABLE};
pub use source::{Candidate, CandidateSource, Catalog, ContentVariant};
pub use usage::UsageTracker;
