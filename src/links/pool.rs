//! Candidate pool for one game.
//!
//! Built once when signups open, read-only afterwards. Links are stored in
//! source order so that random picks by position are reproducible for a
//! given seed; a hash map resolves ids to positions.

use rustc_hash::FxHashMap;

use super::link::{to_id, Link, LinkId};
use super::source::{Candidate, ContentVariant};
use crate::core::{ChainConfig, ChainError, ChainResult};

/// Filtered, keyed candidates.
///
/// ## Example
///
/// ```
/// use chain_links::core::ChainConfig;
/// use chain_links::links::{Candidate, CandidatePool};
///
/// let config = ChainConfig::default();
/// let pool = CandidatePool::build(
///     vec![Candidate::new("Cat"), Candidate::new("Porygon2")],
///     &config,
/// ).unwrap();
///
/// assert!(pool.contains("cat"));
/// assert!(!pool.contains("porygon2")); // no end key
/// ```
#[derive(Clone, Debug)]
pub struct CandidatePool {
    links: Vec<Link>,
    positions: FxHashMap<LinkId, usize>,
    variant: ContentVariant,
}

impl CandidatePool {
    /// Filter and key `candidates` per `config`.
    ///
    /// Every retained link has a start key, and an end key too when the pool
    /// is letter-based or reverse linking is on. Duplicate ids keep the first
    /// occurrence. An empty result is an error.
    pub fn build(candidates: Vec<Candidate>, config: &ChainConfig) -> ChainResult<Self> {
        let variant = config.variant;
        let needs_end = config.letter_based || config.reverse_links;
        let exclusions = variant.letter_based_exclusions();

        let mut links = Vec::new();
        let mut positions = FxHashMap::default();

        for candidate in candidates {
            if candidate.forme && variant == ContentVariant::Pokemon && !config.accepts_formes {
                continue;
            }
            let link = Link::new(candidate.name, config.link_length);
            if config.letter_based && exclusions.contains(&link.id.as_str()) {
                continue;
            }
            if link.starts.is_empty() || (needs_end && link.ends.is_empty()) {
                continue;
            }
            if positions.contains_key(&link.id) {
                continue;
            }
            positions.insert(link.id.clone(), links.len());
            links.push(link);
        }

        if links.is_empty() {
            return Err(ChainError::EmptyPool { variant });
        }

        Ok(Self { links, positions, variant })
    }

    /// Build from plain names.
    pub fn from_names<I, S>(names: I, config: &ChainConfig) -> ChainResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::build(names.into_iter().map(Candidate::new).collect(), config)
    }

    /// Get a link by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Link> {
        self.position(id).map(|i| &self.links[i])
    }

    /// Position of an id in source order.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Look up a raw guess, normalizing it first.
    #[must_use]
    pub fn lookup(&self, text: &str) -> Option<&Link> {
        self.get(&to_id(text))
    }

    /// Check if an id is in the pool.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    /// Link at `position`. Panics if out of range.
    #[must_use]
    pub fn at(&self, position: usize) -> &Link {
        &self.links[position]
    }

    /// Iterate over links in source order.
    pub fn iter(&self) -> impl Iterator<Item = &Link> {
        self.links.iter()
    }

    /// Variant the pool was built for.
    #[must_use]
    pub fn variant(&self) -> ContentVariant {
        self.variant
    }

    /// Number of links.
    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Always false for a built pool.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
