//! Candidate sources.
//!
//! The host owns the data tables (Pokémon, moves, items, abilities). The
//! engine only needs a flat list of named candidates for the configured
//! variant, supplied once when signups open. `CandidateSource` is that seam;
//! `Catalog` is an in-memory implementation hosts can fill from any loader.

use std::str::FromStr;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::ChainError;

/// Which family of names forms the pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentVariant {
    /// Pokémon species (the default, no variant option set).
    #[default]
    Pokemon,
    /// Moves.
    Moves,
    /// Items.
    Items,
    /// Abilities.
    Abilities,
}

impl ContentVariant {
    /// Noun used in announcements ("a random move").
    #[must_use]
    pub const fn links_type(self) -> &'static str {
        match self {
            ContentVariant::Pokemon => "Pokemon",
            ContentVariant::Moves => "move",
            ContentVariant::Items => "item",
            ContentVariant::Abilities => "ability",
        }
    }

    /// Ids never admitted to a letter-based pool of this variant.
    #[must_use]
    pub const fn letter_based_exclusions(self) -> &'static [&'static str] {
        match self {
            // Its typed variants all share one name.
            ContentVariant::Moves => &["hiddenpower"],
            _ => &[],
        }
    }
}

impl std::fmt::Display for ContentVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.links_type())
    }
}

impl FromStr for ContentVariant {
    type Err = ChainError;

    /// Parse the host's variant option. An empty option means Pokémon.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match crate::links::to_id(s).as_str() {
            "" | "pokemon" => Ok(ContentVariant::Pokemon),
            "moves" => Ok(ContentVariant::Moves),
            "items" => Ok(ContentVariant::Items),
            "abilities" => Ok(ContentVariant::Abilities),
            _ => Err(ChainError::UnknownVariant(s.to_string())),
        }
    }
}

/// A named candidate as the host's data layer provides it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Display name.
    pub name: String,
    /// Alternate forme of a base species.
    pub forme: bool,
}

impl Candidate {
    /// A regular candidate.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            forme: false,
        }
    }

    /// An alternate forme.
    pub fn forme(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            forme: true,
        }
    }
}

/// Supplies candidates for a variant.
pub trait CandidateSource {
    /// All candidates of `variant`, unfiltered. `None` if the source has no
    /// table for it.
    fn candidates(&self, variant: ContentVariant) -> Option<Vec<Candidate>>;
}

/// In-memory candidate tables keyed by variant.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    tables: FxHashMap<ContentVariant, Vec<Candidate>>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the table for `variant`.
    #[must_use]
    pub fn with_table(mut self, variant: ContentVariant, candidates: Vec<Candidate>) -> Self {
        self.tables.insert(variant, candidates);
        self
    }

    /// Replace the table for `variant` with plain names.
    #[must_use]
    pub fn with_names<I, S>(self, variant: ContentVariant, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let candidates = names.into_iter().map(Candidate::new).collect();
        self.with_table(variant, candidates)
    }
}

impl CandidateSource for Catalog {
    fn candidates(&self, variant: ContentVariant) -> Option<Vec<Candidate>> {
        self.tables.get(&variant).cloned()
    }
}
