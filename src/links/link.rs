//! Links and their keys.
//!
//! A link is a named candidate placed into the chain. Its identity is the
//! normalized id (lowercase ASCII letters and digits only), and its keys are
//! the first and last `link_length` characters of that id.
//!
//! ```
//! use chain_links::links::{to_id, Link};
//!
//! assert_eq!(to_id("Mr. Mime"), "mrmime");
//!
//! let link = Link::new("Porygon-Z", 1);
//! assert_eq!(link.starts.as_slice(), ["p"]);
//! assert_eq!(link.ends.as_slice(), ["z"]);
//! ```

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Key list of one link side. Almost always a single key.
pub type Keys = SmallVec<[String; 1]>;

/// Normalize a name or guess to an id.
#[must_use]
pub fn to_id(text: &str) -> String {
    text.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Normalized link identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LinkId(pub String);

impl LinkId {
    /// Normalize `name` into an id.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self(to_id(name))
    }

    /// The id text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for LinkId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LinkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key at the start of `id`, if any.
#[must_use]
pub fn start_keys(id: &str, length: usize) -> Keys {
    if length == 0 || id.len() < length {
        return Keys::new();
    }
    keep_if_lettered(&id[..length])
}

/// Key at the end of `id`, if any.
#[must_use]
pub fn end_keys(id: &str, length: usize) -> Keys {
    if length == 0 || id.len() < length {
        return Keys::new();
    }
    keep_if_lettered(&id[id.len() - length..])
}

/// A key that begins with a digit reads as a number and cannot link.
fn keep_if_lettered(key: &str) -> Keys {
    let mut keys = Keys::new();
    if key.chars().next().is_some_and(|c| !c.is_ascii_digit()) {
        keys.push(key.to_string());
    }
    keys
}

/// One chain candidate with precomputed keys. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Normalized id.
    pub id: LinkId,
    /// Display name.
    pub name: String,
    /// Keys a previous link's end must match.
    pub starts: Keys,
    /// Keys the next link's start must match.
    pub ends: Keys,
}

impl Link {
    /// Build a link from a display name.
    #[must_use]
    pub fn new(name: impl Into<String>, length: usize) -> Self {
        let name = name.into();
        let id = to_id(&name);
        Self {
            starts: start_keys(&id, length),
            ends: end_keys(&id, length),
            id: LinkId(id),
            name,
        }
    }

    /// Whether both sides have a key.
    #[must_use]
    pub fn is_letter_linked(&self) -> bool {
        !self.starts.is_empty() && !self.ends.is_empty()
    }
}
