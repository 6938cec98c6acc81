//! Key index: how many distinct pool links expose each key.

use rustc_hash::{FxHashMap, FxHashSet};

use super::pool::CandidatePool;

/// Which side of a link a key sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeySide {
    /// Prefix key.
    Start,
    /// Suffix key.
    End,
}

/// Start-key and end-key counts over a pool. Read-only once built.
///
/// The end side is only indexed when reverse linking is enabled; without it
/// every end-key lookup reports zero.
#[derive(Clone, Debug, Default)]
pub struct KeyIndex {
    starts: FxHashMap<String, usize>,
    ends: FxHashMap<String, usize>,
}

impl KeyIndex {
    /// Index `pool`.
    #[must_use]
    pub fn build(pool: &CandidatePool, reverse_links: bool) -> Self {
        let mut start_ids: FxHashMap<&str, FxHashSet<&str>> = FxHashMap::default();
        let mut end_ids: FxHashMap<&str, FxHashSet<&str>> = FxHashMap::default();

        for link in pool.iter() {
            for start in &link.starts {
                start_ids.entry(start.as_str()).or_default().insert(link.id.as_str());
            }
            if reverse_links {
                for end in &link.ends {
                    end_ids.entry(end.as_str()).or_default().insert(link.id.as_str());
                }
            }
        }

        let count = |ids: FxHashMap<&str, FxHashSet<&str>>| -> FxHashMap<String, usize> {
            ids.into_iter()
                .map(|(key, ids)| (key.to_string(), ids.len()))
                .collect()
        };

        Self {
            starts: count(start_ids),
            ends: count(end_ids),
        }
    }

    /// Number of distinct links exposing `key` on `side`.
    #[must_use]
    pub fn count(&self, side: KeySide, key: &str) -> usize {
        self.side(side).get(key).copied().unwrap_or(0)
    }

    /// Number of distinct keys indexed on `side`.
    #[must_use]
    pub fn key_count(&self, side: KeySide) -> usize {
        self.side(side).len()
    }

    fn side(&self, side: KeySide) -> &FxHashMap<String, usize> {
        match side {
            KeySide::Start => &self.starts,
            KeySide::End => &self.ends,
        }
    }
}
