//! Per-cycle key consumption.
//!
//! Each time a link is placed into play its keys are consumed. Once a key
//! has been consumed as often as the index says links expose it, the key is
//! exhausted until the next cycle reset.

use rustc_hash::{FxHashMap, FxHashSet};

use super::index::{KeyIndex, KeySide};
use super::link::LinkId;

/// Consumption counts and used ids for the current cycle.
#[derive(Clone, Debug, Default)]
pub struct UsageTracker {
    starts: FxHashMap<String, usize>,
    ends: FxHashMap<String, usize>,
    used: FxHashSet<LinkId>,
}

impl UsageTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume `starts` and `ends` once each.
    ///
    /// Keys the index does not know are ignored, and no count ever passes the
    /// index count.
    pub fn mark_used(&mut self, index: &KeyIndex, starts: &[String], ends: &[String]) {
        for start in starts {
            Self::consume(&mut self.starts, index.count(KeySide::Start, start), start);
        }
        for end in ends {
            Self::consume(&mut self.ends, index.count(KeySide::End, end), end);
        }
    }

    fn consume(counts: &mut FxHashMap<String, usize>, limit: usize, key: &str) {
        if limit == 0 {
            return;
        }
        let count = counts.entry(key.to_string()).or_insert(0);
        if *count < limit {
            *count += 1;
        }
    }

    /// Subset of `keys` on `side` that can still be consumed this cycle.
    #[must_use]
    pub fn filter_usable(&self, index: &KeyIndex, side: KeySide, keys: &[String]) -> Vec<String> {
        keys.iter()
            .filter(|key| self.is_usable(index, side, key))
            .cloned()
            .collect()
    }

    /// Whether `key` is indexed on `side` and not exhausted.
    #[must_use]
    pub fn is_usable(&self, index: &KeyIndex, side: KeySide, key: &str) -> bool {
        let limit = index.count(side, key);
        limit > 0 && self.consumed(side, key) < limit
    }

    /// Whether `key` would still be usable after `pending` (keys of the same
    /// side that are about to be consumed) were marked.
    #[must_use]
    pub fn is_usable_after(
        &self,
        index: &KeyIndex,
        side: KeySide,
        key: &str,
        pending: &[String],
    ) -> bool {
        let limit = index.count(side, key);
        let pending = pending.iter().filter(|k| k.as_str() == key).count();
        limit > 0 && self.consumed(side, key) + pending < limit
    }

    /// Times `key` was consumed on `side` this cycle.
    #[must_use]
    pub fn consumed(&self, side: KeySide, key: &str) -> usize {
        let counts = match side {
            KeySide::Start => &self.starts,
            KeySide::End => &self.ends,
        };
        counts.get(key).copied().unwrap_or(0)
    }

    /// Record that a link was placed into play this cycle.
    pub fn mark_link(&mut self, id: LinkId) {
        self.used.insert(id);
    }

    /// Whether a link was placed into play this cycle.
    #[must_use]
    pub fn is_link_used(&self, id: &str) -> bool {
        self.used.contains(id)
    }

    /// Start a new cycle.
    pub fn reset(&mut self) {
        self.starts.clear();
        self.ends.clear();
        self.used.clear();
    }
}
