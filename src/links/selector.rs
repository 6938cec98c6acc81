//! Next-link selection.
//!
//! ## Algorithm
//!
//! 1. Take the forced id (a player's accepted answer) if it is in the pool,
//!    otherwise a uniformly random pool link.
//! 2. Work out the targets the candidate would leave behind: its end keys
//!    that are still usable as starts, and with reverse linking its start
//!    keys that are still usable as ends. This accounts for the candidate's
//!    own keys being consumed.
//! 3. Retry while the candidate is the current link, leaves no target, or
//!    was already rejected in this call. The first retry resets the cycle.
//!    A rejected forced id produces a [`Substitution`] notice.
//! 4. Commit: consume the winner's keys, mark it used, and publish the keys
//!    [`UsageTracker::filter_usable`] still reports as usable as its targets.
//!
//! Rejected candidates never touch the usage counts, so a call performs at
//! most one cycle reset.
//!
//! ## Termination
//!
//! Construction requires at least three *viable* links, ones that leave a
//! target on a fresh cycle. After the reset every viable link qualifies
//! except the current one and a rejected forced one, so once random retries
//! run out a uniform pick among the remaining viable links always succeeds.

use tracing::{debug, warn};

use super::index::{KeyIndex, KeySide};
use super::link::{to_id, Link, LinkId};
use super::pool::CandidatePool;
use super::usage::UsageTracker;
use crate::core::{ChainError, ChainResult, GameRng};

/// Random retries after a cycle reset before picking among viable links.
const RANDOM_ATTEMPTS: usize = 64;

/// Viable links needed so a substitution never lands on the current or the
/// rejected link.
pub const MIN_VIABLE: usize = 3;

/// A forced link that had to be replaced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Substitution {
    /// The rejected link.
    pub rejected: LinkId,
    /// Its display name.
    pub rejected_name: String,
    /// Keys that could not be continued from it.
    pub exhausted_keys: Vec<String>,
}

/// Outcome of [`LinkSelector::select_next`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    /// The new current link.
    pub link: Link,
    /// Present when a forced link was replaced by a random one.
    pub substitution: Option<Substitution>,
    /// Cycle resets performed during the call (0 or 1).
    pub cycle_resets: usize,
}

#[derive(Debug, Default)]
struct Targets {
    starts: Vec<String>,
    ends: Vec<String>,
}

impl Targets {
    fn is_empty(&self) -> bool {
        self.starts.is_empty() && self.ends.is_empty()
    }
}

/// Pool, key index, usage tracker, and the current link with its targets.
#[derive(Clone, Debug)]
pub struct LinkSelector {
    pool: CandidatePool,
    index: KeyIndex,
    usage: UsageTracker,
    reverse_links: bool,
    viable: Vec<usize>,
    current: Option<usize>,
    target_starts: Vec<String>,
    target_ends: Vec<String>,
}

impl LinkSelector {
    /// Index `pool` and check that selection can always make progress.
    pub fn new(pool: CandidatePool, reverse_links: bool) -> ChainResult<Self> {
        let index = KeyIndex::build(&pool, reverse_links);
        let mut selector = Self {
            pool,
            index,
            usage: UsageTracker::new(),
            reverse_links,
            viable: Vec::new(),
            current: None,
            target_starts: Vec::new(),
            target_ends: Vec::new(),
        };

        selector.viable = (0..selector.pool.len())
            .filter(|&i| !selector.evaluate(i).is_empty())
            .collect();
        if selector.viable.len() < MIN_VIABLE {
            return Err(ChainError::DeadEndPool {
                viable: selector.viable.len(),
            });
        }

        debug!(
            links = selector.pool.len(),
            viable = selector.viable.len(),
            start_keys = selector.index.key_count(KeySide::Start),
            "link selector ready"
        );
        Ok(selector)
    }

    /// Pick and commit the next current link.
    ///
    /// `forced` is a raw id or name; unknown values are treated as absent.
    pub fn select_next(&mut self, rng: &mut GameRng, forced: Option<&str>) -> Selection {
        let mut forced = forced.and_then(|text| self.pool.position(&to_id(text)));
        let mut candidate = match forced {
            Some(position) => position,
            None => self.random(rng),
        };
        let mut targets = self.evaluate(candidate);

        let mut skip = None;
        let mut substitution = None;
        let mut cycle_resets = 0;
        let mut attempts = 0;

        while Some(candidate) == self.current || targets.is_empty() || Some(candidate) == skip {
            if forced.take().is_some() {
                let notice = self.substitution_for(candidate);
                warn!(
                    rejected = %notice.rejected,
                    keys = ?notice.exhausted_keys,
                    "no continuation left, substituting a random link"
                );
                substitution = Some(notice);
                skip = Some(candidate);
            }
            if cycle_resets == 0 {
                self.reset_cycle();
                cycle_resets = 1;
            }

            attempts += 1;
            candidate = if attempts <= RANDOM_ATTEMPTS {
                self.random(rng)
            } else {
                self.random_viable(rng, skip)
            };
            targets = self.evaluate(candidate);
        }

        let link = self.pool.at(candidate);
        self.usage.mark_used(&self.index, &link.starts, &link.ends);
        self.usage.mark_link(link.id.clone());
        self.current = Some(candidate);
        self.target_starts = self
            .usage
            .filter_usable(&self.index, KeySide::Start, &link.ends);
        self.target_ends = if self.reverse_links {
            self.usage.filter_usable(&self.index, KeySide::End, &link.starts)
        } else {
            Vec::new()
        };

        debug!(
            link = %link.id,
            starts = ?self.target_starts,
            ends = ?self.target_ends,
            attempts,
            "link selected"
        );

        Selection {
            link: link.clone(),
            substitution,
            cycle_resets,
        }
    }

    /// Start a new cycle: every key is usable again and no link counts as used.
    pub fn reset_cycle(&mut self) {
        debug!("link cycle reset");
        self.usage.reset();
    }

    /// Whether `link` continues the chain from the current targets.
    #[must_use]
    pub fn continues(&self, link: &Link) -> bool {
        if link.starts.iter().any(|s| self.target_starts.contains(s)) {
            return true;
        }
        self.reverse_links && link.ends.iter().any(|e| self.target_ends.contains(e))
    }

    /// Whether any target is active.
    #[must_use]
    pub fn has_targets(&self) -> bool {
        !self.target_starts.is_empty() || !self.target_ends.is_empty()
    }

    /// Close the current round's targets so no further guess can match.
    pub fn clear_targets(&mut self) {
        self.target_starts.clear();
        self.target_ends.clear();
    }

    /// Start keys a guess may begin with.
    #[must_use]
    pub fn target_starts(&self) -> &[String] {
        &self.target_starts
    }

    /// End keys a guess may finish with (reverse linking only).
    #[must_use]
    pub fn target_ends(&self) -> &[String] {
        &self.target_ends
    }

    /// The current link.
    #[must_use]
    pub fn current(&self) -> Option<&Link> {
        self.current.map(|i| self.pool.at(i))
    }

    /// Whether a link was already played this cycle.
    #[must_use]
    pub fn is_used(&self, id: &str) -> bool {
        self.usage.is_link_used(id)
    }

    /// The candidate pool.
    #[must_use]
    pub fn pool(&self) -> &CandidatePool {
        &self.pool
    }

    /// The key index.
    #[must_use]
    pub fn index(&self) -> &KeyIndex {
        &self.index
    }

    /// The usage tracker.
    #[must_use]
    pub fn usage(&self) -> &UsageTracker {
        &self.usage
    }

    /// Number of links that can be continued on a fresh cycle.
    #[must_use]
    pub fn viable_count(&self) -> usize {
        self.viable.len()
    }

    fn random(&self, rng: &mut GameRng) -> usize {
        rng.gen_range_usize(0..self.pool.len())
    }

    /// Uniform pick among viable links other than the current one and `skip`.
    fn random_viable(&self, rng: &mut GameRng, skip: Option<usize>) -> usize {
        let open: Vec<usize> = self
            .viable
            .iter()
            .copied()
            .filter(|&i| Some(i) != self.current && Some(i) != skip)
            .collect();
        // Never empty: construction guarantees MIN_VIABLE viable links.
        rng.choose(&open).copied().unwrap_or(self.viable[0])
    }

    /// Targets `position` would leave once its own keys are consumed.
    fn evaluate(&self, position: usize) -> Targets {
        let link = self.pool.at(position);
        let starts = link
            .ends
            .iter()
            .filter(|key| {
                self.usage
                    .is_usable_after(&self.index, KeySide::Start, key, &link.starts)
            })
            .cloned()
            .collect();
        let ends = if self.reverse_links {
            link.starts
                .iter()
                .filter(|key| {
                    self.usage
                        .is_usable_after(&self.index, KeySide::End, key, &link.ends)
                })
                .cloned()
                .collect()
        } else {
            Vec::new()
        };
        Targets { starts, ends }
    }

    fn substitution_for(&self, position: usize) -> Substitution {
        let link = self.pool.at(position);
        let mut exhausted: Vec<String> = link
            .ends
            .iter()
            .filter(|key| {
                !self
                    .usage
                    .is_usable_after(&self.index, KeySide::Start, key, &link.starts)
            })
            .cloned()
            .collect();
        if self.reverse_links {
            exhausted.extend(
                link.starts
                    .iter()
                    .filter(|key| {
                        !self
                            .usage
                            .is_usable_after(&self.index, KeySide::End, key, &link.ends)
                    })
                    .cloned(),
            );
        }
        Substitution {
            rejected: link.id.clone(),
            rejected_name: link.name.clone(),
            exhausted_keys: exhausted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ChainConfig;

    fn selector(names: &[&str], reverse: bool) -> LinkSelector {
        let config = ChainConfig::default().with_reverse_links(reverse);
        let pool = CandidatePool::from_names(names.iter().copied(), &config).unwrap();
        LinkSelector::new(pool, reverse).unwrap()
    }

    #[test]
    fn test_forced_selection_sets_targets() {
        let mut sel = selector(&["cat", "top", "pen", "tap"], false);
        let mut rng = GameRng::new(1);

        let selection = sel.select_next(&mut rng, Some("Cat"));
        assert_eq!(selection.link.id.as_str(), "cat");
        assert!(selection.substitution.is_none());
        assert_eq!(selection.cycle_resets, 0);
        assert_eq!(sel.target_starts(), ["t"]);
        assert!(sel.target_ends().is_empty());
        assert!(sel.is_used("cat"));
    }

    #[test]
    fn test_continues() {
        let mut sel = selector(&["cat", "top", "pen", "tap"], false);
        let mut rng = GameRng::new(1);
        sel.select_next(&mut rng, Some("cat"));

        let pool = sel.pool().clone();
        assert!(sel.continues(pool.get("top").unwrap()));
        assert!(!sel.continues(pool.get("pen").unwrap()));

        sel.clear_targets();
        assert!(!sel.has_targets());
        assert!(!sel.continues(pool.get("top").unwrap()));
    }

    #[test]
    fn test_reverse_targets() {
        // "pit" ends with "t", so "top" can be answered by a word ending in "t".
        let mut sel = selector(&["cat", "top", "pit", "tip"], true);
        let mut rng = GameRng::new(3);

        sel.select_next(&mut rng, Some("top"));
        assert_eq!(sel.target_starts(), ["p"]);
        assert_eq!(sel.target_ends(), ["t"]);

        let pool = sel.pool().clone();
        assert!(sel.continues(pool.get("cat").unwrap()));
        assert!(sel.continues(pool.get("pit").unwrap()));
    }

    #[test]
    fn test_never_repeats_current() {
        let mut sel = selector(&["cat", "top", "pot", "tap"], false);
        let mut rng = GameRng::new(11);

        let mut previous = sel.select_next(&mut rng, None).link.id;
        for _ in 0..200 {
            let next = sel.select_next(&mut rng, None).link.id;
            assert_ne!(next, previous);
            previous = next;
        }
    }

    #[test]
    fn test_substitution_for_dead_end() {
        // "pen" ends in "n", which nothing starts with.
        let mut sel = selector(&["cat", "top", "pen", "tap"], false);
        let mut rng = GameRng::new(5);
        sel.select_next(&mut rng, Some("top"));

        let selection = sel.select_next(&mut rng, Some("pen"));
        let notice = selection.substitution.expect("pen cannot be continued");
        assert_eq!(notice.rejected.as_str(), "pen");
        assert_eq!(notice.rejected_name, "pen");
        assert_eq!(notice.exhausted_keys, ["n"]);
        assert_eq!(selection.cycle_resets, 1);
        assert_ne!(selection.link.id.as_str(), "pen");
        assert_ne!(selection.link.id.as_str(), "top");
        assert!(sel.has_targets());
    }

    #[test]
    fn test_unknown_forced_is_random() {
        let mut sel = selector(&["cat", "top", "pot"], false);
        let mut rng = GameRng::new(2);

        let selection = sel.select_next(&mut rng, Some("missingno"));
        assert!(selection.substitution.is_none());
        assert!(sel.pool().contains(selection.link.id.as_str()));
    }

    #[test]
    fn test_dead_end_pool_rejected() {
        let config = ChainConfig::default();
        let pool = CandidatePool::from_names(["cat", "pen"], &config).unwrap();
        assert_eq!(
            LinkSelector::new(pool, false).unwrap_err(),
            ChainError::DeadEndPool { viable: 0 }
        );
    }

    #[test]
    fn test_two_viable_links_rejected() {
        // "bz" never leaves a target, so only "ab" and "ba" are viable.
        let config = ChainConfig::default();
        let pool = CandidatePool::from_names(["ab", "ba", "bz"], &config).unwrap();
        assert_eq!(
            LinkSelector::new(pool, false).unwrap_err(),
            ChainError::DeadEndPool { viable: 2 }
        );
    }

    #[test]
    fn test_substitution_skips_rejected_link() {
        // Viable: "ab", "ba", "ca". Once "ab" is played, "a" is exhausted.
        let mut sel = selector(&["ab", "ba", "ca", "bz"], false);
        let mut rng = GameRng::new(4);
        sel.select_next(&mut rng, Some("ab"));

        let selection = sel.select_next(&mut rng, Some("ba"));
        let notice = selection.substitution.unwrap();
        assert_eq!(notice.rejected.as_str(), "ba");
        assert_eq!(notice.exhausted_keys, ["a"]);
        assert_eq!(selection.cycle_resets, 1);
        assert_eq!(selection.link.id.as_str(), "ca");
    }

    #[test]
    fn test_forcing_current_link_substitutes() {
        let mut sel = selector(&["ab", "ba", "ca", "bz"], false);
        let mut rng = GameRng::new(9);
        sel.select_next(&mut rng, Some("ab"));

        let selection = sel.select_next(&mut rng, Some("ab"));
        let notice = selection.substitution.unwrap();
        assert_eq!(notice.rejected.as_str(), "ab");
        assert_ne!(selection.link.id, notice.rejected);
    }

    #[test]
    fn test_random_viable_avoids_current_and_skip() {
        let mut sel = selector(&["ab", "ba", "ca", "bz"], false);
        let mut rng = GameRng::new(6);
        sel.select_next(&mut rng, Some("ab"));
        let skip = sel.pool().position("ba");
        let only = sel.pool().position("ca").unwrap();

        for _ in 0..50 {
            assert_eq!(sel.random_viable(&mut rng, skip), only);
        }
    }

    #[test]
    fn test_targets_are_usable_keys_after_commit() {
        let mut sel = selector(&["cat", "top", "pot", "tap", "pan", "nap"], true);
        let mut rng = GameRng::new(12);

        for _ in 0..30 {
            let link = sel.select_next(&mut rng, None).link;
            let starts = sel.usage().filter_usable(sel.index(), KeySide::Start, &link.ends);
            let ends = sel.usage().filter_usable(sel.index(), KeySide::End, &link.starts);
            assert_eq!(sel.target_starts(), starts.as_slice());
            assert_eq!(sel.target_ends(), ends.as_slice());
        }
    }

    #[test]
    fn test_single_use_keys_force_resets() {
        // Start keys "b" and "c" are exposed once, so cycles are short.
        let mut sel = selector(&["ab", "ba", "ac", "ca"], false);
        let mut rng = GameRng::new(8);

        for _ in 0..20 {
            let selection = sel.select_next(&mut rng, None);
            assert!(sel.has_targets());
            assert!(selection.cycle_resets <= 1);
        }
    }
}
