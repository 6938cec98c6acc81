//! One chain game: lifecycle hooks, guess entry point, timer dispatch.
//!
//! ## Lifecycle
//!
//! - [`ChainGame::on_signups`] builds the pool from the host's candidate
//!   source. Free-join games also arm an auto-start timer.
//! - [`ChainGame::join`] enrolls players (free-join players may also enroll
//!   lazily with their first correct answer).
//! - [`ChainGame::on_start`] starts the first round or sweep.
//! - [`ChainGame::guess`] and [`ChainGame::on_timer`] drive every later
//!   transition. Mode-specific transitions live in `free_join` and
//!   `elimination`.
//! - [`ChainGame::on_end`] finishes early; games also end themselves.
//!
//! All transitions run on the host's single message thread. At most one
//! timer is pending at a time, and it is always cancelled before a
//! transition that supersedes it.

use tracing::{debug, info, warn};

use super::host::{Host, TimerId};
use super::outcome::{GameOutcome, GameResult, Payout};
use super::phase::{Phase, Wakeup};
use super::turns::TurnOrder;
use crate::core::{ChainConfig, ChainError, ChainResult, GameRng, PlayerId, Roster};
use crate::links::{to_id, CandidatePool, CandidateSource, Link, LinkSelector, Substitution};
use crate::text::join_list;

#[derive(Clone, Copy, Debug)]
pub(crate) struct Pending {
    pub(crate) timer: TimerId,
    pub(crate) wakeup: Wakeup,
}

/// A single chain game in one room.
///
/// ## Example
///
/// ```
/// use chain_links::core::ChainConfig;
/// use chain_links::links::{Catalog, ContentVariant};
/// use chain_links::rounds::{ChainGame, Phase, RecordingHost};
///
/// let catalog = Catalog::new().with_names(ContentVariant::Pokemon, ["Cat", "Top", "Pot", "Tap"]);
/// let mut host = RecordingHost::new();
///
/// let mut game = ChainGame::new(ChainConfig::free_join(3)).unwrap();
/// game.on_signups(&mut host, &catalog).unwrap();
/// game.on_start(&mut host).unwrap();
///
/// assert_eq!(game.phase(), Phase::AwaitingGuess);
/// assert!(host.last_message().unwrap().contains("spelled out"));
/// ```
#[derive(Clone, Debug)]
pub struct ChainGame {
    pub(crate) config: ChainConfig,
    pub(crate) rng: GameRng,
    pub(crate) roster: Roster,
    pub(crate) selector: Option<LinkSelector>,
    pub(crate) turns: TurnOrder,
    pub(crate) phase: Phase,
    pub(crate) pending: Option<Pending>,
    pub(crate) outcome: Option<GameOutcome>,
}

impl ChainGame {
    /// Create a game after validating `config`.
    pub fn new(config: ChainConfig) -> ChainResult<Self> {
        config.validate()?;
        Ok(Self {
            rng: GameRng::new(config.seed),
            roster: Roster::new(config.max_players),
            selector: None,
            turns: TurnOrder::new(config.round_time),
            phase: Phase::Idle,
            pending: None,
            outcome: None,
            config,
        })
    }

    // === Lifecycle ===

    /// Build the pool and open signups.
    pub fn on_signups<H, S>(&mut self, host: &mut H, source: &S) -> ChainResult<()>
    where
        H: Host + ?Sized,
        S: CandidateSource + ?Sized,
    {
        if self.phase != Phase::Idle {
            return Err(ChainError::AlreadyStarted);
        }

        let variant = self.config.variant;
        let candidates = source
            .candidates(variant)
            .ok_or_else(|| ChainError::UnknownVariant(variant.to_string()))?;
        let pool = CandidatePool::build(candidates, &self.config)?;
        self.selector = Some(LinkSelector::new(pool, self.config.reverse_links)?);
        self.phase = Phase::Signups;

        info!(%variant, mode = ?self.config.mode, "chain game signups open");
        if self.config.mode.is_free_join() {
            self.arm(host, self.config.intermission, Wakeup::Start);
        }
        Ok(())
    }

    /// Enroll a player. Elimination games only take players before they start.
    pub fn join(&mut self, name: &str) -> ChainResult<PlayerId> {
        let open = match self.phase {
            Phase::Idle | Phase::Signups => true,
            Phase::Ended => false,
            _ => self.config.mode.is_free_join(),
        };
        if !open {
            return Err(ChainError::AlreadyStarted);
        }
        let player = self.roster.enroll(name)?;
        debug!(player = %player, name, "player joined");
        Ok(player)
    }

    /// Start play.
    pub fn on_start<H: Host + ?Sized>(&mut self, host: &mut H) -> ChainResult<()> {
        match self.phase {
            Phase::Idle => Err(ChainError::NotSignedUp),
            Phase::Signups => {
                self.begin(host);
                Ok(())
            }
            _ => Err(ChainError::AlreadyStarted),
        }
    }

    /// End the game now. Does nothing if it already ended.
    pub fn on_end<H: Host + ?Sized>(&mut self, host: &mut H) {
        if !self.phase.is_ended() {
            self.finish(host, None);
        }
    }

    // === Entry points ===

    /// Submit a guess. Returns true if it was accepted.
    ///
    /// Rejections change nothing: wrong phase, wrong player, unknown or
    /// already played link, or a link that does not continue the chain.
    pub fn guess<H: Host + ?Sized>(&mut self, host: &mut H, user: &str, text: &str) -> bool {
        let Some(selector) = self.selector.as_ref() else {
            return false;
        };
        let player = self.roster.find(user);
        let free_join = self.config.mode.is_free_join();

        if free_join {
            if self.phase != Phase::AwaitingGuess || !selector.has_targets() {
                return false;
            }
            if player.is_some_and(|p| self.roster.is_eliminated(p)) {
                return false;
            }
        } else if player.is_none() || self.phase.turn_player() != player {
            return false;
        }

        let id = to_id(text);
        if selector.is_used(&id) {
            return false;
        }
        let Some(link) = selector.pool().get(&id) else {
            if !free_join {
                host.say(&format!("'{id}' is not a valid {}.", self.links_type()));
            }
            return false;
        };
        if !selector.continues(link) {
            return false;
        }
        let link = link.clone();

        if free_join {
            self.accept_free_join(host, user, player, &link)
        } else {
            self.accept_turn(host, &link);
            true
        }
    }

    /// Handle a fired timer. Returns false for stale or unknown ids.
    pub fn on_timer<H: Host + ?Sized>(&mut self, host: &mut H, timer: TimerId) -> bool {
        let pending = match self.pending {
            Some(pending) if pending.timer == timer => pending,
            _ => {
                warn!(?timer, "ignoring stale timer");
                return false;
            }
        };
        self.pending = None;

        debug!(?timer, wakeup = ?pending.wakeup, "timer fired");
        match pending.wakeup {
            Wakeup::Start => self.begin(host),
            Wakeup::NextRound => self.next_round(host),
            Wakeup::RoundExpired => {
                host.say("Time is up!");
                self.next_round(host);
            }
            Wakeup::TurnExpired => self.turn_expired(host),
        }
        true
    }

    // === Accessors ===

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Configuration.
    #[must_use]
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Players.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Selector, once signups have built the pool.
    #[must_use]
    pub fn selector(&self) -> Option<&LinkSelector> {
        self.selector.as_ref()
    }

    /// The link currently in play.
    #[must_use]
    pub fn current_link(&self) -> Option<&Link> {
        self.selector.as_ref().and_then(LinkSelector::current)
    }

    /// Sweeps begun so far (elimination).
    #[must_use]
    pub fn sweep(&self) -> u32 {
        self.turns.sweep()
    }

    /// Current per-round or per-turn time budget.
    #[must_use]
    pub fn round_time(&self) -> std::time::Duration {
        if self.config.mode.is_free_join() {
            self.config.round_time
        } else {
            self.turns.round_time()
        }
    }

    /// Id of the pending timer, if any.
    #[must_use]
    pub fn pending_timer(&self) -> Option<TimerId> {
        self.pending.map(|p| p.timer)
    }

    /// Winners and rewards, once ended.
    #[must_use]
    pub fn outcome(&self) -> Option<&GameOutcome> {
        self.outcome.as_ref()
    }

    // === Internals ===

    pub(crate) fn links_type(&self) -> &'static str {
        self.config.variant.links_type()
    }

    fn begin<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.cancel_pending(host);
        info!(players = self.roster.len(), "chain game started");
        self.next_round(host);
    }

    pub(crate) fn next_round<H: Host + ?Sized>(&mut self, host: &mut H) {
        if self.config.mode.is_free_join() {
            self.next_free_round(host);
        } else {
            self.next_turn(host);
        }
    }

    /// Replace the pending timer.
    pub(crate) fn arm<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        delay: std::time::Duration,
        wakeup: Wakeup,
    ) {
        self.cancel_pending(host);
        let timer = host.schedule(delay);
        debug!(?timer, ?delay, ?wakeup, "timer armed");
        self.pending = Some(Pending { timer, wakeup });
    }

    pub(crate) fn cancel_pending<H: Host + ?Sized>(&mut self, host: &mut H) {
        if let Some(pending) = self.pending.take() {
            host.cancel(pending.timer);
        }
    }

    pub(crate) fn announce_substitution<H: Host + ?Sized>(
        &self,
        host: &mut H,
        notice: &Substitution,
    ) {
        let kind = self.links_type();
        let text = if notice.exhausted_keys.is_empty() {
            format!(
                "There are no links with {}! Substituting in a random {kind}.",
                notice.rejected_name
            )
        } else {
            let keys: Vec<String> =
                notice.exhausted_keys.iter().map(|k| k.to_uppercase()).collect();
            format!(
                "There are no '{}' {kind} links left after {}! Substituting in a random {kind}.",
                join_list(&keys),
                notice.rejected_name
            )
        };
        host.say(&text);
    }

    /// Finish the game. `winner` is the free-join player who reached the target.
    pub(crate) fn finish<H: Host + ?Sized>(&mut self, host: &mut H, winner: Option<PlayerId>) {
        self.cancel_pending(host);
        if let Some(selector) = self.selector.as_mut() {
            selector.clear_targets();
        }

        let outcome = if self.config.mode.is_free_join() {
            let payouts = self
                .roster
                .iter()
                .filter(|p| p.points > 0)
                .map(|p| Payout {
                    player: p.id,
                    amount: p.points * self.config.points_reward,
                })
                .collect();
            GameOutcome {
                result: winner.map_or(GameResult::NoWinner, GameResult::Winner),
                payouts,
            }
        } else {
            let survivors: Vec<PlayerId> = self.roster.remaining().map(|p| p.id).collect();
            let payouts = survivors
                .iter()
                .map(|&player| Payout {
                    player,
                    amount: self.config.winner_reward,
                })
                .collect();
            let names: Vec<&str> = survivors.iter().map(|&p| self.roster.name(p)).collect();
            if names.is_empty() {
                host.say("No winners this game!");
            } else {
                host.say(&format!("Congratulations to {} for winning the game!", join_list(&names)));
            }
            GameOutcome {
                result: GameResult::from_winners(survivors),
                payouts,
            }
        };

        info!(result = ?outcome.result, "chain game ended");
        self.outcome = Some(outcome);
        self.phase = Phase::Ended;
    }
}
