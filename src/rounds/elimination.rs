//! Elimination sweeps.
//!
//! A sweep checks for the end of the game, shortens the turn budget, resets
//! the cycle and draws a fresh link, then gives every surviving player one
//! turn in shuffled order. A correct answer becomes the next player's link;
//! a missed turn eliminates the player and passes the same link on.

use tracing::info;

use super::game::ChainGame;
use super::host::Host;
use super::phase::{Phase, Wakeup};
use crate::core::{PlayMode, PlayerId};
use crate::links::Link;
use crate::text::join_list;

impl ChainGame {
    /// Start the next turn, or a new sweep when this one is used up.
    pub(crate) fn next_turn<H: Host + ?Sized>(&mut self, host: &mut H) {
        let Some(player) = self.turns.next_player(&self.roster) else {
            self.begin_sweep(host);
            return;
        };
        let Some(link) = self.current_link() else {
            return;
        };

        host.say(&format!(
            "{} you are up! The {} spelled out **{}**.",
            self.roster.name(player),
            self.config.mascot,
            link.name
        ));
        self.phase = Phase::AwaitingTurnGuess { player };
        self.arm(host, self.turns.round_time(), Wakeup::TurnExpired);
    }

    fn begin_sweep<H: Host + ?Sized>(&mut self, host: &mut H) {
        let max_sweeps = match self.config.mode {
            PlayMode::Elimination { max_sweeps } => max_sweeps,
            PlayMode::FreeJoin { .. } => u32::MAX,
        };
        if self.roster.remaining_count() < 2 || self.turns.sweep() >= max_sweeps {
            self.finish(host, None);
            return;
        }

        let players: Vec<PlayerId> = self.roster.remaining().map(|p| p.id).collect();
        let sweep = self.turns.begin_sweep(players, &mut self.rng);
        if sweep > 1 {
            self.turns
                .decay(self.config.round_time_step, self.config.round_time_floor);
        }

        let Some(selector) = self.selector.as_mut() else {
            return;
        };
        selector.reset_cycle();
        selector.select_next(&mut self.rng, None);

        let names: Vec<&str> = self.roster.remaining().map(|p| p.name.as_str()).collect();
        host.say(&format!(
            "**Round {sweep}**! Remaining players: {}.",
            join_list(&names)
        ));
        info!(sweep, round_time = ?self.turns.round_time(), "sweep started");

        self.phase = Phase::SweepIntro { sweep };
        self.arm(host, self.config.intermission, Wakeup::NextRound);
    }

    /// The turn player answered: their answer becomes the next link.
    pub(crate) fn accept_turn<H: Host + ?Sized>(&mut self, host: &mut H, answer: &Link) {
        self.cancel_pending(host);

        let Some(selector) = self.selector.as_mut() else {
            return;
        };
        let selection = selector.select_next(&mut self.rng, Some(answer.id.as_str()));
        if let Some(notice) = &selection.substitution {
            self.announce_substitution(host, notice);
        }
        self.next_turn(host);
    }

    pub(crate) fn turn_expired<H: Host + ?Sized>(&mut self, host: &mut H) {
        host.say("Time is up!");

        if let Some(player) = self.phase.turn_player() {
            self.roster.eliminate(player);
            host.say(&format!(
                "{} was eliminated! You did not guess a {} link.",
                self.roster.name(player),
                self.links_type()
            ));
            info!(player = %player, remaining = self.roster.remaining_count(), "player eliminated");
        }

        if self.roster.remaining_count() < 2 {
            self.finish(host, None);
        } else {
            self.next_turn(host);
        }
    }
}
