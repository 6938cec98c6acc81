//! Free-join rounds.
//!
//! Every round is an independent draw: the cycle resets, a random link is
//! announced, and the first matching answer from anyone scores a point.
//! Answers are serialized by the host, and an accepted answer clears the
//! targets, so later answers in the same round are rejected.

use tracing::{debug, info};

use super::game::ChainGame;
use super::host::Host;
use super::phase::{Phase, Wakeup};
use crate::core::{PlayMode, PlayerId};
use crate::links::Link;
use crate::text::count_noun;

impl ChainGame {
    pub(crate) fn next_free_round<H: Host + ?Sized>(&mut self, host: &mut H) {
        let Some(selector) = self.selector.as_mut() else {
            return;
        };
        selector.reset_cycle();
        let selection = selector.select_next(&mut self.rng, None);

        host.say(&format!(
            "The {} spelled out **{}**.",
            self.config.mascot, selection.link.name
        ));
        self.phase = Phase::AwaitingGuess;
        self.arm(host, self.config.round_time, Wakeup::RoundExpired);
    }

    /// Score an accepted free-join answer. Returns false, changing nothing,
    /// if the guesser cannot be enrolled.
    pub(crate) fn accept_free_join<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        user: &str,
        player: Option<PlayerId>,
        answer: &Link,
    ) -> bool {
        let player = match player {
            Some(player) => player,
            None => match self.roster.enroll(user) {
                Ok(player) => player,
                Err(err) => {
                    debug!(user, %err, "cannot enroll guesser");
                    return false;
                }
            },
        };

        self.cancel_pending(host);
        if let Some(selector) = self.selector.as_mut() {
            selector.clear_targets();
        }

        let points = self.roster.add_points(player, 1);
        let name = self.roster.name(player).to_string();
        let target = match self.config.mode {
            PlayMode::FreeJoin { target_points } => target_points,
            PlayMode::Elimination { .. } => u32::MAX,
        };

        if points >= target {
            host.say(&format!(
                "**{name}** wins the game! A possible answer was __{}__.",
                answer.name
            ));
            info!(player = %player, points, "target reached");
            self.finish(host, Some(player));
            return true;
        }

        host.say(&format!(
            "**{name}** advances to **{}**! A possible answer was __{}__.",
            count_noun(points, "point"),
            answer.name
        ));
        self.phase = Phase::Scoring;
        self.arm(host, self.config.intermission, Wakeup::NextRound);
        true
    }
}
