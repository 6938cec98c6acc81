//! Elimination mode: shuffled turns, chained answers, eliminations on timeout.

use std::time::Duration;

use chain_links::core::{ChainConfig, ChainError, PlayerId};
use chain_links::links::{Catalog, ContentVariant};
use chain_links::rounds::{ChainGame, GameResult, Payout, Phase, RecordingHost};

fn catalog() -> Catalog {
    Catalog::new().with_names(ContentVariant::Pokemon, ["Tot", "Tat", "Tit", "Tut"])
}

fn fire_pending(game: &mut ChainGame, host: &mut RecordingHost) {
    let timer = game.pending_timer().unwrap();
    assert!(host.fire(timer));
    assert!(game.on_timer(host, timer));
}

/// Signed up and started, sitting at the first sweep announcement.
fn started(max_sweeps: u32, players: &[&str]) -> (ChainGame, RecordingHost) {
    let mut host = RecordingHost::new();
    let mut game = ChainGame::new(ChainConfig::elimination(max_sweeps).with_seed(3)).unwrap();
    game.on_signups(&mut host, &catalog()).unwrap();
    for name in players {
        game.join(name).unwrap();
    }
    game.on_start(&mut host).unwrap();
    (game, host)
}

fn turn_player(game: &ChainGame) -> PlayerId {
    game.phase().turn_player().unwrap()
}

fn turn_name(game: &ChainGame) -> String {
    game.roster().name(turn_player(game)).to_string()
}

fn valid_answer(game: &ChainGame) -> String {
    let selector = game.selector().unwrap();
    selector
        .pool()
        .iter()
        .find(|link| !selector.is_used(link.id.as_str()) && selector.continues(link))
        .map(|link| link.name.clone())
        .unwrap()
}

#[test]
fn test_start_announces_sweep() {
    let (game, host) = started(5, &["ash", "misty"]);

    assert_eq!(game.phase(), Phase::SweepIntro { sweep: 1 });
    assert_eq!(game.sweep(), 1);
    let intro = host.last_message().unwrap();
    assert!(intro.starts_with("**Round 1**! Remaining players: "));
    assert!(intro.contains("ash") && intro.contains("misty"));
    assert_eq!(host.next_timer().unwrap().1, game.config().intermission);
}

#[test]
fn test_first_turn_after_intermission() {
    let (mut game, mut host) = started(5, &["ash", "misty"]);
    fire_pending(&mut game, &mut host);

    let link = game.current_link().unwrap().name.clone();
    assert_eq!(
        host.last_message().unwrap(),
        format!("{} you are up! The Smeargle spelled out **{link}**.", turn_name(&game))
    );
    assert_eq!(host.next_timer().unwrap().1, Duration::from_secs(7));
}

#[test]
fn test_join_closed_after_start() {
    let (mut game, _) = started(5, &["ash", "misty"]);
    assert_eq!(game.join("brock"), Err(ChainError::AlreadyStarted));
}

#[test]
fn test_only_turn_player_may_answer() {
    let (mut game, mut host) = started(5, &["ash", "misty"]);
    fire_pending(&mut game, &mut host);

    let up = turn_name(&game);
    let other = if up == "ash" { "misty" } else { "ash" };
    let answer = valid_answer(&game);

    assert!(!game.guess(&mut host, other, &answer));
    assert!(!game.guess(&mut host, "brock", &answer));
    assert_eq!(game.phase().turn_player(), game.roster().find(&up));
}

#[test]
fn test_unknown_answer_gets_feedback() {
    let (mut game, mut host) = started(5, &["ash", "misty"]);
    fire_pending(&mut game, &mut host);
    let up = turn_name(&game);

    assert!(!game.guess(&mut host, &up, "Missing No."));
    assert_eq!(host.last_message(), Some("'missingno' is not a valid Pokemon."));
    assert_eq!(game.phase().turn_player(), game.roster().find(&up));
}

#[test]
fn test_answer_becomes_next_link() {
    let (mut game, mut host) = started(5, &["ash", "misty", "brock"]);
    fire_pending(&mut game, &mut host);

    let first = turn_player(&game);
    let answer = valid_answer(&game);
    assert!(game.guess(&mut host, &turn_name(&game), &answer));

    assert_eq!(game.current_link().unwrap().name, answer);
    let next = turn_player(&game);
    assert_ne!(next, first);
    assert_eq!(
        host.last_message().unwrap(),
        format!(
            "{} you are up! The Smeargle spelled out **{answer}**.",
            game.roster().name(next)
        )
    );
}

#[test]
fn test_timeout_eliminates_and_passes_link_on() {
    let (mut game, mut host) = started(5, &["ash", "misty", "brock"]);
    fire_pending(&mut game, &mut host);

    let missed = turn_player(&game);
    let missed_name = turn_name(&game);
    let link = game.current_link().unwrap().clone();
    let targets = game.selector().unwrap().target_starts().to_vec();
    host.take_messages();

    fire_pending(&mut game, &mut host);

    assert!(game.roster().is_eliminated(missed));
    assert_eq!(game.roster().remaining_count(), 2);
    assert_eq!(game.current_link(), Some(&link));
    assert_eq!(game.selector().unwrap().target_starts(), targets.as_slice());

    let messages = host.take_messages();
    assert_eq!(messages[0], "Time is up!");
    assert_eq!(
        messages[1],
        format!("{missed_name} was eliminated! You did not guess a Pokemon link.")
    );
    assert_eq!(
        messages[2],
        format!("{} you are up! The Smeargle spelled out **{}**.", turn_name(&game), link.name)
    );

    // The eliminated player can no longer answer.
    let answer = valid_answer(&game);
    assert!(!game.guess(&mut host, &missed_name, &answer));
}

#[test]
fn test_last_survivor_wins() {
    let (mut game, mut host) = started(5, &["ash", "misty"]);
    fire_pending(&mut game, &mut host);

    let missed = turn_player(&game);
    fire_pending(&mut game, &mut host);

    let survivor = game.roster().remaining().next().unwrap().id;
    assert_ne!(survivor, missed);
    assert!(game.phase().is_ended());
    assert!(host.pending().is_empty());
    assert_eq!(
        host.last_message().unwrap(),
        format!("Congratulations to {} for winning the game!", game.roster().name(survivor))
    );

    let outcome = game.outcome().unwrap();
    assert_eq!(outcome.result, GameResult::Winner(survivor));
    assert_eq!(outcome.payouts, [Payout { player: survivor, amount: 500 }]);
}

#[test]
fn test_single_survivor_ends_without_more_turns() {
    let (mut game, mut host) = started(1, &["ash", "misty", "brock"]);
    fire_pending(&mut game, &mut host);

    fire_pending(&mut game, &mut host);
    assert_eq!(game.roster().remaining_count(), 2);
    fire_pending(&mut game, &mut host);

    let survivor = game.roster().remaining().next().unwrap().id;
    assert!(game.phase().is_ended());
    assert!(game.pending_timer().is_none());
    assert!(host.pending().is_empty());
    assert_eq!(game.outcome().unwrap().result, GameResult::Winner(survivor));
}

#[test]
fn test_sweep_cap_ends_with_all_survivors() {
    let (mut game, mut host) = started(1, &["ash", "misty"]);
    fire_pending(&mut game, &mut host);

    for _ in 0..2 {
        let answer = valid_answer(&game);
        assert!(game.guess(&mut host, &turn_name(&game), &answer));
    }

    assert!(game.phase().is_ended());
    assert_eq!(
        host.last_message(),
        Some("Congratulations to ash and misty for winning the game!")
    );
    let outcome = game.outcome().unwrap();
    assert_eq!(outcome.result, GameResult::Winners(vec![PlayerId(0), PlayerId(1)]));
    assert!(outcome.payouts.iter().all(|p| p.amount == 500));
}

#[test]
fn test_turn_time_decays_each_sweep() {
    let (mut game, mut host) = started(10, &["ash", "misty"]);
    let mut budgets = Vec::new();

    for sweep in 1..=10 {
        assert_eq!(game.phase(), Phase::SweepIntro { sweep });
        fire_pending(&mut game, &mut host);
        budgets.push(host.next_timer().unwrap().1);
        for _ in 0..2 {
            let answer = valid_answer(&game);
            assert!(game.guess(&mut host, &turn_name(&game), &answer));
        }
    }

    assert_eq!(budgets[0], Duration::from_millis(7000));
    assert_eq!(budgets[1], Duration::from_millis(6500));
    assert_eq!(budgets[2], Duration::from_millis(6000));
    assert_eq!(budgets[8], Duration::from_millis(3000));
    assert_eq!(budgets[9], Duration::from_millis(3000));
    assert!(game.phase().is_ended());
}

#[test]
fn test_exhausted_answer_is_substituted() {
    // Four links share the single key "t": the sweep's opening link and two
    // answers leave one use, which the third answer would consume.
    let (mut game, mut host) = started(5, &["ash", "misty", "brock"]);
    fire_pending(&mut game, &mut host);

    for _ in 0..2 {
        let answer = valid_answer(&game);
        assert!(game.guess(&mut host, &turn_name(&game), &answer));
    }

    let last = valid_answer(&game);
    host.take_messages();
    assert!(game.guess(&mut host, &turn_name(&game), &last));

    let messages = host.take_messages();
    assert_eq!(
        messages[0],
        format!(
            "There are no 'T' Pokemon links left after {last}! Substituting in a random Pokemon."
        )
    );
    // The sweep is over, so the next one opens.
    assert_eq!(game.phase(), Phase::SweepIntro { sweep: 2 });
}

#[test]
fn test_lone_player_game_ends_at_once() {
    let (game, host) = started(5, &["ash"]);
    assert!(game.phase().is_ended());
    assert_eq!(host.last_message(), Some("Congratulations to ash for winning the game!"));
}

#[test]
fn test_stale_turn_timer_ignored() {
    let (mut game, mut host) = started(5, &["ash", "misty", "brock"]);
    fire_pending(&mut game, &mut host);

    let expired = game.pending_timer().unwrap();
    let answer = valid_answer(&game);
    assert!(game.guess(&mut host, &turn_name(&game), &answer));

    // The old turn's timer fires late after the host failed to cancel it.
    assert!(!game.on_timer(&mut host, expired));
    assert_eq!(game.roster().remaining_count(), 3);
}
