//! Match state machine integration tests.

use nine_game::cards::Card;
use nine_game::core::Side;
use nine_game::records::{HighScoreTracker, MemoryStore};
use nine_game::rules::Winner;
use nine_game::strategy::{ScriptedOpponent, ThresholdOpponent};
use nine_game::{NineError, NineMatch, Phase, TOTAL_TURNS};

fn values(cards: impl Iterator<Item = Card>) -> Vec<u8> {
    cards.map(Card::value).collect()
}

// =============================================================================
// Single Turn Scenarios
// =============================================================================

/// Test a 9 against a 1 awarding ten points to the player.
#[test]
fn test_nine_beats_one() {
    let mut game = NineMatch::new();
    let mut opponent = ScriptedOpponent::new([1]);

    let event = game.play_turn(9, &mut opponent).unwrap();

    assert_eq!(event.turn_number, 1);
    assert_eq!(event.outcome.winner, Winner::Player);
    assert_eq!(event.outcome.points_awarded, 10);
    assert_eq!(game.state().player_score(), 10);
    assert_eq!(game.state().opponent_score(), 0);
}

/// Test that a tie scores nothing but still spends both cards.
#[test]
fn test_tie_scores_nothing_but_uses_both_cards() {
    let mut game = NineMatch::new();
    let mut opponent = ScriptedOpponent::new([5]);

    let event = game.play_turn(5, &mut opponent).unwrap();

    assert_eq!(event.outcome.winner, Winner::Tie);
    assert_eq!(event.outcome.points_awarded, 0);
    assert_eq!(game.state().player_score(), 0);
    assert_eq!(game.state().opponent_score(), 0);
    assert!(!game.pool(Side::Player).contains(5));
    assert!(!game.pool(Side::Opponent).contains(5));
}

/// Test that a spent card cannot be selected again.
#[test]
fn test_reselecting_used_card_is_rejected() {
    let mut game = NineMatch::new();
    let mut opponent = ScriptedOpponent::new([]);
    game.play_turn(3, &mut opponent).unwrap();

    let state_before = game.state().clone();
    let pool_before = game.pool(Side::Player).clone();

    let err = game.select(3).unwrap_err();
    assert_eq!(err, NineError::InvalidCard(3));
    assert!(err.is_invalid_selection());
    assert_eq!(game.state(), &state_before);
    assert_eq!(game.pool(Side::Player), &pool_before);

    let err = game.play_turn(3, &mut opponent).unwrap_err();
    assert!(err.is_invalid_selection());
    assert_eq!(game.state(), &state_before);
}

/// Test that values outside 1..=9 are rejected.
#[test]
fn test_out_of_range_selection() {
    let mut game = NineMatch::new();

    assert_eq!(game.select(0), Err(NineError::InvalidCard(0)));
    assert_eq!(game.select(10), Err(NineError::InvalidCard(10)));
    assert_eq!(game.state().pending_player_card(), None);
}

// =============================================================================
// Phase Gating
// =============================================================================

/// Test that confirming while cards are face up is rejected.
#[test]
fn test_confirm_during_revealed_is_rejected() {
    let mut game = NineMatch::new();
    let mut opponent = ScriptedOpponent::new([2]);
    game.select(4).unwrap();
    game.confirm().unwrap();
    game.reveal(&mut opponent).unwrap();

    assert!(!game.can_accept());
    assert_eq!(
        game.confirm(),
        Err(NineError::InvalidPhase {
            action: "confirm",
            phase: Phase::Revealed
        })
    );
    assert!(game.select(5).unwrap_err().is_invalid_phase());
    assert!(game.reveal(&mut opponent).unwrap_err().is_invalid_phase());

    // Resolving still works afterwards.
    let event = game.resolve_turn().unwrap();
    assert_eq!(event.outcome.winner, Winner::Player);
}

/// Test that resolving before the reveal is rejected.
#[test]
fn test_resolve_requires_reveal() {
    let mut game = NineMatch::new();
    game.select(4).unwrap();

    assert!(game.resolve_turn().unwrap_err().is_invalid_phase());
    game.confirm().unwrap();
    assert!(game.resolve_turn().unwrap_err().is_invalid_phase());
}

/// Test that a complete match refuses every further move.
#[test]
fn test_complete_never_advances() {
    let mut game = NineMatch::new();
    let mut opponent = ScriptedOpponent::new([]);
    for value in 1..=9 {
        game.play_turn(value, &mut opponent).unwrap();
    }

    assert_eq!(game.state().phase(), Phase::Complete);
    assert_eq!(game.state().turn_number(), TOTAL_TURNS + 1);
    assert!(!game.can_accept());

    let err = game.play_turn(1, &mut opponent).unwrap_err();
    assert_eq!(
        err,
        NineError::InvalidPhase {
            action: "select",
            phase: Phase::Complete
        }
    );
    assert!(game.resolve_turn().unwrap_err().is_invalid_phase());
    assert_eq!(game.state().turn_number(), TOTAL_TURNS + 1);
    assert_eq!(game.history().len(), 9);
}

// =============================================================================
// Full Matches
// =============================================================================

/// Test a full match the player wins.
#[test]
fn test_full_match_player_wins() {
    let mut game = NineMatch::new();
    let mut opponent = ScriptedOpponent::new(1..=9);
    let mut tracker = HighScoreTracker::new(MemoryStore::new(), "nine-game_highscore");

    for value in [2, 3, 4, 5, 6, 7, 8, 9, 1] {
        game.play_turn(value, &mut opponent).unwrap();
    }

    let result = game.finish(&mut tracker).unwrap();
    assert_eq!(result.outcome, Winner::Player);
    assert_eq!(result.player_score, 80);
    assert_eq!(result.opponent_score, 10);
    assert!(result.is_new_high_score);
    assert_eq!(tracker.store().raw("nine-game_highscore"), Some("80"));
}

/// Test that playing the opponent's cards back ends in a draw.
#[test]
fn test_mirrored_match_is_a_draw() {
    let mut game = NineMatch::new();
    let mut opponent = ScriptedOpponent::new(1..=9);
    let mut tracker = HighScoreTracker::new(MemoryStore::new(), "k");

    for value in 1..=9 {
        let event = game.play_turn(value, &mut opponent).unwrap();
        assert_eq!(event.outcome.winner, Winner::Tie);
    }

    let result = game.finish(&mut tracker).unwrap();
    assert_eq!(result.outcome, Winner::Tie);
    assert_eq!(result.player_score, 0);
    assert_eq!(result.opponent_score, 0);
}

/// Test that each resolved turn advances the counter by one.
#[test]
fn test_turns_advance_one_at_a_time() {
    let mut game = NineMatch::new();
    let mut opponent = ThresholdOpponent::seeded(42);

    for (i, value) in (1..=9).rev().enumerate() {
        let expected_turn = i as u8 + 1;
        assert_eq!(game.state().turn_number(), expected_turn);
        assert_eq!(game.state().phase(), Phase::Selecting);

        let event = game.play_turn(value, &mut opponent).unwrap();
        assert_eq!(event.turn_number, expected_turn);
    }

    assert!(game.state().is_complete());
}

/// Test that the first mover alternates turn by turn.
#[test]
fn test_first_mover_alternates_in_history() {
    let mut game = NineMatch::new();
    let mut opponent = ThresholdOpponent::seeded(3);
    for value in 1..=9 {
        game.play_turn(value, &mut opponent).unwrap();
    }

    for event in game.history() {
        let expected = if event.turn_number % 2 == 1 { Side::Player } else { Side::Opponent };
        assert_eq!(event.first_mover, expected);
    }
}

/// Test that both pools are spent after nine turns.
#[test]
fn test_pools_empty_after_match() {
    let mut game = NineMatch::new();
    let mut opponent = ThresholdOpponent::seeded(11);
    for value in [5, 1, 9, 2, 8, 3, 7, 4, 6] {
        game.play_turn(value, &mut opponent).unwrap();
    }

    for side in Side::ALL {
        assert!(game.pool(side).is_empty());
        assert_eq!(values(game.pool(side).used()), vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    let played: Vec<u8> = game.history().iter().map(|e| e.player_card.value()).collect();
    assert_eq!(played, vec![5, 1, 9, 2, 8, 3, 7, 4, 6]);
}

/// Test that each event carries the running totals.
#[test]
fn test_running_scores_in_events() {
    let mut game = NineMatch::new();
    let mut opponent = ScriptedOpponent::new([1, 9]);

    let first = game.play_turn(2, &mut opponent).unwrap();
    let second = game.play_turn(3, &mut opponent).unwrap();

    assert_eq!((first.player_score, first.opponent_score), (3, 0));
    assert_eq!((second.player_score, second.opponent_score), (3, 12));
    assert_eq!(game.state().score_diff(), 9);
}

/// Test restoring a serialized match mid-turn and playing on.
#[test]
fn test_match_checkpoint_serde() {
    let mut game = NineMatch::new();
    let mut opponent = ScriptedOpponent::new([4, 8]);
    game.play_turn(6, &mut opponent).unwrap();
    game.play_turn(2, &mut opponent).unwrap();
    game.select(9).unwrap();

    let json = serde_json::to_string(&game).unwrap();
    let mut restored: NineMatch = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.state(), game.state());
    assert_eq!(restored.history(), game.history());
    assert_eq!(restored.pool(Side::Opponent), game.pool(Side::Opponent));

    // The restored match keeps playing from where it left off.
    restored.confirm().unwrap();
    restored.reveal(&mut ScriptedOpponent::new([1])).unwrap();
    let event = restored.resolve_turn().unwrap();
    assert_eq!(event.turn_number, 3);
}

/// Test that a checkpoint whose parts disagree is refused on restore.
#[test]
fn test_inconsistent_checkpoint_is_rejected() {
    let mut game = NineMatch::new();
    let mut opponent = ScriptedOpponent::new([4, 8]);
    game.play_turn(6, &mut opponent).unwrap();
    game.play_turn(2, &mut opponent).unwrap();
    let valid = serde_json::to_value(&game).unwrap();

    let mut runaway_turn = valid.clone();
    runaway_turn["state"]["turn_number"] = 255.into();

    let mut turn_ahead_of_pools = valid.clone();
    turn_ahead_of_pools["state"]["turn_number"] = 5.into();

    let mut complete_early = valid.clone();
    complete_early["state"]["turn_number"] = 10.into();
    complete_early["state"]["phase"] = "Complete".into();

    let mut lost_history = valid.clone();
    lost_history["history"] = serde_json::json!([]);

    let mut early_result = valid.clone();
    early_result["result"] = serde_json::json!({
        "outcome": "Tie",
        "player_score": 0,
        "opponent_score": 0,
        "is_new_high_score": false,
    });

    for json in [runaway_turn, turn_ahead_of_pools, complete_early, lost_history, early_result] {
        assert!(serde_json::from_value::<NineMatch>(json.clone()).is_err(), "accepted {json}");
    }
    assert!(serde_json::from_value::<NineMatch>(valid).is_ok());
}

/// Test that restored pools must hold every card once and back the pending card.
#[test]
fn test_checkpoint_with_bad_pool_is_rejected() {
    let mut game = NineMatch::new();
    game.play_turn(6, &mut ScriptedOpponent::new([4])).unwrap();
    let valid = serde_json::to_value(&game).unwrap();

    let mut short_pool = valid.clone();
    short_pool["pools"]["data"][0] = serde_json::json!({ "available": [1], "used": [] });

    let mut overlapping_pool = valid.clone();
    overlapping_pool["pools"]["data"][1]["used"] = serde_json::json!([4, 5]);

    let mut pending_used_card = valid.clone();
    pending_used_card["state"]["pending"]["data"][0] = 6.into();

    for json in [short_pool, overlapping_pool, pending_used_card] {
        assert!(serde_json::from_value::<NineMatch>(json.clone()).is_err(), "accepted {json}");
    }
}

// =============================================================================
// Properties
// =============================================================================

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn any_order() -> impl Strategy<Value = Vec<u8>> {
        Just((1..=9).collect::<Vec<u8>>()).prop_shuffle()
    }

    proptest! {
        /// Test that scores add up to the points awarded across a match.
        #[test]
        fn prop_scores_equal_sum_of_awarded_points(order in any_order(), seed in any::<u64>()) {
            let mut game = NineMatch::new();
            let mut opponent = ThresholdOpponent::seeded(seed);

            for value in order {
                game.play_turn(value, &mut opponent).unwrap();
                for side in Side::ALL {
                    let pool = game.pool(side);
                    prop_assert_eq!(pool.len() + pool.used().count(), 9);
                    prop_assert!(pool.available().all(|c| !pool.is_used(c.value())));
                }
            }

            let awarded: u32 = game.history().iter().map(|e| e.outcome.points_awarded).sum();
            let state = game.state();
            prop_assert!(state.is_complete());
            prop_assert_eq!(state.player_score() + state.opponent_score(), awarded);

            let turns: Vec<u8> = game.history().iter().map(|e| e.turn_number).collect();
            prop_assert_eq!(turns, (1..=TOTAL_TURNS).collect::<Vec<_>>());
        }

        /// Test that neither score ever drops.
        #[test]
        fn prop_scores_never_decrease(order in any_order(), seed in any::<u64>()) {
            let mut game = NineMatch::new();
            let mut opponent = ThresholdOpponent::seeded(seed);
            let mut last = (0, 0);

            for value in order {
                let event = game.play_turn(value, &mut opponent).unwrap();
                prop_assert!(event.player_score >= last.0);
                prop_assert!(event.opponent_score >= last.1);
                last = (event.player_score, event.opponent_score);
            }
        }
    }
}
