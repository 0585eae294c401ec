//! Hand-level scenarios driven directly against the table state machine.

use std::sync::Arc;

use poker_sng::game::seat::{ActionMessage, ActionWord};
use poker_sng::game::table::{PotAward, RoundStage, Table, TableStatus};
use poker_sng::notify::{Event, RecordingNotifier, Target};
use poker_sng::player::Player;

const BIG_BLIND: i64 = 20;

fn table_with_stacks(stacks: &[i64]) -> Table {
    let mut table = Table::new("test-room".to_string());
    for (i, &stack) in stacks.iter().enumerate() {
        table.add_seat(Arc::new(Player::new(format!("p{}", i), 0)), stack);
    }
    table
}

fn act(table: &mut Table, notifier: &RecordingNotifier, msg: ActionMessage) -> TableStatus {
    table.validate_action(&msg).unwrap();
    table.apply_action(&msg);
    table.advance_after_action(notifier)
}

#[test]
fn three_player_hand_with_bet_and_folds() {
    let notifier = RecordingNotifier::new();
    let mut table = table_with_stacks(&[1000, 1000, 1000]);
    let total = 3000;

    // Button 0: small blind seat 1, big blind seat 2, seat 0 opens
    let status = table.start_hand(&notifier, BIG_BLIND);
    assert_eq!(status, TableStatus::AwaitingAction { seat: 0 });
    assert_eq!(table.chips_on_table(), total);

    let status = act(&mut table, &notifier, ActionMessage::simple(ActionWord::Call));
    assert_eq!(status, TableStatus::AwaitingAction { seat: 1 });
    let status = act(&mut table, &notifier, ActionMessage::simple(ActionWord::Call));
    assert_eq!(status, TableStatus::AwaitingAction { seat: 2 });

    // Big blind closes the lap; the flop lap starts left of the button
    let status = act(&mut table, &notifier, ActionMessage::simple(ActionWord::Check));
    assert_eq!(status, TableStatus::AwaitingAction { seat: 1 });
    assert_eq!(table.round_stage, RoundStage::Flop);
    assert_eq!(table.board.len(), 3);
    assert_eq!(table.pots.total(), 60);
    assert_eq!(table.chips_on_table(), total);

    // Seat 1 bets, the others give up
    let status = act(
        &mut table,
        &notifier,
        ActionMessage::with_bet(ActionWord::Bet, 40),
    );
    assert_eq!(status, TableStatus::AwaitingAction { seat: 2 });
    let status = act(&mut table, &notifier, ActionMessage::simple(ActionWord::Fold));
    assert_eq!(status, TableStatus::AwaitingAction { seat: 0 });
    let status = act(&mut table, &notifier, ActionMessage::simple(ActionWord::Fold));

    let awards = match status {
        TableStatus::HandComplete(awards) => awards,
        other => panic!("expected a settled hand, got {:?}", other),
    };
    assert_eq!(awards.len(), 1);
    assert_eq!(awards[0].winners.len(), 1);
    assert_eq!(awards[0].winners[0].seat, 1);
    assert_eq!(awards[0].winners[0].chips, 100);

    assert_eq!(table.seats[0].stack, 980);
    assert_eq!(table.seats[1].stack, 1040);
    assert_eq!(table.seats[2].stack, 980);
    // Settlement drains the pots into the stacks; nothing is counted twice
    assert_eq!(table.pots.total(), 0);
    assert_eq!(table.chips_on_table(), total);
}

fn run_out_reveals(table: &mut Table, notifier: &RecordingNotifier) -> Vec<PotAward> {
    for _ in 0..8 {
        match table.resume_after_reveal(notifier) {
            TableStatus::RevealPause => continue,
            TableStatus::HandComplete(awards) => return awards,
            other => panic!("unexpected status during run-out: {:?}", other),
        }
    }
    panic!("run-out never settled");
}

#[test]
fn heads_up_all_in_small_blind_closes_betting_at_the_blinds() {
    let notifier = RecordingNotifier::new();
    let mut table = table_with_stacks(&[5, 100]);

    // The button's 5 chips do not cover the small blind: it posts
    // all-in and the big blind only has to match those 5.
    let status = table.start_hand(&notifier, BIG_BLIND);
    assert_eq!(status, TableStatus::RevealPause);
    assert_eq!(table.pots.pots[0].chips, 10);
    assert!(!table.pots.pots[0].open);

    let awards = run_out_reveals(&mut table, &notifier);
    assert_eq!(table.board.len(), 5);
    let paid: i64 = awards[0].winners.iter().map(|w| w.chips).sum();
    assert_eq!(paid, 10);
    assert_eq!(table.seats[0].stack + table.seats[1].stack, 105);
    // The big blind's uncommitted chips never entered the pot
    assert!(table.seats[1].stack >= 95);
}

#[test]
fn short_big_blind_covered_by_small_blind_runs_the_hand_out() {
    let notifier = RecordingNotifier::new();
    let mut table = table_with_stacks(&[200, 200, 8]);

    // Big blind is all-in for 8, already covered by the small blind's
    // 10: no betting lap, the surplus 2 return to the small blind.
    let status = table.start_hand(&notifier, BIG_BLIND);
    assert_eq!(status, TableStatus::RevealPause);
    assert_eq!(table.pots.pots[0].chips, 16);
    assert!(!table.pots.pots[0].open);
    assert_eq!(table.seats[1].stack, 192);

    let awards = run_out_reveals(&mut table, &notifier);
    let paid: i64 = awards[0].winners.iter().map(|w| w.chips).sum();
    assert_eq!(paid, 16);
    let stacks: i64 = table.seats.iter().map(|s| s.stack).sum();
    assert_eq!(stacks, 408);
    // Only the blind posters contested the pot
    for winner in &awards[0].winners {
        assert!(winner.seat == 1 || winner.seat == 2);
    }
}

#[test]
fn heads_up_unequal_all_in_runs_out_with_reveals() {
    let notifier = RecordingNotifier::new();
    let mut table = table_with_stacks(&[100, 300]);

    // Heads-up: the button posts the small blind and opens
    let status = table.start_hand(&notifier, BIG_BLIND);
    assert_eq!(status, TableStatus::AwaitingAction { seat: 0 });

    // Button shoves for its remaining 90, big blind calls 80
    let status = act(
        &mut table,
        &notifier,
        ActionMessage::with_bet(ActionWord::Raise, 90),
    );
    assert_eq!(status, TableStatus::AwaitingAction { seat: 1 });
    let status = act(&mut table, &notifier, ActionMessage::simple(ActionWord::Call));

    // No further betting possible: reveal pause per remaining street
    assert_eq!(status, TableStatus::RevealPause);
    assert_eq!(table.pots.total(), 200);
    assert!(!table.pots.pots[0].open);

    assert_eq!(table.resume_after_reveal(&notifier), TableStatus::RevealPause);
    assert_eq!(table.resume_after_reveal(&notifier), TableStatus::RevealPause);
    let status = table.resume_after_reveal(&notifier);

    let awards = match status {
        TableStatus::HandComplete(awards) => awards,
        other => panic!("expected a settled hand, got {:?}", other),
    };
    assert_eq!(table.board.len(), 5);

    // Whoever won, the 200-chip pot is fully paid out and the caller's
    // uncommitted 200 chips never moved.
    let paid: i64 = awards[0].winners.iter().map(|w| w.chips).sum();
    assert_eq!(paid, 200);
    assert_eq!(table.seats[0].stack + table.seats[1].stack, 400);
    assert!(table.seats[1].stack >= 200);

    // Hands were broadcast when betting closed
    let all_in_events = notifier
        .envelopes()
        .into_iter()
        .filter(|e| matches!(e.event, Event::AllIn { .. }))
        .count();
    assert!(all_in_events >= 1);
}

#[test]
fn early_preflop_folds_award_blinds_without_a_board() {
    let notifier = RecordingNotifier::new();
    let mut table = table_with_stacks(&[1000, 1000, 1000]);

    table.start_hand(&notifier, BIG_BLIND);
    let status = act(&mut table, &notifier, ActionMessage::simple(ActionWord::Fold));
    assert_eq!(status, TableStatus::AwaitingAction { seat: 1 });
    let status = act(&mut table, &notifier, ActionMessage::simple(ActionWord::Fold));

    let awards = match status {
        TableStatus::HandComplete(awards) => awards,
        other => panic!("expected a settled hand, got {:?}", other),
    };
    assert_eq!(table.round_stage, RoundStage::EarlyWin);
    assert!(table.board.is_empty());
    assert_eq!(awards[0].winners[0].seat, 2);
    assert_eq!(awards[0].winners[0].chips, 30);
    assert_eq!(table.seats[2].stack, 1010);
    // Nobody's hole cards were shown
    let revealed = notifier.envelopes().into_iter().any(|e| {
        matches!(&e.event, Event::RoundEnd { hands, .. } if hands.values().any(Option::is_some))
    });
    assert!(!revealed);
}

#[test]
fn rejected_actions_leave_the_table_untouched() {
    let notifier = RecordingNotifier::new();
    let mut table = table_with_stacks(&[1000, 1000, 1000]);
    table.start_hand(&notifier, BIG_BLIND);

    // Checking while facing the big blind was never offered
    let err = table
        .validate_action(&ActionMessage::simple(ActionWord::Check))
        .unwrap_err();
    assert!(err.to_string().contains("not currently offered"));

    // Undersized raise: minimum is table bet plus the last increment
    let err = table
        .validate_action(&ActionMessage::with_bet(ActionWord::Raise, 5))
        .unwrap_err();
    assert!(err.to_string().contains("below the minimum"));

    // A raise with no amount at all
    table
        .validate_action(&ActionMessage::simple(ActionWord::Raise))
        .unwrap_err();

    assert_eq!(table.current_player, 0);
    assert_eq!(table.bet, BIG_BLIND);
    assert_eq!(table.chips_on_table(), 3000);
}

#[test]
fn hole_cards_are_dealt_privately() {
    let notifier = RecordingNotifier::new();
    let mut table = table_with_stacks(&[1000, 1000]);
    table.start_hand(&notifier, BIG_BLIND);

    let deals: Vec<_> = notifier
        .envelopes()
        .into_iter()
        .filter(|e| matches!(e.event, Event::DealCards { .. }))
        .collect();
    assert_eq!(deals.len(), 2);
    for deal in deals {
        assert!(matches!(deal.target, Target::Player { .. }));
        match deal.event {
            Event::DealCards { hand } => assert_eq!(hand.unwrap().len(), 2),
            _ => unreachable!(),
        }
    }
}
