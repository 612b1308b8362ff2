use doudizhu_rs::bidding::BidDecision::{Claim, Decline};
use doudizhu_rs::config::MatchConfig;
use doudizhu_rs::error::{InputError, MatchError};
use doudizhu_rs::game::MatchController;
use doudizhu_rs::seat::Seat;
use doudizhu_rs::state::Phase;

const P1: Seat = Seat::ALL[0];
const P2: Seat = Seat::ALL[1];
const P3: Seat = Seat::ALL[2];

/// Hand in Playing with `landlord` on lead.
fn playing(landlord: Seat) -> MatchController {
    doudizhu_rs::telemetry::init_test();
    let mut g = MatchController::new(MatchConfig::default().with_seed(21));
    g.start_hand();
    for seat in Seat::ALL {
        let d = if seat == landlord { Claim } else { Decline };
        g.submit_bid(seat, d).unwrap();
    }
    assert_eq!(g.phase(), Phase::Playing);
    g
}

#[test]
fn pass_pass_returns_the_floor() {
    let mut g = playing(P1);
    let card = g.state().hand(P1).get(0).unwrap();
    g.submit_play(P1, &[0]).unwrap();
    assert_eq!(g.state().last_play().map(|lp| (lp.by_seat, lp.cards.clone())), Some((P1, vec![card])));

    g.submit_pass(P2).unwrap();
    assert_eq!(g.state().consecutive_passes(), 1);
    assert!(g.state().last_play().is_some());

    g.submit_pass(P3).unwrap();
    assert!(g.state().last_play().is_none());
    assert_eq!(g.state().current(), P1);
    assert_eq!(g.state().consecutive_passes(), 0);
}

#[test]
fn cannot_pass_on_open_floor_or_own_play() {
    let mut g = playing(P1);
    assert_eq!(g.submit_pass(P1), Err(MatchError::MustPlay { seat: P1 }));

    g.submit_play(P1, &[0]).unwrap();
    g.submit_pass(P2).unwrap();
    g.submit_pass(P3).unwrap();
    // Floor came back open to P1.
    assert_eq!(g.submit_pass(P1), Err(MatchError::MustPlay { seat: P1 }));
}

#[test]
fn play_resets_the_pass_count() {
    let mut g = playing(P2);
    g.submit_play(P2, &[0, 1]).unwrap();
    g.submit_pass(P3).unwrap();
    g.submit_play(P1, &[3]).unwrap();
    assert_eq!(g.state().consecutive_passes(), 0);
    assert_eq!(g.state().last_play().map(|lp| lp.by_seat), Some(P1));
    g.submit_pass(P2).unwrap();
    g.submit_pass(P3).unwrap();
    assert!(g.state().last_play().is_none());
    assert_eq!(g.state().current(), P1);
}

#[test]
fn played_cards_leave_the_hand_in_selection_order() {
    let mut g = playing(P1);
    let hand = g.state().hand(P1).clone();
    g.submit_play(P1, &[5, 2, 9]).unwrap();
    let expected = vec![hand.get(5).unwrap(), hand.get(2).unwrap(), hand.get(9).unwrap()];
    assert_eq!(g.state().played(P1), &expected[..]);
    assert_eq!(g.state().hand(P1).len(), 17);
    assert!(expected.iter().all(|c| !g.state().hand(P1).as_slice().contains(c)));
}

#[test]
fn rejected_plays_leave_the_snapshot_unchanged() {
    let mut g = playing(P1);
    let before = g.snapshot();
    assert_eq!(g.submit_play(P2, &[0]), Err(MatchError::InvalidTurn { seat: P2, expected: P1 }));
    assert_eq!(g.submit_play(P1, &[]), Err(MatchError::InvalidInput(InputError::EmptySelection)));
    assert_eq!(
        g.submit_play(P1, &[0, 20]),
        Err(MatchError::InvalidInput(InputError::IndexOutOfRange { index: 20, len: 20 }))
    );
    assert_eq!(
        g.submit_play(P1, &[4, 4]),
        Err(MatchError::InvalidInput(InputError::DuplicateIndex(4)))
    );
    assert_eq!(g.snapshot(), before);
}

#[test]
fn wrong_seat_is_checked_before_the_selection() {
    let mut g = playing(P1);
    assert!(matches!(g.submit_play(P3, &[]), Err(MatchError::InvalidTurn { .. })));
    assert!(matches!(g.submit_pass(P3), Err(MatchError::InvalidTurn { .. })));
}

#[test]
fn any_selection_is_accepted_regardless_of_strength() {
    let mut g = playing(P1);
    g.submit_play(P1, &[0, 1, 2, 3, 4, 5, 6]).unwrap();
    // A single card "answers" seven; nothing checks combinations.
    g.submit_play(P2, &[0]).unwrap();
    assert_eq!(g.state().last_play().map(|lp| lp.cards.len()), Some(1));
}

#[test]
fn play_and_pass_outside_playing_are_illegal() {
    let mut g = MatchController::new(MatchConfig::default().with_seed(3));
    g.start_hand();
    assert!(matches!(
        g.submit_play(P1, &[0]),
        Err(MatchError::IllegalPhase { action: "play", phase: Phase::Bidding })
    ));
    assert!(matches!(
        g.submit_pass(P1),
        Err(MatchError::IllegalPhase { action: "pass", phase: Phase::Bidding })
    ));
}
