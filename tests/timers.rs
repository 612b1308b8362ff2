use doudizhu_rs::bidding::BidDecision::{Claim, Decline};
use doudizhu_rs::config::MatchConfig;
use doudizhu_rs::game::{HistoryVerb, MatchController, TimerEvent};
use doudizhu_rs::seat::Seat;
use doudizhu_rs::state::Phase;
use doudizhu_rs::timer::{ManualClock, TimerKind};
use std::sync::Arc;
use std::time::Duration;

const P1: Seat = Seat::ALL[0];
const P2: Seat = Seat::ALL[1];
const P3: Seat = Seat::ALL[2];

const BID: Duration = Duration::from_secs(8);
const PLAY: Duration = Duration::from_secs(15);

fn mk_game() -> (MatchController, Arc<ManualClock>) {
    doudizhu_rs::telemetry::init_test();
    let clock = Arc::new(ManualClock::new());
    let mut g = MatchController::with_clock(MatchConfig::default().with_seed(31), clock.clone());
    g.start_hand();
    (g, clock)
}

fn to_playing(g: &mut MatchController, landlord: Seat) {
    for seat in Seat::ALL {
        g.submit_bid(seat, if seat == landlord { Claim } else { Decline }).unwrap();
    }
}

#[test]
fn bid_timer_declines_for_the_seat_on_turn() {
    let (mut g, clock) = mk_game();
    assert_eq!(g.armed_timer().map(|t| (t.kind, t.seat)), Some((TimerKind::Bid, P1)));
    assert_eq!(g.snapshot().countdown_secs, Some(8));

    clock.advance(BID - Duration::from_millis(1));
    assert_eq!(g.tick(), None);

    clock.advance(Duration::from_millis(1));
    assert_eq!(g.tick(), Some(TimerEvent::AutoDeclined(P1)));
    assert_eq!(g.state().current(), P2);
    let last = g.history().last().unwrap();
    assert_eq!((last.seat, last.verb, last.timed_out), (P1, HistoryVerb::Decline, true));
    assert_eq!(g.armed_timer().map(|t| t.seat), Some(P2));
}

#[test]
fn three_bid_timeouts_void_the_hand() {
    let (mut g, clock) = mk_game();
    for seat in Seat::ALL {
        clock.advance(BID);
        assert_eq!(g.tick(), Some(TimerEvent::AutoDeclined(seat)));
    }
    assert_eq!(g.state().hand_number(), 2);
    assert_eq!(g.phase(), Phase::Bidding);
    assert_eq!(g.armed_timer().map(|t| (t.kind, t.seat)), Some((TimerKind::Bid, P1)));
}

#[test]
fn play_timer_passes_when_a_pass_is_legal() {
    let (mut g, clock) = mk_game();
    to_playing(&mut g, P1);
    g.submit_play(P1, &[0]).unwrap();
    assert_eq!(g.armed_timer().map(|t| (t.kind, t.seat)), Some((TimerKind::Play, P2)));

    clock.advance(PLAY);
    assert_eq!(g.tick(), Some(TimerEvent::AutoPassed(P2)));
    clock.advance(PLAY);
    assert_eq!(g.tick(), Some(TimerEvent::AutoPassed(P3)));
    assert!(g.state().last_play().is_none());
    assert_eq!(g.state().current(), P1);
}

#[test]
fn floor_holder_timeout_rearms_instead_of_passing() {
    let (mut g, clock) = mk_game();
    to_playing(&mut g, P2);
    let before = g.snapshot();
    let first = g.armed_timer().unwrap();

    clock.advance(PLAY);
    assert_eq!(g.tick(), Some(TimerEvent::Rearmed(P2)));
    let rearmed = g.armed_timer().unwrap();
    assert_eq!(rearmed.seat, P2);
    assert!(rearmed.deadline > first.deadline);

    let after = g.snapshot();
    assert_eq!(after.hands, before.hands);
    assert_eq!(after.current_seat, P2);
    assert_eq!(after.countdown_secs, Some(15));
    assert_eq!(g.tick(), None, "nothing fires until the new deadline");
}

#[test]
fn every_accepted_intent_restarts_the_clock() {
    let (mut g, clock) = mk_game();
    clock.advance(Duration::from_secs(7));
    g.submit_bid(P1, Claim).unwrap();
    clock.advance(Duration::from_secs(7));
    assert_eq!(g.tick(), None);
    assert_eq!(g.countdown(), Some(Duration::from_secs(1)));
}

#[test]
fn stale_timer_never_fires_into_a_new_hand() {
    let (mut g, clock) = mk_game();
    to_playing(&mut g, P3);
    g.submit_play(P3, &(0..20).collect::<Vec<_>>()).unwrap();
    assert_eq!(g.phase(), Phase::Ended);
    assert!(g.armed_timer().is_none());

    clock.advance(PLAY * 4);
    assert_eq!(g.tick(), None);

    g.restart().unwrap();
    let armed = g.armed_timer().unwrap();
    assert_eq!((armed.kind, armed.seat), (TimerKind::Bid, P1));
    assert_eq!(g.tick(), None);
}

#[test]
fn custom_timeouts_come_from_config() {
    let clock = Arc::new(ManualClock::new());
    let cfg = MatchConfig { bid_timeout: Duration::from_secs(2), ..MatchConfig::default() };
    let mut g = MatchController::with_clock(cfg, clock.clone());
    g.start_hand();
    clock.advance(Duration::from_secs(2));
    assert_eq!(g.tick(), Some(TimerEvent::AutoDeclined(P1)));
}
