//! Read-only views of a match for broadcast.
//!
//! [`MatchSnapshot`] carries every hand and is meant for the authority itself
//! (logs, tests, the simulator). [`SeatView`] is what one seat's client may see.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::bidding::BidRecord;
use crate::cards::Card;
use crate::seat::{Seat, SEATS};
use crate::state::{LastPlay, MatchState, Outcome, Phase};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSnapshot {
    pub phase: Phase,
    pub hand_number: u64,
    pub hands: [Vec<Card>; SEATS],
    pub reserve: Option<Vec<Card>>,
    pub landlord_seat: Option<Seat>,
    pub current_seat: Seat,
    pub last_play: Option<LastPlay>,
    pub consecutive_passes: u8,
    pub played_history: [Vec<Card>; SEATS],
    pub scores: [i64; SEATS],
    pub bid_log: Vec<BidRecord>,
    pub countdown_secs: Option<u64>,
    pub result: Option<Outcome>,
    pub winner: Option<Seat>,
}

impl MatchSnapshot {
    pub fn capture(state: &MatchState, countdown: Option<Duration>) -> Self {
        Self {
            phase: state.phase(),
            hand_number: state.hand_number(),
            hands: Seat::ALL.map(|s| state.hand(s).as_slice().to_vec()),
            reserve: state.reserve().map(|r| r.to_vec()),
            landlord_seat: state.landlord(),
            current_seat: state.current(),
            last_play: state.last_play().cloned(),
            consecutive_passes: state.consecutive_passes(),
            played_history: Seat::ALL.map(|s| state.played(s).to_vec()),
            scores: state.scores(),
            bid_log: bid_log(state),
            countdown_secs: countdown.map(whole_secs),
            result: state.result(),
            winner: state.winner(),
        }
    }
}

/// One seat's view: its own cards, everyone's counts, and the reserve once a
/// landlord holds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatView {
    pub seat: Seat,
    pub phase: Phase,
    pub hand_number: u64,
    pub hand: Vec<Card>,
    pub hand_sizes: [usize; SEATS],
    pub reserve: Option<Vec<Card>>,
    pub landlord_seat: Option<Seat>,
    pub current_seat: Seat,
    pub last_play: Option<LastPlay>,
    pub played_history: [Vec<Card>; SEATS],
    pub scores: [i64; SEATS],
    pub bid_log: Vec<BidRecord>,
    pub countdown_secs: Option<u64>,
    /// True when it is this seat's turn and a pass would be accepted.
    pub can_pass: bool,
    pub result: Option<Outcome>,
    pub winner: Option<Seat>,
}

impl SeatView {
    pub fn capture(state: &MatchState, seat: Seat, countdown: Option<Duration>) -> Self {
        let reserve = match state.landlord() {
            Some(_) => state.reserve().map(|r| r.to_vec()),
            None => None,
        };
        let can_pass = state.phase() == Phase::Playing
            && state.current() == seat
            && matches!(state.last_play(), Some(lp) if lp.by_seat != seat);
        Self {
            seat,
            phase: state.phase(),
            hand_number: state.hand_number(),
            hand: state.hand(seat).as_slice().to_vec(),
            hand_sizes: state.hand_sizes(),
            reserve,
            landlord_seat: state.landlord(),
            current_seat: state.current(),
            last_play: state.last_play().cloned(),
            played_history: Seat::ALL.map(|s| state.played(s).to_vec()),
            scores: state.scores(),
            bid_log: bid_log(state),
            countdown_secs: countdown.map(whole_secs),
            can_pass,
            result: state.result(),
            winner: state.winner(),
        }
    }

    pub fn is_my_turn(&self) -> bool {
        matches!(self.phase, Phase::Bidding | Phase::Playing) && self.current_seat == self.seat
    }
}

fn bid_log(state: &MatchState) -> Vec<BidRecord> {
    state.bidding().map(|b| b.log().to_vec()).unwrap_or_default()
}

/// Seconds left, rounded up so a running clock never shows 0.
fn whole_secs(d: Duration) -> u64 {
    let secs = d.as_secs();
    if d.subsec_nanos() > 0 {
        secs + 1
    } else {
        secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deal::deal;
    use crate::deck::build_deck;

    fn dealt_state() -> MatchState {
        let mut state = MatchState::default();
        state.install_deal(deal(&build_deck()).unwrap());
        state.phase = Phase::Bidding;
        state
    }

    #[test]
    fn seat_view_hides_other_hands_and_unclaimed_reserve() {
        let state = dealt_state();
        let view = SeatView::capture(&state, Seat::ALL[2], None);
        assert_eq!(view.hand, state.hand(Seat::ALL[2]).as_slice());
        assert_eq!(view.hand_sizes, [17, 17, 17]);
        assert!(view.reserve.is_none());
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("hands").is_none());
        assert_eq!(json["phase"], "bidding");
    }

    #[test]
    fn full_snapshot_keeps_the_reserve() {
        let state = dealt_state();
        let snap = MatchSnapshot::capture(&state, Some(Duration::from_millis(7_200)));
        assert_eq!(snap.reserve.as_ref().map(Vec::len), Some(3));
        assert_eq!(snap.countdown_secs, Some(8));
    }

    #[test]
    fn countdown_rounds_up() {
        assert_eq!(whole_secs(Duration::from_secs(15)), 15);
        assert_eq!(whole_secs(Duration::from_millis(1)), 1);
        assert_eq!(whole_secs(Duration::ZERO), 0);
    }
}
