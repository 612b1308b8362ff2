use serde::{Deserialize, Serialize};
use std::fmt;

use crate::bidding::BiddingState;
use crate::cards::Card;
use crate::deal::{Deal, RESERVE_SIZE};
use crate::hand::Hand;
use crate::seat::{Seat, SEATS};
use crate::turn::TurnState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Phase {
    Dealing,
    Bidding,
    Playing,
    Ended,
}

/// The standing play: the most recent cards put down and who put them there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastPlay {
    pub cards: Vec<Card>,
    pub by_seat: Seat,
}

/// Which side emptied a hand first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Outcome {
    #[serde(rename = "landlord-win")]
    LandlordWin,
    #[serde(rename = "farmer-win")]
    FarmerWin,
}

impl Outcome {
    pub const fn as_str(self) -> &'static str {
        match self {
            Outcome::LandlordWin => "landlord-win",
            Outcome::FarmerWin => "farmer-win",
        }
    }

    /// Per-seat score change. Landlord wins: +2 / -1 / -1. Farmers win: -2 / +1 / +1.
    /// Always sums to zero.
    pub fn score_delta(self, landlord: Seat) -> [i64; SEATS] {
        let (landlord_delta, farmer_delta) = match self {
            Outcome::LandlordWin => (2, -1),
            Outcome::FarmerWin => (-2, 1),
        };
        let mut delta = [farmer_delta; SEATS];
        delta[landlord.index()] = landlord_delta;
        delta
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything that changes during a hand, plus the running score table.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct MatchState {
    pub(crate) phase: Phase,
    pub(crate) hands: [Hand; SEATS],
    pub(crate) reserve: Option<[Card; RESERVE_SIZE]>,
    pub(crate) landlord: Option<Seat>,
    pub(crate) turn: Option<TurnState>,
    pub(crate) played: [Vec<Card>; SEATS],
    pub(crate) scores: [i64; SEATS],
    pub(crate) result: Option<Outcome>,
    pub(crate) winner: Option<Seat>,
    pub(crate) bidding: Option<BiddingState>,
    pub(crate) hand_number: u64,
}

impl Default for MatchState {
    fn default() -> Self {
        Self {
            phase: Phase::Dealing,
            hands: Default::default(),
            reserve: None,
            landlord: None,
            turn: None,
            played: Default::default(),
            scores: [0; SEATS],
            result: None,
            winner: None,
            bidding: None,
            hand_number: 0,
        }
    }
}

impl MatchState {
    /// Clear everything hand-local, keep scores and the hand counter.
    pub(crate) fn reset_for_deal(&mut self) {
        self.phase = Phase::Dealing;
        self.hands = Default::default();
        self.reserve = None;
        self.landlord = None;
        self.turn = None;
        self.played = Default::default();
        self.result = None;
        self.winner = None;
        self.bidding = None;
    }

    pub(crate) fn install_deal(&mut self, deal: Deal) {
        self.hands = deal.hands;
        self.reserve = Some(deal.reserve);
        self.hand_number += 1;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat.index()]
    }

    pub fn hand_sizes(&self) -> [usize; SEATS] {
        [self.hands[0].len(), self.hands[1].len(), self.hands[2].len()]
    }

    /// The three reserve cards of the current deal.
    pub fn reserve(&self) -> Option<&[Card; RESERVE_SIZE]> {
        self.reserve.as_ref()
    }

    pub fn landlord(&self) -> Option<Seat> {
        self.landlord
    }

    /// Seat on turn: the bidder while bidding, the actor while playing, the
    /// winner once ended.
    pub fn current(&self) -> Seat {
        if let Some(turn) = &self.turn {
            return turn.current();
        }
        if let Some(bidding) = &self.bidding {
            return bidding.seat_on_turn();
        }
        Seat::ALL[0]
    }

    pub fn last_play(&self) -> Option<&LastPlay> {
        self.turn.as_ref().and_then(TurnState::last_play)
    }

    pub fn consecutive_passes(&self) -> u8 {
        self.turn.as_ref().map_or(0, TurnState::consecutive_passes)
    }

    pub fn played(&self, seat: Seat) -> &[Card] {
        &self.played[seat.index()]
    }

    pub fn scores(&self) -> [i64; SEATS] {
        self.scores
    }

    pub fn result(&self) -> Option<Outcome> {
        self.result
    }

    pub fn winner(&self) -> Option<Seat> {
        self.winner
    }

    pub fn bidding(&self) -> Option<&BiddingState> {
        self.bidding.as_ref()
    }

    pub fn hand_number(&self) -> u64 {
        self.hand_number
    }

    /// Cards still accounted for: held, played, and the reserve while unclaimed.
    pub fn card_count(&self) -> usize {
        let held: usize = self.hands.iter().map(Hand::len).sum();
        let played: usize = self.played.iter().map(Vec::len).sum();
        let reserve = match (self.landlord, self.reserve) {
            (None, Some(r)) => r.len(),
            _ => 0,
        };
        held + played + reserve
    }
}
