//! Landlord selection.
//!
//! Three decisions, one per seat, always starting at seat 0. The latest seat to
//! claim holds the provisional landlordship; after the third decision it becomes
//! final. If nobody claims, the hand is void and must be redealt.

use serde::{Deserialize, Serialize};

use crate::error::MatchError;
use crate::seat::{Seat, SEATS};

/// Index of the last bidding round.
pub const FINAL_ROUND: u8 = (SEATS - 1) as u8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BidDecision {
    Claim,
    Decline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidRecord {
    pub seat: Seat,
    pub decision: BidDecision,
}

/// What the controller must do after an accepted decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidOutcome {
    /// Bidding continues with this seat.
    Next(Seat),
    /// Bidding is over and this seat is the landlord.
    Landlord(Seat),
    /// Nobody claimed; the hand must be redealt.
    Void,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiddingState {
    round: u8,
    provisional: Option<Seat>,
    log: Vec<BidRecord>,
}

impl Default for BiddingState {
    fn default() -> Self {
        Self::new()
    }
}

impl BiddingState {
    pub fn new() -> Self {
        Self { round: 0, provisional: None, log: Vec::with_capacity(SEATS) }
    }

    pub fn round(&self) -> u8 {
        self.round
    }

    pub fn provisional(&self) -> Option<Seat> {
        self.provisional
    }

    pub fn log(&self) -> &[BidRecord] {
        &self.log
    }

    /// Seat whose decision is awaited. Round `r` belongs to seat `r`.
    pub fn seat_on_turn(&self) -> Seat {
        Seat::ALL[self.round as usize % SEATS]
    }

    pub fn submit(&mut self, seat: Seat, decision: BidDecision) -> Result<BidOutcome, MatchError> {
        let expected = self.seat_on_turn();
        if seat != expected {
            return Err(MatchError::InvalidTurn { seat, expected });
        }
        self.log.push(BidRecord { seat, decision });
        if decision == BidDecision::Claim {
            self.provisional = Some(seat);
        }
        if self.round >= FINAL_ROUND {
            return Ok(match self.provisional {
                Some(landlord) => BidOutcome::Landlord(landlord),
                None => BidOutcome::Void,
            });
        }
        self.round += 1;
        Ok(BidOutcome::Next(seat.next()))
    }
}
