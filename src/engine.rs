// Match engine API boundary. Agents and front ends drive a table through this
// trait without reaching into controller internals. It is implemented for
// `MatchController`.

use crate::bidding::BidDecision;
use crate::error::MatchError;
use crate::game::{MatchController, TimerEvent};
use crate::seat::Seat;
use crate::state::MatchState;

pub trait MatchEngine {
    // Hand lifecycle
    fn start_hand(&mut self);
    fn restart(&mut self) -> Result<(), MatchError>;

    // Seat intents
    fn submit_bid(&mut self, seat: Seat, decision: BidDecision) -> Result<(), MatchError>;
    fn submit_play(&mut self, seat: Seat, indices: &[usize]) -> Result<(), MatchError>;
    fn submit_pass(&mut self, seat: Seat) -> Result<(), MatchError>;

    // Clock
    fn tick(&mut self) -> Option<TimerEvent>;

    // Queries
    fn state(&self) -> &MatchState;
}

impl MatchEngine for MatchController {
    fn start_hand(&mut self) {
        self.start_hand();
    }
    fn restart(&mut self) -> Result<(), MatchError> {
        self.restart()
    }

    fn submit_bid(&mut self, seat: Seat, decision: BidDecision) -> Result<(), MatchError> {
        self.submit_bid(seat, decision)
    }
    fn submit_play(&mut self, seat: Seat, indices: &[usize]) -> Result<(), MatchError> {
        self.submit_play(seat, indices)
    }
    fn submit_pass(&mut self, seat: Seat) -> Result<(), MatchError> {
        self.submit_pass(seat)
    }

    fn tick(&mut self) -> Option<TimerEvent> {
        self.tick()
    }

    fn state(&self) -> &MatchState {
        self.state()
    }
}
