use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::bidding::{BidDecision, BidOutcome, BiddingState};
use crate::cards::Card;
use crate::config::MatchConfig;
use crate::deal::deal;
use crate::deck::{build_deck, shuffle};
use crate::error::MatchError;
use crate::intent::Intent;
use crate::seat::Seat;
use crate::snapshot::{MatchSnapshot, SeatView};
use crate::state::{MatchState, Outcome, Phase};
use crate::timer::{Clock, SystemClock, TimerKind, TimerSlot, TurnTimer};
use crate::turn::{PlayOutcome, TurnState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum HistoryVerb {
    Claim,
    Decline,
    Landlord,
    Play,
    Pass,
    Win,
    Redeal,
}

impl HistoryVerb {
    pub fn label(self) -> &'static str {
        match self {
            HistoryVerb::Claim => "Claim",
            HistoryVerb::Decline => "Decline",
            HistoryVerb::Landlord => "Landlord",
            HistoryVerb::Play => "Play",
            HistoryVerb::Pass => "Pass",
            HistoryVerb::Win => "Win",
            HistoryVerb::Redeal => "Redeal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct HistoryEntry {
    pub seat: Seat,
    pub verb: HistoryVerb,
    pub cards: Vec<Card>,
    /// Entered by the turn timer rather than the player.
    pub timed_out: bool,
}

/// What a timer firing did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum TimerEvent {
    AutoDeclined(Seat),
    AutoPassed(Seat),
    /// The seat holds the floor and cannot pass; its clock starts over.
    Rearmed(Seat),
}

impl TimerEvent {
    pub fn seat(self) -> Seat {
        match self {
            TimerEvent::AutoDeclined(s) | TimerEvent::AutoPassed(s) | TimerEvent::Rearmed(s) => s,
        }
    }

    /// Whether the timer acted for the seat, ending its turn.
    pub fn ended_turn(self) -> bool {
        !matches!(self, TimerEvent::Rearmed(_))
    }
}

/// Single authority for one table: owns the match state, its RNG and its turn timer.
///
/// All intents for a table must be serialized through one controller.
#[derive(Debug)]
pub struct MatchController {
    config: MatchConfig,
    state: MatchState,
    timer: TimerSlot,
    clock: Arc<dyn Clock>,
    rng: ChaCha8Rng,
    history: Vec<HistoryEntry>,
}

impl MatchController {
    pub fn new(config: MatchConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: MatchConfig, clock: Arc<dyn Clock>) -> Self {
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        Self {
            config,
            state: MatchState::default(),
            timer: TimerSlot::default(),
            clock,
            rng: ChaCha8Rng::seed_from_u64(seed),
            history: Vec::new(),
        }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn history_recent_offset(&self, n: usize, offset: usize) -> Vec<HistoryEntry> {
        if n == 0 || self.history.is_empty() {
            return Vec::new();
        }
        let len = self.history.len();
        let offset = offset.min(len.saturating_sub(n));
        let end = len - offset;
        let start = end.saturating_sub(n);
        self.history[start..end].to_vec()
    }

    pub fn armed_timer(&self) -> Option<TurnTimer> {
        self.timer.armed()
    }

    /// Time left on the current turn, if a timer is running.
    pub fn countdown(&self) -> Option<Duration> {
        self.timer.remaining(self.clock.now())
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot::capture(&self.state, self.countdown())
    }

    pub fn view_for(&self, seat: Seat) -> SeatView {
        SeatView::capture(&self.state, seat, self.countdown())
    }

    /// Deal a fresh hand and open bidding at seat 0. Callable in any phase.
    pub fn start_hand(&mut self) {
        self.timer.cancel();
        self.state.reset_for_deal();
        self.history.clear();
        let shuffled = shuffle(build_deck(), &mut self.rng);
        let dealt = match deal(&shuffled) {
            Ok(d) => d,
            Err(err) => {
                error!(%err, "standard deck failed to deal");
                return;
            }
        };
        self.state.install_deal(dealt);
        let bidding = BiddingState::new();
        let first = bidding.seat_on_turn();
        self.state.bidding = Some(bidding);
        self.state.phase = Phase::Bidding;
        self.arm(TimerKind::Bid, first);
        info!(hand = self.state.hand_number, "dealt hand, bidding opens");
    }

    pub fn submit_bid(&mut self, seat: Seat, decision: BidDecision) -> Result<(), MatchError> {
        self.bid(seat, decision, false)
    }

    pub fn submit_play(&mut self, seat: Seat, indices: &[usize]) -> Result<(), MatchError> {
        self.ensure_phase(Phase::Playing, "play")?;
        let state = &mut self.state;
        let Some(turn) = state.turn.as_mut() else {
            return Err(MatchError::IllegalPhase { action: "play", phase: state.phase });
        };
        let outcome = turn.play(&mut state.hands, &mut state.played, seat, indices)?;
        let cards = turn.last_play().map(|lp| lp.cards.clone()).unwrap_or_default();
        debug!(%seat, count = cards.len(), "play accepted");
        self.record(seat, HistoryVerb::Play, cards, false);
        match outcome {
            PlayOutcome::Next(next) => self.arm(TimerKind::Play, next),
            PlayOutcome::Emptied(winner) => self.finish_hand(winner),
        }
        Ok(())
    }

    pub fn submit_pass(&mut self, seat: Seat) -> Result<(), MatchError> {
        self.pass(seat, false)
    }

    /// Deal again after a finished hand. Scores carry over.
    pub fn restart(&mut self) -> Result<(), MatchError> {
        self.ensure_phase(Phase::Ended, "restart")?;
        self.start_hand();
        Ok(())
    }

    /// Route a transport intent to the matching operation.
    pub fn apply(&mut self, seat: Seat, intent: &Intent) -> Result<(), MatchError> {
        match intent {
            Intent::Bid { decision } => self.submit_bid(seat, *decision),
            Intent::Play { card_indices } => self.submit_play(seat, card_indices),
            Intent::Pass => self.submit_pass(seat),
            Intent::Restart => self.restart(),
        }
    }

    /// Fire the turn timer if it has expired.
    ///
    /// The default intent goes through the same validation as a player's. A pass
    /// refused because the seat holds the floor re-arms that seat's clock instead.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        let expired = self.timer.take_expired(self.clock.now())?;
        let seat = expired.seat;
        match expired.kind {
            TimerKind::Bid => match self.bid(seat, BidDecision::Decline, true) {
                Ok(()) => Some(TimerEvent::AutoDeclined(seat)),
                Err(err) => {
                    warn!(%seat, %err, "timed-out decline rejected");
                    None
                }
            },
            TimerKind::Play => match self.pass(seat, true) {
                Ok(()) => Some(TimerEvent::AutoPassed(seat)),
                Err(MatchError::MustPlay { .. }) => {
                    debug!(%seat, "floor holder timed out, re-arming");
                    self.arm(TimerKind::Play, seat);
                    Some(TimerEvent::Rearmed(seat))
                }
                Err(err) => {
                    warn!(%seat, %err, "timed-out pass rejected");
                    None
                }
            },
        }
    }

    fn bid(&mut self, seat: Seat, decision: BidDecision, timed_out: bool) -> Result<(), MatchError> {
        self.ensure_phase(Phase::Bidding, "bid")?;
        let phase = self.state.phase;
        let Some(bidding) = self.state.bidding.as_mut() else {
            return Err(MatchError::IllegalPhase { action: "bid", phase });
        };
        let outcome = bidding.submit(seat, decision)?;
        debug!(%seat, ?decision, timed_out, "bid accepted");
        let verb = match decision {
            BidDecision::Claim => HistoryVerb::Claim,
            BidDecision::Decline => HistoryVerb::Decline,
        };
        self.record(seat, verb, Vec::new(), timed_out);
        match outcome {
            BidOutcome::Next(next) => self.arm(TimerKind::Bid, next),
            BidOutcome::Landlord(landlord) => self.assign_landlord(landlord),
            BidOutcome::Void => {
                info!(hand = self.state.hand_number, "nobody claimed landlord, redealing");
                self.start_hand();
                self.record(Seat::ALL[0], HistoryVerb::Redeal, Vec::new(), false);
            }
        }
        Ok(())
    }

    fn pass(&mut self, seat: Seat, timed_out: bool) -> Result<(), MatchError> {
        self.ensure_phase(Phase::Playing, "pass")?;
        let phase = self.state.phase;
        let Some(turn) = self.state.turn.as_mut() else {
            return Err(MatchError::IllegalPhase { action: "pass", phase });
        };
        let outcome = turn.pass(seat)?;
        debug!(%seat, timed_out, floor_cleared = outcome.floor_cleared, "pass accepted");
        self.record(seat, HistoryVerb::Pass, Vec::new(), timed_out);
        self.arm(TimerKind::Play, outcome.next);
        Ok(())
    }

    fn assign_landlord(&mut self, landlord: Seat) {
        if let Some(reserve) = self.state.reserve {
            self.state.hands[landlord.index()].extend(reserve);
        }
        self.state.landlord = Some(landlord);
        self.state.turn = Some(TurnState::new(landlord));
        self.state.phase = Phase::Playing;
        let reserve = self.state.reserve.map(|r| r.to_vec()).unwrap_or_default();
        self.record(landlord, HistoryVerb::Landlord, reserve, false);
        self.arm(TimerKind::Play, landlord);
        info!(hand = self.state.hand_number, %landlord, "landlord fixed, play begins");
    }

    fn finish_hand(&mut self, winner: Seat) {
        self.timer.cancel();
        let Some(landlord) = self.state.landlord else {
            error!(%winner, "hand emptied without a landlord");
            return;
        };
        let outcome =
            if winner == landlord { Outcome::LandlordWin } else { Outcome::FarmerWin };
        let delta = outcome.score_delta(landlord);
        for (score, d) in self.state.scores.iter_mut().zip(delta) {
            *score += d;
        }
        self.state.result = Some(outcome);
        self.state.winner = Some(winner);
        self.state.phase = Phase::Ended;
        self.record(winner, HistoryVerb::Win, Vec::new(), false);
        info!(
            hand = self.state.hand_number,
            %winner,
            result = outcome.as_str(),
            scores = ?self.state.scores,
            "hand over"
        );
    }

    fn ensure_phase(&self, expected: Phase, action: &'static str) -> Result<(), MatchError> {
        if self.state.phase != expected {
            return Err(MatchError::IllegalPhase { action, phase: self.state.phase });
        }
        Ok(())
    }

    fn arm(&mut self, kind: TimerKind, seat: Seat) {
        let after = match kind {
            TimerKind::Bid => self.config.bid_timeout,
            TimerKind::Play => self.config.play_timeout,
        };
        self.timer.arm(kind, seat, self.clock.now(), after);
    }

    fn record(&mut self, seat: Seat, verb: HistoryVerb, cards: Vec<Card>, timed_out: bool) {
        self.history.push(HistoryEntry { seat, verb, cards, timed_out });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::ManualClock;

    fn seat(i: usize) -> Seat {
        Seat::ALL[i]
    }

    fn mk(clock: Arc<ManualClock>) -> MatchController {
        let mut c = MatchController::with_clock(MatchConfig::default().with_seed(11), clock);
        c.start_hand();
        c
    }

    #[test]
    fn fresh_controller_waits_in_dealing() {
        let c = MatchController::new(MatchConfig::default().with_seed(1));
        assert_eq!(c.phase(), Phase::Dealing);
        assert!(c.armed_timer().is_none());
    }

    #[test]
    fn same_seed_deals_same_hands() {
        let clock = Arc::new(ManualClock::new());
        let a = mk(clock.clone());
        let b = mk(clock);
        for s in Seat::ALL {
            assert_eq!(a.state().hand(s), b.state().hand(s));
        }
    }

    #[test]
    fn rejected_intent_leaves_history_untouched() {
        let clock = Arc::new(ManualClock::new());
        let mut c = mk(clock);
        assert!(c.submit_bid(seat(2), BidDecision::Claim).is_err());
        assert!(c.submit_pass(seat(0)).is_err());
        assert!(c.history().is_empty());
    }

    #[test]
    fn history_pages_from_the_end() {
        let clock = Arc::new(ManualClock::new());
        let mut c = mk(clock);
        c.submit_bid(seat(0), BidDecision::Claim).unwrap();
        c.submit_bid(seat(1), BidDecision::Decline).unwrap();
        c.submit_bid(seat(2), BidDecision::Decline).unwrap();
        assert_eq!(c.history().len(), 4);
        let last_two = c.history_recent_offset(2, 0);
        assert_eq!(last_two[1].verb, HistoryVerb::Landlord);
        assert_eq!(last_two[1].cards.len(), 3);
        let earlier = c.history_recent_offset(2, 2);
        assert_eq!(earlier[0].verb, HistoryVerb::Claim);
    }
}
