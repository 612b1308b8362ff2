//! Agents: pluggable seat controllers (bots, or humans via a front end).
//!
//! `PlayerAgent` acts for one seat when the engine says it is on turn;
//! `AgentTable` maps the three seats to agents and drives whichever one is up.

use crate::engine::MatchEngine;
use crate::error::MatchError;
use crate::intent::Intent;
use crate::seat::{Seat, SEATS};
use crate::state::Phase;
use core::fmt;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AgentKind {
    Human,
    Bot,
}

/// A seat controller that can act for a player when it is their turn.
pub trait PlayerAgent {
    /// Called when `seat` is on turn. Returns whether an intent was accepted.
    fn on_turn(&mut self, engine: &mut dyn MatchEngine, seat: Seat) -> Result<bool, MatchError>;
    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }
    /// Queue an intent picked by a front end; default ignores it.
    fn receive(&mut self, _intent: Intent) -> bool {
        false
    }
    /// Intent queued by a front end and not yet submitted.
    fn pending(&self) -> Option<&Intent> {
        None
    }
    /// Drop a queued intent whose turn has already passed.
    fn discard_pending(&mut self) {}
}

mod bots;

pub use bots::{cheapest_cover, hand_points, weakest_single, BotAgent, BotProfile, Difficulty};

/// Submits whatever intent the user queued, once it is this seat's turn.
#[derive(Debug, Default)]
pub struct HumanAgent {
    pending: Option<Intent>,
}

impl HumanAgent {
    pub fn new() -> Self {
        Self { pending: None }
    }
}

impl PlayerAgent for HumanAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }

    fn receive(&mut self, intent: Intent) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(intent);
        true
    }

    fn pending(&self) -> Option<&Intent> {
        self.pending.as_ref()
    }

    fn discard_pending(&mut self) {
        self.pending = None;
    }

    fn on_turn(&mut self, engine: &mut dyn MatchEngine, seat: Seat) -> Result<bool, MatchError> {
        if !matches!(engine.state().phase(), Phase::Bidding | Phase::Playing) {
            self.pending = None;
            return Ok(false);
        }
        if engine.state().current() != seat {
            return Ok(false);
        }
        let Some(intent) = self.pending.take() else {
            return Ok(false);
        };
        match intent {
            Intent::Bid { decision } => engine.submit_bid(seat, decision),
            Intent::Play { card_indices } => engine.submit_play(seat, &card_indices),
            Intent::Pass => engine.submit_pass(seat),
            Intent::Restart => engine.restart(),
        }
        .map(|_| true)
    }
}

/// One optional agent per seat, plus a table-wide throttle between actions.
pub struct AgentTable {
    seats: [Option<Box<dyn PlayerAgent>>; SEATS],
    min_action_delay: Duration,
    next_action_at: Option<Instant>,
}

impl fmt::Debug for AgentTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags: String = self
            .seats
            .iter()
            .map(|a| match a.as_deref().map(|ag| ag.kind()) {
                Some(AgentKind::Bot) => 'B',
                Some(AgentKind::Human) => 'H',
                None => '-',
            })
            .collect();
        write!(f, "AgentTable({flags})")
    }
}

impl Default for AgentTable {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentTable {
    pub fn new() -> Self {
        Self { seats: [None, None, None], min_action_delay: Duration::ZERO, next_action_at: None }
    }

    /// Assign an agent to a seat (or remove when `None`).
    pub fn set_agent(&mut self, seat: Seat, agent: Option<Box<dyn PlayerAgent>>) {
        self.seats[seat.index()] = agent;
    }

    pub fn agent_kind(&self, seat: Seat) -> Option<AgentKind> {
        self.seats[seat.index()].as_deref().map(|ag| ag.kind())
    }

    /// Send an intent to a seat's agent, if any.
    pub fn receive(&mut self, seat: Seat, intent: Intent) -> bool {
        match self.seats[seat.index()].as_deref_mut() {
            Some(agent) => agent.receive(intent),
            None => false,
        }
    }

    pub fn pending(&self, seat: Seat) -> Option<&Intent> {
        self.seats[seat.index()].as_deref().and_then(|ag| ag.pending())
    }

    /// Forget what a seat had queued, e.g. after its clock ran out.
    pub fn discard_pending(&mut self, seat: Seat) {
        if let Some(agent) = self.seats[seat.index()].as_deref_mut() {
            agent.discard_pending();
        }
    }

    pub fn any_bots(&self) -> bool {
        self.seats.iter().filter_map(|a| a.as_deref()).any(|ag| ag.kind() == AgentKind::Bot)
    }

    /// Minimum delay between any two bot actions at the table.
    pub fn set_min_action_delay_ms(&mut self, delay_ms: u64) {
        self.min_action_delay = Duration::from_millis(delay_ms);
    }

    /// Drive the agent on the seat currently on turn, if any.
    pub fn on_turn(&mut self, engine: &mut dyn MatchEngine) -> Result<bool, MatchError> {
        if !matches!(engine.state().phase(), Phase::Bidding | Phase::Playing) {
            for agent in self.seats.iter_mut().flatten() {
                agent.discard_pending();
            }
            return Ok(false);
        }
        let seat = engine.state().current();
        let Some(agent) = self.seats[seat.index()].as_deref_mut() else {
            return Ok(false);
        };
        let now = Instant::now();
        if agent.kind() == AgentKind::Bot {
            if let Some(next) = self.next_action_at {
                if now < next {
                    return Ok(false);
                }
            }
        }
        let acted = agent.on_turn(engine, seat)?;
        if acted {
            debug!(%seat, "agent acted");
            if self.min_action_delay > Duration::ZERO {
                self.next_action_at = Some(now + self.min_action_delay);
            }
        }
        Ok(acted)
    }

    pub fn clear(&mut self) {
        self.seats = [None, None, None];
        self.next_action_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bidding::BidDecision;
    use crate::config::MatchConfig;
    use crate::game::MatchController;

    fn mk() -> MatchController {
        let mut c = MatchController::new(MatchConfig::default().with_seed(5));
        c.start_hand();
        c
    }

    #[test]
    fn human_waits_for_its_turn_before_submitting() {
        let mut c = mk();
        let mut human = HumanAgent::new();
        assert!(human.receive(Intent::Bid { decision: BidDecision::Claim }));
        assert!(!human.receive(Intent::Pass), "only one pending intent");

        assert!(!human.on_turn(&mut c, Seat::ALL[1]).unwrap());
        assert!(human.pending().is_some());

        assert!(human.on_turn(&mut c, Seat::ALL[0]).unwrap());
        assert_eq!(c.state().bidding().map(|b| b.provisional()), Some(Some(Seat::ALL[0])));
    }

    #[test]
    fn queued_intents_are_dropped_once_the_hand_ends() {
        let mut c = mk();
        let mut table = AgentTable::new();
        table.set_agent(Seat::ALL[1], Some(Box::new(HumanAgent::new())));
        assert!(table.receive(Seat::ALL[1], Intent::Pass));
        assert_eq!(table.pending(Seat::ALL[1]), Some(&Intent::Pass));

        for seat in Seat::ALL {
            let d = if seat == Seat::ALL[0] { BidDecision::Claim } else { BidDecision::Decline };
            c.submit_bid(seat, d).unwrap();
        }
        let all: Vec<usize> = (0..20).collect();
        c.submit_play(Seat::ALL[0], &all).unwrap();
        assert_eq!(c.phase(), Phase::Ended);

        assert!(!table.on_turn(&mut c).unwrap());
        assert!(table.pending(Seat::ALL[1]).is_none());
    }

    #[test]
    fn discard_pending_clears_one_seat() {
        let mut table = AgentTable::new();
        table.set_agent(Seat::ALL[0], Some(Box::new(HumanAgent::new())));
        table.set_agent(Seat::ALL[2], Some(Box::new(BotAgent::new(BotProfile::default()))));
        assert!(table.receive(Seat::ALL[0], Intent::Pass));
        assert!(!table.receive(Seat::ALL[2], Intent::Pass), "bots ignore queued intents");
        table.discard_pending(Seat::ALL[0]);
        assert!(table.pending(Seat::ALL[0]).is_none());
        assert!(table.receive(Seat::ALL[0], Intent::Pass));
    }

    #[test]
    fn table_drives_only_the_seat_on_turn() {
        let mut c = mk();
        let mut table = AgentTable::new();
        table.set_agent(Seat::ALL[1], Some(Box::new(BotAgent::new(BotProfile::default()))));
        assert!(!table.on_turn(&mut c).unwrap(), "seat 0 has no agent");
        assert_eq!(c.state().current(), Seat::ALL[0]);
        assert_eq!(format!("{table:?}"), "AgentTable(-B-)");
    }
}
