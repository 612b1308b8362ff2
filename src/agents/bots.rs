use crate::bidding::BidDecision;
use crate::cards::{Card, Joker, Rank};
use crate::engine::MatchEngine;
use crate::error::MatchError;
use crate::seat::Seat;
use crate::state::{LastPlay, Phase};
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};
use std::time::{Duration, Instant};

use super::{AgentKind, PlayerAgent};

/// Difficulty tiers: how greedy the bot bids and how sloppy it plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Med",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Hard,
            Difficulty::Medium => Difficulty::Easy,
            Difficulty::Hard => Difficulty::Medium,
        }
    }
}

#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct BotProfile {
    pub difficulty: Difficulty,
    /// Hand points needed before claiming the landlord role.
    pub claim_threshold: u32,
    /// Chance of passing on a beatable play anyway.
    pub sloppiness: f64,
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
    pub rng_seed: Option<u64>,
}

impl BotProfile {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let (claim_threshold, sloppiness) = match difficulty {
            Difficulty::Easy => (4, 0.3),
            Difficulty::Medium => (7, 0.1),
            Difficulty::Hard => (9, 0.0),
        };
        Self {
            difficulty,
            claim_threshold,
            sloppiness,
            min_delay_ms: 0,
            max_delay_ms: 0,
            rng_seed: None,
        }
    }

    /// Set a deterministic RNG seed for reproducible decisions.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.min_delay_ms = delay_ms;
        self.max_delay_ms = delay_ms;
        self
    }
}

impl Default for BotProfile {
    fn default() -> Self {
        Self::for_difficulty(Difficulty::Medium)
    }
}

/// Rough landlord-worthiness: big cards are what win back the floor.
pub fn hand_points(cards: &[Card]) -> u32 {
    cards
        .iter()
        .map(|c| match c {
            Card::Joker(Joker::Big) => 4,
            Card::Joker(Joker::Small) => 3,
            Card::Standard { rank: Rank::Two, .. } => 2,
            Card::Standard { rank: Rank::Ace, .. } => 1,
            Card::Standard { .. } => 0,
        })
        .sum()
}

/// Indices of the weakest card in `cards`, as a one-card lead.
pub fn weakest_single(cards: &[Card]) -> Option<Vec<usize>> {
    cards.iter().enumerate().min_by_key(|(_, c)| c.strength()).map(|(i, _)| vec![i])
}

/// Cheapest same-rank group that outranks `standing`, if `standing` is itself a
/// same-rank group. Anything else is treated as unbeatable.
pub fn cheapest_cover(cards: &[Card], standing: &[Card]) -> Option<Vec<usize>> {
    let first = standing.first()?;
    if standing.iter().any(|c| c.strength() != first.strength()) {
        return None;
    }
    let need = standing.len();
    let mut by_strength: Vec<(u8, Vec<usize>)> = Vec::new();
    for (i, c) in cards.iter().enumerate() {
        let s = c.strength();
        if s <= first.strength() {
            continue;
        }
        match by_strength.iter_mut().find(|(k, _)| *k == s) {
            Some((_, idx)) => idx.push(i),
            None => by_strength.push((s, vec![i])),
        }
    }
    by_strength.sort_by_key(|(s, _)| *s);
    by_strength.into_iter().find(|(_, idx)| idx.len() >= need).map(|(_, mut idx)| {
        idx.truncate(need);
        idx
    })
}

#[derive(Debug)]
struct BotState {
    rng: StdRng,
}

impl BotState {
    fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(v) => StdRng::seed_from_u64(v),
            None => {
                let mut seed = [0u8; 32];
                rand::rng().fill_bytes(&mut seed);
                StdRng::from_seed(seed)
            }
        };
        Self { rng }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum BotMove {
    Bid(BidDecision),
    Play(Vec<usize>),
    Pass,
}

/// Seat-filling bot with a simple greedy policy.
#[derive(Debug)]
pub struct BotAgent {
    profile: BotProfile,
    state: BotState,
    next_action_at: Option<Instant>,
}

impl BotAgent {
    pub fn new(profile: BotProfile) -> Self {
        let state = BotState::new(profile.rng_seed);
        Self { profile, state, next_action_at: None }
    }

    pub fn profile(&self) -> &BotProfile {
        &self.profile
    }

    fn decide(&mut self, engine: &dyn MatchEngine, seat: Seat) -> Option<BotMove> {
        let state = engine.state();
        let cards = state.hand(seat).as_slice();
        match state.phase() {
            Phase::Bidding => {
                let noise = match self.profile.difficulty {
                    Difficulty::Easy => self.state.rng.random_range(0..=3),
                    _ => 0,
                };
                let decision = if hand_points(cards) + noise >= self.profile.claim_threshold {
                    BidDecision::Claim
                } else {
                    BidDecision::Decline
                };
                Some(BotMove::Bid(decision))
            }
            Phase::Playing => match state.last_play() {
                Some(standing) if standing.by_seat != seat => {
                    Some(self.respond(standing, cards, seat, state.landlord()))
                }
                _ => weakest_single(cards).map(BotMove::Play),
            },
            _ => None,
        }
    }

    fn respond(
        &mut self,
        standing: &LastPlay,
        cards: &[Card],
        seat: Seat,
        landlord: Option<Seat>,
    ) -> BotMove {
        let partner_holds_floor = match landlord {
            Some(l) => seat != l && standing.by_seat != l,
            None => false,
        };
        if partner_holds_floor && self.profile.difficulty != Difficulty::Easy {
            return BotMove::Pass;
        }
        if self.state.rng.random::<f64>() < self.profile.sloppiness {
            return BotMove::Pass;
        }
        match cheapest_cover(cards, &standing.cards) {
            Some(idx) => BotMove::Play(idx),
            None => BotMove::Pass,
        }
    }
}

impl PlayerAgent for BotAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Bot
    }

    fn on_turn(&mut self, engine: &mut dyn MatchEngine, seat: Seat) -> Result<bool, MatchError> {
        if !matches!(engine.state().phase(), Phase::Bidding | Phase::Playing) {
            self.next_action_at = None;
            return Ok(false);
        }
        if engine.state().current() != seat {
            return Ok(false);
        }
        let now = Instant::now();
        let delay = choose_delay_ms(&self.profile, &mut self.state);
        if delay > 0 {
            match self.next_action_at {
                None => {
                    self.next_action_at = Some(now + Duration::from_millis(delay));
                    return Ok(false);
                }
                Some(next) if now < next => return Ok(false),
                Some(_) => {}
            }
        }
        self.next_action_at = None;

        let Some(mv) = self.decide(engine, seat) else {
            return Ok(false);
        };
        match mv {
            BotMove::Bid(decision) => engine.submit_bid(seat, decision),
            BotMove::Play(idx) => engine.submit_play(seat, &idx),
            BotMove::Pass => engine.submit_pass(seat),
        }
        .map(|_| true)
    }
}

fn choose_delay_ms(profile: &BotProfile, state: &mut BotState) -> u64 {
    let min = profile.min_delay_ms;
    let max = profile.max_delay_ms.max(min);
    if max == min {
        min
    } else {
        state.rng.random_range(min..=max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    #[test]
    fn points_favor_jokers_and_twos() {
        let cards = parse_cards("BJ SJ 2s 2h As 3c").unwrap();
        assert_eq!(hand_points(&cards), 4 + 3 + 2 + 2 + 1);
    }

    #[test]
    fn weakest_single_picks_the_lowest_strength() {
        let cards = parse_cards("2s 3h Ks").unwrap();
        assert_eq!(weakest_single(&cards), Some(vec![1]));
        assert_eq!(weakest_single(&[]), None);
    }

    #[test]
    fn cover_matches_group_size_and_beats_strength() {
        let cards = parse_cards("4s 9h 9d Kc 2s").unwrap();
        let single = parse_cards("8c").unwrap();
        assert_eq!(cheapest_cover(&cards, &single), Some(vec![1]));
        let pair = parse_cards("8c 8d").unwrap();
        assert_eq!(cheapest_cover(&cards, &pair), Some(vec![1, 2]));
        let high_pair = parse_cards("Jc Jd").unwrap();
        assert_eq!(cheapest_cover(&cards, &high_pair), None);
        let mixed = parse_cards("3c 4c").unwrap();
        assert_eq!(cheapest_cover(&cards, &mixed), None);
    }

    #[test]
    fn two_outranks_ace_when_covering() {
        let cards = parse_cards("2s").unwrap();
        let ace = parse_cards("Ad").unwrap();
        assert_eq!(cheapest_cover(&cards, &ace), Some(vec![0]));
    }
}
