//! Play and pass turns once a landlord is fixed.
//!
//! Any non-empty selection from the acting seat's hand is accepted; no card
//! combination or "beats the standing play" rule is enforced.

use crate::cards::Card;
use crate::error::MatchError;
use crate::hand::Hand;
use crate::seat::{Seat, SEATS};
use crate::state::LastPlay;

/// Passes from the two other seats return the floor to open.
pub const PASSES_TO_CLEAR: u8 = (SEATS - 1) as u8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Turn moves on to this seat.
    Next(Seat),
    /// The acting seat has no cards left; the hand is over.
    Emptied(Seat),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassOutcome {
    pub next: Seat,
    pub floor_cleared: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnState {
    pub(crate) current: Seat,
    pub(crate) last_play: Option<LastPlay>,
    pub(crate) consecutive_passes: u8,
}

impl TurnState {
    /// The landlord leads onto an open floor.
    pub fn new(landlord: Seat) -> Self {
        Self { current: landlord, last_play: None, consecutive_passes: 0 }
    }

    pub fn current(&self) -> Seat {
        self.current
    }

    pub fn last_play(&self) -> Option<&LastPlay> {
        self.last_play.as_ref()
    }

    pub fn consecutive_passes(&self) -> u8 {
        self.consecutive_passes
    }

    fn ensure_turn(&self, seat: Seat) -> Result<(), MatchError> {
        if seat != self.current {
            return Err(MatchError::InvalidTurn { seat, expected: self.current });
        }
        Ok(())
    }

    /// Whether `seat` may pass right now: there must be a standing play owned by someone else.
    pub fn can_pass(&self, seat: Seat) -> bool {
        matches!(&self.last_play, Some(lp) if lp.by_seat != seat)
    }

    pub fn play(
        &mut self,
        hands: &mut [Hand; SEATS],
        played: &mut [Vec<Card>; SEATS],
        seat: Seat,
        indices: &[usize],
    ) -> Result<PlayOutcome, MatchError> {
        self.ensure_turn(seat)?;
        let hand = &mut hands[seat.index()];
        let cards = hand.take_indices(indices)?;
        played[seat.index()].extend_from_slice(&cards);
        self.last_play = Some(LastPlay { cards, by_seat: seat });
        self.consecutive_passes = 0;
        if hand.is_empty() {
            return Ok(PlayOutcome::Emptied(seat));
        }
        self.current = seat.next();
        Ok(PlayOutcome::Next(self.current))
    }

    pub fn pass(&mut self, seat: Seat) -> Result<PassOutcome, MatchError> {
        self.ensure_turn(seat)?;
        if !self.can_pass(seat) {
            return Err(MatchError::MustPlay { seat });
        }
        self.consecutive_passes += 1;
        let floor_cleared = self.consecutive_passes >= PASSES_TO_CLEAR;
        if floor_cleared {
            self.last_play = None;
            self.consecutive_passes = 0;
        }
        self.current = seat.next();
        Ok(PassOutcome { next: self.current, floor_cleared })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InputError;

    fn seat(i: usize) -> Seat {
        Seat::ALL[i]
    }

    fn table() -> ([Hand; SEATS], [Vec<Card>; SEATS]) {
        let hands = [
            "3s 4s 5s".parse().unwrap(),
            "3h 4h 5h".parse().unwrap(),
            "3d 4d 5d".parse().unwrap(),
        ];
        (hands, Default::default())
    }

    #[test]
    fn landlord_leads_and_cannot_pass_on_open_floor() {
        let mut t = TurnState::new(seat(1));
        assert_eq!(t.current(), seat(1));
        assert_eq!(t.pass(seat(1)), Err(MatchError::MustPlay { seat: seat(1) }));
    }

    #[test]
    fn play_moves_cards_to_history_and_advances() {
        let (mut hands, mut played) = table();
        let mut t = TurnState::new(seat(0));
        let out = t.play(&mut hands, &mut played, seat(0), &[1]).unwrap();
        assert_eq!(out, PlayOutcome::Next(seat(1)));
        assert_eq!(hands[0].len(), 2);
        assert_eq!(played[0], vec!["4s".parse::<Card>().unwrap()]);
        assert_eq!(t.last_play().map(|lp| lp.by_seat), Some(seat(0)));
    }

    #[test]
    fn two_passes_clear_the_floor() {
        let (mut hands, mut played) = table();
        let mut t = TurnState::new(seat(0));
        t.play(&mut hands, &mut played, seat(0), &[0]).unwrap();
        let first = t.pass(seat(1)).unwrap();
        assert!(!first.floor_cleared);
        assert_eq!(t.consecutive_passes(), 1);
        let second = t.pass(seat(2)).unwrap();
        assert!(second.floor_cleared);
        assert_eq!(second.next, seat(0));
        assert!(t.last_play().is_none());
        assert_eq!(t.consecutive_passes(), 0);
    }

    #[test]
    fn play_after_a_pass_resets_the_pass_count() {
        let (mut hands, mut played) = table();
        let mut t = TurnState::new(seat(0));
        t.play(&mut hands, &mut played, seat(0), &[0]).unwrap();
        t.pass(seat(1)).unwrap();
        t.play(&mut hands, &mut played, seat(2), &[0]).unwrap();
        assert_eq!(t.consecutive_passes(), 0);
        assert!(t.can_pass(seat(0)));
    }

    #[test]
    fn out_of_turn_and_bad_indices_are_rejected_without_effect() {
        let (mut hands, mut played) = table();
        let mut t = TurnState::new(seat(0));
        let before = t.clone();
        assert_eq!(
            t.play(&mut hands, &mut played, seat(2), &[0]),
            Err(MatchError::InvalidTurn { seat: seat(2), expected: seat(0) })
        );
        assert_eq!(
            t.play(&mut hands, &mut played, seat(0), &[]),
            Err(MatchError::InvalidInput(InputError::EmptySelection))
        );
        assert_eq!(
            t.play(&mut hands, &mut played, seat(0), &[7]),
            Err(MatchError::InvalidInput(InputError::IndexOutOfRange { index: 7, len: 3 }))
        );
        assert_eq!(t, before);
        assert_eq!(hands[0].len(), 3);
        assert!(played[0].is_empty());
    }

    #[test]
    fn emptying_a_hand_reports_the_winner() {
        let (mut hands, mut played) = table();
        let mut t = TurnState::new(seat(2));
        let out = t.play(&mut hands, &mut played, seat(2), &[0, 1, 2]).unwrap();
        assert_eq!(out, PlayOutcome::Emptied(seat(2)));
    }
}
