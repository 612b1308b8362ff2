use crate::cards::Card;
use crate::deck::DECK_SIZE;
use crate::error::InputError;
use crate::hand::Hand;
use crate::seat::SEATS;

/// Cards held back from the deal and awarded to the landlord.
pub const RESERVE_SIZE: usize = 3;
/// Cards each seat receives from the deal.
pub const HAND_SIZE: usize = (DECK_SIZE - RESERVE_SIZE) / SEATS;

/// Result of splitting a shuffled deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    pub hands: [Hand; SEATS],
    pub reserve: [Card; RESERVE_SIZE],
}

/// Deal a shuffled deck: the first 51 cards go round-robin (seat `i` gets indices
/// `i, i+3, i+6, ...`), the last three become the reserve.
pub fn deal(shuffled: &[Card]) -> Result<Deal, InputError> {
    if shuffled.len() != DECK_SIZE {
        return Err(InputError::DeckSize(shuffled.len()));
    }
    let dealt = DECK_SIZE - RESERVE_SIZE;
    let mut hands: [Vec<Card>; SEATS] = Default::default();
    for (i, &card) in shuffled[..dealt].iter().enumerate() {
        hands[i % SEATS].push(card);
    }
    let reserve = [shuffled[dealt], shuffled[dealt + 1], shuffled[dealt + 2]];
    Ok(Deal { hands: hands.map(Hand::new), reserve })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::build_deck;

    #[test]
    fn round_robin_assignment() {
        let deck = build_deck();
        let d = deal(&deck).unwrap();
        for (seat, hand) in d.hands.iter().enumerate() {
            assert_eq!(hand.len(), HAND_SIZE);
            assert_eq!(hand.get(0), Some(deck[seat]));
            assert_eq!(hand.get(1), Some(deck[seat + 3]));
        }
        assert_eq!(d.reserve, [deck[51], deck[52], deck[53]]);
    }

    #[test]
    fn short_deck_is_rejected() {
        let deck = build_deck();
        assert_eq!(deal(&deck[..53]), Err(InputError::DeckSize(53)));
        assert_eq!(deal(&[]), Err(InputError::DeckSize(0)));
    }
}
