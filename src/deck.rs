use crate::cards::{Card, Joker, Rank, Suit};
use rand::seq::SliceRandom;
use rand::Rng;

/// Cards in a full Dou Dizhu deck: 52 suited cards plus both jokers.
pub const DECK_SIZE: usize = 54;

/// The 54 cards in canonical order: spades, hearts, diamonds, clubs (each 2..A),
/// then the small joker and the big joker.
///
/// ```
/// use doudizhu_rs::cards::{Card, Joker, Rank, Suit};
/// use doudizhu_rs::deck::build_deck;
///
/// let deck = build_deck();
/// assert_eq!(deck.len(), 54);
/// assert_eq!(deck[0], Card::new(Rank::Two, Suit::Spades));
/// assert_eq!(deck[53], Card::Joker(Joker::Big));
/// ```
pub fn build_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(DECK_SIZE);
    for &s in &Suit::ALL {
        for &r in &Rank::ALL {
            cards.push(Card::new(r, s));
        }
    }
    cards.push(Card::Joker(Joker::Small));
    cards.push(Card::Joker(Joker::Big));
    cards
}

/// Fisher–Yates permutation of `deck` driven by `rng`.
pub fn shuffle<R: Rng + ?Sized>(mut deck: Vec<Card>, rng: &mut R) -> Vec<Card> {
    deck.shuffle(rng);
    deck
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    #[test]
    fn standard_deck_has_54_distinct_cards() {
        let deck = build_deck();
        assert_eq!(deck.len(), DECK_SIZE);
        let unique: HashSet<Card> = deck.iter().copied().collect();
        assert_eq!(unique.len(), DECK_SIZE);
    }

    #[test]
    fn canonical_order_runs_ranks_within_suits() {
        let deck = build_deck();
        assert_eq!(deck[12], Card::new(Rank::Ace, Suit::Spades));
        assert_eq!(deck[13], Card::new(Rank::Two, Suit::Hearts));
        assert_eq!(deck[51], Card::new(Rank::Ace, Suit::Clubs));
        assert_eq!(deck[52], Card::Joker(Joker::Small));
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let a = shuffle(build_deck(), &mut ChaCha8Rng::seed_from_u64(42));
        let b = shuffle(build_deck(), &mut ChaCha8Rng::seed_from_u64(42));
        assert_eq!(a, b);
        assert_ne!(a, build_deck());
        assert_ne!(a, shuffle(build_deck(), &mut ChaCha8Rng::seed_from_u64(43)));
    }
}
