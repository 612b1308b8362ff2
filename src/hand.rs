use crate::cards::{parse_cards, Card, CardParseError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

use crate::error::InputError;

/// Cards held by one seat, in the order they were dealt.
///
/// Play selections address cards by their position in this order.
///
/// ```
/// use doudizhu_rs::hand::Hand;
///
/// let mut hand: Hand = "3s 4h 5d 6c".parse().unwrap();
/// let played = hand.take_indices(&[2, 0]).unwrap();
/// assert_eq!(played[0].to_string(), "5d");
/// assert_eq!(hand.to_string(), "4h 6c");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hand(Vec<Card>);

impl Hand {
    pub fn new(cards: Vec<Card>) -> Self {
        Self(cards)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.0
    }

    pub fn get(&self, idx: usize) -> Option<Card> {
        self.0.get(idx).copied()
    }

    pub fn extend<I: IntoIterator<Item = Card>>(&mut self, cards: I) {
        self.0.extend(cards);
    }

    /// Check a selection without touching the hand.
    pub fn validate_selection(&self, indices: &[usize]) -> Result<(), InputError> {
        if indices.is_empty() {
            return Err(InputError::EmptySelection);
        }
        let mut seen = HashSet::with_capacity(indices.len());
        for &index in indices {
            if index >= self.0.len() {
                return Err(InputError::IndexOutOfRange { index, len: self.0.len() });
            }
            if !seen.insert(index) {
                return Err(InputError::DuplicateIndex(index));
            }
        }
        Ok(())
    }

    /// Remove the selected cards, returning them in selection order.
    ///
    /// The whole selection is validated first; on error the hand is unchanged.
    pub fn take_indices(&mut self, indices: &[usize]) -> Result<Vec<Card>, InputError> {
        self.validate_selection(indices)?;
        let taken: Vec<Card> = indices.iter().map(|&i| self.0[i]).collect();
        let mut idx = 0usize;
        self.0.retain(|_| {
            let keep = !indices.contains(&idx);
            idx += 1;
            keep
        });
        Ok(taken)
    }
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards)
    }
}

impl FromStr for Hand {
    type Err = CardParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_cards(s).map(Hand)
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", parts.join(" "))
    }
}
