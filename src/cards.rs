use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Suited card ranks in deck order, Two through Ace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Rank {
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    pub const fn value(self) -> u8 {
        self as u8
    }

    pub const fn label(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }

    /// Play strength: Three is weakest, Ace beats King, Two beats Ace.
    pub const fn strength(self) -> u8 {
        match self {
            Rank::Two => 15,
            other => other as u8,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RankParseError {
    #[error("invalid rank: '{0}'")]
    Invalid(String),
}

impl FromStr for Rank {
    type Err = RankParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let r = match upper.as_str() {
            "2" => Rank::Two,
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "10" | "T" => Rank::Ten,
            "J" | "JACK" => Rank::Jack,
            "Q" | "QUEEN" => Rank::Queen,
            "K" | "KING" => Rank::King,
            "A" | "ACE" => Rank::Ace,
            _ => return Err(RankParseError::Invalid(s.to_string())),
        };
        Ok(r)
    }
}

/// The four standard suits, listed in deck-building order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    pub const fn to_char(self) -> char {
        match self {
            Suit::Spades => 's',
            Suit::Hearts => 'h',
            Suit::Diamonds => 'd',
            Suit::Clubs => 'c',
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SuitParseError {
    #[error("invalid suit: '{0}'")]
    Invalid(String),
}

impl FromStr for Suit {
    type Err = SuitParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let mut chars = t.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Suit::try_from(c);
        }
        match t.to_ascii_lowercase().as_str() {
            "spades" => Ok(Suit::Spades),
            "hearts" => Ok(Suit::Hearts),
            "diamonds" => Ok(Suit::Diamonds),
            "clubs" => Ok(Suit::Clubs),
            _ => Err(SuitParseError::Invalid(s.to_string())),
        }
    }
}

impl TryFrom<char> for Suit {
    type Error = SuitParseError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_lowercase() {
            's' => Ok(Suit::Spades),
            'h' => Ok(Suit::Hearts),
            'd' => Ok(Suit::Diamonds),
            'c' => Ok(Suit::Clubs),
            _ => Err(SuitParseError::Invalid(c.to_string())),
        }
    }
}

/// The two jokers. They are distinct cards, not interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Joker {
    Small,
    Big,
}

impl Joker {
    pub const fn label(self) -> &'static str {
        match self {
            Joker::Small => "small",
            Joker::Big => "big",
        }
    }
}

/// Suit as reported on the wire, where jokers carry their own pseudo-suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardSuit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
    Joker,
}

impl From<Suit> for CardSuit {
    fn from(s: Suit) -> Self {
        match s {
            Suit::Spades => CardSuit::Spades,
            Suit::Hearts => CardSuit::Hearts,
            Suit::Diamonds => CardSuit::Diamonds,
            Suit::Clubs => CardSuit::Clubs,
        }
    }
}

/// A playing card. Suited cards pair a [`Rank`] with a [`Suit`]; the jokers stand alone.
///
/// ```
/// use doudizhu_rs::cards::{Card, Joker, Rank, Suit};
///
/// let card = Card::new(Rank::Ace, Suit::Spades);
/// assert_eq!(card.to_string(), "As");
/// assert_eq!(Card::Joker(Joker::Big).to_string(), "BJ");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WireCard", into = "WireCard")]
pub enum Card {
    Standard { rank: Rank, suit: Suit },
    Joker(Joker),
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Card::Standard { rank, suit }
    }

    pub const fn rank(self) -> Option<Rank> {
        match self {
            Card::Standard { rank, .. } => Some(rank),
            Card::Joker(_) => None,
        }
    }

    pub const fn suit(self) -> CardSuit {
        match self {
            Card::Standard { suit, .. } => match suit {
                Suit::Spades => CardSuit::Spades,
                Suit::Hearts => CardSuit::Hearts,
                Suit::Diamonds => CardSuit::Diamonds,
                Suit::Clubs => CardSuit::Clubs,
            },
            Card::Joker(_) => CardSuit::Joker,
        }
    }

    pub const fn is_joker(self) -> bool {
        matches!(self, Card::Joker(_))
    }

    /// Ordering used when players compare cards: 3 < … < A < 2 < small joker < big joker.
    /// The engine never consults it.
    pub const fn strength(self) -> u8 {
        match self {
            Card::Standard { rank, .. } => rank.strength(),
            Card::Joker(Joker::Small) => 16,
            Card::Joker(Joker::Big) => 17,
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Standard { rank, suit } => write!(f, "{rank}{suit}"),
            Card::Joker(Joker::Small) => f.write_str("SJ"),
            Card::Joker(Joker::Big) => f.write_str("BJ"),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardParseError {
    #[error("invalid card: '{0}'")]
    Invalid(String),
    #[error(transparent)]
    Rank(#[from] RankParseError),
    #[error(transparent)]
    Suit(#[from] SuitParseError),
}

impl FromStr for Card {
    type Err = CardParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        match t.to_ascii_uppercase().as_str() {
            "SJ" => return Ok(Card::Joker(Joker::Small)),
            "BJ" => return Ok(Card::Joker(Joker::Big)),
            _ => {}
        }
        let Some(suit_ch) = t.chars().last() else {
            return Err(CardParseError::Invalid(s.to_string()));
        };
        if t.len() < 2 || !suit_ch.is_ascii() {
            return Err(CardParseError::Invalid(s.to_string()));
        }
        let rank = Rank::from_str(&t[..t.len() - 1])?;
        let suit = Suit::try_from(suit_ch)?;
        Ok(Card::new(rank, suit))
    }
}

/// Parse multiple cards separated by whitespace or commas.
///
/// ```
/// use doudizhu_rs::cards::{parse_cards, Card, Joker, Rank, Suit};
///
/// let cards = parse_cards("As, SJ 10c").unwrap();
/// assert_eq!(cards[0], Card::new(Rank::Ace, Suit::Spades));
/// assert_eq!(cards[1], Card::Joker(Joker::Small));
/// assert_eq!(cards[2], Card::new(Rank::Ten, Suit::Clubs));
/// ```
pub fn parse_cards(input: &str) -> Result<Vec<Card>, CardParseError> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(Card::from_str)
        .collect()
}

#[derive(Serialize, Deserialize)]
struct WireCard {
    suit: CardSuit,
    rank: String,
}

impl From<Card> for WireCard {
    fn from(card: Card) -> Self {
        let rank = match card {
            Card::Standard { rank, .. } => rank.label().to_string(),
            Card::Joker(j) => j.label().to_string(),
        };
        WireCard { suit: card.suit(), rank }
    }
}

impl TryFrom<WireCard> for Card {
    type Error = CardParseError;

    fn try_from(w: WireCard) -> Result<Self, Self::Error> {
        let suit = match w.suit {
            CardSuit::Joker => {
                return match w.rank.as_str() {
                    "small" => Ok(Card::Joker(Joker::Small)),
                    "big" => Ok(Card::Joker(Joker::Big)),
                    other => Err(CardParseError::Invalid(format!("joker {other}"))),
                };
            }
            CardSuit::Spades => Suit::Spades,
            CardSuit::Hearts => Suit::Hearts,
            CardSuit::Diamonds => Suit::Diamonds,
            CardSuit::Clubs => Suit::Clubs,
        };
        Ok(Card::new(Rank::from_str(&w.rank)?, suit))
    }
}
