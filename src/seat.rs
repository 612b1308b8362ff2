use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::InputError;

/// Number of seats at a table.
pub const SEATS: usize = 3;

/// One of the three fixed player slots. Turn order is always `0 -> 1 -> 2 -> 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct Seat(u8);

impl Seat {
    pub const ALL: [Seat; SEATS] = [Seat(0), Seat(1), Seat(2)];

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn next(self) -> Seat {
        Seat((self.0 + 1) % SEATS as u8)
    }

    /// The two seats other than `self`, in turn order.
    pub const fn others(self) -> [Seat; 2] {
        let a = self.next();
        [a, a.next()]
    }
}

impl TryFrom<usize> for Seat {
    type Error = InputError;

    fn try_from(v: usize) -> Result<Self, Self::Error> {
        if v < SEATS {
            Ok(Seat(v as u8))
        } else {
            Err(InputError::SeatOutOfRange(v))
        }
    }
}

impl From<Seat> for usize {
    fn from(s: Seat) -> usize {
        s.index()
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0 + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_wraps_around_the_table() {
        assert_eq!(Seat::ALL[0].next(), Seat::ALL[1]);
        assert_eq!(Seat::ALL[2].next(), Seat::ALL[0]);
        assert_eq!(Seat::ALL[1].others(), [Seat::ALL[2], Seat::ALL[0]]);
    }

    #[test]
    fn try_from_rejects_fourth_seat() {
        assert_eq!(Seat::try_from(2).unwrap().index(), 2);
        assert_eq!(Seat::try_from(3), Err(InputError::SeatOutOfRange(3)));
    }
}
