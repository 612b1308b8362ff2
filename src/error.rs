use crate::seat::Seat;
use crate::state::Phase;

/// Malformed intent payloads. Never mutate match state.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputError {
    #[error("no cards selected")]
    EmptySelection,
    #[error("card index {index} out of range for hand of {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("card index {0} selected more than once")]
    DuplicateIndex(usize),
    #[error("deck must hold 54 cards, got {0}")]
    DeckSize(usize),
    #[error("seat {0} does not exist")]
    SeatOutOfRange(usize),
}

/// Rejection of an intent by the match controller.
///
/// Every variant is recoverable: the intent had no effect and the snapshot is unchanged.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MatchError {
    #[error("{seat} acted out of turn; waiting on {expected}")]
    InvalidTurn { seat: Seat, expected: Seat },
    #[error(transparent)]
    InvalidInput(#[from] InputError),
    #[error("{seat} must play: there is no standing play to pass on")]
    MustPlay { seat: Seat },
    #[error("cannot {action} during {phase:?}")]
    IllegalPhase { action: &'static str, phase: Phase },
}
