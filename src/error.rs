use thiserror::Error;

use crate::action::SeatId;

/// Errors that can occur when manipulating the match state.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("seat index {0} is out of range")]
    InvalidSeat(SeatId),
    #[error("not the specified seat's turn")]
    NotSeatsTurn,
    #[error("seat {0} is controlled by the bot")]
    BotControlled(SeatId),
    #[error("invalid action: {0}")]
    InvalidAction(#[from] InvalidAction),
    #[error("match is already over")]
    MatchOver,
    #[error("no bot seat is configured for this match")]
    NoBotSeat,
    #[error("bot step was scheduled for a previous match")]
    StaleMatch,
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

/// Details of invalid play and draw attempts.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InvalidAction {
    #[error("hand index {0} is out of range")]
    HandIndex(usize),
    #[error("card does not match the current color or value")]
    CardNotPlayable,
}
