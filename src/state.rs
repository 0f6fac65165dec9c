use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::action::SeatId;
use crate::bots::Difficulty;
use crate::card::{Card, Color, HAND_SIZE, MAX_SEATS, MIN_SEATS, Value};
use crate::error::GameError;

/// Bot placement for a match, fixed at setup.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BotSettings {
    pub seat: SeatId,
    pub difficulty: Difficulty,
}

/// Global constants for a running match.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSettings {
    pub num_seats: usize,
    pub hand_size: usize,
    pub bot: Option<BotSettings>,
}

impl GameSettings {
    /// Validates the requested configuration. A single requested seat plays
    /// against the bot and yields two internal seats with the bot at seat 1;
    /// multi-seat matches are hot-seat human games.
    pub fn new(
        requested_seats: usize,
        bot_enabled: bool,
        difficulty: Difficulty,
    ) -> Result<Self, GameError> {
        if !(MIN_SEATS..=MAX_SEATS).contains(&requested_seats) {
            return Err(GameError::InvalidConfiguration(
                "seats must be between 1 and 4",
            ));
        }
        if requested_seats == 1 && !bot_enabled {
            return Err(GameError::InvalidConfiguration(
                "single-seat play requires the bot opponent",
            ));
        }
        let bot = (requested_seats == 1 && bot_enabled).then_some(BotSettings {
            seat: 1,
            difficulty,
        });
        Ok(Self {
            num_seats: if bot.is_some() { 2 } else { requested_seats },
            hand_size: HAND_SIZE,
            bot,
        })
    }

    /// Returns true when the given seat is bot-controlled.
    #[inline]
    pub fn is_bot_seat(&self, seat: SeatId) -> bool {
        self.bot.is_some_and(|bot| bot.seat == seat)
    }
}

/// Status of the entire match.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Finished { winner: SeatId },
}

/// Direction of play around the table.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }

    /// Seat offset per turn in this direction.
    #[inline]
    pub fn step(self) -> isize {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }
}

static NEXT_MATCH_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Identifies one match instance. Scheduled bot callbacks carry the token
/// they were created for, so a callback outliving its match is rejected
/// instead of acting on a newer match's state.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct MatchToken(u64);

impl MatchToken {
    pub(crate) fn fresh() -> Self {
        Self(NEXT_MATCH_TOKEN.fetch_add(1, Ordering::Relaxed))
    }
}

/// Per-seat portion of the render snapshot. `cards` is populated only for
/// the active human seat; every other hand is exposed as a count.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatView {
    pub id: SeatId,
    pub hand_size: usize,
    pub cards: Option<Vec<Card>>,
    pub is_bot: bool,
    pub is_active: bool,
}

/// Immutable match snapshot handed to the render/input adapter after every
/// state change. The top discard is described by `current_color` and
/// `current_value` (a resolved wild reports its chosen color).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameStateView {
    pub settings: GameSettings,
    pub status: GameStatus,
    pub token: MatchToken,
    pub active_seat: SeatId,
    pub direction: Direction,
    pub current_color: Color,
    pub current_value: Value,
    pub draw_pile_count: usize,
    pub discard_pile_count: usize,
    pub bot_to_act: bool,
    pub seats: Vec<SeatView>,
}
