//! UNO match engine with a turn state machine and three tiers of rule-based bot opponents.

pub mod action;
pub mod bot;
pub mod bots;
pub mod card;
pub mod error;
pub mod game;
pub mod state;
pub mod visualize;

pub use crate::action::{Action, SeatId};
pub use crate::bot::{Bot, most_frequent_color};
pub use crate::bots::{Difficulty, EasyBot, HardBot, MediumBot, bot_for};
pub use crate::card::{COLORS, Card, Color, DECK_SIZE, HAND_SIZE, Value, full_deck};
pub use crate::error::{GameError, InvalidAction};
pub use crate::game::{
    ActionOutcome, DrawOutcome, Game, GameBuilder, GameConfig, PlayOutcome,
};
pub use crate::state::{
    BotSettings, Direction, GameSettings, GameStateView, GameStatus, MatchToken, SeatView,
};
pub use crate::visualize::{describe_draw, describe_outcome, describe_play, render_state};
