use serde::{Deserialize, Serialize};

use crate::card::Color;

/// Zero-based index of a seat within the match.
pub type SeatId = usize;

/// Action available to a seat during its turn.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Play the card at the given hand index. `chosen_color` resolves a
    /// wild card; a missing choice defaults to Red.
    Play {
        hand_index: usize,
        chosen_color: Option<Color>,
    },
    /// Draw a single card and pass the turn.
    Draw,
}

impl Action {
    /// Returns the hand index if the action is a play.
    pub fn hand_index(&self) -> Option<usize> {
        match self {
            Action::Play { hand_index, .. } => Some(*hand_index),
            Action::Draw => None,
        }
    }
}
