use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::bot::Bot;
use crate::error::GameError;

pub mod easy;
pub mod hard;
pub mod medium;

pub use easy::EasyBot;
pub use hard::HardBot;
pub use medium::MediumBot;

/// Strategy tier of the bot opponent.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(GameError::InvalidConfiguration(
                "difficulty must be easy, medium or hard",
            )),
        }
    }
}

/// Creates the policy for a difficulty tier. The policies are stateless;
/// randomness comes from the match RNG passed at decision time.
pub fn bot_for(difficulty: Difficulty) -> Box<dyn Bot> {
    match difficulty {
        Difficulty::Easy => Box::new(EasyBot::new()),
        Difficulty::Medium => Box::new(MediumBot::new()),
        Difficulty::Hard => Box::new(HardBot::new()),
    }
}
