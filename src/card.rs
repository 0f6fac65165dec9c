use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// One of the four chooseable card colors. Wild cards carry no color until
/// the acting party resolves one.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

/// Chooseable colors in the order the original deck lists them.
pub const COLORS: [Color; 4] = [Color::Red, Color::Green, Color::Yellow, Color::Blue];

/// Face value of a card: a numeric rank, an action tag, or a wild tag.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Value {
    /// Numeric rank between 0 and 9.
    Number(u8),
    DrawTwo,
    Skip,
    Reverse,
    Wild,
    WildDrawFour,
}

pub const DECK_SIZE: usize = 108;
pub const HAND_SIZE: usize = 7;
pub const MIN_SEATS: usize = 1;
pub const MAX_SEATS: usize = 4;
pub const MAX_RANK: u8 = 9;

/// Representation of an UNO card. Cards are value objects; the deck holds
/// duplicates that are equal but not interchangeable references.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// `None` exactly for the two wild values.
    pub color: Option<Color>,
    pub value: Value,
}

impl Card {
    /// A colored (non-wild) card.
    #[inline]
    pub fn colored(color: Color, value: Value) -> Self {
        debug_assert!(!matches!(value, Value::Wild | Value::WildDrawFour));
        if let Value::Number(rank) = value {
            debug_assert!(rank <= MAX_RANK);
        }
        Self {
            color: Some(color),
            value,
        }
    }

    /// A numbered card of the given color.
    #[inline]
    pub fn number(color: Color, rank: u8) -> Self {
        Self::colored(color, Value::Number(rank))
    }

    #[inline]
    pub fn wild() -> Self {
        Self {
            color: None,
            value: Value::Wild,
        }
    }

    #[inline]
    pub fn wild_draw_four() -> Self {
        Self {
            color: None,
            value: Value::WildDrawFour,
        }
    }

    /// Returns true for the two wild cards.
    #[inline]
    pub fn is_wild(&self) -> bool {
        self.color.is_none()
    }

    /// Legality against the current discard constraints: a wild card, a
    /// color match, or a value match. Action tags match across colors by
    /// tag alone, exactly like numeric ranks do.
    #[inline]
    pub fn matches_current(&self, color: Color, value: Value) -> bool {
        self.color.is_none() || self.color == Some(color) || self.value == value
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Color::Red => "Red",
            Color::Green => "Green",
            Color::Yellow => "Yellow",
            Color::Blue => "Blue",
        };
        f.write_str(name)
    }
}

impl FromStr for Color {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" => Ok(Color::Red),
            "green" => Ok(Color::Green),
            "yellow" => Ok(Color::Yellow),
            "blue" => Ok(Color::Blue),
            _ => Err(GameError::InvalidConfiguration(
                "color must be red, green, yellow or blue",
            )),
        }
    }
}

/// Builds the full 108-card UNO deck in deterministic order (unshuffled):
/// per color one zero, two of each non-zero rank and two of each action
/// card, plus four Wild and four Wild Draw Four.
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for color in COLORS {
        deck.push(Card::number(color, 0));
        for rank in 1..=MAX_RANK {
            deck.push(Card::number(color, rank));
            deck.push(Card::number(color, rank));
        }
        for value in [Value::DrawTwo, Value::Skip, Value::Reverse] {
            deck.push(Card::colored(color, value));
            deck.push(Card::colored(color, value));
        }
    }
    for _ in 0..4 {
        deck.push(Card::wild());
        deck.push(Card::wild_draw_four());
    }
    deck
}
