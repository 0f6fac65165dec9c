use rand::RngCore;

use crate::bot::{Bot, most_frequent_color};
use crate::card::{Card, Color, Value};

/// Top tier: plays toward the color it holds most of, so later turns keep
/// more of the hand playable. Picks the first playable card matching the
/// dominant non-wild hand color, falling back to the first playable card.
pub struct HardBot;

impl HardBot {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HardBot {
    fn default() -> Self {
        Self::new()
    }
}

impl Bot for HardBot {
    fn choose_card(
        &self,
        hand: &[Card],
        legal: &[usize],
        _current_color: Color,
        _current_value: Value,
        _rng: &mut dyn RngCore,
    ) -> usize {
        if let Some(dominant) = most_frequent_color(hand) {
            if let Some(&index) = legal
                .iter()
                .find(|&&index| hand[index].color == Some(dominant))
            {
                return index;
            }
        }
        legal[0]
    }
}
