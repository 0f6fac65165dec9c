use rand::RngCore;
use rand::seq::SliceRandom;

use crate::bot::Bot;
use crate::card::{Card, Color, Value};

/// Baseline tier: samples uniformly from the playable hand indices.
pub struct EasyBot;

impl EasyBot {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EasyBot {
    fn default() -> Self {
        Self::new()
    }
}

impl Bot for EasyBot {
    fn choose_card(
        &self,
        _hand: &[Card],
        legal: &[usize],
        _current_color: Color,
        _current_value: Value,
        rng: &mut dyn RngCore,
    ) -> usize {
        legal
            .choose(rng)
            .copied()
            .expect("the engine consults the bot only with a playable card")
    }
}
