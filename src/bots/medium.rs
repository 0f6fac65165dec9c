use rand::RngCore;
use rand::seq::SliceRandom;

use crate::bot::Bot;
use crate::card::{Card, Color, Value};

/// Middle tier: holds wild cards back, sampling uniformly from the playable
/// non-wild cards and falling back to the first playable card (which may be
/// a wild) when nothing else fits.
pub struct MediumBot;

impl MediumBot {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MediumBot {
    fn default() -> Self {
        Self::new()
    }
}

impl Bot for MediumBot {
    fn choose_card(
        &self,
        hand: &[Card],
        legal: &[usize],
        _current_color: Color,
        _current_value: Value,
        rng: &mut dyn RngCore,
    ) -> usize {
        let non_wild: Vec<usize> = legal
            .iter()
            .copied()
            .filter(|&index| !hand[index].is_wild())
            .collect();
        match non_wild.choose(rng) {
            Some(&index) => index,
            None => legal[0],
        }
    }
}
