use rand::RngCore;

use crate::card::{COLORS, Card, Color, Value};

/// Interface for the bot decision policies.
///
/// The engine consults `choose_card` only when at least one hand index is
/// playable; the no-legal-card case (draw one and pass) is handled by the
/// turn controller before any policy runs.
pub trait Bot {
    /// Picks the hand index to play. `legal` holds the playable indices
    /// into `hand`, in hand order, and is never empty.
    fn choose_card(
        &self,
        hand: &[Card],
        legal: &[usize],
        current_color: Color,
        current_value: Value,
        rng: &mut dyn RngCore,
    ) -> usize;

    /// Resolves the color for a wild card the policy just played, given the
    /// remaining hand. Never prompts; defaults to the dominant color of the
    /// remaining hand, falling back to the color already in play.
    fn choose_color(&self, remaining_hand: &[Card], current_color: Color) -> Color {
        most_frequent_color(remaining_hand).unwrap_or(current_color)
    }
}

/// The most frequent non-wild color in the hand, if any. Ties resolve to
/// the earliest color in `COLORS` order.
pub fn most_frequent_color(hand: &[Card]) -> Option<Color> {
    let mut counts = [0usize; COLORS.len()];
    for card in hand {
        if let Some(color) = card.color {
            counts[color as usize] += 1;
        }
    }
    let mut best = None;
    let mut best_count = 0;
    for (color, count) in COLORS.into_iter().zip(counts) {
        if count > best_count {
            best = Some(color);
            best_count = count;
        }
    }
    best
}
