use std::fmt::Write;

use crate::card::{Card, Value};
use crate::game::{ActionOutcome, DrawOutcome, PlayOutcome};
use crate::state::{Direction, GameStateView, GameStatus};

pub fn render_state(view: &GameStateView) -> String {
    let mut out = String::new();
    let status = match view.status {
        GameStatus::InProgress => String::from("In progress"),
        GameStatus::Finished { winner } => {
            format!("Finished (winner: {})", seat_label(view, winner))
        }
    };
    let _ = writeln!(out, "Match status: {status}");
    let _ = writeln!(
        out,
        "Discard top: {}  |  color in play: {}",
        format_value(view.current_value),
        view.current_color
    );
    let direction = match view.direction {
        Direction::Clockwise => "clockwise",
        Direction::CounterClockwise => "counter-clockwise",
    };
    let _ = writeln!(
        out,
        "Draw pile: {}  |  discard pile: {}  |  direction: {direction}",
        view.draw_pile_count, view.discard_pile_count
    );
    for seat in &view.seats {
        let marker = if seat.is_active { "  <- active" } else { "" };
        let _ = writeln!(
            out,
            "{} ({} cards){marker}",
            seat_label(view, seat.id),
            seat.hand_size
        );
        if let Some(cards) = &seat.cards {
            let mut entries = Vec::with_capacity(cards.len());
            for (index, card) in cards.iter().enumerate() {
                let playable = matches!(view.status, GameStatus::InProgress)
                    && card.matches_current(view.current_color, view.current_value);
                let mark = if playable { "*" } else { "" };
                entries.push(format!("[{index}] {}{mark}", format_card(*card)));
            }
            let _ = writeln!(out, "  Hand: {}", entries.join("  "));
        }
    }
    out
}

pub fn describe_outcome(view: &GameStateView, outcome: &ActionOutcome) -> String {
    match outcome {
        ActionOutcome::Played(played) => describe_play(view, played),
        ActionOutcome::Drew(drew) => describe_draw(view, drew),
    }
}

pub fn describe_play(view: &GameStateView, outcome: &PlayOutcome) -> String {
    let mut msg = format!(
        "{} played {}.",
        seat_label(view, outcome.seat),
        format_card(outcome.card)
    );
    if let Some(color) = outcome.chosen_color {
        let _ = write!(msg, " Color is now {color}.");
    }
    if outcome.reversed {
        msg.push_str(" Direction reversed.");
    }
    if let Some((target, dealt)) = outcome.forced_draw {
        let _ = write!(msg, " {} draws {dealt}.", seat_label(view, target));
    }
    if outcome.skipped_next && outcome.winner.is_none() {
        msg.push_str(" Next seat skipped.");
    }
    if let Some(winner) = outcome.winner {
        let _ = write!(msg, " {} wins!", seat_label(view, winner));
    }
    msg
}

pub fn describe_draw(view: &GameStateView, outcome: &DrawOutcome) -> String {
    match outcome.cards_drawn {
        1 => format!("{} drew a card.", seat_label(view, outcome.seat)),
        n => format!("{} drew {n} cards.", seat_label(view, outcome.seat)),
    }
}

fn seat_label(view: &GameStateView, seat: usize) -> String {
    match view.seats.get(seat) {
        Some(entry) if entry.is_bot => String::from("Bot"),
        _ => format!("Player {}", seat + 1),
    }
}

fn format_card(card: Card) -> String {
    match card.color {
        Some(color) => format!("{color} {}", format_value(card.value)),
        None => format_value(card.value),
    }
}

fn format_value(value: Value) -> String {
    match value {
        Value::Number(rank) => rank.to_string(),
        Value::DrawTwo => String::from("Draw Two"),
        Value::Skip => String::from("Skip"),
        Value::Reverse => String::from("Reverse"),
        Value::Wild => String::from("Wild"),
        Value::WildDrawFour => String::from("Wild Draw Four"),
    }
}
