use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::action::{Action, SeatId};
use crate::bots::{Difficulty, bot_for};
use crate::card::{COLORS, Card, Color, HAND_SIZE, Value, full_deck};
use crate::error::{GameError, InvalidAction};
use crate::state::{
    BotSettings, Direction, GameSettings, GameStateView, GameStatus, MatchToken, SeatView,
};

const DEFAULT_SEED: u64 = 0xCA2D_CA2D_CA2D_CA2D;

/// Configuration required to bootstrap a match.
#[derive(Clone, Copy, Debug)]
pub struct GameConfig {
    pub requested_seats: usize,
    pub bot_enabled: bool,
    pub difficulty: Difficulty,
    pub seed: u64,
}

impl GameConfig {
    pub fn new(requested_seats: usize, bot_enabled: bool) -> Result<Self, GameError> {
        GameSettings::new(requested_seats, bot_enabled, Difficulty::Easy)?;
        Ok(Self {
            requested_seats,
            bot_enabled,
            difficulty: Difficulty::Easy,
            seed: DEFAULT_SEED,
        })
    }
}

/// Builder that enables deterministic deck injection for tests.
#[derive(Debug)]
pub struct GameBuilder {
    config: GameConfig,
    deck: Option<Vec<Card>>,
}

impl GameBuilder {
    pub fn new(requested_seats: usize, bot_enabled: bool) -> Result<Self, GameError> {
        Ok(Self {
            config: GameConfig::new(requested_seats, bot_enabled)?,
            deck: None,
        })
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.config.difficulty = difficulty;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Supplies an exact deck instead of a shuffled full deck. The last
    /// element is drawn first.
    pub fn with_deck(mut self, deck: Vec<Card>) -> Self {
        self.deck = Some(deck);
        self
    }

    pub fn build(self) -> Result<Game, GameError> {
        Game::from_builder(self)
    }
}

/// Everything that happened when a card was played, for the adapter to
/// narrate and for tests to assert on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayOutcome {
    pub seat: SeatId,
    pub card: Card,
    /// The resolved color when the card was a wild.
    pub chosen_color: Option<Color>,
    pub reversed: bool,
    pub skipped_next: bool,
    /// Seat forced to draw and how many cards it actually received.
    pub forced_draw: Option<(SeatId, usize)>,
    pub winner: Option<SeatId>,
    pub next_seat: SeatId,
}

/// Result of a draw-and-pass turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawOutcome {
    pub seat: SeatId,
    /// Cards actually received; fewer than one only when the whole card
    /// universe sits in hands plus the top discard.
    pub cards_drawn: usize,
    pub next_seat: SeatId,
}

/// Outcome of a dispatched action or bot step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    Played(PlayOutcome),
    Drew(DrawOutcome),
}

struct SeatState {
    hand: Vec<Card>,
}

/// Core UNO match engine: deck and discard piles, seat hands, and the turn
/// state machine.
pub struct Game {
    settings: GameSettings,
    status: GameStatus,
    token: MatchToken,
    active_seat: SeatId,
    direction: Direction,
    seats: Vec<SeatState>,
    draw_pile: Vec<Card>,
    discard_pile: Vec<Card>,
    current_color: Color,
    current_value: Value,
    rng: StdRng,
}

impl Game {
    pub fn builder(requested_seats: usize, bot_enabled: bool) -> Result<GameBuilder, GameError> {
        GameBuilder::new(requested_seats, bot_enabled)
    }

    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        GameBuilder { config, deck: None }.build()
    }

    fn from_builder(builder: GameBuilder) -> Result<Self, GameError> {
        let GameBuilder { config, deck } = builder;
        let settings = GameSettings::new(
            config.requested_seats,
            config.bot_enabled,
            config.difficulty,
        )?;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut deck = if let Some(deck) = deck {
            deck
        } else {
            let mut deck = full_deck();
            deck.shuffle(&mut rng);
            deck
        };

        if deck.len() < settings.num_seats * HAND_SIZE + 1 {
            return Err(GameError::InvalidConfiguration(
                "deck does not contain enough cards to deal opening hands",
            ));
        }

        let mut seats = Vec::with_capacity(settings.num_seats);
        for _ in 0..settings.num_seats {
            let mut hand = Vec::with_capacity(HAND_SIZE);
            for _ in 0..HAND_SIZE {
                hand.push(deck.pop().ok_or(GameError::InvalidConfiguration(
                    "deck exhausted while dealing opening hands",
                ))?);
            }
            seats.push(SeatState { hand });
        }

        let first = deck.pop().ok_or(GameError::InvalidConfiguration(
            "deck exhausted before flipping the first discard",
        ))?;
        // The first discard applies no effects; a wild resolves its color
        // by a uniform random choice.
        let current_color = match first.color {
            Some(color) => color,
            None => COLORS[rng.gen_range(0..COLORS.len())],
        };

        Ok(Game {
            settings,
            status: GameStatus::InProgress,
            token: MatchToken::fresh(),
            active_seat: 0,
            direction: Direction::Clockwise,
            seats,
            draw_pile: deck,
            discard_pile: vec![first],
            current_color,
            current_value: first.value,
            rng,
        })
    }

    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn token(&self) -> MatchToken {
        self.token
    }

    pub fn active_seat(&self) -> SeatId {
        self.active_seat
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn current_color(&self) -> Color {
        self.current_color
    }

    pub fn current_value(&self) -> Value {
        self.current_value
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.status, GameStatus::Finished { .. })
    }

    pub fn winner(&self) -> Option<SeatId> {
        match self.status {
            GameStatus::Finished { winner } => Some(winner),
            GameStatus::InProgress => None,
        }
    }

    /// Whether the scheduling hook should fire: the match is running and
    /// the active seat is bot-controlled.
    pub fn bot_to_act(&self) -> bool {
        !self.is_finished() && self.settings.is_bot_seat(self.active_seat)
    }

    /// Render snapshot. Hand contents appear only for the active human
    /// seat; the bot's and inactive seats' hands are counts, so a
    /// serialized snapshot cannot leak hidden cards.
    pub fn state_view(&self) -> GameStateView {
        let seats = self
            .seats
            .iter()
            .enumerate()
            .map(|(id, seat)| {
                let is_bot = self.settings.is_bot_seat(id);
                let is_active = id == self.active_seat;
                SeatView {
                    id,
                    hand_size: seat.hand.len(),
                    cards: (is_active && !is_bot).then(|| seat.hand.clone()),
                    is_bot,
                    is_active,
                }
            })
            .collect();
        GameStateView {
            settings: self.settings,
            status: self.status,
            token: self.token,
            active_seat: self.active_seat,
            direction: self.direction,
            current_color: self.current_color,
            current_value: self.current_value,
            draw_pile_count: self.draw_pile.len(),
            discard_pile_count: self.discard_pile.len(),
            bot_to_act: self.bot_to_act(),
            seats,
        }
    }

    /// Playable hand indices for the active seat. Empty once the match is
    /// finished.
    pub fn playable_cards(&self, seat: SeatId) -> Result<Vec<usize>, GameError> {
        if seat >= self.seats.len() {
            return Err(GameError::InvalidSeat(seat));
        }
        if self.is_finished() {
            return Ok(Vec::new());
        }
        if seat != self.active_seat {
            return Err(GameError::NotSeatsTurn);
        }
        Ok(self.playable_indices(seat))
    }

    /// Dispatches a seat's action. Rejections leave the state untouched.
    pub fn apply_action(
        &mut self,
        seat: SeatId,
        action: Action,
    ) -> Result<ActionOutcome, GameError> {
        match action {
            Action::Play {
                hand_index,
                chosen_color,
            } => Ok(ActionOutcome::Played(self.play(
                seat,
                hand_index,
                chosen_color,
            )?)),
            Action::Draw => Ok(ActionOutcome::Drew(self.draw(seat)?)),
        }
    }

    /// Plays the card at `hand_index` for the active human seat.
    pub fn play(
        &mut self,
        seat: SeatId,
        hand_index: usize,
        chosen_color: Option<Color>,
    ) -> Result<PlayOutcome, GameError> {
        self.guard_human(seat)?;
        self.play_card(seat, hand_index, chosen_color)
    }

    /// Draws one card for the active human seat and passes the turn. The
    /// drawn card is never played in the same turn, even when it is legal.
    pub fn draw(&mut self, seat: SeatId) -> Result<DrawOutcome, GameError> {
        self.guard_human(seat)?;
        Ok(self.draw_one(seat))
    }

    /// Runs the bot's turn. `token` must belong to this match so a stale
    /// scheduled callback from an abandoned match cannot act here.
    pub fn bot_step(&mut self, token: MatchToken) -> Result<ActionOutcome, GameError> {
        if token != self.token {
            return Err(GameError::StaleMatch);
        }
        let Some(BotSettings { seat, difficulty }) = self.settings.bot else {
            return Err(GameError::NoBotSeat);
        };
        self.guard_turn(seat)?;

        let legal = self.playable_indices(seat);
        if legal.is_empty() {
            // After drawing the bot's turn ends; the drawn card stays in
            // hand even when it would have been legal.
            return Ok(ActionOutcome::Drew(self.draw_one(seat)));
        }

        let policy = bot_for(difficulty);
        let hand = self.seats[seat].hand.clone();
        let picked = policy.choose_card(
            &hand,
            &legal,
            self.current_color,
            self.current_value,
            &mut self.rng,
        );
        let hand_index = if legal.contains(&picked) { picked } else { legal[0] };
        let chosen_color = hand[hand_index].is_wild().then(|| {
            let mut remaining = hand.clone();
            remaining.remove(hand_index);
            policy.choose_color(&remaining, self.current_color)
        });
        Ok(ActionOutcome::Played(self.play_card(
            seat,
            hand_index,
            chosen_color,
        )?))
    }

    fn guard_human(&self, seat: SeatId) -> Result<(), GameError> {
        self.guard_turn(seat)?;
        if self.settings.is_bot_seat(seat) {
            return Err(GameError::BotControlled(seat));
        }
        Ok(())
    }

    fn guard_turn(&self, seat: SeatId) -> Result<(), GameError> {
        if self.is_finished() {
            return Err(GameError::MatchOver);
        }
        if seat >= self.seats.len() {
            return Err(GameError::InvalidSeat(seat));
        }
        if seat != self.active_seat {
            return Err(GameError::NotSeatsTurn);
        }
        Ok(())
    }

    fn playable_indices(&self, seat: SeatId) -> Vec<usize> {
        self.seats[seat]
            .hand
            .iter()
            .enumerate()
            .filter(|(_, card)| card.matches_current(self.current_color, self.current_value))
            .map(|(index, _)| index)
            .collect()
    }

    fn play_card(
        &mut self,
        seat: SeatId,
        hand_index: usize,
        chosen_color: Option<Color>,
    ) -> Result<PlayOutcome, GameError> {
        if hand_index >= self.seats[seat].hand.len() {
            return Err(InvalidAction::HandIndex(hand_index).into());
        }
        let card = self.seats[seat].hand[hand_index];
        if !card.matches_current(self.current_color, self.current_value) {
            return Err(InvalidAction::CardNotPlayable.into());
        }

        self.seats[seat].hand.remove(hand_index);
        self.discard_pile.push(card);

        // A missing color choice for a wild silently defaults to Red.
        let resolved = if card.is_wild() {
            let color = chosen_color.unwrap_or(Color::Red);
            self.current_color = color;
            Some(color)
        } else {
            if let Some(color) = card.color {
                self.current_color = color;
            }
            None
        };
        self.current_value = card.value;

        let mut skipped_next = false;
        let mut reversed = false;
        let mut forced_draw = None;
        match card.value {
            Value::Reverse => {
                self.direction = self.direction.flipped();
                reversed = true;
                // With two seats a reverse must still deny the opponent a
                // turn, so it doubles as a skip.
                if self.seats.len() == 2 {
                    skipped_next = true;
                }
            }
            Value::Skip => skipped_next = true,
            Value::DrawTwo => {
                let target = self.seat_after(seat, 1);
                let dealt = self.force_draw(target, 2);
                forced_draw = Some((target, dealt));
                skipped_next = true;
            }
            Value::WildDrawFour => {
                let target = self.seat_after(seat, 1);
                let dealt = self.force_draw(target, 4);
                forced_draw = Some((target, dealt));
                skipped_next = true;
            }
            Value::Number(_) | Value::Wild => {}
        }

        // Forced draws land before the win check, so a winning Draw Two
        // still punishes the opponent.
        if self.seats[seat].hand.is_empty() {
            self.status = GameStatus::Finished { winner: seat };
            return Ok(PlayOutcome {
                seat,
                card,
                chosen_color: resolved,
                reversed,
                skipped_next,
                forced_draw,
                winner: Some(seat),
                next_seat: seat,
            });
        }

        let hops = if skipped_next { 2 } else { 1 };
        self.active_seat = self.seat_after(seat, hops);
        Ok(PlayOutcome {
            seat,
            card,
            chosen_color: resolved,
            reversed,
            skipped_next,
            forced_draw,
            winner: None,
            next_seat: self.active_seat,
        })
    }

    fn draw_one(&mut self, seat: SeatId) -> DrawOutcome {
        let cards_drawn = self.force_draw(seat, 1);
        self.active_seat = self.seat_after(seat, 1);
        DrawOutcome {
            seat,
            cards_drawn,
            next_seat: self.active_seat,
        }
    }

    fn seat_after(&self, seat: SeatId, hops: isize) -> SeatId {
        let len = self.seats.len() as isize;
        (seat as isize + self.direction.step() * hops).rem_euclid(len) as usize
    }

    fn force_draw(&mut self, seat: SeatId, count: usize) -> usize {
        let cards = self.draw_from_pile(count);
        let dealt = cards.len();
        self.seats[seat].hand.extend(cards);
        dealt
    }

    /// Removes up to `count` cards from the draw pile, rebuilding it from
    /// the discard pile (minus the top card) whenever it runs dry. Returns
    /// fewer cards only when the combined piles cannot cover the request.
    fn draw_from_pile(&mut self, count: usize) -> Vec<Card> {
        let mut drawn = Vec::with_capacity(count);
        for _ in 0..count {
            if self.draw_pile.is_empty() {
                self.rebuild_draw_pile();
            }
            match self.draw_pile.pop() {
                Some(card) => drawn.push(card),
                None => break,
            }
        }
        drawn
    }

    fn rebuild_draw_pile(&mut self) {
        if self.discard_pile.len() <= 1 {
            return;
        }
        let Some(top) = self.discard_pile.pop() else {
            return;
        };
        self.draw_pile.append(&mut self.discard_pile);
        self.draw_pile.shuffle(&mut self.rng);
        self.discard_pile.push(top);
    }
}
