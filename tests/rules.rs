use unobot::{
    Card, Color, Difficulty, Direction, GameBuilder, GameError, GameStateView, GameStatus,
    InvalidAction, Value, full_deck,
};

/// Builds an injected deck for the given opening hands, first discard and
/// future draw sequence. Hands are dealt seat 0 first; `draws` lists the
/// cards later draws will produce, in order.
fn rigged_deck(hands: &[&[Card]], first_discard: Card, draws: &[Card]) -> Vec<Card> {
    let mut deck: Vec<Card> = draws.iter().rev().copied().collect();
    deck.push(first_discard);
    for hand in hands.iter().rev() {
        assert_eq!(hand.len(), 7, "opening hands hold seven cards");
        deck.extend(hand.iter().rev());
    }
    deck
}

fn hand_with(prefix: &[Card], filler: Card) -> Vec<Card> {
    let mut hand = prefix.to_vec();
    assert!(hand.len() <= 7);
    hand.resize(7, filler);
    hand
}

fn total_cards(view: &GameStateView) -> usize {
    view.draw_pile_count
        + view.discard_pile_count
        + view.seats.iter().map(|seat| seat.hand_size).sum::<usize>()
}

#[test]
fn opening_deal_two_seats() -> Result<(), GameError> {
    let game = GameBuilder::new(2, false)?.with_deck(full_deck()).build()?;
    let view = game.state_view();
    assert_eq!(view.settings.num_seats, 2);
    assert_eq!(view.settings.hand_size, 7);
    assert!(view.settings.bot.is_none());
    assert_eq!(view.seats.len(), 2);
    assert_eq!(view.seats[0].hand_size, 7);
    assert_eq!(view.seats[1].hand_size, 7);
    assert_eq!(view.discard_pile_count, 1);
    assert_eq!(view.draw_pile_count, 108 - 2 * 7 - 1);
    assert_eq!(view.status, GameStatus::InProgress);
    assert_eq!(view.active_seat, 0);
    assert_eq!(view.direction, Direction::Clockwise);
    assert_eq!(total_cards(&view), 108);
    Ok(())
}

#[test]
fn single_seat_without_bot_is_rejected() {
    let err = GameBuilder::new(1, false).unwrap_err();
    assert!(matches!(err, GameError::InvalidConfiguration(_)));
}

#[test]
fn single_seat_with_bot_gets_two_internal_seats() -> Result<(), GameError> {
    let game = GameBuilder::new(1, true)?
        .with_difficulty(Difficulty::Hard)
        .with_deck(full_deck())
        .build()?;
    let settings = game.settings();
    assert_eq!(settings.num_seats, 2);
    let bot = settings.bot.expect("bot seat configured");
    assert_eq!(bot.seat, 1);
    assert_eq!(bot.difficulty, Difficulty::Hard);
    let view = game.state_view();
    assert!(!view.seats[0].is_bot);
    assert!(view.seats[1].is_bot);
    Ok(())
}

#[test]
fn seat_count_bounds_are_enforced() {
    assert!(matches!(
        GameBuilder::new(0, false).unwrap_err(),
        GameError::InvalidConfiguration(_)
    ));
    assert!(matches!(
        GameBuilder::new(5, false).unwrap_err(),
        GameError::InvalidConfiguration(_)
    ));
    assert!(GameBuilder::new(4, false).is_ok());
}

#[test]
fn rejected_actions_leave_state_untouched() -> Result<(), GameError> {
    let seat0 = hand_with(&[Card::number(Color::Blue, 9)], Card::number(Color::Red, 1));
    let seat1 = hand_with(&[], Card::number(Color::Green, 1));
    let deck = rigged_deck(&[&seat0, &seat1], Card::number(Color::Red, 5), &[]);
    let mut game = GameBuilder::new(2, false)?.with_deck(deck).build()?;

    assert!(matches!(
        game.play(1, 0, None).unwrap_err(),
        GameError::NotSeatsTurn
    ));
    assert!(matches!(
        game.play(7, 0, None).unwrap_err(),
        GameError::InvalidSeat(7)
    ));
    assert!(matches!(
        game.play(0, 0, None).unwrap_err(),
        GameError::InvalidAction(InvalidAction::CardNotPlayable)
    ));
    assert!(matches!(
        game.play(0, 12, None).unwrap_err(),
        GameError::InvalidAction(InvalidAction::HandIndex(12))
    ));

    let view = game.state_view();
    assert_eq!(view.active_seat, 0);
    assert_eq!(view.seats[0].hand_size, 7);
    assert_eq!(view.seats[1].hand_size, 7);
    assert_eq!(view.current_color, Color::Red);
    assert_eq!(view.current_value, Value::Number(5));
    Ok(())
}

#[test]
fn draw_two_forces_draw_and_skips() -> Result<(), GameError> {
    let seat0 = hand_with(
        &[Card::colored(Color::Red, Value::DrawTwo)],
        Card::number(Color::Red, 1),
    );
    let seat1 = hand_with(&[], Card::number(Color::Green, 1));
    let draws = [
        Card::number(Color::Yellow, 3),
        Card::number(Color::Yellow, 4),
    ];
    let deck = rigged_deck(&[&seat0, &seat1], Card::number(Color::Red, 5), &draws);
    let mut game = GameBuilder::new(2, false)?.with_deck(deck).build()?;

    let outcome = game.play(0, 0, None)?;
    assert_eq!(outcome.forced_draw, Some((1, 2)));
    assert!(outcome.skipped_next);
    assert_eq!(outcome.next_seat, 0);
    assert_eq!(outcome.winner, None);

    let view = game.state_view();
    assert_eq!(view.active_seat, 0);
    assert_eq!(view.seats[1].hand_size, 9);
    assert_eq!(view.current_value, Value::DrawTwo);
    assert_eq!(total_cards(&view), 17);
    Ok(())
}

#[test]
fn wild_draw_four_forces_four_and_sets_color() -> Result<(), GameError> {
    let seat0 = hand_with(&[Card::wild_draw_four()], Card::number(Color::Red, 1));
    let seat1 = hand_with(&[], Card::number(Color::Green, 1));
    let draws = [Card::number(Color::Yellow, 1); 4];
    let deck = rigged_deck(&[&seat0, &seat1], Card::number(Color::Red, 5), &draws);
    let mut game = GameBuilder::new(2, false)?.with_deck(deck).build()?;

    let outcome = game.play(0, 0, Some(Color::Green))?;
    assert_eq!(outcome.forced_draw, Some((1, 4)));
    assert_eq!(outcome.chosen_color, Some(Color::Green));
    assert!(outcome.skipped_next);

    let view = game.state_view();
    assert_eq!(view.active_seat, 0);
    assert_eq!(view.seats[1].hand_size, 11);
    assert_eq!(view.current_color, Color::Green);
    assert_eq!(view.current_value, Value::WildDrawFour);
    Ok(())
}

#[test]
fn reverse_with_two_seats_acts_as_skip() -> Result<(), GameError> {
    let seat0 = hand_with(
        &[Card::colored(Color::Red, Value::Reverse)],
        Card::number(Color::Red, 1),
    );
    let seat1 = hand_with(&[], Card::number(Color::Green, 1));
    let deck = rigged_deck(&[&seat0, &seat1], Card::number(Color::Red, 5), &[]);
    let mut game = GameBuilder::new(2, false)?.with_deck(deck).build()?;

    let outcome = game.play(0, 0, None)?;
    assert!(outcome.reversed);
    assert!(outcome.skipped_next);
    assert_eq!(outcome.next_seat, 0);

    let view = game.state_view();
    assert_eq!(view.direction, Direction::CounterClockwise);
    assert_eq!(view.active_seat, 0);
    Ok(())
}

#[test]
fn reverse_with_three_seats_changes_direction_only() -> Result<(), GameError> {
    let seat0 = hand_with(
        &[Card::colored(Color::Red, Value::Reverse)],
        Card::number(Color::Red, 1),
    );
    let seat1 = hand_with(&[], Card::number(Color::Green, 1));
    let seat2 = hand_with(&[Card::number(Color::Red, 9)], Card::number(Color::Green, 2));
    let deck = rigged_deck(&[&seat0, &seat1, &seat2], Card::number(Color::Red, 5), &[]);
    let mut game = GameBuilder::new(3, false)?.with_deck(deck).build()?;

    let outcome = game.play(0, 0, None)?;
    assert!(outcome.reversed);
    assert!(!outcome.skipped_next);
    assert_eq!(game.direction(), Direction::CounterClockwise);
    assert_eq!(game.active_seat(), 2);

    // Play continues counter-clockwise.
    game.play(2, 0, None)?;
    assert_eq!(game.active_seat(), 1);
    Ok(())
}

#[test]
fn skip_advances_two_seats() -> Result<(), GameError> {
    let seat0 = hand_with(
        &[Card::colored(Color::Red, Value::Skip)],
        Card::number(Color::Red, 1),
    );
    let seat1 = hand_with(&[], Card::number(Color::Green, 1));
    let seat2 = hand_with(&[], Card::number(Color::Green, 2));
    let deck = rigged_deck(&[&seat0, &seat1, &seat2], Card::number(Color::Red, 5), &[]);
    let mut game = GameBuilder::new(3, false)?.with_deck(deck).build()?;

    let outcome = game.play(0, 0, None)?;
    assert!(outcome.skipped_next);
    assert_eq!(game.active_seat(), 2);
    assert_eq!(game.direction(), Direction::Clockwise);
    Ok(())
}

#[test]
fn wild_color_choice_applies_and_missing_choice_defaults_to_red() -> Result<(), GameError> {
    let seat0 = hand_with(&[Card::wild(), Card::wild()], Card::number(Color::Red, 1));
    let seat1 = hand_with(&[Card::number(Color::Blue, 9)], Card::number(Color::Green, 1));
    let deck = rigged_deck(&[&seat0, &seat1], Card::number(Color::Red, 5), &[]);
    let mut game = GameBuilder::new(2, false)?.with_deck(deck).build()?;

    let outcome = game.play(0, 0, Some(Color::Blue))?;
    assert_eq!(outcome.chosen_color, Some(Color::Blue));
    assert_eq!(game.current_color(), Color::Blue);
    assert_eq!(game.current_value(), Value::Wild);

    // Seat 1's Blue 9 is now legal purely by the chosen color.
    let outcome = game.play(1, 0, None)?;
    assert_eq!(outcome.chosen_color, None);
    assert_eq!(game.current_color(), Color::Blue);
    assert_eq!(game.current_value(), Value::Number(9));

    // A wild played without a color choice silently falls back to Red.
    let outcome = game.play(0, 0, None)?;
    assert_eq!(outcome.chosen_color, Some(Color::Red));
    assert_eq!(game.current_color(), Color::Red);
    Ok(())
}

#[test]
fn emptying_the_hand_wins_and_ends_the_match() -> Result<(), GameError> {
    let skips = [Card::colored(Color::Red, Value::Skip); 7];
    let seat1 = hand_with(&[], Card::number(Color::Green, 1));
    let deck = rigged_deck(&[&skips, &seat1], Card::number(Color::Red, 5), &[]);
    let mut game = GameBuilder::new(2, false)?.with_deck(deck).build()?;

    for remaining in (1..=6).rev() {
        let outcome = game.play(0, 0, None)?;
        assert_eq!(outcome.winner, None);
        assert_eq!(game.active_seat(), 0);
        assert_eq!(game.state_view().seats[0].hand_size, remaining);
    }
    let outcome = game.play(0, 0, None)?;
    assert_eq!(outcome.winner, Some(0));
    assert_eq!(game.status(), GameStatus::Finished { winner: 0 });
    assert_eq!(game.winner(), Some(0));
    assert!(game.is_finished());

    assert!(matches!(
        game.play(0, 0, None).unwrap_err(),
        GameError::MatchOver
    ));
    assert!(matches!(game.draw(1).unwrap_err(), GameError::MatchOver));
    assert_eq!(game.playable_cards(0)?, Vec::<usize>::new());
    Ok(())
}

#[test]
fn winning_draw_two_still_forces_the_draw() -> Result<(), GameError> {
    let seat0 = hand_with(
        &[
            Card::colored(Color::Red, Value::Skip),
            Card::colored(Color::Red, Value::Skip),
            Card::colored(Color::Red, Value::Skip),
            Card::colored(Color::Red, Value::Skip),
            Card::colored(Color::Red, Value::Skip),
            Card::colored(Color::Red, Value::Skip),
            Card::colored(Color::Red, Value::DrawTwo),
        ],
        Card::number(Color::Red, 1),
    );
    let seat1 = hand_with(&[], Card::number(Color::Green, 1));
    let draws = [
        Card::number(Color::Yellow, 2),
        Card::number(Color::Yellow, 6),
    ];
    let deck = rigged_deck(&[&seat0, &seat1], Card::number(Color::Red, 5), &draws);
    let mut game = GameBuilder::new(2, false)?.with_deck(deck).build()?;

    for _ in 0..6 {
        game.play(0, 0, None)?;
    }
    let outcome = game.play(0, 0, None)?;
    assert_eq!(outcome.winner, Some(0));
    assert_eq!(outcome.forced_draw, Some((1, 2)));
    assert_eq!(game.state_view().seats[1].hand_size, 9);
    assert!(game.is_finished());
    Ok(())
}

#[test]
fn drawing_passes_the_turn_without_a_follow_up_play() -> Result<(), GameError> {
    let seat0 = hand_with(&[], Card::number(Color::Green, 1));
    let seat1 = hand_with(&[], Card::number(Color::Green, 2));
    let draws = [Card::number(Color::Red, 7)];
    let deck = rigged_deck(&[&seat0, &seat1], Card::number(Color::Red, 5), &draws);
    let mut game = GameBuilder::new(2, false)?.with_deck(deck).build()?;

    let outcome = game.draw(0)?;
    assert_eq!(outcome.cards_drawn, 1);
    assert_eq!(outcome.next_seat, 1);
    assert_eq!(game.active_seat(), 1);
    assert_eq!(game.state_view().seats[0].hand_size, 8);

    // The drawn Red 7 would be legal, but the turn has already passed.
    assert!(matches!(
        game.play(0, 7, None).unwrap_err(),
        GameError::NotSeatsTurn
    ));
    Ok(())
}

#[test]
fn exhausted_draw_pile_reshuffles_the_discards() -> Result<(), GameError> {
    let seat0 = hand_with(
        &[
            Card::number(Color::Red, 1),
            Card::number(Color::Red, 2),
            Card::number(Color::Red, 3),
        ],
        Card::number(Color::Red, 4),
    );
    let seat1 = hand_with(&[], Card::number(Color::Green, 1));
    let draws = [
        Card::number(Color::Yellow, 8),
        Card::number(Color::Yellow, 9),
    ];
    let deck = rigged_deck(&[&seat0, &seat1], Card::number(Color::Red, 5), &draws);
    let mut game = GameBuilder::new(2, false)?.with_deck(deck).build()?;

    game.play(0, 0, None)?;
    assert_eq!(game.draw(1)?.cards_drawn, 1);
    game.play(0, 0, None)?;
    assert_eq!(game.draw(1)?.cards_drawn, 1);
    game.play(0, 0, None)?;
    // The draw pile is empty and three cards sit below the top discard;
    // drawing reshuffles them back in.
    let outcome = game.draw(1)?;
    assert_eq!(outcome.cards_drawn, 1);

    let view = game.state_view();
    assert_eq!(view.discard_pile_count, 1);
    assert_eq!(view.draw_pile_count, 2);
    assert_eq!(total_cards(&view), 17);
    Ok(())
}

#[test]
fn drawing_from_an_exhausted_universe_returns_nothing() -> Result<(), GameError> {
    let seat0 = hand_with(&[], Card::number(Color::Green, 1));
    let seat1 = hand_with(&[], Card::number(Color::Green, 2));
    let deck = rigged_deck(&[&seat0, &seat1], Card::number(Color::Red, 5), &[]);
    let mut game = GameBuilder::new(2, false)?.with_deck(deck).build()?;

    let outcome = game.draw(0)?;
    assert_eq!(outcome.cards_drawn, 0);
    assert_eq!(game.active_seat(), 1);
    let view = game.state_view();
    assert_eq!(view.seats[0].hand_size, 7);
    assert_eq!(total_cards(&view), 15);
    Ok(())
}

#[test]
fn card_count_invariant_holds_across_random_play() -> Result<(), GameError> {
    let mut game = GameBuilder::new(2, false)?.with_seed(0xBAD_C0FFE).build()?;
    for _ in 0..500 {
        if game.is_finished() {
            break;
        }
        let seat = game.active_seat();
        let legal = game.playable_cards(seat)?;
        if let Some(&index) = legal.first() {
            let view = game.state_view();
            let cards = view.seats[seat]
                .cards
                .as_ref()
                .expect("active human hand is revealed");
            let chosen = cards[index].is_wild().then_some(Color::Blue);
            game.play(seat, index, chosen)?;
        } else {
            game.draw(seat)?;
        }
        assert_eq!(total_cards(&game.state_view()), 108);
    }
    Ok(())
}

#[test]
fn snapshot_reveals_only_the_active_human_hand() -> Result<(), GameError> {
    let human = hand_with(&[], Card::number(Color::Green, 1));
    let bot = hand_with(&[], Card::number(Color::Blue, 2));
    let draws = [
        Card::number(Color::Yellow, 3),
        Card::number(Color::Yellow, 4),
    ];
    let deck = rigged_deck(&[&human, &bot], Card::number(Color::Red, 5), &draws);
    let mut game = GameBuilder::new(1, true)?.with_deck(deck).build()?;

    let view = game.state_view();
    assert_eq!(view.seats[0].cards.as_ref().map(Vec::len), Some(7));
    assert!(view.seats[1].cards.is_none());
    assert_eq!(view.seats[1].hand_size, 7);

    // Serialized snapshots cannot leak the bot's hand either.
    let json = serde_json::to_value(&view).expect("snapshot serializes");
    assert!(json["seats"][1]["cards"].is_null());
    assert_eq!(json["seats"][1]["hand_size"], 7);

    // Once the human's turn ends nobody's hand is revealed.
    game.draw(0)?;
    let view = game.state_view();
    assert!(view.bot_to_act);
    assert!(view.seats[0].cards.is_none());
    assert!(view.seats[1].cards.is_none());
    Ok(())
}

#[test]
fn bot_seat_rejects_direct_human_actions() -> Result<(), GameError> {
    let human = hand_with(&[], Card::number(Color::Green, 1));
    let bot = hand_with(&[], Card::number(Color::Blue, 2));
    let draws = [Card::number(Color::Yellow, 3)];
    let deck = rigged_deck(&[&human, &bot], Card::number(Color::Red, 5), &draws);
    let mut game = GameBuilder::new(1, true)?.with_deck(deck).build()?;

    game.draw(0)?;
    assert!(game.bot_to_act());
    assert!(matches!(
        game.play(1, 0, None).unwrap_err(),
        GameError::BotControlled(1)
    ));
    assert!(matches!(
        game.draw(1).unwrap_err(),
        GameError::BotControlled(1)
    ));
    Ok(())
}

#[test]
fn stale_match_tokens_are_rejected() -> Result<(), GameError> {
    let mut old_game = GameBuilder::new(1, true)?.with_seed(1).build()?;
    let stale = old_game.token();

    // A reset replaces the match; the pending bot callback still holds the
    // old token and must not touch the new match.
    let mut game = GameBuilder::new(1, true)?.with_seed(2).build()?;
    assert!(matches!(
        game.bot_step(stale).unwrap_err(),
        GameError::StaleMatch
    ));

    // The old match still accepts its own token (it is seat 0's turn, so
    // the bot simply is not up yet).
    assert!(matches!(
        old_game.bot_step(stale).unwrap_err(),
        GameError::NotSeatsTurn
    ));
    Ok(())
}

#[test]
fn multi_seat_matches_never_configure_a_bot() -> Result<(), GameError> {
    // The bot rides along only for single-seat play; requesting it with a
    // full table is a plain hot-seat match.
    let game = GameBuilder::new(3, true)?.with_deck(full_deck()).build()?;
    assert!(game.settings().bot.is_none());
    assert!(!game.bot_to_act());
    assert!(matches!(game.state_view().status, GameStatus::InProgress));
    Ok(())
}
