use std::error::Error;
use std::io::{self, Write};
use std::process;
use std::str::FromStr;
use std::thread;
use std::time::Duration;

use clap::Parser;

use unobot::{
    Color, Difficulty, Game, GameBuilder, GameStatus, describe_draw, describe_outcome,
    describe_play, render_state,
};

/// Play UNO in the terminal, hot-seat with friends or against the bot.
#[derive(Parser, Debug)]
#[command(name = "play", version, about)]
struct Args {
    /// Number of seats (1-4). A single seat plays against the bot.
    #[arg(long, default_value_t = 2)]
    seats: usize,

    /// Enable the bot opponent (required for single-seat play).
    #[arg(long)]
    bot: bool,

    /// Bot difficulty: easy, medium or hard.
    #[arg(long, default_value_t = Difficulty::Easy)]
    difficulty: Difficulty,

    /// Shuffle seed; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds the bot "thinks" before acting.
    #[arg(long, default_value_t = 900)]
    bot_delay_ms: u64,
}

fn main() {
    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut game: Game = GameBuilder::new(args.seats, args.bot)?
        .with_difficulty(args.difficulty)
        .with_seed(seed)
        .build()?;
    let token = game.token();

    println!("Starting UNO match (seed {seed:#x}).");
    loop {
        let view = game.state_view();
        println!("\n{}", render_state(&view));
        if let GameStatus::Finished { .. } = view.status {
            break;
        }

        if view.bot_to_act {
            thread::sleep(Duration::from_millis(args.bot_delay_ms));
            let outcome = game.bot_step(token)?;
            println!("{}", describe_outcome(&game.state_view(), &outcome));
            continue;
        }

        let seat = view.active_seat;
        match prompt_action(&game, seat)? {
            Command::Play(index, chosen) => match game.play(seat, index, chosen) {
                Ok(outcome) => println!("{}", describe_play(&game.state_view(), &outcome)),
                Err(err) => println!("Rejected: {err}"),
            },
            Command::Draw => match game.draw(seat) {
                Ok(outcome) => println!("{}", describe_draw(&game.state_view(), &outcome)),
                Err(err) => println!("Rejected: {err}"),
            },
            Command::Quit => {
                println!("Exiting match at user's request.");
                return Ok(());
            }
        }
    }
    Ok(())
}

enum Command {
    Play(usize, Option<Color>),
    Draw,
    Quit,
}

fn prompt_action(game: &Game, seat: usize) -> Result<Command, Box<dyn Error>> {
    loop {
        println!("Type 'play <index>' to play a card, 'draw' to draw, 'q' to quit.");
        print!("Player {}> ", seat + 1);
        io::stdout().flush()?;
        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Ok(Command::Quit);
        }
        let trimmed = input.trim();
        if trimmed.eq_ignore_ascii_case("q") || trimmed.eq_ignore_ascii_case("quit") {
            return Ok(Command::Quit);
        }
        if trimmed.eq_ignore_ascii_case("draw") {
            return Ok(Command::Draw);
        }
        let mut parts = trimmed.split_whitespace();
        if parts.next().is_some_and(|word| word.eq_ignore_ascii_case("play")) {
            let Some(index) = parts.next().and_then(|raw| raw.parse::<usize>().ok()) else {
                println!("Invalid input: '{trimmed}'. Expected a hand index.");
                continue;
            };
            let chosen = if wants_color(game, seat, index) {
                Some(prompt_color(parts.next())?)
            } else {
                parts.next().and_then(|raw| Color::from_str(raw).ok())
            };
            return Ok(Command::Play(index, chosen));
        }
        println!("Unrecognized command: '{trimmed}'.");
    }
}

fn wants_color(game: &Game, seat: usize, index: usize) -> bool {
    let view = game.state_view();
    view.seats
        .get(seat)
        .and_then(|entry| entry.cards.as_ref())
        .and_then(|cards| cards.get(index))
        .is_some_and(|card| card.is_wild())
}

/// An invalid or missing color choice falls back to Red, matching the
/// engine's own default.
fn prompt_color(inline: Option<&str>) -> Result<Color, Box<dyn Error>> {
    if let Some(raw) = inline {
        return Ok(Color::from_str(raw).unwrap_or(Color::Red));
    }
    print!("Choose color (red, green, yellow, blue) [red]: ");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(Color::from_str(input.trim()).unwrap_or(Color::Red))
}
