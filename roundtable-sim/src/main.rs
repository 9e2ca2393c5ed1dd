use std::env::var;

use color_eyre::eyre::{eyre, Result, WrapErr};
use roundtable::{
    game::Game,
    rng::GameRng,
    ruleset::Ruleset,
    turn::{AiAction, TurnState},
    DEFAULT_HAND_SIZE,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_PLAYERS: &str = "You,West,North,East";
/// Hard stop for rounds that keep cycling cards without anyone going out.
const MAX_TURNS: usize = 10_000;

struct Config {
    players: Vec<String>,
    seed: u64,
    hand_size: usize,
}

impl Config {
    fn from_env() -> Result<Self> {
        let players = var("ROUNDTABLE_PLAYERS")
            .unwrap_or_else(|_| DEFAULT_PLAYERS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect::<Vec<_>>();

        let seed = match var("ROUNDTABLE_SEED") {
            Ok(seed) => seed
                .parse()
                .wrap_err("`ROUNDTABLE_SEED` must be an unsigned integer")?,
            Err(_) => GameRng::from_entropy().seed(),
        };

        let hand_size = match var("ROUNDTABLE_HAND_SIZE") {
            Ok(size) => size
                .parse()
                .wrap_err("`ROUNDTABLE_HAND_SIZE` must be an unsigned integer")?,
            Err(_) => DEFAULT_HAND_SIZE,
        };

        Ok(Self {
            players,
            seed,
            hand_size,
        })
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let ruleset = Ruleset {
        hand_size: config.hand_size,
        ..Ruleset::default()
    };
    let seat_count = config.players.len();

    info!(seed = config.seed, players = ?config.players, "starting round");

    // Every seat is played by the engine; there is no table to render here.
    let mut game = Game::new(
        config.players,
        seat_count,
        ruleset,
        GameRng::new(config.seed),
    )?;

    let mut turns = 0;
    while game.state() == TurnState::AiTurn && !game.is_stalled() && turns < MAX_TURNS {
        let outcome = game.run_ai_turn()?;
        turns += 1;

        let seat = game.players()[outcome.player].name();
        match (&outcome.action, &outcome.play) {
            (AiAction::Drew, _) => info!(seat, "drew a card"),
            (AiAction::Passed, _) => info!(seat, "passed"),
            (_, Some(play)) => info!(seat, card = %play.card, effect = ?play.effect, "played"),
            (_, None) => {}
        }
    }

    match game.state() {
        TurnState::RoundOver { winner } => {
            let snapshot = game.snapshot();
            info!(turns, "round over");
            println!("{} wins!", snapshot.seats[winner].name);
            for seat in snapshot.seats.iter().filter(|seat| seat.hand_size > 0) {
                println!("{}: {} cards left", seat.name, seat.hand_size);
            }
            Ok(())
        }
        _ if game.is_stalled() => {
            warn!(turns, "nobody can move");
            Err(eyre!("round stalled after {turns} turns"))
        }
        _ => Err(eyre!("no winner after {turns} turns")),
    }
}
