pub mod card;
pub(crate) mod constants;
pub mod deck;
pub mod error;
pub mod game;
pub mod player;
pub mod rng;
pub mod ruleset;
pub mod turn;

pub use constants::{
    cards_in_deck, DEFAULT_HAND_SIZE, DEFAULT_MAX_PLAYERS, DEFAULT_MIN_PLAYERS,
    DEFAULT_UNO_PENALTY,
};
