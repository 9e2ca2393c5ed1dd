use std::fmt::Debug;

use thiserror::Error;

use crate::card::CardColor;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Card cannot be played on the top card")]
    IllegalMove,
    #[error("Player {0} is not the current player")]
    NotYourTurn(usize),
    #[error("A color has to be chosen for a wild card")]
    ColorRequired,
    #[error("{0} is not a color of this ruleset")]
    InvalidColor(CardColor),
    #[error("No cards left to draw")]
    NoCardsAvailable,
    #[error("Index {0} is out of range")]
    InvalidIndex(usize),
    #[error("The round is already over")]
    GameOver,
    #[error("The current player is human")]
    NotAiTurn,
    #[error("Player already drew a card this turn")]
    AlreadyDrew,
    #[error("Passing is only allowed after drawing a playable card")]
    CannotPass,
    #[error("Not enough players")]
    NotEnoughPlayers,
    #[error("Too many players")]
    TooManyPlayers,
    #[error("{ai_count} AI seats requested for {players} players")]
    InvalidAiCount { ai_count: usize, players: usize },
    #[error("Invalid ruleset: {0}")]
    InvalidRuleset(&'static str),
}

pub type Result<T, E = GameError> = std::result::Result<T, E>;
