use std::collections::HashSet;

use crate::{
    card::CardColor,
    constants::*,
    error::{GameError, Result},
};

/// Knobs of a single table. `Default` is the classic four-color game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ruleset {
    pub colors: Vec<CardColor>,
    pub hand_size: usize,
    pub min_players: usize,
    pub max_players: usize,
    /// Cards drawn for forgetting to call UNO.
    pub uno_penalty: usize,
}

impl Default for Ruleset {
    fn default() -> Self {
        Self {
            colors: vec![
                CardColor::Pink,
                CardColor::Black,
                CardColor::Teal,
                CardColor::Green,
            ],
            hand_size: DEFAULT_HAND_SIZE,
            min_players: DEFAULT_MIN_PLAYERS,
            max_players: DEFAULT_MAX_PLAYERS,
            uno_penalty: DEFAULT_UNO_PENALTY,
        }
    }
}

impl Ruleset {
    pub fn with_colors(colors: Vec<CardColor>) -> Self {
        Self {
            colors,
            ..Self::default()
        }
    }

    pub fn deck_size(&self) -> usize {
        cards_in_deck(self.colors.len())
    }

    pub fn has_color(&self, color: CardColor) -> bool {
        self.colors.contains(&color)
    }

    pub fn validate(&self) -> Result<()> {
        if self.colors.is_empty() {
            return Err(GameError::InvalidRuleset("at least one color is required"));
        }
        let unique = self.colors.iter().collect::<HashSet<_>>();
        if unique.len() != self.colors.len() {
            return Err(GameError::InvalidRuleset("colors must not repeat"));
        }
        if self.min_players < 2 {
            return Err(GameError::InvalidRuleset("a round needs at least two seats"));
        }
        if self.min_players > self.max_players {
            return Err(GameError::InvalidRuleset(
                "minimum player count is above the maximum",
            ));
        }
        Ok(())
    }

    pub(crate) fn check_player_count(&self, count: usize) -> Result<()> {
        if count < self.min_players {
            return Err(GameError::NotEnoughPlayers);
        }
        if count > self.max_players {
            return Err(GameError::TooManyPlayers);
        }
        Ok(())
    }
}
