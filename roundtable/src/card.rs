use core::fmt;
use std::fmt::Display;

use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter, EnumString};

use crate::constants::{DRAW_TWO_PENALTY, WILD_DRAW_FOUR_PENALTY};

/// Every color a ruleset can pick from. The default table plays with the
/// first four.
#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    EnumString,
    EnumCountMacro,
    EnumIter,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
)]
pub enum CardColor {
    Pink,
    Black,
    Teal,
    Green,
    Red,
    Blue,
    Yellow,
    Purple,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Face {
    Number(u8),
    Skip,
    Reverse,
    DrawTwo,
    Wild,
    WildDrawFour,
}

impl Face {
    pub fn is_wild(&self) -> bool {
        matches!(self, Face::Wild | Face::WildDrawFour)
    }

    /// Cards the next player has to pick up when this face is played.
    pub fn draw_penalty(&self) -> Option<usize> {
        match self {
            Face::DrawTwo => Some(DRAW_TWO_PENALTY),
            Face::WildDrawFour => Some(WILD_DRAW_FOUR_PENALTY),
            _ => None,
        }
    }

    pub fn description(&self) -> String {
        match self {
            Face::Number(number) => format!("Number card: {number}."),
            Face::Skip => "Skip: next player is skipped.".to_string(),
            Face::Reverse => "Reverse: reverses play direction.".to_string(),
            Face::DrawTwo => "Draw Two: next player draws 2 cards.".to_string(),
            Face::Wild => "Wild: choose any color when played.".to_string(),
            Face::WildDrawFour => {
                "Wild Draw Four: choose color and next player draws 4.".to_string()
            }
        }
    }
}

impl Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Face::Number(number) => write!(f, "{number}"),
            Face::Skip => write!(f, "Skip"),
            Face::Reverse => write!(f, "Reverse"),
            Face::DrawTwo => write!(f, "Draw Two"),
            Face::Wild => write!(f, "Wild"),
            Face::WildDrawFour => write!(f, "Wild Draw Four"),
        }
    }
}

/// A single card. Wild faces carry no color until they are played, at which
/// point the chosen color sticks to the card for matching.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card {
    color: Option<CardColor>,
    face: Face,
}

impl Card {
    pub fn colored(color: CardColor, face: Face) -> Self {
        debug_assert!(!face.is_wild(), "wild faces start without a color");
        Self {
            color: Some(color),
            face,
        }
    }

    pub fn wild() -> Self {
        Self {
            color: None,
            face: Face::Wild,
        }
    }

    pub fn wild_draw_four() -> Self {
        Self {
            color: None,
            face: Face::WildDrawFour,
        }
    }

    pub fn number(color: CardColor, number: u8) -> Self {
        Self::colored(color, Face::Number(number))
    }

    pub fn color(&self) -> Option<CardColor> {
        self.color
    }

    pub fn face(&self) -> Face {
        self.face
    }

    pub fn is_wild(&self) -> bool {
        self.face.is_wild()
    }

    pub(crate) fn assign_color(&mut self, color: CardColor) {
        self.color = Some(color);
    }

    /// A wild as it looks once played with `color` chosen.
    pub fn with_color(mut self, color: CardColor) -> Self {
        debug_assert!(self.is_wild(), "only wild cards take a chosen color");
        self.assign_color(color);
        self
    }

    /// Legality check against the top of the discard pile. Wilds always go.
    pub fn is_playable_on(&self, top: &Card) -> bool {
        if self.is_wild() {
            return true;
        }

        let same_color = self.color.is_some() && self.color == top.color;
        same_color || self.face == top.face
    }

    pub fn description(&self) -> String {
        self.face.description()
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.color {
            Some(color) => write!(f, "{} {}", color, self.face),
            None => write!(f, "{}", self.face),
        }
    }
}
