use tracing::debug;

use crate::{
    card::{Card, CardColor, Face},
    constants::*,
    rng::RandomSource,
};

/// Draw pile. The back of the vector is the top of the pile.
#[derive(Debug, Clone)]
pub struct Deck(pub(crate) Vec<Card>);

impl Deck {
    /// Full card set in build order, unshuffled.
    pub fn standard(colors: &[CardColor]) -> Self {
        let mut cards = Vec::with_capacity(cards_in_deck(colors.len()));

        for &color in colors {
            for _ in 0..ZERO_CARDS_PER_COLOR {
                cards.push(Card::number(color, 0));
            }

            let faces = (1..=9)
                .map(Face::Number)
                .chain([Face::Skip, Face::Reverse, Face::DrawTwo]);
            for face in faces {
                for _ in 0..COPIES_PER_COLORED_FACE {
                    cards.push(Card::colored(color, face));
                }
            }
        }

        for _ in 0..WILD_CARDS_IN_DECK {
            cards.push(Card::wild());
        }

        for _ in 0..WILD_DRAW_FOUR_CARDS_IN_DECK {
            cards.push(Card::wild_draw_four());
        }

        Self(cards)
    }

    pub fn new(colors: &[CardColor], rng: &mut impl RandomSource) -> Self {
        let mut deck = Self::standard(colors);
        deck.shuffle(rng);
        deck
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn shuffle(&mut self, rng: &mut impl RandomSource) {
        rng.shuffle(&mut self.0);
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.0.pop()
    }

    /// Loads recycled cards under the current pile. Shuffle afterwards.
    pub fn insert_all(&mut self, cards: impl IntoIterator<Item = Card>) {
        let before = self.0.len();
        let mut recycled = cards.into_iter().collect::<Vec<_>>();
        recycled.append(&mut self.0);
        self.0 = recycled;
        debug!(added = self.0.len() - before, "cards inserted into deck");
    }

    /// Takes the card closest to the top that is not a wild.
    pub(crate) fn draw_first_colored(&mut self) -> Option<Card> {
        self.0
            .iter()
            .rposition(|x| !x.is_wild())
            .map(|pos| self.0.remove(pos))
    }

    pub fn remaining(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.0
    }
}
