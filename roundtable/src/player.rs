use crate::{card::Card, deck::Deck};

#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    pub hand: Vec<Card>,
    is_human: bool,
    pub(crate) uno_called: bool,
}

impl Player {
    pub fn new(name: impl Into<String>, is_human: bool) -> Self {
        Self {
            name: name.into(),
            hand: Vec::new(),
            is_human,
            uno_called: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_human(&self) -> bool {
        self.is_human
    }

    pub fn uno_called(&self) -> bool {
        self.uno_called
    }

    pub fn cards_count(&self) -> usize {
        self.hand.len()
    }

    /// Draws up to `count` cards, stopping quietly if the deck runs out.
    pub fn draw_n(&mut self, deck: &mut Deck, count: usize) -> usize {
        let mut drawn = 0;
        while drawn < count {
            let Some(card) = deck.draw() else {
                break;
            };
            self.add_card(card);
            drawn += 1;
        }
        drawn
    }

    pub fn add_card(&mut self, card: Card) {
        self.hand.push(card);
        self.uno_called = false;
    }

    pub fn remove_card(&mut self, index: usize) -> Option<Card> {
        (index < self.hand.len()).then(|| self.hand.remove(index))
    }

    pub fn declare_uno(&mut self) {
        self.uno_called = true;
    }

    /// First card in hand order that can go on `top`.
    pub fn choose_move(&self, top: &Card) -> Option<usize> {
        self.hand.iter().position(|card| card.is_playable_on(top))
    }

    pub fn has_uno(&self) -> bool {
        self.hand.len() == 1
    }

    pub fn is_winner(&self) -> bool {
        self.hand.is_empty()
    }
}
