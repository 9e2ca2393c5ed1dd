use crate::card::{Card, CardColor};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    pub fn step(&self) -> isize {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }

    pub fn reversed(&self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnState {
    AwaitingHumanAction,
    AiTurn,
    RoundOver { winner: usize },
}

/// What the played card did to the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CardEffect {
    Neutral,
    Skip { skipped: usize },
    Reverse,
    Draw { victim: usize, drawn: usize },
    Wild(CardColor),
    WildDraw {
        color: CardColor,
        victim: usize,
        drawn: usize,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayOutcome {
    pub player: usize,
    /// The card as it sits on the discard pile, wild color included.
    pub card: Card,
    pub effect: CardEffect,
    /// The AI seat announced UNO with this play.
    pub uno_declared: bool,
    /// A human reached one card without calling UNO; the penalty is pending.
    pub missed_uno: bool,
    pub winner: Option<usize>,
}

impl PlayOutcome {
    pub fn won(&self) -> bool {
        self.winner.is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawOutcome {
    pub player: usize,
    pub card: Card,
    /// The drawn card is playable, so the player may play it or pass.
    pub turn_continues: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AiAction {
    Played,
    DrewAndPlayed,
    Drew,
    Passed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AiTurnOutcome {
    pub player: usize,
    pub penalty_drawn: usize,
    pub action: AiAction,
    pub play: Option<PlayOutcome>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeatSnapshot {
    pub name: String,
    pub is_human: bool,
    pub hand_size: usize,
    pub uno_called: bool,
    /// Only human seats expose their cards.
    pub hand: Option<Vec<Card>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableSnapshot {
    pub seats: Vec<SeatSnapshot>,
    pub top_card: Card,
    pub deck_remaining: usize,
    pub discard_len: usize,
    pub direction: Direction,
    pub current_player: usize,
    pub pending_uno_penalty: Option<usize>,
    pub state: TurnState,
}
