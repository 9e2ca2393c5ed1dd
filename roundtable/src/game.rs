use tracing::{debug, info, warn};

use crate::card::{Card, CardColor, Face};
use crate::deck::Deck;
use crate::error::{GameError, Result};
use crate::player::Player;
use crate::rng::{GameRng, RandomSource};
use crate::ruleset::Ruleset;
use crate::turn::{
    AiAction, AiTurnOutcome, CardEffect, Direction, DrawOutcome, PlayOutcome, SeatSnapshot,
    TableSnapshot, TurnState,
};

/// One round at the table. Owns the draw pile, the discard pile, every hand
/// and the turn pointer; the caller drives it one command at a time.
#[derive(Debug)]
pub struct Game<R = GameRng> {
    ruleset: Ruleset,
    rng: R,
    deck: Deck,
    discard: Vec<Card>,
    players: Vec<Player>,
    direction: Direction,
    current_player_index: usize,
    pending_uno_penalty: Option<usize>,
    winner: Option<usize>,
    drew_this_turn: bool,
    consecutive_passes: usize,
}

struct Deal {
    deck: Deck,
    discard: Vec<Card>,
    players: Vec<Player>,
}

impl Game<GameRng> {
    /// Default ruleset with a seeded generator.
    pub fn with_seed<I, S>(player_names: I, ai_count: usize, seed: u64) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(player_names, ai_count, Ruleset::default(), GameRng::new(seed))
    }
}

impl<R: RandomSource> Game<R> {
    /// Seats the players in the given order. The last `ai_count` seats are
    /// played by the engine, the rest are human.
    pub fn new<I, S>(player_names: I, ai_count: usize, ruleset: Ruleset, mut rng: R) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let Deal {
            deck,
            discard,
            players,
        } = Self::deal(&ruleset, player_names, ai_count, &mut rng)?;

        Ok(Game {
            ruleset,
            rng,
            deck,
            discard,
            players,
            direction: Direction::Clockwise,
            current_player_index: 0,
            pending_uno_penalty: None,
            winner: None,
            drew_this_turn: false,
            consecutive_passes: 0,
        })
    }

    /// Throws away the current round and deals a fresh one with the same
    /// ruleset and randomness source.
    pub fn new_game<I, S>(&mut self, player_names: I, ai_count: usize) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let Deal {
            deck,
            discard,
            players,
        } = Self::deal(&self.ruleset, player_names, ai_count, &mut self.rng)?;

        self.deck = deck;
        self.discard = discard;
        self.players = players;
        self.direction = Direction::Clockwise;
        self.current_player_index = 0;
        self.pending_uno_penalty = None;
        self.winner = None;
        self.drew_this_turn = false;
        self.consecutive_passes = 0;

        Ok(())
    }

    fn deal<I, S>(ruleset: &Ruleset, player_names: I, ai_count: usize, rng: &mut R) -> Result<Deal>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ruleset.validate()?;

        let names = player_names.into_iter().map(Into::into).collect::<Vec<String>>();
        ruleset.check_player_count(names.len())?;
        if ai_count > names.len() {
            return Err(GameError::InvalidAiCount {
                ai_count,
                players: names.len(),
            });
        }
        if ruleset.deck_size() <= ruleset.hand_size * names.len() {
            return Err(GameError::NoCardsAvailable);
        }

        let human_count = names.len() - ai_count;
        let mut deck = Deck::new(&ruleset.colors, rng);
        let mut players = Vec::with_capacity(names.len());

        for (seat, name) in names.into_iter().enumerate() {
            let mut player = Player::new(name, seat < human_count);
            player.draw_n(&mut deck, ruleset.hand_size);
            players.push(player);
        }

        let starter = deck
            .draw_first_colored()
            .ok_or(GameError::NoCardsAvailable)?;

        debug!(
            players = players.len(),
            humans = human_count,
            %starter,
            deck = deck.remaining(),
            "dealt a new round"
        );

        Ok(Deal {
            deck,
            discard: vec![starter],
            players,
        })
    }

    pub fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, player: usize) -> Option<&Player> {
        self.players.get(player)
    }

    pub fn player_mut(&mut self, player: usize) -> Option<&mut Player> {
        self.players.get_mut(player)
    }

    pub fn hand(&self, player: usize) -> Option<&[Card]> {
        self.players.get(player).map(|p| p.hand.as_slice())
    }

    pub fn hand_size(&self, player: usize) -> Option<usize> {
        self.players.get(player).map(Player::cards_count)
    }

    pub fn top_card(&self) -> &Card {
        self.discard
            .last()
            .expect("The discard pile is seeded at deal time and never emptied.")
    }

    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    pub fn discard_len(&self) -> usize {
        self.discard.len()
    }

    pub fn current_player_index(&self) -> usize {
        self.current_player_index
    }

    pub fn next_player_index(&self) -> usize {
        self.nth_player_index_ahead(1)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn uno_called(&self, player: usize) -> Option<bool> {
        self.players.get(player).map(Player::uno_called)
    }

    pub fn pending_uno_penalty(&self) -> Option<usize> {
        self.pending_uno_penalty
    }

    pub fn winner(&self) -> Option<usize> {
        self.winner
    }

    pub fn has_drawn_this_turn(&self) -> bool {
        self.drew_this_turn
    }

    /// Every seat passed in a row without a card changing hands.
    pub fn is_stalled(&self) -> bool {
        self.consecutive_passes >= self.players.len()
    }

    pub fn state(&self) -> TurnState {
        match self.winner {
            Some(winner) => TurnState::RoundOver { winner },
            None if self.players[self.current_player_index].is_human() => {
                TurnState::AwaitingHumanAction
            }
            None => TurnState::AiTurn,
        }
    }

    pub fn snapshot(&self) -> TableSnapshot {
        let seats = self
            .players
            .iter()
            .map(|player| SeatSnapshot {
                name: player.name().to_string(),
                is_human: player.is_human(),
                hand_size: player.cards_count(),
                uno_called: player.uno_called(),
                hand: player.is_human().then(|| player.hand.clone()),
            })
            .collect();

        TableSnapshot {
            seats,
            top_card: *self.top_card(),
            deck_remaining: self.deck.remaining(),
            discard_len: self.discard.len(),
            direction: self.direction,
            current_player: self.current_player_index,
            pending_uno_penalty: self.pending_uno_penalty,
            state: self.state(),
        }
    }

    /// Plays a card from `player`'s hand. Wilds need `chosen_color`; it is
    /// ignored for every other card.
    pub fn play_card(
        &mut self,
        player: usize,
        hand_index: usize,
        chosen_color: Option<CardColor>,
    ) -> Result<PlayOutcome> {
        self.ensure_turn(player)?;
        let card = self.playable_card(player, hand_index)?;

        let color = if card.is_wild() {
            let color = chosen_color.ok_or(GameError::ColorRequired)?;
            if !self.ruleset.has_color(color) {
                return Err(GameError::InvalidColor(color));
            }
            Some(color)
        } else {
            None
        };

        self.apply_pending_uno_penalty();
        Ok(self.resolve_play(player, hand_index, color))
    }

    /// Like [`Game::play_card`], but asks `choose_color` for the color when
    /// the card turns out to be a wild.
    pub fn play_card_with<F>(
        &mut self,
        player: usize,
        hand_index: usize,
        choose_color: F,
    ) -> Result<PlayOutcome>
    where
        F: FnOnce(&[CardColor]) -> CardColor,
    {
        self.ensure_turn(player)?;
        let card = self.playable_card(player, hand_index)?;
        let color = card
            .is_wild()
            .then(|| choose_color(&self.ruleset.colors));

        self.play_card(player, hand_index, color)
    }

    pub fn draw_card(&mut self, player: usize) -> Result<DrawOutcome> {
        self.ensure_turn(player)?;
        if self.drew_this_turn {
            return Err(GameError::AlreadyDrew);
        }
        if !self.can_draw() {
            return Err(GameError::NoCardsAvailable);
        }

        self.apply_pending_uno_penalty();

        if self.deck.is_empty() {
            self.reshuffle_discard_into_deck();
        }
        let card = self
            .deck
            .draw()
            .expect("deck should hold a card after the availability check");

        self.players[player].add_card(card);
        self.consecutive_passes = 0;

        let turn_continues = card.is_playable_on(self.top_card());
        debug!(player, %card, turn_continues, "card drawn");

        if turn_continues {
            self.drew_this_turn = true;
        } else {
            self.move_turn_n_players_ahead(1);
        }

        Ok(DrawOutcome {
            player,
            card,
            turn_continues,
        })
    }

    /// Ends the turn after drawing a playable card the player wants to keep,
    /// or when there is nothing left to draw.
    pub fn pass_turn(&mut self, player: usize) -> Result<()> {
        self.ensure_turn(player)?;
        if self.drew_this_turn {
            debug!(player, "turn passed");
        } else if !self.can_draw() {
            self.apply_pending_uno_penalty();
            self.consecutive_passes += 1;
            debug!(player, "nothing to draw, passing");
        } else {
            return Err(GameError::CannotPass);
        }

        self.move_turn_n_players_ahead(1);
        Ok(())
    }

    pub fn declare_uno(&mut self, player: usize) -> Result<()> {
        if self.winner.is_some() {
            return Err(GameError::GameOver);
        }

        let current_player_index = self.current_player_index;
        let seat = self
            .players
            .get_mut(player)
            .ok_or(GameError::InvalidIndex(player))?;

        if player != current_player_index && !seat.has_uno() {
            return Err(GameError::NotYourTurn(player));
        }

        seat.declare_uno();
        if self.pending_uno_penalty == Some(player) {
            self.pending_uno_penalty = None;
        }

        info!(player, seat = seat.name(), "UNO declared");
        Ok(())
    }

    /// Charges the player who forgot to call UNO. Returns how many cards they
    /// picked up; zero when nobody owes a penalty.
    pub fn apply_pending_uno_penalty(&mut self) -> usize {
        let Some(player) = self.pending_uno_penalty.take() else {
            return 0;
        };

        let drawn = self.draw_cards_to_player(player, self.ruleset.uno_penalty);
        self.players[player].uno_called = false;

        info!(
            player,
            seat = self.players[player].name(),
            drawn,
            "UNO penalty applied"
        );
        drawn
    }

    pub fn run_ai_turn(&mut self) -> Result<AiTurnOutcome> {
        if self.winner.is_some() {
            return Err(GameError::GameOver);
        }

        let player = self.current_player_index;
        if self.players[player].is_human() {
            return Err(GameError::NotAiTurn);
        }

        let penalty_drawn = self.apply_pending_uno_penalty();

        if let Some(hand_index) = self.players[player].choose_move(self.top_card()) {
            let play = self.play_for_ai(player, hand_index);
            return Ok(AiTurnOutcome {
                player,
                penalty_drawn,
                action: AiAction::Played,
                play: Some(play),
            });
        }

        if self.deck.is_empty() {
            self.reshuffle_discard_into_deck();
        }

        let Some(card) = self.deck.draw() else {
            self.consecutive_passes += 1;
            debug!(player, "nothing to play or draw, passing");
            self.move_turn_n_players_ahead(1);
            return Ok(AiTurnOutcome {
                player,
                penalty_drawn,
                action: AiAction::Passed,
                play: None,
            });
        };

        self.players[player].add_card(card);
        self.consecutive_passes = 0;

        if card.is_playable_on(self.top_card()) {
            let hand_index = self.players[player].cards_count() - 1;
            let play = self.play_for_ai(player, hand_index);
            return Ok(AiTurnOutcome {
                player,
                penalty_drawn,
                action: AiAction::DrewAndPlayed,
                play: Some(play),
            });
        }

        debug!(player, "drew an unplayable card");
        self.move_turn_n_players_ahead(1);

        Ok(AiTurnOutcome {
            player,
            penalty_drawn,
            action: AiAction::Drew,
            play: None,
        })
    }

    /// Runs AI seats until a human is due, someone wins, or the round stalls.
    pub fn advance_ai_if_needed(&mut self) -> Vec<AiTurnOutcome> {
        let mut outcomes = Vec::new();

        while self.state() == TurnState::AiTurn {
            if self.is_stalled() {
                warn!(
                    passes = self.consecutive_passes,
                    "no seat can play or draw, round stalled"
                );
                break;
            }

            let Ok(outcome) = self.run_ai_turn() else {
                break;
            };
            outcomes.push(outcome);
        }

        outcomes
    }

    /// Recycles everything under the top card into the draw pile. Returns
    /// whether anything was moved.
    pub fn reshuffle_discard_into_deck(&mut self) -> bool {
        if self.discard.len() <= 1 {
            return false;
        }

        let top = self
            .discard
            .pop()
            .expect("Checked above that the pile has more than one card.");
        let recycled = std::mem::replace(&mut self.discard, vec![top]);
        let count = recycled.len();

        // Wilds go back colorless.
        self.deck.insert_all(recycled.into_iter().map(|card| {
            if card.is_wild() {
                match card.face() {
                    Face::WildDrawFour => Card::wild_draw_four(),
                    _ => Card::wild(),
                }
            } else {
                card
            }
        }));
        self.deck.shuffle(&mut self.rng);

        debug!(count, deck = self.deck.remaining(), "discard pile reshuffled");
        true
    }

    fn ensure_turn(&self, player: usize) -> Result<()> {
        if self.winner.is_some() {
            return Err(GameError::GameOver);
        }
        if player >= self.players.len() {
            return Err(GameError::InvalidIndex(player));
        }
        if player != self.current_player_index {
            return Err(GameError::NotYourTurn(player));
        }
        Ok(())
    }

    fn playable_card(&self, player: usize, hand_index: usize) -> Result<Card> {
        let card = *self.players[player]
            .hand
            .get(hand_index)
            .ok_or(GameError::InvalidIndex(hand_index))?;

        if !card.is_playable_on(self.top_card()) {
            return Err(GameError::IllegalMove);
        }
        Ok(card)
    }

    fn play_for_ai(&mut self, player: usize, hand_index: usize) -> PlayOutcome {
        let color = self.players[player].hand[hand_index]
            .is_wild()
            .then(|| self.pick_random_color());
        self.resolve_play(player, hand_index, color)
    }

    fn pick_random_color(&mut self) -> CardColor {
        let index = self.rng.pick_index(self.ruleset.colors.len());
        self.ruleset.colors[index]
    }

    /// Applies an already validated play.
    fn resolve_play(
        &mut self,
        player: usize,
        hand_index: usize,
        color: Option<CardColor>,
    ) -> PlayOutcome {
        let mut card = self.players[player]
            .remove_card(hand_index)
            .expect("The hand index was validated before resolving the play.");
        if let Some(color) = color.filter(|_| card.is_wild()) {
            card.assign_color(color);
        }
        self.discard.push(card);
        self.consecutive_passes = 0;

        info!(player, seat = self.players[player].name(), %card, "card played");

        let effect = match (card.face(), card.color()) {
            (Face::Reverse, _) => {
                self.direction = self.direction.reversed();
                CardEffect::Reverse
            }
            (Face::Skip, _) => {
                self.move_turn_n_players_ahead(1);
                CardEffect::Skip {
                    skipped: self.current_player_index,
                }
            }
            (Face::DrawTwo, _) => {
                let (victim, drawn) = self.force_draw_on_next(card.face());
                CardEffect::Draw { victim, drawn }
            }
            (Face::WildDrawFour, Some(color)) => {
                let (victim, drawn) = self.force_draw_on_next(card.face());
                CardEffect::WildDraw {
                    color,
                    victim,
                    drawn,
                }
            }
            (Face::Wild, Some(color)) => CardEffect::Wild(color),
            (Face::Wild | Face::WildDrawFour, None) => {
                unreachable!("Wild colors are resolved before a play is applied.")
            }
            (Face::Number(_), _) => CardEffect::Neutral,
        };

        let mut uno_declared = false;
        let mut missed_uno = false;
        let seat = &mut self.players[player];
        if !seat.has_uno() {
            // A call only covers the play that leaves one card.
            seat.uno_called = false;
        } else if !seat.is_human() {
            uno_declared = true;
            info!(player, seat = seat.name(), "UNO!");
        } else if seat.uno_called {
            seat.uno_called = false;
            if self.pending_uno_penalty == Some(player) {
                self.pending_uno_penalty = None;
            }
        } else {
            missed_uno = true;
            self.pending_uno_penalty = Some(player);
            debug!(player, "one card left without calling UNO");
        }

        let winner = self.players[player].is_winner().then_some(player);
        if winner.is_some() {
            self.winner = winner;
            info!(player, seat = self.players[player].name(), "round won");
        } else {
            self.move_turn_n_players_ahead(1);
        }

        PlayOutcome {
            player,
            card,
            effect,
            uno_declared,
            missed_uno,
            winner,
        }
    }

    /// Moves to the victim of a draw card and hands them the cards. The
    /// regular advance after the play then skips past them.
    fn force_draw_on_next(&mut self, face: Face) -> (usize, usize) {
        self.move_turn_n_players_ahead(1);
        let victim = self.current_player_index;
        let drawn = self.draw_cards_to_player(victim, face.draw_penalty().unwrap_or_default());
        (victim, drawn)
    }

    fn draw_cards_to_player(&mut self, player: usize, count: usize) -> usize {
        let mut drawn = 0;

        while drawn < count {
            if self.deck.is_empty() && !self.reshuffle_discard_into_deck() {
                break;
            }
            drawn += self.players[player].draw_n(&mut self.deck, count - drawn);
        }

        debug!(player, requested = count, drawn, "cards drawn to player");
        drawn
    }

    fn nth_player_index_ahead(&self, n: usize) -> usize {
        let count = self.players.len() as isize;
        let offset = self.direction.step() * n as isize;
        (self.current_player_index as isize + offset).rem_euclid(count) as usize
    }

    /// Whether a draw can go through once any pending UNO penalty is paid,
    /// counting a reshuffle of everything under the top card.
    fn can_draw(&self) -> bool {
        let owed = match self.pending_uno_penalty {
            Some(_) => self.ruleset.uno_penalty,
            None => 0,
        };
        let obtainable = self.deck.remaining() + self.discard.len().saturating_sub(1);
        obtainable > owed
    }

    fn move_turn_n_players_ahead(&mut self, n: usize) {
        self.current_player_index = self.nth_player_index_ahead(n);
        self.drew_this_turn = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Unshuffled;

    fn create_player_names(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("Player {}", i + 1)).collect()
    }

    /// Seat 0 is human, everybody else is played by the engine.
    fn create_game(count: usize) -> Game<Unshuffled> {
        Game::new(
            create_player_names(count),
            count - 1,
            Ruleset::default(),
            Unshuffled,
        )
        .unwrap()
    }

    fn set_top(game: &mut Game<Unshuffled>, card: Card) {
        game.discard.push(card);
    }

    fn total_cards(game: &Game<Unshuffled>) -> usize {
        game.deck.remaining()
            + game.discard.len()
            + game.players.iter().map(Player::cards_count).sum::<usize>()
    }

    #[test]
    fn return_ok_if_enough_players() {
        let result = Game::with_seed(create_player_names(2), 1, 5);
        assert!(result.is_ok());
    }

    #[test]
    fn return_err_if_not_enough_players() {
        let error = Game::with_seed(create_player_names(1), 0, 5).unwrap_err();
        assert_eq!(error, GameError::NotEnoughPlayers);
    }

    #[test]
    fn return_err_if_too_many_players() {
        let error = Game::with_seed(create_player_names(11), 0, 5).unwrap_err();
        assert_eq!(error, GameError::TooManyPlayers);
    }

    #[test]
    fn return_err_if_more_ai_than_players() {
        let error = Game::with_seed(create_player_names(3), 4, 5).unwrap_err();
        assert_eq!(
            error,
            GameError::InvalidAiCount {
                ai_count: 4,
                players: 3
            }
        );
    }

    #[test]
    fn all_players_start_with_7_cards() {
        let game = Game::with_seed(create_player_names(4), 3, 9).unwrap();
        for player in game.players() {
            assert_eq!(player.cards_count(), 7);
        }
        assert_eq!(game.deck_remaining(), 108 - 28 - 1);
        assert_eq!(game.discard_len(), 1);
        assert!(game.top_card().color().is_some());
    }

    #[test]
    fn last_seats_are_ai() {
        let game = create_game(4);
        let humans = game
            .players()
            .iter()
            .map(Player::is_human)
            .collect::<Vec<_>>();
        assert_eq!(humans, vec![true, false, false, false]);
        assert_eq!(game.state(), TurnState::AwaitingHumanAction);
    }

    #[test]
    fn next_player_turn_wraps_in_both_directions() {
        let mut game = create_game(4);

        game.current_player_index = 3;
        game.move_turn_n_players_ahead(1);
        assert_eq!(game.current_player_index, 0);

        game.direction = Direction::CounterClockwise;
        game.move_turn_n_players_ahead(1);
        assert_eq!(game.current_player_index, 3);

        game.move_turn_n_players_ahead(2);
        assert_eq!(game.current_player_index, 1);
    }

    #[test]
    fn skip_player_turn_works() {
        let mut game = create_game(4);
        set_top(&mut game, Card::number(CardColor::Pink, 4));
        game.players[0].hand[0] = Card::colored(CardColor::Pink, Face::Skip);

        let outcome = game.play_card(0, 0, None).unwrap();

        assert_eq!(outcome.effect, CardEffect::Skip { skipped: 1 });
        assert_eq!(game.current_player_index, 2);
    }

    #[test]
    fn reverse_flips_direction_once() {
        let mut game = create_game(4);
        set_top(&mut game, Card::number(CardColor::Teal, 4));
        game.players[0].hand[0] = Card::colored(CardColor::Teal, Face::Reverse);

        let outcome = game.play_card(0, 0, None).unwrap();

        assert_eq!(outcome.effect, CardEffect::Reverse);
        assert_eq!(game.direction, Direction::CounterClockwise);
        assert_eq!(game.current_player_index, 3);
    }

    #[test]
    fn wild_draw_four_skips_victim() {
        let mut game = create_game(4);
        game.players[0].hand[0] = Card::wild_draw_four();

        let outcome = game.play_card(0, 0, Some(CardColor::Green)).unwrap();

        assert_eq!(
            outcome.effect,
            CardEffect::WildDraw {
                color: CardColor::Green,
                victim: 1,
                drawn: 4
            }
        );
        assert_eq!(game.players[1].cards_count(), 11);
        assert_eq!(game.current_player_index, 2);
        assert_eq!(game.top_card().color(), Some(CardColor::Green));
    }

    #[test]
    fn failed_play_leaves_state_untouched() {
        let mut game = create_game(4);
        set_top(&mut game, Card::number(CardColor::Pink, 4));
        game.players[0].hand[0] = Card::number(CardColor::Black, 5);
        game.players[0].hand[1] = Card::wild();
        game.pending_uno_penalty = Some(2);

        assert_eq!(game.play_card(0, 0, None), Err(GameError::IllegalMove));
        assert_eq!(game.play_card(0, 1, None), Err(GameError::ColorRequired));
        assert_eq!(
            game.play_card(0, 1, Some(CardColor::Purple)),
            Err(GameError::InvalidColor(CardColor::Purple))
        );
        assert_eq!(game.play_card(0, 7, None), Err(GameError::InvalidIndex(7)));
        assert_eq!(game.play_card(1, 0, None), Err(GameError::NotYourTurn(1)));

        assert_eq!(game.players[0].cards_count(), 7);
        assert_eq!(game.players[2].cards_count(), 7);
        assert_eq!(game.pending_uno_penalty, Some(2));
        assert_eq!(game.current_player_index, 0);
    }

    #[test]
    fn missed_uno_is_charged_once_before_next_turn() {
        let mut game = create_game(2);
        set_top(&mut game, Card::number(CardColor::Pink, 4));
        game.players[0].hand = vec![
            Card::number(CardColor::Pink, 1),
            Card::number(CardColor::Black, 9),
        ];

        let outcome = game.play_card(0, 0, None).unwrap();
        assert!(outcome.missed_uno);
        assert_eq!(game.pending_uno_penalty, Some(0));

        let ai_turn = game.run_ai_turn().unwrap();
        assert_eq!(ai_turn.penalty_drawn, 2);
        assert_eq!(game.players[0].cards_count(), 3);
        assert_eq!(game.pending_uno_penalty, None);
        assert!(!game.players[0].uno_called());

        // Nothing left to charge.
        assert_eq!(game.apply_pending_uno_penalty(), 0);
        assert_eq!(game.players[0].cards_count(), 3);
    }

    #[test]
    fn called_uno_avoids_penalty() {
        let mut game = create_game(2);
        set_top(&mut game, Card::number(CardColor::Pink, 4));
        game.players[0].hand = vec![
            Card::number(CardColor::Pink, 1),
            Card::number(CardColor::Black, 9),
        ];

        game.declare_uno(0).unwrap();
        let outcome = game.play_card(0, 0, None).unwrap();

        assert!(!outcome.missed_uno);
        assert_eq!(game.pending_uno_penalty, None);
        assert!(!game.players[0].uno_called());
    }

    #[test]
    fn early_uno_call_does_not_cover_a_later_play() {
        let mut game = create_game(2);
        set_top(&mut game, Card::number(CardColor::Pink, 4));
        game.players[0].hand = vec![
            Card::colored(CardColor::Pink, Face::Skip),
            Card::number(CardColor::Pink, 1),
            Card::number(CardColor::Black, 9),
        ];

        game.declare_uno(0).unwrap();
        let outcome = game.play_card(0, 0, None).unwrap();
        assert!(!outcome.missed_uno);
        assert!(!game.players[0].uno_called());
        assert_eq!(game.current_player_index, 0);

        let outcome = game.play_card(0, 0, None).unwrap();
        assert!(outcome.missed_uno);
        assert_eq!(game.pending_uno_penalty, Some(0));
    }

    #[test]
    fn late_uno_call_clears_pending_penalty() {
        let mut game = create_game(2);
        set_top(&mut game, Card::number(CardColor::Pink, 4));
        game.players[0].hand = vec![
            Card::number(CardColor::Pink, 1),
            Card::number(CardColor::Black, 9),
        ];

        game.play_card(0, 0, None).unwrap();
        assert_eq!(game.pending_uno_penalty, Some(0));

        game.declare_uno(0).unwrap();
        assert_eq!(game.pending_uno_penalty, None);
        assert_eq!(game.apply_pending_uno_penalty(), 0);
    }

    #[test]
    fn declare_uno_needs_turn_or_single_card() {
        let mut game = create_game(3);
        assert_eq!(game.declare_uno(2), Err(GameError::NotYourTurn(2)));
        assert_eq!(game.declare_uno(5), Err(GameError::InvalidIndex(5)));

        game.players[2].hand.truncate(1);
        assert_eq!(game.declare_uno(2), Ok(()));
        assert!(game.players[2].uno_called());
    }

    #[test]
    fn ai_announces_uno() {
        let mut game = create_game(2);
        game.current_player_index = 1;
        set_top(&mut game, Card::number(CardColor::Pink, 4));
        game.players[1].hand = vec![
            Card::number(CardColor::Pink, 1),
            Card::number(CardColor::Black, 9),
        ];

        let outcome = game.run_ai_turn().unwrap();
        let play = outcome.play.unwrap();

        assert!(play.uno_declared);
        assert!(!play.missed_uno);
        assert_eq!(game.pending_uno_penalty, None);
    }

    #[test]
    fn reshuffle_keeps_top_and_card_count() {
        let mut game = create_game(3);
        let before = total_cards(&game);

        let played = vec![
            Card::number(CardColor::Pink, 1),
            Card::wild().with_color(CardColor::Teal),
            Card::number(CardColor::Black, 2),
        ];
        game.discard.extend(played);
        let removed = game.deck.remaining();
        game.deck.0.clear();
        let top = *game.top_card();

        assert!(game.reshuffle_discard_into_deck());

        assert_eq!(game.discard, vec![top]);
        assert_eq!(game.deck.remaining(), 3);
        assert!(game.deck.cards().contains(&Card::wild()));
        assert_eq!(total_cards(&game), before + 3 - removed);
    }

    #[test]
    fn reshuffle_is_noop_with_single_discard() {
        let mut game = create_game(2);
        let deck_before = game.deck.remaining();

        assert!(!game.reshuffle_discard_into_deck());
        assert_eq!(game.deck.remaining(), deck_before);
        assert_eq!(game.discard.len(), 1);
    }

    #[test]
    fn draw_reshuffles_empty_deck() {
        let mut game = create_game(2);
        game.deck.0.clear();
        game.discard = vec![
            Card::number(CardColor::Green, 3),
            Card::number(CardColor::Pink, 8),
        ];

        let outcome = game.draw_card(0).unwrap();

        assert_eq!(outcome.card, Card::number(CardColor::Green, 3));
        assert!(!outcome.turn_continues);
        assert_eq!(game.discard, vec![Card::number(CardColor::Pink, 8)]);
        assert_eq!(game.current_player_index, 1);
    }

    #[test]
    fn draw_fails_without_cards() {
        let mut game = create_game(2);
        game.deck.0.clear();

        assert_eq!(game.draw_card(0), Err(GameError::NoCardsAvailable));
        assert_eq!(game.players[0].cards_count(), 7);
    }

    #[test]
    fn drawn_playable_card_keeps_turn() {
        let mut game = create_game(2);
        game.deck.0.push(Card::wild());

        let outcome = game.draw_card(0).unwrap();
        assert!(outcome.turn_continues);
        assert_eq!(game.current_player_index, 0);
        assert_eq!(game.draw_card(0), Err(GameError::AlreadyDrew));

        game.pass_turn(0).unwrap();
        assert_eq!(game.current_player_index, 1);
        assert!(!game.drew_this_turn);
    }

    #[test]
    fn pass_requires_a_draw() {
        let mut game = create_game(2);
        assert_eq!(game.pass_turn(0), Err(GameError::CannotPass));
    }

    #[test]
    fn pass_allowed_when_nothing_to_draw() {
        let mut game = create_game(2);
        game.deck.0.clear();
        game.discard = vec![Card::number(CardColor::Pink, 4)];
        game.players[0].hand = vec![Card::number(CardColor::Black, 9)];

        assert_eq!(game.draw_card(0), Err(GameError::NoCardsAvailable));
        assert_eq!(game.play_card(0, 0, None), Err(GameError::IllegalMove));

        game.pass_turn(0).unwrap();
        assert_eq!(game.current_player_index, 1);
        assert_eq!(game.consecutive_passes, 1);
    }

    #[test]
    fn draw_short_of_owed_penalty_changes_nothing() {
        let mut game = create_game(2);
        game.deck.0.clear();
        game.discard = vec![
            Card::number(CardColor::Green, 3),
            Card::number(CardColor::Pink, 8),
        ];
        game.pending_uno_penalty = Some(1);

        assert_eq!(game.draw_card(0), Err(GameError::NoCardsAvailable));
        assert_eq!(game.players[0].cards_count(), 7);
        assert_eq!(game.players[1].cards_count(), 7);
        assert_eq!(game.pending_uno_penalty, Some(1));
        assert_eq!(game.discard.len(), 2);
        assert_eq!(game.current_player_index, 0);

        // Passing settles what the table can still pay.
        game.pass_turn(0).unwrap();
        assert_eq!(game.players[1].cards_count(), 8);
        assert_eq!(game.pending_uno_penalty, None);
        assert_eq!(game.current_player_index, 1);
    }

    #[test]
    fn ai_plays_drawn_card_when_legal() {
        let mut game = create_game(2);
        game.current_player_index = 1;
        set_top(&mut game, Card::number(CardColor::Pink, 4));
        game.players[1].hand = vec![Card::number(CardColor::Black, 9); 3];
        game.deck.0.push(Card::number(CardColor::Pink, 6));

        let outcome = game.run_ai_turn().unwrap();

        assert_eq!(outcome.action, AiAction::DrewAndPlayed);
        assert_eq!(*game.top_card(), Card::number(CardColor::Pink, 6));
        assert_eq!(game.players[1].cards_count(), 3);
        assert_eq!(game.current_player_index, 0);
    }

    #[test]
    fn ai_keeps_unplayable_draw() {
        let mut game = create_game(2);
        game.current_player_index = 1;
        set_top(&mut game, Card::number(CardColor::Pink, 4));
        game.players[1].hand = vec![Card::number(CardColor::Black, 9)];
        game.deck.0.push(Card::number(CardColor::Teal, 6));

        let outcome = game.run_ai_turn().unwrap();

        assert_eq!(outcome.action, AiAction::Drew);
        assert_eq!(game.players[1].cards_count(), 2);
        assert_eq!(game.current_player_index, 0);
    }

    #[test]
    fn ai_wild_color_comes_from_randomness() {
        let mut game = create_game(2);
        game.current_player_index = 1;
        game.players[1].hand = vec![Card::wild(), Card::number(CardColor::Black, 9)];
        set_top(&mut game, Card::number(CardColor::Green, 4));

        let outcome = game.run_ai_turn().unwrap();

        assert_eq!(
            outcome.play.unwrap().effect,
            CardEffect::Wild(CardColor::Pink)
        );
    }

    #[test]
    fn run_ai_turn_rejects_human_seat() {
        let mut game = create_game(2);
        assert_eq!(game.run_ai_turn(), Err(GameError::NotAiTurn));
    }

    #[test]
    fn stalled_round_stops_advancing() {
        let mut game = Game::new(
            create_player_names(2),
            2,
            Ruleset::default(),
            Unshuffled,
        )
        .unwrap();
        game.deck.0.clear();
        game.discard = vec![Card::number(CardColor::Pink, 4)];
        for player in &mut game.players {
            player.hand = vec![Card::number(CardColor::Black, 9)];
        }

        let outcomes = game.advance_ai_if_needed();

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| o.action == AiAction::Passed));
        assert!(game.is_stalled());
        assert_eq!(game.winner(), None);
    }

    #[test]
    fn winning_stops_the_round() {
        let mut game = create_game(3);
        game.players[0].hand = vec![Card::wild()];
        game.declare_uno(0).unwrap();

        let outcome = game.play_card(0, 0, Some(CardColor::Black)).unwrap();

        assert_eq!(outcome.winner, Some(0));
        assert_eq!(game.state(), TurnState::RoundOver { winner: 0 });
        assert_eq!(game.current_player_index, 0);
        assert_eq!(game.run_ai_turn(), Err(GameError::GameOver));
        assert_eq!(game.draw_card(0), Err(GameError::GameOver));
        assert!(game.advance_ai_if_needed().is_empty());
    }

    #[test]
    fn new_game_resets_round() {
        let mut game = create_game(2);
        game.players[0].hand.clear();
        game.winner = Some(0);
        game.direction = Direction::CounterClockwise;

        game.new_game(create_player_names(3), 2).unwrap();

        assert_eq!(game.players().len(), 3);
        assert_eq!(game.winner(), None);
        assert_eq!(game.direction(), Direction::Clockwise);
        assert_eq!(game.current_player_index(), 0);
        assert!(game.players().iter().all(|p| p.cards_count() == 7));
    }
}
