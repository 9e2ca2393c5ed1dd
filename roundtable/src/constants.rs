pub(crate) const ZERO_CARDS_PER_COLOR: usize = 1;
/// 1-9, Skip, Reverse and Draw Two all come in pairs.
pub(crate) const COPIES_PER_COLORED_FACE: usize = 2;
pub(crate) const NON_ZERO_FACES_PER_COLOR: usize = 12;

pub(crate) const COLORED_CARDS_PER_COLOR: usize =
    ZERO_CARDS_PER_COLOR + COPIES_PER_COLORED_FACE * NON_ZERO_FACES_PER_COLOR;

pub(crate) const WILD_CARDS_IN_DECK: usize = 4;
pub(crate) const WILD_DRAW_FOUR_CARDS_IN_DECK: usize = 4;

pub(crate) const DRAW_TWO_PENALTY: usize = 2;
pub(crate) const WILD_DRAW_FOUR_PENALTY: usize = 4;

pub const DEFAULT_HAND_SIZE: usize = 7;
pub const DEFAULT_MIN_PLAYERS: usize = 2;
pub const DEFAULT_MAX_PLAYERS: usize = 10;
pub const DEFAULT_UNO_PENALTY: usize = 2;

pub const fn cards_in_deck(color_count: usize) -> usize {
    COLORED_CARDS_PER_COLOR * color_count + WILD_CARDS_IN_DECK + WILD_DRAW_FOUR_CARDS_IN_DECK
}
