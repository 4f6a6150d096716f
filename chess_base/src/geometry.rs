use crate::types::{BoardSize, Color};

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

pub const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

pub const KING_OFFSETS: [(i8, i8); 8] = QUEEN_DIRECTIONS;

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Row step of a pawn of color `c`
pub const fn pawn_forward_delta(c: Color) -> i8 {
    match c {
        Color::White => -1,
        Color::Black => 1,
    }
}

/// Row where pieces of color `c` stand in the initial position
pub const fn back_row(c: Color, size: BoardSize) -> u8 {
    match c {
        Color::White => size.last(),
        Color::Black => 0,
    }
}

/// Row where pawns of color `c` stand in the initial position
pub const fn pawn_home_row(c: Color, size: BoardSize) -> u8 {
    match c {
        Color::White => size.last() - 1,
        Color::Black => 1,
    }
}

/// Farthest row for pawns of color `c`, where they get promoted
pub const fn promote_row(c: Color, size: BoardSize) -> u8 {
    back_row(c.inv(), size)
}
