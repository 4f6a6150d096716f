//! Legality filter

use crate::attack;
use crate::board::Board;
use crate::make::{self, Move};
use crate::movegen::{self, SquareList};
use crate::rules::{CastlingSafety, Rules};
use crate::types::{Color, Coord, Piece};

/// Returns `true` if the move `mv` leaves the king of the mover in check
///
/// The move is played on a private copy of the board, so the caller never observes an
/// intermediate state.
fn exposes_king(b: &Board, mv: Move) -> bool {
    let mut scratch = b.clone();
    make::make_move_unchecked(&mut scratch, mv);
    attack::is_in_check(&scratch, mv.side())
}

/// Returns `true` if moving the piece on `src` to `dst` leaves its own king in check
///
/// The king is not passed in: its square is taken from [`Board::king_pos()`] for the color of
/// the piece on `src`. `dst` is expected to be a pseudo-legal destination of the piece. Whatever stands on `dst`
/// is considered captured. Returns `false` if `src` is empty.
pub fn is_pinned(b: &Board, src: Coord, dst: Coord) -> bool {
    match Move::classify(b, src, dst) {
        Some(mv) => exposes_king(b, mv),
        None => false,
    }
}

/// Filters pseudo-legal moves of one side
#[derive(Clone, Debug)]
pub struct Checker<'a> {
    board: &'a Board,
    side: Color,
    rules: Rules,
    check: bool,
}

impl<'a> Checker<'a> {
    pub fn new(board: &'a Board, side: Color, rules: Rules) -> Self {
        Checker {
            board,
            side,
            rules,
            check: board.is_check(side),
        }
    }

    #[inline]
    pub fn side(&self) -> Color {
        self.side
    }

    /// Returns `true` if the king of the checked side is in check
    #[inline]
    pub fn is_check(&self) -> bool {
        self.check
    }

    fn is_castling_safe(&self, mv: Move) -> bool {
        match (self.rules.castling, mv.castling_transit()) {
            (CastlingSafety::Strict, Some(transit)) => {
                !self.check && !attack::is_cell_attacked(self.board, transit, self.side.inv())
            }
            _ => true,
        }
    }

    /// Returns `true` if the pseudo-legal move `src -> dst` is legal
    ///
    /// Kings are never captured, even if the opponent was left in check.
    pub fn is_legal(&self, src: Coord, dst: Coord) -> bool {
        if self.board.get(dst).piece() == Some(Piece::King) {
            return false;
        }
        let Some(mv) = Move::classify(self.board, src, dst) else {
            return false;
        };
        mv.side() == self.side && self.is_castling_safe(mv) && !exposes_king(self.board, mv)
    }

    /// Returns legal destinations of the piece on `src`, in generation order
    pub fn legal_moves(&self, src: Coord) -> SquareList {
        movegen::reach(self.board, src)
            .moves
            .iter()
            .copied()
            .filter(|&dst| self.is_legal(src, dst))
            .collect()
    }
}

/// Returns legal destinations of the piece on `src`, with the side to move being its color
pub fn legal_moves_from(b: &Board, src: Coord, rules: Rules) -> SquareList {
    let Some(side) = b.get(src).color() else {
        return SquareList::new();
    };
    Checker::new(b, side, rules).legal_moves(src)
}
