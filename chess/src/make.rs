//! Moves and the move applier

use crate::board::Board;
use crate::geometry;
use crate::types::{CastlingSide, Cell, Color, Coord, Piece};

use std::fmt;

use log::{debug, trace};

/// Move kind
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Non-pawn move or capture (except castling), or single pawn move
    Simple,
    /// Double pawn move
    PawnDouble,
    /// Pawn reaches the farthest row and turns into a queen
    Promote,
    /// King moves two squares towards a rook, which jumps over it
    Castling(CastlingSide),
}

/// Chess move
///
/// Moves don't carry any legality guarantees by themselves. Use [`Move::classify()`] to build a
/// move from a pair of squares.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    kind: MoveKind,
    src: Coord,
    dst: Coord,
    side: Color,
}

impl Move {
    /// Builds the move of the piece on `src` to `dst`, deriving its kind from the board
    ///
    /// Returns `None` if `src` is empty. The move itself is not validated.
    pub fn classify(b: &Board, src: Coord, dst: Coord) -> Option<Move> {
        let cell = b.get(src);
        let side = cell.color()?;
        let kind = match cell.piece()? {
            Piece::Pawn if dst.row() == geometry::promote_row(side, b.size()) => MoveKind::Promote,
            Piece::Pawn if src.row().abs_diff(dst.row()) == 2 => MoveKind::PawnDouble,
            Piece::King if src.row() == dst.row() && src.col().abs_diff(dst.col()) == 2 => {
                let delta = dst.col() as i8 - src.col() as i8;
                MoveKind::Castling(CastlingSide::from_direction(delta))
            }
            _ => MoveKind::Simple,
        };
        Some(Move {
            kind,
            src,
            dst,
            side,
        })
    }

    #[inline]
    pub const fn kind(&self) -> MoveKind {
        self.kind
    }

    #[inline]
    pub const fn src(&self) -> Coord {
        self.src
    }

    #[inline]
    pub const fn dst(&self) -> Coord {
        self.dst
    }

    #[inline]
    pub const fn side(&self) -> Color {
        self.side
    }

    /// Square the king passes over while castling
    pub(crate) fn castling_transit(&self) -> Option<Coord> {
        match self.kind {
            MoveKind::Castling(side) => Some(Coord::new(
                self.src.row(),
                self.src.col().wrapping_add_signed(side.direction()),
            )),
            _ => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{} {}", self.src, self.dst)
    }
}

fn find_castling_rook(b: &Board, king_dst: Coord, side: CastlingSide) -> Option<Coord> {
    let size = b.size();
    let mut cur = king_dst;
    loop {
        cur = cur.try_shift(0, side.direction(), size)?;
        if b.get(cur).is_occupied() {
            return Some(cur);
        }
    }
}

fn do_make_castling(b: &mut Board, mv: Move, king: Cell, side: CastlingSide) {
    b.put(mv.dst, king.moved());
    let Some(rook_src) = find_castling_rook(b, mv.dst, side) else {
        return;
    };
    let Some(rook_dst) = mv.dst.try_shift(0, -side.direction(), b.size()) else {
        return;
    };
    let rook = b.get(rook_src);
    b.put(rook_src, Cell::EMPTY);
    b.put(rook_dst, rook.moved());
    trace!("castling: king {} -> {}, rook {} -> {}", mv.src, mv.dst, rook_src, rook_dst);
}

/// Makes the move `mv` on the board without any checks
///
/// The move must come from [`Move::classify()`] on the same board. Whatever stands on the
/// destination square is captured.
pub(crate) fn make_move_unchecked(b: &mut Board, mv: Move) {
    let cell = b.get(mv.src);
    b.put(mv.src, Cell::EMPTY);
    match mv.kind {
        MoveKind::Simple | MoveKind::PawnDouble => b.put(mv.dst, cell.moved()),
        MoveKind::Promote => {
            b.put(mv.dst, Cell::from_parts(mv.side, Piece::Queen).moved());
            trace!("pawn promoted to queen on {}", mv.dst);
        }
        MoveKind::Castling(side) => do_make_castling(b, mv, cell, side),
    }
}

/// Moves the piece on `src` to `dst` if `dst` is among `legal`
///
/// `legal` is the list of legal destinations computed for the piece on `src` in the current
/// position, e.g. [`LegalMoveSet::get()`](crate::turn::LegalMoveSet::get). Returns `true` if
/// the move was applied. Otherwise, returns `false` and leaves the board untouched.
///
/// Pawns reaching the farthest row are replaced with a queen. If the king moves two squares
/// along the row, the rook is moved to the square the king passed over.
pub fn apply(b: &mut Board, src: Coord, dst: Coord, legal: &[Coord]) -> bool {
    if !legal.contains(&dst) {
        debug!("rejected move {} {}: not among legal destinations", src, dst);
        return false;
    }
    let Some(mv) = Move::classify(b, src, dst) else {
        debug!("rejected move {} {}: no piece on source square", src, dst);
        return false;
    };
    make_move_unchecked(b, mv);
    true
}
