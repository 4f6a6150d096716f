//! Pseudo-legal move generation
//!
//! Generators only respect the geometry of pieces and the occupancy of the board. They know
//! nothing about the safety of the king; see [`legal`](crate::legal) for that.

use crate::board::Board;
use crate::types::{CastlingSide, Cell, Color, Coord, Piece, MAX_SIZE};
use crate::geometry;

use std::convert::Infallible;
use std::ops::{Deref, DerefMut};
use std::slice;

use arrayvec::ArrayVec;

/// Maximum number of squares a single piece can reach on the largest board
pub const MAX_REACH: usize = 4 * (MAX_SIZE as usize - 1);

/// What a generator emits
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Pseudo-legal moves and protected squares, castling included
    Moves,
    /// Capture geometry only: pawns emit their diagonals, kings never castle
    Attacks,
}

/// Ordered list of destination squares
#[derive(Default, Debug, Clone, Eq, PartialEq, Hash)]
pub struct SquareList(ArrayVec<Coord, MAX_REACH>);

impl Deref for SquareList {
    type Target = ArrayVec<Coord, MAX_REACH>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for SquareList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<'a> IntoIterator for &'a SquareList {
    type Item = &'a Coord;
    type IntoIter = slice::Iter<'a, Coord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for SquareList {
    type Item = Coord;
    type IntoIter = arrayvec::IntoIter<Coord, MAX_REACH>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<Coord> for SquareList {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        SquareList(iter.into_iter().collect())
    }
}

impl SquareList {
    pub fn new() -> SquareList {
        SquareList(ArrayVec::new())
    }
}

/// Squares reachable by a single piece
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct Reach {
    /// Destinations: empty squares and opponent's pieces
    pub moves: SquareList,
    /// Squares occupied by friendly pieces which this piece defends
    pub protects: SquareList,
}

/// Receiver of generated squares
///
/// Returning an error stops the generation early.
pub(crate) trait MaybeReachPush {
    type Err;

    fn push_move(&mut self, c: Coord) -> Result<(), Self::Err>;

    fn push_protect(&mut self, c: Coord) -> Result<(), Self::Err>;
}

impl MaybeReachPush for Reach {
    type Err = Infallible;

    fn push_move(&mut self, c: Coord) -> Result<(), Infallible> {
        self.moves.push(c);
        Ok(())
    }

    fn push_protect(&mut self, c: Coord) -> Result<(), Infallible> {
        self.protects.push(c);
        Ok(())
    }
}

struct MoveGenImpl<'a, P> {
    board: &'a Board,
    src: Coord,
    color: Color,
    dst: &'a mut P,
}

impl<'a, P: MaybeReachPush> MoveGenImpl<'a, P> {
    /// Emits `c` as a move or as a protect. Returns `true` if the square is empty.
    fn classify(&mut self, c: Coord) -> Result<bool, P::Err> {
        let cell = self.board.get(c);
        match cell.color() {
            None => {
                self.dst.push_move(c)?;
                Ok(true)
            }
            Some(color) if color == self.color => {
                self.dst.push_protect(c)?;
                Ok(false)
            }
            Some(_) => {
                self.dst.push_move(c)?;
                Ok(false)
            }
        }
    }

    fn gen_slider(&mut self, dirs: &[(i8, i8)]) -> Result<(), P::Err> {
        let size = self.board.size();
        for &(dr, dc) in dirs {
            let mut cur = self.src;
            while let Some(next) = cur.try_shift(dr, dc, size) {
                if !self.classify(next)? {
                    break;
                }
                cur = next;
            }
        }
        Ok(())
    }

    fn gen_leaper(&mut self, offsets: &[(i8, i8)]) -> Result<(), P::Err> {
        let size = self.board.size();
        for &(dr, dc) in offsets {
            if let Some(c) = self.src.try_shift(dr, dc, size) {
                self.classify(c)?;
            }
        }
        Ok(())
    }

    fn gen_pawn(&mut self, cell: Cell, mode: Mode) -> Result<(), P::Err> {
        let size = self.board.size();
        let fwd = geometry::pawn_forward_delta(self.color);

        if mode == Mode::Moves {
            if let Some(one) = self.src.try_shift(fwd, 0, size) {
                if self.board.get(one).is_empty() {
                    self.dst.push_move(one)?;
                    if !cell.has_moved() {
                        if let Some(two) = one.try_shift(fwd, 0, size) {
                            if self.board.get(two).is_empty() {
                                self.dst.push_move(two)?;
                            }
                        }
                    }
                }
            }
        }

        for dc in [-1, 1] {
            let Some(c) = self.src.try_shift(fwd, dc, size) else {
                continue;
            };
            match (self.board.get(c).color(), mode) {
                (Some(color), _) if color == self.color => self.dst.push_protect(c)?,
                (Some(_), _) | (None, Mode::Attacks) => self.dst.push_move(c)?,
                (None, Mode::Moves) => {}
            }
        }
        Ok(())
    }

    fn gen_castling(&mut self, cell: Cell) -> Result<(), P::Err> {
        if cell.has_moved() {
            return Ok(());
        }
        for side in [CastlingSide::Queen, CastlingSide::King] {
            if let Some(dst) = castling_dst(self.board, self.src, self.color, side) {
                self.dst.push_move(dst)?;
            }
        }
        Ok(())
    }

    fn gen(&mut self, mode: Mode) -> Result<(), P::Err> {
        let cell = self.board.get(self.src);
        let Some(piece) = cell.piece() else {
            return Ok(());
        };
        match piece {
            Piece::Pawn => self.gen_pawn(cell, mode),
            Piece::Knight => self.gen_leaper(&geometry::KNIGHT_OFFSETS),
            Piece::Bishop => self.gen_slider(&geometry::BISHOP_DIRECTIONS),
            Piece::Rook => self.gen_slider(&geometry::ROOK_DIRECTIONS),
            Piece::Queen => self.gen_slider(&geometry::QUEEN_DIRECTIONS),
            Piece::King => {
                self.gen_leaper(&geometry::KING_OFFSETS)?;
                match mode {
                    Mode::Moves => self.gen_castling(cell),
                    Mode::Attacks => Ok(()),
                }
            }
        }
    }
}

/// Finds the king's destination for castling towards `side`, if the rook allows it
///
/// Walks from the king towards `side` along the row. Castling is possible if the first piece
/// met is a friendly rook which has never moved, and the king's destination two columns away
/// lies strictly between the king and the rook. The king's own "has moved" flag is not
/// checked here.
pub(crate) fn castling_dst(b: &Board, king: Coord, color: Color, side: CastlingSide) -> Option<Coord> {
    let size = b.size();
    let dir = side.direction();
    let mut cur = king;
    let mut dist = 0;
    let rook = loop {
        cur = cur.try_shift(0, dir, size)?;
        dist += 1;
        let cell = b.get(cur);
        if cell.is_occupied() {
            break cell;
        }
    };
    if !rook.is(color, Piece::Rook) || rook.has_moved() || dist < 3 {
        return None;
    }
    king.try_shift(0, 2 * dir, size)
}

pub(crate) fn gen_into<P: MaybeReachPush>(
    b: &Board,
    src: Coord,
    mode: Mode,
    dst: &mut P,
) -> Result<(), P::Err> {
    let Some(color) = b.get(src).color() else {
        return Ok(());
    };
    MoveGenImpl {
        board: b,
        src,
        color,
        dst,
    }
    .gen(mode)
}

/// Same as [`gen_into`], for receivers which never stop the generation
pub(crate) fn gen_all<P: MaybeReachPush<Err = Infallible>>(
    b: &Board,
    src: Coord,
    mode: Mode,
    dst: &mut P,
) {
    match gen_into(b, src, mode, dst) {
        Ok(()) => {}
        Err(e) => match e {},
    }
}

/// Generates pseudo-legal moves and protects of the piece on `src`
///
/// Returns an empty [`Reach`] if `src` is empty.
pub fn reach(b: &Board, src: Coord) -> Reach {
    reach_with(b, src, Mode::Moves)
}

/// Generates squares reachable by the piece on `src` in the given mode
pub fn reach_with(b: &Board, src: Coord, mode: Mode) -> Reach {
    let mut res = Reach::default();
    gen_all(b, src, mode, &mut res);
    res
}

/// Generates the squares attacked by the piece on `src`
pub fn attacks(b: &Board, src: Coord) -> SquareList {
    reach_with(b, src, Mode::Attacks).moves
}
