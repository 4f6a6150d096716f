//! Flat string encoding of the board, used to pass positions between clients
//!
//! Every square is encoded with two characters, in row-major order and without delimiters:
//! `00` for an empty square, or the color (`w` or `b`) followed by the piece (`P`, `K`, `N`,
//! `B`, `R` or `Q`).
//!
//! The encoding doesn't keep the "has moved" flags. All the decoded pieces are considered
//! moved, so a decoded position never allows castling or pawn double moves.

use crate::board::{Board, RawBoard, ValidateError};
use crate::types::{BoardSize, Cell, Color, Coord, Piece};

use log::trace;
use thiserror::Error;

const EMPTY: &str = "00";

/// Error decoding a board from the wire format
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum WireError {
    /// The string contains non-ASCII characters
    #[error("non-ASCII data")]
    NonAscii,
    /// The string length doesn't match the board size
    #[error("bad length: expected {expected}, got {actual}")]
    BadLength { expected: usize, actual: usize },
    /// Unexpected color character
    #[error("unexpected color char {ch:?} at {pos}")]
    UnexpectedColor { pos: Coord, ch: char },
    /// Unexpected piece character
    #[error("unexpected piece char {ch:?} at {pos}")]
    UnexpectedPiece { pos: Coord, ch: char },
    /// The decoded position is invalid
    #[error("invalid position: {0}")]
    Invalid(#[from] ValidateError),
}

/// Encodes the board into the wire format
pub fn serialise(b: &RawBoard) -> String {
    let size = b.size();
    let mut res = String::with_capacity(2 * size.cells());
    for c in size.coords() {
        let cell = b.get(c);
        match (cell.color(), cell.piece()) {
            (Some(color), Some(piece)) => {
                res.push(color.as_char());
                res.push(piece.as_char());
            }
            _ => res.push_str(EMPTY),
        }
    }
    res
}

fn decode_cell(pos: Coord, pair: &[u8]) -> Result<Cell, WireError> {
    if pair == EMPTY.as_bytes() {
        return Ok(Cell::EMPTY);
    }
    let (color_ch, piece_ch) = (pair[0] as char, pair[1] as char);
    let color = Color::from_char(color_ch).ok_or(WireError::UnexpectedColor {
        pos,
        ch: color_ch,
    })?;
    let piece = Piece::from_char(piece_ch).ok_or(WireError::UnexpectedPiece {
        pos,
        ch: piece_ch,
    })?;
    Ok(Cell::from_parts(color, piece).moved())
}

/// Decodes a board of size `size` from the wire format
pub fn deserialise(s: &str, size: BoardSize) -> Result<Board, WireError> {
    if !s.is_ascii() {
        return Err(WireError::NonAscii);
    }
    let expected = 2 * size.cells();
    if s.len() != expected {
        return Err(WireError::BadLength {
            expected,
            actual: s.len(),
        });
    }

    let mut raw = RawBoard::empty(size);
    for (pos, pair) in size.coords().zip(s.as_bytes().chunks_exact(2)) {
        raw.put(pos, decode_cell(pos, pair)?);
    }
    trace!("decoded {} board with {} pieces", size, raw.pieces().count());
    Ok(Board::try_from(raw)?)
}
