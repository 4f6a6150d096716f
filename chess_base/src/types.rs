use std::fmt::{self, Display};
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

/// Largest supported board side
///
/// All the squares of a board this large fit into a [`SquareSet`](crate::bitboard::SquareSet).
pub const MAX_SIZE: u8 = 11;

/// Smallest supported board side, so the standard setup fits
pub const MIN_SIZE: u8 = 8;

/// Number of cells in the backing storage of any board
pub const MAX_CELLS: usize = MAX_SIZE as usize * MAX_SIZE as usize;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoordParseError {
    #[error("expected \"row,col\"")]
    BadFormat,
    #[error("bad number: {0}")]
    BadNumber(#[from] ParseIntError),
    #[error("coordinate ({0}, {1}) is out of range")]
    OutOfRange(u8, u8),
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("unexpected color char {0:?}")]
    UnexpectedChar(char),
    #[error("invalid string length")]
    BadLength,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CellParseError {
    #[error("unexpected cell char {0:?}")]
    UnexpectedChar(char),
    #[error("invalid string length")]
    BadLength,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum SizeError {
    #[error("board size {0} is not between {min} and {max}", min = MIN_SIZE, max = MAX_SIZE)]
    OutOfRange(usize),
}

/// Side length of a square board
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct BoardSize(u8);

impl BoardSize {
    pub const STANDARD: BoardSize = BoardSize(8);

    pub const fn new(val: usize) -> Result<BoardSize, SizeError> {
        if val < MIN_SIZE as usize || val > MAX_SIZE as usize {
            return Err(SizeError::OutOfRange(val));
        }
        Ok(BoardSize(val as u8))
    }

    pub const fn get(&self) -> u8 {
        self.0
    }

    pub const fn cells(&self) -> usize {
        self.0 as usize * self.0 as usize
    }

    /// Index of the last row or column
    pub const fn last(&self) -> u8 {
        self.0 - 1
    }

    pub const fn contains(&self, c: Coord) -> bool {
        c.row < self.0 && c.col < self.0
    }

    /// Iterates over all the squares of the board in row-major order
    pub fn coords(self) -> impl Iterator<Item = Coord> {
        let n = self.0;
        (0..n).flat_map(move |row| (0..n).map(move |col| Coord { row, col }))
    }
}

impl Default for BoardSize {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl Display for BoardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}x{}", self.0, self.0)
    }
}

impl TryFrom<usize> for BoardSize {
    type Error = SizeError;

    fn try_from(val: usize) -> Result<Self, Self::Error> {
        BoardSize::new(val)
    }
}

/// Square on the board
///
/// Row 0 is the top row (Black's back rank in the initial position), column 0 is the leftmost
/// column. Coordinates are ordered row-major.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    row: u8,
    col: u8,
}

impl Coord {
    pub const fn new(row: u8, col: u8) -> Coord {
        assert!(
            row < MAX_SIZE && col < MAX_SIZE,
            "coord must fit into the largest board"
        );
        Coord { row, col }
    }

    pub const fn row(&self) -> u8 {
        self.row
    }

    pub const fn col(&self) -> u8 {
        self.col
    }

    /// Index into cell storage, which has a fixed stride of [`MAX_SIZE`]
    pub const fn index(&self) -> usize {
        self.row as usize * MAX_SIZE as usize + self.col as usize
    }

    pub const fn from_index(val: usize) -> Coord {
        assert!(val < MAX_CELLS, "coord index out of range");
        Coord {
            row: (val / MAX_SIZE as usize) as u8,
            col: (val % MAX_SIZE as usize) as u8,
        }
    }

    /// Shifts the coordinate, returning `None` if the result leaves the board of size `size`
    pub fn try_shift(self, delta_row: i8, delta_col: i8, size: BoardSize) -> Option<Coord> {
        let row = self.row.checked_add_signed(delta_row)?;
        let col = self.col.checked_add_signed(delta_col)?;
        let res = Coord { row, col };
        size.contains(res).then_some(res)
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "Coord({})", self)
    }
}

impl Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl FromStr for Coord {
    type Err = CoordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, col) = s.split_once(',').ok_or(CoordParseError::BadFormat)?;
        let row = u8::from_str(row.trim())?;
        let col = u8::from_str(col.trim())?;
        if row >= MAX_SIZE || col >= MAX_SIZE {
            return Err(CoordParseError::OutOfRange(row, col));
        }
        Ok(Coord { row, col })
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub const fn inv(&self) -> Color {
        match *self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    pub fn as_char(&self) -> char {
        match *self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    pub fn from_char(c: char) -> Option<Color> {
        match c {
            'w' => Some(Color::White),
            'b' => Some(Color::Black),
            _ => None,
        }
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        [Color::White, Color::Black].into_iter()
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 1 {
            return Err(ColorParseError::BadLength);
        }
        let ch = s.as_bytes()[0] as char;
        Color::from_char(ch).ok_or(ColorParseError::UnexpectedChar(ch))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Piece {
    Pawn = 0,
    King = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
}

impl Piece {
    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        [
            Piece::Pawn,
            Piece::King,
            Piece::Knight,
            Piece::Bishop,
            Piece::Rook,
            Piece::Queen,
        ]
        .into_iter()
    }

    /// Uppercase letter of the piece, as used on the wire
    pub fn as_char(&self) -> char {
        b"PKNBRQ"[*self as usize] as char
    }

    pub fn from_char(c: char) -> Option<Piece> {
        match c {
            'P' => Some(Piece::Pawn),
            'K' => Some(Piece::King),
            'N' => Some(Piece::Knight),
            'B' => Some(Piece::Bishop),
            'R' => Some(Piece::Rook),
            'Q' => Some(Piece::Queen),
            _ => None,
        }
    }
}

/// Contents of a single square
///
/// Packs the color and the kind of the piece together with its "has moved" flag. The flag
/// matters for pawn double steps and for castling.
#[derive(Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Cell(u8);

impl Cell {
    pub const EMPTY: Cell = Cell(0);
    pub const MAX_INDEX: usize = 13;

    const MOVED: u8 = 0x10;
    const KIND_MASK: u8 = 0x0f;

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_occupied(&self) -> bool {
        self.0 != 0
    }

    /// Returns a piece which has not moved yet
    pub const fn from_parts(c: Color, p: Piece) -> Cell {
        Cell(match c {
            Color::White => 1 + p as u8,
            Color::Black => 7 + p as u8,
        })
    }

    /// Index of color and kind, ignoring the "has moved" flag
    pub const fn index(&self) -> usize {
        (self.0 & Self::KIND_MASK) as usize
    }

    pub const fn from_index(val: usize) -> Cell {
        assert!(val < Self::MAX_INDEX, "index too large");
        Cell(val as u8)
    }

    pub const fn color(&self) -> Option<Color> {
        match self.0 & Self::KIND_MASK {
            0 => None,
            1..=6 => Some(Color::White),
            _ => Some(Color::Black),
        }
    }

    pub const fn piece(&self) -> Option<Piece> {
        match self.0 & Self::KIND_MASK {
            0 => None,
            1 | 7 => Some(Piece::Pawn),
            2 | 8 => Some(Piece::King),
            3 | 9 => Some(Piece::Knight),
            4 | 10 => Some(Piece::Bishop),
            5 | 11 => Some(Piece::Rook),
            6 | 12 => Some(Piece::Queen),
            _ => panic!("corrupt cell"),
        }
    }

    pub const fn is(&self, c: Color, p: Piece) -> bool {
        self.0 & Self::KIND_MASK == Cell::from_parts(c, p).0
    }

    pub const fn has_moved(&self) -> bool {
        self.0 & Self::MOVED != 0
    }

    /// Returns the same piece with "has moved" flag set. Empty cells stay empty.
    pub const fn moved(self) -> Cell {
        if self.0 == 0 {
            return self;
        }
        Cell(self.0 | Self::MOVED)
    }

    /// Iterates over all fresh cells, including the empty one
    pub fn iter() -> impl Iterator<Item = Self> {
        (0..Self::MAX_INDEX).map(Cell::from_index)
    }

    pub fn as_char(&self) -> char {
        b".PKNBRQpknbrq"[self.index()] as char
    }

    pub fn as_utf8_char(&self) -> char {
        [
            '.', '♙', '♔', '♘', '♗', '♖', '♕', '♟', '♚', '♞', '♝', '♜', '♛',
        ][self.index()]
    }

    /// Parses a fresh cell from its layout character
    pub fn from_char(c: char) -> Option<Self> {
        if c == '.' {
            return Some(Cell::EMPTY);
        }
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let piece = Piece::from_char(c.to_ascii_uppercase())?;
        Some(Cell::from_parts(color, piece))
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        if self.has_moved() {
            return write!(f, "Cell({}*)", self.as_char());
        }
        write!(f, "Cell({})", self.as_char())
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Cell {
    type Err = CellParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 1 {
            return Err(CellParseError::BadLength);
        }
        let ch = s.as_bytes()[0] as char;
        Cell::from_char(ch).ok_or(CellParseError::UnexpectedChar(ch))
    }
}

/// Side of castling
///
/// Queenside castling goes towards column 0, kingside castling towards the last column.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CastlingSide {
    Queen = 0,
    King = 1,
}

impl CastlingSide {
    /// Column step from the king towards the rook
    pub const fn direction(&self) -> i8 {
        match *self {
            CastlingSide::Queen => -1,
            CastlingSide::King => 1,
        }
    }

    pub const fn from_direction(delta_col: i8) -> CastlingSide {
        if delta_col < 0 {
            CastlingSide::Queen
        } else {
            CastlingSide::King
        }
    }
}
