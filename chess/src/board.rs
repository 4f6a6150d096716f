//! Board and related things

use crate::types::{BoardSize, Cell, Color, Coord, Piece, SizeError, MAX_CELLS};
use crate::{attack, geometry, wire};
use crate::bitboard::SquareSet;

use std::fmt::{self, Display};
use std::str::FromStr;

use thiserror::Error;

/// Board validation error
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ValidateError {
    /// One of the sides doesn't have a king
    #[error("no king of color {0:?}")]
    NoKing(Color),
    /// One of the sides has more than one king
    #[error("more than one king of color {0:?}")]
    TooManyKings(Color),
}

/// Error parsing a board layout (i.e. the positions of pieces on the board)
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum LayoutParseError {
    /// Row is too long
    #[error("too many items in row {0}")]
    RowOverflow(u8),
    /// Row is too short
    #[error("not enough items in row {0}")]
    RowUnderflow(u8),
    /// Unexpected character
    #[error("unexpected char {0:?}")]
    UnexpectedChar(char),
    /// Number of rows is not a supported board size
    #[error("bad board size: {0}")]
    Size(#[from] SizeError),
}

/// Error parsing [`Board`] from layout
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum LayoutError {
    /// Layout cannot be parsed
    #[error("cannot parse layout: {0}")]
    Parse(#[from] LayoutParseError),
    /// Layout was parsed, but the position is invalid
    #[error("invalid position: {0}")]
    Valid(#[from] ValidateError),
}

/// Raw chess board
///
/// Raw board is just a grid of cells. Unlike [`Board`], it is not validated and may contain an
/// invalid position (e.g. without kings).
///
/// Raw board can be used to build or edit the position programmatically. After changing the necessary
/// cells, it must be converted to [`Board`] via [`Board::try_from()`].
///
/// # Example
///
/// ```
/// # use kingsafe::{RawBoard, Board, BoardSize, Color, Piece, Cell, Coord};
/// #
/// let mut raw = RawBoard::empty(BoardSize::STANDARD);
/// raw.put(Coord::new(6, 1), Cell::from_parts(Color::White, Piece::King));
/// raw.put(Coord::new(3, 3), Cell::from_parts(Color::Black, Piece::King));
///
/// let board: Board = raw.try_into().unwrap();
/// assert_eq!(board.as_layout(), "8/8/8/3k4/8/8/1K6/8");
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct RawBoard {
    size: BoardSize,
    cells: [Cell; MAX_CELLS],
}

impl RawBoard {
    /// Returns an empty board of the given size
    #[inline]
    pub const fn empty(size: BoardSize) -> RawBoard {
        RawBoard {
            size,
            cells: [Cell::EMPTY; MAX_CELLS],
        }
    }

    /// Returns a board with the initial position
    ///
    /// The pieces occupy the first eight columns. On boards larger than 8x8 the remaining
    /// columns stay empty, and the rows are counted from the edges of the board.
    pub fn initial(size: BoardSize) -> RawBoard {
        const BACK: [Piece; 8] = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];

        let mut res = RawBoard::empty(size);
        for color in Color::iter() {
            let back = geometry::back_row(color, size);
            let pawns = geometry::pawn_home_row(color, size);
            for (col, piece) in BACK.into_iter().enumerate() {
                let col = col as u8;
                res.put(Coord::new(back, col), Cell::from_parts(color, piece));
                res.put(Coord::new(pawns, col), Cell::from_parts(color, Piece::Pawn));
            }
        }
        res
    }

    /// Parses a board from layout
    ///
    /// Does the same as [`RawBoard::from_str`]. It is recommended to use this function instead of
    /// `from_str()` for better readability.
    #[inline]
    pub fn from_layout(s: &str) -> Result<RawBoard, LayoutParseError> {
        RawBoard::from_str(s)
    }

    #[inline]
    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// Returns the contents of the square with coordinate `c`
    ///
    /// # Panics
    ///
    /// Panics if `c` is not on the board.
    #[inline]
    pub fn get(&self, c: Coord) -> Cell {
        assert!(self.size.contains(c), "coord {} is not on the board", c);
        self.cells[c.index()]
    }

    /// Puts `cell` to the square with coordinate `c`
    ///
    /// # Panics
    ///
    /// Panics if `c` is not on the board.
    #[inline]
    pub fn put(&mut self, c: Coord, cell: Cell) {
        assert!(self.size.contains(c), "coord {} is not on the board", c);
        self.cells[c.index()] = cell;
    }

    /// Marks the piece on `c` as moved
    ///
    /// Useful for positions built from layout, where all the pieces are fresh.
    #[inline]
    pub fn mark_moved(&mut self, c: Coord) {
        self.put(c, self.get(c).moved());
    }

    /// Iterates over all the occupied squares in row-major order
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        self.size
            .coords()
            .map(|c| (c, self.cells[c.index()]))
            .filter(|(_, cell)| cell.is_occupied())
    }

    /// Returns the set of squares occupied by pieces of color `color`
    pub fn occupied(&self, color: Color) -> SquareSet {
        self.pieces()
            .filter(|(_, cell)| cell.color() == Some(color))
            .map(|(c, _)| c)
            .collect()
    }

    /// Wraps the board to allow pretty-printing with the given style `Style`
    ///
    /// The resulting wrapper implements [`fmt::Display`], so can be used with
    /// `write!()`, `println!()`, or `ToString::to_string`.
    ///
    /// # Example
    ///
    /// ```
    /// # use kingsafe::{RawBoard, BoardSize, board::PrettyStyle};
    /// #
    /// let r = RawBoard::initial(BoardSize::STANDARD);
    ///
    /// let res = r#"
    /// 0|rnbqkbnr
    /// 1|pppppppp
    /// 2|........
    /// 3|........
    /// 4|........
    /// 5|........
    /// 6|PPPPPPPP
    /// 7|RNBQKBNR
    /// -+--------
    ///  |01234567
    /// "#;
    /// assert_eq!(r.pretty(PrettyStyle::Ascii).to_string().trim(), res.trim());
    /// ```
    #[inline]
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        Pretty { raw: self, style }
    }

    /// Converts the board into a layout string
    ///
    /// Does the same as `RawBoard::to_string()`. It is recommended to use this function instead of
    /// `to_string()` for better readability.
    #[inline]
    pub fn as_layout(&self) -> String {
        self.to_string()
    }

    /// Encodes the board for the wire, see [`wire::serialise`]
    #[inline]
    pub fn as_wire(&self) -> String {
        wire::serialise(self)
    }
}

impl Default for RawBoard {
    #[inline]
    fn default() -> RawBoard {
        RawBoard::empty(BoardSize::STANDARD)
    }
}

/// Board that contains a valid position
///
/// This board always has exactly one king of each color. It is used for every engine
/// operation: move generation, checking for check, checkmate and stalemate, and making moves.
///
/// It contains a [`RawBoard`] alongside with the positions of both kings.
///
/// The board doesn't store the side to move; it is passed explicitly to the operations that
/// need it.
#[derive(Debug, Clone)]
pub struct Board {
    pub(crate) r: RawBoard,
    pub(crate) kings: [Coord; 2],
}

impl Board {
    /// Returns a board with the initial position
    pub fn initial(size: BoardSize) -> Board {
        let r = RawBoard::initial(size);
        let kings = [
            Coord::new(geometry::back_row(Color::White, size), 4),
            Coord::new(geometry::back_row(Color::Black, size), 4),
        ];
        Board { r, kings }
    }

    /// Parses a board from layout
    ///
    /// Does the same as [`Board::from_str`]. It is recommended to use this function instead of
    /// `from_str()` for better readability.
    pub fn from_layout(s: &str) -> Result<Board, LayoutError> {
        Board::from_str(s)
    }

    /// Returns a view over the raw board
    #[inline]
    pub fn raw(&self) -> &RawBoard {
        &self.r
    }

    #[inline]
    pub fn size(&self) -> BoardSize {
        self.r.size
    }

    /// Returns the contents of the square with coordinate `c`
    #[inline]
    pub fn get(&self, c: Coord) -> Cell {
        self.r.get(c)
    }

    /// Returns the position of the king of color `c`
    #[inline]
    pub fn king_pos(&self, c: Color) -> Coord {
        let pos = self.kings[c.index()];
        assert!(
            self.r.get(pos).is(c, Piece::King),
            "king of color {:?} is missing from {}",
            c,
            pos
        );
        pos
    }

    /// Iterates over all the pieces of color `c` in row-major order
    pub fn pieces(&self, c: Color) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        self.r
            .pieces()
            .filter(move |(_, cell)| cell.color() == Some(c))
    }

    /// Returns `true` if the king of color `c` is in check
    #[inline]
    pub fn is_check(&self, c: Color) -> bool {
        attack::is_in_check(self, c)
    }

    /// Returns all the pieces that give check to the king of color `c`
    #[inline]
    pub fn checkers(&self, c: Color) -> SquareSet {
        attack::cell_attackers(self, self.king_pos(c), c.inv())
    }

    /// Puts `cell` to the square `c`, keeping track of the kings
    pub(crate) fn put(&mut self, c: Coord, cell: Cell) {
        self.r.put(c, cell);
        if cell.piece() == Some(Piece::King) {
            if let Some(color) = cell.color() {
                self.kings[color.index()] = c;
            }
        }
    }

    /// Wraps the board to allow pretty-printing with the given style `Style`
    ///
    /// See docs for [`RawBoard::pretty()`] for more usage details.
    #[inline]
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        self.r.pretty(style)
    }

    #[inline]
    pub fn as_layout(&self) -> String {
        self.r.as_layout()
    }

    #[inline]
    pub fn as_wire(&self) -> String {
        self.r.as_wire()
    }
}

impl PartialEq for Board {
    #[inline]
    fn eq(&self, other: &Board) -> bool {
        self.r == other.r
    }
}

impl Eq for Board {}

impl TryFrom<RawBoard> for Board {
    type Error = ValidateError;

    fn try_from(raw: RawBoard) -> Result<Board, ValidateError> {
        let mut kings = [None; 2];
        for (coord, cell) in raw.pieces() {
            let (Some(Piece::King), Some(color)) = (cell.piece(), cell.color()) else {
                continue;
            };
            let slot = &mut kings[color.index()];
            if slot.is_some() {
                return Err(ValidateError::TooManyKings(color));
            }
            *slot = Some(coord);
        }

        let white = kings[0].ok_or(ValidateError::NoKing(Color::White))?;
        let black = kings[1].ok_or(ValidateError::NoKing(Color::Black))?;
        Ok(Board {
            r: raw,
            kings: [white, black],
        })
    }
}

impl TryFrom<&RawBoard> for Board {
    type Error = ValidateError;

    fn try_from(raw: &RawBoard) -> Result<Board, ValidateError> {
        (*raw).try_into()
    }
}

impl From<Board> for RawBoard {
    fn from(b: Board) -> RawBoard {
        b.r
    }
}

/// Result of [`initialise()`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setup {
    pub board: Board,
    pub white_king: Coord,
    pub black_king: Coord,
}

/// Sets up the initial position on a board of the given size
pub fn initialise(size: BoardSize) -> Setup {
    let board = Board::initial(size);
    Setup {
        white_king: board.king_pos(Color::White),
        black_king: board.king_pos(Color::Black),
        board,
    }
}

/// Style for [`RawBoard::pretty()`] and [`Board::pretty()`]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PrettyStyle {
    /// Print pieces and frames as ASCII characters
    Ascii,
    /// Print pieces and frames as fancy Unicode characters
    Utf8,
}

/// Wrapper to pretty-print the board
///
/// See docs for [`RawBoard::pretty()`] for more details.
pub struct Pretty<'a> {
    raw: &'a RawBoard,
    style: PrettyStyle,
}

fn parse_cells(s: &str) -> Result<RawBoard, LayoutParseError> {
    type Error = LayoutParseError;

    let rows: Vec<&str> = s.split('/').collect();
    let size = BoardSize::new(rows.len())?;
    let width = size.get() as usize;
    let mut res = RawBoard::empty(size);

    for (row, line) in rows.into_iter().enumerate() {
        let row = row as u8;
        let mut col = 0_usize;
        let mut run = 0_usize;
        for b in line.bytes() {
            if b.is_ascii_digit() {
                run = run * 10 + (b - b'0') as usize;
                if col + run > width {
                    return Err(Error::RowOverflow(row));
                }
                continue;
            }
            col += run;
            run = 0;
            if col >= width {
                return Err(Error::RowOverflow(row));
            }
            let cell = match Cell::from_char(b as char) {
                Some(cell) if cell.is_occupied() => cell,
                _ => return Err(Error::UnexpectedChar(b as char)),
            };
            res.put(Coord::new(row, col as u8), cell);
            col += 1;
        }
        col += run;
        if col < width {
            return Err(Error::RowUnderflow(row));
        }
    }

    Ok(res)
}

impl FromStr for RawBoard {
    type Err = LayoutParseError;

    fn from_str(s: &str) -> Result<RawBoard, Self::Err> {
        parse_cells(s.trim())
    }
}

impl FromStr for Board {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Board, Self::Err> {
        Ok(RawBoard::from_str(s)?.try_into()?)
    }
}

fn format_cells(raw: &RawBoard, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
    let size = raw.size;
    for row in 0..size.get() {
        if row != 0 {
            write!(f, "/")?;
        }
        let mut empty = 0;
        for col in 0..size.get() {
            let cell = raw.get(Coord::new(row, col));
            if cell.is_empty() {
                empty += 1;
                continue;
            }
            if empty != 0 {
                write!(f, "{}", empty)?;
                empty = 0;
            }
            write!(f, "{}", cell)?;
        }
        if empty != 0 {
            write!(f, "{}", empty)?;
        }
    }
    Ok(())
}

impl Display for RawBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        format_cells(self, f)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        self.r.fmt(f)
    }
}

trait StyleTable {
    const HORZ_FRAME: char;
    const VERT_FRAME: char;
    const ANGLE_FRAME: char;

    fn cell(c: Cell) -> char;

    fn fmt(r: &RawBoard, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        let size = r.size.get();
        let label_width = if size > 10 { 2 } else { 1 };
        for row in 0..size {
            write!(f, "{:>w$}{}", row, Self::VERT_FRAME, w = label_width)?;
            for col in 0..size {
                write!(f, "{}", Self::cell(r.get(Coord::new(row, col))))?;
            }
            writeln!(f)?;
        }
        for _ in 0..label_width {
            write!(f, "{}", Self::HORZ_FRAME)?;
        }
        write!(f, "{}", Self::ANGLE_FRAME)?;
        for _ in 0..size {
            write!(f, "{}", Self::HORZ_FRAME)?;
        }
        writeln!(f)?;
        write!(f, "{:>w$}{}", "", Self::VERT_FRAME, w = label_width)?;
        for col in 0..size {
            write!(f, "{}", col % 10)?;
        }
        writeln!(f)?;
        Ok(())
    }
}

struct AsciiStyleTable;
struct Utf8StyleTable;

impl StyleTable for AsciiStyleTable {
    const HORZ_FRAME: char = '-';
    const VERT_FRAME: char = '|';
    const ANGLE_FRAME: char = '+';

    fn cell(c: Cell) -> char {
        c.as_char()
    }
}

impl StyleTable for Utf8StyleTable {
    const HORZ_FRAME: char = '─';
    const VERT_FRAME: char = '│';
    const ANGLE_FRAME: char = '┼';

    fn cell(c: Cell) -> char {
        c.as_utf8_char()
    }
}

impl<'a> Display for Pretty<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.style {
            PrettyStyle::Ascii => AsciiStyleTable::fmt(self.raw, f),
            PrettyStyle::Utf8 => Utf8StyleTable::fmt(self.raw, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INI_LAYOUT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    #[test]
    fn test_initial() {
        assert_eq!(RawBoard::initial(BoardSize::STANDARD).to_string(), INI_LAYOUT);
        assert_eq!(Board::initial(BoardSize::STANDARD).to_string(), INI_LAYOUT);
        assert_eq!(
            RawBoard::from_str(INI_LAYOUT),
            Ok(RawBoard::initial(BoardSize::STANDARD))
        );
        assert_eq!(
            Board::from_str(INI_LAYOUT),
            Ok(Board::initial(BoardSize::STANDARD))
        );

        let setup = initialise(BoardSize::STANDARD);
        assert_eq!(setup.white_king, Coord::new(7, 4));
        assert_eq!(setup.black_king, Coord::new(0, 4));
        assert_eq!(setup.board.pieces(Color::White).count(), 16);
        assert_eq!(setup.board.pieces(Color::Black).count(), 16);
        assert!(setup
            .board
            .raw()
            .pieces()
            .all(|(_, cell)| !cell.has_moved()));
    }

    #[test]
    fn test_initial_large() {
        let size = BoardSize::new(10).unwrap();
        let setup = initialise(size);
        assert_eq!(
            setup.board.as_layout(),
            "rnbqkbnr2/pppppppp2/10/10/10/10/10/10/PPPPPPPP2/RNBQKBNR2"
        );
        assert_eq!(setup.white_king, Coord::new(9, 4));
        assert_eq!(setup.black_king, Coord::new(0, 4));
    }

    #[test]
    fn test_layout() {
        const LAYOUT: &str = "1rq1r1k1/1p3ppp/pB3n2/3ppP2/Pbb1P3/1PN2B2/2P2QPP/R1R4K";

        let board = Board::from_layout(LAYOUT).unwrap();
        assert_eq!(board.as_layout(), LAYOUT);
        assert_eq!(
            board.get(Coord::new(4, 1)),
            Cell::from_parts(Color::Black, Piece::Bishop)
        );
        assert_eq!(
            board.get(Coord::new(6, 5)),
            Cell::from_parts(Color::White, Piece::Queen)
        );
        assert_eq!(board.king_pos(Color::White), Coord::new(7, 7));
        assert_eq!(board.king_pos(Color::Black), Coord::new(0, 6));
    }

    #[test]
    fn test_layout_large() {
        const LAYOUT: &str = "k10/11/11/11/11/5Q5/11/11/11/11/10K";

        let board = Board::from_layout(LAYOUT).unwrap();
        assert_eq!(board.size(), BoardSize::new(11).unwrap());
        assert_eq!(board.as_layout(), LAYOUT);
        assert_eq!(board.king_pos(Color::White), Coord::new(10, 10));
        assert_eq!(
            board.get(Coord::new(5, 5)),
            Cell::from_parts(Color::White, Piece::Queen)
        );
    }

    #[test]
    fn test_layout_errors() {
        assert_eq!(
            RawBoard::from_layout("8/8/8/8/8/8/8"),
            Err(LayoutParseError::Size(SizeError::OutOfRange(7)))
        );
        assert_eq!(
            RawBoard::from_layout("9/8/8/8/8/8/8/8"),
            Err(LayoutParseError::RowOverflow(0))
        );
        assert_eq!(
            RawBoard::from_layout("8/8/7/8/8/8/8/8"),
            Err(LayoutParseError::RowUnderflow(2))
        );
        assert_eq!(
            RawBoard::from_layout("8/8/8/3x4/8/8/8/8"),
            Err(LayoutParseError::UnexpectedChar('x'))
        );
        assert_eq!(
            RawBoard::from_layout("8/8/8/3.4/8/8/8/8"),
            Err(LayoutParseError::UnexpectedChar('.'))
        );
        assert_eq!(
            Board::from_layout("8/8/8/8/8/8/8/4K3"),
            Err(LayoutError::Valid(ValidateError::NoKing(Color::Black)))
        );
        assert_eq!(
            Board::from_layout("k7/8/8/8/8/8/8/8"),
            Err(LayoutError::Valid(ValidateError::NoKing(Color::White)))
        );
        assert_eq!(
            Board::from_layout("k6k/8/8/8/8/8/8/4K3"),
            Err(LayoutError::Valid(ValidateError::TooManyKings(Color::Black)))
        );
    }

    #[test]
    fn test_mark_moved() {
        let mut raw = RawBoard::initial(BoardSize::STANDARD);
        let c = Coord::new(7, 0);
        raw.mark_moved(c);
        assert!(raw.get(c).has_moved());
        assert!(raw.get(c).is(Color::White, Piece::Rook));
        assert_eq!(raw.as_layout(), INI_LAYOUT);
    }

    #[test]
    fn test_king_tracking() {
        let mut b = Board::from_layout("4k3/8/8/8/8/8/8/4K3").unwrap();
        b.put(Coord::new(7, 4), Cell::EMPTY);
        b.put(
            Coord::new(6, 4),
            Cell::from_parts(Color::White, Piece::King).moved(),
        );
        assert_eq!(b.king_pos(Color::White), Coord::new(6, 4));
        assert_eq!(b.king_pos(Color::Black), Coord::new(0, 4));
    }

    #[test]
    #[should_panic]
    fn test_missing_king_panics() {
        let mut b = Board::from_layout("4k3/8/8/8/8/8/8/4K3").unwrap();
        b.put(Coord::new(7, 4), Cell::EMPTY);
        b.king_pos(Color::White);
    }

    #[test]
    fn test_pretty() {
        let b = Board::from_layout("4k3/8/8/8/8/8/4P3/4K3").unwrap();
        let res = "0│....♚...\n1│........\n2│........\n3│........\n4│........\n5│........\n6│....♙...\n7│....♔...\n─┼────────\n │01234567\n";
        assert_eq!(b.pretty(PrettyStyle::Utf8).to_string(), res);

        let b = Board::from_layout("k10/11/11/11/11/11/11/11/11/11/10K").unwrap();
        let text = b.pretty(PrettyStyle::Ascii).to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], " 0|k..........");
        assert_eq!(lines[10], "10|..........K");
        assert_eq!(lines[11], "--+-----------");
        assert_eq!(lines[12], "  |01234567890");
    }
}
