//! Turn controller: legal moves of the side to move and the game status

use crate::board::Board;
use crate::legal::Checker;
use crate::movegen::SquareList;
use crate::rules::Rules;
use crate::types::{Color, Coord};

use std::collections::BTreeMap;
use std::fmt;

/// Status of the game from the point of view of the side to move
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// Side to move has legal moves and is not in check
    InProgress,
    /// Side to move is in check, but has legal moves
    Check,
    /// Side to move is in check and has no legal moves
    Checkmate,
    /// Side to move is not in check and has no legal moves
    Stalemate,
}

impl GameStatus {
    /// Returns `true` if the game cannot continue
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(*self, GameStatus::Checkmate | GameStatus::Stalemate)
    }

    pub fn as_str(&self) -> &'static str {
        match *self {
            GameStatus::InProgress => "in progress",
            GameStatus::Check => "check",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_str())
    }
}

/// Legal moves of one side, keyed by the origin square
///
/// Every piece of the side has an entry, even if it cannot move. Origins are iterated in
/// row-major order, and destinations keep the order of generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegalMoveSet {
    side: Color,
    by_origin: BTreeMap<Coord, SquareList>,
}

impl LegalMoveSet {
    #[inline]
    pub fn side(&self) -> Color {
        self.side
    }

    /// Returns legal destinations of the piece on `src`
    ///
    /// Returns an empty slice if `src` doesn't hold a piece of this side.
    pub fn get(&self, src: Coord) -> &[Coord] {
        self.by_origin
            .get(&src)
            .map(|list| list.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains(&self, src: Coord, dst: Coord) -> bool {
        self.get(src).contains(&dst)
    }

    /// Iterates over all the pieces of this side together with their destinations
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &[Coord])> + '_ {
        self.by_origin
            .iter()
            .map(|(&src, list)| (src, list.as_slice()))
    }

    /// Iterates over all the legal moves as `(src, dst)` pairs
    pub fn moves(&self) -> impl Iterator<Item = (Coord, Coord)> + '_ {
        self.by_origin
            .iter()
            .flat_map(|(&src, list)| list.iter().map(move |&dst| (src, dst)))
    }

    /// Total number of legal moves
    pub fn len(&self) -> usize {
        self.by_origin.values().map(|list| list.len()).sum()
    }

    /// Returns `true` if there are no legal moves
    pub fn is_empty(&self) -> bool {
        self.by_origin.values().all(|list| list.is_empty())
    }
}

/// Legal moves together with the check flags, computed for the side to move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnState {
    pub moves: LegalMoveSet,
    pub checked: bool,
    pub checkmated: bool,
    pub stalemated: bool,
}

impl TurnState {
    pub fn status(&self) -> GameStatus {
        match (self.checked, self.moves.is_empty()) {
            (true, true) => GameStatus::Checkmate,
            (true, false) => GameStatus::Check,
            (false, true) => GameStatus::Stalemate,
            (false, false) => GameStatus::InProgress,
        }
    }
}

/// Computes legal moves of `side` using the given rules
pub fn legal_moves_with(b: &Board, side: Color, rules: &Rules) -> TurnState {
    let checker = Checker::new(b, side, *rules);
    let by_origin = b
        .pieces(side)
        .map(|(src, _)| (src, checker.legal_moves(src)))
        .collect();
    let moves = LegalMoveSet { side, by_origin };
    let checked = checker.is_check();
    let none = moves.is_empty();
    TurnState {
        moves,
        checked,
        checkmated: checked && none,
        stalemated: !checked && none,
    }
}

/// Computes legal moves of `side` using the default rules
#[inline]
pub fn legal_moves_for_side(b: &Board, side: Color) -> TurnState {
    legal_moves_with(b, side, &Rules::default())
}
