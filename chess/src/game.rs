//! Turn-by-turn game driver

use crate::board::Board;
use crate::make;
use crate::rules::Rules;
use crate::turn::{self, GameStatus, TurnState};
use crate::types::{BoardSize, Color, Coord};
use crate::wire::{self, WireError};

use log::debug;
use thiserror::Error;

/// Error making a move in [`Game`]
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum GameError {
    /// The game already reached a terminal status
    #[error("game is finished: {0}")]
    Finished(GameStatus),
    /// The move is not legal in the current position
    #[error("illegal move {src} {dst}")]
    IllegalMove { src: Coord, dst: Coord },
}

/// A single game: the board, the side to move, and the legal moves for it
///
/// The legal moves are recomputed after each move. No move history is kept.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    side: Color,
    rules: Rules,
    turn: TurnState,
}

impl Game {
    /// Starts a game from the position `board` with `side` to move, using the default rules
    pub fn new(board: Board, side: Color) -> Self {
        Self::with_rules(board, side, Rules::default())
    }

    pub fn with_rules(board: Board, side: Color, rules: Rules) -> Self {
        let turn = turn::legal_moves_with(&board, side, &rules);
        Game {
            board,
            side,
            rules,
            turn,
        }
    }

    /// Starts a game from the initial position, White to move
    pub fn new_initial(size: BoardSize) -> Self {
        Self::new(Board::initial(size), Color::White)
    }

    /// Starts a game from a board received over the wire, see [`wire::deserialise`]
    pub fn from_wire(s: &str, size: BoardSize, side: Color) -> Result<Self, WireError> {
        Ok(Self::new(wire::deserialise(s, size)?, side))
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side to move
    #[inline]
    pub fn side(&self) -> Color {
        self.side
    }

    #[inline]
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    #[inline]
    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.turn.status()
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.status().is_terminal()
    }

    /// Returns legal destinations of the piece on `src`
    #[inline]
    pub fn legal_moves(&self, src: Coord) -> &[Coord] {
        self.turn.moves.get(src)
    }

    /// Makes the move `src -> dst` for the side to move
    ///
    /// Returns the status of the game for the opponent, who moves next.
    pub fn push(&mut self, src: Coord, dst: Coord) -> Result<GameStatus, GameError> {
        let old = self.status();
        if old.is_terminal() {
            return Err(GameError::Finished(old));
        }
        if !make::apply(&mut self.board, src, dst, self.turn.moves.get(src)) {
            return Err(GameError::IllegalMove { src, dst });
        }
        self.side = self.side.inv();
        self.turn = turn::legal_moves_with(&self.board, self.side, &self.rules);
        let new = self.status();
        if new != old {
            debug!("status changed: {} -> {} ({} to move)", old, new, self.side);
        }
        Ok(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Piece;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn c(row: u8, col: u8) -> Coord {
        Coord::new(row, col)
    }

    #[test]
    fn test_opening_push() {
        let mut game = Game::new_initial(BoardSize::STANDARD);
        assert_eq!(game.side(), Color::White);
        assert!(game.legal_moves(c(6, 4)).contains(&c(4, 4)));
        assert_eq!(game.push(c(6, 4), c(4, 4)), Ok(GameStatus::InProgress));
        assert_eq!(game.side(), Color::Black);
        assert!(!game.turn().checked);
    }

    #[test]
    fn test_fools_mate() {
        let mut game = Game::new_initial(BoardSize::STANDARD);
        for (src, dst) in [
            (c(6, 5), c(5, 5)),
            (c(1, 4), c(3, 4)),
            (c(6, 6), c(4, 6)),
        ] {
            assert_eq!(game.push(src, dst), Ok(GameStatus::InProgress));
        }
        assert_eq!(game.push(c(0, 3), c(4, 7)), Ok(GameStatus::Checkmate));
        assert_eq!(game.side(), Color::White);
        assert!(game.turn().checkmated);
        assert!(game.turn().checked);
        assert!(!game.turn().stalemated);
        assert!(game.is_finished());
        assert_eq!(
            game.board().as_layout(),
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR"
        );
        assert_eq!(
            game.push(c(6, 0), c(5, 0)),
            Err(GameError::Finished(GameStatus::Checkmate))
        );
    }

    #[test]
    fn test_illegal() {
        let mut game = Game::new_initial(BoardSize::STANDARD);
        let copy = game.board().clone();
        assert_eq!(
            game.push(c(6, 4), c(3, 4)),
            Err(GameError::IllegalMove {
                src: c(6, 4),
                dst: c(3, 4)
            })
        );
        // opponent's piece
        assert!(game.push(c(1, 4), c(2, 4)).is_err());
        // empty square
        assert!(game.push(c(4, 4), c(3, 4)).is_err());
        assert_eq!(game.board(), &copy);
        assert_eq!(game.side(), Color::White);
    }

    #[test]
    fn test_stalemate() {
        let b = Board::from_layout("7k/8/8/8/8/8/5q2/K7").unwrap();
        let mut game = Game::new(b, Color::Black);
        assert_eq!(game.push(c(6, 5), c(6, 2)), Ok(GameStatus::Stalemate));
        assert!(game.turn().stalemated);
        assert!(!game.turn().checkmated);
        assert!(game.is_finished());
        assert_eq!(
            game.push(c(7, 0), c(7, 1)),
            Err(GameError::Finished(GameStatus::Stalemate))
        );
    }

    #[test]
    fn test_check() {
        let b = Board::from_layout("4k3/8/8/8/8/8/8/R3K3").unwrap();
        let mut game = Game::new(b, Color::White);
        assert_eq!(game.push(c(7, 0), c(0, 0)), Ok(GameStatus::Check));
        assert_eq!(game.legal_moves(c(0, 4)), &[c(1, 4), c(1, 3), c(1, 5)]);
    }

    #[test]
    fn test_promotion() {
        let b = Board::from_layout("4k3/P7/8/8/8/8/8/4K3").unwrap();
        let mut game = Game::new(b, Color::White);
        assert_eq!(game.push(c(1, 0), c(0, 0)), Ok(GameStatus::Check));
        assert!(game.board().get(c(0, 0)).is(Color::White, Piece::Queen));

        game.push(c(0, 4), c(1, 4)).unwrap();
        // the new queen moves like a queen
        let moves = game.legal_moves(c(0, 0));
        assert!(moves.contains(&c(7, 7)));
        assert!(moves.contains(&c(0, 3)));
        assert!(moves.contains(&c(6, 0)));
    }

    #[test]
    fn test_castling() {
        let b = Board::from_layout("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R").unwrap();
        let mut game = Game::new(b, Color::White);
        game.push(c(7, 4), c(7, 6)).unwrap();
        game.push(c(0, 4), c(0, 2)).unwrap();
        assert_eq!(
            game.board().as_layout(),
            "2kr3r/pppppppp/8/8/8/8/PPPPPPPP/R4RK1"
        );
        for pos in [c(7, 5), c(7, 6), c(0, 2), c(0, 3)] {
            assert!(game.board().get(pos).has_moved());
        }
        // the king has moved, so it cannot castle again
        assert!(!game.legal_moves(c(7, 6)).contains(&c(7, 4)));
    }

    #[test]
    fn test_strict_rules() {
        let b = Board::from_layout("4kr2/8/8/8/8/8/8/R3K2R").unwrap();
        let game = Game::with_rules(b.clone(), Color::White, Rules::strict());
        assert!(!game.legal_moves(c(7, 4)).contains(&c(7, 6)));
        assert_eq!(game.rules(), &Rules::strict());
        let game = Game::new(b, Color::White);
        assert!(game.legal_moves(c(7, 4)).contains(&c(7, 6)));
    }

    #[test]
    fn test_from_wire() {
        let b = Board::from_layout("4k3/8/8/8/8/8/4P3/4K3").unwrap();
        let game = Game::from_wire(&b.as_wire(), BoardSize::STANDARD, Color::White).unwrap();
        assert_eq!(game.legal_moves(c(6, 4)), &[c(5, 4)]);
        assert!(Game::from_wire("", BoardSize::STANDARD, Color::White).is_err());
    }

    #[test]
    fn test_king_not_captured() {
        // loaded with Black already in check and White to move
        let b = Board::from_layout("4k3/8/8/8/8/8/8/K3R3").unwrap();
        let mut game = Game::from_wire(&b.as_wire(), BoardSize::STANDARD, Color::White).unwrap();
        assert!(!game.legal_moves(c(7, 4)).contains(&c(0, 4)));
        assert_eq!(
            game.push(c(7, 4), c(0, 4)),
            Err(GameError::IllegalMove {
                src: c(7, 4),
                dst: c(0, 4)
            })
        );
        assert_eq!(game.board().as_layout(), "4k3/8/8/8/8/8/8/K3R3");
        assert_eq!(game.push(c(7, 4), c(7, 5)), Ok(GameStatus::InProgress));
        assert_eq!(game.board().king_pos(Color::Black), c(0, 4));
    }

    fn check_turn(game: &Game) {
        let turn = game.turn();
        assert!(!(turn.checkmated && turn.stalemated));
        assert!(!turn.moves.is_empty() || turn.checkmated || turn.stalemated);
        assert_eq!(turn.checked, game.board().is_check(game.side()));

        let side = game.side();
        for (src, dst) in turn.moves.moves() {
            let mut b = game.board().clone();
            assert!(make::apply(&mut b, src, dst, turn.moves.get(src)));
            assert!(!b.is_check(side), "move {} {} exposes the king", src, dst);
        }
    }

    fn random_playout(size: BoardSize, rules: Rules, seed: u64, plies: usize) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = Game::with_rules(Board::initial(size), Color::White, rules);
        for _ in 0..plies {
            check_turn(&game);
            if game.is_finished() {
                break;
            }
            let moves: Vec<(Coord, Coord)> = game.turn().moves.moves().collect();
            let (src, dst) = moves[rng.gen_range(0..moves.len())];
            let mover = game.side();
            game.push(src, dst).unwrap();
            assert!(!game.board().is_check(mover));
        }
    }

    #[test]
    fn test_random_playouts() {
        for seed in 0..8 {
            random_playout(BoardSize::STANDARD, Rules::default(), seed, 150);
        }
        for seed in 8..12 {
            random_playout(BoardSize::STANDARD, Rules::strict(), seed, 150);
        }
        for seed in 12..14 {
            random_playout(BoardSize::new(10).unwrap(), Rules::default(), seed, 100);
        }
    }
}
