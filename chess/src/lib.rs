//! # Kingsafe
//!
//! Chess rules engine: legal move generation constrained by king safety, detection of check,
//! checkmate and stalemate, castling and pawn promotion. Boards from 8x8 up to 11x11 are
//! supported.
//!
//! # Example
//!
//! ```
//! use kingsafe::{BoardSize, Color, Coord, GameStatus};
//!
//! let mut setup = kingsafe::initialise(BoardSize::STANDARD);
//! let turn = kingsafe::legal_moves_for_side(&setup.board, Color::White);
//! let (src, dst) = (Coord::new(6, 4), Coord::new(4, 4));
//! assert!(kingsafe::apply(&mut setup.board, src, dst, turn.moves.get(src)));
//!
//! let turn = kingsafe::legal_moves_for_side(&setup.board, Color::Black);
//! assert_eq!(turn.status(), GameStatus::InProgress);
//!
//! let wire = kingsafe::serialise(setup.board.raw());
//! let board = kingsafe::deserialise(&wire, BoardSize::STANDARD).unwrap();
//! assert_eq!(board.as_layout(), setup.board.as_layout());
//! ```

pub mod attack;
pub mod board;
pub mod game;
pub mod legal;
pub mod make;
pub mod movegen;
pub mod rules;
pub mod threats;
pub mod turn;
pub mod wire;

pub use kingsafe_base::{bitboard, geometry, types};

pub use bitboard::SquareSet;
pub use board::{initialise, Board, RawBoard, Setup};
pub use game::{Game, GameError};
pub use make::{apply, Move, MoveKind};
pub use rules::{CastlingSafety, Rules};
pub use threats::{threat_map, ThreatMap};
pub use turn::{legal_moves_for_side, legal_moves_with, GameStatus, LegalMoveSet, TurnState};
pub use types::{BoardSize, CastlingSide, Cell, Color, Coord, Piece};
pub use wire::{deserialise, serialise, WireError};
