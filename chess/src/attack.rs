//! King safety oracle
//!
//! Everything here works on pseudo-legal attacks only and never consults the legality filter,
//! so it can serve as the base case for [`legal`](crate::legal).

use crate::bitboard::SquareSet;
use crate::board::Board;
use crate::movegen::{self, MaybeReachPush, Mode};
use crate::types::{Color, Coord};

use std::convert::Infallible;

struct Hit;

/// Stops the generation as soon as the target square is reached
struct HitTarget(Coord);

impl MaybeReachPush for HitTarget {
    type Err = Hit;

    #[inline]
    fn push_move(&mut self, c: Coord) -> Result<(), Hit> {
        if c == self.0 {
            return Err(Hit);
        }
        Ok(())
    }

    #[inline]
    fn push_protect(&mut self, c: Coord) -> Result<(), Hit> {
        self.push_move(c)
    }
}

struct Cover(SquareSet);

impl MaybeReachPush for Cover {
    type Err = Infallible;

    #[inline]
    fn push_move(&mut self, c: Coord) -> Result<(), Infallible> {
        self.0.set(c);
        Ok(())
    }

    #[inline]
    fn push_protect(&mut self, c: Coord) -> Result<(), Infallible> {
        self.0.set(c);
        Ok(())
    }
}

fn attacks_cell(b: &Board, src: Coord, target: Coord) -> bool {
    movegen::gen_into(b, src, Mode::Attacks, &mut HitTarget(target)).is_err()
}

/// Returns `true` if the square `target` is attacked by any piece of color `by`
///
/// Squares occupied by pieces of color `by` count as attacked if another piece of the same
/// color defends them.
pub fn is_cell_attacked(b: &Board, target: Coord, by: Color) -> bool {
    b.pieces(by).any(|(src, _)| attacks_cell(b, src, target))
}

/// Returns `true` if the king of color `c` is attacked by the opponent
#[inline]
pub fn is_in_check(b: &Board, c: Color) -> bool {
    is_cell_attacked(b, b.king_pos(c), c.inv())
}

/// Returns the squares of all the pieces of color `by` which attack `target`
pub fn cell_attackers(b: &Board, target: Coord, by: Color) -> SquareSet {
    b.pieces(by)
        .filter(|&(src, _)| attacks_cell(b, src, target))
        .map(|(src, _)| src)
        .collect()
}

/// Returns all the squares attacked or defended by pieces of color `by`
pub fn attacked_cells(b: &Board, by: Color) -> SquareSet {
    let mut cover = Cover(SquareSet::EMPTY);
    for (src, _) in b.pieces(by) {
        movegen::gen_all(b, src, Mode::Attacks, &mut cover);
    }
    cover.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BoardSize;

    #[test]
    fn test_initial() {
        let b = Board::initial(BoardSize::STANDARD);
        assert!(!is_in_check(&b, Color::White));
        assert!(!is_in_check(&b, Color::Black));

        let cells = attacked_cells(&b, Color::White);
        for col in 0..8 {
            assert!(cells.has(Coord::new(5, col)));
            assert!(!cells.has(Coord::new(4, col)));
        }
        let cells = attacked_cells(&b, Color::Black);
        for col in 0..8 {
            assert!(cells.has(Coord::new(2, col)));
            assert!(!cells.has(Coord::new(3, col)));
        }
    }

    #[test]
    fn test_slider_check() {
        let b = Board::from_layout("4k3/8/8/8/8/8/8/4K2r").unwrap();
        assert!(is_in_check(&b, Color::White));
        assert!(!is_in_check(&b, Color::Black));
        assert_eq!(
            b.checkers(Color::White),
            SquareSet::from_coord(Coord::new(7, 7))
        );

        let b = Board::from_layout("4k3/8/8/8/8/8/8/4K1Nr").unwrap();
        assert!(!b.is_check(Color::White));
        assert!(b.checkers(Color::White).is_empty());
    }

    #[test]
    fn test_pawn_check() {
        let b = Board::from_layout("8/8/8/8/8/3p4/4K3/k7").unwrap();
        assert!(is_in_check(&b, Color::White));

        // pawns don't attack forward
        let b = Board::from_layout("8/8/8/8/8/4p3/4K3/k7").unwrap();
        assert!(!is_in_check(&b, Color::White));

        let b = Board::from_layout("8/8/8/3k4/4P3/8/8/K7").unwrap();
        assert!(is_in_check(&b, Color::Black));
        let b = Board::from_layout("8/8/8/4k3/4P3/8/8/K7").unwrap();
        assert!(!is_in_check(&b, Color::Black));
    }

    #[test]
    fn test_knight_check() {
        let b = Board::from_layout("8/8/8/8/8/5n2/8/4K2k").unwrap();
        assert!(is_in_check(&b, Color::White));
        assert_eq!(
            cell_attackers(&b, Coord::new(7, 4), Color::Black),
            SquareSet::from_coord(Coord::new(5, 5))
        );
    }

    #[test]
    fn test_double_check() {
        let b = Board::from_layout("4r2k/8/8/8/8/5n2/8/4K3").unwrap();
        let checkers = b.checkers(Color::White);
        assert_eq!(checkers.len(), 2);
        assert!(checkers.has(Coord::new(0, 4)));
        assert!(checkers.has(Coord::new(5, 5)));
    }

    #[test]
    fn test_defended() {
        let b = Board::from_layout("4k3/8/8/8/8/8/4P3/4K3").unwrap();
        assert!(is_cell_attacked(&b, Coord::new(6, 4), Color::White));
        assert!(attacked_cells(&b, Color::White).has(Coord::new(6, 4)));
        assert!(!is_cell_attacked(&b, Coord::new(6, 4), Color::Black));
        // the king doesn't defend itself
        assert!(!is_cell_attacked(&b, Coord::new(7, 4), Color::White));
    }
}
