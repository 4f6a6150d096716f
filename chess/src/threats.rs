//! Threat maps, i.e. which pieces of one side cover which squares

use crate::bitboard::SquareSet;
use crate::board::Board;
use crate::movegen::{self, MaybeReachPush, Mode};
use crate::types::{BoardSize, Color, Coord, MAX_CELLS};

use std::convert::Infallible;

/// For every square, the origins of the pieces of one side which attack or defend it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreatMap {
    by: Color,
    size: BoardSize,
    origins: [SquareSet; MAX_CELLS],
}

struct Recorder<'a> {
    map: &'a mut ThreatMap,
    src: Coord,
}

impl<'a> MaybeReachPush for Recorder<'a> {
    type Err = Infallible;

    #[inline]
    fn push_move(&mut self, c: Coord) -> Result<(), Infallible> {
        self.map.origins[c.index()].set(self.src);
        Ok(())
    }

    #[inline]
    fn push_protect(&mut self, c: Coord) -> Result<(), Infallible> {
        self.push_move(c)
    }
}

impl ThreatMap {
    /// Side whose pieces are recorded in the map
    #[inline]
    pub fn by(&self) -> Color {
        self.by
    }

    /// Returns the squares of all the pieces which attack or defend `c`
    #[inline]
    pub fn threatened_by(&self, c: Coord) -> SquareSet {
        self.origins[c.index()]
    }

    #[inline]
    pub fn is_threatened(&self, c: Coord) -> bool {
        self.origins[c.index()].is_nonempty()
    }

    /// Returns all the squares covered by at least one piece
    pub fn squares(&self) -> SquareSet {
        self.iter().map(|(c, _)| c).collect()
    }

    /// Iterates over covered squares in row-major order, with the pieces covering them
    pub fn iter(&self) -> impl Iterator<Item = (Coord, SquareSet)> + '_ {
        self.size
            .coords()
            .map(|c| (c, self.origins[c.index()]))
            .filter(|(_, set)| set.is_nonempty())
    }
}

/// Builds the threat map of the pieces of color `by`
///
/// Pawns cover both of their diagonals, even if the diagonal squares are empty.
pub fn threat_map(b: &Board, by: Color) -> ThreatMap {
    let mut map = ThreatMap {
        by,
        size: b.size(),
        origins: [SquareSet::EMPTY; MAX_CELLS],
    };
    for (src, _) in b.pieces(by) {
        let mut rec = Recorder { map: &mut map, src };
        movegen::gen_all(b, src, Mode::Attacks, &mut rec);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attack;

    fn c(row: u8, col: u8) -> Coord {
        Coord::new(row, col)
    }

    #[test]
    fn test_initial() {
        let b = Board::initial(BoardSize::STANDARD);
        let map = threat_map(&b, Color::White);
        assert_eq!(map.by(), Color::White);
        assert_eq!(
            map.threatened_by(c(5, 2)),
            [c(6, 1), c(6, 3), c(7, 1)]
                .into_iter()
                .collect::<SquareSet>()
        );
        assert_eq!(
            map.threatened_by(c(5, 0)),
            [c(6, 1), c(7, 1)]
                .into_iter()
                .collect::<SquareSet>()
        );
        assert!(!map.is_threatened(c(4, 4)));
        assert!(!map.is_threatened(c(7, 0)));
        assert_eq!(map.squares(), attack::attacked_cells(&b, Color::White));
    }

    #[test]
    fn test_pieces() {
        let b = Board::from_layout("4k3/8/8/3q4/8/8/4P3/R3K3").unwrap();

        let map = threat_map(&b, Color::Black);
        assert!(map.threatened_by(c(6, 4)).is_empty());
        assert_eq!(map.threatened_by(c(6, 0)), SquareSet::from_coord(c(3, 3)));
        assert_eq!(map.squares(), attack::attacked_cells(&b, Color::Black));

        let map = threat_map(&b, Color::White);
        assert_eq!(map.threatened_by(c(5, 3)), SquareSet::from_coord(c(6, 4)));
        assert_eq!(map.threatened_by(c(6, 4)), SquareSet::from_coord(c(7, 4)));
        assert!(map.iter().all(|(_, set)| set.is_nonempty()));
        assert_eq!(map.squares(), attack::attacked_cells(&b, Color::White));
    }
}
