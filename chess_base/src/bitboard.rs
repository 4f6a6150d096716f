use crate::types::{Coord, MAX_CELLS};
use derive_more::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};
use std::fmt;
use std::iter::{FromIterator, IntoIterator};

/// Set of squares
///
/// Bit `i` corresponds to the square with [`Coord::index()`] equal to `i`, so the same set
/// works for every supported board size.
#[derive(
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    BitAnd,
    BitAndAssign,
    BitOr,
    BitOrAssign,
    BitXor,
    BitXorAssign,
    Not,
)]
pub struct SquareSet(u128);

impl SquareSet {
    pub const EMPTY: SquareSet = SquareSet(0);

    pub const fn from_coord(coord: Coord) -> SquareSet {
        SquareSet(1_u128 << coord.index())
    }

    pub const fn with(self, coord: Coord) -> SquareSet {
        SquareSet(self.0 | (1_u128 << coord.index()))
    }

    pub const fn without(self, coord: Coord) -> SquareSet {
        SquareSet(self.0 & !(1_u128 << coord.index()))
    }

    pub fn set(&mut self, coord: Coord) {
        *self = self.with(coord);
    }

    pub const fn has(&self, coord: Coord) -> bool {
        (self.0 >> coord.index()) & 1 != 0
    }

    pub const fn len(&self) -> u32 {
        self.0.count_ones()
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_nonempty(&self) -> bool {
        self.0 != 0
    }
}

impl fmt::Debug for SquareSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.debug_set().entries(*self).finish()
    }
}

impl FromIterator<Coord> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        let mut res = SquareSet::EMPTY;
        for c in iter {
            res.set(c);
        }
        res
    }
}

pub struct Iter(u128);

impl Iterator for Iter {
    type Item = Coord;

    #[inline]
    fn next(&mut self) -> Option<Coord> {
        if self.0 == 0 {
            return None;
        }
        let bit = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        debug_assert!(bit < MAX_CELLS);
        Some(Coord::from_index(bit))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for Iter {}

impl IntoIterator for SquareSet {
    type Item = Coord;
    type IntoIter = Iter;

    #[inline]
    fn into_iter(self) -> Iter {
        Iter(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iter() {
        let coords = [Coord::new(0, 0), Coord::new(3, 7), Coord::new(10, 10)];
        let set: SquareSet = coords.iter().copied().collect();
        assert_eq!(set.len(), 3);
        assert_eq!(set.into_iter().collect::<Vec<_>>(), coords.to_vec());
    }

    #[test]
    fn test_ops() {
        let a = SquareSet::from_coord(Coord::new(1, 1));
        let b = SquareSet::EMPTY.with(Coord::new(1, 1)).with(Coord::new(2, 2));
        assert_eq!(a & b, a);
        assert_eq!((a ^ b).into_iter().collect::<Vec<_>>(), vec![Coord::new(2, 2)]);
        assert!((a | b).has(Coord::new(2, 2)));
        assert!(!b.without(Coord::new(2, 2)).has(Coord::new(2, 2)));
        assert!((!SquareSet::EMPTY).is_nonempty());
        assert!(SquareSet::EMPTY.is_empty());
    }
}
