//! An 81-bit set of board positions.

use std::{
    fmt,
    iter::FusedIterator,
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not},
};

use crate::{house::House, house_mask::HouseMask, position::Position};

/// A set of board positions packed into a `u128`.
///
/// Bit `i` represents the position with row-major index `i` (0-80). This is
/// the per-digit bitboard representation: a [`CandidateGrid`] stores one
/// `CellSet` per digit, answering "where can this digit still go?".
///
/// The row, column, box, and peer lookup tables are computed at compile
/// time and shared by every solver component.
///
/// [`CandidateGrid`]: crate::CandidateGrid
///
/// # Examples
///
/// ```
/// use sudokit_core::{CellSet, Position};
///
/// let mut set = CellSet::FULL;
/// set.remove(Position::new(0, 0));
/// assert_eq!(set.len(), 80);
///
/// // Cells in row 4 that are peers of (0, 4):
/// let row = CellSet::ROW_POSITIONS[4];
/// let peers = Position::new(0, 4).house_peers();
/// assert_eq!((row & peers).len(), 8);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellSet(u128);

const MASK: u128 = (1 << 81) - 1;

const ROW: u128 = 0x1FF;
const COLUMN: u128 = {
    let mut bits = 0;
    let mut y = 0;
    while y < 9 {
        bits |= 1 << (y * 9);
        y += 1;
    }
    bits
};
const BOX: u128 = 0b111 | (0b111 << 9) | (0b111 << 18);

impl CellSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// The set containing all 81 positions.
    pub const FULL: Self = Self(MASK);

    /// `ROW_POSITIONS[y]` contains the nine positions of row `y`.
    pub const ROW_POSITIONS: [Self; 9] = {
        let mut rows = [Self::EMPTY; 9];
        let mut y = 0;
        while y < 9 {
            rows[y] = Self(ROW << (y * 9));
            y += 1;
        }
        rows
    };

    /// `COLUMN_POSITIONS[x]` contains the nine positions of column `x`.
    pub const COLUMN_POSITIONS: [Self; 9] = {
        let mut columns = [Self::EMPTY; 9];
        let mut x = 0;
        while x < 9 {
            columns[x] = Self(COLUMN << x);
            x += 1;
        }
        columns
    };

    /// `BOX_POSITIONS[i]` contains the nine positions of box `i`.
    pub const BOX_POSITIONS: [Self; 9] = {
        let mut boxes = [Self::EMPTY; 9];
        let mut i = 0;
        while i < 9 {
            boxes[i] = Self(BOX << ((i / 3) * 27 + (i % 3) * 3));
            i += 1;
        }
        boxes
    };

    /// `PEERS[i]` contains the 20 peers of the position with index `i`:
    /// every other cell in its row, column, and box.
    pub const PEERS: [Self; 81] = {
        let mut peers = [Self::EMPTY; 81];
        let mut i = 0;
        while i < 81 {
            let x = i % 9;
            let y = i / 9;
            let box_index = (y / 3) * 3 + x / 3;
            let mut bits = Self::ROW_POSITIONS[y].0
                | Self::COLUMN_POSITIONS[x].0
                | Self::BOX_POSITIONS[box_index].0;
            bits &= !(1 << i);
            peers[i] = Self(bits);
            i += 1;
        }
        peers
    };

    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Creates a set containing a single position.
    #[must_use]
    pub const fn from_elem(pos: Position) -> Self {
        Self(1 << pos.index())
    }

    /// Inserts a position. Returns `true` if it was not already present.
    pub const fn insert(&mut self, pos: Position) -> bool {
        let prev = self.0;
        self.0 |= 1 << pos.index();
        self.0 != prev
    }

    /// Removes a position. Returns `true` if it was present.
    pub const fn remove(&mut self, pos: Position) -> bool {
        let prev = self.0;
        self.0 &= !(1 << pos.index());
        self.0 != prev
    }

    /// Returns `true` if the set contains the position.
    #[must_use]
    pub const fn contains(self, pos: Position) -> bool {
        self.0 & (1 << pos.index()) != 0
    }

    /// Returns the number of positions in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the sole position if the set has exactly one element.
    #[must_use]
    pub fn as_single(self) -> Option<Position> {
        if self.len() != 1 {
            return None;
        }
        #[expect(clippy::cast_possible_truncation)]
        let index = self.0.trailing_zeros() as u8;
        Some(Position::from_index(index))
    }

    /// Returns both positions in index order if the set has exactly two
    /// elements.
    #[must_use]
    pub fn as_double(self) -> Option<(Position, Position)> {
        if self.len() != 2 {
            return None;
        }
        let mut iter = self.iter();
        Some((iter.next()?, iter.next()?))
    }

    /// Returns the union of `self` and `other`.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns the intersection of `self` and `other`.
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Returns the positions in `self` that are not in `other`.
    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Returns `true` if every position in `self` is also in `other`.
    #[must_use]
    pub const fn is_subset(self, other: Self) -> bool {
        self.0 & !other.0 == 0
    }

    /// Returns `true` if every position in `other` is also in `self`.
    #[must_use]
    pub const fn is_superset(self, other: Self) -> bool {
        other.is_subset(self)
    }

    /// Projects this set onto a house, as a mask of cell indices within it.
    ///
    /// # Examples
    ///
    /// ```
    /// use sudokit_core::{CellSet, House, Position};
    ///
    /// let set = CellSet::from_iter([Position::new(0, 4), Position::new(7, 4)]);
    /// let mask = set.house_mask(House::Row { y: 4 });
    /// assert_eq!(mask.as_double(), Some((0, 7)));
    /// ```
    #[must_use]
    pub fn house_mask(self, house: House) -> HouseMask {
        let mut mask = HouseMask::new();
        for i in 0..9 {
            if self.contains(house.position_from_cell_index(i)) {
                mask.insert(i);
            }
        }
        mask
    }

    /// Returns an iterator over the positions in row-major index order.
    #[must_use]
    pub const fn iter(self) -> CellSetIter {
        CellSetIter(self.0)
    }
}

impl Default for CellSet {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Debug for CellSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CellSet")?;
        f.debug_set()
            .entries(self.iter().map(|pos| (pos.x(), pos.y())))
            .finish()
    }
}

impl BitAnd for CellSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.intersection(rhs)
    }
}

impl BitAndAssign for CellSet {
    fn bitand_assign(&mut self, rhs: Self) {
        *self = self.intersection(rhs);
    }
}

impl BitOr for CellSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for CellSet {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl Not for CellSet {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0 & MASK)
    }
}

impl FromIterator<Position> for CellSet {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = Position>,
    {
        let mut set = Self::EMPTY;
        for pos in iter {
            set.insert(pos);
        }
        set
    }
}

impl IntoIterator for CellSet {
    type Item = Position;
    type IntoIter = CellSetIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the positions of a [`CellSet`], in row-major index order.
#[derive(Debug, Clone)]
pub struct CellSetIter(u128);

impl Iterator for CellSetIter {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            return None;
        }
        #[expect(clippy::cast_possible_truncation)]
        let index = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1;
        Some(Position::from_index(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as usize;
        (len, Some(len))
    }
}

impl FusedIterator for CellSetIter {}
impl ExactSizeIterator for CellSetIter {}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_row_column_box_tables_partition_the_board() {
        for table in [
            CellSet::ROW_POSITIONS,
            CellSet::COLUMN_POSITIONS,
            CellSet::BOX_POSITIONS,
        ] {
            let mut union = CellSet::EMPTY;
            for set in table {
                assert_eq!(set.len(), 9);
                assert!((union & set).is_empty(), "houses must not overlap");
                union |= set;
            }
            assert_eq!(union, CellSet::FULL);
        }
    }

    #[test]
    fn test_tables_agree_with_position_math() {
        for pos in Position::all() {
            assert!(CellSet::ROW_POSITIONS[usize::from(pos.y())].contains(pos));
            assert!(CellSet::COLUMN_POSITIONS[usize::from(pos.x())].contains(pos));
            assert!(CellSet::BOX_POSITIONS[usize::from(pos.box_index())].contains(pos));
        }
    }

    #[test]
    fn test_peer_table() {
        for pos in Position::all() {
            let peers = CellSet::PEERS[usize::from(pos.index())];
            assert_eq!(peers.len(), 20);
            assert!(!peers.contains(pos));
        }
    }

    #[test]
    fn test_house_mask_projection() {
        let set = CellSet::from_iter([
            Position::new(2, 0),
            Position::new(2, 5),
            Position::new(2, 8),
        ]);
        let mask = set.house_mask(House::Column { x: 2 });
        assert_eq!(mask.iter().collect::<Vec<_>>(), vec![0, 5, 8]);
        assert!(set.house_mask(House::Column { x: 3 }).is_empty());
    }

    #[test]
    fn test_as_single_as_double() {
        let a = Position::new(1, 2);
        let b = Position::new(8, 8);
        assert_eq!(CellSet::from_elem(a).as_single(), Some(a));
        assert_eq!(CellSet::from_iter([b, a]).as_double(), Some((a, b)));
        assert_eq!(CellSet::FULL.as_single(), None);
    }

    fn arb_cell_set() -> impl Strategy<Value = CellSet> {
        proptest::collection::vec(0u8..81, 0..30)
            .prop_map(|indices| indices.into_iter().map(Position::from_index).collect())
    }

    proptest! {
        #[test]
        fn prop_complement_partitions(set in arb_cell_set()) {
            prop_assert_eq!(set | !set, CellSet::FULL);
            prop_assert_eq!(set & !set, CellSet::EMPTY);
        }

        #[test]
        fn prop_iter_round_trip(set in arb_cell_set()) {
            prop_assert_eq!(CellSet::from_iter(set.iter()), set);
        }

        #[test]
        fn prop_iter_is_sorted(set in arb_cell_set()) {
            let indices: Vec<_> = set.iter().map(Position::index).collect();
            prop_assert!(indices.is_sorted());
        }
    }
}
