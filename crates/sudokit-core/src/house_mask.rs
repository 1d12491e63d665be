//! A 9-bit mask over the cells of a single house.

use std::{
    fmt,
    iter::FusedIterator,
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not},
};

/// A bitmask over the nine cells of a house (row, column, or box).
///
/// Bit `i` represents cell index `i` (0-8) within the house. Cell indices
/// map to absolute positions via
/// [`House::position_from_cell_index`](crate::House::position_from_cell_index).
///
/// A mask with exactly one bit set within a digit's house mask is a hidden
/// single; exactly two bits form a conjugate pair (a strong link).
///
/// # Examples
///
/// ```
/// use sudokit_core::HouseMask;
///
/// let mut mask = HouseMask::new();
/// mask.insert(0);
/// mask.insert(4);
/// mask.insert(8);
/// assert_eq!(mask.len(), 3);
/// assert_eq!(mask.as_single(), None);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct HouseMask(u16);

const MASK: u16 = 0x1FF;

impl HouseMask {
    /// The empty mask.
    pub const EMPTY: Self = Self(0);

    /// The mask covering all nine cells.
    pub const FULL: Self = Self(MASK);

    /// Creates an empty mask.
    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Creates a mask containing a single cell index.
    ///
    /// # Panics
    ///
    /// Panics if `cell` is 9 or greater.
    #[must_use]
    pub const fn from_elem(cell: u8) -> Self {
        assert!(cell < 9);
        Self(1 << cell)
    }

    /// Inserts a cell index. Returns `true` if it was not already present.
    ///
    /// # Panics
    ///
    /// Panics if `cell` is 9 or greater.
    pub const fn insert(&mut self, cell: u8) -> bool {
        assert!(cell < 9);
        let prev = self.0;
        self.0 |= 1 << cell;
        self.0 != prev
    }

    /// Removes a cell index. Returns `true` if it was present.
    ///
    /// # Panics
    ///
    /// Panics if `cell` is 9 or greater.
    pub const fn remove(&mut self, cell: u8) -> bool {
        assert!(cell < 9);
        let prev = self.0;
        self.0 &= !(1 << cell);
        self.0 != prev
    }

    /// Returns `true` if the mask contains the cell index.
    ///
    /// # Panics
    ///
    /// Panics if `cell` is 9 or greater.
    #[must_use]
    pub const fn contains(self, cell: u8) -> bool {
        assert!(cell < 9);
        self.0 & (1 << cell) != 0
    }

    /// Returns the number of cells in the mask.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns `true` if the mask is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the sole cell index if the mask has exactly one bit set.
    #[must_use]
    pub fn as_single(self) -> Option<u8> {
        if self.len() != 1 {
            return None;
        }
        #[expect(clippy::cast_possible_truncation)]
        let index = self.0.trailing_zeros() as u8;
        Some(index)
    }

    /// Returns both cell indices in ascending order if the mask has exactly
    /// two bits set.
    #[must_use]
    pub fn as_double(self) -> Option<(u8, u8)> {
        if self.len() != 2 {
            return None;
        }
        let mut iter = self.iter();
        Some((iter.next()?, iter.next()?))
    }

    /// Returns `true` if every cell in `self` is also in `other`.
    #[must_use]
    pub const fn is_subset(self, other: Self) -> bool {
        self.0 & !other.0 == 0
    }

    /// Returns an iterator over the cell indices in ascending order.
    #[must_use]
    pub const fn iter(self) -> HouseMaskIter {
        HouseMaskIter(self.0)
    }
}

impl Default for HouseMask {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Debug for HouseMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HouseMask")?;
        f.debug_set().entries(self.iter()).finish()
    }
}

impl BitAnd for HouseMask {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for HouseMask {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl BitOr for HouseMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for HouseMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl Not for HouseMask {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0 & MASK)
    }
}

impl FromIterator<u8> for HouseMask {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = u8>,
    {
        let mut mask = Self::EMPTY;
        for cell in iter {
            mask.insert(cell);
        }
        mask
    }
}

impl IntoIterator for HouseMask {
    type Item = u8;
    type IntoIter = HouseMaskIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the cell indices of a [`HouseMask`], in ascending order.
#[derive(Debug, Clone)]
pub struct HouseMaskIter(u16);

impl Iterator for HouseMaskIter {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            return None;
        }
        #[expect(clippy::cast_possible_truncation)]
        let index = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1;
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as usize;
        (len, Some(len))
    }
}

impl FusedIterator for HouseMaskIter {}
impl ExactSizeIterator for HouseMaskIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let mut mask = HouseMask::new();
        assert!(mask.insert(3));
        assert!(!mask.insert(3));
        assert!(mask.contains(3));
        assert_eq!(mask.len(), 1);
        assert_eq!(mask.as_single(), Some(3));
        assert!(mask.remove(3));
        assert!(mask.is_empty());
    }

    #[test]
    fn test_as_double() {
        assert_eq!(HouseMask::from_iter([7, 2]).as_double(), Some((2, 7)));
        assert_eq!(HouseMask::from_elem(0).as_double(), None);
        assert_eq!(HouseMask::FULL.as_double(), None);
    }

    #[test]
    fn test_operators() {
        let a = HouseMask::from_iter([0, 1, 2]);
        let b = HouseMask::from_iter([1, 2, 3]);
        assert_eq!(a & b, HouseMask::from_iter([1, 2]));
        assert_eq!((a | b).len(), 4);
        assert_eq!((!HouseMask::FULL), HouseMask::EMPTY);
        assert!((a & b).is_subset(a));
    }

    #[test]
    #[should_panic(expected = "cell < 9")]
    fn test_rejects_out_of_range() {
        let mut mask = HouseMask::new();
        mask.insert(9);
    }
}
