//! Board position (x, y) coordinates.

use std::fmt::{self, Display};

use crate::cell_set::CellSet;

/// A cell coordinate on the 9x9 board.
///
/// `x` is the column (0-8, left to right) and `y` is the row (0-8, top to
/// bottom). Positions also map to a row-major index 0-80 used by 81-element
/// containers.
///
/// # Examples
///
/// ```
/// use sudokit_core::Position;
///
/// let pos = Position::new(4, 4);
/// assert_eq!(pos.index(), 40);
/// assert_eq!(pos.box_index(), 4);
/// assert_eq!(Position::from_index(40), pos);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    x: u8,
    y: u8,
}

impl Position {
    /// Creates a position from column `x` and row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `x` or `y` is 9 or greater.
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        assert!(x < 9 && y < 9);
        Self { x, y }
    }

    /// Creates a position from its row-major index (0-80).
    ///
    /// # Panics
    ///
    /// Panics if `index` is 81 or greater.
    #[must_use]
    pub const fn from_index(index: u8) -> Self {
        assert!(index < 81);
        Self {
            x: index % 9,
            y: index / 9,
        }
    }

    /// Creates a position from a box index (0-8) and a cell index within the
    /// box (0-8, left to right, top to bottom).
    ///
    /// # Panics
    ///
    /// Panics if `box_index` or `cell` is 9 or greater.
    #[must_use]
    pub const fn from_box(box_index: u8, cell: u8) -> Self {
        assert!(box_index < 9 && cell < 9);
        Self {
            x: (box_index % 3) * 3 + cell % 3,
            y: (box_index / 3) * 3 + cell / 3,
        }
    }

    /// Returns the column (0-8).
    #[must_use]
    pub const fn x(self) -> u8 {
        self.x
    }

    /// Returns the row (0-8).
    #[must_use]
    pub const fn y(self) -> u8 {
        self.y
    }

    /// Returns the row-major index (0-80).
    #[must_use]
    pub const fn index(self) -> u8 {
        self.y * 9 + self.x
    }

    /// Returns the index of the 3x3 box containing this position (0-8).
    #[must_use]
    pub const fn box_index(self) -> u8 {
        (self.y / 3) * 3 + self.x / 3
    }

    /// Returns the top-left position of the box with the given index.
    ///
    /// # Panics
    ///
    /// Panics if `box_index` is 9 or greater.
    #[must_use]
    pub const fn box_origin(box_index: u8) -> Self {
        Self::from_box(box_index, 0)
    }

    /// Returns the 20 peers of this position: all other cells sharing its
    /// row, column, or box.
    ///
    /// The peer sets are precomputed at compile time.
    ///
    /// # Examples
    ///
    /// ```
    /// use sudokit_core::Position;
    ///
    /// let peers = Position::new(0, 0).house_peers();
    /// assert_eq!(peers.len(), 20);
    /// assert!(!peers.contains(Position::new(0, 0)));
    /// assert!(peers.contains(Position::new(8, 0))); // same row
    /// assert!(peers.contains(Position::new(0, 8))); // same column
    /// assert!(peers.contains(Position::new(1, 1))); // same box
    /// ```
    #[must_use]
    pub fn house_peers(self) -> CellSet {
        CellSet::PEERS[usize::from(self.index())]
    }

    /// Returns an iterator over all 81 positions in row-major order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..81).map(Self::from_index)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
