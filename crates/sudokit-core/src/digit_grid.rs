//! A plain digit grid with text parsing and display.

use std::{
    fmt::{self, Display, Write as _},
    str::FromStr,
};

use derive_more::{Display, Error};

use crate::{digit::Digit, position::Position};

/// A 9x9 grid of optional digits.
///
/// `DigitGrid` stores decided cell values without candidate information.
/// It is the exchange format between the candidate engine, the generator,
/// and text input/output.
///
/// # Text format
///
/// Parsing accepts digits `1`-`9` for filled cells and `.`, `_`, or `0` for
/// empty cells; all whitespace is ignored. Exactly 81 cells must be present.
/// `Display` emits nine rows with 3-cell groups separated by spaces, using
/// `_` for empty cells, so parsing and display round-trip.
///
/// # Examples
///
/// ```
/// use sudokit_core::{Digit, DigitGrid, Position};
///
/// let grid: DigitGrid = "
///     53_ _7_ ___
///     6__ 195 ___
///     _98 ___ _6_
///     8__ _6_ __3
///     4__ 8_3 __1
///     7__ _2_ __6
///     _6_ ___ 28_
///     ___ 419 __5
///     ___ _8_ _79
/// "
/// .parse()?;
///
/// assert_eq!(grid.get(Position::new(0, 0)), Some(Digit::D5));
/// assert_eq!(grid.get(Position::new(2, 0)), None);
/// # Ok::<(), sudokit_core::ParseGridError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitGrid {
    cells: [Option<Digit>; 81],
}

/// Error parsing a [`DigitGrid`] from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum ParseGridError {
    /// A character other than `1`-`9`, `.`, `_`, `0`, or whitespace was found.
    #[display("unexpected character {ch:?} in grid")]
    UnexpectedChar {
        /// The offending character.
        ch: char,
    },
    /// The input contained a number of cells other than 81.
    #[display("expected 81 cells, found {found}")]
    WrongCellCount {
        /// Number of cells found in the input.
        found: usize,
    },
}

impl DigitGrid {
    /// Creates an empty grid.
    #[must_use]
    pub const fn new() -> Self {
        Self { cells: [None; 81] }
    }

    /// Returns the digit at a position, or `None` if the cell is empty.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<Digit> {
        self.cells[usize::from(pos.index())]
    }

    /// Sets the digit at a position.
    pub fn set(&mut self, pos: Position, digit: Digit) {
        self.cells[usize::from(pos.index())] = Some(digit);
    }

    /// Clears the cell at a position.
    pub fn clear(&mut self, pos: Position) {
        self.cells[usize::from(pos.index())] = None;
    }

    /// Returns the number of filled cells.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Returns `true` if all 81 cells are filled.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Returns an iterator over `(Position, Digit)` pairs of filled cells,
    /// in row-major order.
    pub fn filled_cells(&self) -> impl Iterator<Item = (Position, Digit)> {
        Position::all().filter_map(|pos| self.get(pos).map(|digit| (pos, digit)))
    }
}

impl Default for DigitGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for DigitGrid {
    type Err = ParseGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut grid = Self::new();
        let mut count = 0;
        for ch in s.chars() {
            if ch.is_whitespace() {
                continue;
            }
            let digit = match ch {
                '.' | '_' | '0' => None,
                '1'..='9' => Digit::new(ch as u8 - b'0'),
                _ => return Err(ParseGridError::UnexpectedChar { ch }),
            };
            if count >= 81 {
                return Err(ParseGridError::WrongCellCount { found: count + 1 });
            }
            #[expect(clippy::cast_possible_truncation)]
            if let Some(digit) = digit {
                grid.set(Position::from_index(count as u8), digit);
            }
            count += 1;
        }
        if count != 81 {
            return Err(ParseGridError::WrongCellCount { found: count });
        }
        Ok(grid)
    }
}

impl Display for DigitGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..9 {
            if y > 0 {
                f.write_char('\n')?;
            }
            for x in 0..9 {
                if x > 0 && x % 3 == 0 {
                    f.write_char(' ')?;
                }
                match self.get(Position::new(x, y)) {
                    Some(digit) => write!(f, "{digit}")?,
                    None => f.write_char('_')?,
                }
            }
        }
        Ok(())
    }
}
