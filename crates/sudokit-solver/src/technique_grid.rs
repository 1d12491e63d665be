use sudokit_core::{
    CandidateGrid, CellSet, ConsistencyError, Digit, DigitGrid, DigitSet, House, HouseMask,
    Position,
};

/// Solver state for technique-based solving.
///
/// Wraps a [`CandidateGrid`] and exposes the surface techniques use to
/// query and mutate candidates, plus solver bookkeeping. The main piece of
/// bookkeeping is the set of decided cells whose peer eliminations have
/// already been applied, which lets the naked single technique skip cells
/// it has already propagated.
///
/// # Examples
///
/// ```
/// use sudokit_solver::TechniqueGrid;
///
/// let grid = TechniqueGrid::new();
/// assert!(grid.decided_cells().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct TechniqueGrid {
    candidates: CandidateGrid,
    /// Decided cells whose peer eliminations have already been applied.
    decided_propagated: CellSet,
}

impl From<DigitGrid> for TechniqueGrid {
    fn from(grid: DigitGrid) -> Self {
        CandidateGrid::from(grid).into()
    }
}

impl From<CandidateGrid> for TechniqueGrid {
    fn from(candidates: CandidateGrid) -> Self {
        Self {
            candidates,
            decided_propagated: CellSet::EMPTY,
        }
    }
}

impl Default for TechniqueGrid {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TechniqueGrid {
    /// Creates an empty technique grid with all candidates available.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::from(CandidateGrid::new())
    }

    /// Builds a technique grid from a digit grid.
    #[inline]
    #[must_use]
    pub fn from_digit_grid(grid: &DigitGrid) -> Self {
        Self::from(CandidateGrid::from_digit_grid(grid))
    }

    /// Consumes the wrapper and returns the underlying candidate grid.
    #[inline]
    #[must_use]
    pub fn into_candidates(self) -> CandidateGrid {
        self.candidates
    }

    /// Returns a digit grid containing only decided cells.
    #[inline]
    #[must_use]
    pub fn to_digit_grid(&self) -> DigitGrid {
        self.candidates.to_digit_grid()
    }

    /// Places a digit at a position by removing all other candidates at
    /// that cell. Eliminations are not propagated to peers.
    #[inline]
    pub fn place(&mut self, pos: Position, digit: Digit) -> bool {
        self.candidates.place(pos, digit)
    }

    /// Returns `true` if placing the digit would change the grid.
    #[inline]
    #[must_use]
    pub fn would_place_change(&self, pos: Position, digit: Digit) -> bool {
        self.candidates.would_place_change(pos, digit)
    }

    /// Removes a specific digit as a candidate at a position.
    #[inline]
    pub fn remove_candidate(&mut self, pos: Position, digit: Digit) -> bool {
        self.candidates.remove_candidate(pos, digit)
    }

    /// Returns `true` if removing the candidate would change the grid.
    #[inline]
    #[must_use]
    pub fn would_remove_candidate_change(&self, pos: Position, digit: Digit) -> bool {
        self.candidates.would_remove_candidate_change(pos, digit)
    }

    /// Removes a candidate digit from all positions specified by a mask.
    #[inline]
    pub fn remove_candidate_with_mask(&mut self, mask: CellSet, digit: Digit) -> bool {
        self.candidates.remove_candidate_with_mask(mask, digit)
    }

    /// Returns `true` if removing the digit from the masked positions would
    /// change the grid.
    #[inline]
    #[must_use]
    pub fn would_remove_candidate_with_mask_change(&self, mask: CellSet, digit: Digit) -> bool {
        self.candidates
            .would_remove_candidate_with_mask_change(mask, digit)
    }

    /// Removes a set of candidate digits from all positions specified by a
    /// mask.
    #[inline]
    pub fn remove_candidate_set_with_mask(&mut self, mask: CellSet, digits: DigitSet) -> bool {
        self.candidates.remove_candidate_set_with_mask(mask, digits)
    }

    /// Returns `true` if removing the digit set from the masked positions
    /// would change the grid.
    #[inline]
    #[must_use]
    pub fn would_remove_candidate_set_with_mask_change(
        &self,
        mask: CellSet,
        digits: DigitSet,
    ) -> bool {
        self.candidates
            .would_remove_candidate_set_with_mask_change(mask, digits)
    }

    /// Returns the set of all positions where the specified digit can be
    /// placed.
    #[inline]
    #[must_use]
    pub fn digit_positions(&self, digit: Digit) -> CellSet {
        self.candidates.digit_positions(digit)
    }

    /// Returns the set of candidate digits that can be placed at a position.
    #[inline]
    #[must_use]
    pub fn candidates_at(&self, pos: Position) -> DigitSet {
        self.candidates.candidates_at(pos)
    }

    /// Returns a bitmask of candidate positions in the specified house for
    /// the digit.
    #[inline]
    #[must_use]
    pub fn house_mask(&self, house: House, digit: Digit) -> HouseMask {
        self.candidates.house_mask(house, digit)
    }

    /// Returns a bitmask of candidate positions in the specified row for
    /// the digit.
    #[inline]
    #[must_use]
    pub fn row_mask(&self, y: u8, digit: Digit) -> HouseMask {
        self.candidates.row_mask(y, digit)
    }

    /// Returns a bitmask of candidate positions in the specified column for
    /// the digit.
    #[inline]
    #[must_use]
    pub fn col_mask(&self, x: u8, digit: Digit) -> HouseMask {
        self.candidates.col_mask(x, digit)
    }

    /// Returns a bitmask of candidate positions in the specified box for
    /// the digit.
    #[inline]
    #[must_use]
    pub fn box_mask(&self, box_index: u8, digit: Digit) -> HouseMask {
        self.candidates.box_mask(box_index, digit)
    }

    /// Checks whether the candidate grid is consistent.
    ///
    /// # Errors
    ///
    /// Returns [`ConsistencyError`] if the grid contains contradictions.
    #[inline]
    pub fn check_consistency(&self) -> Result<(), ConsistencyError> {
        self.candidates.check_consistency()
    }

    /// Returns whether the candidate grid is fully solved.
    ///
    /// # Errors
    ///
    /// Returns [`ConsistencyError`] if the grid contains contradictions.
    #[inline]
    pub fn is_solved(&self) -> Result<bool, ConsistencyError> {
        self.candidates.is_solved()
    }

    /// Returns all positions that have exactly one candidate (decided
    /// cells).
    #[inline]
    #[must_use]
    pub fn decided_cells(&self) -> CellSet {
        self.candidates.decided_cells()
    }

    /// Classifies all grid positions by candidate count.
    ///
    /// See [`CandidateGrid::classify_cells`].
    #[inline]
    #[must_use]
    pub fn classify_cells<const N: usize>(&self) -> [CellSet; N] {
        self.candidates.classify_cells()
    }

    /// Returns the set of decided cells that have already been propagated.
    #[inline]
    #[must_use]
    pub fn decided_propagated(&self) -> CellSet {
        self.decided_propagated
    }

    /// Marks a decided cell as having its peer eliminations applied.
    #[inline]
    pub fn insert_decided_propagated(&mut self, pos: Position) {
        self.decided_propagated.insert(pos);
    }
}
