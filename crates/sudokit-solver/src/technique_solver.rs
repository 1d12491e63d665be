use log::{debug, trace};

use crate::{
    SolverError, TechniqueGrid,
    technique::{self, BoxedTechnique},
    technique_step::BoxedTechniqueStep,
};

/// Statistics collected during technique-based solving.
///
/// Tracks which techniques were applied and how many times, as well as the
/// total number of solving steps taken. The per-technique counts double as
/// a difficulty profile for a puzzle: a puzzle whose counts are all in the
/// fundamental techniques is easy, one that needed chains is not.
///
/// # Examples
///
/// ```
/// use sudokit_solver::{TechniqueGrid, TechniqueSolver};
///
/// let solver = TechniqueSolver::with_all_techniques();
/// let mut grid = TechniqueGrid::new();
///
/// let (_solved, stats) = solver.solve(&mut grid)?;
/// for (technique, count) in solver.techniques().iter().zip(stats.applications()) {
///     println!("{}: {count} times", technique.name());
/// }
/// # Ok::<(), sudokit_solver::SolverError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TechniqueSolverStats {
    applications: Vec<usize>,
    total_steps: usize,
}

impl TechniqueSolverStats {
    /// Returns technique application counts in solver order.
    ///
    /// Includes techniques that were never applied with a count of `0`.
    #[must_use]
    pub fn applications(&self) -> &[usize] {
        &self.applications
    }

    /// Returns the total number of solving steps taken.
    ///
    /// This is the sum of all technique applications.
    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// Returns `true` if any technique was applied at least once.
    #[must_use]
    pub fn has_progress(&self) -> bool {
        self.total_steps > 0
    }

    /// Returns the index of the hardest technique that was applied, if
    /// any.
    ///
    /// Indices refer to the solver's technique order, so a larger index
    /// means a harder technique.
    #[must_use]
    pub fn hardest_applied(&self) -> Option<usize> {
        self.applications
            .iter()
            .rposition(|&count| count > 0)
    }
}

/// A solver that applies human-like solving techniques to a Sudoku grid.
///
/// `TechniqueSolver` iterates through its techniques in order, applying
/// the first one that makes progress, then starts over from the first
/// technique. The order therefore determines difficulty attribution: a
/// step is credited to the easiest technique that could make it.
///
/// # Examples
///
/// ```
/// use sudokit_solver::{TechniqueGrid, TechniqueSolver};
///
/// let solver = TechniqueSolver::with_all_techniques();
/// let mut grid = TechniqueGrid::new();
///
/// let (solved, stats) = solver.solve(&mut grid)?;
/// assert!(!solved); // an empty grid offers no deductions
/// assert_eq!(stats.total_steps(), 0);
/// # Ok::<(), sudokit_solver::SolverError>(())
/// ```
///
/// # Step-by-step solving
///
/// ```
/// use sudokit_solver::{TechniqueGrid, TechniqueSolver};
///
/// let solver = TechniqueSolver::with_all_techniques();
/// let mut grid = TechniqueGrid::new();
/// let mut stats = solver.new_stats();
///
/// while solver.step(&mut grid, &mut stats)? {
///     if grid.is_solved()? {
///         break;
///     }
/// }
/// # Ok::<(), sudokit_solver::SolverError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TechniqueSolver {
    techniques: Vec<BoxedTechnique>,
}

impl TechniqueSolver {
    /// Creates a new solver with the specified techniques.
    ///
    /// Techniques are applied in the order they appear in the vector.
    ///
    /// # Examples
    ///
    /// ```
    /// use sudokit_solver::{
    ///     TechniqueSolver,
    ///     technique::{BoxedTechnique, NakedSingle},
    /// };
    ///
    /// let techniques: Vec<BoxedTechnique> = vec![Box::new(NakedSingle::new())];
    /// let solver = TechniqueSolver::new(techniques);
    /// ```
    #[must_use]
    pub fn new(techniques: Vec<BoxedTechnique>) -> Self {
        Self { techniques }
    }

    /// Creates a new solver with all available techniques, ordered from
    /// easiest to hardest.
    #[must_use]
    pub fn with_all_techniques() -> Self {
        Self {
            techniques: technique::all_techniques(),
        }
    }

    /// Creates a new solver with the basic techniques only.
    #[must_use]
    pub fn with_basic_techniques() -> Self {
        Self {
            techniques: technique::basic_techniques(),
        }
    }

    /// Creates a statistics object aligned with this solver's technique
    /// order.
    #[must_use]
    pub fn new_stats(&self) -> TechniqueSolverStats {
        TechniqueSolverStats {
            applications: vec![0; self.techniques.len()],
            total_steps: 0,
        }
    }

    /// Returns the configured techniques in application order.
    ///
    /// The returned slice defines the index mapping used by
    /// [`TechniqueSolverStats::applications`].
    #[must_use]
    pub fn techniques(&self) -> &[BoxedTechnique] {
        &self.techniques
    }

    /// Applies one step of solving by trying each technique in order.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - A technique was applied and made progress
    /// * `Ok(false)` - No technique could make progress (solver is stuck)
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Inconsistent`] if the grid is inconsistent
    /// before or after applying a technique.
    pub fn step(
        &self,
        grid: &mut TechniqueGrid,
        stats: &mut TechniqueSolverStats,
    ) -> Result<bool, SolverError> {
        debug_assert_eq!(self.techniques.len(), stats.applications.len());
        grid.check_consistency()?;

        for (i, technique) in self.techniques.iter().enumerate() {
            if technique.apply(grid)? {
                trace!("applied {}", technique.name());
                stats.applications[i] += 1;
                stats.total_steps += 1;
                grid.check_consistency()?;
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Finds the next available hint step without mutating the grid.
    ///
    /// Returns `Ok(None)` when no technique can provide a step.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Inconsistent`] if the grid is inconsistent.
    pub fn find_step(
        &self,
        grid: &TechniqueGrid,
    ) -> Result<Option<BoxedTechniqueStep>, SolverError> {
        grid.check_consistency()?;
        for technique in &self.techniques {
            if let Some(step) = technique.find_step(grid)? {
                return Ok(Some(step));
            }
        }
        Ok(None)
    }

    /// Applies techniques repeatedly until the grid is solved or no
    /// progress can be made.
    ///
    /// Returns a tuple `(solved, stats)` where `solved` is `true` if the
    /// grid is completely solved.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Inconsistent`] if the grid becomes
    /// inconsistent during solving.
    pub fn solve(
        &self,
        grid: &mut TechniqueGrid,
    ) -> Result<(bool, TechniqueSolverStats), SolverError> {
        let mut stats = self.new_stats();
        let solved = self.solve_with_stats(grid, &mut stats)?;
        Ok((solved, stats))
    }

    /// Applies techniques repeatedly until the grid is solved or no
    /// progress can be made, accumulating into an existing statistics
    /// object.
    ///
    /// Returns `true` if the grid is completely solved, `false` if stuck.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Inconsistent`] if the grid becomes
    /// inconsistent during solving.
    pub fn solve_with_stats(
        &self,
        grid: &mut TechniqueGrid,
        stats: &mut TechniqueSolverStats,
    ) -> Result<bool, SolverError> {
        while self.step(grid, stats)? {
            if grid.is_solved()? {
                debug!("solved in {} steps", stats.total_steps());
                return Ok(true);
            }
        }
        debug!("stuck after {} steps", stats.total_steps());
        Ok(grid.is_solved()?)
    }
}
