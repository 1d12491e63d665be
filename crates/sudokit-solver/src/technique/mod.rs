//! Sudoku solving techniques.
//!
//! Each technique implements the [`Technique`] trait: it can report the
//! next applicable step without mutating the grid ([`find_step`]), or apply
//! every instance of its pattern in one pass ([`apply`]).
//!
//! [`find_step`]: Technique::find_step
//! [`apply`]: Technique::apply

use std::fmt::Debug;

pub use self::{
    fish::{Fish, Jellyfish, Swordfish, XWing},
    hidden_single::HiddenSingle,
    hidden_subset::{HiddenPair, HiddenQuad, HiddenSubset, HiddenTriple},
    locked_candidates::LockedCandidates,
    naked_single::NakedSingle,
    naked_subset::{NakedPair, NakedQuad, NakedSubset, NakedTriple},
    x_chain::XChain,
    xy_chain::XYChain,
    y_wing::YWing,
};
use crate::{BoxedTechniqueStep, SolverError, TechniqueGrid};

mod fish;
mod hidden_single;
mod hidden_subset;
mod locked_candidates;
mod naked_single;
mod naked_subset;
mod x_chain;
mod xy_chain;
mod y_wing;

/// A trait representing a Sudoku solving technique.
///
/// Each technique operates on a [`TechniqueGrid`] and updates cell values
/// or candidates.
pub trait Technique: Debug + Send + Sync {
    /// Returns the name of the technique.
    fn name(&self) -> &'static str;

    /// Returns a boxed clone of the technique.
    fn clone_box(&self) -> BoxedTechnique;

    /// Finds the next hint step without mutating the grid.
    ///
    /// Returns `Ok(None)` when this technique has no applicable step.
    ///
    /// # Errors
    ///
    /// Returns an error if the technique detects an invalid state in the
    /// grid.
    fn find_step(&self, grid: &TechniqueGrid) -> Result<Option<BoxedTechniqueStep>, SolverError>;

    /// Applies the technique to a technique grid.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The technique was applied and the grid was updated
    /// * `Ok(false)` - The technique was applied but the grid was not updated
    ///
    /// # Errors
    ///
    /// Returns an error if the technique detects an invalid state in the
    /// grid.
    fn apply(&self, grid: &mut TechniqueGrid) -> Result<bool, SolverError>;
}

/// A boxed technique.
pub type BoxedTechnique = Box<dyn Technique>;

impl Clone for BoxedTechnique {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Returns the fundamental techniques.
///
/// These are the most basic logical deductions, and the only ones that
/// place digits:
///
/// - **Naked Single**: a cell with only one remaining candidate
/// - **Hidden Single**: a digit that can only go in one cell within a house
///
/// This set remains stable over time, serving as a consistent baseline
/// even as more advanced techniques are added to [`all_techniques`].
///
/// # Examples
///
/// ```
/// use sudokit_solver::technique;
///
/// let techniques = technique::fundamental_techniques();
/// assert_eq!(techniques.len(), 2);
/// ```
#[must_use]
pub fn fundamental_techniques() -> Vec<BoxedTechnique> {
    vec![Box::new(NakedSingle::new()), Box::new(HiddenSingle::new())]
}

/// Returns the basic techniques: singles plus the single-house candidate
/// eliminations (locked candidates and naked/hidden subsets).
#[must_use]
pub fn basic_techniques() -> Vec<BoxedTechnique> {
    let mut techniques = fundamental_techniques();
    techniques.extend([
        Box::new(LockedCandidates::new()) as BoxedTechnique,
        Box::new(NakedPair::new()),
        Box::new(HiddenPair::new()),
        Box::new(NakedTriple::new()),
        Box::new(HiddenTriple::new()),
        Box::new(NakedQuad::new()),
        Box::new(HiddenQuad::new()),
    ]);
    techniques
}

/// Returns all available techniques.
///
/// Techniques are ordered from easiest to hardest, so a solver trying them
/// in order reports the simplest available deduction first.
#[must_use]
pub fn all_techniques() -> Vec<BoxedTechnique> {
    let mut techniques = basic_techniques();
    techniques.extend([
        Box::new(XWing::new()) as BoxedTechnique,
        Box::new(Swordfish::new()),
        Box::new(Jellyfish::new()),
        Box::new(YWing::new()),
        Box::new(XChain::new()),
        Box::new(XYChain::new()),
    ]);
    techniques
}
