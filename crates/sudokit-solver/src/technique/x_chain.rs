use std::ops::ControlFlow;

use sudokit_core::{CellSet, Digit, DigitSet};

use super::{BoxedTechnique, Technique};
use crate::{
    BoxedTechniqueStep, SolverError, TechniqueGrid, TechniqueStepData,
    chain::ChainSearch,
    links::{LinkGraph, node_index, node_parts},
};

const NAME: &str = "X-Chain";

/// A technique that removes candidates using single-digit chains.
///
/// An X-Chain follows conjugate pairs (strong links) and shared houses
/// (weak links) of a single digit, alternating link polarity and starting
/// and ending with a strong link. At least one of the two chain endpoints
/// must hold the digit, so it can be eliminated from every cell that sees
/// both endpoints.
///
/// The two-row/two-column special case of length three is the Skyscraper;
/// X-Wings found by [`Fish`](super::Fish) are also a special case, so this
/// technique is ordered after the fish sizes.
#[derive(Debug, Default, Clone, Copy)]
pub struct XChain {}

enum Scan {
    NoChange,
    Changed,
    Stopped(BoxedTechniqueStep),
}

impl XChain {
    /// Creates a new `XChain` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    fn scan<F>(grid: &mut TechniqueGrid, graph: &LinkGraph, on_condition: &mut F) -> Scan
    where
        F: for<'a> FnMut(&'a mut TechniqueGrid, &[u16]) -> ControlFlow<BoxedTechniqueStep>,
    {
        for digit in Digit::ALL {
            for pos in graph.digit_positions(digit) {
                let start = node_index(pos, digit);
                if graph.conjugate_neighbors(start).is_empty() {
                    continue;
                }
                let search = ChainSearch::run(
                    start,
                    |node, visit| {
                        for &neighbor in graph.conjugate_neighbors(node) {
                            visit(neighbor);
                        }
                    },
                    |node, visit| graph.visit_weak_same_digit(node, &mut *visit),
                );

                let mut result = None;
                search.visit_strong_ends(|end| {
                    if result.is_some() {
                        return;
                    }
                    let (end_pos, end_digit) = node_parts(end);
                    debug_assert_eq!(end_digit, digit);
                    let chain = search.chain_to(end);
                    let chain_cells = chain
                        .iter()
                        .fold(CellSet::EMPTY, |acc, &node| {
                            acc.union(CellSet::from_elem(node_parts(node).0))
                        });
                    let eliminations = graph.digit_positions(digit)
                        & pos.house_peers()
                        & end_pos.house_peers()
                        & !chain_cells;
                    if !eliminations.is_empty() {
                        result = Some((chain, eliminations));
                    }
                });

                if let Some((chain, eliminations)) = result
                    && grid.remove_candidate_with_mask(eliminations, digit)
                {
                    return match on_condition(grid, &chain) {
                        ControlFlow::Break(step) => Scan::Stopped(step),
                        ControlFlow::Continue(()) => Scan::Changed,
                    };
                }
            }
        }
        Scan::NoChange
    }

    fn apply_with_control_flow<F>(
        grid: &mut TechniqueGrid,
        mut on_condition: F,
    ) -> Option<BoxedTechniqueStep>
    where
        F: for<'a> FnMut(&'a mut TechniqueGrid, &[u16]) -> ControlFlow<BoxedTechniqueStep>,
    {
        // Eliminations can invalidate previously collected links, so the
        // graph is rebuilt after every change.
        loop {
            let graph = LinkGraph::build(grid);
            match Self::scan(grid, &graph, &mut on_condition) {
                Scan::NoChange => return None,
                Scan::Changed => {}
                Scan::Stopped(step) => return Some(step),
            }
        }
    }
}

impl Technique for XChain {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn find_step(&self, grid: &TechniqueGrid) -> Result<Option<BoxedTechniqueStep>, SolverError> {
        let mut after_grid = grid.clone();
        let step = Self::apply_with_control_flow(&mut after_grid, |after_grid, chain| {
            let chain_cells = chain.iter().fold(CellSet::EMPTY, |acc, &node| {
                acc.union(CellSet::from_elem(node_parts(node).0))
            });
            let digit = node_parts(chain[0]).1;
            ControlFlow::Break(Box::new(TechniqueStepData::from_diff(
                NAME,
                chain_cells,
                vec![(chain_cells, DigitSet::from_elem(digit))],
                grid,
                after_grid,
            )))
        });
        Ok(step)
    }

    fn apply(&self, grid: &mut TechniqueGrid) -> Result<bool, SolverError> {
        let mut changed = false;
        Self::apply_with_control_flow(grid, |_, _| {
            changed = true;
            ControlFlow::Continue(())
        });
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use sudokit_core::{CandidateGrid, Digit, Position};

    use super::*;
    use crate::testing::TechniqueTester;

    // Restricts a digit within a row or column to the given indices.
    fn confine_row(grid: &mut CandidateGrid, y: u8, digit: Digit, keep: &[u8]) {
        for x in 0..9 {
            if !keep.contains(&x) {
                grid.remove_candidate(Position::new(x, y), digit);
            }
        }
    }

    fn confine_col(grid: &mut CandidateGrid, x: u8, digit: Digit, keep: &[u8]) {
        for y in 0..9 {
            if !keep.contains(&y) {
                grid.remove_candidate(Position::new(x, y), digit);
            }
        }
    }

    #[test]
    fn test_skyscraper_shape_eliminates() {
        // Conjugate pairs in columns 1 and 7 share row 8; the roof cells
        // (1, 1) and (7, 0) cannot both be false, so cells seeing both
        // lose the digit.
        let mut grid = CandidateGrid::new();
        confine_col(&mut grid, 1, Digit::D1, &[1, 8]);
        confine_col(&mut grid, 7, Digit::D1, &[0, 8]);

        TechniqueTester::new(grid)
            .apply_once(&XChain::new())
            .assert_removed_includes(Position::new(0, 0), [Digit::D1])
            .assert_removed_includes(Position::new(2, 0), [Digit::D1])
            .assert_removed_includes(Position::new(6, 1), [Digit::D1])
            .assert_removed_includes(Position::new(8, 1), [Digit::D1]);
    }

    #[test]
    fn test_conjugate_pair_in_row_points_into_box() {
        // A single strong link whose cells share a row and a box: the rest
        // of the box sees both ends.
        let mut grid = CandidateGrid::new();
        confine_row(&mut grid, 0, Digit::D7, &[0, 1]);

        TechniqueTester::new(grid)
            .apply_once(&XChain::new())
            .assert_removed_includes(Position::new(1, 1), [Digit::D7])
            .assert_removed_includes(Position::new(2, 2), [Digit::D7]);
    }

    #[test]
    fn test_no_change_when_no_chain() {
        let grid = CandidateGrid::new();

        TechniqueTester::new(grid)
            .apply_once(&XChain::new())
            .assert_no_change(Position::new(0, 0))
            .assert_no_change(Position::new(4, 4));
    }
}
