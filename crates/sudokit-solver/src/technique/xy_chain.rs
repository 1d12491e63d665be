use std::ops::ControlFlow;

use sudokit_core::{CellSet, DigitSet};

use super::{BoxedTechnique, Technique};
use crate::{
    BoxedTechniqueStep, SolverError, TechniqueGrid, TechniqueStepData,
    chain::ChainSearch,
    links::{LinkGraph, node_index, node_parts},
};

const NAME: &str = "XY-Chain";

/// A technique that removes candidates using chains of bivalue cells.
///
/// An XY-Chain alternates strong links inside bivalue cells with weak
/// links between cells sharing a house. Both ends of the chain carry the
/// same digit, and at least one of them must hold it, so that digit can be
/// eliminated from every cell that sees both ends.
///
/// The two-cell case is a naked pair, and the three-cell case is the
/// [`YWing`](super::YWing), so this technique is ordered after both.
#[derive(Debug, Default, Clone, Copy)]
pub struct XYChain {}

enum Scan {
    NoChange,
    Changed,
    Stopped(BoxedTechniqueStep),
}

impl XYChain {
    /// Creates a new `XYChain` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    fn scan<F>(grid: &mut TechniqueGrid, graph: &LinkGraph, on_condition: &mut F) -> Scan
    where
        F: for<'a> FnMut(&'a mut TechniqueGrid, &[u16]) -> ControlFlow<BoxedTechniqueStep>,
    {
        for pos in grid.classify_cells::<4>()[2] {
            for digit in graph.candidates_at(pos) {
                let start = node_index(pos, digit);
                let search = ChainSearch::run(
                    start,
                    |node, visit| {
                        if let Some(partner) = graph.bivalue_partner(node) {
                            visit(partner);
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
                    // Only ends carrying the start digit close the chain.
                    if end_digit != digit || end_pos == pos {
                        return;
                    }
                    let chain = search.chain_to(end);
                    let chain_cells = chain.iter().fold(CellSet::EMPTY, |acc, &node| {
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
        // Rebuild the link graph after every change; eliminations can
        // break bivalue links collected earlier.
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

impl Technique for XYChain {
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
            let condition_digit_cells = chain
                .iter()
                .map(|&node| {
                    let (node_pos, node_digit) = node_parts(node);
                    (
                        CellSet::from_elem(node_pos),
                        DigitSet::from_elem(node_digit),
                    )
                })
                .collect();
            ControlFlow::Break(Box::new(TechniqueStepData::from_diff(
                NAME,
                chain_cells,
                condition_digit_cells,
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

    fn set_pair(grid: &mut CandidateGrid, pos: Position, keep: [Digit; 2]) {
        for digit in Digit::ALL {
            if !keep.contains(&digit) {
                grid.remove_candidate(pos, digit);
            }
        }
    }

    #[test]
    fn test_four_cell_chain_eliminates() {
        // (0, 0){1,2} - (4, 0){2,3} - (4, 4){3,4} - (8, 4){4,1}: one end
        // of the chain holds 1, so cells seeing (0, 0) and (8, 4) lose it.
        let mut grid = CandidateGrid::new();
        set_pair(&mut grid, Position::new(0, 0), [Digit::D1, Digit::D2]);
        set_pair(&mut grid, Position::new(4, 0), [Digit::D2, Digit::D3]);
        set_pair(&mut grid, Position::new(4, 4), [Digit::D3, Digit::D4]);
        set_pair(&mut grid, Position::new(8, 4), [Digit::D4, Digit::D1]);

        TechniqueTester::new(grid)
            .apply_once(&XYChain::new())
            .assert_removed_includes(Position::new(8, 0), [Digit::D1])
            .assert_removed_includes(Position::new(0, 4), [Digit::D1]);
    }

    #[test]
    fn test_no_change_when_no_chain() {
        let grid = CandidateGrid::new();

        TechniqueTester::new(grid)
            .apply_once(&XYChain::new())
            .assert_no_change(Position::new(0, 0))
            .assert_no_change(Position::new(4, 4));
    }

    #[test]
    fn test_naked_pair_shape_eliminates() {
        // Two bivalue cells with the same digits in one row form the
        // shortest XY-Chain.
        let mut grid = CandidateGrid::new();
        set_pair(&mut grid, Position::new(0, 2), [Digit::D5, Digit::D6]);
        set_pair(&mut grid, Position::new(5, 2), [Digit::D5, Digit::D6]);

        TechniqueTester::new(grid)
            .apply_once(&XYChain::new())
            .assert_removed_includes(Position::new(3, 2), [Digit::D5, Digit::D6]);
    }
}
