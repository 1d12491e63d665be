//! Strong and weak link graph over candidate nodes.
//!
//! A candidate node is a (position, digit) pair that is still possible in
//! the grid. Two nodes are *strongly* linked when exactly one of them must
//! be true: either they are the only two positions for a digit in a house
//! (a conjugate pair), or the only two digits in a cell (a bivalue cell).
//! Two nodes are *weakly* linked when they cannot both be true: the same
//! digit twice in a house, or two digits in the same cell.
//!
//! Chain techniques walk this graph with alternating link polarity; see
//! [`chain`](crate::chain).

use sudokit_core::{CellSet, Digit, DigitSet, House, Position};
use tinyvec::TinyVec;

use crate::TechniqueGrid;

/// Number of candidate nodes on the board.
pub(crate) const NODE_COUNT: usize = 81 * 9;

/// Sentinel for "no node".
pub(crate) const NO_NODE: u16 = u16::MAX;

/// Dense index of a candidate node.
pub(crate) fn node_index(pos: Position, digit: Digit) -> u16 {
    u16::from(pos.index()) * 9 + u16::from(digit.bit_index())
}

/// Inverse of [`node_index`].
pub(crate) fn node_parts(node: u16) -> (Position, Digit) {
    #[expect(clippy::cast_possible_truncation)]
    let pos = Position::from_index((node / 9) as u8);
    #[expect(clippy::cast_possible_truncation)]
    let digit = Digit::from_bit_index((node % 9) as u8);
    (pos, digit)
}

/// Link structure of a candidate grid, indexed by candidate node.
///
/// Conjugate (same-digit) strong links are precomputed per node. Bivalue
/// (same-cell) strong links are stored as an optional partner node. Weak
/// links are derived on demand from the per-digit position masks, which
/// keeps the graph cheap to build.
#[derive(Debug)]
pub(crate) struct LinkGraph {
    /// Conjugate strong links; at most one per house a node belongs to.
    conjugate: Vec<TinyVec<[u16; 4]>>,
    /// Strong link to the other digit of a bivalue cell, if any.
    bivalue_partner: Vec<u16>,
    /// Candidate positions per digit, for weak link derivation.
    digit_positions: [CellSet; 9],
}

impl LinkGraph {
    /// Builds the link graph for the current grid state.
    pub(crate) fn build(grid: &TechniqueGrid) -> Self {
        let mut digit_positions = [CellSet::EMPTY; 9];
        for digit in Digit::ALL {
            digit_positions[usize::from(digit.bit_index())] = grid.digit_positions(digit);
        }

        let mut conjugate: Vec<TinyVec<[u16; 4]>> = vec![TinyVec::new(); NODE_COUNT];
        for house in House::ALL {
            let house_positions = house.positions();
            for digit in Digit::ALL {
                let in_house = digit_positions[usize::from(digit.bit_index())] & house_positions;
                let Some((pos1, pos2)) = in_house.as_double() else {
                    continue;
                };
                let node1 = node_index(pos1, digit);
                let node2 = node_index(pos2, digit);
                // The same pair can be conjugate in two houses at once.
                if !conjugate[usize::from(node1)].contains(&node2) {
                    conjugate[usize::from(node1)].push(node2);
                    conjugate[usize::from(node2)].push(node1);
                }
            }
        }

        let mut bivalue_partner = vec![NO_NODE; NODE_COUNT];
        for pos in Position::all() {
            let Some((d1, d2)) = grid.candidates_at(pos).as_double() else {
                continue;
            };
            let node1 = node_index(pos, d1);
            let node2 = node_index(pos, d2);
            bivalue_partner[usize::from(node1)] = node2;
            bivalue_partner[usize::from(node2)] = node1;
        }

        Self {
            conjugate,
            bivalue_partner,
            digit_positions,
        }
    }

    /// Returns the candidate positions for a digit.
    pub(crate) fn digit_positions(&self, digit: Digit) -> CellSet {
        self.digit_positions[usize::from(digit.bit_index())]
    }

    /// Returns `true` if the node is still a live candidate.
    pub(crate) fn is_live(&self, node: u16) -> bool {
        let (pos, digit) = node_parts(node);
        self.digit_positions(digit).contains(pos)
    }

    /// Returns the conjugate strong links of a node.
    pub(crate) fn conjugate_neighbors(&self, node: u16) -> &[u16] {
        &self.conjugate[usize::from(node)]
    }

    /// Returns the bivalue strong link of a node, if its cell has exactly
    /// two candidates.
    pub(crate) fn bivalue_partner(&self, node: u16) -> Option<u16> {
        let partner = self.bivalue_partner[usize::from(node)];
        (partner != NO_NODE).then_some(partner)
    }

    /// Visits the same-digit weak neighbors of a node: every other
    /// candidate position for the digit that shares a house with it.
    pub(crate) fn visit_weak_same_digit(&self, node: u16, mut visit: impl FnMut(u16)) {
        let (pos, digit) = node_parts(node);
        for peer in self.digit_positions(digit) & pos.house_peers() {
            visit(node_index(peer, digit));
        }
    }

    /// Returns the candidate digits at a position.
    pub(crate) fn candidates_at(&self, pos: Position) -> DigitSet {
        let mut digits = DigitSet::new();
        for digit in Digit::ALL {
            if self.digit_positions(digit).contains(pos) {
                digits.insert(digit);
            }
        }
        digits
    }
}
