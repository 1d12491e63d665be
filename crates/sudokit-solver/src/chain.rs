//! Alternating-link chain search.
//!
//! A chain is a path through the candidate node graph whose links strictly
//! alternate strong, weak, strong, ... starting with a strong link. A node
//! reached through an odd number of links (last link strong) forms a valid
//! chain end: at least one of the two endpoints must be true, so the
//! chain's digit can be eliminated from any cell that sees both.
//!
//! The search is a breadth-first traversal over (node, polarity) states,
//! where polarity records whether the state was entered through a strong
//! or weak link. Splitting visited state by polarity lets a node be used
//! once in each role without ever revisiting a state, which rules out
//! cycles.

use std::collections::VecDeque;

use crate::links::{NO_NODE, NODE_COUNT};

/// Upper bound on the number of links in a chain.
///
/// Chains longer than this are not worth reporting as human techniques,
/// and the bound keeps the search shallow on pathological grids.
pub(crate) const MAX_LINKS: usize = 16;

const STRONG: usize = 1;
const WEAK: usize = 0;

/// Result of an alternating breadth-first search from a start node.
///
/// Records, for each (polarity, node) state, the node it was reached from.
/// Endpoints and full chains are reconstructed from these parent links.
pub(crate) struct ChainSearch {
    start: u16,
    /// `parents[polarity][node]`; the parent state has the other polarity.
    parents: Box<[[u16; NODE_COUNT]; 2]>,
}

impl ChainSearch {
    /// Runs an alternating search from `start`, using `strong` and `weak`
    /// to enumerate neighbors of each kind.
    ///
    /// The first link is strong. The search stops expanding at
    /// [`MAX_LINKS`] links.
    pub(crate) fn run(
        start: u16,
        strong: impl Fn(u16, &mut dyn FnMut(u16)),
        weak: impl Fn(u16, &mut dyn FnMut(u16)),
    ) -> Self {
        let mut parents = Box::new([[NO_NODE; NODE_COUNT]; 2]);
        let mut queue = VecDeque::new();
        // The start state is its own parent so it is never re-entered.
        parents[WEAK][usize::from(start)] = start;
        queue.push_back((start, WEAK, 0_usize));

        while let Some((node, polarity, links)) = queue.pop_front() {
            if links >= MAX_LINKS {
                continue;
            }
            let next_polarity = 1 - polarity;
            let parents = &mut parents;
            let queue = &mut queue;
            let mut push = |next: u16| {
                if next != start && parents[next_polarity][usize::from(next)] == NO_NODE {
                    parents[next_polarity][usize::from(next)] = node;
                    queue.push_back((next, next_polarity, links + 1));
                }
            };
            if next_polarity == STRONG {
                strong(node, &mut push);
            } else {
                weak(node, &mut push);
            }
        }

        Self { start, parents }
    }

    /// Returns the start node of the search.
    pub(crate) fn start(&self) -> u16 {
        self.start
    }

    /// Visits every node reachable through an odd number of links, other
    /// than the start itself.
    pub(crate) fn visit_strong_ends(&self, mut visit: impl FnMut(u16)) {
        for node in 0..NODE_COUNT {
            #[expect(clippy::cast_possible_truncation)]
            let node = node as u16;
            if node != self.start && self.parents[STRONG][usize::from(node)] != NO_NODE {
                visit(node);
            }
        }
    }

    /// Reconstructs the chain from the start to a strong-entered end.
    ///
    /// Returns the node sequence including both endpoints. The sequence
    /// always has an even length (an odd number of links).
    pub(crate) fn chain_to(&self, end: u16) -> Vec<u16> {
        let mut nodes = vec![end];
        let mut node = end;
        let mut polarity = STRONG;
        while node != self.start {
            node = self.parents[polarity][usize::from(node)];
            polarity = 1 - polarity;
            nodes.push(node);
        }
        nodes.reverse();
        nodes
    }
}
