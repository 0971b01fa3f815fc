//! Enclosed-space classification of a finished selection.
//!
//! A selection models a sculpture of solid blocks. Empty cells that cannot
//! be reached from outside the box make the sculpture impossible to
//! assemble, so the best tracker keeps such selections apart from the
//! plain record. The check is one breadth-first flood fill from the outer
//! shell through unselected vertices.

use std::collections::VecDeque;

use bitvec::prelude::*;

use lattice_core::prelude::*;

/// Returns true iff some unselected vertex cannot be reached from the
/// outer shell of the box through unselected vertices.
///
/// Every outer-shell vertex is seeded, selected or not; unselected
/// neighbors of selected shell vertices are still reached through their
/// own shell seed. Runs in O(vertex count).
///
/// # Example
///
/// ```
/// use lattice::prelude::*;
///
/// let graph = HrpGraph::new(&[3, 3, 3])?;
/// let subtree = Subtree::new(&graph, 13);
///
/// // a single block in the center walls nothing off
/// assert!(!has_enclosed_space(&graph, &subtree));
/// # Ok::<(), Error>(())
/// ```
pub fn has_enclosed_space<G: Topology>(graph: &G, subtree: &Subtree<'_, G>) -> bool {
    let vertex_count = graph.vertex_count();
    let mut visited = BitVec::<usize>::repeat(false, vertex_count);

    let mut queue: VecDeque<VertexId> = (0..vertex_count as VertexId)
        .filter(|&v| graph.on_outer_shell(v))
        .collect();

    let mut reached = 0usize;
    while let Some(v) = queue.pop_front() {
        if subtree.has(v) || visited.replace(v as usize, true) {
            continue;
        }
        reached += 1;
        queue.extend(graph.neighbors(v));
    }

    subtree.n_selected() as usize + reached != vertex_count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_vertex_selections_enclose_nothing() {
        let graph = HrpGraph::new(&[3, 3, 3]).unwrap();
        let subtree = Subtree::new(&graph, 13);

        assert!(!has_enclosed_space(&graph, &subtree));
    }

    #[test]
    fn a_straight_rod_encloses_nothing() {
        let graph = HrpGraph::new(&[3, 3, 3]).unwrap();
        let mut subtree = Subtree::new(&graph, 4);
        assert!(subtree.add(13));
        assert!(subtree.add(22));

        assert!(!has_enclosed_space(&graph, &subtree));
    }

    #[test]
    fn caging_the_center_is_detected() {
        let graph = HrpGraph::new(&[3, 3, 3]).unwrap();
        // a path over all six face centers; the center vertex keeps no
        // unselected neighbor
        let mut subtree = Subtree::new(&graph, 1);
        for v in [4, 10, 5, 19, 14, 22, 25, 16, 15, 12] {
            assert!(subtree.add(v));
        }

        assert!(has_enclosed_space(&graph, &subtree));
    }

    #[test]
    fn opening_the_cage_frees_the_center() {
        let graph = HrpGraph::new(&[3, 3, 3]).unwrap();
        // the same cage with one face center missing
        let mut subtree = Subtree::new(&graph, 1);
        for v in [4, 10, 5, 19, 14, 22, 25, 16, 15] {
            assert!(subtree.add(v));
        }

        assert!(!has_enclosed_space(&graph, &subtree));
    }

    #[test]
    fn rank_two_grids_never_enclose() {
        let graph = HrpGraph::new(&[4, 4]).unwrap();
        let mut subtree = Subtree::new(&graph, 0);
        // a ring-like C shape around the inner cells
        for v in [1, 2, 3, 7, 11, 15, 14, 13, 12, 8] {
            assert!(subtree.add(v));
        }

        assert!(!has_enclosed_space(&graph, &subtree));
    }
}
