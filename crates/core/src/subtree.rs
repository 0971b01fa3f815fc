//! Induced subtree state.
//!
//! A [`Subtree`] tracks which lattice vertices are selected together with
//! the *effective degree* of every vertex: the number of its selected
//! neighbors, maintained whether or not the vertex itself is selected. The
//! effective degrees make the border condition (`exactly one selected
//! neighbor`) and the physical validity rule O(1) to evaluate on every
//! extension step.
//!
//! For rank-3 lattices the selection additionally models a block sculpture:
//! a selected vertex may have both of its neighbors selected along at most
//! one axis, otherwise the blocks could not be assembled. Lattices of any
//! other rank carry no such constraint.

use std::fmt;

use crate::{Topology, VertexId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Cell {
    selected: bool,
    effective_degree: u8,
}

/// An induced subtree of a lattice graph, growable one leaf at a time.
///
/// The root is fixed at construction and is the smallest selected id for
/// the lifetime of the subtree; the border policy only ever offers vertices
/// with larger ids for extension.
pub struct Subtree<'g, G> {
    graph: &'g G,
    cells: Vec<Cell>,
    n_selected: u32,
    root: VertexId,
}

impl<G> fmt::Debug for Subtree<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subtree")
            .field("cells", &self.cells)
            .field("n_selected", &self.n_selected)
            .field("root", &self.root)
            .finish()
    }
}

impl<G> Clone for Subtree<'_, G> {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph,
            cells: self.cells.clone(),
            n_selected: self.n_selected,
            root: self.root,
        }
    }
}

impl<'g, G: Topology> Subtree<'g, G> {
    /// Creates a subtree holding only `root`.
    pub fn new(graph: &'g G, root: VertexId) -> Self {
        debug_assert!((root as usize) < graph.vertex_count());

        let mut cells = vec![Cell::default(); graph.vertex_count()];
        cells[root as usize].selected = true;
        for &w in graph.neighbors(root) {
            cells[w as usize].effective_degree += 1;
        }

        Self {
            graph,
            cells,
            n_selected: 1,
            root,
        }
    }

    /// Returns the host graph.
    pub fn graph(&self) -> &'g G {
        self.graph
    }

    /// Returns the root vertex.
    pub fn root(&self) -> VertexId {
        self.root
    }

    /// Returns the number of selected vertices.
    pub fn n_selected(&self) -> u32 {
        self.n_selected
    }

    /// Returns true iff `v` is selected.
    pub fn has(&self, v: VertexId) -> bool {
        self.cells[v as usize].selected
    }

    /// Returns the number of selected neighbors of `v`.
    pub fn count(&self, v: VertexId) -> u8 {
        self.cells[v as usize].effective_degree
    }

    /// Iterates the selected vertices in ascending id order.
    pub fn selected_vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.selected)
            .map(|(v, _)| v as VertexId)
    }

    /// Extends the subtree with `v`.
    ///
    /// `v` must be unselected, larger than the root and have exactly one
    /// selected neighbor `u`; that is, `v` must come off the border. The
    /// extension is rejected iff it would violate the validity rule at `u`.
    /// Returns whether `v` was added.
    pub fn add(&mut self, v: VertexId) -> bool {
        debug_assert!(!self.has(v));
        debug_assert!(v > self.root);
        debug_assert_eq!(self.count(v), 1);

        let Some(u) = self.selected_neighbor(v) else {
            debug_assert!(false, "extension candidate without a selected neighbor");
            return false;
        };
        if !self.valid_with(u, v) {
            return false;
        }

        self.cells[v as usize].selected = true;
        self.n_selected += 1;
        for &w in self.graph.neighbors(v) {
            self.cells[w as usize].effective_degree += 1;
        }
        true
    }

    /// Removes the leaf `v`, reversing a previously accepted [`add`](Self::add).
    ///
    /// `v` must currently have exactly one selected neighbor. Calls pair
    /// with accepted adds in LIFO order.
    pub fn remove(&mut self, v: VertexId) {
        debug_assert!(self.has(v));
        debug_assert_ne!(v, self.root);
        debug_assert_eq!(self.count(v), 1);

        self.cells[v as usize].selected = false;
        self.n_selected -= 1;
        for &w in self.graph.neighbors(v) {
            self.cells[w as usize].effective_degree -= 1;
        }
    }

    /// Returns whether [`add`](Self::add) would accept `v`, without
    /// changing any state.
    pub fn safe_to_add(&self, v: VertexId) -> bool {
        match self.selected_neighbor(v) {
            Some(u) => self.valid_with(u, v),
            None => false,
        }
    }

    fn selected_neighbor(&self, v: VertexId) -> Option<VertexId> {
        self.graph
            .neighbors(v)
            .iter()
            .copied()
            .find(|&w| self.has(w))
    }

    /// Checks the validity rule at `u` under the assumption that `pending`
    /// is about to be selected.
    ///
    /// A vertex of a rank-3 lattice is valid while at most one of its axes
    /// has both neighbors selected. With an effective degree below four
    /// that is vacuous; at exactly four it holds iff every axis contributes
    /// at least one selected neighbor; above four it is impossible.
    fn valid_with(&self, u: VertexId, pending: VertexId) -> bool {
        if self.graph.rank() != 3 {
            return true;
        }

        let degree = self.count(u) + 1;
        if degree != 4 {
            return degree < 4;
        }

        let selected = |side: Option<VertexId>| {
            side.is_some_and(|w| w == pending || self.has(w))
        };
        (0..3).all(|axis| {
            selected(self.graph.backward(u, axis)) || selected(self.graph.forward(u, axis))
        })
    }
}

impl<G: Topology> PartialEq for Subtree<'_, G> {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
            && self.n_selected == other.n_selected
            && self.cells == other.cells
    }
}

impl<G: Topology> Eq for Subtree<'_, G> {}

impl<G: Topology> fmt::Display for Subtree<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "subtree:")?;
        for v in self.selected_vertices() {
            write!(f, " {}", v)?;
        }
        Ok(())
    }
}
