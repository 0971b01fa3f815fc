//! Building blocks for induced-subtree search on lattice graphs.
//!
//! A lattice graph (also called a hyper-rectangular-prism graph) is an
//! undirected graph whose vertices are the integer points of a d-dimensional
//! box. Two vertices are connected iff they differ by one in exactly one
//! coordinate. An *induced subtree* of such a graph is a vertex subset that
//! is connected, acyclic and contains every lattice edge between two of its
//! members.
//!
//! This crate provides the state machine that grows and shrinks induced
//! subtrees one vertex at a time:
//!
//! * [`HrpGraph`] and [`StaticHrpGraph`] describe the host lattice. Both
//!   expose the same capabilities through the [`Topology`] trait; the static
//!   variant fixes the rank at compile time so dimension and stride lookups
//!   stay on the stack.
//! * [`OrderedIndexSet`] is the array/doubly-linked-list hybrid used for the
//!   extension border and for path bookkeeping. All mutations are O(1).
//! * [`Subtree`] tracks the selected vertex set together with the effective
//!   degree (number of selected neighbors) of *every* vertex.
//! * [`border::update`] / [`border::restore`] maintain the extension border
//!   and a reversible history of border changes, so a depth-first search can
//!   unwind to the exact prior state.
//! * [`PermutationSet`] enumerates the symmetry group of a lattice, used to
//!   canonicalize equivalent selections.
//!
//! # Example
//!
//! ```
//! use lattice_core::prelude::*;
//!
//! let graph = HrpGraph::new(&[3, 3, 3])?;
//!
//! assert_eq!(graph.vertex_count(), 27);
//! // the center of the cube touches all six axis directions
//! assert_eq!(graph.neighbors(13), &[4, 10, 12, 14, 16, 22]);
//! assert!(!graph.on_outer_shell(13));
//!
//! let mut subtree = Subtree::new(&graph, 0);
//! assert!(subtree.add(1));
//! assert_eq!(subtree.n_selected(), 2);
//! # Ok::<(), lattice_core::Error>(())
//! ```

pub mod border;
pub mod graph;
pub mod index_set;
pub mod permutation;
pub mod prelude;
pub mod subtree;

pub use crate::graph::{HrpGraph, StaticHrpGraph};
pub use crate::index_set::OrderedIndexSet;
pub use crate::permutation::PermutationSet;
pub use crate::subtree::Subtree;

use thiserror::Error;

/// The type used to identify vertices of a lattice graph.
///
/// Vertex ids are assigned row-major: the coordinate along axis `a` of
/// vertex `v` is `(v / stride_a) % n_a` where `stride_a` is the product of
/// all lower dimensions.
pub type VertexId = u32;

#[derive(Error, Debug)]
pub enum Error {
    #[error("lattice dimensions must be non-empty and positive, got {dims:?}")]
    InvalidDims { dims: Vec<VertexId> },
    #[error("lattice of {dims:?} exceeds the vertex id space")]
    TooManyVertices { dims: Vec<VertexId> },
}

/// Capabilities shared by all lattice graph representations.
///
/// `Topology` is the seam between the search state machine and the concrete
/// graph storage. [`HrpGraph`] keeps its dimensions on the heap and supports
/// any rank chosen at run time; [`StaticHrpGraph`] fixes the rank as a const
/// generic. Everything downstream (subtree state, border maintenance,
/// enumeration, Monte-Carlo search) is generic over this trait.
pub trait Topology {
    /// Returns the number of vertices in the lattice.
    fn vertex_count(&self) -> usize;

    /// Returns the side lengths of the lattice box, lowest axis first.
    fn dims(&self) -> &[VertexId];

    /// Returns the neighbors of `v` in strictly ascending id order.
    ///
    /// The ascending order is load-bearing: border maintenance visits
    /// neighbors in this order to produce the canonical depth-first
    /// extension order that reverse-search enumeration relies on.
    fn neighbors(&self, v: VertexId) -> &[VertexId];

    /// Returns the coordinate of `v` along `axis`.
    fn coord(&self, v: VertexId, axis: usize) -> VertexId;

    /// Returns the neighbor one step forward along `axis`, if it exists.
    fn forward(&self, v: VertexId, axis: usize) -> Option<VertexId>;

    /// Returns the neighbor one step backward along `axis`, if it exists.
    fn backward(&self, v: VertexId, axis: usize) -> Option<VertexId>;

    /// Returns the number of axes of the lattice box.
    fn rank(&self) -> usize {
        self.dims().len()
    }

    /// Returns true iff `v` lies on the outer shell of the box, i.e. has
    /// fewer than `2 * rank` neighbors.
    fn on_outer_shell(&self, v: VertexId) -> bool {
        self.neighbors(v).len() != 2 * self.rank()
    }
}
