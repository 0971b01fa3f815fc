//! Parallel search for maximum induced subtrees of lattice graphs.
//!
//! The crate builds on the state machine of [`lattice_core`] and provides
//! the two search strategies of the project:
//!
//! * [`enumerate`](crate::enumerate) walks *every* induced subtree of the
//!   host lattice exactly once by reverse search, either lazily through an
//!   iterator or in parallel with one task per root vertex.
//! * [`nmc`](crate::nmc) runs a Nested Monte-Carlo search that trades
//!   completeness for the ability to reach dense subtrees of lattices far
//!   beyond exhaustive reach.
//!
//! Both strategies report improvements through a shared [`SearchContext`]:
//! candidates are classified by the enclosed-space check, the best
//! selection is written to disk, and every improvement is logged with its
//! discovery time.
//!
//! # Example
//!
//! ```
//! use lattice::prelude::*;
//!
//! let graph = HrpGraph::new(&[2, 2])?;
//!
//! // the 2x2 square has 13 induced subtrees including the empty one
//! assert_eq!(induced_subtrees(&graph).count(), 13);
//! # Ok::<(), Error>(())
//! ```

pub mod enclosed;
pub mod enumerate;
pub mod nmc;
pub mod pool;
pub mod prelude;
pub mod search;

mod scratch;

pub use crate::enclosed::has_enclosed_space;
pub use crate::enumerate::{enumerate_largest, induced_subtrees, InducedSubtrees};
pub use crate::nmc::{nmc_largest, NmcConfig};
pub use crate::pool::WorkerPool;
pub use crate::search::SearchContext;
