pub use lattice_core::prelude::*;

pub use crate::enclosed::has_enclosed_space;
pub use crate::enumerate::enumerate_largest;
pub use crate::enumerate::induced_subtrees;
pub use crate::enumerate::InducedSubtrees;
pub use crate::nmc::nmc_largest;
pub use crate::nmc::NmcConfig;
pub use crate::nmc::DEFAULT_LEVEL;
pub use crate::pool::WorkerPool;
pub use crate::search::render_selection;
pub use crate::search::SearchContext;
