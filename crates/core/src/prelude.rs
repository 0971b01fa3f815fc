pub use crate::border::{restore, simple_update, update, History, HistoryEntry};
pub use crate::graph::HrpGraph;
pub use crate::graph::StaticHrpGraph;
pub use crate::index_set::OrderedIndexSet;
pub use crate::permutation::PermutationSet;
pub use crate::subtree::Subtree;

pub use crate::Error;
pub use crate::Topology;
pub use crate::VertexId;
