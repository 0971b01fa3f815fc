//! Border maintenance with a reversible history.
//!
//! The border of a subtree is the ordered set of extension candidates:
//! unselected vertices with exactly one selected neighbor and an id larger
//! than the root. [`update`] brings the border in line after an accepted
//! extension and logs every border mutation; [`restore`] replays the log
//! backwards so the depth-first search can unwind a frame and leave the
//! border exactly as it found it.

use crate::index_set::OrderedIndexSet;
use crate::subtree::Subtree;
use crate::{Topology, VertexId};

/// One logged border mutation.
///
/// A `Pivot` marks the start of an extension step; the entries above it
/// belong to that step. `Add`/`Rem` record the mutation that was applied,
/// so restoration applies the inverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryEntry {
    Pivot,
    Add(VertexId),
    Rem(VertexId),
}

/// The mutation log of a border, unwound one pivot at a time.
pub type History = Vec<HistoryEntry>;

/// Brings `border` up to date after `x` was added to `subtree`, recording
/// every mutation in `history`.
///
/// Neighbors of `x` are visited in ascending id order. A neighbor with more
/// than one selected neighbor can no longer extend the subtree and leaves
/// the border; a fresh candidate enters at the *front*. The front placement
/// makes the search visit vertices produced by the current extension before
/// older candidates, which gives every subtree a unique extension path.
pub fn update<G: Topology>(
    subtree: &Subtree<'_, G>,
    border: &mut OrderedIndexSet,
    x: VertexId,
    history: &mut History,
) {
    history.push(HistoryEntry::Pivot);

    for &y in subtree.graph().neighbors(x) {
        if subtree.count(y) > 1 {
            if border.remove(y) {
                history.push(HistoryEntry::Rem(y));
            }
        } else if y > subtree.root() && !subtree.has(y) {
            border.push_front(y);
            history.push(HistoryEntry::Add(y));
        }
    }
}

/// [`update`] without the mutation log, for search paths that never unwind.
pub fn simple_update<G: Topology>(
    subtree: &Subtree<'_, G>,
    border: &mut OrderedIndexSet,
    x: VertexId,
) {
    for &y in subtree.graph().neighbors(x) {
        if subtree.count(y) > 1 {
            border.remove(y);
        } else if y > subtree.root() && !subtree.has(y) {
            border.push_front(y);
        }
    }
}

/// Unwinds `history` to the most recent pivot, applying the inverse of
/// every logged mutation to `border`.
///
/// Afterwards border and history are identical to their state right before
/// the matching [`update`] call.
pub fn restore(border: &mut OrderedIndexSet, history: &mut History) {
    while let Some(entry) = history.pop() {
        match entry {
            HistoryEntry::Pivot => return,
            HistoryEntry::Add(v) => {
                border.remove(v);
            }
            HistoryEntry::Rem(v) => border.push_front(v),
        }
    }
    debug_assert!(false, "restore consumed the history without finding a pivot");
}
