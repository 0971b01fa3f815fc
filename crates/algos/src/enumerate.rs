//! Complete enumeration of induced subtrees by reverse search.
//!
//! Every induced subtree is anchored at its smallest vertex id. Growing
//! subtrees only through border heads produced by the current extension
//! step assigns each subtree exactly one path from its anchor through the
//! search tree, so depth-first traversal from every root visits each
//! subtree exactly once and no visited-set is needed.
//!
//! The traversal is exposed twice: [`induced_subtrees`] yields every
//! subtree lazily, one snapshot per step, and [`enumerate_largest`] runs
//! the same depth-first walk in parallel, one task per root, reporting
//! only maximal subtrees to the shared best tracker.

use lattice_core::prelude::*;
use rayon::Scope;

use crate::pool::WorkerPool;
use crate::scratch::Scratch;
use crate::search::SearchContext;

/// Lazily enumerates every induced subtree of `graph`, starting with the
/// empty one.
///
/// Each item is the selected vertex set in ascending id order. The
/// sequence is finite and visits each induced subtree exactly once.
pub fn induced_subtrees<G: Topology>(graph: &G) -> InducedSubtrees<'_, G> {
    InducedSubtrees {
        graph,
        walk: None,
        next_root: 0,
        yielded_empty: false,
    }
}

pub struct InducedSubtrees<'g, G: Topology> {
    graph: &'g G,
    walk: Option<RootWalk<'g, G>>,
    next_root: VertexId,
    yielded_empty: bool,
}

/// The in-progress depth-first walk below one root.
struct RootWalk<'g, G: Topology> {
    subtree: Subtree<'g, G>,
    border: OrderedIndexSet,
    history: History,
    scratch: Scratch,
    /// one entry per open frame: the vertex whose extension opened it
    frames: Vec<Option<VertexId>>,
}

impl<'g, G: Topology> RootWalk<'g, G> {
    fn new(graph: &'g G, root: VertexId) -> Self {
        let subtree = Subtree::new(graph, root);
        let mut border = OrderedIndexSet::new(graph.vertex_count());
        let mut history = History::new();
        update(&subtree, &mut border, root, &mut history);

        Self {
            subtree,
            border,
            history,
            scratch: Scratch::new(graph.vertex_count()),
            frames: vec![None],
        }
    }

    fn snapshot(&self) -> Vec<VertexId> {
        self.subtree.selected_vertices().collect()
    }

    /// Advances to the next subtree below this root, or drains the walk.
    fn advance(&mut self) -> Option<Vec<VertexId>> {
        while !self.frames.is_empty() {
            if let Some(x) = self.border.pop_front() {
                self.scratch.stash(self.subtree.n_selected() as usize, x);
                if self.subtree.add(x) {
                    update(&self.subtree, &mut self.border, x, &mut self.history);
                    self.frames.push(Some(x));
                    return Some(self.snapshot());
                }
                // rejected extensions drop x without restoration
            } else {
                self.scratch
                    .swap_back(self.subtree.n_selected() as usize, &mut self.border);
                match self.frames.pop() {
                    Some(Some(x)) => {
                        restore(&mut self.border, &mut self.history);
                        self.subtree.remove(x);
                    }
                    _ => break,
                }
            }
        }
        None
    }
}

impl<G: Topology> Iterator for InducedSubtrees<'_, G> {
    type Item = Vec<VertexId>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.yielded_empty {
            self.yielded_empty = true;
            return Some(Vec::new());
        }

        if let Some(mut walk) = self.walk.take() {
            if let Some(snapshot) = walk.advance() {
                self.walk = Some(walk);
                return Some(snapshot);
            }
        }

        if (self.next_root as usize) >= self.graph.vertex_count() {
            return None;
        }
        let walk = RootWalk::new(self.graph, self.next_root);
        self.next_root += 1;
        let snapshot = walk.snapshot();
        self.walk = Some(walk);
        Some(snapshot)
    }
}

/// Runs the complete enumeration in parallel and returns the size of the
/// largest induced subtree found.
///
/// One task per root is submitted to the pool; each task walks its search
/// subtree depth first and offers maximal subtrees (empty border) to the
/// context. Frames are handed off to other workers, state cloned, whenever
/// the pool reports idle capacity.
pub fn enumerate_largest<G>(graph: &G, pool: &WorkerPool, ctx: &SearchContext) -> u32
where
    G: Topology + Sync,
{
    let vertex_count = graph.vertex_count();

    pool.scope(|scope| {
        for root in 0..vertex_count as VertexId {
            let subtree = Subtree::new(graph, root);
            let mut border = OrderedIndexSet::new(vertex_count);
            let mut history = History::new();
            update(&subtree, &mut border, root, &mut history);

            pool.submit(scope, move |scope, worker| {
                let mut task = BranchTask {
                    subtree,
                    border,
                    history,
                };
                let mut scratch = Scratch::new(vertex_count);
                branch(&mut task, &mut scratch, worker, pool, scope, ctx);
            });
        }
    });

    ctx.log_summary();
    ctx.best_plain()
}

/// The by-value state of one search task: a subtree mid-extension plus the
/// border and history that unwind it.
struct BranchTask<'g, G: Topology> {
    subtree: Subtree<'g, G>,
    border: OrderedIndexSet,
    history: History,
}

impl<G: Topology> BranchTask<'_, G> {
    fn split(&self) -> Self {
        Self {
            subtree: self.subtree.clone(),
            border: self.border.clone(),
            history: self.history.clone(),
        }
    }
}

/// Depth-first extension of one frame.
///
/// Only subtrees with an empty border are candidates: any extensible
/// subtree is dominated by one of its extensions.
fn branch<'g, 'scope, G>(
    task: &mut BranchTask<'g, G>,
    scratch: &mut Scratch,
    worker: usize,
    pool: &'scope WorkerPool,
    scope: &Scope<'scope>,
    ctx: &'scope SearchContext,
) where
    G: Topology + Sync,
    'g: 'scope,
{
    if task.border.is_empty() {
        ctx.record_leaf(worker);
        if task.subtree.n_selected() > ctx.best_plain() {
            ctx.check_candidate(&task.subtree);
        }
        return;
    }

    let depth = task.subtree.n_selected() as usize;
    while let Some(x) = task.border.pop_front() {
        scratch.stash(depth, x);
        if task.subtree.add(x) {
            update(&task.subtree, &mut task.border, x, &mut task.history);

            if pool.has_idle() {
                let mut handoff = task.split();
                pool.submit(scope, move |scope, worker| {
                    let mut scratch = Scratch::new(handoff.border.capacity());
                    branch(&mut handoff, &mut scratch, worker, pool, scope, ctx);
                });
            } else {
                branch(task, scratch, worker, pool, scope, ctx);
            }

            restore(&mut task.border, &mut task.history);
            task.subtree.remove(x);
        }
    }
    scratch.swap_back(depth, &mut task.border);
}
