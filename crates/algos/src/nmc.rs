//! Nested Monte-Carlo search for dense induced subtrees.
//!
//! Complete enumeration is hopeless beyond small boxes, so this module
//! trades completeness for depth: a level-0 search grows the subtree by
//! uniformly random border picks until nothing fits anymore; a level-L
//! search tries every current border vertex, scores each trial with a
//! level-(L-1) search, commits to the best one and repeats. The state
//! machine, border and history are shared with the exact enumeration, and
//! every nested call returns the caller's subtree, border and history to
//! the state it received.
//!
//! The search makes no optimality promise; improvements stream through the
//! shared best tracker as they are found.

use log::debug;
use nanorand::{Rng, WyRand};

use lattice_core::prelude::*;

use crate::pool::WorkerPool;
use crate::scratch::Scratch;
use crate::search::SearchContext;

/// Compiled default nesting depth of the `nmc` front-end.
pub const DEFAULT_LEVEL: u32 = 1;

#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NmcConfig {
    /// Nesting depth. Level 0 is a plain random playout; level L scores
    /// every extension candidate with a level L-1 search.
    pub level: u32,
}

impl NmcConfig {
    pub fn new(level: u32) -> Self {
        Self { level }
    }
}

impl Default for NmcConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LEVEL)
    }
}

/// Runs one Nested Monte-Carlo search per root vertex, spread over the
/// worker pool, and returns the size of the best selection found.
pub fn nmc_largest<G>(graph: &G, config: NmcConfig, pool: &WorkerPool, ctx: &SearchContext) -> u32
where
    G: Topology + Sync,
{
    let vertex_count = graph.vertex_count();

    pool.scope(|scope| {
        for root in 0..vertex_count as VertexId {
            pool.submit(scope, move |_, worker| {
                let mut subtree = Subtree::new(graph, root);
                let mut border = OrderedIndexSet::new(vertex_count);
                let mut history = History::new();
                update(&subtree, &mut border, root, &mut history);

                let mut current_path = OrderedIndexSet::new(vertex_count);
                current_path.push_front(root);

                let mut search = NmcSearch {
                    worker,
                    scratch: Scratch::new(vertex_count),
                    rng: WyRand::new(),
                    top_level: config.level,
                    ctx,
                };
                let mut best_path = OrderedIndexSet::new(vertex_count);
                let mut best_result = 0;
                search.run(
                    &mut subtree,
                    &mut border,
                    &mut history,
                    config.level,
                    &mut best_result,
                    current_path,
                    &mut best_path,
                );
            });
        }
    });

    ctx.log_summary();
    ctx.best_plain()
}

/// Worker-local state threaded through the nested levels.
struct NmcSearch<'a> {
    worker: usize,
    scratch: Scratch,
    rng: WyRand,
    top_level: u32,
    ctx: &'a SearchContext,
}

impl NmcSearch<'_> {
    /// One nested search from the given state.
    ///
    /// Commits one best-scored extension at a time until the border is
    /// exhausted, then unwinds every commit. `current_path` enters holding
    /// the vertex the caller extended with (the root, at the top); on a
    /// new record the full extension path is swapped into
    /// `global_best_path`.
    #[allow(clippy::too_many_arguments)]
    fn run<G: Topology>(
        &mut self,
        subtree: &mut Subtree<'_, G>,
        border: &mut OrderedIndexSet,
        history: &mut History,
        level: u32,
        global_best_result: &mut u32,
        mut current_path: OrderedIndexSet,
        global_best_path: &mut OrderedIndexSet,
    ) {
        let mut committed: Vec<VertexId> = Vec::new();
        let mut best_path = OrderedIndexSet::new(border.capacity());
        let mut best_result = 0;

        loop {
            // Vertices whose addition the validity rule rejects are parked
            // in the scratch list for the duration of this decision.
            let depth = subtree.n_selected() as usize;
            let mut cursor = border.head();
            while let Some(x) = cursor {
                cursor = border.next_of(x);
                if !subtree.safe_to_add(x) {
                    border.remove(x);
                    self.scratch.stash(depth, x);
                }
            }

            if border.is_empty() {
                self.scratch.swap_back(depth, border);
                break;
            }

            let mut trial_path = OrderedIndexSet::new(border.capacity());
            while let Some(x) = border.pop_front() {
                self.scratch.stash(depth, x);

                let accepted = subtree.add(x);
                debug_assert!(accepted, "unsafe candidates were parked above");
                update(subtree, border, x, history);
                trial_path.push_back(x);

                if level == 0 {
                    self.random_playout(
                        subtree.clone(),
                        border.clone(),
                        &mut best_result,
                        trial_path.clone(),
                        &mut best_path,
                    );
                } else {
                    self.run(
                        subtree,
                        border,
                        history,
                        level - 1,
                        &mut best_result,
                        trial_path.clone(),
                        &mut best_path,
                    );
                }

                trial_path.pop_back();
                restore(border, history);
                subtree.remove(x);
            }
            self.scratch.swap_back(depth, border);

            let Some(next_vertex) = best_path.pop_front() else {
                break;
            };
            let accepted = subtree.add(next_vertex);
            debug_assert!(accepted, "the best path extends the current state");
            committed.push(next_vertex);
            border.remove(next_vertex);
            update(subtree, border, next_vertex, history);

            if level == self.top_level {
                debug!(
                    "level {} decided on vertex {}, n_selected = {}: {:.2} thread-seconds",
                    level,
                    next_vertex,
                    subtree.n_selected(),
                    self.ctx.thread_seconds()
                );
            }
        }

        let result = subtree.n_selected();

        // Unwind the committed chain; the caller sees its exact state
        // again. The head of current_path is put back last so the chain
        // ends up behind it in commit order.
        let first = current_path.pop_front();
        while let Some(x) = committed.pop() {
            subtree.remove(x);
            restore(border, history);
            border.push_back(x);
            current_path.push_front(x);
        }
        if let Some(first) = first {
            current_path.push_front(first);
        }

        if result > *global_best_result {
            *global_best_result = result;
            std::mem::swap(global_best_path, &mut current_path);
        }
    }

    /// Level 0: extend by uniformly random border picks until the subtree
    /// is maximal. Works on its own copy of the state and updates the
    /// border without history.
    fn random_playout<G: Topology>(
        &mut self,
        mut subtree: Subtree<'_, G>,
        mut border: OrderedIndexSet,
        best_result: &mut u32,
        mut current_path: OrderedIndexSet,
        best_path: &mut OrderedIndexSet,
    ) {
        while !border.is_empty() {
            let mut x;
            loop {
                x = self.remove_random(&mut border);
                if subtree.safe_to_add(x) || border.is_empty() {
                    break;
                }
            }

            if !subtree.add(x) {
                break;
            }
            simple_update(&subtree, &mut border, x);
            current_path.push_back(x);
        }

        if subtree.n_selected() > self.ctx.best_plain() {
            self.ctx.check_candidate(&subtree);
        }
        self.ctx.record_leaf(self.worker);

        if subtree.n_selected() > *best_result {
            *best_result = subtree.n_selected();
            std::mem::swap(best_path, &mut current_path);
        }
    }

    /// Removes and returns a uniformly random border element.
    fn remove_random(&mut self, border: &mut OrderedIndexSet) -> VertexId {
        let pick = self.rng.generate_range(0..border.len());
        let x = border.iter().nth(pick).unwrap();
        border.remove(x);
        x
    }
}
