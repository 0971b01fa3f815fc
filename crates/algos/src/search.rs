//! Shared search state: the global best tracker and its reporting.
//!
//! Everything the search strategies share across tasks lives in a single
//! [`SearchContext`] owned by the driver: the output path, the start time,
//! the best sizes seen so far and one leaf counter per worker. Improvement
//! handling is serialized under one lock; the sizes themselves are atomics
//! so the hot search loops can pre-check candidates without locking.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::Instant;

use log::{info, warn};
use num_format::{Locale, ToFormattedString};
use parking_lot::Mutex;

use lattice_core::prelude::*;

use crate::enclosed::has_enclosed_space;

pub struct SearchContext {
    outfile: PathBuf,
    start: Instant,
    threads: usize,
    best_plain: AtomicU32,
    best_enclosed: AtomicU32,
    update_lock: Mutex<()>,
    leaf_counts: Vec<AtomicU64>,
}

impl SearchContext {
    /// Creates a context for a search run executed by `threads` workers,
    /// writing the best selection to `outfile`.
    pub fn new(outfile: impl Into<PathBuf>, threads: usize) -> Self {
        Self {
            outfile: outfile.into(),
            start: Instant::now(),
            threads,
            best_plain: AtomicU32::new(0),
            best_enclosed: AtomicU32::new(0),
            update_lock: Mutex::new(()),
            leaf_counts: (0..threads.max(1)).map(|_| AtomicU64::new(0)).collect(),
        }
    }

    /// Returns the size of the best selection without enclosed space.
    pub fn best_plain(&self) -> u32 {
        self.best_plain.load(Ordering::Acquire)
    }

    /// Returns the size of the best selection seen at all, enclosed space
    /// or not.
    pub fn best_enclosed(&self) -> u32 {
        self.best_enclosed.load(Ordering::Acquire)
    }

    /// Counts one exhausted search leaf for `worker`.
    ///
    /// Each cell is only ever written by its own worker; readers just sum.
    pub fn record_leaf(&self, worker: usize) {
        self.leaf_counts[worker % self.leaf_counts.len()].fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the number of search leaves visited so far, over all workers.
    pub fn total_leaves(&self) -> u64 {
        self.leaf_counts
            .iter()
            .map(|count| count.load(Ordering::Relaxed))
            .sum()
    }

    /// Returns the thread-seconds consumed since the context was created.
    pub fn thread_seconds(&self) -> f32 {
        self.start.elapsed().as_secs_f32() * self.threads as f32
    }

    /// Offers a finished candidate to the global best tracker.
    ///
    /// Under the lock the candidate is re-checked against the current best,
    /// classified by the enclosed-space check and, if it improves one of
    /// the two records, written to disk and logged. A failed write is
    /// logged and otherwise ignored: the selection stays in memory and the
    /// next improvement retries.
    pub fn check_candidate<G: Topology>(&self, subtree: &Subtree<'_, G>) {
        let n = subtree.n_selected();
        if n <= self.best_plain() {
            return;
        }

        let _guard = self.update_lock.lock();
        if n <= self.best_plain.load(Ordering::Relaxed) {
            return;
        }

        if has_enclosed_space(subtree.graph(), subtree) {
            if n > self.best_enclosed.load(Ordering::Relaxed) {
                self.best_enclosed.store(n, Ordering::Release);
                self.write_selection(subtree, &self.enclosed_outfile());
                info!(
                    "{} vertices, found at {:.2} thread-seconds with enclosed space",
                    n,
                    self.thread_seconds()
                );
            }
        } else {
            self.best_plain.store(n, Ordering::Release);
            if n > self.best_enclosed.load(Ordering::Relaxed) {
                self.best_enclosed.store(n, Ordering::Release);
            }
            self.write_selection(subtree, &self.outfile);
            info!(
                "{} vertices, found at {:.2} thread-seconds",
                n,
                self.thread_seconds()
            );
        }
    }

    /// Logs the closing summary of a search run.
    pub fn log_summary(&self) {
        info!(
            "{:.2} thread-seconds elapsed, {} leaves encountered",
            self.thread_seconds(),
            self.total_leaves().to_formatted_string(&Locale::en)
        );
        info!("largest size = {}", self.best_plain());
    }

    fn enclosed_outfile(&self) -> PathBuf {
        let mut name = self.outfile.as_os_str().to_os_string();
        name.push("_enclosed");
        PathBuf::from(name)
    }

    fn write_selection<G: Topology>(&self, subtree: &Subtree<'_, G>, path: &Path) {
        if let Err(err) = fs::write(path, render_selection(subtree)) {
            warn!("failed to write {}: {}", path.display(), err);
        }
    }
}

/// Renders a selection in the layer-by-layer text format.
///
/// The first line holds the box dimensions. Cells follow in id order, `X`
/// for selected and `_` for unselected, one line per row of the lowest
/// axis and a blank line after each layer of the two lowest axes. The last
/// line is the number of selected vertices.
pub fn render_selection<G: Topology>(subtree: &Subtree<'_, G>) -> String {
    let graph = subtree.graph();
    let dims = graph.dims();
    let row = dims[0] as usize;
    let layer = row * dims.get(1).copied().unwrap_or(1) as usize;

    let mut out = String::new();
    for (i, &dim) in dims.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&dim.to_string());
    }
    out.push('\n');
    out.push('\n');

    for v in 0..graph.vertex_count() {
        out.push(if subtree.has(v as VertexId) { 'X' } else { '_' });
        if (v + 1) % row == 0 {
            out.push('\n');
        }
        if (v + 1) % layer == 0 {
            out.push('\n');
        }
    }
    out.push_str(&subtree.n_selected().to_string());
    out.push('\n');

    out
}
