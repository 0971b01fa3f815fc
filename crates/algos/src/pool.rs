//! The worker pool shared by the search strategies.
//!
//! A thin wrapper around a fixed-size rayon pool that additionally tracks
//! how many submitted tasks are still in flight. The searches use that
//! count to decide whether splitting a frame off to another thread is
//! worthwhile: a sub-frame is only handed over (by value, state cloned)
//! when a worker would otherwise sit idle.

use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::{Scope, ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

pub struct WorkerPool {
    pool: ThreadPool,
    size: usize,
    in_flight: AtomicUsize,
}

impl WorkerPool {
    /// Creates a pool sized to the available hardware concurrency.
    pub fn new() -> Result<Self, ThreadPoolBuildError> {
        Self::with_threads(num_cpus::get())
    }

    /// Creates a pool with a fixed number of worker threads.
    pub fn with_threads(threads: usize) -> Result<Self, ThreadPoolBuildError> {
        let pool = ThreadPoolBuilder::new().num_threads(threads).build()?;
        let size = pool.current_num_threads();
        Ok(Self {
            pool,
            size,
            in_flight: AtomicUsize::new(0),
        })
    }

    /// Returns the number of worker threads.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns true iff fewer tasks than workers are in flight.
    ///
    /// Advisory only: the count may change before the caller acts on it.
    /// Acting on a stale answer affects load balance, never correctness.
    pub fn has_idle(&self) -> bool {
        self.in_flight.load(Ordering::Acquire) < self.size
    }

    /// Runs `op` inside a scope on this pool, blocking until every task
    /// submitted within the scope has completed.
    pub fn scope<'scope, OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce(&Scope<'scope>) -> R + Send,
        R: Send,
    {
        self.pool.scope(op)
    }

    /// Submits a task to the scope. The task receives the scope (so it can
    /// submit follow-up tasks) and the index of the worker running it.
    pub fn submit<'scope, T>(&'scope self, scope: &Scope<'scope>, task: T)
    where
        T: FnOnce(&Scope<'scope>, usize) + Send + 'scope,
    {
        self.in_flight.fetch_add(1, Ordering::AcqRel);
        scope.spawn(move |scope| {
            let worker = rayon::current_thread_index().unwrap_or(0);
            task(scope, worker);
            self.in_flight.fetch_sub(1, Ordering::AcqRel);
        });
    }
}
