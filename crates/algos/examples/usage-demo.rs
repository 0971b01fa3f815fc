use lattice::prelude::*;
use log::info;

type AppResult = Result<(), Box<dyn std::error::Error>>;

fn main() -> AppResult {
    // First, we want to prepare some logging, so that we can see
    // the output of what's going on.
    env_logger::init();

    // We build the host lattice from its box dimensions. A 3x3x2 box
    // has 18 vertices, numbered row-major: the x coordinate varies
    // fastest, the z coordinate slowest.
    let graph = HrpGraph::new(&[3, 3, 2])?;
    info!("lattice with {} vertices", graph.vertex_count());

    // The lazy enumerator visits every induced subtree exactly once,
    // starting with the empty one. On a lattice this small we can simply
    // count them all.
    let n_subtrees = time(|| induced_subtrees(&graph).count());
    info!("the lattice has {n_subtrees} induced subtrees");

    // For the largest subtree we let the parallel search do the work.
    // Improvements are reported through the context as they happen and
    // the best selection is written to the output file.
    let pool = WorkerPool::new()?;
    let ctx = SearchContext::new("demo-best", pool.size());
    let best = time(|| enumerate_largest(&graph, &pool, &ctx));
    info!("largest induced subtree: {best} vertices");

    // On lattices beyond exhaustive reach the Nested Monte-Carlo search
    // explores dense subtrees instead. Level 0 is a pure random playout;
    // every added level scores each candidate with a full search one
    // level below.
    let nmc_ctx = SearchContext::new("demo-nmc-best", pool.size());
    let sampled = time(|| nmc_largest(&graph, NmcConfig::new(1), &pool, &nmc_ctx));
    info!("Monte-Carlo result = {sampled}");

    // Selections that differ only by a symmetry of the box are the same
    // sculpture. The permutation set materializes all symmetries and
    // canonicalizes selections for deduplication.
    let symmetries = PermutationSet::new(&[3, 3, 2]);
    info!("the box has {} symmetries", symmetries.len());

    let canonical = symmetries.canonical_form(&[0, 1, 2]);
    let mirrored = symmetries.canonical_form(&[15, 16, 17]);
    assert_eq!(canonical, mirrored);
    info!("both rods canonicalize to {canonical:?}");

    Ok(())
}

fn time<T, F: FnOnce() -> T>(f: F) -> T {
    let start = std::time::Instant::now();
    let res = f();
    info!("Execution took {:?}", start.elapsed());
    res
}
