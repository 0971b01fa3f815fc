use std::fs;

use lattice::prelude::*;

/// The record 18-vertex induced subtree of the 3x3x3 lattice, in an add
/// order where every vertex extends the tree by exactly one leaf.
const CUBE_RECORD: [VertexId; 17] = [3, 9, 4, 6, 13, 5, 2, 8, 11, 15, 17, 20, 24, 19, 23, 21, 25];

#[test]
fn square_lattice_counts_and_maximum() {
    let graph = HrpGraph::new(&[2, 2]).unwrap();

    let subtrees: Vec<_> = induced_subtrees(&graph).collect();
    assert_eq!(subtrees.len(), 13);
    assert_eq!(subtrees.iter().map(Vec::len).max(), Some(3));

    let dir = tempfile::tempdir().unwrap();
    let outfile = dir.path().join("best");
    let pool = WorkerPool::with_threads(2).unwrap();
    let ctx = SearchContext::new(&outfile, pool.size());

    let best = enumerate_largest(&graph, &pool, &ctx);
    assert_eq!(best, 3);

    let artifact = fs::read_to_string(&outfile).unwrap();
    let mut lines = artifact.lines();
    assert_eq!(lines.next(), Some("2 2"));
    assert_eq!(lines.next(), Some(""));
    assert_eq!(artifact.matches('X').count(), 3);
    assert_eq!(artifact.lines().last(), Some("3"));
}

#[test]
fn tiny_line_graphs_enumerate_completely() {
    let counts = [(vec![1], 2), (vec![2], 4), (vec![3], 7)];

    for (dims, expected) in counts {
        let graph = HrpGraph::new(&dims).unwrap();
        assert_eq!(
            induced_subtrees(&graph).count(),
            expected,
            "induced subtrees of {:?}",
            dims
        );
    }
}

#[test]
fn cube_record_is_a_valid_selection() {
    let graph = HrpGraph::new(&[3, 3, 3]).unwrap();
    let mut subtree = Subtree::new(&graph, 0);

    for v in CUBE_RECORD {
        assert!(subtree.add(v), "adding {} must keep the tree valid", v);
    }

    assert_eq!(subtree.n_selected(), 18);
    assert!(!has_enclosed_space(&graph, &subtree));

    // the effective degree of every cell, selected or not
    let expected: [(bool, u8); 27] = [
        (true, 2),
        (false, 3),
        (true, 2),
        (true, 3),
        (true, 3),
        (true, 3),
        (true, 2),
        (false, 3),
        (true, 2),
        (true, 1),
        (false, 4),
        (true, 2),
        (false, 5),
        (true, 1),
        (false, 5),
        (true, 2),
        (false, 4),
        (true, 1),
        (false, 3),
        (true, 1),
        (true, 3),
        (true, 1),
        (false, 5),
        (true, 1),
        (true, 3),
        (true, 1),
        (false, 3),
    ];
    for (v, &(selected, degree)) in expected.iter().enumerate() {
        let v = v as VertexId;
        assert_eq!(subtree.has(v), selected, "selection of {}", v);
        assert_eq!(subtree.count(v), degree, "effective degree of {}", v);
    }
}

#[test]
fn cube_record_is_reported_and_written() {
    let graph = HrpGraph::new(&[3, 3, 3]).unwrap();
    let mut subtree = Subtree::new(&graph, 0);
    for v in CUBE_RECORD {
        assert!(subtree.add(v));
    }

    let dir = tempfile::tempdir().unwrap();
    let outfile = dir.path().join("best");
    let ctx = SearchContext::new(&outfile, 1);

    ctx.check_candidate(&subtree);

    assert_eq!(ctx.best_plain(), 18);
    let artifact = fs::read_to_string(&outfile).unwrap();
    assert_eq!(artifact.lines().next(), Some("3 3 3"));
    assert_eq!(artifact.lines().last(), Some("18"));
    assert_eq!(artifact.matches('X').count(), 18);
}

#[test]
fn static_rank_variant_runs_both_strategies() {
    let graph = StaticHrpGraph::new([2, 3]).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let pool = WorkerPool::with_threads(2).unwrap();

    let subtrees = induced_subtrees(&graph).count();
    let dynamic = HrpGraph::new(&[2, 3]).unwrap();
    assert_eq!(subtrees, induced_subtrees(&dynamic).count());

    let ctx = SearchContext::new(dir.path().join("static"), pool.size());
    let best = enumerate_largest(&graph, &pool, &ctx);

    let nmc_ctx = SearchContext::new(dir.path().join("static-nmc"), pool.size());
    let sampled = nmc_largest(&graph, NmcConfig::new(0), &pool, &nmc_ctx);

    assert!(best >= sampled);
    assert!(best > 0);
}

#[test]
fn strategies_agree_on_small_lattices() {
    for dims in [vec![4], vec![2, 2], vec![3, 2]] {
        let graph = HrpGraph::new(&dims).unwrap();
        let dir = tempfile::tempdir().unwrap();

        let pool = WorkerPool::with_threads(2).unwrap();
        let enumerate_ctx = SearchContext::new(dir.path().join("enumerate"), pool.size());
        let enumerated = enumerate_largest(&graph, &pool, &enumerate_ctx);

        let exact = induced_subtrees(&graph)
            .map(|subtree| subtree.len() as u32)
            .max()
            .unwrap();
        assert_eq!(enumerated, exact, "exhaustive search on {:?}", dims);

        let nmc_ctx = SearchContext::new(dir.path().join("nmc"), pool.size());
        let sampled = nmc_largest(&graph, NmcConfig::new(1), &pool, &nmc_ctx);
        assert!(
            sampled <= exact,
            "the heuristic cannot beat the exact maximum on {:?}",
            dims
        );
        assert!(sampled > 0);
    }
}
