#![allow(dead_code)]

use drs_dp::{RemovalSet, SkipDag};
use proptest::prelude::*;

/// Enumerate every length-`depth` path of `dag - removed` and tally it per vertex.
pub fn enumerate_paths(dag: &SkipDag, depth: usize, removed: &[bool]) -> (u64, Vec<u64>) {
    let n = dag.len();
    let mut successors = vec![Vec::new(); n];
    for v in 1..n {
        successors[v - 1].push(v);
    }
    for (v, source) in dag.skip_sources().iter().enumerate() {
        if let Some(s) = *source {
            successors[s].push(v);
        }
    }

    fn walk(
        successors: &[Vec<usize>],
        removed: &[bool],
        depth: usize,
        path: &mut Vec<usize>,
        total: &mut u64,
        incident: &mut [u64],
    ) {
        if path.len() == depth + 1 {
            *total += 1;
            for &v in path.iter() {
                incident[v] += 1;
            }
            return;
        }
        let last = *path.last().unwrap();
        for &w in &successors[last] {
            if !removed[w] {
                path.push(w);
                walk(successors, removed, depth, path, total, incident);
                path.pop();
            }
        }
    }

    let mut total = 0;
    let mut incident = vec![0; n];
    let mut path = Vec::with_capacity(depth + 1);
    for v in 0..n {
        if removed[v] {
            continue;
        }
        path.push(v);
        walk(&successors, removed, depth, &mut path, &mut total, &mut incident);
        path.pop();
    }
    (total, incident)
}

/// Size of the smallest vertex set whose removal leaves no length-`depth` path.
pub fn minimum_drs_size(dag: &SkipDag, depth: usize) -> usize {
    let n = dag.len();
    assert!(n <= 16, "exhaustive search only for tiny DAGs");
    let mut best = n;
    for mask in 0u32..(1u32 << n) {
        let size = mask.count_ones() as usize;
        if size >= best {
            continue;
        }
        let removed: Vec<bool> = (0..n).map(|v| mask & (1 << v) != 0).collect();
        if enumerate_paths(dag, depth, &removed).0 == 0 {
            best = size;
        }
    }
    best
}

/// Random skip DAG with `1..=max_n` vertices and a random removal set over it.
pub fn dag_with_removals(max_n: usize) -> impl Strategy<Value = (SkipDag, RemovalSet)> {
    prop::collection::vec((any::<bool>(), any::<usize>(), prop::bool::weighted(0.2)), 1..=max_n)
        .prop_map(|picks| {
            let skip = picks
                .iter()
                .enumerate()
                .map(|(v, &(on, seed, _))| (on && v >= 2).then(|| seed % (v - 1)))
                .collect();
            let removed = picks.iter().map(|&(_, _, r)| r).collect::<Vec<_>>();
            (
                SkipDag::from_skip_sources(skip).unwrap(),
                RemovalSet::from(removed),
            )
        })
}

/// Random skip DAG with `1..=max_n` vertices.
pub fn skip_dag(max_n: usize) -> impl Strategy<Value = SkipDag> {
    dag_with_removals(max_n).prop_map(|(dag, _)| dag)
}
