//! Example: greedy depth-reducing set on a small skip DAG.
//!
//! Run with:
//! `cargo run --example greedy_demo`

use drs_dp::{
    greedy_approx, greedy_approx_two_pass, greedy_exact, DrsOutcome, ExactEngine, RemovalSet,
    SkipDag,
};

fn main() -> drs_dp::Result<()> {
    // Twelve vertices on a chain plus a few skip edges:
    //
    //   0 -> 3, 1 -> 5, 4 -> 7, 2 -> 9, 8 -> 11
    //
    // In the raw encoding a value of v - 1 means "no skip edge".
    let raw = [0, 0, 1, 0, 3, 1, 5, 4, 7, 2, 9, 8];
    let dag = SkipDag::from_raw(&raw)?;
    let depth = 4;

    let counts = ExactEngine::new().count(&dag, depth, &RemovalSet::new(dag.len()))?;
    println!("{} vertices, {} skip edges", dag.len(), dag.skip_edge_count());
    println!("Paths of length {depth}: {}", counts.total);
    println!("Busiest vertex: {:?} on {} paths", counts.argmax, counts.max_incident);
    println!();

    for (name, run) in [
        ("exact", greedy_exact as fn(&SkipDag, usize) -> drs_dp::Result<DrsOutcome>),
        ("approx", greedy_approx),
        ("approx two-pass", greedy_approx_two_pass),
    ] {
        let outcome = run(&dag, depth)?;
        let removed: Vec<usize> = outcome.removed.iter().collect();
        println!(
            "{name:>16}: |S| = {}, lower bound = {:.4}, S = {removed:?}",
            outcome.size, outcome.lower_bound
        );
    }
    Ok(())
}
