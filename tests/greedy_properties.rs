mod common;

use common::{enumerate_paths, minimum_drs_size, skip_dag};
use drs_dp::{greedy_approx, greedy_approx_two_pass, greedy_exact, ExactEngine};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn lower_bound_never_exceeds_minimum(dag in skip_dag(12), depth in 1usize..12) {
        let minimum = minimum_drs_size(&dag, depth);
        for run in [greedy_exact, greedy_approx, greedy_approx_two_pass] {
            let outcome = run(&dag, depth).unwrap();
            prop_assert!(
                outcome.lower_bound <= minimum as f64 + 1e-9,
                "bound {} exceeds minimum {}",
                outcome.lower_bound,
                minimum
            );
            prop_assert!(outcome.size >= minimum);
        }
    }
}

proptest! {
    #[test]
    fn greedy_set_destroys_every_path(dag in skip_dag(14), depth in 1usize..14) {
        let outcome = greedy_exact(&dag, depth).unwrap();
        let (remaining, _) = enumerate_paths(&dag, depth, outcome.removed.as_slice());
        prop_assert_eq!(remaining, 0);
        let counts = ExactEngine::new().count(&dag, depth, &outcome.removed).unwrap();
        prop_assert!(!counts.has_paths());
    }

    #[test]
    fn greedy_terminates_within_vertex_count(dag in skip_dag(14), depth in 1usize..14) {
        for run in [greedy_exact, greedy_approx, greedy_approx_two_pass] {
            let outcome = run(&dag, depth).unwrap();
            prop_assert!(outcome.size <= dag.len());
            prop_assert_eq!(outcome.size, outcome.removed.len());
            prop_assert!(outcome.lower_bound >= 0.0);
            prop_assert!(outcome.lower_bound.is_finite());
        }
    }

    #[test]
    fn flavours_pick_the_same_vertices(dag in skip_dag(14), depth in 1usize..14) {
        let exact = greedy_exact(&dag, depth).unwrap();
        let approx = greedy_approx(&dag, depth).unwrap();
        let two_pass = greedy_approx_two_pass(&dag, depth).unwrap();
        prop_assert_eq!(&exact.removed, &approx.removed);
        prop_assert_eq!(&approx.removed, &two_pass.removed);
        prop_assert!((exact.lower_bound - approx.lower_bound).abs() < 1e-9);
    }

    #[test]
    fn no_paths_means_trivial_outcome(dag in skip_dag(8)) {
        let depth = dag.len();
        let (lower_bound, size, removed) = greedy_exact(&dag, depth).unwrap().into_tuple();
        prop_assert_eq!(lower_bound, 0.0);
        prop_assert_eq!(size, 0);
        prop_assert!(removed.iter().all(|r| !r));
    }
}
