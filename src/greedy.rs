//! Greedy depth-reducing sets with an online lower-bound certificate.
//!
//! The driver repeatedly removes the vertex incident to the most remaining
//! length-`d` paths until none are left. Along the way it tracks how fast the
//! path count decays: if some set of `k` vertices destroys every path, then
//! every surviving graph has a vertex on at least a `1/k` fraction of its
//! paths, so each greedy step keeps at most a `1 - 1/k` fraction. Both
//! certificates below invert that inequality and therefore never exceed the
//! size of the smallest depth-reducing set (up to floating error).

use num_bigint::BigUint;

use crate::dag::SkipDag;
use crate::engine::{CheckpointPolicy, PathCountEngine};
use crate::error::{DrsError, Result};
use crate::removal::RemovalSet;
use crate::traits::PathCount;

/// Final output of a greedy run.
#[derive(Clone, Debug, PartialEq)]
pub struct DrsOutcome {
    /// No depth-reducing set smaller than this exists.
    pub lower_bound: f64,
    /// Number of greedy removals, equal to `removed.len()`.
    pub size: usize,
    /// The depth-reducing set.
    pub removed: RemovalSet,
}

impl DrsOutcome {
    fn trivial(n: usize) -> Self {
        Self {
            lower_bound: 0.0,
            size: 0,
            removed: RemovalSet::new(n),
        }
    }

    /// `(lower_bound, |S|, S)` as a plain tuple.
    pub fn into_tuple(self) -> (f64, usize, Vec<bool>) {
        (self.lower_bound, self.size, self.removed.into_vec())
    }
}

/// Ratio certificate `1 / (1 - current / previous)` for a single greedy step.
///
/// Returns `None` when `current >= previous`: path counts cannot grow under
/// removal, so an apparent increase is rounding noise and carries no bound.
pub fn ratio_certificate<T: PathCount>(current: &T, previous: &T) -> Option<f64> {
    if current >= previous {
        return None;
    }
    if current.is_zero() {
        return Some(1.0);
    }
    let (c, p) = (current.approx_f64(), previous.approx_f64());
    let ratio = if c.is_finite() && p.is_finite() {
        c / p
    } else {
        (current.natural_log() - previous.natural_log()).exp()
    };
    (ratio < 1.0).then(|| 1.0 / (1.0 - ratio))
}

/// Decay certificate `1 / (1 - (current / initial)^(1 / removals))`.
///
/// `removals` is the number of vertices removed to get from the initial to
/// the current count. Returns `None` when the average per-step ratio is not
/// below 1 or is not a number (saturated approximate counts).
pub fn decay_certificate(log_current: f64, log_initial: f64, removals: usize) -> Option<f64> {
    if removals == 0 {
        return None;
    }
    let rate = ((log_current - log_initial) / removals as f64).exp();
    (rate < 1.0).then(|| 1.0 / (1.0 - rate))
}

/// Greedy driver over a path-counting engine of flavour `T`.
#[derive(Clone, Debug)]
pub struct GreedyReducer<T> {
    engine: PathCountEngine<T>,
}

impl<T: PathCount> Default for GreedyReducer<T> {
    fn default() -> Self {
        Self::new(PathCountEngine::new())
    }
}

impl<T: PathCount> GreedyReducer<T> {
    pub fn new(engine: PathCountEngine<T>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &PathCountEngine<T> {
        &self.engine
    }

    /// Build a depth-reducing set for `depth` and certify a lower bound.
    pub fn run(&self, dag: &SkipDag, depth: usize) -> Result<DrsOutcome> {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("greedy_drs", n = dag.len(), depth, exact = T::EXACT);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let mut removed = RemovalSet::new(dag.len());
        let first = self.engine.count(dag, depth, &removed)?;
        if !first.has_paths() {
            #[cfg(feature = "tracing")]
            tracing::info!("no length-d paths; empty set suffices");
            return Ok(DrsOutcome::trivial(dag.len()));
        }

        let log_initial = first.total.natural_log();
        let mut lower_bound = 0.0f64;
        let mut previous = first.total;
        let mut previous_max = first.max_incident;
        remove_argmax(&mut removed, first.argmax, 0)?;
        let mut size = 1;

        loop {
            let counts = self.engine.count(dag, depth, &removed)?;

            if T::EXACT {
                // Removing v destroys exactly the paths through v.
                let mut restored = counts.total.clone();
                restored += &previous_max;
                if restored != previous {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        iteration = size,
                        "path count after removal differs from the incident prediction"
                    );
                }
            }

            if let Some(c) = ratio_certificate(&counts.total, &previous) {
                lower_bound = lower_bound.max(c);
            }
            if !counts.has_paths() {
                break;
            }
            if let Some(c) = decay_certificate(counts.total.natural_log(), log_initial, size) {
                lower_bound = lower_bound.max(c);
            }

            #[cfg(feature = "tracing")]
            tracing::debug!(
                iteration = size,
                vertex = ?counts.argmax,
                remaining = counts.total.approx_f64(),
                lower_bound,
                "greedy step"
            );

            remove_argmax(&mut removed, counts.argmax, size)?;
            size += 1;
            previous = counts.total;
            previous_max = counts.max_incident;
        }

        #[cfg(feature = "tracing")]
        tracing::info!(size, lower_bound, "depth-reducing set complete");

        Ok(DrsOutcome {
            lower_bound,
            size,
            removed,
        })
    }
}

fn remove_argmax(removed: &mut RemovalSet, argmax: Option<usize>, iteration: usize) -> Result<()> {
    let vertex = argmax.ok_or(DrsError::NoProgress { iteration })?;
    if removed.insert(vertex)? {
        Ok(())
    } else {
        Err(DrsError::NoProgress { iteration })
    }
}

/// Greedy run with exact arbitrary-precision counts.
pub fn greedy_exact(dag: &SkipDag, depth: usize) -> Result<DrsOutcome> {
    GreedyReducer::<BigUint>::new(PathCountEngine::new()).run(dag, depth)
}

/// Greedy run with `f64` counts and the halving checkpoint policy.
pub fn greedy_approx(dag: &SkipDag, depth: usize) -> Result<DrsOutcome> {
    GreedyReducer::<f64>::new(PathCountEngine::new()).run(dag, depth)
}

/// Greedy run with `f64` counts and the blocked (two-pass) checkpoint policy.
pub fn greedy_approx_two_pass(dag: &SkipDag, depth: usize) -> Result<DrsOutcome> {
    let engine = PathCountEngine::with_policy(CheckpointPolicy::Blocked { block_size: None });
    GreedyReducer::<f64>::new(engine).run(dag, depth)
}
