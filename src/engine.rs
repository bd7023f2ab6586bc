//! Checkpointed path-counting engine.
//!
//! One call computes, for a skip DAG `G`, a removal set `S` and a depth `d`:
//! 1. a forward sweep of "paths of length i ending at v" for `i = 0..=d`,
//!    retaining only a few snapshots on a [`CheckpointStack`],
//! 2. a backward sweep of "paths of length i starting at v" for `i = 1..=d`,
//!    replaying the forward arrays `d - i` from the nearest checkpoint,
//! 3. incident counts `Σ_i end_{d-i}[v] · start_i[v]` and their argmax.
//!
//! The engine is generic over [`PathCount`]; the exact flavour uses
//! [`BigUint`] and the approximate flavour `f64`.

use std::marker::PhantomData;

use num_bigint::BigUint;

use crate::checkpoint::{crosses_halfway, CheckpointStack};
use crate::dag::SkipDag;
use crate::error::{DrsError, Result};
use crate::removal::RemovalSet;
use crate::sweep::LayerSweep;
use crate::traits::PathCount;
use crate::utils::{copy_counts, default_block_size, zeros};

/// How the forward sweep is checkpointed for the backward replay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CheckpointPolicy {
    /// Snapshot once the distance from the last checkpoint exceeds half of
    /// the remaining span. O(log d) snapshots, O(d log d) replayed steps.
    #[default]
    Halving,
    /// Snapshot every `block_size` layers (default ⌈√d⌉) and replay one
    /// block at a time into a cache, so each forward layer is computed
    /// exactly twice.
    Blocked { block_size: Option<usize> },
}

/// Work and memory counters for one engine call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SweepStats {
    /// Layer steps of the initial forward sweep.
    pub forward_steps: usize,
    /// Layer steps spent regenerating forward arrays during the backward sweep.
    pub replay_steps: usize,
    /// Largest number of snapshots held on the checkpoint stack at once.
    pub peak_checkpoints: usize,
    /// Largest number of forward arrays held in the block cache at once.
    pub peak_cached_layers: usize,
}

/// Result of one engine call.
#[derive(Clone, Debug, PartialEq)]
pub struct PathCounts<T> {
    /// Number of length-`d` paths in `G - S`.
    pub total: T,
    /// `incident[v]` = number of those paths passing through `v`.
    pub incident: Vec<T>,
    /// `max_v incident[v]` (zero when there are no paths).
    pub max_incident: T,
    /// Smallest vertex attaining `max_incident`; `None` iff there are no paths.
    pub argmax: Option<usize>,
    pub stats: SweepStats,
}

impl<T: PathCount> PathCounts<T> {
    fn empty(n: usize) -> Self {
        Self {
            total: T::zero(),
            incident: zeros(n),
            max_incident: T::zero(),
            argmax: None,
            stats: SweepStats::default(),
        }
    }

    #[inline]
    pub fn has_paths(&self) -> bool {
        !self.total.is_zero()
    }

    /// `Σ_v incident[v]`; equals `(d + 1) · total` when counts are exact.
    pub fn incident_sum(&self) -> T {
        self.incident.iter().fold(T::zero(), |mut acc, c| {
            acc += c;
            acc
        })
    }
}

/// Path-counting engine for numeric flavour `T`.
///
/// ```
/// use drs_dp::{ApproxEngine, RemovalSet, SkipDag};
///
/// let dag = SkipDag::chain(5);
/// let counts = ApproxEngine::new().count(&dag, 4, &RemovalSet::new(5)).unwrap();
/// assert_eq!(counts.total, 1.0);
/// assert_eq!(counts.argmax, Some(0));
/// ```
#[derive(Clone, Debug)]
pub struct PathCountEngine<T> {
    policy: CheckpointPolicy,
    _count: PhantomData<fn() -> T>,
}

/// Exact engine over arbitrary-precision integers.
pub type ExactEngine = PathCountEngine<BigUint>;
/// Approximate engine over `f64`.
pub type ApproxEngine = PathCountEngine<f64>;

impl<T: PathCount> Default for PathCountEngine<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PathCount> PathCountEngine<T> {
    /// Engine with the halving checkpoint policy.
    pub fn new() -> Self {
        Self::with_policy(CheckpointPolicy::Halving)
    }

    /// Engine with an explicit checkpoint policy.
    ///
    /// # Panics
    /// Panics if a blocked policy carries `block_size == Some(0)`.
    pub fn with_policy(policy: CheckpointPolicy) -> Self {
        if let CheckpointPolicy::Blocked { block_size } = policy {
            assert!(block_size != Some(0), "block_size must be positive");
        }
        Self {
            policy,
            _count: PhantomData,
        }
    }

    pub fn policy(&self) -> CheckpointPolicy {
        self.policy
    }

    /// Count length-`depth` paths in `dag - removed` and their incidence.
    pub fn count(
        &self,
        dag: &SkipDag,
        depth: usize,
        removed: &RemovalSet,
    ) -> Result<PathCounts<T>> {
        if depth == 0 {
            return Err(DrsError::ZeroDepth);
        }
        let n = dag.len();
        if removed.capacity() != n {
            return Err(DrsError::RemovalSetMismatch {
                expected: n,
                actual: removed.capacity(),
            });
        }

        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!(
            "count_paths",
            n,
            depth,
            removed = removed.len(),
            exact = T::EXACT
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        // A length-d path needs d + 1 distinct surviving vertices.
        if depth >= n - removed.len() {
            return Ok(PathCounts::empty(n));
        }

        let sweep = LayerSweep::new(dag, removed);
        let (mut replay, ending_d) = ForwardReplay::<T>::sweep(sweep, depth, self.policy);

        let mut total = T::zero();
        for c in &ending_d {
            total += c;
        }
        let mut incident = ending_d;
        if total.is_zero() {
            let mut counts = PathCounts::empty(n);
            counts.stats = replay.stats;
            return Ok(counts);
        }

        let mut starting = sweep.base_layer::<T>();
        let mut starting_next = zeros::<T>(n);
        for i in 1..=depth {
            sweep.step_starting(&starting, &mut starting_next);
            std::mem::swap(&mut starting, &mut starting_next);
            let ending = replay.layer(depth - i);
            for ((acc, e), s) in incident.iter_mut().zip(ending).zip(&starting) {
                if !e.is_zero() && !s.is_zero() {
                    *acc += &e.product(s);
                }
            }
        }

        let mut max_incident = T::zero();
        let mut argmax = None;
        for (v, c) in incident.iter().enumerate() {
            if *c > max_incident {
                max_incident = c.clone();
                argmax = Some(v);
            }
        }

        let counts = PathCounts {
            total,
            incident,
            max_incident,
            argmax,
            stats: replay.stats,
        };

        if T::EXACT {
            let expected = counts.total.product(&T::from_count(depth + 1));
            let sum = counts.incident_sum();
            #[cfg(feature = "tracing")]
            if sum != expected {
                tracing::warn!(
                    depth,
                    "incident counts do not sum to (d + 1) times the path total"
                );
            }
            debug_assert!(sum == expected, "incident sum identity violated");
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(
            argmax = ?counts.argmax,
            total = counts.total.approx_f64(),
            forward_steps = counts.stats.forward_steps,
            replay_steps = counts.stats.replay_steps,
            peak_checkpoints = counts.stats.peak_checkpoints,
            "count_paths done"
        );

        Ok(counts)
    }
}

#[derive(Clone, Copy, Debug)]
enum ReplayMode {
    Halving,
    Blocked(usize),
}

/// Serves forward arrays for strictly decreasing layers after the forward sweep.
struct ForwardReplay<'a, T> {
    sweep: LayerSweep<'a>,
    mode: ReplayMode,
    stack: CheckpointStack<T>,
    work: Vec<T>,
    scratch: Vec<T>,
    block: Vec<Vec<T>>,
    block_start: usize,
    stats: SweepStats,
}

impl<'a, T: PathCount> ForwardReplay<'a, T> {
    /// Run the forward sweep to `depth`, checkpointing per `policy`.
    ///
    /// Returns the replay state and the forward array at layer `depth`.
    fn sweep(sweep: LayerSweep<'a>, depth: usize, policy: CheckpointPolicy) -> (Self, Vec<T>) {
        let mode = match policy {
            CheckpointPolicy::Halving => ReplayMode::Halving,
            CheckpointPolicy::Blocked { block_size } => {
                ReplayMode::Blocked(block_size.unwrap_or_else(|| default_block_size(depth)))
            }
        };

        let mut stack = CheckpointStack::new();
        let mut stats = SweepStats::default();
        let mut work = sweep.base_layer::<T>();
        let mut scratch = zeros::<T>(sweep.width());
        stack.push(0, &work);
        stats.peak_checkpoints = 1;

        sweep.advance_ending(&mut work, &mut scratch, 0, depth, |y, counts| {
            let keep = match mode {
                ReplayMode::Halving => crosses_halfway(stack.deepest_layer(), y, depth),
                ReplayMode::Blocked(b) => y < depth && y % b == 0,
            };
            if keep {
                stack.push(y, counts);
                stats.peak_checkpoints = stats.peak_checkpoints.max(stack.len());
            }
        });
        stats.forward_steps = depth;

        #[cfg(feature = "tracing")]
        tracing::trace!(
            depth,
            checkpoints = stack.len(),
            mode = ?mode,
            "forward sweep done"
        );

        let ending_d = copy_counts(&work);
        let replay = Self {
            sweep,
            mode,
            stack,
            work,
            scratch,
            block: Vec::new(),
            block_start: 0,
            stats,
        };
        (replay, ending_d)
    }

    /// Forward array at `layer`. Successive calls must request decreasing layers.
    fn layer(&mut self, layer: usize) -> &[T] {
        match self.mode {
            ReplayMode::Halving => {
                let from = self.resume_below(layer);
                let sweep = self.sweep;
                let stack = &mut self.stack;
                let stats = &mut self.stats;
                sweep.advance_ending(&mut self.work, &mut self.scratch, from, layer, |y, counts| {
                    if crosses_halfway(stack.deepest_layer(), y, layer) {
                        stack.push(y, counts);
                        stats.peak_checkpoints = stats.peak_checkpoints.max(stack.len());
                    }
                });
                self.stats.replay_steps += layer - from;
                &self.work
            }
            ReplayMode::Blocked(_) => {
                let cached = layer >= self.block_start && layer < self.block_start + self.block.len();
                if !cached {
                    self.load_block(layer);
                }
                &self.block[layer - self.block_start]
            }
        }
    }

    /// Drop checkpoints beyond `layer`, copy the nearest one into the working
    /// array and return its layer.
    fn resume_below(&mut self, layer: usize) -> usize {
        self.stack.discard_above(layer);
        match self.stack.peek() {
            Some(top) => {
                self.sweep.restore(&mut self.work, &top.counts);
                top.layer
            }
            None => {
                self.work = self.sweep.base_layer();
                0
            }
        }
    }

    /// Recompute the block `[checkpoint, layer]` into the cache.
    fn load_block(&mut self, layer: usize) {
        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!("load_block", layer).entered();

        let from = self.resume_below(layer);
        self.block.clear();
        self.block.push(copy_counts(&self.work));
        self.block_start = from;
        let sweep = self.sweep;
        let block = &mut self.block;
        sweep.advance_ending(&mut self.work, &mut self.scratch, from, layer, |_, counts| {
            block.push(copy_counts(counts));
        });
        self.stats.replay_steps += layer - from;
        self.stats.peak_cached_layers = self.stats.peak_cached_layers.max(self.block.len());
    }
}
