//! Depth-reducing sets for skip-edge DAGs (DRS-DP)
//!
//! This crate counts length-`d` paths in DAGs whose vertices carry a chain
//! edge from their predecessor plus at most one skip edge from further back,
//! and uses those counts to greedily build a *depth-reducing set*: a set `S`
//! of vertices such that `G - S` has no path of length `d`. This is the
//! computational core behind experiments on depth-robust graphs.
//!
//! ## Core idea
//! 1. A forward sweep counts paths of each length ending at every vertex,
//!    keeping only a handful of checkpointed layers.
//! 2. A backward sweep counts paths starting at every vertex and replays the
//!    forward layers from the checkpoints, so the number of paths through
//!    each vertex is available without storing all `d` layers.
//! 3. [`GreedyReducer`] removes the most incident vertex until no paths are
//!    left and, from the observed decay of the path count, certifies a lower
//!    bound on the size of *any* depth-reducing set.
//!
//! Path lengths count edges: a length-`d` path visits `d + 1` vertices.
//!
//! ## Quick start
//! ```
//! use drs_dp::{greedy_exact, SkipDag};
//!
//! // 0 -> 1 -> ... -> 7 with skip edges 0 -> 3 and 2 -> 6.
//! let dag = SkipDag::from_raw(&[0, 0, 1, 0, 3, 4, 2, 6]).unwrap();
//! let outcome = greedy_exact(&dag, 4).unwrap();
//! assert!(outcome.size >= 1);
//! assert!(outcome.lower_bound <= outcome.size as f64);
//! ```
//!
//! ## Numeric flavours
//! - [`ExactEngine`] counts with arbitrary-precision integers.
//! - [`ApproxEngine`] counts with `f64`; very large counts lose precision or
//!   saturate to infinity, which only degrades the certificate.
//! - The blocked [`CheckpointPolicy`] backs the two-pass approximate driver
//!   [`greedy_approx_two_pass`].

pub mod builder;
pub mod checkpoint;
pub mod dag;
pub mod engine;
pub mod error;
pub mod greedy;
pub mod removal;
pub mod sweep;
pub mod traits;
pub mod utils;

pub use crate::builder::PathCountEngineBuilder;
pub use crate::dag::SkipDag;
pub use crate::engine::{
    ApproxEngine, CheckpointPolicy, ExactEngine, PathCountEngine, PathCounts, SweepStats,
};
pub use crate::error::{DrsError, Result};
pub use crate::greedy::{
    greedy_approx, greedy_approx_two_pass, greedy_exact, DrsOutcome, GreedyReducer,
};
pub use crate::removal::RemovalSet;
pub use crate::traits::PathCount;
