use crate::engine::{CheckpointPolicy, PathCountEngine};
use crate::greedy::GreedyReducer;
use crate::traits::PathCount;

/// Configures a [`PathCountEngine`] (and, through it, a [`GreedyReducer`]).
///
/// ```
/// use drs_dp::{PathCountEngineBuilder, CheckpointPolicy};
///
/// let engine = PathCountEngineBuilder::<f64>::new().with_block_size(8).build();
/// assert_eq!(engine.policy(), CheckpointPolicy::Blocked { block_size: Some(8) });
/// ```
pub struct PathCountEngineBuilder<T: PathCount> {
    policy: CheckpointPolicy,
    block_size: Option<usize>,
    engine: std::marker::PhantomData<fn() -> T>,
}

impl<T: PathCount> Default for PathCountEngineBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PathCount> PathCountEngineBuilder<T> {
    pub fn new() -> Self {
        Self {
            policy: CheckpointPolicy::Halving,
            block_size: None,
            engine: std::marker::PhantomData,
        }
    }
    pub fn halving(mut self) -> Self {
        self.policy = CheckpointPolicy::Halving;
        self
    }
    pub fn blocked(mut self) -> Self {
        self.policy = CheckpointPolicy::Blocked { block_size: None };
        self
    }
    /// Selects the blocked policy with an explicit block size.
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.policy = CheckpointPolicy::Blocked { block_size: None };
        self.block_size = Some(block_size);
        self
    }
    pub fn build(self) -> PathCountEngine<T> {
        match self.policy {
            CheckpointPolicy::Halving => PathCountEngine::new(),
            CheckpointPolicy::Blocked { .. } => {
                PathCountEngine::with_policy(CheckpointPolicy::Blocked {
                    block_size: self.block_size,
                })
            }
        }
    }
    pub fn build_reducer(self) -> GreedyReducer<T> {
        GreedyReducer::new(self.build())
    }
}
