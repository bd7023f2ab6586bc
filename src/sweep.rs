//! One-layer steps of the path-counting recurrence over `G - S`.
//!
//! Layer `i` holds, for every vertex `v`, the number of length-`i` paths
//! (`i` edges, `i + 1` vertices) that either end at `v` (forward direction)
//! or start at `v` (backward direction). Removed vertices carry 0 on every
//! layer, so neighbours never need to re-check the removal set.

use crate::dag::SkipDag;
use crate::removal::RemovalSet;
use crate::traits::PathCount;
use crate::utils::{copy_into, zeros};

/// The recurrence for one `(dag, S)` pair.
///
/// Both the forward and the backward step are `O(n)` and allocation free.
#[derive(Clone, Copy, Debug)]
pub struct LayerSweep<'a> {
    dag: &'a SkipDag,
    removed: &'a RemovalSet,
}

impl<'a> LayerSweep<'a> {
    /// The caller guarantees `removed.capacity() == dag.len()`.
    pub fn new(dag: &'a SkipDag, removed: &'a RemovalSet) -> Self {
        debug_assert_eq!(dag.len(), removed.capacity());
        Self { dag, removed }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.dag.len()
    }

    /// Layer 0: every surviving vertex is a path of length 0, in both directions.
    pub fn base_layer<T: PathCount>(&self) -> Vec<T> {
        (0..self.width())
            .map(|v| {
                if self.removed.contains(v) {
                    T::zero()
                } else {
                    T::one()
                }
            })
            .collect()
    }

    /// `next[v] = prev[v - 1] + prev[skip(v)]` for surviving `v`.
    pub fn step_ending<T: PathCount>(&self, prev: &[T], next: &mut [T]) {
        for (v, slot) in next.iter_mut().enumerate() {
            let mut acc = T::zero();
            if !self.removed.contains(v) {
                if v > 0 {
                    acc += &prev[v - 1];
                }
                if let Some(s) = self.dag.skip_source(v) {
                    acc += &prev[s];
                }
            }
            *slot = acc;
        }
    }

    /// `next[v] = prev[v + 1] + Σ_{w : skip(w) = v} prev[w]` for surviving `v`.
    pub fn step_starting<T: PathCount>(&self, prev: &[T], next: &mut [T]) {
        let n = self.width();
        for (v, slot) in next.iter_mut().enumerate() {
            *slot = if v + 1 < n {
                prev[v + 1].clone()
            } else {
                T::zero()
            };
        }
        for (w, source) in self.dag.skip_sources().iter().enumerate() {
            if let Some(s) = *source {
                next[s] += &prev[w];
            }
        }
        for v in self.removed.iter() {
            next[v] = T::zero();
        }
    }

    /// Forward array at `layer`, computed from scratch without checkpoints.
    pub fn ending_at<T: PathCount>(&self, layer: usize) -> Vec<T> {
        let mut current = self.base_layer::<T>();
        let mut next = zeros::<T>(self.width());
        for _ in 0..layer {
            self.step_ending(&current, &mut next);
            std::mem::swap(&mut current, &mut next);
        }
        current
    }

    /// Advance `work` from `from` to `to` in place, using `scratch` as the
    /// second buffer. Calls `on_layer(y, counts)` after each produced layer.
    pub fn advance_ending<T, F>(
        &self,
        work: &mut Vec<T>,
        scratch: &mut Vec<T>,
        from: usize,
        to: usize,
        mut on_layer: F,
    ) where
        T: PathCount,
        F: FnMut(usize, &[T]),
    {
        for y in from + 1..=to {
            self.step_ending(work, scratch);
            std::mem::swap(work, scratch);
            on_layer(y, work);
        }
    }

    /// Reset `work` to a snapshot.
    #[inline]
    pub fn restore<T: PathCount>(&self, work: &mut [T], snapshot: &[T]) {
        copy_into(work, snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;

    fn big(n: u32) -> BigUint {
        BigUint::from(n)
    }

    #[test]
    fn chain_forward_counts() {
        let dag = SkipDag::chain(4);
        let s = RemovalSet::new(4);
        let sweep = LayerSweep::new(&dag, &s);
        let l2: Vec<BigUint> = sweep.ending_at(2);
        assert_eq!(l2, vec![big(0), big(0), big(1), big(1)]);
        let l4: Vec<BigUint> = sweep.ending_at(4);
        assert!(l4.iter().all(|c| *c == big(0)));
    }

    #[test]
    fn skip_edge_adds_second_predecessor() {
        // 0 -> 1 -> 2 -> 3 with skip 0 -> 3.
        let dag = SkipDag::from_skip_sources(vec![None, None, None, Some(0)]).unwrap();
        let s = RemovalSet::new(4);
        let sweep = LayerSweep::new(&dag, &s);
        let l1: Vec<f64> = sweep.ending_at(1);
        assert_eq!(l1, vec![0.0, 1.0, 1.0, 2.0]);
    }

    #[test]
    fn removed_vertex_blocks_paths() {
        let dag = SkipDag::chain(4);
        let s = RemovalSet::from(vec![false, true, false, false]);
        let sweep = LayerSweep::new(&dag, &s);
        let base: Vec<f64> = sweep.base_layer();
        assert_eq!(base, vec![1.0, 0.0, 1.0, 1.0]);
        let l1: Vec<f64> = sweep.ending_at(1);
        assert_eq!(l1, vec![0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn starting_step_mirrors_ending_step() {
        let dag = SkipDag::from_skip_sources(vec![None, None, None, Some(0), Some(1)]).unwrap();
        let s = RemovalSet::new(5);
        let sweep = LayerSweep::new(&dag, &s);
        let base: Vec<f64> = sweep.base_layer();
        let mut start1 = zeros::<f64>(5);
        sweep.step_starting(&base, &mut start1);
        // Out-degrees: 0 -> {1, 3}, 1 -> {2, 4}, 2 -> {3}, 3 -> {4}, 4 -> {}.
        assert_eq!(start1, vec![2.0, 2.0, 1.0, 1.0, 0.0]);
        let total_start: f64 = start1.iter().sum();
        let total_end: f64 = sweep.ending_at::<f64>(1).iter().sum();
        assert_eq!(total_start, total_end);
    }

    #[test]
    fn advance_reports_every_layer() {
        let dag = SkipDag::chain(6);
        let s = RemovalSet::new(6);
        let sweep = LayerSweep::new(&dag, &s);
        let mut work: Vec<f64> = sweep.base_layer();
        let mut scratch = zeros::<f64>(6);
        let mut seen = Vec::new();
        sweep.advance_ending(&mut work, &mut scratch, 0, 3, |y, _| seen.push(y));
        assert_eq!(seen, vec![1, 2, 3]);
        assert_eq!(work, sweep.ending_at::<f64>(3));
    }
}
