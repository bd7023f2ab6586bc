//! Checkpoint stack used by the engine to replay the forward sweep.
//!
//! Each [`Checkpoint`] is an owned snapshot of the "paths ending at v"
//! array for one layer (path length). Layers strictly increase from the
//! bottom of the stack to the top, so the top is always the deepest layer
//! that can be resumed from without starting over at layer 0.

use crate::utils::copy_counts;

/// Snapshot of a forward-sweep array at a given layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Checkpoint<T> {
    /// Path length the snapshot was taken at.
    pub layer: usize,
    /// `counts[v]` = number of paths of length `layer` ending at `v`.
    pub counts: Vec<T>,
}

/// Owned LIFO of forward-sweep snapshots with strictly increasing layers.
#[derive(Debug, Clone)]
pub struct CheckpointStack<T> {
    entries: Vec<Checkpoint<T>>,
}

impl<T> Default for CheckpointStack<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: Clone> CheckpointStack<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a value copy of `counts` taken at `layer`.
    ///
    /// # Panics
    /// In debug builds, panics if `layer` does not exceed the current top.
    pub fn push(&mut self, layer: usize, counts: &[T]) {
        debug_assert!(
            self.entries.last().map_or(true, |top| top.layer < layer),
            "checkpoint layers must strictly increase"
        );
        self.entries.push(Checkpoint {
            layer,
            counts: copy_counts(counts),
        });
    }

    #[inline]
    pub fn peek(&self) -> Option<&Checkpoint<T>> {
        self.entries.last()
    }

    #[inline]
    pub fn pop(&mut self) -> Option<Checkpoint<T>> {
        self.entries.pop()
    }

    /// Layer of the top snapshot, or 0 when empty.
    #[inline]
    pub fn deepest_layer(&self) -> usize {
        self.entries.last().map_or(0, |top| top.layer)
    }

    /// Drop every snapshot taken beyond `layer`. Returns how many were dropped.
    pub fn discard_above(&mut self, layer: usize) -> usize {
        let keep = self.entries.partition_point(|c| c.layer <= layer);
        let dropped = self.entries.len() - keep;
        self.entries.truncate(keep);
        dropped
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Halving rule: checkpoint layer `y` once the distance from the last
/// checkpoint `last` exceeds half of the remaining span to `target`.
///
/// Layers at or past `target` are never checkpointed.
#[inline]
pub fn crosses_halfway(last: usize, y: usize, target: usize) -> bool {
    y > last && y < target && 2 * (y - last) > target - last
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stack() {
        let mut s: CheckpointStack<f64> = CheckpointStack::new();
        assert!(s.is_empty());
        assert_eq!(s.deepest_layer(), 0);
        assert!(s.peek().is_none());
        assert!(s.pop().is_none());
    }

    #[test]
    fn push_copies_and_peek_sees_top() {
        let mut live = vec![1.0, 2.0];
        let mut s = CheckpointStack::new();
        s.push(0, &live);
        live[0] = 9.0;
        s.push(3, &live);
        assert_eq!(s.len(), 2);
        assert_eq!(s.deepest_layer(), 3);
        assert_eq!(s.peek().unwrap().counts, vec![9.0, 2.0]);
        let top = s.pop().unwrap();
        assert_eq!(top.layer, 3);
        assert_eq!(s.peek().unwrap().counts, vec![1.0, 2.0]);
    }

    #[test]
    fn discard_above_keeps_lower_layers() {
        let mut s = CheckpointStack::new();
        for layer in [0, 4, 6, 7] {
            s.push(layer, &[layer as f64]);
        }
        assert_eq!(s.discard_above(5), 2);
        assert_eq!(s.deepest_layer(), 4);
        assert_eq!(s.discard_above(4), 0);
        assert_eq!(s.discard_above(0), 1);
        assert_eq!(s.len(), 1);
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn non_increasing_push_panics() {
        let mut s = CheckpointStack::new();
        s.push(2, &[0.0]);
        s.push(2, &[0.0]);
    }

    #[test]
    fn halving_rule_yields_logarithmic_checkpoints() {
        let target = 1024;
        let mut last = 0;
        let mut taken = Vec::new();
        for y in 1..=target {
            if crosses_halfway(last, y, target) {
                taken.push(y);
                last = y;
            }
        }
        assert!(taken.windows(2).all(|w| w[0] < w[1]));
        assert!(taken.len() <= 11, "too many checkpoints: {taken:?}");
        assert_eq!(taken.first(), Some(&513));
    }

    #[test]
    fn halving_rule_never_touches_target() {
        for target in 0..20 {
            for last in 0..=target {
                assert!(!crosses_halfway(last, target, target));
            }
        }
    }
}
