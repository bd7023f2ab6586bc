//! Assorted utilities for dense per-vertex count arrays.
//!
//! Snapshots taken by the engine must never alias the live working arrays,
//! so every helper here hands back an owned copy.

use crate::traits::PathCount;

/// Value-copy of a count array.
#[inline]
pub fn copy_counts<T: Clone>(input: &[T]) -> Vec<T> {
    input.to_vec()
}

/// Overwrite `dst` with the values of `src`, element by element.
///
/// # Panics
/// Panics if the slices differ in length.
#[inline]
pub fn copy_into<T: Clone>(dst: &mut [T], src: &[T]) {
    dst.clone_from_slice(src);
}

/// An array of `len` zeros.
#[inline]
pub fn zeros<T: PathCount>(len: usize) -> Vec<T> {
    vec![T::zero(); len]
}

/// Compute an integer square root-style block size for a sweep of `depth` layers.
///
/// Used by the blocked checkpoint policy when no explicit size is configured.
#[inline]
pub fn default_block_size(depth: usize) -> usize {
    if depth <= 1 {
        1
    } else {
        (depth as f64).sqrt().ceil() as usize
    }
}
