//! Grow-only vertex deletion sets.

use crate::error::{DrsError, Result};

/// Boolean deletion vector over the vertices of a DAG; `true` = removed.
///
/// The set only ever grows: there is no way to un-remove a vertex.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RemovalSet {
    removed: Vec<bool>,
    count: usize,
}

impl RemovalSet {
    /// Empty set over `n` vertices.
    pub fn new(n: usize) -> Self {
        Self {
            removed: vec![false; n],
            count: 0,
        }
    }

    /// Mark `v` removed. Returns `true` if it was not removed before.
    pub fn insert(&mut self, v: usize) -> Result<bool> {
        let len = self.removed.len();
        let slot = self
            .removed
            .get_mut(v)
            .ok_or(DrsError::VertexOutOfRange { vertex: v, len })?;
        if *slot {
            return Ok(false);
        }
        *slot = true;
        self.count += 1;
        Ok(true)
    }

    /// Whether `v` is removed. Out-of-range vertices are not.
    #[inline]
    pub fn contains(&self, v: usize) -> bool {
        self.removed.get(v).copied().unwrap_or(false)
    }

    /// Number of removed vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of vertices the set ranges over.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.removed.len()
    }

    /// Removed vertices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.removed
            .iter()
            .enumerate()
            .filter_map(|(v, &r)| r.then_some(v))
    }

    #[inline]
    pub fn as_slice(&self) -> &[bool] {
        &self.removed
    }

    pub fn into_vec(self) -> Vec<bool> {
        self.removed
    }
}

impl From<Vec<bool>> for RemovalSet {
    fn from(removed: Vec<bool>) -> Self {
        let count = removed.iter().filter(|&&r| r).count();
        Self { removed, count }
    }
}
