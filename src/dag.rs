//! Skip-edge DAGs.
//!
//! Vertices are `0..n` in topological order. Every vertex `v > 0` has an
//! implicit chain edge `v - 1 -> v`; in addition `v` may carry one skip edge
//! `s -> v` from an earlier, non-adjacent vertex (`s < v - 1`). No other edges
//! exist, which is what keeps length-indexed path counting a two-term
//! recurrence.

use crate::error::{DrsError, Result};

/// Immutable DAG with one chain edge and at most one skip edge into each vertex.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkipDag {
    skip: Vec<Option<usize>>,
}

impl SkipDag {
    /// A pure chain `0 -> 1 -> ... -> n-1`.
    pub fn chain(n: usize) -> Self {
        Self {
            skip: vec![None; n],
        }
    }

    /// Build from explicit skip sources, `None` meaning "chain edge only".
    ///
    /// Rejects a source at or beyond `v - 1` (it would duplicate the chain
    /// edge, form a self-loop or point forward).
    pub fn from_skip_sources(skip: Vec<Option<usize>>) -> Result<Self> {
        let len = skip.len();
        for (vertex, source) in skip.iter().enumerate() {
            let Some(source) = *source else { continue };
            if source >= len {
                return Err(DrsError::SourceOutOfRange {
                    vertex,
                    skip_source: source,
                    len,
                });
            }
            if source + 1 >= vertex {
                return Err(DrsError::InvalidSkipSource {
                    vertex,
                    skip_source: source,
                });
            }
        }
        Ok(Self { skip })
    }

    /// Build from the flat integer form: entry `v` is the skip source of `v`.
    ///
    /// An entry equal to `v - 1` (or `0` at vertex `0`) is the "no skip edge"
    /// marker. Entries `>= v`, a non-zero entry at vertex `0`, and entries
    /// outside `0..n` are rejected.
    pub fn from_raw(raw: &[usize]) -> Result<Self> {
        let len = raw.len();
        let mut skip = Vec::with_capacity(len);
        for (vertex, &source) in raw.iter().enumerate() {
            if source >= len {
                return Err(DrsError::SourceOutOfRange {
                    vertex,
                    skip_source: source,
                    len,
                });
            }
            let entry = match vertex {
                0 if source == 0 => None,
                _ if source + 1 == vertex => None,
                _ if source + 1 < vertex => Some(source),
                _ => {
                    return Err(DrsError::InvalidSkipSource {
                        vertex,
                        skip_source: source,
                    })
                }
            };
            skip.push(entry);
        }
        Ok(Self { skip })
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.skip.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.skip.is_empty()
    }

    /// Source of the skip edge into `v`, if any.
    ///
    /// # Panics
    /// Panics if `v` is out of range.
    #[inline]
    pub fn skip_source(&self, v: usize) -> Option<usize> {
        self.skip[v]
    }

    /// All skip sources, indexed by target vertex.
    #[inline]
    pub fn skip_sources(&self) -> &[Option<usize>] {
        &self.skip
    }

    pub fn skip_edge_count(&self) -> usize {
        self.skip.iter().filter(|s| s.is_some()).count()
    }

    /// Flat integer form accepted by [`SkipDag::from_raw`].
    pub fn to_raw(&self) -> Vec<usize> {
        self.skip
            .iter()
            .enumerate()
            .map(|(v, s)| s.unwrap_or(v.saturating_sub(1)))
            .collect()
    }
}
