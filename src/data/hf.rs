//! High-frequency per-trace storage.
//!
//! An [`HfStore`] owns the immutable full-resolution `(x, y)` arrays for one
//! trace, plus optional named auxiliary channels aligned 1:1 with the keys
//! (hover text, marker attributes). Keys are stored as `f64`; temporal keys
//! enter through the chrono constructors and become seconds, the same unit
//! the rest of the crate uses for time.
//!
//! The store is read-only after construction: slicing and selection never
//! mutate it and never copy the full arrays.

use std::collections::HashMap;
use std::ops::Range;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ResampleError;

// ─────────────────────────────────────────────────────────────────────────────
// AuxChannel
// ─────────────────────────────────────────────────────────────────────────────

/// One auxiliary per-point channel, aligned 1:1 with the x keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AuxChannel {
    /// Per-point text, e.g. hover text.
    Text(Vec<String>),
    /// Per-point numeric attribute, e.g. marker size.
    Values(Vec<f64>),
}

impl AuxChannel {
    pub fn len(&self) -> usize {
        match self {
            AuxChannel::Text(v) => v.len(),
            AuxChannel::Values(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Contiguous sub-channel for a raw (unreduced) slice.
    pub fn slice(&self, span: Range<usize>) -> AuxChannel {
        match self {
            AuxChannel::Text(v) => AuxChannel::Text(v[span].to_vec()),
            AuxChannel::Values(v) => AuxChannel::Values(v[span].to_vec()),
        }
    }

    /// Sub-channel at the given indices, in order (used after reduction so
    /// aux data follows the same selection as x and y).
    pub fn take(&self, indices: &[usize]) -> AuxChannel {
        match self {
            AuxChannel::Text(v) => {
                AuxChannel::Text(indices.iter().map(|&i| v[i].clone()).collect())
            }
            AuxChannel::Values(v) => {
                AuxChannel::Values(indices.iter().map(|&i| v[i]).collect())
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// HfStore
// ─────────────────────────────────────────────────────────────────────────────

/// Immutable full-resolution data for one trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HfStore {
    x: Vec<f64>,
    y: Vec<f64>,
    aux: HashMap<String, AuxChannel>,
}

impl HfStore {
    /// Build a store from ordered keys and aligned values.
    ///
    /// Fails with [`ResampleError::MismatchedLength`] when `y` is not aligned
    /// with `x`, and with [`ResampleError::UnorderedKeys`] when the keys are
    /// not non-decreasing.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, ResampleError> {
        if x.len() != y.len() {
            return Err(ResampleError::MismatchedLength {
                channel: "y".to_string(),
                expected: x.len(),
                got: y.len(),
            });
        }
        if let Some(i) = x.windows(2).position(|w| w[1] < w[0]) {
            return Err(ResampleError::UnorderedKeys(i + 1));
        }
        Ok(Self {
            x,
            y,
            aux: HashMap::new(),
        })
    }

    /// Build a store with temporal keys, converted to seconds since the epoch.
    pub fn from_timestamps(
        timestamps: &[DateTime<Utc>],
        y: Vec<f64>,
    ) -> Result<Self, ResampleError> {
        let x = timestamps
            .iter()
            .map(|t| t.timestamp_micros() as f64 * 1e-6)
            .collect();
        Self::new(x, y)
    }

    /// Attach a named aux channel. Fails when the channel is not aligned
    /// with the keys; the store is left unchanged in that case.
    pub fn with_aux<S: Into<String>>(
        mut self,
        name: S,
        channel: AuxChannel,
    ) -> Result<Self, ResampleError> {
        let name = name.into();
        if channel.len() != self.x.len() {
            return Err(ResampleError::MismatchedLength {
                channel: name,
                expected: self.x.len(),
                got: channel.len(),
            });
        }
        self.aux.insert(name, channel);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn aux(&self) -> &HashMap<String, AuxChannel> {
        &self.aux
    }

    /// The contiguous index interval `[lo, hi)` covered by `range`, or the
    /// full interval when `range` is unset.
    ///
    /// Bounds satisfy `x[lo-1] < low <= x[lo]` and `x[hi-1] <= high < x[hi]`
    /// (binary search over the sorted keys). The interval may be empty;
    /// callers that require non-empty output use [`Self::slice_nonempty`].
    pub fn slice(&self, range: Option<(f64, f64)>) -> Range<usize> {
        match range {
            None => 0..self.x.len(),
            Some((low, high)) => {
                let lo = self.x.partition_point(|&k| k < low);
                let hi = self.x.partition_point(|&k| k <= high);
                lo..hi.max(lo)
            }
        }
    }

    /// Like [`Self::slice`] but fails with [`ResampleError::EmptyRange`] when
    /// the interval is empty.
    pub fn slice_nonempty(&self, range: Option<(f64, f64)>) -> Result<Range<usize>, ResampleError> {
        let span = self.slice(range);
        if span.is_empty() {
            let (low, high) = range.unwrap_or((f64::NAN, f64::NAN));
            return Err(ResampleError::EmptyRange { low, high });
        }
        Ok(span)
    }

    /// All aux channels restricted to a contiguous span.
    pub fn aux_slice(&self, span: Range<usize>) -> HashMap<String, AuxChannel> {
        self.aux
            .iter()
            .map(|(name, channel)| (name.clone(), channel.slice(span.clone())))
            .collect()
    }

    /// All aux channels at the given (global) indices.
    pub fn aux_take(&self, indices: &[usize]) -> HashMap<String, AuxChannel> {
        self.aux
            .iter()
            .map(|(name, channel)| (name.clone(), channel.take(indices)))
            .collect()
    }
}
