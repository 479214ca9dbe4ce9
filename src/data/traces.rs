//! Trace registry: per-trace stores, downsampler specs and configuration.
//!
//! Each managed trace gets a numeric id at registration and one
//! [`TraceEntry`] owning its [`HfStore`], its [`DownsamplerSpec`] and its
//! [`TraceConfig`]. The three are created together and destroyed together
//! when the trace is removed. The registry itself is a plain keyed store;
//! events are serialized by the engine, so register/unregister never overlap
//! a recomputation for the same trace.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::data::hf::HfStore;
use crate::downsample::Downsample;
use crate::error::ResampleError;
use crate::view::VisibleState;

/// Numeric identifier for a trace, assigned by the engine at registration.
pub type TraceId = u32;

// ─────────────────────────────────────────────────────────────────────────────
// AxisGroup
// ─────────────────────────────────────────────────────────────────────────────

/// Identifier of a shared-x axis group (one subplot / linked axis set).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AxisGroup(pub String);

impl AxisGroup {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self(name.into())
    }

    /// The group traces land in when none is specified.
    pub fn default_group() -> Self {
        Self("x".to_string())
    }
}

impl From<&str> for AxisGroup {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl std::fmt::Display for AxisGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Per-trace configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Which algorithm reduces this trace, and whether gap interleaving applies.
///
/// Immutable once attached: an update replaces the whole spec, never mutates
/// the algorithm mid-flight.
#[derive(Clone)]
pub struct DownsamplerSpec {
    pub algorithm: Arc<dyn Downsample>,
    pub interleave_gaps: bool,
}

/// Per-trace limits and view behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceConfig {
    /// Upper bound on points shown at once. Always positive.
    pub max_n_samples: usize,
    /// When `true` the downsampler only ever sees the sub-range of the store
    /// intersecting the current viewport; when `false` it sees the full range.
    pub limit_to_view: bool,
    /// The axis group whose viewport this trace follows.
    pub axis_group: AxisGroup,
    /// Gap threshold as a multiple of the median key spacing.
    pub gap_factor: f64,
}

/// Registration options; `None` fields fall back to the engine defaults.
#[derive(Debug, Clone)]
pub struct TraceOptions {
    /// Algorithm name to resolve in the engine's table.
    pub downsampler: Option<String>,
    pub max_n_samples: Option<usize>,
    pub limit_to_view: bool,
    pub interleave_gaps: bool,
    /// Gap threshold override; `None` uses the engine default.
    pub gap_factor: Option<f64>,
    pub axis_group: Option<AxisGroup>,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            downsampler: None,
            max_n_samples: None,
            limit_to_view: false,
            interleave_gaps: true,
            gap_factor: None,
            axis_group: None,
        }
    }
}

/// Everything the registry holds for one managed trace.
pub struct TraceEntry {
    pub name: String,
    pub store: HfStore,
    pub spec: DownsamplerSpec,
    pub config: TraceConfig,
    pub state: VisibleState,
}

// ─────────────────────────────────────────────────────────────────────────────
// TraceRegistry
// ─────────────────────────────────────────────────────────────────────────────

/// Keyed store mapping trace ids to their entries.
#[derive(Default)]
pub struct TraceRegistry {
    entries: HashMap<TraceId, TraceEntry>,
}

impl TraceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh process-unique trace id.
    pub fn next_id() -> TraceId {
        static NEXT_ID: AtomicU32 = AtomicU32::new(1);
        NEXT_ID.fetch_add(1, Ordering::Relaxed)
    }

    /// Insert a new entry. Fails with [`ResampleError::DuplicateTrace`] when
    /// the id is already present; the registry is left unchanged then.
    pub fn register(&mut self, id: TraceId, entry: TraceEntry) -> Result<(), ResampleError> {
        if self.entries.contains_key(&id) {
            return Err(ResampleError::DuplicateTrace(id));
        }
        self.entries.insert(id, entry);
        Ok(())
    }

    pub fn lookup(&self, id: TraceId) -> Result<&TraceEntry, ResampleError> {
        self.entries.get(&id).ok_or(ResampleError::UnknownTrace(id))
    }

    pub fn lookup_mut(&mut self, id: TraceId) -> Result<&mut TraceEntry, ResampleError> {
        self.entries
            .get_mut(&id)
            .ok_or(ResampleError::UnknownTrace(id))
    }

    /// Remove an entry. Removing twice is an error so double-teardown bugs
    /// surface early.
    pub fn unregister(&mut self, id: TraceId) -> Result<TraceEntry, ResampleError> {
        self.entries
            .remove(&id)
            .ok_or(ResampleError::UnknownTrace(id))
    }

    pub fn contains(&self, id: TraceId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids of all traces, in ascending order for deterministic processing.
    pub fn ids(&self) -> Vec<TraceId> {
        let mut ids: Vec<TraceId> = self.entries.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Ids of the traces following the given axis group, ascending.
    pub fn traces_in_group(&self, group: &AxisGroup) -> Vec<TraceId> {
        let mut ids: Vec<TraceId> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.config.axis_group == *group)
            .map(|(id, _)| *id)
            .collect();
        ids.sort_unstable();
        ids
    }
}
