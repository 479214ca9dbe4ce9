//! View state and the per-event recomputation step.
//!
//! A trace is either `Full` (the raw slice fits under its sample budget and
//! is emitted unreduced, for exact fidelity) or `Downsampled` (the budget is
//! exceeded and the configured algorithm picks the shown indices). The
//! recompute step here is the pure core of the engine: given one entry and
//! the resolved viewport range it produces the next [`TraceUpdate`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::data::hf::AuxChannel;
use crate::data::traces::{AxisGroup, TraceEntry, TraceId};
use crate::downsample::GapPolicy;
use crate::error::ResampleError;

// ─────────────────────────────────────────────────────────────────────────────
// VisibleState
// ─────────────────────────────────────────────────────────────────────────────

/// Whether a trace currently shows its raw slice or a reduced subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisibleState {
    /// Entire selected range shown unreduced (at or below the budget).
    Full,
    /// Budget exceeded; a representative subset is shown.
    Downsampled,
}

// ─────────────────────────────────────────────────────────────────────────────
// ViewState
// ─────────────────────────────────────────────────────────────────────────────

/// Per-axis-group visible ranges. An absent key means "unset" = full domain.
///
/// Mutated only by the engine on receipt of a viewport-change event; lives
/// for the interactive session and is never persisted.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    ranges: HashMap<AxisGroup, (f64, f64)>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current range for a group, or `None` when unset.
    pub fn range(&self, group: &AxisGroup) -> Option<(f64, f64)> {
        self.ranges.get(group).copied()
    }

    /// Store the new range for a group; `None` resets it to the full domain.
    pub fn set_range(&mut self, group: AxisGroup, range: Option<(f64, f64)>) {
        match range {
            Some(bounds) => {
                self.ranges.insert(group, bounds);
            }
            None => {
                self.ranges.remove(&group);
            }
        }
    }

    pub fn clear(&mut self) {
        self.ranges.clear();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// TraceUpdate
// ─────────────────────────────────────────────────────────────────────────────

/// One outbound redraw emission for a single trace.
///
/// The host hands this to its renderer to mutate the visible trace in
/// place. Serializable so it can also cross a process boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceUpdate {
    pub trace_id: TraceId,
    /// Shown keys, strictly from the backing store (never synthesized).
    pub x: Vec<f64>,
    /// Shown values, aligned with `x`.
    pub y: Vec<f64>,
    /// Aux channels restricted to the shown indices.
    pub aux: HashMap<String, AuxChannel>,
    /// Break positions: no line between shown point `i` and `i + 1`.
    /// Carried as positions rather than inserted sentinel points so the
    /// emitted point count stays bounded by the trace's sample budget.
    pub gaps: Vec<usize>,
    pub state: VisibleState,
}

impl TraceUpdate {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Recompute step
// ─────────────────────────────────────────────────────────────────────────────

/// Recompute the visible slice for one trace against the resolved viewport
/// range.
///
/// Steps (per event, per affected trace):
/// 1. window = range when the trace limits to view, else the full domain;
/// 2. slice the store to the window;
/// 3. at or below the budget, emit the raw slice (`Full`), skipping the
///    downsampler entirely;
/// 4. else reduce, apply the gap policy when configured, emit (`Downsampled`).
///
/// An empty slice emits an empty update (render nothing) rather than an
/// error; the whole figure must never blank because one viewport misses a
/// trace's domain.
pub(crate) fn recompute(
    trace_id: TraceId,
    entry: &mut TraceEntry,
    range: Option<(f64, f64)>,
) -> Result<TraceUpdate, ResampleError> {
    let store = &entry.store;
    let window = if entry.config.limit_to_view {
        range
    } else {
        None
    };
    let span = store.slice(window);

    if span.len() <= entry.config.max_n_samples {
        entry.state = VisibleState::Full;
        log::debug!(
            "trace {}: full view, {} of {} points",
            trace_id,
            span.len(),
            store.len()
        );
        return Ok(TraceUpdate {
            trace_id,
            x: store.x()[span.clone()].to_vec(),
            y: store.y()[span.clone()].to_vec(),
            aux: store.aux_slice(span),
            gaps: Vec::new(),
            state: VisibleState::Full,
        });
    }

    let xs = &store.x()[span.clone()];
    let ys = &store.y()[span.clone()];
    let local = entry
        .spec
        .algorithm
        .reduce(xs, ys, entry.config.max_n_samples)?;

    let x: Vec<f64> = local.iter().map(|&i| xs[i]).collect();
    let y: Vec<f64> = local.iter().map(|&i| ys[i]).collect();
    let global: Vec<usize> = local.iter().map(|&i| i + span.start).collect();
    let aux = store.aux_take(&global);

    let gaps = if entry.spec.interleave_gaps {
        GapPolicy::new(entry.config.gap_factor).gap_positions(&x)
    } else {
        Vec::new()
    };

    log::debug!(
        "trace {}: {} -> {} points via '{}' ({} gaps)",
        trace_id,
        span.len(),
        x.len(),
        entry.spec.algorithm.name(),
        gaps.len()
    );

    entry.state = VisibleState::Downsampled;
    Ok(TraceUpdate {
        trace_id,
        x,
        y,
        aux,
        gaps,
        state: VisibleState::Downsampled,
    })
}
