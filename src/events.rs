//! Viewport-change events and the channel boundary.
//!
//! Hosts deliver zoom/pan notifications as [`ViewEvent`]s, either directly
//! through [`PlotResampler::handle_event`](crate::engine::PlotResampler::handle_event)
//! or through the mpsc channel created by [`view_channel`]. Events are
//! serialized into a single-consumer queue and each is processed to
//! completion before the next; for overlapping axis groups the last writer
//! wins on the stored view range. Coalescing of rapid successive events
//! belongs to the integrating UI, not to this engine.

use std::sync::mpsc::{channel, Receiver, SendError, Sender};

use serde::{Deserialize, Serialize};

use crate::data::traces::{AxisGroup, TraceId};
use crate::error::ResampleError;
use crate::view::TraceUpdate;

// ─────────────────────────────────────────────────────────────────────────────
// ViewEvent
// ─────────────────────────────────────────────────────────────────────────────

/// A viewport change for one axis group.
///
/// `range: None` resets the group to the full domain (autoscale).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewEvent {
    pub axis_group: AxisGroup,
    pub range: Option<(f64, f64)>,
}

impl ViewEvent {
    /// A zoom/pan to the given key range.
    pub fn zoom<G: Into<AxisGroup>>(group: G, low: f64, high: f64) -> Self {
        Self {
            axis_group: group.into(),
            range: Some((low, high)),
        }
    }

    /// A reset to the full domain.
    pub fn reset<G: Into<AxisGroup>>(group: G) -> Self {
        Self {
            axis_group: group.into(),
            range: None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EventOutcome
// ─────────────────────────────────────────────────────────────────────────────

/// Everything produced by handling one event: refreshed slices for the
/// affected traces, plus per-trace failures. A failing trace never aborts
/// the rest of the batch.
#[derive(Debug, Default)]
pub struct EventOutcome {
    pub updates: Vec<TraceUpdate>,
    pub failures: Vec<(TraceId, ResampleError)>,
}

impl EventOutcome {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// The update for a specific trace, if this event touched it.
    pub fn update_for(&self, trace_id: TraceId) -> Option<&TraceUpdate> {
        self.updates.iter().find(|u| u.trace_id == trace_id)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Channel boundary
// ─────────────────────────────────────────────────────────────────────────────

/// Convenience sender half for feeding viewport events from a UI thread.
#[derive(Clone)]
pub struct ViewEventSender {
    tx: Sender<ViewEvent>,
}

impl ViewEventSender {
    pub fn send(&self, event: ViewEvent) -> Result<(), SendError<ViewEvent>> {
        self.tx.send(event)
    }

    pub fn zoom<G: Into<AxisGroup>>(
        &self,
        group: G,
        low: f64,
        high: f64,
    ) -> Result<(), SendError<ViewEvent>> {
        self.send(ViewEvent::zoom(group, low, high))
    }

    pub fn reset<G: Into<AxisGroup>>(&self, group: G) -> Result<(), SendError<ViewEvent>> {
        self.send(ViewEvent::reset(group))
    }
}

/// Create the single-consumer event queue connecting a host UI to the
/// engine's [`pump`](crate::engine::PlotResampler::pump).
pub fn view_channel() -> (ViewEventSender, Receiver<ViewEvent>) {
    let (tx, rx) = channel();
    (ViewEventSender { tx }, rx)
}
