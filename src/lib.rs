//! plot-resampler crate root: re-exports and module wiring.
//!
//! This crate keeps full-resolution series data off-screen and computes a
//! bounded, algorithmically-chosen subset matching the current viewport.
//! The rendering library stays an external collaborator: it delivers
//! viewport-change events and consumes the emitted visible slices.
//!
//! Module overview:
//! - `data`: per-trace high-frequency storage and the trace registry
//! - `downsample`: pluggable reduction algorithms and the gap policy
//! - `view`: view state and the per-event recomputation step
//! - `events`: viewport-change events and the channel boundary
//! - `engine`: the ready-to-use top-level object wiring it all together
//! - `config`: engine-wide defaults
//! - `persistence`: JSON save/load for the configuration

pub mod config;
pub mod data;
pub mod downsample;
pub mod engine;
pub mod error;
pub mod events;
pub mod persistence;
pub mod view;

// Public re-exports for a compact external API
pub use config::ResamplerConfig;
pub use data::hf::{AuxChannel, HfStore};
pub use data::traces::{
    AxisGroup, DownsamplerSpec, TraceConfig, TraceId, TraceOptions, TraceRegistry,
};
pub use downsample::{AlgorithmTable, Downsample, EveryNthPoint, GapPolicy, Lttb};
pub use engine::PlotResampler;
pub use error::ResampleError;
pub use events::{view_channel, EventOutcome, ViewEvent, ViewEventSender};
pub use view::{TraceUpdate, ViewState, VisibleState};
