//! Error taxonomy for the resampling engine.
//!
//! Every variant is a registration-time or request-time error; nothing here
//! signals silent data corruption. Registration errors abort the single
//! `add_trace` call and leave the registry unchanged. Per-event errors are
//! collected per trace in the event outcome so one bad trace never blanks
//! the rest of the figure.

use crate::data::traces::TraceId;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResampleError {
    /// A trace with this id is already registered.
    #[error("trace {0} is already registered")]
    DuplicateTrace(TraceId),

    /// No trace with this id exists (also raised on double teardown).
    #[error("unknown trace {0}")]
    UnknownTrace(TraceId),

    /// The requested key range selects no samples and the caller required a
    /// non-empty interval.
    #[error("range ({low}, {high}) selects no samples")]
    EmptyRange { low: f64, high: f64 },

    /// A reduction was requested with a non-positive target sample count.
    #[error("target sample count must be positive")]
    InvalidTarget,

    /// A sequence supplied at registration is not aligned 1:1 with the keys.
    #[error("channel '{channel}' has {got} samples, expected {expected}")]
    MismatchedLength {
        channel: String,
        expected: usize,
        got: usize,
    },

    /// The x keys supplied at registration are not sorted.
    #[error("x keys must be non-decreasing (violated at index {0})")]
    UnorderedKeys(usize),

    /// No algorithm is registered under the requested name.
    #[error("unknown downsampler '{0}'")]
    UnknownAlgorithm(String),
}
