//! Engine-wide configuration.
//!
//! One [`ResamplerConfig`] is owned by each engine instance; there is no
//! hidden process-wide state. Per-trace overrides at registration time take
//! precedence over these defaults.

use serde::{Deserialize, Serialize};

/// Defaults applied to every trace that does not override them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResamplerConfig {
    /// Upper bound on points shown at once per trace.
    pub default_n_shown_samples: usize,
    /// Name of the algorithm used when a trace does not pick one
    /// (must be registered in the engine's algorithm table).
    pub default_downsampler: String,
    /// Multiple of the median key spacing above which a gap marker is
    /// emitted for traces with gap interleaving enabled.
    pub default_gap_factor: f64,
    /// Promote recompute diagnostics from `debug!` to `info!`.
    /// Diagnostics only; no behavioral effect.
    pub verbose: bool,
}

impl Default for ResamplerConfig {
    fn default() -> Self {
        Self {
            default_n_shown_samples: 1_000,
            default_downsampler: "lttb".to_string(),
            default_gap_factor: 3.0,
            verbose: false,
        }
    }
}
