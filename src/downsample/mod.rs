//! Pluggable downsampling algorithms.
//!
//! Every algorithm reduces a slice to at most `target` representative local
//! indices through [`Downsample::reduce`]. The engine dispatches only
//! through this trait and never special-cases a variant; new algorithms are
//! registered by name in an [`AlgorithmTable`].

pub mod every_nth;
pub mod gaps;
pub mod lttb;

use std::collections::HashMap;
use std::sync::Arc;

use downcast_rs::{impl_downcast, DowncastSync};
use once_cell::sync::Lazy;

use crate::error::ResampleError;

pub use every_nth::EveryNthPoint;
pub use gaps::GapPolicy;
pub use lttb::Lttb;

// ─────────────────────────────────────────────────────────────────────────────
// Downsample trait
// ─────────────────────────────────────────────────────────────────────────────

/// Capability of reducing an index range to at most `target` representative
/// indices.
///
/// Contract:
/// - output indices are local to the input slice and strictly increasing;
/// - `output.len() <= target`;
/// - the first and last index of the slice are included when `target >= 2`;
///   with `target == 1` the output is at most the single most representative
///   point;
/// - identical `(x, y, target)` inputs produce identical output: no
///   randomness, no dependence on external state.
///
/// `target == 0` fails with [`ResampleError::InvalidTarget`].
pub trait Downsample: DowncastSync {
    /// Short name the algorithm is registered under, e.g. `"lttb"`.
    fn name(&self) -> &str;

    /// Reduce `x`/`y` (equal length) to at most `target` local indices.
    fn reduce(&self, x: &[f64], y: &[f64], target: usize) -> Result<Vec<usize>, ResampleError>;
}
impl_downcast!(sync Downsample);

// ─────────────────────────────────────────────────────────────────────────────
// AlgorithmTable
// ─────────────────────────────────────────────────────────────────────────────

static EVERY_NTH: Lazy<Arc<EveryNthPoint>> = Lazy::new(|| Arc::new(EveryNthPoint));
static LTTB: Lazy<Arc<Lttb>> = Lazy::new(|| Arc::new(Lttb));

/// Name-keyed table of algorithm instances.
///
/// Each engine owns its own table with the builtins preregistered; hosts may
/// register additional [`Downsample`] implementors under their own names.
pub struct AlgorithmTable {
    map: HashMap<String, Arc<dyn Downsample>>,
}

impl AlgorithmTable {
    /// A table containing the built-in algorithms (`"every_nth"`, `"lttb"`).
    pub fn with_builtins() -> Self {
        let mut table = Self {
            map: HashMap::new(),
        };
        table.register(EVERY_NTH.clone());
        table.register(LTTB.clone());
        table
    }

    /// Register an algorithm under its own name, replacing any previous
    /// entry with that name.
    pub fn register(&mut self, algorithm: Arc<dyn Downsample>) {
        self.map.insert(algorithm.name().to_string(), algorithm);
    }

    /// Resolve a registered algorithm by name.
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn Downsample>, ResampleError> {
        self.map
            .get(name)
            .cloned()
            .ok_or_else(|| ResampleError::UnknownAlgorithm(name.to_string()))
    }

    /// All registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.map.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for AlgorithmTable {
    fn default() -> Self {
        Self::with_builtins()
    }
}
