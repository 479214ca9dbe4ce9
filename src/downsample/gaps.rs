//! Gap interleaving policy.
//!
//! When two consecutive shown samples are far apart on the key axis, a
//! connecting line would visually bridge unrelated data. The policy takes
//! the median key delta of the shown points as the expected spacing and
//! marks a break wherever the actual delta exceeds a multiple of it. Pure
//! function of the shown keys; no hidden state.

use serde::{Deserialize, Serialize};

/// Break-insertion policy for downsampled output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GapPolicy {
    /// Multiple of the median spacing above which a break is inserted.
    pub factor: f64,
}

impl Default for GapPolicy {
    fn default() -> Self {
        Self { factor: 3.0 }
    }
}

impl GapPolicy {
    pub fn new(factor: f64) -> Self {
        Self { factor }
    }

    /// Break positions for the given shown keys: `i` in the result means
    /// "no line between shown point `i` and shown point `i + 1`".
    pub fn gap_positions(&self, xs: &[f64]) -> Vec<usize> {
        if xs.len() < 3 {
            return Vec::new();
        }
        let mut deltas: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
        let expected = median(&mut deltas);
        if !(expected > 0.0) {
            return Vec::new();
        }
        xs.windows(2)
            .enumerate()
            .filter(|(_, w)| w[1] - w[0] > self.factor * expected)
            .map(|(i, _)| i)
            .collect()
    }
}

fn median(values: &mut [f64]) -> f64 {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) / 2.0
    }
}
