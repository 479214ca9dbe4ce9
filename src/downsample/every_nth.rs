//! Uniform stride sampling.

use crate::downsample::Downsample;
use crate::error::ResampleError;

/// Every `ceil(len / target)`-th point, with the final point forced.
///
/// Ignores y entirely, so local shape is not preserved. Chosen when raw
/// speed matters more than fidelity, e.g. near-binary / occupancy-style
/// series where extrema carry little information.
#[derive(Debug, Clone, Copy, Default)]
pub struct EveryNthPoint;

impl Downsample for EveryNthPoint {
    fn name(&self) -> &str {
        "every_nth"
    }

    fn reduce(&self, x: &[f64], y: &[f64], target: usize) -> Result<Vec<usize>, ResampleError> {
        debug_assert_eq!(x.len(), y.len());
        if target == 0 {
            return Err(ResampleError::InvalidTarget);
        }
        let n = x.len();
        if n == 0 {
            return Ok(Vec::new());
        }
        if n <= target {
            return Ok((0..n).collect());
        }
        if target == 1 {
            return Ok(vec![n / 2]);
        }

        let stride = (n + target - 1) / target;
        let mut out: Vec<usize> = (0..n).step_by(stride).collect();
        // Force the final index. When already at capacity the last strided
        // index is replaced so the output never exceeds the target.
        if out.last() != Some(&(n - 1)) {
            if out.len() < target {
                out.push(n - 1);
            } else if let Some(last) = out.last_mut() {
                *last = n - 1;
            }
        }
        Ok(out)
    }
}
