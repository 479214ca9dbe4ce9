//! Largest-Triangle-Three-Buckets downsampling.
//!
//! Reference: Sveinn Steinarsson, "Downsampling Time Series for Visual
//! Representation" (https://skemman.is/handle/1946/15343).

use crate::downsample::Downsample;
use crate::error::ResampleError;

/// Bucketed extremum-preserving reduction.
///
/// The slice is partitioned into `target` roughly equal-width buckets; the
/// first and last bucket hold exactly the forced endpoints. Each interior
/// bucket contributes the point maximizing the triangle area spanned with
/// the previously selected point and the centroid of the next bucket, which
/// keeps visually significant peaks and troughs under heavy compression.
/// O(N) time, O(1) memory beyond the output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lttb;

impl Downsample for Lttb {
    fn name(&self) -> &str {
        "lttb"
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
        if target == 2 {
            return Ok(vec![0, n - 1]);
        }

        let mut out = Vec::with_capacity(target);
        out.push(0);

        // n > target guarantees bucket_width > 1, so every interior bucket
        // is non-empty and buckets never overlap.
        let bucket_width = (n - 2) as f64 / (target - 2) as f64;
        let mut selected = 0usize;

        for bucket in 0..(target - 2) {
            let start = (bucket as f64 * bucket_width).floor() as usize + 1;
            let end = (((bucket + 1) as f64 * bucket_width).floor() as usize + 1).min(n - 1);

            // Centroid of the next bucket steers the triangle.
            let next_start = end;
            let next_end = (((bucket + 2) as f64 * bucket_width).floor() as usize + 1).min(n);
            let (cx, cy) = if next_start < next_end {
                let mut sx = 0.0;
                let mut sy = 0.0;
                for j in next_start..next_end {
                    sx += x[j];
                    sy += y[j];
                }
                let count = (next_end - next_start) as f64;
                (sx / count, sy / count)
            } else {
                (x[n - 1], y[n - 1])
            };

            let (ax, ay) = (x[selected], y[selected]);
            let mut best = start;
            let mut best_area = -1.0f64;
            for j in start..end {
                // Signed cross-product magnitude; strict `>` keeps the
                // lowest index on ties.
                let area = ((ax - cx) * (y[j] - ay) - (ax - x[j]) * (cy - ay)).abs();
                if area > best_area {
                    best_area = area;
                    best = j;
                }
            }
            out.push(best);
            selected = best;
        }

        out.push(n - 1);
        Ok(out)
    }
}
