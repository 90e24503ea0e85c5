//! Growth-rate estimation.
//!
//! For a point `x` and radius `r > 0` the growth rate is
//!
//! ```text
//! growth_rate(x, r) = |B(x, Γ·r)| / |B(x, r/Γ)|
//! ```
//!
//! where `B` is the closed ball and sizes count `x` itself. Since `d(x, x) = 0`
//! the denominator is always at least 1.
//!
//! Each row of the distance matrix is sorted once at construction, so both
//! ball sizes come from a binary search on the sorted row.

use log::{debug, trace};

use crate::errors::{EmbeddingError, Result};
use crate::metric::DistanceMatrix;

/// Default ratio between the outer and inner radii.
pub const DEFAULT_GAMMA: f64 = 64.0;

#[derive(Clone, Debug)]
pub struct GrowthRateEstimator {
    n: usize,
    gamma: f64,
    sorted_rows: Vec<f64>,
}

impl GrowthRateEstimator {
    pub fn new(metric: &DistanceMatrix, gamma: f64) -> Result<Self> {
        if !(gamma.is_finite() && gamma > 1.0) {
            return Err(EmbeddingError::InvalidGamma { gamma });
        }

        let n = metric.len();
        let mut sorted_rows = Vec::with_capacity(n * n);
        for i in 0..n {
            let mut row = metric.row(i).to_vec();
            row.sort_by(f64::total_cmp);
            sorted_rows.extend(row);
        }
        debug!("Growth-rate estimator ready: n={}, gamma={}", n, gamma);

        Ok(Self {
            n,
            gamma,
            sorted_rows,
        })
    }

    #[inline]
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// `|B(point, radius)|`, the center included.
    pub fn ball_size(&self, point: usize, radius: f64) -> Result<usize> {
        if point >= self.n {
            return Err(EmbeddingError::PointOutOfRange { point, n: self.n });
        }
        let row = &self.sorted_rows[point * self.n..(point + 1) * self.n];
        Ok(row.partition_point(|&d| d <= radius))
    }

    /// Unclamped growth rate of `point` at `radius`.
    pub fn growth_rate(&self, point: usize, radius: f64) -> Result<f64> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(EmbeddingError::InvalidRadius { radius });
        }
        let outer = self.ball_size(point, self.gamma * radius)?;
        let inner = self.ball_size(point, radius / self.gamma)?;
        debug_assert!(inner >= 1, "inner ball always holds its center");

        let rate = outer as f64 / inner as f64;
        trace!(
            "growth_rate(point={}, r={:.6}) = {}/{} = {:.4}",
            point,
            radius,
            outer,
            inner,
            rate
        );
        Ok(rate)
    }

    /// Growth rates of every point at `radius`, indexed by point.
    pub fn growth_rates(&self, radius: f64) -> Result<Vec<f64>> {
        (0..self.n).map(|i| self.growth_rate(i, radius)).collect()
    }
}

/// `max(growth_rate, 2)`.
#[inline]
pub fn hat_growth_rate(growth_rate: f64) -> f64 {
    growth_rate.max(2.0)
}
