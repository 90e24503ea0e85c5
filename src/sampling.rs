use log::trace;
use rand::distr::weighted::WeightedIndex;
use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::errors::{EmbeddingError, Result};

/// Draws cluster radii for a Δ-bounded partition.
pub trait RadiusSampler {
    /// Radius in `[delta / 4, delta / 2]` for a center whose clamped growth
    /// rate is `xi` (`xi >= 2`).
    fn sample_radius<R: Rng + ?Sized>(&self, xi: f64, delta: f64, rng: &mut R) -> Result<f64>;
}

/// Growth-rate dependent radius distribution.
///
/// `[Δ/4, Δ/2]` is cut into `k = 2·log2(Xi')` equal sub-intervals, where `Xi'`
/// is `⌈Xi⌉` rounded up to a power of two. Sub-interval `l < k` is picked with
/// probability `(1/2)^l` and the last one with `2 / Xi'^2`; the radius is then
/// uniform inside the picked sub-interval.
#[derive(Clone, Copy, Debug, Default)]
pub struct GrowthRadiusSampler;

impl GrowthRadiusSampler {
    pub fn new() -> Self {
        Self
    }

    /// `Xi' = 2^⌈log2(⌈Xi⌉)⌉`.
    pub fn rounded_growth_rate(xi: f64) -> Result<u64> {
        if !(xi.is_finite() && xi >= 2.0) {
            return Err(EmbeddingError::InvalidGrowthRate { xi });
        }
        (xi.ceil() as u64)
            .checked_next_power_of_two()
            .ok_or(EmbeddingError::InvalidGrowthRate { xi })
    }

    /// Number of sub-intervals `k = 2·log2(Xi')`.
    pub fn interval_count(xi: f64) -> Result<usize> {
        let rounded = Self::rounded_growth_rate(xi)?;
        Ok(2 * rounded.trailing_zeros() as usize)
    }

    /// Probability of each sub-interval, index 0 being sub-interval 1.
    pub fn interval_probabilities(xi: f64) -> Result<Vec<f64>> {
        let rounded = Self::rounded_growth_rate(xi)? as f64;
        let k = Self::interval_count(xi)?;

        let mut probabilities: Vec<f64> = (1..=k).map(|l| 0.5_f64.powi(l as i32)).collect();
        // closed-form tail mass, not a renormalisation
        probabilities[k - 1] = 2.0 / (rounded * rounded);
        Ok(probabilities)
    }

    /// Real bounds of sub-interval `l` (1-based) out of `k` over `[delta/4, delta/2]`.
    pub fn interval_bounds(delta: f64, k: usize, l: usize) -> (f64, f64) {
        let width = delta / (4.0 * k as f64);
        let lo = delta / 4.0 + (l - 1) as f64 * width;
        let hi = (delta / 4.0 + l as f64 * width).min(delta / 2.0);
        (lo, hi)
    }
}

impl RadiusSampler for GrowthRadiusSampler {
    fn sample_radius<R: Rng + ?Sized>(&self, xi: f64, delta: f64, rng: &mut R) -> Result<f64> {
        if !(delta.is_finite() && delta > 0.0) {
            return Err(EmbeddingError::InvalidDelta { delta });
        }
        let probabilities = Self::interval_probabilities(xi)?;
        let k = probabilities.len();

        let picker =
            WeightedIndex::new(&probabilities).map_err(|_| EmbeddingError::InvalidGrowthRate { xi })?;
        let l = picker.sample(rng) + 1;

        let (lo, hi) = Self::interval_bounds(delta, k, l);
        let uniform =
            Uniform::new_inclusive(lo, hi).map_err(|_| EmbeddingError::InvalidDelta { delta })?;
        let radius = uniform.sample(rng).clamp(delta / 4.0, delta / 2.0);

        trace!(
            "Sampled radius {:.6} from interval {}/{} [{:.6}, {:.6}] (xi={:.3}, delta={:.6})",
            radius,
            l,
            k,
            lo,
            hi,
            xi,
            delta
        );
        Ok(radius)
    }
}
