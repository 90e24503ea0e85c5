//! Δ-bounded random partitions.
//!
//! [`PartitionBuilder`] covers the point set greedily: the uncovered point with
//! the smallest clamped growth rate becomes the next center (lowest index on
//! ties), a radius in `[Δ/4, Δ/2]` is sampled for it, and every still-uncovered
//! point inside that ball joins the new cluster. The center always joins its own
//! cluster, so each round covers at least one point and the loop ends after at
//! most `n` rounds.
//!
//! A [`Partition`] is used for a single scale and then dropped; it also hosts
//! the per-point contribution step of the embedding.

use std::fmt;

use log::{debug, trace, warn};
use rand::Rng;

use crate::cluster::ClusterRecord;
use crate::errors::{EmbeddingError, Result};
use crate::growth::{hat_growth_rate, GrowthRateEstimator};
use crate::metric::DistanceMatrix;
use crate::sampling::{GrowthRadiusSampler, RadiusSampler};

/// Clamped growth rate given to covered points so they are never picked again.
const COVERED: f64 = f64::INFINITY;

#[derive(Clone, Debug)]
pub struct Partition {
    delta: f64,
    clusters: Vec<ClusterRecord>,
    assignment: Vec<usize>,
}

impl Partition {
    /// Target diameter Δ this partition was built for.
    #[inline]
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Clusters in creation order; `clusters()[i].index() == i`.
    #[inline]
    pub fn clusters(&self) -> &[ClusterRecord] {
        &self.clusters
    }

    /// Number of clusters.
    #[inline]
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Number of points covered by the partition.
    #[inline]
    pub fn num_points(&self) -> usize {
        self.assignment.len()
    }

    /// Index of the cluster owning `point`.
    pub fn cluster_index(&self, point: usize) -> Result<usize> {
        self.assignment
            .get(point)
            .copied()
            .ok_or(EmbeddingError::PointOutOfRange {
                point,
                n: self.assignment.len(),
            })
    }

    /// The cluster owning `point`.
    pub fn cluster_of(&self, point: usize) -> Result<&ClusterRecord> {
        let idx = self.cluster_index(point)?;
        Ok(&self.clusters[idx])
    }

    /// A single cluster holds every point. Happens when Δ/4 already reaches
    /// every distance from the first center.
    pub fn is_degenerate(&self) -> bool {
        self.clusters.len() == 1
    }

    /// Distance from `point` to the nearest point outside its own cluster.
    ///
    /// When the cluster holds the whole space there is no outside; a warning is
    /// logged and the largest distance from `point` is used instead.
    // NOTE: the largest-distance fallback is kept as is. Whether it should be
    // the diameter, or an error, is an open question for this construction.
    pub fn distance_to_outside(&self, metric: &DistanceMatrix, point: usize) -> Result<f64> {
        metric.check_point(point)?;
        let own = self.cluster_index(point)?;

        let nearest = metric
            .row(point)
            .iter()
            .zip(&self.assignment)
            .filter(|&(_, &c)| c != own)
            .map(|(&d, _)| d)
            .fold(None, |acc: Option<f64>, d| Some(acc.map_or(d, |m| m.min(d))));

        match nearest {
            Some(d) => Ok(d),
            None => {
                warn!(
                    "A cluster in partition (delta={:.6}) contains all {} points; the input is not a metric. \
                     Falling back to the largest distance from point {}",
                    self.delta,
                    self.assignment.len(),
                    point
                );
                Ok(metric.row(point).iter().copied().fold(0.0, f64::max))
            }
        }
    }

    /// Contribution of `point` at this scale:
    /// `min(Δ, sigma · ksi / eta · distance_to_outside)`.
    pub fn contribution(&self, metric: &DistanceMatrix, point: usize) -> Result<f64> {
        let cluster = self.cluster_of(point)?;
        let outside = self.distance_to_outside(metric, point)?;
        let value = self.delta.min(cluster.weight() * outside);
        trace!(
            "point {} in cluster {}: outside={:.6}, contribution={:.6}",
            point,
            cluster.index(),
            outside,
            value
        );
        Ok(value)
    }

    /// Contributions of every point, indexed by point.
    pub fn contributions(&self, metric: &DistanceMatrix) -> Result<Vec<f64>> {
        if metric.len() != self.assignment.len() {
            return Err(EmbeddingError::ShapeMismatch {
                expected: self.assignment.len(),
                got: metric.len(),
            });
        }
        (0..metric.len())
            .map(|j| self.contribution(metric, j))
            .collect()
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Partition (delta={:.6}) has {} clusters",
            self.delta,
            self.clusters.len()
        )?;
        for cluster in &self.clusters {
            writeln!(f, "  {}", cluster)?;
        }
        write!(f, "Cluster indices: {:?}", self.assignment)
    }
}

/// Greedy builder of Δ-bounded partitions over one metric.
pub struct PartitionBuilder<'a, S: RadiusSampler = GrowthRadiusSampler> {
    metric: &'a DistanceMatrix,
    estimator: &'a GrowthRateEstimator,
    sampler: S,
}

impl<'a> PartitionBuilder<'a, GrowthRadiusSampler> {
    pub fn new(metric: &'a DistanceMatrix, estimator: &'a GrowthRateEstimator) -> Result<Self> {
        Self::with_sampler(metric, estimator, GrowthRadiusSampler::new())
    }
}

impl<'a, S: RadiusSampler> PartitionBuilder<'a, S> {
    pub fn with_sampler(
        metric: &'a DistanceMatrix,
        estimator: &'a GrowthRateEstimator,
        sampler: S,
    ) -> Result<Self> {
        if estimator.len() != metric.len() {
            return Err(EmbeddingError::ShapeMismatch {
                expected: metric.len(),
                got: estimator.len(),
            });
        }
        Ok(Self {
            metric,
            estimator,
            sampler,
        })
    }

    /// Builds a fresh, independently randomised partition for diameter `delta`.
    pub fn build<R: Rng + ?Sized>(&self, delta: f64, rng: &mut R) -> Result<Partition> {
        if !(delta.is_finite() && delta > 0.0) {
            return Err(EmbeddingError::InvalidDelta { delta });
        }

        let n = self.metric.len();
        let growth_rates = self.estimator.growth_rates(delta)?;
        let mut hat_rates: Vec<f64> = growth_rates.iter().copied().map(hat_growth_rate).collect();
        let mut covered = vec![false; n];
        let mut assignment = vec![0usize; n];
        let mut clusters: Vec<ClusterRecord> = Vec::new();
        let mut remaining = n;

        while remaining > 0 {
            let center = select_center(&hat_rates, &covered);
            let radius = self.sampler.sample_radius(hat_rates[center], delta, rng)?;

            let members: Vec<usize> = self
                .metric
                .row(center)
                .iter()
                .enumerate()
                .filter(|&(j, &d)| d <= radius && !covered[j])
                .map(|(j, _)| j)
                .collect();
            debug_assert!(members.contains(&center));

            let index = clusters.len();
            for &j in &members {
                covered[j] = true;
                hat_rates[j] = COVERED;
                assignment[j] = index;
            }
            remaining -= members.len();

            clusters.push(ClusterRecord::new(
                index,
                center,
                radius,
                growth_rates[center],
                members,
                rng,
            ));
        }

        debug!(
            "Partition for delta={:.6}: {} clusters over {} points",
            delta,
            clusters.len(),
            n
        );

        Ok(Partition {
            delta,
            clusters,
            assignment,
        })
    }
}

/// Uncovered point with the smallest clamped growth rate, lowest index on ties.
fn select_center(hat_rates: &[f64], covered: &[bool]) -> usize {
    let mut best = 0;
    let mut best_rate = f64::INFINITY;
    let mut found = false;
    for (i, (&rate, &done)) in hat_rates.iter().zip(covered).enumerate() {
        if done {
            continue;
        }
        if !found || rate < best_rate {
            best = i;
            best_rate = rate;
            found = true;
        }
    }
    best
}
