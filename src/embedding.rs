//! Scaling Bourgain embedding into `l_p^D`.
//!
//! One output coordinate is the sum, over the scales
//! `Δ_i = diameter / 2^(i+1)` for `i < ⌊log2(diameter / min_distance)⌋ + 1`,
//! of each point's contribution in a fresh random Δ_i-bounded partition.
//! `D` independent coordinates are stacked into a `D × n` matrix which is
//! then scaled by `D^(-1/p)`.
//!
//! Generating one scale's partition and accumulating its contributions are
//! kept apart: [`scales`] is the lazy Δ sequence, [`PartitionBuilder::build`]
//! turns a Δ into a partition, and the coordinate is a fold over both.
//!
//! ```
//! use bourgain_embed::builder::EmbedderBuilder;
//! use bourgain_embed::metric::DistanceMatrix;
//!
//! let metric = DistanceMatrix::new(vec![
//!     vec![0.0, 1.0, 2.0, 3.0],
//!     vec![1.0, 0.0, 1.0, 2.0],
//!     vec![2.0, 1.0, 0.0, 1.0],
//!     vec![3.0, 2.0, 1.0, 0.0],
//! ])
//! .unwrap();
//!
//! let mut embedder = EmbedderBuilder::new().with_seed(42).build(metric).unwrap();
//! let embedding = embedder.fit(8, 2.0).unwrap();
//! assert_eq!(embedding.shape(), (8, 4));
//! ```

use log::{debug, info, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use smartcore::linalg::basic::{
    arrays::{Array, Array2},
    matrix::DenseMatrix,
};

use crate::distortion::lp_norm;
use crate::errors::{EmbeddingError, Result};
use crate::growth::{GrowthRateEstimator, DEFAULT_GAMMA};
use crate::metric::DistanceMatrix;
use crate::partition::{Partition, PartitionBuilder};

/// Number of scales `⌊log2(diameter / min_nonzero_distance)⌋ + 1`.
///
/// Zero when the metric has no positive distance (a single point, or all
/// points coincide).
pub fn scale_count(metric: &DistanceMatrix) -> usize {
    match metric.min_nonzero_distance() {
        Some(min) => (metric.diameter() / min).log2().floor() as usize + 1,
        None => 0,
    }
}

/// The scales `Δ_i = diameter / 2^(i+1)`, largest first.
pub fn scales(metric: &DistanceMatrix) -> impl Iterator<Item = f64> {
    let diameter = metric.diameter();
    (0..scale_count(metric)).map(move |i| diameter / 2.0_f64.powi(i as i32 + 1))
}

/// Checks `D >= 1` and `p > 0` before any work starts.
pub fn validate_fit_params(dimensions: usize, p: f64) -> Result<()> {
    if dimensions == 0 {
        return Err(EmbeddingError::InvalidDimension { dimensions });
    }
    if !(p.is_finite() && p > 0.0) {
        return Err(EmbeddingError::InvalidNorm { p });
    }
    Ok(())
}

/// Owns the metric, its growth-rate estimator and a seeded generator.
#[derive(Clone, Debug)]
pub struct Embedder {
    metric: DistanceMatrix,
    estimator: GrowthRateEstimator,
    rng: ChaCha8Rng,
    seed: u64,
}

impl Embedder {
    /// Embedder with `Γ = 64` and a random seed.
    pub fn new(metric: DistanceMatrix) -> Result<Self> {
        Self::with_config(metric, DEFAULT_GAMMA, None)
    }

    pub fn with_config(metric: DistanceMatrix, gamma: f64, seed: Option<u64>) -> Result<Self> {
        let estimator = GrowthRateEstimator::new(&metric, gamma)?;
        let seed = seed.unwrap_or_else(rand::random);
        info!(
            "Embedder over {} points: gamma={}, seed={}, diameter={:.6}, scales={}",
            metric.len(),
            gamma,
            seed,
            metric.diameter(),
            scale_count(&metric)
        );
        Ok(Self {
            metric,
            estimator,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        })
    }

    #[inline]
    pub fn metric(&self) -> &DistanceMatrix {
        &self.metric
    }

    #[inline]
    pub fn estimator(&self) -> &GrowthRateEstimator {
        &self.estimator
    }

    /// Seed the internal generator was created from.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Restarts the internal generator from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    pub fn scale_count(&self) -> usize {
        scale_count(&self.metric)
    }

    pub fn scales(&self) -> impl Iterator<Item = f64> {
        scales(&self.metric)
    }

    /// One fresh partition at `delta`, drawn from the internal generator.
    pub fn sample_partition(&mut self, delta: f64) -> Result<Partition> {
        let builder = PartitionBuilder::new(&self.metric, &self.estimator)?;
        builder.build(delta, &mut self.rng)
    }

    /// One raw coordinate (before the `D^(-1/p)` normalisation).
    pub fn coordinate(&mut self) -> Result<Vec<f64>> {
        coordinate(&self.metric, &self.estimator, &mut self.rng)
    }

    /// Embeds the metric into `l_p^D`; column `j` of the result is point `j`.
    pub fn fit(&mut self, dimensions: usize, p: f64) -> Result<Embedding> {
        embed(&self.metric, &self.estimator, dimensions, p, &mut self.rng)
    }

    /// [`fit`](Self::fit) drawing from a caller-owned generator.
    pub fn fit_with_rng<R: Rng + ?Sized>(
        &self,
        dimensions: usize,
        p: f64,
        rng: &mut R,
    ) -> Result<Embedding> {
        embed(&self.metric, &self.estimator, dimensions, p, rng)
    }
}

/// Sums each point's contribution over every scale's fresh partition.
pub fn coordinate<R: Rng + ?Sized>(
    metric: &DistanceMatrix,
    estimator: &GrowthRateEstimator,
    rng: &mut R,
) -> Result<Vec<f64>> {
    let builder = PartitionBuilder::new(metric, estimator)?;
    let n = metric.len();

    scales(metric)
        .map(|delta| builder.build(delta, &mut *rng))
        .try_fold(
            vec![0.0; n],
            |mut acc, partition: Result<Partition>| -> Result<Vec<f64>> {
                let partition = partition?;
                let contributions = partition.contributions(metric)?;
                debug!(
                    "scale delta={:.6}: {} clusters, total contribution {:.6}",
                    partition.delta(),
                    partition.len(),
                    contributions.iter().sum::<f64>()
                );
                for (a, c) in acc.iter_mut().zip(contributions) {
                    *a += c;
                }
                Ok(acc)
            },
        )
}

fn embed<R: Rng + ?Sized>(
    metric: &DistanceMatrix,
    estimator: &GrowthRateEstimator,
    dimensions: usize,
    p: f64,
    rng: &mut R,
) -> Result<Embedding> {
    validate_fit_params(dimensions, p)?;
    let n = metric.len();
    info!(
        "Fitting embedding of {} points into l_{} with {} coordinates",
        n, p, dimensions
    );
    if scale_count(metric) == 0 {
        warn!("Metric has no positive distance; every coordinate is zero");
    }

    let norm = (dimensions as f64).powf(-1.0 / p);
    let mut flat = Vec::with_capacity(dimensions * n);
    for t in 0..dimensions {
        let row = coordinate(metric, estimator, &mut *rng)?;
        debug!("coordinate {}/{} done", t + 1, dimensions);
        flat.extend(row.into_iter().map(|v| v * norm));
    }

    let matrix = DenseMatrix::from_iterator(flat.into_iter(), dimensions, n, 0);
    info!("Embedding fitted: {}x{}", dimensions, n);
    Ok(Embedding { matrix, p })
}

/// `D × n` embedding, one column per input point.
#[derive(Clone, Debug)]
pub struct Embedding {
    matrix: DenseMatrix<f64>,
    p: f64,
}

impl Embedding {
    /// Wraps an existing `D × n` matrix measured in `l_p`.
    pub fn from_matrix(matrix: DenseMatrix<f64>, p: f64) -> Result<Self> {
        if !(p.is_finite() && p > 0.0) {
            return Err(EmbeddingError::InvalidNorm { p });
        }
        Ok(Self { matrix, p })
    }

    /// `(D, n)`.
    pub fn shape(&self) -> (usize, usize) {
        self.matrix.shape()
    }

    pub fn dimensions(&self) -> usize {
        self.shape().0
    }

    pub fn num_points(&self) -> usize {
        self.shape().1
    }

    /// Norm parameter the embedding was normalised for.
    pub fn p(&self) -> f64 {
        self.p
    }

    pub fn matrix(&self) -> &DenseMatrix<f64> {
        &self.matrix
    }

    pub fn into_matrix(self) -> DenseMatrix<f64> {
        self.matrix
    }

    /// Entry at coordinate `row`, point `col`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        *self.matrix.get((row, col))
    }

    /// Embedded image of `point`.
    pub fn column(&self, point: usize) -> Result<Vec<f64>> {
        let (d, n) = self.shape();
        if point >= n {
            return Err(EmbeddingError::PointOutOfRange { point, n });
        }
        Ok((0..d).map(|t| *self.matrix.get((t, point))).collect())
    }

    /// Every entry, row by row.
    pub fn values(&self) -> Vec<f64> {
        let (d, n) = self.shape();
        (0..d)
            .flat_map(|t| (0..n).map(move |j| (t, j)))
            .map(|pos| *self.matrix.get(pos))
            .collect()
    }

    /// `l_p` distance between the images of `i` and `j`.
    pub fn lp_distance(&self, i: usize, j: usize) -> Result<f64> {
        let a = self.column(i)?;
        let b = self.column(j)?;
        Ok(lp_norm(&a, &b, self.p))
    }
}
