//! Finite metric spaces given by a dense matrix of pairwise distances.
//!
//! Points are plain indices in `[0, n)`; all geometry comes from the matrix.
//! A [`DistanceMatrix`] is validated once at construction and is immutable
//! afterwards. The triangle inequality is *not* enforced: callers own metric
//! validity, and [`DistanceMatrix::triangle_violations`] is available as a
//! diagnostic.
//!
//! ```
//! use bourgain_embed::metric::DistanceMatrix;
//!
//! let m = DistanceMatrix::new(vec![
//!     vec![0.0, 1.0, 2.0],
//!     vec![1.0, 0.0, 1.0],
//!     vec![2.0, 1.0, 0.0],
//! ])
//! .unwrap();
//! assert_eq!(m.len(), 3);
//! assert_eq!(m.diameter(), 2.0);
//! assert_eq!(m.min_nonzero_distance(), Some(1.0));
//! ```

use log::{debug, warn};

use crate::errors::{EmbeddingError, Result};

/// Relative tolerance used when checking `D[i][j] == D[j][i]`.
const SYMMETRY_TOL: f64 = 1e-9;

/// Immutable n×n distance matrix, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
    diameter: f64,
    min_nonzero: Option<f64>,
}

impl DistanceMatrix {
    /// Builds a metric from its rows.
    ///
    /// Rejects empty input, non-square shapes, non-finite or negative entries,
    /// a non-zero diagonal and asymmetric pairs.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = rows.len();
        if n == 0 {
            return Err(EmbeddingError::EmptyMetric);
        }

        let mut data = Vec::with_capacity(n * n);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(EmbeddingError::NotSquare {
                    row: i,
                    len: row.len(),
                    n,
                });
            }
            data.extend(row);
        }

        Self::from_flat(n, data)
    }

    /// Euclidean metric over coordinate rows (one row per point).
    pub fn from_points(points: &[Vec<f64>]) -> Result<Self> {
        let n = points.len();
        if n == 0 {
            return Err(EmbeddingError::EmptyMetric);
        }
        let dim = points[0].len();
        if let Some(bad) = points.iter().find(|p| p.len() != dim) {
            return Err(EmbeddingError::ShapeMismatch {
                expected: dim,
                got: bad.len(),
            });
        }

        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = euclidean_dist(&points[i], &points[j]);
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        debug!("Built euclidean metric over {} points of dimension {}", n, dim);

        Self::from_flat(n, data)
    }

    fn from_flat(n: usize, data: Vec<f64>) -> Result<Self> {
        for i in 0..n {
            for j in 0..n {
                let v = data[i * n + j];
                if !v.is_finite() {
                    return Err(EmbeddingError::NonFinite { i, j });
                }
                if v < 0.0 {
                    return Err(EmbeddingError::NegativeDistance { i, j, value: v });
                }
            }
            let diag = data[i * n + i];
            if diag != 0.0 {
                return Err(EmbeddingError::NonZeroDiagonal { i, value: diag });
            }
        }

        for i in 0..n {
            for j in (i + 1)..n {
                let a = data[i * n + j];
                let b = data[j * n + i];
                if (a - b).abs() > SYMMETRY_TOL * a.max(b).max(1.0) {
                    return Err(EmbeddingError::Asymmetric { i, j });
                }
            }
        }

        let diameter = data.iter().copied().fold(0.0, f64::max);
        let min_nonzero = data
            .iter()
            .copied()
            .filter(|&d| d > 0.0)
            .fold(None, |acc: Option<f64>, d| Some(acc.map_or(d, |m| m.min(d))));

        debug!(
            "Distance matrix {}x{}: diameter={:.6}, min_nonzero={:?}",
            n, n, diameter, min_nonzero
        );

        Ok(Self {
            n,
            data,
            diameter,
            min_nonzero,
        })
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    /// Always `false` for a constructed matrix; kept for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Distance between `i` and `j`.
    ///
    /// # Panics
    ///
    /// Panics if either index is `>= len()`.
    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.n && j < self.n, "Point index out of bounds");
        self.data[i * self.n + j]
    }

    /// Checked variant of [`distance`](Self::distance).
    pub fn try_distance(&self, i: usize, j: usize) -> Result<f64> {
        self.check_point(i)?;
        self.check_point(j)?;
        Ok(self.data[i * self.n + j])
    }

    /// Distances from `i` to every point, `i` included.
    ///
    /// # Panics
    ///
    /// Panics if `i >= len()`.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        assert!(i < self.n, "Point index out of bounds");
        &self.data[i * self.n..(i + 1) * self.n]
    }

    /// Largest pairwise distance.
    #[inline]
    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    /// Smallest strictly positive distance, `None` if every distance is zero.
    #[inline]
    pub fn min_nonzero_distance(&self) -> Option<f64> {
        self.min_nonzero
    }

    /// Every point within the closed ball `B(center, radius)`, in index order.
    pub fn points_within(&self, center: usize, radius: f64) -> Result<Vec<usize>> {
        self.check_point(center)?;
        Ok(self
            .row(center)
            .iter()
            .enumerate()
            .filter(|&(_, &d)| d <= radius)
            .map(|(j, _)| j)
            .collect())
    }

    /// The same space with every distance multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Result<Self> {
        if !(factor.is_finite() && factor > 0.0) {
            return Err(EmbeddingError::InvalidScale { factor });
        }
        let data = self.data.iter().map(|d| d * factor).collect();
        Self::from_flat(self.n, data)
    }

    /// Counts ordered triples `(i, j, k)` with `d(i, k) > d(i, j) + d(j, k) + tol`.
    ///
    /// O(n³); meant for diagnostics on small inputs. Violations are logged,
    /// they never make a matrix invalid.
    pub fn triangle_violations(&self, tol: f64) -> usize {
        let n = self.n;
        let mut violations = 0;
        for i in 0..n {
            for k in 0..n {
                let direct = self.data[i * n + k];
                for j in 0..n {
                    if direct > self.data[i * n + j] + self.data[j * n + k] + tol {
                        violations += 1;
                    }
                }
            }
        }
        if violations > 0 {
            warn!(
                "Distance matrix violates the triangle inequality on {} triples",
                violations
            );
        }
        violations
    }

    pub(crate) fn check_point(&self, point: usize) -> Result<()> {
        if point >= self.n {
            return Err(EmbeddingError::PointOutOfRange { point, n: self.n });
        }
        Ok(())
    }
}

pub fn euclidean_dist(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}
