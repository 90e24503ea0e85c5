//! Distortion of a fitted embedding against its source metric.
//!
//! For every pair with positive metric distance the ratio
//! `r(i, j) = ||f(i) - f(j)||_p / d(i, j)` is measured. Expansion is the
//! largest ratio, contraction the largest inverse ratio, and the distortion
//! their product. A pair collapsed to the same image makes contraction (and
//! distortion) infinite.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::embedding::Embedding;
use crate::errors::{EmbeddingError, Result};
use crate::metric::DistanceMatrix;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistortionReport {
    pub pairs: usize,
    pub collapsed_pairs: usize,
    pub expansion: f64,
    pub contraction: f64,
    pub distortion: f64,
    pub mean_ratio: f64,
}

impl DistortionReport {
    pub fn evaluate(metric: &DistanceMatrix, embedding: &Embedding) -> Result<Self> {
        let n = metric.len();
        if embedding.num_points() != n {
            return Err(EmbeddingError::ShapeMismatch {
                expected: n,
                got: embedding.num_points(),
            });
        }

        let columns: Vec<Vec<f64>> = (0..n)
            .map(|j| embedding.column(j))
            .collect::<Result<_>>()?;
        let p = embedding.p();

        let mut pairs = 0;
        let mut collapsed_pairs = 0;
        let mut expansion: f64 = 0.0;
        let mut contraction: f64 = 0.0;
        let mut ratio_sum = 0.0;

        for i in 0..n {
            for j in (i + 1)..n {
                let d = metric.distance(i, j);
                if d <= 0.0 {
                    continue;
                }
                let e = lp_norm(&columns[i], &columns[j], p);
                let ratio = e / d;
                pairs += 1;
                ratio_sum += ratio;
                expansion = expansion.max(ratio);
                if e > 0.0 {
                    contraction = contraction.max(1.0 / ratio);
                } else {
                    collapsed_pairs += 1;
                    contraction = f64::INFINITY;
                }
            }
        }

        let mean_ratio = if pairs > 0 {
            ratio_sum / pairs as f64
        } else {
            0.0
        };
        let distortion = if pairs == 0 {
            1.0
        } else if collapsed_pairs > 0 {
            f64::INFINITY
        } else {
            expansion * contraction
        };
        debug!(
            "Distortion over {} pairs: {} collapsed, expansion={:.4}, contraction={:.4}",
            pairs, collapsed_pairs, expansion, contraction
        );
        info!("Embedding distortion: {:.4}", distortion);

        Ok(Self {
            pairs,
            collapsed_pairs,
            expansion,
            contraction,
            distortion,
            mean_ratio,
        })
    }
}

/// `||a - b||_p`.
pub fn lp_norm(a: &[f64], b: &[f64], p: f64) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs().powf(p))
        .sum::<f64>()
        .powf(1.0 / p)
}
