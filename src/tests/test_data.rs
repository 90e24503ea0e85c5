use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::metric::DistanceMatrix;

/// 4-point path metric: d(i, j) = |i - j|.
pub fn path_rows() -> Vec<Vec<f64>> {
    vec![
        vec![0.0, 1.0, 2.0, 3.0],
        vec![1.0, 0.0, 1.0, 2.0],
        vec![2.0, 1.0, 0.0, 1.0],
        vec![3.0, 2.0, 1.0, 0.0],
    ]
}

pub fn path_metric() -> DistanceMatrix {
    DistanceMatrix::new(path_rows()).unwrap()
}

/// Every off-diagonal distance equal to `d`.
pub fn uniform_metric(n: usize, d: f64) -> DistanceMatrix {
    let rows = (0..n)
        .map(|i| (0..n).map(|j| if i == j { 0.0 } else { d }).collect())
        .collect();
    DistanceMatrix::new(rows).unwrap()
}

pub fn single_point_metric() -> DistanceMatrix {
    DistanceMatrix::new(vec![vec![0.0]]).unwrap()
}

/// Points at 0, 1, ..., n-1 on a line.
pub fn line_metric(n: usize) -> DistanceMatrix {
    let points: Vec<Vec<f64>> = (0..n).map(|i| vec![i as f64]).collect();
    DistanceMatrix::from_points(&points).unwrap()
}

/// Two well separated gaussian-ish blobs in the plane.
pub fn two_blobs(per_blob: usize, seed: u64) -> DistanceMatrix {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut points = Vec::with_capacity(2 * per_blob);
    for offset in [0.0, 50.0] {
        for _ in 0..per_blob {
            points.push(vec![
                offset + rng.random_range(-1.0..1.0),
                offset + rng.random_range(-1.0..1.0),
            ]);
        }
    }
    DistanceMatrix::from_points(&points).unwrap()
}

/// `n` uniform points in `[0, range)^dim`.
pub fn random_euclidean(n: usize, dim: usize, range: f64, seed: u64) -> DistanceMatrix {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let points: Vec<Vec<f64>> = (0..n)
        .map(|_| (0..dim).map(|_| rng.random::<f64>() * range).collect())
        .collect();
    DistanceMatrix::from_points(&points).unwrap()
}
