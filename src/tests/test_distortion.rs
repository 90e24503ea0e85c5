use approx::assert_relative_eq;
use smartcore::linalg::basic::arrays::Array2;
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::builder::EmbedderBuilder;
use crate::distortion::{lp_norm, DistortionReport};
use crate::embedding::Embedding;
use crate::errors::EmbeddingError;
use crate::tests::test_data::{line_metric, path_metric};
use crate::tests::{init, TEST_SEED};

fn row_embedding(values: Vec<f64>, p: f64) -> Embedding {
    let n = values.len();
    let matrix = DenseMatrix::from_iterator(values.into_iter(), 1, n, 0);
    Embedding::from_matrix(matrix, p).unwrap()
}

#[test]
fn test_isometric_embedding() {
    let m = path_metric();
    let embedding = row_embedding(vec![0.0, 1.0, 2.0, 3.0], 1.0);
    let report = DistortionReport::evaluate(&m, &embedding).unwrap();
    assert_eq!(report.pairs, 6);
    assert_eq!(report.collapsed_pairs, 0);
    assert_relative_eq!(report.expansion, 1.0);
    assert_relative_eq!(report.contraction, 1.0);
    assert_relative_eq!(report.distortion, 1.0);
    assert_relative_eq!(report.mean_ratio, 1.0);
}

#[test]
fn test_scaled_embedding() {
    let m = path_metric();
    let embedding = row_embedding(vec![0.0, 2.0, 4.0, 6.0], 2.0);
    let report = DistortionReport::evaluate(&m, &embedding).unwrap();
    assert_relative_eq!(report.expansion, 2.0);
    assert_relative_eq!(report.contraction, 0.5);
    assert_relative_eq!(report.distortion, 1.0);
}

#[test]
fn test_collapsed_pair_is_infinite() {
    let m = path_metric();
    let embedding = row_embedding(vec![0.0, 0.0, 2.0, 3.0], 1.0);
    let report = DistortionReport::evaluate(&m, &embedding).unwrap();
    assert_eq!(report.collapsed_pairs, 1);
    assert!(report.contraction.is_infinite());
    assert!(report.distortion.is_infinite());
}

#[test]
fn test_shape_mismatch() {
    let embedding = row_embedding(vec![0.0, 1.0], 1.0);
    assert_eq!(
        DistortionReport::evaluate(&path_metric(), &embedding),
        Err(EmbeddingError::ShapeMismatch {
            expected: 4,
            got: 2
        })
    );
}

#[test]
fn test_fitted_embedding_report() {
    init();
    let m = line_metric(16);
    let embedding = EmbedderBuilder::new()
        .with_seed(TEST_SEED)
        .with_dimensions(32)
        .with_norm(2.0)
        .fit(m.clone())
        .unwrap();
    let report = DistortionReport::evaluate(&m, &embedding).unwrap();
    assert_eq!(report.pairs, 16 * 15 / 2);
    assert!(report.expansion.is_finite());
    assert!(report.mean_ratio > 0.0);
    if report.collapsed_pairs == 0 {
        assert!(report.distortion >= 1.0 - 1e-12);
    }
}

#[test]
fn test_lp_norm() {
    assert_relative_eq!(lp_norm(&[0.0, 0.0], &[3.0, 4.0], 2.0), 5.0);
    assert_relative_eq!(lp_norm(&[0.0, 0.0], &[3.0, 4.0], 1.0), 7.0);
    assert_relative_eq!(lp_norm(&[1.0], &[1.0], 2.0), 0.0);
}

#[test]
fn test_from_matrix_rejects_bad_norm() {
    let matrix = DenseMatrix::from_iterator(vec![0.0, 1.0].into_iter(), 1, 2, 0);
    assert!(matches!(
        Embedding::from_matrix(matrix, 0.0),
        Err(EmbeddingError::InvalidNorm { .. })
    ));
}
