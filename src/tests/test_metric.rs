use approx::assert_relative_eq;

use crate::errors::EmbeddingError;
use crate::metric::DistanceMatrix;
use crate::tests::init;
use crate::tests::test_data::{path_metric, path_rows, single_point_metric};

#[test]
fn test_path_metric_summary() {
    init();
    let m = path_metric();
    assert_eq!(m.len(), 4);
    assert!(!m.is_empty());
    assert_eq!(m.diameter(), 3.0);
    assert_eq!(m.min_nonzero_distance(), Some(1.0));
    assert_eq!(m.distance(0, 3), 3.0);
    assert_eq!(m.row(1), &[1.0, 0.0, 1.0, 2.0]);
}

#[test]
fn test_rejects_empty() {
    assert_eq!(DistanceMatrix::new(vec![]), Err(EmbeddingError::EmptyMetric));
    assert_eq!(
        DistanceMatrix::from_points(&[]),
        Err(EmbeddingError::EmptyMetric)
    );
}

#[test]
fn test_rejects_non_square() {
    let err = DistanceMatrix::new(vec![vec![0.0, 1.0], vec![1.0]]).unwrap_err();
    assert_eq!(err, EmbeddingError::NotSquare { row: 1, len: 1, n: 2 });
}

#[test]
fn test_rejects_negative_distance() {
    let err = DistanceMatrix::new(vec![vec![0.0, -1.0], vec![-1.0, 0.0]]).unwrap_err();
    assert!(matches!(
        err,
        EmbeddingError::NegativeDistance { i: 0, j: 1, .. }
    ));
}

#[test]
fn test_rejects_nonzero_diagonal() {
    let err = DistanceMatrix::new(vec![vec![0.0, 1.0], vec![1.0, 0.5]]).unwrap_err();
    assert_eq!(err, EmbeddingError::NonZeroDiagonal { i: 1, value: 0.5 });
}

#[test]
fn test_rejects_asymmetric() {
    let err = DistanceMatrix::new(vec![vec![0.0, 1.0], vec![2.0, 0.0]]).unwrap_err();
    assert_eq!(err, EmbeddingError::Asymmetric { i: 0, j: 1 });
}

#[test]
fn test_rejects_non_finite() {
    let err = DistanceMatrix::new(vec![vec![0.0, f64::NAN], vec![f64::NAN, 0.0]]).unwrap_err();
    assert_eq!(err, EmbeddingError::NonFinite { i: 0, j: 1 });

    let err =
        DistanceMatrix::new(vec![vec![0.0, f64::INFINITY], vec![f64::INFINITY, 0.0]]).unwrap_err();
    assert_eq!(err, EmbeddingError::NonFinite { i: 0, j: 1 });
}

#[test]
fn test_from_points_euclidean() {
    let m = DistanceMatrix::from_points(&[vec![0.0, 0.0], vec![3.0, 4.0], vec![0.0, 4.0]]).unwrap();
    assert_relative_eq!(m.distance(0, 1), 5.0, epsilon = 1e-12);
    assert_relative_eq!(m.distance(1, 2), 3.0, epsilon = 1e-12);
    assert_relative_eq!(m.distance(2, 0), 4.0, epsilon = 1e-12);
    assert_eq!(m.distance(1, 0), m.distance(0, 1));
}

#[test]
fn test_from_points_dimension_mismatch() {
    let err = DistanceMatrix::from_points(&[vec![0.0, 0.0], vec![1.0]]).unwrap_err();
    assert_eq!(err, EmbeddingError::ShapeMismatch { expected: 2, got: 1 });
}

#[test]
fn test_points_within_closed_ball() {
    let m = path_metric();
    assert_eq!(m.points_within(0, 1.5).unwrap(), vec![0, 1]);
    // closed ball: distance exactly equal to the radius is inside
    assert_eq!(m.points_within(1, 1.0).unwrap(), vec![0, 1, 2]);
    assert_eq!(m.points_within(3, 0.0).unwrap(), vec![3]);
    assert_eq!(
        m.points_within(4, 1.0),
        Err(EmbeddingError::PointOutOfRange { point: 4, n: 4 })
    );
}

#[test]
fn test_try_distance_out_of_range() {
    let m = path_metric();
    assert_eq!(m.try_distance(0, 2), Ok(2.0));
    assert_eq!(
        m.try_distance(0, 9),
        Err(EmbeddingError::PointOutOfRange { point: 9, n: 4 })
    );
}

#[test]
#[should_panic(expected = "Point index out of bounds")]
fn test_distance_panics_out_of_range() {
    path_metric().distance(7, 0);
}

#[test]
fn test_scaled() {
    let m = path_metric().scaled(2.5).unwrap();
    assert_eq!(m.diameter(), 7.5);
    assert_eq!(m.min_nonzero_distance(), Some(2.5));
    assert_eq!(
        path_metric().scaled(0.0),
        Err(EmbeddingError::InvalidScale { factor: 0.0 })
    );
}

#[test]
fn test_single_point_has_no_positive_distance() {
    let m = single_point_metric();
    assert_eq!(m.len(), 1);
    assert_eq!(m.diameter(), 0.0);
    assert_eq!(m.min_nonzero_distance(), None);
}

#[test]
fn test_triangle_violations() {
    init();
    assert_eq!(path_metric().triangle_violations(1e-12), 0);

    let bad = DistanceMatrix::new(vec![
        vec![0.0, 1.0, 5.0],
        vec![1.0, 0.0, 1.0],
        vec![5.0, 1.0, 0.0],
    ])
    .unwrap();
    // d(0,2) > d(0,1) + d(1,2), in both directions
    assert_eq!(bad.triangle_violations(1e-12), 2);
}

#[test]
fn test_symmetry_tolerance() {
    let mut rows = path_rows();
    rows[0][1] = 1.0 + 1e-12;
    assert!(DistanceMatrix::new(rows).is_ok());
}
