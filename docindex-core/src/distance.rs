//! Distance metrics and distance-based ordering
//!
//! All metrics return a distance where lower means more similar.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{IndexError, Result};
use crate::matrix::Matrix;

/// Anything that can measure the distance between two equal-length vectors
pub trait Metric {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64;
}

impl<F> Metric for F
where
    F: Fn(&[f64], &[f64]) -> f64,
{
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        self(a, b)
    }
}

/// Built-in metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// `1 - cos(a, b)`, range [0, 2]. A zero vector is at distance 1 from everything.
    #[default]
    Cosine,
    /// L2 distance
    Euclidean,
    /// L1 (city block) distance
    Manhattan,
}

impl Metric for DistanceMetric {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        match self {
            DistanceMetric::Cosine => cosine_distance(a, b),
            DistanceMetric::Euclidean => a
                .iter()
                .zip(b)
                .map(|(x, y)| (x - y) * (x - y))
                .sum::<f64>()
                .sqrt(),
            DistanceMetric::Manhattan => a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum(),
        }
    }
}

impl FromStr for DistanceMetric {
    type Err = IndexError;

    fn from_str(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "cosine" => Ok(DistanceMetric::Cosine),
            "euclidean" => Ok(DistanceMetric::Euclidean),
            "manhattan" | "cityblock" => Ok(DistanceMetric::Manhattan),
            _ => Err(IndexError::UnknownMetric(name.to_string())),
        }
    }
}

fn cosine_distance(a: &[f64], b: &[f64]) -> f64 {
    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    1.0 - dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Which dimension of a matrix holds the items being compared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Rows,
    Columns,
}

impl TryFrom<usize> for Axis {
    type Error = IndexError;

    fn try_from(axis: usize) -> Result<Self> {
        match axis {
            0 => Ok(Axis::Rows),
            1 => Ok(Axis::Columns),
            other => Err(IndexError::InvalidAxis(other)),
        }
    }
}

/// Indices of `candidates` ordered by ascending distance to `query`
///
/// Ties keep their input order. `metric` defaults to cosine distance.
pub fn order_by_distance<V: AsRef<[f64]>>(
    query: &[f64],
    candidates: &[V],
    metric: Option<&dyn Metric>,
) -> Result<Vec<usize>> {
    let distances = distances_to(query, candidates, metric)?;
    Ok(rank(&distances))
}

/// Distance from `query` to every candidate, in candidate order
pub fn distances_to<V: AsRef<[f64]>>(
    query: &[f64],
    candidates: &[V],
    metric: Option<&dyn Metric>,
) -> Result<Vec<f64>> {
    let metric = metric.unwrap_or(&DistanceMetric::Cosine);
    candidates
        .iter()
        .map(|candidate| {
            let candidate = candidate.as_ref();
            if candidate.len() != query.len() {
                return Err(IndexError::DimensionMismatch {
                    expected: query.len(),
                    actual: candidate.len(),
                });
            }
            Ok(metric.distance(query, candidate))
        })
        .collect()
}

/// Stable ascending argsort
pub(crate) fn rank(distances: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..distances.len()).collect();
    order.sort_by(|&a, &b| distances[a].total_cmp(&distances[b]));
    order
}

/// Square matrix of distances between the rows (or columns) of `matrix`
pub fn pairwise_distance(matrix: &Matrix<f64>, metric: &dyn Metric, axis: Axis) -> Matrix<f64> {
    let transposed;
    let items = match axis {
        Axis::Rows => matrix,
        Axis::Columns => {
            transposed = matrix.transpose();
            &transposed
        }
    };
    let n = items.rows();
    Matrix::from_fn(n, n, |i, j| {
        if i == j {
            0.0
        } else {
            metric.distance(items.row_slice(i), items.row_slice(j))
        }
    })
}

pub fn pairwise_euclidean_distance(matrix: &Matrix<f64>, axis: Axis) -> Matrix<f64> {
    pairwise_distance(matrix, &DistanceMetric::Euclidean, axis)
}

pub fn pairwise_cosine_distance(matrix: &Matrix<f64>, axis: Axis) -> Matrix<f64> {
    pairwise_distance(matrix, &DistanceMetric::Cosine, axis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_distance() {
        let d = DistanceMetric::Cosine.distance(&[1.0, 0.0], &[0.0, 1.0]);
        assert!((d - 1.0).abs() < 1e-12);
        let d = DistanceMetric::Cosine.distance(&[1.0, 2.0], &[2.0, 4.0]);
        assert!(d.abs() < 1e-12, "parallel vectors should be ~0, got {d}");
        assert_eq!(DistanceMetric::Cosine.distance(&[0.0, 0.0], &[1.0, 1.0]), 1.0);
    }

    #[test]
    fn test_euclidean_and_manhattan() {
        assert_eq!(DistanceMetric::Euclidean.distance(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
        assert_eq!(DistanceMetric::Manhattan.distance(&[0.0, 0.0], &[3.0, -4.0]), 7.0);
    }

    #[test]
    fn test_metric_from_str() {
        assert_eq!("Cosine".parse::<DistanceMetric>().unwrap(), DistanceMetric::Cosine);
        assert_eq!("cityblock".parse::<DistanceMetric>().unwrap(), DistanceMetric::Manhattan);
        assert!(matches!(
            "hamming".parse::<DistanceMetric>(),
            Err(IndexError::UnknownMetric(_))
        ));
    }

    #[test]
    fn test_order_defaults_to_cosine() {
        let candidates = vec![vec![0.0, 1.0], vec![1.0, 0.1], vec![1.0, 1.0]];
        let order = order_by_distance(&[1.0, 0.0], &candidates, None).unwrap();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn test_order_is_stable_on_ties() {
        let candidates = vec![vec![2.0], vec![1.0], vec![2.0], vec![1.0]];
        let metric = DistanceMetric::Euclidean;
        let order = order_by_distance(&[0.0], &candidates, Some(&metric)).unwrap();
        assert_eq!(order, vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_custom_metric_closure() {
        let by_first = |a: &[f64], b: &[f64]| (a[0] - b[0]).abs();
        let candidates = [[5.0, 0.0], [1.0, 9.0], [3.0, 3.0]];
        let order = order_by_distance(&[0.0, 0.0], &candidates, Some(&by_first)).unwrap();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn test_dimension_mismatch() {
        let candidates = vec![vec![1.0, 0.0], vec![1.0]];
        let err = order_by_distance(&[1.0, 0.0], &candidates, None).unwrap_err();
        assert!(matches!(
            err,
            IndexError::DimensionMismatch { expected: 2, actual: 1 }
        ));
    }

    #[test]
    fn test_empty_candidates() {
        let candidates: Vec<Vec<f64>> = Vec::new();
        assert!(order_by_distance(&[1.0], &candidates, None).unwrap().is_empty());
    }

    #[test]
    fn test_axis_from_usize() {
        assert_eq!(Axis::try_from(0).unwrap(), Axis::Rows);
        assert_eq!(Axis::try_from(1).unwrap(), Axis::Columns);
        assert!(matches!(Axis::try_from(2), Err(IndexError::InvalidAxis(2))));
    }

    #[test]
    fn test_pairwise_rows_and_columns() {
        let m = Matrix::<f64>::from_rows(&[vec![0.0, 0.0], vec![3.0, 4.0]]).unwrap();
        let rows = pairwise_euclidean_distance(&m, Axis::Rows);
        assert_eq!(rows.to_rows(), vec![vec![0.0, 5.0], vec![5.0, 0.0]]);

        let cols = pairwise_euclidean_distance(&m, Axis::Columns);
        assert_eq!(cols.to_rows(), vec![vec![0.0, 1.0], vec![1.0, 0.0]]);
    }

    #[test]
    fn test_pairwise_cosine_diagonal_is_zero() {
        let rows = [vec![1.0, 2.0], vec![0.3, 0.7], vec![5.0, 1.0]];
        let m = Matrix::<f64>::from_rows(&rows).unwrap();
        let d = pairwise_cosine_distance(&m, Axis::Rows);
        assert_eq!(d.shape(), (3, 3));
        for i in 0..3 {
            assert_eq!(*d.get(i, i).unwrap(), 0.0);
            for j in 0..3 {
                assert_eq!(d.get(i, j), d.get(j, i));
            }
        }
    }
}
