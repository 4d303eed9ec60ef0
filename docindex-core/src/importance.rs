//! Inverse document frequency weighting

use serde::{Deserialize, Serialize};

use crate::error::{IndexError, Result};
use crate::matrix::{CountMatrix, TermImportanceMatrix};

/// One IDF weight per vocabulary column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdfVector(Vec<f64>);

impl IdfVector {
    /// IDF weights of `counts`: `ln(N / max(1, df))`
    ///
    /// A matrix without rows yields all-zero weights.
    pub fn from_counts(counts: &CountMatrix) -> Self {
        let n = counts.rows() as f64;
        let weights = counts
            .document_frequencies()
            .into_iter()
            .map(|df| {
                if counts.rows() == 0 {
                    0.0
                } else {
                    (n / df.max(1) as f64).ln()
                }
            })
            .collect();
        Self(weights)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Elementwise product of a count vector with the weights
    pub fn weigh(&self, counts: &[u32]) -> Result<Vec<f64>> {
        if counts.len() != self.0.len() {
            return Err(IndexError::DimensionMismatch {
                expected: self.0.len(),
                actual: counts.len(),
            });
        }
        Ok(counts
            .iter()
            .zip(&self.0)
            .map(|(&c, &w)| c as f64 * w)
            .collect())
    }
}

impl From<Vec<f64>> for IdfVector {
    fn from(weights: Vec<f64>) -> Self {
        Self(weights)
    }
}

/// IDF weights and the IDF-scaled matrix for `counts`
pub fn term_importance(counts: &CountMatrix) -> (IdfVector, TermImportanceMatrix) {
    let idf = IdfVector::from_counts(counts);
    let weighted = counts.map_columns(|j, c| c as f64 * idf.0[j]);
    (idf, weighted)
}
