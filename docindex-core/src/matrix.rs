//! Dense row-major matrix with an explicit column-growth step

use serde::{Deserialize, Serialize};

use crate::error::{IndexError, Result};

/// Fixed-shape dense matrix, rows = documents, columns = terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMatrix<T>")]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

/// Unchecked wire form of [`Matrix`]
#[derive(Deserialize)]
struct RawMatrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> TryFrom<RawMatrix<T>> for Matrix<T> {
    type Error = IndexError;

    fn try_from(raw: RawMatrix<T>) -> Result<Self> {
        if raw.rows.checked_mul(raw.cols) != Some(raw.data.len()) {
            return Err(IndexError::DimensionMismatch {
                expected: raw.rows.saturating_mul(raw.cols),
                actual: raw.data.len(),
            });
        }
        Ok(Self {
            rows: raw.rows,
            cols: raw.cols,
            data: raw.data,
        })
    }
}

/// Document x term occurrence counts
pub type CountMatrix = Matrix<u32>;

/// Counts with every column scaled by its IDF weight
pub type TermImportanceMatrix = Matrix<f64>;

impl<T: Copy + Default> Matrix<T> {
    /// A `rows` x `cols` matrix of zeros
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![T::default(); rows * cols],
        }
    }

    /// A `rows` x `cols` matrix whose cell (i, j) is `f(i, j)`
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Self { rows, cols, data }
    }

    /// Build from nested rows; every row must have the width of the first
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut matrix = Self::zeros(0, cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(IndexError::RaggedRow {
                    row: i,
                    expected: cols,
                    actual: row.len(),
                });
            }
            matrix.data.extend_from_slice(row);
            matrix.rows += 1;
        }
        Ok(matrix)
    }

    /// Append a row; it must be exactly as wide as the matrix
    pub fn push_row(&mut self, row: &[T]) -> Result<()> {
        if row.len() != self.cols {
            return Err(IndexError::DimensionMismatch {
                expected: self.cols,
                actual: row.len(),
            });
        }
        self.data.extend_from_slice(row);
        self.rows += 1;
        Ok(())
    }

    /// Widen by `extra` columns, zero-padding every existing row
    pub fn push_zero_columns(&mut self, extra: usize) {
        if extra == 0 {
            return;
        }
        let cols = self.cols + extra;
        let mut data = Vec::with_capacity(self.rows * cols);
        for i in 0..self.rows {
            data.extend_from_slice(&self.data[i * self.cols..(i + 1) * self.cols]);
            data.resize(data.len() + extra, T::default());
        }
        self.data = data;
        self.cols = cols;
    }

    /// A new matrix holding the given columns, in the given order
    pub fn select_columns(&self, columns: &[usize]) -> Self {
        let mut data = Vec::with_capacity(self.rows * columns.len());
        for row in self.iter_rows() {
            data.extend(columns.iter().map(|&j| row[j]));
        }
        Self {
            rows: self.rows,
            cols: columns.len(),
            data,
        }
    }

    /// Apply `f` to every cell, passing its column index
    pub fn map_columns<U, F>(&self, mut f: F) -> Matrix<U>
    where
        F: FnMut(usize, T) -> U,
    {
        let data = self
            .data
            .iter()
            .enumerate()
            .map(|(k, &v)| f(k % self.cols, v))
            .collect();
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data,
        }
    }
}

impl<T> Matrix<T> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Row slice, or `None` when `row` is out of range
    pub fn row(&self, row: usize) -> Option<&[T]> {
        if row < self.rows {
            Some(self.row_slice(row))
        } else {
            None
        }
    }

    pub(crate) fn row_slice(&self, row: usize) -> &[T] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Rows in order; a zero-width matrix still yields one empty slice per row
    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.rows).map(move |i| self.row_slice(i))
    }

    /// Transposed copy
    pub fn transpose(&self) -> Matrix<T>
    where
        T: Copy,
    {
        let mut data = Vec::with_capacity(self.data.len());
        for j in 0..self.cols {
            for i in 0..self.rows {
                data.push(self.data[i * self.cols + j]);
            }
        }
        Matrix {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }

    /// Rows as owned vectors, for handing to code that wants nested lists
    pub fn to_rows(&self) -> Vec<Vec<T>>
    where
        T: Clone,
    {
        self.iter_rows().map(|r| r.to_vec()).collect()
    }
}

impl CountMatrix {
    /// Total count per column
    pub fn column_sums(&self) -> Vec<u64> {
        let mut sums = vec![0u64; self.cols];
        for row in self.iter_rows() {
            for (sum, &v) in sums.iter_mut().zip(row) {
                *sum += v as u64;
            }
        }
        sums
    }

    /// Number of rows with a positive count, per column
    pub fn document_frequencies(&self) -> Vec<usize> {
        let mut freqs = vec![0usize; self.cols];
        for row in self.iter_rows() {
            for (freq, &v) in freqs.iter_mut().zip(row) {
                if v > 0 {
                    *freq += 1;
                }
            }
        }
        freqs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_zero_columns_pads_existing_rows() {
        let mut m = CountMatrix::from_rows(&[vec![1, 2], vec![3, 4]]).unwrap();
        m.push_zero_columns(2);
        assert_eq!(m.shape(), (2, 4));
        assert_eq!(m.to_rows(), vec![vec![1, 2, 0, 0], vec![3, 4, 0, 0]]);
    }

    #[test]
    fn test_push_zero_columns_from_zero_width() {
        let mut m = CountMatrix::zeros(3, 0);
        m.push_zero_columns(1);
        assert_eq!(m.to_rows(), vec![vec![0], vec![0], vec![0]]);
    }

    #[test]
    fn test_push_row_checks_width() {
        let mut m = CountMatrix::zeros(0, 2);
        m.push_row(&[1, 1]).unwrap();
        let err = m.push_row(&[1]).unwrap_err();
        assert!(matches!(
            err,
            IndexError::DimensionMismatch { expected: 2, actual: 1 }
        ));
        assert_eq!(m.rows(), 1);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = CountMatrix::from_rows(&[vec![1, 2], vec![3]]).unwrap_err();
        assert!(matches!(err, IndexError::RaggedRow { row: 1, .. }));
    }

    #[test]
    fn test_select_columns_reorders() {
        let m = CountMatrix::from_rows(&[vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        let s = m.select_columns(&[2, 0]);
        assert_eq!(s.to_rows(), vec![vec![3, 1], vec![6, 4]]);
    }

    #[test]
    fn test_column_statistics() {
        let m = CountMatrix::from_rows(&[vec![2, 0, 1], vec![0, 3, 1]]).unwrap();
        assert_eq!(m.column_sums(), vec![2, 3, 2]);
        assert_eq!(m.document_frequencies(), vec![1, 1, 2]);
    }

    #[test]
    fn test_row_out_of_range() {
        let m = CountMatrix::from_rows(&[vec![1, 2], vec![3, 4]]).unwrap();
        assert_eq!(m.row(1), Some(&[3, 4][..]));
        assert!(m.row(2).is_none());
    }

    #[test]
    fn test_deserialize_checks_shape() {
        let json = r#"{"rows":2,"cols":2,"data":[1,0,0,1]}"#;
        let m: CountMatrix = serde_json::from_str(json).unwrap();
        assert_eq!(m.to_rows(), vec![vec![1, 0], vec![0, 1]]);

        let err = serde_json::from_str::<CountMatrix>(r#"{"rows":2,"cols":3,"data":[1,2]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("dimension mismatch"));
    }

    #[test]
    fn test_serialize_round_trip() {
        let m = CountMatrix::from_rows(&[vec![4, 0, 1]]).unwrap();
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(serde_json::from_str::<CountMatrix>(&json).unwrap(), m);
    }

    #[test]
    fn test_transpose() {
        let m = Matrix::<f64>::from_rows(&[vec![1.0, 2.0, 3.0]]).unwrap();
        assert_eq!(m.transpose().to_rows(), vec![vec![1.0], vec![2.0], vec![3.0]]);
    }
}
