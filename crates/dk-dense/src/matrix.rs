use crate::error::{DenseError, Result};
use crate::scalar::Scalar;
use crate::shape::Shape2;
use crate::vector::Vector;
use std::ops::{Index, IndexMut};

/// Shape, element access and bulk-copy contract consumed by the kernel.
///
/// Logical indexing is row-major: `get(i, j)` is row `i`, column `j`. Every
/// implementation must be able to hand out each row as a contiguous slice.
pub trait DenseMatrix<T: Scalar> {
    fn rows(&self) -> usize;

    fn cols(&self) -> usize;

    fn shape(&self) -> Shape2 {
        Shape2::new(self.rows(), self.cols())
    }

    /// Row `i` as a contiguous slice of length `cols()`.
    ///
    /// # Panics
    /// Panics if `i >= rows()`.
    fn row(&self, i: usize) -> &[T];

    /// Mutable row `i`.
    ///
    /// # Panics
    /// Panics if `i >= rows()`.
    fn row_mut(&mut self, i: usize) -> &mut [T];

    fn get(&self, i: usize, j: usize) -> T {
        self.row(i)[j]
    }

    fn set(&mut self, i: usize, j: usize, v: T) {
        self.row_mut(i)[j] = v;
    }

    /// Resize to `rows x cols`.
    ///
    /// A no-op when the shape already matches. Otherwise the previous
    /// contents are discarded and every element is zero.
    fn resize(&mut self, rows: usize, cols: usize);

    /// Copy all elements, row-major, into the front of `out`.
    ///
    /// # Panics
    /// Panics if `out.len() < rows() * cols()`.
    fn dump_data(&self, out: &mut [T]) {
        let cols = self.cols();
        for i in 0..self.rows() {
            out[i * cols..(i + 1) * cols].copy_from_slice(self.row(i));
        }
    }

    /// Resize to `rows x cols` and copy `data` (row-major) into the matrix.
    fn from_data(&mut self, data: &[T], rows: usize, cols: usize) -> Result<()> {
        if data.len() != rows * cols {
            return Err(DenseError::DataLength {
                len: data.len(),
                shape: Shape2::new(rows, cols),
            });
        }
        self.resize(rows, cols);
        for i in 0..rows {
            self.row_mut(i)
                .copy_from_slice(&data[i * cols..(i + 1) * cols]);
        }
        Ok(())
    }
}

/// Generic dense matrix stored as a sequence of row vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T: Scalar> {
    rows: Vec<Vector<T>>,
    cols: usize,
}

impl<T: Scalar> Matrix<T> {
    /// Create a zero-filled `rows x cols` matrix.
    pub fn new(rows: usize, cols: usize) -> Self {
        Matrix {
            rows: (0..rows).map(|_| Vector::zeros(cols)).collect(),
            cols,
        }
    }

    /// Build a matrix from nested rows.
    ///
    /// # Errors
    /// Returns `RaggedRows` if the rows do not all have the same length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        for (row, r) in rows.iter().enumerate() {
            if r.len() != cols {
                return Err(DenseError::RaggedRows {
                    row,
                    expected: cols,
                    got: r.len(),
                });
            }
        }
        Ok(Matrix {
            rows: rows.into_iter().map(Vector::from_vec).collect(),
            cols,
        })
    }

    /// Build a `rows x cols` matrix from row-major data.
    pub fn from_vec(data: Vec<T>, rows: usize, cols: usize) -> Result<Self> {
        let mut m = Matrix::new(0, 0);
        m.from_data(&data, rows, cols)?;
        Ok(m)
    }

    /// The `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Matrix::new(n, n);
        for i in 0..n {
            m.rows[i][i] = T::one();
        }
        m
    }

    /// A new matrix holding the transpose of `self`.
    pub fn transpose(&self) -> Self {
        let mut t = Matrix::new(self.cols, self.rows.len());
        for (i, row) in self.rows.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                t.rows[j][i] = v;
            }
        }
        t
    }
}

impl<T: Scalar> DenseMatrix<T> for Matrix<T> {
    fn rows(&self) -> usize {
        self.rows.len()
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn row(&self, i: usize) -> &[T] {
        self.rows[i].as_slice()
    }

    fn row_mut(&mut self, i: usize) -> &mut [T] {
        self.rows[i].as_mut_slice()
    }

    fn resize(&mut self, rows: usize, cols: usize) {
        if self.rows.len() != rows || self.cols != cols {
            *self = Matrix::new(rows, cols);
        }
    }
}

impl<T: Scalar> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (i, j): (usize, usize)) -> &T {
        &self.rows[i][j]
    }
}

impl<T: Scalar> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        &mut self.rows[i][j]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Matrix<f64> {
        Matrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap()
    }

    #[test]
    fn test_from_rows() {
        let m = sample();
        assert_eq!(m.shape(), Shape2::new(2, 3));
        assert_eq!(m[(1, 2)], 6.0);
        assert_eq!(m.row(0), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_ragged_rows() {
        let err = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(
            err,
            DenseError::RaggedRows {
                row: 1,
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn test_transpose() {
        let t = sample().transpose();
        assert_eq!(t.shape(), Shape2::new(3, 2));
        assert_eq!(t.row(2), &[3.0, 6.0]);
    }

    #[test]
    fn test_dump_and_from_data() {
        let m = sample();
        let mut buf = vec![0.0; 6];
        m.dump_data(&mut buf);
        assert_eq!(buf, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

        let mut n = Matrix::new(1, 1);
        n.from_data(&buf, 3, 2).unwrap();
        assert_eq!(n.shape(), Shape2::new(3, 2));
        assert_eq!(n.row(1), &[3.0, 4.0]);
    }

    #[test]
    fn test_from_data_length_mismatch() {
        let mut m = sample();
        assert!(m.from_data(&[1.0, 2.0], 2, 2).is_err());
        assert_eq!(m, sample());
    }

    #[test]
    fn test_resize_keeps_matching_shape() {
        let mut m = sample();
        m.resize(2, 3);
        assert_eq!(m, sample());
        m.resize(3, 3);
        assert_eq!(m, Matrix::new(3, 3));
    }

    #[test]
    fn test_identity() {
        let i = Matrix::<f64>::identity(3);
        assert_eq!(i[(0, 0)], 1.0);
        assert_eq!(i[(0, 1)], 0.0);
        assert_eq!(i[(2, 2)], 1.0);
    }

    #[test]
    fn test_zero_rows_keep_cols() {
        let m = Matrix::<f64>::new(0, 4);
        assert_eq!(m.shape(), Shape2::new(0, 4));
    }
}
