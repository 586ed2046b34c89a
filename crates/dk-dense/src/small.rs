use crate::error::{DenseError, Result};
use crate::matrix::{DenseMatrix, Matrix};
use crate::scalar::Scalar;
use crate::shape::Shape2;
use std::ops::{Index, IndexMut};

/// A dense matrix backed by one contiguous, row-major buffer.
///
/// This is the representation the optimized GEMM engine marshals into, so
/// `dump_data` and `from_data` are single slice copies.
#[derive(Debug, Clone, PartialEq)]
pub struct SmallMatrix<T: Scalar> {
    data: Vec<T>,
    shape: Shape2,
}

impl<T: Scalar> SmallMatrix<T> {
    /// Create a zero-filled `rows x cols` matrix.
    pub fn new(rows: usize, cols: usize) -> Self {
        SmallMatrix {
            data: vec![T::zero(); rows * cols],
            shape: Shape2::new(rows, cols),
        }
    }

    /// Build a `rows x cols` matrix from row-major data.
    ///
    /// # Errors
    /// Returns `DataLength` if `data.len() != rows * cols`.
    pub fn from_vec(data: Vec<T>, rows: usize, cols: usize) -> Result<Self> {
        let shape = Shape2::new(rows, cols);
        if data.len() != shape.numel() {
            return Err(DenseError::DataLength {
                len: data.len(),
                shape,
            });
        }
        Ok(SmallMatrix { data, shape })
    }

    /// Build a matrix from nested rows.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        Ok(SmallMatrix::from(&Matrix::from_rows(rows)?))
    }

    /// The `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = SmallMatrix::new(n, n);
        for i in 0..n {
            m.data[i * n + i] = T::one();
        }
        m
    }

    /// A new matrix holding the transpose of `self`.
    pub fn transpose(&self) -> Self {
        let Shape2 { rows, cols } = self.shape;
        let mut t = SmallMatrix::new(cols, rows);
        for i in 0..rows {
            for j in 0..cols {
                t.data[j * rows + i] = self.data[i * cols + j];
            }
        }
        t
    }

    /// The underlying row-major data.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T: Scalar> DenseMatrix<T> for SmallMatrix<T> {
    fn rows(&self) -> usize {
        self.shape.rows
    }

    fn cols(&self) -> usize {
        self.shape.cols
    }

    fn row(&self, i: usize) -> &[T] {
        assert!(i < self.shape.rows, "row {} out of range for {}", i, self.shape);
        let c = self.shape.cols;
        &self.data[i * c..(i + 1) * c]
    }

    fn row_mut(&mut self, i: usize) -> &mut [T] {
        assert!(i < self.shape.rows, "row {} out of range for {}", i, self.shape);
        let c = self.shape.cols;
        &mut self.data[i * c..(i + 1) * c]
    }

    fn resize(&mut self, rows: usize, cols: usize) {
        let shape = Shape2::new(rows, cols);
        if self.shape != shape {
            *self = SmallMatrix::new(rows, cols);
        }
    }

    fn dump_data(&self, out: &mut [T]) {
        out[..self.data.len()].copy_from_slice(&self.data);
    }

    fn from_data(&mut self, data: &[T], rows: usize, cols: usize) -> Result<()> {
        let shape = Shape2::new(rows, cols);
        if data.len() != shape.numel() {
            return Err(DenseError::DataLength {
                len: data.len(),
                shape,
            });
        }
        self.data.clear();
        self.data.extend_from_slice(data);
        self.shape = shape;
        Ok(())
    }
}

impl<T: Scalar> Index<(usize, usize)> for SmallMatrix<T> {
    type Output = T;

    fn index(&self, (i, j): (usize, usize)) -> &T {
        assert!(j < self.shape.cols, "column {} out of range for {}", j, self.shape);
        &self.data[i * self.shape.cols + j]
    }
}

impl<T: Scalar> IndexMut<(usize, usize)> for SmallMatrix<T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        assert!(j < self.shape.cols, "column {} out of range for {}", j, self.shape);
        &mut self.data[i * self.shape.cols + j]
    }
}

impl<T: Scalar> From<&Matrix<T>> for SmallMatrix<T> {
    fn from(m: &Matrix<T>) -> Self {
        let mut data = vec![T::zero(); m.shape().numel()];
        m.dump_data(&mut data);
        SmallMatrix {
            data,
            shape: m.shape(),
        }
    }
}

impl<T: Scalar> From<&SmallMatrix<T>> for Matrix<T> {
    fn from(m: &SmallMatrix<T>) -> Self {
        let mut out = Matrix::new(m.rows(), m.cols());
        for i in 0..m.rows() {
            out.row_mut(i).copy_from_slice(m.row(i));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_small_matrix() {
        let m = SmallMatrix::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3).unwrap();
        assert_eq!(m.shape(), Shape2::new(2, 3));
        assert_eq!(m[(1, 0)], 4.0);
        assert_eq!(m.row(1), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_from_vec_mismatch() {
        let err = SmallMatrix::from_vec(vec![1.0, 2.0], 2, 2).unwrap_err();
        assert_eq!(
            err,
            DenseError::DataLength {
                len: 2,
                shape: Shape2::new(2, 2)
            }
        );
    }

    #[test]
    fn test_transpose() {
        let m = SmallMatrix::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3).unwrap();
        let t = m.transpose();
        assert_eq!(t.shape(), Shape2::new(3, 2));
        assert_eq!(t.as_slice(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn test_round_trip_between_representations() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap();
        let s = SmallMatrix::from(&m);
        assert_eq!(s.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(Matrix::from(&s), m);
    }

    #[test]
    fn test_from_data_reshapes() {
        let mut m = SmallMatrix::<f64>::new(2, 2);
        m.from_data(&[1.0, 2.0, 3.0], 1, 3).unwrap();
        assert_eq!(m.shape(), Shape2::new(1, 3));
        assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_resize_zeroes_on_change() {
        let mut m = SmallMatrix::<f64>::identity(2);
        m.resize(2, 2);
        assert_eq!(m[(0, 0)], 1.0);
        m.resize(2, 3);
        assert_eq!(m.as_slice(), &[0.0; 6]);
    }

    #[test]
    #[should_panic]
    fn test_row_out_of_range_panics() {
        let m = SmallMatrix::<f64>::new(2, 2);
        let _ = m.row(2);
    }
}
