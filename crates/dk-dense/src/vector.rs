use crate::scalar::Scalar;
use std::ops::{Index, IndexMut};

/// An owned, dense vector of scalars.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector<T: Scalar> {
    data: Vec<T>,
}

impl<T: Scalar> Vector<T> {
    /// Create a zero-filled vector of length `n`.
    pub fn zeros(n: usize) -> Self {
        Vector {
            data: vec![T::zero(); n],
        }
    }

    pub fn from_vec(data: Vec<T>) -> Self {
        Vector { data }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the vector contains no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Resize to length `n`. A no-op when the length already matches;
    /// otherwise every element is reset to zero.
    pub fn resize(&mut self, n: usize) {
        if self.data.len() != n {
            self.data.clear();
            self.data.resize(n, T::zero());
        }
    }

    /// Sum of all elements.
    pub fn sum(&self) -> T {
        self.data.iter().fold(T::zero(), |acc, &v| acc + v)
    }

    /// Unconjugated dot product with `other`.
    ///
    /// # Panics
    /// Panics if the lengths differ.
    pub fn dot(&self, other: &Vector<T>) -> T {
        assert_eq!(
            self.len(),
            other.len(),
            "dot: length {} != {}",
            self.len(),
            other.len()
        );
        dot(&self.data, &other.data)
    }
}

/// Unconjugated dot product of two equally long slices.
pub fn dot<T: Scalar>(a: &[T], b: &[T]) -> T {
    a.iter()
        .zip(b.iter())
        .fold(T::zero(), |acc, (&x, &y)| acc + x * y)
}

impl<T: Scalar> From<Vec<T>> for Vector<T> {
    fn from(data: Vec<T>) -> Self {
        Vector::from_vec(data)
    }
}

impl<T: Scalar> Index<usize> for Vector<T> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        &self.data[i]
    }
}

impl<T: Scalar> IndexMut<usize> for Vector<T> {
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.data[i]
    }
}
