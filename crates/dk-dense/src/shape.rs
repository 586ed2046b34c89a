use std::fmt;

/// The shape of a dense matrix: a row count and a column count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Shape2 {
    pub rows: usize,
    pub cols: usize,
}

impl Shape2 {
    /// Create a new `rows x cols` shape.
    pub const fn new(rows: usize, cols: usize) -> Self {
        Shape2 { rows, cols }
    }

    /// Shape used to describe a vector of length `n` (a single column).
    pub const fn vector(n: usize) -> Self {
        Shape2 { rows: n, cols: 1 }
    }

    /// Total number of elements.
    pub fn numel(&self) -> usize {
        self.rows * self.cols
    }

    /// The shape with rows and columns swapped.
    pub fn transposed(&self) -> Self {
        Shape2 {
            rows: self.cols,
            cols: self.rows,
        }
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }
}

impl fmt::Display for Shape2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} x {}]", self.rows, self.cols)
    }
}

impl From<(usize, usize)> for Shape2 {
    fn from((rows, cols): (usize, usize)) -> Self {
        Shape2::new(rows, cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_shape() {
        let s = Shape2::new(2, 3);
        assert_eq!(s.numel(), 6);
        assert_eq!(s.transposed(), Shape2::new(3, 2));
        assert!(!s.is_square());
        assert!(Shape2::new(4, 4).is_square());
    }

    #[test]
    fn test_vector_shape() {
        let s = Shape2::vector(5);
        assert_eq!(s, Shape2::new(5, 1));
        assert_eq!(s.numel(), 5);
    }

    #[test]
    fn test_display() {
        assert_eq!(Shape2::new(2, 3).to_string(), "[2 x 3]");
    }

    #[test]
    fn test_empty_shape() {
        let s: Shape2 = (0, 7).into();
        assert_eq!(s.numel(), 0);
    }
}
