use crate::backend::MultiplyKernel;
use crate::dtype::Element;
use crate::error::{KernelError, Result};
use crate::shape::SquareShape;
use crate::view::{MatrixView, MatrixViewMut};

/// An owned, explicitly sized N x N matrix in row-major order.
///
/// The byte length is checked once at construction, so views taken from a
/// `Matrix` are always valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix<T: Element> {
    shape: SquareShape,
    byte_len: usize,
    data: Vec<T>,
}

impl<T: Element> Matrix<T> {
    /// Create a matrix from row-major data.
    ///
    /// # Errors
    /// Returns `ZeroDimension`, `DimensionOverflow` or `LengthMismatch` if
    /// `data` does not hold exactly N² elements.
    pub fn from_vec(n: usize, data: Vec<T>) -> Result<Self> {
        let shape = SquareShape::new(n)?;
        let byte_len = shape.byte_len::<T>()?;
        let numel = shape.numel()?;
        if data.len() != numel {
            return Err(KernelError::LengthMismatch {
                claimed: data.len() * T::DTYPE.size_in_bytes(),
                expected: byte_len,
            });
        }
        Ok(Matrix {
            shape,
            byte_len,
            data,
        })
    }

    /// Create a zero-filled `n x n` matrix.
    pub fn zeros(n: usize) -> Result<Self> {
        Self::filled(n, T::ZERO)
    }

    /// Create an `n x n` matrix with every element set to `value`.
    pub fn filled(n: usize, value: T) -> Result<Self> {
        let numel = SquareShape::new(n)?.numel()?;
        Self::from_vec(n, vec![value; numel])
    }

    /// Create the `n x n` identity matrix.
    pub fn identity(n: usize) -> Result<Self> {
        Self::from_fn(n, |i, j| if i == j { T::ONE } else { T::ZERO })
    }

    /// Create a matrix whose element `(i, j)` is `f(i, j)`, filled row by row.
    pub fn from_fn<F>(n: usize, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> T,
    {
        let numel = SquareShape::new(n)?.numel()?;
        let mut data = Vec::with_capacity(numel);
        for i in 0..n {
            for j in 0..n {
                data.push(f(i, j));
            }
        }
        Self::from_vec(n, data)
    }

    /// Copy a validated view into a freshly owned buffer.
    pub fn from_view(view: &MatrixView<'_, T>) -> Result<Self> {
        Self::from_vec(view.n(), view.as_slice().to_vec())
    }

    pub fn shape(&self) -> SquareShape {
        self.shape
    }

    pub fn n(&self) -> usize {
        self.shape.n()
    }

    /// Size of the buffer in bytes, N² x `size_of::<T>()`.
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Element `(i, j)`.
    ///
    /// # Panics
    /// Panics if `i` or `j` is out of range.
    pub fn get(&self, i: usize, j: usize) -> T {
        self.data[self.shape.offset(i, j)]
    }

    pub fn view(&self) -> MatrixView<'_, T> {
        MatrixView::from_owned(self.shape, &self.data)
    }

    pub fn view_mut(&mut self) -> MatrixViewMut<'_, T> {
        MatrixViewMut::from_owned(self.shape, &mut self.data)
    }

    /// Multiply `self · other` into a new matrix using the given kernel.
    pub fn multiply(&self, other: &Matrix<T>, kernel: &dyn MultiplyKernel<T>) -> Result<Matrix<T>> {
        let mut out = Matrix::zeros(self.n())?;
        kernel.multiply(self.view(), other.view(), &mut out.view_mut())?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vec() {
        let m = Matrix::from_vec(2, vec![1i32, 2, 3, 4]).unwrap();
        assert_eq!(m.n(), 2);
        assert_eq!(m.byte_len(), 16);
        assert_eq!(m.get(0, 1), 2);
        assert_eq!(m.get(1, 0), 3);
    }

    #[test]
    fn test_from_vec_wrong_len() {
        assert!(matches!(
            Matrix::from_vec(2, vec![1i32, 2, 3]),
            Err(KernelError::LengthMismatch { claimed: 12, expected: 16 })
        ));
        assert_eq!(
            Matrix::<i32>::from_vec(0, vec![]).unwrap_err(),
            KernelError::ZeroDimension
        );
    }

    #[test]
    fn test_identity() {
        let id = Matrix::<i64>::identity(3).unwrap();
        assert_eq!(id.as_slice(), &[1, 0, 0, 0, 1, 0, 0, 0, 1]);
    }

    #[test]
    fn test_from_fn_row_major() {
        let m = Matrix::from_fn(3, |i, j| (10 * i + j) as i32).unwrap();
        assert_eq!(m.as_slice(), &[0, 1, 2, 10, 11, 12, 20, 21, 22]);
    }

    #[test]
    fn test_view_matches_buffer() {
        let mut m = Matrix::<i32>::filled(2, 7).unwrap();
        assert_eq!(m.view().as_slice(), &[7; 4]);
        m.view_mut().as_mut_slice()[0] = 1;
        assert_eq!(m.get(0, 0), 1);
    }

    #[test]
    fn test_from_view_copies() {
        let src = vec![1i32, 2, 3, 4];
        let view = MatrixView::from_slice(&src[..], 16, 2).unwrap();
        let owned = Matrix::from_view(&view).unwrap();
        assert_eq!(owned.as_slice(), src.as_slice());
        assert_ne!(owned.as_slice().as_ptr(), src.as_ptr());
    }
}
