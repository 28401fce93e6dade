use crate::dtype::Element;
use crate::error::{KernelError, Result};
use std::fmt;

/// The dimension of an N x N matrix, checked to be positive.
///
/// Every buffer in a request shares one `SquareShape`. Element `(i, j)` lives
/// at offset `i * n + j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SquareShape {
    n: usize,
}

impl SquareShape {
    /// Create a shape for an `n x n` matrix.
    ///
    /// # Errors
    /// Returns `ZeroDimension` if `n == 0`.
    pub fn new(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(KernelError::ZeroDimension);
        }
        Ok(SquareShape { n })
    }

    /// Edge length N.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Total number of elements, N².
    ///
    /// # Errors
    /// Returns `DimensionOverflow` if N² does not fit in `usize`.
    pub fn numel(&self) -> Result<usize> {
        self.n
            .checked_mul(self.n)
            .ok_or(KernelError::DimensionOverflow {
                n: self.n,
                elem_size: 1,
            })
    }

    /// Size of one matrix of `T` in bytes, N² x `size_of::<T>()`.
    ///
    /// # Errors
    /// Returns `DimensionOverflow` if the byte count does not fit in `usize`
    /// or exceeds `isize::MAX`, the largest allocation Rust can describe.
    pub fn byte_len<T: Element>(&self) -> Result<usize> {
        let elem_size = T::DTYPE.size_in_bytes();
        let overflow = KernelError::DimensionOverflow {
            n: self.n,
            elem_size,
        };
        let bytes = self
            .n
            .checked_mul(self.n)
            .and_then(|numel| numel.checked_mul(elem_size))
            .ok_or_else(|| overflow.clone())?;
        if bytes > isize::MAX as usize {
            return Err(overflow);
        }
        Ok(bytes)
    }

    /// Row-major offset of element `(i, j)`.
    #[inline(always)]
    pub fn offset(&self, i: usize, j: usize) -> usize {
        i * self.n + j
    }
}

impl fmt::Display for SquareShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}x{}]", self.n, self.n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_rejected() {
        assert_eq!(SquareShape::new(0), Err(KernelError::ZeroDimension));
    }

    #[test]
    fn test_numel_and_bytes() {
        let s = SquareShape::new(3).unwrap();
        assert_eq!(s.n(), 3);
        assert_eq!(s.numel().unwrap(), 9);
        assert_eq!(s.byte_len::<i32>().unwrap(), 36);
        assert_eq!(s.byte_len::<i64>().unwrap(), 72);
    }

    #[test]
    fn test_overflow_detected() {
        let s = SquareShape::new(usize::MAX).unwrap();
        assert!(matches!(
            s.numel(),
            Err(KernelError::DimensionOverflow { .. })
        ));
        assert!(matches!(
            s.byte_len::<i32>(),
            Err(KernelError::DimensionOverflow { elem_size: 4, .. })
        ));
    }

    #[test]
    fn test_bytes_overflow_with_element_size() {
        // N² fits but N² * 8 does not.
        let n = 1usize << (usize::BITS / 2 - 1);
        let s = SquareShape::new(n).unwrap();
        assert!(s.numel().is_ok());
        assert!(s.byte_len::<i64>().is_err());
    }

    #[test]
    fn test_offset_row_major() {
        let s = SquareShape::new(4).unwrap();
        assert_eq!(s.offset(0, 0), 0);
        assert_eq!(s.offset(1, 2), 6);
        assert_eq!(s.offset(3, 3), 15);
    }

    #[test]
    fn test_display() {
        assert_eq!(SquareShape::new(2).unwrap().to_string(), "[2x2]");
    }
}
