use std::fmt;

/// Supported element types for matrix storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    /// 32-bit signed integer.
    I32,
    /// 64-bit signed integer.
    I64,
}

impl DType {
    /// Returns the size in bytes of a single element.
    pub fn size_in_bytes(&self) -> usize {
        match self {
            DType::I32 => 4,
            DType::I64 => 8,
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DType::I32 => write!(f, "i32"),
            DType::I64 => write!(f, "i64"),
        }
    }
}

/// A fixed-width integer that can flow through the multiply kernel.
///
/// Arithmetic wraps on overflow. Wrapping addition and multiplication form a
/// ring modulo 2^w, so the product is the same for every summation order,
/// which is what lets block size and thread count stay out of the result.
pub trait Element: Copy + PartialEq + fmt::Debug + Send + Sync + 'static {
    const DTYPE: DType;
    const ZERO: Self;
    const ONE: Self;

    /// Returns `acc + a * b` with wraparound.
    fn mul_add_wrapping(acc: Self, a: Self, b: Self) -> Self;
}

impl Element for i32 {
    const DTYPE: DType = DType::I32;
    const ZERO: Self = 0;
    const ONE: Self = 1;

    #[inline(always)]
    fn mul_add_wrapping(acc: Self, a: Self, b: Self) -> Self {
        acc.wrapping_add(a.wrapping_mul(b))
    }
}

impl Element for i64 {
    const DTYPE: DType = DType::I64;
    const ZERO: Self = 0;
    const ONE: Self = 1;

    #[inline(always)]
    fn mul_add_wrapping(acc: Self, a: Self, b: Self) -> Self {
        acc.wrapping_add(a.wrapping_mul(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_in_bytes() {
        assert_eq!(DType::I32.size_in_bytes(), 4);
        assert_eq!(DType::I64.size_in_bytes(), 8);
        assert_eq!(<i32 as Element>::DTYPE.size_in_bytes(), std::mem::size_of::<i32>());
        assert_eq!(<i64 as Element>::DTYPE.size_in_bytes(), std::mem::size_of::<i64>());
    }

    #[test]
    fn test_display() {
        assert_eq!(DType::I32.to_string(), "i32");
        assert_eq!(DType::I64.to_string(), "i64");
    }

    #[test]
    fn test_mul_add_wraps() {
        assert_eq!(i32::mul_add_wrapping(1, 2, 3), 7);
        assert_eq!(i32::mul_add_wrapping(i32::MAX, 1, 1), i32::MIN);
        assert_eq!(i32::mul_add_wrapping(0, 65536, 65536), 0);
        assert_eq!(i64::mul_add_wrapping(i64::MAX, 2, 1), i64::MIN + 1);
    }
}
