//! Deterministic operand generators.
//!
//! Both are closed-form in `(i, j)` and evaluated with i32 wraparound, so
//! the same N always yields the same operands on every platform.

use em_kernel::{Matrix, Result};

/// `A[i, j] = i * 713612 + j`.
pub fn a_entry(i: usize, j: usize) -> i32 {
    let (i, j) = (i as i32, j as i32);
    i.wrapping_mul(713_612).wrapping_add(j)
}

/// `B[i, j] = (i * i + j) * i`.
pub fn b_entry(i: usize, j: usize) -> i32 {
    let (i, j) = (i as i32, j as i32);
    i.wrapping_mul(i).wrapping_add(j).wrapping_mul(i)
}

pub fn operand_a(n: usize) -> Result<Matrix<i32>> {
    Matrix::from_fn(n, a_entry)
}

pub fn operand_b(n: usize) -> Result<Matrix<i32>> {
    Matrix::from_fn(n, b_entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operand_a_values() {
        let a = operand_a(3).unwrap();
        assert_eq!(
            a.as_slice(),
            &[0, 1, 2, 713_612, 713_613, 713_614, 1_427_224, 1_427_225, 1_427_226]
        );
    }

    #[test]
    fn test_operand_b_values() {
        let b = operand_b(3).unwrap();
        // Row 0 is all zero because of the trailing `* i`.
        assert_eq!(b.as_slice(), &[0, 0, 0, 1, 2, 3, 8, 10, 12]);
    }

    #[test]
    fn test_generators_deterministic() {
        assert_eq!(operand_a(40).unwrap(), operand_a(40).unwrap());
        assert_eq!(operand_b(40).unwrap(), operand_b(40).unwrap());
    }

    #[test]
    fn test_entries_wrap() {
        // 3100 * 713612 exceeds i32::MAX.
        assert_eq!(a_entry(3100, 0), -2_082_770_096);
        assert_eq!(b_entry(2000, 0), 2000i32.wrapping_mul(2000).wrapping_mul(2000));
    }

    #[test]
    fn test_zero_dimension() {
        assert!(operand_a(0).is_err());
    }
}
