//! Host-side check of a returned product against a local reference.

use em_kernel::{Element, KernelError, Matrix, Result};

/// The first element at which two matrices differ, in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch<T: Element> {
    pub row: usize,
    pub col: usize,
    pub expected: T,
    pub actual: T,
}

/// Outcome of comparing a returned product with the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict<T: Element> {
    Match,
    Mismatch(Mismatch<T>),
}

impl<T: Element> Verdict<T> {
    pub fn is_match(&self) -> bool {
        matches!(self, Verdict::Match)
    }
}

/// Scan for the first differing element, stopping at it.
pub fn first_mismatch<T: Element>(
    expected: &Matrix<T>,
    actual: &Matrix<T>,
) -> Result<Option<Mismatch<T>>> {
    let n = expected.n();
    if actual.n() != n {
        return Err(KernelError::DimensionMismatch {
            expected: n,
            got: actual.n(),
        });
    }
    Ok(expected
        .as_slice()
        .iter()
        .zip(actual.as_slice())
        .position(|(e, a)| e != a)
        .map(|idx| Mismatch {
            row: idx / n,
            col: idx % n,
            expected: expected.as_slice()[idx],
            actual: actual.as_slice()[idx],
        }))
}

pub fn verify<T: Element>(expected: &Matrix<T>, actual: &Matrix<T>) -> Result<Verdict<T>> {
    Ok(match first_mismatch(expected, actual)? {
        None => Verdict::Match,
        Some(m) => Verdict::Mismatch(m),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_matrices_match() {
        let m = Matrix::from_fn(4, |i, j| (i * j) as i32).unwrap();
        assert_eq!(verify(&m, &m.clone()).unwrap(), Verdict::Match);
    }

    #[test]
    fn test_reports_first_coordinate() {
        let expected = Matrix::<i32>::zeros(3).unwrap();
        let mut actual = expected.clone();
        actual.as_mut_slice()[5] = 4;
        actual.as_mut_slice()[7] = 9;
        let m = first_mismatch(&expected, &actual).unwrap().unwrap();
        assert_eq!(
            m,
            Mismatch {
                row: 1,
                col: 2,
                expected: 0,
                actual: 4
            }
        );
        assert!(!verify(&expected, &actual).unwrap().is_match());
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = Matrix::<i32>::zeros(2).unwrap();
        let b = Matrix::<i32>::zeros(3).unwrap();
        assert!(first_mismatch(&a, &b).is_err());
    }
}
