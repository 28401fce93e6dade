pub mod blocked;
pub mod partition;

pub use blocked::BlockedKernel;
pub use partition::{block_range, row_bands};

use crate::backend::{check_same_dim, MultiplyKernel};
use crate::dtype::Element;
use crate::error::Result;
use crate::view::{MatrixView, MatrixViewMut};

/// Plain i-j-k triple loop.
///
/// Single threaded and cache-oblivious. Serves as the reference that the
/// blocked kernel is checked against.
#[derive(Debug, Clone)]
pub struct NaiveKernel;

impl NaiveKernel {
    pub fn new() -> Self {
        NaiveKernel
    }
}

impl Default for NaiveKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> MultiplyKernel<T> for NaiveKernel {
    fn name(&self) -> &str {
        "naive"
    }

    fn multiply(
        &self,
        a: MatrixView<'_, T>,
        b: MatrixView<'_, T>,
        c: &mut MatrixViewMut<'_, T>,
    ) -> Result<()> {
        let n = check_same_dim(&a, &b, c)?;
        let (a, b) = (a.as_slice(), b.as_slice());
        let out = c.as_mut_slice();

        for i in 0..n {
            for j in 0..n {
                let mut sum = T::ZERO;
                for k in 0..n {
                    sum = T::mul_add_wrapping(sum, a[i * n + k], b[k * n + j]);
                }
                out[i * n + j] = sum;
            }
        }
        Ok(())
    }
}
