use std::fmt::Debug;

use crate::dtype::Element;
use crate::error::{KernelError, Result};
use crate::view::{MatrixView, MatrixViewMut};

/// Trait for square integer matrix multiply kernels.
///
/// Operands arrive as validated views, so implementations never see an
/// unchecked length. The kernel writes the whole of `c` and reads nothing
/// from it that it has not written first.
pub trait MultiplyKernel<T: Element>: Send + Sync + Debug {
    /// Returns the name of this kernel (e.g., "naive", "blocked").
    fn name(&self) -> &str;

    /// C = A · B with wrapping arithmetic.
    ///
    /// # Errors
    /// Returns `DimensionMismatch` if the three views disagree on N.
    fn multiply(
        &self,
        a: MatrixView<'_, T>,
        b: MatrixView<'_, T>,
        c: &mut MatrixViewMut<'_, T>,
    ) -> Result<()>;
}

/// Checks that all three operands share one N.
pub(crate) fn check_same_dim<T: Element>(
    a: &MatrixView<'_, T>,
    b: &MatrixView<'_, T>,
    c: &MatrixViewMut<'_, T>,
) -> Result<usize> {
    let n = a.n();
    for got in [b.n(), c.n()] {
        if got != n {
            return Err(KernelError::DimensionMismatch { expected: n, got });
        }
    }
    Ok(n)
}
