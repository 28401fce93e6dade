use em_kernel::{
    BlockedKernel, Element, KernelError, Matrix, MatrixView, MatrixViewMut, MultiplyKernel,
    Result,
};
use tracing::debug;

use crate::types::EmKernelParams;

/// The isolated side of a boundary call.
///
/// Caller memory is never computed on in place. Operands are copied into
/// buffers the context owns, the product is built in a context-owned
/// buffer, and the caller's output is written only once the whole product
/// exists. A failed call leaves the caller's output untouched.
#[derive(Debug)]
pub struct IsolatedContext {
    kernel: BlockedKernel,
}

impl IsolatedContext {
    pub fn new(params: EmKernelParams) -> Result<Self> {
        Ok(Self {
            kernel: BlockedKernel::new(params.to_config())?,
        })
    }

    pub fn kernel(&self) -> &BlockedKernel {
        &self.kernel
    }

    /// Copy in `a` and `b`, multiply, and copy the product out to `c`.
    ///
    /// # Errors
    /// Returns `DimensionMismatch` if the views disagree on N, or any
    /// kernel error. `c` is not written on error.
    pub fn matprod<T: Element>(
        &self,
        a: MatrixView<'_, T>,
        b: MatrixView<'_, T>,
        c: &mut MatrixViewMut<'_, T>,
    ) -> Result<()> {
        let n = a.n();
        for got in [b.n(), c.n()] {
            if got != n {
                return Err(KernelError::DimensionMismatch { expected: n, got });
            }
        }

        let a_in = Matrix::from_view(&a)?;
        let b_in = Matrix::from_view(&b)?;
        let mut product = Matrix::zeros(n)?;
        debug!(n, bytes = a_in.byte_len(), "operands copied in");

        self.kernel
            .multiply(a_in.view(), b_in.view(), &mut product.view_mut())?;

        c.as_mut_slice().copy_from_slice(product.as_slice());
        debug!(n, "product copied out");
        Ok(())
    }
}
