use em_enclave::EmKernelParams;
use em_kernel::{BlockedKernel, KernelConfig, KernelError, Matrix, NaiveKernel, DEFAULT_TILE};
use tracing::{debug, error, info};

use crate::error::{HostError, Result};
use crate::generator;
use crate::runtime::EnclaveRuntime;
use crate::verify::{self, Verdict};

/// How the host computes the product it checks the enclave against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferenceStrategy {
    /// Plain triple loop.
    Naive,
    /// The blocked algorithm on a single thread with the default tile.
    #[default]
    Blocked,
}

/// Parameters for one run of the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitConfig {
    /// Matrix dimension N.
    pub n: usize,
    /// Kernel parameters forwarded across the boundary.
    pub params: EmKernelParams,
    pub reference: ReferenceStrategy,
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            n: 1000,
            params: EmKernelParams::default(),
            reference: ReferenceStrategy::default(),
        }
    }
}

/// Result of a completed submission.
#[derive(Debug, Clone)]
pub struct Report {
    pub n: usize,
    /// The product returned through the boundary.
    pub product: Matrix<i32>,
    pub verdict: Verdict<i32>,
}

impl Report {
    pub fn is_match(&self) -> bool {
        self.verdict.is_match()
    }
}

/// Owns the operands on the untrusted side and makes exactly one boundary
/// call per submission.
#[derive(Debug)]
pub struct Marshaller<R: EnclaveRuntime> {
    runtime: R,
    reference: ReferenceStrategy,
}

impl<R: EnclaveRuntime> Marshaller<R> {
    pub fn new(runtime: R, reference: ReferenceStrategy) -> Self {
        Self { runtime, reference }
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    /// Generate the deterministic operands for `n` and submit them.
    pub fn submit(&self, n: usize) -> Result<Report> {
        let a = generator::operand_a(n)?;
        let b = generator::operand_b(n)?;
        self.submit_matrices(&a, &b)
    }

    /// Send `a` and `b` across the boundary and verify the product.
    ///
    /// The byte length handed to the runtime is computed here from the
    /// operand buffers. A non-success status ends the submission before
    /// the result buffer is read.
    ///
    /// # Errors
    /// Returns `BoundaryCall` on a failed crossing, or `Kernel` if the
    /// operands disagree on N or the reference cannot be computed.
    pub fn submit_matrices(&self, a: &Matrix<i32>, b: &Matrix<i32>) -> Result<Report> {
        let n = a.n();
        if b.n() != n {
            return Err(KernelError::DimensionMismatch {
                expected: n,
                got: b.n(),
            }
            .into());
        }
        let byte_len = a.byte_len();
        let mut c = Matrix::zeros(n)?;

        info!(n, byte_len, runtime = self.runtime.name(), "executing boundary call");
        let status = self
            .runtime
            .matprod(a.as_slice(), b.as_slice(), c.as_mut_slice(), byte_len, n);
        if !status.is_ok() {
            let detail = self.runtime.last_error();
            error!(%status, detail = detail.as_deref().unwrap_or(""), "boundary call failed");
            return Err(HostError::BoundaryCall { status, detail });
        }

        let expected = self.reference_product(a, b)?;
        let verdict = verify::verify(&expected, &c)?;
        match &verdict {
            Verdict::Match => info!(n, "calculated matrix matched"),
            Verdict::Mismatch(m) => error!(
                row = m.row,
                col = m.col,
                expected = m.expected,
                actual = m.actual,
                "calculated matrix differed"
            ),
        }

        Ok(Report {
            n,
            product: c,
            verdict,
        })
    }

    fn reference_product(&self, a: &Matrix<i32>, b: &Matrix<i32>) -> Result<Matrix<i32>> {
        debug!(strategy = ?self.reference, "computing reference product");
        let product = match self.reference {
            ReferenceStrategy::Naive => a.multiply(b, &NaiveKernel::new())?,
            ReferenceStrategy::Blocked => {
                let kernel = BlockedKernel::new(KernelConfig::new(DEFAULT_TILE, 1))?;
                a.multiply(b, &kernel)?
            }
        };
        Ok(product)
    }
}
