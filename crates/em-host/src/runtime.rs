use std::ffi::CStr;
use std::fmt::Debug;

use em_enclave::{
    em_free_string, em_last_error, em_matprod_with_params, set_last_error, EmKernelParams,
    EmStatus,
};
use tracing::warn;

/// The seam between the marshaller and whatever hosts the isolated context.
///
/// One call is one boundary crossing. The runtime hands the three buffers
/// and the caller's byte-length claim to the context and reports the
/// status it returns.
pub trait EnclaveRuntime: Send + Sync + Debug {
    /// Returns the name of this runtime (e.g., "in-process").
    fn name(&self) -> &str;

    /// Cross the boundary once to compute `c = a · b`.
    fn matprod(
        &self,
        a: &[i32],
        b: &[i32],
        c: &mut [i32],
        byte_len: usize,
        n: usize,
    ) -> EmStatus;

    /// Detail for the most recent failed call, if the runtime keeps one.
    fn last_error(&self) -> Option<String> {
        None
    }
}

/// Runs the isolated context in this process through its C ABI.
#[derive(Debug, Clone, Default)]
pub struct InProcessEnclave {
    params: EmKernelParams,
}

impl InProcessEnclave {
    pub fn new(params: EmKernelParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> EmKernelParams {
        self.params
    }
}

impl EnclaveRuntime for InProcessEnclave {
    fn name(&self) -> &str {
        "in-process"
    }

    fn matprod(
        &self,
        a: &[i32],
        b: &[i32],
        c: &mut [i32],
        byte_len: usize,
        n: usize,
    ) -> EmStatus {
        // The context trusts nothing about `byte_len`, but the handles we
        // give it must really span that many bytes.
        let shortest = [a.len(), b.len(), c.len()]
            .into_iter()
            .min()
            .unwrap_or(0)
            .saturating_mul(std::mem::size_of::<i32>());
        if byte_len > shortest {
            warn!(byte_len, shortest, "claim exceeds buffer, not crossing");
            set_last_error(format!(
                "claimed byte length {byte_len} exceeds buffer of {shortest} bytes"
            ));
            return EmStatus::ErrorInvalidArgument;
        }
        unsafe {
            em_matprod_with_params(
                a.as_ptr(),
                b.as_ptr(),
                c.as_mut_ptr(),
                byte_len,
                n,
                self.params,
            )
        }
    }

    fn last_error(&self) -> Option<String> {
        let ptr = em_last_error();
        if ptr.is_null() {
            return None;
        }
        let msg = unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned();
        unsafe { em_free_string(ptr) };
        Some(msg)
    }
}
