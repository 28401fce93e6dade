use em_enclave::EmStatus;
use em_kernel::KernelError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostError {
    #[error(
        "boundary call failed ({status}): {}",
        .detail.as_deref().unwrap_or("no detail")
    )]
    BoundaryCall {
        status: EmStatus,
        detail: Option<String>,
    },
    #[error("kernel error: {0}")]
    Kernel(#[from] KernelError),
}

pub type Result<T> = std::result::Result<T, HostError>;
