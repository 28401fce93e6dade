use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    #[error("claimed byte length {claimed} does not match expected {expected}")]
    LengthMismatch { claimed: usize, expected: usize },
    #[error("matrix dimension must be positive")]
    ZeroDimension,
    #[error("dimension {n} overflows when squared with element size {elem_size}")]
    DimensionOverflow { n: usize, elem_size: usize },
    #[error("dimension mismatch: expected N={expected}, got N={got}")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("null {0} buffer")]
    NullPointer(&'static str),
    #[error("misaligned {0} buffer")]
    Misaligned(&'static str),
    #[error("output buffer overlaps an input buffer")]
    Aliased,
    #[error("invalid kernel config: {0}")]
    InvalidConfig(String),
    #[error("thread pool: {0}")]
    ThreadPool(String),
}

impl KernelError {
    /// Returns true for errors caused by malformed boundary input.
    ///
    /// These are the failures a caller can fix by passing different handles,
    /// lengths or parameters; everything else is an internal failure.
    pub fn is_invalid_argument(&self) -> bool {
        !matches!(self, KernelError::ThreadPool(_))
    }
}

impl From<rayon::ThreadPoolBuildError> for KernelError {
    fn from(e: rayon::ThreadPoolBuildError) -> Self {
        KernelError::ThreadPool(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, KernelError>;
