use std::fmt;

use em_kernel::{KernelConfig, KernelError, DEFAULT_TILE};

/// Status codes returned across the isolation boundary.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmStatus {
    Ok = 0,
    /// A handle, length, dimension or parameter failed validation. Nothing
    /// was written to the output buffer.
    ErrorInvalidArgument = 1,
    /// The isolated context could not be entered or exited.
    ErrorBoundaryCall = 2,
    ErrorInternal = 3,
}

impl EmStatus {
    pub fn is_ok(&self) -> bool {
        *self == EmStatus::Ok
    }
}

impl fmt::Display for EmStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmStatus::Ok => write!(f, "ok"),
            EmStatus::ErrorInvalidArgument => write!(f, "invalid argument"),
            EmStatus::ErrorBoundaryCall => write!(f, "boundary call failure"),
            EmStatus::ErrorInternal => write!(f, "internal error"),
        }
    }
}

impl From<&KernelError> for EmStatus {
    fn from(e: &KernelError) -> Self {
        if e.is_invalid_argument() {
            EmStatus::ErrorInvalidArgument
        } else {
            EmStatus::ErrorInternal
        }
    }
}

/// Kernel parameters passed across the boundary.
///
/// A zero field selects the default for that field.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EmKernelParams {
    /// Block edge length; 0 means 16.
    pub tile: u32,
    /// Worker count; 0 means the available parallelism. Values above
    /// `em_kernel::MAX_THREADS` are rejected.
    pub threads: u32,
}

impl EmKernelParams {
    pub fn new(tile: u32, threads: u32) -> Self {
        Self { tile, threads }
    }

    /// Resolve zero fields to their defaults.
    pub fn to_config(self) -> KernelConfig {
        let defaults = KernelConfig::default();
        KernelConfig {
            tile: match self.tile {
                0 => DEFAULT_TILE,
                t => t as usize,
            },
            threads: match self.threads {
                0 => defaults.threads,
                t => t as usize,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_defaults() {
        let cfg = EmKernelParams::default().to_config();
        assert_eq!(cfg.tile, 16);
        assert!(cfg.threads >= 1);
    }

    #[test]
    fn test_params_explicit() {
        let cfg = EmKernelParams::new(4, 2).to_config();
        assert_eq!(cfg, KernelConfig::new(4, 2));
    }

    #[test]
    fn test_status_from_kernel_error() {
        assert_eq!(
            EmStatus::from(&KernelError::ZeroDimension),
            EmStatus::ErrorInvalidArgument
        );
        assert_eq!(
            EmStatus::from(&KernelError::ThreadPool("spawn".to_string())),
            EmStatus::ErrorInternal
        );
    }
}
