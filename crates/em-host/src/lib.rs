//! `em-host` - Untrusted side of enclave-matmul.
//!
//! Generates operands, crosses the isolation boundary once per submission
//! and verifies the returned product against a locally computed reference.

pub mod error;
pub mod generator;
pub mod logging;
pub mod marshaller;
pub mod runtime;
pub mod verify;

pub use error::{HostError, Result};
pub use marshaller::{Marshaller, Report, ReferenceStrategy, SubmitConfig};
pub use runtime::{EnclaveRuntime, InProcessEnclave};
pub use verify::{Mismatch, Verdict};

/// Build an in-process runtime from `config` and submit once.
pub fn run_once(config: &SubmitConfig) -> Result<Report> {
    let marshaller = Marshaller::new(InProcessEnclave::new(config.params), config.reference);
    marshaller.submit(config.n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_once_small() {
        let config = SubmitConfig {
            n: 33,
            ..SubmitConfig::default()
        };
        let report = run_once(&config).unwrap();
        assert!(report.is_match());
    }

    #[test]
    fn test_run_once_zero_dimension() {
        let config = SubmitConfig {
            n: 0,
            ..SubmitConfig::default()
        };
        assert!(run_once(&config).is_err());
    }
}
