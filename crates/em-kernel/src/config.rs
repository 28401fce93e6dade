use crate::error::{KernelError, Result};

/// Block edge length used when the caller does not pick one.
pub const DEFAULT_TILE: usize = 16;

/// Largest worker pool a caller may request.
pub const MAX_THREADS: usize = 256;

/// Performance parameters of the blocked kernel.
///
/// Neither field affects the product, only how the work is ordered and
/// spread across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelConfig {
    /// Edge length T of the cubic (ib, jb, kb) blocks.
    pub tile: usize,
    /// Size of the fixed worker pool.
    pub threads: usize,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            tile: DEFAULT_TILE,
            threads: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
                .min(MAX_THREADS),
        }
    }
}

impl KernelConfig {
    pub fn new(tile: usize, threads: usize) -> Self {
        Self { tile, threads }
    }

    /// # Errors
    /// Returns `InvalidConfig` if either field is zero or `threads` exceeds
    /// [`MAX_THREADS`]. The check runs before any worker is spawned.
    pub fn validate(&self) -> Result<()> {
        if self.tile == 0 {
            return Err(KernelError::InvalidConfig("tile must be > 0".to_string()));
        }
        if self.threads == 0 {
            return Err(KernelError::InvalidConfig(
                "threads must be > 0".to_string(),
            ));
        }
        if self.threads > MAX_THREADS {
            return Err(KernelError::InvalidConfig(format!(
                "threads {} exceeds limit {}",
                self.threads, MAX_THREADS
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let c = KernelConfig::default();
        assert_eq!(c.tile, 16);
        assert!(c.threads >= 1);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_zero_fields_rejected() {
        assert!(KernelConfig::new(0, 4).validate().is_err());
        assert!(KernelConfig::new(16, 0).validate().is_err());
    }

    #[test]
    fn test_thread_cap() {
        assert!(KernelConfig::new(16, MAX_THREADS).validate().is_ok());
        assert!(matches!(
            KernelConfig::new(16, MAX_THREADS + 1).validate(),
            Err(KernelError::InvalidConfig(_))
        ));
        assert!(KernelConfig::default().threads <= MAX_THREADS);
    }
}
