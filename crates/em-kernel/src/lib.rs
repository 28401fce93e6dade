//! `em-kernel` - Trusted integer matrix multiply kernel for enclave-matmul.
//!
//! This crate provides:
//! - Validated `MatrixView` / `MatrixViewMut` wrappers, the only way a caller
//!   buffer and its claimed length reach the kernel
//! - An owned, explicitly sized `Matrix` buffer
//! - A `MultiplyKernel` trait with a naive reference kernel and a cache-blocked
//!   kernel that runs on a fixed-size worker pool
//! - Row-band partitioning for race-free parallel writes

pub mod backend;
pub mod config;
pub mod cpu;
pub mod dtype;
pub mod error;
pub mod matrix;
pub mod shape;
pub mod view;

// Re-export primary types at the crate root for convenience.
pub use backend::MultiplyKernel;
pub use config::{KernelConfig, DEFAULT_TILE, MAX_THREADS};
pub use cpu::{BlockedKernel, NaiveKernel};
pub use dtype::{DType, Element};
pub use error::{KernelError, Result};
pub use matrix::Matrix;
pub use shape::SquareShape;
pub use view::{ensure_disjoint, MatrixView, MatrixViewMut};
