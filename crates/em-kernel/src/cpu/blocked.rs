// Cache-blocked, row-band parallel multiply.
//
// The index space is cut into T x T x T blocks visited in (ib, jb, kb) order,
// and inside a block in (i, j, k) order. Work is distributed along ib: every
// worker owns one contiguous band of result rows (see `partition::row_bands`)
// and writes only there, so the result needs no lock.

use std::ops::Range;

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::backend::{check_same_dim, MultiplyKernel};
use crate::config::KernelConfig;
use crate::cpu::partition::{block_range, row_bands};
use crate::dtype::Element;
use crate::error::Result;
use crate::view::{MatrixView, MatrixViewMut};

/// Blocked multiply kernel backed by a fixed-size worker pool.
///
/// The pool is built once with exactly `config.threads` workers and reused
/// for every call. A call runs two parallel phases over the same row bands:
/// zeroing, then multiplying. The second phase starts only after every
/// zeroing task has joined.
#[derive(Debug)]
pub struct BlockedKernel {
    config: KernelConfig,
    pool: rayon::ThreadPool,
}

impl BlockedKernel {
    /// # Errors
    /// Returns `InvalidConfig` for a zero tile or thread count, or
    /// `ThreadPool` if the workers cannot be spawned.
    pub fn new(config: KernelConfig) -> Result<Self> {
        config.validate()?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .thread_name(|i| format!("em-kernel-{i}"))
            .build()?;
        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &KernelConfig {
        &self.config
    }
}

/// Carve `out` into one mutable slice per band.
///
/// The slices come from successive `split_at_mut` calls, so the borrow
/// checker itself guarantees that no two bands overlap.
fn split_bands<'a, T>(
    mut out: &'a mut [T],
    bands: &[Range<usize>],
    n: usize,
) -> Vec<(Range<usize>, &'a mut [T])> {
    let mut parts = Vec::with_capacity(bands.len());
    for band in bands {
        let (head, tail) = std::mem::take(&mut out).split_at_mut(band.len() * n);
        parts.push((band.clone(), head));
        out = tail;
    }
    parts
}

/// Accumulate every (ib, jb, kb) block whose ib lies in `rows`.
///
/// `band` holds result rows `rows.start..rows.end`, already zeroed.
fn multiply_band<T: Element>(
    a: &[T],
    b: &[T],
    band: &mut [T],
    rows: Range<usize>,
    n: usize,
    tile: usize,
) {
    for ib in rows.clone().step_by(tile) {
        for jb in (0..n).step_by(tile) {
            for kb in (0..n).step_by(tile) {
                for i in block_range(ib, tile, n) {
                    let local = (i - rows.start) * n;
                    let c_row = &mut band[local..local + n];
                    let a_row = &a[i * n..(i + 1) * n];
                    for j in block_range(jb, tile, n) {
                        let mut acc = c_row[j];
                        for k in block_range(kb, tile, n) {
                            acc = T::mul_add_wrapping(acc, a_row[k], b[k * n + j]);
                        }
                        c_row[j] = acc;
                    }
                }
            }
        }
    }
}

impl<T: Element> MultiplyKernel<T> for BlockedKernel {
    fn name(&self) -> &str {
        "blocked"
    }

    fn multiply(
        &self,
        a: MatrixView<'_, T>,
        b: MatrixView<'_, T>,
        c: &mut MatrixViewMut<'_, T>,
    ) -> Result<()> {
        let n = check_same_dim(&a, &b, c)?;
        let tile = self.config.tile;
        let bands = row_bands(n, tile, self.config.threads);
        debug!(
            n,
            tile,
            threads = self.config.threads,
            bands = bands.len(),
            "blocked multiply"
        );

        let (a, b) = (a.as_slice(), b.as_slice());
        let out = c.as_mut_slice();

        // Phase 1: zero. `install` returns only after every task has joined,
        // which is the barrier in front of phase 2.
        self.pool.install(|| {
            split_bands(&mut *out, &bands, n)
                .into_par_iter()
                .for_each(|(_, band)| band.fill(T::ZERO));
        });

        // Phase 2: multiply, one band per task.
        self.pool.install(|| {
            split_bands(&mut *out, &bands, n)
                .into_par_iter()
                .for_each(|(rows, band)| {
                    trace!(start = rows.start, end = rows.end, "row band");
                    multiply_band(a, b, band, rows, n, tile);
                });
        });

        Ok(())
    }
}
