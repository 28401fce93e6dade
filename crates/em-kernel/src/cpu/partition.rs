//! Assignment of result rows to workers.
//!
//! The blocked kernel hands each worker one band of rows and lets it write
//! nothing outside that band. Bands are built here and nowhere else.

use std::cmp::min;
use std::ops::Range;

/// Iteration bounds of one block edge: `start..min(start + tile, n)`.
///
/// The last block along a dimension is clamped when `n` is not a multiple
/// of `tile`.
#[inline(always)]
pub fn block_range(start: usize, tile: usize, n: usize) -> Range<usize> {
    start..min(start.saturating_add(tile), n)
}

/// Split rows `0..n` into at most `workers` contiguous, non-overlapping bands.
///
/// Every band starts on a multiple of `tile`, so an `ib` block never
/// straddles two bands. The bands cover `0..n` exactly. `tile` and
/// `workers` are treated as at least 1.
pub fn row_bands(n: usize, tile: usize, workers: usize) -> Vec<Range<usize>> {
    if n == 0 {
        return Vec::new();
    }
    let tile = tile.max(1);
    let workers = workers.max(1);

    let n_blocks = n.div_ceil(tile);
    let blocks_per_band = n_blocks.div_ceil(workers);
    let band_rows = blocks_per_band.saturating_mul(tile);

    (0..n)
        .step_by(band_rows)
        .map(|start| start..min(start.saturating_add(band_rows), n))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_partition(n: usize, tile: usize, workers: usize) {
        let bands = row_bands(n, tile, workers);
        assert!(!bands.is_empty());
        assert!(bands.len() <= workers.max(1));
        assert_eq!(bands[0].start, 0);
        assert_eq!(bands.last().unwrap().end, n);
        for pair in bands.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        for band in &bands {
            assert!(band.start < band.end);
            assert_eq!(band.start % tile.max(1), 0);
        }
    }

    #[test]
    fn test_block_range_clamps() {
        assert_eq!(block_range(0, 16, 40), 0..16);
        assert_eq!(block_range(32, 16, 40), 32..40);
        assert_eq!(block_range(0, 16, 5), 0..5);
    }

    #[test]
    fn test_bands_cover_exactly() {
        for n in [1, 2, 7, 16, 17, 33, 100, 1000] {
            for tile in [1, 4, 16, 32] {
                for workers in [1, 2, 3, 8, 64] {
                    assert_partition(n, tile, workers);
                }
            }
        }
    }

    #[test]
    fn test_single_worker_one_band() {
        assert_eq!(row_bands(50, 16, 1), vec![0..50]);
    }

    #[test]
    fn test_bands_tile_aligned() {
        // 5 blocks of 4 rows over 2 workers: 3 blocks then 2 (clamped).
        assert_eq!(row_bands(18, 4, 2), vec![0..12, 12..18]);
    }

    #[test]
    fn test_more_workers_than_blocks() {
        assert_eq!(row_bands(10, 16, 8), vec![0..10]);
        assert_eq!(row_bands(3, 1, 8), vec![0..1, 1..2, 2..3]);
    }

    #[test]
    fn test_empty() {
        assert!(row_bands(0, 16, 4).is_empty());
    }
}
