//! Rectangular tile partitioning for memory-bounded grid processing.
//!
//! Global rasters run to ~10^9 cells. Per-tile workers keep peak memory
//! bounded, and because tiles never overlap they parallelize without
//! locking: each worker's result is written into a disjoint region of the
//! output grid.

#[cfg(feature = "threading")]
use rayon::prelude::*;

use crate::error::HlzError;

/// One rectangular region of the grid, in cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub row0: usize,
    pub col0: usize,
    pub rows: usize,
    pub cols: usize,
}

impl Tile {
    pub fn cells(&self) -> usize {
        self.rows * self.cols
    }
}

/// Cover a `width × height` grid with non-overlapping tiles of at most
/// `tile_cols × tile_rows` cells, in row-major tile order. Edge tiles
/// shrink to fit; a tile dimension of 0 means whole-grid along that axis.
pub fn partition(width: usize, height: usize, tile_cols: usize, tile_rows: usize) -> Vec<Tile> {
    let tc = if tile_cols == 0 { width.max(1) } else { tile_cols };
    let tr = if tile_rows == 0 { height.max(1) } else { tile_rows };
    let mut tiles = Vec::new();
    let mut row0 = 0;
    while row0 < height {
        let rows = tr.min(height - row0);
        let mut col0 = 0;
        while col0 < width {
            let cols = tc.min(width - col0);
            tiles.push(Tile { row0, col0, rows, cols });
            col0 += cols;
        }
        row0 += rows;
    }
    tiles
}

/// Run a pure worker over every tile and collect per-tile results in tile
/// order. The first failing tile aborts the whole run. With the
/// `threading` feature the workers run on the rayon pool; result order
/// and content are identical either way.
pub fn run_tiles<T, F>(tiles: &[Tile], worker: F) -> Result<Vec<Vec<T>>, HlzError>
where
    T: Send,
    F: Fn(&Tile) -> Result<Vec<T>, HlzError> + Sync,
{
    #[cfg(feature = "threading")]
    {
        tiles.par_iter().map(|t| worker(t)).collect()
    }
    #[cfg(not(feature = "threading"))]
    {
        tiles.iter().map(|t| worker(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_covers_every_cell_exactly_once() {
        let (w, h) = (10usize, 7usize);
        let tiles = partition(w, h, 4, 3);
        let mut seen = vec![0u8; w * h];
        for t in &tiles {
            for r in t.row0..t.row0 + t.rows {
                for c in t.col0..t.col0 + t.cols {
                    seen[r * w + c] += 1;
                }
            }
        }
        assert!(
            seen.iter().all(|&n| n == 1),
            "every cell must belong to exactly one tile"
        );
    }

    #[test]
    fn edge_tiles_shrink_to_fit() {
        let tiles = partition(10, 7, 4, 3);
        // 3 columns of tiles (4, 4, 2 wide) by 3 rows (3, 3, 1 tall).
        assert_eq!(tiles.len(), 9);
        let last = tiles[tiles.len() - 1];
        assert_eq!((last.rows, last.cols), (1, 2));
    }

    #[test]
    fn zero_tile_size_means_whole_grid() {
        let tiles = partition(10, 7, 0, 0);
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].cells(), 70);
    }

    #[test]
    fn run_tiles_preserves_tile_order() {
        let tiles = partition(6, 6, 2, 2);
        let results = run_tiles(&tiles, |t| Ok(vec![t.row0 * 10 + t.col0])).unwrap();
        let flat: Vec<usize> = results.into_iter().flatten().collect();
        assert_eq!(flat, vec![0, 2, 4, 20, 22, 24, 40, 42, 44]);
    }

    #[test]
    fn one_failing_tile_aborts_the_run() {
        let tiles = partition(4, 4, 2, 2);
        let result: Result<Vec<Vec<u32>>, _> = run_tiles(&tiles, |t| {
            if t.row0 == 2 && t.col0 == 2 {
                Err(HlzError::NumericDegeneracy {
                    row: t.row0,
                    col: t.col0,
                    reason: "test",
                })
            } else {
                Ok(vec![0; t.cells()])
            }
        });
        assert!(result.is_err());
    }
}
