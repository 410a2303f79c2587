//! Error types for the classification core.

use thiserror::Error;

/// Errors surfaced by the classification core.
///
/// The run is a deterministic offline batch: every variant is fatal and
/// aborts the run, with the failing cell reported where one exists.
#[derive(Debug, Error)]
pub enum HlzError {
    /// Input rasters must share one width × height; nothing broadcasts.
    #[error("raster `{name}` has shape {found:?}, expected {expected:?}")]
    ShapeMismatch {
        name: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },

    /// A grid's backing buffer disagrees with its declared dimensions.
    #[error("raster `{name}` holds {len} cells for a {width}x{height} grid")]
    MalformedGrid {
        name: &'static str,
        width: usize,
        height: usize,
        len: usize,
    },

    /// The zone table cannot support a classification run: too few rows,
    /// a short name list, non-positive edges, or unordered boundary rows.
    #[error("invalid zone table: {0}")]
    InvalidZoneTable(String),

    /// A cell escaped the upstream no-data contract and has no defined
    /// classification.
    #[error("cell ({row}, {col}): {reason}")]
    NumericDegeneracy {
        row: usize,
        col: usize,
        reason: &'static str,
    },

    /// A decomposed code field indexes outside its name table.
    #[error("code {code}: {what} {index} outside table of {len}")]
    DecodeIndexOutOfRange {
        code: u32,
        what: &'static str,
        index: usize,
        len: usize,
    },
}
