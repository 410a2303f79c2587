//! Holdridge life zone classification core.
//!
//! Classifies dense climate rasters — biotemperature, sea-level
//! biotemperature, precipitation, and PET — into packed integer life zone
//! codes by nearest-centroid search on the Holdridge hexagon lattice in
//! log2 climate space, and decodes those codes back into descriptive
//! names. Grids are processed as independent rectangular tiles, so
//! peak memory stays bounded on global rasters and the work parallelizes
//! without changing the output.

pub mod classify;
pub mod code;
pub mod error;
pub mod grid;
pub mod tiling;
pub mod zones;

pub use classify::{classify, ClassifyConfig, ClimateInputs};
pub use code::{
    assemble, decode, decode_report, CodeParts, NO_DATA_CODE, OUT_OF_BOUNDS_CODE,
};
pub use error::HlzError;
pub use grid::Grid;
pub use zones::{ZoneBoundaries, ZoneDefinition, ZoneTable};
