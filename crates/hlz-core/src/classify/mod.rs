//! Life zone classification pipeline.
//!
//! Stages in data-flow order: PET/precipitation ratio → nearest-centroid
//! zone search → subtropical disambiguation → band derivation → ecotone
//! tagging → override masks → code assembly. Every stage is a pure
//! function of one cell's inputs, so the grid is processed as independent
//! rectangular tiles merged into a single output raster.

pub mod bands;
pub mod ecotone;
pub mod masks;
pub mod nearest;
pub mod ratio;
pub mod subtropical;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::code::{assemble, NO_DATA_CODE, OUT_OF_BOUNDS_CODE};
use crate::error::HlzError;
use crate::grid::Grid;
use crate::tiling::{partition, run_tiles, Tile};
use crate::zones::ZoneTable;

use bands::{altitudinal_band, biotemp_band, POLAR_BIOTEMP_MAX_C};
use ecotone::{ecotone_code, ECOTONE_NONE};
use masks::{is_polar, outside_envelope};
use nearest::{log_coords, nearest_zone};
use ratio::pet_ratio;
use subtropical::disambiguate;

/// Run configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyConfig {
    /// Tag transitional life zones (ecotone digit 1–7). When false every
    /// eligible cell carries ecotone 0.
    pub compute_ecotones: bool,
    /// Tile height in rows; 0 means whole-grid.
    pub tile_rows: usize,
    /// Tile width in columns; 0 means whole-grid.
    pub tile_cols: usize,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            compute_ecotones: true,
            tile_rows: 512,
            tile_cols: 512,
        }
    }
}

/// Borrowed input surfaces for one run. All grids must share dimensions;
/// none are retained after the output raster is produced.
#[derive(Debug, Clone, Copy)]
pub struct ClimateInputs<'a> {
    /// Local (elevation-adjusted) biotemperature, °C.
    pub biotemp: &'a Grid<f32>,
    /// Sea-level biotemperature, °C.
    pub sea_level_biotemp: &'a Grid<f32>,
    /// Annual precipitation, mm/yr.
    pub precip: &'a Grid<f32>,
    /// Potential evapotranspiration, mm/yr.
    pub pet: &'a Grid<f32>,
    /// Externally supplied no-data mask; true cells code to 0.
    pub no_data: &'a Grid<bool>,
}

fn check_against<T>(
    name: &'static str,
    grid: &Grid<T>,
    width: usize,
    height: usize,
) -> Result<(), HlzError> {
    if grid.width != width || grid.height != height {
        return Err(HlzError::ShapeMismatch {
            name,
            expected: (width, height),
            found: (grid.width, grid.height),
        });
    }
    grid.check_shape(name)
}

impl ClimateInputs<'_> {
    fn validate(&self) -> Result<(usize, usize), HlzError> {
        let (w, h) = (self.biotemp.width, self.biotemp.height);
        self.biotemp.check_shape("biotemp")?;
        check_against("sea_level_biotemp", self.sea_level_biotemp, w, h)?;
        check_against("precip", self.precip, w, h)?;
        check_against("pet", self.pet, w, h)?;
        check_against("no_data", self.no_data, w, h)?;
        Ok((w, h))
    }
}

/// Classify every cell into a packed life zone code.
///
/// Deterministic: the output is bit-for-bit identical for any tile size,
/// tile shape, or worker count. A single undefined cell aborts the run
/// with its location rather than producing a partially defaulted raster.
pub fn classify(
    inputs: &ClimateInputs<'_>,
    table: &ZoneTable,
    config: &ClassifyConfig,
) -> Result<Grid<u32>, HlzError> {
    let (width, height) = inputs.validate()?;
    let tiles = partition(width, height, config.tile_cols, config.tile_rows);
    info!(
        width,
        height,
        tiles = tiles.len(),
        ecotones = config.compute_ecotones,
        "classifying grid"
    );

    let results = run_tiles(&tiles, |tile| classify_tile(tile, inputs, table, config))?;

    let mut out = Grid::filled(width, height, NO_DATA_CODE);
    for (tile, values) in tiles.iter().zip(results) {
        blit(&mut out, tile, &values);
    }
    Ok(out)
}

/// Copy one tile's row-major results into its disjoint output region.
fn blit(out: &mut Grid<u32>, tile: &Tile, values: &[u32]) {
    for local_row in 0..tile.rows {
        let src = &values[local_row * tile.cols..(local_row + 1) * tile.cols];
        let start = (tile.row0 + local_row) * out.width + tile.col0;
        out.data[start..start + tile.cols].copy_from_slice(src);
    }
}

/// Pure per-tile worker: classify every cell of `tile`, row-major.
fn classify_tile(
    tile: &Tile,
    inputs: &ClimateInputs<'_>,
    table: &ZoneTable,
    config: &ClassifyConfig,
) -> Result<Vec<u32>, HlzError> {
    debug!(
        row0 = tile.row0,
        col0 = tile.col0,
        rows = tile.rows,
        cols = tile.cols,
        "classifying tile"
    );
    let mut codes = Vec::with_capacity(tile.cells());
    for row in tile.row0..tile.row0 + tile.rows {
        for col in tile.col0..tile.col0 + tile.cols {
            codes.push(classify_cell(row, col, inputs, table, config)?);
        }
    }
    Ok(codes)
}

/// Classify a single cell.
///
/// Overrides apply in fixed precedence: the no-data mask wins over
/// everything, polar-desert eligibility is settled before the envelope
/// test, and only cells surviving all three reach the full code path.
fn classify_cell(
    row: usize,
    col: usize,
    inputs: &ClimateInputs<'_>,
    table: &ZoneTable,
    config: &ClassifyConfig,
) -> Result<u32, HlzError> {
    if inputs.no_data.get(row, col) {
        return Ok(NO_DATA_CODE);
    }

    let biotemp = inputs.biotemp.get(row, col);
    let sea_level = inputs.sea_level_biotemp.get(row, col);
    let precip = inputs.precip.get(row, col);
    let ratio = pet_ratio(inputs.pet.get(row, col), precip);

    // The polar band needs no zone search; warmer cells search first
    // because polar eligibility can also come from the filler rows.
    let zone = if biotemp <= POLAR_BIOTEMP_MAX_C {
        None
    } else {
        nearest_zone(log_coords(biotemp, precip, ratio), table.centers())
    };

    if is_polar(biotemp, zone, table) {
        let lat = band_or_degenerate(sea_level, row, col)?;
        let local = band_or_degenerate(biotemp, row, col)?;
        return Ok(assemble(
            table.polar_desert(),
            altitudinal_band(local, lat),
            lat,
            ECOTONE_NONE,
        ));
    }

    if outside_envelope(precip, ratio) {
        return Ok(OUT_OF_BOUNDS_CODE);
    }

    let zone = zone.ok_or(HlzError::NumericDegeneracy {
        row,
        col,
        reason: "no zone center at finite distance",
    })?;
    let veg_class = disambiguate(zone, biotemp, table);

    let lat = band_or_degenerate(sea_level, row, col)?;
    let local = band_or_degenerate(biotemp, row, col)?;
    let alt = altitudinal_band(local, lat);

    let eco = if config.compute_ecotones {
        ecotone_code(table.edge_row(veg_class), biotemp, precip, ratio)
    } else {
        ECOTONE_NONE
    };

    Ok(assemble(veg_class, alt, lat, eco))
}

fn band_or_degenerate(t: f32, row: usize, col: usize) -> Result<u8, HlzError> {
    biotemp_band(t).ok_or(HlzError::NumericDegeneracy {
        row,
        col,
        reason: "NaN biotemperature",
    })
}
