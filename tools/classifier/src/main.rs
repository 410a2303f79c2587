//! Life zone classification front-end: loads climate surface grids, runs
//! the classifier, writes the coded raster.
//!
//! Grids travel as serialized JSON (`{ data, width, height }`). When no
//! PET raster is supplied the classical biotemperature estimate is used;
//! when no no-data mask is supplied one is derived from non-finite input
//! cells, which is the contract the core expects upstream to honor.

use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hlz_core::{classify, ClassifyConfig, ClimateInputs, Grid, ZoneTable};

/// Classical PET estimate per degree of biotemperature, mm/yr/°C.
const PET_PER_BIOTEMP_C: f32 = 58.93;

#[derive(Parser, Debug)]
#[command(
    name = "classifier",
    about = "Classify climate rasters into Holdridge life zone codes"
)]
struct Args {
    /// Local (elevation-adjusted) biotemperature grid, JSON.
    #[arg(long)]
    biotemp: String,

    /// Sea-level biotemperature grid, JSON.
    #[arg(long)]
    sea_level_biotemp: String,

    /// Annual precipitation grid (mm/yr), JSON.
    #[arg(long)]
    precip: String,

    /// PET grid (mm/yr), JSON. Defaults to the classical
    /// 58.93 × biotemperature estimate.
    #[arg(long)]
    pet: Option<String>,

    /// No-data mask grid (bool), JSON. Defaults to flagging non-finite
    /// cells of the climate surfaces.
    #[arg(long)]
    no_data: Option<String>,

    /// Zone table JSON; defaults to the built-in Holdridge lattice.
    #[arg(long)]
    zone_table: Option<String>,

    /// Skip transitional-zone tagging (ecotone digit forced to 0).
    #[arg(long)]
    no_ecotones: bool,

    /// Tile edge length in cells.
    #[arg(long, default_value_t = 512)]
    tile_size: usize,

    /// Output coded raster, JSON.
    #[arg(short, long)]
    output: String,
}

fn load_f32_grid(path: &str) -> Result<Grid<f32>> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {path}"))
}

fn load_bool_grid(path: &str) -> Result<Grid<bool>> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {path}"))
}

/// Mask every cell where any climate surface is non-finite.
fn derive_no_data(surfaces: &[&Grid<f32>]) -> Grid<bool> {
    let mut mask = Grid::filled(surfaces[0].width, surfaces[0].height, false);
    for grid in surfaces {
        for (m, v) in mask.data.iter_mut().zip(&grid.data) {
            *m = *m || !v.is_finite();
        }
    }
    mask
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    let biotemp = load_f32_grid(&args.biotemp)?;
    let sea_level_biotemp = load_f32_grid(&args.sea_level_biotemp)?;
    let precip = load_f32_grid(&args.precip)?;

    let pet = match &args.pet {
        Some(path) => load_f32_grid(path)?,
        None => Grid {
            data: biotemp.data.iter().map(|&t| PET_PER_BIOTEMP_C * t).collect(),
            width: biotemp.width,
            height: biotemp.height,
        },
    };

    let no_data = match &args.no_data {
        Some(path) => load_bool_grid(path)?,
        None => derive_no_data(&[&biotemp, &sea_level_biotemp, &precip, &pet]),
    };

    let table = match &args.zone_table {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
            ZoneTable::from_json_str(&text).with_context(|| format!("loading {path}"))?
        }
        None => ZoneTable::holdridge(),
    };

    let config = ClassifyConfig {
        compute_ecotones: !args.no_ecotones,
        tile_rows: args.tile_size,
        tile_cols: args.tile_size,
    };
    let inputs = ClimateInputs {
        biotemp: &biotemp,
        sea_level_biotemp: &sea_level_biotemp,
        precip: &precip,
        pet: &pet,
        no_data: &no_data,
    };

    let codes = classify(&inputs, &table, &config)?;
    info!(
        width = codes.width,
        height = codes.height,
        "classification complete"
    );

    let text = serde_json::to_string(&codes).context("serializing output raster")?;
    fs::write(&args.output, text).with_context(|| format!("writing {}", args.output))?;
    eprintln!(
        "Classified {}x{} cells -> {}",
        codes.width, codes.height, args.output
    );
    Ok(())
}
