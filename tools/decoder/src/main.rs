//! Code → name reporting over a classified raster.

use std::collections::BTreeMap;
use std::fs;

use anyhow::{bail, Context, Result};
use clap::Parser;

use hlz_core::{decode_report, Grid, ZoneTable};

#[derive(Parser, Debug)]
#[command(
    name = "decoder",
    about = "Decode life zone codes into descriptive names"
)]
struct Args {
    /// Coded raster JSON to report on.
    #[arg(short, long)]
    input: Option<String>,

    /// Comma-separated code list, as an alternative to --input.
    #[arg(long)]
    codes: Option<String>,

    /// Zone table JSON; defaults to the built-in Holdridge lattice.
    #[arg(long)]
    zone_table: Option<String>,

    /// Also print per-code cell counts (raster input only).
    #[arg(long)]
    histogram: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let table = match &args.zone_table {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
            ZoneTable::from_json_str(&text).with_context(|| format!("loading {path}"))?
        }
        None => ZoneTable::holdridge(),
    };

    let mut counts: Option<BTreeMap<u32, usize>> = None;
    let codes: Vec<u32> = if let Some(path) = &args.input {
        let text = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
        let grid: Grid<u32> =
            serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;
        let mut tally = BTreeMap::new();
        for &code in &grid.data {
            *tally.entry(code).or_insert(0usize) += 1;
        }
        let distinct = tally.keys().copied().collect();
        counts = Some(tally);
        distinct
    } else if let Some(list) = &args.codes {
        list.split(',')
            .map(|s| {
                s.trim()
                    .parse::<u32>()
                    .with_context(|| format!("bad code `{s}`"))
            })
            .collect::<Result<_>>()?
    } else {
        bail!("either --input or --codes is required");
    };

    let report = decode_report(&codes, &table)?;
    for (code, name) in &report {
        match (&counts, args.histogram) {
            (Some(tally), true) => {
                let n = tally.get(code).copied().unwrap_or(0);
                println!("{code}\t{n}\t{name}");
            }
            _ => println!("{code}\t{name}"),
        }
    }
    Ok(())
}
