//! Life zone reference table.
//!
//! An ordered list of lattice rows — lower edges of each hexagon along the
//! biotemperature, precipitation, and PET-ratio axes — plus a parallel
//! physiognomy name list. Row position is the 1-based veg-class index.
//! Loaded once per run and immutable afterwards.

use serde::{Deserialize, Serialize};

use crate::classify::nearest::{BIOTEMP_LOG_NORM, PET_RATIO_LOG_NORM, PRECIP_LOG_NORM};
use crate::error::HlzError;

/// One row of the life zone lattice: lower edges of the hexagon along each
/// climate axis, in native units (°C, mm/yr, dimensionless ratio).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneDefinition {
    pub biotemp_edge: f32,
    pub precip_edge: f32,
    pub pet_ratio_edge: f32,
}

/// The three semantically named boundary rows every range rule derives
/// from, 1-based like all veg-class indices. Part of the table definition,
/// validated at load, so a reordered table cannot silently shift the
/// warm-temperate span, the search limit, or the subtropical block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneBoundaries {
    pub warm_temperate_desert: usize,
    pub warm_temperate_rain_forest: usize,
    pub tropical_rain_forest_limit: usize,
}

/// Validated, immutable zone reference data.
#[derive(Debug, Clone)]
pub struct ZoneTable {
    rows: Vec<ZoneDefinition>,
    names: Vec<String>,
    boundaries: ZoneBoundaries,
    /// Log2-space hexagon centers for the search rows,
    /// `rows[..tropical_rain_forest_limit]`.
    centers: Vec<[f64; 3]>,
    /// Last row (1-based, inclusive) of the polar filler run: rows after
    /// the first that share its biotemperature edge. Always overridden to
    /// polar desert by the masks.
    polar_filler_end: usize,
}

#[derive(Deserialize)]
struct ZoneTableFile {
    rows: Vec<ZoneDefinition>,
    names: Vec<String>,
    boundaries: ZoneBoundaries,
}

impl ZoneTable {
    /// Build and validate a table from its parts.
    pub fn new(
        rows: Vec<ZoneDefinition>,
        names: Vec<String>,
        boundaries: ZoneBoundaries,
    ) -> Result<Self, HlzError> {
        let b = boundaries;
        if b.warm_temperate_desert < 2
            || b.warm_temperate_desert >= b.warm_temperate_rain_forest
            || b.warm_temperate_rain_forest >= b.tropical_rain_forest_limit
        {
            return Err(HlzError::InvalidZoneTable(format!(
                "boundary rows out of order: {b:?}"
            )));
        }
        let offset = b.tropical_rain_forest_limit + 1 - b.warm_temperate_desert;
        let max_veg = b.warm_temperate_rain_forest + offset;
        if rows.len() < max_veg {
            return Err(HlzError::InvalidZoneTable(format!(
                "{} rows, need {} (search rows plus the subtropical block)",
                rows.len(),
                max_veg
            )));
        }
        if names.len() < max_veg {
            return Err(HlzError::InvalidZoneTable(format!(
                "{} names, need {}",
                names.len(),
                max_veg
            )));
        }
        for (i, r) in rows.iter().take(max_veg).enumerate() {
            let ok = r.biotemp_edge > 0.0
                && r.biotemp_edge.is_finite()
                && r.precip_edge > 0.0
                && r.precip_edge.is_finite()
                && r.pet_ratio_edge > 0.0
                && r.pet_ratio_edge.is_finite();
            if !ok {
                return Err(HlzError::InvalidZoneTable(format!(
                    "row {}: edges must be positive and finite",
                    i + 1
                )));
            }
        }

        // Hexagon center = geometric midpoint of [edge, 2·edge], which in
        // the normalized log2 space is log2(edge / norm) + 0.5.
        let centers = rows[..b.tropical_rain_forest_limit]
            .iter()
            .map(|r| {
                [
                    (f64::from(r.biotemp_edge) / BIOTEMP_LOG_NORM).log2() + 0.5,
                    (f64::from(r.precip_edge) / PRECIP_LOG_NORM).log2() + 0.5,
                    (f64::from(r.pet_ratio_edge) / PET_RATIO_LOG_NORM).log2() + 0.5,
                ]
            })
            .collect();

        let polar_edge = rows[0].biotemp_edge;
        let polar_filler_end = 1 + rows[1..]
            .iter()
            .take_while(|r| r.biotemp_edge == polar_edge)
            .count();

        Ok(Self {
            rows,
            names,
            boundaries,
            centers,
            polar_filler_end,
        })
    }

    /// Load a table from its JSON form: `{ rows, names, boundaries }`.
    pub fn from_json_str(json: &str) -> Result<Self, HlzError> {
        let file: ZoneTableFile = serde_json::from_str(json)
            .map_err(|e| HlzError::InvalidZoneTable(format!("parse: {e}")))?;
        Self::new(file.rows, file.names, file.boundaries)
    }

    /// The canonical 41-row Holdridge lattice with physiognomy names.
    pub fn holdridge() -> Self {
        let rows = HOLDRIDGE_ROWS
            .iter()
            .map(|&(biotemp_edge, precip_edge, pet_ratio_edge)| ZoneDefinition {
                biotemp_edge,
                precip_edge,
                pet_ratio_edge,
            })
            .collect();
        let names = HOLDRIDGE_NAMES.iter().map(|s| s.to_string()).collect();
        Self::new(rows, names, HOLDRIDGE_BOUNDARIES).expect("built-in lattice is valid")
    }

    pub fn rows(&self) -> &[ZoneDefinition] {
        &self.rows
    }

    /// Row for a 1-based veg-class index.
    pub fn row(&self, veg_class: usize) -> Option<&ZoneDefinition> {
        (veg_class >= 1).then(|| self.rows.get(veg_class - 1)).flatten()
    }

    /// Physiognomy name for a 1-based veg-class index.
    pub fn name(&self, veg_class: usize) -> Option<&str> {
        (veg_class >= 1)
            .then(|| self.names.get(veg_class - 1))
            .flatten()
            .map(String::as_str)
    }

    pub fn name_count(&self) -> usize {
        self.names.len()
    }

    /// Log2-space centers of the rows that take part in the nearest-center
    /// search; `centers()[i]` belongs to veg class `i + 1`.
    pub fn centers(&self) -> &[[f64; 3]] {
        &self.centers
    }

    pub fn boundaries(&self) -> ZoneBoundaries {
        self.boundaries
    }

    /// Veg class every polar-masked cell is forced to.
    pub fn polar_desert(&self) -> usize {
        1
    }

    /// True for the lattice rows that pad the polar band; the masks
    /// override them to polar desert.
    pub fn is_polar_filler(&self, veg_class: usize) -> bool {
        veg_class >= 2 && veg_class <= self.polar_filler_end
    }

    /// Index shift from the warm-temperate span into the subtropical block.
    pub fn subtropical_offset(&self) -> usize {
        self.boundaries.tropical_rain_forest_limit + 1 - self.boundaries.warm_temperate_desert
    }

    /// Highest veg class any classification can produce.
    pub fn max_veg_class(&self) -> usize {
        self.boundaries.warm_temperate_rain_forest + self.subtropical_offset()
    }

    /// Row for a veg class the pipeline itself produced. Indexes directly:
    /// load-time validation guarantees coverage through the subtropical
    /// block.
    pub(crate) fn edge_row(&self, veg_class: usize) -> &ZoneDefinition {
        &self.rows[veg_class - 1]
    }
}

/// Boundary rows of the canonical lattice.
pub const HOLDRIDGE_BOUNDARIES: ZoneBoundaries = ZoneBoundaries {
    warm_temperate_desert: 20,
    warm_temperate_rain_forest: 26,
    tropical_rain_forest_limit: 34,
};

/// Canonical lattice lower edges `(biotemp °C, precip mm/yr, PET ratio)`.
/// Within a band precipitation edges double and PET-ratio edges halve;
/// each warmer band doubles the biotemperature edge and gains one hexagon.
/// Rows 35–41 duplicate the warm-temperate edges for the subtropical block.
const HOLDRIDGE_ROWS: [(f32, f32, f32); 41] = [
    // Polar band: the desert row plus three lattice fillers.
    (0.75, 62.5, 0.5),
    (0.75, 125.0, 0.25),
    (0.75, 250.0, 0.125),
    (0.75, 500.0, 0.0625),
    // Subpolar.
    (1.5, 62.5, 1.0),
    (1.5, 125.0, 0.5),
    (1.5, 250.0, 0.25),
    (1.5, 500.0, 0.125),
    // Boreal.
    (3.0, 62.5, 2.0),
    (3.0, 125.0, 1.0),
    (3.0, 250.0, 0.5),
    (3.0, 500.0, 0.25),
    (3.0, 1000.0, 0.125),
    // Cool temperate.
    (6.0, 62.5, 4.0),
    (6.0, 125.0, 2.0),
    (6.0, 250.0, 1.0),
    (6.0, 500.0, 0.5),
    (6.0, 1000.0, 0.25),
    (6.0, 2000.0, 0.125),
    // Warm temperate.
    (12.0, 62.5, 8.0),
    (12.0, 125.0, 4.0),
    (12.0, 250.0, 2.0),
    (12.0, 500.0, 1.0),
    (12.0, 1000.0, 0.5),
    (12.0, 2000.0, 0.25),
    (12.0, 4000.0, 0.125),
    // Tropical.
    (24.0, 62.5, 16.0),
    (24.0, 125.0, 8.0),
    (24.0, 250.0, 4.0),
    (24.0, 500.0, 2.0),
    (24.0, 1000.0, 1.0),
    (24.0, 2000.0, 0.5),
    (24.0, 4000.0, 0.25),
    (24.0, 8000.0, 0.125),
    // Subtropical block.
    (12.0, 62.5, 8.0),
    (12.0, 125.0, 4.0),
    (12.0, 250.0, 2.0),
    (12.0, 500.0, 1.0),
    (12.0, 1000.0, 0.5),
    (12.0, 2000.0, 0.25),
    (12.0, 4000.0, 0.125),
];

/// Physiognomy names, parallel to [`HOLDRIDGE_ROWS`]. The latitude region
/// and altitude belt are supplied by the band digits at decode time.
const HOLDRIDGE_NAMES: [&str; 41] = [
    "desert",
    "desert",
    "desert",
    "desert",
    "dry tundra",
    "moist tundra",
    "wet tundra",
    "rain tundra",
    "desert",
    "dry scrub",
    "moist forest",
    "wet forest",
    "rain forest",
    "desert",
    "desert scrub",
    "steppe",
    "moist forest",
    "wet forest",
    "rain forest",
    "desert",
    "desert scrub",
    "thorn steppe",
    "dry forest",
    "moist forest",
    "wet forest",
    "rain forest",
    "desert",
    "desert scrub",
    "thorn woodland",
    "very dry forest",
    "dry forest",
    "moist forest",
    "wet forest",
    "rain forest",
    "desert",
    "desert scrub",
    "thorn woodland",
    "dry forest",
    "moist forest",
    "wet forest",
    "rain forest",
];

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn builtin_table_is_valid_and_sized() {
        let t = ZoneTable::holdridge();
        assert_eq!(t.rows().len(), 41);
        assert_eq!(t.centers().len(), 34);
        assert_eq!(t.subtropical_offset(), 15);
        assert_eq!(t.max_veg_class(), 41);
        assert_eq!(t.polar_desert(), 1);
    }

    #[test]
    fn polar_fillers_resolved_structurally() {
        let t = ZoneTable::holdridge();
        assert!(!t.is_polar_filler(1));
        assert!(t.is_polar_filler(2));
        assert!(t.is_polar_filler(4));
        assert!(!t.is_polar_filler(5));
    }

    #[test]
    fn first_center_sits_half_an_octave_above_its_edges() {
        let t = ZoneTable::holdridge();
        // Row 1: edges (0.75, 62.5, 0.5) are 1, 1, and 4 octaves above the
        // axis normalizers, so the center lands at +0.5 on each.
        let c = t.centers()[0];
        assert_relative_eq!(c[0], 0.5, epsilon = 1e-12);
        assert_relative_eq!(c[1], 0.5, epsilon = 1e-12);
        assert_relative_eq!(c[2], 2.5, epsilon = 1e-12);
    }

    #[test]
    fn subtropical_block_mirrors_warm_temperate_edges() {
        let t = ZoneTable::holdridge();
        let b = t.boundaries();
        let offset = t.subtropical_offset();
        for v in b.warm_temperate_desert..=b.warm_temperate_rain_forest {
            assert_eq!(
                t.row(v).copied(),
                t.row(v + offset).copied(),
                "row {v} and its subtropical twin must share edges"
            );
        }
    }

    #[test]
    fn truncated_table_is_rejected() {
        let t = ZoneTable::holdridge();
        let short: Vec<_> = t.rows()[..34].to_vec();
        let names: Vec<_> = (1..=34).map(|i| format!("zone {i}")).collect();
        let err = ZoneTable::new(short, names, HOLDRIDGE_BOUNDARIES).unwrap_err();
        assert!(matches!(err, HlzError::InvalidZoneTable(_)));
    }

    #[test]
    fn short_name_list_is_rejected() {
        let t = ZoneTable::holdridge();
        let names: Vec<_> = (1..=34).map(|i| format!("zone {i}")).collect();
        let err = ZoneTable::new(t.rows().to_vec(), names, HOLDRIDGE_BOUNDARIES).unwrap_err();
        assert!(matches!(err, HlzError::InvalidZoneTable(_)));
    }

    #[test]
    fn unordered_boundaries_are_rejected() {
        let t = ZoneTable::holdridge();
        let bad = ZoneBoundaries {
            warm_temperate_desert: 26,
            warm_temperate_rain_forest: 20,
            tropical_rain_forest_limit: 34,
        };
        let names: Vec<_> = t.names.clone();
        let err = ZoneTable::new(t.rows().to_vec(), names, bad).unwrap_err();
        assert!(matches!(err, HlzError::InvalidZoneTable(_)));
    }

    #[test]
    fn json_roundtrip_matches_builtin() {
        let t = ZoneTable::holdridge();
        let json = serde_json::json!({
            "rows": t.rows(),
            "names": t.names.clone(),
            "boundaries": t.boundaries(),
        })
        .to_string();
        let loaded = ZoneTable::from_json_str(&json).unwrap();
        assert_eq!(loaded.rows(), t.rows());
        assert_eq!(loaded.boundaries(), t.boundaries());
    }
}
