//! Classification code packing and decoding.
//!
//! `code = 1000·vegClass + 100·altBand + 10·latBand + ecotone`, stored as
//! u32 so veg classes past two digits cannot collide with the band
//! digits. Values 0 and 1 are reserved sentinels.

use crate::error::HlzError;
use crate::zones::ZoneTable;

/// Reserved output value for cells under the external no-data mask.
pub const NO_DATA_CODE: u32 = 0;
/// Reserved output value for cells outside the modeled climate envelope.
pub const OUT_OF_BOUNDS_CODE: u32 = 1;

pub const NO_DATA_LABEL: &str = "No data";
pub const OUT_OF_BOUNDS_LABEL: &str = "No vegetation, outside of HLZ parameters";

/// Latitudinal region names, bands 1–7.
static LATITUDE_BAND_NAMES: [&str; 7] = [
    "Polar",
    "Subpolar",
    "Boreal",
    "Cool temperate",
    "Warm temperate",
    "Subtropical",
    "Tropical",
];

/// Altitudinal belt names, bands 1–7. Band 7 is basal and contributes
/// nothing to the composed name.
static ALTITUDE_BAND_NAMES: [&str; 7] = [
    "nival",
    "alpine",
    "subalpine",
    "montane",
    "lower montane",
    "premontane",
    "",
];

/// Suffixes for ecotone codes 0–7: nothing for undifferentiated (0) and
/// core (1), one axis-direction label each for 2–7.
static ECOTONE_SUFFIXES: [&str; 8] = [
    "",
    "",
    ", cool ecotone",
    ", humid ecotone",
    ", wet ecotone",
    ", warm ecotone",
    ", arid ecotone",
    ", dry ecotone",
];

/// The four packed fields of a classification code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeParts {
    pub veg_class: usize,
    pub alt_band: u8,
    pub lat_band: u8,
    pub ecotone: u8,
}

/// Pack the four fields into one code.
pub fn assemble(veg_class: usize, alt_band: u8, lat_band: u8, ecotone: u8) -> u32 {
    1000 * veg_class as u32
        + 100 * u32::from(alt_band)
        + 10 * u32::from(lat_band)
        + u32::from(ecotone)
}

impl CodeParts {
    /// Arithmetic decomposition, exact inverse of [`assemble`].
    pub fn from_code(code: u32) -> Self {
        Self {
            veg_class: (code / 1000) as usize,
            alt_band: ((code % 1000) / 100) as u8,
            lat_band: ((code % 100) / 10) as u8,
            ecotone: (code % 10) as u8,
        }
    }

    pub fn code(&self) -> u32 {
        assemble(self.veg_class, self.alt_band, self.lat_band, self.ecotone)
    }
}

fn band_name(
    code: u32,
    what: &'static str,
    names: &'static [&'static str; 7],
    band: u8,
) -> Result<&'static str, HlzError> {
    let index = band as usize;
    if index == 0 || index > names.len() {
        return Err(HlzError::DecodeIndexOutOfRange {
            code,
            what,
            index,
            len: names.len(),
        });
    }
    Ok(names[index - 1])
}

/// Human-readable name for one classification code.
///
/// Out-of-range digit fields are reported, never clamped.
pub fn decode(code: u32, table: &ZoneTable) -> Result<String, HlzError> {
    if code == NO_DATA_CODE {
        return Ok(NO_DATA_LABEL.to_string());
    }
    if code == OUT_OF_BOUNDS_CODE {
        return Ok(OUT_OF_BOUNDS_LABEL.to_string());
    }
    let parts = CodeParts::from_code(code);
    let zone = table
        .name(parts.veg_class)
        .ok_or(HlzError::DecodeIndexOutOfRange {
            code,
            what: "veg class",
            index: parts.veg_class,
            len: table.name_count(),
        })?;
    let lat = band_name(code, "latitude band", &LATITUDE_BAND_NAMES, parts.lat_band)?;
    let alt = band_name(code, "altitude band", &ALTITUDE_BAND_NAMES, parts.alt_band)?;
    let eco = parts.ecotone as usize;
    if eco >= ECOTONE_SUFFIXES.len() {
        return Err(HlzError::DecodeIndexOutOfRange {
            code,
            what: "ecotone",
            index: eco,
            len: ECOTONE_SUFFIXES.len(),
        });
    }
    let suffix = ECOTONE_SUFFIXES[eco];
    Ok(if alt.is_empty() {
        format!("{lat} {zone}{suffix}")
    } else {
        format!("{lat} {alt} {zone}{suffix}")
    })
}

/// Code → name table over the distinct codes of an output raster. Input
/// need not be sorted or deduplicated; output is sorted by code.
pub fn decode_report(codes: &[u32], table: &ZoneTable) -> Result<Vec<(u32, String)>, HlzError> {
    let mut distinct = codes.to_vec();
    distinct.sort_unstable();
    distinct.dedup();
    distinct
        .into_iter()
        .map(|c| decode(c, table).map(|name| (c, name)))
        .collect()
}
