//! Override eligibility tests: the modeled climate envelope and the polar
//! desert rule. Precedence between the overrides lives in the per-cell
//! pipeline; this module only answers whether each one applies.

use crate::classify::bands::POLAR_BIOTEMP_MAX_C;
use crate::zones::ZoneTable;

/// Modeled precipitation envelope, mm/yr, half-open.
pub const PRECIP_ENVELOPE_MM: (f32, f32) = (62.5, 16_000.0);
/// Modeled PET-ratio envelope, half-open.
pub const PET_RATIO_ENVELOPE: (f32, f32) = (0.125, 32.0);

/// True when either moisture axis leaves the modeled envelope. NaN
/// compares false on both sides and is treated as a degeneracy by the
/// caller, not as out-of-bounds.
pub fn outside_envelope(precip: f32, pet_ratio: f32) -> bool {
    precip < PRECIP_ENVELOPE_MM.0
        || precip >= PRECIP_ENVELOPE_MM.1
        || pet_ratio < PET_RATIO_ENVELOPE.0
        || pet_ratio >= PET_RATIO_ENVELOPE.1
}

/// Polar-desert eligibility: at or below the polar biotemperature ceiling,
/// or classified into one of the polar filler rows.
pub fn is_polar(biotemp: f32, veg_class: Option<usize>, table: &ZoneTable) -> bool {
    biotemp <= POLAR_BIOTEMP_MAX_C || veg_class.is_some_and(|v| table.is_polar_filler(v))
}
