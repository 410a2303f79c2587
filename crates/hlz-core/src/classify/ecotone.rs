//! Transitional life zone (ecotone) tagging.

use crate::zones::ZoneDefinition;

/// Undifferentiated hexagon (tagging disabled, or cell under the polar
/// override).
pub const ECOTONE_NONE: u8 = 0;
/// Hexagon core: every axis within `[edge, 2·edge]`.
pub const ECOTONE_CORE: u8 = 1;

/// Transitional-zone code for a cell against its winning zone's edges.
///
/// The three axis tests run in fixed order — precipitation, PET ratio,
/// biotemperature — and each overwrites the previous result when it
/// triggers, so biotemperature decides when several axes are out of range
/// at once.
pub fn ecotone_code(zone: &ZoneDefinition, biotemp: f32, precip: f32, pet_ratio: f32) -> u8 {
    let mut code = ECOTONE_CORE;
    if precip < zone.precip_edge {
        code = 7;
    } else if precip > zone.precip_edge * 2.0 {
        code = 4;
    }
    if pet_ratio < zone.pet_ratio_edge {
        code = 3;
    } else if pet_ratio > zone.pet_ratio_edge * 2.0 {
        code = 6;
    }
    if biotemp < zone.biotemp_edge {
        code = 2;
    } else if biotemp > zone.biotemp_edge * 2.0 {
        code = 5;
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone() -> ZoneDefinition {
        ZoneDefinition {
            biotemp_edge: 12.0,
            precip_edge: 1000.0,
            pet_ratio_edge: 0.5,
        }
    }

    #[test]
    fn all_axes_in_range_is_core() {
        assert_eq!(ecotone_code(&zone(), 15.0, 1500.0, 0.7), ECOTONE_CORE);
        // Upper edges are inclusive: exactly 2·edge stays core.
        assert_eq!(ecotone_code(&zone(), 24.0, 2000.0, 1.0), ECOTONE_CORE);
    }

    #[test]
    fn single_axis_codes() {
        assert_eq!(ecotone_code(&zone(), 15.0, 900.0, 0.7), 7);
        assert_eq!(ecotone_code(&zone(), 15.0, 2100.0, 0.7), 4);
        assert_eq!(ecotone_code(&zone(), 15.0, 1500.0, 0.4), 3);
        assert_eq!(ecotone_code(&zone(), 15.0, 1500.0, 1.1), 6);
        assert_eq!(ecotone_code(&zone(), 11.0, 1500.0, 0.7), 2);
        assert_eq!(ecotone_code(&zone(), 25.0, 1500.0, 0.7), 5);
    }

    #[test]
    fn biotemperature_overrides_the_moisture_axes() {
        // Dry and hot: biotemperature test runs last and wins.
        assert_eq!(ecotone_code(&zone(), 25.0, 900.0, 1.1), 5);
        // Cold, wet, and humid likewise resolves to the cold code.
        assert_eq!(ecotone_code(&zone(), 11.0, 2100.0, 0.4), 2);
    }

    #[test]
    fn pet_ratio_overrides_precipitation() {
        assert_eq!(ecotone_code(&zone(), 15.0, 2100.0, 0.4), 3);
        assert_eq!(ecotone_code(&zone(), 15.0, 900.0, 1.1), 6);
    }
}
