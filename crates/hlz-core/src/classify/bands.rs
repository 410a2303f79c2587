//! Biotemperature band thresholds.
//!
//! Seven half-open bands span polar through tropical. The same thresholds
//! serve both zonation axes: sea-level biotemperature gives the
//! latitudinal band, local (elevation-adjusted) biotemperature the
//! altitudinal belt.

/// Polar band ceiling, °C; doubles as the polar-desert override threshold.
pub const POLAR_BIOTEMP_MAX_C: f32 = 1.5;

/// Frost line splitting warm temperate from subtropical: the geometric
/// midpoint of the 12 °C and 24 °C edges, `2^(log2 12 + 1/2)`.
pub const FROST_LINE_C: f32 = 16.970_562_7;

/// Band value used when local and sea-level bands agree (no elevation
/// effect detected).
pub const BASAL_BAND: u8 = 7;

/// Map biotemperature to its band, 1 (polar) through 7 (tropical).
///
/// Monotone non-decreasing in `t`. NaN yields `None` rather than
/// defaulting to any valid band.
pub fn biotemp_band(t: f32) -> Option<u8> {
    if t.is_nan() {
        return None;
    }
    let band = if t <= POLAR_BIOTEMP_MAX_C {
        1
    } else if t < 3.0 {
        2
    } else if t < 6.0 {
        3
    } else if t < 12.0 {
        4
    } else if t < FROST_LINE_C {
        5
    } else if t < 24.0 {
        6
    } else {
        7
    };
    Some(band)
}

/// Altitudinal belt: the local band where it departs from the sea-level
/// band, else basal.
pub fn altitudinal_band(local_band: u8, sea_level_band: u8) -> u8 {
    if local_band != sea_level_band {
        local_band
    } else {
        BASAL_BAND
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_edges() {
        assert_eq!(biotemp_band(0.0), Some(1));
        assert_eq!(biotemp_band(1.5), Some(1));
        assert_eq!(biotemp_band(1.6), Some(2));
        assert_eq!(biotemp_band(3.0), Some(3));
        assert_eq!(biotemp_band(6.0), Some(4));
        assert_eq!(biotemp_band(12.0), Some(5));
        assert_eq!(biotemp_band(FROST_LINE_C), Some(6));
        assert_eq!(biotemp_band(24.0), Some(7));
        assert_eq!(biotemp_band(30.0), Some(7));
    }

    #[test]
    fn bands_are_monotone_in_biotemperature() {
        let mut prev = 0u8;
        let mut t = 0.0f32;
        while t <= 32.0 {
            let band = biotemp_band(t).unwrap();
            assert!(
                band >= prev,
                "band dropped from {prev} to {band} at t={t}"
            );
            prev = band;
            t += 0.01;
        }
    }

    #[test]
    fn nan_is_undefined_not_defaulted() {
        assert_eq!(biotemp_band(f32::NAN), None);
    }

    #[test]
    fn altitudinal_belt_rule() {
        assert_eq!(altitudinal_band(4, 7), 4);
        assert_eq!(altitudinal_band(7, 7), BASAL_BAND);
        assert_eq!(altitudinal_band(1, 1), BASAL_BAND);
    }
}
