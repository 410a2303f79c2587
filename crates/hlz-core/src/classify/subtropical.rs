//! Warm-temperate / subtropical disambiguation.
//!
//! The lattice carries a single hexagon per (precipitation, PET-ratio)
//! pair across the 12–24 °C range, but two latitudinal regions share that
//! range. Cells past the frost line move to the subtropical block of the
//! table.

use crate::classify::bands::FROST_LINE_C;
use crate::zones::ZoneTable;

/// Re-index a winning zone into the subtropical block when local
/// biotemperature exceeds the frost line. Indices outside the
/// warm-temperate span pass through unchanged.
pub fn disambiguate(veg_class: usize, biotemp: f32, table: &ZoneTable) -> usize {
    let b = table.boundaries();
    if veg_class >= b.warm_temperate_desert
        && veg_class <= b.warm_temperate_rain_forest
        && biotemp > FROST_LINE_C
    {
        veg_class + table.subtropical_offset()
    } else {
        veg_class
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_frost_line_keeps_warm_temperate() {
        let t = ZoneTable::holdridge();
        assert_eq!(disambiguate(24, 15.0, &t), 24);
    }

    #[test]
    fn above_frost_line_shifts_to_subtropical() {
        let t = ZoneTable::holdridge();
        assert_eq!(disambiguate(20, 17.0, &t), 35);
        assert_eq!(disambiguate(26, 23.9, &t), 41);
    }

    #[test]
    fn outside_the_span_is_untouched_even_when_hot() {
        let t = ZoneTable::holdridge();
        assert_eq!(disambiguate(19, 17.0, &t), 19);
        assert_eq!(disambiguate(27, 28.0, &t), 27);
    }
}
