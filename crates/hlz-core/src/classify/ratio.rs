//! Elementwise PET / precipitation ratio.

use crate::error::HlzError;
use crate::grid::Grid;

/// Per-cell dryness index. Division by zero passes through as `Inf`/`NaN`;
/// such cells are expected to fall under the no-data contract or the
/// modeled-envelope override downstream, never to be masked here.
#[inline]
pub fn pet_ratio(pet: f32, precip: f32) -> f32 {
    pet / precip
}

/// Whole-grid form of [`pet_ratio`]. Pure; shape-checked.
pub fn pet_ratio_grid(pet: &Grid<f32>, precip: &Grid<f32>) -> Result<Grid<f32>, HlzError> {
    if pet.width != precip.width || pet.height != precip.height {
        return Err(HlzError::ShapeMismatch {
            name: "precip",
            expected: (pet.width, pet.height),
            found: (precip.width, precip.height),
        });
    }
    let data = pet
        .data
        .iter()
        .zip(&precip.data)
        .map(|(&p, &pr)| pet_ratio(p, pr))
        .collect();
    Ok(Grid {
        data,
        width: pet.width,
        height: pet.height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elementwise_ratio() {
        let pet = Grid::from_vec(2, 1, vec![1000.0, 500.0]).unwrap();
        let precip = Grid::from_vec(2, 1, vec![500.0, 2000.0]).unwrap();
        let r = pet_ratio_grid(&pet, &precip).unwrap();
        assert_eq!(r.data, vec![2.0, 0.25]);
    }

    #[test]
    fn zero_precipitation_passes_through_as_inf() {
        assert!(pet_ratio(800.0, 0.0).is_infinite());
        assert!(pet_ratio(0.0, 0.0).is_nan());
    }

    #[test]
    fn mismatched_shapes_are_rejected() {
        let pet = Grid::filled(2, 2, 1.0f32);
        let precip = Grid::filled(3, 2, 1.0f32);
        let err = pet_ratio_grid(&pet, &precip).unwrap_err();
        assert!(matches!(err, HlzError::ShapeMismatch { .. }));
    }
}
