use serde::{Deserialize, Serialize};

use crate::error::HlzError;

/// A dense row-major 2D raster.
///
/// Every raster taking part in one classification run shares the same
/// width × height and cell alignment. `Grid` carries no georeferencing;
/// that stays with the collaborators that produced the surfaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid<T> {
    /// Row-major cell values, length = `width × height`.
    pub data: Vec<T>,
    pub width: usize,
    pub height: usize,
}

impl<T: Clone> Grid<T> {
    /// Create a new grid filled with the given value.
    pub fn filled(width: usize, height: usize, fill: T) -> Self {
        Self {
            data: vec![fill; width * height],
            width,
            height,
        }
    }
}

impl<T> Grid<T> {
    /// Wrap an existing row-major buffer, rejecting length mismatches.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self, HlzError> {
        if data.len() != width * height {
            return Err(HlzError::MalformedGrid {
                name: "grid",
                width,
                height,
                len: data.len(),
            });
        }
        Ok(Self { data, width, height })
    }

    /// Check the backing buffer against the declared dimensions. Grids
    /// built through [`Grid::from_vec`] always pass; deserialized ones
    /// may not.
    pub fn check_shape(&self, name: &'static str) -> Result<(), HlzError> {
        if self.data.len() != self.width * self.height {
            return Err(HlzError::MalformedGrid {
                name,
                width: self.width,
                height: self.height,
                len: self.data.len(),
            });
        }
        Ok(())
    }
}

impl<T: Copy> Grid<T> {
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.width + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, val: T) {
        self.data[row * self.width + col] = val;
    }
}
