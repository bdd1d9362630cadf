//! Square dense 2-D grids stored row-major.
//!
//! Every buffer the generation pipeline materializes — height fields, water
//! masks, distance fields, biome masks — is a [`Grid2<f32>`]. Grids are
//! created fresh per generation call and never partially updated; the only
//! cross-call grid is the world's cached distance field, which is read-only
//! after initialization.

/// Errors constructing a grid from raw cell data.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Cell count does not match `size * size`.
    #[error("cell count {got} does not match {size}x{size} grid")]
    CellCountMismatch {
        /// Requested side length.
        size: usize,
        /// Number of cells supplied.
        got: usize,
    },
}

/// A square dense grid of cells, stored row-major (`y * size + x`).
#[derive(Clone, Debug, PartialEq)]
pub struct Grid2<T> {
    size: usize,
    cells: Vec<T>,
}

/// Dense grid of elevation values.
pub type HeightField = Grid2<f32>;

/// Dense grid of blend/selection weights in `[0, 1]`.
pub type Mask = Grid2<f32>;

impl<T: Clone> Grid2<T> {
    /// Create a grid with every cell set to `fill`.
    pub fn new(size: usize, fill: T) -> Self {
        Self {
            size,
            cells: vec![fill; size * size],
        }
    }

    /// Wrap existing row-major cell data.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::CellCountMismatch`] if `cells.len() != size * size`.
    pub fn from_cells(size: usize, cells: Vec<T>) -> Result<Self, GridError> {
        if cells.len() != size * size {
            return Err(GridError::CellCountMismatch {
                size,
                got: cells.len(),
            });
        }
        Ok(Self { size, cells })
    }
}

impl<T> Grid2<T> {
    /// Side length in cells.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total cell count (`size * size`).
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` for a zero-sized grid.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Row-major flat index for `(x, y)`.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.size && y < self.size);
        y * self.size + x
    }

    /// Cell at `(x, y)`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> &T {
        &self.cells[self.index(x, y)]
    }

    /// Set the cell at `(x, y)`.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        let idx = self.index(x, y);
        self.cells[idx] = value;
    }

    /// All cells, row-major.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    /// All cells, row-major, mutable.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.cells
    }

    /// Consume the grid and return its cells.
    pub fn into_cells(self) -> Vec<T> {
        self.cells
    }
}

impl Grid2<f32> {
    /// Largest cell value, or 0.0 for an empty grid. Ignores NaN cells.
    pub fn max_value(&self) -> f32 {
        self.cells.iter().copied().fold(0.0_f32, f32::max)
    }

    /// Sample the grid at normalized coordinates `(u, v)` in `[0, 1]` with
    /// bilinear filtering, clamping at the edges.
    ///
    /// Used to read the island-resolution distance field at terrain-resolution
    /// cell positions without blockiness.
    pub fn sample_bilinear(&self, u: f32, v: f32) -> f32 {
        let last = (self.size - 1) as f32;
        let fx = (u.clamp(0.0, 1.0) * last).clamp(0.0, last);
        let fy = (v.clamp(0.0, 1.0) * last).clamp(0.0, last);

        let x0 = fx.floor() as usize;
        let y0 = fy.floor() as usize;
        let x1 = (x0 + 1).min(self.size - 1);
        let y1 = (y0 + 1).min(self.size - 1);
        let tx = fx - x0 as f32;
        let ty = fy - y0 as f32;

        let a = *self.get(x0, y0) * (1.0 - tx) + *self.get(x1, y0) * tx;
        let b = *self.get(x0, y1) * (1.0 - tx) + *self.get(x1, y1) * tx;
        a * (1.0 - ty) + b * ty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indexing_is_row_major() {
        let mut grid = Grid2::new(4, 0.0_f32);
        grid.set(1, 2, 7.0);
        assert_eq!(grid.as_slice()[2 * 4 + 1], 7.0);
        assert_eq!(*grid.get(1, 2), 7.0);
    }

    #[test]
    fn test_from_cells_rejects_wrong_count() {
        let result = Grid2::from_cells(3, vec![0.0_f32; 8]);
        assert!(matches!(
            result,
            Err(GridError::CellCountMismatch { size: 3, got: 8 })
        ));
    }

    #[test]
    fn test_from_cells_accepts_exact_count() {
        let grid = Grid2::from_cells(3, (0..9).map(|i| i as f32).collect()).unwrap();
        assert_eq!(*grid.get(2, 2), 8.0);
    }

    #[test]
    fn test_max_value() {
        let grid = Grid2::from_cells(2, vec![0.5, 3.0, 1.0, 2.0]).unwrap();
        assert_eq!(grid.max_value(), 3.0);
    }

    #[test]
    fn test_bilinear_hits_cell_values_at_corners() {
        let grid = Grid2::from_cells(2, vec![0.0, 1.0, 2.0, 3.0]).unwrap();
        assert_eq!(grid.sample_bilinear(0.0, 0.0), 0.0);
        assert_eq!(grid.sample_bilinear(1.0, 0.0), 1.0);
        assert_eq!(grid.sample_bilinear(0.0, 1.0), 2.0);
        assert_eq!(grid.sample_bilinear(1.0, 1.0), 3.0);
    }

    #[test]
    fn test_bilinear_interpolates_midpoints() {
        let grid = Grid2::from_cells(2, vec![0.0, 1.0, 2.0, 3.0]).unwrap();
        let center = grid.sample_bilinear(0.5, 0.5);
        assert!(
            (center - 1.5).abs() < 1e-6,
            "center of a 0/1/2/3 grid should average to 1.5, got {center}"
        );
    }

    #[test]
    fn test_bilinear_clamps_out_of_range_coords() {
        let grid = Grid2::from_cells(2, vec![0.0, 1.0, 2.0, 3.0]).unwrap();
        assert_eq!(grid.sample_bilinear(-1.0, -1.0), 0.0);
        assert_eq!(grid.sample_bilinear(2.0, 2.0), 3.0);
    }
}
