//! Dense 2-D grid types shared by the terrain pipeline and the mesh builder.

mod grid;

pub use grid::{Grid2, GridError, HeightField, Mask};
