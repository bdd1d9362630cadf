//! Grid mesh extraction from a composited height field.
//!
//! The mesh covers the interior `(resolution - 2)^2` vertices of the field;
//! the one-cell border exists so every interior vertex has four neighbors
//! for finite-difference normals. Cross-tile seam smoothing is out of scope:
//! the border feeds normals only.

use glam::Vec3;

use atoll_field::HeightField;

use crate::TileVertex;

/// The extracted mesh: vertex sequence plus triangle indices.
///
/// Handed to the render backend as an opaque resource and never mutated
/// after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct TileMesh {
    /// Interior-grid vertices, row-major.
    pub vertices: Vec<TileVertex>,
    /// Triangle indices, two triangles per interior quad, fixed winding.
    pub indices: Vec<u32>,
}

/// Vertex count for a field resolution: `(resolution - 2)^2`.
#[inline]
pub fn vertex_count(resolution: usize) -> usize {
    let interior = resolution.saturating_sub(2);
    interior * interior
}

/// Triangle index count for a field resolution: `(resolution - 3)^2 * 6`.
#[inline]
pub fn index_count(resolution: usize) -> usize {
    let quads = resolution.saturating_sub(3);
    quads * quads * 6
}

/// Extract the tile mesh from a height field.
///
/// Positions are tile-centered: the interior grid spans
/// `[-tile_size / 2, tile_size / 2]` on x and z with the cell height on y.
/// UVs normalize the interior grid to `[0, 1]`. Normals come from central
/// differences of the four full-grid neighbors.
pub fn build_tile_mesh(height: &HeightField, tile_size: f32) -> TileMesh {
    let res = height.size();
    debug_assert!(res >= 4, "resolution {res} leaves no interior quads");

    let interior = res - 2;
    let span = (res - 3) as f32;
    let cell = tile_size / span;

    let mut vertices = Vec::with_capacity(vertex_count(res));
    for j in 0..interior {
        for i in 0..interior {
            // Interior (i, j) sits at full-grid (i + 1, j + 1).
            let gx = i + 1;
            let gy = j + 1;

            let u = i as f32 / span;
            let v = j as f32 / span;
            let position = [
                (u - 0.5) * tile_size,
                *height.get(gx, gy),
                (v - 0.5) * tile_size,
            ];

            let left = *height.get(gx - 1, gy);
            let right = *height.get(gx + 1, gy);
            let near = *height.get(gx, gy - 1);
            let far = *height.get(gx, gy + 1);
            let normal = Vec3::new(left - right, 2.0 * cell, near - far).normalize();

            vertices.push(TileVertex {
                position,
                uv: [u, v],
                normal: normal.to_array(),
            });
        }
    }

    let mut indices = Vec::with_capacity(index_count(res));
    for j in 0..interior - 1 {
        for i in 0..interior - 1 {
            let v00 = (j * interior + i) as u32;
            let v10 = v00 + 1;
            let v01 = v00 + interior as u32;
            let v11 = v01 + 1;
            indices.extend_from_slice(&[v00, v01, v11, v00, v11, v10]);
        }
    }

    TileMesh { vertices, indices }
}
