//! Height field to mesh extraction and the canonical tile vertex layout.

mod grid_mesh;
mod vertex_format;

pub use grid_mesh::{TileMesh, build_tile_mesh, index_count, vertex_count};
pub use vertex_format::{
    TILE_VERTEX_ATTRIBUTES, TILE_VERTEX_LAYOUT, TileVertex, tile_vertex_buffer_layout,
};
