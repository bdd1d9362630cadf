//! The sampling frame of one tile.

use glam::{Vec2, Vec3};

/// Where a tile's grid sits inside the world map, in map-normalized space.
///
/// The world map spans `[0, 1]^2`; a tile covers a `1/zoom`-wide square
/// starting at `offset`. Every stage converts cell indices to map space
/// through this frame, so island-resolution buffers (the distance field) and
/// tile-resolution buffers line up regardless of tile size or position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileFrame {
    /// Vertices per tile side.
    pub resolution: usize,
    /// Lower corner of the tile in map-normalized coordinates.
    pub offset: Vec2,
    /// How much of the map the tile covers: `map_size / tile_size`.
    pub zoom: f32,
}

impl TileFrame {
    /// Frame for a full-map tile at the given resolution.
    pub fn full_map(resolution: usize) -> Self {
        Self {
            resolution,
            offset: Vec2::ZERO,
            zoom: 1.0,
        }
    }

    /// Frame for a tile of `tile_size` world units centered at `position`
    /// inside a map of `map_size` world units.
    ///
    /// This is the inverse of the streamer's tile placement: the tile center
    /// maps to `offset + 0.5 / zoom`, with the world origin at map center.
    pub fn from_tile(tile_size: u32, position: Vec3, map_size: u32) -> Self {
        let map = map_size as f32;
        let half = tile_size as f32 / 2.0;
        Self {
            resolution: 0,
            offset: Vec2::new(
                (position.x - half) / map + 0.5,
                (position.z - half) / map + 0.5,
            ),
            zoom: map / tile_size as f32,
        }
    }

    /// Same frame with the grid resolution filled in.
    pub fn with_resolution(self, resolution: usize) -> Self {
        Self { resolution, ..self }
    }

    /// Map-normalized position of cell `(x, y)`.
    #[inline]
    pub fn uv(&self, x: usize, y: usize) -> Vec2 {
        let res = self.resolution as f32;
        Vec2::new(
            (x as f32 / res) / self.zoom + self.offset.x,
            (y as f32 / res) / self.zoom + self.offset.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_map_frame_spans_unit_square() {
        let frame = TileFrame::full_map(64);
        let first = frame.uv(0, 0);
        let last = frame.uv(63, 63);
        assert_eq!(first, Vec2::ZERO);
        assert!(last.x < 1.0 && last.y < 1.0);
    }

    #[test]
    fn test_centered_tile_covering_whole_map() {
        let frame = TileFrame::from_tile(256, Vec3::ZERO, 256);
        assert_eq!(frame.zoom, 1.0);
        assert_eq!(frame.offset, Vec2::ZERO);
    }

    #[test]
    fn test_quarter_tile_offset_and_zoom() {
        // A 64-unit tile centered at (-96, 0, -96) in a 256-unit map is the
        // lowest-corner tile of a 4x4 split.
        let frame = TileFrame::from_tile(64, Vec3::new(-96.0, 0.0, -96.0), 256);
        assert_eq!(frame.zoom, 4.0);
        assert!((frame.offset.x - 0.0).abs() < 1e-6);
        assert!((frame.offset.y - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_uv_stays_inside_tile_footprint() {
        let frame = TileFrame::from_tile(64, Vec3::new(32.0, 0.0, 32.0), 256).with_resolution(64);
        for &(x, y) in &[(0, 0), (63, 0), (0, 63), (63, 63)] {
            let uv = frame.uv(x, y);
            assert!(
                uv.x >= frame.offset.x && uv.x < frame.offset.x + 1.0 / frame.zoom + 1e-6,
                "uv {uv:?} outside footprint"
            );
            assert!(uv.y >= frame.offset.y && uv.y < frame.offset.y + 1.0 / frame.zoom + 1e-6);
        }
    }
}
