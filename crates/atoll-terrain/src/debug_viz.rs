//! Debug visualization: 2-D image rendering of generation buffers.
//!
//! Redirects an intermediate pipeline buffer — height field, water mask,
//! distance field, biome regions, shore mask — to an RGBA image instead of
//! (or in addition to) mesh construction. Diagnostic only; nothing in the
//! pipeline reads these images back.

mod image;
mod renderers;

pub use self::image::DebugImage;
pub use renderers::{
    region_color, render_biome_blend, render_height_field, render_mask, render_regions,
    render_uv_gradient, render_water_mask,
};
