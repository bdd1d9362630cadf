//! Canonical `wgpu::VertexBufferLayout` for tile mesh rendering.
//!
//! Every tile render pipeline (terrain material, debug wireframe) references
//! [`TILE_VERTEX_LAYOUT`] to avoid layout drift bugs.
//!
//! ## Attribute Packing
//!
//! | Location | Offset | Format    | Fields   |
//! |----------|--------|-----------|----------|
//! | 0        | 0      | Float32x3 | position |
//! | 1        | 12     | Float32x2 | uv       |
//! | 2        | 20     | Float32x3 | normal   |

use std::mem;

use wgpu::{VertexAttribute, VertexBufferLayout, VertexFormat, VertexStepMode};

/// One tile mesh vertex: position, uv, normal, tightly packed.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TileVertex {
    /// World-space position relative to the tile center.
    pub position: [f32; 3],
    /// Normalized interior-grid coordinate.
    pub uv: [f32; 2],
    /// Unit surface normal from finite differences.
    pub normal: [f32; 3],
}

/// Vertex attributes for the tile mesh format.
pub const TILE_VERTEX_ATTRIBUTES: [VertexAttribute; 3] = [
    // Attribute 0: position
    VertexAttribute {
        format: VertexFormat::Float32x3,
        offset: 0,
        shader_location: 0,
    },
    // Attribute 1: uv
    VertexAttribute {
        format: VertexFormat::Float32x2,
        offset: 12,
        shader_location: 1,
    },
    // Attribute 2: normal
    VertexAttribute {
        format: VertexFormat::Float32x3,
        offset: 20,
        shader_location: 2,
    },
];

/// The vertex buffer layout for all tile mesh render pipelines.
pub const TILE_VERTEX_LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
    array_stride: mem::size_of::<TileVertex>() as u64,
    step_mode: VertexStepMode::Vertex,
    attributes: &TILE_VERTEX_ATTRIBUTES,
};

/// Return the tile vertex buffer layout as an owned value.
///
/// Equivalent to [`TILE_VERTEX_LAYOUT`] but convenient when a `'static`
/// lifetime is awkward to thread through.
pub fn tile_vertex_buffer_layout() -> VertexBufferLayout<'static> {
    TILE_VERTEX_LAYOUT
}

// ---------------------------------------------------------------------------
// Compile-time validation
// ---------------------------------------------------------------------------

static_assertions::const_assert_eq!(mem::size_of::<TileVertex>(), 32);

/// Attribute offsets must be correct.
const _: () = assert!(TILE_VERTEX_ATTRIBUTES[0].offset == 0);
const _: () = assert!(TILE_VERTEX_ATTRIBUTES[1].offset == 12);
const _: () = assert!(TILE_VERTEX_ATTRIBUTES[2].offset == 20);

/// Last attribute must fit within the stride.
const _: () = assert!(
    TILE_VERTEX_ATTRIBUTES[2].offset + 12 <= mem::size_of::<TileVertex>() as u64,
    "Last attribute exceeds vertex stride"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_stride_matches_vertex_struct_size() {
        assert_eq!(
            TILE_VERTEX_LAYOUT.array_stride,
            mem::size_of::<TileVertex>() as u64,
        );
    }

    #[test]
    fn test_attribute_formats_match_shader_expectations() {
        assert_eq!(TILE_VERTEX_ATTRIBUTES[0].format, VertexFormat::Float32x3);
        assert_eq!(TILE_VERTEX_ATTRIBUTES[1].format, VertexFormat::Float32x2);
        assert_eq!(TILE_VERTEX_ATTRIBUTES[2].format, VertexFormat::Float32x3);
    }

    #[test]
    fn test_shader_locations_are_sequential() {
        for (i, attr) in TILE_VERTEX_ATTRIBUTES.iter().enumerate() {
            assert_eq!(attr.shader_location, i as u32);
        }
    }

    #[test]
    fn test_vertex_is_pod_castable() {
        let vertex = TileVertex {
            position: [1.0, 2.0, 3.0],
            uv: [0.25, 0.75],
            normal: [0.0, 1.0, 0.0],
        };
        let bytes: &[u8] = bytemuck::bytes_of(&vertex);
        assert_eq!(bytes.len(), 32);
        let back: &TileVertex = bytemuck::from_bytes(bytes);
        assert_eq!(*back, vertex);
    }

    #[test]
    fn test_layout_is_valid_for_wgpu_pipeline() {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            force_fallback_adapter: true,
            ..Default::default()
        }));

        let Ok(adapter) = adapter else {
            // No adapter available (headless CI without GPU) — skip.
            return;
        };

        let (device, _queue) =
            pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor::default()))
                .expect("failed to create device");

        let shader_source = r#"
            @vertex
            fn vs_main(
                @location(0) position: vec3<f32>,
                @location(1) uv: vec2<f32>,
                @location(2) normal: vec3<f32>,
            ) -> @builtin(position) vec4<f32> {
                return vec4<f32>(position, 1.0);
            }

            @fragment
            fn fs_main() -> @location(0) vec4<f32> {
                return vec4<f32>(1.0, 1.0, 1.0, 1.0);
            }
        "#;

        let shader: wgpu::ShaderModule =
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("test_tile_shader"),
                source: wgpu::ShaderSource::Wgsl(shader_source.into()),
            });

        let _pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("test_tile_pipeline"),
            layout: None,
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[TILE_VERTEX_LAYOUT],
                compilation_options: Default::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: wgpu::TextureFormat::Bgra8UnormSrgb,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            multiview_mask: None,
            cache: None,
        });
    }
}
