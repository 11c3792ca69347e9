//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for scene elements
pub mod colors {
    use crate::renderer::canvas::{Color, rgb, rgba};

    pub const ROOM_WALL: Color = rgb(200.0, 220.0, 255.0);
    pub const ROOM_FLOOR: Color = rgb(180.0, 160.0, 120.0);
    pub const WINDOW_PANE: Color = rgb(255.0, 255.0, 255.0);
    pub const WINDOW_FRAME: Color = rgb(150.0, 150.0, 150.0);
    pub const DOOR: Color = rgb(120.0, 80.0, 60.0);

    pub const BUTTON: Color = rgba(255.0, 0.0, 0.0, 200.0);
    pub const BUTTON_HOVER: Color = rgba(255.0, 150.0, 0.0, 200.0);

    pub const MARK: Color = rgba(255.0, 0.0, 0.0, 200.0);
    pub const CRACK: Color = rgb(255.0, 255.0, 255.0);
    pub const THOUGHT: Color = rgb(70.0, 50.0, 90.0);
    pub const SHARD_FILL: Color = rgb(200.0, 200.0, 200.0);
    pub const SHARD_EDGE: Color = rgb(0.0, 0.0, 0.0);

    pub const FIGURE_BODY: Color = rgb(0.0, 0.0, 0.0);
    pub const FIGURE_HEAD: Color = rgb(255.0, 255.0, 255.0);

    pub const OVERLAY: Color = rgb(0.0, 0.0, 0.0);
    pub const AFTERMATH: Color = rgb(255.0, 255.0, 255.0);
}
