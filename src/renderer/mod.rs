//! Rendering module
//!
//! Scene painters draw through the [`Canvas`] trait. On the web the canvas is
//! tessellated into a flat-colored triangle list and drawn with a single wgpu pipeline.

pub mod canvas;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod tessellate;
pub mod vertex;

pub use canvas::{Canvas, Color, DrawCommand, RecordingCanvas, Stroke};
pub use pipeline::RenderState;
pub use scene::draw_frame;
pub use tessellate::VertexCanvas;
pub use vertex::Vertex;
