//! Canvas implementation that tessellates into a triangle list for the GPU

use glam::{Affine2, Vec2};

use super::canvas::{Canvas, Color, Stroke};
use super::shapes;
use super::vertex::Vertex;

/// Collects one frame worth of triangles in canvas pixel space
pub struct VertexCanvas {
    size: Vec2,
    segments: u32,
    stroke_scale: f32,
    clear_color: Color,
    transform: Affine2,
    stack: Vec<Affine2>,
    vertices: Vec<Vertex>,
}

impl VertexCanvas {
    pub fn new(size: Vec2, segments: u32, stroke_scale: f32) -> Self {
        Self {
            size,
            segments,
            stroke_scale,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            transform: Affine2::IDENTITY,
            stack: Vec::new(),
            vertices: Vec::new(),
        }
    }

    /// Start a new frame (keeps the vertex allocation)
    pub fn begin(&mut self, size: Vec2) {
        self.size = size;
        self.transform = Affine2::IDENTITY;
        self.stack.clear();
        self.vertices.clear();
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Color the frame is cleared to before the triangles are drawn
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    fn emit(&mut self, local: Vec<Vertex>) {
        let transform = self.transform;
        self.vertices.extend(local.into_iter().map(|v| {
            let p = transform.transform_point2(Vec2::from(v.position));
            Vertex::new(p.x, p.y, v.color)
        }));
    }
}

impl Canvas for VertexCanvas {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn background(&mut self, color: Color) {
        // Everything drawn so far is covered; drop it instead of overdrawing
        self.vertices.clear();
        self.clear_color = color;
    }

    fn push(&mut self) {
        self.stack.push(self.transform);
    }

    fn pop(&mut self) {
        self.transform = self.stack.pop().unwrap_or(Affine2::IDENTITY);
    }

    fn translate(&mut self, offset: Vec2) {
        self.transform = self.transform * Affine2::from_translation(offset);
    }

    fn rotate(&mut self, angle: f32) {
        self.transform = self.transform * Affine2::from_angle(angle);
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        self.emit(shapes::rect(origin, size, color));
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color) {
        self.emit(shapes::ellipse(center, radii, color, self.segments));
    }

    fn stroke_ellipse(&mut self, center: Vec2, radii: Vec2, stroke: Stroke) {
        let width = stroke.width * self.stroke_scale;
        self.emit(shapes::ellipse_ring(center, radii, width, stroke.color, self.segments));
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        self.emit(shapes::fan(points, color));
    }

    fn stroke_path(&mut self, points: &[Vec2], closed: bool, stroke: Stroke) {
        let width = stroke.width * self.stroke_scale;
        self.emit(shapes::polyline(points, width, stroke.color, closed));
    }
}
