//! Drawing surface abstraction
//!
//! The scene painters only talk to [`Canvas`]. The browser build tessellates through
//! [`super::VertexCanvas`]; tests and the native preview use [`RecordingCanvas`].

use glam::Vec2;

/// sRGB-encoded RGBA color, components in 0..1
pub type Color = [f32; 4];

/// Build a color from 0..255 channels
#[inline]
pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Color {
    [r / 255.0, g / 255.0, b / 255.0, a / 255.0]
}

/// Opaque color from 0..255 channels
#[inline]
pub const fn rgb(r: f32, g: f32, b: f32) -> Color {
    rgba(r, g, b, 255.0)
}

/// Replace the alpha channel (0..255, clamped)
#[inline]
pub fn with_alpha(color: Color, alpha: f32) -> Color {
    [color[0], color[1], color[2], alpha.clamp(0.0, 255.0) / 255.0]
}

/// Outline style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

impl Stroke {
    pub const fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

/// Immediate-mode 2D drawing surface.
///
/// Coordinates are canvas pixels with y pointing down. Transforms compose like a
/// stack: `push` saves the current transform, `pop` restores it.
pub trait Canvas {
    /// Canvas size in pixels
    fn size(&self) -> Vec2;
    /// Paint the whole canvas (ignores the current transform)
    fn background(&mut self, color: Color);

    fn push(&mut self);
    fn pop(&mut self);
    fn translate(&mut self, offset: Vec2);
    fn rotate(&mut self, angle: f32);

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color);
    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color);
    fn stroke_ellipse(&mut self, center: Vec2, radii: Vec2, stroke: Stroke);
    /// Fill a polygon that is star-shaped around its centroid
    fn fill_polygon(&mut self, points: &[Vec2], color: Color);
    fn stroke_path(&mut self, points: &[Vec2], closed: bool, stroke: Stroke);

    fn line(&mut self, from: Vec2, to: Vec2, stroke: Stroke) {
        self.stroke_path(&[from, to], false, stroke);
    }
}

/// A recorded canvas call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Background(Color),
    Push,
    Pop,
    Translate(Vec2),
    Rotate(f32),
    FillRect { origin: Vec2, size: Vec2, color: Color },
    FillEllipse { center: Vec2, radii: Vec2, color: Color },
    StrokeEllipse { center: Vec2, radii: Vec2, stroke: Stroke },
    FillPolygon { points: Vec<Vec2>, color: Color },
    StrokePath { points: Vec<Vec2>, closed: bool, stroke: Stroke },
}

/// Canvas that records every call, in order
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    size: Vec2,
    pub commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    /// Forget everything recorded so far
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Commands after the last background clear (what is actually visible)
    pub fn visible(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Background(_)))
            .unwrap_or(0);
        &self.commands[start..]
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn background(&mut self, color: Color) {
        self.commands.push(DrawCommand::Background(color));
    }

    fn push(&mut self) {
        self.commands.push(DrawCommand::Push);
    }

    fn pop(&mut self) {
        self.commands.push(DrawCommand::Pop);
    }

    fn translate(&mut self, offset: Vec2) {
        self.commands.push(DrawCommand::Translate(offset));
    }

    fn rotate(&mut self, angle: f32) {
        self.commands.push(DrawCommand::Rotate(angle));
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        self.commands.push(DrawCommand::FillRect {
            origin,
            size,
            color,
        });
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color) {
        self.commands.push(DrawCommand::FillEllipse {
            center,
            radii,
            color,
        });
    }

    fn stroke_ellipse(&mut self, center: Vec2, radii: Vec2, stroke: Stroke) {
        self.commands.push(DrawCommand::StrokeEllipse {
            center,
            radii,
            stroke,
        });
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        self.commands.push(DrawCommand::FillPolygon {
            points: points.to_vec(),
            color,
        });
    }

    fn stroke_path(&mut self, points: &[Vec2], closed: bool, stroke: Stroke) {
        self.commands.push(DrawCommand::StrokePath {
            points: points.to_vec(),
            closed,
            stroke,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_helpers() {
        assert_eq!(rgb(255.0, 0.0, 0.0), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(with_alpha(rgb(0.0, 0.0, 0.0), 510.0)[3], 1.0);
        assert_eq!(with_alpha(rgb(0.0, 0.0, 0.0), -3.0)[3], 0.0);
    }

    #[test]
    fn test_visible_starts_at_last_background() {
        let mut canvas = RecordingCanvas::new(Vec2::new(10.0, 10.0));
        canvas.background(rgb(1.0, 1.0, 1.0));
        canvas.line(Vec2::ZERO, Vec2::ONE, Stroke::new(rgb(0.0, 0.0, 0.0), 1.0));
        canvas.background(rgb(2.0, 2.0, 2.0));
        canvas.fill_rect(Vec2::ZERO, Vec2::ONE, rgb(0.0, 0.0, 0.0));

        let visible = canvas.visible();
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0], DrawCommand::Background(rgb(2.0, 2.0, 2.0)));
    }
}
