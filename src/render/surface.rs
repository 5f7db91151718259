use glam::Vec2;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Channel-wise brightness scale, clamped to the valid range. Factors
    /// above 1.0 brighten (the top face uses 1.15).
    pub fn shade(self, factor: f32) -> Rgb {
        let scale = |c: u8| ((c as f32 * factor).floor()).clamp(0.0, 255.0) as u8;
        Rgb(scale(self.0), scale(self.1), scale(self.2))
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(c: [u8; 3]) -> Self {
        Rgb(c[0], c[1], c[2])
    }
}

/// The collaborator-provided 2D drawing boundary. The core only ever asks for
/// solid-colored primitives; path construction, buffering and presentation
/// are the collaborator's business.
pub trait DrawSurface {
    fn viewport(&self) -> Vec2;
    fn fill_polygon(&mut self, points: &[Vec2], color: Rgb);
    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Rgb);
    fn stroke_rect(&mut self, min: Vec2, size: Vec2, color: Rgb);
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Rgb);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    FillPolygon { points: Vec<Vec2>, color: Rgb },
    FillRect { min: Vec2, size: Vec2, color: Rgb },
    StrokeRect { min: Vec2, size: Vec2, color: Rgb },
    Line { from: Vec2, to: Vec2, color: Rgb },
}

/// Surface that records the frame's draw commands instead of painting them.
/// Backs the headless demo loop and the renderer tests.
pub struct RecordingSurface {
    viewport: Vec2,
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> RecordingSurface {
        Self {
            viewport: Vec2::new(width, height),
            commands: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn polygon_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillPolygon { .. }))
            .count()
    }
}

impl DrawSurface for RecordingSurface {
    fn viewport(&self) -> Vec2 {
        self.viewport
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Rgb) {
        self.commands.push(DrawCommand::FillPolygon {
            points: points.to_vec(),
            color,
        });
    }

    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Rgb) {
        self.commands.push(DrawCommand::FillRect { min, size, color });
    }

    fn stroke_rect(&mut self, min: Vec2, size: Vec2, color: Rgb) {
        self.commands.push(DrawCommand::StrokeRect { min, size, color });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Rgb) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }
}
