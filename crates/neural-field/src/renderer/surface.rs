//! Minimal immediate-mode 2D drawing contract.
//!
//! The simulation only needs four operations. Backends:
//! - [`DrawList`]: records commands (tests, hosts that replay them).
//! - `CanvasSurface` in `neural-web`: a browser canvas 2D context.

use glam::Vec2;

use super::color::Color;

/// Drawing surface the simulation renders into.
pub trait DrawSurface {
    /// The backing surface changed pixel size.
    fn resize(&mut self, width: u32, height: u32);

    /// Clear the region `[0, width) × [0, height)`.
    fn clear(&mut self, width: f32, height: f32);

    /// Filled circle.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Stroked line segment.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);
}

/// One recorded draw operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Resize { width: u32, height: u32 },
    Clear { width: f32, height: f32 },
    Circle { center: Vec2, radius: f32, color: Color },
    Line { from: Vec2, to: Vec2, width: f32, color: Color },
}

/// A surface that records commands instead of drawing them.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Commands recorded since the last `Clear`.
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear { .. }))
            .unwrap_or(0);
        &self.commands[start..]
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Line { .. }))
    }

    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl DrawSurface for DrawList {
    fn resize(&mut self, width: u32, height: u32) {
        self.commands.push(DrawCommand::Resize { width, height });
    }

    fn clear(&mut self, width: f32, height: f32) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle { center, radius, color });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.commands.push(DrawCommand::Line { from, to, width, color });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let mut list = DrawList::new();
        list.clear(10.0, 10.0);
        list.fill_circle(Vec2::ONE, 2.0, Color::NODE);
        list.stroke_line(Vec2::ZERO, Vec2::ONE, 0.5, Color::LINK);
        assert_eq!(list.len(), 3);
        assert_eq!(list.circles().count(), 1);
        assert_eq!(list.lines().count(), 1);
    }

    #[test]
    fn last_frame_starts_at_latest_clear() {
        let mut list = DrawList::new();
        list.clear(10.0, 10.0);
        list.fill_circle(Vec2::ONE, 2.0, Color::NODE);
        list.clear(10.0, 10.0);
        list.stroke_line(Vec2::ZERO, Vec2::ONE, 0.5, Color::LINK);
        let frame = list.last_frame();
        assert_eq!(frame.len(), 2);
        assert!(matches!(frame[0], DrawCommand::Clear { .. }));
    }
}
