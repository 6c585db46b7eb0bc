//! Drawing surface abstraction and the in-memory display list.

use egui::{Align2, Color32, Pos2, Rect, Stroke, Vec2};

/// A 2D canvas the scene is painted onto.
pub trait Surface {
    /// Size of the element hosting the canvas, or `None` when there is none.
    fn container_size(&self) -> Option<Vec2>;

    /// Resize the canvas. Resizing discards its contents.
    fn resize(&mut self, size: Vec2);

    fn size(&self) -> Vec2;

    /// Discard everything and fill with `color`.
    fn clear(&mut self, color: Color32);

    fn fill_rect(&mut self, rect: Rect, rounding: f32, color: Color32);

    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke);

    fn dashed_line(&mut self, from: Pos2, to: Pos2, stroke: Stroke, dash: f32, gap: f32);

    fn cubic_bezier(&mut self, points: [Pos2; 4], stroke: Stroke);

    fn polygon(&mut self, points: Vec<Pos2>, fill: Color32);

    fn text(&mut self, pos: Pos2, anchor: Align2, text: &str, size: f32, color: Color32);
}

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color32),
    FillRect {
        rect: Rect,
        rounding: f32,
        color: Color32,
    },
    Line {
        from: Pos2,
        to: Pos2,
        stroke: Stroke,
    },
    DashedLine {
        from: Pos2,
        to: Pos2,
        stroke: Stroke,
        dash: f32,
        gap: f32,
    },
    CubicBezier {
        points: [Pos2; 4],
        stroke: Stroke,
    },
    Polygon {
        points: Vec<Pos2>,
        fill: Color32,
    },
    Text {
        pos: Pos2,
        anchor: Align2,
        text: String,
        size: f32,
        color: Color32,
    },
}

/// Retained canvas: keeps the last painted frame until the next clear or resize.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    container: Option<Vec2>,
    size: Vec2,
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    /// A list whose host container currently measures `size`.
    pub fn with_container(size: Vec2) -> Self {
        Self {
            container: Some(size),
            ..Default::default()
        }
    }

    pub fn set_container_size(&mut self, size: Option<Vec2>) {
        self.container = size;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// All text drawn in the current frame, in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for DisplayList {
    fn container_size(&self) -> Option<Vec2> {
        self.container
    }

    fn resize(&mut self, size: Vec2) {
        self.size = size;
        self.commands.clear();
    }

    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self, color: Color32) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, rounding: f32, color: Color32) {
        self.commands.push(DrawCommand::FillRect { rect, rounding, color });
    }

    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke) {
        self.commands.push(DrawCommand::Line { from, to, stroke });
    }

    fn dashed_line(&mut self, from: Pos2, to: Pos2, stroke: Stroke, dash: f32, gap: f32) {
        self.commands.push(DrawCommand::DashedLine {
            from,
            to,
            stroke,
            dash,
            gap,
        });
    }

    fn cubic_bezier(&mut self, points: [Pos2; 4], stroke: Stroke) {
        self.commands.push(DrawCommand::CubicBezier { points, stroke });
    }

    fn polygon(&mut self, points: Vec<Pos2>, fill: Color32) {
        self.commands.push(DrawCommand::Polygon { points, fill });
    }

    fn text(&mut self, pos: Pos2, anchor: Align2, text: &str, size: f32, color: Color32) {
        self.commands.push(DrawCommand::Text {
            pos,
            anchor,
            text: text.to_owned(),
            size,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_and_resize_drop_the_previous_frame() {
        let mut list = DisplayList::with_container(Vec2::new(100.0, 50.0));
        list.text(Pos2::ZERO, Align2::LEFT_TOP, "old", 10.0, Color32::BLACK);
        list.clear(Color32::WHITE);
        assert_eq!(list.commands(), &[DrawCommand::Clear(Color32::WHITE)]);

        list.text(Pos2::ZERO, Align2::LEFT_TOP, "new", 10.0, Color32::BLACK);
        assert_eq!(list.texts().collect::<Vec<_>>(), ["new"]);

        list.resize(Vec2::new(100.0, 50.0));
        assert!(list.commands().is_empty());
        assert_eq!(list.size(), Vec2::new(100.0, 50.0));
    }
}
