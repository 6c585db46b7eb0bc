//! Replays a [`DisplayList`] onto an egui painter.

use egui::epaint::CubicBezierShape;
use egui::{Color32, Painter, Pos2, Rect, Rounding, Shape, Stroke, Vec2};

use crate::chart::surface::{DisplayList, DrawCommand, Surface};
use crate::ui::theme;

/// Paint every recorded command, offset by `origin`.
pub fn paint(painter: &Painter, origin: Pos2, list: &DisplayList) {
    let offset = origin.to_vec2();
    let at = |p: Pos2| p + offset;

    for command in list.commands() {
        match command {
            DrawCommand::Clear(color) => {
                painter.rect_filled(canvas_rect(origin, list), 0.0, *color);
            }
            DrawCommand::FillRect { rect, rounding, color } => {
                painter.rect_filled(rect.translate(offset), Rounding::same(*rounding), *color);
            }
            DrawCommand::Line { from, to, stroke } => {
                painter.line_segment([at(*from), at(*to)], *stroke);
            }
            DrawCommand::DashedLine {
                from,
                to,
                stroke,
                dash,
                gap,
            } => {
                painter.extend(Shape::dashed_line(&[at(*from), at(*to)], *stroke, *dash, *gap));
            }
            DrawCommand::CubicBezier { points, stroke } => {
                let points = points.map(at);
                painter.add(CubicBezierShape::from_points_stroke(
                    points,
                    false,
                    Color32::TRANSPARENT,
                    *stroke,
                ));
            }
            DrawCommand::Polygon { points, fill } => {
                let points = points.iter().copied().map(at).collect();
                painter.add(Shape::convex_polygon(points, *fill, Stroke::NONE));
            }
            DrawCommand::Text {
                pos,
                anchor,
                text,
                size,
                color,
            } => {
                painter.text(at(*pos), *anchor, text, theme::font(*size), *color);
            }
        }
    }
}

/// Screen rectangle covered by the list's canvas.
pub fn canvas_rect(origin: Pos2, list: &DisplayList) -> Rect {
    Rect::from_min_size(origin, list.size())
}

/// Canvas size for an available region, never negative.
pub fn fit(available: Vec2) -> Vec2 {
    available.max(Vec2::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_clamps_negative_space() {
        assert_eq!(fit(Vec2::new(-5.0, 20.0)), Vec2::new(0.0, 20.0));
    }

    #[test]
    fn canvas_rect_tracks_the_resized_list() {
        let mut list = DisplayList::with_container(Vec2::new(300.0, 120.0));
        list.resize(Vec2::new(300.0, 120.0));
        let rect = canvas_rect(Pos2::new(10.0, 40.0), &list);
        assert_eq!(rect, Rect::from_min_max(Pos2::new(10.0, 40.0), Pos2::new(310.0, 160.0)));
    }
}
