//! Full-frame painting: header, grid, bars, then connectors.

use chrono::NaiveDateTime;
use egui::{vec2, Align2, Pos2, Rect, Stroke};

use super::coords::CoordinateMapper;
use super::interaction::HoverState;
use super::routing::RelationshipLine;
use super::surface::Surface;
use crate::model::Task;
use crate::ui::theme::{self, Palette};

/// Names longer than this are cut and suffixed with an ellipsis.
pub const MAX_NAME_CHARS: usize = 15;
/// Bars narrower than this get no progress label.
pub const PROGRESS_LABEL_MIN_WIDTH: f32 = 40.0;
/// Bars narrower than this get no name.
pub const NAME_LABEL_MIN_WIDTH: f32 = 60.0;
/// Connectors spanning less than this horizontally get no kind label.
pub const KIND_LABEL_MIN_SPAN: f32 = 40.0;

const TODAY_DASH: f32 = 5.0;
const TODAY_GAP: f32 = 5.0;

/// Everything one frame needs.
pub struct Scene<'a> {
    pub mapper: CoordinateMapper<'a>,
    pub palette: &'a Palette,
    pub tasks: &'a [Task],
    /// `None` when relationships are disabled.
    pub lines: Option<&'a [RelationshipLine]>,
    pub hover: &'a HoverState,
    pub now: NaiveDateTime,
}

/// Repaint the whole surface.
pub fn draw<S: Surface + ?Sized>(surface: &mut S, scene: &Scene<'_>) {
    surface.clear(scene.palette.background);
    draw_header(surface, scene);
    draw_grid(surface, scene);
    draw_today_marker(surface, scene);
    draw_task_bars(surface, scene);
    if let Some(lines) = scene.lines {
        draw_relationships(surface, scene, lines);
    }
}

fn draw_header<S: Surface + ?Sized>(surface: &mut S, scene: &Scene<'_>) {
    let mapper = &scene.mapper;
    let palette = scene.palette;
    let width = surface.size().x;
    let header = mapper.header_height();
    let view_mode = mapper.view_mode();
    let state = mapper.state();

    surface.fill_rect(
        Rect::from_min_size(Pos2::ZERO, vec2(width, header)),
        0.0,
        palette.header_bg,
    );

    let mut date = state.start;
    while date <= state.end {
        let x = mapper.x_for_date(date);
        surface.text(
            Pos2::new(x + mapper.unit_width() / 2.0, header / 2.0),
            Align2::CENTER_CENTER,
            &date.format(view_mode.label_format()).to_string(),
            theme::HEADER_FONT_SIZE,
            palette.text,
        );
        surface.line(Pos2::new(x, 0.0), Pos2::new(x, header), Stroke::new(1.0, palette.grid));

        let next = view_mode.next(date);
        if next <= date {
            break;
        }
        date = next;
    }

    surface.line(
        Pos2::new(0.0, header),
        Pos2::new(width, header),
        Stroke::new(1.0, palette.grid),
    );
}

fn draw_grid<S: Surface + ?Sized>(surface: &mut S, scene: &Scene<'_>) {
    let mapper = &scene.mapper;
    let size = surface.size();
    let stroke = Stroke::new(0.5, scene.palette.grid);
    let unit = mapper.unit_width();

    if unit > 0.0 {
        let mut x = 0.0;
        while x <= size.x {
            surface.line(Pos2::new(x, mapper.header_height()), Pos2::new(x, size.y), stroke);
            x += unit;
        }
    }

    for row in 0..mapper.row_count() {
        let y = mapper.y_for_row(row) + mapper.row_height();
        surface.line(Pos2::new(0.0, y), Pos2::new(size.x, y), stroke);
    }
}

fn draw_today_marker<S: Surface + ?Sized>(surface: &mut S, scene: &Scene<'_>) {
    let mapper = &scene.mapper;
    let state = mapper.state();
    if scene.now < state.start || scene.now > state.end {
        return;
    }
    let x = mapper.x_for_date(scene.now);
    let top = mapper.header_height();
    surface.dashed_line(
        Pos2::new(x, top),
        Pos2::new(x, surface.size().y),
        Stroke::new(2.0, scene.palette.today_line),
        TODAY_DASH,
        TODAY_GAP,
    );
    surface.text(
        Pos2::new(x + 4.0, top + 4.0),
        Align2::LEFT_TOP,
        "Today",
        theme::SMALL_FONT_SIZE,
        scene.palette.today_line,
    );
}

fn draw_task_bars<S: Surface + ?Sized>(surface: &mut S, scene: &Scene<'_>) {
    let palette = scene.palette;
    for (row, task) in scene.tasks.iter().enumerate() {
        let bar = scene.mapper.bar_rect(row, task.start, task.end);
        surface.fill_rect(bar, 3.0, task.color.unwrap_or(palette.bar));

        if let Some(progress) = task.progress.filter(|p| *p != 0.0) {
            let fraction = (progress / 100.0).clamp(0.0, 1.0);
            if fraction > 0.0 {
                let filled = Rect::from_min_size(bar.min, vec2(bar.width() * fraction, bar.height()));
                surface.fill_rect(filled, 3.0, palette.bar_progress);
            }
            if bar.width() > PROGRESS_LABEL_MIN_WIDTH {
                surface.text(
                    bar.center(),
                    Align2::CENTER_CENTER,
                    &format!("{}%", progress.round()),
                    theme::SMALL_FONT_SIZE,
                    palette.text_on_bar,
                );
            }
        }

        if bar.width() > NAME_LABEL_MIN_WIDTH {
            surface.text(
                Pos2::new(bar.left() + 5.0, bar.center().y),
                Align2::LEFT_CENTER,
                &truncate_name(&task.name),
                theme::BAR_FONT_SIZE,
                palette.text_on_bar,
            );
        }
    }
}

fn draw_relationships<S: Surface + ?Sized>(
    surface: &mut S,
    scene: &Scene<'_>,
    lines: &[RelationshipLine],
) {
    let palette = scene.palette;
    for (index, line) in lines.iter().enumerate() {
        let base = palette.relationship(line.relationship.kind);
        let hovered = scene.hover.relationship == Some(index);
        let stroke = if hovered {
            Stroke::new(theme::DEP_HOVER_STROKE_WIDTH, theme::darken(base, theme::DEP_HOVER_DARKEN))
        } else {
            Stroke::new(theme::DEP_STROKE_WIDTH, base)
        };

        surface.cubic_bezier(line.path.points, stroke);
        surface.polygon(arrow_head(line.to, line.arrow_angle), stroke.color);

        if (line.to.x - line.from.x).abs() > KIND_LABEL_MIN_SPAN {
            let mid = line.path.midpoint();
            surface.fill_rect(Rect::from_center_size(mid, vec2(22.0, 14.0)), 2.0, palette.background);
            surface.text(
                mid,
                Align2::CENTER_CENTER,
                line.relationship.kind.abbreviation(),
                theme::SMALL_FONT_SIZE,
                stroke.color,
            );
        }
    }
}

/// Triangle with its tip at `tip`, opening back along `angle`.
pub fn arrow_head(tip: Pos2, angle: f32) -> Vec<Pos2> {
    let (sin, cos) = angle.sin_cos();
    let rotate = |x: f32, y: f32| tip + vec2(x * cos - y * sin, x * sin + y * cos);
    vec![
        tip,
        rotate(-theme::ARROW_LENGTH, -theme::ARROW_HALF_WIDTH),
        rotate(-theme::ARROW_LENGTH, theme::ARROW_HALF_WIDTH),
    ]
}

/// First [`MAX_NAME_CHARS`] characters plus `...` when longer.
pub fn truncate_name(name: &str) -> String {
    if name.chars().count() > MAX_NAME_CHARS {
        let head: String = name.chars().take(MAX_NAME_CHARS).collect();
        format!("{}...", head)
    } else {
        name.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn long_names_are_truncated_with_ellipsis() {
        assert_eq!(truncate_name("Implement authentication module"), "Implement authe...");
        assert_eq!(truncate_name("Exactly fifteen"), "Exactly fifteen");
        assert_eq!(truncate_name("Überprüfung der Qualität"), "Überprüfung der...");
    }

    #[test]
    fn arrow_opens_away_from_travel_direction() {
        let right = arrow_head(Pos2::new(100.0, 50.0), 0.0);
        assert!(right[1].x < 100.0 && right[2].x < 100.0);
        let left = arrow_head(Pos2::new(100.0, 50.0), PI);
        assert!(left[1].x > 100.0 && left[2].x > 100.0);
    }
}
