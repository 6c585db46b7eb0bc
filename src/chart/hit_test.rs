use egui::Pos2;

use super::coords::CoordinateMapper;
use super::routing::RelationshipLine;
use crate::model::Task;

/// Stroke width a pointer must fall inside to hit a connector.
pub const RELATIONSHIP_HIT_WIDTH: f32 = 6.0;

/// Task whose row is under `pos` and whose bar spans `pos.x`.
///
/// Anywhere in the row counts vertically.
pub fn task_at<'t>(tasks: &'t [Task], mapper: &CoordinateMapper<'_>, pos: Pos2) -> Option<(usize, &'t Task)> {
    let row = mapper.row_at(pos.y)?;
    let task = tasks.get(row)?;
    let x_start = mapper.x_for_date(task.start);
    let x_end = mapper.x_for_date(task.end);
    (pos.x >= x_start && pos.x <= x_end).then_some((row, task))
}

/// First line, in relationship order, whose stroke contains `pos`, with its index.
pub fn relationship_at(lines: &[RelationshipLine], pos: Pos2) -> Option<(usize, &RelationshipLine)> {
    let tolerance = RELATIONSHIP_HIT_WIDTH / 2.0;
    lines
        .iter()
        .enumerate()
        .find(|(_, line)| line.path.distance_to(pos) <= tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::routing::route_relationships;
    use crate::model::{Relationship, RelationshipKind, RenderState, ViewMode};
    use chrono::{NaiveDate, NaiveDateTime};
    use egui::Vec2;

    fn at(m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn state() -> RenderState {
        RenderState {
            start: at(1, 1),
            end: at(2, 1),
            unit_width: 30.0,
            size: Vec2::new(1000.0, 400.0),
        }
    }

    fn tasks() -> Vec<Task> {
        vec![
            Task::new("A", "Alpha", at(1, 2), at(1, 5)),
            Task::new("B", "Beta", at(1, 6), at(1, 10)),
            Task::new("C", "Gamma", at(1, 8), at(1, 12)),
        ]
    }

    #[test]
    fn finds_task_anywhere_inside_its_bar_span() {
        let s = state();
        let tasks = tasks();
        let mapper = CoordinateMapper::new(&s, ViewMode::Day, 50.0, 40.0, 24.0, tasks.len());
        for (row, task) in tasks.iter().enumerate() {
            let y = mapper.y_for_row(row);
            for x in [mapper.x_for_date(task.start), mapper.x_for_date(task.end)] {
                let hit = task_at(&tasks, &mapper, Pos2::new(x, y)).map(|(_, t)| t.id.as_str());
                assert_eq!(hit, Some(task.id.as_str()));
            }
        }
    }

    #[test]
    fn misses_outside_bar_or_rows() {
        let s = state();
        let tasks = tasks();
        let mapper = CoordinateMapper::new(&s, ViewMode::Day, 50.0, 40.0, 24.0, tasks.len());
        assert!(task_at(&tasks, &mapper, Pos2::new(200.0, 70.0)).is_none());
        assert!(task_at(&tasks, &mapper, Pos2::new(60.0, 20.0)).is_none());
        assert!(task_at(&tasks, &mapper, Pos2::new(60.0, 500.0)).is_none());
    }

    #[test]
    fn connector_hit_uses_stroke_not_bounding_box() {
        let s = state();
        let tasks = tasks();
        let mapper = CoordinateMapper::new(&s, ViewMode::Day, 50.0, 40.0, 24.0, tasks.len());
        let rels = [Relationship::new("ab", "A", "B", RelationshipKind::FinishToStart)];
        let lines = route_relationships(&tasks, &rels, &mapper);
        let mid = lines[0].path.midpoint();
        assert_eq!(relationship_at(&lines, mid).map(|(_, l)| l.relationship.id.as_str()), Some("ab"));
        assert_eq!(
            relationship_at(&lines, mid + Vec2::new(0.0, 2.5)).map(|(_, l)| l.relationship.id.as_str()),
            Some("ab")
        );
        // Inside the curve's bounding box, far from the stroke.
        let corner = Pos2::new(lines[0].from.x + 2.0, lines[0].to.y - 2.0);
        assert!(relationship_at(&lines, corner).is_none());
    }

    #[test]
    fn overlapping_connectors_resolve_to_first_in_order() {
        let s = state();
        let tasks = tasks();
        let mapper = CoordinateMapper::new(&s, ViewMode::Day, 50.0, 40.0, 24.0, tasks.len());
        let rels = [
            Relationship::new("first", "A", "B", RelationshipKind::FinishToStart),
            Relationship::new("second", "A", "B", RelationshipKind::FinishToStart),
        ];
        let lines = route_relationships(&tasks, &rels, &mapper);
        let (index, hit) = relationship_at(&lines, lines[1].path.midpoint()).unwrap();
        assert_eq!(index, 0);
        assert_eq!(hit.relationship.id, "first");
    }
}
