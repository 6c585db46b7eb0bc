//! Dependency connector geometry.

use std::collections::HashMap;
use std::f32::consts::PI;

use egui::{Pos2, Vec2};

use super::coords::CoordinateMapper;
use crate::model::{Relationship, Task};

/// Segments used when flattening a connector for hit-testing.
const FLATTEN_SEGMENTS: usize = 24;

/// Cubic Bézier from `points[0]` to `points[3]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePath {
    pub points: [Pos2; 4],
}

impl CurvePath {
    /// S-curve leaving and entering horizontally, both control points on the mid x.
    pub fn s_curve(from: Pos2, to: Pos2) -> Self {
        let mid_x = (from.x + to.x) / 2.0;
        Self {
            points: [from, Pos2::new(mid_x, from.y), Pos2::new(mid_x, to.y), to],
        }
    }

    pub fn sample(&self, t: f32) -> Pos2 {
        let [p0, p1, p2, p3] = self.points;
        let u = 1.0 - t;
        let v = p0.to_vec2() * (u * u * u)
            + p1.to_vec2() * (3.0 * u * u * t)
            + p2.to_vec2() * (3.0 * u * t * t)
            + p3.to_vec2() * (t * t * t);
        v.to_pos2()
    }

    pub fn midpoint(&self) -> Pos2 {
        self.sample(0.5)
    }

    pub fn flatten(&self, segments: usize) -> Vec<Pos2> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|i| self.sample(i as f32 / segments as f32))
            .collect()
    }

    /// Shortest distance from `point` to the flattened curve.
    pub fn distance_to(&self, point: Pos2) -> f32 {
        self.flatten(FLATTEN_SEGMENTS)
            .windows(2)
            .map(|w| distance_to_segment(point, w[0], w[1]))
            .fold(f32::INFINITY, f32::min)
    }
}

fn distance_to_segment(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab: Vec2 = b - a;
    let len_sq = ab.length_sq();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// A relationship resolved against the current task order, rebuilt every draw pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipLine {
    pub relationship: Relationship,
    /// Row of the source task.
    pub source: usize,
    /// Row of the target task.
    pub target: usize,
    pub from: Pos2,
    pub to: Pos2,
    pub path: CurvePath,
    /// 0 when travelling right, π otherwise.
    pub arrow_angle: f32,
}

/// Resolve every relationship whose endpoints are both in `tasks`.
///
/// Dangling relationships are skipped. Lag shifts only the target endpoint,
/// by `lag * unit_width` pixels.
pub fn route_relationships(
    tasks: &[Task],
    relationships: &[Relationship],
    mapper: &CoordinateMapper<'_>,
) -> Vec<RelationshipLine> {
    let mut rows: HashMap<&str, usize> = HashMap::with_capacity(tasks.len());
    for (row, task) in tasks.iter().enumerate() {
        rows.entry(task.id.as_str()).or_insert(row);
    }

    relationships
        .iter()
        .filter_map(|rel| {
            let (Some(&source), Some(&target)) =
                (rows.get(rel.source.as_str()), rows.get(rel.target.as_str()))
            else {
                tracing::debug!(
                    relationship = %rel.id,
                    source = %rel.source,
                    target = %rel.target,
                    "dropping relationship with unknown task"
                );
                return None;
            };
            Some(route(rel, source, &tasks[source], target, &tasks[target], mapper))
        })
        .collect()
}

fn route(
    rel: &Relationship,
    source: usize,
    source_task: &Task,
    target: usize,
    target_task: &Task,
    mapper: &CoordinateMapper<'_>,
) -> RelationshipLine {
    let from_date = if rel.kind.from_source_end() {
        source_task.end
    } else {
        source_task.start
    };
    let to_date = if rel.kind.into_target_end() {
        target_task.end
    } else {
        target_task.start
    };

    let from_x = mapper.x_for_date(from_date);
    let mut to_x = mapper.x_for_date(to_date);
    if let Some(lag) = rel.lag {
        to_x += lag * mapper.unit_width();
    }

    let from = Pos2::new(from_x, mapper.row_center(source));
    let to = Pos2::new(to_x, mapper.row_center(target));
    let arrow_angle = if from.x < to.x { 0.0 } else { PI };

    RelationshipLine {
        relationship: rel.clone(),
        source,
        target,
        from,
        to,
        path: CurvePath::s_curve(from, to),
        arrow_angle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RelationshipKind, RenderState, ViewMode};
    use chrono::{NaiveDate, NaiveDateTime};

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
        ]
    }

    #[test]
    fn endpoints_follow_relationship_kind() {
        let s = state();
        let mapper = CoordinateMapper::new(&s, ViewMode::Day, 50.0, 40.0, 24.0, 2);
        let expected = [
            (RelationshipKind::FinishToStart, 120.0, 150.0),
            (RelationshipKind::StartToStart, 30.0, 150.0),
            (RelationshipKind::FinishToFinish, 120.0, 270.0),
            (RelationshipKind::StartToFinish, 30.0, 270.0),
        ];
        for (kind, from_x, to_x) in expected {
            let rels = [Relationship::new("r", "A", "B", kind)];
            let lines = route_relationships(&tasks(), &rels, &mapper);
            assert_eq!(lines.len(), 1);
            assert_eq!(lines[0].from, Pos2::new(from_x, 70.0), "{:?}", kind);
            assert_eq!(lines[0].to, Pos2::new(to_x, 110.0), "{:?}", kind);
        }
    }

    #[test]
    fn lag_shifts_target_by_unit_width() {
        let s = state();
        let mapper = CoordinateMapper::new(&s, ViewMode::Day, 50.0, 40.0, 24.0, 2);
        let rels = [
            Relationship::new("fs", "A", "B", RelationshipKind::FinishToStart).with_lag(2.0),
            Relationship::new("ss", "A", "B", RelationshipKind::StartToStart),
        ];
        let lines = route_relationships(&tasks(), &rels, &mapper);
        assert_eq!(lines[0].to.x - lines[1].to.x, 60.0);
        assert_eq!(lines[0].from.x, 120.0);
    }

    #[test]
    fn curve_is_horizontal_at_both_ends() {
        let path = CurvePath::s_curve(Pos2::new(10.0, 20.0), Pos2::new(110.0, 80.0));
        assert_eq!(path.points[1], Pos2::new(60.0, 20.0));
        assert_eq!(path.points[2], Pos2::new(60.0, 80.0));
        assert_eq!(path.midpoint(), Pos2::new(60.0, 50.0));
    }

    #[test]
    fn arrow_points_in_travel_direction() {
        let s = state();
        let mapper = CoordinateMapper::new(&s, ViewMode::Day, 50.0, 40.0, 24.0, 2);
        for kind in RelationshipKind::ALL {
            let forward = route_relationships(&tasks(), &[Relationship::new("f", "A", "B", kind)], &mapper);
            let backward = route_relationships(&tasks(), &[Relationship::new("b", "B", "A", kind)], &mapper);
            for line in forward.iter().chain(&backward) {
                let expected = if line.from.x < line.to.x { 0.0 } else { PI };
                assert_eq!(line.arrow_angle, expected, "{:?}", kind);
            }
            assert_eq!(backward[0].arrow_angle, PI, "{:?}", kind);
        }
        // Vertical connectors still point horizontally.
        let same_x = route_relationships(
            &tasks(),
            &[Relationship::new("v", "A", "A", RelationshipKind::StartToStart)],
            &mapper,
        );
        assert_eq!(same_x[0].arrow_angle, PI);
    }

    #[test]
    fn dangling_relationships_are_dropped() {
        let s = state();
        let mapper = CoordinateMapper::new(&s, ViewMode::Day, 50.0, 40.0, 24.0, 2);
        let rels = [
            Relationship::new("ok", "A", "B", RelationshipKind::FinishToStart),
            Relationship::new("ghost-source", "Z", "B", RelationshipKind::FinishToStart),
            Relationship::new("ghost-target", "A", "Z", RelationshipKind::FinishToStart),
        ];
        let lines = route_relationships(&tasks(), &rels, &mapper);
        let ids: Vec<_> = lines.iter().map(|l| l.relationship.id.as_str()).collect();
        assert_eq!(ids, ["ok"]);
    }

    #[test]
    fn distance_is_zero_on_the_curve() {
        let path = CurvePath::s_curve(Pos2::new(0.0, 0.0), Pos2::new(100.0, 100.0));
        assert!(path.distance_to(path.midpoint()) < 1e-3);
        assert!(path.distance_to(Pos2::new(0.0, 100.0)) > 20.0);
    }
}
