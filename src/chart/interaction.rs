//! Hover state and tooltip content.

use egui::{CursorIcon, Pos2, Vec2};

use super::routing::RelationshipLine;
use crate::model::Task;

/// Pointer offset applied to tooltip placement.
pub const TOOLTIP_OFFSET: Vec2 = Vec2::new(15.0, -15.0);
/// Margin kept between the task tooltip and the viewport's right edge.
pub const TOOLTIP_EDGE_MARGIN: f32 = 20.0;

const DATE_FORMAT: &str = "%b %d, %Y";

/// One of the two independent hover tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HoverChannel {
    Task,
    Relationship,
}

/// Host-side tooltip and cursor capability.
///
/// Positions share the coordinate space of the pointer positions passed to the chart.
pub trait Overlay {
    fn show(&mut self, channel: HoverChannel, content: &TooltipContent, at: Pos2);

    fn hide(&mut self, channel: HoverChannel);

    fn set_cursor(&mut self, cursor: CursorIcon);

    /// Right edge the task tooltip must stay clear of.
    fn viewport_width(&self) -> f32;

    /// Drop every tooltip element created so far.
    fn release(&mut self);
}

/// What a tooltip shows. The host decides how it looks.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipContent {
    pub title: String,
    pub lines: Vec<String>,
    /// Fraction 0–1 for the mini progress bar.
    pub progress: Option<f32>,
}

/// Currently hovered task and relationship.
///
/// Relationship ids need not be unique, so the relationship is tracked by its
/// position in the routed lines. Lines keep relationship order across redraws.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoverState {
    /// Task id.
    pub task: Option<String>,
    /// Index into the chart's routed lines.
    pub relationship: Option<usize>,
}

impl HoverState {
    pub fn is_empty(&self) -> bool {
        self.task.is_none() && self.relationship.is_none()
    }

    pub fn clear(&mut self) {
        self.task = None;
        self.relationship = None;
    }

    pub fn cursor(&self) -> CursorIcon {
        if self.is_empty() {
            CursorIcon::Default
        } else {
            CursorIcon::PointingHand
        }
    }
}

/// Which channels changed after a hit-test.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoverChange {
    pub task: bool,
    pub relationship: bool,
}

impl HoverState {
    /// Record what is under the pointer, reporting which channels changed identity.
    pub fn update(&mut self, task: Option<&str>, relationship: Option<usize>) -> HoverChange {
        let change = HoverChange {
            task: self.task.as_deref() != task,
            relationship: self.relationship != relationship,
        };
        if change.task {
            tracing::trace!(from = ?self.task, to = ?task, "task hover changed");
            self.task = task.map(str::to_owned);
        }
        if change.relationship {
            tracing::trace!(from = ?self.relationship, to = ?relationship, "relationship hover changed");
            self.relationship = relationship;
        }
        change
    }
}

pub fn task_tooltip(task: &Task) -> TooltipContent {
    let mut lines = vec![
        format!("Start: {}", task.start.format(DATE_FORMAT)),
        format!("End: {}", task.end.format(DATE_FORMAT)),
        format!("Duration: {} days", task.duration_days()),
    ];
    let progress = task.progress.filter(|p| *p != 0.0);
    if let Some(p) = progress {
        lines.push(format!("Progress: {}%", p.round()));
    }
    TooltipContent {
        title: task.name.clone(),
        lines,
        progress: progress.map(|p| (p / 100.0).clamp(0.0, 1.0)),
    }
}

pub fn relationship_tooltip(line: &RelationshipLine, tasks: &[Task]) -> TooltipContent {
    let name = |row: usize| tasks.get(row).map(|t| t.name.clone()).unwrap_or_default();
    let mut lines = vec![
        format!("From: {}", name(line.source)),
        format!("To: {}", name(line.target)),
    ];
    if let Some(lag) = line.relationship.lag.filter(|l| *l != 0.0) {
        lines.push(format!("Lag: {} days", lag));
    }
    TooltipContent {
        title: line.relationship.kind.label().to_owned(),
        lines,
        progress: None,
    }
}

/// Task tooltip placement, kept clear of the viewport's right edge.
pub fn task_tooltip_position(pointer: Pos2, viewport_width: f32, tooltip_width: f32) -> Pos2 {
    let at = pointer + TOOLTIP_OFFSET;
    let max_x = viewport_width - tooltip_width - TOOLTIP_EDGE_MARGIN;
    Pos2::new(at.x.min(max_x), at.y)
}

/// Relationship tooltip placement. Not clamped.
pub fn relationship_tooltip_position(pointer: Pos2) -> Pos2 {
    pointer + TOOLTIP_OFFSET
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::routing::CurvePath;
    use crate::model::{Relationship, RelationshipKind};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn task(progress: Option<f32>) -> Task {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let mut t = Task::from_dates("A", "Design", start, end);
        t.progress = progress;
        t
    }

    #[test]
    fn task_tooltip_lists_dates_duration_and_progress() {
        let content = task_tooltip(&task(Some(45.0)));
        assert_eq!(content.title, "Design");
        assert_eq!(
            content.lines,
            [
                "Start: Jan 01, 2024",
                "End: Jan 10, 2024",
                "Duration: 9 days",
                "Progress: 45%",
            ]
        );
        assert_eq!(content.progress, Some(0.45));
    }

    #[test]
    fn zero_progress_omits_progress_line() {
        for progress in [None, Some(0.0)] {
            let content = task_tooltip(&task(progress));
            assert_eq!(content.lines.len(), 3);
            assert_eq!(content.progress, None);
        }
    }

    fn line(lag: Option<f32>) -> RelationshipLine {
        let mut relationship = Relationship::new("r", "A", "B", RelationshipKind::StartToFinish);
        relationship.lag = lag;
        RelationshipLine {
            relationship,
            source: 0,
            target: 1,
            from: Pos2::ZERO,
            to: Pos2::new(10.0, 10.0),
            path: CurvePath::s_curve(Pos2::ZERO, Pos2::new(10.0, 10.0)),
            arrow_angle: 0.0,
        }
    }

    #[test]
    fn relationship_tooltip_names_both_tasks() {
        let mut other = task(None);
        other.name = "Build".into();
        let tasks = [task(None), other];
        let content = relationship_tooltip(&line(Some(2.0)), &tasks);
        assert_eq!(content.title, "Start to Finish");
        assert_eq!(content.lines, ["From: Design", "To: Build", "Lag: 2 days"]);

        let no_lag = relationship_tooltip(&line(Some(0.0)), &tasks);
        assert_eq!(no_lag.lines.len(), 2);
    }

    #[test]
    fn only_task_tooltip_is_clamped() {
        let pointer = Pos2::new(900.0, 200.0);
        assert_eq!(task_tooltip_position(pointer, 1000.0, 250.0), Pos2::new(730.0, 185.0));
        assert_eq!(task_tooltip_position(Pos2::new(100.0, 200.0), 1000.0, 250.0), Pos2::new(115.0, 185.0));
        assert_eq!(relationship_tooltip_position(pointer), Pos2::new(915.0, 185.0));
    }

    #[test]
    fn hover_channels_change_independently() {
        let mut hover = HoverState::default();
        assert_eq!(hover.cursor(), CursorIcon::Default);
        assert_eq!(hover.update(Some("A"), None), HoverChange { task: true, relationship: false });
        assert_eq!(hover.update(Some("A"), Some(0)), HoverChange { task: false, relationship: true });
        assert_eq!(hover.cursor(), CursorIcon::PointingHand);
        assert_eq!(hover.update(Some("A"), Some(0)), HoverChange::default());
        assert_eq!(hover.update(Some("A"), Some(1)), HoverChange { task: false, relationship: true });
        hover.clear();
        assert!(hover.is_empty());
    }
}
