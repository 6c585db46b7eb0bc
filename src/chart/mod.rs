//! The chart engine: layout, routing, hit-testing, hover and painting.
//!
//! Every operation runs to completion synchronously and repaints the whole
//! surface when it paints at all. Nothing here returns an error; bad input
//! degrades into an emptier chart.

pub mod coords;
pub mod hit_test;
pub mod interaction;
pub mod routing;
pub mod scene;
pub mod surface;
pub mod time_axis;

use chrono::NaiveDateTime;
use egui::{CursorIcon, Pos2};

use crate::model::{ChartConfig, RenderState};
use crate::ui::theme;
use coords::CoordinateMapper;
use interaction::{HoverChannel, HoverState, Overlay};
use routing::RelationshipLine;
use surface::Surface;

pub use interaction::TooltipContent;
pub use surface::{DisplayList, DrawCommand};

/// Source of "now" for the empty-range fallback and the today marker.
pub type Clock = fn() -> NaiveDateTime;

fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Interactive Gantt chart bound to a host surface and overlay.
pub struct GanttChart<S: Surface, O: Overlay> {
    config: ChartConfig,
    surface: Option<S>,
    overlay: O,
    range: Option<(NaiveDateTime, NaiveDateTime)>,
    state: Option<RenderState>,
    lines: Vec<RelationshipLine>,
    hover: HoverState,
    clock: Clock,
}

impl<S: Surface, O: Overlay> GanttChart<S, O> {
    pub fn new(config: ChartConfig, overlay: O) -> Self {
        Self {
            config: config.normalized(),
            surface: None,
            overlay,
            range: None,
            state: None,
            lines: Vec::new(),
            hover: HoverState::default(),
            clock: local_now,
        }
    }

    /// Replace the wall clock, e.g. to pin "today" in tests.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    // ── Lifecycle ───────────────────────────────────────────────

    /// Attach the drawing surface and paint the first frame.
    ///
    /// With no surface the chart stays inert.
    pub fn initialize(&mut self, surface: Option<S>) {
        self.surface = surface;
        self.refresh();
    }

    /// Swap in new tasks and options, then refresh.
    pub fn update_config(&mut self, config: ChartConfig) {
        self.config = config.normalized();
        self.hover.clear();
        self.overlay.hide(HoverChannel::Task);
        self.overlay.hide(HoverChannel::Relationship);
        self.refresh();
    }

    /// Recompute the date range, fit the surface to its container and repaint.
    pub fn refresh(&mut self) {
        let range = time_axis::compute_range(&self.config.tasks, (self.clock)());
        tracing::debug!(
            tasks = self.config.tasks.len(),
            relationships = self.config.relationships.len(),
            start = %range.0,
            end = %range.1,
            "refreshing chart"
        );
        self.range = Some(range);
        self.on_resize();
    }

    /// Fit the surface to its container and repaint.
    pub fn on_resize(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let Some(size) = surface.container_size() else {
            tracing::debug!("no container; skipping draw");
            return;
        };
        surface.resize(size);

        let (start, end) = match self.range {
            Some(range) => range,
            None => {
                let range = time_axis::compute_range(&self.config.tasks, (self.clock)());
                self.range = Some(range);
                range
            }
        };
        let view_mode = self.config.view_mode;
        let units = time_axis::total_units(view_mode, start, end);
        let unit_width = time_axis::optimal_unit_width(view_mode, units, size.x);
        tracing::debug!(?view_mode, units, unit_width, width = size.x, height = size.y, "layout");

        self.state = Some(RenderState {
            start,
            end,
            unit_width,
            size,
        });
        self.draw();
    }

    /// Hit-test the pointer, update hover and tooltips. Returns true if the surface was repainted.
    pub fn on_pointer_move(&mut self, pos: Pos2) -> bool {
        let Some(state) = self.state.as_ref() else {
            return false;
        };
        let mapper = self.mapper(state);
        let tasks = &self.config.tasks;

        let task_hit = hit_test::task_at(tasks, &mapper, pos);
        let line_hit = if self.config.show_relationships {
            hit_test::relationship_at(&self.lines, pos)
        } else {
            None
        };

        let change = self.hover.update(
            task_hit.map(|(_, t)| t.id.as_str()),
            line_hit.map(|(index, _)| index),
        );

        if self.config.show_tooltips {
            match task_hit {
                Some((_, task)) => {
                    let at = interaction::task_tooltip_position(
                        pos,
                        self.overlay.viewport_width(),
                        self.config.tooltip_width,
                    );
                    self.overlay
                        .show(HoverChannel::Task, &interaction::task_tooltip(task), at);
                }
                None if change.task => self.overlay.hide(HoverChannel::Task),
                None => {}
            }
            match line_hit {
                Some((_, line)) => {
                    let content = interaction::relationship_tooltip(line, tasks);
                    let at = interaction::relationship_tooltip_position(pos);
                    self.overlay.show(HoverChannel::Relationship, &content, at);
                }
                None if change.relationship => self.overlay.hide(HoverChannel::Relationship),
                None => {}
            }
        }
        self.overlay.set_cursor(self.hover.cursor());

        if change.relationship {
            self.draw();
            return true;
        }
        false
    }

    /// Clear both hover channels, hide tooltips and reset the cursor.
    pub fn on_pointer_leave(&mut self) {
        let had_relationship = self.hover.relationship.is_some();
        self.hover.clear();
        self.overlay.hide(HoverChannel::Task);
        self.overlay.hide(HoverChannel::Relationship);
        self.overlay.set_cursor(CursorIcon::Default);
        if had_relationship {
            self.draw();
        }
    }

    /// Release tooltip elements. Safe to call more than once.
    pub fn teardown(&mut self) {
        self.hover.clear();
        self.overlay.release();
        tracing::debug!("chart torn down");
    }

    // ── Accessors ───────────────────────────────────────────────

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn state(&self) -> Option<&RenderState> {
        self.state.as_ref()
    }

    /// Connectors routed for the last frame.
    pub fn lines(&self) -> &[RelationshipLine] {
        &self.lines
    }

    pub fn hover(&self) -> &HoverState {
        &self.hover
    }

    /// The connector under the pointer, if any.
    pub fn hovered_line(&self) -> Option<&RelationshipLine> {
        self.hover.relationship.and_then(|index| self.lines.get(index))
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    pub fn overlay_mut(&mut self) -> &mut O {
        &mut self.overlay
    }

    /// Mapper for the current frame, if one has been laid out.
    pub fn coordinate_mapper(&self) -> Option<CoordinateMapper<'_>> {
        self.state.as_ref().map(|state| self.mapper(state))
    }

    // ── Painting ────────────────────────────────────────────────

    fn mapper<'a>(&self, state: &'a RenderState) -> CoordinateMapper<'a> {
        CoordinateMapper::new(
            state,
            self.config.view_mode,
            self.config.header_height,
            self.config.row_height,
            self.config.bar_height,
            self.config.tasks.len(),
        )
    }

    fn draw(&mut self) {
        let (Some(state), Some(surface)) = (self.state.as_ref(), self.surface.as_mut()) else {
            return;
        };
        let mapper = CoordinateMapper::new(
            state,
            self.config.view_mode,
            self.config.header_height,
            self.config.row_height,
            self.config.bar_height,
            self.config.tasks.len(),
        );

        self.lines = if self.config.show_relationships {
            routing::route_relationships(&self.config.tasks, &self.config.relationships, &mapper)
        } else {
            Vec::new()
        };

        let scene = scene::Scene {
            mapper,
            palette: theme::palette(self.config.theme),
            tasks: &self.config.tasks,
            lines: self.config.show_relationships.then_some(self.lines.as_slice()),
            hover: &self.hover,
            now: (self.clock)(),
        };
        scene::draw(surface, &scene);
    }
}
