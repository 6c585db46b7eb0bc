//! Date/row to pixel mapping.

use chrono::{Datelike, NaiveDateTime};
use egui::{Pos2, Rect};

use super::time_axis::{days_between, month_index};
use crate::model::{RenderState, ViewMode};

/// Pixel geometry for one draw pass.
///
/// Day and week views place dates by elapsed time; month and year views by
/// calendar component, so each view aligns to its own tick boundaries.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateMapper<'a> {
    state: &'a RenderState,
    view_mode: ViewMode,
    header_height: f32,
    row_height: f32,
    bar_height: f32,
    row_count: usize,
}

impl<'a> CoordinateMapper<'a> {
    pub fn new(
        state: &'a RenderState,
        view_mode: ViewMode,
        header_height: f32,
        row_height: f32,
        bar_height: f32,
        row_count: usize,
    ) -> Self {
        Self {
            state,
            view_mode,
            header_height,
            row_height,
            bar_height,
            row_count,
        }
    }

    pub fn state(&self) -> &'a RenderState {
        self.state
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn unit_width(&self) -> f32 {
        self.state.unit_width
    }

    pub fn header_height(&self) -> f32 {
        self.header_height
    }

    pub fn row_height(&self) -> f32 {
        self.row_height
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn x_for_date(&self, date: NaiveDateTime) -> f32 {
        let start = self.state.start;
        let units = match self.view_mode {
            ViewMode::Day => days_between(start, date),
            ViewMode::Week => days_between(start, date) / 7.0,
            ViewMode::Month => (month_index(date) - month_index(start)) as f64,
            ViewMode::Year => (date.year() - start.year()) as f64,
        };
        (units * self.state.unit_width as f64) as f32
    }

    /// Top edge of a row.
    pub fn y_for_row(&self, row: usize) -> f32 {
        self.header_height + row as f32 * self.row_height
    }

    pub fn row_center(&self, row: usize) -> f32 {
        self.y_for_row(row) + self.row_height / 2.0
    }

    /// Row under `y`, if it holds a task.
    pub fn row_at(&self, y: f32) -> Option<usize> {
        let row = ((y - self.header_height) / self.row_height).floor();
        (row >= 0.0 && row < self.row_count as f32).then_some(row as usize)
    }

    /// Bar rectangle for a task on `row`, vertically centred. Inverted spans get zero width.
    pub fn bar_rect(&self, row: usize, start: NaiveDateTime, end: NaiveDateTime) -> Rect {
        let x_start = self.x_for_date(start);
        let width = (self.x_for_date(end) - x_start).max(0.0);
        let top = self.y_for_row(row) + (self.row_height - self.bar_height) / 2.0;
        Rect::from_min_size(Pos2::new(x_start, top), egui::vec2(width, self.bar_height))
    }
}
