//! Visible date range and unit scaling.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::model::{Task, ViewMode};

const MILLIS_PER_DAY: f64 = 86_400_000.0;
const PADDING_RATIO: f64 = 0.05;

/// Fractional days from `start` to `end`; negative when `end` is earlier.
pub fn days_between(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    (end - start).num_milliseconds() as f64 / MILLIS_PER_DAY
}

/// Elapsed whole days, rounded up. Never negative.
pub fn total_days(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    days_between(start, end).max(0.0).ceil() as i64
}

/// Padded range covering every task.
///
/// An empty task list yields the current calendar year, unpadded.
pub fn compute_range(tasks: &[Task], now: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
    let (Some(min_start), Some(max_end)) = (
        tasks.iter().map(|t| t.start).min(),
        tasks.iter().map(|t| t.end).max(),
    ) else {
        return year_range(now.year());
    };
    // Every task inverted: fall back to a zero-length span.
    let max_end = max_end.max(min_start);

    let padding_days = (total_days(min_start, max_end) as f64 * PADDING_RATIO).ceil() as i64;
    let padding = Duration::days(padding_days);
    (
        min_start.checked_sub_signed(padding).unwrap_or(min_start),
        max_end.checked_add_signed(padding).unwrap_or(max_end),
    )
}

/// First and last instant of `year`.
fn year_range(year: i32) -> (NaiveDateTime, NaiveDateTime) {
    let first = NaiveDate::from_ymd_opt(year, 1, 1)
        .map(|d| d.and_time(NaiveTime::MIN))
        .unwrap_or(NaiveDateTime::MIN);
    let last = NaiveDate::from_ymd_opt(year, 12, 31)
        .and_then(|d| d.and_hms_milli_opt(23, 59, 59, 999))
        .unwrap_or(first);
    (first, last)
}

/// Number of view-mode units spanned by the range, counted on the calendar.
///
/// Months and years are inclusive, so a range from Jan 31 to Feb 1 is two months.
pub fn total_units(view_mode: ViewMode, start: NaiveDateTime, end: NaiveDateTime) -> u32 {
    let units = match view_mode {
        ViewMode::Day => total_days(start, end),
        ViewMode::Week => (total_days(start, end) as f64 / 7.0).ceil() as i64,
        ViewMode::Month => month_index(end) - month_index(start) + 1,
        ViewMode::Year => (end.year() - start.year()) as i64 + 1,
    };
    units.clamp(0, u32::MAX as i64) as u32
}

/// `year * 12 + month0`, for calendar month arithmetic.
pub(crate) fn month_index(date: NaiveDateTime) -> i64 {
    date.year() as i64 * 12 + date.month0() as i64
}

/// Width that spreads `total_units` across the canvas, clamped to the mode's bounds.
pub fn optimal_unit_width(view_mode: ViewMode, total_units: u32, canvas_width: f32) -> f32 {
    let bounds = view_mode.unit_width();
    if total_units == 0 {
        return bounds.max;
    }
    if !(canvas_width.is_finite() && canvas_width > 0.0) {
        return bounds.optimal;
    }
    bounds.clamp(canvas_width / total_units as f32)
}
