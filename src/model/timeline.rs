use chrono::{Duration, Months, NaiveDateTime};
use egui::Vec2;
use serde::{Deserialize, Serialize};

/// Calendar granularity of the time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Day,
    Week,
    Month,
    Year,
}

/// Pixel bounds for one time unit of a view mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitWidth {
    pub min: f32,
    pub optimal: f32,
    pub max: f32,
}

impl UnitWidth {
    pub fn clamp(&self, width: f32) -> f32 {
        width.clamp(self.min, self.max)
    }
}

const DAY_WIDTH: UnitWidth = UnitWidth { min: 30.0, optimal: 40.0, max: 60.0 };
const WEEK_WIDTH: UnitWidth = UnitWidth { min: 50.0, optimal: 80.0, max: 120.0 };
const MONTH_WIDTH: UnitWidth = UnitWidth { min: 80.0, optimal: 120.0, max: 200.0 };
const YEAR_WIDTH: UnitWidth = UnitWidth { min: 120.0, optimal: 200.0, max: 300.0 };

impl ViewMode {
    pub const ALL: [ViewMode; 4] = [ViewMode::Day, ViewMode::Week, ViewMode::Month, ViewMode::Year];

    pub fn unit_width(self) -> &'static UnitWidth {
        match self {
            ViewMode::Day => &DAY_WIDTH,
            ViewMode::Week => &WEEK_WIDTH,
            ViewMode::Month => &MONTH_WIDTH,
            ViewMode::Year => &YEAR_WIDTH,
        }
    }

    /// Next tick after `date`, stepping by one calendar unit.
    ///
    /// Month and year steps clamp to the last day of shorter months.
    pub fn next(self, date: NaiveDateTime) -> NaiveDateTime {
        let stepped = match self {
            ViewMode::Day => date.checked_add_signed(Duration::days(1)),
            ViewMode::Week => date.checked_add_signed(Duration::days(7)),
            ViewMode::Month => date.checked_add_months(Months::new(1)),
            ViewMode::Year => date.checked_add_months(Months::new(12)),
        };
        stepped.unwrap_or(NaiveDateTime::MAX)
    }

    /// `strftime` pattern for header tick labels.
    pub fn label_format(self) -> &'static str {
        match self {
            ViewMode::Day => "%b %d",
            ViewMode::Week => "W%V",
            ViewMode::Month => "%b %Y",
            ViewMode::Year => "%Y",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ViewMode::Day => "Day",
            ViewMode::Week => "Week",
            ViewMode::Month => "Month",
            ViewMode::Year => "Year",
        }
    }
}

/// Derived layout for one draw pass, rebuilt on every refresh and resize.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    /// Padded start of the visible range.
    pub start: NaiveDateTime,
    /// Padded end of the visible range. Never before `start`.
    pub end: NaiveDateTime,
    /// Pixels per view-mode unit, within the mode's bounds.
    pub unit_width: f32,
    /// Canvas size in pixels.
    pub size: Vec2,
}
