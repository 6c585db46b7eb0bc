//! Host-supplied chart configuration.
//!
//! All fields carry `#[serde(default)]` so that a partial JSON file is valid:
//! missing keys silently fall back to the built-in defaults.

use serde::{Deserialize, Serialize};

use super::task::{Relationship, Task};
use super::timeline::ViewMode;

const DEFAULT_ROW_HEIGHT: f32 = 40.0;
const DEFAULT_BAR_HEIGHT: f32 = 24.0;
const DEFAULT_HEADER_HEIGHT: f32 = 50.0;
const DEFAULT_TOOLTIP_WIDTH: f32 = 250.0;

/// Color palette selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Light,
    Dark,
}

impl ThemeName {
    pub fn name(self) -> &'static str {
        match self {
            ThemeName::Light => "Light",
            ThemeName::Dark => "Dark",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Row order follows list order.
    pub tasks: Vec<Task>,
    pub relationships: Vec<Relationship>,
    pub view_mode: ViewMode,
    pub theme: ThemeName,
    pub row_height: f32,
    /// Bar thickness, vertically centred in its row.
    pub bar_height: f32,
    pub header_height: f32,
    /// Gates both tooltip kinds.
    pub show_tooltips: bool,
    /// Gates dependency routing, drawing and hit-testing.
    pub show_relationships: bool,
    /// Width assumed for the task tooltip when keeping it on screen.
    pub tooltip_width: f32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            relationships: Vec::new(),
            view_mode: ViewMode::default(),
            theme: ThemeName::default(),
            row_height: DEFAULT_ROW_HEIGHT,
            bar_height: DEFAULT_BAR_HEIGHT,
            header_height: DEFAULT_HEADER_HEIGHT,
            show_tooltips: true,
            show_relationships: true,
            tooltip_width: DEFAULT_TOOLTIP_WIDTH,
        }
    }
}

impl ChartConfig {
    pub fn new(tasks: Vec<Task>, relationships: Vec<Relationship>) -> Self {
        Self {
            tasks,
            relationships,
            ..Default::default()
        }
    }

    /// Coerce sizes into a drawable state instead of rejecting them.
    pub fn normalized(mut self) -> Self {
        if !(self.row_height.is_finite() && self.row_height > 0.0) {
            self.row_height = DEFAULT_ROW_HEIGHT;
        }
        self.bar_height = if self.bar_height.is_finite() {
            self.bar_height.clamp(0.0, self.row_height)
        } else {
            self.row_height.min(DEFAULT_BAR_HEIGHT)
        };
        if !(self.header_height.is_finite() && self.header_height >= 0.0) {
            self.header_height = DEFAULT_HEADER_HEIGHT;
        }
        if !(self.tooltip_width.is_finite() && self.tooltip_width >= 0.0) {
            self.tooltip_width = DEFAULT_TOOLTIP_WIDTH;
        }
        self
    }
}
