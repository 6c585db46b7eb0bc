//! Interactive Gantt chart engine.
//!
//! [`GanttChart`] turns a [`ChartConfig`] into a painted [`Surface`]: a
//! calendar header, grid, task bars and curved dependency connectors. Pointer
//! events drive hover highlighting and tooltips through an [`Overlay`].

pub mod chart;
pub mod io;
pub mod model;
pub mod ui;

pub use chart::interaction::{HoverChannel, HoverState, Overlay, TooltipContent};
pub use chart::surface::{DisplayList, DrawCommand, Surface};
pub use chart::GanttChart;
pub use model::{ChartConfig, Relationship, RelationshipKind, Task, ThemeName, ViewMode};
