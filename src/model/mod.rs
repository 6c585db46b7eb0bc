pub mod config;
pub mod hex_color;
pub mod task;
pub mod timeline;

pub use config::{ChartConfig, ThemeName};
pub use task::{Relationship, RelationshipKind, Task};
pub use timeline::{RenderState, UnitWidth, ViewMode};
