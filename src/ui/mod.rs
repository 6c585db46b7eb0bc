pub mod canvas;
pub mod theme;
pub mod toolbar;
pub mod tooltip;
