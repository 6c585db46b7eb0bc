pub mod file;

pub use file::{default_chart_path, load_chart, parse_chart, LoadError};
