#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;

use std::path::PathBuf;

use gantt_canvas::io::{default_chart_path, load_chart};
use tracing_subscriber::EnvFilter;

use app::{GanttViewer, Startup};

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let startup = startup(std::env::args_os().nth(1).map(PathBuf::from));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([640.0, 360.0])
            .with_title("Gantt Canvas"),
        ..Default::default()
    };

    eframe::run_native(
        "Gantt Canvas",
        options,
        Box::new(|cc| Ok(Box::new(GanttViewer::new(cc, startup)))),
    )
}

/// Chart from the command line, else the config directory, else the sample.
fn startup(arg: Option<PathBuf>) -> Startup {
    let candidate = arg.or_else(|| default_chart_path().filter(|path| path.is_file()));

    if let Some(path) = candidate {
        match load_chart(&path) {
            Ok(config) => {
                return Startup {
                    status: format!("Loaded {}", path.display()),
                    config,
                    source: Some(path),
                };
            }
            Err(e) => {
                tracing::error!(error = %e, "falling back to sample chart");
                return Startup {
                    config: GanttViewer::sample_config(chrono::Local::now().date_naive()),
                    source: None,
                    status: format!("Error loading: {}", e),
                };
            }
        }
    }

    Startup {
        config: GanttViewer::sample_config(chrono::Local::now().date_naive()),
        source: None,
        status: "Ready".to_string(),
    }
}
