use std::path::PathBuf;

use chrono::{Duration, NaiveDate};
use egui::{Color32, RichText, Sense};

use gantt_canvas::io::load_chart;
use gantt_canvas::ui::toolbar::{self, ToolbarAction, ViewOptions};
use gantt_canvas::ui::tooltip::EguiOverlay;
use gantt_canvas::ui::{canvas, theme};
use gantt_canvas::{ChartConfig, DisplayList, GanttChart, Relationship, RelationshipKind, Surface, Task};

/// Where the initial chart came from.
pub struct Startup {
    pub config: ChartConfig,
    pub source: Option<PathBuf>,
    pub status: String,
}

/// Main application state.
pub struct GanttViewer {
    chart: GanttChart<DisplayList, EguiOverlay>,
    source: Option<PathBuf>,
    status_message: String,
    pointer_inside: bool,
}

impl GanttViewer {
    pub fn new(cc: &eframe::CreationContext<'_>, startup: Startup) -> Self {
        theme::apply_visuals(&cc.egui_ctx, startup.config.theme);

        let overlay = EguiOverlay::new(startup.config.tooltip_width);
        let mut chart = GanttChart::new(startup.config, overlay);
        chart.initialize(Some(DisplayList::new()));

        Self {
            chart,
            source: startup.source,
            status_message: startup.status,
            pointer_inside: false,
        }
    }

    /// Generate a sample chart for demonstration.
    pub fn sample_config(today: NaiveDate) -> ChartConfig {
        let day = |offset: i64| today + Duration::days(offset);

        let tasks = vec![
            Task::from_dates("kickoff", "Project Kickoff", day(-5), day(-2))
                .with_progress(100.0)
                .with_color(Color32::from_rgb(70, 130, 180)),
            Task::from_dates("requirements", "Requirements Gathering", day(-2), day(5))
                .with_progress(60.0)
                .with_color(Color32::from_rgb(60, 179, 113)),
            Task::from_dates("design", "UI Design", day(6), day(18))
                .with_color(Color32::from_rgb(218, 112, 214)),
            Task::from_dates("backend", "Backend Development", day(6), day(28))
                .with_progress(10.0)
                .with_color(Color32::from_rgb(106, 90, 205)),
            Task::from_dates("qa", "Testing & QA", day(22), day(30))
                .with_color(Color32::from_rgb(220, 20, 60)),
            Task::from_dates("launch", "Launch", day(30), day(32)),
        ];

        let relationships = vec![
            Relationship::new("r1", "kickoff", "requirements", RelationshipKind::FinishToStart),
            Relationship::new("r2", "requirements", "design", RelationshipKind::FinishToStart)
                .with_lag(10.0),
            Relationship::new("r3", "design", "backend", RelationshipKind::StartToStart),
            Relationship::new("r4", "backend", "qa", RelationshipKind::FinishToFinish),
            Relationship::new("r5", "qa", "launch", RelationshipKind::StartToFinish),
        ];

        ChartConfig::new(tasks, relationships)
    }

    // --- File operations ---

    fn reload(&mut self) {
        let Some(path) = self.source.clone() else {
            return;
        };
        match load_chart(&path) {
            Ok(config) => {
                self.apply_config(config);
                self.status_message = format!("Reloaded {}", path.display());
            }
            Err(e) => {
                tracing::warn!(error = %e, "reload failed");
                self.status_message = format!("Error loading: {}", e);
            }
        }
    }

    fn apply_config(&mut self, config: ChartConfig) {
        let width = config.tooltip_width;
        self.chart.update_config(config);
        self.chart.overlay_mut().set_tooltip_width(width);
    }

    fn apply_options(&mut self, ctx: &egui::Context, options: ViewOptions) {
        if options.theme != self.chart.config().theme {
            theme::apply_visuals(ctx, options.theme);
        }
        let mut config = self.chart.config().clone();
        options.apply_to(&mut config);
        self.apply_config(config);
        self.status_message = format!("{} view", options.view_mode.name());
    }

    fn title(&self) -> String {
        match &self.source {
            Some(path) => path.display().to_string(),
            None => "Sample chart".to_string(),
        }
    }

    // --- Panels ---

    fn show_chart(&mut self, ui: &mut egui::Ui) {
        let size = canvas::fit(ui.available_size());
        let (response, painter) = ui.allocate_painter(size, Sense::hover());
        let origin = response.rect.min;
        self.chart.overlay_mut().set_frame(origin, response.rect.right());

        let container = Some(response.rect.size());
        if let Some(surface) = self.chart.surface_mut() {
            if surface.container_size() != container {
                surface.set_container_size(container);
                self.chart.on_resize();
            }
        }

        match response.hover_pos() {
            Some(pos) => {
                self.chart.on_pointer_move(pos - origin.to_vec2());
                self.pointer_inside = true;
            }
            None if self.pointer_inside => {
                self.chart.on_pointer_leave();
                self.pointer_inside = false;
            }
            None => {}
        }

        if let Some(list) = self.chart.surface() {
            canvas::paint(&painter, origin, list);
        }
        self.chart.overlay().show_ui(ui.ctx());
    }

    fn show_status_bar(&self, ui: &mut egui::Ui) {
        let config = self.chart.config();
        let dim = theme::palette(config.theme).text_dim;
        ui.horizontal(|ui| {
            ui.label(RichText::new(format!("{} tasks", config.tasks.len())).size(11.0).color(dim));
            ui.separator();
            ui.label(
                RichText::new(format!("{} relationships", config.relationships.len()))
                    .size(11.0)
                    .color(dim),
            );
            ui.separator();
            ui.label(RichText::new(config.view_mode.name()).size(11.0).color(dim));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(RichText::new(&self.status_message).size(11.0).color(dim));
            });
        });
    }
}

impl eframe::App for GanttViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let options = ViewOptions::from_config(self.chart.config());
        let title = self.title();
        let can_reload = self.source.is_some();

        let mut action = ToolbarAction::None;
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            action = toolbar::show_toolbar(ui, options, &title, can_reload);
        });
        match action {
            ToolbarAction::OptionsChanged(options) => self.apply_options(ctx, options),
            ToolbarAction::Reload => self.reload(),
            ToolbarAction::Quit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
            ToolbarAction::None => {}
        }

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            self.show_status_bar(ui);
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| self.show_chart(ui));
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.chart.teardown();
    }
}
