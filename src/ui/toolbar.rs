use egui::{menu, RichText, Ui};

use crate::model::{ChartConfig, ThemeName, ViewMode};
use crate::ui::theme;

/// The subset of [`ChartConfig`] the menu bar edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    pub view_mode: ViewMode,
    pub theme: ThemeName,
    pub show_tooltips: bool,
    pub show_relationships: bool,
}

impl ViewOptions {
    pub fn from_config(config: &ChartConfig) -> Self {
        Self {
            view_mode: config.view_mode,
            theme: config.theme,
            show_tooltips: config.show_tooltips,
            show_relationships: config.show_relationships,
        }
    }

    pub fn apply_to(self, config: &mut ChartConfig) {
        config.view_mode = self.view_mode;
        config.theme = self.theme;
        config.show_tooltips = self.show_tooltips;
        config.show_relationships = self.show_relationships;
    }
}

/// What the user asked for from the menu bar this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    None,
    OptionsChanged(ViewOptions),
    Reload,
    Quit,
}

/// Render the top menu bar.
pub fn show_toolbar(ui: &mut Ui, current: ViewOptions, title: &str, can_reload: bool) -> ToolbarAction {
    let mut options = current;
    let mut action = ToolbarAction::None;

    menu::bar(ui, |ui| {
        ui.menu_button(menu_label("File"), |ui| {
            if ui
                .add_enabled(can_reload, egui::Button::new("  Reload"))
                .clicked()
            {
                action = ToolbarAction::Reload;
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Quit").clicked() {
                action = ToolbarAction::Quit;
                ui.close_menu();
            }
        });

        ui.menu_button(menu_label("View"), |ui| {
            ui.label(RichText::new("Timeline Scale").small().weak());
            for mode in ViewMode::ALL {
                if ui.radio_value(&mut options.view_mode, mode, mode.name()).clicked() {
                    ui.close_menu();
                }
            }
            ui.separator();
            ui.label(RichText::new("Theme").small().weak());
            for name in [ThemeName::Light, ThemeName::Dark] {
                if ui.radio_value(&mut options.theme, name, name.name()).clicked() {
                    ui.close_menu();
                }
            }
            ui.separator();
            ui.checkbox(&mut options.show_tooltips, "Tooltips");
            ui.checkbox(&mut options.show_relationships, "Relationships");
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(RichText::new(title).size(11.0).weak());
        });
    });

    if action == ToolbarAction::None && options != current {
        action = ToolbarAction::OptionsChanged(options);
    }
    action
}

fn menu_label(text: &str) -> RichText {
    RichText::new(format!("  {}  ", text)).font(theme::font(theme::MENU_FONT_SIZE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_round_trip_through_config() {
        let mut config = ChartConfig::default();
        let options = ViewOptions {
            view_mode: ViewMode::Year,
            theme: ThemeName::Dark,
            show_tooltips: false,
            show_relationships: false,
        };
        options.apply_to(&mut config);
        assert_eq!(ViewOptions::from_config(&config), options);
        assert_eq!(config.row_height, ChartConfig::default().row_height);
    }
}
