//! egui-backed tooltips and cursor.

use egui::{Area, CursorIcon, Frame, Id, Order, Pos2, ProgressBar, RichText, Ui};

use crate::chart::interaction::{HoverChannel, Overlay, TooltipContent};
use crate::ui::theme;

#[derive(Debug, Clone)]
struct Tooltip {
    content: TooltipContent,
    at: Pos2,
    visible: bool,
}

/// Tooltip state for both hover channels, drawn by [`EguiOverlay::show_ui`].
///
/// Positions are canvas-local; `origin` maps them to screen space.
#[derive(Debug, Default)]
pub struct EguiOverlay {
    task: Option<Tooltip>,
    relationship: Option<Tooltip>,
    cursor: CursorIcon,
    viewport_width: f32,
    origin: Pos2,
    width: f32,
}

impl EguiOverlay {
    pub fn new(tooltip_width: f32) -> Self {
        Self {
            width: tooltip_width,
            ..Default::default()
        }
    }

    /// Place the canvas on screen and record the visible width right of it.
    pub fn set_frame(&mut self, origin: Pos2, screen_right: f32) {
        self.origin = origin;
        self.viewport_width = screen_right - origin.x;
    }

    pub fn set_tooltip_width(&mut self, width: f32) {
        self.width = width;
    }

    pub fn cursor(&self) -> CursorIcon {
        self.cursor
    }

    /// Whether any tooltip element has been created and not yet released.
    pub fn has_elements(&self) -> bool {
        self.task.is_some() || self.relationship.is_some()
    }

    fn slot(&mut self, channel: HoverChannel) -> &mut Option<Tooltip> {
        match channel {
            HoverChannel::Task => &mut self.task,
            HoverChannel::Relationship => &mut self.relationship,
        }
    }

    /// Draw visible tooltips and apply the cursor.
    pub fn show_ui(&self, ctx: &egui::Context) {
        ctx.set_cursor_icon(self.cursor);
        for (name, tooltip) in [("task-tip", &self.task), ("relationship-tip", &self.relationship)] {
            let Some(tooltip) = tooltip.as_ref().filter(|t| t.visible) else {
                continue;
            };
            Area::new(Id::new(name))
                .order(Order::Tooltip)
                .interactable(false)
                .fixed_pos(self.origin + tooltip.at.to_vec2())
                .show(ctx, |ui| {
                    Frame::popup(ui.style()).show(ui, |ui| {
                        ui.set_max_width(self.width);
                        tooltip_body(ui, &tooltip.content, self.width);
                    });
                });
        }
    }
}

fn tooltip_body(ui: &mut Ui, content: &TooltipContent, width: f32) {
    ui.label(RichText::new(&content.title).strong().size(theme::HEADER_FONT_SIZE));
    for line in &content.lines {
        ui.label(RichText::new(line).size(theme::BAR_FONT_SIZE));
    }
    if let Some(progress) = content.progress {
        ui.add(
            ProgressBar::new(progress)
                .desired_width((width - 16.0).max(40.0))
                .desired_height(4.0),
        );
    }
}

impl Overlay for EguiOverlay {
    fn show(&mut self, channel: HoverChannel, content: &TooltipContent, at: Pos2) {
        let slot = self.slot(channel);
        if let Some(tooltip) = slot.as_mut() {
            tooltip.content.clone_from(content);
            tooltip.at = at;
            tooltip.visible = true;
            return;
        }
        *slot = Some(Tooltip {
            content: content.clone(),
            at,
            visible: true,
        });
    }

    fn hide(&mut self, channel: HoverChannel) {
        if let Some(tooltip) = self.slot(channel) {
            tooltip.visible = false;
        }
    }

    fn set_cursor(&mut self, cursor: CursorIcon) {
        self.cursor = cursor;
    }

    fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    fn release(&mut self) {
        self.task = None;
        self.relationship = None;
        self.cursor = CursorIcon::Default;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content() -> TooltipContent {
        TooltipContent {
            title: "Design".into(),
            lines: vec!["Duration: 3 days".into()],
            progress: None,
        }
    }

    #[test]
    fn elements_are_created_lazily_and_released() {
        let mut overlay = EguiOverlay::new(250.0);
        assert!(!overlay.has_elements());
        overlay.hide(HoverChannel::Task);
        assert!(!overlay.has_elements());

        overlay.show(HoverChannel::Task, &content(), Pos2::new(10.0, 10.0));
        overlay.hide(HoverChannel::Task);
        assert!(overlay.has_elements());

        overlay.release();
        assert!(!overlay.has_elements());
        overlay.release();
    }

    #[test]
    fn viewport_width_is_measured_from_canvas_origin() {
        let mut overlay = EguiOverlay::new(250.0);
        overlay.set_frame(Pos2::new(200.0, 40.0), 1200.0);
        assert_eq!(overlay.viewport_width(), 1000.0);
    }
}
