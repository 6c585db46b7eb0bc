use egui::{Color32, FontId, Rounding, Stroke, Visuals};

use crate::model::{RelationshipKind, ThemeName};

// ── Palette ──────────────────────────────────────────────────────────────────

/// Every colour the chart paints with, for one theme.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub background: Color32,
    pub header_bg: Color32,
    pub text: Color32,
    pub text_dim: Color32,
    pub text_on_bar: Color32,
    pub grid: Color32,
    pub bar: Color32,
    pub bar_progress: Color32,
    pub today_line: Color32,
    pub finish_to_start: Color32,
    pub start_to_start: Color32,
    pub finish_to_finish: Color32,
    pub start_to_finish: Color32,
}

impl Palette {
    pub fn relationship(&self, kind: RelationshipKind) -> Color32 {
        match kind {
            RelationshipKind::FinishToStart => self.finish_to_start,
            RelationshipKind::StartToStart => self.start_to_start,
            RelationshipKind::FinishToFinish => self.finish_to_finish,
            RelationshipKind::StartToFinish => self.start_to_finish,
        }
    }
}

pub const LIGHT: Palette = Palette {
    background: Color32::from_rgb(255, 255, 255),
    header_bg: Color32::from_rgb(245, 246, 250),
    text: Color32::from_rgb(33, 37, 41),
    text_dim: Color32::from_rgb(108, 117, 125),
    text_on_bar: Color32::from_rgb(255, 255, 255),
    grid: Color32::from_rgb(226, 230, 236),
    bar: Color32::from_rgb(66, 133, 244),
    bar_progress: Color32::from_rgb(40, 94, 184),
    today_line: Color32::from_rgb(229, 57, 53),
    finish_to_start: Color32::from_rgb(52, 152, 219),
    start_to_start: Color32::from_rgb(46, 204, 113),
    finish_to_finish: Color32::from_rgb(230, 126, 34),
    start_to_finish: Color32::from_rgb(155, 89, 182),
};

pub const DARK: Palette = Palette {
    background: Color32::from_rgb(24, 24, 32),
    header_bg: Color32::from_rgb(34, 37, 48),
    text: Color32::from_rgb(230, 232, 240),
    text_dim: Color32::from_rgb(155, 160, 178),
    text_on_bar: Color32::from_rgb(255, 255, 255),
    grid: Color32::from_rgb(44, 46, 58),
    bar: Color32::from_rgb(90, 140, 220),
    bar_progress: Color32::from_rgb(56, 98, 170),
    today_line: Color32::from_rgb(240, 75, 75),
    finish_to_start: Color32::from_rgb(93, 173, 226),
    start_to_start: Color32::from_rgb(88, 214, 141),
    finish_to_finish: Color32::from_rgb(245, 176, 65),
    start_to_finish: Color32::from_rgb(187, 143, 206),
};

pub fn palette(theme: ThemeName) -> &'static Palette {
    match theme {
        ThemeName::Light => &LIGHT,
        ThemeName::Dark => &DARK,
    }
}

/// Scale the RGB channels towards black, keeping alpha.
pub fn darken(color: Color32, factor: f32) -> Color32 {
    let f = factor.clamp(0.0, 1.0);
    let scale = |c: u8| (c as f32 * f).round() as u8;
    Color32::from_rgba_premultiplied(scale(color.r()), scale(color.g()), scale(color.b()), color.a())
}

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const HEADER_FONT_SIZE: f32 = 12.0;
pub const BAR_FONT_SIZE: f32 = 11.0;
pub const SMALL_FONT_SIZE: f32 = 10.0;
pub const MENU_FONT_SIZE: f32 = 13.0;

pub const DEP_STROKE_WIDTH: f32 = 2.0;
pub const DEP_HOVER_STROKE_WIDTH: f32 = 3.0;
pub const DEP_HOVER_DARKEN: f32 = 0.8;
pub const ARROW_LENGTH: f32 = 8.0;
pub const ARROW_HALF_WIDTH: f32 = 4.0;

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font(size: f32) -> FontId {
    FontId::proportional(size)
}

// ── Host visuals ─────────────────────────────────────────────────────────────

/// Window chrome matching the chart palette.
pub fn visuals(theme: ThemeName) -> Visuals {
    let palette = palette(theme);
    let mut visuals = match theme {
        ThemeName::Light => Visuals::light(),
        ThemeName::Dark => Visuals::dark(),
    };
    visuals.panel_fill = palette.header_bg;
    visuals.extreme_bg_color = palette.background;
    visuals.window_fill = palette.background;
    visuals.window_stroke = Stroke::new(1.0, palette.grid);
    visuals.window_rounding = Rounding::same(6.0);
    visuals.override_text_color = Some(palette.text);
    visuals
}

pub fn apply_visuals(ctx: &egui::Context, theme: ThemeName) {
    ctx.set_visuals(visuals(theme));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn darken_scales_channels_only() {
        let c = darken(Color32::from_rgb(100, 200, 50), 0.5);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (50, 100, 25, 255));
    }

    #[test]
    fn every_kind_has_a_distinct_color() {
        for palette in [&LIGHT, &DARK] {
            let colors: Vec<_> = RelationshipKind::ALL
                .iter()
                .map(|k| palette.relationship(*k))
                .collect();
            for (i, a) in colors.iter().enumerate() {
                assert!(colors[i + 1..].iter().all(|b| b != a));
            }
        }
    }

    #[test]
    fn visuals_follow_theme() {
        assert!(visuals(ThemeName::Dark).dark_mode);
        assert!(!visuals(ThemeName::Light).dark_mode);
        assert_eq!(visuals(ThemeName::Dark).panel_fill, DARK.header_bg);
    }
}
