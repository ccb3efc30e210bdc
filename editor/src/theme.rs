//! Panel colours for the level editor: dark surfaces with a teal accent.

use egui::Color32;

pub const ACCENT: Color32 = Color32::from_rgb(64, 156, 160);
pub const ACCENT_PRESSED: Color32 = Color32::from_rgb(44, 118, 122);

pub const BG: Color32 = Color32::from_rgb(16, 18, 22);
pub const SURFACE: Color32 = Color32::from_rgb(24, 27, 33);
pub const SURFACE_RAISED: Color32 = Color32::from_rgb(34, 38, 46);
pub const BORDER: Color32 = Color32::from_rgb(52, 58, 70);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(228, 232, 238);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(168, 176, 188);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(118, 126, 140);

pub const SUCCESS: Color32 = Color32::from_rgb(92, 178, 120);
pub const WARNING: Color32 = Color32::from_rgb(226, 180, 88);
pub const ERROR: Color32 = Color32::from_rgb(216, 86, 86);
pub const INFO: Color32 = Color32::from_rgb(98, 150, 226);

/// Installs the editor palette on an egui context.
pub fn apply(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    let v = &mut style.visuals;
    *v = egui::Visuals::dark();

    v.window_fill = SURFACE;
    v.panel_fill = SURFACE;
    v.extreme_bg_color = BG;
    v.faint_bg_color = SURFACE_RAISED;
    v.window_stroke = egui::Stroke::new(1.0, BORDER);

    let widgets = &mut v.widgets;
    widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, BORDER);
    widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, TEXT_SECONDARY);
    widgets.inactive.bg_fill = SURFACE_RAISED;
    widgets.inactive.weak_bg_fill = SURFACE_RAISED;
    widgets.hovered.bg_stroke = egui::Stroke::new(1.0, ACCENT);
    widgets.active.bg_fill = ACCENT_PRESSED;
    widgets.active.weak_bg_fill = ACCENT_PRESSED;

    v.selection.stroke = egui::Stroke::new(1.0, ACCENT);
    v.override_text_color = Some(TEXT_PRIMARY);
    v.warn_fg_color = WARNING;
    v.error_fg_color = ERROR;

    ctx.set_style(style);
}
