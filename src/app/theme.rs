//! Theme definitions for the Pomodoro UI
//!
//! Provides color constants, styling utilities, and theme configuration
//! for a dark, glowing aesthetic that sits on top of the particle field.

use eframe::egui::{self, Color32, Rounding, Stroke, Vec2};

use crate::mode::TimerMode;

/// Background colors
pub mod background {
    use super::Color32;

    /// Window and popup fill - translucent near-black
    pub const PANEL: Color32 = Color32::from_rgba_premultiplied(12, 12, 16, 225);

    /// Widget background (buttons, inputs)
    pub const WIDGET: Color32 = Color32::from_rgba_premultiplied(28, 28, 34, 200);

    /// Widget background when hovered
    pub const WIDGET_HOVERED: Color32 = Color32::from_rgba_premultiplied(44, 44, 52, 220);

    /// Widget background when active/pressed
    pub const WIDGET_ACTIVE: Color32 = Color32::from_rgba_premultiplied(60, 60, 70, 235);
}

/// Per-mode accent colors, matching the particle palettes
pub mod mode {
    use super::Color32;

    /// Focus periods - red glow
    pub const WORK: Color32 = Color32::from_rgb(0xFF, 0x4E, 0x4E);

    /// Breaks - green glow
    pub const BREAK: Color32 = Color32::from_rgb(0x4E, 0xFF, 0x8A);
}

/// Deeper per-mode tones for the disc glowing behind the ring
pub mod glow {
    use super::Color32;

    pub const WORK: Color32 = Color32::from_rgb(0xDC, 0x26, 0x26);

    pub const BREAK: Color32 = Color32::from_rgb(0x16, 0xA3, 0x4A);
}

/// Text colors
pub mod text {
    use super::Color32;

    /// Primary text - bright white
    pub const PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);

    /// Secondary text - dimmed
    pub const SECONDARY: Color32 = Color32::from_rgb(170, 170, 180);

    /// Disabled text
    pub const DISABLED: Color32 = Color32::from_rgb(100, 100, 110);
}

/// UI accent colors
pub mod accent {
    use super::Color32;

    /// Warning - orange
    pub const WARNING: Color32 = Color32::from_rgb(255, 183, 77);
}

/// Track drawn under the progress arc
pub const RING_TRACK: Color32 = Color32::from_rgba_premultiplied(26, 26, 26, 26);

/// Standard rounding for UI elements
pub const ROUNDING: Rounding = Rounding {
    nw: 10.0,
    ne: 10.0,
    sw: 10.0,
    se: 10.0,
};

/// Rounding for pill-shaped buttons
pub const ROUNDING_PILL: Rounding = Rounding {
    nw: 18.0,
    ne: 18.0,
    sw: 18.0,
    se: 18.0,
};

/// Accent color for a timer mode.
pub fn mode_accent(timer_mode: TimerMode) -> Color32 {
    match timer_mode {
        TimerMode::Work => mode::WORK,
        TimerMode::Break => mode::BREAK,
    }
}

/// Glow color for a timer mode.
pub fn mode_glow(timer_mode: TimerMode) -> Color32 {
    match timer_mode {
        TimerMode::Work => glow::WORK,
        TimerMode::Break => glow::BREAK,
    }
}

/// Apply the dark theme to an egui context
pub fn apply_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    let visuals = &mut style.visuals;
    visuals.dark_mode = true;

    visuals.window_fill = background::PANEL;
    visuals.window_stroke = Stroke::new(1.0, Color32::from_rgba_premultiplied(60, 60, 60, 60));
    visuals.window_rounding = ROUNDING;

    // The particle field shows through the central panel
    visuals.panel_fill = Color32::TRANSPARENT;

    visuals.widgets.noninteractive.bg_fill = background::WIDGET;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, text::SECONDARY);
    visuals.widgets.noninteractive.rounding = ROUNDING;

    visuals.widgets.inactive.bg_fill = background::WIDGET;
    visuals.widgets.inactive.weak_bg_fill = background::WIDGET;
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, text::PRIMARY);
    visuals.widgets.inactive.rounding = ROUNDING_PILL;

    visuals.widgets.hovered.bg_fill = background::WIDGET_HOVERED;
    visuals.widgets.hovered.weak_bg_fill = background::WIDGET_HOVERED;
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, text::PRIMARY);
    visuals.widgets.hovered.rounding = ROUNDING_PILL;

    visuals.widgets.active.bg_fill = background::WIDGET_ACTIVE;
    visuals.widgets.active.weak_bg_fill = background::WIDGET_ACTIVE;
    visuals.widgets.active.fg_stroke = Stroke::new(1.5, text::PRIMARY);
    visuals.widgets.active.rounding = ROUNDING_PILL;

    visuals.widgets.open.bg_fill = background::WIDGET_ACTIVE;
    visuals.widgets.open.fg_stroke = Stroke::new(1.0, text::PRIMARY);
    visuals.widgets.open.rounding = ROUNDING;

    visuals.hyperlink_color = text::SECONDARY;
    visuals.extreme_bg_color = Color32::from_rgb(18, 18, 22);

    style.spacing.item_spacing = Vec2::new(10.0, 8.0);
    style.spacing.button_padding = Vec2::new(18.0, 8.0);
    style.spacing.window_margin = egui::Margin::same(14.0);

    ctx.set_style(style);
}

/// Selection colors follow the current mode.
pub fn apply_mode_accent(ctx: &egui::Context, timer_mode: TimerMode) {
    let accent = mode_accent(timer_mode);
    ctx.style_mut(|style| {
        style.visuals.selection.bg_fill = accent.gamma_multiply(0.35);
        style.visuals.selection.stroke = Stroke::new(1.0, accent);
        style.visuals.widgets.active.fg_stroke = Stroke::new(1.5, accent);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{BREAK_PALETTE, WORK_PALETTE};

    #[test]
    fn test_mode_accents_match_particle_colors() {
        assert_eq!(mode_accent(TimerMode::Work), WORK_PALETTE.particle);
        assert_eq!(mode_accent(TimerMode::Break), BREAK_PALETTE.particle);
    }

    #[test]
    fn test_mode_accents_are_distinct() {
        assert_ne!(mode::WORK, mode::BREAK);
    }

    #[test]
    fn test_glow_follows_mode_hue() {
        let work = mode_glow(TimerMode::Work);
        let brk = mode_glow(TimerMode::Break);
        assert!(work.r() > work.g() && work.r() > work.b());
        assert!(brk.g() > brk.r() && brk.g() > brk.b());
    }

    #[test]
    fn test_ring_track_is_dim() {
        assert!(RING_TRACK.a() < 64);
    }
}
