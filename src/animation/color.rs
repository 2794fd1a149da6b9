//! Theme palettes and the live, crossfading colour state.
//!
//! The background never jumps between palettes. Every frame the live colours
//! move a fixed fraction of the remaining distance toward the palette of the
//! current mode, which gives an exponential crossfade with no fixed duration.

use egui::Color32;

use crate::mode::TimerMode;

/// Fraction of the remaining gap the colours cover per frame.
pub const COLOR_BLEND_FACTOR: f32 = 0.02;

/// Linear interpolation between two scalars.
#[inline]
pub fn lerp(start: f32, end: f32, factor: f32) -> f32 {
    start + (end - start) * factor
}

/// An RGB colour with float channels in [0, 255].
///
/// Interpolated colours need fractional channels; rounding happens only when
/// a colour is handed to the painter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Moves each channel `factor` of the way toward `target`.
    pub fn lerp_toward(self, target: Rgb, factor: f32) -> Self {
        Self {
            r: lerp(self.r, target.r, factor),
            g: lerp(self.g, target.g, factor),
            b: lerp(self.b, target.b, factor),
        }
    }

    /// Largest per-channel distance to another colour.
    pub fn distance(self, other: Rgb) -> f32 {
        (self.r - other.r)
            .abs()
            .max((self.g - other.g).abs())
            .max((self.b - other.b).abs())
    }

    /// Opaque painter colour, channels rounded to the nearest integer.
    pub fn to_color32(self) -> Color32 {
        Color32::from_rgb(channel(self.r), channel(self.g), channel(self.b))
    }

    /// Painter colour with the given opacity in [0, 1].
    pub fn with_alpha(self, alpha: f32) -> Color32 {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color32::from_rgba_unmultiplied(channel(self.r), channel(self.g), channel(self.b), a)
    }
}

fn channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

impl From<Color32> for Rgb {
    fn from(c: Color32) -> Self {
        Self::new(c.r() as f32, c.g() as f32, c.b() as f32)
    }
}

/// Reference colours for one mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    /// Colour at the top edge of the background gradient.
    pub bg_top: Color32,
    /// Colour at the bottom edge of the background gradient.
    pub bg_bottom: Color32,
    /// Tint applied to every particle.
    pub particle: Color32,
}

/// Very dark red to dark red, bright red particles.
pub const WORK_PALETTE: ThemePalette = ThemePalette {
    bg_top: Color32::from_rgb(0x1a, 0x05, 0x05),
    bg_bottom: Color32::from_rgb(0x45, 0x0a, 0x0a),
    particle: Color32::from_rgb(0xff, 0x4e, 0x4e),
};

/// Very dark teal to dark teal, bright green particles.
pub const BREAK_PALETTE: ThemePalette = ThemePalette {
    bg_top: Color32::from_rgb(0x02, 0x2c, 0x22),
    bg_bottom: Color32::from_rgb(0x06, 0x4e, 0x3b),
    particle: Color32::from_rgb(0x4e, 0xff, 0x8a),
};

impl ThemePalette {
    /// The fixed palette for a mode.
    pub fn for_mode(mode: TimerMode) -> &'static ThemePalette {
        match mode {
            TimerMode::Work => &WORK_PALETTE,
            TimerMode::Break => &BREAK_PALETTE,
        }
    }
}

/// The colours actually drawn each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorState {
    pub bg_top: Rgb,
    pub bg_bottom: Rgb,
    pub particle: Rgb,
}

impl ColorState {
    /// Starts exactly on a palette so the first frame does not fade in.
    pub fn from_palette(palette: &ThemePalette) -> Self {
        Self {
            bg_top: palette.bg_top.into(),
            bg_bottom: palette.bg_bottom.into(),
            particle: palette.particle.into(),
        }
    }

    /// One crossfade step toward `palette`.
    pub fn blend_toward(&mut self, palette: &ThemePalette, factor: f32) {
        self.bg_top = self.bg_top.lerp_toward(palette.bg_top.into(), factor);
        self.bg_bottom = self.bg_bottom.lerp_toward(palette.bg_bottom.into(), factor);
        self.particle = self.particle.lerp_toward(palette.particle.into(), factor);
    }

    /// Largest channel distance to `palette` across all three colours.
    pub fn distance_to(&self, palette: &ThemePalette) -> f32 {
        self.bg_top
            .distance(palette.bg_top.into())
            .max(self.bg_bottom.distance(palette.bg_bottom.into()))
            .max(self.particle.distance(palette.particle.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palettes_match_hex_values() {
        assert_eq!(WORK_PALETTE.bg_top, Color32::from_rgb(26, 5, 5));
        assert_eq!(WORK_PALETTE.particle, Color32::from_rgb(255, 78, 78));
        assert_eq!(BREAK_PALETTE.bg_bottom, Color32::from_rgb(6, 78, 59));
        assert_eq!(BREAK_PALETTE.particle, Color32::from_rgb(78, 255, 138));
    }

    #[test]
    fn test_single_step_covers_two_percent_of_gap() {
        let mut state = ColorState::from_palette(&WORK_PALETTE);
        let before = state;
        state.blend_toward(&BREAK_PALETTE, COLOR_BLEND_FACTOR);

        let target = Rgb::from(BREAK_PALETTE.particle);
        let expected_r = before.particle.r + (target.r - before.particle.r) * 0.02;
        assert!((state.particle.r - expected_r).abs() < 1e-4);
    }

    #[test]
    fn test_blend_never_overshoots() {
        let mut state = ColorState::from_palette(&WORK_PALETTE);
        let target = Rgb::from(BREAK_PALETTE.particle);
        let mut previous_gap = state.particle.distance(target);

        for _ in 0..500 {
            state.blend_toward(&BREAK_PALETTE, COLOR_BLEND_FACTOR);
            let gap = state.particle.distance(target);
            assert!(gap <= previous_gap);
            // Green rises from 78 toward 255 and must never pass it
            assert!(state.particle.g <= 255.0);
            previous_gap = gap;
        }
    }

    #[test]
    fn test_converges_asymptotically() {
        let mut state = ColorState::from_palette(&WORK_PALETTE);
        for _ in 0..1000 {
            state.blend_toward(&BREAK_PALETTE, COLOR_BLEND_FACTOR);
        }
        assert!(state.distance_to(&BREAK_PALETTE) < 0.01);
    }

    #[test]
    fn test_with_alpha_rounds_and_clamps() {
        let c = Rgb::new(10.4, 10.6, 300.0).with_alpha(1.5);
        assert_eq!(c.a(), 255);
        let opaque = Rgb::new(10.4, 10.6, 300.0).to_color32();
        assert_eq!((opaque.r(), opaque.g(), opaque.b()), (10, 11, 255));
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp(4.0, 4.0, 0.3), 4.0);
    }
}
