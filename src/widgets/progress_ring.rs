//! Circular countdown ring.
//!
//! A dim full-circle track with an arc on top that starts at 12 o'clock and
//! runs clockwise for the given fraction. An optional soft glow disc sits
//! behind both.

use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, Pos2, Response, Sense, Shape, Stroke, Ui, Vec2};

use crate::app::theme;

/// Segments used for a full circle; partial arcs use a proportional share.
const FULL_CIRCLE_SEGMENTS: usize = 96;

/// Stacked discs that fake a blurred glow.
const GLOW_LAYERS: usize = 8;

/// Combined opacity at the glow's center.
pub const GLOW_OPACITY: f32 = 0.2;

/// How far the blur reaches past the disc edge, inward and outward, as a
/// fraction of the disc radius.
const GLOW_SPREAD: f32 = 0.3;

/// Configuration for the progress ring.
#[derive(Clone, Debug, PartialEq)]
pub struct RingConfig {
    /// Radius of the stroke centerline.
    pub radius: f32,
    /// Stroke width of both track and arc.
    pub stroke_width: f32,
    /// Arc color.
    pub color: Color32,
    /// Full-circle track color.
    pub track_color: Color32,
    /// Opaque glow color painted behind the ring, if any.
    pub glow: Option<Color32>,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            radius: 104.0,
            stroke_width: 8.0,
            color: theme::mode::WORK,
            track_color: theme::RING_TRACK,
            glow: None,
        }
    }
}

impl RingConfig {
    /// Set the arc color.
    pub fn with_color(mut self, color: Color32) -> Self {
        self.color = color;
        self
    }

    /// Paint a soft disc of `color` behind the ring.
    pub fn with_glow(mut self, color: Color32) -> Self {
        self.glow = Some(color);
        self
    }

    /// Side length of the square the ring occupies.
    pub fn diameter(&self) -> f32 {
        2.0 * self.radius + self.stroke_width
    }
}

/// Points along a clockwise arc starting at 12 o'clock.
///
/// `fraction` is clamped to [0, 1]; an empty arc yields no points.
pub fn arc_points(center: Pos2, radius: f32, fraction: f32) -> Vec<Pos2> {
    let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
    if fraction <= 0.0 {
        return Vec::new();
    }

    let segments = ((FULL_CIRCLE_SEGMENTS as f32 * fraction).ceil() as usize).max(1);
    let start_angle = -FRAC_PI_2;
    let arc_span = fraction * TAU;

    (0..=segments)
        .map(|i| {
            let angle = start_angle + arc_span * (i as f32 / segments as f32);
            Pos2::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
        })
        .collect()
}

/// Discs making up a blurred glow of the given radius, largest first.
///
/// Each layer is translucent so the stack reaches [`GLOW_OPACITY`] only where
/// every disc overlaps, fading out across the blur band.
pub fn glow_layers(radius: f32, color: Color32) -> Vec<(f32, Color32)> {
    let layer_opacity = 1.0 - (1.0 - GLOW_OPACITY).powf(1.0 / GLOW_LAYERS as f32);
    let layer_color = color.gamma_multiply(layer_opacity);
    let outer = radius * (1.0 + GLOW_SPREAD);
    let inner = radius * (1.0 - GLOW_SPREAD);

    (0..GLOW_LAYERS)
        .map(|i| {
            let t = i as f32 / (GLOW_LAYERS - 1) as f32;
            (outer + (inner - outer) * t, layer_color)
        })
        .collect()
}

/// Draws the ring and reserves its space. `progress` is the fraction still
/// remaining.
pub fn progress_ring(ui: &mut Ui, progress: f32, config: &RingConfig) -> Response {
    let (rect, response) = ui.allocate_exact_size(Vec2::splat(config.diameter()), Sense::hover());

    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        let center = rect.center();

        if let Some(glow) = config.glow {
            for (radius, color) in glow_layers(rect.width() / 2.0, glow) {
                painter.circle_filled(center, radius, color);
            }
        }

        painter.circle_stroke(
            center,
            config.radius,
            Stroke::new(config.stroke_width, config.track_color),
        );

        let points = arc_points(center, config.radius, progress);
        if points.len() > 1 {
            // Round caps
            let cap = config.stroke_width / 2.0;
            if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
                painter.circle_filled(first, cap, config.color);
                painter.circle_filled(last, cap, config.color);
            }
            painter.add(Shape::line(
                points,
                Stroke::new(config.stroke_width, config.color),
            ));
        }
    }

    response
}
