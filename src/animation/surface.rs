//! Drawing surfaces for the particle field.
//!
//! The field only needs three primitives, so it draws through the small
//! [`Surface`] trait. [`PainterSurface`] implements it on top of an egui
//! painter; tests substitute a recorder.

use egui::{epaint::Mesh, Color32, Pos2, Rect, Shape, Stroke};

/// A target the particle field can render one frame onto.
pub trait Surface {
    /// Surface size in points (width, height).
    fn size(&self) -> (f32, f32);

    /// Fills the whole surface with a vertical gradient from `top` (y = 0)
    /// to `bottom` (y = height).
    fn fill_vertical_gradient(&mut self, top: Color32, bottom: Color32);

    /// Fills a disc. Coordinates are relative to the surface origin.
    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32);

    /// Fills a convex polygon. Coordinates are relative to the surface origin.
    fn fill_polygon(&mut self, points: Vec<Pos2>, color: Color32);
}

/// Paints onto an egui layer inside `rect`.
pub struct PainterSurface<'a> {
    painter: &'a egui::Painter,
    rect: Rect,
}

impl<'a> PainterSurface<'a> {
    /// Returns `None` when the rect has no area, which the field treats as
    /// an unavailable surface for this frame.
    pub fn new(painter: &'a egui::Painter, rect: Rect) -> Option<Self> {
        if rect.width() <= 0.0 || rect.height() <= 0.0 || !rect.is_finite() {
            return None;
        }
        Some(Self { painter, rect })
    }

    fn to_screen(&self, p: Pos2) -> Pos2 {
        self.rect.min + p.to_vec2()
    }
}

impl Surface for PainterSurface<'_> {
    fn size(&self) -> (f32, f32) {
        (self.rect.width(), self.rect.height())
    }

    fn fill_vertical_gradient(&mut self, top: Color32, bottom: Color32) {
        let mut mesh = Mesh::default();
        let r = self.rect;
        mesh.colored_vertex(r.left_top(), top);
        mesh.colored_vertex(r.right_top(), top);
        mesh.colored_vertex(r.left_bottom(), bottom);
        mesh.colored_vertex(r.right_bottom(), bottom);
        mesh.add_triangle(0, 1, 2);
        mesh.add_triangle(1, 3, 2);
        self.painter.add(Shape::mesh(mesh));
    }

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32) {
        self.painter
            .circle_filled(self.to_screen(center), radius, color);
    }

    fn fill_polygon(&mut self, points: Vec<Pos2>, color: Color32) {
        let points = points.into_iter().map(|p| self.to_screen(p)).collect();
        self.painter
            .add(Shape::convex_polygon(points, color, Stroke::NONE));
    }
}

/// A surface that records draw calls instead of painting them.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub width: f32,
    pub height: f32,
    pub commands: Vec<DrawCommand>,
}

#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Gradient { top: Color32, bottom: Color32 },
    Circle { center: Pos2, radius: f32, color: Color32 },
    Polygon { points: Vec<Pos2>, color: Color32 },
}

#[cfg(test)]
impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }
}

#[cfg(test)]
impl Surface for RecordingSurface {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn fill_vertical_gradient(&mut self, top: Color32, bottom: Color32) {
        self.commands.push(DrawCommand::Gradient { top, bottom });
    }

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn fill_polygon(&mut self, points: Vec<Pos2>, color: Color32) {
        self.commands.push(DrawCommand::Polygon { points, color });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_painter_surface_rejects_empty_rect() {
        let ctx = egui::Context::default();
        let painter = egui::Painter::new(
            ctx,
            egui::LayerId::background(),
            Rect::from_min_size(Pos2::ZERO, egui::vec2(100.0, 100.0)),
        );
        let empty = Rect::from_min_size(Pos2::ZERO, egui::vec2(0.0, 50.0));
        assert!(PainterSurface::new(&painter, empty).is_none());

        let full = Rect::from_min_size(Pos2::new(10.0, 20.0), egui::vec2(300.0, 200.0));
        let surface = PainterSurface::new(&painter, full).unwrap();
        assert_eq!(surface.size(), (300.0, 200.0));
        assert_eq!(surface.to_screen(Pos2::new(5.0, 5.0)), Pos2::new(15.0, 25.0));
    }

    #[test]
    fn test_recording_surface_keeps_order() {
        let mut surface = RecordingSurface::new(10.0, 10.0);
        surface.fill_vertical_gradient(Color32::BLACK, Color32::WHITE);
        surface.fill_circle(Pos2::new(1.0, 1.0), 2.0, Color32::RED);
        assert_eq!(surface.commands.len(), 2);
        assert!(matches!(surface.commands[0], DrawCommand::Gradient { .. }));
        assert!(matches!(surface.commands[1], DrawCommand::Circle { .. }));
    }
}
