//! A single drifting, twinkling, rotating background particle.

use std::f32::consts::TAU;

use egui::{Color32, Pos2, Vec2};
use rand::Rng;

use super::color::lerp;
use super::surface::Surface;

/// How far past an edge a particle travels before re-entering on the
/// opposite side.
pub const WRAP_MARGIN: f32 = 50.0;

/// Distance between alpha and its target below which a new target is drawn.
pub const TWINKLE_EPSILON: f32 = 0.01;

/// Fraction of the remaining alpha gap covered per frame.
pub const ALPHA_BLEND_FACTOR: f32 = 0.01;

const SIZE_RANGE: std::ops::Range<f32> = 1.0..5.0;
const VELOCITY_RANGE: std::ops::Range<f32> = -0.15..0.15;
const INITIAL_ALPHA_RANGE: std::ops::Range<f32> = 0.1..0.6;
const TARGET_ALPHA_RANGE: std::ops::Range<f32> = 0.1..0.7;
const ROTATION_SPEED_RANGE: std::ops::Range<f32> = -0.01..0.01;

/// Outline drawn for a particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Circle,
    Square,
    Triangle,
}

impl ShapeKind {
    /// Weighted pick: three circles for every square and every triangle.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        const WEIGHTED: [ShapeKind; 5] = [
            ShapeKind::Circle,
            ShapeKind::Circle,
            ShapeKind::Circle,
            ShapeKind::Square,
            ShapeKind::Triangle,
        ];
        WEIGHTED[rng.gen_range(0..WEIGHTED.len())]
    }
}

/// One simulated particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Pos2,
    pub velocity: Vec2,
    size: f32,
    alpha: f32,
    target_alpha: f32,
    shape: ShapeKind,
    pub rotation: f32,
    pub rotation_speed: f32,
}

impl Particle {
    /// Draws every attribute independently from `rng`, placing the particle
    /// uniformly over a `width` x `height` surface.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, width: f32, height: f32) -> Self {
        let x = rng.gen::<f32>() * width.max(0.0);
        let y = rng.gen::<f32>() * height.max(0.0);
        Self {
            position: Pos2::new(x, y),
            velocity: Vec2::new(
                rng.gen_range(VELOCITY_RANGE),
                rng.gen_range(VELOCITY_RANGE),
            ),
            size: rng.gen_range(SIZE_RANGE),
            alpha: rng.gen_range(INITIAL_ALPHA_RANGE),
            target_alpha: rng.gen_range(TARGET_ALPHA_RANGE),
            shape: ShapeKind::random(rng),
            rotation: rng.gen_range(0.0..TAU),
            rotation_speed: rng.gen_range(ROTATION_SPEED_RANGE),
        }
    }

    /// Builds a particle with explicit size, shape and opacity.
    ///
    /// Size must be positive; alpha values are clamped to [0, 1].
    pub fn new(position: Pos2, size: f32, shape: ShapeKind, alpha: f32, target_alpha: f32) -> Self {
        debug_assert!(size > 0.0, "particle size must be positive");
        Self {
            position,
            velocity: Vec2::ZERO,
            size,
            alpha: alpha.clamp(0.0, 1.0),
            target_alpha: target_alpha.clamp(0.0, 1.0),
            shape,
            rotation: 0.0,
            rotation_speed: 0.0,
        }
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn target_alpha(&self) -> f32 {
        self.target_alpha
    }

    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    /// Advances motion, rotation and twinkle by one frame within a
    /// `width` x `height` field.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R, width: f32, height: f32) {
        self.position += self.velocity;
        self.position.x = wrap_axis(self.position.x, width);
        self.position.y = wrap_axis(self.position.y, height);

        self.rotation += self.rotation_speed;

        if (self.alpha - self.target_alpha).abs() < TWINKLE_EPSILON {
            self.target_alpha = rng.gen_range(TARGET_ALPHA_RANGE);
        }
        self.alpha = lerp(self.alpha, self.target_alpha, ALPHA_BLEND_FACTOR).clamp(0.0, 1.0);
    }

    /// Paints the particle centred on its position and rotated by its angle.
    pub fn draw(&self, surface: &mut dyn Surface, color: Color32) {
        match self.shape {
            ShapeKind::Circle => surface.fill_circle(self.position, self.size, color),
            ShapeKind::Square | ShapeKind::Triangle => {
                let (sin, cos) = self.rotation.sin_cos();
                let points = self
                    .local_vertices()
                    .into_iter()
                    .map(|v| {
                        self.position
                            + Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
                    })
                    .collect();
                surface.fill_polygon(points, color);
            }
        }
    }

    /// Outline vertices in the particle's unrotated local frame. Circles have
    /// no vertices.
    pub fn local_vertices(&self) -> Vec<Vec2> {
        let s = self.size;
        match self.shape {
            ShapeKind::Circle => Vec::new(),
            ShapeKind::Square => vec![
                Vec2::new(-s, -s),
                Vec2::new(s, -s),
                Vec2::new(s, s),
                Vec2::new(-s, s),
            ],
            ShapeKind::Triangle => triangle_vertices(s).to_vec(),
        }
    }
}

/// Isoceles triangle with its apex up, inscribed in a `2s` square.
pub fn triangle_vertices(s: f32) -> [Vec2; 3] {
    [Vec2::new(0.0, -s), Vec2::new(s, s), Vec2::new(-s, s)]
}

/// Flow-through wrap: leaving one side by more than the margin re-enters at
/// the margin beyond the opposite side.
fn wrap_axis(value: f32, bound: f32) -> f32 {
    if value < -WRAP_MARGIN {
        bound + WRAP_MARGIN
    } else if value > bound + WRAP_MARGIN {
        -WRAP_MARGIN
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::surface::{DrawCommand, RecordingSurface};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    #[test]
    fn test_random_particle_ranges() {
        let mut rng = rng();
        for _ in 0..1000 {
            let p = Particle::random(&mut rng, 800.0, 600.0);
            assert!((0.0..=800.0).contains(&p.position.x));
            assert!((0.0..=600.0).contains(&p.position.y));
            assert!((1.0..5.0).contains(&p.size()));
            assert!((-0.15..0.15).contains(&p.velocity.x));
            assert!((-0.15..0.15).contains(&p.velocity.y));
            assert!((0.1..0.6).contains(&p.alpha()));
            assert!((0.1..0.7).contains(&p.target_alpha()));
            assert!((0.0..TAU).contains(&p.rotation));
            assert!((-0.01..0.01).contains(&p.rotation_speed));
        }
    }

    #[test]
    fn test_shape_weighting() {
        let mut rng = rng();
        let mut circles = 0;
        let total = 10_000;
        for _ in 0..total {
            if ShapeKind::random(&mut rng) == ShapeKind::Circle {
                circles += 1;
            }
        }
        let ratio = circles as f32 / total as f32;
        assert!((ratio - 0.6).abs() < 0.03, "circle ratio was {}", ratio);
    }

    #[test]
    fn test_wraps_past_right_edge() {
        let mut rng = rng();
        let mut p = Particle::new(Pos2::new(850.5, 10.0), 2.0, ShapeKind::Circle, 0.5, 0.2);
        p.velocity = Vec2::new(0.1, 0.0);
        p.step(&mut rng, 800.0, 600.0);
        assert_eq!(p.position.x, -WRAP_MARGIN);
    }

    #[test]
    fn test_wraps_all_four_edges() {
        assert_eq!(wrap_axis(-50.5, 800.0), 850.0);
        assert_eq!(wrap_axis(850.5, 800.0), -50.0);
        assert_eq!(wrap_axis(-50.0, 800.0), -50.0);
        assert_eq!(wrap_axis(850.0, 800.0), 850.0);
        assert_eq!(wrap_axis(-60.0, 600.0), 650.0);
        assert_eq!(wrap_axis(700.0, 600.0), -50.0);
    }

    #[test]
    fn test_alpha_moves_one_percent_toward_target() {
        let mut rng = rng();
        let mut p = Particle::new(Pos2::ZERO, 2.0, ShapeKind::Circle, 0.2, 0.6);
        p.step(&mut rng, 100.0, 100.0);
        assert!((p.alpha() - 0.204).abs() < 1e-6);
        assert_eq!(p.target_alpha(), 0.6);
    }

    #[test]
    fn test_twinkle_retargets_when_close() {
        let mut rng = rng();
        let mut p = Particle::new(Pos2::ZERO, 2.0, ShapeKind::Circle, 0.3, 0.305);
        p.step(&mut rng, 100.0, 100.0);
        assert_ne!(p.target_alpha(), 0.305);
        assert!((0.1..0.7).contains(&p.target_alpha()));
    }

    #[test]
    fn test_alpha_and_size_invariants_over_time() {
        let mut rng = rng();
        let mut p = Particle::random(&mut rng, 300.0, 300.0);
        let size = p.size();
        for _ in 0..20_000 {
            p.step(&mut rng, 300.0, 300.0);
            assert!((0.0..=1.0).contains(&p.alpha()));
            assert_eq!(p.size(), size);
        }
    }

    #[test]
    fn test_triangle_vertices_exact() {
        let v = triangle_vertices(3.0);
        assert_eq!(v[0], Vec2::new(0.0, -3.0));
        assert_eq!(v[1], Vec2::new(3.0, 3.0));
        assert_eq!(v[2], Vec2::new(-3.0, 3.0));
    }

    #[test]
    fn test_square_draws_rotated_polygon() {
        let mut p = Particle::new(Pos2::new(10.0, 10.0), 2.0, ShapeKind::Square, 0.5, 0.5);
        p.rotation = std::f32::consts::FRAC_PI_2;
        let mut surface = RecordingSurface::new(100.0, 100.0);
        p.draw(&mut surface, Color32::RED);

        match &surface.commands[0] {
            DrawCommand::Polygon { points, .. } => {
                assert_eq!(points.len(), 4);
                // (-2, -2) rotated a quarter turn lands on (2, -2)
                assert!((points[0].x - 12.0).abs() < 1e-5);
                assert!((points[0].y - 8.0).abs() < 1e-5);
            }
            other => panic!("expected polygon, got {:?}", other),
        }
    }

    #[test]
    fn test_circle_draws_disc_of_size_radius() {
        let p = Particle::new(Pos2::new(4.0, 5.0), 3.5, ShapeKind::Circle, 0.5, 0.5);
        let mut surface = RecordingSurface::new(100.0, 100.0);
        p.draw(&mut surface, Color32::RED);
        assert_eq!(
            surface.commands[0],
            DrawCommand::Circle {
                center: Pos2::new(4.0, 5.0),
                radius: 3.5,
                color: Color32::RED,
            }
        );
    }
}
