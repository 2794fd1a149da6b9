//! The particle field: a fixed pool of particles over a crossfading gradient.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use super::color::{ColorState, ThemePalette, COLOR_BLEND_FACTOR};
use super::particle::Particle;
use super::surface::Surface;
use crate::mode::TimerMode;

/// Number of particles created on every resize.
pub const DEFAULT_PARTICLE_COUNT: usize = 60;

/// Animated background owned by the UI thread.
///
/// Generic over its random source so tests can seed it.
pub struct ParticleField<R: Rng = ChaCha8Rng> {
    particles: Vec<Particle>,
    colors: ColorState,
    mode: TimerMode,
    width: f32,
    height: f32,
    particle_count: usize,
    rng: R,
}

impl ParticleField<ChaCha8Rng> {
    /// Creates a field seeded from `seed`, or from OS entropy when `None`.
    pub fn with_seed(mode: TimerMode, particle_count: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::new(mode, particle_count, rng)
    }
}

impl<R: Rng> ParticleField<R> {
    /// Creates an empty field. Call [`resize`](Self::resize) before the first
    /// frame to populate it.
    pub fn new(mode: TimerMode, particle_count: usize, rng: R) -> Self {
        Self {
            particles: Vec::with_capacity(particle_count),
            colors: ColorState::from_palette(ThemePalette::for_mode(mode)),
            mode,
            width: 0.0,
            height: 0.0,
            particle_count,
            rng,
        }
    }

    /// Discards the pool and regenerates it for a surface of the given size.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        let rng = &mut self.rng;
        self.particles = (0..self.particle_count)
            .map(|_| Particle::random(rng, width, height))
            .collect();
        debug!(width, height, count = self.particles.len(), "Particle field resized");
    }

    /// Updates the mode the colours fade toward. Read on the next tick.
    pub fn set_mode(&mut self, mode: TimerMode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[cfg(test)]
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn colors(&self) -> &ColorState {
        &self.colors
    }

    /// Current bounds set by the last resize.
    pub fn bounds(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Advances one frame and renders it.
    ///
    /// Without a surface nothing changes; the next call simply tries again.
    pub fn tick(&mut self, surface: Option<&mut dyn Surface>) {
        let Some(surface) = surface else {
            return;
        };

        self.colors
            .blend_toward(ThemePalette::for_mode(self.mode), COLOR_BLEND_FACTOR);

        surface.fill_vertical_gradient(
            self.colors.bg_top.to_color32(),
            self.colors.bg_bottom.to_color32(),
        );

        let tint = self.colors.particle;
        for particle in &mut self.particles {
            particle.step(&mut self.rng, self.width, self.height);
            particle.draw(surface, tint.with_alpha(particle.alpha()));
        }
    }
}
