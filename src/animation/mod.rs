//! Animation module
//!
//! Animated particle background.
//! Handles palette crossfading, particle simulation, drawing surfaces and frame scheduling.

pub mod color;
pub mod field;
pub mod particle;
pub mod scheduler;
pub mod surface;

pub use color::{ColorState, Rgb, ThemePalette, BREAK_PALETTE, WORK_PALETTE};
pub use field::{ParticleField, DEFAULT_PARTICLE_COUNT};
pub use particle::{Particle, ShapeKind};
pub use scheduler::{CancelToken, FrameLoop};
pub use surface::{PainterSurface, Surface};
