//! Widgets module
//!
//! Custom UI controls for the timer interface.

pub mod progress_ring;

pub use progress_ring::{arc_points, progress_ring, RingConfig};
