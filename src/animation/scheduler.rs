//! Frame scheduling for the particle field.
//!
//! The host owns the display-refresh primitive (eframe repaint requests).
//! [`FrameLoop`] decides whether a frame runs and whether the host should
//! schedule another one, so the field never depends on a particular host.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::Rng;
use tracing::debug;

use super::field::ParticleField;
use super::surface::Surface;

/// Cloneable, thread-safe stop flag for a frame loop.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests the loop to stop before its next frame.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    fn reset(&self) {
        self.cancelled.store(false, Ordering::Release);
    }
}

/// A self-resubmitting per-frame loop.
///
/// Each host frame calls [`run_frame`](Self::run_frame). Once the token is
/// cancelled frames are skipped and no further frame is requested.
#[derive(Debug, Default)]
pub struct FrameLoop {
    token: CancelToken,
    frames: u64,
}

impl FrameLoop {
    /// A running loop.
    pub fn new() -> Self {
        Self::default()
    }

    /// Token that stops this loop when cancelled.
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Stops the loop. Takes effect immediately.
    pub fn stop(&mut self) {
        self.token.cancel();
        debug!(frames = self.frames, "Frame loop stopped");
    }

    /// Restarts a stopped loop. The host must request a frame afterwards.
    pub fn start(&mut self) {
        if !self.is_running() {
            self.token.reset();
            debug!("Frame loop restarted");
        }
    }

    /// Number of frames ticked since creation.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Runs one frame if the loop is live.
    ///
    /// Returns `true` when the host should schedule the next frame.
    pub fn run_frame<R: Rng>(
        &mut self,
        field: &mut ParticleField<R>,
        surface: Option<&mut dyn Surface>,
    ) -> bool {
        if !self.is_running() {
            return false;
        }
        field.tick(surface);
        self.frames += 1;
        self.is_running()
    }
}
