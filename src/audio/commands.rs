//! Synth Commands and Events
//!
//! Defines the messages that flow between the UI thread and the audio thread.
//! All types here are plain `Copy` data, so the audio thread never frees
//! memory when it drains them.

use super::score::Score;

/// Commands sent from the UI thread to the synthesizer.
/// These are drained non-blocking at the start of every audio callback.
#[derive(Debug, Clone, Copy)]
pub enum SynthCommand {
    /// Schedule a batch of segments. Start offsets are resolved against the
    /// audio clock when the command is drained.
    Play(Score),
}

/// Events sent from the audio thread back to the UI thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthEvent {
    /// A play command was scheduled as this many voices.
    VoicesStarted(usize),

    /// This many voices reached their stop time and were released.
    VoicesFinished(usize),

    /// Throttled report of the number of sounding voices.
    ActiveVoices(usize),
}
