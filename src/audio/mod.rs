//! Audio module
//!
//! Notification sound synthesis.
//! Handles scores, automation curves, voice rendering, the cpal stream and
//! lock-free communication with the audio thread.

pub mod automation;
pub mod channels;
pub mod commands;
pub mod engine;
pub mod processor;
pub mod score;
pub mod sound_type;
pub mod synth;
pub mod voice;

pub use automation::{AutomationCurve, AutomationEvent, MAX_CURVE_EVENTS};
pub use channels::{AudioHandle, SynthChannels, UiHandle};
pub use commands::{SynthCommand, SynthEvent};
pub use engine::{AudioEngine, AudioError};
pub use processor::SynthProcessor;
pub use score::{click_score, notification_score, Score, Segment, Waveform, MAX_SEGMENTS};
pub use sound_type::SoundType;
pub use synth::{CpalSink, NotificationSynth, SoundSink, DEFAULT_CLICK_VOLUME};
pub use voice::Voice;
