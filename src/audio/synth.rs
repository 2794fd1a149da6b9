//! Notification synthesizer front end.
//!
//! [`NotificationSynth::play`] turns a sound request into a score and hands
//! it to a [`SoundSink`]. The production sink opens the default output on
//! demand and drops requests silently while no output exists.

use tracing::debug;

use super::commands::{SynthCommand, SynthEvent};
use super::engine::{AudioEngine, AudioError};
use super::score::{click_score, notification_score, Score, Segment};
use super::sound_type::SoundType;

/// Default volume of the UI click.
pub const DEFAULT_CLICK_VOLUME: f32 = 0.2;

/// Somewhere scores can be scheduled.
pub trait SoundSink {
    /// Schedules `segments` to start now. Must never panic or block.
    fn schedule(&mut self, segments: Vec<Segment>);

    /// Drains any feedback the sink has received since the last call.
    fn poll_events(&mut self) {}

    /// Output description for the status bar, when an output is open.
    fn describe(&self) -> Option<String> {
        None
    }

    /// Error from the most recent failed attempt to reach the output.
    fn last_error(&self) -> Option<&AudioError> {
        None
    }

    /// Voices sounding as of the last [`poll_events`](Self::poll_events).
    fn active_voices(&self) -> usize {
        0
    }
}

/// Maps sound requests to scores.
pub struct NotificationSynth<S: SoundSink> {
    sink: S,
}

impl<S: SoundSink> NotificationSynth<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Plays a notification. Volume is clamped to [0, 1].
    pub fn play(&mut self, sound: SoundType, volume: f32) {
        self.sink.schedule(notification_score(sound, volume));
    }

    /// Plays the short feedback blip used by buttons.
    pub fn play_click(&mut self, volume: f32) {
        self.sink.schedule(click_score(volume));
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

/// Sink backed by a cpal output stream.
///
/// The stream is opened lazily and re-attempted on every request while no
/// output device is available.
#[derive(Default)]
pub struct CpalSink {
    engine: Option<AudioEngine>,
    last_error: Option<AudioError>,
    active_voices: usize,
}

impl CpalSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_engine(&mut self) -> Option<&mut AudioEngine> {
        let stale = self
            .engine
            .as_ref()
            .is_some_and(AudioEngine::is_abandoned);
        if stale {
            self.engine = None;
        }

        if self.engine.is_none() {
            match AudioEngine::open() {
                Ok(engine) => {
                    self.last_error = None;
                    self.engine = Some(engine);
                }
                Err(e) => {
                    if self.last_error.is_none() {
                        debug!("Audio output unavailable: {}", e);
                    }
                    self.last_error = Some(e);
                    return None;
                }
            }
        }
        self.engine.as_mut()
    }
}

impl SoundSink for CpalSink {
    fn schedule(&mut self, segments: Vec<Segment>) {
        let Some(engine) = self.ensure_engine() else {
            return;
        };
        if let Some(handle) = engine.handle_mut() {
            handle.send_command_lossy(SynthCommand::Play(Score::new(&segments)));
        }
    }

    fn last_error(&self) -> Option<&AudioError> {
        self.last_error.as_ref()
    }

    fn active_voices(&self) -> usize {
        self.active_voices
    }

    /// Device description for the status bar.
    fn describe(&self) -> Option<String> {
        self.engine.as_ref().map(|engine| {
            format!(
                "{} • {}Hz • {}ch",
                engine.device_name(),
                engine.sample_rate(),
                engine.channels()
            )
        })
    }

    /// Drains feedback from the audio thread.
    fn poll_events(&mut self) {
        let Some(handle) = self.engine.as_mut().and_then(AudioEngine::handle_mut) else {
            return;
        };
        for event in handle.drain_events() {
            match event {
                SynthEvent::ActiveVoices(count) => self.active_voices = count,
                SynthEvent::VoicesStarted(count) => self.active_voices += count,
                SynthEvent::VoicesFinished(count) => {
                    self.active_voices = self.active_voices.saturating_sub(count)
                }
            }
        }
    }
}

/// Sink that records every scheduled score.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub scheduled: Vec<Vec<Segment>>,
    pub active_voices: usize,
}

#[cfg(test)]
impl SoundSink for RecordingSink {
    fn schedule(&mut self, segments: Vec<Segment>) {
        self.scheduled.push(segments);
    }

    fn active_voices(&self) -> usize {
        self.active_voices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::score::Waveform;

    fn synth() -> NotificationSynth<RecordingSink> {
        NotificationSynth::new(RecordingSink::default())
    }

    #[test]
    fn test_play_classic_schedules_one_sine() {
        let mut synth = synth();
        synth.play(SoundType::Classic, 0.5);

        let scheduled = &synth.sink().scheduled;
        assert_eq!(scheduled.len(), 1);
        let segments = &scheduled[0];
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].waveform, Waveform::Sine);
        assert_eq!(segments[0].base_frequency(), 880.0);
        assert!((segments[0].duration - 0.6).abs() < 1e-6);
        assert!((segments[0].peak() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_play_bell_schedules_two_partials() {
        let mut synth = synth();
        synth.play(SoundType::Bell, 1.0);
        let segments = &synth.sink().scheduled[0];
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].start, 0.0);
        assert_eq!(segments[1].start, 0.0);
        assert!((segments[1].peak() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_unknown_sound_plays_classic() {
        let mut synth = synth();
        synth.play("unknown-type".parse().unwrap(), 0.5);
        synth.play(SoundType::Classic, 0.5);
        let scheduled = &synth.sink().scheduled;
        assert_eq!(scheduled[0], scheduled[1]);
    }

    #[test]
    fn test_plays_are_independent() {
        let mut synth = synth();
        synth.play(SoundType::Alert, 1.0);
        synth.play(SoundType::Alert, 1.0);
        synth.play_click(DEFAULT_CLICK_VOLUME);
        assert_eq!(synth.sink().scheduled.len(), 3);
        assert_eq!(synth.sink().scheduled[2][0].base_frequency(), 300.0);
    }

    #[test]
    fn test_cpal_sink_starts_closed() {
        let sink = CpalSink::new();
        assert!(sink.last_error().is_none());
        assert_eq!(sink.active_voices(), 0);
        assert!(sink.describe().is_none());
    }
}
