//! Synth Processor
//!
//! Runs inside the audio callback: drains commands from the UI thread,
//! renders every active voice additively and releases finished voices.
//!
//! Commands and voices are plain `Copy` data, so draining and releasing never
//! free memory. The only allocation is growth of the voice list or mix buffer
//! past their reserved size.

use super::channels::AudioHandle;
use super::commands::{SynthCommand, SynthEvent};
use super::voice::Voice;

/// Initial voice capacity. The list still grows past this when needed.
const VOICE_CAPACITY: usize = 64;

/// Audio processor that runs in the audio callback.
pub struct SynthProcessor {
    /// Voices that have been scheduled and not yet released.
    voices: Vec<Voice>,
    /// Handle for receiving commands from the UI thread.
    handle: AudioHandle,
    /// Mono mix buffer, reused across callbacks.
    mix: Vec<f32>,
    /// Audio clock in samples since the stream started.
    clock: u64,
    sample_rate: f32,
    /// Callback counter for throttling voice-count events.
    callback_counter: u32,
}

impl SynthProcessor {
    /// How often to report the active voice count (in callbacks).
    const REPORT_INTERVAL: u32 = 16;

    pub fn new(sample_rate: f32, max_block_size: usize, handle: AudioHandle) -> Self {
        Self {
            voices: Vec::with_capacity(VOICE_CAPACITY),
            handle,
            mix: vec![0.0; max_block_size],
            clock: 0,
            sample_rate,
            callback_counter: 0,
        }
    }

    /// Fills an interleaved output buffer.
    ///
    /// The mono mix is hard-clipped to [-1, 1] and copied to every channel.
    pub fn process(&mut self, output: &mut [f32], channels: usize) {
        self.process_commands();

        let channels = channels.max(1);
        let num_frames = output.len() / channels;
        if self.mix.len() < num_frames {
            self.mix.resize(num_frames, 0.0);
        }
        let mix = &mut self.mix[..num_frames];
        mix.fill(0.0);

        for voice in &mut self.voices {
            voice.render_add(mix, self.clock);
        }

        for (frame, &sample) in output.chunks_mut(channels).zip(mix.iter()) {
            frame.fill(sample.clamp(-1.0, 1.0));
        }
        // Any trailing partial frame stays silent
        for sample in output.iter_mut().skip(num_frames * channels) {
            *sample = 0.0;
        }

        self.clock += num_frames as u64;
        self.release_finished();

        self.callback_counter += 1;
        if self.callback_counter >= Self::REPORT_INTERVAL {
            self.callback_counter = 0;
            self.handle
                .send_event_lossy(SynthEvent::ActiveVoices(self.voices.len()));
        }
    }

    fn process_commands(&mut self) {
        while let Some(cmd) = self.handle.recv_command() {
            match cmd {
                SynthCommand::Play(score) => {
                    let (clock, sample_rate) = (self.clock, self.sample_rate);
                    self.voices.extend(
                        score
                            .segments()
                            .map(|&segment| Voice::new(segment, clock, sample_rate)),
                    );
                    self.handle
                        .send_event_lossy(SynthEvent::VoicesStarted(score.len()));
                }
            }
        }
    }

    fn release_finished(&mut self) {
        let before = self.voices.len();
        let clock = self.clock;
        self.voices.retain(|voice| !voice.is_finished(clock));
        let released = before - self.voices.len();
        if released > 0 {
            self.handle
                .send_event_lossy(SynthEvent::VoicesFinished(released));
        }
    }
}

#[cfg(test)]
impl SynthProcessor {
    /// Current audio clock, in samples.
    pub fn clock(&self) -> u64 {
        self.clock
    }

    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }
}
