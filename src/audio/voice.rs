//! Voice rendering.
//!
//! A [`Voice`] plays one [`Segment`] against the audio clock. It is the only
//! renderer: every sound type reaches the speaker through it.

use super::score::Segment;

/// One segment being rendered on the audio thread.
#[derive(Debug, Clone, Copy)]
pub struct Voice {
    segment: Segment,
    /// Audio-clock sample at which the segment starts.
    start_sample: u64,
    /// Audio-clock sample at which the oscillator stops.
    end_sample: u64,
    /// Oscillator phase accumulator (0.0 to 1.0).
    phase: f32,
    sample_rate: f32,
}

impl Voice {
    /// Schedules `segment` relative to the audio-clock sample `now`.
    pub fn new(segment: Segment, now: u64, sample_rate: f32) -> Self {
        let start_sample = now + seconds_to_samples(segment.start, sample_rate);
        let end_sample = start_sample + seconds_to_samples(segment.duration, sample_rate);
        Self {
            segment,
            start_sample,
            end_sample,
            phase: 0.0,
            sample_rate,
        }
    }

    pub fn segment(&self) -> &Segment {
        &self.segment
    }

    /// True once the clock has passed the stop time.
    pub fn is_finished(&self, clock: u64) -> bool {
        clock >= self.end_sample
    }

    /// Renders the sample at audio-clock position `clock`.
    ///
    /// Returns silence before the start and after the stop time.
    #[inline]
    pub fn next_sample(&mut self, clock: u64) -> f32 {
        if clock < self.start_sample || clock >= self.end_sample {
            return 0.0;
        }
        let t = (clock - self.start_sample) as f32 / self.sample_rate;
        let frequency = self.segment.frequency.value_at(t).max(0.0);
        let gain = self.segment.gain.value_at(t);

        let sample = self.segment.waveform.sample(self.phase) * gain;

        self.phase += frequency / self.sample_rate;
        self.phase = self.phase.fract();

        sample
    }

    /// Adds this voice into a mono buffer whose first sample sits at `clock`.
    pub fn render_add(&mut self, buffer: &mut [f32], clock: u64) {
        for (i, out) in buffer.iter_mut().enumerate() {
            *out += self.next_sample(clock + i as u64);
        }
    }
}

fn seconds_to_samples(seconds: f32, sample_rate: f32) -> u64 {
    (seconds.max(0.0) * sample_rate).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::score::{notification_score, Waveform};
    use crate::audio::sound_type::SoundType;

    const SR: f32 = 48_000.0;

    #[test]
    fn test_silent_outside_window() {
        let segment = Segment::tone(Waveform::Square, 880.0, 0.15, 0.1, 0.6);
        let mut voice = Voice::new(segment, 1000, SR);

        let start = 1000 + (0.15 * SR).round() as u64;
        let end = start + (0.1 * SR).round() as u64;
        assert_eq!(voice.next_sample(1000), 0.0);
        assert_eq!(voice.next_sample(start - 1), 0.0);
        assert_eq!(voice.next_sample(end), 0.0);
        assert!(!voice.is_finished(end - 1));
        assert!(voice.is_finished(end));
    }

    #[test]
    fn test_output_bounded_by_peak() {
        for sound in SoundType::ALL {
            for segment in notification_score(sound, 0.5) {
                let peak = segment.peak();
                let mut voice = Voice::new(segment, 0, SR);
                let mut buffer = vec![0.0; (3.5 * SR) as usize];
                voice.render_add(&mut buffer, 0);
                let max = buffer.iter().fold(0.0_f32, |m, s| m.max(s.abs()));
                assert!(max <= peak + 1e-4, "{:?} exceeded peak {} with {}", sound, peak, max);
            }
        }
    }

    #[test]
    fn test_classic_reaches_peak_after_attack() {
        let segment = notification_score(SoundType::Classic, 0.5).remove(0);
        let mut voice = Voice::new(segment, 0, SR);
        let mut buffer = vec![0.0; (0.6 * SR) as usize];
        voice.render_add(&mut buffer, 0);

        let attack_end = (0.05 * SR) as usize;
        let around_peak = &buffer[attack_end - 200..attack_end + 200];
        let max = around_peak.iter().fold(0.0_f32, |m, s| m.max(s.abs()));
        assert!(max > 0.45 && max <= 0.5 + 1e-4, "peak was {}", max);

        let tail = &buffer[buffer.len() - 100..];
        assert!(tail.iter().all(|s| s.abs() < 0.01));
    }

    #[test]
    fn test_render_add_sums_into_buffer() {
        let segment = Segment {
            waveform: Waveform::Square,
            start: 0.0,
            duration: 1.0,
            frequency: crate::audio::automation::AutomationCurve::constant(100.0),
            gain: crate::audio::automation::AutomationCurve::constant(0.25),
        };
        let mut voice = Voice::new(segment, 0, SR);
        let mut buffer = vec![0.5; 10];
        voice.render_add(&mut buffer, 0);
        assert!(buffer.iter().all(|&s| (s - 0.75).abs() < 1e-6));
    }
}
