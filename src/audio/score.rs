//! Declarative sound scores.
//!
//! Every notification is a list of [`Segment`]s: an oscillator waveform with
//! frequency and gain automation. Table-driven tones and the custom slides,
//! decays and pulses all share this one representation and one renderer.

use std::f32::consts::TAU;

use super::automation::{AutomationCurve, MAX_CURVE_EVENTS};
use super::sound_type::SoundType;

/// Attack time of the standard tone envelope.
pub const ATTACK_SECONDS: f32 = 0.05;

/// Level the standard envelope decays to by the end of a tone.
pub const DECAY_FLOOR: f32 = 0.001;

/// Oscillator shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

impl Waveform {
    /// Sample at `phase` in [0, 1).
    ///
    /// Sine, triangle and sawtooth start at zero; square starts high.
    #[inline]
    pub fn sample(self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (phase * TAU).sin(),
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Triangle => {
                if phase < 0.25 {
                    phase * 4.0
                } else if phase < 0.75 {
                    1.0 - (phase - 0.25) * 4.0
                } else {
                    -1.0 + (phase - 0.75) * 4.0
                }
            }
            Waveform::Sawtooth => {
                // Shifted half a cycle so the ramp crosses zero at phase 0
                let shifted = (phase + 0.5).fract();
                2.0 * shifted - 1.0
            }
        }
    }
}

/// Most segments a single score can hold.
pub const MAX_SEGMENTS: usize = 4;

/// One oscillator voice scheduled relative to "now".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub waveform: Waveform,
    /// Offset from the moment the sound is requested, in seconds.
    pub start: f32,
    /// Time until the oscillator stops, in seconds.
    pub duration: f32,
    /// Frequency in Hz, relative to the segment start.
    pub frequency: AutomationCurve,
    /// Linear gain, relative to the segment start.
    pub gain: AutomationCurve,
}

impl Segment {
    /// A fixed-pitch tone with the standard envelope: silence, a linear
    /// attack to `peak` over 50 ms, then exponential decay to near silence
    /// by the end.
    pub fn tone(waveform: Waveform, frequency: f32, start: f32, duration: f32, peak: f32) -> Self {
        Self {
            waveform,
            start,
            duration,
            frequency: AutomationCurve::constant(frequency),
            gain: AutomationCurve::starting_at(0.0)
                .linear_ramp_to(peak, ATTACK_SECONDS)
                .exponential_ramp_to(DECAY_FLOOR, duration),
        }
    }

    /// Absolute stop time relative to "now".
    pub fn end(&self) -> f32 {
        self.start + self.duration
    }

    /// Loudest gain the segment reaches.
    pub fn peak(&self) -> f32 {
        self.gain.peak()
    }

    /// Frequency at the start of the segment.
    pub fn base_frequency(&self) -> f32 {
        self.frequency.initial()
    }
}

/// A fixed-capacity batch of segments, sent to the audio thread as one
/// command. Holds no heap memory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    segments: [Option<Segment>; MAX_SEGMENTS],
}

impl Score {
    /// Copies up to [`MAX_SEGMENTS`] segments; any beyond that are dropped.
    pub fn new(segments: &[Segment]) -> Self {
        debug_assert!(segments.len() <= MAX_SEGMENTS, "score is full");
        let mut slots = [None; MAX_SEGMENTS];
        for (slot, segment) in slots.iter_mut().zip(segments) {
            *slot = Some(*segment);
        }
        Self { segments: slots }
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.segments().count()
    }

    pub fn is_empty(&self) -> bool {
        self.segments[0].is_none()
    }
}

/// Builds the score for a notification at `volume` (clamped to [0, 1]).
pub fn notification_score(sound: SoundType, volume: f32) -> Vec<Segment> {
    use Waveform::*;

    let vol = clamp_volume(volume);
    match sound {
        SoundType::Classic => vec![Segment::tone(Sine, 880.0, 0.0, 0.6, vol)],
        SoundType::Bell => vec![
            Segment::tone(Sine, 523.25, 0.0, 2.0, vol),
            Segment::tone(Sine, 1046.5, 0.0, 1.5, vol * 0.3),
        ],
        SoundType::Digital => vec![
            Segment::tone(Square, 880.0, 0.0, 0.1, vol * 0.6),
            Segment::tone(Square, 880.0, 0.15, 0.1, vol * 0.6),
            Segment::tone(Square, 880.0, 0.3, 0.2, vol * 0.6),
        ],
        SoundType::Bird => vec![Segment {
            waveform: Sine,
            start: 0.0,
            duration: 0.3,
            frequency: AutomationCurve::starting_at(800.0)
                .linear_ramp_to(1200.0, 0.1)
                .linear_ramp_to(800.0, 0.2),
            gain: AutomationCurve::starting_at(0.0)
                .linear_ramp_to(vol, 0.1)
                .linear_ramp_to(0.0, 0.3),
        }],
        SoundType::Piano => vec![
            Segment::tone(Triangle, 440.0, 0.0, 1.5, vol),
            Segment::tone(Triangle, 554.37, 0.1, 1.5, vol * 0.8),
        ],
        SoundType::Arcade => vec![
            Segment::tone(Square, 440.0, 0.0, 0.1, vol * 0.4),
            Segment::tone(Square, 554.0, 0.1, 0.1, vol * 0.4),
            Segment::tone(Square, 659.0, 0.2, 0.1, vol * 0.4),
            Segment::tone(Square, 880.0, 0.3, 0.3, vol * 0.4),
        ],
        SoundType::Future => vec![Segment {
            waveform: Sawtooth,
            start: 0.0,
            duration: 0.6,
            frequency: AutomationCurve::starting_at(1200.0).exponential_ramp_to(200.0, 0.6),
            gain: AutomationCurve::starting_at(vol * 0.5).exponential_ramp_to(DECAY_FLOOR, 0.6),
        }],
        SoundType::Breeze => vec![
            Segment::tone(Sine, 329.63, 0.0, 3.0, vol * 0.6),
            Segment::tone(Sine, 440.0, 0.1, 3.0, vol * 0.6),
            Segment::tone(Sine, 554.37, 0.2, 3.0, vol * 0.6),
        ],
        SoundType::Success => vec![
            Segment::tone(Triangle, 523.25, 0.0, 0.2, vol),
            Segment::tone(Triangle, 659.25, 0.2, 0.2, vol),
            Segment::tone(Triangle, 783.99, 0.4, 0.6, vol),
        ],
        SoundType::Alert => {
            let mut gain = AutomationCurve::starting_at(vol);
            for i in 0..3 {
                let on = i as f32 * 0.2;
                gain = gain.set_at(vol, on).set_at(0.0, on + 0.1);
            }
            vec![Segment {
                waveform: Sawtooth,
                start: 0.0,
                duration: 0.6,
                frequency: AutomationCurve::constant(600.0),
                gain,
            }]
        }
    }
}

/// Builds the short UI click: a 300 Hz triangle blip decaying over 100 ms.
pub fn click_score(volume: f32) -> Vec<Segment> {
    let vol = clamp_volume(volume);
    vec![Segment {
        waveform: Waveform::Triangle,
        start: 0.0,
        duration: 0.1,
        frequency: AutomationCurve::constant(300.0),
        gain: AutomationCurve::starting_at(vol * 0.5).exponential_ramp_to(0.01, 0.1),
    }]
}

fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_classic_is_single_sine() {
        let score = notification_score(SoundType::Classic, 0.5);
        assert_eq!(score.len(), 1);
        let s = &score[0];
        assert_eq!(s.waveform, Waveform::Sine);
        assert_eq!(s.base_frequency(), 880.0);
        assert_eq!(s.start, 0.0);
        assert!(approx(s.duration, 0.6));
        assert!(approx(s.peak(), 0.5));
    }

    #[test]
    fn test_bell_has_two_concurrent_partials() {
        let score = notification_score(SoundType::Bell, 1.0);
        assert_eq!(score.len(), 2);
        assert_eq!(score[0].base_frequency(), 523.25);
        assert_eq!(score[1].base_frequency(), 1046.5);
        assert_eq!(score[0].start, score[1].start);
        assert!(approx(score[0].duration, 2.0));
        assert!(approx(score[1].duration, 1.5));
        assert!(approx(score[1].peak(), score[0].peak() * 0.3));
    }

    #[test]
    fn test_unknown_type_matches_classic() {
        let unknown = notification_score(SoundType::from_id("unknown-type"), 0.5);
        assert_eq!(unknown, notification_score(SoundType::Classic, 0.5));
    }

    #[test]
    fn test_digital_pulses() {
        let score = notification_score(SoundType::Digital, 1.0);
        let starts: Vec<f32> = score.iter().map(|s| s.start).collect();
        assert_eq!(starts, vec![0.0, 0.15, 0.3]);
        assert!(approx(score[2].duration, 0.2));
        assert!(score.iter().all(|s| s.waveform == Waveform::Square));
        assert!(score.iter().all(|s| approx(s.peak(), 0.6)));
    }

    #[test]
    fn test_arcade_arpeggio() {
        let score = notification_score(SoundType::Arcade, 1.0);
        let freqs: Vec<f32> = score.iter().map(Segment::base_frequency).collect();
        assert_eq!(freqs, vec![440.0, 554.0, 659.0, 880.0]);
        assert!(approx(score[3].start, 0.3));
        assert!(approx(score[3].duration, 0.3));
    }

    #[test]
    fn test_success_notes_are_sequential() {
        let score = notification_score(SoundType::Success, 1.0);
        for pair in score.windows(2) {
            assert!(approx(pair[0].end(), pair[1].start));
        }
        assert!(approx(score[2].duration, 0.6));
    }

    #[test]
    fn test_bird_slides_up_and_back() {
        let score = notification_score(SoundType::Bird, 0.8);
        let s = &score[0];
        assert!(approx(s.frequency.value_at(0.0), 800.0));
        assert!((s.frequency.value_at(0.1) - 1200.0).abs() < 1e-3);
        assert!((s.frequency.value_at(0.2) - 800.0).abs() < 1e-3);
        assert!(approx(s.gain.value_at(0.1), 0.8));
        assert!(approx(s.gain.value_at(0.3), 0.0));
        assert!(approx(s.duration, 0.3));
    }

    #[test]
    fn test_future_decays_from_half_volume() {
        let score = notification_score(SoundType::Future, 1.0);
        let s = &score[0];
        assert_eq!(s.waveform, Waveform::Sawtooth);
        assert!(approx(s.gain.value_at(0.0), 0.5));
        assert!(s.gain.value_at(0.3) < 0.5);
        assert!((s.frequency.value_at(0.6) - 200.0).abs() < 1e-3);
    }

    #[test]
    fn test_alert_pulses_three_times() {
        let score = notification_score(SoundType::Alert, 0.7);
        let s = &score[0];
        for i in 0..3 {
            let on = i as f32 * 0.2 + 0.05;
            let off = i as f32 * 0.2 + 0.15;
            assert!(approx(s.gain.value_at(on), 0.7));
            assert!(approx(s.gain.value_at(off), 0.0));
        }
        assert_eq!(s.base_frequency(), 600.0);
    }

    #[test]
    fn test_breeze_chord_staggered() {
        let score = notification_score(SoundType::Breeze, 1.0);
        assert_eq!(score.len(), 3);
        assert!(score.iter().all(|s| approx(s.duration, 3.0)));
        assert!(approx(score[2].start, 0.2));
    }

    #[test]
    fn test_piano_second_note_delayed() {
        let score = notification_score(SoundType::Piano, 1.0);
        assert!(approx(score[1].start, 0.1));
        assert!(approx(score[1].peak(), 0.8));
    }

    #[test]
    fn test_volume_is_clamped() {
        let loud = notification_score(SoundType::Classic, 3.0);
        assert!(approx(loud[0].peak(), 1.0));
        let negative = notification_score(SoundType::Classic, -1.0);
        assert!(approx(negative[0].peak(), 0.001));
    }

    #[test]
    fn test_click_blip() {
        let score = click_score(0.2);
        assert_eq!(score.len(), 1);
        assert_eq!(score[0].waveform, Waveform::Triangle);
        assert_eq!(score[0].base_frequency(), 300.0);
        assert!(approx(score[0].gain.value_at(0.0), 0.1));
        assert!(approx(score[0].duration, 0.1));
    }

    #[test]
    fn test_every_score_fits_inline_storage() {
        for sound in SoundType::ALL {
            let segments = notification_score(sound, 1.0);
            assert!(segments.len() <= MAX_SEGMENTS, "{:?}", sound);
            for segment in &segments {
                assert!(segment.gain.events().len() <= MAX_CURVE_EVENTS, "{:?}", sound);
                assert!(segment.frequency.events().len() <= MAX_CURVE_EVENTS, "{:?}", sound);
            }
            assert_eq!(Score::new(&segments).len(), segments.len());
        }
    }

    #[test]
    fn test_score_keeps_segment_order() {
        let segments = notification_score(SoundType::Arcade, 1.0);
        let score = Score::new(&segments);
        let copied: Vec<Segment> = score.segments().copied().collect();
        assert_eq!(copied, segments);
        assert!(!score.is_empty());
        assert!(Score::new(&[]).is_empty());
    }

    #[test]
    fn test_audio_thread_payloads_are_plain_data() {
        fn assert_copy<T: Copy + Send + 'static>() {}
        assert_copy::<Segment>();
        assert_copy::<Score>();
    }

    #[test]
    fn test_waveforms_at_key_phases() {
        assert!(Waveform::Sine.sample(0.0).abs() < 1e-6);
        assert!((Waveform::Sine.sample(0.25) - 1.0).abs() < 1e-6);
        assert_eq!(Waveform::Square.sample(0.1), 1.0);
        assert_eq!(Waveform::Square.sample(0.6), -1.0);
        assert!((Waveform::Triangle.sample(0.25) - 1.0).abs() < 1e-6);
        assert!((Waveform::Triangle.sample(0.75) + 1.0).abs() < 1e-6);
        assert!(Waveform::Sawtooth.sample(0.0).abs() < 1e-6);
        assert!((Waveform::Sawtooth.sample(0.25) - 0.5).abs() < 1e-6);
    }
}
