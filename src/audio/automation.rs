//! Parameter automation curves.
//!
//! A curve is a time-ordered list of events in the style of an audio-param
//! timeline: instant sets, linear ramps and exponential ramps. Times are in
//! seconds relative to the start of the owning segment.

/// One automation event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AutomationEvent {
    /// Jump to `value` at `time`.
    Set { value: f32, time: f32 },
    /// Ramp linearly from the previous event to `value`, arriving at `end`.
    LinearRamp { value: f32, end: f32 },
    /// Ramp exponentially from the previous event to `value`, arriving at
    /// `end`. Both endpoints must be non-zero with the same sign; otherwise
    /// the previous value holds until `end` and then jumps.
    ExponentialRamp { value: f32, end: f32 },
}

impl AutomationEvent {
    /// Time at which the event's value is reached.
    pub fn time(&self) -> f32 {
        match *self {
            AutomationEvent::Set { time, .. } => time,
            AutomationEvent::LinearRamp { end, .. } => end,
            AutomationEvent::ExponentialRamp { end, .. } => end,
        }
    }

    /// Value reached at [`time`](Self::time).
    pub fn value(&self) -> f32 {
        match *self {
            AutomationEvent::Set { value, .. } => value,
            AutomationEvent::LinearRamp { value, .. } => value,
            AutomationEvent::ExponentialRamp { value, .. } => value,
        }
    }
}

/// Most events a single curve can hold.
pub const MAX_CURVE_EVENTS: usize = 8;

/// A piecewise curve built from [`AutomationEvent`]s.
///
/// Before the first event the curve reads as the first event's value; after
/// the last event it holds the last value. Events live inline so a curve can
/// be copied to and dropped on the audio thread without touching the heap.
#[derive(Debug, Clone, Copy)]
pub struct AutomationCurve {
    events: [AutomationEvent; MAX_CURVE_EVENTS],
    len: usize,
}

const UNUSED_EVENT: AutomationEvent = AutomationEvent::Set {
    value: 0.0,
    time: 0.0,
};

impl Default for AutomationCurve {
    fn default() -> Self {
        Self {
            events: [UNUSED_EVENT; MAX_CURVE_EVENTS],
            len: 0,
        }
    }
}

impl PartialEq for AutomationCurve {
    fn eq(&self, other: &Self) -> bool {
        self.events() == other.events()
    }
}

impl AutomationCurve {
    /// A curve that starts at `value` at time zero.
    pub fn starting_at(value: f32) -> Self {
        Self::default().push(AutomationEvent::Set { value, time: 0.0 })
    }

    /// A curve that never changes.
    pub fn constant(value: f32) -> Self {
        Self::starting_at(value)
    }

    /// Appends an instant change.
    pub fn set_at(self, value: f32, time: f32) -> Self {
        self.push(AutomationEvent::Set { value, time })
    }

    /// Appends a linear ramp.
    pub fn linear_ramp_to(self, value: f32, end: f32) -> Self {
        self.push(AutomationEvent::LinearRamp { value, end })
    }

    /// Appends an exponential ramp.
    pub fn exponential_ramp_to(self, value: f32, end: f32) -> Self {
        self.push(AutomationEvent::ExponentialRamp { value, end })
    }

    /// Events past [`MAX_CURVE_EVENTS`] are dropped.
    fn push(mut self, event: AutomationEvent) -> Self {
        debug_assert!(self.len < MAX_CURVE_EVENTS, "automation curve is full");
        if self.len < MAX_CURVE_EVENTS {
            self.events[self.len] = event;
            self.len += 1;
        }
        self
    }

    pub fn events(&self) -> &[AutomationEvent] {
        &self.events[..self.len]
    }

    /// Largest value the curve ever reaches.
    pub fn peak(&self) -> f32 {
        self.events()
            .iter()
            .map(AutomationEvent::value)
            .fold(f32::NEG_INFINITY, f32::max)
    }

    /// Value at the start of the curve.
    pub fn initial(&self) -> f32 {
        self.events().first().map(AutomationEvent::value).unwrap_or(0.0)
    }

    /// Evaluates the curve at `t` seconds.
    pub fn value_at(&self, t: f32) -> f32 {
        let events = self.events();
        let Some(first) = events.first() else {
            return 0.0;
        };
        let mut prev_time = first.time().min(0.0);
        let mut prev_value = first.value();

        for event in events {
            match *event {
                AutomationEvent::Set { value, time } => {
                    if t < time {
                        return prev_value;
                    }
                    prev_value = value;
                    prev_time = time;
                }
                AutomationEvent::LinearRamp { value, end } => {
                    if t < end {
                        let span = end - prev_time;
                        if span <= 0.0 {
                            return value;
                        }
                        let progress = ((t - prev_time) / span).clamp(0.0, 1.0);
                        return prev_value + (value - prev_value) * progress;
                    }
                    prev_value = value;
                    prev_time = end;
                }
                AutomationEvent::ExponentialRamp { value, end } => {
                    if t < end {
                        let span = end - prev_time;
                        let valid = prev_value != 0.0 && value != 0.0 && (prev_value > 0.0) == (value > 0.0);
                        if !valid {
                            return prev_value;
                        }
                        if span <= 0.0 {
                            return value;
                        }
                        let progress = ((t - prev_time) / span).clamp(0.0, 1.0);
                        return prev_value * (value / prev_value).powf(progress);
                    }
                    prev_value = value;
                    prev_time = end;
                }
            }
        }

        prev_value
    }
}
