//! Pomodoro countdown state machine.

use std::time::Duration;

use tracing::info;

use crate::config::TimerSettings;
use crate::mode::TimerMode;

/// Emitted by [`PomodoroTimer::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// The countdown for this mode reached zero.
    Completed(TimerMode),
}

/// Countdown driven by elapsed wall-clock time.
#[derive(Debug, Clone)]
pub struct PomodoroTimer {
    mode: TimerMode,
    seconds_left: u32,
    total_seconds: u32,
    active: bool,
    /// Time accumulated toward the next whole-second decrement.
    carry: Duration,
    work_seconds: u32,
    break_seconds: u32,
}

impl PomodoroTimer {
    /// Starts in WORK mode with a full, paused countdown.
    pub fn new(settings: &TimerSettings) -> Self {
        let work_seconds = settings.work_seconds();
        Self {
            mode: TimerMode::Work,
            seconds_left: work_seconds,
            total_seconds: work_seconds,
            active: false,
            carry: Duration::ZERO,
            work_seconds,
            break_seconds: settings.break_seconds(),
        }
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn seconds_left(&self) -> u32 {
        self.seconds_left
    }

    pub fn total_seconds(&self) -> u32 {
        self.total_seconds
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn start(&mut self) {
        self.active = true;
    }

    pub fn pause(&mut self) {
        self.active = false;
    }

    /// Stops and refills the current mode's countdown.
    pub fn reset(&mut self) {
        self.active = false;
        self.carry = Duration::ZERO;
        self.total_seconds = self.duration_for(self.mode);
        self.seconds_left = self.total_seconds;
    }

    /// Switches to the other mode, paused and full.
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.other();
        self.reset();
    }

    /// Picks up new durations. A paused countdown is refilled right away; a
    /// running one keeps going and uses them from the next reset.
    pub fn apply_settings(&mut self, settings: &TimerSettings) {
        let changed = self.work_seconds != settings.work_seconds()
            || self.break_seconds != settings.break_seconds();
        self.work_seconds = settings.work_seconds();
        self.break_seconds = settings.break_seconds();
        if changed && !self.active {
            self.reset();
        }
    }

    /// Advances the countdown by `dt` of wall-clock time.
    pub fn advance(&mut self, dt: Duration) -> Option<TimerEvent> {
        if !self.active {
            return None;
        }
        self.carry += dt;
        while self.carry >= Duration::from_secs(1) && self.seconds_left > 0 {
            self.carry -= Duration::from_secs(1);
            self.seconds_left -= 1;
        }

        if self.seconds_left > 0 {
            return None;
        }

        let completed = self.mode;
        info!(mode = %completed, "Countdown completed");
        self.toggle_mode();
        Some(TimerEvent::Completed(completed))
    }

    /// Remaining fraction of the countdown, in [0, 1].
    pub fn progress(&self) -> f32 {
        if self.total_seconds == 0 {
            return 1.0;
        }
        (self.seconds_left as f32 / self.total_seconds as f32).clamp(0.0, 1.0)
    }

    /// Remaining time as `MM:SS`.
    pub fn display(&self) -> String {
        format_time(self.seconds_left)
    }

    fn duration_for(&self, mode: TimerMode) -> u32 {
        match mode {
            TimerMode::Work => self.work_seconds,
            TimerMode::Break => self.break_seconds,
        }
    }
}

/// Formats seconds as zero-padded `MM:SS`.
pub fn format_time(total_seconds: u32) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(work: u32, brk: u32) -> TimerSettings {
        TimerSettings {
            work_minutes: work,
            break_minutes: brk,
            ..TimerSettings::default()
        }
    }

    #[test]
    fn test_new_timer_is_paused_work() {
        let timer = PomodoroTimer::new(&TimerSettings::default());
        assert_eq!(timer.mode(), TimerMode::Work);
        assert_eq!(timer.seconds_left(), 1500);
        assert!(!timer.is_active());
        assert_eq!(timer.progress(), 1.0);
    }

    #[test]
    fn test_paused_timer_does_not_advance() {
        let mut timer = PomodoroTimer::new(&TimerSettings::default());
        assert!(timer.advance(Duration::from_secs(10)).is_none());
        assert_eq!(timer.seconds_left(), 1500);
    }

    #[test]
    fn test_fractional_time_accumulates() {
        let mut timer = PomodoroTimer::new(&TimerSettings::default());
        timer.start();
        for _ in 0..9 {
            timer.advance(Duration::from_millis(100));
        }
        assert_eq!(timer.seconds_left(), 1500);
        timer.advance(Duration::from_millis(100));
        assert_eq!(timer.seconds_left(), 1499);
    }

    #[test]
    fn test_completion_fires_once_and_switches_mode() {
        let mut timer = PomodoroTimer::new(&settings(1, 2));
        timer.start();
        assert!(timer.advance(Duration::from_secs(59)).is_none());
        let event = timer.advance(Duration::from_secs(5));
        assert_eq!(event, Some(TimerEvent::Completed(TimerMode::Work)));

        assert_eq!(timer.mode(), TimerMode::Break);
        assert_eq!(timer.seconds_left(), 120);
        assert!(!timer.is_active());
        assert!(timer.advance(Duration::from_secs(500)).is_none());
    }

    #[test]
    fn test_reset_and_toggle() {
        let mut timer = PomodoroTimer::new(&settings(25, 5));
        timer.start();
        timer.advance(Duration::from_secs(30));
        timer.reset();
        assert_eq!(timer.seconds_left(), 1500);
        assert!(!timer.is_active());

        timer.toggle_mode();
        assert_eq!(timer.mode(), TimerMode::Break);
        assert_eq!(timer.display(), "05:00");
    }

    #[test]
    fn test_apply_settings_refills_paused_timer() {
        let mut timer = PomodoroTimer::new(&settings(25, 5));
        timer.apply_settings(&settings(45, 5));
        assert_eq!(timer.seconds_left(), 45 * 60);
    }

    #[test]
    fn test_apply_settings_keeps_running_countdown() {
        let mut timer = PomodoroTimer::new(&settings(25, 5));
        timer.start();
        timer.advance(Duration::from_secs(10));
        timer.apply_settings(&settings(45, 5));
        assert_eq!(timer.seconds_left(), 1490);
        timer.reset();
        assert_eq!(timer.seconds_left(), 45 * 60);
    }

    #[test]
    fn test_progress_halfway() {
        let mut timer = PomodoroTimer::new(&settings(1, 1));
        timer.start();
        timer.advance(Duration::from_secs(30));
        assert!((timer.progress() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(59), "00:59");
        assert_eq!(format_time(1500), "25:00");
        assert_eq!(format_time(3599), "59:59");
    }
}
