//! Timer mode shared by the countdown, the theme and the particle field.

use serde::{Deserialize, Serialize};

/// Which half of the Pomodoro cycle is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimerMode {
    /// Focus period.
    #[default]
    Work,
    /// Rest period.
    Break,
}

impl TimerMode {
    /// The mode that follows this one.
    pub fn other(self) -> Self {
        match self {
            TimerMode::Work => TimerMode::Break,
            TimerMode::Break => TimerMode::Work,
        }
    }

    /// Short label shown under the clock.
    pub fn label(self) -> &'static str {
        match self {
            TimerMode::Work => "Focus Mode",
            TimerMode::Break => "Break Time",
        }
    }
}

impl std::fmt::Display for TimerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimerMode::Work => write!(f, "WORK"),
            TimerMode::Break => write!(f, "BREAK"),
        }
    }
}
