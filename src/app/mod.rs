//! Application module
//!
//! Contains the main egui application and theme definitions.

pub mod pomodoro_app;
pub mod theme;

pub use pomodoro_app::PomodoroApp;
