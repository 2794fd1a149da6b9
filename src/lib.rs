//! Pomodoro Glow Library
//!
//! A Pomodoro timer with an animated particle background and synthesized
//! notification sounds.

pub mod animation;
pub mod app;
pub mod audio;
pub mod config;
pub mod mode;
pub mod timer;
pub mod widgets;
