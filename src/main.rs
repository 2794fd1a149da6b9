//! Pomodoro Glow - A Pomodoro timer with a glowing particle background
//!
//! Entry point for the application.

use eframe::egui;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use pomodoro_glow::app::PomodoroApp;
use pomodoro_glow::config::AppConfig;

fn main() -> eframe::Result<()> {
    // Init logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    let config = match AppConfig::load_from_env() {
        Ok(config) => config,
        Err(e) => {
            warn!("{}; using default configuration", e);
            AppConfig::default()
        }
    };

    info!("Pomodoro Glow starting");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([360.0, 520.0])
            .with_title("Pomodoro Glow"),
        ..Default::default()
    };

    eframe::run_native(
        "Pomodoro Glow",
        options,
        Box::new(move |_cc| Ok(Box::new(PomodoroApp::new(&config)))),
    )
}
