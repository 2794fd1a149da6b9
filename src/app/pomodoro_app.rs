//! Main application struct for the Pomodoro timer
//!
//! Contains the PomodoroApp which implements eframe::App and owns the
//! countdown, the animated particle background and the notification synth.

use std::time::{Duration, Instant};

use eframe::egui::{self, Align, Align2, Color32, Layout, RichText, Vec2};
use tracing::{debug, info};

use super::theme;
use crate::animation::{FrameLoop, PainterSurface, ParticleField, Surface};
use crate::audio::{CpalSink, NotificationSynth, SoundSink, SoundType, DEFAULT_CLICK_VOLUME};
use crate::config::{AppConfig, TimerSettings, BREAK_MINUTES_RANGE, WORK_MINUTES_RANGE};
use crate::mode::TimerMode;
use crate::timer::{PomodoroTimer, TimerEvent};
use crate::widgets::{progress_ring, RingConfig};

/// Repaint interval for the countdown while the particle loop is paused.
const IDLE_REPAINT: Duration = Duration::from_millis(250);

/// Width of each control button.
const BUTTON_WIDTH: f32 = 120.0;

/// Main application state for the Pomodoro timer
pub struct PomodoroApp<S: SoundSink = CpalSink> {
    /// Settings currently in effect
    settings: TimerSettings,

    timer: PomodoroTimer,

    /// Animated background
    field: ParticleField,

    /// Drives the background once per host frame
    frame_loop: FrameLoop,

    synth: NotificationSynth<S>,

    /// Whether the settings window is open
    settings_open: bool,

    /// Time of the previous update, for countdown deltas
    last_update: Option<Instant>,

    /// Mode whose accent colors are currently applied
    styled_mode: Option<TimerMode>,

    /// Whether theme has been applied
    theme_applied: bool,
}

impl PomodoroApp<CpalSink> {
    /// Create the app with the system audio output.
    pub fn new(config: &AppConfig) -> Self {
        Self::with_sink(config, CpalSink::new())
    }
}

impl<S: SoundSink> PomodoroApp<S> {
    /// Create the app with an explicit sound sink.
    pub fn with_sink(config: &AppConfig, sink: S) -> Self {
        let settings = config.timer.clone().sanitized();
        let timer = PomodoroTimer::new(&settings);
        let mut field = ParticleField::with_seed(timer.mode(), config.particle_count, config.seed);
        let [width, height] = config.window_size;
        field.resize(width, height);

        info!(
            work_minutes = settings.work_minutes,
            break_minutes = settings.break_minutes,
            sound = %settings.sound_type,
            particles = config.particle_count,
            "Pomodoro app created"
        );

        Self {
            settings,
            timer,
            field,
            frame_loop: FrameLoop::new(),
            synth: NotificationSynth::new(sink),
            settings_open: false,
            last_update: None,
            styled_mode: None,
            theme_applied: false,
        }
    }

    pub fn timer(&self) -> &PomodoroTimer {
        &self.timer
    }

    pub fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn synth(&self) -> &NotificationSynth<S> {
        &self.synth
    }

    /// Advance the countdown and react to completion.
    fn advance(&mut self, dt: Duration) {
        if let Some(TimerEvent::Completed(mode)) = self.timer.advance(dt) {
            if self.settings.sound_enabled {
                self.synth.play(self.settings.sound_type, self.settings.volume);
            }
            debug!(completed = %mode, next = %self.timer.mode(), "Switched mode");
        }
        self.field.set_mode(self.timer.mode());
    }

    /// Keep the particle field bounds in step with the window.
    fn sync_field_size(&mut self, width: f32, height: f32) {
        if self.field.bounds() != (width, height) {
            self.field.resize(width, height);
        }
    }

    /// Replace the settings, letting the timer pick up new durations.
    fn update_settings(&mut self, settings: TimerSettings) {
        let settings = settings.sanitized();
        if settings == self.settings {
            return;
        }
        self.timer.apply_settings(&settings);
        self.settings = settings;
        self.field.set_mode(self.timer.mode());
    }

    fn click(&mut self) {
        if self.settings.sound_enabled {
            self.synth.play_click(DEFAULT_CLICK_VOLUME);
        }
    }

    /// Apply the actions collected while drawing.
    fn handle_actions(&mut self, actions: TimerActions) {
        if actions.any() {
            self.click();
        }
        if actions.toggle_running {
            if self.timer.is_active() {
                self.timer.pause();
            } else {
                self.timer.start();
            }
        }
        if actions.reset {
            self.timer.reset();
        }
        if actions.skip {
            self.timer.toggle_mode();
            self.field.set_mode(self.timer.mode());
        }
        if actions.open_settings {
            self.settings_open = true;
        }
        if actions.close_settings {
            self.settings_open = false;
        }
        if actions.preview_sound {
            self.synth.play(self.settings.sound_type, self.settings.volume);
        }
    }

    /// Paint one frame of the particle background behind every panel.
    fn draw_background(&mut self, ctx: &egui::Context) {
        let screen = ctx.screen_rect();
        self.sync_field_size(screen.width(), screen.height());

        let minimized = ctx.input(|i| i.viewport().minimized.unwrap_or(false));
        if minimized {
            if self.frame_loop.is_running() {
                self.frame_loop.stop();
            }
        } else {
            self.frame_loop.start();
        }

        let painter = ctx.layer_painter(egui::LayerId::background());
        let mut surface = PainterSurface::new(&painter, screen);
        let surface = surface.as_mut().map(|s| s as &mut dyn Surface);

        if self.frame_loop.run_frame(&mut self.field, surface) {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(IDLE_REPAINT);
        }
    }

    /// Ring colored for the current mode, glowing behind.
    fn ring_config(&self) -> RingConfig {
        let mode = self.timer.mode();
        RingConfig::default()
            .with_color(theme::mode_accent(mode))
            .with_glow(theme::mode_glow(mode))
    }

    /// Draw the countdown ring, labels and controls
    fn draw_timer(&self, ui: &mut egui::Ui) -> TimerActions {
        let mut actions = TimerActions::default();
        let mode = self.timer.mode();
        let accent = theme::mode_accent(mode);
        let ring = self.ring_config();

        let content_height = ring.diameter() + 130.0;
        ui.add_space(((ui.available_height() - content_height) / 2.0).max(16.0));

        ui.vertical_centered(|ui| {
            let response = progress_ring(ui, self.timer.progress(), &ring);
            let center = response.rect.center();
            let painter = ui.painter();
            painter.text(
                center - Vec2::new(0.0, 8.0),
                Align2::CENTER_CENTER,
                self.timer.display(),
                egui::FontId::monospace(54.0),
                accent,
            );
            painter.text(
                center + Vec2::new(0.0, 36.0),
                Align2::CENTER_CENTER,
                mode.label(),
                egui::FontId::proportional(16.0),
                theme::text::SECONDARY,
            );

            ui.add_space(28.0);

            let row_width = 2.0 * BUTTON_WIDTH + ui.spacing().item_spacing.x;
            ui.horizontal(|ui| {
                ui.add_space(((ui.available_width() - row_width) / 2.0).max(0.0));

                let primary_text = if self.timer.is_active() {
                    "⏸ Pause"
                } else {
                    "▶ Start"
                };
                let primary = egui::Button::new(RichText::new(primary_text).color(accent).strong())
                    .fill(Color32::WHITE)
                    .min_size(Vec2::new(BUTTON_WIDTH, 40.0));
                if ui.add(primary).clicked() {
                    actions.toggle_running = true;
                }

                let reset = egui::Button::new(RichText::new("⟲ Reset").color(theme::text::PRIMARY))
                    .min_size(Vec2::new(BUTTON_WIDTH, 40.0));
                if ui.add(reset).clicked() {
                    actions.reset = true;
                }
            });

            ui.add_space(12.0);

            let skip_text = match mode {
                TimerMode::Work => "Skip to break",
                TimerMode::Break => "Skip to work",
            };
            if ui
                .link(RichText::new(skip_text).color(theme::text::SECONDARY).small())
                .clicked()
            {
                actions.skip = true;
            }
        });

        actions
    }

    /// Sound status text and its color.
    fn status_line(&self) -> (String, Color32) {
        let sink = self.synth.sink();
        if !self.settings.sound_enabled {
            return ("🔇 Sound off".to_string(), theme::text::DISABLED);
        }
        if let Some(error) = sink.last_error() {
            return (
                format!("⚠ Sound unavailable: {}", error),
                theme::accent::WARNING,
            );
        }
        let mut text = sink.describe().unwrap_or_else(|| "Ready".to_string());
        match sink.active_voices() {
            0 => {}
            1 => text.push_str(" • 1 voice"),
            n => text.push_str(&format!(" • {} voices", n)),
        }
        (text, theme::text::SECONDARY)
    }

    /// Draw the bottom status bar
    fn draw_status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(8.0);

            let (status, color) = self.status_line();
            ui.label(RichText::new(status).color(color).small());

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.add_space(8.0);
                ui.label(
                    RichText::new(self.settings.sound_type.label())
                        .color(theme::text::DISABLED)
                        .small(),
                );
            });
        });
    }
}

/// Actions collected from the UI for deferred execution
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct TimerActions {
    toggle_running: bool,
    reset: bool,
    skip: bool,
    open_settings: bool,
    close_settings: bool,
    preview_sound: bool,
}

impl TimerActions {
    fn any(&self) -> bool {
        self.toggle_running
            || self.reset
            || self.skip
            || self.open_settings
            || self.close_settings
    }

    fn merge(self, other: TimerActions) -> TimerActions {
        TimerActions {
            toggle_running: self.toggle_running || other.toggle_running,
            reset: self.reset || other.reset,
            skip: self.skip || other.skip,
            open_settings: self.open_settings || other.open_settings,
            close_settings: self.close_settings || other.close_settings,
            preview_sound: self.preview_sound || other.preview_sound,
        }
    }
}

/// Settings window body. Edits `settings` in place.
fn settings_ui(ui: &mut egui::Ui, settings: &mut TimerSettings) -> TimerActions {
    let mut actions = TimerActions::default();

    egui::Grid::new("durations")
        .num_columns(2)
        .spacing([12.0, 8.0])
        .show(ui, |ui| {
            ui.label("Focus (min)");
            ui.add(egui::Slider::new(&mut settings.work_minutes, WORK_MINUTES_RANGE));
            ui.end_row();

            ui.label("Break (min)");
            ui.add(egui::Slider::new(&mut settings.break_minutes, BREAK_MINUTES_RANGE));
            ui.end_row();
        });

    ui.separator();
    ui.checkbox(&mut settings.sound_enabled, "Notification sound 🔊");

    if settings.sound_enabled {
        ui.horizontal(|ui| {
            egui::ComboBox::from_label("")
                .selected_text(settings.sound_type.label())
                .show_ui(ui, |ui| {
                    for sound in SoundType::ALL {
                        ui.selectable_value(&mut settings.sound_type, sound, sound.label());
                    }
                });
            if ui.button("▶").on_hover_text("Preview").clicked() {
                actions.preview_sound = true;
            }
        });

        ui.label(format!("Volume ({:.0}%)", settings.volume * 100.0));
        ui.add(
            egui::Slider::new(&mut settings.volume, 0.0..=1.0)
                .step_by(0.1)
                .show_value(false),
        );
    }

    ui.add_space(8.0);
    ui.vertical_centered_justified(|ui| {
        if ui.button("Done").clicked() {
            actions.close_settings = true;
        }
    });

    actions
}

impl<S: SoundSink> eframe::App for PomodoroApp<S> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply theme on first frame
        if !self.theme_applied {
            theme::apply_theme(ctx);
            self.theme_applied = true;
        }

        let now = Instant::now();
        let dt = self
            .last_update
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last_update = Some(now);
        self.advance(dt);

        if self.styled_mode != Some(self.timer.mode()) {
            theme::apply_mode_accent(ctx, self.timer.mode());
            self.styled_mode = Some(self.timer.mode());
        }

        self.draw_background(ctx);

        let settings_button = egui::Area::new(egui::Id::new("settings_button"))
            .anchor(Align2::RIGHT_TOP, [-16.0, 16.0])
            .show(ctx, |ui| ui.button("⚙ Settings").clicked())
            .inner;

        egui::TopBottomPanel::bottom("status_bar")
            .frame(egui::Frame::none().inner_margin(egui::Margin::symmetric(0.0, 6.0)))
            .show_separator_line(false)
            .show(ctx, |ui| {
                self.draw_status_bar(ui);
            });

        let mut actions = egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| self.draw_timer(ui))
            .inner;
        actions.open_settings |= settings_button;

        if self.settings_open {
            let mut open = true;
            let mut edited = self.settings.clone();
            let settings_actions = egui::Window::new("Settings")
                .open(&mut open)
                .collapsible(false)
                .resizable(false)
                .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
                .fixed_size([300.0, 0.0])
                .show(ctx, |ui| settings_ui(ui, &mut edited))
                .and_then(|response| response.inner)
                .unwrap_or_default();
            actions = actions.merge(settings_actions);
            if !open {
                actions.close_settings = true;
            }
            self.update_settings(edited);
        }

        // Handle deferred actions (to avoid borrow checker issues)
        self.handle_actions(actions);
        self.synth.sink_mut().poll_events();
    }
}
