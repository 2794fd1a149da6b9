//! Audio Engine
//!
//! Manages the cpal output stream on the system's default device.
//! The audio callback runs in a separate thread and must be real-time safe.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleRate, Stream, StreamConfig};
use thiserror::Error;
use tracing::{error, info};

use super::channels::{SynthChannels, UiHandle};
use super::processor::SynthProcessor;

/// Block size the processor prepares for before the first callback.
const PREPARED_BLOCK_SIZE: usize = 1024;

/// Errors that can occur while opening or driving the output stream.
#[derive(Debug, Clone, Error)]
pub enum AudioError {
    /// No audio output device was found.
    #[error("No audio output device found")]
    NoOutputDevice,
    /// Failed to get device configuration.
    #[error("Failed to get device configuration: {0}")]
    ConfigurationFailed(String),
    /// Failed to create the audio stream.
    #[error("Failed to create audio stream: {0}")]
    StreamCreationFailed(String),
    /// Failed to start playback.
    #[error("Failed to control audio playback: {0}")]
    StreamPlaybackFailed(String),
}

/// The audio engine: one running output stream plus the UI-side handle used
/// to schedule sounds on it.
pub struct AudioEngine {
    device: Device,
    config: StreamConfig,
    /// Kept alive for as long as the engine exists; dropping it stops audio.
    stream: Option<Stream>,
    handle: Option<UiHandle>,
}

impl AudioEngine {
    /// Open the default output device without starting a stream.
    pub fn new() -> Result<Self, AudioError> {
        let host = cpal::default_host();

        let device = host
            .default_output_device()
            .ok_or(AudioError::NoOutputDevice)?;

        let supported_config = device
            .default_output_config()
            .map_err(|e| AudioError::ConfigurationFailed(e.to_string()))?;

        let config = StreamConfig {
            channels: supported_config.channels(),
            sample_rate: SampleRate(supported_config.sample_rate().0),
            buffer_size: cpal::BufferSize::Default,
        };

        Ok(Self {
            device,
            config,
            stream: None,
            handle: None,
        })
    }

    /// Open the default device and start the synth stream on it.
    pub fn open() -> Result<Self, AudioError> {
        let mut engine = Self::new()?;
        engine.start()?;
        Ok(engine)
    }

    /// Name of the output device.
    pub fn device_name(&self) -> String {
        self.device.name().unwrap_or_else(|_| "Unknown".to_string())
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate.0
    }

    /// Number of output channels.
    pub fn channels(&self) -> u16 {
        self.config.channels
    }

    /// Start the output stream with a fresh [`SynthProcessor`].
    pub fn start(&mut self) -> Result<(), AudioError> {
        if self.stream.is_some() {
            return Ok(());
        }

        let channels = self.config.channels as usize;
        let (ui_handle, audio_handle) = SynthChannels::with_defaults().split();
        let mut processor = SynthProcessor::new(
            self.config.sample_rate.0 as f32,
            PREPARED_BLOCK_SIZE,
            audio_handle,
        );

        let stream = self
            .device
            .build_output_stream(
                &self.config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    // REAL-TIME SAFE: no locks, no blocking, nothing freed
                    processor.process(data, channels);
                },
                move |err| {
                    error!("Audio stream error: {}", err);
                },
                None,
            )
            .map_err(|e| AudioError::StreamCreationFailed(e.to_string()))?;

        stream
            .play()
            .map_err(|e| AudioError::StreamPlaybackFailed(e.to_string()))?;

        info!(
            device = %self.device_name(),
            sample_rate = self.sample_rate(),
            channels = self.channels(),
            "Audio stream started"
        );

        self.stream = Some(stream);
        self.handle = Some(ui_handle);
        Ok(())
    }

    /// True when the stream is gone or its processor was dropped.
    pub fn is_abandoned(&self) -> bool {
        self.handle
            .as_ref()
            .map_or(true, UiHandle::is_abandoned)
    }

    /// UI-side handle of the running stream, if started.
    pub fn handle_mut(&mut self) -> Option<&mut UiHandle> {
        self.handle.as_mut()
    }
}
