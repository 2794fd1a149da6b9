//! Synth Channels
//!
//! Lock-free communication between the UI thread and the audio thread.
//! Uses rtrb ring buffers for SPSC (single-producer, single-consumer) queues.

use rtrb::{Consumer, Producer, RingBuffer};

use super::commands::{SynthCommand, SynthEvent};

/// Default buffer size for the command queue (UI -> audio).
pub const DEFAULT_COMMAND_BUFFER_SIZE: usize = 64;

/// Default buffer size for the event queue (audio -> UI).
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 256;

/// Holds both directions of communication channels.
/// Split into producer/consumer pairs for the two threads.
pub struct SynthChannels {
    command_tx: Producer<SynthCommand>,
    command_rx: Consumer<SynthCommand>,
    event_tx: Producer<SynthEvent>,
    event_rx: Consumer<SynthEvent>,
}

impl SynthChannels {
    /// Create new channels with the specified buffer sizes.
    pub fn new(command_capacity: usize, event_capacity: usize) -> Self {
        let (command_tx, command_rx) = RingBuffer::new(command_capacity);
        let (event_tx, event_rx) = RingBuffer::new(event_capacity);

        Self {
            command_tx,
            command_rx,
            event_tx,
            event_rx,
        }
    }

    /// Create new channels with default buffer sizes.
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_COMMAND_BUFFER_SIZE, DEFAULT_EVENT_BUFFER_SIZE)
    }

    /// Split into the UI-side and audio-side handles.
    pub fn split(self) -> (UiHandle, AudioHandle) {
        let ui_handle = UiHandle {
            command_tx: self.command_tx,
            event_rx: self.event_rx,
        };
        let audio_handle = AudioHandle {
            command_rx: self.command_rx,
            event_tx: self.event_tx,
        };
        (ui_handle, audio_handle)
    }
}

/// UI-side handle: sends commands, receives events.
pub struct UiHandle {
    command_tx: Producer<SynthCommand>,
    event_rx: Consumer<SynthEvent>,
}

impl UiHandle {
    /// Queue a command for the audio thread.
    /// Returns Err(cmd) if the buffer is full. Never blocks.
    pub fn send_command(&mut self, cmd: SynthCommand) -> Result<(), SynthCommand> {
        self.command_tx
            .push(cmd)
            .map_err(|rtrb::PushError::Full(cmd)| cmd)
    }

    /// Queue a command, dropping it silently if the buffer is full.
    pub fn send_command_lossy(&mut self, cmd: SynthCommand) {
        let _ = self.command_tx.push(cmd);
    }

    /// Receive one pending event, if any.
    pub fn recv_event(&mut self) -> Option<SynthEvent> {
        self.event_rx.pop().ok()
    }

    /// Drain all pending events.
    pub fn drain_events(&mut self) -> impl Iterator<Item = SynthEvent> + '_ {
        std::iter::from_fn(|| self.recv_event())
    }

    /// Whether the audio side has gone away.
    pub fn is_abandoned(&self) -> bool {
        self.command_tx.is_abandoned()
    }
}

/// Audio-side handle: receives commands, sends events.
///
/// REAL-TIME SAFE: all methods are non-blocking.
pub struct AudioHandle {
    command_rx: Consumer<SynthCommand>,
    event_tx: Producer<SynthEvent>,
}

impl AudioHandle {
    /// Receive one pending command, if any.
    pub fn recv_command(&mut self) -> Option<SynthCommand> {
        self.command_rx.pop().ok()
    }

    /// Send an event, dropping it if the UI is not keeping up.
    pub fn send_event_lossy(&mut self, event: SynthEvent) {
        let _ = self.event_tx.push(event);
    }

}
