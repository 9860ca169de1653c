//! Recording transport for host tests
//!
//! Captures every command byte and data run so tests can assert on the
//! exact bus traffic produced by the display core.

use heapless::Vec;

use crate::transport::Transport;

/// Maximum number of recorded events
pub const MAX_EVENTS: usize = 1024;

/// Maximum number of recorded data bytes
pub const MAX_DATA: usize = 8192;

/// One recorded bus operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// `reset()` was called
    Reset,
    /// Command byte
    Command(u8),
    /// Data run of the given length (bytes are appended to [`RecordingTransport::data`])
    Data(usize),
    /// `wait_idle()` was called
    WaitIdle,
}

/// Errors produced by the recording transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MockError {
    /// Recording buffers are full
    Overflow,
    /// Failure injected with [`RecordingTransport::set_failing`] or
    /// [`RecordingTransport::set_failing_data`]
    Injected,
}

/// Transport that records traffic instead of sending it
#[derive(Debug, Default)]
pub struct RecordingTransport {
    events: Vec<Event, MAX_EVENTS>,
    data: Vec<u8, MAX_DATA>,
    failing: bool,
    failing_data: bool,
}

impl RecordingTransport {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events in order
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Concatenation of every data run
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Recorded command bytes in order
    pub fn commands(&self) -> impl Iterator<Item = u8> + '_ {
        self.events.iter().filter_map(|e| match e {
            Event::Command(c) => Some(*c),
            _ => None,
        })
    }

    /// Lengths of the recorded data runs in order
    pub fn data_runs(&self) -> impl Iterator<Item = usize> + '_ {
        self.events.iter().filter_map(|e| match e {
            Event::Data(n) => Some(*n),
            _ => None,
        })
    }

    /// Forget everything recorded so far
    pub fn clear(&mut self) {
        self.events.clear();
        self.data.clear();
    }

    /// Make every subsequent operation fail with [`MockError::Injected`]
    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    /// Make only data writes fail, leaving commands working
    pub fn set_failing_data(&mut self, failing: bool) {
        self.failing_data = failing;
    }

    fn record(&mut self, event: Event) -> Result<(), MockError> {
        if self.failing {
            return Err(MockError::Injected);
        }
        self.events.push(event).map_err(|_| MockError::Overflow)
    }
}

impl Transport for RecordingTransport {
    type Error = MockError;

    fn reset(&mut self) -> Result<(), Self::Error> {
        self.record(Event::Reset)
    }

    fn write_command(&mut self, cmd: u8) -> Result<(), Self::Error> {
        self.record(Event::Command(cmd))
    }

    fn write_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        if self.failing_data {
            return Err(MockError::Injected);
        }
        self.record(Event::Data(data.len()))?;
        self.data
            .extend_from_slice(data)
            .map_err(|_| MockError::Overflow)
    }

    fn wait_idle(&mut self) -> Result<(), Self::Error> {
        self.record(Event::WaitIdle)
    }
}
