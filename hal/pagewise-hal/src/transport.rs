//! Controller transport contract
//!
//! A transport moves command bytes and display-memory bytes to the
//! controller. Implementations may be blocking or may hand the data to a
//! DMA engine and return early; [`Transport::wait_idle`] is the completion
//! barrier in the latter case.

/// Chunk size used by the default [`Transport::fill_memory`]
pub const FILL_CHUNK: usize = 255;

/// Byte transport to a page-addressed display controller
pub trait Transport {
    /// Error type for bus operations
    type Error;

    /// Bring the controller into a known state after power-up
    fn reset(&mut self) -> Result<(), Self::Error>;

    /// Send one byte to the command register
    fn write_command(&mut self, cmd: u8) -> Result<(), Self::Error>;

    /// Send a run of bytes to display memory at the current address pointer
    ///
    /// An asynchronous implementation may still be reading `data` when this
    /// returns. Callers that keep mutating the source buffer must call
    /// [`Transport::wait_idle`] first.
    fn write_data(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Fill `len` bytes of display memory with `pattern`
    ///
    /// The default streams the pattern in [`FILL_CHUNK`]-byte writes.
    fn fill_memory(&mut self, pattern: u8, len: usize) -> Result<(), Self::Error> {
        let chunk = [pattern; FILL_CHUNK];
        let mut remaining = len;

        while remaining > 0 {
            let n = remaining.min(FILL_CHUNK);
            self.write_data(&chunk[..n])?;
            remaining -= n;
        }

        Ok(())
    }

    /// Block until every transfer handed to the transport has completed
    fn wait_idle(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn reset(&mut self) -> Result<(), Self::Error> {
        T::reset(self)
    }

    fn write_command(&mut self, cmd: u8) -> Result<(), Self::Error> {
        T::write_command(self, cmd)
    }

    fn write_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        T::write_data(self, data)
    }

    fn fill_memory(&mut self, pattern: u8, len: usize) -> Result<(), Self::Error> {
        T::fill_memory(self, pattern, len)
    }

    fn wait_idle(&mut self) -> Result<(), Self::Error> {
        T::wait_idle(self)
    }
}

/// How the display core synchronizes with data transfers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferMode {
    /// Wait for completion after every data transfer
    #[default]
    Blocking,
    /// Return as soon as the transport accepts the data
    ///
    /// The framebuffer bytes just handed over must not be modified until the
    /// transfer has finished. Nothing in the core enforces this.
    FireAndForget,
}

impl TransferMode {
    /// Whether the core must call [`Transport::wait_idle`] after a transfer
    pub const fn waits(self) -> bool {
        matches!(self, TransferMode::Blocking)
    }
}
