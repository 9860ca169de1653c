//! Controller link
//!
//! Owns the transport and remembers what was last programmed on the
//! controller (addressing mode, which segment's window), so consecutive
//! pushes of the same segment skip redundant command bytes.

use pagewise_hal::{TransferMode, Transport};

use crate::addressing::AddressMode;
use crate::config::Geometry;
use crate::error::{config_error, ConfigError, Error};
use crate::segment::SegmentId;

/// SSD1306 commands
pub(crate) mod cmd {
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_ADDR_MODE: u8 = 0x20;
    pub const SET_COLUMN_ADDR: u8 = 0x21;
    pub const SET_PAGE_ADDR: u8 = 0x22;
    pub const SET_FADE: u8 = 0x23;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
    pub const SET_SEG_REMAP_OFF: u8 = 0xA0;
    pub const SET_SEG_REMAP_ON: u8 = 0xA1;
    pub const ENTIRE_ON_RESUME: u8 = 0xA4;
    pub const ENTIRE_ON: u8 = 0xA5;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_PAGE_START: u8 = 0xB0;
    pub const SET_COM_SCAN_INC: u8 = 0xC0;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
}

/// Transport plus controller state tracking
pub(crate) struct Link<T> {
    transport: T,
    geometry: Geometry,
    transfer: TransferMode,
    /// Mode currently programmed on the controller, if known
    addr_mode: Option<AddressMode>,
    /// Segment whose window was last programmed
    pub(crate) last_segment: Option<SegmentId>,
    /// The last push was partial, so the programmed window is not the full segment
    pub(crate) part_updated: bool,
}

impl<T: Transport> Link<T> {
    pub(crate) fn new(transport: T, geometry: Geometry, transfer: TransferMode) -> Self {
        Self {
            transport,
            geometry,
            transfer,
            addr_mode: None,
            last_segment: None,
            part_updated: false,
        }
    }

    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }

    pub(crate) fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub(crate) fn into_transport(self) -> T {
        self.transport
    }

    pub(crate) fn reset(&mut self) -> Result<(), Error<T::Error>> {
        self.addr_mode = None;
        self.last_segment = None;
        self.transport.reset().map_err(Error::Transport)
    }

    pub(crate) fn command(&mut self, c: u8) -> Result<(), Error<T::Error>> {
        self.transport.write_command(c).map_err(Error::Transport)
    }

    pub(crate) fn commands(&mut self, cs: &[u8]) -> Result<(), Error<T::Error>> {
        for &c in cs {
            self.command(c)?;
        }
        Ok(())
    }

    /// Program the addressing mode unless it is already active
    pub(crate) fn set_addr_mode(&mut self, mode: AddressMode) -> Result<(), Error<T::Error>> {
        if self.addr_mode == Some(mode) {
            return Ok(());
        }

        self.commands(&[cmd::SET_ADDR_MODE, mode as u8])?;
        self.addr_mode = Some(mode);
        Ok(())
    }

    /// Record a mode programmed outside [`Link::set_addr_mode`]
    pub(crate) fn assume_addr_mode(&mut self, mode: AddressMode) {
        self.addr_mode = Some(mode);
    }

    /// Column and page window for horizontal/vertical addressing
    pub(crate) fn set_hv_range(
        &mut self,
        col_start: u8,
        col_end: u8,
        page_start: u8,
        page_end: u8,
    ) -> Result<(), Error<T::Error>> {
        if col_start > col_end
            || col_end >= self.geometry.width
            || page_start > page_end
            || page_end >= self.geometry.pages()
        {
            return Err(config_error(ConfigError::WindowOutOfRange).into());
        }

        self.commands(&[
            cmd::SET_COLUMN_ADDR,
            col_start,
            col_end,
            cmd::SET_PAGE_ADDR,
            page_start,
            page_end,
        ])
    }

    /// Start column and page for page addressing
    pub(crate) fn set_page_range(&mut self, col_start: u8, page: u8) -> Result<(), Error<T::Error>> {
        if col_start >= self.geometry.width || page >= self.geometry.pages() {
            return Err(config_error(ConfigError::WindowOutOfRange).into());
        }

        self.commands(&[
            cmd::SET_PAGE_START + page,
            cmd::SET_COLUMN_ADDR,
            0,
            self.geometry.width - 1,
            cmd::SET_LOW_COLUMN | (col_start & 0x0F),
            cmd::SET_HIGH_COLUMN | ((col_start >> 4) & 0x0F),
        ])
    }

    /// Send display memory, waiting for completion in blocking mode
    pub(crate) fn write_data(&mut self, data: &[u8]) -> Result<(), Error<T::Error>> {
        self.transport.write_data(data).map_err(Error::Transport)?;
        self.settle()
    }

    /// Fill panel memory without touching the framebuffer
    pub(crate) fn fill(&mut self, pattern: u8, len: usize) -> Result<(), Error<T::Error>> {
        self.transport
            .fill_memory(pattern, len)
            .map_err(Error::Transport)?;
        self.settle()
    }

    fn settle(&mut self) -> Result<(), Error<T::Error>> {
        if self.transfer.waits() {
            self.transport.wait_idle().map_err(Error::Transport)?;
        }
        Ok(())
    }
}
