//! Display facade
//!
//! [`Display`] owns the panel's memory and the controller link. It is created
//! with a default layout holding one full-screen horizontal segment, reachable
//! through [`Display::screen`]. Further layouts and segments are created on
//! demand and drawn through [`Display::canvas`].

use pagewise_hal::Transport;

use crate::addressing::AddressMode;
use crate::canvas::Canvas;
use crate::config::{
    DisplayConfig, FadeFrames, Geometry, LayoutConfig, Resolution, MAX_GRAM_BYTES,
};
use crate::error::{config_error, ConfigError, Error};
use crate::layout::Layout;
use crate::link::{cmd, Link};
use crate::segment::Segment;

/// Id of the layout created together with the display
pub const DEFAULT_LAYOUT_ID: u8 = 0;

/// A physical page-addressed display
pub struct Display<T> {
    id: u8,
    geometry: Geometry,
    config: DisplayConfig,
    /// Only the first `geometry.gram_size()` bytes are used
    gram: [u8; MAX_GRAM_BYTES],
    link: Link<T>,
    screen: Segment,
    /// `None` once every layout id has been handed out
    next_layout: Option<u8>,
}

impl<T: Transport> Display<T> {
    /// Create a display; no bytes are sent until [`Display::init`]
    ///
    /// `id` distinguishes segments of different displays in one program.
    pub fn new(
        id: u8,
        resolution: Resolution,
        transport: T,
        config: DisplayConfig,
    ) -> Result<Self, ConfigError> {
        let geometry = resolution.geometry();
        let mut default_layout =
            Layout::new(id, DEFAULT_LAYOUT_ID, geometry, LayoutConfig::full(geometry));
        let screen = default_layout.create_segment(
            AddressMode::Horizontal,
            0,
            0,
            geometry.width - 1,
            geometry.pages() - 1,
        )?;

        Ok(Self {
            id,
            geometry,
            config,
            gram: [0; MAX_GRAM_BYTES],
            link: Link::new(transport, geometry, config.transfer_mode),
            screen,
            next_layout: Some(DEFAULT_LAYOUT_ID + 1),
        })
    }

    /// Display id
    pub fn id(&self) -> u8 {
        self.id
    }

    /// Panel geometry
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Configuration the display was created with
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Underlying transport
    pub fn transport(&self) -> &T {
        self.link.transport()
    }

    /// Underlying transport, mutably
    ///
    /// Commands sent directly are not tracked; the next update may skip a
    /// window it believes is still programmed.
    pub fn transport_mut(&mut self) -> &mut T {
        self.link.transport_mut()
    }

    /// Give the transport back
    pub fn release(self) -> T {
        self.link.into_transport()
    }

    /// Whole display memory in panel order of the default segment
    pub fn gram(&self) -> &[u8] {
        &self.gram[..self.geometry.gram_size()]
    }

    /// New layout spanning all display memory
    ///
    /// Fails once 255 layouts have been created.
    pub fn create_layout(&mut self) -> Result<Layout, ConfigError> {
        let id = self.take_layout_id()?;
        Ok(Layout::new(
            self.id,
            id,
            self.geometry,
            LayoutConfig::full(self.geometry),
        ))
    }

    /// New layout with explicit capacity and segment limit
    pub fn create_layout_with(&mut self, config: LayoutConfig) -> Result<Layout, ConfigError> {
        let size = self.geometry.gram_size();
        if config.capacity > size {
            return Err(config_error(ConfigError::OutOfMemory {
                requested: config.capacity,
                available: size,
            }));
        }

        let id = self.take_layout_id()?;
        Ok(Layout::new(self.id, id, self.geometry, config))
    }

    /// Each id is handed out once
    fn take_layout_id(&mut self) -> Result<u8, ConfigError> {
        let id = self
            .next_layout
            .ok_or_else(|| config_error(ConfigError::TooManyLayouts))?;
        self.next_layout = id.checked_add(1);

        #[cfg(feature = "defmt")]
        defmt::debug!("display {}: layout {} created", self.id, id);

        Ok(id)
    }

    /// Default full-screen segment
    pub fn screen_segment(&self) -> &Segment {
        &self.screen
    }

    /// Default full-screen segment, for changing its update mode or style
    pub fn screen_segment_mut(&mut self) -> &mut Segment {
        &mut self.screen
    }

    /// Draw on the default full-screen segment
    pub fn screen(&mut self) -> Canvas<'_, T> {
        let range = self.screen.span().range();
        Canvas::new(&mut self.screen, &mut self.gram[range], &mut self.link)
    }

    /// Draw on a segment created from one of this display's layouts
    pub fn canvas<'a>(&'a mut self, segment: &'a mut Segment) -> Canvas<'a, T> {
        debug_assert_eq!(segment.id().display, self.id, "segment of another display");

        let range = segment.span().range();
        debug_assert!(range.end <= self.geometry.gram_size());
        Canvas::new(segment, &mut self.gram[range], &mut self.link)
    }

    /// Run the controller bring-up sequence
    pub fn init(&mut self) -> Result<(), Error<T::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "display {}: init {}x{}",
            self.id,
            self.geometry.width,
            self.geometry.height
        );

        self.link.reset()?;
        self.off()?;

        self.set_mirror_vertical(self.config.mirror_vertical)?;
        self.set_mirror_horizontal(self.config.mirror_horizontal)?;
        self.set_contrast(self.config.contrast)?;

        let com_pins = if self.geometry.height == 32 { 0x02 } else { 0x12 };
        self.link.commands(&[
            cmd::SET_MUX_RATIO,
            self.geometry.height - 1,
            cmd::SET_CLOCK_DIV,
            0xF0,
            cmd::SET_COM_PINS,
            com_pins,
            cmd::SET_VCOM_DETECT,
            0x20, // 0.77 x Vcc
            cmd::SET_CHARGE_PUMP,
            0x14, // enable
        ])?;
        self.on()?;

        self.link
            .commands(&[cmd::SET_ADDR_MODE, AddressMode::Horizontal as u8])?;
        self.link.assume_addr_mode(AddressMode::Horizontal);
        Ok(())
    }

    /// Clear the default segment and push it
    pub fn clear_screen(&mut self) -> Result<(), Error<T::Error>> {
        let mut screen = self.screen();
        screen.clear(false);
        screen.update()
    }

    /// Blank the panel through the transport, leaving display memory as is
    pub fn clear_screen_save_gram(&mut self, invert: bool) -> Result<(), Error<T::Error>> {
        self.link.last_segment = None;
        self.link.set_addr_mode(AddressMode::Horizontal)?;
        self.link
            .set_hv_range(0, self.geometry.width - 1, 0, self.geometry.pages() - 1)?;
        self.link
            .fill(if invert { 0xFF } else { 0x00 }, self.geometry.gram_size())
    }

    /// Panel on
    pub fn on(&mut self) -> Result<(), Error<T::Error>> {
        self.link.command(cmd::DISPLAY_ON)
    }

    /// Panel off (sleep)
    pub fn off(&mut self) -> Result<(), Error<T::Error>> {
        self.link.command(cmd::DISPLAY_OFF)
    }

    /// Contrast, 0x00..=0xFF (reset value 0x7F)
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), Error<T::Error>> {
        self.link.commands(&[cmd::SET_CONTRAST, contrast])
    }

    /// Show lit pixels dark and vice versa
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), Error<T::Error>> {
        self.link.command(if inverted {
            cmd::SET_INVERSE
        } else {
            cmd::SET_NORMAL
        })
    }

    /// Flip the COM scan direction
    pub fn set_mirror_vertical(&mut self, on: bool) -> Result<(), Error<T::Error>> {
        self.link.command(if on {
            cmd::SET_COM_SCAN_DEC
        } else {
            cmd::SET_COM_SCAN_INC
        })
    }

    /// Remap columns right to left
    pub fn set_mirror_horizontal(&mut self, on: bool) -> Result<(), Error<T::Error>> {
        self.link.command(if on {
            cmd::SET_SEG_REMAP_ON
        } else {
            cmd::SET_SEG_REMAP_OFF
        })
    }

    /// Fade the panel out once over `frames`
    pub fn fade_out(&mut self, frames: FadeFrames) -> Result<(), Error<T::Error>> {
        self.link.commands(&[cmd::SET_FADE, 0x20 | frames as u8])
    }

    /// Keep fading out and in over `frames`
    pub fn enable_continuous_fade_out(&mut self, frames: FadeFrames) -> Result<(), Error<T::Error>> {
        self.link.commands(&[cmd::SET_FADE, 0x30 | frames as u8])
    }

    /// Stop any fade animation
    pub fn disable_fade_out(&mut self) -> Result<(), Error<T::Error>> {
        self.link.commands(&[cmd::SET_FADE, 0x00])
    }

    /// Light every pixel regardless of memory
    pub fn entire_on(&mut self) -> Result<(), Error<T::Error>> {
        self.link.command(cmd::ENTIRE_ON)
    }

    /// Show memory contents again after [`Display::entire_on`]
    pub fn entire_off(&mut self) -> Result<(), Error<T::Error>> {
        self.link.command(cmd::ENTIRE_ON_RESUME)
    }

    /// First memory row shown at the top; ignored past the panel height
    pub fn set_start_line(&mut self, line: u8) -> Result<(), Error<T::Error>> {
        if line >= self.geometry.height {
            return Ok(());
        }
        self.link.command(cmd::SET_START_LINE + line)
    }

    /// Vertical COM shift, 0..=63; larger values are ignored
    pub fn set_display_offset(&mut self, offset: u8) -> Result<(), Error<T::Error>> {
        if offset >= 64 {
            return Ok(());
        }
        self.link.commands(&[cmd::SET_DISPLAY_OFFSET, offset])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;
    use pagewise_hal::mock::{Event, RecordingTransport};
    use pagewise_hal::TransferMode;

    fn display(resolution: Resolution) -> Display<RecordingTransport> {
        Display::new(3, resolution, RecordingTransport::new(), DisplayConfig::default()).unwrap()
    }

    #[test]
    fn test_default_segment_covers_screen() {
        let d = display(Resolution::W128xH64);
        let s = d.screen_segment();
        assert_eq!(s.width(), 128);
        assert_eq!(s.height(), 64);
        assert_eq!(s.mode(), AddressMode::Horizontal);
        assert_eq!(s.span().len, 1024);
        assert_eq!(s.id().display, 3);
        assert_eq!(s.id().layout, DEFAULT_LAYOUT_ID);
    }

    #[test]
    fn test_resolution_is_honoured() {
        let d = display(Resolution::W64xH48);
        assert_eq!(d.screen_segment().width(), 64);
        assert_eq!(d.screen_segment().height(), 48);
        assert_eq!(d.gram().len(), 384);
    }

    #[test]
    fn test_layout_ids_are_sequential() {
        let mut d = display(Resolution::W128xH32);
        let a = d.create_layout().unwrap();
        let b = d.create_layout_with(LayoutConfig::with_capacity(64)).unwrap();
        assert_eq!(a.id(), 1);
        assert_eq!(b.id(), 2);
        assert_eq!(b.capacity(), 64);
    }

    #[test]
    fn test_layout_ids_are_never_reused() {
        let mut d = display(Resolution::W128xH32);
        for expected in 1..=u8::MAX {
            assert_eq!(d.create_layout().unwrap().id(), expected);
        }

        assert_eq!(d.create_layout(), Err(ConfigError::TooManyLayouts));
        assert_eq!(
            d.create_layout_with(LayoutConfig::with_capacity(8)),
            Err(ConfigError::TooManyLayouts)
        );
    }

    #[test]
    fn test_layout_larger_than_memory_rejected() {
        let mut d = display(Resolution::W128xH32);
        assert_eq!(
            d.create_layout_with(LayoutConfig::with_capacity(513)),
            Err(ConfigError::OutOfMemory {
                requested: 513,
                available: 512
            })
        );
    }

    #[test]
    fn test_layouts_share_memory() {
        let mut d = display(Resolution::W128xH64);
        let mut l = d.create_layout().unwrap();
        let mut s = l
            .create_segment(AddressMode::Horizontal, 0, 0, 7, 0)
            .unwrap();
        d.canvas(&mut s).draw_pixel(1, 0, true);

        // the new layout's first segment aliases the start of the default one
        assert_eq!(d.screen().pixel(1, 0), Some(true));
    }

    #[test]
    fn test_init_sequence() {
        let mut d = display(Resolution::W128xH32);
        d.init().unwrap();

        assert_eq!(d.transport().events()[0], Event::Reset);
        let cmds: Vec<u8, 32> = d.transport().commands().collect();
        assert_eq!(
            cmds.as_slice(),
            &[
                0xAE, 0xC8, 0xA1, 0x81, 0xFF, 0xA8, 31, 0xD5, 0xF0, 0xDA, 0x02, 0xDB, 0x20, 0x8D,
                0x14, 0xAF, 0x20, 0x00
            ]
        );
    }

    #[test]
    fn test_update_after_init_skips_mode_command() {
        let mut d = display(Resolution::W128xH64);
        d.init().unwrap();
        d.transport_mut().clear();
        d.screen().update().unwrap();

        let cmds: Vec<u8, 8> = d.transport().commands().collect();
        assert_eq!(cmds.as_slice(), &[0x21, 0, 127, 0x22, 0, 7]);
    }

    #[test]
    fn test_clear_screen_save_gram_keeps_memory() {
        let mut d = display(Resolution::W128xH64);
        d.screen().draw_pixel(5, 5, true);
        d.clear_screen_save_gram(true).unwrap();

        assert_eq!(d.screen().pixel(5, 5), Some(true));
        assert_eq!(d.transport().data().len(), 1024);
        assert!(d.transport().data().iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_clear_screen_save_gram_forces_window() {
        let mut d = display(Resolution::W128xH64);
        d.screen().update().unwrap();
        d.clear_screen_save_gram(false).unwrap();
        d.transport_mut().clear();
        d.screen().update().unwrap();

        let cmds: Vec<u8, 8> = d.transport().commands().collect();
        assert_eq!(cmds.as_slice(), &[0x21, 0, 127, 0x22, 0, 7]);
    }

    #[test]
    fn test_controller_commands() {
        let mut d = display(Resolution::W128xH64);
        d.set_inverted(true).unwrap();
        d.fade_out(FadeFrames::F16).unwrap();
        d.enable_continuous_fade_out(FadeFrames::F8).unwrap();
        d.disable_fade_out().unwrap();
        d.entire_on().unwrap();
        d.entire_off().unwrap();
        d.set_start_line(10).unwrap();
        d.set_start_line(64).unwrap();
        d.set_display_offset(5).unwrap();
        d.set_display_offset(64).unwrap();

        let cmds: Vec<u8, 16> = d.transport().commands().collect();
        assert_eq!(
            cmds.as_slice(),
            &[0xA7, 0x23, 0x21, 0x23, 0x30, 0x23, 0x00, 0xA5, 0xA4, 0x4A, 0xD3, 5]
        );
    }

    #[test]
    fn test_fire_and_forget_skips_wait() {
        let config = DisplayConfig {
            transfer_mode: TransferMode::FireAndForget,
            ..DisplayConfig::default()
        };
        let mut d =
            Display::new(0, Resolution::W128xH64, RecordingTransport::new(), config).unwrap();
        d.screen().update().unwrap();
        assert!(!d.transport().events().contains(&Event::WaitIdle));
    }
}
