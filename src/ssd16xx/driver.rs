//! SSD16xx Display Driver Implementation
//!
//! [`Ssd16xx`] owns the transport and the per-panel state and sequences every
//! write:
//!
//! 1. wait for the controller
//! 2. program the data entry mode, the RAM window and the RAM pointer
//! 3. run the full or partial refresh initialisation, chosen by the contrast
//!    hint; the first write after a bring-up always takes the full path
//! 4. stream the new bytes into the black/white bank and the retained
//!    previous frame into the red bank
//! 5. trigger the update and wait until the panel has refreshed
//!
//! ## Retained frame
//!
//! Partial waveforms drive each pixel from its previous value to its new one,
//! so the controller needs the previous frame in its second RAM bank. The
//! driver keeps one byte per (gate, page) RAM address and updates it only
//! after a write went through completely. Rectangles of different shapes
//! therefore compose: a later write always sees what is really on the panel.
//!
//! ## Polarity
//!
//! A set bit is a white pixel. Initialisation clears both banks to `0xFF`.

use crate::ssd16xx::cmd::Cmd;
use crate::ssd16xx::config::Config;
use crate::ssd16xx::error::{ArgumentError, Error};
use crate::ssd16xx::flag::Flag;
use crate::ssd16xx::geometry::{Area, RamAddress, RamWindow, ScanMode};
use crate::ssd16xx::graphics::Frame;
use crate::ssd16xx::interface::Interface;
use crate::ssd16xx::power::{Lifecycle, PowerState};
use crate::ssd16xx::ROWS_PER_PAGE;

/// Contrast hint that forces a full refresh
pub const CONTRAST_FULL_REFRESH: u8 = u8::MAX;

/// Shape of a pixel buffer handed to [`Ssd16xx::write`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BufferDescriptor {
    /// Number of valid bytes in the buffer
    pub buf_size: usize,
    /// Width in pixels
    pub width: u16,
    /// Height in pixels, a multiple of eight
    pub height: u16,
    /// Pixels per row in memory; only `pitch == width` is supported
    pub pitch: u16,
}

impl BufferDescriptor {
    /// Descriptor for a tightly packed `width` x `height` buffer
    pub fn new(width: u16, height: u16) -> Self {
        BufferDescriptor {
            buf_size: usize::from(width) * usize::from(height) / 8,
            width,
            height,
            pitch: width,
        }
    }
}

/// Driver for one SSD16xx panel
pub struct Ssd16xx<I> {
    pub(crate) interface: I,
    pub(crate) config: Config,
    pub(crate) scan_mode: ScanMode,
    /// Update control byte sent with the next activation
    update_cmd: u8,
    contrast: u8,
    /// Set by bring-up until a full refresh has programmed the panel
    needs_full_refresh: bool,
    /// Last written byte for every (gate, page) RAM address
    previous_frame: Vec<u8>,
    pub(crate) power_state: PowerState,
}

impl<I> Ssd16xx<I>
where
    I: Interface,
{
    /// Create the driver and bring the controller up
    ///
    /// The controller is reset and both RAM banks are cleared to white.
    ///
    /// # Errors
    ///
    /// A configuration that would not pass [`Builder::build`] is rejected
    /// with [`Error::Config`] before the bus is touched.
    ///
    /// [`Builder::build`]: crate::ssd16xx::config::Builder::build
    pub fn new(interface: I, config: Config) -> Result<Self, Error> {
        config.validate()?;
        let frame_size = config.frame_size();
        let mut driver = Ssd16xx {
            interface,
            scan_mode: ScanMode::from(config.orientation),
            config,
            update_cmd: Flag::CTRL2_FULL_REFRESH,
            contrast: CONTRAST_FULL_REFRESH,
            needs_full_refresh: true,
            previous_frame: vec![Flag::RAM_CLEAR_PATTERN; frame_size],
            power_state: PowerState::Active,
        };
        driver.initialize()?;
        Ok(driver)
    }

    /// Borrow the transport
    pub fn interface(&self) -> &I {
        &self.interface
    }

    /// Mutably borrow the transport
    pub fn interface_mut(&mut self) -> &mut I {
        &mut self.interface
    }

    /// Panel configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Current RAM scan mode
    pub fn scan_mode(&self) -> ScanMode {
        self.scan_mode
    }

    /// Current contrast hint
    pub fn contrast(&self) -> u8 {
        self.contrast
    }

    /// Store the contrast hint; [`CONTRAST_FULL_REFRESH`] selects the full
    /// refresh path, anything lower the partial one
    pub(crate) fn store_contrast(&mut self, contrast: u8) {
        self.contrast = contrast;
    }

    /// Give back the transport
    pub fn release(self) -> I {
        self.interface
    }

    /// Write a packed rectangle of pixels and refresh the panel
    ///
    /// `buf` holds one byte per eight vertically adjacent pixels, in the
    /// order the controller's address counter visits RAM (see
    /// [`RamWindow::address_of`]). [`Frame`] produces this layout.
    ///
    /// # Errors
    ///
    /// Malformed requests return [`Error::InvalidArgument`] or
    /// [`Error::NotSupported`] before anything is sent. A bus failure aborts
    /// the sequence with [`Error::Interface`] and leaves the retained frame
    /// unchanged.
    pub fn write(
        &mut self,
        x: u16,
        y: u16,
        desc: &BufferDescriptor,
        buf: &[u8],
    ) -> Result<(), Error> {
        let (area, len) = self.validate(x, y, desc, buf)?;
        let window = RamWindow::new(&area, self.scan_mode, self.config.active_height());
        let data = &buf[..len];
        let baseline: Vec<u8> = (0..len)
            .map(|n| self.previous_frame[self.frame_index(window.address_of(n))])
            .collect();

        log::debug!(
            "write {}x{} at ({}, {}): window x {}..{} y {}..{}",
            desc.width,
            desc.height,
            x,
            y,
            window.x_start,
            window.x_end,
            window.y_start,
            window.y_end
        );

        self.interface.wait_busy_low();
        self.interface
            .cmd_with_data(Cmd::ENTRY_MODE, &[self.scan_mode.entry_mode()])?;
        self.set_ram_window(&window)?;
        self.set_ram_pointer(window.x_start, window.y_start)?;

        let full = self.needs_full_refresh || self.contrast == CONTRAST_FULL_REFRESH;
        if full {
            self.full_refresh_init()?;
        } else {
            self.partial_refresh_init()?;
        }

        self.interface.cmd_with_data(Cmd::WRITE_RAM, data)?;
        self.interface.cmd_with_data(Cmd::WRITE_RED_RAM, &baseline)?;
        self.update_display()?;

        for (n, &byte) in data.iter().enumerate() {
            let index = self.frame_index(window.address_of(n));
            self.previous_frame[index] = byte;
        }
        if full {
            self.needs_full_refresh = false;
        }
        Ok(())
    }

    /// Retained previous-frame bytes for a rectangle, in write order
    pub fn retained_frame(
        &self,
        x: u16,
        y: u16,
        desc: &BufferDescriptor,
    ) -> Result<Vec<u8>, Error> {
        let len = usize::from(desc.width) * usize::from(desc.height) / 8;
        let dummy = vec![0; len];
        let (area, len) = self.validate(x, y, desc, &dummy)?;
        let window = RamWindow::new(&area, self.scan_mode, self.config.active_height());
        Ok((0..len)
            .map(|n| self.previous_frame[self.frame_index(window.address_of(n))])
            .collect())
    }

    /// White frame buffer for a rectangle of the panel
    pub fn new_frame(&self, x: u16, y: u16, width: u16, height: u16) -> Result<Frame, Error> {
        let desc = BufferDescriptor::new(width, height);
        let dummy = vec![0; desc.buf_size];
        let (area, _) = self.validate(x, y, &desc, &dummy)?;
        Ok(Frame::new(area, self.scan_mode, self.config.active_height()))
    }

    /// Write a frame buffer created by [`Ssd16xx::new_frame`]
    pub fn write_frame(&mut self, frame: &Frame) -> Result<(), Error> {
        let area = frame.area();
        self.write(area.x, area.y, &frame.descriptor(), frame.buffer())
    }

    fn validate(
        &self,
        x: u16,
        y: u16,
        desc: &BufferDescriptor,
        buf: &[u8],
    ) -> Result<(Area, usize), Error> {
        if desc.pitch < desc.width {
            log::error!("Pitch is smaller than width");
            return Err(ArgumentError::PitchSmallerThanWidth.into());
        }

        let len = desc
            .buf_size
            .min(usize::from(desc.width) * usize::from(desc.height) / 8);
        if len == 0 {
            log::error!("Display buffer is not available");
            return Err(ArgumentError::EmptyBuffer.into());
        }
        if buf.len() < len {
            log::error!("Display buffer holds {} of {} bytes", buf.len(), len);
            return Err(ArgumentError::BufferTooSmall {
                required: len,
                provided: buf.len(),
            }
            .into());
        }

        if desc.pitch > desc.width {
            log::error!("Unsupported mode");
            return Err(Error::NotSupported("pitch larger than width"));
        }

        if u32::from(y) + u32::from(desc.height) > u32::from(self.config.active_height()) {
            log::error!("Buffer out of bounds (height)");
            return Err(ArgumentError::OutOfBoundsHeight.into());
        }
        if u32::from(x) + u32::from(desc.width) > u32::from(self.config.width) {
            log::error!("Buffer out of bounds (width)");
            return Err(ArgumentError::OutOfBoundsWidth.into());
        }

        if desc.height % ROWS_PER_PAGE != 0 {
            log::error!("Buffer height not multiple of {}", ROWS_PER_PAGE);
            return Err(ArgumentError::HeightNotPageAligned(ROWS_PER_PAGE).into());
        }
        if y % ROWS_PER_PAGE != 0 {
            log::error!("Y coordinate not multiple of {}", ROWS_PER_PAGE);
            return Err(ArgumentError::YNotPageAligned(ROWS_PER_PAGE).into());
        }

        Ok((Area::new(x, y, desc.width, desc.height), len))
    }

    fn frame_index(&self, address: RamAddress) -> usize {
        usize::from(address.gate) * usize::from(self.config.ram_pages()) + usize::from(address.page)
    }

    fn set_ram_window(&mut self, window: &RamWindow) -> Result<(), Error> {
        let mut tmp = [0u8; 4];
        let x_width = self.config.x_address_width;
        let mut len = x_width.push(window.x_start, &mut tmp);
        len += x_width.push(window.x_end, &mut tmp[len..]);
        self.interface.cmd_with_data(Cmd::RAM_XPOS_CTRL, &tmp[..len])?;

        let y_width = self.config.y_address_width;
        let mut len = y_width.push(window.y_start, &mut tmp);
        len += y_width.push(window.y_end, &mut tmp[len..]);
        self.interface.cmd_with_data(Cmd::RAM_YPOS_CTRL, &tmp[..len])?;
        Ok(())
    }

    fn set_ram_pointer(&mut self, x: u16, y: u16) -> Result<(), Error> {
        let mut tmp = [0u8; 2];
        let len = self.config.x_address_width.push(x, &mut tmp);
        self.interface.cmd_with_data(Cmd::RAM_XPOS_CNTR, &tmp[..len])?;

        let len = self.config.y_address_width.push(y, &mut tmp);
        self.interface.cmd_with_data(Cmd::RAM_YPOS_CNTR, &tmp[..len])?;
        Ok(())
    }

    fn update_display(&mut self) -> Result<(), Error> {
        let update_cmd = self.update_cmd;
        self.activate(update_cmd)
    }

    /// Run an update-control sequence and wait for it to finish
    fn activate(&mut self, ctrl2: u8) -> Result<(), Error> {
        self.interface.cmd_with_data(Cmd::UPDATE_CTRL2, &[ctrl2])?;
        self.interface.cmd(Cmd::MASTER_ACTIVATION)?;
        self.interface.wait_busy_low();
        Ok(())
    }

    /// Let the controller pick its waveform from OTP for the current
    /// temperature
    fn load_otp_waveform(&mut self) -> Result<(), Error> {
        if let Some(tssv) = self.config.tssv {
            log::info!("Loading waveform from OTP using sensor 0x{:02X}", tssv);
            self.interface
                .cmd_with_data(Cmd::TSENSOR_SELECTION, &[tssv])?;
            self.update_cmd |= Flag::CTRL2_LOAD_LUT | Flag::CTRL2_LOAD_TEMPERATURE;
            return Ok(());
        }

        log::info!(
            "Loading waveform from OTP for {} degrees",
            Flag::DEFAULT_TEMPERATURE_C
        );
        self.activate(Flag::CTRL2_ENABLE_CLK)?;
        let temperature = Flag::DEFAULT_TEMPERATURE_C * Flag::TEMPERATURE_SCALE;
        self.interface
            .cmd_with_data(Cmd::TSENS_CTRL, &temperature.to_be_bytes())?;
        self.activate(Flag::CTRL2_DISABLE_CLK)?;
        self.update_cmd |= Flag::CTRL2_LOAD_LUT;
        Ok(())
    }

    fn full_refresh_init(&mut self) -> Result<(), Error> {
        log::debug!("Full refresh init");

        let mut gdo = [0u8; 3];
        let len = self
            .config
            .y_address_width
            .push(self.config.last_gate(), &mut gdo);
        gdo[len] = 0;
        self.interface.cmd_with_data(Cmd::GDO_CTRL, &gdo[..=len])?;

        if let Some(softstart) = &self.config.softstart {
            self.interface.cmd_with_data(Cmd::SOFTSTART, softstart)?;
        }
        self.interface
            .cmd_with_data(Cmd::GDV_CTRL, &self.config.gdv)?;
        self.interface
            .cmd_with_data(Cmd::SDV_CTRL, &self.config.sdv)?;
        self.interface
            .cmd_with_data(Cmd::VCOM_VOLTAGE, &[self.config.vcom])?;
        self.interface
            .cmd_with_data(Cmd::DUMMY_LINE, &[self.config.dummy_line])?;
        self.interface
            .cmd_with_data(Cmd::GATE_LINE_WIDTH, &[self.config.gate_line_width])?;
        self.interface
            .cmd_with_data(Cmd::BWF_CTRL, &[self.config.border_waveform])?;

        self.update_cmd = Flag::CTRL2_FULL_REFRESH;

        match &self.config.lut_initial {
            Some(lut) => {
                self.interface.cmd_with_data(Cmd::UPDATE_LUT, lut)?;
                self.interface.wait_busy_low();
                Ok(())
            }
            None => self.load_otp_waveform(),
        }
    }

    fn partial_refresh_init(&mut self) -> Result<(), Error> {
        log::debug!("Partial refresh init, contrast {}", self.contrast);

        if let Some(vcom) = self.config.vcom_default {
            self.interface.cmd_with_data(Cmd::VCOM_VOLTAGE, &[vcom])?;
        }

        self.update_cmd = Flag::CTRL2_PARTIAL_REFRESH;

        match &self.config.lut_default {
            Some(lut) => {
                self.interface.cmd_with_data(Cmd::UPDATE_LUT, lut)?;
                self.interface.wait_busy_low();
            }
            None => self.load_otp_waveform()?,
        }

        if let Some(otp_selection) = &self.config.otp_selection {
            self.interface
                .cmd_with_data(Cmd::OTP_SELECTION_CTRL, otp_selection)?;
        }

        self.activate(Flag::CTRL2_POWER_ON)?;

        if let Some(border) = self.config.border_waveform_default {
            self.interface.cmd_with_data(Cmd::BWF_CTRL, &[border])?;
        }
        Ok(())
    }

    /// Reset the controller and clear both RAM banks to white
    ///
    /// The reset drops every driving register, so the contrast hint goes
    /// back to full refresh and the next write reprograms the panel.
    pub(crate) fn controller_init(&mut self) -> Result<(), Error> {
        log::info!("Initializing SSD16xx controller");

        self.interface.reset_pulse()?;
        self.interface.wait_busy_low();
        self.interface.cmd(Cmd::SW_RESET)?;
        self.interface.wait_busy_low();

        self.scan_mode = ScanMode::from(self.config.orientation);
        self.update_cmd = Flag::CTRL2_FULL_REFRESH;
        self.contrast = CONTRAST_FULL_REFRESH;
        self.needs_full_refresh = true;

        self.clear_ram(Cmd::WRITE_RAM)?;
        self.clear_ram(Cmd::WRITE_RED_RAM)?;
        self.previous_frame.fill(Flag::RAM_CLEAR_PATTERN);
        Ok(())
    }

    /// Fill one RAM bank with the clear pattern, one gate row per page
    fn clear_ram(&mut self, ram_cmd: u8) -> Result<(), Error> {
        let last_page = self.config.ram_pages() - 1;
        let last_gate = self.config.last_gate();
        let window = RamWindow {
            x_start: 0,
            x_end: last_page,
            y_start: last_gate,
            y_end: 0,
            scan_mode: ScanMode::XIncYDec,
        };

        self.interface
            .cmd_with_data(Cmd::ENTRY_MODE, &[Flag::DATA_ENTRY_XIYDY])?;
        self.set_ram_window(&window)?;
        self.set_ram_pointer(0, last_gate)?;

        let row = vec![Flag::RAM_CLEAR_PATTERN; usize::from(self.config.width)];
        for _ in 0..self.config.ram_pages() {
            self.interface.cmd_with_data(ram_cmd, &row)?;
        }
        Ok(())
    }
}
