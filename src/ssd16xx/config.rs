//! Panel configuration and builder
//!
//! A [`Config`] describes one physical panel: its resolution, scan
//! orientation, and the waveform and voltage tables the controller needs for
//! a refresh. It is immutable once built.
//!
//! ```
//! use ssd16xx::{Builder, Orientation};
//!
//! let config = Builder::new()
//!     .dimensions(296, 128)
//!     .orientation(Orientation::Normal)
//!     .driving_voltages(&[0x19], &[0x02, 0x0C, 0x0C])
//!     .vcom(0xA8)
//!     .build()
//!     .expect("valid configuration");
//! assert_eq!(config.active_height(), 128);
//! ```

use crate::ssd16xx::error::ConfigError;
use crate::ssd16xx::flag::Flag;
use crate::ssd16xx::ROWS_PER_PAGE;

/// Scan orientation of the panel as mounted
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    /// Default mounting; RAM is scanned X decreasing, Y increasing
    #[default]
    Normal,
    /// Panel mounted upside down; RAM is scanned X increasing, Y decreasing
    Flipped,
}

/// Width of a RAM address parameter on the wire
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressWidth {
    /// One byte
    Bits8,
    /// Two bytes, little endian
    Bits16,
}

impl AddressWidth {
    /// Encode `value` into `out`, returning the number of bytes used.
    pub fn push(self, value: u16, out: &mut [u8]) -> usize {
        match self {
            AddressWidth::Bits8 => {
                out[0] = value as u8;
                1
            }
            AddressWidth::Bits16 => {
                out[..2].copy_from_slice(&value.to_le_bytes());
                2
            }
        }
    }

    fn bits(self) -> u8 {
        match self {
            AddressWidth::Bits8 => 8,
            AddressWidth::Bits16 => 16,
        }
    }

    fn max(self) -> u16 {
        match self {
            AddressWidth::Bits8 => u16::from(u8::MAX),
            AddressWidth::Bits16 => u16::MAX,
        }
    }
}

/// Immutable panel configuration
///
/// Use [`Builder`] or one of the panel presets to create one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Width in pixels; one gate line per column
    pub width: u16,
    /// Height in pixels; eight rows per RAM page
    pub height: u16,
    /// Scan orientation
    pub orientation: Orientation,
    /// Encoding of X (page) window and pointer parameters
    pub x_address_width: AddressWidth,
    /// Encoding of Y (gate) window and pointer parameters
    pub y_address_width: AddressWidth,
    /// Waveform loaded before a full refresh; OTP is used when absent
    pub lut_initial: Option<Vec<u8>>,
    /// Waveform loaded before a partial refresh; OTP is used when absent
    pub lut_default: Option<Vec<u8>>,
    /// Booster soft-start sequence
    pub softstart: Option<Vec<u8>>,
    /// Gate driving voltage table
    pub gdv: Vec<u8>,
    /// Source driving voltage table
    pub sdv: Vec<u8>,
    /// VCOM register value for full refresh
    pub vcom: u8,
    /// VCOM register value for partial refresh
    pub vcom_default: Option<u8>,
    /// Dummy line period
    pub dummy_line: u8,
    /// Gate line width
    pub gate_line_width: u8,
    /// Border waveform for full refresh
    pub border_waveform: u8,
    /// Border waveform for partial refresh
    pub border_waveform_default: Option<u8>,
    /// Temperature sensor selection; the 25 degree default is used when absent
    pub tssv: Option<u8>,
    /// OTP selection control bytes written before a partial refresh
    pub otp_selection: Option<Vec<u8>>,
    /// Delay after switching panel power, in milliseconds
    pub power_settle_ms: u32,
}

impl Config {
    /// Check the invariants [`Builder::build`] enforces
    ///
    /// Fields are public, so a configuration assembled by hand is checked
    /// again when a driver is created.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.width, self.height);
        if width == 0 || height < ROWS_PER_PAGE {
            return Err(ConfigError::InvalidDimensions { width, height });
        }
        if self.gdv.is_empty() || self.sdv.is_empty() {
            return Err(ConfigError::MissingDrivingVoltages);
        }

        let last_page = self.ram_pages() - 1;
        if last_page > self.x_address_width.max() {
            return Err(ConfigError::AddressOverflow {
                axis: "x",
                value: last_page,
                bits: self.x_address_width.bits(),
            });
        }
        let last_gate = self.last_gate();
        if last_gate > self.y_address_width.max() {
            return Err(ConfigError::AddressOverflow {
                axis: "y",
                value: last_gate,
                bits: self.y_address_width.bits(),
            });
        }
        Ok(())
    }

    /// Height truncated to whole RAM pages
    pub fn active_height(&self) -> u16 {
        self.height - self.height % ROWS_PER_PAGE
    }

    /// Number of RAM pages including a trailing partial page
    pub fn ram_pages(&self) -> u16 {
        self.height.div_ceil(ROWS_PER_PAGE)
    }

    /// Address of the last gate line
    pub fn last_gate(&self) -> u16 {
        self.width - 1
    }

    /// Size of a retained frame, one byte per (gate, page) RAM address
    pub fn frame_size(&self) -> usize {
        usize::from(self.width) * usize::from(self.ram_pages())
    }

    /// Good Display GDEH0213B1, 2.13" 250x122 (SSD1673 / IL3895)
    pub fn gdeh0213b1() -> Result<Config, ConfigError> {
        #[rustfmt::skip]
        const LUT_FULL: [u8; 30] = [
            0x22, 0x55, 0xAA, 0x55, 0xAA, 0x55, 0xAA, 0x11, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x1E, 0x1E, 0x1E, 0x1E, 0x1E, 0x1E, 0x1E, 0x1E, 0x01, 0x00,
            0x00, 0x00, 0x00, 0x00,
        ];
        #[rustfmt::skip]
        const LUT_PARTIAL: [u8; 30] = [
            0x18, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x0F, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
        ];

        Builder::new()
            .dimensions(250, 122)
            .orientation(Orientation::Flipped)
            .address_widths(AddressWidth::Bits8, AddressWidth::Bits8)
            .lut_initial(&LUT_FULL)
            .lut_default(&LUT_PARTIAL)
            .driving_voltages(&[0x10, 0x0A], &[0x19])
            .vcom(0xA8)
            .border_waveform(0x63)
            .build()
    }

    /// Good Display GDEH029A1, 2.9" 296x128 (SSD1608 / IL3820)
    pub fn gdeh029a1() -> Result<Config, ConfigError> {
        #[rustfmt::skip]
        const LUT_FULL: [u8; 30] = [
            0x50, 0xAA, 0x55, 0xAA, 0x11, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0xFF, 0xFF, 0x1F, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ];
        #[rustfmt::skip]
        const LUT_PARTIAL: [u8; 30] = [
            0x10, 0x18, 0x18, 0x08, 0x18, 0x18, 0x08, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x13, 0x14, 0x44, 0x12, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ];

        Builder::new()
            .dimensions(296, 128)
            .address_widths(AddressWidth::Bits8, AddressWidth::Bits16)
            .lut_initial(&LUT_FULL)
            .lut_default(&LUT_PARTIAL)
            .softstart(&[0xD7, 0xD6, 0x9D])
            .driving_voltages(&[0x19], &[0x02, 0x0C, 0x0C])
            .vcom(0xA8)
            .border_waveform(0x03)
            .build()
    }
}

/// Builder for [`Config`]
///
/// Dimensions and both driving voltage tables are required; everything else
/// has a default.
#[derive(Clone, Debug)]
pub struct Builder {
    dimensions: Option<(u16, u16)>,
    orientation: Orientation,
    x_address_width: AddressWidth,
    y_address_width: AddressWidth,
    lut_initial: Option<Vec<u8>>,
    lut_default: Option<Vec<u8>>,
    softstart: Option<Vec<u8>>,
    gdv: Vec<u8>,
    sdv: Vec<u8>,
    vcom: u8,
    vcom_default: Option<u8>,
    dummy_line: u8,
    gate_line_width: u8,
    border_waveform: u8,
    border_waveform_default: Option<u8>,
    tssv: Option<u8>,
    otp_selection: Option<Vec<u8>>,
    power_settle_ms: u32,
}

impl Default for Builder {
    fn default() -> Self {
        Builder {
            dimensions: None,
            orientation: Orientation::Normal,
            x_address_width: AddressWidth::Bits8,
            y_address_width: AddressWidth::Bits16,
            lut_initial: None,
            lut_default: None,
            softstart: None,
            gdv: Vec::new(),
            sdv: Vec::new(),
            vcom: 0xA8,
            vcom_default: None,
            dummy_line: Flag::DUMMY_LINE_DEFAULT,
            gate_line_width: Flag::GATE_LINE_WIDTH_DEFAULT,
            border_waveform: 0x01,
            border_waveform_default: None,
            tssv: None,
            otp_selection: None,
            power_settle_ms: 10,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set panel width and height in pixels (required)
    pub fn dimensions(mut self, width: u16, height: u16) -> Self {
        self.dimensions = Some((width, height));
        self
    }

    /// Set scan orientation
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set X (page) and Y (gate) address parameter widths
    pub fn address_widths(mut self, x: AddressWidth, y: AddressWidth) -> Self {
        self.x_address_width = x;
        self.y_address_width = y;
        self
    }

    /// Set the waveform table used for full refresh
    pub fn lut_initial(mut self, lut: &[u8]) -> Self {
        self.lut_initial = Some(lut.to_vec());
        self
    }

    /// Set the waveform table used for partial refresh
    pub fn lut_default(mut self, lut: &[u8]) -> Self {
        self.lut_default = Some(lut.to_vec());
        self
    }

    /// Set booster soft-start parameters
    pub fn softstart(mut self, values: &[u8]) -> Self {
        self.softstart = Some(values.to_vec());
        self
    }

    /// Set gate and source driving voltage tables (required)
    pub fn driving_voltages(mut self, gdv: &[u8], sdv: &[u8]) -> Self {
        self.gdv = gdv.to_vec();
        self.sdv = sdv.to_vec();
        self
    }

    /// Set VCOM value
    pub fn vcom(mut self, value: u8) -> Self {
        self.vcom = value;
        self
    }

    /// Set VCOM value used for partial refresh
    pub fn vcom_default(mut self, value: u8) -> Self {
        self.vcom_default = Some(value);
        self
    }

    /// Set dummy line period
    pub fn dummy_line(mut self, value: u8) -> Self {
        self.dummy_line = value;
        self
    }

    /// Set gate line width
    pub fn gate_line_width(mut self, value: u8) -> Self {
        self.gate_line_width = value;
        self
    }

    /// Set border waveform
    pub fn border_waveform(mut self, value: u8) -> Self {
        self.border_waveform = value;
        self
    }

    /// Set border waveform used for partial refresh
    pub fn border_waveform_default(mut self, value: u8) -> Self {
        self.border_waveform_default = Some(value);
        self
    }

    /// Select a temperature sensor for OTP waveform loading
    pub fn tssv(mut self, value: u8) -> Self {
        self.tssv = Some(value);
        self
    }

    /// Set OTP selection control bytes
    pub fn otp_selection(mut self, values: &[u8]) -> Self {
        self.otp_selection = Some(values.to_vec());
        self
    }

    /// Set the delay after switching panel power
    pub fn power_settle_ms(mut self, ms: u32) -> Self {
        self.power_settle_ms = ms;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingDimensions`] if dimensions were not set
    /// - [`ConfigError::InvalidDimensions`] if width is zero or height is
    ///   less than one page
    /// - [`ConfigError::MissingDrivingVoltages`] if either voltage table is empty
    /// - [`ConfigError::AddressOverflow`] if the last gate or page does not
    ///   fit the configured parameter width
    pub fn build(self) -> Result<Config, ConfigError> {
        let (width, height) = self.dimensions.ok_or(ConfigError::MissingDimensions)?;

        let config = Config {
            width,
            height,
            orientation: self.orientation,
            x_address_width: self.x_address_width,
            y_address_width: self.y_address_width,
            lut_initial: self.lut_initial,
            lut_default: self.lut_default,
            softstart: self.softstart,
            gdv: self.gdv,
            sdv: self.sdv,
            vcom: self.vcom,
            vcom_default: self.vcom_default,
            dummy_line: self.dummy_line,
            gate_line_width: self.gate_line_width,
            border_waveform: self.border_waveform,
            border_waveform_default: self.border_waveform_default,
            tssv: self.tssv,
            otp_selection: self.otp_selection,
            power_settle_ms: self.power_settle_ms,
        };
        config.validate()?;
        Ok(config)
    }
}
