//! Generic display API
//!
//! [`DisplayDriver`] is the surface a display subsystem uses without knowing
//! which controller is attached. E-paper controllers only support a small
//! part of it; the rest reports [`Error::NotSupported`].

use crate::ssd16xx::driver::{BufferDescriptor, Ssd16xx};
use crate::ssd16xx::error::Error;
use crate::ssd16xx::interface::Interface;

/// Pixel formats a display may accept
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb888,
    /// Monochrome, 0 is black
    Mono01,
    /// Monochrome, 1 is black
    Mono10,
    Argb8888,
    Rgb565,
    Bgr565,
}

/// Display rotation relative to the native scan direction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DisplayOrientation {
    #[default]
    Normal,
    Rotated90,
    Rotated180,
    Rotated270,
}

/// Screen property flags
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScreenInfo(pub u8);

impl ScreenInfo {
    /// One byte covers eight vertically adjacent pixels
    pub const MONO_VTILED: ScreenInfo = ScreenInfo(0x01);
    /// The most significant bit is the first pixel
    pub const MONO_MSB_FIRST: ScreenInfo = ScreenInfo(0x02);
    /// Electrophoretic panel, slow refresh
    pub const EPD: ScreenInfo = ScreenInfo(0x04);
    /// Controller holds the previous frame
    pub const DOUBLE_BUFFER: ScreenInfo = ScreenInfo(0x08);

    /// Whether every flag in `other` is set
    pub fn contains(self, other: ScreenInfo) -> bool {
        self.0 & other.0 == other.0
    }
}

impl core::ops::BitOr for ScreenInfo {
    type Output = ScreenInfo;

    fn bitor(self, rhs: ScreenInfo) -> ScreenInfo {
        ScreenInfo(self.0 | rhs.0)
    }
}

/// What a display can do
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
    pub x_resolution: u16,
    pub y_resolution: u16,
    pub supported_pixel_formats: PixelFormat,
    pub current_pixel_format: PixelFormat,
    pub current_orientation: DisplayOrientation,
    pub screen_info: ScreenInfo,
}

/// Controller independent display operations
pub trait DisplayDriver {
    /// Write a rectangle of pixels and show it
    fn write(&mut self, x: u16, y: u16, desc: &BufferDescriptor, buf: &[u8])
        -> Result<(), Error>;

    /// Read a rectangle of pixels back
    fn read(&mut self, x: u16, y: u16, desc: &BufferDescriptor, buf: &mut [u8])
        -> Result<(), Error>;

    /// Direct access to a memory mapped frame buffer
    fn get_framebuffer(&mut self) -> Result<&mut [u8], Error>;

    fn set_brightness(&mut self, brightness: u8) -> Result<(), Error>;

    /// Set the contrast; e-paper drivers use it to pick the refresh waveform
    fn set_contrast(&mut self, contrast: u8) -> Result<(), Error>;

    fn get_capabilities(&self) -> Capabilities;

    fn set_orientation(&mut self, orientation: DisplayOrientation) -> Result<(), Error>;

    fn set_pixel_format(&mut self, format: PixelFormat) -> Result<(), Error>;

    /// Stop showing frame buffer content
    fn blanking_on(&mut self) -> Result<(), Error>;

    /// Resume showing frame buffer content
    fn blanking_off(&mut self) -> Result<(), Error>;
}

impl<I> DisplayDriver for Ssd16xx<I>
where
    I: Interface,
{
    fn write(&mut self, x: u16, y: u16, desc: &BufferDescriptor, buf: &[u8]) -> Result<(), Error> {
        Ssd16xx::write(self, x, y, desc, buf)
    }

    fn read(
        &mut self,
        _x: u16,
        _y: u16,
        _desc: &BufferDescriptor,
        _buf: &mut [u8],
    ) -> Result<(), Error> {
        log::error!("not supported");
        Err(Error::NotSupported("read"))
    }

    fn get_framebuffer(&mut self) -> Result<&mut [u8], Error> {
        log::error!("not supported");
        Err(Error::NotSupported("framebuffer"))
    }

    fn set_brightness(&mut self, _brightness: u8) -> Result<(), Error> {
        log::warn!("not supported");
        Err(Error::NotSupported("brightness"))
    }

    fn set_contrast(&mut self, contrast: u8) -> Result<(), Error> {
        self.store_contrast(contrast);
        Ok(())
    }

    fn get_capabilities(&self) -> Capabilities {
        let config = self.config();
        Capabilities {
            x_resolution: config.width,
            y_resolution: config.active_height(),
            supported_pixel_formats: PixelFormat::Mono10,
            current_pixel_format: PixelFormat::Mono10,
            current_orientation: DisplayOrientation::Normal,
            screen_info: ScreenInfo::MONO_VTILED
                | ScreenInfo::MONO_MSB_FIRST
                | ScreenInfo::EPD
                | ScreenInfo::DOUBLE_BUFFER,
        }
    }

    fn set_orientation(&mut self, _orientation: DisplayOrientation) -> Result<(), Error> {
        log::error!("Unsupported");
        Err(Error::NotSupported("orientation"))
    }

    fn set_pixel_format(&mut self, format: PixelFormat) -> Result<(), Error> {
        if format == PixelFormat::Mono10 {
            return Ok(());
        }
        log::error!("not supported");
        Err(Error::NotSupported("pixel format"))
    }

    fn blanking_on(&mut self) -> Result<(), Error> {
        Err(Error::NotSupported("blanking"))
    }

    fn blanking_off(&mut self) -> Result<(), Error> {
        Err(Error::NotSupported("blanking"))
    }
}
