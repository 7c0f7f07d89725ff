//! Frame buffer for `embedded-graphics`
//!
//! A [`Frame`] covers one rectangle of the panel and stores its pixels in the
//! exact byte order [`Ssd16xx::write`](crate::ssd16xx::driver::Ssd16xx::write)
//! streams into controller RAM, so it can be sent without conversion.
//! Coordinates are relative to the rectangle's top left corner.

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

use crate::ssd16xx::driver::BufferDescriptor;
use crate::ssd16xx::flag::Flag;
use crate::ssd16xx::geometry::{Area, RamWindow, ScanMode};

/// Packed monochrome pixels for one panel rectangle
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    area: Area,
    window: RamWindow,
    scan_mode: ScanMode,
    active_height: u16,
    buffer: Vec<u8>,
}

impl Frame {
    /// White frame for `area`
    pub(crate) fn new(area: Area, scan_mode: ScanMode, active_height: u16) -> Self {
        let window = RamWindow::new(&area, scan_mode, active_height);
        Frame {
            area,
            window,
            scan_mode,
            active_height,
            buffer: vec![Flag::RAM_CLEAR_PATTERN; window.len()],
        }
    }

    /// Panel rectangle this frame covers
    pub fn area(&self) -> Area {
        self.area
    }

    /// Descriptor to pass along with [`Frame::buffer`]
    pub fn descriptor(&self) -> BufferDescriptor {
        BufferDescriptor::new(self.area.width, self.area.height)
    }

    /// Packed pixels in RAM write order
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Fill with white
    pub fn clear(&mut self) {
        self.buffer.fill(Flag::RAM_CLEAR_PATTERN);
    }

    /// Set one pixel; `On` is black. Pixels outside the frame are ignored.
    pub fn set_pixel(&mut self, x: u16, y: u16, color: BinaryColor) {
        if x >= self.area.width || y >= self.area.height {
            return;
        }

        let (address, mask) =
            self.scan_mode
                .locate(self.area.x + x, self.area.y + y, self.active_height);
        let Some(index) = self.window.offset_of(address) else {
            return;
        };

        if color == BinaryColor::On {
            // Black: clear bit
            self.buffer[index] &= !mask;
        } else {
            // White: set bit
            self.buffer[index] |= mask;
        }
    }

    /// Read one pixel back; `None` outside the frame
    pub fn pixel(&self, x: u16, y: u16) -> Option<BinaryColor> {
        if x >= self.area.width || y >= self.area.height {
            return None;
        }
        let (address, mask) =
            self.scan_mode
                .locate(self.area.x + x, self.area.y + y, self.active_height);
        let index = self.window.offset_of(address)?;
        Some(if self.buffer[index] & mask == 0 {
            BinaryColor::On
        } else {
            BinaryColor::Off
        })
    }
}

impl DrawTarget for Frame {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (u16::try_from(point.x), u16::try_from(point.y)) else {
                continue;
            };
            self.set_pixel(x, y, color);
        }
        Ok(())
    }
}

impl OriginDimensions for Frame {
    fn size(&self) -> Size {
        Size::new(u32::from(self.area.width), u32::from(self.area.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

    #[test]
    fn new_frame_is_white() {
        let frame = Frame::new(Area::new(0, 0, 16, 16), ScanMode::XDecYInc, 64);
        assert_eq!(frame.buffer(), &[0xFF; 32]);
        assert_eq!(frame.size(), Size::new(16, 16));
        assert_eq!(frame.pixel(3, 3), Some(BinaryColor::Off));
    }

    #[test]
    fn mode_a_pixel_placement() {
        let mut frame = Frame::new(Area::new(0, 0, 4, 16), ScanMode::XIncYDec, 16);
        frame.set_pixel(3, 0, BinaryColor::On);
        // gate 3 is written first, page 0 holds rows 0..8 MSB first
        assert_eq!(frame.buffer()[0], 0x7F);

        frame.set_pixel(0, 15, BinaryColor::On);
        assert_eq!(frame.buffer()[7], 0xFE);
    }

    #[test]
    fn mode_b_pixel_placement() {
        let mut frame = Frame::new(Area::new(0, 0, 4, 16), ScanMode::XDecYInc, 16);
        frame.set_pixel(0, 0, BinaryColor::On);
        // page 1 (rows 0..8 from the top) of gate 0 comes first
        assert_eq!(frame.buffer()[0], 0xFE);
        assert_eq!(frame.pixel(0, 0), Some(BinaryColor::On));

        frame.set_pixel(0, 0, BinaryColor::Off);
        assert_eq!(frame.buffer()[0], 0xFF);
    }

    #[test]
    fn offset_frame_uses_relative_coordinates() {
        let mut frame = Frame::new(Area::new(8, 16, 8, 8), ScanMode::XDecYInc, 64);
        frame.set_pixel(0, 0, BinaryColor::On);
        frame.set_pixel(8, 0, BinaryColor::On);
        assert_eq!(frame.buffer().iter().filter(|&&b| b != 0xFF).count(), 1);
        assert_eq!(frame.pixel(0, 0), Some(BinaryColor::On));
        assert_eq!(frame.pixel(8, 0), None);
    }

    #[test]
    fn draw_filled_rectangle() {
        let mut frame = Frame::new(Area::new(0, 0, 8, 16), ScanMode::XDecYInc, 16);
        Rectangle::new(Point::new(0, 0), Size::new(8, 8))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut frame)
            .unwrap();

        let black = frame.buffer().iter().filter(|&&b| b == 0x00).count();
        let white = frame.buffer().iter().filter(|&&b| b == 0xFF).count();
        assert_eq!((black, white), (8, 8));

        frame.clear();
        assert!(frame.buffer().iter().all(|&b| b == 0xFF));
    }
}
