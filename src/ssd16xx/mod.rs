//! SSD16xx ePaper Display Driver
//!
//! Works with the Solomon SSD1606/SSD1608/SSD1673/SSD1675 family and the
//! compatible Good Display panels built on them, for example the 2.13"
//! GDEH0213B1 and the 2.9" GDEH029A1.
//!
//! This driver is losely modeled after the
//! [epd-waveshare](https://github.com/caemor/epd-waveshare) drivers.
//!
//! ### Usage
//!
//! 1. build a [`config::Config`], or take a preset such as
//!    [`config::Config::gdeh029a1`]
//! 1. wrap the SPI device and pins in an [`interface::DisplayInterface`]
//! 1. create the driver with [`driver::Ssd16xx::new`], which resets the
//!    controller and clears it to white
//! 1. draw into a [`graphics::Frame`] with
//!    [`embedded_graphics`](https://github.com/embedded-graphics/embedded-graphics)
//!    and send it with [`driver::Ssd16xx::write_frame`]
//!
//! The first write always does a full refresh. Lower the contrast hint with
//! [`display::DisplayDriver::set_contrast`] to switch to partial refreshes,
//! which are faster and do not flash but slowly accumulate ghosting.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod cmd;
pub mod config;
pub mod display;
pub mod driver;
pub mod error;
pub mod flag;
pub mod geometry;
pub mod graphics;
pub mod interface;
pub mod mock;
pub mod power;

/// Panel rows covered by one RAM byte
pub const ROWS_PER_PAGE: u16 = 8;
