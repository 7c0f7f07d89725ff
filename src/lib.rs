//! Driver for Solomon SSD16xx e-paper display controllers
//!
//! See [`ssd16xx`] for an overview.

pub mod ssd16xx;

pub use crate::ssd16xx::cmd::Cmd;
pub use crate::ssd16xx::config::{AddressWidth, Builder, Config, Orientation};
pub use crate::ssd16xx::display::{
    Capabilities, DisplayDriver, DisplayOrientation, PixelFormat, ScreenInfo,
};
pub use crate::ssd16xx::driver::{BufferDescriptor, Ssd16xx, CONTRAST_FULL_REFRESH};
pub use crate::ssd16xx::error::{ArgumentError, ConfigError, DisplayError, Error};
pub use crate::ssd16xx::flag::Flag;
pub use crate::ssd16xx::geometry::{Area, RamAddress, RamWindow, ScanMode};
pub use crate::ssd16xx::graphics::Frame;
pub use crate::ssd16xx::interface::{DisplayInterface, Interface, NoPin};
pub use crate::ssd16xx::mock::SimulatedController;
pub use crate::ssd16xx::power::{Lifecycle, PowerState};
