//! Error types for the SSD16xx driver
//!
//! - [`Error`] is returned by every driver operation.
//! - [`ArgumentError`] describes a write request that was rejected before any
//!   bus traffic happened.
//! - [`ConfigError`] is returned by [`Builder::build`](crate::ssd16xx::config::Builder::build).
//!
//! [`DisplayError`] has no `PartialEq`, so [`Error`] compares transport
//! failures by variant.

pub use display_interface::DisplayError;

/// Errors returned by driver operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The bus transport failed; the in-progress sequence was aborted
    #[error("bus transport error: {0:?}")]
    Interface(DisplayError),

    /// The request was malformed; nothing was sent to the controller
    #[error("invalid argument: {0}")]
    InvalidArgument(ArgumentError),

    /// The controller class cannot provide this operation
    #[error("not supported: {0}")]
    NotSupported(&'static str),

    /// The panel configuration does not describe a usable panel
    #[error("invalid configuration: {0}")]
    Config(ConfigError),
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Error::Interface(a), Error::Interface(b)) => {
                core::mem::discriminant(a) == core::mem::discriminant(b)
            }
            (Error::InvalidArgument(a), Error::InvalidArgument(b)) => a == b,
            (Error::NotSupported(a), Error::NotSupported(b)) => a == b,
            (Error::Config(a), Error::Config(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Error {}

impl From<DisplayError> for Error {
    fn from(err: DisplayError) -> Self {
        Error::Interface(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Config(err)
    }
}

impl From<ArgumentError> for Error {
    fn from(err: ArgumentError) -> Self {
        Error::InvalidArgument(err)
    }
}

/// Reasons a write request is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ArgumentError {
    #[error("pitch is smaller than width")]
    PitchSmallerThanWidth,
    #[error("display buffer is not available")]
    EmptyBuffer,
    #[error("pixel slice holds {provided} bytes, descriptor requires {required}")]
    BufferTooSmall { required: usize, provided: usize },
    #[error("buffer out of bounds (height)")]
    OutOfBoundsHeight,
    #[error("buffer out of bounds (width)")]
    OutOfBoundsWidth,
    #[error("buffer height not multiple of {0}")]
    HeightNotPageAligned(u16),
    #[error("y coordinate not multiple of {0}")]
    YNotPageAligned(u16),
}

/// Errors detected while building a [`Config`](crate::ssd16xx::config::Config)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("panel dimensions must be specified")]
    MissingDimensions,
    #[error("invalid panel dimensions {width}x{height}")]
    InvalidDimensions { width: u16, height: u16 },
    #[error("gate and source driving voltage tables must not be empty")]
    MissingDrivingVoltages,
    #[error("address {value} does not fit the {bits}-bit {axis} parameter")]
    AddressOverflow {
        axis: &'static str,
        value: u16,
        bits: u8,
    },
}
