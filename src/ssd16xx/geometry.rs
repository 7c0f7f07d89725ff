//! Mapping from panel rectangles to controller RAM windows
//!
//! The controller addresses its RAM in (page, gate) pairs. A page is one
//! byte covering [`ROWS_PER_PAGE`] panel rows and a gate is one panel
//! column. Page addresses go out as the X window parameters and gate
//! addresses as the Y window parameters, so panel X maps to RAM Y and
//! panel Y to RAM X.

use crate::ssd16xx::config::Orientation;
use crate::ssd16xx::flag::Flag;
use crate::ssd16xx::ROWS_PER_PAGE;

/// RAM scan direction, selected once from the panel orientation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanMode {
    /// Mode A: page address increments, gate address decrements
    XIncYDec,
    /// Mode B: page address decrements, gate address increments
    XDecYInc,
}

impl ScanMode {
    /// Data entry mode register value
    pub fn entry_mode(self) -> u8 {
        match self {
            ScanMode::XIncYDec => Flag::DATA_ENTRY_XIYDY,
            ScanMode::XDecYInc => Flag::DATA_ENTRY_XDYIY,
        }
    }

    /// RAM location of panel pixel (x, y) and its bit mask within the page byte
    pub fn locate(self, x: u16, y: u16, active_height: u16) -> (RamAddress, u8) {
        let row = match self {
            ScanMode::XIncYDec => y,
            ScanMode::XDecYInc => active_height.saturating_sub(1).saturating_sub(y),
        };
        let address = RamAddress {
            page: row / ROWS_PER_PAGE,
            gate: x,
        };
        (address, 0x80 >> (row % ROWS_PER_PAGE))
    }
}

impl From<Orientation> for ScanMode {
    fn from(orientation: Orientation) -> Self {
        match orientation {
            Orientation::Flipped => ScanMode::XIncYDec,
            Orientation::Normal => ScanMode::XDecYInc,
        }
    }
}

/// Rectangle in panel coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Area {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Area {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Area {
            x,
            y,
            width,
            height,
        }
    }
}

/// One byte of controller RAM
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RamAddress {
    pub page: u16,
    pub gate: u16,
}

/// RAM window covering an [`Area`], with start and end in scan order
///
/// The address pointer is loaded with (`x_start`, `y_start`) and the
/// controller advances along the page axis first, wrapping to the next gate
/// at the end of each run of pages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RamWindow {
    pub x_start: u16,
    pub x_end: u16,
    pub y_start: u16,
    pub y_end: u16,
    pub scan_mode: ScanMode,
}

#[allow(clippy::len_without_is_empty)]
impl RamWindow {
    /// Compute the window for `area`. Coordinates outside the panel are not
    /// rejected here; callers validate bounds first.
    pub fn new(area: &Area, scan_mode: ScanMode, active_height: u16) -> Self {
        let last_x = (area.x + area.width).saturating_sub(1);
        let last_y = (area.y + area.height).saturating_sub(1);

        match scan_mode {
            ScanMode::XIncYDec => RamWindow {
                x_start: area.y / ROWS_PER_PAGE,
                x_end: last_y / ROWS_PER_PAGE,
                y_start: last_x,
                y_end: area.x,
                scan_mode,
            },
            ScanMode::XDecYInc => {
                let top = active_height.saturating_sub(1);
                RamWindow {
                    x_start: top.saturating_sub(area.y) / ROWS_PER_PAGE,
                    x_end: top.saturating_sub(last_y) / ROWS_PER_PAGE,
                    y_start: area.x,
                    y_end: last_x,
                    scan_mode,
                }
            }
        }
    }

    /// Number of pages per gate line
    pub fn pages(&self) -> u16 {
        self.x_start.abs_diff(self.x_end) + 1
    }

    /// Number of gate lines
    pub fn gates(&self) -> u16 {
        self.y_start.abs_diff(self.y_end) + 1
    }

    /// Number of bytes covered by the window
    pub fn len(&self) -> usize {
        usize::from(self.pages()) * usize::from(self.gates())
    }

    /// RAM address of the `n`th byte streamed into the window
    pub fn address_of(&self, n: usize) -> RamAddress {
        let pages = usize::from(self.pages());
        let gates = usize::from(self.gates());
        let page_step = (n % pages) as u16;
        let gate_step = ((n / pages) % gates) as u16;

        match self.scan_mode {
            ScanMode::XIncYDec => RamAddress {
                page: self.x_start + page_step,
                gate: self.y_start - gate_step,
            },
            ScanMode::XDecYInc => RamAddress {
                page: self.x_start - page_step,
                gate: self.y_start + gate_step,
            },
        }
    }

    /// Stream position of `address`, if it lies inside the window
    pub fn offset_of(&self, address: RamAddress) -> Option<usize> {
        let (page_step, gate_step) = match self.scan_mode {
            ScanMode::XIncYDec => (
                address.page.checked_sub(self.x_start)?,
                self.y_start.checked_sub(address.gate)?,
            ),
            ScanMode::XDecYInc => (
                self.x_start.checked_sub(address.page)?,
                address.gate.checked_sub(self.y_start)?,
            ),
        };
        if page_step >= self.pages() || gate_step >= self.gates() {
            return None;
        }
        Some(usize::from(gate_step) * usize::from(self.pages()) + usize::from(page_step))
    }
}
