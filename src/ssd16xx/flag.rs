/// Register values and bit flags used by the SSD16xx driver.
pub struct Flag;
#[allow(missing_docs)]
impl Flag {
    // Data Entry Mode (0x11) flags
    pub const DATA_ENTRY_XIYDY: u8 = 0x01; // X increment, Y decrement
    pub const DATA_ENTRY_XDYIY: u8 = 0x02; // X decrement, Y increment
    pub const DATA_ENTRY_X_INCREMENT: u8 = 0x01;
    pub const DATA_ENTRY_Y_INCREMENT: u8 = 0x02;

    // Deep Sleep Mode (0x10) flags
    pub const SLEEP_MODE_DSM: u8 = 0x01;

    // Display Update Control 2 (0x22) bits
    pub const CTRL2_ENABLE_CLK: u8 = 0x80;
    pub const CTRL2_ENABLE_ANALOG: u8 = 0x40;
    pub const CTRL2_LOAD_TEMPERATURE: u8 = 0x20;
    pub const CTRL2_LOAD_LUT: u8 = 0x10;
    pub const CTRL2_TO_INITIAL: u8 = 0x08;
    pub const CTRL2_TO_PATTERN: u8 = 0x04;
    pub const CTRL2_DISABLE_ANALOG: u8 = 0x02;
    pub const CTRL2_DISABLE_CLK: u8 = 0x01;

    // Update sequences built from the bits above
    pub const CTRL2_FULL_REFRESH: u8 = Self::CTRL2_ENABLE_CLK
        | Self::CTRL2_ENABLE_ANALOG
        | Self::CTRL2_TO_PATTERN
        | Self::CTRL2_DISABLE_ANALOG
        | Self::CTRL2_DISABLE_CLK;
    pub const CTRL2_PARTIAL_REFRESH: u8 = Self::CTRL2_TO_INITIAL | Self::CTRL2_TO_PATTERN;
    pub const CTRL2_POWER_ON: u8 = Self::CTRL2_ENABLE_CLK | Self::CTRL2_ENABLE_ANALOG;

    // Dummy line period and gate line width used by all supported panels
    pub const DUMMY_LINE_DEFAULT: u8 = 0x1A;
    pub const GATE_LINE_WIDTH_DEFAULT: u8 = 0x08;

    // Temperature register (0x1A) value written when no sensor is selected
    pub const DEFAULT_TEMPERATURE_C: u16 = 25;
    pub const TEMPERATURE_SCALE: u16 = 256;

    // RAM fill value, all pixels white
    pub const RAM_CLEAR_PATTERN: u8 = 0xFF;
}
