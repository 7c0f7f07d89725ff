//! SSD16xx command opcodes
pub struct Cmd;
#[allow(missing_docs)]
impl Cmd {
    // Init
    pub const GDO_CTRL: u8 = 0x01;
    pub const GDV_CTRL: u8 = 0x03;
    pub const SDV_CTRL: u8 = 0x04;
    pub const SOFTSTART: u8 = 0x0C;
    pub const SLEEP_MODE: u8 = 0x10;
    pub const ENTRY_MODE: u8 = 0x11;
    pub const SW_RESET: u8 = 0x12;
    pub const TSENSOR_SELECTION: u8 = 0x18;
    pub const TSENS_CTRL: u8 = 0x1A;

    // Update
    pub const MASTER_ACTIVATION: u8 = 0x20;
    pub const UPDATE_CTRL2: u8 = 0x22;
    pub const WRITE_RAM: u8 = 0x24;
    pub const WRITE_RED_RAM: u8 = 0x26;

    // Waveform
    pub const VCOM_VOLTAGE: u8 = 0x2C;
    pub const UPDATE_LUT: u8 = 0x32;
    pub const OTP_SELECTION_CTRL: u8 = 0x37;
    pub const DUMMY_LINE: u8 = 0x3A;
    pub const GATE_LINE_WIDTH: u8 = 0x3B;
    pub const BWF_CTRL: u8 = 0x3C;

    // RAM addressing
    pub const RAM_XPOS_CTRL: u8 = 0x44;
    pub const RAM_YPOS_CTRL: u8 = 0x45;
    pub const RAM_XPOS_CNTR: u8 = 0x4E;
    pub const RAM_YPOS_CNTR: u8 = 0x4F;
}
