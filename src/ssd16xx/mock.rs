//! Simulated controller
//!
//! [`SimulatedController`] implements [`Interface`] without hardware. It
//! records every transaction and models the parts of the controller a host
//! can observe: the data entry mode, the RAM window, the shared address
//! pointer and both RAM banks. Tests and the host demo run the real driver
//! against it.

use display_interface::DisplayError;

use crate::ssd16xx::cmd::Cmd;
use crate::ssd16xx::config::{AddressWidth, Config};
use crate::ssd16xx::flag::Flag;
use crate::ssd16xx::geometry::RamAddress;
use crate::ssd16xx::interface::Interface;

/// One observed transaction
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Command byte and its parameters
    Command { command: u8, data: Vec<u8> },
    /// Reset line pulsed
    Reset,
    /// Panel supply switched on
    PowerUp,
    /// Panel supply switched off, control lines low
    PowerDown,
    /// Blocking delay in milliseconds
    Delay(u32),
}

/// RAM bank selector
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bank {
    /// Black/white bank, written by `0x24`
    Primary,
    /// Red bank, holds the previous frame for partial refresh
    Secondary,
}

/// Host-side stand-in for an SSD16xx controller
#[derive(Debug)]
pub struct SimulatedController {
    x_address_width: AddressWidth,
    y_address_width: AddressWidth,
    pages: u16,
    gates: u16,
    power_switch: bool,

    entry_mode: u8,
    x_window: (u16, u16),
    y_window: (u16, u16),
    x_pointer: u16,
    y_pointer: u16,
    primary: Vec<u8>,
    secondary: Vec<u8>,

    events: Vec<Event>,
    busy_cycles: u32,
    busy_remaining: u32,
    busy_polls: usize,
    fail_on: Option<u8>,
}

impl SimulatedController {
    /// Controller sized for `config`, with RAM in an unknown (zeroed) state
    pub fn new(config: &Config) -> Self {
        let size = config.frame_size();
        SimulatedController {
            x_address_width: config.x_address_width,
            y_address_width: config.y_address_width,
            pages: config.ram_pages(),
            gates: config.width,
            power_switch: false,
            entry_mode: Flag::DATA_ENTRY_XDYIY,
            x_window: (0, config.ram_pages() - 1),
            y_window: (0, config.last_gate()),
            x_pointer: 0,
            y_pointer: 0,
            primary: vec![0; size],
            secondary: vec![0; size],
            events: Vec::new(),
            busy_cycles: 0,
            busy_remaining: 0,
            busy_polls: 0,
            fail_on: None,
        }
    }

    /// Report a switchable panel supply
    pub fn with_power_switch(mut self) -> Self {
        self.power_switch = true;
        self
    }

    /// Hold the busy line high for `cycles` polls after every activation
    /// and software reset
    pub fn set_busy_cycles(&mut self, cycles: u32) {
        self.busy_cycles = cycles;
    }

    /// Fail the next transfer of `command` with a bus error
    pub fn fail_next(&mut self, command: u8) {
        self.fail_on = Some(command);
    }

    /// Every recorded transaction, oldest first
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Recorded commands with their parameters, oldest first
    pub fn commands(&self) -> Vec<(u8, &[u8])> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Command { command, data } => Some((*command, data.as_slice())),
                _ => None,
            })
            .collect()
    }

    /// Recorded command bytes only, oldest first
    pub fn opcodes(&self) -> Vec<u8> {
        self.commands().iter().map(|(command, _)| *command).collect()
    }

    /// Forget recorded transactions
    pub fn clear(&mut self) {
        self.events.clear();
        self.busy_polls = 0;
    }

    /// Number of busy line samples that read high
    pub fn busy_polls(&self) -> usize {
        self.busy_polls
    }

    /// Current data entry mode
    pub fn entry_mode(&self) -> u8 {
        self.entry_mode
    }

    /// Contents of a RAM bank, indexed `gate * pages + page`
    pub fn bank(&self, bank: Bank) -> &[u8] {
        match bank {
            Bank::Primary => &self.primary,
            Bank::Secondary => &self.secondary,
        }
    }

    /// One byte of a RAM bank
    pub fn ram_byte(&self, bank: Bank, address: RamAddress) -> Option<u8> {
        self.index(address).map(|i| self.bank(bank)[i])
    }

    fn index(&self, address: RamAddress) -> Option<usize> {
        if address.page >= self.pages || address.gate >= self.gates {
            return None;
        }
        Some(usize::from(address.gate) * usize::from(self.pages) + usize::from(address.page))
    }

    fn decode(width: AddressWidth, data: &[u8]) -> Option<(u16, &[u8])> {
        match width {
            AddressWidth::Bits8 => {
                let (value, rest) = data.split_first()?;
                Some((u16::from(*value), rest))
            }
            AddressWidth::Bits16 => {
                let value = u16::from_le_bytes([*data.first()?, *data.get(1)?]);
                Some((value, &data[2..]))
            }
        }
    }

    fn decode_pair(width: AddressWidth, data: &[u8]) -> Option<(u16, u16)> {
        let (start, rest) = Self::decode(width, data)?;
        let (end, _) = Self::decode(width, rest)?;
        Some((start, end))
    }

    fn step(pointer: u16, window: (u16, u16), increment: bool) -> (u16, bool) {
        if pointer == window.1 {
            return (window.0, true);
        }
        if increment {
            (pointer.wrapping_add(1), false)
        } else {
            (pointer.wrapping_sub(1), false)
        }
    }

    fn advance(&mut self) {
        let x_inc = self.entry_mode & Flag::DATA_ENTRY_X_INCREMENT != 0;
        let y_inc = self.entry_mode & Flag::DATA_ENTRY_Y_INCREMENT != 0;

        let (x, wrapped) = Self::step(self.x_pointer, self.x_window, x_inc);
        self.x_pointer = x;
        if wrapped {
            let (y, _) = Self::step(self.y_pointer, self.y_window, y_inc);
            self.y_pointer = y;
        }
    }

    fn write_ram(&mut self, bank: Bank, data: &[u8]) {
        for &byte in data {
            let address = RamAddress {
                page: self.x_pointer,
                gate: self.y_pointer,
            };
            if let Some(i) = self.index(address) {
                match bank {
                    Bank::Primary => self.primary[i] = byte,
                    Bank::Secondary => self.secondary[i] = byte,
                }
            }
            self.advance();
        }
    }

    fn execute(&mut self, command: u8, data: &[u8]) {
        match command {
            Cmd::ENTRY_MODE => {
                if let Some(mode) = data.first() {
                    self.entry_mode = *mode;
                }
            }
            Cmd::RAM_XPOS_CTRL => {
                if let Some(window) = Self::decode_pair(self.x_address_width, data) {
                    self.x_window = window;
                }
            }
            Cmd::RAM_YPOS_CTRL => {
                if let Some(window) = Self::decode_pair(self.y_address_width, data) {
                    self.y_window = window;
                }
            }
            Cmd::RAM_XPOS_CNTR => {
                if let Some((x, _)) = Self::decode(self.x_address_width, data) {
                    self.x_pointer = x;
                }
            }
            Cmd::RAM_YPOS_CNTR => {
                if let Some((y, _)) = Self::decode(self.y_address_width, data) {
                    self.y_pointer = y;
                }
            }
            Cmd::WRITE_RAM => self.write_ram(Bank::Primary, data),
            Cmd::WRITE_RED_RAM => self.write_ram(Bank::Secondary, data),
            Cmd::MASTER_ACTIVATION | Cmd::SW_RESET => self.busy_remaining = self.busy_cycles,
            _ => {}
        }
    }
}

impl Interface for SimulatedController {
    fn cmd(&mut self, command: u8) -> Result<(), DisplayError> {
        self.cmd_with_data(command, &[])
    }

    fn cmd_with_data(&mut self, command: u8, data: &[u8]) -> Result<(), DisplayError> {
        if self.fail_on == Some(command) {
            self.fail_on = None;
            return Err(DisplayError::BusWriteError);
        }
        self.events.push(Event::Command {
            command,
            data: data.to_vec(),
        });
        self.execute(command, data);
        Ok(())
    }

    fn is_busy(&mut self) -> bool {
        if self.busy_remaining == 0 {
            return false;
        }
        self.busy_remaining -= 1;
        self.busy_polls += 1;
        true
    }

    fn delay_ms(&mut self, ms: u32) {
        self.events.push(Event::Delay(ms));
    }

    fn reset_pulse(&mut self) -> Result<(), DisplayError> {
        self.events.push(Event::Reset);
        Ok(())
    }

    fn has_power_switch(&self) -> bool {
        self.power_switch
    }

    fn power_up(&mut self) -> Result<(), DisplayError> {
        self.events.push(Event::PowerUp);
        Ok(())
    }

    fn power_down(&mut self) -> Result<(), DisplayError> {
        self.events.push(Event::PowerDown);
        Ok(())
    }
}
