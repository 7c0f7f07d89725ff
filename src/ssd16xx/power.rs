//! Power lifecycle
//!
//! The panel is either [`PowerState::Active`] or [`PowerState::Off`]. Going
//! off puts the controller into deep sleep and, on boards with a power
//! switch, removes the panel supply. Coming back re-runs the controller
//! bring-up, which clears the RAM and the retained frame.

use crate::ssd16xx::cmd::Cmd;
use crate::ssd16xx::driver::Ssd16xx;
use crate::ssd16xx::error::Error;
use crate::ssd16xx::flag::Flag;
use crate::ssd16xx::interface::Interface;

/// Commanded power state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PowerState {
    /// Controller running, ready for writes
    #[default]
    Active,
    /// Controller in deep sleep, panel supply removed if switchable
    Off,
}

/// Device lifecycle hooks
pub trait Lifecycle {
    /// Power the panel if switchable and bring the controller up
    fn initialize(&mut self) -> Result<(), Error>;

    /// Move to `state`; requesting the current state does nothing
    fn set_power_state(&mut self, state: PowerState) -> Result<(), Error>;

    /// Last successfully commanded state
    fn power_state(&self) -> PowerState;
}

impl<I> Ssd16xx<I>
where
    I: Interface,
{
    fn power_on(&mut self) -> Result<(), Error> {
        if self.interface.has_power_switch() {
            log::info!("Switching panel power on");
            self.interface.power_up()?;
            self.interface.delay_ms(self.config.power_settle_ms);
        }
        self.controller_init()
    }

    fn power_off(&mut self) -> Result<(), Error> {
        log::info!("Entering deep sleep");
        self.interface.wait_busy_low();
        self.interface
            .cmd_with_data(Cmd::SLEEP_MODE, &[Flag::SLEEP_MODE_DSM])?;

        if self.interface.has_power_switch() {
            self.interface.delay_ms(self.config.power_settle_ms);
            log::info!("Switching panel power off");
            self.interface.power_down()?;
        }
        Ok(())
    }
}

impl<I> Lifecycle for Ssd16xx<I>
where
    I: Interface,
{
    fn initialize(&mut self) -> Result<(), Error> {
        self.power_on()?;
        self.power_state = PowerState::Active;
        Ok(())
    }

    fn set_power_state(&mut self, state: PowerState) -> Result<(), Error> {
        if state == self.power_state {
            log::debug!("Already in power state {:?}", state);
            return Ok(());
        }

        match state {
            PowerState::Off => self.power_off()?,
            PowerState::Active => self.power_on()?,
        }
        self.power_state = state;
        Ok(())
    }

    fn power_state(&self) -> PowerState {
        self.power_state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ssd16xx::config::{Builder, Config};
    use crate::ssd16xx::display::DisplayDriver;
    use crate::ssd16xx::driver::BufferDescriptor;
    use crate::ssd16xx::error::DisplayError;
    use crate::ssd16xx::mock::{Bank, Event, SimulatedController};

    fn switched_config() -> Config {
        Builder::new()
            .dimensions(64, 32)
            .driving_voltages(&[0x19], &[0x02])
            .power_settle_ms(25)
            .build()
            .unwrap()
    }

    fn switched_driver() -> Ssd16xx<SimulatedController> {
        let config = switched_config();
        let controller = SimulatedController::new(&config).with_power_switch();
        Ssd16xx::new(controller, config).unwrap()
    }

    #[test]
    fn initialize_powers_up_first() {
        let driver = switched_driver();
        let events = driver.interface().events();
        assert_eq!(events[0], Event::PowerUp);
        assert_eq!(events[1], Event::Delay(25));
        assert_eq!(events[2], Event::Reset);
        assert_eq!(driver.power_state(), PowerState::Active);
    }

    #[test]
    fn off_sleeps_then_removes_power() {
        let mut driver = switched_driver();
        driver.interface_mut().clear();
        driver.set_power_state(PowerState::Off).unwrap();

        assert_eq!(
            driver.interface().events(),
            &[
                Event::Command {
                    command: Cmd::SLEEP_MODE,
                    data: vec![0x01]
                },
                Event::Delay(25),
                Event::PowerDown,
            ]
        );
        assert_eq!(driver.power_state(), PowerState::Off);
    }

    #[test]
    fn off_without_power_switch_only_sleeps() {
        let config = switched_config();
        let controller = SimulatedController::new(&config);
        let mut driver = Ssd16xx::new(controller, config).unwrap();
        driver.interface_mut().clear();
        driver.set_power_state(PowerState::Off).unwrap();

        assert_eq!(driver.interface().opcodes(), vec![Cmd::SLEEP_MODE]);
        assert!(!driver.interface().events().contains(&Event::PowerDown));
    }

    #[test]
    fn repeated_request_is_noop() {
        let mut driver = switched_driver();
        driver.interface_mut().clear();
        driver.set_power_state(PowerState::Active).unwrap();
        assert!(driver.interface().events().is_empty());

        driver.set_power_state(PowerState::Off).unwrap();
        driver.interface_mut().clear();
        driver.set_power_state(PowerState::Off).unwrap();
        assert!(driver.interface().events().is_empty());
    }

    #[test]
    fn wake_reinitializes_and_clears_retained_frame() {
        let mut driver = switched_driver();
        let desc = BufferDescriptor::new(64, 32);
        driver.write(0, 0, &desc, &[0x00; 256]).unwrap();
        driver.set_contrast(100).unwrap();

        driver.set_power_state(PowerState::Off).unwrap();
        driver.interface_mut().clear();
        driver.set_power_state(PowerState::Active).unwrap();

        let sim = driver.interface();
        assert_eq!(&sim.events()[..3], &[Event::PowerUp, Event::Delay(25), Event::Reset]);
        assert!(sim.opcodes().contains(&Cmd::SW_RESET));
        assert!(sim.bank(Bank::Primary).iter().all(|&b| b == 0xFF));
        assert_eq!(driver.retained_frame(0, 0, &desc).unwrap(), vec![0xFF; 256]);
        assert_eq!(driver.power_state(), PowerState::Active);
    }

    #[test]
    fn write_after_wake_reprograms_panel() {
        let mut driver = switched_driver();
        let desc = BufferDescriptor::new(64, 32);
        driver.write(0, 0, &desc, &[0x00; 256]).unwrap();
        driver.set_contrast(100).unwrap();

        driver.set_power_state(PowerState::Off).unwrap();
        driver.set_power_state(PowerState::Active).unwrap();
        assert_eq!(driver.contrast(), 255);

        driver.interface_mut().clear();
        driver.write(0, 0, &desc, &[0xF0; 256]).unwrap();

        let sim = driver.interface();
        let ops = sim.opcodes();
        assert!(ops.contains(&Cmd::GDO_CTRL));
        assert!(ops.contains(&Cmd::GDV_CTRL));
        assert!(ops.contains(&Cmd::SDV_CTRL));
        assert!(ops.contains(&Cmd::VCOM_VOLTAGE));
        let ctrl2: Vec<u8> = sim
            .commands()
            .iter()
            .filter(|(c, _)| *c == Cmd::UPDATE_CTRL2)
            .map(|(_, d)| d[0])
            .collect();
        assert!(!ctrl2.contains(&Flag::CTRL2_PARTIAL_REFRESH));
        assert_eq!(
            ctrl2.last(),
            Some(&(Flag::CTRL2_FULL_REFRESH | Flag::CTRL2_LOAD_LUT))
        );
    }

    #[test]
    fn failed_transition_keeps_state() {
        let mut driver = switched_driver();
        driver.interface_mut().fail_next(Cmd::SLEEP_MODE);
        assert_eq!(
            driver.set_power_state(PowerState::Off),
            Err(Error::Interface(DisplayError::BusWriteError))
        );
        assert_eq!(driver.power_state(), PowerState::Active);
    }
}
