//! Host demo: drives a simulated 2.9" panel through a full and a partial
//! refresh and reports what the controller received.
//!
//! Usage: `ssd16xx-demo [text]`. Set `RUST_LOG=debug` to see every write
//! being sequenced.

use anyhow::Context;
use env_logger::Env;

use embedded_graphics::mono_font::{ascii::FONT_6X10, iso_8859_15::FONT_10X20, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::{prelude::*, text::Text};

use ssd16xx::ssd16xx::mock::{Bank, Event};
use ssd16xx::{Config, DisplayDriver, Lifecycle, PowerState, SimulatedController, Ssd16xx};

/// Contrast used for the partial update; anything below 255 selects it
const PARTIAL_CONTRAST: u8 = 128;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let text = std::env::args()
        .nth(1)
        .unwrap_or_else(|| String::from("Hello, e-paper"));

    let config = Config::gdeh029a1().context("invalid panel preset")?;
    let controller = SimulatedController::new(&config).with_power_switch();

    log::info!("Creating display driver");
    let mut epd = Ssd16xx::new(controller, config).context("controller bring-up failed")?;

    let caps = epd.get_capabilities();
    log::info!(
        "Panel {}x{}, format {:?}, screen info 0x{:02X}",
        caps.x_resolution,
        caps.y_resolution,
        caps.current_pixel_format,
        caps.screen_info.0
    );

    // Full refresh of the whole panel
    let mut frame = epd.new_frame(0, 0, caps.x_resolution, caps.y_resolution)?;
    Rectangle::new(Point::zero(), frame.size())
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 2))
        .draw(&mut frame)?;
    Text::new(
        &text,
        Point::new(10, 30),
        MonoTextStyle::new(&FONT_10X20, BinaryColor::On),
    )
    .draw(&mut frame)?;

    log::info!("Writing full frame");
    epd.write_frame(&frame).context("full refresh failed")?;

    // Partial refresh of a status strip
    epd.set_contrast(PARTIAL_CONTRAST)?;
    let mut status = epd.new_frame(8, 96, 160, 16)?;
    Text::new(
        "partial update",
        Point::new(0, 10),
        MonoTextStyle::new(&FONT_6X10, BinaryColor::On),
    )
    .draw(&mut status)?;

    log::info!("Writing partial frame");
    epd.write_frame(&status).context("partial refresh failed")?;

    epd.set_power_state(PowerState::Off)
        .context("power down failed")?;
    log::info!("Power state: {:?}", epd.power_state());

    let sim = epd.interface();
    let commands = sim.commands().len();
    let delays: u32 = sim
        .events()
        .iter()
        .filter_map(|event| match event {
            Event::Delay(ms) => Some(*ms),
            _ => None,
        })
        .sum();
    let black = sim
        .bank(Bank::Primary)
        .iter()
        .map(|byte| byte.count_zeros())
        .sum::<u32>();

    log::info!(
        "{} commands sent, {} ms of delays, {} black pixels in RAM",
        commands,
        delays,
        black
    );
    Ok(())
}
