//! Button lines over the GPIO character device.
//!
//! The hat pulls every button line up; a pressed button shorts it low.
//! [`platform::InputSource`] hides that polarity — and a failed read is
//! reported as "not pressed" so a transient GPIO error can never freeze
//! the control loop.

use anyhow::Context;
use embedded_hal::digital::InputPin;
use linux_embedded_hal::gpio_cdev::{Chip, LineRequestFlags};
use linux_embedded_hal::CdevPin;
use platform::{Button, InputSource};
use tracing::info;

use crate::config::ButtonConfig;

/// The five physical buttons as an [`InputSource`].
pub struct GpioInput {
    advance: CdevPin,
    back: CdevPin,
    select: CdevPin,
    menu_up: CdevPin,
    menu_down: CdevPin,
}

impl GpioInput {
    /// Claim all five button lines.
    ///
    /// # Errors
    ///
    /// Returns an error when the GPIO chip or any line cannot be opened.
    pub fn open(config: &ButtonConfig) -> anyhow::Result<Self> {
        let mut chip = Chip::new(&config.gpio_chip)
            .with_context(|| format!("opening GPIO chip {}", config.gpio_chip))?;
        let input = GpioInput {
            advance: request_input(&mut chip, config.advance, "marquee-advance")?,
            back: request_input(&mut chip, config.back, "marquee-back")?,
            select: request_input(&mut chip, config.select, "marquee-select")?,
            menu_up: request_input(&mut chip, config.menu_up, "marquee-up")?,
            menu_down: request_input(&mut chip, config.menu_down, "marquee-down")?,
        };
        info!(
            advance = config.advance,
            back = config.back,
            select = config.select,
            menu_up = config.menu_up,
            menu_down = config.menu_down,
            "buttons ready"
        );
        Ok(input)
    }
}

impl InputSource for GpioInput {
    fn is_pressed(&mut self, button: Button) -> bool {
        let pin = match button {
            Button::Advance => &mut self.advance,
            Button::Back => &mut self.back,
            Button::Select => &mut self.select,
            Button::MenuUp => &mut self.menu_up,
            Button::MenuDown => &mut self.menu_down,
        };
        // Active-low: pressed pulls the line to ground. Read errors count
        // as released.
        pin.is_low().unwrap_or(false)
    }
}

fn request_input(chip: &mut Chip, pin: u32, label: &str) -> anyhow::Result<CdevPin> {
    let line = chip
        .get_line(pin)
        .with_context(|| format!("getting GPIO line {pin}"))?;
    let handle = line
        .request(LineRequestFlags::INPUT, 0, label)
        .with_context(|| format!("requesting GPIO line {pin} ({label})"))?;
    CdevPin::new(handle).with_context(|| format!("wrapping GPIO line {pin}"))
}
