//! ST7735 panel over Linux spidev + GPIO character device.
//!
//! Wiring follows the common 1.44" hat: DC on GPIO 25, RST on GPIO 27,
//! panel on `/dev/spidev0.0`. All of it is configurable; see
//! [`DisplayConfig`](crate::config::DisplayConfig).

use anyhow::{anyhow, Context};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use linux_embedded_hal::gpio_cdev::{Chip, LineRequestFlags};
use linux_embedded_hal::spidev::{SpiModeFlags, SpidevOptions};
use linux_embedded_hal::{CdevPin, Delay, SpidevDevice};
use platform::{DisplayError, DisplaySink, FrameBuffer};
use st7735_lcd::{Orientation, ST7735};
use tracing::info;

use crate::config::DisplayConfig;

/// The physical panel as a [`DisplaySink`].
pub struct St7735Display {
    lcd: ST7735<SpidevDevice, CdevPin, CdevPin>,
    // Held so the line stays reserved (and lit) for the process lifetime.
    _backlight: Option<CdevPin>,
    width: u32,
    height: u32,
}

impl St7735Display {
    /// Bring up SPI, claim the control lines and initialize the panel.
    ///
    /// # Errors
    ///
    /// Returns an error when the SPI device or a GPIO line cannot be
    /// opened, or the panel rejects initialization.
    pub fn open(config: &DisplayConfig) -> anyhow::Result<Self> {
        let mut spi = SpidevDevice::open(&config.spidev)
            .with_context(|| format!("opening SPI device {}", config.spidev))?;
        let options = SpidevOptions::new()
            .bits_per_word(8)
            .max_speed_hz(config.baudrate_hz)
            .mode(SpiModeFlags::SPI_MODE_0)
            .build();
        spi.configure(&options).context("configuring SPI")?;

        let mut chip = Chip::new(&config.gpio_chip)
            .with_context(|| format!("opening GPIO chip {}", config.gpio_chip))?;
        let dc = request_output(&mut chip, config.dc_pin, "marquee-dc", 0)?;
        let rst = request_output(&mut chip, config.reset_pin, "marquee-rst", 0)?;
        let backlight = match config.backlight_pin {
            Some(pin) => Some(request_output(&mut chip, pin, "marquee-bl", 1)?),
            None => None,
        };

        let mut delay = Delay {};
        let mut lcd = ST7735::new(spi, dc, rst, false, false, config.width, config.height);
        lcd.init(&mut delay).map_err(|_| anyhow!("LCD init failed"))?;
        lcd.set_orientation(&orientation(config.rotation))
            .map_err(|_| anyhow!("LCD orientation failed"))?;
        lcd.set_offset(config.x_offset, config.y_offset);

        let (width, height) = config.normalized_size();
        info!(width, height, rotation = config.rotation, "display ready");
        Ok(St7735Display {
            lcd,
            _backlight: backlight,
            width,
            height,
        })
    }
}

impl DisplaySink for St7735Display {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    fn write_frame(&mut self, frame: &FrameBuffer) -> Result<(), DisplayError> {
        if frame.width() != self.width || frame.height() != self.height {
            return Err(DisplayError::Geometry);
        }
        let colors = frame.pixels().map(|c| Rgb565::from(c).into_storage());
        self.lcd
            .set_pixels_buffered(
                0,
                0,
                (self.width - 1) as u16,
                (self.height - 1) as u16,
                colors,
            )
            .map_err(|_| DisplayError::Communication)
    }
}

fn request_output(chip: &mut Chip, pin: u32, label: &str, initial: u8) -> anyhow::Result<CdevPin> {
    let line = chip
        .get_line(pin)
        .with_context(|| format!("getting GPIO line {pin}"))?;
    let handle = line
        .request(LineRequestFlags::OUTPUT, initial, label)
        .with_context(|| format!("requesting GPIO line {pin} ({label})"))?;
    CdevPin::new(handle).with_context(|| format!("wrapping GPIO line {pin}"))
}

fn orientation(rotation: u16) -> Orientation {
    match rotation {
        90 => Orientation::Landscape,
        180 => Orientation::PortraitSwapped,
        270 => Orientation::LandscapeSwapped,
        _ => Orientation::Portrait,
    }
}
