//! Runtime configuration.
//!
//! Everything device-specific lives here: panel wiring, button pins,
//! timings and asset paths. The whole tree has working defaults (the
//! 1.44" 128×128 ST7735 hat this player ships on), so a config file only
//! needs the keys it changes. Files are JSON, loaded once at startup.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Folder scanned for animated GIFs.
    pub media_dir: PathBuf,
    /// Panel wiring and geometry.
    pub display: DisplayConfig,
    /// Button GPIO lines.
    pub buttons: ButtonConfig,
    /// Loop timings.
    pub timing: TimingConfig,
    /// Splash images.
    pub assets: AssetConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            media_dir: PathBuf::from("images"),
            display: DisplayConfig::default(),
            buttons: ButtonConfig::default(),
            timing: TimingConfig::default(),
            assets: AssetConfig::default(),
        }
    }
}

/// Panel wiring and geometry.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// SPI device node.
    pub spidev: String,
    /// SPI clock in Hz.
    pub baudrate_hz: u32,
    /// GPIO character device for the control pins.
    pub gpio_chip: String,
    /// Data/command line.
    pub dc_pin: u32,
    /// Reset line.
    pub reset_pin: u32,
    /// Backlight line, if the module has one.
    pub backlight_pin: Option<u32>,
    /// Panel width before rotation.
    pub width: u32,
    /// Panel height before rotation.
    pub height: u32,
    /// Rotation in degrees: 0, 90, 180 or 270.
    pub rotation: u16,
    /// Column RAM offset of the module.
    pub x_offset: u16,
    /// Row RAM offset of the module.
    pub y_offset: u16,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        // Defaults match the 1.44" ST7735R hat: 128×128 panel with a
        // (2, 3) RAM offset, rotated to landscape.
        DisplayConfig {
            spidev: String::from("/dev/spidev0.0"),
            baudrate_hz: 64_000_000,
            gpio_chip: String::from("/dev/gpiochip0"),
            dc_pin: 25,
            reset_pin: 27,
            backlight_pin: None,
            width: 128,
            height: 128,
            rotation: 90,
            x_offset: 2,
            y_offset: 3,
        }
    }
}

impl DisplayConfig {
    /// Width/height as the caller sees them, with rotation applied.
    pub fn normalized_size(&self) -> (u32, u32) {
        if self.rotation % 180 == 90 {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }

    /// Reject rotations the panel cannot do.
    ///
    /// # Errors
    ///
    /// Returns an error for any rotation other than 0/90/180/270.
    pub fn validate(&self) -> anyhow::Result<()> {
        match self.rotation {
            0 | 90 | 180 | 270 => Ok(()),
            other => anyhow::bail!("unsupported display rotation {other}; use 0, 90, 180 or 270"),
        }
    }
}

/// Button GPIO lines (pulled up on the hat; pressed reads low).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ButtonConfig {
    /// GPIO character device for the buttons.
    pub gpio_chip: String,
    /// Advance (right) button line.
    pub advance: u32,
    /// Back (left) button line.
    pub back: u32,
    /// Select (press) button line.
    pub select: u32,
    /// Menu-up button line.
    pub menu_up: u32,
    /// Menu-down button line.
    pub menu_down: u32,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        ButtonConfig {
            gpio_chip: String::from("/dev/gpiochip0"),
            advance: 26,
            back: 5,
            select: 13,
            menu_up: 6,
            menu_down: 19,
        }
    }
}

/// Loop timings, all in milliseconds.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Poll granularity for every timed wait.
    pub poll_interval_ms: u64,
    /// Menu idle time before the player exits.
    pub menu_idle_timeout_ms: u64,
    /// Solid-color dwell before playback resumes.
    pub color_dwell_ms: u64,
    /// Settle time between the off screen and the restart command.
    pub restart_settle_ms: u64,
    /// How long the boot splash stays up.
    pub boot_splash_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            poll_interval_ms: 5,
            menu_idle_timeout_ms: 15_000,
            color_dwell_ms: 10_000,
            restart_settle_ms: 1_000,
            boot_splash_ms: 5_000,
        }
    }
}

/// Optional splash images, fill-cropped to the panel like any frame.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Shown for `boot_splash_ms` before playback starts.
    pub boot_image: Option<PathBuf>,
    /// Shown on exit and before a restart; solid black when unset.
    pub off_image: Option<PathBuf>,
}

impl Config {
    /// Load from `path`, or take the defaults when no file is given.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed, or the
    /// resulting configuration is invalid.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => Config::default(),
        };
        config.display.validate()?;
        Ok(config)
    }

    /// The player-core view of the timings.
    pub fn player_config(&self) -> player::PlayerConfig {
        player::PlayerConfig {
            poll_interval_ms: self.timing.poll_interval_ms,
            menu_idle_timeout_ms: self.timing.menu_idle_timeout_ms,
            color_dwell_ms: self.timing.color_dwell_ms,
            restart_settle_ms: self.timing.restart_settle_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_the_shipped_hat() {
        let config = Config::default();
        assert_eq!(config.display.width, 128);
        assert_eq!(config.display.height, 128);
        assert_eq!(config.display.rotation, 90);
        assert_eq!(config.display.baudrate_hz, 64_000_000);
        assert_eq!(config.buttons.advance, 26);
        assert_eq!(config.buttons.back, 5);
        assert_eq!(config.buttons.select, 13);
        assert_eq!(config.timing.menu_idle_timeout_ms, 15_000);
        assert_eq!(config.timing.color_dwell_ms, 10_000);
        assert_eq!(config.timing.boot_splash_ms, 5_000);
    }

    #[test]
    fn test_rotation_swaps_normalized_size() {
        let mut display = DisplayConfig {
            width: 160,
            height: 128,
            ..DisplayConfig::default()
        };
        display.rotation = 0;
        assert_eq!(display.normalized_size(), (160, 128));
        display.rotation = 90;
        assert_eq!(display.normalized_size(), (128, 160));
        display.rotation = 180;
        assert_eq!(display.normalized_size(), (160, 128));
        display.rotation = 270;
        assert_eq!(display.normalized_size(), (128, 160));
    }

    #[test]
    fn test_validate_rejects_odd_rotation() {
        let display = DisplayConfig {
            rotation: 45,
            ..DisplayConfig::default()
        };
        assert!(display.validate().is_err());
    }

    #[test]
    fn test_partial_json_keeps_defaults_elsewhere() {
        let parsed: Config = serde_json::from_str(
            r#"{ "media_dir": "/srv/gifs", "timing": { "color_dwell_ms": 2500 } }"#,
        )
        .unwrap();
        assert_eq!(parsed.media_dir, PathBuf::from("/srv/gifs"));
        assert_eq!(parsed.timing.color_dwell_ms, 2_500);
        // Untouched keys keep their defaults.
        assert_eq!(parsed.timing.poll_interval_ms, 5);
        assert_eq!(parsed.display.dc_pin, 25);
    }

    #[test]
    fn test_player_config_mirrors_timings() {
        let config = Config::default();
        let pc = config.player_config();
        assert_eq!(pc.poll_interval_ms, 5);
        assert_eq!(pc.menu_idle_timeout_ms, 15_000);
        assert_eq!(pc.color_dwell_ms, 10_000);
        assert_eq!(pc.restart_settle_ms, 1_000);
    }
}
