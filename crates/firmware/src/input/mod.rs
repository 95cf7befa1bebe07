//! Input backend selection.
//!
//! The hardware backend reads the five button lines through the GPIO
//! character device. The simulator's keyboard input lives with its window
//! in [`crate::display::simulator`].

#[cfg(feature = "hardware")]
pub mod gpio;
#[cfg(feature = "hardware")]
pub use gpio::GpioInput;
