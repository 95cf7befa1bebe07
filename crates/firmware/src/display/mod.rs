//! Display backend selection.
//!
//! At compile time the available backends are selected via Cargo features:
//!
//! | Feature     | Backend             | Target                     |
//! |-------------|---------------------|----------------------------|
//! | `hardware`  | [`St7735Display`]   | /dev/spidev* + GPIO lines  |
//! | `simulator` | [`SimulatorBoard`]  | SDL window, arrow keys     |
//!
//! Both implement [`platform::DisplaySink`], so the player core is
//! identical across targets.

#[cfg(feature = "hardware")]
pub mod st7735;
#[cfg(feature = "hardware")]
pub use st7735::St7735Display;

#[cfg(feature = "simulator")]
pub mod simulator;
#[cfg(feature = "simulator")]
pub use simulator::{SimulatorBoard, SimulatorInput, SimulatorSink};
