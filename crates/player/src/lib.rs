//! Player core — the timed playback engine, the screen renderer and the
//! root control loop that ties every component together.
//!
//! # Modules
//!
//! - [`engine`] — frame pacing, input polling, loop-count exhaustion
//! - [`render`] — menu / solid-color / frame composition helpers
//! - [`app`] — the root mode loop ([`App::run`])
//!
//! Everything is generic over the `platform` traits; the whole loop runs
//! against mocks under `cargo test` and against real hardware in the
//! `firmware` binary, unchanged.

pub mod app;
pub mod engine;
pub mod render;

// Top-level re-exports for convenience
pub use app::{App, PlayerConfig, PlayerError};
pub use engine::{InterruptReason, PlaybackEngine};
