//! Platform abstraction layer for the Marquee pocket GIF player.
//!
//! Everything the player core needs from the outside world is expressed as
//! a trait here: a display that accepts full frames ([`DisplaySink`]),
//! debounced buttons ([`InputSource`]), wall-clock time ([`Clock`]) and the
//! single privileged host operation ([`HostControl`]). The `firmware` crate
//! provides the hardware implementations; [`mocks`] provides host-side test
//! doubles so the whole control loop runs under `cargo test`.
//!
//! This crate performs no I/O of its own.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

pub mod clock;
pub mod display;
pub mod framebuffer;
pub mod host;
pub mod input;

#[cfg(any(test, feature = "std"))]
pub mod mocks;

// Top-level re-exports for convenience
pub use clock::Clock;
pub use display::{DisplayError, DisplaySink};
pub use framebuffer::FrameBuffer;
pub use host::{HostControl, HostError};
pub use input::{Button, InputSource};
