//! Frame store — turns one animated GIF file into display-ready frames.
//!
//! # Modules
//!
//! - [`meta`] — fast metadata probe (frame count, loop count, default delay)
//! - [`fit`] — uniform fill + center crop to the panel geometry
//! - [`store`] — full decode into a [`FrameSet`] of timed RGB frames
//!
//! The store never touches the display; it returns data and nothing else.
//! It holds at most one resource's frames at a time — each load builds the
//! complete replacement sequence before the previous one is dropped.

pub mod fit;
pub mod meta;
pub mod store;

// Top-level re-exports for convenience
pub use meta::{probe, ResourceMeta};
pub use store::{Frame, FrameSet, FrameStore, ResourceError};
