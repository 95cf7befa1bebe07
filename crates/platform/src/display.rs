//! Display abstraction layer.
//!
//! The player treats the panel as a fixed-size target accepting whole
//! frames — no partial updates, no double buffering. Width and height are
//! post-rotation: whatever rotation the driver applies, [`DisplaySink::size`]
//! reports the geometry the caller composes against.

use embedded_graphics::prelude::Size;

use crate::framebuffer::FrameBuffer;

/// A fixed-size display target accepting full-frame writes.
pub trait DisplaySink {
    /// Display dimensions in pixels, already normalized for rotation.
    fn size(&self) -> Size;

    /// Blit one full frame to the panel. Synchronous; returns once the
    /// frame has been handed to the bus.
    ///
    /// # Errors
    ///
    /// Returns a [`DisplayError`] when the frame does not match the panel
    /// geometry or the bus write fails.
    fn write_frame(&mut self, frame: &FrameBuffer) -> Result<(), DisplayError>;
}

/// Display errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError {
    /// Bus-level communication with the panel failed.
    Communication,
    /// The frame dimensions do not match the panel dimensions.
    Geometry,
}

#[cfg(feature = "std")]
impl std::error::Error for DisplayError {}

impl core::fmt::Display for DisplayError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Communication => write!(f, "display communication error"),
            Self::Geometry => write!(f, "frame does not match display geometry"),
        }
    }
}
