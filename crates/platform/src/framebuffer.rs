//! In-memory RGB framebuffer — the unit of display output.
//!
//! Decoded GIF frames, the menu screen and the solid-color fill are all
//! composed into a [`FrameBuffer`] before being handed to a
//! [`DisplaySink`](crate::DisplaySink) as one full-frame blit. The buffer
//! implements [`DrawTarget`] so UI code draws with ordinary
//! embedded-graphics primitives.

use alloc::vec;
use alloc::vec::Vec;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;

/// A `width × height` buffer of [`Rgb888`] pixels in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgb888>,
}

impl FrameBuffer {
    /// Create a buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Rgb888::BLACK)
    }

    /// Create a buffer filled with `color`.
    pub fn filled(width: u32, height: u32, color: Rgb888) -> Self {
        FrameBuffer {
            width,
            height,
            pixels: vec![color; (width as usize) * (height as usize)],
        }
    }

    /// Build a buffer from packed 8-bit RGB data (3 bytes per pixel,
    /// row-major). Returns `None` when `data` is not exactly
    /// `width * height * 3` bytes.
    pub fn from_rgb8(width: u32, height: u32, data: &[u8]) -> Option<Self> {
        let expected = (width as usize).checked_mul(height as usize)?.checked_mul(3)?;
        if data.len() != expected {
            return None;
        }
        let pixels = data
            .chunks_exact(3)
            .map(|px| Rgb888::new(px[0], px[1], px[2]))
            .collect();
        Some(FrameBuffer {
            width,
            height,
            pixels,
        })
    }

    /// Buffer width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Buffer height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Overwrite every pixel with `color`.
    pub fn fill(&mut self, color: Rgb888) {
        self.pixels.fill(color);
    }

    /// The pixel at (`x`, `y`), or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb888> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    /// Iterate over all pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgb888> + '_ {
        self.pixels.iter().copied()
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb888;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            let (x, y) = (point.x as u32, point.y as u32);
            if x >= self.width || y >= self.height {
                continue;
            }
            let idx = (y * self.width + x) as usize;
            if let Some(px) = self.pixels.get_mut(idx) {
                *px = color;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color);
        Ok(())
    }
}
