//! Splash image loading.
//!
//! Boot and off screens are plain still images (JPEG or GIF first frame),
//! fill-cropped to the panel exactly like any playback frame.

use std::path::Path;

use anyhow::Context;
use embedded_graphics::prelude::Size;
use platform::FrameBuffer;

/// Load `path` and fit it to the panel geometry.
///
/// # Errors
///
/// Returns an error when the image cannot be read or decoded.
pub fn load_splash(path: &Path, size: Size) -> anyhow::Result<FrameBuffer> {
    let image = image::open(path)
        .with_context(|| format!("opening splash image {}", path.display()))?
        .into_rgb8();
    let fitted = frames::fit::fill_center_crop(&image, size.width, size.height);
    FrameBuffer::from_rgb8(fitted.width(), fitted.height(), fitted.as_raw())
        .context("sizing splash image")
}
