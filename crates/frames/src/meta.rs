//! Fast GIF metadata probe.
//!
//! Walks the frame headers without decompressing pixel data, so playlist
//! discovery can qualify a folder of files cheaply. The probe is also the
//! single source of truth for the loop-count convention:
//!
//! | GIF Netscape extension | loop count |
//! |------------------------|------------|
//! | "loop forever"         | 0          |
//! | absent                 | 1 (play once) |
//! | "loop N"               | N          |
//!
//! The absent-means-once rule matches the device's original player; the
//! more common "absent means forever" reading is deliberately NOT used.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::store::ResourceError;

/// Cached metadata for one animated-image file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceMeta {
    /// Number of frames in the file.
    pub frame_count: usize,
    /// Playback passes: 0 = infinite, 1 = once, N = N passes.
    pub loop_count: u32,
    /// Fallback delay for frames that carry none, in milliseconds. Taken
    /// from the first frame; 0 when the file specifies no delay at all.
    pub default_duration_ms: u32,
}

/// Read frame count, loop count and default delay from `path` without
/// decoding pixel data.
///
/// # Errors
///
/// Returns [`ResourceError`] when the file cannot be opened or is not a
/// well-formed GIF. A frame count below 2 is *not* an error here — the
/// caller decides whether that disqualifies the file.
pub fn probe(path: &Path) -> Result<ResourceMeta, ResourceError> {
    let file = File::open(path).map_err(|source| ResourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut decoder = gif::DecodeOptions::new()
        .read_info(BufReader::new(file))
        .map_err(|source| ResourceError::Probe {
            path: path.to_path_buf(),
            source,
        })?;

    let mut frame_count = 0usize;
    let mut default_duration_ms = 0u32;
    // next_frame_info skips the compressed image data of each frame.
    while let Some(frame) = decoder
        .next_frame_info()
        .map_err(|source| ResourceError::Probe {
            path: path.to_path_buf(),
            source,
        })?
    {
        if frame_count == 0 {
            // GIF delays are in hundredths of a second.
            default_duration_ms = u32::from(frame.delay) * 10;
        }
        frame_count += 1;
    }

    let loop_count = match decoder.repeat() {
        gif::Repeat::Infinite => 0,
        // No Netscape extension: the file plays exactly once.
        gif::Repeat::Finite(0) => 1,
        gif::Repeat::Finite(n) => u32::from(n),
    };

    Ok(ResourceMeta {
        frame_count,
        loop_count,
        default_duration_ms,
    })
}
