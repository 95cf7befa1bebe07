//! Full decode of one GIF into display-ready frames.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, DynamicImage, RgbImage};
use platform::FrameBuffer;
use tracing::debug;

use crate::fit::fill_center_crop;
use crate::meta::{probe, ResourceMeta};

/// One decoded frame: a display-sized RGB image plus its authored duration.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Pixels, already fitted to the panel geometry.
    pub image: FrameBuffer,
    /// How long the frame stays on screen, in milliseconds. May be 0.
    pub duration_ms: u32,
}

/// The decoded frames of one resource, replaced wholesale on every load.
#[derive(Debug, Clone)]
pub struct FrameSet {
    frames: Vec<Frame>,
    loop_count: u32,
}

impl FrameSet {
    /// Assemble a set directly. Returns `None` when `frames` has fewer
    /// than 2 entries — the invariant every consumer relies on. Normal
    /// code gets its sets from [`FrameStore::load`]; this exists for
    /// callers that synthesize frames (tests, splash screens).
    pub fn new(frames: Vec<Frame>, loop_count: u32) -> Option<Self> {
        if frames.len() < 2 {
            return None;
        }
        Some(FrameSet { frames, loop_count })
    }

    /// The frames in playback order. Always at least 2.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Playback passes: 0 = infinite, 1 = once, N = N passes.
    pub fn loop_count(&self) -> u32 {
        self.loop_count
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always `false` for a loaded set; present for completeness.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Errors from probing or decoding a resource.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    /// The file could not be opened or read.
    #[error("cannot open {}", path.display())]
    Io {
        /// Offending file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The metadata probe failed (not a well-formed GIF).
    #[error("cannot probe {}", path.display())]
    Probe {
        /// Offending file.
        path: PathBuf,
        /// Underlying decoder error.
        #[source]
        source: gif::DecodingError,
    },
    /// Full-frame decoding failed.
    #[error("cannot decode {}", path.display())]
    Decode {
        /// Offending file.
        path: PathBuf,
        /// Underlying decoder error.
        #[source]
        source: image::ImageError,
    },
    /// The file decodes but is not animated (fewer than 2 frames).
    #[error("{} has {frame_count} frame(s); need at least 2", path.display())]
    NotAnimated {
        /// Offending file.
        path: PathBuf,
        /// Frames actually present.
        frame_count: usize,
    },
}

/// Decodes one resource at a time into frames sized for a fixed target.
#[derive(Debug, Clone, Copy)]
pub struct FrameStore {
    target_w: u32,
    target_h: u32,
}

impl FrameStore {
    /// A store producing frames of exactly `width × height`.
    pub fn new(width: u32, height: u32) -> Self {
        FrameStore {
            target_w: width,
            target_h: height,
        }
    }

    /// Decode `path` into a complete [`FrameSet`].
    ///
    /// Every frame is composited (GIF disposal applied), converted to RGB
    /// and fill-cropped to the target size. A frame with no delay of its
    /// own inherits the resource default.
    ///
    /// # Errors
    ///
    /// [`ResourceError::NotAnimated`] when the file has fewer than 2
    /// frames; I/O and decoder failures otherwise.
    pub fn load(&self, path: &Path) -> Result<FrameSet, ResourceError> {
        let meta = probe(path)?;
        if meta.frame_count < 2 {
            return Err(ResourceError::NotAnimated {
                path: path.to_path_buf(),
                frame_count: meta.frame_count,
            });
        }

        let file = File::open(path).map_err(|source| ResourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let decoder =
            GifDecoder::new(BufReader::new(file)).map_err(|source| ResourceError::Decode {
                path: path.to_path_buf(),
                source,
            })?;
        let raw_frames =
            decoder
                .into_frames()
                .collect_frames()
                .map_err(|source| ResourceError::Decode {
                    path: path.to_path_buf(),
                    source,
                })?;

        let mut frames = Vec::with_capacity(raw_frames.len());
        for raw in raw_frames {
            let duration_ms = match delay_ms(raw.delay()) {
                0 => meta.default_duration_ms,
                ms => ms,
            };
            let rgb: RgbImage = DynamicImage::ImageRgba8(raw.into_buffer()).into_rgb8();
            let fitted = fill_center_crop(&rgb, self.target_w, self.target_h);
            frames.push(Frame {
                image: buffer_from_image(&fitted),
                duration_ms,
            });
        }

        // The compositor can in principle drop malformed trailing frames;
        // the 2-frame invariant holds for the decoded set, not the probe.
        if frames.len() < 2 {
            return Err(ResourceError::NotAnimated {
                path: path.to_path_buf(),
                frame_count: frames.len(),
            });
        }

        debug!(
            path = %path.display(),
            frames = frames.len(),
            loop_count = meta.loop_count,
            "loaded resource"
        );
        Ok(FrameSet {
            frames,
            loop_count: meta.loop_count,
        })
    }

    /// The probe for this store's resources; see [`probe`].
    ///
    /// # Errors
    ///
    /// Propagates [`ResourceError`] from the underlying probe.
    pub fn probe(&self, path: &Path) -> Result<ResourceMeta, ResourceError> {
        probe(path)
    }
}

fn delay_ms(delay: image::Delay) -> u32 {
    let (numer, denom) = delay.numer_denom_ms();
    if denom == 0 {
        0
    } else {
        numer / denom
    }
}

fn buffer_from_image(img: &RgbImage) -> FrameBuffer {
    // from_rgb8 only fails on a length mismatch, which an RgbImage's own
    // backing buffer cannot produce.
    FrameBuffer::from_rgb8(img.width(), img.height(), img.as_raw())
        .unwrap_or_else(|| FrameBuffer::new(img.width(), img.height()))
}
