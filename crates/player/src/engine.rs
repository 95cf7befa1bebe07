//! Playback engine — drives one resource's frames to the display.
//!
//! The engine is a straight-line timed loop, not a task: it blits a frame,
//! then polls buttons and the clock until the frame's duration elapses,
//! then moves on. The only suspension is [`Clock::sleep_ms`] at the poll
//! interval, so a press is observed within one interval even mid-frame.
//!
//! Priority rule: a button observed in the same poll as a frame-duration
//! expiry counts as the button — input is checked before the deadline.

use frames::FrameSet;
use platform::{Button, Clock, DisplayError, DisplaySink, InputSource};
use playlist::Playlist;
use tracing::trace;

/// Why a playback call returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptReason {
    /// Advance pressed; the playlist has already moved forward.
    Advance,
    /// Back pressed; the playlist has already moved backward.
    Back,
    /// Select pressed; the display keeps the last shown frame.
    Select,
    /// The loop count ran out with no interruption.
    Exhausted,
    /// Nothing was loaded to play.
    NoResources,
}

/// Default poll granularity, well under the shortest expected frame.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 5;

/// The timed playback loop. Stateless between calls; all playback state
/// lives in the borrowed [`FrameSet`] and [`Playlist`].
#[derive(Debug, Clone, Copy)]
pub struct PlaybackEngine {
    poll_interval_ms: u64,
}

impl PlaybackEngine {
    /// Engine with the default poll interval.
    pub fn new() -> Self {
        Self::with_poll_interval(DEFAULT_POLL_INTERVAL_MS)
    }

    /// Engine with a custom poll interval (milliseconds, minimum 1).
    pub fn with_poll_interval(poll_interval_ms: u64) -> Self {
        PlaybackEngine {
            poll_interval_ms: poll_interval_ms.max(1),
        }
    }

    /// Play `set` until a button interrupts or the loop count runs out.
    ///
    /// Returns the [`InterruptReason`] plus a flag that is `true` only
    /// when the resource played out naturally — the caller auto-advances
    /// the playlist in that case and only that case. `None` for `set`
    /// reports [`InterruptReason::NoResources`] immediately.
    ///
    /// # Errors
    ///
    /// Propagates [`DisplayError`] from frame writes.
    pub fn play<D, I, C>(
        &self,
        set: Option<&FrameSet>,
        playlist: &mut Playlist,
        display: &mut D,
        input: &mut I,
        clock: &C,
    ) -> Result<(InterruptReason, bool), DisplayError>
    where
        D: DisplaySink,
        I: InputSource,
        C: Clock,
    {
        let set = match set {
            Some(set) => set,
            None => return Ok((InterruptReason::NoResources, false)),
        };

        // 0 passes means unbounded; otherwise count passes down.
        let mut remaining = set.loop_count();
        let unbounded = remaining == 0;

        loop {
            for frame in set.frames() {
                let start = clock.now_ms();
                display.write_frame(&frame.image)?;
                let deadline = start.saturating_add(u64::from(frame.duration_ms));

                loop {
                    // Input wins over a simultaneous natural expiry.
                    if input.is_pressed(Button::Advance) {
                        playlist.advance();
                        trace!("advance pressed");
                        return Ok((InterruptReason::Advance, false));
                    }
                    if input.is_pressed(Button::Back) {
                        playlist.back();
                        trace!("back pressed");
                        return Ok((InterruptReason::Back, false));
                    }
                    if input.is_pressed(Button::Select) {
                        trace!("select pressed");
                        return Ok((InterruptReason::Select, false));
                    }

                    let now = clock.now_ms();
                    if now >= deadline {
                        break;
                    }
                    // Never sleep past the deadline; a slow blit already
                    // ate into the wait via `start`.
                    clock.sleep_ms((deadline - now).min(self.poll_interval_ms));
                }
            }

            if !unbounded {
                remaining -= 1;
                if remaining == 0 {
                    return Ok((InterruptReason::Exhausted, true));
                }
            }
        }
    }
}

impl Default for PlaybackEngine {
    fn default() -> Self {
        Self::new()
    }
}
