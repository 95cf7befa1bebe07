//! Mock implementations for testing.
//!
//! Host-side doubles for every platform trait so the whole control loop —
//! playback pacing included — runs deterministically under `cargo test`.
//! [`FakeClock`] advances simulated time on every sleep, and
//! [`TimedInput`] schedules button presses against that same simulated
//! timeline.

#![cfg(any(test, feature = "std"))]

use std::cell::Cell;
use std::rc::Rc;

use embedded_graphics::prelude::*;

use crate::{Button, Clock, DisplayError, DisplaySink, FrameBuffer, HostControl, HostError, InputSource};

/// Mock display that records every frame written to it.
pub struct MockDisplay {
    width: u32,
    height: u32,
    frames: Vec<FrameBuffer>,
}

impl MockDisplay {
    /// Create a mock panel of the given geometry.
    pub fn new(width: u32, height: u32) -> Self {
        MockDisplay {
            width,
            height,
            frames: Vec::new(),
        }
    }

    /// Number of frames written so far.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// The most recently written frame, if any.
    pub fn last_frame(&self) -> Option<&FrameBuffer> {
        self.frames.last()
    }

    /// All frames written, in order.
    pub fn frames(&self) -> &[FrameBuffer] {
        &self.frames
    }
}

impl DisplaySink for MockDisplay {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    fn write_frame(&mut self, frame: &FrameBuffer) -> Result<(), DisplayError> {
        if frame.width() != self.width || frame.height() != self.height {
            return Err(DisplayError::Geometry);
        }
        self.frames.push(frame.clone());
        Ok(())
    }
}

/// Simulated monotonic clock. `sleep_ms` advances time instead of blocking,
/// so timed loops run at test speed while observing real elapsed-ms logic.
#[derive(Clone)]
pub struct FakeClock {
    now: Rc<Cell<u64>>,
}

impl FakeClock {
    /// Create a clock starting at t = 0 ms.
    pub fn new() -> Self {
        FakeClock {
            now: Rc::new(Cell::new(0)),
        }
    }

    /// Move simulated time forward without sleeping.
    pub fn advance_ms(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }

    /// Handle on the simulated timeline, shared with [`TimedInput`].
    pub(crate) fn shared_now(&self) -> Rc<Cell<u64>> {
        Rc::clone(&self.now)
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }

    fn sleep_ms(&self, ms: u64) {
        self.advance_ms(ms);
    }
}

/// One scheduled press window on the simulated timeline.
struct PressWindow {
    button: Button,
    from_ms: u64,
    until_ms: u64,
}

/// Input source whose presses are scheduled against a [`FakeClock`].
///
/// A button reads as pressed whenever the simulated time falls inside one
/// of its scheduled windows — exactly how a held physical button looks to
/// a polling loop.
pub struct TimedInput {
    now: Rc<Cell<u64>>,
    windows: Vec<PressWindow>,
}

impl TimedInput {
    /// Create an input source with no presses scheduled.
    pub fn new(clock: &FakeClock) -> Self {
        TimedInput {
            now: clock.shared_now(),
            windows: Vec::new(),
        }
    }

    /// Schedule `button` to read as held during `[from_ms, until_ms)`.
    pub fn press_between(&mut self, button: Button, from_ms: u64, until_ms: u64) {
        self.windows.push(PressWindow {
            button,
            from_ms,
            until_ms,
        });
    }

    /// Schedule `button` to read as held from `from_ms` onwards.
    pub fn press_from(&mut self, button: Button, from_ms: u64) {
        self.press_between(button, from_ms, u64::MAX);
    }
}

impl InputSource for TimedInput {
    fn is_pressed(&mut self, button: Button) -> bool {
        let now = self.now.get();
        self.windows
            .iter()
            .any(|w| w.button == button && w.from_ms <= now && now < w.until_ms)
    }
}

/// Input source that never reports a press.
pub struct NullInput;

impl InputSource for NullInput {
    fn is_pressed(&mut self, _button: Button) -> bool {
        false
    }
}

/// Mock host control that counts restart requests.
pub struct MockHost {
    restarts: usize,
    fail: bool,
}

impl MockHost {
    /// Create a host whose restarts succeed.
    pub fn new() -> Self {
        MockHost {
            restarts: 0,
            fail: false,
        }
    }

    /// Create a host whose restarts fail.
    pub fn failing() -> Self {
        MockHost {
            restarts: 0,
            fail: true,
        }
    }

    /// Number of restart requests received.
    pub fn restarts(&self) -> usize {
        self.restarts
    }
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostControl for MockHost {
    fn restart(&mut self) -> Result<(), HostError> {
        self.restarts += 1;
        if self.fail {
            Err(HostError::CommandFailed)
        } else {
            Ok(())
        }
    }
}
