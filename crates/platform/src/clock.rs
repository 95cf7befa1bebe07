//! Wall-clock abstraction.
//!
//! The control loop paces frames and dwell windows against monotonic
//! milliseconds. Putting the clock behind a trait lets the tests drive
//! playback timing deterministically with a fake.

/// Monotonic time source with a cooperative sleep.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin. Monotonic within one
    /// process run.
    fn now_ms(&self) -> u64;

    /// Block the (single) thread of control for roughly `ms` milliseconds.
    /// This is the poll granularity of every timed wait in the player.
    fn sleep_ms(&self, ms: u64);
}
