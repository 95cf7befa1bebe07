//! Host machine control.
//!
//! A single privileged operation: restart the device the player runs on.
//! Invoked from the Restarting state; the process has already committed to
//! terminating when this is called.

/// The one privileged host operation the player may perform.
pub trait HostControl {
    /// Trigger a host restart. On success the process will be torn down by
    /// the host shortly after this returns.
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] when the restart could not be issued.
    fn restart(&mut self) -> Result<(), HostError>;
}

/// Host control errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostError {
    /// The restart command could not be spawned or reported failure.
    CommandFailed,
}

#[cfg(feature = "std")]
impl std::error::Error for HostError {}

impl core::fmt::Display for HostError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::CommandFailed => write!(f, "host restart command failed"),
        }
    }
}
