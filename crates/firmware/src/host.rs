//! Host restart.

use std::process::Command;

use platform::{HostControl, HostError};
use tracing::{error, info};

/// [`HostControl`] that reboots the machine via `sudo reboot now`.
pub struct SystemHost;

impl SystemHost {
    /// Create the host controller.
    pub fn new() -> Self {
        SystemHost
    }
}

impl Default for SystemHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostControl for SystemHost {
    fn restart(&mut self) -> Result<(), HostError> {
        info!("issuing host restart");
        match Command::new("sudo").args(["reboot", "now"]).status() {
            Ok(status) if status.success() => Ok(()),
            Ok(status) => {
                error!(code = status.code().unwrap_or(-1), "reboot command failed");
                Err(HostError::CommandFailed)
            }
            Err(err) => {
                error!(error = %err, "could not spawn reboot command");
                Err(HostError::CommandFailed)
            }
        }
    }
}
