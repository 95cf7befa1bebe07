//! Mode and menu state machines — the player's control brain.
//!
//! Pure, `no_std`, allocation-free. Nothing here touches a display, a
//! button line or a clock: callers feed in events (with any elapsed-time
//! measurements already taken) and read back the next [`Mode`]. That keeps
//! every transition — including the idle-timeout edge — trivially testable
//! on the host.
//!
//! # Modules
//!
//! - [`mode`] — the closed [`Mode`] enum
//! - [`menu`] — fixed 4-item menu model and wraparound cursor
//! - [`machine`] — the total `(state, event) -> state` transition function

#![cfg_attr(not(test), no_std)]

pub mod machine;
pub mod menu;
pub mod mode;

// Top-level re-exports for convenience
pub use machine::{ColorResult, Event, MenuInput, PlaybackResult, StateMachine};
pub use menu::{MenuCursor, MenuItem, MENU_ITEM_COUNT};
pub use mode::Mode;
