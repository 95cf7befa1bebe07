//! The total transition function over [`Mode`].
//!
//! Every `(state, event)` pair has a defined successor. Pairs that cannot
//! occur in a well-behaved loop (a menu event while playing, say) fall
//! through to [`Mode::Exit`] — the loop would rather stop than run with a
//! confused driver.

use crate::menu::{MenuCursor, MenuItem};
use crate::mode::Mode;

/// How a playback call ended. Mirrors the playback engine's interrupt
/// reasons without depending on it; the caller maps one onto the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackResult {
    /// The advance button skipped forward; the playlist already moved.
    Advanced,
    /// The back button skipped backward; the playlist already moved.
    WentBack,
    /// The resource played out its loop count; caller auto-advances.
    Finished,
    /// Select was pressed during playback.
    MenuRequested,
    /// There was nothing to play.
    NoMedia,
}

/// One menu poll: at most one button, plus the idle measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuInput {
    /// Move the highlight up.
    Up,
    /// Move the highlight down.
    Down,
    /// Confirm the highlighted entry.
    Select,
    /// No button held this poll.
    Idle,
}

/// How a color-display dwell ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorResult {
    /// Select was pressed inside the dwell window.
    SelectPressed,
    /// The dwell window ran out.
    DwellElapsed,
}

/// An event fed into [`StateMachine::apply`], one per root-loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Playback returned (valid while `Playing`).
    Playback(PlaybackResult),
    /// A menu poll completed (valid while `MenuShown`). `idle_ms` is the
    /// time since the last interaction, measured by the caller.
    Menu {
        /// Button seen this poll, if any.
        input: MenuInput,
        /// Milliseconds since the last interaction.
        idle_ms: u64,
    },
    /// The color display ended its dwell (valid while `ColorDisplay`).
    Color(ColorResult),
}

/// Idle time in the menu after which the player exits, in milliseconds.
pub const DEFAULT_IDLE_TIMEOUT_MS: u64 = 15_000;

/// The player's mode state: current [`Mode`] plus the menu cursor.
///
/// There is no hidden state anywhere else — given the current mode, the
/// last event and the idle measurement, the next mode is fully determined.
#[derive(Debug, Clone)]
pub struct StateMachine {
    mode: Mode,
    cursor: MenuCursor,
    idle_timeout_ms: u64,
}

impl StateMachine {
    /// Start in [`Mode::Playing`] with the default idle timeout.
    pub fn new() -> Self {
        Self::with_idle_timeout(DEFAULT_IDLE_TIMEOUT_MS)
    }

    /// Start in [`Mode::Playing`] with a custom menu idle timeout.
    pub fn with_idle_timeout(idle_timeout_ms: u64) -> Self {
        StateMachine {
            mode: Mode::Playing,
            cursor: MenuCursor::new(),
            idle_timeout_ms,
        }
    }

    /// The active mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The menu cursor (persists across menu visits).
    pub fn cursor(&self) -> MenuCursor {
        self.cursor
    }

    /// Apply one event and return the new mode.
    ///
    /// Total over `(Mode, Event)`: terminal modes absorb every event, and
    /// any event arriving in a mode it does not belong to exits the loop.
    pub fn apply(&mut self, event: Event) -> Mode {
        self.mode = match (self.mode, event) {
            (Mode::Playing, Event::Playback(result)) => match result {
                PlaybackResult::Advanced
                | PlaybackResult::WentBack
                | PlaybackResult::Finished => Mode::Playing,
                PlaybackResult::MenuRequested => Mode::MenuShown,
                PlaybackResult::NoMedia => Mode::Exit,
            },

            (Mode::MenuShown, Event::Menu { input, idle_ms }) => match input {
                MenuInput::Up => {
                    self.cursor.up();
                    Mode::MenuShown
                }
                MenuInput::Down => {
                    self.cursor.down();
                    Mode::MenuShown
                }
                MenuInput::Select => match self.cursor.item() {
                    MenuItem::Gifs => Mode::Playing,
                    MenuItem::Colors => Mode::ColorDisplay,
                    MenuItem::Restart => Mode::Restarting,
                    MenuItem::Close => Mode::Exit,
                },
                MenuInput::Idle => {
                    if idle_ms >= self.idle_timeout_ms {
                        Mode::Exit
                    } else {
                        Mode::MenuShown
                    }
                }
            },

            (Mode::ColorDisplay, Event::Color(ColorResult::SelectPressed)) => Mode::MenuShown,
            (Mode::ColorDisplay, Event::Color(ColorResult::DwellElapsed)) => Mode::Playing,

            // Terminal modes absorb everything.
            (Mode::Restarting, _) => Mode::Restarting,
            (Mode::Exit, _) => Mode::Exit,

            // Fallback: an event in a mode it does not belong to ends the loop.
            (_, _) => Mode::Exit,
        };
        self.mode
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu_machine() -> StateMachine {
        let mut sm = StateMachine::new();
        sm.apply(Event::Playback(PlaybackResult::MenuRequested));
        assert_eq!(sm.mode(), Mode::MenuShown);
        sm
    }

    fn idle(ms: u64) -> Event {
        Event::Menu {
            input: MenuInput::Idle,
            idle_ms: ms,
        }
    }

    fn press(input: MenuInput) -> Event {
        Event::Menu { input, idle_ms: 0 }
    }

    #[test]
    fn test_playback_interruptions_stay_playing() {
        for result in [
            PlaybackResult::Advanced,
            PlaybackResult::WentBack,
            PlaybackResult::Finished,
        ] {
            let mut sm = StateMachine::new();
            assert_eq!(sm.apply(Event::Playback(result)), Mode::Playing);
        }
    }

    #[test]
    fn test_select_during_playback_opens_menu() {
        let mut sm = StateMachine::new();
        assert_eq!(
            sm.apply(Event::Playback(PlaybackResult::MenuRequested)),
            Mode::MenuShown
        );
    }

    #[test]
    fn test_no_media_exits() {
        let mut sm = StateMachine::new();
        assert_eq!(sm.apply(Event::Playback(PlaybackResult::NoMedia)), Mode::Exit);
    }

    #[test]
    fn test_menu_down_cycles_through_all_items() {
        let mut sm = menu_machine();
        let mut indices = [0usize; 4];
        indices[0] = sm.cursor().selected();
        for slot in indices.iter_mut().skip(1) {
            sm.apply(press(MenuInput::Down));
            *slot = sm.cursor().selected();
        }
        assert_eq!(indices, [0, 1, 2, 3]);
        // Fourth Down wraps back to the top.
        sm.apply(press(MenuInput::Down));
        assert_eq!(sm.cursor().selected(), 0);
    }

    #[test]
    fn test_menu_up_wraps_from_top() {
        let mut sm = menu_machine();
        sm.apply(press(MenuInput::Up));
        assert_eq!(sm.cursor().selected(), 3);
        sm.apply(press(MenuInput::Up));
        assert_eq!(sm.cursor().selected(), 2);
        sm.apply(press(MenuInput::Up));
        assert_eq!(sm.cursor().selected(), 1);
    }

    #[test]
    fn test_menu_select_dispatches_by_item() {
        // Item 0: GIFs -> Playing.
        let mut sm = menu_machine();
        assert_eq!(sm.apply(press(MenuInput::Select)), Mode::Playing);

        // Item 1: COLORS -> ColorDisplay.
        let mut sm = menu_machine();
        sm.apply(press(MenuInput::Down));
        assert_eq!(sm.apply(press(MenuInput::Select)), Mode::ColorDisplay);

        // Item 2: RESTART -> Restarting.
        let mut sm = menu_machine();
        sm.apply(press(MenuInput::Down));
        sm.apply(press(MenuInput::Down));
        assert_eq!(sm.apply(press(MenuInput::Select)), Mode::Restarting);

        // Item 3: CLOSE -> Exit.
        let mut sm = menu_machine();
        sm.apply(press(MenuInput::Up));
        assert_eq!(sm.apply(press(MenuInput::Select)), Mode::Exit);
    }

    #[test]
    fn test_menu_idle_at_threshold_exits() {
        let mut sm = menu_machine();
        assert_eq!(sm.apply(idle(DEFAULT_IDLE_TIMEOUT_MS)), Mode::Exit);
    }

    #[test]
    fn test_menu_idle_below_threshold_stays() {
        let mut sm = menu_machine();
        assert_eq!(sm.apply(idle(DEFAULT_IDLE_TIMEOUT_MS - 1)), Mode::MenuShown);
    }

    #[test]
    fn test_custom_idle_timeout_respected() {
        let mut sm = StateMachine::with_idle_timeout(1_000);
        sm.apply(Event::Playback(PlaybackResult::MenuRequested));
        assert_eq!(sm.apply(idle(999)), Mode::MenuShown);
        assert_eq!(sm.apply(idle(1_000)), Mode::Exit);
    }

    #[test]
    fn test_color_display_select_returns_to_menu() {
        let mut sm = menu_machine();
        sm.apply(press(MenuInput::Down));
        sm.apply(press(MenuInput::Select));
        assert_eq!(sm.mode(), Mode::ColorDisplay);
        assert_eq!(sm.apply(Event::Color(ColorResult::SelectPressed)), Mode::MenuShown);
    }

    #[test]
    fn test_color_display_timeout_resumes_playback() {
        let mut sm = menu_machine();
        sm.apply(press(MenuInput::Down));
        sm.apply(press(MenuInput::Select));
        assert_eq!(sm.apply(Event::Color(ColorResult::DwellElapsed)), Mode::Playing);
    }

    #[test]
    fn test_terminal_modes_absorb_events() {
        let mut sm = menu_machine();
        sm.apply(press(MenuInput::Up)); // CLOSE
        sm.apply(press(MenuInput::Select));
        assert_eq!(sm.mode(), Mode::Exit);
        assert_eq!(sm.apply(idle(0)), Mode::Exit);
        assert_eq!(
            sm.apply(Event::Playback(PlaybackResult::Advanced)),
            Mode::Exit
        );
    }

    #[test]
    fn test_mismatched_event_falls_back_to_exit() {
        // A menu event while playing is a driver bug; the machine exits.
        let mut sm = StateMachine::new();
        assert_eq!(sm.apply(idle(0)), Mode::Exit);

        let mut sm = menu_machine();
        assert_eq!(
            sm.apply(Event::Playback(PlaybackResult::Advanced)),
            Mode::Exit
        );
    }

    #[test]
    fn test_cursor_persists_across_menu_visits() {
        let mut sm = menu_machine();
        sm.apply(press(MenuInput::Down));
        assert_eq!(sm.cursor().selected(), 1);
        // Leave via COLORS, come back via select-press.
        sm.apply(press(MenuInput::Select));
        assert_eq!(sm.mode(), Mode::ColorDisplay);
        sm.apply(Event::Color(ColorResult::SelectPressed));
        assert_eq!(sm.mode(), Mode::MenuShown);
        assert_eq!(sm.cursor().selected(), 1);
    }
}
