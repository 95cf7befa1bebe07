//! The root control loop.
//!
//! One cooperative loop owns the whole device: it dispatches on the
//! current [`Mode`], runs the playback engine or one menu/color tick, and
//! feeds the outcome back into the state machine. Every collaborator is
//! passed in explicitly through the platform traits — no globals, no
//! hidden state.

use frames::{FrameSet, FrameStore};
use platform::{
    Button, Clock, DisplayError, DisplaySink, FrameBuffer, HostControl, HostError, InputSource,
};
use playlist::Playlist;
use tracing::{info, warn};
use ui::{ColorResult, Event, MenuInput, Mode, PlaybackResult, StateMachine};

use crate::engine::{InterruptReason, PlaybackEngine, DEFAULT_POLL_INTERVAL_MS};
use crate::render;

/// Tunable timings for the control loop.
#[derive(Debug, Clone, Copy)]
pub struct PlayerConfig {
    /// Poll granularity for every timed wait, in milliseconds.
    pub poll_interval_ms: u64,
    /// Menu idle time after which the player exits, in milliseconds.
    pub menu_idle_timeout_ms: u64,
    /// How long a solid color stays up before playback resumes, in
    /// milliseconds.
    pub color_dwell_ms: u64,
    /// Pause between showing the off screen and issuing the host restart,
    /// in milliseconds — lets the final blit settle on the bus.
    pub restart_settle_ms: u64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            menu_idle_timeout_ms: ui::machine::DEFAULT_IDLE_TIMEOUT_MS,
            color_dwell_ms: 10_000,
            restart_settle_ms: 1_000,
        }
    }
}

/// Errors that end the control loop.
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    /// A frame write failed.
    #[error("display write failed")]
    Display(#[from] DisplayError),
    /// The host restart could not be issued.
    #[error("host restart failed")]
    Host(#[from] HostError),
    /// Every playlist entry failed to load — nothing is playable.
    #[error("all {count} playlist entries failed to load")]
    NoPlayableResources {
        /// Size of the playlist that was cycled through.
        count: usize,
    },
}

/// The assembled player: state machine, engine, frame store and playlist.
pub struct App {
    machine: StateMachine,
    engine: PlaybackEngine,
    store: FrameStore,
    playlist: Playlist,
    config: PlayerConfig,
    off_frame: Option<FrameBuffer>,
}

impl App {
    /// Assemble a player over an already-discovered playlist.
    pub fn new(store: FrameStore, playlist: Playlist, config: PlayerConfig) -> Self {
        App {
            machine: StateMachine::with_idle_timeout(config.menu_idle_timeout_ms),
            engine: PlaybackEngine::with_poll_interval(config.poll_interval_ms),
            store,
            playlist,
            config,
            off_frame: None,
        }
    }

    /// Use `frame` as the final "off" screen instead of solid black.
    pub fn with_off_frame(mut self, frame: FrameBuffer) -> Self {
        self.off_frame = Some(frame);
        self
    }

    /// Run the loop until Exit or Restarting completes.
    ///
    /// # Errors
    ///
    /// Returns [`PlayerError`] on display failure, host-restart failure,
    /// or when no playlist entry can be loaded at all.
    pub fn run<D, I, C, H>(
        mut self,
        display: &mut D,
        input: &mut I,
        clock: &C,
        host: &mut H,
    ) -> Result<(), PlayerError>
    where
        D: DisplaySink,
        I: InputSource,
        C: Clock,
        H: HostControl,
    {
        let mut last_interaction = clock.now_ms();

        loop {
            match self.machine.mode() {
                Mode::Playing => {
                    let set = self.load_current()?;
                    let (reason, exhausted) = self.engine.play(
                        Some(&set),
                        &mut self.playlist,
                        display,
                        input,
                        clock,
                    )?;
                    if exhausted {
                        // Natural exhaustion is the one case the engine
                        // leaves the playlist untouched.
                        self.playlist.advance();
                    }
                    self.machine.apply(Event::Playback(playback_result(reason)));
                    last_interaction = clock.now_ms();
                    info!(mode = mode_name(self.machine.mode()), "playback returned");
                }

                Mode::MenuShown => {
                    let mut frame = self.blank_frame(display);
                    render::menu(&mut frame, self.machine.cursor()).ok();
                    display.write_frame(&frame)?;

                    // Sample after one poll interval so a press carried
                    // over from the previous mode has room to release.
                    clock.sleep_ms(self.config.poll_interval_ms);
                    let menu_input = if input.is_pressed(Button::MenuDown) {
                        MenuInput::Down
                    } else if input.is_pressed(Button::MenuUp) {
                        MenuInput::Up
                    } else if input.is_pressed(Button::Select) {
                        MenuInput::Select
                    } else {
                        MenuInput::Idle
                    };
                    let now = clock.now_ms();
                    let idle_ms = now.saturating_sub(last_interaction);
                    if menu_input != MenuInput::Idle {
                        last_interaction = now;
                    }
                    self.machine.apply(Event::Menu {
                        input: menu_input,
                        idle_ms,
                    });
                }

                Mode::ColorDisplay => {
                    let color = render::random_color();
                    let mut frame = self.blank_frame(display);
                    render::solid(&mut frame, color).ok();
                    display.write_frame(&frame)?;

                    let started = clock.now_ms();
                    let result = loop {
                        clock.sleep_ms(self.config.poll_interval_ms);
                        if input.is_pressed(Button::Select) {
                            break ColorResult::SelectPressed;
                        }
                        if clock.now_ms().saturating_sub(started) >= self.config.color_dwell_ms {
                            break ColorResult::DwellElapsed;
                        }
                    };
                    self.machine.apply(Event::Color(result));
                    last_interaction = clock.now_ms();
                }

                Mode::Restarting => {
                    info!("restarting host");
                    self.show_off_frame(display)?;
                    clock.sleep_ms(self.config.restart_settle_ms);
                    host.restart()?;
                    return Ok(());
                }

                Mode::Exit => {
                    info!("exiting");
                    self.show_off_frame(display)?;
                    return Ok(());
                }
            }
        }
    }

    /// Load the current playlist entry, skipping forward past entries
    /// that fail. A full cycle of failures is fatal.
    fn load_current(&mut self) -> Result<FrameSet, PlayerError> {
        let mut attempts = self.playlist.len();
        loop {
            let path = self.playlist.current().path.clone();
            match self.store.load(&path) {
                Ok(set) => return Ok(set),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping unplayable resource");
                    attempts -= 1;
                    if attempts == 0 {
                        return Err(PlayerError::NoPlayableResources {
                            count: self.playlist.len(),
                        });
                    }
                    self.playlist.advance();
                }
            }
        }
    }

    fn blank_frame<D: DisplaySink>(&self, display: &D) -> FrameBuffer {
        let size = display.size();
        FrameBuffer::new(size.width, size.height)
    }

    fn show_off_frame<D: DisplaySink>(&self, display: &mut D) -> Result<(), DisplayError> {
        let frame = match &self.off_frame {
            Some(frame) => frame.clone(),
            None => self.blank_frame(display),
        };
        display.write_frame(&frame)
    }
}

fn playback_result(reason: InterruptReason) -> PlaybackResult {
    match reason {
        InterruptReason::Advance => PlaybackResult::Advanced,
        InterruptReason::Back => PlaybackResult::WentBack,
        InterruptReason::Select => PlaybackResult::MenuRequested,
        InterruptReason::Exhausted => PlaybackResult::Finished,
        InterruptReason::NoResources => PlaybackResult::NoMedia,
    }
}

fn mode_name(mode: Mode) -> &'static str {
    match mode {
        Mode::Playing => "playing",
        Mode::MenuShown => "menu",
        Mode::ColorDisplay => "colors",
        Mode::Restarting => "restarting",
        Mode::Exit => "exit",
    }
}
