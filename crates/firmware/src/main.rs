//! Marquee — pocket GIF player entry point.
//!
//! Wires the hardware (or simulator) peripherals to the player core:
//! parse CLI, load config, bring up the panel and buttons, show the boot
//! splash, discover the playlist and hand everything to [`player::App`].

mod assets;
mod clock;
mod config;
mod display;
mod host;
mod input;

use std::path::PathBuf;

#[cfg(feature = "hardware")]
use anyhow::Context;
use clap::Parser;
use frames::FrameStore;
use platform::{Clock, DisplaySink, InputSource};
use player::App;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::clock::SystemClock;
use crate::config::Config;
use crate::host::SystemHost;

/// Pocket GIF player for ST7735-class handhelds.
#[derive(Debug, Parser)]
#[command(name = "marquee", version, about)]
struct Cli {
    /// Path to the JSON config file.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Folder of animated GIFs (overrides the config file).
    #[arg(long, value_name = "DIR")]
    media_dir: Option<PathBuf>,

    /// Drive an SDL window instead of the panel.
    #[cfg(feature = "simulator")]
    #[arg(long)]
    simulator: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = try_main() {
        error!("{err:#}");
        std::process::exit(1);
    }
}

fn try_main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(dir) = cli.media_dir {
        config.media_dir = dir;
    }
    info!(media_dir = %config.media_dir.display(), "marquee starting");

    #[cfg(feature = "simulator")]
    if cli.simulator {
        let (sink, buttons) = display::SimulatorBoard::create(&config.display);
        return run_player(sink, buttons, &config);
    }

    #[cfg(feature = "hardware")]
    {
        let sink = display::St7735Display::open(&config.display).context("bringing up display")?;
        let buttons = input::GpioInput::open(&config.buttons).context("bringing up buttons")?;
        return run_player(sink, buttons, &config);
    }

    #[cfg(not(feature = "hardware"))]
    anyhow::bail!(
        "this build has no panel backend; rebuild with --features hardware \
         or pass --simulator on a simulator build"
    );
}

fn run_player<D, I>(mut sink: D, mut buttons: I, config: &Config) -> anyhow::Result<()>
where
    D: DisplaySink,
    I: InputSource,
{
    let clock = SystemClock::new();
    let mut host = SystemHost::new();
    let size = sink.size();

    if let Some(path) = &config.assets.boot_image {
        match assets::load_splash(path, size) {
            Ok(frame) => {
                sink.write_frame(&frame)?;
                clock.sleep_ms(config.timing.boot_splash_ms);
            }
            Err(err) => warn!(error = %err, "boot splash unavailable"),
        }
    }

    // Fatal when nothing qualifies: the player has nothing to show.
    let list = playlist::discover(&config.media_dir)?;
    info!(count = list.len(), "playlist ready");

    let store = FrameStore::new(size.width, size.height);
    let mut app = App::new(store, list, config.player_config());
    if let Some(path) = &config.assets.off_image {
        match assets::load_splash(path, size) {
            Ok(frame) => app = app.with_off_frame(frame),
            Err(err) => warn!(error = %err, "off image unavailable"),
        }
    }

    app.run(&mut sink, &mut buttons, &clock, &mut host)?;
    info!("marquee stopped");
    Ok(())
}
