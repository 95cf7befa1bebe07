//! Desktop simulator — an SDL window standing in for the panel.
//!
//! Arrow keys map to the advance/back/up/down buttons, Return (or Space)
//! to select. Closing the window ends the process. Display and input
//! share one window, so the two halves hand out [`Rc`] views of it.

use std::cell::RefCell;
use std::rc::Rc;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window,
};
use platform::{Button, DisplayError, DisplaySink, FrameBuffer, InputSource};
use tracing::info;

use crate::config::DisplayConfig;

#[derive(Default)]
struct HeldButtons {
    advance: bool,
    back: bool,
    select: bool,
    menu_up: bool,
    menu_down: bool,
}

struct Shared {
    display: SimulatorDisplay<Rgb888>,
    window: Window,
    held: HeldButtons,
    // Window::events panics before the first update; gate on it.
    updated: bool,
}

impl Shared {
    fn pump_events(&mut self) {
        if !self.updated {
            return;
        }
        let events: Vec<SimulatorEvent> = self.window.events().collect();
        for event in events {
            match event {
                SimulatorEvent::Quit => {
                    info!("simulator window closed");
                    std::process::exit(0);
                }
                SimulatorEvent::KeyDown { keycode, .. } => self.set_key(keycode, true),
                SimulatorEvent::KeyUp { keycode, .. } => self.set_key(keycode, false),
                _ => {}
            }
        }
    }

    fn set_key(&mut self, keycode: Keycode, held: bool) {
        match keycode {
            Keycode::Right => self.held.advance = held,
            Keycode::Left => self.held.back = held,
            Keycode::Return | Keycode::Space => self.held.select = held,
            Keycode::Up => self.held.menu_up = held,
            Keycode::Down => self.held.menu_down = held,
            _ => {}
        }
    }
}

/// Factory for the paired simulator display and input.
pub struct SimulatorBoard;

impl SimulatorBoard {
    /// Open the window and hand back its two faces.
    pub fn create(config: &DisplayConfig) -> (SimulatorSink, SimulatorInput) {
        let (width, height) = config.normalized_size();
        let display = SimulatorDisplay::<Rgb888>::new(Size::new(width, height));
        let settings = OutputSettingsBuilder::new().scale(3).build();
        let window = Window::new("Marquee", &settings);
        let shared = Rc::new(RefCell::new(Shared {
            display,
            window,
            held: HeldButtons::default(),
            updated: false,
        }));
        (
            SimulatorSink {
                shared: Rc::clone(&shared),
                width,
                height,
            },
            SimulatorInput { shared },
        )
    }
}

/// The window as a [`DisplaySink`].
pub struct SimulatorSink {
    shared: Rc<RefCell<Shared>>,
    width: u32,
    height: u32,
}

impl DisplaySink for SimulatorSink {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    fn write_frame(&mut self, frame: &FrameBuffer) -> Result<(), DisplayError> {
        if frame.width() != self.width || frame.height() != self.height {
            return Err(DisplayError::Geometry);
        }
        let mut shared = self.shared.borrow_mut();
        let shared = &mut *shared;
        let area = Rectangle::new(Point::zero(), Size::new(self.width, self.height));
        shared
            .display
            .fill_contiguous(&area, frame.pixels())
            .map_err(|_| DisplayError::Communication)?;
        shared.window.update(&shared.display);
        shared.updated = true;
        shared.pump_events();
        Ok(())
    }
}

/// The window's keyboard as an [`InputSource`].
pub struct SimulatorInput {
    shared: Rc<RefCell<Shared>>,
}

impl InputSource for SimulatorInput {
    fn is_pressed(&mut self, button: Button) -> bool {
        let mut shared = self.shared.borrow_mut();
        shared.pump_events();
        match button {
            Button::Advance => shared.held.advance,
            Button::Back => shared.held.back,
            Button::Select => shared.held.select,
            Button::MenuUp => shared.held.menu_up,
            Button::MenuDown => shared.held.menu_down,
        }
    }
}
