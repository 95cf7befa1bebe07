//! Screen composition — menu, solid fills and the off screen.
//!
//! All helpers draw into any `DrawTarget<Color = Rgb888>`; the app draws
//! into a [`platform::FrameBuffer`](platform::FrameBuffer) and blits the
//! result as one frame. The menu keeps the device's established look:
//! green-yellow ground, black highlight box with a green outline, white
//! centered labels.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyleBuilder, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use rand::Rng;
use ui::{MenuCursor, MenuItem, MENU_ITEM_COUNT};

/// Menu background ("greenyellow").
pub const MENU_BACKGROUND: Rgb888 = Rgb888::new(173, 255, 47);
/// Menu label color.
pub const MENU_TEXT: Rgb888 = Rgb888::WHITE;

const HIGHLIGHT_FILL: Rgb888 = Rgb888::BLACK;
const HIGHLIGHT_OUTLINE: Rgb888 = Rgb888::new(0, 128, 0);
const BORDER: i32 = 2;

/// Draw the 4-item menu with the cursor's entry highlighted.
///
/// Item `i` sits at `(i + 1) * height / (items + 2)` — the top slot and a
/// bottom margin stay empty, as the device has always drawn it.
///
/// # Errors
///
/// Returns `D::Error` if any drawing operation fails.
pub fn menu<D>(target: &mut D, cursor: MenuCursor) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    target.clear(MENU_BACKGROUND)?;

    let size = target.bounding_box().size;
    let width = size.width as i32;
    let height = size.height as i32;
    let font_height = FONT_6X10.character_size.height as i32;
    let slots = (MENU_ITEM_COUNT + 2) as i32;

    let label_style = MonoTextStyle::new(&FONT_6X10, MENU_TEXT);
    let centered = TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Middle)
        .build();

    for (i, item) in MenuItem::ALL.iter().enumerate() {
        let slot_y = (i as i32 + 1) * height / slots;

        if i == cursor.selected() {
            Rectangle::with_corners(
                Point::new(BORDER, slot_y - font_height - BORDER),
                Point::new(width - BORDER - 1, slot_y + font_height + BORDER),
            )
            .into_styled(
                PrimitiveStyleBuilder::new()
                    .fill_color(HIGHLIGHT_FILL)
                    .stroke_color(HIGHLIGHT_OUTLINE)
                    .stroke_width(1)
                    .build(),
            )
            .draw(target)?;
        }

        Text::with_text_style(
            item.label(),
            Point::new(width / 2, slot_y),
            label_style,
            centered,
        )
        .draw(target)?;
    }

    Ok(())
}

/// Fill the whole target with one color.
///
/// # Errors
///
/// Returns `D::Error` if the fill fails.
pub fn solid<D>(target: &mut D, color: Rgb888) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    target.clear(color)
}

/// One pseudo-random RGB color for the color-display mode.
pub fn random_color() -> Rgb888 {
    let mut rng = rand::thread_rng();
    Rgb888::new(rng.gen(), rng.gen(), rng.gen())
}
