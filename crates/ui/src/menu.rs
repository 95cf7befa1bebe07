//! Menu model — the fixed 4-item list and its wraparound cursor.

/// Number of menu entries. The menu is fixed; there is no scrolling.
pub const MENU_ITEM_COUNT: usize = 4;

/// The four menu entries, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    /// Resume GIF playback.
    Gifs,
    /// Switch to the solid-color display.
    Colors,
    /// Restart the host machine.
    Restart,
    /// Quit the player.
    Close,
}

impl MenuItem {
    /// All entries in display order.
    pub const ALL: [MenuItem; MENU_ITEM_COUNT] = [
        MenuItem::Gifs,
        MenuItem::Colors,
        MenuItem::Restart,
        MenuItem::Close,
    ];

    /// On-screen label.
    pub fn label(self) -> &'static str {
        match self {
            MenuItem::Gifs => "GIFs",
            MenuItem::Colors => "COLORS",
            MenuItem::Restart => "RESTART",
            MenuItem::Close => "CLOSE",
        }
    }
}

/// Cursor over the menu entries with modular wraparound.
///
/// The selection survives leaving and re-entering the menu; it is only
/// moved by explicit up/down events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuCursor {
    selected: usize,
}

impl MenuCursor {
    /// Cursor starting on the first entry.
    pub const fn new() -> Self {
        MenuCursor { selected: 0 }
    }

    /// Index of the highlighted entry, always in `[0, MENU_ITEM_COUNT)`.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// The highlighted entry.
    pub fn item(&self) -> MenuItem {
        MenuItem::ALL[self.selected % MENU_ITEM_COUNT]
    }

    /// Move the highlight down one entry, wrapping past the last.
    pub fn down(&mut self) {
        self.selected = (self.selected + 1) % MENU_ITEM_COUNT;
    }

    /// Move the highlight up one entry, wrapping past the first.
    pub fn up(&mut self) {
        self.selected = (self.selected + MENU_ITEM_COUNT - 1) % MENU_ITEM_COUNT;
    }
}

impl Default for MenuCursor {
    fn default() -> Self {
        Self::new()
    }
}
