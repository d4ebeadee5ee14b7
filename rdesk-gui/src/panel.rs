//! Toolbar overlay: user intents and placement.

use rdesk_core::{KeySequence, Point};
use tracing::trace;

use crate::ports::Panel;

/// Something the user asked for from the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelIntent {
    /// Open the session settings dialog.
    OpenSettings,
    /// `true` to enter fullscreen, `false` to leave it.
    Fullscreen(bool),
    /// Fit the window to the remote frame.
    Autosize,
    /// Send a shortcut such as Ctrl+Alt+Del.
    KeySequence(KeySequence),
}

/// Top-centre origin for a panel of `panel_width` in a window of `window_width`.
pub fn panel_origin(window_width: i32, panel_width: i32) -> Point {
    Point::new(window_width / 2 - panel_width / 2, 0)
}

/// Panel without its own widget: tracks where the overlay should be.
#[derive(Debug, Clone)]
pub struct OverlayPanel {
    width: i32,
    origin: Point,
    refreshes: u64,
}

impl OverlayPanel {
    pub fn new(width: i32) -> Self {
        Self {
            width,
            origin: Point::default(),
            refreshes: 0,
        }
    }
}

impl Panel for OverlayPanel {
    fn width(&self) -> i32 {
        self.width
    }

    fn move_to(&mut self, origin: Point) {
        self.origin = origin;
        trace!(origin = ?self.origin, "panel moved");
    }

    fn refresh(&mut self) {
        self.refreshes += 1;
        trace!(count = self.refreshes, "panel refresh");
    }
}
