//! Window-fit state machine: windowed, maximized, fullscreen.
//!
//! ```text
//!                 autosize (fits)            autosize (too big)
//!   Windowed ◄─────────────────────┐  ┌──────────────────────► Maximized
//!      │  ▲                        └──┘                          │  ▲
//!      │  └──── leave (flag clear) ── Fullscreen ── leave (flag set) ─┘
//!      └────────── enter ──────────►    ▲    ◄────── enter ──────┘
//! ```
//!
//! Maximized and Fullscreen are sticky: a new remote frame size does not
//! resize the window until the user leaves those modes.

use rdesk_core::{Point, Rect, Size};
use tracing::debug;

use crate::ports::GeometryPort;

/// Window geometry mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowMode {
    #[default]
    Windowed,
    Maximized,
    Fullscreen,
}

/// Where autosize wants the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Outer origin plus client size.
    Windowed(Rect),
    Maximized,
}

/// Compute the autosize placement for a frame on a screen work area.
///
/// The frame fits when frame plus decoration is strictly smaller than the
/// work area on both axes; the window is then centred by its outer size.
pub fn placement(frame: Size, decoration: Size, available: Rect) -> Placement {
    let outer = frame.grow(decoration);
    if outer.width < available.width && outer.height < available.height {
        let origin = Point::new(
            available.x + (available.width / 2 - outer.width / 2),
            available.y + (available.height / 2 - outer.height / 2),
        );
        Placement::Windowed(Rect::from_parts(origin, frame))
    } else {
        Placement::Maximized
    }
}

/// Current mode plus what to restore when fullscreen ends.
#[derive(Debug, Default)]
pub struct WindowFit {
    mode: WindowMode,
    /// Only meaningful while `mode == Fullscreen`.
    pre_fullscreen_was_maximized: bool,
    /// Where the normal window was when fullscreen began from Windowed.
    restore_rect: Option<Rect>,
}

impl WindowFit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> WindowMode {
        self.mode
    }

    /// Whether a frame-size change may resize the window.
    pub fn allows_autosize(&self) -> bool {
        self.mode == WindowMode::Windowed
    }

    /// Any → Fullscreen. No-op when already fullscreen.
    pub fn enter_fullscreen(&mut self, port: &mut dyn GeometryPort) {
        if self.mode == WindowMode::Fullscreen {
            return;
        }
        self.pre_fullscreen_was_maximized = self.mode == WindowMode::Maximized;
        self.restore_rect = match self.mode {
            WindowMode::Windowed => Some(port.normal_rect()),
            _ => None,
        };
        self.mode = WindowMode::Fullscreen;
        debug!(
            restore_maximized = self.pre_fullscreen_was_maximized,
            "entering fullscreen"
        );
        port.enter_fullscreen();
    }

    /// Fullscreen → the mode it was entered from. No-op otherwise.
    pub fn leave_fullscreen(&mut self, port: &mut dyn GeometryPort) {
        if self.mode != WindowMode::Fullscreen {
            return;
        }
        if std::mem::take(&mut self.pre_fullscreen_was_maximized) {
            self.mode = WindowMode::Maximized;
            port.enter_maximized();
        } else {
            self.mode = WindowMode::Windowed;
            let rect = self
                .restore_rect
                .take()
                .unwrap_or_else(|| port.normal_rect());
            port.enter_windowed(rect);
        }
        debug!(mode = ?self.mode, "left fullscreen");
    }

    /// Fit the window to `frame`, unless the current mode is sticky.
    ///
    /// Returns the placement applied, if any.
    pub fn autosize(&mut self, frame: Size, port: &mut dyn GeometryPort) -> Option<Placement> {
        if !self.allows_autosize() {
            return None;
        }
        Some(self.apply_fit(frame, port))
    }

    /// Explicit user request: release a sticky mode, then fit.
    pub fn autosize_now(&mut self, frame: Size, port: &mut dyn GeometryPort) -> Placement {
        self.pre_fullscreen_was_maximized = false;
        self.restore_rect = None;
        self.apply_fit(frame, port)
    }

    /// Record a mode change the window manager made on its own.
    pub fn sync(&mut self, mode: WindowMode) {
        if mode == self.mode {
            return;
        }
        self.pre_fullscreen_was_maximized =
            mode == WindowMode::Fullscreen && self.mode == WindowMode::Maximized;
        self.restore_rect = None;
        debug!(from = ?self.mode, to = ?mode, "window mode changed externally");
        self.mode = mode;
    }

    fn apply_fit(&mut self, frame: Size, port: &mut dyn GeometryPort) -> Placement {
        let fit = placement(frame, port.decoration(), port.available_area());
        match fit {
            Placement::Windowed(rect) => {
                self.mode = WindowMode::Windowed;
                port.enter_windowed(rect);
            }
            Placement::Maximized => {
                self.mode = WindowMode::Maximized;
                port.enter_maximized();
            }
        }
        debug!(?frame, placement = ?fit, "autosize");
        fit
    }
}

// ── Tests ────────────────────────────────────────────────────────
