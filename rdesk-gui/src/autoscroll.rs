//! Edge auto-scroll for remote frames larger than the viewport.
//!
//! Pointer moves decide *whether* and *which way* to scroll; a fixed
//! 15 ms tick applies the step. The tick never looks at the pointer, so a
//! pointer parked near an edge keeps scrolling until it moves away.
//!
//! ```text
//!           pointer-move (step != 0)
//!   Idle ────────────────────────────► Scrolling ──┐ tick: position += step
//!    ▲                                     │  ▲    │       (clamped)
//!    └──── pointer-move (both steps 0) ────┘  └────┘
//! ```

use std::time::Duration;

use rdesk_core::{Point, Size};

/// Period of the scroll tick while scrolling.
pub const SCROLL_PERIOD: Duration = Duration::from_millis(15);

/// Distance from a viewport edge inside which auto-scroll kicks in.
pub const EDGE_MARGIN: i32 = 50;

/// Scrollbar units applied per tick.
pub const SCROLL_STEP: i32 = 10;

// ── Viewport layout ──────────────────────────────────────────────

/// Scrollbar orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Snapshot of one scrollbar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollBarState {
    pub visible: bool,
    /// Width of a vertical bar or height of a horizontal bar.
    pub thickness: i32,
    pub position: i32,
    pub minimum: i32,
    pub maximum: i32,
}

impl ScrollBarState {
    pub fn clamp(&self, position: i32) -> i32 {
        position.max(self.minimum).min(self.maximum)
    }
}

/// Snapshot of the scroll container hosting the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewportLayout {
    /// Outer size of the scroll container, scrollbars included.
    pub size: Size,
    /// Canvas top-left in container coordinates. Negative once scrolled.
    pub content_origin: Point,
    /// Size of the canvas, i.e. the remote frame.
    pub content_size: Size,
    pub horizontal: ScrollBarState,
    pub vertical: ScrollBarState,
}

impl ViewportLayout {
    /// Visible area left for the canvas once scrollbars take their share.
    pub fn client_area(&self) -> Size {
        let mut area = self.size;
        if self.horizontal.visible {
            area.height -= self.horizontal.thickness;
        }
        if self.vertical.visible {
            area.width -= self.vertical.thickness;
        }
        area
    }

    /// Canvas coordinates → container coordinates.
    pub fn to_viewport(&self, canvas_pos: Point) -> Point {
        canvas_pos.offset(self.content_origin)
    }

    /// Container coordinates → canvas coordinates.
    pub fn to_canvas(&self, viewport_pos: Point) -> Point {
        Point::new(
            viewport_pos.x - self.content_origin.x,
            viewport_pos.y - self.content_origin.y,
        )
    }

    /// Canvas position under a container position, if the canvas is what
    /// is showing there. Letterbox margins and scrollbar strips miss.
    pub fn canvas_hit(&self, viewport_pos: Point) -> Option<Point> {
        let client = self.client_area();
        if viewport_pos.x < 0
            || viewport_pos.y < 0
            || viewport_pos.x >= client.width
            || viewport_pos.y >= client.height
        {
            return None;
        }
        let pos = self.to_canvas(viewport_pos);
        let inside = (0..self.content_size.width).contains(&pos.x)
            && (0..self.content_size.height).contains(&pos.y);
        inside.then_some(pos)
    }

    pub fn bar(&self, axis: Axis) -> &ScrollBarState {
        match axis {
            Axis::Horizontal => &self.horizontal,
            Axis::Vertical => &self.vertical,
        }
    }
}

// ── Engine ───────────────────────────────────────────────────────

/// Per-axis scroll step, each in `{-SCROLL_STEP, 0, SCROLL_STEP}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollDelta {
    pub dx: i32,
    pub dy: i32,
}

impl ScrollDelta {
    pub fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

/// What a pointer move did to the scroll timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTransition {
    Started,
    Stopped,
    Unchanged,
}

/// Auto-scroll state: current step plus whether the tick is armed.
#[derive(Debug, Default)]
pub struct AutoScroll {
    delta: ScrollDelta,
    timer_active: bool,
}

impl AutoScroll {
    pub fn new() -> Self {
        Self::default()
    }

    /// Step for one axis.
    ///
    /// `pointer` is in viewport coordinates, `visible` is the client extent
    /// and `content` the remote frame extent on that axis.
    pub fn axis_step(pointer: i32, visible: i32, content: i32) -> i32 {
        if visible >= content {
            return 0;
        }
        if pointer > visible - EDGE_MARGIN {
            SCROLL_STEP
        } else if pointer < EDGE_MARGIN {
            -SCROLL_STEP
        } else {
            0
        }
    }

    /// Re-evaluate edge proximity for a pointer at `canvas_pos`.
    pub fn on_pointer_move(
        &mut self,
        layout: &ViewportLayout,
        frame: Size,
        canvas_pos: Point,
    ) -> ScrollTransition {
        let cursor = layout.to_viewport(canvas_pos);
        let client = layout.client_area();

        self.delta = ScrollDelta {
            dx: Self::axis_step(cursor.x, client.width, frame.width),
            dy: Self::axis_step(cursor.y, client.height, frame.height),
        };

        match (self.delta.is_zero(), self.timer_active) {
            (false, false) => {
                self.timer_active = true;
                ScrollTransition::Started
            }
            (true, true) => {
                self.timer_active = false;
                ScrollTransition::Stopped
            }
            _ => ScrollTransition::Unchanged,
        }
    }

    /// Slider positions to apply for one tick. Empty while idle.
    pub fn tick(&self, layout: &ViewportLayout) -> Vec<(Axis, i32)> {
        if !self.timer_active {
            return Vec::new();
        }

        let mut moves = Vec::with_capacity(2);
        for (axis, step) in [
            (Axis::Horizontal, self.delta.dx),
            (Axis::Vertical, self.delta.dy),
        ] {
            if step != 0 {
                let bar = layout.bar(axis);
                moves.push((axis, bar.clamp(bar.position + step)));
            }
        }
        moves
    }

    /// Disarm the tick, e.g. when the window closes.
    pub fn stop(&mut self) {
        self.delta = ScrollDelta::default();
        self.timer_active = false;
    }

    pub fn is_active(&self) -> bool {
        self.timer_active
    }

    pub fn delta(&self) -> ScrollDelta {
        self.delta
    }
}

// ── Tests ────────────────────────────────────────────────────────
