//! Toolkit-free scroll container and canvas used by the native host window.
//!
//! [`ScrollModel`] reproduces how a scroll area lays out a child larger than
//! itself: scrollbars appear per axis when the frame overflows (one bar
//! showing can force the other), a smaller frame is centred, and slider
//! positions stay inside `[0, overflow]`. The canvas and the scroll-area
//! port share one model, as the widgets would share one layout.

use std::cell::RefCell;
use std::rc::Rc;

use rdesk_core::{CursorShape, Point, Size};
use tracing::trace;

use crate::autoscroll::{Axis, ScrollBarState, ViewportLayout};
use crate::ports::{Canvas, ScrollArea};

/// Default scrollbar thickness in pixels.
pub const SCROLLBAR_THICKNESS: i32 = 17;

/// Layout state of a scroll container showing the remote frame.
#[derive(Debug, Clone)]
pub struct ScrollModel {
    viewport: Size,
    frame: Size,
    thickness: i32,
    h_pos: i32,
    v_pos: i32,
}

impl ScrollModel {
    pub fn new(viewport: Size, frame: Size) -> Self {
        Self::with_thickness(viewport, frame, SCROLLBAR_THICKNESS)
    }

    pub fn with_thickness(viewport: Size, frame: Size, thickness: i32) -> Self {
        Self {
            viewport,
            frame,
            thickness,
            h_pos: 0,
            v_pos: 0,
        }
    }

    pub fn into_shared(self) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(self))
    }

    pub fn viewport_size(&self) -> Size {
        self.viewport
    }

    pub fn frame_size(&self) -> Size {
        self.frame
    }

    pub fn set_viewport_size(&mut self, size: Size) {
        self.viewport = size;
        self.clamp_positions();
    }

    pub fn set_frame_size(&mut self, size: Size) {
        self.frame = size;
        self.clamp_positions();
    }

    pub fn set_position(&mut self, axis: Axis, position: i32) {
        let bar = *self.layout().bar(axis);
        match axis {
            Axis::Horizontal => self.h_pos = bar.clamp(position),
            Axis::Vertical => self.v_pos = bar.clamp(position),
        }
    }

    pub fn layout(&self) -> ViewportLayout {
        let (h_visible, v_visible) = self.bars_needed();
        let mut client = self.viewport;
        if h_visible {
            client.height -= self.thickness;
        }
        if v_visible {
            client.width -= self.thickness;
        }

        let h_max = (self.frame.width - client.width).max(0);
        let v_max = (self.frame.height - client.height).max(0);

        let origin_x = if self.frame.width < client.width {
            (client.width - self.frame.width) / 2
        } else {
            -self.h_pos.min(h_max)
        };
        let origin_y = if self.frame.height < client.height {
            (client.height - self.frame.height) / 2
        } else {
            -self.v_pos.min(v_max)
        };

        ViewportLayout {
            size: self.viewport,
            content_origin: Point::new(origin_x, origin_y),
            content_size: self.frame,
            horizontal: ScrollBarState {
                visible: h_visible,
                thickness: self.thickness,
                position: self.h_pos.min(h_max),
                minimum: 0,
                maximum: h_max,
            },
            vertical: ScrollBarState {
                visible: v_visible,
                thickness: self.thickness,
                position: self.v_pos.min(v_max),
                minimum: 0,
                maximum: v_max,
            },
        }
    }

    fn bars_needed(&self) -> (bool, bool) {
        let mut h = self.frame.width > self.viewport.width;
        let mut v = self.frame.height > self.viewport.height;
        if h && !v {
            v = self.frame.height > self.viewport.height - self.thickness;
        }
        if v && !h {
            h = self.frame.width > self.viewport.width - self.thickness;
        }
        (h, v)
    }

    fn clamp_positions(&mut self) {
        let layout = self.layout();
        self.h_pos = layout.horizontal.clamp(self.h_pos);
        self.v_pos = layout.vertical.clamp(self.v_pos);
    }
}

// ── Port adapters ────────────────────────────────────────────────

/// [`ScrollArea`] view onto a shared [`ScrollModel`].
#[derive(Clone)]
pub struct ScrollHandle(pub Rc<RefCell<ScrollModel>>);

impl ScrollArea for ScrollHandle {
    fn layout(&self) -> ViewportLayout {
        self.0.borrow().layout()
    }

    fn set_slider_position(&mut self, axis: Axis, position: i32) {
        self.0.borrow_mut().set_position(axis, position);
    }
}

/// [`Canvas`] that tracks frame geometry; pixels and the cursor image are
/// drawn by the renderer attached to the host window.
pub struct FrameCanvas {
    model: Rc<RefCell<ScrollModel>>,
    frames_drawn: u64,
}

impl FrameCanvas {
    pub fn new(model: Rc<RefCell<ScrollModel>>) -> Self {
        Self {
            model,
            frames_drawn: 0,
        }
    }
}

impl Canvas for FrameCanvas {
    fn frame_size(&self) -> Size {
        self.model.borrow().frame_size()
    }

    fn resize_frame(&mut self, size: Size) {
        self.model.borrow_mut().set_frame_size(size);
    }

    fn set_cursor(&mut self, cursor: &CursorShape) {
        trace!(size = ?cursor.size, hotspot = ?cursor.hotspot, "cursor shape");
    }

    fn draw(&mut self) {
        self.frames_drawn += 1;
        trace!(frame = self.frames_drawn, "draw");
    }
}

// ── Tests ────────────────────────────────────────────────────────
