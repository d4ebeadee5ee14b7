//! Window events → controller calls.
//!
//! The native window has no separate canvas and viewport widgets, so
//! routing decides the source here: pointer motion and keys belong to the
//! canvas, wheel notches to the scroll viewport. Pointer positions arrive
//! in client coordinates and are mapped into the remote frame through the
//! current scroll layout; positions the canvas does not cover are dropped.

use rdesk_core::{KeyEvent, Point, PointerEvent, Size};

use crate::autoscroll::ViewportLayout;
use crate::config::InputConfig;
use crate::controller::DesktopWindow;
use crate::fit::WindowMode;
use crate::interceptor::{EventSource, InputEvent, WheelInput};
use crate::window::WindowEvent;

/// What a window event asks of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowAction {
    /// Canvas pointer event in frame coordinates.
    Pointer(PointerEvent),
    /// Canvas key event.
    Key(KeyEvent),
    /// Viewport wheel notch in viewport coordinates.
    Wheel(WheelInput),
    Resize(Size),
    StateChanged(WindowMode),
    Close,
}

/// Convert a window event into a controller action, honouring the capture
/// switches. Returns `None` for input that is not captured or misses the
/// canvas.
pub fn translate_event(
    event: &WindowEvent,
    input: &InputConfig,
    layout: &ViewportLayout,
) -> Option<WindowAction> {
    match *event {
        WindowEvent::Pointer { x, y, buttons } if input.capture_mouse => layout
            .canvas_hit(Point::new(x, y))
            .map(|position| WindowAction::Pointer(PointerEvent::new(position, buttons))),
        WindowEvent::Wheel {
            x,
            y,
            buttons,
            delta,
        } if input.capture_mouse => Some(WindowAction::Wheel(WheelInput {
            position: Point::new(x, y),
            buttons,
            delta,
        })),
        WindowEvent::Key {
            virtual_key,
            scan_code,
            pressed,
            modifiers,
        } if input.capture_keyboard => Some(WindowAction::Key(if pressed {
            KeyEvent::press(virtual_key, scan_code, modifiers)
        } else {
            KeyEvent::release(virtual_key, scan_code, modifiers)
        })),
        WindowEvent::Pointer { .. } | WindowEvent::Wheel { .. } | WindowEvent::Key { .. } => None,
        WindowEvent::Resize(w, h) => Some(WindowAction::Resize(Size::new(w, h))),
        WindowEvent::StateChanged(mode) => Some(WindowAction::StateChanged(mode)),
        WindowEvent::Close => Some(WindowAction::Close),
    }
}

/// Apply one action to the controller. Returns `false` once the window closed.
pub fn dispatch(window: &mut DesktopWindow, action: WindowAction) -> bool {
    match action {
        WindowAction::Pointer(ev) => window.on_pointer_event(ev.position, ev.buttons),
        WindowAction::Key(key) => {
            if !window.intercept(EventSource::Canvas, &InputEvent::Key(key)) {
                window.on_key_event(key);
            }
        }
        WindowAction::Wheel(wheel) => {
            window.intercept(EventSource::Viewport, &InputEvent::Wheel(wheel));
        }
        WindowAction::Resize(size) => window.on_resize(size),
        WindowAction::StateChanged(mode) => window.on_window_state_changed(mode),
        WindowAction::Close => window.close(),
    }
    !window.is_closed()
}

// ── Tests ────────────────────────────────────────────────────────
