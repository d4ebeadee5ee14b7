//! Collaborator interfaces the session window controller drives.
//!
//! The controller owns no toolkit objects. Everything it needs from the
//! surrounding UI (the canvas showing the remote frame, the scroll container,
//! the top-level window, the toolbar overlay, the settings dialog and the
//! local clipboard) is reached through these traits, so the state machines
//! stay platform-independent and can be driven by fakes in tests.

use rdesk_core::{
    ClipboardEvent, CursorShape, EncodingMask, FeatureMask, Point, Rect, SessionConfig, Size,
    VideoEncoding,
};

use crate::autoscroll::{Axis, ViewportLayout};

/// Surface that displays the decoded remote frame.
pub trait Canvas {
    /// Current remote frame size.
    fn frame_size(&self) -> Size;

    /// The host announced a new frame size.
    fn resize_frame(&mut self, size: Size);

    fn set_cursor(&mut self, cursor: &CursorShape);

    /// Present the latest frame.
    fn draw(&mut self);
}

/// Scroll container around the canvas.
pub trait ScrollArea {
    fn layout(&self) -> ViewportLayout;

    fn set_slider_position(&mut self, axis: Axis, position: i32);
}

/// Window-manager operations on the top-level window.
pub trait GeometryPort {
    /// Work area of the screen the window is on (taskbars excluded).
    fn available_area(&self) -> Rect;

    /// Outer window size minus client size: borders plus title bar.
    fn decoration(&self) -> Size;

    /// Outer origin and client size of the window in its normal state.
    fn normal_rect(&self) -> Rect;

    fn enter_fullscreen(&mut self);

    fn enter_maximized(&mut self);

    /// Restore to a normal window whose outer top-left is `rect.origin()`
    /// and whose client area is `rect.size()`.
    fn enter_windowed(&mut self, rect: Rect);
}

/// Toolbar overlay floating over the remote screen.
pub trait Panel {
    fn width(&self) -> i32;

    fn move_to(&mut self, origin: Point);

    /// Repaint after the frame under it changed.
    fn refresh(&mut self);
}

/// The settings dialog used for negotiation.
pub trait Negotiator {
    /// Dismissible warning shown before the dialog when the configured
    /// encoding is not offered by the host.
    fn warn_unsupported_encoding(&mut self, encoding: VideoEncoding, supported: EncodingMask);

    /// Run the dialog modally. `None` means the user cancelled.
    fn negotiate(
        &mut self,
        config: &SessionConfig,
        encodings: EncodingMask,
        features: FeatureMask,
    ) -> Option<SessionConfig>;
}

/// Relay between the local clipboard and the session.
pub trait ClipboardBridge {
    fn set_enabled(&mut self, enabled: bool);

    /// Write clipboard content received from the host.
    fn apply(&mut self, event: &ClipboardEvent);

    /// Local clipboard content changed since the last call, if any.
    fn poll(&mut self) -> Option<ClipboardEvent> {
        None
    }
}
