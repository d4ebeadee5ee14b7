//! The session window controller.
//!
//! [`DesktopWindow`] sits between the host toolkit and the session. It
//! takes canvas/toolbar/window events on the UI thread, keeps the
//! geometry, auto-scroll, capability and clipboard state, and publishes
//! [`SessionEvent`]s on an unbounded channel for the transport.
//!
//! ```text
//!  canvas ─┐  pointer / key / wheel / frame size
//!  panel  ─┼──────────────► DesktopWindow ──[SessionEvent]──► transport
//!  window ─┘  intents / resize / close │
//!                                     ├─► GeometryPort (fit, fullscreen)
//!                                     ├─► ScrollArea   (auto-scroll tick)
//!                                     └─► ClipboardBridge (gate)
//! ```
//!
//! Everything runs on one thread. The only timer is the auto-scroll tick;
//! the owner calls [`on_scroll_tick`](DesktopWindow::on_scroll_tick) every
//! [`SCROLL_PERIOD`](crate::autoscroll::SCROLL_PERIOD) while
//! [`is_scrolling`](DesktopWindow::is_scrolling) is true.

use rdesk_core::{
    ButtonMask, ClipboardEvent, CursorShape, EncodingMask, FeatureMask, KeyEvent, KeySequence,
    Point, PointerEvent, SessionConfig, SessionDescriptor, SessionEvent, SessionType, Size,
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use crate::autoscroll::{AutoScroll, ScrollDelta, ScrollTransition};
use crate::capabilities::CapabilityRegistry;
use crate::clipboard::ClipboardGate;
use crate::fit::{Placement, WindowFit, WindowMode};
use crate::interceptor::{EventSource, InputEvent, Interceptor, Verdict};
use crate::panel::{PanelIntent, panel_origin};
use crate::ports::{Canvas, ClipboardBridge, GeometryPort, Negotiator, Panel, ScrollArea};

/// Smallest client size the host window may be resized to.
pub const MINIMUM_WINDOW_SIZE: Size = Size::new(800, 600);

/// The collaborators a [`DesktopWindow`] drives.
pub struct Ports {
    pub canvas: Box<dyn Canvas>,
    pub scroll_area: Box<dyn ScrollArea>,
    pub geometry: Box<dyn GeometryPort>,
    pub panel: Box<dyn Panel>,
    pub negotiator: Box<dyn Negotiator>,
    pub clipboard: Box<dyn ClipboardBridge>,
}

/// Controller for one remote desktop session window.
pub struct DesktopWindow {
    descriptor: SessionDescriptor,
    /// Working copy of the session's persisted settings.
    config: SessionConfig,
    caps: CapabilityRegistry,
    scroll: AutoScroll,
    fit: WindowFit,
    clipboard: ClipboardGate,
    interceptor: Interceptor,
    canvas: Box<dyn Canvas>,
    scroll_area: Box<dyn ScrollArea>,
    geometry: Box<dyn GeometryPort>,
    panel: Box<dyn Panel>,
    negotiator: Box<dyn Negotiator>,
    events: UnboundedSender<SessionEvent>,
    closed: bool,
}

impl DesktopWindow {
    pub fn new(
        descriptor: SessionDescriptor,
        config: SessionConfig,
        ports: Ports,
        events: UnboundedSender<SessionEvent>,
    ) -> Self {
        info!(
            session = %descriptor.session_type,
            address = %descriptor.address,
            "session window created"
        );
        Self {
            descriptor,
            config,
            caps: CapabilityRegistry::new(),
            scroll: AutoScroll::new(),
            fit: WindowFit::new(),
            clipboard: ClipboardGate::new(ports.clipboard),
            interceptor: Interceptor::new(),
            canvas: ports.canvas,
            scroll_area: ports.scroll_area,
            geometry: ports.geometry,
            panel: ports.panel,
            negotiator: ports.negotiator,
            events,
            closed: false,
        }
    }

    // ── Accessors ────────────────────────────────────────────────

    pub fn title(&self) -> String {
        self.descriptor.window_title()
    }

    pub fn descriptor(&self) -> &SessionDescriptor {
        &self.descriptor
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn capabilities(&self) -> &CapabilityRegistry {
        &self.caps
    }

    pub fn mode(&self) -> WindowMode {
        self.fit.mode()
    }

    pub fn is_scrolling(&self) -> bool {
        self.scroll.is_active()
    }

    pub fn scroll_delta(&self) -> ScrollDelta {
        self.scroll.delta()
    }

    pub fn clipboard_active(&self) -> bool {
        self.clipboard.is_active()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    // ── Capability negotiation ───────────────────────────────────

    pub fn set_supported_encodings(&mut self, mask: EncodingMask) {
        debug!(?mask, "host encodings");
        self.caps.set_encodings(mask);
    }

    /// Store the host's feature mask and re-gate the clipboard relay.
    ///
    /// # Panics
    ///
    /// Panics for View sessions: they never negotiate features.
    pub fn set_supported_features(&mut self, mask: FeatureMask) {
        assert_eq!(
            self.descriptor.session_type,
            SessionType::Manage,
            "feature negotiation on a view-only session"
        );
        if self.closed {
            return;
        }
        debug!(?mask, "host features");
        self.caps.set_features(mask);
        self.regate_clipboard();
    }

    /// Let the user adjust `config` against what the host supports.
    ///
    /// Warns first (without blocking) when the configured encoding is not
    /// offered. On accept, `config` and the working copy are replaced and
    /// `true` is returned; on cancel nothing changes.
    pub fn require_config_change(&mut self, config: &mut SessionConfig) -> bool {
        match self.negotiate(config) {
            Some(accepted) => {
                *config = accepted;
                true
            }
            None => false,
        }
    }

    /// Settings intent: negotiate the working copy and publish it on accept.
    pub fn change_settings(&mut self) {
        let current = self.config;
        if let Some(accepted) = self.negotiate(&current) {
            self.publish(SessionEvent::Config(accepted));
        }
    }

    fn negotiate(&mut self, current: &SessionConfig) -> Option<SessionConfig> {
        if self.closed {
            return None;
        }
        let encodings = self.caps.encodings();
        if !self.caps.supports_encoding(current.video_encoding) {
            warn!(
                encoding = %current.video_encoding,
                supported = ?encodings,
                "configured video encoding is not supported by the host"
            );
            self.negotiator
                .warn_unsupported_encoding(current.video_encoding, encodings);
        }

        let Some(accepted) = self
            .negotiator
            .negotiate(current, encodings, self.caps.features())
        else {
            info!("session settings dialog cancelled");
            return None;
        };

        info!(
            encoding = %accepted.video_encoding,
            features = ?accepted.features,
            "session settings accepted"
        );
        self.config = accepted;
        self.regate_clipboard();
        Some(accepted)
    }

    fn regate_clipboard(&mut self) {
        self.clipboard.evaluate(
            self.descriptor.session_type,
            self.caps.features(),
            self.config.features,
        );
    }

    // ── Remote frame ─────────────────────────────────────────────

    /// The host announced a new frame size.
    pub fn resize_desktop_frame(&mut self, size: Size) {
        if self.closed {
            return;
        }
        let previous = self.canvas.frame_size();
        self.canvas.resize_frame(size);
        if size != previous && self.fit.allows_autosize() {
            self.fit.autosize(size, self.geometry.as_mut());
        }
    }

    pub fn draw_desktop_frame(&mut self) {
        self.canvas.draw();
    }

    pub fn inject_cursor(&mut self, cursor: &CursorShape) {
        self.canvas.set_cursor(cursor);
    }

    /// The canvas presented a new frame.
    pub fn on_frame_updated(&mut self) {
        self.panel.refresh();
    }

    // ── Clipboard ────────────────────────────────────────────────

    /// Clipboard content from the host.
    pub fn inject_clipboard(&mut self, event: &ClipboardEvent) {
        self.clipboard.inject(event);
    }

    /// Local clipboard changed; relay it when the gate is open.
    pub fn on_local_clipboard(&mut self, event: ClipboardEvent) {
        if self.clipboard.is_active() {
            self.publish(SessionEvent::Clipboard(event));
        }
    }

    /// Ask a polling bridge for local changes.
    pub fn poll_local_clipboard(&mut self) {
        if let Some(event) = self.clipboard.poll() {
            self.publish(SessionEvent::Clipboard(event));
        }
    }

    // ── Input ────────────────────────────────────────────────────

    /// Pointer event from the canvas, in frame coordinates.
    ///
    /// Updates auto-scroll, then forwards the event unconditionally.
    pub fn on_pointer_event(&mut self, position: Point, buttons: ButtonMask) {
        if self.closed {
            return;
        }
        let layout = self.scroll_area.layout();
        let frame = self.canvas.frame_size();
        match self.scroll.on_pointer_move(&layout, frame, position) {
            ScrollTransition::Started => debug!(delta = ?self.scroll.delta(), "auto-scroll started"),
            ScrollTransition::Stopped => debug!("auto-scroll stopped"),
            ScrollTransition::Unchanged => {}
        }
        self.publish(SessionEvent::Pointer(PointerEvent::new(position, buttons)));
    }

    /// Key event the canvas forwards through its normal path.
    pub fn on_key_event(&mut self, event: KeyEvent) {
        self.publish(SessionEvent::Key(event));
    }

    /// Offer a raw toolkit event to the interceptor before default handling.
    ///
    /// Returns `true` when the event was consumed and sent to the host.
    pub fn intercept(&mut self, source: EventSource, event: &InputEvent) -> bool {
        if self.closed {
            return false;
        }
        let layout = self.scroll_area.layout();
        match self.interceptor.filter(source, event, &layout) {
            Verdict::Forward(out) => {
                self.publish(out);
                true
            }
            Verdict::PassThrough => false,
        }
    }

    /// One auto-scroll tick.
    pub fn on_scroll_tick(&mut self) {
        let layout = self.scroll_area.layout();
        for (axis, position) in self.scroll.tick(&layout) {
            self.scroll_area.set_slider_position(axis, position);
        }
    }

    // ── Window geometry ──────────────────────────────────────────

    pub fn on_panel_intent(&mut self, intent: PanelIntent) {
        if self.closed {
            return;
        }
        match intent {
            PanelIntent::OpenSettings => self.change_settings(),
            PanelIntent::Fullscreen(on) => self.set_fullscreen(on),
            PanelIntent::Autosize => {
                self.autosize_window();
            }
            PanelIntent::KeySequence(seq) => self.send_key_sequence(seq),
        }
    }

    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        if self.closed {
            return;
        }
        if fullscreen {
            self.fit.enter_fullscreen(self.geometry.as_mut());
        } else {
            self.fit.leave_fullscreen(self.geometry.as_mut());
        }
    }

    /// Fit to the frame unless the window is maximized or fullscreen.
    pub fn autosize(&mut self) -> Option<Placement> {
        if self.closed {
            return None;
        }
        let frame = self.canvas.frame_size();
        self.fit.autosize(frame, self.geometry.as_mut())
    }

    /// User asked to fit the window; overrides maximized/fullscreen.
    pub fn autosize_window(&mut self) -> Option<Placement> {
        if self.closed {
            return None;
        }
        let frame = self.canvas.frame_size();
        Some(self.fit.autosize_now(frame, self.geometry.as_mut()))
    }

    pub fn send_key_sequence(&mut self, seq: KeySequence) {
        for key in seq.expand() {
            self.publish(SessionEvent::Key(key));
        }
    }

    /// The window's client area was resized.
    pub fn on_resize(&mut self, client: Size) {
        let origin = panel_origin(client.width, self.panel.width());
        self.panel.move_to(origin);
    }

    /// The window manager changed the window state by itself.
    pub fn on_window_state_changed(&mut self, mode: WindowMode) {
        self.fit.sync(mode);
    }

    /// Tear down: stop scrolling, drop the clipboard relay, notify once.
    ///
    /// Afterwards the controller ignores host updates and input.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.scroll.stop();
        self.clipboard.shutdown();
        info!("session window closed");
        self.publish(SessionEvent::WindowClosed);
        self.closed = true;
    }

    fn publish(&self, event: SessionEvent) {
        if self.closed {
            debug!(kind = event.kind(), "window closed; dropping event");
            return;
        }
        if let Err(e) = self.events.send(event) {
            warn!(kind = e.0.kind(), "session transport gone; dropping event");
        }
    }
}
