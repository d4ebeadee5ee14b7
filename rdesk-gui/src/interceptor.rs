//! Input interception ahead of the host toolkit's default handling.
//!
//! Two inputs would otherwise be swallowed locally: Tab on the canvas
//! (focus navigation) and wheel gestures on the scroll viewport (native
//! scrolling). Both are taken here and sent to the host instead. Rules are
//! looked up by `(source, kind)` and then decide by predicate, so anything
//! without a rule, or that a rule declines, goes to default handling.

use std::collections::HashMap;

use rdesk_core::{ButtonMask, KeyAction, KeyEvent, Point, PointerEvent, SessionEvent, vk};

use crate::autoscroll::ViewportLayout;

/// Component an input event was delivered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventSource {
    /// The widget showing the remote frame.
    Canvas,
    /// The inner viewport of the scroll container.
    Viewport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    KeyPress,
    KeyRelease,
    Wheel,
    Pointer,
}

/// A wheel notch delivered to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelInput {
    /// Viewport coordinates.
    pub position: Point,
    pub buttons: ButtonMask,
    /// Positive away from the user.
    pub delta: i32,
}

/// Raw input as delivered by the host toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Wheel(WheelInput),
    Pointer(PointerEvent),
}

impl InputEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            InputEvent::Key(k) if k.action == KeyAction::Press => EventKind::KeyPress,
            InputEvent::Key(_) => EventKind::KeyRelease,
            InputEvent::Wheel(_) => EventKind::Wheel,
            InputEvent::Pointer(_) => EventKind::Pointer,
        }
    }
}

/// Outcome of filtering one event.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// Consumed; send this to the host.
    Forward(SessionEvent),
    /// Not ours; let the toolkit handle it.
    PassThrough,
}

/// A rule returns the event to forward, or `None` to decline.
pub type Rule = fn(&InputEvent, &ViewportLayout) -> Option<SessionEvent>;

/// Dispatch table of interception rules.
pub struct Interceptor {
    rules: HashMap<(EventSource, EventKind), Rule>,
}

impl Default for Interceptor {
    fn default() -> Self {
        let mut this = Self::empty();
        this.register(EventSource::Canvas, EventKind::KeyPress, forward_tab);
        this.register(EventSource::Canvas, EventKind::KeyRelease, forward_tab);
        this.register(EventSource::Viewport, EventKind::Wheel, forward_wheel);
        this
    }
}

impl Interceptor {
    /// Tab capture on the canvas plus wheel capture on the viewport.
    pub fn new() -> Self {
        Self::default()
    }

    /// A table with no rules; every event passes through.
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Install or replace the rule for `(source, kind)`.
    pub fn register(&mut self, source: EventSource, kind: EventKind, rule: Rule) {
        self.rules.insert((source, kind), rule);
    }

    pub fn filter(
        &self,
        source: EventSource,
        event: &InputEvent,
        layout: &ViewportLayout,
    ) -> Verdict {
        self.rules
            .get(&(source, event.kind()))
            .and_then(|rule| rule(event, layout))
            .map_or(Verdict::PassThrough, Verdict::Forward)
    }
}

fn forward_tab(event: &InputEvent, _: &ViewportLayout) -> Option<SessionEvent> {
    match event {
        InputEvent::Key(key) if key.virtual_key == vk::TAB => Some(SessionEvent::Key(*key)),
        _ => None,
    }
}

fn forward_wheel(event: &InputEvent, layout: &ViewportLayout) -> Option<SessionEvent> {
    match event {
        InputEvent::Wheel(wheel) => Some(SessionEvent::Pointer(PointerEvent::wheel(
            layout.to_canvas(wheel.position),
            wheel.buttons,
            wheel.delta,
        ))),
        _ => None,
    }
}

// ── Tests ────────────────────────────────────────────────────────
