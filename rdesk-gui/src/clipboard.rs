//! Clipboard relay gating and the local clipboard bridge.
//!
//! The relay runs only for Manage sessions, and only when the host offers
//! clipboard support *and* the local profile allows it. Both directions
//! are fire-and-forget: nothing is acknowledged or retried.

use rdesk_core::{ClipboardEvent, FeatureMask, SessionType};
use tracing::{debug, info, warn};

use crate::ports::ClipboardBridge;

/// Whether the clipboard relay may run.
pub fn clipboard_allowed(session: SessionType, host: FeatureMask, local: FeatureMask) -> bool {
    session == SessionType::Manage
        && host.contains(FeatureMask::CLIPBOARD)
        && local.contains(FeatureMask::CLIPBOARD)
}

// ── ClipboardGate ────────────────────────────────────────────────

/// Owns the bridge and switches it on or off.
pub struct ClipboardGate {
    bridge: Box<dyn ClipboardBridge>,
    active: bool,
}

impl ClipboardGate {
    /// The bridge starts disabled.
    pub fn new(bridge: Box<dyn ClipboardBridge>) -> Self {
        Self {
            bridge,
            active: false,
        }
    }

    /// Re-evaluate the gate. Returns the new state.
    pub fn evaluate(&mut self, session: SessionType, host: FeatureMask, local: FeatureMask) -> bool {
        let allowed = clipboard_allowed(session, host, local);
        if allowed != self.active {
            self.active = allowed;
            self.bridge.set_enabled(allowed);
            info!(
                enabled = allowed,
                host_clipboard = host.contains(FeatureMask::CLIPBOARD),
                local_clipboard = local.contains(FeatureMask::CLIPBOARD),
                "clipboard relay toggled"
            );
        }
        self.active
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Apply host clipboard content locally. Dropped while inactive.
    pub fn inject(&mut self, event: &ClipboardEvent) {
        if self.active {
            self.bridge.apply(event);
        } else {
            debug!("clipboard relay off; ignoring inbound clipboard event");
        }
    }

    /// Pull a pending local change, if the relay is on.
    pub fn poll(&mut self) -> Option<ClipboardEvent> {
        if self.active { self.bridge.poll() } else { None }
    }

    /// Disable the bridge for good, e.g. on window close.
    pub fn shutdown(&mut self) {
        if self.active {
            self.active = false;
            self.bridge.set_enabled(false);
        }
    }
}

// ── Local clipboard bridge ───────────────────────────────────────

/// Text carried by an inbound event, if it is UTF-8 plain text.
fn plain_text(event: &ClipboardEvent) -> Option<String> {
    if !event.mime_type.starts_with("text/plain") {
        debug!(mime = %event.mime_type, "unsupported clipboard format");
        return None;
    }
    match String::from_utf8(event.data.clone()) {
        Ok(text) => Some(text),
        Err(e) => {
            debug!(len = event.data.len(), "dropping clipboard text that is not UTF-8: {e}");
            None
        }
    }
}

/// Text-only bridge to the system clipboard.
///
/// Local changes are detected by polling: [`poll`](ClipboardBridge::poll)
/// compares the current text with what was last seen or written.
#[derive(Default)]
pub struct SystemClipboard {
    clipboard: Option<arboard::Clipboard>,
    last_text: Option<String>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardBridge for SystemClipboard {
    fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.clipboard = None;
            self.last_text = None;
            return;
        }
        match arboard::Clipboard::new() {
            Ok(mut cb) => {
                // Content already present is not a change.
                self.last_text = cb.get_text().ok();
                self.clipboard = Some(cb);
            }
            Err(e) => warn!("system clipboard unavailable: {e}"),
        }
    }

    fn apply(&mut self, event: &ClipboardEvent) {
        let Some(cb) = self.clipboard.as_mut() else {
            return;
        };
        let Some(text) = plain_text(event) else {
            return;
        };
        match cb.set_text(text.clone()) {
            Ok(()) => self.last_text = Some(text),
            Err(e) => warn!("failed to write clipboard: {e}"),
        }
    }

    fn poll(&mut self) -> Option<ClipboardEvent> {
        let cb = self.clipboard.as_mut()?;
        let text = cb.get_text().ok()?;
        if self.last_text.as_deref() == Some(text.as_str()) {
            return None;
        }
        self.last_text = Some(text.clone());
        Some(ClipboardEvent::text(text))
    }
}

// ── Tests ────────────────────────────────────────────────────────
