//! Events the viewer sends to the remote session.
//!
//! The window controller publishes [`SessionEvent`]s on a channel; the
//! transport layer picks them up and ships the serialised payload.
//!
//! ```text
//! canvas ──► controller ──[SessionEvent]──► transport ──► host
//!              ▲
//! host  ───────┘  (frame size, cursor, clipboard, capabilities)
//! ```

use serde::{Deserialize, Serialize};

use crate::error::RdeskError;
use crate::flags::{ButtonMask, KeyModifiers};
use crate::geometry::{Point, Size};
use crate::session::SessionConfig;

/// Platform virtual-key codes the viewer refers to by name.
pub mod vk {
    pub const TAB: u16 = 0x09;
    pub const SHIFT: u16 = 0x10;
    pub const CONTROL: u16 = 0x11;
    pub const MENU: u16 = 0x12;
    pub const ESCAPE: u16 = 0x1B;
    pub const DELETE: u16 = 0x2E;
    pub const LWIN: u16 = 0x5B;
}

// ── Pointer ──────────────────────────────────────────────────────

/// A pointer event in remote-frame coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub position: Point,
    pub buttons: ButtonMask,
}

impl PointerEvent {
    pub fn new(position: Point, buttons: ButtonMask) -> Self {
        Self { position, buttons }
    }

    /// A wheel notch at `position` while `held` buttons are down.
    ///
    /// Positive `delta` scrolls away from the user (up).
    pub fn wheel(position: Point, held: ButtonMask, delta: i32) -> Self {
        let mut buttons = held;
        if delta > 0 {
            buttons |= ButtonMask::WHEEL_UP;
        } else if delta < 0 {
            buttons |= ButtonMask::WHEEL_DOWN;
        }
        Self { position, buttons }
    }
}

// ── Keyboard ─────────────────────────────────────────────────────

/// Whether a key went down or up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyAction {
    Press,
    Release,
}

/// A key event forwarded to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// Virtual key code (see [`vk`]).
    pub virtual_key: u16,
    /// Hardware scan code, 0 when synthesised.
    pub scan_code: u16,
    pub action: KeyAction,
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    pub fn press(virtual_key: u16, scan_code: u16, modifiers: KeyModifiers) -> Self {
        Self {
            virtual_key,
            scan_code,
            action: KeyAction::Press,
            modifiers,
        }
    }

    pub fn release(virtual_key: u16, scan_code: u16, modifiers: KeyModifiers) -> Self {
        Self {
            virtual_key,
            scan_code,
            action: KeyAction::Release,
            modifiers,
        }
    }

    pub fn is_press(&self) -> bool {
        self.action == KeyAction::Press
    }
}

/// A shortcut such as Ctrl+Alt+Del requested from the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySequence {
    pub modifiers: KeyModifiers,
    pub key: u16,
}

impl KeySequence {
    pub const fn new(modifiers: KeyModifiers, key: u16) -> Self {
        Self { modifiers, key }
    }

    pub const fn ctrl_alt_del() -> Self {
        Self::new(
            KeyModifiers::CTRL.union(KeyModifiers::ALT),
            vk::DELETE,
        )
    }

    /// Expand into the key events a physical keyboard would produce.
    ///
    /// Modifiers go down in Ctrl, Alt, Shift, Meta order and come back up
    /// in reverse, wrapped around one press/release of `key`.
    pub fn expand(&self) -> Vec<KeyEvent> {
        const ORDER: [(KeyModifiers, u16); 4] = [
            (KeyModifiers::CTRL, vk::CONTROL),
            (KeyModifiers::ALT, vk::MENU),
            (KeyModifiers::SHIFT, vk::SHIFT),
            (KeyModifiers::META, vk::LWIN),
        ];

        let held: Vec<(KeyModifiers, u16)> = ORDER
            .iter()
            .copied()
            .filter(|(flag, _)| self.modifiers.contains(*flag))
            .collect();

        let mut events = Vec::with_capacity(held.len() * 2 + 2);
        let mut active = KeyModifiers::empty();
        for (flag, code) in &held {
            active |= *flag;
            events.push(KeyEvent::press(*code, 0, active));
        }
        events.push(KeyEvent::press(self.key, 0, active));
        events.push(KeyEvent::release(self.key, 0, active));
        for (flag, code) in held.iter().rev() {
            active.remove(*flag);
            events.push(KeyEvent::release(*code, 0, active));
        }
        events
    }
}

// ── Clipboard / cursor ───────────────────────────────────────────

/// Clipboard content travelling in either direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardEvent {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl ClipboardEvent {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            mime_type: "text/plain; charset=UTF-8".into(),
            data: text.into().into_bytes(),
        }
    }
}

/// A remote cursor image, BGRA8, top-down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorShape {
    pub size: Size,
    pub hotspot: Point,
    pub data: Vec<u8>,
}

// ── SessionEvent ─────────────────────────────────────────────────

/// Everything the window controller emits towards the transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    Pointer(PointerEvent),
    Key(KeyEvent),
    Clipboard(ClipboardEvent),
    /// The user accepted new session settings.
    Config(SessionConfig),
    /// The window was closed; the session should be torn down.
    WindowClosed,
}

impl SessionEvent {
    /// Serialize to bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, RdeskError> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserialize from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RdeskError> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// Short tag for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            SessionEvent::Pointer(_) => "pointer",
            SessionEvent::Key(_) => "key",
            SessionEvent::Clipboard(_) => "clipboard",
            SessionEvent::Config(_) => "config",
            SessionEvent::WindowClosed => "window_closed",
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────
