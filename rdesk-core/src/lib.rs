//! # rdesk-core
//!
//! Shared types for the rdesk remote desktop viewer.
//!
//! This crate contains:
//! - **Session**: `SessionDescriptor`, `SessionType`, `SessionConfig`, `VideoEncoding`
//! - **Flags**: `EncodingMask`, `FeatureMask`, `ButtonMask`, `KeyModifiers`
//! - **Events**: `SessionEvent` and its pointer/key/clipboard payloads
//! - **Geometry**: `Point`, `Size`, `Rect`
//! - **Error**: `RdeskError`, a `thiserror`-based error type

pub mod error;
pub mod event;
pub mod flags;
pub mod geometry;
pub mod session;

// ── Re-exports for ergonomic usage ───────────────────────────────

pub use error::RdeskError;
pub use event::{
    ClipboardEvent, CursorShape, KeyAction, KeyEvent, KeySequence, PointerEvent, SessionEvent, vk,
};
pub use flags::{ButtonMask, EncodingMask, FeatureMask, KeyModifiers};
pub use geometry::{Point, Rect, Size};
pub use session::{SessionConfig, SessionDescriptor, SessionType, VideoEncoding};
