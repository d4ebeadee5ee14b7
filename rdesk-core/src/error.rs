//! Error types for the rdesk viewer.
//!
//! Fallible operations outside the window controller (config I/O, payload
//! encoding, host window creation, event publication) return
//! `Result<T, RdeskError>`. Broken controller preconditions are panics,
//! not variants of this type.

use thiserror::Error;

/// The canonical error type for rdesk.
#[derive(Debug, Error)]
pub enum RdeskError {
    // ── Configuration ────────────────────────────────────────────
    /// A configuration value could not be used.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A numeric value did not map to any known enum variant.
    #[error("unknown {type_name} discriminant: {value:#x}")]
    UnknownVariant { type_name: &'static str, value: u64 },

    // ── Serialization ────────────────────────────────────────────
    /// Encoding or decoding of an event payload failed.
    #[error("encoding error: {0}")]
    Encoding(String),

    // ── Host window ──────────────────────────────────────────────
    /// The native window could not be created or driven.
    #[error("window error: {0}")]
    Window(String),

    // ── Plumbing ─────────────────────────────────────────────────
    /// The outbound event channel was closed by the transport side.
    #[error("channel closed")]
    ChannelClosed,

    /// File or stream I/O failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

// ── Convenient From implementations ──────────────────────────────

impl<T> From<tokio::sync::mpsc::error::SendError<T>> for RdeskError {
    fn from(_: tokio::sync::mpsc::error::SendError<T>) -> Self {
        RdeskError::ChannelClosed
    }
}

impl From<Box<bincode::ErrorKind>> for RdeskError {
    fn from(e: Box<bincode::ErrorKind>) -> Self {
        RdeskError::Encoding(e.to_string())
    }
}
