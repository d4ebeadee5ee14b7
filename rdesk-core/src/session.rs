//! Session identity and the negotiable session configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RdeskError;
use crate::flags::{EncodingMask, FeatureMask};

// ── SessionType ──────────────────────────────────────────────────

/// What the local user may do in the remote session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    /// Full control: input, clipboard, feature negotiation.
    #[default]
    Manage,
    /// Watch only.
    View,
}

impl SessionType {
    /// Human-readable session name used in window titles.
    pub fn label(self) -> &'static str {
        match self {
            SessionType::Manage => "Remote Desktop Manage",
            SessionType::View => "Remote Desktop View",
        }
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionType::Manage => write!(f, "manage"),
            SessionType::View => write!(f, "view"),
        }
    }
}

// ── SessionDescriptor ────────────────────────────────────────────

/// Identity of the session a window is bound to. Fixed for the window's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDescriptor {
    pub session_type: SessionType,
    /// Friendly name from the address book; may be empty.
    pub display_name: String,
    /// `host[:port]` of the remote machine.
    pub address: String,
}

impl SessionDescriptor {
    pub fn new(
        session_type: SessionType,
        display_name: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            session_type,
            display_name: display_name.into(),
            address: address.into(),
        }
    }

    /// `"<name> - <session label>"`, with the address standing in for an
    /// empty name.
    pub fn window_title(&self) -> String {
        let name = if self.display_name.is_empty() {
            &self.address
        } else {
            &self.display_name
        };
        format!("{name} - {}", self.session_type.label())
    }
}

// ── VideoEncoding ────────────────────────────────────────────────

/// Video encodings the viewer can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoEncoding {
    Zlib,
    #[default]
    Vp8,
    Vp9,
}

impl VideoEncoding {
    /// The bit this encoding occupies in an [`EncodingMask`].
    pub const fn mask(self) -> EncodingMask {
        match self {
            VideoEncoding::Zlib => EncodingMask::ZLIB,
            VideoEncoding::Vp8 => EncodingMask::VP8,
            VideoEncoding::Vp9 => EncodingMask::VP9,
        }
    }

    /// Whether a host advertising `supported` can stream this encoding.
    pub fn is_supported_by(self, supported: EncodingMask) -> bool {
        supported.contains(self.mask())
    }
}

impl TryFrom<u32> for VideoEncoding {
    type Error = RdeskError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0x01 => Ok(VideoEncoding::Zlib),
            0x02 => Ok(VideoEncoding::Vp8),
            0x04 => Ok(VideoEncoding::Vp9),
            _ => Err(RdeskError::UnknownVariant {
                type_name: "VideoEncoding",
                value: value as u64,
            }),
        }
    }
}

impl fmt::Display for VideoEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoEncoding::Zlib => write!(f, "zlib"),
            VideoEncoding::Vp8 => write!(f, "vp8"),
            VideoEncoding::Vp9 => write!(f, "vp9"),
        }
    }
}

// ── SessionConfig ────────────────────────────────────────────────

/// The locally persisted, user-editable session settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub video_encoding: VideoEncoding,
    /// Features the user allows for this session.
    pub features: FeatureMask,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            video_encoding: VideoEncoding::default(),
            features: FeatureMask::CLIPBOARD | FeatureMask::CURSOR_SHAPE,
        }
    }
}

impl SessionConfig {
    /// Serialize to bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, RdeskError> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserialize from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RdeskError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

// ── Tests ────────────────────────────────────────────────────────
