//! Viewer configuration.

use std::path::Path;

use rdesk_core::{RdeskError, SessionConfig, SessionDescriptor, SessionType, Size};
use serde::{Deserialize, Serialize};

use crate::controller::MINIMUM_WINDOW_SIZE;

/// Top-level configuration for the viewer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GuiConfig {
    /// Which session to open, and its persisted settings.
    pub session: SessionSection,
    /// Window settings.
    pub display: DisplayConfig,
    /// Input forwarding settings.
    pub input: InputConfig,
    /// Logging.
    pub logging: LoggingConfig,
}

/// Session identity plus the persisted session profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSection {
    /// `manage` or `view`.
    pub session_type: SessionType,
    /// Name shown in the title bar; the address is used when empty.
    pub display_name: String,
    /// Remote host, `host[:port]`.
    pub address: String,
    /// Video encoding and feature flags.
    pub profile: SessionConfig,
}

/// Window settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Start in fullscreen mode.
    pub fullscreen: bool,
    /// Remote frame size assumed until the host announces one.
    pub frame_width: i32,
    pub frame_height: i32,
    /// Smallest client area the window may be resized to.
    pub min_width: i32,
    pub min_height: i32,
    /// Toolbar overlay width in pixels.
    pub panel_width: i32,
}

/// Input forwarding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Forward pointer and wheel events.
    pub capture_mouse: bool,
    /// Forward keyboard events.
    pub capture_keyboard: bool,
}

/// Logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level, used when `RUST_LOG` is unset.
    pub level: String,
    /// Optional log file; empty logs to stderr.
    pub file: String,
}

// ── Defaults ─────────────────────────────────────────────────────

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            session_type: SessionType::Manage,
            display_name: String::new(),
            address: "127.0.0.1:8050".into(),
            profile: SessionConfig::default(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            fullscreen: false,
            frame_width: 1280,
            frame_height: 720,
            min_width: MINIMUM_WINDOW_SIZE.width,
            min_height: MINIMUM_WINDOW_SIZE.height,
            panel_width: 400,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            capture_mouse: true,
            capture_keyboard: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            file: String::new(),
        }
    }
}

// ── Loading ──────────────────────────────────────────────────────

impl GuiConfig {
    /// Load from a TOML file, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!("invalid config {}: {e}; using defaults", path.display());
                Self::default()
            }),
            Err(_) => {
                tracing::info!("no config at {}; using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Write default config to a file.
    pub fn write_default(path: &Path) -> Result<(), RdeskError> {
        let text = toml::to_string_pretty(&Self::default())
            .map_err(|e| RdeskError::InvalidConfig(e.to_string()))?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Reject values the window cannot work with.
    pub fn validate(&self) -> Result<(), RdeskError> {
        if self.session.address.trim().is_empty() {
            return Err(RdeskError::InvalidConfig("session.address is empty".into()));
        }
        if self.display.min_width < MINIMUM_WINDOW_SIZE.width
            || self.display.min_height < MINIMUM_WINDOW_SIZE.height
        {
            return Err(RdeskError::InvalidConfig(format!(
                "display minimum {}x{} is below {}x{}",
                self.display.min_width,
                self.display.min_height,
                MINIMUM_WINDOW_SIZE.width,
                MINIMUM_WINDOW_SIZE.height,
            )));
        }
        if self.initial_frame().is_empty() {
            return Err(RdeskError::InvalidConfig(
                "display frame size must be positive".into(),
            ));
        }
        if self.display.panel_width <= 0 {
            return Err(RdeskError::InvalidConfig("display.panel_width must be positive".into()));
        }
        Ok(())
    }

    pub fn descriptor(&self) -> SessionDescriptor {
        SessionDescriptor::new(
            self.session.session_type,
            self.session.display_name.clone(),
            self.session.address.clone(),
        )
    }

    pub fn initial_frame(&self) -> Size {
        Size::new(self.display.frame_width, self.display.frame_height)
    }

    pub fn min_window(&self) -> Size {
        Size::new(self.display.min_width, self.display.min_height)
    }
}

// ── Tests ────────────────────────────────────────────────────────
