//! # rdesk-gui — Remote Desktop Session Window
//!
//! The window a remote session is shown in. [`controller::DesktopWindow`]
//! negotiates host capabilities, scrolls the view when the pointer nears
//! an edge, fits the window to the remote frame, captures keys and wheel
//! gestures the window would otherwise swallow, and gates the clipboard
//! relay. Outbound traffic leaves as [`rdesk_core::SessionEvent`]s on a
//! channel read by the transport.
//!
//! The controller talks to its surroundings only through [`ports`]; the
//! binary plugs in a Win32 window, a toolkit-free scroll model and the
//! system clipboard.

pub mod autoscroll;
pub mod capabilities;
pub mod clipboard;
pub mod config;
pub mod controller;
pub mod fit;
pub mod input;
pub mod interceptor;
pub mod panel;
pub mod ports;
pub mod viewport;
pub mod window;
