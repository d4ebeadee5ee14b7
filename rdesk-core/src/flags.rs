//! Bitsets exchanged with the host and forwarded with input events.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Video encodings a host can stream. One bit per [`VideoEncoding`](crate::VideoEncoding).
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct EncodingMask: u32 {
        const ZLIB = 0x01;
        const VP8  = 0x02;
        const VP9  = 0x04;
    }
}

bitflags! {
    /// Optional session features.
    ///
    /// Used both for what the host advertises and for what the local
    /// profile enables; a feature is live only when both sides carry it.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct FeatureMask: u32 {
        const CLIPBOARD    = 0x01;
        const CURSOR_SHAPE = 0x02;
        const BLOCK_INPUT  = 0x04;
    }
}

bitflags! {
    /// Pointer buttons held during a pointer event.
    ///
    /// Wheel gestures are reported as the `WHEEL_*` bits for a single event.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct ButtonMask: u32 {
        const LEFT       = 0x01;
        const MIDDLE     = 0x02;
        const RIGHT      = 0x04;
        const WHEEL_UP   = 0x08;
        const WHEEL_DOWN = 0x10;
    }
}

bitflags! {
    /// Modifier keys attached to a key event.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct KeyModifiers: u8 {
        const SHIFT = 0x01;
        const CTRL  = 0x02;
        const ALT   = 0x04;
        const META  = 0x08;
    }
}
