//! What the host said it can do.

use rdesk_core::{EncodingMask, FeatureMask, VideoEncoding};

/// Encodings and features advertised by the host.
///
/// Plain storage; the controller decides what an update means.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapabilityRegistry {
    encodings: EncodingMask,
    features: FeatureMask,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_encodings(&mut self, mask: EncodingMask) {
        self.encodings = mask;
    }

    pub fn set_features(&mut self, mask: FeatureMask) {
        self.features = mask;
    }

    pub fn encodings(&self) -> EncodingMask {
        self.encodings
    }

    pub fn features(&self) -> FeatureMask {
        self.features
    }

    pub fn supports_encoding(&self, encoding: VideoEncoding) -> bool {
        encoding.is_supported_by(self.encodings)
    }
}
