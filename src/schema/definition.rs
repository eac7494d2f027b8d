//! Serializable catalog definitions.
//!
//! These are the on-disk (or on-wire) shapes of a catalog. Checksum families
//! are plain names here; [`Catalog::from_def`](super::Catalog::from_def)
//! resolves them against a registry.
//!
//! A catalog-level `checksum` applies to every message that declares a
//! `CHECKSUM` signal; a message-level `checksum` overrides it.
//!
//! ```json
//! {
//!   "name": "demo",
//!   "checksum": "xor",
//!   "messages": [
//!     {
//!       "name": "WHEEL_SPEED",
//!       "address": 512,
//!       "size": 2,
//!       "signals": [
//!         { "name": "SPEED", "start_bit": 0, "size": 8, "factor": 0.5 },
//!         { "name": "CHECKSUM", "start_bit": 8, "size": 8 }
//!       ]
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::packer::ByteOrder;

fn default_factor() -> f64 {
    1.0
}

/// Serialized form of a whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogDef {
    /// Catalog name (e.g., the source DBC file stem).
    #[serde(default)]
    pub name: String,
    /// Default checksum family for messages with a `CHECKSUM` signal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
    /// Message definitions.
    pub messages: Vec<MessageDef>,
}

/// Serialized form of one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageDef {
    /// Message name.
    pub name: String,
    /// Bus address.
    pub address: u32,
    /// Frame length in bytes.
    pub size: usize,
    /// Checksum family override for this message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
    /// Signals in frame declaration order.
    pub signals: Vec<SignalDef>,
}

/// Serialized form of one signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalDef {
    /// Signal name.
    pub name: String,
    /// Bit offset of the least-significant bit.
    pub start_bit: u16,
    /// Width in bits.
    pub size: u8,
    /// Byte order, little-endian when omitted.
    #[serde(default)]
    pub byte_order: ByteOrder,
    /// Scale, 1.0 when omitted.
    #[serde(default = "default_factor")]
    pub factor: f64,
    /// Offset, 0.0 when omitted.
    #[serde(default)]
    pub offset: f64,
}
