//! Error types for canpack.

use thiserror::Error;

/// Main error type for all packer operations.
#[derive(Debug, Error)]
pub enum PackerError {
    /// No message with this address exists in the catalog.
    #[error("Unknown message address: 0x{0:X}")]
    UnknownMessage(u32),

    /// The schema catalog could not be loaded or is structurally invalid.
    #[error("Schema load failure: {0}")]
    SchemaLoad(String),

    /// A message names a checksum family that is not registered.
    #[error("Unknown checksum family: {0}")]
    UnknownChecksum(String),

    /// JSON serialization/deserialization error (catalog definitions).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// MsgPack serialization error.
    #[error("MsgPack encode error: {0}")]
    MsgPackEncode(#[from] rmp_serde::encode::Error),

    /// MsgPack deserialization error.
    #[error("MsgPack decode error: {0}")]
    MsgPackDecode(#[from] rmp_serde::decode::Error),

    /// Raw value does not fit the signal width (range checking enabled).
    #[error("Value {raw} out of range for signal {signal} ({width} bits)")]
    ValueOutOfRange {
        /// Signal name.
        signal: String,
        /// Raw integer after physical-to-raw conversion.
        raw: i64,
        /// Signal width in bits.
        width: u8,
    },

    /// Bit field runs past the frame buffer (strict overflow policy).
    #[error("Signal {signal} overflows frame: {written} of {width} bits written")]
    BitFieldOverflow {
        /// Signal name.
        signal: String,
        /// Bits that fit into the buffer.
        written: u8,
        /// Signal width in bits.
        width: u8,
    },
}

/// Result type alias using PackerError.
pub type Result<T> = std::result::Result<T, PackerError>;
