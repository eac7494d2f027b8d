//! Signal definition.

use crate::checksum::ChecksumRef;
use crate::packer::{BitField, ByteOrder};

/// Reserved name of the rolling counter signal.
pub const COUNTER_SIGNAL: &str = "COUNTER";

/// Reserved name of the checksum signal.
pub const CHECKSUM_SIGNAL: &str = "CHECKSUM";

/// A named field inside a message frame.
///
/// Physical value = raw × `factor` + `offset`.
#[derive(Debug, Clone)]
pub struct Signal {
    /// Name, unique within its message.
    pub name: String,
    /// Bit offset of the least-significant bit.
    pub start_bit: u16,
    /// Width in bits (1-64).
    pub size: u8,
    /// Byte traversal direction for multi-byte fields.
    pub byte_order: ByteOrder,
    /// Scale of the raw-to-physical transform.
    pub factor: f64,
    /// Offset of the raw-to-physical transform.
    pub offset: f64,
    /// Checksum algorithm; only set on the `CHECKSUM` signal.
    pub checksum: Option<ChecksumRef>,
}

impl Signal {
    /// Create a little-endian signal with identity scaling.
    pub fn new(name: &str, start_bit: u16, size: u8) -> Self {
        Self {
            name: name.to_string(),
            start_bit,
            size,
            byte_order: ByteOrder::LittleEndian,
            factor: 1.0,
            offset: 0.0,
            checksum: None,
        }
    }

    /// Set the byte order.
    pub fn byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    /// Shorthand for big-endian (Motorola) layout.
    pub fn big_endian(self) -> Self {
        self.byte_order(ByteOrder::BigEndian)
    }

    /// Set factor and offset.
    pub fn scale(mut self, factor: f64, offset: f64) -> Self {
        self.factor = factor;
        self.offset = offset;
        self
    }

    /// Attach a checksum algorithm.
    pub fn with_checksum(mut self, checksum: ChecksumRef) -> Self {
        self.checksum = Some(checksum);
        self
    }

    /// Bit layout of this signal.
    #[inline]
    pub fn bit_field(&self) -> BitField {
        BitField::new(self.start_bit, self.size, self.byte_order)
    }

    /// Check if this is the reserved counter signal.
    #[inline]
    pub fn is_counter(&self) -> bool {
        self.name == COUNTER_SIGNAL
    }

    /// Check if this is the reserved checksum signal.
    #[inline]
    pub fn is_checksum(&self) -> bool {
        self.name == CHECKSUM_SIGNAL
    }
}
