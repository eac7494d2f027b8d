//! Bit-level field writer.
//!
//! Writes an N-bit unsigned integer into a byte buffer at an arbitrary bit
//! offset. The field is laid out least-significant chunk first, starting at
//! `start_bit`; when it spans several bytes, the byte index walks forward
//! (little-endian) or backward (big-endian).
//!
//! ```text
//! little-endian, start_bit = 4, width = 12, value = 0xABC
//!
//!   byte 0          byte 1
//! ┌────┬────┐    ┌─────────┐
//! │ C  │ .. │    │   AB    │
//! │7..4│3..0│    │  7..0   │
//! └────┴────┘    └─────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use canpack::packer::{write_bits, ByteOrder};
//!
//! let mut buf = [0u8; 2];
//! let written = write_bits(&mut buf, 4, 12, ByteOrder::LittleEndian, 0xABC);
//! assert_eq!(written, 12);
//! assert_eq!(buf, [0xC0, 0xAB]);
//! ```

use serde::{Deserialize, Serialize};

/// Widest field the writer supports, in bits.
pub const MAX_BIT_WIDTH: u8 = 64;

/// Direction in which a multi-byte field advances through the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ByteOrder {
    /// Intel layout: byte index increases.
    #[default]
    #[serde(alias = "intel")]
    LittleEndian,
    /// Motorola layout: byte index decreases.
    #[serde(alias = "motorola")]
    BigEndian,
}

/// Position and layout of one field inside a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitField {
    /// Bit offset of the field's least-significant bit.
    pub start_bit: u16,
    /// Field width in bits (1-64).
    pub width: u8,
    /// Byte traversal direction.
    pub byte_order: ByteOrder,
}

impl BitField {
    /// Create a new field descriptor.
    pub fn new(start_bit: u16, width: u8, byte_order: ByteOrder) -> Self {
        Self {
            start_bit,
            width,
            byte_order,
        }
    }

    /// Write `value` into this field of `buf`.
    ///
    /// Returns the number of bits that fit into the buffer.
    #[inline]
    pub fn write(&self, buf: &mut [u8], value: u64) -> u8 {
        write_bits(buf, self.start_bit, self.width, self.byte_order, value)
    }
}

/// Mask covering the low `width` bits.
///
/// A width of 64 or more yields `u64::MAX` without shifting by the full
/// register width.
#[inline]
pub fn mask(width: u8) -> u64 {
    if width >= MAX_BIT_WIDTH {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

/// Write the low `width` bits of `value` into `buf`.
///
/// Bits of `buf` outside the field are left untouched. If the field runs
/// off either end of the buffer, writing stops there; the return value is
/// the number of bits actually written, so callers can detect truncation.
pub fn write_bits(buf: &mut [u8], start_bit: u16, width: u8, order: ByteOrder, value: u64) -> u8 {
    let width = width.min(MAX_BIT_WIDTH);
    let mut value = value & mask(width);
    let mut index = (start_bit / 8) as usize;
    let mut shift = (start_bit % 8) as u8;
    let mut remaining = width;

    while remaining > 0 && index < buf.len() {
        let size = remaining.min(8 - shift);
        let chunk_mask = mask(size) as u8;

        buf[index] &= !(chunk_mask << shift);
        buf[index] |= ((value as u8) & chunk_mask) << shift;

        remaining -= size;
        // size is at most 8, so this never shifts by the register width
        value >>= size;
        shift = 0;

        index = match order {
            ByteOrder::LittleEndian => index + 1,
            ByteOrder::BigEndian => match index.checked_sub(1) {
                Some(prev) => prev,
                None => break,
            },
        };
    }

    width - remaining
}
