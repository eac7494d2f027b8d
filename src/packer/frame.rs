//! Encoded CAN frame.
//!
//! Pairs the message address with the packed data bytes. The data uses
//! `bytes::Bytes`, so handing a frame to a transport is a cheap clone.
//!
//! # Example
//!
//! ```
//! use canpack::packer::CanFrame;
//!
//! let frame = CanFrame::from_parts(0x200, &[0x14]);
//! assert_eq!(frame.address(), 0x200);
//! assert_eq!(frame.data(), &[0x14]);
//! assert!(!frame.is_extended());
//! ```

use bytes::Bytes;

/// Highest address representable in an 11-bit standard identifier.
pub const MAX_STANDARD_ID: u32 = 0x7FF;

/// A packed frame ready for transmission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanFrame {
    /// Message address (arbitration identifier).
    pub address: u32,
    /// Packed data bytes.
    pub data: Bytes,
}

impl CanFrame {
    /// Create a new frame from address and data.
    pub fn new(address: u32, data: Bytes) -> Self {
        Self { address, data }
    }

    /// Create a frame from address and raw bytes (copies data).
    pub fn from_parts(address: u32, data: &[u8]) -> Self {
        Self {
            address,
            data: Bytes::copy_from_slice(data),
        }
    }

    /// Get the message address.
    #[inline]
    pub fn address(&self) -> u32 {
        self.address
    }

    /// Get a reference to the data bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get a clone of the data as Bytes (cheap, zero-copy).
    #[inline]
    pub fn data_bytes(&self) -> Bytes {
        self.data.clone()
    }

    /// Data length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the frame carries no data.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Check if the address needs a 29-bit extended identifier.
    #[inline]
    pub fn is_extended(&self) -> bool {
        self.address > MAX_STANDARD_ID
    }
}

impl From<CanFrame> for Vec<u8> {
    fn from(frame: CanFrame) -> Self {
        frame.data.to_vec()
    }
}
