//! Packer module - bit-field writer, counters and the frame encoder.
//!
//! This module turns named physical values into frame bytes:
//! - [`write_bits`] / [`BitField`] - place an N-bit integer at any bit offset
//! - [`CounterState`] - rolling per-address message counters
//! - [`FramePacker`] - per-message orchestration (scaling, counter, checksum)
//! - [`CanFrame`] - encoded frame with its address

mod bit_field;
mod config;
mod counter;
mod frame;
mod frame_packer;

pub use bit_field::{mask, write_bits, BitField, ByteOrder, MAX_BIT_WIDTH};
pub use config::{OverflowPolicy, PackerConfig};
pub use counter::CounterState;
pub use frame::{CanFrame, MAX_STANDARD_ID};
pub use frame_packer::{FramePacker, SignalValues};
