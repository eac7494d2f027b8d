//! # canpack
//!
//! Schema-driven CAN frame encoder.
//!
//! Given a message address and a map of signal name to physical value, the
//! packer produces the exact bytes to put on the bus: each value is scaled to
//! its raw integer, written at its bit position in the declared byte order,
//! and the protocol fields every message may carry are filled in:
//!
//! - **COUNTER**: rolling anti-replay counter kept per address
//! - **CHECKSUM**: computed over the frame by a pluggable algorithm
//!
//! Decoding, transport and checksum algorithms themselves live elsewhere.
//!
//! ## Example
//!
//! ```
//! use std::collections::HashMap;
//! use canpack::{Catalog, ChecksumRegistry, FramePacker};
//!
//! let mut registry = ChecksumRegistry::new();
//! registry.register_fn("sum8", |_address, _signal, frame| {
//!     frame.iter().map(|b| *b as u64).sum::<u64>()
//! });
//!
//! let catalog = Catalog::from_json(
//!     r#"{
//!         "name": "demo",
//!         "checksum": "sum8",
//!         "messages": [{
//!             "name": "WHEEL", "address": 512, "size": 2,
//!             "signals": [
//!                 {"name": "SPEED", "start_bit": 0, "size": 4, "factor": 0.5},
//!                 {"name": "COUNTER", "start_bit": 4, "size": 4},
//!                 {"name": "CHECKSUM", "start_bit": 8, "size": 8}
//!             ]
//!         }]
//!     }"#,
//!     &registry,
//! )
//! .unwrap();
//!
//! let packer = FramePacker::new(catalog).unwrap();
//! let values = HashMap::from([("SPEED".to_string(), 2.5)]);
//!
//! assert_eq!(packer.encode(0x200, &values).unwrap(), vec![0x05, 0x05]);
//! assert_eq!(packer.encode(0x200, &values).unwrap(), vec![0x15, 0x15]);
//! ```

pub mod checksum;
pub mod codec;
pub mod error;
pub mod packer;
pub mod schema;

pub use checksum::{ChecksumAlgorithm, ChecksumRef, ChecksumRegistry};
pub use error::{PackerError, Result};
pub use packer::{ByteOrder, CanFrame, FramePacker, OverflowPolicy, PackerConfig, SignalValues};
pub use schema::{Catalog, Message, Signal, CHECKSUM_SIGNAL, COUNTER_SIGNAL};
