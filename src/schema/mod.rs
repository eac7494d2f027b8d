//! Schema module - messages, signals and the catalog that holds them.
//!
//! The schema describes, for every message address, the frame length and the
//! position, width, byte order and scaling of each signal. Two signal names
//! are reserved: [`COUNTER_SIGNAL`] and [`CHECKSUM_SIGNAL`].
//!
//! - [`Catalog`] - loaded, validated set of messages
//! - [`Message`] / [`Signal`] - runtime records consumed by the packer
//! - [`CatalogDef`] / [`MessageDef`] / [`SignalDef`] - serde shapes for loading

mod catalog;
mod definition;
mod message;
mod signal;

pub use catalog::Catalog;
pub use definition::{CatalogDef, MessageDef, SignalDef};
pub use message::Message;
pub use signal::{Signal, CHECKSUM_SIGNAL, COUNTER_SIGNAL};
