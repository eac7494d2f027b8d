//! Message catalog.
//!
//! A [`Catalog`] is the loaded, immutable set of messages a packer encodes.
//! It can be built in code or resolved from a [`CatalogDef`] (JSON or
//! MsgPack) against a [`ChecksumRegistry`].
//!
//! # Example
//!
//! ```
//! use canpack::schema::{Catalog, Message, Signal};
//!
//! let catalog = Catalog::new("demo")
//!     .message(Message::new("WHEEL", 0x200, 1).signal(Signal::new("SPEED", 0, 8).scale(0.5, 0.0)));
//!
//! assert!(catalog.validate().is_ok());
//! assert_eq!(catalog.get(0x200).unwrap().name, "WHEEL");
//! ```

use std::collections::HashSet;

use tracing::debug;

use super::definition::{CatalogDef, MessageDef, SignalDef};
use super::{Message, Signal};
use crate::checksum::ChecksumRegistry;
use crate::codec::{JsonCodec, MsgPackCodec};
use crate::error::{PackerError, Result};
use crate::packer::MAX_BIT_WIDTH;

/// Loaded set of messages.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Catalog name.
    pub name: String,
    messages: Vec<Message>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            messages: Vec::new(),
        }
    }

    /// Add a message (builder style).
    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Add a message.
    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// All messages in load order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Get a message by address.
    pub fn get(&self, address: u32) -> Option<&Message> {
        self.messages.iter().find(|m| m.address == address)
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Check if the catalog has no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Structural checks a packer relies on.
    ///
    /// Checks:
    /// - Addresses are unique
    /// - Signal names are unique within a message
    /// - Widths are 1-64 bits
    /// - Factor is finite and non-zero, offset is finite
    ///
    /// Overlapping bit ranges are not checked.
    pub fn validate(&self) -> Result<()> {
        let mut addresses = HashSet::new();
        for message in &self.messages {
            if !addresses.insert(message.address) {
                return Err(PackerError::SchemaLoad(format!(
                    "duplicate message address 0x{:X}",
                    message.address
                )));
            }

            let mut names = HashSet::new();
            for signal in &message.signals {
                let fail = |reason: &str| {
                    PackerError::SchemaLoad(format!(
                        "message 0x{:X} ({}), signal {}: {}",
                        message.address, message.name, signal.name, reason
                    ))
                };

                if !names.insert(signal.name.as_str()) {
                    return Err(fail("duplicate signal name"));
                }
                if signal.size == 0 || signal.size > MAX_BIT_WIDTH {
                    return Err(fail("width must be 1-64 bits"));
                }
                if !signal.factor.is_finite() || signal.factor == 0.0 {
                    return Err(fail("factor must be finite and non-zero"));
                }
                if !signal.offset.is_finite() {
                    return Err(fail("offset must be finite"));
                }
            }
        }
        Ok(())
    }

    /// Resolve a definition into a catalog.
    ///
    /// # Errors
    ///
    /// - `UnknownChecksum` if a named family is not registered
    /// - `SchemaLoad` if a message names a family but has no `CHECKSUM`
    ///   signal, or if [`validate`](Self::validate) fails
    pub fn from_def(def: &CatalogDef, registry: &ChecksumRegistry) -> Result<Self> {
        let mut catalog = Catalog::new(&def.name);
        for message_def in &def.messages {
            catalog.add_message(resolve_message(message_def, def.checksum.as_deref(), registry)?);
        }
        catalog.validate()?;

        debug!(
            catalog = %catalog.name,
            messages = catalog.len(),
            "Catalog resolved"
        );
        Ok(catalog)
    }

    /// Load a catalog from JSON.
    pub fn from_json(json: &str, registry: &ChecksumRegistry) -> Result<Self> {
        let def: CatalogDef = JsonCodec::decode(json.as_bytes())?;
        Self::from_def(&def, registry)
    }

    /// Load a catalog from MsgPack.
    pub fn from_msgpack(bytes: &[u8], registry: &ChecksumRegistry) -> Result<Self> {
        let def: CatalogDef = MsgPackCodec::decode(bytes)?;
        Self::from_def(&def, registry)
    }

    /// Export back to a serializable definition.
    ///
    /// Checksum families are written per message.
    pub fn to_def(&self) -> CatalogDef {
        CatalogDef {
            name: self.name.clone(),
            checksum: None,
            messages: self.messages.iter().map(message_to_def).collect(),
        }
    }
}

fn resolve_message(
    def: &MessageDef,
    default_family: Option<&str>,
    registry: &ChecksumRegistry,
) -> Result<Message> {
    let mut message = Message::new(&def.name, def.address, def.size);
    for signal_def in &def.signals {
        message.add_signal(
            Signal::new(&signal_def.name, signal_def.start_bit, signal_def.size)
                .byte_order(signal_def.byte_order)
                .scale(signal_def.factor, signal_def.offset),
        );
    }

    let family = def.checksum.as_deref().or(default_family);
    match (family, message.signals.iter_mut().find(|s| s.is_checksum())) {
        (Some(family), Some(signal)) => signal.checksum = Some(registry.resolve(family)?),
        (Some(family), None) if def.checksum.is_some() => {
            return Err(PackerError::SchemaLoad(format!(
                "message 0x{:X} ({}) names checksum {} but has no CHECKSUM signal",
                def.address, def.name, family
            )));
        }
        _ => {}
    }

    Ok(message)
}

fn message_to_def(message: &Message) -> MessageDef {
    MessageDef {
        name: message.name.clone(),
        address: message.address,
        size: message.size,
        checksum: message
            .checksum_signal()
            .and_then(|s| s.checksum.as_ref())
            .map(|c| c.family().to_string()),
        signals: message
            .signals
            .iter()
            .map(|s| SignalDef {
                name: s.name.clone(),
                start_bit: s.start_bit,
                size: s.size,
                byte_order: s.byte_order,
                factor: s.factor,
                offset: s.offset,
            })
            .collect(),
    }
}
