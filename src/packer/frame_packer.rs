//! Schema-driven frame encoder.
//!
//! For one `encode` call the packer:
//! 1. Converts each signal's physical value to a raw integer
//! 2. Writes the raw integers into a zeroed buffer
//! 3. Fills in the rolling `COUNTER` unless the caller supplied one
//! 4. Computes and writes the `CHECKSUM` over the result
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use canpack::{Catalog, FramePacker, Message, Signal};
//!
//! let catalog = Catalog::new("demo")
//!     .message(Message::new("WHEEL", 0x200, 1).signal(Signal::new("SPEED", 0, 8).scale(0.5, 0.0)));
//! let packer = FramePacker::new(catalog).unwrap();
//!
//! let mut values = HashMap::new();
//! values.insert("SPEED".to_string(), 10.0);
//! assert_eq!(packer.encode(0x200, &values).unwrap(), vec![0x14]);
//! assert_eq!(packer.encode(0x200, &HashMap::new()).unwrap(), vec![0x00]);
//! ```

use std::collections::HashMap;

use bytes::Bytes;
use tracing::{debug, trace, warn};

use super::bit_field::mask;
use super::counter::next_counter;
use super::{CanFrame, CounterState, OverflowPolicy, PackerConfig};
use crate::error::{PackerError, Result};
use crate::schema::{Catalog, Message, Signal};

/// Physical values keyed by signal name.
pub type SignalValues = HashMap<String, f64>;

/// Encodes named physical values into frames, one message address at a time.
///
/// Holds the resolved schema and the rolling counter for every address it
/// has encoded. `encode` takes `&self`; the packer can be shared between
/// threads.
#[derive(Debug)]
pub struct FramePacker {
    messages: HashMap<u32, Message>,
    counters: CounterState,
    config: PackerConfig,
}

impl FramePacker {
    /// Create a packer with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns `SchemaLoad` if the catalog fails validation.
    pub fn new(catalog: Catalog) -> Result<Self> {
        Self::with_config(catalog, PackerConfig::default())
    }

    /// Create a packer with a custom configuration.
    pub fn with_config(catalog: Catalog, config: PackerConfig) -> Result<Self> {
        catalog.validate()?;

        let messages: HashMap<u32, Message> = catalog
            .messages()
            .iter()
            .map(|m| (m.address, m.clone()))
            .collect();

        debug!(
            catalog = %catalog.name,
            messages = messages.len(),
            overflow = ?config.overflow,
            range_check = config.range_check,
            "Frame packer ready"
        );

        Ok(Self {
            messages,
            counters: CounterState::new(),
            config,
        })
    }

    /// Encode `values` into the frame for `address`.
    ///
    /// Signals missing from `values` encode as physical `0.0`. Supplying a
    /// `COUNTER` value overrides the rolling counter and reseeds it.
    ///
    /// # Errors
    ///
    /// - `UnknownMessage` if `address` is not in the catalog
    /// - `ValueOutOfRange` / `BitFieldOverflow` under a strict configuration
    ///
    /// A failed call leaves the counter state untouched.
    pub fn encode(&self, address: u32, values: &SignalValues) -> Result<Vec<u8>> {
        let message = self.lookup(address)?;
        let mut frame = vec![0u8; message.size];
        let mut explicit_counter = None;

        for signal in &message.signals {
            let supplied = values.get(&signal.name).copied();
            let raw = self.raw_value(signal, supplied.unwrap_or(0.0))?;
            if raw != 0 {
                self.write_field(&mut frame, signal, raw)?;
            }

            if signal.is_counter() && supplied.is_some() {
                explicit_counter = Some(raw);
            }
        }

        // Counter state only changes once the whole frame is packed.
        match message.counter_signal() {
            Some(counter) => {
                let value = self.counters.update(address, |last| {
                    let value = match explicit_counter {
                        Some(raw) => raw,
                        None => {
                            let next = next_counter(last, counter.size);
                            self.write_field(&mut frame, counter, next)?;
                            next
                        }
                    };
                    self.write_checksum(address, message, &mut frame)?;
                    Ok(value)
                })?;
                if explicit_counter.is_some() {
                    debug!(address, value, "Counter set explicitly");
                }
            }
            None => self.write_checksum(address, message, &mut frame)?,
        }

        trace!(address, len = frame.len(), "Encoded frame");
        Ok(frame)
    }

    /// Encode into a [`CanFrame`].
    pub fn encode_frame(&self, address: u32, values: &SignalValues) -> Result<CanFrame> {
        let data = self.encode(address, values)?;
        Ok(CanFrame::new(address, Bytes::from(data)))
    }

    /// Get the resolved message for `address`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownMessage` if `address` is not in the catalog.
    pub fn lookup(&self, address: u32) -> Result<&Message> {
        self.messages
            .get(&address)
            .ok_or(PackerError::UnknownMessage(address))
    }

    /// Iterate over all messages (unordered).
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.values()
    }

    /// Last counter value sent (or set explicitly) for `address`.
    pub fn counter(&self, address: u32) -> Option<u64> {
        self.counters.get(address)
    }

    /// Restart every counter from zero.
    pub fn reset_counters(&self) {
        debug!("Counters reset");
        self.counters.reset();
    }

    /// Active configuration.
    pub fn config(&self) -> &PackerConfig {
        &self.config
    }

    /// Physical-to-raw conversion, returning the field bits.
    ///
    /// Negative raw values become their two's-complement representation
    /// within the signal width.
    fn raw_value(&self, signal: &Signal, physical: f64) -> Result<u64> {
        let raw = ((physical - signal.offset) / signal.factor).round() as i64;

        if self.config.range_check && !fits_width(raw, signal.size) {
            warn!(signal = %signal.name, raw, width = signal.size, "Value out of range");
            return Err(PackerError::ValueOutOfRange {
                signal: signal.name.clone(),
                raw,
                width: signal.size,
            });
        }

        Ok((raw as u64) & mask(signal.size))
    }

    fn write_checksum(&self, address: u32, message: &Message, frame: &mut [u8]) -> Result<()> {
        let Some(signal) = message.checksum_signal() else {
            return Ok(());
        };
        match &signal.checksum {
            Some(algorithm) => {
                let value = algorithm.compute(address, signal, frame) & mask(signal.size);
                self.write_field(frame, signal, value)
            }
            None => {
                warn!(
                    address,
                    name = %message.name,
                    "CHECKSUM signal has no algorithm, left as supplied"
                );
                Ok(())
            }
        }
    }

    fn write_field(&self, frame: &mut [u8], signal: &Signal, value: u64) -> Result<()> {
        let written = signal.bit_field().write(frame, value);
        if written < signal.size && self.config.overflow == OverflowPolicy::Strict {
            warn!(
                signal = %signal.name,
                written,
                width = signal.size,
                "Signal does not fit frame"
            );
            return Err(PackerError::BitFieldOverflow {
                signal: signal.name.clone(),
                written,
                width: signal.size,
            });
        }
        Ok(())
    }
}

/// Check if `raw` is representable in `width` bits, either as an unsigned
/// value or as a negative two's-complement value.
fn fits_width(raw: i64, width: u8) -> bool {
    let limit = 1i128 << width.min(64);
    let raw = raw as i128;
    -limit <= raw && raw < limit
}
