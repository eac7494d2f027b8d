//! Message definition.

use super::Signal;

/// A fixed-length frame layout identified by its address.
#[derive(Debug, Clone)]
pub struct Message {
    /// Human-readable name.
    pub name: String,
    /// Bus address, unique within a catalog.
    pub address: u32,
    /// Frame length in bytes.
    pub size: usize,
    /// Signals in declaration order.
    pub signals: Vec<Signal>,
}

impl Message {
    /// Create a message with no signals.
    pub fn new(name: &str, address: u32, size: usize) -> Self {
        Self {
            name: name.to_string(),
            address,
            size,
            signals: Vec::new(),
        }
    }

    /// Append a signal (builder style).
    pub fn signal(mut self, signal: Signal) -> Self {
        self.signals.push(signal);
        self
    }

    /// Append a signal.
    pub fn add_signal(&mut self, signal: Signal) {
        self.signals.push(signal);
    }

    /// Get a signal by name.
    pub fn get_signal(&self, name: &str) -> Option<&Signal> {
        self.signals.iter().find(|s| s.name == name)
    }

    /// The reserved `COUNTER` signal, if declared.
    pub fn counter_signal(&self) -> Option<&Signal> {
        self.signals.iter().find(|s| s.is_counter())
    }

    /// The reserved `CHECKSUM` signal, if declared.
    pub fn checksum_signal(&self) -> Option<&Signal> {
        self.signals.iter().find(|s| s.is_checksum())
    }
}
