//! Rolling message counters.
//!
//! Stores the last counter value sent for each message address. The first
//! frame of an address carries 0; every following frame carries the last
//! value plus one, modulo the counter width.
//!
//! One counter per message address, owned by a [`FramePacker`](super::FramePacker)
//! instance. All reads and updates go through a single mutex, so concurrent
//! encoders for the same address see the counter advance in a total order and
//! never lose an increment.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::bit_field::mask;
use crate::error::Result;

/// Counter to transmit after `last`, wrapping at `width` bits.
///
/// An address that was never seen starts at 0.
#[inline]
pub fn next_counter(last: Option<u64>, width: u8) -> u64 {
    match last {
        Some(last) => last.wrapping_add(1) & mask(width),
        None => 0,
    }
}

/// Counter values keyed by message address.
#[derive(Debug, Default)]
pub struct CounterState {
    values: Mutex<HashMap<u32, u64>>,
}

impl CounterState {
    /// Create an empty counter map.
    pub fn new() -> Self {
        Self::default()
    }

    // The map only holds integers, so a poisoned guard is still consistent.
    fn lock(&self) -> MutexGuard<'_, HashMap<u32, u64>> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with the last counter used for `address` and store the value
    /// it returns.
    ///
    /// The lock is held for the whole call. If `f` fails, the stored counter
    /// is left as it was.
    pub fn update<F>(&self, address: u32, f: F) -> Result<u64>
    where
        F: FnOnce(Option<u64>) -> Result<u64>,
    {
        let mut values = self.lock();
        let value = f(values.get(&address).copied())?;
        values.insert(address, value);
        Ok(value)
    }

    /// Last counter used for `address`, if any frame touched it yet.
    pub fn get(&self, address: u32) -> Option<u64> {
        self.lock().get(&address).copied()
    }

    /// Forget all counters.
    pub fn reset(&self) {
        self.lock().clear();
    }

    /// Number of addresses with a stored counter.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if no counter has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
