//! Checksum module - pluggable frame checksum algorithms.
//!
//! Provides:
//! - [`ChecksumAlgorithm`] - the capability a checksum family implements
//! - [`ChecksumRegistry`] - maps family names to algorithms at catalog load time
//! - [`ChecksumRef`] - a named, shareable handle stored on `CHECKSUM` signals
//!
//! Concrete algorithms belong to the vehicle families that define them; this
//! crate only invokes them.
//!
//! # Example
//!
//! ```
//! use canpack::checksum::ChecksumRegistry;
//!
//! let mut registry = ChecksumRegistry::new();
//! registry.register_fn("xor", |_address, _signal, frame| {
//!     frame.iter().fold(0u8, |acc, b| acc ^ b) as u64
//! });
//!
//! assert!(registry.contains("xor"));
//! ```

mod registry;

use std::fmt;
use std::sync::Arc;

use crate::schema::Signal;

pub use registry::ChecksumRegistry;

/// A checksum family.
///
/// `compute` receives the message address, the `CHECKSUM` signal and the
/// frame as packed so far, counter included. The checksum field holds the
/// caller-supplied `CHECKSUM` value, or zero if none was given. The returned
/// value is masked to the signal width and overwrites that field.
pub trait ChecksumAlgorithm: Send + Sync + 'static {
    /// Compute the checksum for one frame.
    fn compute(&self, address: u32, signal: &Signal, frame: &[u8]) -> u64;
}

/// Wrapper that adapts a plain function or closure into a [`ChecksumAlgorithm`].
pub struct FnChecksum<F>
where
    F: Fn(u32, &Signal, &[u8]) -> u64 + Send + Sync + 'static,
{
    func: F,
}

impl<F> FnChecksum<F>
where
    F: Fn(u32, &Signal, &[u8]) -> u64 + Send + Sync + 'static,
{
    /// Wrap a function.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> ChecksumAlgorithm for FnChecksum<F>
where
    F: Fn(u32, &Signal, &[u8]) -> u64 + Send + Sync + 'static,
{
    #[inline]
    fn compute(&self, address: u32, signal: &Signal, frame: &[u8]) -> u64 {
        (self.func)(address, signal, frame)
    }
}

/// Named handle to a registered checksum algorithm.
///
/// Cheap to clone; every message of a family shares the same algorithm.
#[derive(Clone)]
pub struct ChecksumRef {
    family: Arc<str>,
    algorithm: Arc<dyn ChecksumAlgorithm>,
}

impl ChecksumRef {
    /// Create a handle from a family name and an algorithm.
    pub fn new(family: &str, algorithm: Arc<dyn ChecksumAlgorithm>) -> Self {
        Self {
            family: Arc::from(family),
            algorithm,
        }
    }

    /// Wrap a closure directly, bypassing a registry.
    pub fn from_fn<F>(family: &str, func: F) -> Self
    where
        F: Fn(u32, &Signal, &[u8]) -> u64 + Send + Sync + 'static,
    {
        Self::new(family, Arc::new(FnChecksum::new(func)))
    }

    /// Family name this algorithm was registered under.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Compute the checksum for one frame.
    #[inline]
    pub fn compute(&self, address: u32, signal: &Signal, frame: &[u8]) -> u64 {
        self.algorithm.compute(address, signal, frame)
    }
}

impl fmt::Debug for ChecksumRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChecksumRef")
            .field("family", &self.family)
            .finish_non_exhaustive()
    }
}
