//! Checksum registry for resolving family names at catalog load time.
//!
//! Catalog definitions name a checksum family per message (or once for the
//! whole catalog). The registry maps those names to algorithms so the
//! packer never dispatches on strings while encoding.

use std::collections::HashMap;
use std::sync::Arc;

use super::{ChecksumAlgorithm, ChecksumRef, FnChecksum};
use crate::error::{PackerError, Result};
use crate::schema::Signal;

/// Registry mapping family names to checksum algorithms.
#[derive(Default)]
pub struct ChecksumRegistry {
    families: HashMap<String, ChecksumRef>,
}

impl ChecksumRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an algorithm under `family`, replacing any previous one.
    pub fn register<A>(&mut self, family: &str, algorithm: A)
    where
        A: ChecksumAlgorithm,
    {
        self.families.insert(
            family.to_string(),
            ChecksumRef::new(family, Arc::new(algorithm)),
        );
    }

    /// Register a plain function or closure under `family`.
    pub fn register_fn<F>(&mut self, family: &str, func: F)
    where
        F: Fn(u32, &Signal, &[u8]) -> u64 + Send + Sync + 'static,
    {
        self.register(family, FnChecksum::new(func));
    }

    /// Get a handle by family name.
    pub fn get(&self, family: &str) -> Option<ChecksumRef> {
        self.families.get(family).cloned()
    }

    /// Get a handle by family name, failing if it is not registered.
    pub fn resolve(&self, family: &str) -> Result<ChecksumRef> {
        self.get(family)
            .ok_or_else(|| PackerError::UnknownChecksum(family.to_string()))
    }

    /// Check if a family is registered.
    pub fn contains(&self, family: &str) -> bool {
        self.families.contains_key(family)
    }

    /// Registered family names, sorted.
    pub fn families(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.families.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered families.
    pub fn len(&self) -> usize {
        self.families.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}
