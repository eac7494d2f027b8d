//! Packer configuration.

/// What to do when a field runs off the end of the frame buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Write the bits that fit and drop the rest.
    #[default]
    Truncate,
    /// Fail the encode with `BitFieldOverflow`.
    Strict,
}

/// Configuration for a [`FramePacker`](super::FramePacker).
#[derive(Debug, Clone, Default)]
pub struct PackerConfig {
    /// Handling of fields that do not fit the frame.
    pub overflow: OverflowPolicy,
    /// Reject raw values that do not fit their signal width.
    ///
    /// Off by default: out-of-range values are silently wrapped into the
    /// field's low bits.
    pub range_check: bool,
}

impl PackerConfig {
    /// Create the default (permissive) configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail on truncated fields and out-of-range values.
    pub fn strict() -> Self {
        Self {
            overflow: OverflowPolicy::Strict,
            range_check: true,
        }
    }

    /// Set the overflow policy.
    pub fn with_overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }

    /// Enable or disable range checking.
    pub fn with_range_check(mut self, range_check: bool) -> Self {
        self.range_check = range_check;
        self
    }
}
