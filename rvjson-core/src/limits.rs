//! Resource limits for parsing.
//!
//! The grammar recursion (object → value → array → value → ...) uses the
//! call stack, so nesting depth is bounded explicitly to keep adversarial
//! input from exhausting it.

/// Default maximum nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Parser limits.
///
/// Depth counts open objects and arrays; the top-level object is depth 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Limits {
    /// Maximum nesting depth of objects and arrays.
    pub max_depth: usize,
}

impl Limits {
    /// Limits with the given maximum depth.
    pub const fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// No depth limit. Only use on trusted input.
    pub const fn unbounded() -> Self {
        Self {
            max_depth: usize::MAX,
        }
    }

    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}
