//! # Configuration Module
//!
//! Settings used to build a [`RingBuffer`](crate::buffer::RingBuffer).
//!
//! ## Plain English Explanation
//!
//! A buffer only needs to know two things up front: how many items to keep
//! and what to call itself in log output. This module holds those settings,
//! checks them, and turns user-typed capacities (say, a command-line
//! argument) into something the buffer accepts.

use crate::error::{ConfigError, RingBuffError, RingBuffResult};

/// Capacity used by [`Config::default`].
pub const DEFAULT_CAPACITY: usize = 10;

/// Label used by [`Config::default`].
pub const DEFAULT_LABEL: &str = "ringbuff";

// ============================================
// MAIN CONFIGURATION
// ============================================

/// All configuration options for a ring buffer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// How many items to keep before the oldest is evicted
    ///
    /// ## Limits
    /// - Minimum: 1
    /// - Fixed once the buffer is built
    pub capacity: usize,

    /// Name that shows up in log records
    ///
    /// Handy when an application keeps several buffers around.
    pub label: String,
}

impl Config {
    /// Creates a configuration with the default label and the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Validates the configuration and returns errors if invalid
    ///
    /// ## Plain English
    /// Returns a list of problems, or empty if all is well.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.capacity == 0 {
            errors.push(ConfigError::ZeroCapacity);
        }
        if self.label.trim().is_empty() {
            errors.push(ConfigError::EmptyLabel);
        }

        errors
    }

    /// Parses a user-supplied capacity
    ///
    /// Surrounding whitespace is ignored. Text that is not an integer is a
    /// [`ConfigError::UnparsableCapacity`]; integers below 1 are
    /// [`RingBuffError::InvalidCapacity`].
    ///
    /// ## Example
    /// ```
    /// # use ringbuff::{Config, RingBuffError};
    /// assert_eq!(Config::parse_capacity(" 32 ").unwrap(), 32);
    /// assert_eq!(
    ///     Config::parse_capacity("-1"),
    ///     Err(RingBuffError::InvalidCapacity(-1))
    /// );
    /// ```
    pub fn parse_capacity(raw: &str) -> RingBuffResult<usize> {
        let trimmed = raw.trim();
        let value: i64 = trimmed
            .parse()
            .map_err(|_| ConfigError::UnparsableCapacity(trimmed.to_string()))?;

        if value <= 0 {
            return Err(RingBuffError::InvalidCapacity(value));
        }

        usize::try_from(value).map_err(|_| ConfigError::UnparsableCapacity(trimmed.to_string()).into())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            label: DEFAULT_LABEL.to_string(),
        }
    }
}

// ============================================
// TESTS
// ============================================
