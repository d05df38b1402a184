//! # Error Types Module
//!
//! This module defines the error types used throughout ringbuff.
//!
//! ## Plain English Explanation
//!
//! A ring buffer has very little that can go wrong. Once it exists, every
//! operation succeeds: lookups that miss return `None` and evictions are
//! normal steady-state behavior, not failures.
//!
//! The only real problem is asking for a buffer that can't hold anything:
//!
//! - "InvalidCapacity: a buffer of size 0 (or -3) is useless"
//! - "Config: the settings you handed me don't make sense"

use thiserror::Error;

// ============================================
// MAIN ERROR
// ============================================

/// The main error type for ringbuff
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RingBuffError {
    /// The requested capacity is zero or negative
    ///
    /// ## Examples
    /// - `RingBuffer::new(0)`
    /// - parsing `"-4"` as a capacity
    ///
    /// The signed value is kept so user-supplied sizes can be echoed back.
    #[error("capacity must be positive, got {0}")]
    InvalidCapacity(i64),

    /// The configuration failed validation
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Convenience alias used by every fallible ringbuff operation.
pub type RingBuffResult<T> = Result<T, RingBuffError>;

// ============================================
// CONFIGURATION ERRORS
// ============================================

/// Errors that can occur with configuration values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Capacity of zero slots
    #[error("buffer capacity must be at least 1")]
    ZeroCapacity,

    /// Label is empty or whitespace
    #[error("buffer label must not be empty")]
    EmptyLabel,

    /// Capacity text is not an integer
    #[error("'{0}' is not a valid buffer capacity")]
    UnparsableCapacity(String),
}

// ============================================
// TESTS
// ============================================
