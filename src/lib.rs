//! # ringbuff
//!
//! A fixed-capacity ring buffer that keeps the most recent N items,
//! evicts the oldest once full, and can tell you about every eviction.
//!
//! ## Architecture Overview
//!
//! - `buffer`: the ring buffer, its iterator and the eviction handler type
//! - `config`: buffer settings and capacity parsing
//! - `error`: error types
//!
//! ## Example
//! ```
//! use ringbuff::RingBuffer;
//!
//! let mut recent = RingBuffer::new(3)?;
//! recent.extend(1..=5);
//! assert_eq!(recent.to_vec(), vec![3, 4, 5]);
//! assert_eq!(recent.get(0), Some(&3));
//! # Ok::<(), ringbuff::RingBuffError>(())
//! ```

// ============================================
// MODULE DECLARATIONS
// ============================================

pub mod buffer;
pub mod config;
pub mod error;

// ============================================
// RE-EXPORTS
// ============================================

pub use buffer::{EvictHandler, RingBuffer};
pub use config::Config;
pub use error::{ConfigError, RingBuffError, RingBuffResult};

/// Initialize logging for the host process.
///
/// Defaults to `Info`; `RUST_LOG` overrides it. Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

// ============================================
// TESTS
// ============================================
