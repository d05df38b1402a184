//! # Ring Buffer Module
//!
//! This module provides the circular (ring) buffer and its iterator.
//!
//! ## Plain English Explanation
//!
//! Imagine a circular conveyor belt with a fixed number of spots.
//! Every time a new item arrives:
//! 1. It goes on the belt at the next spot
//! 2. If the belt is full, the oldest item is taken off first
//!    (and handed to whoever registered an eviction handler)
//! 3. Anyone can look along the belt, oldest to newest, at any time
//!
//! This keeps the last N items around without using unbounded memory.

mod iter;
mod ring_buffer;

pub use iter::Iter;
pub use ring_buffer::RingBuffer;

/// Callback invoked with each item displaced from a full buffer.
///
/// Runs synchronously inside [`RingBuffer::add`], on the caller's thread.
pub type EvictHandler<T> = Box<dyn FnMut(T)>;
