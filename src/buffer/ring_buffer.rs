//! # Ring Buffer Implementation
//!
//! A fixed-size circular buffer that overwrites old elements when full.
//!
//! ## Plain English
//!
//! Picture a circular track with numbered parking spots.
//! When all spots are full and a new car arrives,
//! the oldest car is towed away to make room, and whoever asked
//! to be told about tow-aways gets a call first.

use std::fmt;

use log::{debug, trace};

use super::iter::Iter;
use super::EvictHandler;
use crate::config::Config;
use crate::error::{RingBuffError, RingBuffResult};

/// A fixed-capacity ring buffer.
///
/// ## Properties
/// - Fixed capacity (doesn't grow)
/// - O(1) add and indexed lookup
/// - Automatically evicts the oldest item when full
/// - Maintains insertion order
/// - Optional eviction handler, called with every displaced item
pub struct RingBuffer<T> {
    /// Exactly `capacity` slots; `None` only before the first wrap
    slots: Vec<Option<T>>,

    /// Slot the next added item goes into
    write_cursor: usize,

    /// Number of live items
    count: usize,

    evict_handler: Option<EvictHandler<T>>,

    /// Name used in log records
    label: String,
}

impl<T> RingBuffer<T> {
    /// Creates a new ring buffer with the given capacity.
    ///
    /// Fails with [`RingBuffError::InvalidCapacity`] when `capacity` is 0.
    ///
    /// ## Example
    /// ```
    /// # use ringbuff::buffer::RingBuffer;
    /// let buffer: RingBuffer<i32> = RingBuffer::new(100).unwrap();
    /// assert_eq!(buffer.capacity(), 100);
    /// assert!(RingBuffer::<i32>::new(0).is_err());
    /// ```
    pub fn new(capacity: usize) -> RingBuffResult<Self> {
        Self::build(capacity, crate::config::DEFAULT_LABEL.to_string())
    }

    /// Creates a ring buffer from a [`Config`].
    ///
    /// The first validation problem is returned as
    /// [`RingBuffError::Config`], except a zero capacity which is always
    /// [`RingBuffError::InvalidCapacity`].
    pub fn with_config(config: &Config) -> RingBuffResult<Self> {
        if config.capacity == 0 {
            return Err(RingBuffError::InvalidCapacity(0));
        }
        if let Some(problem) = config.validate().into_iter().next() {
            return Err(problem.into());
        }

        Self::build(config.capacity, config.label.clone())
    }

    fn build(capacity: usize, label: String) -> RingBuffResult<Self> {
        if capacity == 0 {
            return Err(RingBuffError::InvalidCapacity(0));
        }

        debug!("Creating ring buffer '{}' with capacity {}", label, capacity);

        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);

        Ok(Self {
            slots,
            write_cursor: 0,
            count: 0,
            evict_handler: None,
            label,
        })
    }

    /// Adds an item to the buffer.
    ///
    /// If the buffer is full, the oldest item is evicted first: the
    /// eviction handler (if any) receives it before its slot is reused.
    /// Without a handler the evicted item is simply dropped.
    pub fn add(&mut self, item: T) {
        let cursor = self.write_cursor;

        if self.count == self.capacity() {
            let displaced = self.slots[cursor].take();
            let notified = self.evict_handler.is_some();

            if let (Some(handler), Some(displaced)) = (self.evict_handler.as_mut(), displaced) {
                handler(displaced);
            }

            trace!(
                "Ring buffer '{}' evicted slot {} (handler called: {})",
                self.label,
                cursor,
                notified
            );
        } else {
            self.count += 1;
        }

        self.slots[cursor] = Some(item);
        self.write_cursor = (cursor + 1) % self.capacity();
    }

    /// Returns the number of items currently stored.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Same as [`len`](Self::len).
    pub fn size(&self) -> usize {
        self.count
    }

    /// Returns true if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns true if the buffer is at capacity.
    ///
    /// Once full, a buffer stays full for the rest of its life.
    pub fn is_full(&self) -> bool {
        self.count == self.capacity()
    }

    /// Returns the maximum capacity.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the label used in log records.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the item at a logical index.
    ///
    /// `0` is the oldest item still held and `len() - 1` the newest.
    /// Anything past that is a miss, not an error.
    ///
    /// ## Example
    /// ```
    /// # use ringbuff::buffer::RingBuffer;
    /// let mut buffer = RingBuffer::new(2).unwrap();
    /// buffer.add('a');
    /// buffer.add('b');
    /// buffer.add('c');
    /// assert_eq!(buffer.get(0), Some(&'b'));
    /// assert_eq!(buffer.get(1), Some(&'c'));
    /// assert_eq!(buffer.get(2), None);
    /// ```
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.count {
            return None;
        }
        self.slots[self.physical_slot(index)].as_ref()
    }

    /// Returns the oldest item without removing it.
    pub fn oldest(&self) -> Option<&T> {
        self.get(0)
    }

    /// Returns the newest item without removing it.
    pub fn newest(&self) -> Option<&T> {
        self.count.checked_sub(1).and_then(|last| self.get(last))
    }

    /// Calls `visit` once per item, oldest to newest.
    pub fn for_each<F>(&self, visit: F)
    where
        F: FnMut(&T),
    {
        self.iter().for_each(visit);
    }

    /// Returns an iterator over all items (oldest to newest).
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Installs an eviction handler, replacing any previous one.
    ///
    /// Only evictions caused by later calls to [`add`](Self::add) are
    /// reported.
    pub fn set_evict_handler<F>(&mut self, handler: F)
    where
        F: FnMut(T) + 'static,
    {
        self.replace_evict_handler(Some(Box::new(handler)));
    }

    /// Removes the eviction handler; evicted items are dropped silently.
    pub fn clear_evict_handler(&mut self) {
        self.replace_evict_handler(None);
    }

    /// Swaps in a new handler (or none) and hands back the old one.
    pub fn replace_evict_handler(
        &mut self,
        handler: Option<EvictHandler<T>>,
    ) -> Option<EvictHandler<T>> {
        debug!(
            "Ring buffer '{}' eviction handler {}",
            self.label,
            if handler.is_some() { "installed" } else { "cleared" }
        );
        std::mem::replace(&mut self.evict_handler, handler)
    }

    /// Returns true if an eviction handler is installed.
    pub fn has_evict_handler(&self) -> bool {
        self.evict_handler.is_some()
    }

    /// Maps a logical index (0 = oldest) to its storage slot.
    ///
    /// `write_cursor - count` may go below zero, so `capacity` is added
    /// first to keep the operand non-negative before the modulo.
    pub(super) fn physical_slot(&self, index: usize) -> usize {
        let capacity = self.capacity();
        (self.write_cursor + capacity - self.count + index) % capacity
    }

    pub(super) fn slot(&self, physical: usize) -> Option<&T> {
        self.slots[physical].as_ref()
    }
}

impl<T: Clone> RingBuffer<T> {
    /// Returns cloned copies of all items (oldest first).
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T> Extend<T> for RingBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, items: I) {
        for item in items {
            self.add(item);
        }
    }
}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("label", &self.label)
            .field("capacity", &self.capacity())
            .field("len", &self.count)
            .field("items", &DebugItems(self))
            .field("evict_handler", &self.has_evict_handler())
            .finish()
    }
}

struct DebugItems<'a, T>(&'a RingBuffer<T>);

impl<T: fmt::Debug> fmt::Debug for DebugItems<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

// ============================================
// TESTS
// ============================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn filled(capacity: usize, items: impl IntoIterator<Item = i32>) -> RingBuffer<i32> {
        let mut buffer = RingBuffer::new(capacity).unwrap();
        buffer.extend(items);
        buffer
    }

    fn collect(buffer: &RingBuffer<i32>) -> Vec<i32> {
        let mut results = Vec::new();
        buffer.for_each(|item| results.push(*item));
        results
    }

    fn record_evictions(buffer: &mut RingBuffer<i32>) -> Rc<RefCell<Vec<i32>>> {
        let evicted = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&evicted);
        buffer.set_evict_handler(move |item| sink.borrow_mut().push(item));
        evicted
    }

    #[test]
    fn test_new_buffer() {
        let buffer: RingBuffer<i32> = RingBuffer::new(5).unwrap();
        assert!(buffer.is_empty());
        assert!(!buffer.is_full());
        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.capacity(), 5);
        assert!(!buffer.has_evict_handler());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let result = RingBuffer::<i32>::new(0);
        assert_eq!(result.unwrap_err(), RingBuffError::InvalidCapacity(0));
    }

    #[test]
    fn test_with_config() {
        let config = Config {
            capacity: 3,
            label: "recent".to_string(),
        };
        let buffer: RingBuffer<u8> = RingBuffer::with_config(&config).unwrap();
        assert_eq!(buffer.capacity(), 3);
        assert_eq!(buffer.label(), "recent");
    }

    #[test]
    fn test_with_config_errors() {
        let zero = Config::with_capacity(0);
        assert_eq!(
            RingBuffer::<u8>::with_config(&zero).unwrap_err(),
            RingBuffError::InvalidCapacity(0)
        );

        let unnamed = Config {
            capacity: 2,
            label: String::new(),
        };
        assert_eq!(
            RingBuffer::<u8>::with_config(&unnamed).unwrap_err(),
            RingBuffError::Config(ConfigError::EmptyLabel)
        );
    }

    #[test]
    fn test_empty_buffer() {
        let buffer: RingBuffer<i32> = RingBuffer::new(10).unwrap();

        assert_eq!(buffer.size(), 0);
        assert!(collect(&buffer).is_empty());
        assert_eq!(buffer.get(0), None);
        assert_eq!(buffer.oldest(), None);
        assert_eq!(buffer.newest(), None);
    }

    #[test]
    fn test_non_wrapped_buffer() {
        let mut buffer = RingBuffer::new(10).unwrap();
        let evicted = record_evictions(&mut buffer);
        buffer.extend(1..=10);

        assert_eq!(buffer.size(), 10);
        assert!(buffer.is_full());
        assert_eq!(collect(&buffer), (1..=10).collect::<Vec<_>>());
        assert!(evicted.borrow().is_empty());
    }

    #[test]
    fn test_wrapped_buffer_with_evict_handler() {
        let mut buffer = RingBuffer::new(10).unwrap();
        let evicted = record_evictions(&mut buffer);
        buffer.extend(1..=11);

        assert_eq!(buffer.size(), 10);
        assert_eq!(collect(&buffer), (2..=11).collect::<Vec<_>>());
        assert_eq!(*evicted.borrow(), vec![1]);
    }

    #[test]
    fn test_capacity_one() {
        let mut buffer = RingBuffer::new(1).unwrap();
        let evicted = record_evictions(&mut buffer);
        buffer.extend([5, 6, 7]);

        assert_eq!(buffer.size(), 1);
        assert_eq!(collect(&buffer), vec![7]);
        assert_eq!(*evicted.borrow(), vec![5, 6]);
        assert_eq!(buffer.oldest(), buffer.newest());
    }

    #[test]
    fn test_overflow_without_handler() {
        let buffer = filled(3, 1..=5);

        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.oldest(), Some(&3));
        assert_eq!(buffer.newest(), Some(&5));
        assert_eq!(buffer.to_vec(), vec![3, 4, 5]);
    }

    #[test]
    fn test_get_matches_traversal() {
        let buffer = filled(4, 1..=6);

        assert_eq!(buffer.get(0), Some(&3));
        assert_eq!(buffer.get(3), Some(&6));
        assert_eq!(buffer.get(4), None);
        assert_eq!(buffer.get(usize::MAX), None);
    }

    #[test]
    fn test_get_while_filling() {
        let buffer = filled(5, [10, 20]);

        assert_eq!(buffer.get(0), Some(&10));
        assert_eq!(buffer.get(1), Some(&20));
        assert_eq!(buffer.get(2), None);
    }

    #[test]
    fn test_handler_only_sees_later_evictions() {
        let mut buffer = filled(2, 1..=4);
        let evicted = record_evictions(&mut buffer);

        buffer.add(5);
        assert_eq!(*evicted.borrow(), vec![3]);
    }

    #[test]
    fn test_replace_and_clear_handler() {
        let mut buffer = filled(2, [1, 2]);
        let first = record_evictions(&mut buffer);
        buffer.add(3);

        let second = Rc::new(RefCell::new(Vec::<i32>::new()));
        let sink = Rc::clone(&second);
        let previous = buffer.replace_evict_handler(Some(Box::new(move |item: i32| {
            sink.borrow_mut().push(item)
        })));
        assert!(previous.is_some());
        buffer.add(4);

        buffer.clear_evict_handler();
        assert!(!buffer.has_evict_handler());
        buffer.add(5);

        assert_eq!(*first.borrow(), vec![1]);
        assert_eq!(*second.borrow(), vec![2]);
        assert_eq!(buffer.to_vec(), vec![4, 5]);
    }

    #[test]
    fn test_evicted_items_are_moved_out() {
        let mut buffer = RingBuffer::new(2).unwrap();
        let evicted = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&evicted);
        buffer.set_evict_handler(move |line: String| sink.borrow_mut().push(line));

        buffer.extend(["a", "b", "c"].map(String::from));
        assert_eq!(*evicted.borrow(), vec!["a".to_string()]);
        assert_eq!(buffer.to_vec(), vec!["b".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_dropped_items_without_handler() {
        let tracker = Rc::new(());
        let mut buffer = RingBuffer::new(2).unwrap();
        for _ in 0..5 {
            buffer.add(Rc::clone(&tracker));
        }
        // the original plus two held clones
        assert_eq!(Rc::strong_count(&tracker), 3);
    }

    #[test]
    fn test_traversal_is_idempotent() {
        let buffer = filled(3, 1..=7);
        assert_eq!(collect(&buffer), collect(&buffer));
        assert_eq!(buffer.iter().collect::<Vec<_>>(), (&buffer).into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_debug_output() {
        let buffer = filled(3, 1..=4);
        let rendered = format!("{:?}", buffer);
        assert!(rendered.contains("items: [2, 3, 4]"));
        assert!(rendered.contains("evict_handler: false"));
    }

    proptest! {
        #[test]
        fn proptest_size_is_min_of_inserts_and_capacity(
            capacity in 1usize..32,
            items in prop::collection::vec(any::<i32>(), 0..100)
        ) {
            let buffer = filled(capacity, items.iter().copied());
            prop_assert_eq!(buffer.len(), items.len().min(capacity));
        }

        #[test]
        fn proptest_traversal_keeps_newest_in_order(
            capacity in 1usize..32,
            items in prop::collection::vec(any::<i32>(), 0..100)
        ) {
            let buffer = filled(capacity, items.iter().copied());
            let keep_from = items.len().saturating_sub(capacity);
            prop_assert_eq!(collect(&buffer), items[keep_from..].to_vec());
        }

        #[test]
        fn proptest_evictions_in_displacement_order(
            capacity in 1usize..32,
            items in prop::collection::vec(any::<i32>(), 0..100)
        ) {
            let mut buffer = RingBuffer::new(capacity).unwrap();
            let evicted = record_evictions(&mut buffer);
            buffer.extend(items.iter().copied());

            let evicted_len = items.len().saturating_sub(capacity);
            prop_assert_eq!(evicted.borrow().clone(), items[..evicted_len].to_vec());
        }

        #[test]
        fn proptest_get_agrees_with_traversal(
            capacity in 1usize..32,
            items in prop::collection::vec(any::<i32>(), 0..100),
            probe in 0usize..64
        ) {
            let buffer = filled(capacity, items.iter().copied());
            let traversed = collect(&buffer);

            for (i, item) in traversed.iter().enumerate() {
                prop_assert_eq!(buffer.get(i), Some(item));
            }
            prop_assert_eq!(buffer.get(buffer.len() + probe), None);
        }
    }
}
