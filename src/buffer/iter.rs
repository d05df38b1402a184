//! Borrowing iterator over a [`RingBuffer`], oldest item first.

use std::iter::FusedIterator;

use super::RingBuffer;

/// Iterator returned by [`RingBuffer::iter`].
///
/// Walks logical indices, so it never needs to know where the wrap-around
/// point sits in storage. Each call to `iter()` starts over from the oldest
/// item.
pub struct Iter<'a, T> {
    buffer: &'a RingBuffer<T>,
    /// Next logical index from the front
    front: usize,
    /// One past the next logical index from the back
    back: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(super) fn new(buffer: &'a RingBuffer<T>) -> Self {
        Self {
            buffer,
            front: 0,
            back: buffer.len(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let slot = self.buffer.physical_slot(self.front);
        self.front += 1;
        self.buffer.slot(slot)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.buffer.slot(self.buffer.physical_slot(self.back))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            buffer: self.buffer,
            front: self.front,
            back: self.back,
        }
    }
}
