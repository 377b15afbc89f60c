// src/ring/cursor.rs

//! Bidirectional cursor over a [`RingBuffer`](super::RingBuffer).
//!
//! The cursor sits *between* elements, like a text caret: `next` returns the
//! element after it and steps over it, `prev` steps back and returns the
//! element it stepped over. So `next` followed by `prev` returns the same
//! element twice and leaves the cursor where it started. Neither wraps;
//! both return `None` at the ends.

use super::RingBuffer;

#[derive(Debug, Clone)]
pub struct RingCursor<'a, T> {
    first: &'a [T],
    second: &'a [T],
    pos: usize,
}

/// A cursor position detached from any borrow of the buffer. Resolved with
/// [`RingBuffer::cursor_at`], which refuses bookmarks older than the last
/// mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bookmark {
    pub(super) index: usize,
    pub(super) generation: u64,
}

impl Bookmark {
    pub fn index(&self) -> usize {
        self.index
    }
}

impl<'a, T> RingCursor<'a, T> {
    pub(super) fn new(buffer: &'a RingBuffer<T>) -> Self {
        let (first, second) = buffer.views();
        RingCursor { first, second, pos: 0 }
    }

    #[inline]
    fn element(&self, index: usize) -> Option<&'a T> {
        match index.checked_sub(self.first.len()) {
            None => self.first.get(index),
            Some(rest) => self.second.get(rest),
        }
    }

    /// Total number of elements, regardless of position.
    #[inline]
    pub fn len(&self) -> usize {
        self.first.len() + self.second.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of the element the next call to `next` would return.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    pub(super) fn set_position(&mut self, pos: usize) {
        self.pos = pos.min(self.len());
    }

    /// Steps back and returns the element stepped over.
    pub fn prev(&mut self) -> Option<&'a T> {
        let pos = self.pos.checked_sub(1)?;
        let item = self.element(pos)?;
        self.pos = pos;
        Some(item)
    }

    /// Before the first element.
    pub fn goto_start(&mut self) {
        self.pos = 0;
    }

    /// After the last element, so `prev` yields the last one.
    pub fn goto_end(&mut self) {
        self.pos = self.len();
    }

    /// Positions the cursor so `next` yields element `index`, clamped to
    /// the last element.
    pub fn goto_index(&mut self, index: usize) {
        self.pos = index.min(self.len().saturating_sub(1));
    }

    /// Clones up to `out.len()` following elements into `out`, advancing
    /// past them. Returns how many were produced.
    pub fn next_n(&mut self, out: &mut [T]) -> usize
    where
        T: Clone,
    {
        let mut produced = 0;
        for slot in out.iter_mut() {
            match Iterator::next(self) {
                Some(item) => *slot = item.clone(),
                None => break,
            }
            produced += 1;
        }
        produced
    }

    /// Clones up to `out.len()` preceding elements into `out` in the order
    /// `prev` yields them (nearest first). Returns how many were produced.
    pub fn prev_n(&mut self, out: &mut [T]) -> usize
    where
        T: Clone,
    {
        let mut produced = 0;
        for slot in out.iter_mut() {
            match self.prev() {
                Some(item) => *slot = item.clone(),
                None => break,
            }
            produced += 1;
        }
        produced
    }
}

impl<'a, T> Iterator for RingCursor<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let item = self.element(self.pos)?;
        self.pos += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len() - self.pos;
        (remaining, Some(remaining))
    }
}
