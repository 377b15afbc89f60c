// src/ring/mod.rs

//! Fixed-capacity circular storage for scrollback rows and similar
//! append-heavy history.
//!
//! Logical element `i` (`i < len`) lives at `data[(start + i) % capacity]`.
//! Once the buffer is full, `write` evicts from the front by advancing
//! `start`. Reads never copy: [`RingBuffer::views`] hands out the (at most
//! two) contiguous slices covering the logical contents, and
//! [`RingCursor`] walks them as a single sequence.

mod cursor;

pub use cursor::{Bookmark, RingCursor};

use crate::config::ScrollbackConfig;
use log::{trace, warn};

#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    data: Box<[T]>,
    start: usize,
    len: usize,
    /// Elements pushed out of the front by `write` since creation.
    evicted: u64,
    /// Bumped by every mutation; used to detect stale bookmarks.
    generation: u64,
}

impl<T: Default + Clone> RingBuffer<T> {
    /// Creates an empty buffer holding at most `capacity` elements.
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = if capacity == 0 {
            warn!("RingBuffer capacity 0 requested, using 1");
            1
        } else {
            capacity
        };
        RingBuffer {
            data: vec![T::default(); capacity].into_boxed_slice(),
            start: 0,
            len: 0,
            evicted: 0,
            generation: 0,
        }
    }

    pub fn from_config(config: &ScrollbackConfig) -> Self {
        Self::new(config.capacity)
    }
}

impl<T> RingBuffer<T> {
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Physical index of logical element 0.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Current mutation counter. Any write, insert, delete or clear changes it.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of elements evicted from the front by `write` so far.
    #[inline]
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    /// Physical storage index of logical element `index`.
    /// Indices past `len` wrap like any other; callers check bounds.
    #[inline]
    pub fn physical_index(&self, index: usize) -> usize {
        (self.start + index) % self.capacity()
    }

    /// Absolute position of logical element `index`, counting every element
    /// ever evicted, so it stays stable while older rows scroll away.
    ///
    /// Only eviction by `write` is accounted for. `insert`, `delete_n` and
    /// `clear` move later elements without touching `evicted`, so an
    /// absolute position taken before one of them may name a different
    /// element afterwards. Compare [`generation`](Self::generation) or use a
    /// [`Bookmark`] when edits can happen in between.
    pub fn to_absolute(&self, index: usize) -> Option<u64> {
        (index < self.len).then(|| self.evicted + index as u64)
    }

    /// Logical index of an absolute position, or `None` if it was evicted
    /// or has not been written yet.
    pub fn to_relative(&self, absolute: u64) -> Option<usize> {
        let index = absolute.checked_sub(self.evicted)?;
        usize::try_from(index).ok().filter(|&i| i < self.len)
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        self.data.get(self.physical_index(index))
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.len {
            return None;
        }
        let physical = self.physical_index(index);
        self.data.get_mut(physical)
    }

    pub fn first(&self) -> Option<&T> {
        self.get(0)
    }

    pub fn last(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|i| self.get(i))
    }

    /// Appends `items`, evicting the oldest elements once full. Only the
    /// last `capacity` items of a long write survive, in input order.
    pub fn write<I: IntoIterator<Item = T>>(&mut self, items: I) {
        let capacity = self.capacity();
        let mut written = 0usize;
        for item in items {
            if self.len < capacity {
                let slot = self.physical_index(self.len);
                self.data[slot] = item;
                self.len += 1;
            } else {
                self.data[self.start] = item;
                self.start = (self.start + 1) % capacity;
                self.evicted += 1;
            }
            written += 1;
        }
        if written > 0 {
            self.generation += 1;
        }
        trace!(
            "ring write: {} items, len={} start={} evicted={}",
            written,
            self.len,
            self.start,
            self.evicted
        );
    }

    /// Inserts `items` before logical element `index`.
    ///
    /// Returns `false` and leaves the buffer untouched if the result would
    /// not fit. An `index` past the end is a debug assertion; release
    /// builds append instead.
    pub fn insert<I>(&mut self, index: usize, items: I) -> bool
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let items = items.into_iter();
        let count = items.len();
        if self.len + count > self.capacity() {
            trace!(
                "ring insert of {} items rejected: len={} capacity={}",
                count,
                self.len,
                self.capacity()
            );
            return false;
        }
        debug_assert!(index <= self.len, "insert index {} out of bounds (len {})", index, self.len);
        let index = index.min(self.len);
        if count == 0 {
            return true;
        }

        // Shift the tail right by `count`, back to front.
        for i in (index..self.len).rev() {
            let from = self.physical_index(i);
            let to = self.physical_index(i + count);
            self.data.swap(from, to);
        }
        for (offset, item) in items.enumerate() {
            let slot = self.physical_index(index + offset);
            self.data[slot] = item;
        }
        self.len += count;
        self.generation += 1;
        true
    }

    /// Removes up to `n` logical elements starting at `index` and returns
    /// how many were removed. Works whether or not the storage currently
    /// wraps. An `index` past the end is a debug assertion; release builds
    /// remove nothing.
    pub fn delete_n(&mut self, index: usize, n: usize) -> usize {
        if self.is_empty() || n == 0 {
            return 0;
        }
        debug_assert!(index < self.len, "delete index {} out of bounds (len {})", index, self.len);
        if index >= self.len {
            return 0;
        }
        let n = n.min(self.len - index);

        // Pull the tail left over the removed span, front to back; the
        // removed elements end up past the new end.
        for i in index..self.len - n {
            let from = self.physical_index(i + n);
            let to = self.physical_index(i);
            self.data.swap(from, to);
        }
        self.len -= n;
        if self.len == 0 {
            self.start = 0;
        }
        self.generation += 1;
        n
    }

    /// Forgets all elements without touching storage.
    pub fn clear(&mut self) {
        self.start = 0;
        self.len = 0;
        self.generation += 1;
    }

    /// The logical contents as (at most) two slices, split where the
    /// storage wraps. The second slice is empty when nothing wraps.
    pub fn views(&self) -> (&[T], &[T]) {
        let capacity = self.capacity();
        let end = self.start + self.len;
        let (head, tail) = self.data.split_at(self.start);
        if end <= capacity {
            (&tail[..self.len], &head[..0])
        } else {
            (tail, &head[..end - capacity])
        }
    }

    pub fn views_mut(&mut self) -> (&mut [T], &mut [T]) {
        let capacity = self.capacity();
        let end = self.start + self.len;
        let len = self.len;
        let (head, tail) = self.data.split_at_mut(self.start);
        if end <= capacity {
            (&mut tail[..len], &mut head[..0])
        } else {
            (tail, &mut head[..end - capacity])
        }
    }

    pub fn iter(&self) -> std::iter::Chain<std::slice::Iter<'_, T>, std::slice::Iter<'_, T>> {
        let (a, b) = self.views();
        a.iter().chain(b.iter())
    }

    /// A cursor positioned before the first element.
    pub fn cursor(&self) -> RingCursor<'_, T> {
        RingCursor::new(self)
    }

    /// Detached position that survives the borrow of a cursor.
    pub fn bookmark(&self, index: usize) -> Bookmark {
        Bookmark {
            index: index.min(self.len),
            generation: self.generation,
        }
    }

    /// A cursor at a bookmarked position, or `None` if the buffer changed
    /// since the bookmark was taken.
    pub fn cursor_at(&self, bookmark: Bookmark) -> Option<RingCursor<'_, T>> {
        if bookmark.generation != self.generation {
            trace!(
                "stale bookmark: generation {} != {}",
                bookmark.generation,
                self.generation
            );
            return None;
        }
        let mut cursor = self.cursor();
        cursor.set_position(bookmark.index);
        Some(cursor)
    }
}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = std::iter::Chain<std::slice::Iter<'a, T>, std::slice::Iter<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
