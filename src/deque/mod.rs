//! Block-mapped double-ended queue.
//!
//! # Layout
//! Elements live in fixed-size blocks (see [`index::block_capacity`]).  A
//! circular map of `map_capacity` block entries addresses them: logical offset
//! `i` sits in block `(i / block_capacity) mod map_capacity`, column
//! `i mod block_capacity`.  The live range is `[front, front + len)`.
//!
//! # Insertion
//! [`BlockDeque::insert`] shifts whichever side of the insertion point is
//! shorter by one slot:
//! - at or before the midpoint, the prefix moves one slot toward the front and
//!   `front` steps back (wrapping to the last slot of the map);
//! - past the midpoint, the suffix moves one slot toward the back.
//!
//! The map is allocated on the first insertion with 8 blocks, blocks are
//! allocated on first write, and the map doubles when the edge being extended
//! is block aligned and at most one block's worth of room is left.  The map is
//! never shrunk; [`BlockDeque::clear`] frees everything.

mod block_map;
pub mod index;
mod iter;
mod position;

use core::fmt;
use core::ops::{Index, IndexMut};
use core::ptr;

use log::trace;

pub use iter::{IntoIter, Iter, IterMut};
pub use position::Position;

use crate::error::DequeError;
use block_map::BlockMap;
use index::Geometry;
use position::DequeId;

/// A double-ended queue stored as a circular map of fixed-size blocks.
///
/// Insertion at any position costs `O(min(i, len - i))` element moves plus an
/// occasional map doubling.  Positions ([`Position`]) are detached offsets that
/// the deque resolves on every access.
///
/// # Examples
/// ```rust
/// use block_deque::BlockDeque;
///
/// let mut d = BlockDeque::new();
/// d.insert(d.end(), 'a');
/// d.insert(d.end(), 'b');
/// d.insert(d.end(), 'c');
/// d.insert(d.begin() + 1, 'z');
///
/// assert_eq!(d.iter().collect::<String>(), "azbc");
/// assert_eq!(d[d.begin()], 'a');
/// ```
pub struct BlockDeque<T> {
    map: BlockMap<T>,
    front: usize,
    len: usize,
    id: DequeId,
}

impl<T> BlockDeque<T> {
    /// Creates an empty deque.  Nothing is allocated until the first insertion.
    pub fn new() -> Self {
        Self {
            map: BlockMap::new(),
            front: 0,
            len: 0,
            id: DequeId::fresh(),
        }
    }

    /// Returns the number of elements.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the deque holds no elements.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of block entries in the map (zero before the first insertion).
    #[inline(always)]
    pub fn map_capacity(&self) -> usize {
        self.map.capacity()
    }

    /// Elements per block for `T`.
    #[inline(always)]
    pub const fn block_capacity(&self) -> usize {
        index::block_capacity::<T>()
    }

    /// Position of the first element.
    #[inline(always)]
    pub fn begin(&self) -> Position {
        Position::new(self.id, self.front)
    }

    /// Position one past the last element.
    #[inline(always)]
    pub fn end(&self) -> Position {
        Position::new(self.id, self.front + self.len)
    }

    /// Distance of `position` from the front, if it is a valid insertion point.
    ///
    /// Offsets are taken modulo the span of the current map, so a position
    /// held across a wrap of the front offset still measures from `begin`.
    pub fn index_of(&self, position: Position) -> Result<usize, DequeError> {
        if position.owner != self.id {
            return Err(DequeError::ForeignPosition);
        }
        let index = position - self.begin();
        if (0..=self.len as isize).contains(&index) {
            return Ok(index as usize);
        }
        match self.reduced_distance(position) {
            Some(reduced) if reduced <= self.len => Ok(reduced),
            _ => Err(DequeError::OutOfBounds {
                index,
                len: self.len,
            }),
        }
    }

    /// Distance from the front to `position`, reduced modulo the span.
    #[inline]
    fn reduced_distance(&self, position: Position) -> Option<usize> {
        let span = self.geometry().span();
        (span > 0).then(|| position.offset.wrapping_sub(self.front) % span)
    }

    /// Offset of `position` if it designates a live element of this deque.
    #[inline]
    fn live_offset(&self, position: Position) -> Option<usize> {
        if position.owner != self.id {
            return None;
        }
        self.reduced_distance(position)
            .filter(|&distance| distance < self.len)
            .map(|distance| self.front + distance)
    }

    /// # Safety
    /// `offset` must be live, so that its block is allocated.
    #[inline(always)]
    unsafe fn element_ptr(&self, offset: usize) -> *mut T {
        unsafe {
            self.map
                .slot_ptr(self.map.geometry().resolve(offset))
                .unwrap_unchecked()
        }
    }

    /// Resolves `position` to the element it designates.
    ///
    /// Returns `None` for positions of other deques and for offsets outside
    /// `[begin, end)`.
    #[inline]
    pub fn resolve(&self, position: Position) -> Option<&T> {
        self.live_offset(position)
            .map(|offset| unsafe { &*self.element_ptr(offset) })
    }

    /// Mutable counterpart of [`resolve`](Self::resolve).
    #[inline]
    pub fn resolve_mut(&mut self, position: Position) -> Option<&mut T> {
        self.live_offset(position)
            .map(|offset| unsafe { &mut *self.element_ptr(offset) })
    }

    /// Returns the element `index` places from the front, or `None`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        (index < self.len).then(|| unsafe { &*self.element_ptr(self.front + index) })
    }

    /// Mutable counterpart of [`get`](Self::get).
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        (index < self.len).then(|| unsafe { &mut *self.element_ptr(self.front + index) })
    }

    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    pub fn back(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|last| self.get(last))
    }

    /// Inserts `value` so that it becomes the element at `position`.
    ///
    /// Returns the position of the inserted element.  Every other position
    /// held across this call may now refer to a different element.
    ///
    /// # Panics
    /// If `position` belongs to another deque or lies outside `[begin, end]`.
    pub fn insert(&mut self, position: Position, value: T) -> Position {
        match self.index_of(position) {
            Ok(index) => self.insert_at(index, value),
            Err(err) => panic!("BlockDeque::insert: {err}"),
        }
    }

    /// Like [`insert`](Self::insert), but reports an invalid position instead
    /// of panicking.  On error the deque is untouched and `value` is dropped.
    pub fn try_insert(&mut self, position: Position, value: T) -> Result<Position, DequeError> {
        let index = self.index_of(position)?;
        Ok(self.insert_at(index, value))
    }

    /// Prepends `value`.
    #[inline]
    pub fn push_front(&mut self, value: T) {
        self.insert_at(0, value);
    }

    /// Appends `value`.
    #[inline]
    pub fn push_back(&mut self, value: T) {
        self.insert_at(self.len, value);
    }

    fn insert_at(&mut self, index: usize, value: T) -> Position {
        debug_assert!(index <= self.len);

        if self.len == 0 {
            self.map.ensure_initial_capacity();
            let geometry = self.geometry();
            // Park the first element on the last slot so that front inserts
            // walk backward through unused blocks.
            self.front = geometry.span() - 1;
            unsafe { self.map.write(geometry.resolve(self.front + index), value) };
        } else if index <= self.len / 2 {
            self.grow_if_nearly_full(self.front);
            let geometry = self.geometry();
            debug_assert!(self.len < geometry.span());

            // Lowest offset first: each write lands on the slot just vacated.
            for offset in self.front..self.front + index {
                let to = geometry.resolve(offset + geometry.span() - 1);
                unsafe { self.map.relocate(geometry.resolve(offset), to) };
            }
            self.front = geometry.preceding(self.front);
            unsafe { self.map.write(geometry.resolve(self.front + index), value) };
        } else {
            self.grow_if_nearly_full(self.front + self.len);
            let geometry = self.geometry();
            debug_assert!(self.len < geometry.span());

            // Highest offset first, so no element is overwritten before it moves.
            for offset in (self.front + index..self.front + self.len).rev() {
                let to = geometry.resolve(offset + 1);
                unsafe { self.map.relocate(geometry.resolve(offset), to) };
            }
            unsafe { self.map.write(geometry.resolve(self.front + index), value) };
        }

        self.front = self.geometry().wrap(self.front);
        self.len += 1;
        Position::new(self.id, self.front + index)
    }

    /// Doubles the map when `edge` (front, or front + len) triggers the
    /// nearly-full predicate.
    #[inline]
    fn grow_if_nearly_full(&mut self, edge: usize) {
        if self.geometry().is_nearly_full(edge, self.len) {
            // SAFETY: `[front, front + len)` is exactly the live range and the
            // front offset is kept reduced below the span.
            unsafe { self.map.grow_double(self.front, self.len) };
        }
    }

    /// Drops every element and frees all blocks and the map.
    ///
    /// The next insertion allocates a fresh map, exactly as on a new deque.
    pub fn clear(&mut self) {
        if self.map.capacity() == 0 {
            return;
        }
        trace!("BlockDeque::clear {} elements", self.len);
        let (front, len) = (self.front, self.len);
        self.front = 0;
        self.len = 0;
        if core::mem::needs_drop::<T>() {
            for offset in front..front + len {
                unsafe { ptr::drop_in_place(self.element_ptr(offset)) };
            }
        }
        self.map.release();
    }

    /// Moves the front element out.
    pub(crate) fn take_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let value = unsafe { ptr::read(self.element_ptr(self.front)) };
        self.front = self.geometry().wrap(self.front + 1);
        self.len -= 1;
        Some(value)
    }

    /// Moves the back element out.
    pub(crate) fn take_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        Some(unsafe { ptr::read(self.element_ptr(self.front + self.len)) })
    }

    /// Front-to-back iterator.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Front-to-back iterator yielding mutable references.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }

    #[inline(always)]
    pub(crate) fn geometry(&self) -> Geometry {
        self.map.geometry()
    }
}

impl<T> Drop for BlockDeque<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for BlockDeque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for BlockDeque<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for BlockDeque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for BlockDeque<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for BlockDeque<T> {}

impl<T> Extend<T> for BlockDeque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<T> FromIterator<T> for BlockDeque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut deque = Self::new();
        deque.extend(iter);
        deque
    }
}

impl<T> IntoIterator for BlockDeque<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a BlockDeque<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut BlockDeque<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

impl<T> Index<Position> for BlockDeque<T> {
    type Output = T;

    fn index(&self, position: Position) -> &T {
        match self.resolve(position) {
            Some(value) => value,
            None => panic!("position {position:?} does not designate an element of this deque"),
        }
    }
}

impl<T> IndexMut<Position> for BlockDeque<T> {
    fn index_mut(&mut self, position: Position) -> &mut T {
        match self.resolve_mut(position) {
            Some(value) => value,
            None => panic!("position {position:?} does not designate an element of this deque"),
        }
    }
}

impl<T> Index<usize> for BlockDeque<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        let len = self.len;
        match self.get(index) {
            Some(value) => value,
            None => panic!("index out of bounds: the len is {len} but the index is {index}"),
        }
    }
}

impl<T> IndexMut<usize> for BlockDeque<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len;
        match self.get_mut(index) {
            Some(value) => value,
            None => panic!("index out of bounds: the len is {len} but the index is {index}"),
        }
    }
}
