use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;

use super::BlockDeque;
use super::block_map::BlockMap;
use super::index::Geometry;

/// Half-open range of logical offsets still to be visited.
#[derive(Clone, Copy, Debug)]
struct Span {
    head: usize,
    tail: usize,
}

impl Span {
    #[inline(always)]
    fn len(&self) -> usize {
        self.tail - self.head
    }

    #[inline(always)]
    fn next(&mut self) -> Option<usize> {
        if self.head == self.tail {
            None
        } else {
            self.head += 1;
            Some(self.head - 1)
        }
    }

    #[inline(always)]
    fn next_back(&mut self) -> Option<usize> {
        if self.head == self.tail {
            None
        } else {
            self.tail -= 1;
            Some(self.tail)
        }
    }
}

/// Immutable front-to-back iterator over a [`BlockDeque`].
pub struct Iter<'a, T> {
    map: &'a BlockMap<T>,
    geometry: Geometry,
    span: Span,
}

impl<'a, T> Iter<'a, T> {
    pub(super) fn new(deque: &'a BlockDeque<T>) -> Self {
        Self {
            map: &deque.map,
            geometry: deque.map.geometry(),
            span: Span {
                head: deque.front,
                tail: deque.front + deque.len,
            },
        }
    }

    #[inline(always)]
    fn element(&self, offset: usize) -> &'a T {
        // SAFETY: every offset in the span is live, so its block is allocated
        // and the slot initialised.
        unsafe { &*self.map.slot_ptr(self.geometry.resolve(offset)).unwrap_unchecked() }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            map: self.map,
            geometry: self.geometry,
            span: self.span,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        self.span.next().map(|offset| self.element(offset))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.span.len();
        (len, Some(len))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        self.span.next_back().map(|offset| self.element(offset))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Mutable front-to-back iterator over a [`BlockDeque`].
pub struct IterMut<'a, T> {
    map: &'a BlockMap<T>,
    geometry: Geometry,
    span: Span,
    _marker: PhantomData<&'a mut T>,
}

impl<'a, T> IterMut<'a, T> {
    pub(super) fn new(deque: &'a mut BlockDeque<T>) -> Self {
        let geometry = deque.map.geometry();
        let span = Span {
            head: deque.front,
            tail: deque.front + deque.len,
        };
        Self {
            map: &deque.map,
            geometry,
            span,
            _marker: PhantomData,
        }
    }

    #[inline(always)]
    fn element(&self, offset: usize) -> &'a mut T {
        // SAFETY: offsets are live and each is yielded once.  Blocks are
        // separate allocations, so the shared borrow of the map array does not
        // cover the elements handed out.
        unsafe { &mut *self.map.slot_ptr(self.geometry.resolve(offset)).unwrap_unchecked() }
    }
}

impl<T> fmt::Debug for IterMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut")
            .field("remaining", &self.span.len())
            .finish()
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        self.span.next().map(|offset| self.element(offset))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.span.len();
        (len, Some(len))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a mut T> {
        self.span.next_back().map(|offset| self.element(offset))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator returned by [`BlockDeque::into_iter`].
pub struct IntoIter<T> {
    deque: BlockDeque<T>,
}

impl<T> IntoIter<T> {
    pub(super) fn new(deque: BlockDeque<T>) -> Self {
        Self { deque }
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.deque).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.deque.take_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.deque.len();
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.deque.take_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}
