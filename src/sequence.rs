use std::collections::VecDeque;

use crate::BlockDeque;

// ─── AnySequence ──────────────────────────────────────────────────────────────

/// An object-safe abstraction over ordered, index-addressable sequences.
///
/// Implemented by `Vec<T>`, `VecDeque<T>` and [`BlockDeque<T>`] so that clients
/// such as [`Polynomial`](crate::Polynomial) can store their items in any of
/// them.  Indices count from the front.
pub trait AnySequence<T> {
    /// Returns the number of elements.
    fn len(&self) -> usize;
    /// Returns `true` if the sequence contains no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Returns a shared reference to the element at `index`, or `None`.
    fn get(&self, index: usize) -> Option<&T>;
    /// Returns an exclusive reference to the element at `index`, or `None`.
    fn get_mut(&mut self, index: usize) -> Option<&mut T>;
    /// Inserts `value` so that it ends up at `index`.
    ///
    /// # Panics
    /// If `index > len`.
    fn insert(&mut self, index: usize, value: T);
    /// Appends `value`.
    fn push_back(&mut self, value: T) {
        let len = self.len();
        self.insert(len, value);
    }
    /// Removes all elements.
    fn clear(&mut self);
}

impl<T> AnySequence<T> for Vec<T> {
    fn len(&self) -> usize {
        self.len()
    }
    fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }
    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }
    fn insert(&mut self, index: usize, value: T) {
        self.insert(index, value);
    }
    fn push_back(&mut self, value: T) {
        self.push(value);
    }
    fn clear(&mut self) {
        self.clear();
    }
}

impl<T> AnySequence<T> for VecDeque<T> {
    fn len(&self) -> usize {
        self.len()
    }
    fn get(&self, index: usize) -> Option<&T> {
        self.get(index)
    }
    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.get_mut(index)
    }
    fn insert(&mut self, index: usize, value: T) {
        self.insert(index, value);
    }
    fn push_back(&mut self, value: T) {
        self.push_back(value);
    }
    fn clear(&mut self) {
        self.clear();
    }
}

impl<T> AnySequence<T> for BlockDeque<T> {
    fn len(&self) -> usize {
        self.len()
    }
    fn get(&self, index: usize) -> Option<&T> {
        self.get(index)
    }
    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.get_mut(index)
    }
    fn insert(&mut self, index: usize, value: T) {
        let position = self.begin() + index as isize;
        self.insert(position, value);
    }
    fn push_back(&mut self, value: T) {
        self.push_back(value);
    }
    fn clear(&mut self) {
        self.clear();
    }
}
