//! # Block Deque
//!
//! A double-ended queue built from fixed-size blocks addressed through a
//! circular, doubling map, with insertion at any position.
//!
//! This crate provides [`BlockDeque`], its detached [`Position`] handles and
//! iterators, the [`AnySequence`] abstraction over ordered sequences, and a
//! small sparse [`Polynomial`] type that runs on any of them.
//!
//! ## Key Features
//!
//! * **Segmented storage:** Elements live in blocks of 16/8/4/2/1 slots chosen
//!   from `size_of::<T>()`.  Blocks are allocated on first write and never move
//!   while the map keeps its size.
//! * **Cheap insertion anywhere:** An insert shifts only the shorter side of the
//!   deque by one slot.
//! * **Detached positions:** A [`Position`] is an `(owner, offset)` pair with no
//!   borrow; the deque resolves it on every access, so it can be held across
//!   calls and passed back to [`BlockDeque::insert`].
//! * **Interoperability:** `BlockDeque`, `Vec` and `VecDeque` all implement
//!   [`AnySequence`].
//!
//! ## Growth
//!
//! The map starts at 8 blocks on the first insertion and doubles when the edge
//! being extended sits on a block boundary with at most one block of room
//! left.  It never shrinks; [`BlockDeque::clear`] releases everything.
//!
//! ## Cargo features
//!
//! * `polynomial` *(default)*: the [`Polynomial`] module.
//!
//! ## Examples
//!
//! ### BlockDeque
//!
//! ```rust
//! use block_deque::BlockDeque;
//!
//! let mut d: BlockDeque<u8> = BlockDeque::new();
//! d.insert(d.end(), b'a');
//! d.insert(d.begin(), b'b');
//! assert_eq!(d.iter().copied().collect::<Vec<_>>(), b"ba");
//!
//! // Push past the initial map: 8 blocks of 16 bytes.
//! for i in 0..200u8 {
//!     d.push_back(i);
//! }
//! assert_eq!(d.len(), 202);
//! assert!(d.map_capacity() > 8);
//! ```
//!
//! ### Positions
//!
//! ```rust
//! use block_deque::BlockDeque;
//!
//! let mut d: BlockDeque<i32> = (1..=3).collect();
//! let at = d.insert(d.begin() + 1, 10);
//! assert_eq!(d[at], 10);
//! assert_eq!(d.resolve(at + 1), Some(&2));
//! assert_eq!(d.resolve(d.end()), None);
//! ```

// --- Module Declarations ---

pub mod deque;
pub mod error;
#[cfg(feature = "polynomial")]
pub mod polynomial;
pub mod sequence;

#[cfg(test)]
mod proptests;

// --- Re-exports ---

pub use deque::{BlockDeque, IntoIter, Iter, IterMut, Position};
pub use error::DequeError;
#[cfg(feature = "polynomial")]
pub use error::PolynomialError;
#[cfg(feature = "polynomial")]
pub use polynomial::{Polynomial, Term};
pub use sequence::AnySequence;
