//! Detached positions into a [`BlockDeque`](super::BlockDeque).
//!
//! A [`Position`] is the pair `(owner, offset)`.  It borrows nothing and caches
//! no pointer: every access goes back through the deque, which resolves the
//! offset against its current map.  Arithmetic only moves the offset.

use core::cmp::Ordering;
use core::ops::{Add, AddAssign, Sub, SubAssign};
use core::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

/// Identity token of a deque.  `0` is reserved for the null position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub(crate) struct DequeId(usize);

static NEXT_DEQUE_ID: AtomicUsize = AtomicUsize::new(1);

impl DequeId {
    pub(crate) fn fresh() -> Self {
        Self(NEXT_DEQUE_ID.fetch_add(1, AtomicOrdering::Relaxed))
    }
}

/// A logical offset bound to one deque.
///
/// Obtained from [`BlockDeque::begin`](super::BlockDeque::begin),
/// [`BlockDeque::end`](super::BlockDeque::end) or an insertion.  Any insertion
/// may shift elements, so positions taken before it can point at a different
/// element (or nothing) afterwards.  The deque reads an offset modulo the span
/// of its current map, so a position taken just before an insertion that
/// shifts nothing past it (such as a push at either end) still names the same
/// element afterwards, even when that insertion doubled the map or wrapped the
/// front offset.
///
/// Indexed access from a position is `deque[pos + n]` (or
/// `deque.resolve(pos + n)` to avoid the panic):
///
/// ```rust
/// use block_deque::BlockDeque;
///
/// let d: BlockDeque<u32> = (10..20).collect();
/// let pos = d.begin() + 2;
/// assert_eq!(d[pos + 3], 15);
/// assert_eq!(d.resolve(pos + 8), None);
/// ```
///
/// `Position::default()` belongs to no deque and never resolves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub(crate) owner: DequeId,
    pub(crate) offset: usize,
}

impl Position {
    #[inline(always)]
    pub(crate) fn new(owner: DequeId, offset: usize) -> Self {
        Self { owner, offset }
    }

    /// The raw logical offset.
    #[inline(always)]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns `true` if both positions were produced by the same deque.
    #[inline(always)]
    pub fn same_deque(&self, other: &Position) -> bool {
        self.owner == other.owner
    }

    /// The following position.
    #[inline(always)]
    #[must_use]
    pub fn next(self) -> Self {
        self + 1
    }

    /// The preceding position.
    #[inline(always)]
    #[must_use]
    pub fn prev(self) -> Self {
        self - 1
    }
}

impl AddAssign<isize> for Position {
    #[inline(always)]
    fn add_assign(&mut self, rhs: isize) {
        self.offset = self.offset.wrapping_add_signed(rhs);
    }
}

impl SubAssign<isize> for Position {
    #[inline(always)]
    fn sub_assign(&mut self, rhs: isize) {
        *self += rhs.wrapping_neg();
    }
}

impl Add<isize> for Position {
    type Output = Position;

    #[inline(always)]
    fn add(mut self, rhs: isize) -> Position {
        self += rhs;
        self
    }
}

impl Sub<isize> for Position {
    type Output = Position;

    #[inline(always)]
    fn sub(mut self, rhs: isize) -> Position {
        self -= rhs;
        self
    }
}

/// Signed distance in elements.  Meaningless across deques.
impl Sub<Position> for Position {
    type Output = isize;

    #[inline(always)]
    fn sub(self, rhs: Position) -> isize {
        self.offset.wrapping_sub(rhs.offset) as isize
    }
}

/// Positions of different deques are unordered.
impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.owner == other.owner {
            Some(self.offset.cmp(&other.offset))
        } else {
            None
        }
    }
}
