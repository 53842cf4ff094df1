//! Offset arithmetic shared by the block store, the deque and its iterators.
//!
//! A logical offset is an unreduced `usize`.  It is turned into a physical
//! `(block, column)` pair by [`Geometry::resolve`]; nothing else in the crate
//! divides or reduces offsets on its own.

/// Number of blocks in a freshly allocated map.
pub const INITIAL_MAP_CAPACITY: usize = 8;

/// Elements per block for `T` (a power of two chosen by element size).
///
/// | `size_of::<T>()` | slots per block |
/// |------------------|-----------------|
/// | `<= 1`           | 16              |
/// | `<= 2`           | 8               |
/// | `<= 4`           | 4               |
/// | `<= 8`           | 2               |
/// | larger           | 1               |
pub const fn block_capacity<T>() -> usize {
    let size = core::mem::size_of::<T>();
    if size <= 1 {
        16
    } else if size <= 2 {
        8
    } else if size <= 4 {
        4
    } else if size <= 8 {
        2
    } else {
        1
    }
}

/// Physical location of an element: which map entry, and which slot inside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Slot {
    pub block: usize,
    pub column: usize,
}

/// Shape of a block map: slots per block and number of blocks.
///
/// `map_capacity` is always zero or a power of two.  Every method other than
/// [`column_for`](Geometry::column_for) requires a non-zero map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    block_capacity: usize,
    map_capacity: usize,
}

impl Geometry {
    #[inline(always)]
    pub const fn new(block_capacity: usize, map_capacity: usize) -> Self {
        debug_assert!(block_capacity.is_power_of_two());
        debug_assert!(map_capacity == 0 || map_capacity.is_power_of_two());
        Self {
            block_capacity,
            map_capacity,
        }
    }

    /// Geometry of a map of `map_capacity` blocks holding `T`.
    #[inline(always)]
    pub const fn of<T>(map_capacity: usize) -> Self {
        Self::new(block_capacity::<T>(), map_capacity)
    }

    #[inline(always)]
    pub const fn block_capacity(&self) -> usize {
        self.block_capacity
    }

    #[inline(always)]
    pub const fn map_capacity(&self) -> usize {
        self.map_capacity
    }

    /// Total number of element slots addressable by the map.
    #[inline(always)]
    pub const fn span(&self) -> usize {
        self.block_capacity * self.map_capacity
    }

    /// Map entry holding `offset`: `(offset / block_capacity) mod map_capacity`.
    #[inline(always)]
    pub fn block_for(&self, offset: usize) -> usize {
        debug_assert!(self.map_capacity > 0, "offset resolution on an unallocated map");
        (offset / self.block_capacity) & (self.map_capacity - 1)
    }

    /// Slot inside the block: `offset mod block_capacity`.
    #[inline(always)]
    pub fn column_for(&self, offset: usize) -> usize {
        offset & (self.block_capacity - 1)
    }

    #[inline(always)]
    pub fn resolve(&self, offset: usize) -> Slot {
        Slot {
            block: self.block_for(offset),
            column: self.column_for(offset),
        }
    }

    /// Reduces `offset` into `[0, span)`.
    #[inline(always)]
    pub fn wrap(&self, offset: usize) -> usize {
        offset % self.span()
    }

    /// The offset one step toward the front, wrapping `0` to `span - 1`.
    #[inline(always)]
    pub fn preceding(&self, offset: usize) -> usize {
        if offset == 0 { self.span() - 1 } else { offset - 1 }
    }

    #[inline(always)]
    pub fn is_block_aligned(&self, offset: usize) -> bool {
        self.column_for(offset) == 0
    }

    /// Growth trigger evaluated before a front or back insertion.
    ///
    /// `edge` is the front offset (front path) or `front + len` (back path).
    /// This approximates "the map is full": it only fires when the edge sits on
    /// a block boundary and at most one block's worth of slots is left.
    #[inline]
    pub fn is_nearly_full(&self, edge: usize, len: usize) -> bool {
        self.is_block_aligned(edge)
            && self.map_capacity <= (len + self.block_capacity) / self.block_capacity
    }
}
