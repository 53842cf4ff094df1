//! Circular map of lazily allocated element blocks.
//!
//! The map never tracks which slots are initialised; that is decided by the
//! owning [`BlockDeque`](super::BlockDeque) through its `front`/`len` pair.
//! Dropping a `BlockMap` frees memory only and never runs element destructors.

use core::marker::PhantomData;
use core::mem::MaybeUninit;
use core::ptr::{self, NonNull};

use log::{debug, trace};

use super::index::{Geometry, INITIAL_MAP_CAPACITY, Slot, block_capacity};

/// Owned, uninitialised buffer of `block_capacity::<T>()` slots.
type BlockPtr<T> = NonNull<T>;

pub(crate) struct BlockMap<T> {
    blocks: Box<[Option<BlockPtr<T>>]>,
    _owns: PhantomData<T>,
}

// SAFETY: the map uniquely owns its blocks; sharing rules follow `T`.
unsafe impl<T: Send> Send for BlockMap<T> {}
unsafe impl<T: Sync> Sync for BlockMap<T> {}

impl<T> BlockMap<T> {
    const BLOCK_CAPACITY: usize = block_capacity::<T>();

    /// An unallocated map (`map_capacity == 0`).
    pub(crate) fn new() -> Self {
        Self {
            blocks: Box::new([]),
            _owns: PhantomData,
        }
    }

    #[inline(always)]
    pub(crate) fn capacity(&self) -> usize {
        self.blocks.len()
    }

    #[inline(always)]
    pub(crate) fn geometry(&self) -> Geometry {
        Geometry::of::<T>(self.blocks.len())
    }

    /// Number of blocks that currently own memory.
    pub(crate) fn allocated_blocks(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_some()).count()
    }

    /// Allocates an empty map of [`INITIAL_MAP_CAPACITY`] entries if none exists.
    pub(crate) fn ensure_initial_capacity(&mut self) {
        if self.blocks.is_empty() {
            trace!(
                "BlockMap::ensure_initial_capacity {} blocks of {}",
                INITIAL_MAP_CAPACITY,
                Self::BLOCK_CAPACITY
            );
            self.blocks = (0..INITIAL_MAP_CAPACITY).map(|_| None).collect();
        }
    }

    fn allocate_block() -> BlockPtr<T> {
        let block: Box<[MaybeUninit<T>]> = Box::new_uninit_slice(Self::BLOCK_CAPACITY);
        NonNull::from(Box::leak(block)).cast::<T>()
    }

    /// # Safety
    /// `block` must come from [`allocate_block`](Self::allocate_block) and hold
    /// no live elements that still need dropping.
    unsafe fn free_block(block: BlockPtr<T>) {
        unsafe {
            let slots = ptr::slice_from_raw_parts_mut(
                block.as_ptr() as *mut MaybeUninit<T>,
                Self::BLOCK_CAPACITY,
            );
            drop(Box::from_raw(slots));
        }
    }

    /// Pointer to `slot`, or `None` if its block was never written.
    #[inline(always)]
    pub(crate) fn slot_ptr(&self, slot: Slot) -> Option<*mut T> {
        self.blocks[slot.block].map(|block| unsafe { block.as_ptr().add(slot.column) })
    }

    /// Pointer to `slot`, allocating its block on first use.
    #[inline]
    pub(crate) fn slot_ptr_or_allocate(&mut self, slot: Slot) -> *mut T {
        let block = *self.blocks[slot.block].get_or_insert_with(Self::allocate_block);
        unsafe { block.as_ptr().add(slot.column) }
    }

    /// Writes `value` into `slot` without reading or dropping the old contents.
    ///
    /// # Safety
    /// `slot` must not hold a live element.
    #[inline]
    pub(crate) unsafe fn write(&mut self, slot: Slot, value: T) {
        let dst = self.slot_ptr_or_allocate(slot);
        unsafe { ptr::write(dst, value) };
    }

    /// Moves the element at `from` into `to`, leaving `from` logically empty.
    ///
    /// # Safety
    /// `from` must hold a live element, `to` must not, and they must differ.
    #[inline]
    pub(crate) unsafe fn relocate(&mut self, from: Slot, to: Slot) {
        debug_assert_ne!(from, to);
        let dst = self.slot_ptr_or_allocate(to);
        unsafe {
            let src = self.slot_ptr(from).unwrap_unchecked();
            ptr::copy_nonoverlapping(src, dst, 1);
        }
    }

    /// Replaces the map with one of twice the capacity.
    ///
    /// Every block of the new map is allocated up front.  The live range
    /// `[front, front + len)` keeps its absolute offsets: each element moves
    /// from `old.resolve(i)` to `new.resolve(i)`.  Old blocks are freed.
    ///
    /// # Safety
    /// `[front, front + len)` must be exactly the live elements, with
    /// `front < old span` and `len <= old span`.
    pub(crate) unsafe fn grow_double(&mut self, front: usize, len: usize) {
        let old = self.geometry();
        debug_assert!(old.map_capacity() > 0);
        debug_assert!(front < old.span() && len <= old.span());

        let new = Geometry::new(old.block_capacity(), old.map_capacity() * 2);
        debug!(
            "BlockMap::grow_double {} -> {} blocks ({} live from offset {})",
            old.map_capacity(),
            new.map_capacity(),
            len,
            front
        );

        let blocks: Box<[Option<BlockPtr<T>>]> = (0..new.map_capacity())
            .map(|_| Some(Self::allocate_block()))
            .collect();

        for offset in front..front + len {
            let from = old.resolve(offset);
            let to = new.resolve(offset);
            // Live offsets never reach the new span, so no row is wrapped on
            // the destination side.
            debug_assert_eq!(to.block, offset / new.block_capacity());
            unsafe {
                let src = self.slot_ptr(from).unwrap_unchecked();
                let dst = blocks[to.block].unwrap_unchecked().as_ptr().add(to.column);
                ptr::copy_nonoverlapping(src, dst, 1);
            }
        }

        let old_blocks = core::mem::replace(&mut self.blocks, blocks);
        for block in old_blocks.iter().flatten() {
            unsafe { Self::free_block(*block) };
        }
    }

    /// Frees every block and the map itself; capacity drops back to zero.
    ///
    /// Live elements must already have been dropped or moved out.
    pub(crate) fn release(&mut self) {
        if self.blocks.is_empty() {
            return;
        }
        trace!(
            "BlockMap::release {} blocks ({} allocated)",
            self.blocks.len(),
            self.allocated_blocks()
        );
        for block in core::mem::take(&mut self.blocks).iter().flatten() {
            unsafe { Self::free_block(*block) };
        }
    }
}

impl<T> Drop for BlockMap<T> {
    fn drop(&mut self) {
        self.release();
    }
}
