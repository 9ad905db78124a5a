//! Allocator.
//!
//! The `Allocator` record allows a user to customize allocation on a per instance basis, without depending on the
//! `alloc` crate.
//!
//! The record is made of four independent slots, any of which may be left unset. An unset slot is never invoked:
//! any operation requiring it fails with `Failure::NullFunctionPointer` instead.
//!
//! The record is `Copy`: each `DynamicArray` holds its own copy, so that modifying a record after handing it over has
//! no effect on the arrays it was handed to.
use super::failure::{Failure, Result};
use super::root::{alloc, fmt, ptr};

/// Layout, re-exported.
pub type Layout = alloc::Layout;

/// Allocates memory as per the size and alignment requirements.
///
/// May return a null pointer if the allocation cannot be satisfied.
///
/// #   Safety
///
/// -   Assumes that the size of the Layout is non-zero.
pub type AllocateFn = unsafe fn(Layout) -> *mut u8;

/// Allocates zeroed memory as per the size and alignment requirements.
///
/// May return a null pointer if the allocation cannot be satisfied.
///
/// #   Safety
///
/// -   Assumes that the size of the Layout is non-zero.
pub type ZeroAllocateFn = unsafe fn(Layout) -> *mut u8;

/// Reallocates memory to `new_size` bytes, preserving its content up to the lesser of the old and new sizes.
///
/// May return a null pointer if the allocation cannot be satisfied, in which case the original memory block is left
/// untouched.
///
/// #   Safety
///
/// -   Assumes that `ptr` was allocated by the same record, with `layout`.
/// -   Assumes that `new_size` is non-zero.
pub type ReallocateFn = unsafe fn(*mut u8, Layout, usize) -> *mut u8;

/// Deallocates memory.
///
/// #   Safety
///
/// -   Assumes that `ptr` was allocated by the same record.
/// -   Assumes that `ptr` was not already deallocated.
/// -   Assumes that `layout` matches the layout with which `ptr` was allocated.
pub type FreeFn = unsafe fn(*mut u8, Layout);

/// Allocator
///
/// The four function slots used for all memory operations of a `DynamicArray`.
#[derive(Clone, Copy, Default)]
pub struct Allocator {
    /// Allocates a block.
    pub allocate: Option<AllocateFn>,
    /// Allocates a zeroed block.
    pub zero_allocate: Option<ZeroAllocateFn>,
    /// Resizes a block.
    pub reallocate: Option<ReallocateFn>,
    /// Releases a block.
    pub free: Option<FreeFn>,
}

impl Allocator {
    /// Creates a record with every slot unset.
    ///
    /// ```
    /// #   use darray::allocator::Allocator;
    /// let allocator = Allocator::empty();
    ///
    /// assert!(allocator.allocate.is_none());
    /// assert!(allocator.free.is_none());
    /// ```
    pub const fn empty() -> Self {
        Self { allocate: None, zero_allocate: None, reallocate: None, free: None }
    }

    /// Creates a record deferring to the global allocator of the `alloc` crate.
    #[cfg(feature = "with-std")]
    pub fn system() -> Self {
        Self {
            allocate: Some(alloc::alloc),
            zero_allocate: Some(alloc::alloc_zeroed),
            reallocate: Some(alloc::realloc),
            free: Some(alloc::dealloc),
        }
    }

    /// Returns a copy with the `allocate` slot replaced.
    pub const fn with_allocate(mut self, allocate: Option<AllocateFn>) -> Self {
        self.allocate = allocate;
        self
    }

    /// Returns a copy with the `zero_allocate` slot replaced.
    pub const fn with_zero_allocate(mut self, zero_allocate: Option<ZeroAllocateFn>) -> Self {
        self.zero_allocate = zero_allocate;
        self
    }

    /// Returns a copy with the `reallocate` slot replaced.
    pub const fn with_reallocate(mut self, reallocate: Option<ReallocateFn>) -> Self {
        self.reallocate = reallocate;
        self
    }

    /// Returns a copy with the `free` slot replaced.
    ///
    /// ```
    /// #   use darray::allocator::Allocator;
    /// let allocator = Allocator::system().with_free(None);
    ///
    /// assert!(allocator.allocate.is_some());
    /// assert!(allocator.free.is_none());
    /// ```
    pub const fn with_free(mut self, free: Option<FreeFn>) -> Self {
        self.free = free;
        self
    }

    /// Returns whether both the `allocate` and `free` slots are set.
    ///
    /// Those are the two slots required to move a block from one record to another.
    pub const fn can_acquire_and_release(&self) -> bool {
        self.allocate.is_some() && self.free.is_some()
    }

    //  Allocates a block of memory.
    //
    //  #   Errors
    //
    //  -   NullFunctionPointer: if the `allocate` slot is unset.
    //  -   AllocationFailure: if the slot returned a null pointer.
    //
    //  #   Safety
    //
    //  -   Assumes that the size of the Layout is non-zero.
    pub(crate) unsafe fn try_allocate(&self, layout: Layout) -> Result<ptr::NonNull<u8>> {
        let allocate = self.allocate.ok_or(Failure::NullFunctionPointer)?;

        //  Safety:
        //  -   Forwarding.
        let raw = unsafe { allocate(layout) };

        ptr::NonNull::new(raw).ok_or(Failure::AllocationFailure)
    }

    //  Reallocates a block of memory.
    //
    //  On failure, the original block is left untouched.
    //
    //  #   Errors
    //
    //  -   NullFunctionPointer: if the `reallocate` slot is unset.
    //  -   AllocationFailure: if the slot returned a null pointer.
    //
    //  #   Safety
    //
    //  -   Assumes that `block` was allocated by this record, with `layout`.
    //  -   Assumes that `new_size` is non-zero.
    pub(crate) unsafe fn try_reallocate(
        &self,
        block: ptr::NonNull<u8>,
        layout: Layout,
        new_size: usize,
    )
        -> Result<ptr::NonNull<u8>>
    {
        let reallocate = self.reallocate.ok_or(Failure::NullFunctionPointer)?;

        //  Safety:
        //  -   Forwarding.
        let raw = unsafe { reallocate(block.as_ptr(), layout, new_size) };

        ptr::NonNull::new(raw).ok_or(Failure::AllocationFailure)
    }

    //  Deallocates a block of memory.
    //
    //  #   Errors
    //
    //  -   NullFunctionPointer: if the `free` slot is unset, the block is then left untouched.
    //
    //  #   Safety
    //
    //  -   Assumes that `block` was allocated by this record, with `layout`.
    //  -   Assumes that `block` was not already deallocated.
    pub(crate) unsafe fn try_free(&self, block: ptr::NonNull<u8>, layout: Layout) -> Result<()> {
        let free = self.free.ok_or(Failure::NullFunctionPointer)?;

        //  Safety:
        //  -   Forwarding.
        unsafe { free(block.as_ptr(), layout) };

        Ok(())
    }
}

impl fmt::Debug for Allocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Allocator")
            .field("allocate", &self.allocate.is_some())
            .field("zero_allocate", &self.zero_allocate.is_some())
            .field("reallocate", &self.reallocate.is_some())
            .field("free", &self.free.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    use crate::utils::tester::*;

    fn layout() -> Layout { Layout::new::<u64>() }

    #[test]
    fn allocator_empty_is_default() {
        let allocator = Allocator::default();

        assert!(allocator.allocate.is_none());
        assert!(allocator.zero_allocate.is_none());
        assert!(allocator.reallocate.is_none());
        assert!(allocator.free.is_none());
        assert!(!Allocator::empty().can_acquire_and_release());
    }

    #[test]
    fn allocator_system_is_complete() {
        let allocator = Allocator::system();

        assert!(allocator.allocate.is_some());
        assert!(allocator.zero_allocate.is_some());
        assert!(allocator.reallocate.is_some());
        assert!(allocator.free.is_some());
        assert!(allocator.can_acquire_and_release());
    }

    #[test]
    fn allocator_debug() {
        let allocator = Allocator::system().with_reallocate(None);

        assert_eq!(
            "Allocator { allocate: true, zero_allocate: true, reallocate: false, free: true }",
            format!("{:?}", allocator)
        );
    }

    #[test]
    fn allocator_try_allocate_unset() {
        let allocated = unsafe { Allocator::empty().try_allocate(layout()) };

        assert_eq!(Err(Failure::NullFunctionPointer), allocated);
    }

    #[test]
    fn allocator_try_allocate_failure() {
        let heap = TestHeap::<0>::new();

        let allocated = unsafe { heap.allocator().try_allocate(layout()) };

        assert_eq!(Err(Failure::AllocationFailure), allocated);
        assert_eq!(0, heap.live());
    }

    #[test]
    fn allocator_try_allocate_then_free() {
        let heap = TestHeap::<0>::new();
        heap.allow(1);

        let allocator = heap.allocator();

        let block = unsafe { allocator.try_allocate(layout()) }.unwrap();

        assert_eq!(vec![8], heap.allocation_sizes());

        let freed = unsafe { allocator.try_free(block, layout()) };

        assert_eq!(Ok(()), freed);
        assert_eq!(0, heap.live());
    }

    #[test]
    fn allocator_try_free_unset() {
        let heap = TestHeap::<0>::new();
        heap.allow(1);

        let block = unsafe { heap.allocator().try_allocate(layout()) }.unwrap();

        let freed = unsafe { heap.allocator().with_free(None).try_free(block, layout()) };

        assert_eq!(Err(Failure::NullFunctionPointer), freed);
        assert_eq!(1, heap.live());
    }

    #[test]
    fn allocator_try_reallocate() {
        let heap = TestHeap::<0>::new();
        heap.allow(2);

        let allocator = heap.allocator();

        let block = unsafe { allocator.try_allocate(layout()) }.unwrap();
        let block = unsafe { allocator.try_reallocate(block, layout(), 32) }.unwrap();

        assert_eq!(vec![32], heap.allocation_sizes());

        let freed = unsafe { allocator.try_free(block, Layout::from_size_align(32, 8).unwrap()) };

        assert_eq!(Ok(()), freed);
        assert_eq!(0, heap.live());
    }

    #[test]
    fn allocator_try_reallocate_failure_keeps_block() {
        let heap = TestHeap::<0>::new();
        heap.allow(1);

        let allocator = heap.allocator();

        let block = unsafe { allocator.try_allocate(layout()) }.unwrap();
        let reallocated = unsafe { allocator.try_reallocate(block, layout(), 32) };

        assert_eq!(Err(Failure::AllocationFailure), reallocated);
        assert_eq!(vec![8], heap.allocation_sizes());
    }
}
