//! The core Buffer of the array.

use super::root::{marker, ptr, slice};

use super::allocator::Allocator;
use super::capacity::{Capacity, ElementIndex, Length};
use super::failure::{Failure, Result};

//  The storage.
//
//  A contiguous block of exactly `capacity` slots, or nothing. The capacity and the allocator are held by the owner,
//  and passed in on each call.
//
//  Every slot of an allocated buffer is initialized: slots never written by the user hold `T::default()`.
pub struct Buffer<T>(Option<ptr::NonNull<T>>, marker::PhantomData<T>);

impl<T> Buffer<T> {
    //  Returns whether the buffer is allocated, or not.
    pub fn is_allocated(&self) -> bool { self.0.is_some() }

    //  Allocates a buffer of the given capacity, with every slot defaulted.
    //
    //  #   Errors
    //
    //  Returns an error if the allocator cannot allocate, leaving the buffer unallocated.
    //
    //  #   Safety
    //
    //  -   Assumes the buffer is not allocated.
    //  -   Assumes that `capacity` is non-zero, and `T` is not zero-sized.
    pub unsafe fn allocate(&mut self, capacity: Capacity, allocator: &Allocator) -> Result<()>
    where
        T: Default,
    {
        debug_assert!(!self.is_allocated());
        debug_assert!(capacity.0 > 0);

        let layout = capacity.layout::<T>()?;

        //  Safety:
        //  -   The layout is non-zero, as per pre-conditions.
        let block = unsafe { allocator.try_allocate(layout)? }.cast::<T>();

        //  Safety:
        //  -   The block holds `capacity` slots.
        unsafe { Self::fill_default(block, Length(0), capacity) };

        self.0 = Some(block);

        Ok(())
    }

    //  Reallocates the buffer to the new capacity, defaulting the new slots if any.
    //
    //  #   Errors
    //
    //  Returns an error if the allocator cannot reallocate, leaving the buffer untouched.
    //
    //  #   Safety
    //
    //  -   Assumes the buffer, if allocated, has `capacity` slots and was allocated by `allocator`.
    //  -   Assumes that `new_capacity` is non-zero.
    pub unsafe fn reallocate(
        &mut self,
        capacity: Capacity,
        new_capacity: Capacity,
        allocator: &Allocator,
    )
        -> Result<()>
    where
        T: Default,
    {
        debug_assert!(new_capacity.0 > 0);

        let Some(block) = self.0 else { return Ok(()) };

        let layout = capacity.layout::<T>()?;
        let new_layout = new_capacity.layout::<T>()?;

        //  Safety:
        //  -   The block was allocated by `allocator`, with `layout`.
        //  -   The new size is non-zero.
        let block = unsafe { allocator.try_reallocate(block.cast(), layout, new_layout.size())? }.cast::<T>();

        if new_capacity > capacity {
            //  Safety:
            //  -   The block holds `new_capacity` slots.
            unsafe { Self::fill_default(block, Length(capacity.0), new_capacity) };
        }

        self.0 = Some(block);

        Ok(())
    }

    //  Moves the buffer from one allocator to another, copying all `capacity` slots.
    //
    //  #   Errors
    //
    //  -   NullFunctionPointer: if either `to` cannot allocate and release, or `from` cannot release.
    //  -   AllocationFailure: if `to` cannot allocate.
    //
    //  In either case, the buffer is left untouched.
    //
    //  #   Safety
    //
    //  -   Assumes the buffer, if allocated, has `capacity` slots and was allocated by `from`.
    pub unsafe fn migrate(&mut self, capacity: Capacity, from: &Allocator, to: &Allocator) -> Result<()> {
        let Some(old) = self.0 else { return Ok(()) };

        let free = from.free.ok_or(Failure::NullFunctionPointer)?;

        if !to.can_acquire_and_release() {
            return Err(Failure::NullFunctionPointer);
        }

        let layout = capacity.layout::<T>()?;

        //  Safety:
        //  -   The layout is non-zero, as the buffer is allocated.
        let new = unsafe { to.try_allocate(layout)? }.cast::<T>();

        //  Safety:
        //  -   Both blocks hold `capacity` slots, and are distinct allocations.
        unsafe { ptr::copy_nonoverlapping(old.as_ptr(), new.as_ptr(), capacity.0) };

        //  Safety:
        //  -   `old` was allocated by `from`, with `layout`, and is no longer referenced.
        unsafe { free(old.as_ptr().cast(), layout) };

        self.0 = Some(new);

        Ok(())
    }

    //  Deallocates the buffer, if allocated.
    //
    //  #   Errors
    //
    //  Returns `NullFunctionPointer` if the allocator cannot release, leaving the buffer untouched.
    //
    //  #   Safety
    //
    //  -   Assumes that the buffer, if allocated, has `capacity` slots and was allocated by `allocator`.
    pub unsafe fn release(&mut self, capacity: Capacity, allocator: &Allocator) -> Result<()> {
        let Some(block) = self.0 else { return Ok(()) };

        let layout = capacity.layout::<T>()?;

        //  Safety:
        //  -   The block was allocated by `allocator`, with `layout`.
        unsafe { allocator.try_free(block.cast(), layout)? };

        self.0 = None;

        Ok(())
    }

    //  Reads the element at index.
    //
    //  #   Safety
    //
    //  -   Assumes the buffer is allocated.
    //  -   Assumes that `index` is less than the capacity.
    pub unsafe fn read(&self, index: ElementIndex) -> T
    where
        T: Copy,
    {
        debug_assert!(self.is_allocated());

        //  Safety:
        //  -   The slot is within bounds, and initialized.
        unsafe { self.block().as_ptr().add(index.0).read() }
    }

    //  Overwrites the element at index, without dropping the former value.
    //
    //  #   Safety
    //
    //  -   Assumes the buffer is allocated.
    //  -   Assumes that `index` is less than the capacity.
    pub unsafe fn write(&mut self, index: ElementIndex, value: T)
    where
        T: Copy,
    {
        debug_assert!(self.is_allocated());

        //  Safety:
        //  -   The slot is within bounds, and access is exclusive, as per &mut self.
        unsafe { self.block().as_ptr().add(index.0).write(value) };
    }

    //  Returns a slice to the first length elements.
    //
    //  #   Safety
    //
    //  -   Assumes that `length` is less than the capacity.
    pub unsafe fn as_slice(&self, length: Length) -> &[T] {
        match self.0 {
            //  Safety:
            //  -   All slots are initialized, and `length` is within bounds.
            Some(block) => unsafe { slice::from_raw_parts(block.as_ptr(), length.0) },
            None => &[],
        }
    }

    //  Returns the block, dangling if unallocated.
    fn block(&self) -> ptr::NonNull<T> { self.0.unwrap_or(ptr::NonNull::dangling()) }

    //  Writes `T::default()` in every slot in [from, to).
    //
    //  #   Safety
    //
    //  -   Assumes that `block` holds at least `to` slots.
    unsafe fn fill_default(block: ptr::NonNull<T>, from: Length, to: Capacity)
    where
        T: Default,
    {
        for index in from.0..to.0 {
            //  Safety:
            //  -   The slot is within bounds.
            unsafe { block.as_ptr().add(index).write(T::default()) };
        }
    }
}

impl<T> Default for Buffer<T> {
    fn default() -> Self { Self(None, marker::PhantomData) }
}
