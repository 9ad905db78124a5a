//! The DynamicArray

use log::{debug, warn};

use super::root::{fmt, mem};

use super::allocator::Allocator;
use super::buffer::Buffer;
use super::capacity::{Capacity, ElementIndex, Length, DEFAULT_CAPACITY};
use super::failure::{Failure, Result};
use super::hooks::Comparator;

/// `DynamicArray`
///
/// A growable array of `T`, allocating through its own copy of an `Allocator` record.
///
/// `T` is an opaque handle: it is copied in and out, but never dropped, nor inspected.
pub struct DynamicArray<T> {
    //  The number of occupied slots, never greater than the capacity.
    length: Length,
    //  The number of slots of the buffer, allocated or planned.
    capacity: Capacity,
    //  The buffer, unallocated until the first write.
    buffer: Buffer<T>,
    //  Stored on behalf of the user, never invoked.
    comparator: Option<Comparator<T>>,
    //  Used for all memory operations.
    allocator: Allocator,
}

#[cfg(feature = "with-std")]
impl<T> DynamicArray<T> {
    /// Creates a new instance, with a capacity of `DEFAULT_CAPACITY`, allocating through the system allocator.
    ///
    /// No memory is allocated.
    ///
    /// #   Panics
    ///
    /// Panics if `T` is zero-sized.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use darray::array::DynamicArray;
    /// let array: DynamicArray<u64> = DynamicArray::new();
    ///
    /// assert_eq!(0, array.len());
    /// assert_eq!(8, array.capacity());
    /// assert!(!array.is_allocated());
    /// ```
    pub fn new() -> Self {
        Self::with_allocator(Allocator::system())
    }

    /// Resets the instance to the state of a newly created one.
    ///
    /// The buffer, if any, is released; should the allocator be unable to, it is leaked instead.
    ///
    /// No memory is allocated.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use darray::array::DynamicArray;
    /// let mut array: DynamicArray<u64> = DynamicArray::new();
    /// array.append(3);
    /// array.resize(2);
    ///
    /// array.init();
    ///
    /// assert_eq!(0, array.len());
    /// assert_eq!(8, array.capacity());
    /// assert!(!array.is_allocated());
    /// ```
    pub fn init(&mut self) {
        *self = Self::new();
    }
}

impl<T> DynamicArray<T> {
    /// Creates a new instance, with a capacity of `DEFAULT_CAPACITY`, allocating through `allocator`.
    ///
    /// No memory is allocated.
    ///
    /// #   Panics
    ///
    /// Panics if `T` is zero-sized.
    pub fn with_allocator(allocator: Allocator) -> Self {
        Self::with_capacity_and_allocator(DEFAULT_CAPACITY, allocator)
    }

    /// Creates a new instance, with a capacity of `capacity`, allocating through `allocator`.
    ///
    /// No memory is allocated.
    ///
    /// #   Panics
    ///
    /// Panics if `T` is zero-sized.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use darray::allocator::Allocator;
    /// #   use darray::array::DynamicArray;
    /// let array: DynamicArray<u64> = DynamicArray::with_capacity_and_allocator(3, Allocator::system());
    ///
    /// assert_eq!(0, array.len());
    /// assert_eq!(3, array.capacity());
    /// ```
    pub fn with_capacity_and_allocator(capacity: usize, allocator: Allocator) -> Self {
        if mem::size_of::<T>() == 0 {
            panic_zero_sized_element();
        }

        Self {
            length: Length(0),
            capacity: Capacity(capacity),
            buffer: Buffer::default(),
            comparator: None,
            allocator,
        }
    }

    /// Resets the instance to the state of a newly created one, then installs `allocator`.
    ///
    /// The buffer, if any, is released by the current allocator; should it be unable to, it is leaked instead.
    ///
    /// #   Errors
    ///
    /// Returns `NullFunctionPointer` if `allocator` cannot allocate or cannot release; the instance is then left reset,
    /// without any usable allocator.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use darray::allocator::Allocator;
    /// #   use darray::array::DynamicArray;
    /// #   use darray::failure::Failure;
    /// let mut array: DynamicArray<u64> = DynamicArray::new();
    /// array.append(3);
    ///
    /// let crippled = Allocator::system().with_allocate(None);
    /// assert_eq!(Err(Failure::NullFunctionPointer), array.try_init_with_allocator(crippled));
    /// assert_eq!(0, array.len());
    /// assert!(!array.is_allocated());
    /// ```
    pub fn try_init_with_allocator(&mut self, allocator: Allocator) -> Result<()> {
        *self = Self::with_allocator(Allocator::empty());
        self.try_set_allocator(allocator)
    }

    /// Returns whether the instance contains any element, or not.
    pub fn is_empty(&self) -> bool { self.length.0 == 0 }

    /// Returns the number of occupied slots.
    pub fn len(&self) -> usize { self.length.0 }

    /// Returns the number of slots, either allocated or planned.
    pub fn capacity(&self) -> usize { self.capacity.0 }

    /// Returns whether the buffer is allocated, or not.
    pub fn is_allocated(&self) -> bool { self.buffer.is_allocated() }

    /// Returns a copy of the allocator record in use.
    pub fn allocator(&self) -> Allocator { self.allocator }

    /// Returns the comparator, if any.
    pub fn comparator(&self) -> Option<Comparator<T>> { self.comparator }

    /// Sets the comparator; `None` meaning that no ordering is defined.
    ///
    /// The comparator is stored, but never invoked by the array itself.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use darray::array::DynamicArray;
    /// let mut array: DynamicArray<u64> = DynamicArray::new();
    /// array.set_comparator(Some(|a: &u64, b: &u64| a.cmp(b)));
    ///
    /// assert!(array.comparator().is_some());
    /// ```
    pub fn set_comparator(&mut self, comparator: Option<Comparator<T>>) {
        self.comparator = comparator;
    }

    /// Switches to a different allocator record.
    ///
    /// If a buffer is allocated, its content is first migrated: a new buffer of the same capacity is allocated by
    /// `allocator`, all slots are copied, and the former buffer is released by the former allocator.
    ///
    /// #   Errors
    ///
    /// Returns an error, leaving the instance untouched, if:
    ///
    /// -   `allocator` cannot allocate or cannot release: `NullFunctionPointer`.
    /// -   A buffer is allocated and the former allocator cannot release: `NullFunctionPointer`.
    /// -   A buffer is allocated and `allocator` fails to allocate: `AllocationFailure`.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use darray::allocator::Allocator;
    /// #   use darray::array::DynamicArray;
    /// let mut array: DynamicArray<u64> = DynamicArray::new();
    /// array.append(7);
    ///
    /// assert_eq!(Ok(()), array.try_set_allocator(Allocator::system()));
    /// assert_eq!(7, array.get_or_default(0));
    /// ```
    pub fn try_set_allocator(&mut self, allocator: Allocator) -> Result<()> {
        if !allocator.can_acquire_and_release() {
            return Err(log_failure("set allocator", Failure::NullFunctionPointer));
        }

        //  Safety:
        //  -   The buffer, if any, has `capacity` slots, and was allocated by the current allocator.
        unsafe { self.buffer.migrate(self.capacity, &self.allocator, &allocator) }
            .map_err(|failure| log_failure("migrate", failure))?;

        if self.buffer.is_allocated() {
            debug!("migrated buffer of {} slots to new allocator", self.capacity.0);
        }

        self.allocator = allocator;

        Ok(())
    }

    /// Switches to a different allocator record.
    ///
    /// Calling this method is equivalent to calling `try_set_allocator` and panicking on error.
    ///
    /// #   Panics
    ///
    /// Panics if the content cannot be migrated.
    pub fn set_allocator(&mut self, allocator: Allocator) {
        self.try_set_allocator(allocator).unwrap_or_else(panic_from_failure);
    }

    /// Releases the buffer, if any, and resets every field to zero.
    ///
    /// The instance is left without capacity, comparator, or allocator: any further attempt to acquire memory fails
    /// with `NullFunctionPointer` until re-initialized.
    ///
    /// #   Errors
    ///
    /// Returns `NullFunctionPointer` if the allocator cannot release, leaving the instance untouched.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use darray::array::DynamicArray;
    /// let mut array: DynamicArray<u64> = DynamicArray::new();
    /// array.append(7);
    ///
    /// assert_eq!(Ok(()), array.try_free());
    /// assert_eq!(0, array.len());
    /// assert_eq!(0, array.capacity());
    /// assert!(array.allocator().free.is_none());
    /// ```
    pub fn try_free(&mut self) -> Result<()> {
        if self.allocator.free.is_none() {
            return Err(log_failure("free", Failure::NullFunctionPointer));
        }

        //  Safety:
        //  -   The buffer, if any, has `capacity` slots, and was allocated by the current allocator.
        unsafe { self.buffer.release(self.capacity, &self.allocator)? };

        self.length = Length(0);
        self.capacity = Capacity(0);
        self.comparator = None;
        self.allocator = Allocator::empty();

        Ok(())
    }

    /// Releases the buffer, if any, and resets every field to zero.
    ///
    /// Calling this method is equivalent to calling `try_free` and panicking on error.
    ///
    /// #   Panics
    ///
    /// Panics if the allocator cannot release.
    pub fn free(&mut self) {
        self.try_free().unwrap_or_else(panic_from_failure);
    }
}

impl<T: Copy + Default> DynamicArray<T> {
    /// Resizes the buffer to exactly `new_capacity` slots.
    ///
    /// The first `min(capacity, new_capacity)` slots are preserved, the new ones read as `T::default()`, and the length
    /// is truncated to `new_capacity` if necessary.
    ///
    /// If no buffer is allocated yet, only the planned capacity changes. If `new_capacity` is 0, the buffer is
    /// released.
    ///
    /// #   Errors
    ///
    /// Returns an error, leaving the instance untouched, if:
    ///
    /// -   The `reallocate` slot, or the `free` slot when releasing, is unset: `NullFunctionPointer`.
    /// -   The number of bytes required overflows: `MaxCapacityReached`.
    /// -   The allocator fails to reallocate: `AllocationFailure`.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use darray::array::DynamicArray;
    /// let mut array: DynamicArray<u64> = DynamicArray::new();
    /// array.append(1);
    /// array.append(2);
    ///
    /// assert_eq!(Ok(()), array.try_resize(32));
    /// assert_eq!(32, array.capacity());
    /// assert_eq!(2, array.get_or_default(1));
    /// ```
    pub fn try_resize(&mut self, new_capacity: usize) -> Result<()> {
        if self.allocator.reallocate.is_none() {
            return Err(log_failure("resize", Failure::NullFunctionPointer));
        }

        let new_capacity = Capacity(new_capacity);

        //  Validates the planned capacity, even when nothing is allocated yet.
        new_capacity.layout::<T>()?;

        if new_capacity.0 == 0 {
            //  Safety:
            //  -   The buffer, if any, has `capacity` slots, and was allocated by the current allocator.
            unsafe { self.buffer.release(self.capacity, &self.allocator) }
                .map_err(|failure| log_failure("resize", failure))?;
        } else {
            //  Safety:
            //  -   The buffer, if any, has `capacity` slots, and was allocated by the current allocator.
            //  -   The new capacity is non-zero.
            unsafe { self.buffer.reallocate(self.capacity, new_capacity, &self.allocator) }
                .map_err(|failure| log_failure("resize", failure))?;
        }

        debug!("resized from {} to {} slots", self.capacity.0, new_capacity.0);

        self.capacity = new_capacity;
        self.length = self.length.clamped_to(new_capacity);

        Ok(())
    }

    /// Resizes the buffer to exactly `new_capacity` slots.
    ///
    /// Calling this method is equivalent to calling `try_resize` and panicking on error.
    ///
    /// #   Panics
    ///
    /// Panics if the buffer cannot be resized.
    pub fn resize(&mut self, new_capacity: usize) {
        self.try_resize(new_capacity).unwrap_or_else(panic_from_failure);
    }

    /// Writes `value` in the slot at `index`, overwriting the former value.
    ///
    /// The buffer is allocated first, if necessary. The length is extended to `index + 1` if shorter; the capacity is
    /// never grown.
    ///
    /// #   Errors
    ///
    /// Returns an error, leaving the instance untouched, if:
    ///
    /// -   The buffer is unallocated and the `allocate` slot is unset: `NullFunctionPointer`.
    /// -   `index` is greater than, or equal to, the capacity: `IndexOutOfCapacity`.
    /// -   The allocator fails to allocate: `AllocationFailure`.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use darray::array::DynamicArray;
    /// #   use darray::failure::Failure;
    /// let mut array: DynamicArray<u64> = DynamicArray::new();
    ///
    /// assert_eq!(Ok(()), array.try_insert(3, 9));
    /// assert_eq!(4, array.len());
    ///
    /// assert_eq!(Err(Failure::IndexOutOfCapacity), array.try_insert(8, 9));
    /// ```
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<()> {
        let allocated = self.buffer.is_allocated();

        if !allocated && self.allocator.allocate.is_none() {
            return Err(log_failure("insert", Failure::NullFunctionPointer));
        }

        let index = ElementIndex(index);

        if !self.capacity.contains(index) {
            return Err(Failure::IndexOutOfCapacity);
        }

        if !allocated {
            //  Safety:
            //  -   The buffer is unallocated.
            //  -   The capacity is non-zero, as it contains `index`; `T` is not zero-sized, as per constructor.
            unsafe { self.buffer.allocate(self.capacity, &self.allocator) }
                .map_err(|failure| log_failure("insert", failure))?;

            debug!("allocated buffer of {} slots", self.capacity.0);
        }

        //  Safety:
        //  -   The buffer is allocated, and `index` is within bounds.
        unsafe { self.buffer.write(index, value) };

        self.length = self.length.extended_to(index);

        Ok(())
    }

    /// Writes `value` in the slot at `index`, overwriting the former value.
    ///
    /// Calling this method is equivalent to calling `try_insert` and panicking on error.
    ///
    /// #   Panics
    ///
    /// Panics if the value cannot be written.
    pub fn insert(&mut self, index: usize, value: T) {
        self.try_insert(index, value).unwrap_or_else(panic_from_failure);
    }

    /// Appends `value` at the back.
    ///
    /// If the array is full, the capacity is first grown by `EXPANSION_INCREMENT` slots.
    ///
    /// #   Errors
    ///
    /// Returns the failure of either growing, see `try_resize`, or writing, see `try_insert`.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use darray::array::DynamicArray;
    /// let mut array: DynamicArray<u64> = DynamicArray::new();
    ///
    /// assert_eq!(Ok(()), array.try_append(3));
    /// assert_eq!(1, array.len());
    /// assert_eq!(3, array.get_or_default(0));
    /// ```
    pub fn try_append(&mut self, value: T) -> Result<()> {
        if self.capacity.is_full(self.length) {
            let grown = self.capacity.grown()?;
            self.try_resize(grown.0)?;
        }

        self.try_insert(self.length.0, value)
    }

    /// Appends `value` at the back.
    ///
    /// Calling this method is equivalent to calling `try_append` and panicking on error.
    ///
    /// #   Panics
    ///
    /// Panics if the value cannot be appended.
    pub fn append(&mut self, value: T) {
        self.try_append(value).unwrap_or_else(panic_from_failure);
    }

    /// Copies the element at `index` into `destination`.
    ///
    /// Slots which were never written read as `T::default()`.
    ///
    /// #   Errors
    ///
    /// Returns `IndexOutOfCapacity` if `index` is greater than, or equal to, the capacity; `destination` is then left
    /// untouched.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use darray::array::DynamicArray;
    /// let mut array: DynamicArray<u64> = DynamicArray::new();
    /// array.append(5);
    ///
    /// let mut destination = 0;
    /// assert_eq!(Ok(()), array.get_into(0, &mut destination));
    /// assert_eq!(5, destination);
    /// ```
    pub fn get_into(&self, index: usize, destination: &mut T) -> Result<()> {
        *destination = self.try_get(index)?;
        Ok(())
    }

    /// Returns a copy of the element at `index`.
    ///
    /// Slots which were never written read as `T::default()`.
    ///
    /// #   Errors
    ///
    /// Returns `IndexOutOfCapacity` if `index` is greater than, or equal to, the capacity.
    pub fn try_get(&self, index: usize) -> Result<T> {
        let index = ElementIndex(index);

        if !self.capacity.contains(index) {
            return Err(Failure::IndexOutOfCapacity);
        }

        if !self.buffer.is_allocated() {
            return Ok(T::default());
        }

        //  Safety:
        //  -   The buffer is allocated, and `index` is within bounds.
        Ok(unsafe { self.buffer.read(index) })
    }

    /// Returns a copy of the element at `index`, or `T::default()` on failure.
    ///
    /// Use `try_get` or `get_into` to tell a failure apart from a default value.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use darray::array::DynamicArray;
    /// let mut array: DynamicArray<u64> = DynamicArray::new();
    /// array.append(5);
    ///
    /// assert_eq!(5, array.get_or_default(0));
    /// assert_eq!(0, array.get_or_default(42));
    /// ```
    pub fn get_or_default(&self, index: usize) -> T {
        self.try_get(index).unwrap_or_default()
    }
}

/// A `DynamicArray<T>` can be `Send` across threads whenever a `Vec<T>` can.
///
/// ```
/// # use darray::array::DynamicArray;
/// fn ensure_send<T: Send>(_: T) {}
///
/// let mut array: DynamicArray<u64> = DynamicArray::new();
/// array.append(1);
///
/// ensure_send(array);
/// ```
unsafe impl<T: Send> Send for DynamicArray<T> {}

/// A `DynamicArray<T>` can be shared across threads whenever a `Vec<T>` can, as all mutations require `&mut self`.
unsafe impl<T: Sync> Sync for DynamicArray<T> {}

impl<T> Drop for DynamicArray<T> {
    fn drop(&mut self) {
        //  Safety:
        //  -   The buffer, if any, has `capacity` slots, and was allocated by the current allocator.
        if let Err(failure) = unsafe { self.buffer.release(self.capacity, &self.allocator) } {
            warn!("leaking buffer of {} slots on drop: {}", self.capacity.0, failure);
        }
    }
}

#[cfg(feature = "with-std")]
impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        //  Safety:
        //  -   The length is never greater than the capacity.
        let elements = unsafe { self.buffer.as_slice(self.length) };

        f.debug_struct("DynamicArray")
            .field("capacity", &self.capacity.0)
            .field("length", &self.length.0)
            .field("elements", &elements)
            .finish()
    }
}

#[cold]
#[inline(never)]
fn panic_from_failure(failure: Failure) {
    panic!("{}", failure);
}

#[cold]
#[inline(never)]
fn panic_zero_sized_element() -> ! {
    panic!("Zero-sized elements are not supported");
}

fn log_failure(operation: &str, failure: Failure) -> Failure {
    warn!("{} failed: {}", operation, failure);
    failure
}
