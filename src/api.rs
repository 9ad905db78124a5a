//! The status-returning API.
//!
//! Every operation of the `DynamicArray`, expressed as a free function over an optional target, and returning a
//! `Status` rather than a `Result`. An absent target is reported as `Status::NullTarget`.
//!
//! This is the natural surface for code which tracks arrays through optional references, or which needs to hand a
//! plain status code to its own caller.
//!
//! ```
//! use darray::api;
//! use darray::array::DynamicArray;
//! use darray::status::Status;
//!
//! let mut array: DynamicArray<u32> = DynamicArray::new();
//!
//! assert_eq!(Status::Success, api::append(Some(&mut array), 4));
//! assert_eq!(Status::NullTarget, api::append(None::<&mut DynamicArray<u32>>, 4));
//!
//! let mut destination = 0;
//! assert_eq!(Status::Success, api::get_into(Some(&array), 0, &mut destination));
//! assert_eq!(4, destination);
//!
//! assert_eq!("index can't be larger than the capacity", api::insert(Some(&mut array), 8, 1).as_str());
//! ```

use super::allocator::Allocator;
use super::array::{Comparator, DynamicArray};
use super::failure::{Failure, Result};
use super::status::Status;

/// Resets the target to the state of a newly created array, allocating through the system allocator.
#[cfg(feature = "with-std")]
pub fn init<T>(target: Option<&mut DynamicArray<T>>) -> Status {
    with_target(target, |array| {
        array.init();
        Ok(())
    })
}

/// Resets the target to the state of a newly created array, then installs `allocator`.
///
/// The first failure of either step is reported, never masked by a later success: notably `NullFunctionPointer` if
/// `allocator` cannot allocate or cannot release.
pub fn init_with_allocator<T>(target: Option<&mut DynamicArray<T>>, allocator: Allocator) -> Status {
    with_target(target, |array| array.try_init_with_allocator(allocator))
}

/// Switches the target to a different allocator record, migrating its buffer if any.
pub fn set_allocator<T>(target: Option<&mut DynamicArray<T>>, allocator: Allocator) -> Status {
    with_target(target, |array| array.try_set_allocator(allocator))
}

/// Sets the comparator of the target, `None` meaning that no ordering is defined.
pub fn set_comparator<T>(target: Option<&mut DynamicArray<T>>, comparator: Option<Comparator<T>>) -> Status {
    with_target(target, |array| {
        array.set_comparator(comparator);
        Ok(())
    })
}

/// Resizes the buffer of the target to exactly `new_capacity` slots.
pub fn resize<T: Copy + Default>(target: Option<&mut DynamicArray<T>>, new_capacity: usize) -> Status {
    with_target(target, |array| array.try_resize(new_capacity))
}

/// Writes `value` in the slot at `index` of the target.
pub fn insert<T: Copy + Default>(target: Option<&mut DynamicArray<T>>, index: usize, value: T) -> Status {
    with_target(target, |array| array.try_insert(index, value))
}

/// Appends `value` at the back of the target, growing it if full.
pub fn append<T: Copy + Default>(target: Option<&mut DynamicArray<T>>, value: T) -> Status {
    with_target(target, |array| array.try_append(value))
}

/// Copies the element at `index` of the target into `destination`.
pub fn get_into<T: Copy + Default>(target: Option<&DynamicArray<T>>, index: usize, destination: &mut T) -> Status {
    with_target(target, |array| array.get_into(index, destination))
}

/// Returns a copy of the element at `index` of the target, or `T::default()` on any failure.
///
/// Use `get_into` to tell a failure apart from a default value.
pub fn get_or_default<T: Copy + Default>(target: Option<&DynamicArray<T>>, index: usize) -> T {
    target.map_or_else(T::default, |array| array.get_or_default(index))
}

/// Releases the buffer of the target, if any, and resets every field to zero.
pub fn free<T>(target: Option<&mut DynamicArray<T>>) -> Status {
    with_target(target, |array| array.try_free())
}

//
//  Implementation Details
//

fn with_target<A, F>(target: Option<A>, fun: F) -> Status
where
    F: FnOnce(A) -> Result<()>,
{
    target.ok_or(Failure::NullTarget).and_then(fun).into()
}

#[cfg(test)]
mod tests {

use super::*;

use crate::utils::tester::*;

type Array = DynamicArray<u64>;

fn none<'a>() -> Option<&'a mut Array> { None }

#[test]
fn api_null_target() {
    assert_eq!(Status::NullTarget, init(none()));
    assert_eq!(Status::NullTarget, init_with_allocator(none(), Allocator::system()));
    assert_eq!(Status::NullTarget, set_allocator(none(), Allocator::system()));
    assert_eq!(Status::NullTarget, set_comparator(none(), None));
    assert_eq!(Status::NullTarget, resize(none(), 4));
    assert_eq!(Status::NullTarget, insert(none(), 0, 1));
    assert_eq!(Status::NullTarget, append(none(), 1));
    assert_eq!(Status::NullTarget, free(none()));

    let mut destination = 7;
    assert_eq!(Status::NullTarget, get_into(None::<&Array>, 0, &mut destination));
    assert_eq!(7, destination);

    assert_eq!(0, get_or_default(None::<&Array>, 0));
}

#[test]
fn api_lifecycle() {
    let heap = TestHeap::<0>::new();
    heap.allow(usize::MAX);

    let mut array = Array::new();

    assert_eq!(Status::Success, init_with_allocator(Some(&mut array), heap.allocator()));
    assert_eq!(0, heap.calls());

    for i in 0..9 {
        assert_eq!(Status::Success, append(Some(&mut array), i));
    }

    assert_eq!(10, array.capacity());
    assert_eq!(8, get_or_default(Some(&array), 8));

    assert_eq!(Status::IndexOutOfCapacity, insert(Some(&mut array), 10, 1));
    assert_eq!(Status::Success, resize(Some(&mut array), 4));
    assert_eq!(4, array.len());

    assert_eq!(Status::Success, free(Some(&mut array)));
    assert_eq!(0, heap.live());

    assert_eq!(Status::NullFunctionPointer, insert(Some(&mut array), 0, 1));
    assert_eq!(Status::NullFunctionPointer, append(Some(&mut array), 1));

    assert_eq!(Status::Success, init(Some(&mut array)));
    assert_eq!(Status::Success, append(Some(&mut array), 1));
}

#[test]
fn api_set_allocator_unset_free() {
    let heap = TestHeap::<0>::new();
    heap.allow(usize::MAX);

    let mut array = Array::with_allocator(heap.allocator());
    assert_eq!(Status::Success, append(Some(&mut array), 3));

    let crippled = Allocator::system().with_free(None);

    assert_eq!(Status::NullFunctionPointer, set_allocator(Some(&mut array), crippled));
    assert_eq!(1, heap.live());

    let mut destination = 0;
    assert_eq!(Status::Success, get_into(Some(&array), 0, &mut destination));
    assert_eq!(3, destination);
}

#[test]
fn api_init_with_allocator_unset_slots() {
    let mut array = Array::new();
    assert_eq!(Status::Success, append(Some(&mut array), 3));

    assert_eq!(Status::NullFunctionPointer, init_with_allocator(Some(&mut array), Allocator::empty()));
    assert_eq!(0, array.len());

    let crippled = Allocator::system().with_allocate(None);

    assert_eq!(Status::NullFunctionPointer, init_with_allocator(Some(&mut array), crippled));
    assert_eq!(Status::NullFunctionPointer, set_allocator(Some(&mut Array::new()), Allocator::empty()));
    assert_eq!(Status::NullFunctionPointer, insert(Some(&mut array), 0, 1));

    assert_eq!(Status::Success, init_with_allocator(Some(&mut array), Allocator::system()));
    assert_eq!(Status::Success, insert(Some(&mut array), 0, 1));
}

#[test]
fn api_set_comparator() {
    let mut array = Array::new();

    assert_eq!(Status::Success, set_comparator(Some(&mut array), Some(|a: &u64, b: &u64| a.cmp(b))));
    assert!(array.comparator().is_some());

    assert_eq!(Status::Success, set_comparator(Some(&mut array), None));
    assert!(array.comparator().is_none());
}

}
