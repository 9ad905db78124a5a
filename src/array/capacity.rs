//! The DynamicArray capacity.
//!
//! Apart from holding the capacity itself, assembles the few computations based off the capacity: bounds checks,
//! growth, and the layout of the buffer.

use super::allocator::Layout;
use super::failure::{Failure, Result};
use super::root::cmp;

/// The capacity of a freshly initialized array.
pub const DEFAULT_CAPACITY: usize = 8;

/// The amount by which `append` grows the capacity of a full array.
pub const EXPANSION_INCREMENT: usize = 2;

//  Capacity.
//
//  The number of slots of the buffer, either allocated, or planned for the next allocation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Capacity(pub usize);

impl Capacity {
    //  Returns whether the index designates a slot.
    pub fn contains(self, index: ElementIndex) -> bool { index.0 < self.0 }

    //  Returns whether `length` occupies every slot.
    pub fn is_full(self, length: Length) -> bool { length.0 >= self.0 }

    //  Returns the capacity after one expansion step.
    //
    //  #   Errors
    //
    //  Returns `MaxCapacityReached` if the capacity would overflow.
    pub fn grown(self) -> Result<Capacity> {
        self.0.checked_add(EXPANSION_INCREMENT)
            .map(Capacity)
            .ok_or(Failure::MaxCapacityReached)
    }

    //  Computes the layout of a buffer of `T` with this capacity.
    //
    //  #   Errors
    //
    //  Returns `MaxCapacityReached` if the number of bytes overflows.
    pub fn layout<T>(self) -> Result<Layout> {
        Layout::array::<T>(self.0).map_err(|_| Failure::MaxCapacityReached)
    }
}

/// The (global) index of an element.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ElementIndex(pub usize);

/// The number of occupied slots.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Length(pub usize);

impl Length {
    //  Returns the length after writing at `index`.
    pub fn extended_to(self, index: ElementIndex) -> Length {
        Length(cmp::max(self.0, index.0 + 1))
    }

    //  Returns the length, truncated to fit within `capacity`.
    pub fn clamped_to(self, capacity: Capacity) -> Length {
        Length(cmp::min(self.0, capacity.0))
    }
}
