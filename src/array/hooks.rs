//! Hooks of the DynamicArray.

use super::root::cmp;

/// Comparator
///
/// An ordering between two elements, supplied by the user.
///
/// The `DynamicArray` stores the comparator on behalf of its user, but never invokes it: neither sorting nor searching
/// is provided.
pub type Comparator<T> = fn(&T, &T) -> cmp::Ordering;
