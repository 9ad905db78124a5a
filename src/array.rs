//! #   The DynamicArray.
//!
//! The `DynamicArray` is a growable array of opaque handles, bounded by its capacity rather than its length, and whose
//! memory is entirely managed through a user-supplied `Allocator` record.
//!
//! ##  Under the covers.
//!
//! Under the covers the `DynamicArray` is a single contiguous buffer of exactly `capacity` slots, allocated lazily on
//! the first write.
//!
//! The main consequences are:
//!
//! -   Constructing a `DynamicArray` never allocates, the capacity is merely planned.
//! -   Any slot below the capacity may be written or read, whether below the length or not; slots which were never
//!     written read as `T::default()`.
//! -   Elements are never dropped, nor inspected: they are handles whose pointee, if any, belong to the user.
//!
//! #   Example: basic
//!
//! General usage of `DynamicArray` involve appending elements with `append`, or writing them at a given index with
//! `insert`, and reading them back with `get_or_default`, or `get_into`.
//!
//! The faillible equivalent exist too: `try_append` and `try_insert` will return a `Result` indicating whether the
//! operation succeeded, and the cause of its failure if it did not.
//!
//! ```
//! use darray::array::DynamicArray;
//!
//! let mut array: DynamicArray<u32> = DynamicArray::new();
//! array.append(1);
//! array.append(2);
//!
//! assert_eq!(2, array.len());
//! assert_eq!(8, array.capacity());
//! assert_eq!(1, array.get_or_default(0));
//!
//! //  Any slot below the capacity can be written to.
//! array.insert(5, 6);
//!
//! assert_eq!(6, array.len());
//! assert_eq!(0, array.get_or_default(3));
//! assert_eq!(6, array.get_or_default(5));
//! ```
//!
//! #   Example: managing capacity
//!
//! The capacity only grows on demand, by `EXPANSION_INCREMENT` slots, when `append` finds the array full. It can
//! otherwise be adjusted explicitly with `resize`, which truncates the length if necessary.
//!
//! ```
//! use darray::array::{DynamicArray, DEFAULT_CAPACITY, EXPANSION_INCREMENT};
//! use darray::failure::Failure;
//!
//! let mut array: DynamicArray<u32> = DynamicArray::new();
//! assert_eq!(DEFAULT_CAPACITY, array.capacity());
//!
//! for i in 0..9 {
//!     array.append(i);
//! }
//!
//! assert_eq!(DEFAULT_CAPACITY + EXPANSION_INCREMENT, array.capacity());
//!
//! //  Indexes are bounded by capacity.
//! assert_eq!(Err(Failure::IndexOutOfCapacity), array.try_insert(10, 42));
//!
//! array.resize(4);
//!
//! assert_eq!(4, array.capacity());
//! assert_eq!(4, array.len());
//! ```
//!
//! #   Example: substituting allocators
//!
//! The `Allocator` record can be swapped at any time; the content of the array then migrates to a buffer allocated by
//! the new record, and the former buffer is released by the former record.
//!
//! ```
//! use darray::allocator::Allocator;
//! use darray::array::DynamicArray;
//! use darray::failure::Failure;
//!
//! let mut array: DynamicArray<u32> = DynamicArray::new();
//! array.append(3);
//!
//! //  A record unable to release memory is refused, leaving the array untouched.
//! let crippled = Allocator::system().with_free(None);
//! assert_eq!(Err(Failure::NullFunctionPointer), array.try_set_allocator(crippled));
//!
//! array.set_allocator(Allocator::system());
//! assert_eq!(3, array.get_or_default(0));
//!
//! //  Once freed, the array refuses to acquire memory until re-initialized.
//! array.free();
//! assert_eq!(Err(Failure::NullFunctionPointer), array.try_append(4));
//!
//! array.init();
//! assert_eq!(Ok(()), array.try_append(4));
//! ```

mod array;
mod buffer;
mod capacity;
mod hooks;

pub use self::array::DynamicArray;
pub use self::capacity::{DEFAULT_CAPACITY, EXPANSION_INCREMENT};
pub use self::hooks::Comparator;

use super::allocator;
use super::failure;
use super::root;
