//! The Failure and Result types of this library.
//!
//! The `DynamicArray` relies on a caller-supplied allocator, any of whose slots may be unset, and any of whose
//! allocations may fail. Any method which attempts to allocate memory, release memory, or access an element, may thus
//! fail. The cause of the error is then represented as a `Failure`.
//!
//! All faillible methods come in two versions:
//!
//! -   A faillible `try_xxx` version, which returns a `Result` with `Failure` as the error type.
//! -   A convenience `xxx` version, which invokes the `try_xxx` version and panics in case of error.

use super::root::{error, fmt, result};

/// Universal Failure type of this library.
///
/// The variants are listed in the order of their numeric status code, see `Status::code`.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum Failure {
    /// The allocator could not allocate memory.
    AllocationFailure,
    /// The target of the operation is absent.
    NullTarget,
    /// Reserved: an element was accessed at an invalid index.
    InvalidIndexAccess,
    /// The index is greater than, or equal to, the capacity.
    IndexOutOfCapacity,
    /// The capacity, or the number of bytes it requires, cannot be computed without overflowing.
    MaxCapacityReached,
    /// The allocator slot required by the operation is unset.
    NullFunctionPointer,
    /// Reserved: the end of an iteration was reached.
    IteratorEnd,
}

impl Failure {
    /// Returns the human-readable description of the failure.
    ///
    /// ```
    /// #   use darray::failure::Failure;
    /// assert_eq!("memory allocation error", Failure::AllocationFailure.description());
    /// ```
    pub const fn description(self) -> &'static str {
        match self {
            Failure::AllocationFailure => "memory allocation error",
            Failure::NullTarget => "null pointer is not allowed",
            Failure::InvalidIndexAccess => "invalid access to element of index",
            Failure::IndexOutOfCapacity => "index can't be larger than the capacity",
            Failure::MaxCapacityReached => "collection reached max capacity",
            Failure::NullFunctionPointer => "null function pointer is not allowed",
            Failure::IteratorEnd => "end of iterator",
        }
    }
}

impl error::Error for Failure {}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self, self.description())
    }
}

/// Universal Result type of this library.
pub type Result<T> = result::Result<T, Failure>;
