//! The Status codes of this library.
//!
//! A `Status` is the flattened form of a `Result<()>`: `Success`, or one of the `Failure` variants. It is the type
//! returned by every operation of the `api` module, and carries a stable numeric code and a fixed description, for
//! diagnostics.

use super::failure::{Failure, Result};
use super::root::fmt;

/// Status
///
/// The outcome of an operation.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum Status {
    /// The operation succeeded.
    Success,
    /// The allocator could not allocate memory.
    AllocationFailure,
    /// The target of the operation is absent.
    NullTarget,
    /// Reserved: an element was accessed at an invalid index.
    InvalidIndexAccess,
    /// The index is greater than, or equal to, the capacity.
    IndexOutOfCapacity,
    /// The capacity cannot grow any further.
    MaxCapacityReached,
    /// The allocator slot required by the operation is unset.
    NullFunctionPointer,
    /// Reserved: the end of an iteration was reached.
    IteratorEnd,
}

impl Status {
    /// Returns whether the status is `Success`.
    pub const fn is_success(self) -> bool { matches!(self, Status::Success) }

    /// Returns the numeric code of the status, `Success` being 0.
    ///
    /// ```
    /// #   use darray::status::Status;
    /// assert_eq!(0, Status::Success.code());
    /// assert_eq!(6, Status::NullFunctionPointer.code());
    /// ```
    pub const fn code(self) -> u8 {
        match self {
            Status::Success => 0,
            Status::AllocationFailure => 1,
            Status::NullTarget => 2,
            Status::InvalidIndexAccess => 3,
            Status::IndexOutOfCapacity => 4,
            Status::MaxCapacityReached => 5,
            Status::NullFunctionPointer => 6,
            Status::IteratorEnd => 7,
        }
    }

    /// Returns the status matching a numeric code, if any.
    pub const fn from_code(code: u8) -> Option<Status> {
        let status = match code {
            0 => Status::Success,
            1 => Status::AllocationFailure,
            2 => Status::NullTarget,
            3 => Status::InvalidIndexAccess,
            4 => Status::IndexOutOfCapacity,
            5 => Status::MaxCapacityReached,
            6 => Status::NullFunctionPointer,
            7 => Status::IteratorEnd,
            _ => return None,
        };

        Some(status)
    }

    /// Returns the human-readable description of the status.
    ///
    /// `Success` is described by the empty string.
    pub const fn as_str(self) -> &'static str {
        match self.failure() {
            None => "",
            Some(failure) => failure.description(),
        }
    }

    /// Returns the failure matching the status, if any.
    pub const fn failure(self) -> Option<Failure> {
        match self {
            Status::Success => None,
            Status::AllocationFailure => Some(Failure::AllocationFailure),
            Status::NullTarget => Some(Failure::NullTarget),
            Status::InvalidIndexAccess => Some(Failure::InvalidIndexAccess),
            Status::IndexOutOfCapacity => Some(Failure::IndexOutOfCapacity),
            Status::MaxCapacityReached => Some(Failure::MaxCapacityReached),
            Status::NullFunctionPointer => Some(Failure::NullFunctionPointer),
            Status::IteratorEnd => Some(Failure::IteratorEnd),
        }
    }

    /// Converts the status back into a `Result`.
    pub fn into_result(self) -> Result<()> {
        match self.failure() {
            None => Ok(()),
            Some(failure) => Err(failure),
        }
    }
}

/// Returns the description of a numeric status code.
///
/// Unknown codes are described as unsupported.
///
/// ```
/// #   use darray::status::describe_code;
/// assert_eq!("", describe_code(0));
/// assert_eq!("collection reached max capacity", describe_code(5));
/// assert_eq!("unsupported stat", describe_code(42));
/// ```
pub fn describe_code(code: u8) -> &'static str {
    Status::from_code(code).map_or("unsupported stat", Status::as_str)
}

impl From<Failure> for Status {
    fn from(failure: Failure) -> Self {
        match failure {
            Failure::AllocationFailure => Status::AllocationFailure,
            Failure::NullTarget => Status::NullTarget,
            Failure::InvalidIndexAccess => Status::InvalidIndexAccess,
            Failure::IndexOutOfCapacity => Status::IndexOutOfCapacity,
            Failure::MaxCapacityReached => Status::MaxCapacityReached,
            Failure::NullFunctionPointer => Status::NullFunctionPointer,
            Failure::IteratorEnd => Status::IteratorEnd,
        }
    }
}

impl From<Result<()>> for Status {
    fn from(result: Result<()>) -> Self {
        result.map_or_else(Status::from, |()| Status::Success)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
