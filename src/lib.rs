#![cfg_attr(not(feature = "with-std"), no_std)]
//  Lints
#![allow(clippy::module_inception)]

//! #   The DArray Library
//!
//! A growable array of opaque handles, whose memory is managed by a caller-supplied allocator record.
//!
//! -   The `DynamicArray`: a `Vec`-like container bounded by capacity, rather than length.
//! -   The `Allocator`: four function slots (allocate, zero-allocate, reallocate, free), copied into each array.
//! -   The `Status`: the closed set of status codes, with their human-readable descriptions.
//!
//! The `api` module exposes every operation in status-returning form, over an optional target.

pub mod allocator;
pub mod api;
pub mod array;
pub mod failure;
pub mod status;

mod utils;

use self::utils::root;
