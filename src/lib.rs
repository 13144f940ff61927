//! Growable sequences with a fixed-increment growth policy.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

#[doc = include_str!("../README.md")]
#[cfg(doctest)]
struct _ReadmeDoctests;

#[cfg(test)]
#[macro_use]
extern crate std;

extern crate alloc as alloc_crate;

pub mod capacity;

pub(crate) mod error;

pub mod sequence;

pub mod storage;

pub use self::{
    capacity::{Grow, GrowBy, GrowDoubling, Position, DEFAULT_CAPACITY},
    error::{SequenceError, StorageError, UpdateError},
    sequence::GrowableSequence,
    storage::Global,
};
