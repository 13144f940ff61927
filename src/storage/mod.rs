//! Backing storage for sequences.

pub(crate) mod alloc;

pub(crate) mod utils;

#[cfg(feature = "zeroize")]
mod zero;

#[cfg(feature = "allocator-api2")]
pub use self::alloc::AllocatorApi;
pub use self::alloc::{handle_alloc_error, Global, RawAlloc};
#[cfg(feature = "zeroize")]
pub use self::zero::ZeroizingAlloc;

/// Access to the data pointer of a contiguous buffer.
pub trait RawBuffer: Sized {
    /// The element type of the buffer.
    type RawData: ?Sized;

    /// Get a read pointer to the start of the buffer.
    fn data_ptr(&self) -> *const Self::RawData;

    /// Get a write pointer to the start of the buffer.
    fn data_ptr_mut(&mut self) -> *mut Self::RawData;
}
