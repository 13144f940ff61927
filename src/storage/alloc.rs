use core::alloc::Layout;
use core::fmt;
use core::ptr::NonNull;

use alloc_crate::alloc::{alloc as raw_alloc, dealloc as raw_dealloc};
use const_default::ConstDefault;

use crate::error::StorageError;

#[cfg(not(test))]
pub use alloc_crate::alloc::handle_alloc_error;

#[cfg(test)]
/// Custom allocation error handler.
pub fn handle_alloc_error(layout: Layout) -> ! {
    panic!("memory allocation of {} bytes failed", layout.size());
}

/// An allocator which produces and releases the buffers of a sequence.
///
/// Zero-sized layouts are never passed to an implementation; the buffer
/// handles those without allocating.
pub trait RawAlloc: fmt::Debug {
    /// Try to allocate a block of memory fitting the provided layout.
    fn try_alloc(&self, layout: Layout) -> Result<NonNull<[u8]>, StorageError>;

    /// Release an allocation produced by this allocator.
    ///
    /// # Safety
    /// The value `ptr` must represent an allocation produced by this allocator,
    /// and `layout` must match the layout used to allocate it.
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout);
}

impl<A: RawAlloc> RawAlloc for &A {
    #[inline]
    fn try_alloc(&self, layout: Layout) -> Result<NonNull<[u8]>, StorageError> {
        (**self).try_alloc(layout)
    }

    #[inline]
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        (**self).release(ptr, layout)
    }
}

/// The global memory allocator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Global;

impl ConstDefault for Global {
    const DEFAULT: Self = Global;
}

impl RawAlloc for Global {
    #[inline]
    fn try_alloc(&self, layout: Layout) -> Result<NonNull<[u8]>, StorageError> {
        debug_assert!(layout.size() > 0);
        let Some(ptr) = NonNull::new(unsafe { raw_alloc(layout) }) else {
            return Err(StorageError::AllocError(layout));
        };
        Ok(NonNull::slice_from_raw_parts(ptr, layout.size()))
    }

    #[inline]
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        raw_dealloc(ptr.as_ptr(), layout);
    }
}

/// An adapter for allocators implementing the `allocator-api2` `Allocator` trait.
#[cfg(feature = "allocator-api2")]
#[derive(Debug, Default, Clone, Copy)]
pub struct AllocatorApi<A>(pub A);

#[cfg(feature = "allocator-api2")]
impl<A: ConstDefault> ConstDefault for AllocatorApi<A> {
    const DEFAULT: Self = AllocatorApi(A::DEFAULT);
}

#[cfg(feature = "allocator-api2")]
impl<A> RawAlloc for AllocatorApi<A>
where
    A: allocator_api2::alloc::Allocator + fmt::Debug,
{
    #[inline]
    fn try_alloc(&self, layout: Layout) -> Result<NonNull<[u8]>, StorageError> {
        self.0
            .allocate(layout)
            .map_err(|_| StorageError::AllocError(layout))
    }

    #[inline]
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        self.0.deallocate(ptr, layout)
    }
}
