use core::alloc::Layout;
use core::ptr::NonNull;
use core::slice;

use const_default::ConstDefault;
use zeroize::Zeroize;

use crate::error::StorageError;

use super::alloc::RawAlloc;

/// An allocator wrapper which zeroizes every buffer before releasing it.
///
/// Buffers are released when a sequence grows into a new allocation and
/// when it is dropped, so no copy of the elements is left behind in freed
/// memory. Cleared slots within a live buffer are not scrubbed.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZeroizingAlloc<A>(pub A);

impl<A: ConstDefault> ConstDefault for ZeroizingAlloc<A> {
    const DEFAULT: Self = ZeroizingAlloc(A::DEFAULT);
}

impl<A: RawAlloc> RawAlloc for ZeroizingAlloc<A> {
    #[inline]
    fn try_alloc(&self, layout: Layout) -> Result<NonNull<[u8]>, StorageError> {
        self.0.try_alloc(layout)
    }

    #[inline]
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        let mem = slice::from_raw_parts_mut(ptr.as_ptr(), layout.size());
        mem.zeroize();
        self.0.release(ptr, layout)
    }
}
