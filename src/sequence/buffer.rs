use core::alloc::Layout;
use core::fmt;
use core::mem::MaybeUninit;
use core::ptr::{self, NonNull};
use core::slice;

use crate::error::StorageError;
use crate::storage::utils::array_layout;
use crate::storage::{RawAlloc, RawBuffer};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SeqHeader {
    pub capacity: usize,
    pub length: usize,
}

/// An owned allocation of `capacity` slots, the first `length` of which
/// are initialized. Dropping the buffer releases the memory but does not
/// drop the initialized elements.
pub struct SeqBuffer<T, A: RawAlloc> {
    header: SeqHeader,
    data: NonNull<T>,
    alloc: A,
}

impl<T, A: RawAlloc> SeqBuffer<T, A> {
    pub fn try_new_in(capacity: usize, alloc: A) -> Result<Self, StorageError> {
        let data = Self::allocate(&alloc, capacity)?;
        Ok(Self {
            header: SeqHeader {
                capacity,
                length: 0,
            },
            data,
            alloc,
        })
    }

    fn allocate(alloc: &A, capacity: usize) -> Result<NonNull<T>, StorageError> {
        let layout = array_layout::<T>(capacity)?;
        if layout.size() == 0 {
            Ok(NonNull::dangling())
        } else {
            Ok(alloc.try_alloc(layout)?.cast())
        }
    }

    #[inline]
    fn layout(&self) -> Layout {
        // SAFETY: the layout was validated when the buffer was allocated
        unsafe {
            Layout::from_size_align_unchecked(
                self.header.capacity * core::mem::size_of::<T>(),
                core::mem::align_of::<T>(),
            )
        }
    }

    #[inline]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.header.capacity
    }

    #[inline]
    pub fn length(&self) -> usize {
        self.header.length
    }

    /// # Safety
    /// The first `len` slots must be initialized and `len` must not exceed
    /// the capacity.
    #[inline]
    pub unsafe fn set_length(&mut self, len: usize) {
        debug_assert!(len <= self.header.capacity);
        self.header.length = len;
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.data.as_ptr(), self.header.length) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.data.as_ptr(), self.header.length) }
    }

    /// # Safety
    /// The index must be within the bounds of the buffer's capacity.
    #[inline]
    pub unsafe fn uninit_index(&mut self, index: usize) -> &mut MaybeUninit<T> {
        &mut *self.data.as_ptr().add(index).cast()
    }

    /// Move the initialized elements into a new allocation of `capacity`
    /// slots and release the previous allocation.
    pub fn try_resize(&mut self, capacity: usize) -> Result<(), StorageError> {
        let length = self.header.length;
        if capacity < length {
            return Err(StorageError::CapacityLimit);
        }
        let data = Self::allocate(&self.alloc, capacity)?;
        if data != self.data {
            unsafe {
                ptr::copy_nonoverlapping(self.data.as_ptr(), data.as_ptr(), length);
            }
        }
        self.release();
        self.data = data;
        self.header.capacity = capacity;
        Ok(())
    }

    #[inline]
    fn release(&mut self) {
        let layout = self.layout();
        if layout.size() > 0 {
            unsafe { self.alloc.release(self.data.cast(), layout) };
        }
    }
}

impl<T, A: RawAlloc> RawBuffer for SeqBuffer<T, A> {
    type RawData = T;

    #[inline]
    fn data_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    #[inline]
    fn data_ptr_mut(&mut self) -> *mut T {
        self.data.as_ptr()
    }
}

impl<T, A: RawAlloc> fmt::Debug for SeqBuffer<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeqBuffer")
            .field("header", &self.header)
            .field("alloc", &self.alloc)
            .finish_non_exhaustive()
    }
}

impl<T, A: RawAlloc> Drop for SeqBuffer<T, A> {
    fn drop(&mut self) {
        self.release();
    }
}
