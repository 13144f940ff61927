//! Support for growable sequences.

use core::cmp::Ordering;
use core::fmt::{self, Write as _};
use core::iter::repeat;
use core::marker::PhantomData;
use core::mem::ManuallyDrop;
use core::ops::{Deref, DerefMut};
use core::ptr;
use core::slice;

use const_default::ConstDefault;

use crate::capacity::{Grow, GrowBy, Position, DEFAULT_CAPACITY};
use crate::error::{SequenceError, StorageError, UpdateError};
use crate::storage::{Global, RawAlloc, RawBuffer};

use self::buffer::SeqBuffer;

pub use self::into_iter::IntoIter;

mod buffer;

#[macro_use]
mod macros;

mod into_iter;

pub mod order;

#[cfg(feature = "zeroize")]
/// A `GrowableSequence` which zeroizes every buffer it releases.
pub type ZeroizingSequence<T> = GrowableSequence<T, crate::storage::ZeroizingAlloc<Global>>;

/// A `GrowableSequence` which doubles its capacity when it runs out of space.
pub type DoublingSequence<T> = GrowableSequence<T, Global, crate::capacity::GrowDoubling>;

#[inline]
/// Create a `GrowableSequence<T>` from an array `[T; N]`.
pub fn from_array<T, const N: usize>(data: [T; N]) -> GrowableSequence<T> {
    let mut seq = GrowableSequence::new();
    seq.extend(data);
    seq
}

#[inline]
/// Create a `GrowableSequence<T>` from a cloneable element T and a count of
/// the number of elements.
pub fn from_elem<T: Clone>(elem: T, count: usize) -> GrowableSequence<T> {
    let mut seq = GrowableSequence::new();
    seq.extend(repeat(elem).take(count));
    seq
}

/// A contiguous, growable sequence of elements.
///
/// Storage is obtained from the allocator `A`. When an insertion finds the
/// sequence full, the growth policy `G` determines the new capacity; the
/// default policy adds [`DEFAULT_CAPACITY`] slots at a time.
pub struct GrowableSequence<T, A: RawAlloc = Global, G: Grow = GrowBy<DEFAULT_CAPACITY>> {
    buffer: SeqBuffer<T, A>,
    grow: PhantomData<G>,
}

impl<T, A: RawAlloc + ConstDefault, G: Grow> GrowableSequence<T, A, G> {
    /// Constructs a new, empty `GrowableSequence` with a capacity of
    /// [`DEFAULT_CAPACITY`].
    ///
    /// # Examples
    ///
    /// ```
    /// use flex_seq::GrowableSequence;
    ///
    /// let seq = GrowableSequence::<i32>::new();
    /// assert_eq!(seq.count(), 0);
    /// assert_eq!(seq.capacity(), 10);
    /// ```
    pub fn new() -> Self {
        Self::new_in(A::DEFAULT)
    }

    /// Constructs a new, empty `GrowableSequence` with exactly `capacity`
    /// allocated slots.
    ///
    /// Fails with [`SequenceError::InvalidArgument`] when the capacity is
    /// negative or cannot be represented as an allocation.
    ///
    /// # Examples
    ///
    /// ```
    /// use flex_seq::{GrowableSequence, SequenceError};
    ///
    /// let seq = GrowableSequence::<i32>::with_capacity(50).unwrap();
    /// assert_eq!(seq.capacity(), 50);
    ///
    /// let err = GrowableSequence::<i32>::with_capacity(-1).unwrap_err();
    /// assert_eq!(err, SequenceError::InvalidArgument);
    /// ```
    pub fn with_capacity<P: Position>(capacity: P) -> Result<Self, SequenceError> {
        Self::with_capacity_in(capacity, A::DEFAULT)
    }
}

impl<T, A: RawAlloc, G: Grow> GrowableSequence<T, A, G> {
    /// Constructs a new, empty `GrowableSequence` with a capacity of
    /// [`DEFAULT_CAPACITY`], using the provided allocator.
    pub fn new_in(alloc: A) -> Self {
        match Self::alloc_in(DEFAULT_CAPACITY, alloc) {
            Ok(seq) => seq,
            Err(error) => error.panic(),
        }
    }

    /// Constructs a new, empty `GrowableSequence` with exactly `capacity`
    /// allocated slots, using the provided allocator.
    pub fn with_capacity_in<P: Position>(capacity: P, alloc: A) -> Result<Self, SequenceError> {
        let capacity = capacity
            .to_offset()
            .ok_or(SequenceError::InvalidArgument)?;
        Self::alloc_in(capacity, alloc)
    }

    fn alloc_in(capacity: usize, alloc: A) -> Result<Self, SequenceError> {
        match SeqBuffer::try_new_in(capacity, alloc) {
            Ok(buffer) => Ok(Self {
                buffer,
                grow: PhantomData,
            }),
            Err(StorageError::AllocError(layout)) => StorageError::AllocError(layout).panic(),
            Err(_) => Err(SequenceError::InvalidArgument),
        }
    }

    #[inline]
    fn into_inner(self) -> SeqBuffer<T, A> {
        let me = ManuallyDrop::new(self);
        unsafe { ptr::read(&me.buffer) }
    }

    /// Get a reference to the allocator of this sequence.
    #[inline]
    pub fn allocator(&self) -> &A {
        self.buffer.allocator()
    }

    /// The number of elements in the sequence.
    #[inline]
    pub fn count(&self) -> usize {
        self.buffer.length()
    }

    /// The number of elements in the sequence, equal to [`Self::count`].
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.length()
    }

    /// The number of slots in the current allocation.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Check whether the sequence contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.length() == 0
    }

    /// Access the elements of the sequence as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.buffer.as_slice()
    }

    /// Access the elements of the sequence as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.buffer.as_mut_slice()
    }

    /// Extend the capacity by exactly `extra` slots, moving the elements
    /// into a new allocation.
    ///
    /// # Panics
    /// Panics if the new capacity overflows, or aborts on allocation failure.
    #[inline]
    pub fn grow(&mut self, extra: usize) {
        match self.try_grow(extra) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Try to extend the capacity by exactly `extra` slots, moving the
    /// elements into a new allocation.
    pub fn try_grow(&mut self, extra: usize) -> Result<(), StorageError> {
        let Some(capacity) = self.buffer.capacity().checked_add(extra) else {
            return Err(StorageError::CapacityLimit);
        };
        self.buffer.try_resize(capacity)
    }

    fn _try_reserve(&mut self, reserve: usize) -> Result<(), StorageError> {
        let buf_cap = self.buffer.capacity();
        let Some(buf_needed) = self.buffer.length().checked_add(reserve) else {
            return Err(StorageError::CapacityLimit);
        };
        if buf_cap >= buf_needed {
            return Ok(());
        }
        let capacity = G::next_capacity::<T>(buf_cap, buf_needed);
        self.buffer.try_resize(capacity)
    }

    #[inline]
    fn checked_index<P: Position>(&self, index: P) -> Result<usize, SequenceError> {
        match index.to_offset() {
            Some(index) if index < self.buffer.length() => Ok(index),
            _ => Err(SequenceError::IndexOutOfRange),
        }
    }

    /// Get a reference to the element at `index`.
    ///
    /// Fails with [`SequenceError::IndexOutOfRange`] unless
    /// `0 <= index < count`.
    #[inline]
    pub fn get<P: Position>(&self, index: P) -> Result<&T, SequenceError> {
        let index = self.checked_index(index)?;
        Ok(unsafe { self.as_slice().get_unchecked(index) })
    }

    /// Get a mutable reference to the element at `index`.
    #[inline]
    pub fn get_mut<P: Position>(&mut self, index: P) -> Result<&mut T, SequenceError> {
        let index = self.checked_index(index)?;
        Ok(unsafe { self.as_mut_slice().get_unchecked_mut(index) })
    }

    /// Replace the element at `index`, dropping the previous value.
    ///
    /// Fails with [`SequenceError::IndexOutOfRange`] unless
    /// `0 <= index < count`.
    #[inline]
    pub fn set<P: Position>(&mut self, index: P, value: T) -> Result<(), SequenceError> {
        *self.get_mut(index)? = value;
        Ok(())
    }

    /// Add an element to the end of the sequence, growing it if necessary.
    pub fn append(&mut self, value: T) {
        match self.try_append(value) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Add an element to the end of the sequence, returning the value if
    /// storage could not be obtained.
    pub fn try_append(&mut self, value: T) -> Result<(), UpdateError<T>> {
        if let Err(error) = self._try_reserve(1) {
            return Err(UpdateError::new(error, value));
        }
        unsafe {
            self.append_unchecked(value);
        }
        Ok(())
    }

    #[inline]
    unsafe fn append_unchecked(&mut self, value: T) {
        let length = self.buffer.length();
        self.buffer.uninit_index(length).write(value);
        self.buffer.set_length(length + 1);
    }

    /// Insert an element at `index`, shifting all following elements one
    /// slot to the right. An index equal to the count appends the element.
    ///
    /// Fails with [`SequenceError::IndexOutOfRange`] unless
    /// `0 <= index <= count`. The sequence is unchanged on failure.
    pub fn insert_at<P: Position>(&mut self, index: P, value: T) -> Result<(), SequenceError> {
        let prev_len = self.buffer.length();
        let index = match index.to_offset() {
            Some(index) if index <= prev_len => index,
            _ => return Err(SequenceError::IndexOutOfRange),
        };
        if let Err(error) = self._try_reserve(1) {
            error.panic();
        }
        let tail_count = prev_len - index;
        unsafe {
            let head = self.buffer.data_ptr_mut().add(index);
            if tail_count > 0 {
                ptr::copy(head, head.add(1), tail_count);
            }
            head.write(value);
            self.buffer.set_length(prev_len + 1);
        }
        Ok(())
    }

    /// Remove and return the element at `index`, shifting all following
    /// elements one slot to the left.
    ///
    /// Fails with [`SequenceError::IndexOutOfRange`] unless
    /// `0 <= index < count`. The sequence is unchanged on failure.
    pub fn remove_at<P: Position>(&mut self, index: P) -> Result<T, SequenceError> {
        let index = self.checked_index(index)?;
        Ok(unsafe { self.remove_unchecked(index) })
    }

    /// # Safety
    /// The index must be less than the length of the sequence.
    unsafe fn remove_unchecked(&mut self, index: usize) -> T {
        let len = self.buffer.length();
        let copy_count = len - index - 1;
        let head = self.buffer.data_ptr_mut().add(index);
        let result = head.read();
        if copy_count > 0 {
            ptr::copy(head.add(1), head, copy_count);
        }
        self.buffer.set_length(len - 1);
        result
    }

    /// Remove the first element equal to `value`, returning `true` if one
    /// was found.
    pub fn remove(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        match self.index_of(value) {
            Some(index) => {
                drop(unsafe { self.remove_unchecked(index) });
                true
            }
            None => false,
        }
    }

    /// Remove the last element of the sequence and return it.
    pub fn pop(&mut self) -> Option<T> {
        let mut tail = self.buffer.length();
        if tail > 0 {
            tail -= 1;
            unsafe { self.buffer.set_length(tail) };
            Some(unsafe { self.buffer.uninit_index(tail).assume_init_read() })
        } else {
            None
        }
    }

    /// Find the position of the first element equal to `value`.
    ///
    /// This performs a linear search.
    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.as_slice().iter().position(|item| item == value)
    }

    /// Check whether any element is equal to `value`.
    #[inline]
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.index_of(value).is_some()
    }

    /// Remove all elements from the sequence, retaining its capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Shorten the sequence to at most `length` elements, dropping the rest.
    pub fn truncate(&mut self, length: usize) {
        let old_len = self.buffer.length();
        let new_len = length.min(old_len);
        let remove = old_len - new_len;
        if remove > 0 {
            unsafe { self.buffer.set_length(new_len) };
            unsafe {
                let to_drop: &mut [T] =
                    slice::from_raw_parts_mut(self.buffer.data_ptr_mut().add(new_len), remove);
                ptr::drop_in_place(to_drop);
            }
        }
    }

    /// Sort the sequence in place according to the natural order of `T`.
    ///
    /// The sort is stable: equal elements keep their relative order.
    #[inline]
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        self.as_mut_slice().sort();
    }

    /// Sort the sequence in place using a comparator function.
    ///
    /// The sort is stable. The comparator must define a total order; see
    /// [`order::three_way`] to adapt an integer-valued comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use flex_seq::seq;
    ///
    /// let mut seq = seq![3, 2, 1, 4];
    /// seq.sort_by(|a, b| (a % 2).cmp(&(b % 2)));
    /// assert_eq!(seq, [2, 4, 3, 1]);
    /// ```
    #[inline]
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.as_mut_slice().sort_by(compare);
    }

    /// Sort the sequence in place by a key extracted from each element.
    ///
    /// The sort is stable.
    #[inline]
    pub fn sort_by_key<K, F>(&mut self, key: F)
    where
        F: FnMut(&T) -> K,
        K: Ord,
    {
        self.as_mut_slice().sort_by_key(key);
    }

    fn try_extend(&mut self, iter: impl Iterator<Item = T>) -> Result<(), UpdateError<T>> {
        if let Err(error) = self._try_reserve(iter.size_hint().0) {
            error.panic();
        }
        for item in iter {
            self.try_append(item)?;
        }
        Ok(())
    }
}

impl<T, A: RawAlloc, G: Grow> AsRef<[T]> for GrowableSequence<T, A, G> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: RawAlloc, G: Grow> AsMut<[T]> for GrowableSequence<T, A, G> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: Clone, A: RawAlloc + Clone, G: Grow> Clone for GrowableSequence<T, A, G> {
    fn clone(&self) -> Self {
        let mut inst = match Self::alloc_in(self.capacity(), self.allocator().clone()) {
            Ok(inst) => inst,
            Err(error) => error.panic(),
        };
        inst.extend(self.iter().cloned());
        inst
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.extend(source.iter().cloned());
    }
}

impl<T: fmt::Debug, A: RawAlloc, G: Grow> fmt::Debug for GrowableSequence<T, A, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_slice().fmt(f)
    }
}

/// Renders the elements as `[e0,e1,...]` with no spaces, or `[]` when empty.
impl<T: fmt::Display, A: RawAlloc, G: Grow> fmt::Display for GrowableSequence<T, A, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('[')?;
        for (idx, item) in self.iter().enumerate() {
            if idx > 0 {
                f.write_char(',')?;
            }
            write!(f, "{}", item)?;
        }
        f.write_char(']')
    }
}

impl<T, A: RawAlloc + ConstDefault, G: Grow> Default for GrowableSequence<T, A, G> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, A: RawAlloc, G: Grow> Deref for GrowableSequence<T, A, G> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T, A: RawAlloc, G: Grow> DerefMut for GrowableSequence<T, A, G> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T, A: RawAlloc, G: Grow> Drop for GrowableSequence<T, A, G> {
    fn drop(&mut self) {
        let to_drop: &mut [T] = self.as_mut_slice();
        if !to_drop.is_empty() {
            unsafe {
                ptr::drop_in_place(to_drop);
                self.buffer.set_length(0);
            }
        }
    }
}

impl<T, A: RawAlloc, G: Grow> Extend<T> for GrowableSequence<T, A, G> {
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        match self.try_extend(iter.into_iter()) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }
}

impl<'a, T: Clone + 'a, A: RawAlloc, G: Grow> Extend<&'a T> for GrowableSequence<T, A, G> {
    #[inline]
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        match self.try_extend(iter.into_iter().cloned()) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }
}

impl<T, A: RawAlloc + ConstDefault, G: Grow> FromIterator<T> for GrowableSequence<T, A, G> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut seq = Self::new();
        seq.extend(iter);
        seq
    }
}

// If a particular allocator is not 'Send' or 'Sync' then the bounds on A
// must reflect that.
unsafe impl<T: Send, A: RawAlloc + Send, G: Grow> Send for GrowableSequence<T, A, G> {}

unsafe impl<T: Sync, A: RawAlloc + Sync, G: Grow> Sync for GrowableSequence<T, A, G> {}

impl<T: Clone, A: RawAlloc + ConstDefault, G: Grow> From<&[T]> for GrowableSequence<T, A, G> {
    #[inline]
    fn from(data: &[T]) -> Self {
        Self::from_iter(data.iter().cloned())
    }
}

impl<T, A: RawAlloc + ConstDefault, G: Grow, const N: usize> From<[T; N]>
    for GrowableSequence<T, A, G>
{
    #[inline]
    fn from(data: [T; N]) -> Self {
        Self::from_iter(data)
    }
}

impl<T, A: RawAlloc, G: Grow> IntoIterator for GrowableSequence<T, A, G> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.into_inner())
    }
}

impl<'a, T, A: RawAlloc, G: Grow> IntoIterator for &'a GrowableSequence<T, A, G> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T, A: RawAlloc, G: Grow> IntoIterator for &'a mut GrowableSequence<T, A, G> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<T1, A1, G1, T2, A2, G2> PartialEq<GrowableSequence<T2, A2, G2>>
    for GrowableSequence<T1, A1, G1>
where
    T1: PartialEq<T2>,
    A1: RawAlloc,
    A2: RawAlloc,
    G1: Grow,
    G2: Grow,
{
    #[inline]
    fn eq(&self, other: &GrowableSequence<T2, A2, G2>) -> bool {
        self.as_slice().eq(other.as_slice())
    }
}

impl<T: Eq, A: RawAlloc, G: Grow> Eq for GrowableSequence<T, A, G> {}

impl<T1, T2, A: RawAlloc, G: Grow> PartialEq<[T2]> for GrowableSequence<T1, A, G>
where
    T1: PartialEq<T2>,
{
    #[inline]
    fn eq(&self, other: &[T2]) -> bool {
        self.as_slice().eq(other)
    }
}

impl<T1, T2, A: RawAlloc, G: Grow> PartialEq<&[T2]> for GrowableSequence<T1, A, G>
where
    T1: PartialEq<T2>,
{
    #[inline]
    fn eq(&self, other: &&[T2]) -> bool {
        self.as_slice().eq(*other)
    }
}

impl<T1, T2, A: RawAlloc, G: Grow, const N: usize> PartialEq<[T2; N]>
    for GrowableSequence<T1, A, G>
where
    T1: PartialEq<T2>,
{
    #[inline]
    fn eq(&self, other: &[T2; N]) -> bool {
        self.as_slice().eq(&other[..])
    }
}

impl<T1, T2, A: RawAlloc, G: Grow, const N: usize> PartialEq<&[T2; N]>
    for GrowableSequence<T1, A, G>
where
    T1: PartialEq<T2>,
{
    #[inline]
    fn eq(&self, other: &&[T2; N]) -> bool {
        self.as_slice().eq(&other[..])
    }
}

impl<T1, T2, A: RawAlloc, G: Grow> PartialEq<alloc_crate::vec::Vec<T2>>
    for GrowableSequence<T1, A, G>
where
    T1: PartialEq<T2>,
{
    #[inline]
    fn eq(&self, other: &alloc_crate::vec::Vec<T2>) -> bool {
        self.as_slice().eq(other.as_slice())
    }
}
