//! Comparator adapters for sorting sequences.
//!
//! Sorting methods accept any `FnMut(&T, &T) -> Ordering`. These helpers
//! build such comparators from other shapes of ordering function.

use core::cmp::Ordering;

/// Adapt a three-way comparator returning a signed number (negative for
/// less, zero for equal, positive for greater) into an `Ordering` comparator.
///
/// # Examples
///
/// ```
/// use flex_seq::{seq, sequence::order::three_way};
///
/// let mut s = seq![2, 7, 4, 1];
/// s.sort_by(three_way(|a: &i32, b: &i32| a % 2 - b % 2));
/// assert_eq!(s, [2, 4, 7, 1]);
/// ```
#[inline]
pub fn three_way<T, R, F>(mut compare: F) -> impl FnMut(&T, &T) -> Ordering
where
    T: ?Sized,
    R: Ord + Default,
    F: FnMut(&T, &T) -> R,
{
    move |a: &T, b: &T| compare(a, b).cmp(&R::default())
}

/// Reverse the order produced by a comparator.
#[inline]
pub fn reverse<T, F>(mut compare: F) -> impl FnMut(&T, &T) -> Ordering
where
    T: ?Sized,
    F: FnMut(&T, &T) -> Ordering,
{
    move |a: &T, b: &T| compare(b, a)
}

/// Chain two comparators, consulting `second` only when `first` reports the
/// elements as equal.
#[inline]
pub fn then<T, F1, F2>(mut first: F1, mut second: F2) -> impl FnMut(&T, &T) -> Ordering
where
    T: ?Sized,
    F1: FnMut(&T, &T) -> Ordering,
    F2: FnMut(&T, &T) -> Ordering,
{
    move |a: &T, b: &T| first(a, b).then_with(|| second(a, b))
}
