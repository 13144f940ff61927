//! Types used to specify positions and capacities of sequences, and the
//! policies used to grow them.

use core::fmt::Debug;

use crate::storage::utils::min_non_zero_cap;

/// The capacity of a sequence created without an explicit capacity, and
/// the number of slots added by the default growth policy.
pub const DEFAULT_CAPACITY: usize = 10;

/// Integer types which may be used as a position or capacity.
///
/// Signed types are accepted so that negative values can be rejected with
/// an error rather than being unrepresentable at the call site.
pub trait Position: Copy + Debug {
    /// Convert this value to a buffer offset, returning `None` if it is
    /// negative or exceeds the range of `usize`.
    fn to_offset(self) -> Option<usize>;
}

macro_rules! impl_position_unsigned {
    ($($t:ty),+) => {
        $(
            impl Position for $t {
                #[inline]
                fn to_offset(self) -> Option<usize> {
                    usize::try_from(self).ok()
                }
            }
        )+
    };
}

macro_rules! impl_position_signed {
    ($($t:ty),+) => {
        $(
            impl Position for $t {
                #[inline]
                fn to_offset(self) -> Option<usize> {
                    if self < 0 {
                        None
                    } else {
                        usize::try_from(self).ok()
                    }
                }
            }
        )+
    };
}

impl_position_unsigned!(u8, u16, u32, u64, usize);
impl_position_signed!(i8, i16, i32, i64, isize);

/// Growth behavior for sequences which have exceeded their available storage.
pub trait Grow: Debug {
    /// Calculate the next capacity to request from the allocator, given the
    /// current capacity and the minimum capacity required.
    fn next_capacity<T>(prev: usize, minimum: usize) -> usize;
}

/// Growth behavior which extends the capacity by a fixed number of slots.
///
/// This is the default policy, with an increment of [`DEFAULT_CAPACITY`].
/// A bulk reservation grows by as many whole increments as it needs, so
/// every capacity reached is the previous one plus a multiple of `N`.
/// The total cost of `n` appends is quadratic in `n` rather than linear.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct GrowBy<const N: usize>;

impl<const N: usize> Grow for GrowBy<N> {
    #[inline]
    fn next_capacity<T>(prev: usize, minimum: usize) -> usize {
        if N == 0 || minimum <= prev {
            return prev.saturating_add(N).max(minimum);
        }
        let steps = (minimum - prev).div_ceil(N);
        prev.saturating_add(steps.saturating_mul(N)).max(minimum)
    }
}

/// Growth behavior which consistently doubles in size
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct GrowDoubling;

impl Grow for GrowDoubling {
    #[inline]
    fn next_capacity<T>(prev: usize, minimum: usize) -> usize {
        let preferred = if prev == 0 {
            min_non_zero_cap::<T>()
        } else {
            prev.saturating_mul(2)
        };
        preferred.max(minimum)
    }
}
