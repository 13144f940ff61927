/// Create a [`GrowableSequence`](crate::GrowableSequence) containing the
/// arguments, in the manner of `vec!`.
///
/// ```
/// use flex_seq::seq;
///
/// let s = seq![1, 2, 3];
/// assert_eq!(s.to_string(), "[1,2,3]");
/// let s = seq!["x"; 2];
/// assert_eq!(s.to_string(), "[x,x]");
/// ```
#[macro_export]
macro_rules! seq {
    () => (
        $crate::sequence::from_array([])
    );
    ($elem:expr; $n:expr) => (
        $crate::sequence::from_elem($elem, $n)
    );
    ($($x:expr),+ $(,)?) => (
        $crate::sequence::from_array([$($x),+])
    );
}
