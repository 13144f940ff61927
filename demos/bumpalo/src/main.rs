use bumpalo::Bump;
use flex_seq::{storage::AllocatorApi, GrowableSequence};

fn main() {
    let bump = Bump::new();
    let mut seq: GrowableSequence<u32, _> = GrowableSequence::new_in(AllocatorApi(&bump));
    seq.append(83u32);
    assert_eq!(seq, &[83]);
    assert_eq!(seq.capacity(), 10);

    let mut seq: GrowableSequence<u32, _> =
        GrowableSequence::with_capacity_in(4, AllocatorApi(&bump)).expect("error allocating");
    seq.extend(0..10000);
    assert_eq!(seq.count(), 10000);
    seq.sort_by(|a, b| b.cmp(a));
    assert_eq!(seq.get(0), Ok(&9999));
}
