use core::marker::PhantomData as Cfg;
use std::cell::Cell;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstest::rstest;

use flex_seq::{
    seq, Global, Grow, GrowBy, GrowDoubling, GrowableSequence, SequenceError, DEFAULT_CAPACITY,
};

type Seq<G> = GrowableSequence<i32, Global, G>;

fn check_sequence<G: Grow>(certificate: &[i32], seq: &Seq<G>) {
    assert_eq!(seq.count(), certificate.len());
    for (index, expected) in certificate.iter().enumerate() {
        assert_eq!(seq.get(index), Ok(expected));
    }
}

#[test]
fn sequence_new_default_capacity() {
    let seq = GrowableSequence::<i32>::new();
    assert_eq!(seq.count(), 0);
    assert_eq!(seq.capacity(), DEFAULT_CAPACITY);
    assert!(seq.is_empty());
    assert_eq!(seq.to_string(), "[]");
}

#[rstest]
#[case::zero(0)]
#[case::one(1)]
#[case::fifty(50)]
fn sequence_with_capacity(#[case] capacity: i32) {
    let seq = GrowableSequence::<i32>::with_capacity(capacity).expect("error allocating");
    assert_eq!(seq.capacity(), capacity as usize);
    assert_eq!(seq.count(), 0);
}

#[rstest]
#[case::minus_one(-1i64)]
#[case::min(i64::MIN)]
fn sequence_with_negative_capacity(#[case] capacity: i64) {
    let res = GrowableSequence::<i32>::with_capacity(capacity);
    assert_eq!(res.err(), Some(SequenceError::InvalidArgument));
}

#[test]
fn sequence_with_unrepresentable_capacity() {
    let res = GrowableSequence::<u64>::with_capacity(usize::MAX);
    assert_eq!(res.err(), Some(SequenceError::InvalidArgument));
}

#[test]
fn sequence_growth_fixed_increment() {
    let mut seq = GrowableSequence::<i32>::with_capacity(1).expect("error allocating");
    let mut res = [0usize; 21];
    for (value, cap) in res.iter_mut().enumerate() {
        seq.append(value as i32);
        *cap = seq.capacity();
    }
    let mut expected = [21usize; 21];
    expected[0] = 1;
    for cap in &mut expected[1..11] {
        *cap = 11;
    }
    assert_eq!(res, expected);
    seq.append(21);
    assert_eq!(seq.capacity(), 31);
    assert_eq!(seq.count(), 22);
}

#[test]
fn sequence_growth_default() {
    let mut seq = GrowableSequence::<i32>::new();
    seq.extend(0..10);
    assert_eq!(seq.capacity(), 10);
    seq.append(10);
    assert_eq!(seq.capacity(), 20);
    seq.extend(11..21);
    assert_eq!(seq.capacity(), 30);
}

#[test]
fn sequence_growth_bulk_whole_increments() {
    let mut appended = GrowableSequence::<i32>::with_capacity(1).expect("error allocating");
    for value in 0..50 {
        appended.append(value);
    }
    assert_eq!(appended.capacity(), 51);

    let mut extended = GrowableSequence::<i32>::with_capacity(1).expect("error allocating");
    extended.extend(0..50);
    assert_eq!(extended.capacity(), 51);
    assert_eq!(extended, appended);

    let mut refs = GrowableSequence::<i32>::with_capacity(3).expect("error allocating");
    refs.extend(appended.iter());
    assert_eq!(refs.capacity(), 53);

    let collected: GrowableSequence<i32> = (0..35).collect();
    assert_eq!(collected.capacity(), 40);

    let from_array = GrowableSequence::<i32>::from([0; 25]);
    assert_eq!(from_array.capacity(), 30);
    let from_slice = GrowableSequence::<i32>::from(&[1; 11][..]);
    assert_eq!(from_slice.capacity(), 20);
    assert_eq!(seq![7; 21].capacity(), 30);
}

#[test]
fn sequence_growth_doubling() {
    let mut seq = GrowableSequence::<i32, Global, GrowDoubling>::with_capacity(0)
        .expect("error allocating");
    let mut res = [0usize; 10];
    for cap in res.iter_mut() {
        seq.append(1);
        *cap = seq.capacity();
    }
    assert_eq!(res, [4, 4, 4, 4, 8, 8, 8, 8, 16, 16]);
}

#[test]
fn sequence_explicit_grow() {
    let mut seq = GrowableSequence::<i32>::with_capacity(2).expect("error allocating");
    seq.append(1);
    seq.append(2);
    seq.grow(5);
    assert_eq!(seq.capacity(), 7);
    assert_eq!(seq, [1, 2]);
    assert!(seq.try_grow(usize::MAX).is_err());
    assert_eq!(seq.capacity(), 7);
}

#[rstest]
#[case::fixed(Cfg::<GrowBy<DEFAULT_CAPACITY>>)]
#[case::fixed_small(Cfg::<GrowBy<1>>)]
#[case::doubling(Cfg::<GrowDoubling>)]
fn sequence_append_remove_scenario<G: Grow>(#[case] _config: Cfg<G>) {
    let mut seq = Seq::<G>::with_capacity(1).expect("error allocating");
    for value in [2, 6, 8, 5, 5, 1, 8, 5, 3, 5] {
        seq.append(value);
    }
    check_sequence(&[2, 6, 8, 5, 5, 1, 8, 5, 3, 5], &seq);
    assert_eq!(seq.count(), 10);

    assert!(seq.remove(&3));
    assert!(!seq.remove(&7));
    assert!(seq.remove(&6));
    assert!(!seq.remove(&6));
    check_sequence(&[2, 8, 5, 5, 1, 8, 5, 5], &seq);
}

#[rstest]
#[case::fixed(Cfg::<GrowBy<DEFAULT_CAPACITY>>)]
#[case::doubling(Cfg::<GrowDoubling>)]
fn sequence_insert_scenario<G: Grow>(#[case] _config: Cfg<G>) {
    let mut seq = Seq::<G>::with_capacity(8).expect("error allocating");
    seq.extend([2, 8, 5, 5, 1, 8, 5, 5]);

    seq.insert_at(6, 50).expect("error inserting");
    check_sequence(&[2, 8, 5, 5, 1, 8, 50, 5, 5], &seq);
    seq.insert_at(0, 0).expect("error inserting");
    check_sequence(&[0, 2, 8, 5, 5, 1, 8, 50, 5, 5], &seq);

    let count = seq.count();
    seq.insert_at(count - 1, 60).expect("error inserting");
    check_sequence(&[0, 2, 8, 5, 5, 1, 8, 50, 5, 60, 5], &seq);
    let count = seq.count();
    seq.insert_at(count, 70).expect("error inserting");
    check_sequence(&[0, 2, 8, 5, 5, 1, 8, 50, 5, 60, 5, 70], &seq);

    let count = seq.count();
    assert_eq!(
        seq.insert_at(count + 1, -1),
        Err(SequenceError::IndexOutOfRange)
    );
    check_sequence(&[0, 2, 8, 5, 5, 1, 8, 50, 5, 60, 5, 70], &seq);
}

#[test]
fn sequence_get_set_bounds() {
    let mut seq = seq![1, 2, 3];
    assert_eq!(seq.get(0), Ok(&1));
    assert_eq!(seq.get(2u8), Ok(&3));
    assert_eq!(seq.get(3), Err(SequenceError::IndexOutOfRange));
    assert_eq!(seq.get(-1), Err(SequenceError::IndexOutOfRange));
    assert_eq!(seq.get(isize::MIN), Err(SequenceError::IndexOutOfRange));

    seq.set(1, 20).expect("error setting");
    assert_eq!(seq, [1, 20, 3]);
    assert_eq!(seq.set(3, 4), Err(SequenceError::IndexOutOfRange));
    assert_eq!(seq.set(-1, 4), Err(SequenceError::IndexOutOfRange));
    assert_eq!(seq, [1, 20, 3]);

    *seq.get_mut(2).expect("error indexing") += 1;
    assert_eq!(seq[2], 4);
}

#[test]
fn sequence_get_empty() {
    let seq = GrowableSequence::<i32>::new();
    assert_eq!(seq.get(0), Err(SequenceError::IndexOutOfRange));
}

#[test]
fn sequence_insert_bounds() {
    let mut seq = GrowableSequence::<i32>::new();
    assert_eq!(seq.insert_at(-1, 1), Err(SequenceError::IndexOutOfRange));
    assert_eq!(seq.insert_at(1, 1), Err(SequenceError::IndexOutOfRange));
    seq.insert_at(0, 1).expect("error inserting");
    assert_eq!(seq, [1]);
}

#[test]
fn sequence_insert_full_at_capacity() {
    let mut seq = GrowableSequence::<i32>::with_capacity(3).expect("error allocating");
    seq.extend([1, 2, 3]);
    seq.insert_at(1, 9).expect("error inserting");
    assert_eq!(seq.capacity(), 13);
    assert_eq!(seq, [1, 9, 2, 3]);
}

#[test]
fn sequence_insert_rejected_does_not_grow() {
    let mut seq = GrowableSequence::<i32>::with_capacity(2).expect("error allocating");
    seq.extend([1, 2]);
    assert_eq!(seq.insert_at(5, 9), Err(SequenceError::IndexOutOfRange));
    assert_eq!(seq.capacity(), 2);
}

#[test]
fn sequence_remove_at() {
    let mut seq = seq![4, 5, 6, 7];
    assert_eq!(seq.remove_at(1), Ok(5));
    assert_eq!(seq, [4, 6, 7]);
    // last element: no shift
    assert_eq!(seq.remove_at(2), Ok(7));
    assert_eq!(seq, [4, 6]);
    assert_eq!(seq.remove_at(2), Err(SequenceError::IndexOutOfRange));
    assert_eq!(seq.remove_at(-1), Err(SequenceError::IndexOutOfRange));
    assert_eq!(seq, [4, 6]);
    assert_eq!(seq.remove_at(0), Ok(4));
    assert_eq!(seq.remove_at(0), Ok(6));
    assert!(seq.is_empty());
    assert_eq!(seq.remove_at(0), Err(SequenceError::IndexOutOfRange));
}

#[test]
fn sequence_index_of_contains() {
    let seq = seq![2, 6, 8, 5, 5, 1];
    assert_eq!(seq.index_of(&5), Some(3));
    assert_eq!(seq.index_of(&2), Some(0));
    assert_eq!(seq.index_of(&7), None);
    assert!(seq.contains(&1));
    assert!(!seq.contains(&9));
}

#[test]
fn sequence_search_by_value_equality() {
    let seq = seq![String::from("a"), String::from("b")];
    assert_eq!(seq.index_of(&String::from("b")), Some(1));
    assert!(seq.contains(&"a".to_string()));
}

#[test]
fn sequence_clear() {
    let mut seq = GrowableSequence::<i32>::with_capacity(4).expect("error allocating");
    seq.extend(0..15);
    let capacity = seq.capacity();
    seq.clear();
    assert_eq!(seq.count(), 0);
    assert_eq!(seq.capacity(), capacity);
    assert_eq!(seq.to_string(), "[]");
    seq.append(3);
    assert_eq!(seq.to_string(), "[3]");
}

#[test]
fn sequence_display() {
    assert_eq!(GrowableSequence::<u8>::new().to_string(), "[]");
    assert_eq!(seq![7].to_string(), "[7]");
    assert_eq!(seq![1, -2, 3].to_string(), "[1,-2,3]");
    assert_eq!(seq!["ab", "c"].to_string(), "[ab,c]");
    assert_eq!(format!("{:?}", seq![1, 2]), "[1, 2]");
    assert_eq!(format!("{:>3}", seq![1, 2]), "[1,2]");
    assert_eq!(format!("{:03}", seq![4, 5]), "[4,5]");
}

#[test]
fn sequence_pop() {
    let mut seq = seq![1, 2];
    assert_eq!(seq.pop(), Some(2));
    assert_eq!(seq.pop(), Some(1));
    assert_eq!(seq.pop(), None);
}

#[test]
fn sequence_truncate() {
    let mut seq = seq![1, 2, 3, 4];
    seq.truncate(6);
    assert_eq!(seq, [1, 2, 3, 4]);
    seq.truncate(2);
    assert_eq!(seq, [1, 2]);
}

#[test]
fn sequence_clone() {
    let mut seq = GrowableSequence::<String>::with_capacity(3).expect("error allocating");
    seq.append("x".into());
    seq.append("y".into());
    let copy = seq.clone();
    assert_eq!(copy, seq);
    assert_eq!(copy.capacity(), 3);
    seq.clone_from(&seq![String::from("z")]);
    assert_eq!(seq, [String::from("z")]);
}

#[test]
fn sequence_collect_and_iterate() {
    let seq: GrowableSequence<u32> = (0..5).collect();
    assert_eq!(seq, [0, 1, 2, 3, 4]);
    assert_eq!(seq.iter().sum::<u32>(), 10);
    assert_eq!((&seq).into_iter().count(), 5);

    let mut seq = seq;
    for item in &mut seq {
        *item *= 2;
    }
    assert_eq!(seq, vec![0, 2, 4, 6, 8]);

    let mut iter = seq.into_iter();
    assert_eq!(iter.len(), 5);
    assert_eq!(iter.next(), Some(0));
    assert_eq!(iter.next_back(), Some(8));
    assert_eq!(iter.as_slice(), &[2, 4, 6]);
    assert_eq!(iter.next(), Some(2));
    assert_eq!(iter.next(), Some(4));
    assert_eq!(iter.next(), Some(6));
    assert_eq!(iter.next(), None);
}

#[test]
fn sequence_from_conversions() {
    let a = GrowableSequence::<i32>::from([1, 2, 3]);
    let b = GrowableSequence::<i32>::from(&[1, 2, 3][..]);
    assert_eq!(a, b);
    assert_eq!(a, &[1, 2, 3]);
    assert_eq!(a.as_ref(), &[1, 2, 3]);
    let c = seq![0; 3];
    assert_eq!(c, [0, 0, 0]);
    let d: GrowableSequence<i32> = seq![];
    assert!(d.is_empty());
}

#[test]
fn sequence_zst() {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    struct Zst;

    let mut seq = GrowableSequence::<Zst>::with_capacity(1).expect("error allocating");
    seq.append(Zst);
    seq.append(Zst);
    assert_eq!(seq.capacity(), 11);
    assert_eq!(seq.insert_at(1, Zst), Ok(()));
    assert_eq!(seq.count(), 3);
    assert_eq!(seq.remove_at(0), Ok(Zst));
    assert!(seq.remove(&Zst));
    assert_eq!(seq.pop(), Some(Zst));
    assert_eq!(seq.pop(), None);
}

#[derive(Debug)]
struct Tracked(Rc<Cell<usize>>, u32);

impl Drop for Tracked {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.1 == other.1
    }
}

#[test]
fn sequence_drops_each_element_once() {
    let drops = Rc::new(Cell::new(0));
    let track = |v| Tracked(drops.clone(), v);

    let mut seq = GrowableSequence::<Tracked>::with_capacity(1).expect("error allocating");
    for v in 0..25 {
        seq.append(track(v));
    }
    assert_eq!(drops.get(), 0);

    seq.set(0, track(100)).expect("error setting");
    assert_eq!(drops.get(), 1);

    drop(seq.remove_at(3).expect("error removing"));
    assert_eq!(drops.get(), 2);

    let probe = track(7);
    assert!(seq.remove(&probe));
    drop(probe);
    assert_eq!(drops.get(), 4);

    seq.insert_at(2, track(200)).expect("error inserting");
    assert_eq!(seq.insert_at(99, track(300)), Err(SequenceError::IndexOutOfRange));
    assert_eq!(drops.get(), 5);

    seq.truncate(20);
    assert_eq!(drops.get(), 9);

    let mut iter = seq.into_iter();
    drop(iter.next());
    drop(iter.next_back());
    assert_eq!(drops.get(), 11);
    drop(iter);
    assert_eq!(drops.get(), 29);

    let mut seq = GrowableSequence::<Tracked>::new();
    seq.extend((0..12).map(track));
    seq.clear();
    assert_eq!(drops.get(), 41);
    seq.append(track(1));
    drop(seq);
    assert_eq!(drops.get(), 42);
}

#[test]
fn sequence_properties_hold() {
    let mut seq = GrowableSequence::<i32>::with_capacity(2).expect("error allocating");
    seq.extend([4, 9, 4, 1]);

    // append matches insert at count
    let mut other = seq.clone();
    seq.append(12);
    let count = other.count();
    other.insert_at(count, 12).expect("error inserting");
    assert_eq!(seq, other);

    // removing at the found index removes exactly one occurrence
    let before = seq.count();
    let index = seq.index_of(&4).expect("missing element");
    seq.remove_at(index).expect("error removing");
    assert_eq!(seq.count(), before - 1);
    assert_eq!(seq, [9, 4, 1, 12]);

    // removing a missing element leaves the sequence unchanged
    let snapshot = seq.clone();
    assert!(!seq.remove(&77));
    assert_eq!(seq, snapshot);
}

#[test]
fn sequence_random_ops_match_vec() {
    let mut rng = StdRng::seed_from_u64(100);
    let mut seq = GrowableSequence::<i32>::with_capacity(1).expect("error allocating");
    let mut model = Vec::<i32>::new();
    let mut added = 0usize;
    let mut removed = 0usize;

    for _ in 0..2000 {
        let count = model.len() as i64;
        match rng.gen_range(0..7) {
            0 | 1 => {
                let value = rng.gen_range(-50..50);
                seq.append(value);
                model.push(value);
                added += 1;
            }
            2 | 3 => {
                let index = rng.gen_range(-2..count + 3);
                let value = rng.gen_range(-50..50);
                let res = seq.insert_at(index, value);
                if (0..=count).contains(&index) {
                    assert_eq!(res, Ok(()));
                    model.insert(index as usize, value);
                    assert_eq!(seq.get(index), Ok(&value));
                    added += 1;
                } else {
                    assert_eq!(res, Err(SequenceError::IndexOutOfRange));
                }
            }
            4 => {
                let index = rng.gen_range(-2..count + 2);
                let res = seq.remove_at(index);
                if (0..count).contains(&index) {
                    assert_eq!(res, Ok(model.remove(index as usize)));
                    removed += 1;
                } else {
                    assert_eq!(res, Err(SequenceError::IndexOutOfRange));
                }
            }
            5 => {
                let value = rng.gen_range(-50..50);
                let found = model.iter().position(|v| *v == value);
                assert_eq!(seq.index_of(&value), found);
                assert_eq!(seq.remove(&value), found.is_some());
                if let Some(index) = found {
                    model.remove(index);
                    removed += 1;
                }
            }
            _ => {
                let index = rng.gen_range(-2..count + 2);
                let value = rng.gen_range(-50..50);
                let res = seq.set(index, value);
                if (0..count).contains(&index) {
                    assert_eq!(res, Ok(()));
                    model[index as usize] = value;
                } else {
                    assert_eq!(res, Err(SequenceError::IndexOutOfRange));
                }
            }
        }
        assert!(seq.capacity() >= seq.count());
        assert_eq!(seq, model);
    }
    assert_eq!(seq.count(), added - removed);
}
