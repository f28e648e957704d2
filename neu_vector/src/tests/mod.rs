use super::*;
use crossbeam::scope;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

fn array_of(values: &[i32]) -> NeuVector {
    let mut v = NeuVector::with_capacity(2).unwrap();
    v.try_extend(values.iter().copied()).unwrap();
    v
}

#[test]
fn test_basic_append_pop() {
    let mut v = NeuVector::with_capacity(4).unwrap();
    v.append(1).unwrap();
    v.append(2).unwrap();
    v.append(3).unwrap();
    assert_eq!(v.len(), 3);
    assert_eq!(v.get(0), Ok(1));
    assert_eq!(v.get(1), Ok(2));
    assert_eq!(v.get(2), Ok(3));
    assert_eq!(v.pop(), Ok(3));
    assert_eq!(v.pop(), Ok(2));
    assert_eq!(v.pop(), Ok(1));
    assert_eq!(v.pop(), Err(ArrayError::Empty));
}

#[test]
fn test_zero_capacity_rejected() {
    assert_eq!(
        NeuVector::with_capacity(0).err(),
        Some(ArrayError::ZeroCapacity)
    );
}

#[test]
fn test_new_array_is_empty() {
    let v = NeuVector::with_capacity(5).unwrap();
    assert!(v.is_empty());
    assert_eq!(v.size(), 0);
    assert_eq!(v.capacity(), 5);
}

#[test]
fn test_append_length_invariant() {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    for start_cap in [1, 2, 3, 7, 16] {
        let mut v = NeuVector::with_capacity(start_cap).unwrap();
        let values: Vec<i32> = (0..200).map(|_| rng.random_range(-1000..1000)).collect();
        for &value in &values {
            v.append(value).unwrap();
        }
        assert_eq!(v.size(), values.len());
        for (i, &value) in values.iter().enumerate() {
            assert_eq!(v.get(i), Ok(value));
        }
        assert!(v.len() <= v.capacity());
    }
}

#[test]
fn test_capacity_doubling_sequence() {
    let mut v = NeuVector::with_capacity(1).unwrap();
    let mut seen = vec![v.capacity()];
    for k in 1..=17 {
        v.append(k).unwrap();
        let expected = (k as usize).next_power_of_two();
        assert_eq!(v.capacity(), expected, "after {k} appends");
        if seen.last() != Some(&v.capacity()) {
            seen.push(v.capacity());
        }
    }
    assert_eq!(seen, vec![1, 2, 4, 8, 16, 32]);
}

#[test]
fn test_capacity_never_shrinks() {
    let mut v = array_of(&[1, 2, 3, 4, 5]);
    let cap = v.capacity();
    while v.pop().is_ok() {}
    assert_eq!(v.capacity(), cap);
    v.clear();
    assert_eq!(v.capacity(), cap);
}

#[test]
fn test_insert_remove() {
    let mut v = array_of(&[1, 3]);
    v.insert(1, 2).unwrap();
    assert_eq!(v.as_ref(), &[1, 2, 3]);
    assert_eq!(v.remove(1), Ok(2));
    assert_eq!(v.as_ref(), &[1, 3]);
}

#[test]
fn test_insert_at_front_and_end() {
    let mut v = array_of(&[2, 3]);
    v.insert(0, 1).unwrap();
    v.insert(v.len(), 4).unwrap();
    assert_eq!(v.as_slice(), &[1, 2, 3, 4]);
}

#[test]
fn test_insert_remove_inverse() {
    let base = array_of(&[4, 8, 15, 16, 23, 42]);
    for i in 0..=base.len() {
        let mut v = base.try_clone().unwrap();
        v.insert(i, -7).unwrap();
        assert_eq!(v.get(i), Ok(-7));
        assert_eq!(v.remove(i), Ok(-7));
        assert_eq!(v, base);
        assert_eq!(v.len(), base.len());
    }
}

#[test]
fn test_pop_append_inverse() {
    let mut v = array_of(&[9, 8, 7]);
    let before = v.try_clone().unwrap();
    v.append(6).unwrap();
    assert_eq!(v.pop(), Ok(6));
    assert_eq!(v, before);
}

#[test]
fn test_set_overwrites_without_growth() {
    let mut v = array_of(&[1, 2]);
    let cap = v.capacity();
    v.set(1, 20).unwrap();
    assert_eq!(v.as_slice(), &[1, 20]);
    assert_eq!(v.capacity(), cap);
}

#[test]
fn test_out_of_range_does_not_mutate() {
    let mut v = array_of(&[1, 2, 3]);
    let len = v.len();
    let cap = v.capacity();
    let expected = ArrayError::OutOfBounds { index: len, len };

    assert_eq!(v.get(len), Err(expected));
    assert_eq!(v.set(len, 9), Err(expected));
    assert_eq!(v.remove(len), Err(expected));
    assert_eq!(
        v.insert(len + 1, 9),
        Err(ArrayError::OutOfBounds { index: len + 1, len })
    );

    assert_eq!(v.as_slice(), &[1, 2, 3]);
    assert_eq!(v.capacity(), cap);
    assert!(expected.is_index_error());
}

#[test]
fn test_index_checks_use_length_not_capacity() {
    let mut v = NeuVector::with_capacity(8).unwrap();
    v.append(1).unwrap();
    assert!(v.get(4).is_err());
    assert!(v.set(4, 0).is_err());
}

#[test]
fn test_pop_empty_is_index_error() {
    let mut v = NeuVector::with_capacity(1).unwrap();
    let err = v.pop().unwrap_err();
    assert_eq!(err, ArrayError::Empty);
    assert!(err.is_index_error());
    assert!(!err.is_alloc_error());
}

#[test]
fn test_find_matches_reference_scan() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..50 {
        let len = rng.random_range(0..40);
        let values: Vec<i32> = (0..len).map(|_| rng.random_range(0..10)).collect();
        let mut v = NeuVector::with_capacity(1).unwrap();
        v.try_extend(values.iter().copied()).unwrap();

        for needle in 0..12 {
            let reference = values
                .iter()
                .enumerate()
                .find(|&(_, &x)| x == needle)
                .map_or(-1, |(i, _)| i as isize);
            assert_eq!(v.find(&needle), reference);
        }
    }
}

#[test]
fn test_find_ignores_stale_slots() {
    let mut v = array_of(&[5, 6, 7]);
    v.pop().unwrap();
    assert_eq!(v.find(&7), NOT_FOUND);
    assert_eq!(v.position(&6), Some(1));
}

#[test]
fn test_debug_string_shapes() {
    let empty = NeuVector::with_capacity(3).unwrap();
    assert_eq!(empty.to_debug_string(), "[]");
    assert_eq!(array_of(&[5]).to_debug_string(), "[5]");
    assert_eq!(array_of(&[1, 2, 3]).to_debug_string(), "[1, 2, 3]");
    assert_eq!(array_of(&[-1, 0]).to_debug_string(), "[-1, 0]");
}

#[test]
fn test_debug_string_large() {
    let mut v = NeuVector::with_capacity(1).unwrap();
    v.try_extend(0..10_000).unwrap();
    let s = v.to_debug_string();
    assert!(s.starts_with("[0, 1, 2"));
    assert!(s.ends_with("9998, 9999]"));
    assert_eq!(s.matches(", ").count(), 9_999);
}

#[test]
fn test_print_string() {
    assert_eq!(array_of(&[1, 2]).print_string(), "Vector: [1, 2]");
    assert_eq!(
        NeuVector::with_capacity(1).unwrap().print_string(),
        "Vector: []"
    );
}

#[test]
fn test_concrete_scenario() {
    let mut v = NeuVector::with_capacity(2).unwrap();
    v.append(10).unwrap();
    v.append(20).unwrap();
    assert_eq!(v.capacity(), 2);
    v.append(30).unwrap();
    assert_eq!(v.capacity(), 4);

    v.insert(1, 99).unwrap();
    assert_eq!(v.as_slice(), &[10, 99, 20, 30]);
    assert_eq!(v.len(), 4);
    assert_eq!(v.capacity(), 4);

    assert_eq!(v.remove(0), Ok(10));
    assert_eq!(v.as_slice(), &[99, 20, 30]);
    assert_eq!(v.to_debug_string(), "[99, 20, 30]");

    // 下一次插入时才会倍增到 8
    v.append(40).unwrap();
    v.append(50).unwrap();
    assert_eq!(v.capacity(), 8);
    v.release();
}

#[test]
fn test_try_reserve() {
    let mut v = NeuVector::with_capacity(3).unwrap();
    assert!(v.try_reserve(10).is_ok());
    assert_eq!(v.capacity(), 12);
    assert!(v.try_reserve(2).is_ok());
    assert_eq!(v.capacity(), 12);
}

#[test]
fn test_failed_reserve_keeps_state() {
    let mut v = array_of(&[1, 2, 3]);
    let cap = v.capacity();

    let overflow = v.try_reserve(usize::MAX).unwrap_err();
    assert_eq!(overflow, ArrayError::CapacityOverflow);

    let too_large = v.try_reserve(isize::MAX as usize).unwrap_err();
    assert!(too_large.is_alloc_error());

    assert_eq!(v.as_slice(), &[1, 2, 3]);
    assert_eq!(v.capacity(), cap);
    v.append(4).unwrap();
    assert_eq!(v.as_slice(), &[1, 2, 3, 4]);
}

#[test]
fn test_from_slice_and_clone() {
    let v = NeuVector::from_slice(&[3, 1, 2]).unwrap();
    assert_eq!(v.capacity(), 3);
    let copy = v.try_clone().unwrap();
    assert_eq!(copy, v);
    assert_eq!(copy.capacity(), v.capacity());

    let empty = NeuVector::from_slice(&[]).unwrap();
    assert_eq!(empty.capacity(), 1);
    assert!(empty.is_empty());
}

#[test]
fn test_generic_element_type() {
    let mut v: DynamicArray<i64> = DynamicArray::with_capacity(1).unwrap();
    v.append(i64::MAX).unwrap();
    v.append(i64::MIN).unwrap();
    assert_eq!(v.to_debug_string(), format!("[{}, {}]", i64::MAX, i64::MIN));
}

#[test]
fn test_iterators() {
    let mut v = array_of(&[10, 20, 30]);

    let mut sum = 0;
    for &x in &v {
        sum += x;
    }
    assert_eq!(sum, 60);

    for x in &mut v {
        *x += 1;
    }
    assert_eq!(v.get(0), Ok(11));

    let into = v.into_iter();
    assert_eq!(into.len(), 3);
    let collected: Vec<i32> = into.collect();
    assert_eq!(collected, vec![11, 21, 31]);
}

#[test]
fn test_debug_format() {
    assert_eq!(format!("{:?}", array_of(&[1, 2])), "[1, 2]");
}

#[test]
fn test_shared_reads_across_threads() {
    let mut v = NeuVector::with_capacity(1).unwrap();
    v.try_extend(0..100).unwrap();

    scope(|s| {
        s.spawn(|_| {
            let total: i32 = v.iter().sum();
            assert_eq!(total, 4950);
        });
        s.spawn(|_| {
            assert_eq!(v.find(&99), 99);
        });
    })
    .unwrap();
}

#[test]
fn test_mutex_guarded_mutation() {
    let shared = Mutex::new(NeuVector::with_capacity(1).unwrap());

    scope(|s| {
        for t in 0..4 {
            let shared = &shared;
            s.spawn(move |_| {
                for i in 0..25 {
                    shared.lock().unwrap().append(t * 100 + i).unwrap();
                }
            });
        }
    })
    .unwrap();

    let v = shared.into_inner().unwrap();
    assert_eq!(v.len(), 100);
    assert_eq!(v.capacity(), 128);
}
