use cartesiantree::{CartesianTree, Error};
use proptest::prelude::*;

fn next_permutation(a: &mut [i64]) {
    let n = a.len();
    let mut i = n;
    while i > 1 && a[i - 2] >= a[i - 1] {
        i -= 1;
    }
    if i <= 1 {
        a.reverse();
        return;
    }
    let mut j = n - 1;
    while a[j] <= a[i - 2] {
        j -= 1;
    }
    a.swap(i - 2, j);
    a[i - 1..].reverse();
}

fn prev_permutation(a: &mut [i64]) {
    let n = a.len();
    let mut i = n;
    while i > 1 && a[i - 2] <= a[i - 1] {
        i -= 1;
    }
    if i <= 1 {
        a.reverse();
        return;
    }
    let mut j = n - 1;
    while a[j] >= a[i - 2] {
        j -= 1;
    }
    a.swap(i - 2, j);
    a[i - 1..].reverse();
}

#[derive(Clone, Debug)]
enum Op {
    Insert(usize, i64),
    Remove(usize),
    Sum(usize, usize),
    Add(usize, usize, i64),
    Assign(usize, usize, i64),
    Reverse(usize, usize),
    Next(usize, usize),
    Prev(usize, usize),
}

fn op() -> impl Strategy<Value = Op> {
    let pos = any::<usize>();
    prop_oneof![
        3 => (pos.clone(), 0i64..6).prop_map(|(i, v)| Op::Insert(i, v)),
        1 => pos.clone().prop_map(Op::Remove),
        1 => (pos.clone(), pos.clone()).prop_map(|(l, r)| Op::Sum(l, r)),
        1 => (pos.clone(), pos.clone(), -3i64..4).prop_map(|(l, r, d)| Op::Add(l, r, d)),
        1 => (pos.clone(), pos.clone(), 0i64..6).prop_map(|(l, r, v)| Op::Assign(l, r, v)),
        1 => (pos.clone(), pos.clone()).prop_map(|(l, r)| Op::Reverse(l, r)),
        2 => (pos.clone(), pos.clone()).prop_map(|(l, r)| Op::Next(l, r)),
        2 => (pos.clone(), pos).prop_map(|(l, r)| Op::Prev(l, r)),
    ]
}

/// 長さ`len`の列の中の閉区間に直す
fn range(l: usize, r: usize, len: usize) -> (usize, usize) {
    let (l, r) = (l % len, r % len);
    (l.min(r), l.max(r))
}

proptest! {
    #[test]
    fn matches_vec(seed in any::<u64>(), init in prop::collection::vec(0i64..6, 0..20), ops in prop::collection::vec(op(), 0..120)) {
        let mut ct = CartesianTree::with_seed(seed);
        ct.extend(init.iter().copied());
        let mut model = init;
        for op in ops {
            let len = model.len();
            match op {
                Op::Insert(i, v) => {
                    let i = i % (len + 1);
                    ct.insert(i, v).unwrap();
                    model.insert(i, v);
                }
                Op::Remove(i) => {
                    if len == 0 {
                        prop_assert!(ct.remove(i).is_err());
                        continue;
                    }
                    let i = i % len;
                    prop_assert_eq!(ct.remove(i), Ok(model.remove(i)));
                }
                _ if len == 0 => continue,
                Op::Sum(l, r) => {
                    let (l, r) = range(l, r, len);
                    prop_assert_eq!(ct.sum(l..=r), Ok(model[l..=r].iter().sum::<i64>()));
                }
                Op::Add(l, r, d) => {
                    let (l, r) = range(l, r, len);
                    ct.add(l..=r, d).unwrap();
                    model[l..=r].iter_mut().for_each(|v| *v += d);
                }
                Op::Assign(l, r, v) => {
                    let (l, r) = range(l, r, len);
                    ct.assign(l..=r, v).unwrap();
                    model[l..=r].fill(v);
                }
                Op::Reverse(l, r) => {
                    let (l, r) = range(l, r, len);
                    ct.reverse(l..=r).unwrap();
                    model[l..=r].reverse();
                }
                Op::Next(l, r) => {
                    let (l, r) = range(l, r, len);
                    ct.next_permutation(l..=r).unwrap();
                    next_permutation(&mut model[l..=r]);
                }
                Op::Prev(l, r) => {
                    let (l, r) = range(l, r, len);
                    ct.prev_permutation(l..=r).unwrap();
                    prev_permutation(&mut model[l..=r]);
                }
            }
            prop_assert_eq!(ct.len(), model.len());
            prop_assert_eq!(ct.iter().collect::<Vec<_>>(), model.clone());
        }
        for (i, &v) in model.iter().enumerate() {
            prop_assert_eq!(ct.get(i), Some(v));
        }
    }

    #[test]
    fn split_then_merge(values in prop::collection::vec(-100i64..100, 0..60), k in 0usize..80) {
        let ct = CartesianTree::from_vec(values.clone());
        let (l, r) = ct.split(k);
        let k = k.min(values.len());
        prop_assert_eq!(l.iter().collect::<Vec<_>>(), values[..k].to_vec());
        prop_assert_eq!(r.iter().collect::<Vec<_>>(), values[k..].to_vec());
        prop_assert_eq!(l.merge(r).iter().collect::<Vec<_>>(), values);
    }

    #[test]
    fn add_twice_equals_add_sum(values in prop::collection::vec(-100i64..100, 1..40), l in any::<usize>(), r in any::<usize>(), d1 in -50i64..50, d2 in -50i64..50) {
        let (l, r) = range(l, r, values.len());
        let mut once = CartesianTree::from_vec(values.clone());
        let mut twice = CartesianTree::from_vec(values);
        once.add(l..=r, d1 + d2).unwrap();
        twice.add(l..=r, d1).unwrap();
        twice.add(l..=r, d2).unwrap();
        prop_assert_eq!(once.iter().collect::<Vec<_>>(), twice.iter().collect::<Vec<_>>());
    }

    #[test]
    fn assign_then_sum(values in prop::collection::vec(-100i64..100, 1..40), l in any::<usize>(), r in any::<usize>(), v in -50i64..50) {
        let (l, r) = range(l, r, values.len());
        let mut ct = CartesianTree::from_vec(values);
        ct.assign(l..=r, v).unwrap();
        prop_assert_eq!(ct.sum(l..=r), Ok(v * (r - l + 1) as i64));
    }

    #[test]
    fn reverse_twice(values in prop::collection::vec(-100i64..100, 1..40), l in any::<usize>(), r in any::<usize>()) {
        let (l, r) = range(l, r, values.len());
        let mut ct = CartesianTree::from_vec(values.clone());
        ct.reverse(l..=r).unwrap();
        ct.reverse(l..=r).unwrap();
        prop_assert_eq!(ct.iter().collect::<Vec<_>>(), values);
    }

    #[test]
    fn bad_ranges_are_rejected(values in prop::collection::vec(-100i64..100, 0..20), extra in 0usize..10) {
        let len = values.len();
        let mut ct = CartesianTree::from_vec(values.clone());
        prop_assert_eq!(ct.sum(0..len + 1 + extra), Err(Error::IndexOutOfRange { index: len + extra, len }));
        prop_assert_eq!(ct.insert(len + 1 + extra, 0), Err(Error::IndexOutOfRange { index: len + 1 + extra, len }));
        prop_assert_eq!(ct.remove(len + extra), Err(Error::IndexOutOfRange { index: len + extra, len }));
        if len > 0 {
            let start = len - 1;
            prop_assert_eq!(ct.next_permutation(start..start), Err(Error::InvalidRange { start, end: start }));
        }
        prop_assert_eq!(ct.iter().collect::<Vec<_>>(), values);
    }
}
