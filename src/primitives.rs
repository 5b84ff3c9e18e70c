//! Small building blocks shared by the partitioning passes and the recursion controller.

use std::cmp::Ordering;

/// Calls `f` once for every index in `start..start + count`, in ascending order,
/// with the body unrolled `factor` times.
///
/// The remainder (`count % factor`) is visited first, then full unrolled blocks.
/// `factor` must be in `1..=8`; the settings builder rejects anything else.
#[inline(always)]
pub(crate) fn unroll_for_each<F: FnMut(usize)>(factor: usize, start: usize, count: usize, f: F) {
    match factor {
        1 => unrolled::<1, F>(start, count, f),
        2 => unrolled::<2, F>(start, count, f),
        3 => unrolled::<3, F>(start, count, f),
        4 => unrolled::<4, F>(start, count, f),
        5 => unrolled::<5, F>(start, count, f),
        6 => unrolled::<6, F>(start, count, f),
        7 => unrolled::<7, F>(start, count, f),
        _ => unrolled::<8, F>(start, count, f),
    }
}

#[inline(always)]
fn unrolled<const N: usize, F: FnMut(usize)>(start: usize, count: usize, mut f: F) {
    let end = start + count;
    let mut index = start;
    for _ in 0..count % N {
        f(index);
        index += 1;
    }
    while index < end {
        for offset in 0..N {
            f(index + offset);
        }
        index += N;
    }
}

/// Plain insertion sort, used for partitions below the settings' ceiling.
pub(crate) fn insertion_sort<T>(items: &mut [T], compare: &dyn Fn(&T, &T) -> Ordering) {
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && compare(&items[j], &items[j - 1]) == Ordering::Less {
            items.swap(j, j - 1);
            j -= 1;
        }
    }
}

/// Moves every element satisfying `pred` in front of every element that does not,
/// returning the size of the leading block.
///
/// `items` must not be empty. `pred` is called exactly once per element, which the
/// ska settling pass relies on because its predicate does work as a side effect.
pub(crate) fn partition_non_empty<T, F>(items: &mut [T], mut pred: F) -> usize
where
    F: FnMut(&T) -> bool,
{
    let mut first = 0;
    while pred(&items[first]) {
        first += 1;
        if first == items.len() {
            return first;
        }
    }
    for i in first + 1..items.len() {
        if pred(&items[i]) {
            items.swap(first, i);
            first += 1;
        }
    }
    first
}

/// [`partition_non_empty`] that also accepts an empty slice.
pub(crate) fn partition<T, F>(items: &mut [T], pred: F) -> usize
where
    F: FnMut(&T) -> bool,
{
    if items.is_empty() {
        return 0;
    }
    partition_non_empty(items, pred)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unroll_visits_each_index_once() {
        for factor in 1..=8 {
            for count in 0..20 {
                let mut seen = Vec::new();
                unroll_for_each(factor, 5, count, |i| seen.push(i));
                let expected: Vec<usize> = (5..5 + count).collect();
                assert_eq!(seen, expected, "factor {factor}, count {count}");
            }
        }
    }

    #[test]
    fn test_insertion_sort() {
        let mut data = vec![5, 1, 4, 1, 5, 9, 2, 6, 5, 3];
        insertion_sort(&mut data, &|a: &i32, b: &i32| a.cmp(b));
        assert_eq!(data, vec![1, 1, 2, 3, 4, 5, 5, 5, 6, 9]);
    }

    #[test]
    fn test_partition_calls_predicate_once_per_element() {
        let mut data: Vec<u32> = (0..50).rev().collect();
        let mut calls = 0;
        let split = partition_non_empty(&mut data, |v| {
            calls += 1;
            v % 3 == 0
        });
        assert_eq!(calls, 50);
        assert_eq!(split, 17);
        assert!(data[..split].iter().all(|v| v % 3 == 0));
        assert!(data[split..].iter().all(|v| v % 3 != 0));
    }

    #[test]
    fn test_partition_edges() {
        let mut empty: Vec<u8> = Vec::new();
        assert_eq!(partition(&mut empty, |_| true), 0);

        let mut all = vec![2, 4, 6];
        assert_eq!(partition(&mut all, |v| v % 2 == 0), 3);

        let mut none = vec![1, 3, 5];
        assert_eq!(partition(&mut none, |v| v % 2 == 0), 0);
    }
}
