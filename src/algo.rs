//! Sorting entry points.
//!
//! Three ways in, each with a `_with_settings` variant:
//! - [`radix_sort`]: the elements are their own keys.
//! - [`radix_sort_by_key`]: keys are borrowed from the elements.
//! - [`radix_sort_by_cached_key`]: keys are computed once per element into a side array of
//!   `(key, index)` pairs, which is sorted instead of the elements; the elements are then
//!   permuted into place. Useful when elements are large and keys small, or when the key
//!   is not stored in the element at all.

use crate::core::RadixKey;
use crate::settings::SortSettings;
use crate::sorter::{KeyFn, Sorter, insertion_sort_if_small};

/// Sorts a slice in place by the [`RadixKey`] order of its elements.
///
/// The sort is unstable: equal elements may be reordered.
///
/// # Examples
///
/// ```
/// use skasort::radix_sort;
///
/// let mut data = vec![5i8, -3, 0, 127, -128];
/// radix_sort(&mut data);
///
/// assert_eq!(data, vec![-128, -3, 0, 5, 127]);
/// ```
pub fn radix_sort<T: RadixKey>(items: &mut [T]) {
    radix_sort_with_settings(items, &SortSettings::default());
}

/// [`radix_sort`] with a custom policy.
pub fn radix_sort_with_settings<T: RadixKey>(items: &mut [T], settings: &SortSettings) {
    radix_sort_by_key_with_settings(items, settings, |item: &T| item);
}

/// Sorts a slice in place by a key borrowed from every element.
///
/// # Arguments
///
/// * `items` - The elements to sort.
/// * `key` - Returns a reference to the key of an element. Called many times per element.
///
/// # Examples
///
/// ```
/// use skasort::radix_sort_by_key;
///
/// let mut people = vec![("carol", 31u8), ("alice", 27), ("bob", 45)];
/// radix_sort_by_key(&mut people, |person| &person.1);
///
/// assert_eq!(people, vec![("alice", 27), ("carol", 31), ("bob", 45)]);
/// ```
pub fn radix_sort_by_key<T, K, F>(items: &mut [T], key: F)
where
    K: RadixKey + ?Sized,
    F: Fn(&T) -> &K,
{
    radix_sort_by_key_with_settings(items, &SortSettings::default(), key);
}

/// [`radix_sort_by_key`] with a custom policy.
pub fn radix_sort_by_key_with_settings<T, K, F>(items: &mut [T], settings: &SortSettings, key: F)
where
    K: RadixKey + ?Sized,
    F: Fn(&T) -> &K,
{
    log::trace!(
        "radix sorting {} items of {} bytes",
        items.len(),
        size_of::<T>()
    );

    let compare = |a: &T, b: &T| key(a).radix_cmp(key(b));
    if insertion_sort_if_small(items, settings, &compare) {
        return;
    }

    let root = KeyFn(&key);
    let mut sorter: Sorter<'_, T, K> = Sorter::new(items, &root, &compare, settings);
    K::decompose(&mut sorter);
    debug_assert!(sorter.is_handled(), "sorting step left a partition unhandled");
}

/// Sorts a slice in place by a key computed once per element.
///
/// The keys are collected into `(key, index)` pairs, the pairs are radix sorted and the
/// resulting permutation is applied to `items` by following its cycles with swaps. Each
/// swap settles one element, so a permutation with `c` cycles takes `len - c` swaps.
///
/// # Examples
///
/// ```
/// use skasort::radix_sort_by_cached_key;
///
/// let mut words = vec!["Banana", "apple", "Cherry"];
/// radix_sort_by_cached_key(&mut words, |word| word.to_lowercase());
///
/// assert_eq!(words, vec!["apple", "Banana", "Cherry"]);
/// ```
pub fn radix_sort_by_cached_key<T, K, F>(items: &mut [T], key: F)
where
    K: RadixKey,
    F: Fn(&T) -> K,
{
    radix_sort_by_cached_key_with_settings(items, &SortSettings::default(), key);
}

/// [`radix_sort_by_cached_key`] with a custom policy.
pub fn radix_sort_by_cached_key_with_settings<T, K, F>(
    items: &mut [T],
    settings: &SortSettings,
    key: F,
) where
    K: RadixKey,
    F: Fn(&T) -> K,
{
    let compare = |a: &T, b: &T| key(a).radix_cmp(&key(b));
    if insertion_sort_if_small(items, settings, &compare) {
        return;
    }
    log::trace!("radix sorting {} items through cached keys", items.len());

    // 1. Build the surrogate array.
    let mut proxies: Vec<(K, usize)> = items
        .iter()
        .enumerate()
        .map(|(index, item)| (key(item), index))
        .collect();

    // 2. Sort the surrogates.
    radix_sort_by_key_with_settings(&mut proxies, settings, |proxy| &proxy.0);

    // 3. Permute in-place.
    let order = proxies.into_iter().map(|(_, index)| index).collect();
    apply_permutation(items, order);
}

/// Moves `data[order[i]]` to position `i` for every `i`, following the permutation's cycles
/// with swaps. `order` must be a permutation of `0..data.len()`.
pub(crate) fn apply_permutation<T>(data: &mut [T], mut order: Vec<usize>) {
    debug_assert_eq!(data.len(), order.len());
    for i in 0..data.len() {
        let mut current = i;
        while order[current] != i {
            let next = order[current];
            data.swap(current, next);
            order[current] = current; // Mark as placed
            current = next;
        }
        order[current] = current;
    }
}

/// Radix sorting methods on slices.
///
/// # Examples
///
/// ```
/// use skasort::RadixSort;
///
/// let mut data = vec![3.5f64, -1.0, 2.25, -0.0];
/// data.radix_sort_unstable();
///
/// assert_eq!(data, vec![-1.0, -0.0, 2.25, 3.5]);
/// ```
pub trait RadixSort<T> {
    /// See [`radix_sort`].
    fn radix_sort_unstable(&mut self)
    where
        T: RadixKey;

    /// See [`radix_sort_by_key`].
    fn radix_sort_unstable_by_key<K, F>(&mut self, key: F)
    where
        K: RadixKey + ?Sized,
        F: Fn(&T) -> &K;

    /// See [`radix_sort_by_cached_key`].
    fn radix_sort_unstable_by_cached_key<K, F>(&mut self, key: F)
    where
        K: RadixKey,
        F: Fn(&T) -> K;
}

impl<T> RadixSort<T> for [T] {
    fn radix_sort_unstable(&mut self)
    where
        T: RadixKey,
    {
        radix_sort(self);
    }

    fn radix_sort_unstable_by_key<K, F>(&mut self, key: F)
    where
        K: RadixKey + ?Sized,
        F: Fn(&T) -> &K,
    {
        radix_sort_by_key(self, key);
    }

    fn radix_sort_unstable_by_cached_key<K, F>(&mut self, key: F)
    where
        K: RadixKey,
        F: Fn(&T) -> K,
    {
        radix_sort_by_cached_key(self, key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_permutation() {
        let mut data = vec!['a', 'b', 'c', 'd', 'e'];
        apply_permutation(&mut data, vec![3, 0, 4, 1, 2]);
        assert_eq!(data, vec!['d', 'a', 'e', 'b', 'c']);

        let mut data = vec![10, 20, 30];
        apply_permutation(&mut data, vec![0, 1, 2]);
        assert_eq!(data, vec![10, 20, 30]);
    }

    #[test]
    fn test_apply_permutation_long_cycles() {
        // One cycle through every slot: the first element rides along it to the end.
        let mut data: Vec<u32> = (0..100).collect();
        let order: Vec<usize> = (0..100).map(|i| (i + 1) % 100).collect();
        apply_permutation(&mut data, order.clone());
        let expected: Vec<u32> = order.iter().map(|&i| i as u32).collect();
        assert_eq!(data, expected);

        // Interleaved cycles of different lengths, with owned elements.
        let mut data: Vec<String> = (0..12).map(|i| i.to_string()).collect();
        let order = vec![5, 0, 1, 2, 3, 4, 7, 6, 8, 11, 9, 10];
        apply_permutation(&mut data, order.clone());
        let expected: Vec<String> = order.iter().map(|i| i.to_string()).collect();
        assert_eq!(data, expected);
    }
}
