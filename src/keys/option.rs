use std::cmp::Ordering;

use crate::core::RadixKey;
use crate::sorter::Sorter;

// `None` sorts before every `Some`, whatever the payload.
impl<K: RadixKey> RadixKey for Option<K> {
    fn decompose<T>(sorter: &mut Sorter<'_, T, Self>) {
        sorter.sort_bools_then(
            |value: &Option<K>| value.is_some(),
            &|s: &mut Sorter<'_, T, Option<K>>| {
                if s.first_item().is_none() {
                    s.skip();
                    return;
                }
                s.sort_key(|value: &Option<K>| match value {
                    Some(inner) => inner,
                    None => unreachable!("absent values were partitioned out"),
                });
            },
        );
    }

    fn radix_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a), Some(b)) => a.radix_cmp(b),
        }
    }
}
