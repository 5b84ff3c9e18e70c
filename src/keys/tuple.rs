//! Tuples and structs: fields are sorted one after another, each one completely
//! (including everything nested inside it) before the next.

use std::cmp::Ordering;

use crate::core::RadixKey;
use crate::sorter::Sorter;

/// Chains `sort_key_then` over a list of fields of `$ty`.
#[doc(hidden)]
#[macro_export]
macro_rules! __radix_field_chain {
    ($sorter:ident, $t:ident, $ty:ty; $field:tt) => {
        $sorter.sort_key(|value: &$ty| &value.$field)
    };
    ($sorter:ident, $t:ident, $ty:ty; $field:tt, $($rest:tt),+) => {
        $sorter.sort_key_then(
            |value: &$ty| &value.$field,
            &|$sorter: &mut $crate::Sorter<'_, $t, $ty>| {
                $crate::__radix_field_chain!($sorter, $t, $ty; $($rest),+)
            },
        )
    };
}

/// Implements [`RadixKey`](crate::RadixKey) for a struct, sorting by the listed fields in
/// order, like a derived `Ord` over those fields would.
///
/// Every listed field must itself implement `RadixKey`. Fields left out do not take part
/// in the order.
///
/// # Examples
///
/// ```
/// use skasort::{radix_key_struct, radix_sort};
///
/// #[derive(Debug, PartialEq)]
/// struct Version {
///     major: u16,
///     minor: u16,
///     label: String,
/// }
///
/// radix_key_struct!(Version { major, minor, label });
///
/// let mut versions = vec![
///     Version { major: 1, minor: 2, label: "b".into() },
///     Version { major: 0, minor: 9, label: "a".into() },
///     Version { major: 1, minor: 2, label: "a".into() },
/// ];
/// radix_sort(&mut versions);
/// assert_eq!(versions[0].major, 0);
/// assert_eq!(versions[1].label, "a");
/// assert_eq!(versions[2].label, "b");
/// ```
#[macro_export]
macro_rules! radix_key_struct {
    ($name:ty { $($field:tt),+ $(,)? }) => {
        impl $crate::RadixKey for $name {
            fn decompose<T>(sorter: &mut $crate::Sorter<'_, T, Self>) {
                $crate::__radix_field_chain!(sorter, T, Self; $($field),+);
            }

            fn radix_cmp(&self, other: &Self) -> ::core::cmp::Ordering {
                ::core::cmp::Ordering::Equal
                    $(.then_with(|| $crate::RadixKey::radix_cmp(&self.$field, &other.$field)))+
            }
        }
    };
}

macro_rules! impl_tuple {
    ($(($($name:ident $index:tt),+))+) => {
        $(
            impl<$($name: RadixKey),+> RadixKey for ($($name,)+) {
                fn decompose<T>(sorter: &mut Sorter<'_, T, Self>) {
                    $crate::__radix_field_chain!(sorter, T, Self; $($index),+);
                }

                fn radix_cmp(&self, other: &Self) -> Ordering {
                    Ordering::Equal $(.then_with(|| self.$index.radix_cmp(&other.$index)))+
                }
            }
        )+
    };
}

impl_tuple! {
    (A 0)
    (A 0, B 1)
    (A 0, B 1, C 2)
    (A 0, B 1, C 2, D 3)
    (A 0, B 1, C 2, D 3, E 4)
    (A 0, B 1, C 2, D 3, E 4, F 5)
    (A 0, B 1, C 2, D 3, E 4, F 5, G 6)
    (A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7)
    (A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8)
    (A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9)
    (A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10)
    (A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11)
}
