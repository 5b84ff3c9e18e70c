//! Tagged unions.
//!
//! Values are partitioned by tag first: tag `0` is reserved for values holding no
//! alternative, declared alternatives use their index plus one. Every run of one tag is
//! then sorted by that alternative's payload. Unions with 256 or more alternatives use a
//! wider tag, partitioned most significant byte first.

use std::cmp::Ordering;

use crate::core::TaggedUnion;
use crate::sorter::Sorter;

#[inline]
fn tag<U: TaggedUnion + ?Sized>(value: &U) -> usize {
    value.active_alternative().map_or(0, |index| index + 1)
}

fn tag_bytes<U: TaggedUnion + ?Sized>() -> usize {
    let mut bytes = 1;
    while U::ALTERNATIVES >> (bytes * 8) != 0 {
        bytes += 1;
    }
    bytes
}

/// Decomposition of a [`TaggedUnion`]: by tag, then by the active alternative's payload.
///
/// This is what [`radix_key_enum!`](crate::radix_key_enum) generates `decompose` from; call
/// it from a hand written [`RadixKey`](crate::RadixKey) impl for a `TaggedUnion`.
pub fn sort_tagged_union<T, U: TaggedUnion + ?Sized>(sorter: &mut Sorter<'_, T, U>) {
    sort_tag(sorter, 0, tag_bytes::<U>());
}

fn sort_tag<T, U: TaggedUnion + ?Sized>(sorter: &mut Sorter<'_, T, U>, level: usize, levels: usize) {
    let byte = move |value: &U| (tag(value) >> ((levels - 1 - level) * 8)) as u8;
    if level + 1 == levels {
        sorter.sort_bytes_then(byte, &|s: &mut Sorter<'_, T, U>| sort_payload(s));
    } else {
        sorter.sort_bytes_then(byte, &|s: &mut Sorter<'_, T, U>| {
            sort_tag(s, level + 1, levels)
        });
    }
}

fn sort_payload<T, U: TaggedUnion + ?Sized>(sorter: &mut Sorter<'_, T, U>) {
    match sorter.first_item().active_alternative() {
        Some(index) => U::decompose_alternative(sorter, index),
        None => sorter.skip(),
    }
}

/// Order matching [`sort_tagged_union`]: vacant values first, then by alternative, then
/// by payload.
pub fn tagged_cmp<U: TaggedUnion + ?Sized>(left: &U, right: &U) -> Ordering {
    match (left.active_alternative(), right.active_alternative()) {
        (Some(a), Some(b)) if a == b => left.cmp_alternative(right),
        (a, b) => a.cmp(&b),
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! __radix_alternative {
    ($sorter:ident, $name:ident, $variant:ident) => {
        $sorter.skip()
    };
    ($sorter:ident, $name:ident, $variant:ident, $payload:ty) => {
        $sorter.sort_key(|value: &$name| match value {
            $name::$variant(payload) => payload,
            _ => unreachable!("partition holds a single alternative"),
        })
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __radix_alternative_cmp {
    ($left:expr, $right:expr, $name:ident, $variant:ident) => {};
    ($left:expr, $right:expr, $name:ident, $variant:ident, $payload:ty) => {
        if let ($name::$variant(left), $name::$variant(right)) = ($left, $right) {
            return $crate::RadixKey::radix_cmp(left, right);
        }
    };
}

/// Implements [`TaggedUnion`] and [`RadixKey`](crate::RadixKey) for an enum whose variants
/// are unit variants or hold a single payload implementing `RadixKey`.
///
/// Values sort by variant in the order listed, then by payload. The list must name every
/// variant, in declaration order. A trailing `vacant Variant` names a unit variant standing
/// for "no value"; it sorts before all others and is not counted as an alternative.
///
/// # Examples
///
/// ```
/// use skasort::{radix_key_enum, radix_sort};
///
/// #[derive(Debug, PartialEq)]
/// enum Value {
///     Empty,
///     Int(i64),
///     Float(f64),
///     Text(String),
/// }
///
/// radix_key_enum!(Value { Int(i64), Float(f64), Text(String) } vacant Empty);
///
/// let mut values = vec![
///     Value::Text("foo".into()),
///     Value::Int(5),
///     Value::Float(1.0),
///     Value::Empty,
///     Value::Int(-1),
/// ];
/// radix_sort(&mut values);
/// assert_eq!(
///     values,
///     vec![
///         Value::Empty,
///         Value::Int(-1),
///         Value::Int(5),
///         Value::Float(1.0),
///         Value::Text("foo".into()),
///     ]
/// );
/// ```
#[macro_export]
macro_rules! radix_key_enum {
    ($name:ident { $($variant:ident $(($payload:ty))?),+ $(,)? }) => {
        $crate::radix_key_enum!(@impl $name [] { $($variant $(($payload))?),+ });
    };
    ($name:ident { $($variant:ident $(($payload:ty))?),+ $(,)? } vacant $vacant:ident) => {
        $crate::radix_key_enum!(@impl $name [$vacant] { $($variant $(($payload))?),+ });
    };
    (@impl $name:ident [$($vacant:ident)?] { $($variant:ident $(($payload:ty))?),+ }) => {
        impl $crate::TaggedUnion for $name {
            const ALTERNATIVES: usize = [$(stringify!($variant)),+].len();

            fn active_alternative(&self) -> ::core::option::Option<usize> {
                #[allow(dead_code, non_camel_case_types)]
                enum Alternative {
                    $($variant),+
                }

                match self {
                    $($name::$vacant { .. } => ::core::option::Option::None,)?
                    $($name::$variant { .. } => {
                        ::core::option::Option::Some(Alternative::$variant as usize)
                    })+
                }
            }

            #[allow(unreachable_patterns)]
            fn decompose_alternative<T>(sorter: &mut $crate::Sorter<'_, T, Self>, index: usize) {
                #[allow(dead_code, non_camel_case_types)]
                enum Alternative {
                    $($variant),+
                }

                $(
                    if index == Alternative::$variant as usize {
                        $crate::__radix_alternative!(sorter, $name, $variant $(, $payload)?);
                        return;
                    }
                )+
                unreachable!("alternative {index} is not declared");
            }

            #[allow(irrefutable_let_patterns, unused_variables)]
            fn cmp_alternative(&self, other: &Self) -> ::core::cmp::Ordering {
                $(
                    $crate::__radix_alternative_cmp!(self, other, $name, $variant $(, $payload)?);
                )+
                ::core::cmp::Ordering::Equal
            }
        }

        impl $crate::RadixKey for $name {
            fn decompose<T>(sorter: &mut $crate::Sorter<'_, T, Self>) {
                $crate::sort_tagged_union(sorter);
            }

            fn radix_cmp(&self, other: &Self) -> ::core::cmp::Ordering {
                $crate::tagged_cmp(self, other)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::{radix_sort, radix_sort_with_settings};
    use crate::core::RadixKey;
    use crate::settings::SortSettings;

    /// A union with 300 payload-free alternatives, or none when `None`.
    #[derive(Clone, Copy, Debug, PartialEq)]
    struct Wide(Option<u16>);

    impl TaggedUnion for Wide {
        const ALTERNATIVES: usize = 300;

        fn active_alternative(&self) -> Option<usize> {
            self.0.map(usize::from)
        }

        fn decompose_alternative<T>(sorter: &mut Sorter<'_, T, Self>, _index: usize) {
            sorter.skip();
        }

        fn cmp_alternative(&self, _other: &Self) -> Ordering {
            Ordering::Equal
        }
    }

    impl RadixKey for Wide {
        fn decompose<T>(sorter: &mut Sorter<'_, T, Self>) {
            sort_tagged_union(sorter);
        }

        fn radix_cmp(&self, other: &Self) -> Ordering {
            tagged_cmp(self, other)
        }
    }

    #[test]
    fn test_tag_width() {
        assert_eq!(tag_bytes::<Wide>(), 2);
        assert_eq!(tag(&Wide(None)), 0);
        assert_eq!(tag(&Wide(Some(0))), 1);
        assert_eq!(tag(&Wide(Some(299))), 300);
    }

    /// A payload-free union with `N` alternatives.
    #[derive(Clone, Copy, Debug, PartialEq)]
    struct Arity<const N: usize>(Option<usize>);

    impl<const N: usize> TaggedUnion for Arity<N> {
        const ALTERNATIVES: usize = N;

        fn active_alternative(&self) -> Option<usize> {
            self.0
        }

        fn decompose_alternative<T>(sorter: &mut Sorter<'_, T, Self>, _index: usize) {
            sorter.skip();
        }

        fn cmp_alternative(&self, _other: &Self) -> Ordering {
            Ordering::Equal
        }
    }

    impl<const N: usize> RadixKey for Arity<N> {
        fn decompose<T>(sorter: &mut Sorter<'_, T, Self>) {
            sort_tagged_union(sorter);
        }

        fn radix_cmp(&self, other: &Self) -> Ordering {
            tagged_cmp(self, other)
        }
    }

    #[test]
    fn test_tag_width_boundaries() {
        // Tag 0 is reserved, so 255 alternatives still fit one byte.
        assert_eq!(tag_bytes::<Arity<1>>(), 1);
        assert_eq!(tag_bytes::<Arity<255>>(), 1);
        assert_eq!(tag_bytes::<Arity<256>>(), 2);
        assert_eq!(tag_bytes::<Arity<65_535>>(), 2);
        assert_eq!(tag_bytes::<Arity<65_536>>(), 3);
        assert_eq!(tag(&Arity::<255>(Some(254))), 255);
    }

    #[test]
    fn test_sort_across_one_byte_tag_limit() {
        let mut narrow: Vec<Arity<255>> = (0..2000usize)
            .map(|i| Arity((i % 9 != 0).then_some(i * 31 % 255)))
            .collect();
        radix_sort(&mut narrow);
        assert!(narrow.windows(2).all(|pair| tagged_cmp(&pair[0], &pair[1]).is_le()));
        assert_eq!(narrow[0], Arity(None));
        assert_eq!(narrow[narrow.len() - 1], Arity(Some(254)));

        let mut wide: Vec<Arity<256>> = (0..2000usize)
            .map(|i| Arity((i % 9 != 0).then_some(i * 31 % 256)))
            .collect();
        radix_sort_with_settings(&mut wide, &SortSettings::american_flag_only());
        assert!(wide.windows(2).all(|pair| tagged_cmp(&pair[0], &pair[1]).is_le()));
        assert_eq!(wide[wide.len() - 1], Arity(Some(255)));
    }

    #[test]
    fn test_wide_tags_sort_by_alternative() {
        let input: Vec<Wide> = (0..3000u32)
            .map(|i| Wide((i % 7 != 0).then_some((i * 37 % 300) as u16)))
            .collect();

        for settings in [
            SortSettings::default(),
            SortSettings::american_flag_only(),
            SortSettings::ska_byte_only(),
        ] {
            let mut data = input.clone();
            radix_sort_with_settings(&mut data, &settings);
            assert!(data.windows(2).all(|pair| pair[0].0 <= pair[1].0), "{settings:?}");
        }

        let mut data = vec![Wide(Some(256)), Wide(Some(255)), Wide(None), Wide(Some(1))];
        radix_sort(&mut data);
        assert_eq!(
            data,
            vec![Wide(None), Wide(Some(1)), Wide(Some(255)), Wide(Some(256))]
        );
    }
}
