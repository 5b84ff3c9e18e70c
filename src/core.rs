//! Core traits and types for skasort.
//!
//! This module defines:
//! - [`RadixKey`]: the trait every sortable key implements, describing how a value breaks
//!   down into bytes, booleans and nested keys.
//! - [`ByteKey`]: a shortcut for fixed-width keys made of a known number of bytes.
//! - [`Sequence`] and [`IndexedSequence`]: the hooks containers implement to be sorted
//!   lexicographically by their elements.
//! - [`TaggedUnion`]: the hook behind [`radix_key_enum!`](crate::radix_key_enum).

use std::cmp::Ordering;

use crate::sorter::Sorter;

/// A key that can be radix sorted.
///
/// [`decompose`](RadixKey::decompose) receives a [`Sorter`] over a partition whose keys all
/// agree on everything decomposed so far, and issues exactly one step on it: a byte or
/// boolean partition, a projection into a sub-key, a skip or a comparison fallback.
/// [`radix_cmp`](RadixKey::radix_cmp) is the total order that decomposition produces; it
/// is used for small partitions and must agree with the byte order.
///
/// # Examples
///
/// A newtype forwarding to the key it wraps:
///
/// ```
/// use std::cmp::Ordering;
/// use skasort::{radix_sort, RadixKey, Sorter};
///
/// #[derive(Debug, PartialEq)]
/// struct UserId(u32);
///
/// impl RadixKey for UserId {
///     fn decompose<T>(sorter: &mut Sorter<'_, T, Self>) {
///         sorter.sort_key(|id: &UserId| &id.0);
///     }
///
///     fn radix_cmp(&self, other: &Self) -> Ordering {
///         self.0.cmp(&other.0)
///     }
/// }
///
/// let mut data = vec![UserId(3), UserId(1), UserId(2)];
/// radix_sort(&mut data);
/// assert_eq!(data, vec![UserId(1), UserId(2), UserId(3)]);
/// ```
pub trait RadixKey {
    /// Issues the sorting step for a partition of values of this type.
    fn decompose<T>(sorter: &mut Sorter<'_, T, Self>);

    /// Total order consistent with [`decompose`](RadixKey::decompose).
    fn radix_cmp(&self, other: &Self) -> Ordering;

    /// Lexicographic order of two slices of keys.
    ///
    /// Sequence keys use this once their leading elements are known to be equal.
    /// Types with a native slice ordering override it.
    fn slice_cmp(left: &[Self], right: &[Self]) -> Ordering
    where
        Self: Sized,
    {
        lexicographic_cmp(left.iter(), right.iter())
    }
}

/// A key made of a fixed number of bytes, most significant first.
///
/// Implement this together with a [`RadixKey`] whose `decompose` calls
/// [`Sorter::sort_byte_levels`].
pub trait ByteKey {
    /// Number of bytes in the key.
    const LEVELS: usize;

    /// Byte `level` of the key, `0` being the most significant.
    fn get_level(&self, level: usize) -> u8;
}

/// A container read front to back through a cursor.
///
/// This is all the engine needs from a container it cannot index: the cursor is cloned and
/// advanced, and elements are compared with their [`RadixKey`] order. Such containers are
/// sorted through `(cursor, index)` proxies, so the containers themselves are only moved
/// once, when the final permutation is applied.
///
/// To make a container sortable, implement this trait and a [`RadixKey`] that delegates to
/// [`Sorter::sort_sequence`].
pub trait Sequence {
    type Element: RadixKey;

    type Cursor<'a>: Iterator<Item = &'a Self::Element> + Clone
    where
        Self: 'a;

    /// Cursor positioned on the first element.
    fn cursor(&self) -> Self::Cursor<'_>;
}

/// A container with random access to its elements.
///
/// Implement this together with a [`RadixKey`] that delegates to [`Sorter::sort_indexed`].
pub trait IndexedSequence {
    type Element: RadixKey;

    fn element_count(&self) -> usize;

    /// Element at `index`, which is always below [`element_count`](Self::element_count).
    fn element(&self, index: usize) -> &Self::Element;

    /// Compares the elements from `from` onwards, then the lengths.
    fn tail_cmp(&self, other: &Self, from: usize) -> Ordering {
        lexicographic_cmp(
            (from..self.element_count()).map(|i| self.element(i)),
            (from..other.element_count()).map(|i| other.element(i)),
        )
    }
}

/// A sum type whose alternatives are sorted by declaration order, then by payload.
///
/// Usually implemented through [`radix_key_enum!`](crate::radix_key_enum).
pub trait TaggedUnion {
    /// Number of declared alternatives, not counting a vacant state.
    const ALTERNATIVES: usize;

    /// Declaration index of the active alternative, or `None` for a value that holds
    /// none. Such values sort before every alternative.
    fn active_alternative(&self) -> Option<usize>;

    /// Sorts a partition whose values all hold alternative `index`, by payload.
    fn decompose_alternative<T>(sorter: &mut Sorter<'_, T, Self>, index: usize);

    /// Compares the payloads of two values holding the same alternative.
    fn cmp_alternative(&self, other: &Self) -> Ordering;
}

/// Element-wise lexicographic comparison where a proper prefix sorts first.
pub fn lexicographic_cmp<'l, 'r, E, L, R>(mut left: L, mut right: R) -> Ordering
where
    E: RadixKey + ?Sized + 'l + 'r,
    L: Iterator<Item = &'l E>,
    R: Iterator<Item = &'r E>,
{
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => match l.radix_cmp(r) {
                Ordering::Equal => {}
                unequal => return unequal,
            },
        }
    }
}
